//! HTTP adapter for the remote prediction service.
//!
//! A thin reqwest-based client. Timeouts are applied per request because the
//! three endpoints have very different latency profiles: predictions may hit
//! a cold-started model server, while readiness probes should fail fast.

use std::time::Duration;

use crate::domain::{CustomerRecord, PredictionResult};
use crate::ports::{PredictionBackend, PredictionError};

/// Timeout for the prediction call itself.
const PREDICT_TIMEOUT: Duration = Duration::from_secs(30);

/// Timeout for the readiness probe.
const READY_TIMEOUT: Duration = Duration::from_secs(5);

/// Timeout for the fire-and-forget wake probe.
const WAKE_TIMEOUT: Duration = Duration::from_secs(15);

/// Blocking HTTP client for the churn prediction service.
#[derive(Debug, Clone)]
pub struct HttpPredictionClient {
    base_url: String,
    client: reqwest::blocking::Client,
    predict_timeout: Duration,
    ready_timeout: Duration,
    wake_timeout: Duration,
}

impl HttpPredictionClient {
    /// Create a client for the service at `base_url` with default timeouts.
    ///
    /// # Errors
    /// Returns error if the underlying HTTP client cannot be constructed.
    pub fn new(base_url: impl Into<String>) -> anyhow::Result<Self> {
        let client = reqwest::blocking::Client::builder().build()?;

        Ok(Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            client,
            predict_timeout: PREDICT_TIMEOUT,
            ready_timeout: READY_TIMEOUT,
            wake_timeout: WAKE_TIMEOUT,
        })
    }

    /// Override timeouts (tests use short ones).
    #[must_use]
    pub fn with_timeouts(mut self, predict: Duration, ready: Duration, wake: Duration) -> Self {
        self.predict_timeout = predict;
        self.ready_timeout = ready;
        self.wake_timeout = wake;
        self
    }

    /// The configured service base URL.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Fire a one-shot wake-up probe on a detached thread.
    ///
    /// Cold-started model servers can take tens of seconds to spin up; this
    /// opportunistically gets that started at session start. The outcome is
    /// discarded and never blocks or fails the real prediction request.
    pub fn wake_in_background(&self) {
        let client = self.client.clone();
        let url = self.base_url.clone();
        let timeout = self.wake_timeout;

        std::thread::spawn(move || match client.get(&url).timeout(timeout).send() {
            Ok(response) => {
                tracing::debug!("Wake probe answered with status {}", response.status());
            }
            Err(e) => {
                tracing::debug!("Wake probe failed (ignored): {e}");
            }
        });
    }
}

/// Map a reqwest transport failure onto the error taxonomy.
fn categorize_transport(e: reqwest::Error) -> PredictionError {
    if e.is_timeout() {
        PredictionError::Timeout
    } else {
        PredictionError::Unreachable(e.to_string())
    }
}

impl PredictionBackend for HttpPredictionClient {
    fn predict(&self, record: &CustomerRecord) -> Result<PredictionResult, PredictionError> {
        let url = format!("{}/predict", self.base_url);
        tracing::debug!("Submitting prediction request to {url}");

        let response = self
            .client
            .post(&url)
            .timeout(self.predict_timeout)
            .json(record)
            .send()
            .map_err(categorize_transport)?;

        let status = response.status();
        let body = response.text().map_err(categorize_transport)?;

        if !status.is_success() {
            return Err(PredictionError::Api {
                status: status.as_u16(),
                body,
            });
        }

        let result: PredictionResult =
            serde_json::from_str(&body).map_err(|e| PredictionError::Parse(e.to_string()))?;

        tracing::info!(
            "Prediction received: label={}, probability={:.4}",
            result.prediction,
            result.probability
        );

        Ok(result)
    }

    fn check_ready(&self) -> Result<(), PredictionError> {
        let url = format!("{}/docs", self.base_url);

        let response = self
            .client
            .get(&url)
            .timeout(self.ready_timeout)
            .send()
            .map_err(categorize_transport)?;

        let status = response.status();
        if status.is_success() {
            Ok(())
        } else {
            let body = response.text().unwrap_or_default();
            Err(PredictionError::Api {
                status: status.as_u16(),
                body,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_trailing_slash_is_trimmed() {
        let client = HttpPredictionClient::new("http://127.0.0.1:8000/").expect("Should build");
        assert_eq!(client.base_url(), "http://127.0.0.1:8000");
    }
}
