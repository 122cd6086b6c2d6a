//! Prediction port: Trait for the remote churn inference service.
//!
//! Abstracts the HTTP backend from the application logic so tests can
//! substitute a stub service.

use crate::domain::{CustomerRecord, PredictionResult};

/// Errors from the prediction backend, categorized so the UI can render
/// different guidance for each failure mode.
#[derive(Debug, thiserror::Error)]
pub enum PredictionError {
    /// The service could not be reached at all.
    #[error("Connection error: unable to connect to the prediction service ({0})")]
    Unreachable(String),

    /// The service accepted the connection but did not answer in time.
    #[error("Timeout error: the prediction service is taking too long to respond")]
    Timeout,

    /// The service answered with a non-200 status. Carries the raw body for
    /// diagnosis; never retried automatically.
    #[error("API error: {status} - {body}")]
    Api { status: u16, body: String },

    /// A 200 response whose body could not be parsed.
    #[error("Malformed response from the prediction service: {0}")]
    Parse(String),
}

/// Trait for remote prediction operations.
///
/// Every call is a single best-effort attempt: no retries, no backoff.
pub trait PredictionBackend: Send + Sync {
    /// Submit a validated record and return the service's prediction.
    ///
    /// # Errors
    /// Returns a categorized [`PredictionError`] on any failure. The caller
    /// is responsible for updating session state on success.
    fn predict(&self, record: &CustomerRecord) -> Result<PredictionResult, PredictionError>;

    /// Probe whether the service is reachable and ready.
    ///
    /// # Errors
    /// Returns error if the probe fails or the service responds with an error.
    fn check_ready(&self) -> Result<(), PredictionError>;
}
