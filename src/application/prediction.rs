//! Prediction service: orchestrates validation and the remote call.
//!
//! Control flow: recompute derived total, validate, and only then hit the
//! network. Validation failure short-circuits before any request is made.

use std::sync::Arc;

use crate::domain::{Assessment, CustomerRecord};
use crate::ports::PredictionBackend;
use crate::ChurnscopeError;

/// Service for running churn predictions against a backend.
pub struct PredictionService<B>
where
    B: PredictionBackend,
{
    backend: Arc<B>,
}

impl<B> PredictionService<B>
where
    B: PredictionBackend,
{
    /// Create a new prediction service.
    pub fn new(backend: Arc<B>) -> Self {
        Self { backend }
    }

    /// Run a full prediction: derive total charges, validate, submit.
    ///
    /// Does not touch session state; the caller records the assessment on
    /// success so failures leave the session exactly as it was.
    ///
    /// # Errors
    /// Returns `ChurnscopeError::Validation` with all violations if the
    /// record is out of range, or a categorized prediction error from the
    /// backend.
    pub fn run_prediction(
        &self,
        mut record: CustomerRecord,
    ) -> Result<Assessment, ChurnscopeError> {
        // Total charges is always derived at submission, never trusted from input.
        record.recompute_total();

        let errors = record.validate();
        if !errors.is_empty() {
            return Err(ChurnscopeError::Validation(errors));
        }

        tracing::info!(
            "Submitting prediction: tenure={}, monthly={:.2}, total={:.2}",
            record.tenure,
            record.monthly_charges,
            record.total_charges
        );

        let result = self.backend.predict(&record)?;
        let assessment = Assessment::new(record, result);

        tracing::info!(
            "Prediction complete: label={}, probability={:.4}, risk={}",
            assessment.result.prediction,
            assessment.result.probability,
            assessment.risk_tier
        );

        Ok(assessment)
    }

    /// Probe service readiness.
    ///
    /// # Errors
    /// Returns error if the service is unreachable or unhealthy.
    pub fn check_ready(&self) -> Result<(), ChurnscopeError> {
        self.backend.check_ready()?;
        Ok(())
    }
}
