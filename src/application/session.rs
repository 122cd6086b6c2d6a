//! Session-scoped prediction state.
//!
//! Lives for the duration of one interactive session and is discarded at
//! session end. Passed by reference to whoever renders it; never a global.

use crate::domain::Assessment;

/// State accumulated across repeated predictions within one session.
#[derive(Debug, Default)]
pub struct SessionState {
    prediction_made: bool,
    predictions_count: u64,
    last_assessment: Option<Assessment>,
}

impl SessionState {
    /// A fresh session: no predictions yet.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a successful prediction.
    ///
    /// Called exactly once per successful backend call; never on validation
    /// or transport failure. The count only ever increases within a session.
    pub fn record_prediction(&mut self, assessment: Assessment) {
        self.last_assessment = Some(assessment);
        self.prediction_made = true;
        self.predictions_count += 1;
    }

    /// Whether at least one prediction has completed this session.
    #[must_use]
    pub fn prediction_made(&self) -> bool {
        self.prediction_made
    }

    /// Number of successful predictions this session.
    #[must_use]
    pub fn predictions_count(&self) -> u64 {
        self.predictions_count
    }

    /// The most recent successful prediction, if any.
    #[must_use]
    pub fn last_assessment(&self) -> Option<&Assessment> {
        self.last_assessment.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{CustomerRecord, PredictionResult, RiskTier};

    fn assessment(probability: f64) -> Assessment {
        Assessment::new(
            CustomerRecord::default(),
            PredictionResult {
                prediction: "No".to_string(),
                probability,
            },
        )
    }

    #[test]
    fn test_new_session_is_empty() {
        let session = SessionState::new();
        assert!(!session.prediction_made());
        assert_eq!(session.predictions_count(), 0);
        assert!(session.last_assessment().is_none());
    }

    #[test]
    fn test_count_increments_once_per_prediction() {
        let mut session = SessionState::new();
        for i in 1..=5u64 {
            session.record_prediction(assessment(0.1 * i as f64));
            assert_eq!(session.predictions_count(), i);
        }
        assert!(session.prediction_made());
    }

    #[test]
    fn test_last_assessment_is_overwritten() {
        let mut session = SessionState::new();
        session.record_prediction(assessment(0.9));
        session.record_prediction(assessment(0.23));

        let last = session.last_assessment().expect("Should have a result");
        assert!((last.result.probability - 0.23).abs() < f64::EPSILON);
        assert_eq!(last.risk_tier, RiskTier::Low);
        assert_eq!(session.predictions_count(), 2);
    }
}
