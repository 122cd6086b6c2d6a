//! Prediction result types.
//!
//! Represents the output of the remote churn prediction service and its
//! local interpretation.

use serde::{Deserialize, Serialize};

use super::customer::CustomerRecord;

/// Risk tier classification for customer churn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RiskTier {
    /// Low churn risk
    Low,
    /// Medium risk, retention outreach worth considering
    Medium,
    /// High risk, retention action recommended
    High,
}

impl RiskTier {
    /// Classify a churn probability into a tier.
    ///
    /// Thresholds are closed-open intervals evaluated low to high:
    /// `p < 0.3` is Low, `0.3 <= p < 0.7` is Medium, `p >= 0.7` is High.
    /// The remote service is expected to return probabilities in [0, 1];
    /// out-of-range values are clamped before classification.
    #[must_use]
    pub fn from_probability(probability: f64) -> Self {
        let p = probability.clamp(0.0, 1.0);
        if p < 0.3 {
            Self::Low
        } else if p < 0.7 {
            Self::Medium
        } else {
            Self::High
        }
    }

    /// Get a human-readable description.
    #[must_use]
    pub fn description(&self) -> &'static str {
        match self {
            Self::Low => "Low risk - Customer likely to stay",
            Self::Medium => "Medium risk - Retention outreach recommended",
            Self::High => "High risk - Immediate retention action advised",
        }
    }
}

impl std::fmt::Display for RiskTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Low => write!(f, "LOW"),
            Self::Medium => write!(f, "MEDIUM"),
            Self::High => write!(f, "HIGH"),
        }
    }
}

/// Raw response from the prediction service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PredictionResult {
    /// Categorical churn label, e.g. "Yes" / "No"
    pub prediction: String,

    /// Churn probability in [0, 1]
    pub probability: f64,
}

/// A completed prediction: the submitted record, the service response and
/// the derived risk tier, timestamped for export.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Assessment {
    /// The customer record as it was sent to the service
    pub customer: CustomerRecord,

    /// The service's prediction
    pub result: PredictionResult,

    /// Risk classification derived from the probability
    pub risk_tier: RiskTier,

    /// Timestamp of the prediction
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl Assessment {
    /// Create a new assessment from a submitted record and its result.
    #[must_use]
    pub fn new(customer: CustomerRecord, result: PredictionResult) -> Self {
        Self {
            risk_tier: RiskTier::from_probability(result.probability),
            customer,
            result,
            created_at: chrono::Utc::now(),
        }
    }
}
