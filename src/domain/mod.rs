//! Domain layer: Core business types and logic.
//!
//! This module contains pure Rust types with no external dependencies.
//! All types are serializable and implement strict validation.

mod assessment;
mod customer;

pub use assessment::{Assessment, PredictionResult, RiskTier};
pub use customer::{
    Contract, CustomerRecord, Gender, InternetAddon, InternetService, MultipleLines,
    PaymentMethod, YesNo,
};
