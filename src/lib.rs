//! # churnscope
//!
//! Terminal client for a remote customer churn prediction service.
//!
//! This crate provides:
//! - An interactive customer data form with local range validation
//! - A blocking HTTP client for the remote inference endpoint
//! - Risk-tier classification and rule-based risk factor indicators
//! - Session statistics and CSV export of prediction results
//!
//! ## Architecture
//!
//! The crate follows Hexagonal Architecture:
//! - `domain`: Core business types (CustomerRecord, Assessment, RiskTier)
//! - `ports`: Trait definition for the remote prediction service
//! - `adapters`: Concrete reqwest-based HTTP implementation
//! - `application`: Use cases orchestrating domain and ports
//! - `tui`: Terminal user interface

pub mod adapters;
pub mod application;
pub mod domain;
pub mod ports;
pub mod tui;

pub use domain::{Assessment, CustomerRecord, PredictionResult, RiskTier};

/// Result type for churnscope operations
pub type Result<T> = std::result::Result<T, ChurnscopeError>;

/// Main error type for churnscope
#[derive(Debug, thiserror::Error)]
pub enum ChurnscopeError {
    #[error("Input validation failed: {}", .0.join("; "))]
    Validation(Vec<String>),

    #[error(transparent)]
    Prediction(#[from] ports::PredictionError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
