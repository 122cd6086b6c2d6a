//! Ports layer: Trait definitions for external operations.
//!
//! Following Hexagonal Architecture, these traits define the boundary
//! between the application and the remote prediction service.

mod prediction;

pub use prediction::{PredictionBackend, PredictionError};
