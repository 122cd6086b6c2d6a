//! Application layer: Use cases and services.
//!
//! This module orchestrates domain logic with ports to implement
//! the core use cases of the application.

mod export;
mod prediction;
mod session;

pub use export::{export_csv, write_export};
pub use prediction::PredictionService;
pub use session::SessionState;
