//! TUI module: Terminal User Interface using Ratatui.
//!
//! Provides a churn-analytics interface for:
//! - Dashboard with service status and session stats
//! - Customer data input
//! - Prediction progress and result visualization

mod app;
mod styles;
mod ui;
mod worker;

pub use app::App;
pub use styles::ChurnTheme;
pub use worker::{PredictionProgress, PredictionWorker, PredictionWorkerHandle};
