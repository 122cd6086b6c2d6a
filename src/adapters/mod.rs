//! Adapters layer: Concrete implementations of the ports.

mod http;

pub use http::HttpPredictionClient;
