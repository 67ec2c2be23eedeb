//! Port definitions (interfaces)
//!
//! Ports define the boundaries between the application core and external systems.
//! Each port is a trait that can be implemented by adapters in the infrastructure layer.

mod assertions;
mod http_client;

pub use assertions::AssertionEvaluator;
pub use http_client::{HttpClient, HttpClientError};
