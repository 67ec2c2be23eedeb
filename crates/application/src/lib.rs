//! dictcheck Application - Contract cases, use cases and ports
//!
//! This crate defines the application layer with:
//! - Port traits (HTTP transport, assertion evaluation)
//! - The fixed set of contract cases run against the dictionary API
//! - The `VerifyContract` use case that executes them

pub mod contract;
pub mod error;
pub mod ports;
pub mod use_cases;

pub use contract::{
    CaseTarget, ContractCase, DEFAULT_BASE_URL, DEFAULT_UNREACHABLE_BASE_URL, Expectation,
    VerifierSettings,
};
pub use error::{ApplicationError, ApplicationResult};
pub use ports::{AssertionEvaluator, HttpClient, HttpClientError};
pub use use_cases::{RequestOutcome, VerifyContract};
