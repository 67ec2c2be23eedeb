//! dictcheck Domain - Core contract types
//!
//! This crate defines the domain model for verifying the dictionary
//! lookup API: request descriptors, response snapshots, the records the
//! API returns, and the declarative assertions run against them.
//! All types here are pure Rust with no I/O dependencies.

pub mod dictionary;
pub mod error;
pub mod report;
pub mod request;
pub mod response;
pub mod testing;
pub mod transport;

pub use dictionary::{
    Definition, License, LookupEntry, Meaning, NOT_FOUND_TITLE, NotFoundBody, Phonetic,
};
pub use error::{DomainError, DomainResult};
pub use report::{CaseOutcome, CaseReport, ContractReport};
pub use request::LookupRequest;
pub use response::{ResponseSpec, StatusCode};
pub use testing::{Assertion, AssertionResult, TestResults, TestSuite};
pub use transport::TransportErrorKind;
