//! The dictionary API contract.
//!
//! This module names the fixed cases the verifier runs and the settings
//! that point them at an endpoint.

mod case;
mod settings;

pub use case::{
    CaseTarget, ContractCase, Expectation, MISSING_WORD, PLURAL_WORD, SPECIAL_TOKEN,
    UNKNOWN_ROUTE, VALID_WORD,
};
pub use settings::{DEFAULT_BASE_URL, DEFAULT_UNREACHABLE_BASE_URL, VerifierSettings};
