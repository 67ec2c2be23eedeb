//! Use cases for the application layer.

mod verify_contract;

pub use verify_contract::{RequestOutcome, VerifyContract};
