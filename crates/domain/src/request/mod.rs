//! Lookup request domain types

mod spec;

pub use spec::LookupRequest;
