//! Contract cases

use dictcheck_domain::{
    Assertion, LookupRequest, NOT_FOUND_TITLE, TestSuite, TransportErrorKind,
};

use super::VerifierSettings;

/// A word the dictionary is known to define.
pub const VALID_WORD: &str = "hello";
/// A token guaranteed absent from the dictionary.
pub const MISSING_WORD: &str = "nonexistentword123";
/// A plural form the dictionary resolves.
pub const PLURAL_WORD: &str = "dogs";
/// A token made only of non-alphanumeric characters.
pub const SPECIAL_TOKEN: &str = "!@#$%";
/// A path that is not a recognized route under the base.
pub const UNKNOWN_ROUTE: &str = "nonexistent-endpoint";

/// Which base URL a case targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaseTarget {
    /// The dictionary API base.
    Api,
    /// The non-resolving host.
    Unreachable,
}

/// What a case expects back.
#[derive(Debug, Clone, PartialEq)]
pub enum Expectation {
    /// A response that satisfies every assertion of the suite.
    Response(TestSuite),
    /// A transport error with the given code and no response at all.
    TransportError {
        /// Expected errno-style code.
        code: &'static str,
    },
}

/// The fixed set of independent checks run against the API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContractCase {
    /// Known word returns its entries.
    ValidWord,
    /// Unknown word returns the not-found descriptor.
    InvalidWord,
    /// Non-resolving host fails with `ENOTFOUND`.
    UnreachableHost,
    /// Plural word resolves to an entry containing it.
    PluralWord,
    /// Special-character token returns the not-found descriptor.
    SpecialCharacters,
    /// Concurrent lookups of a known word all succeed.
    ConcurrentRequests,
    /// Unrecognized route returns 404.
    UnknownEndpoint,
}

impl ContractCase {
    /// Every case, in run order.
    pub const ALL: [Self; 7] = [
        Self::ValidWord,
        Self::InvalidWord,
        Self::UnreachableHost,
        Self::PluralWord,
        Self::SpecialCharacters,
        Self::ConcurrentRequests,
        Self::UnknownEndpoint,
    ];

    /// Stable snake_case name.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::ValidWord => "valid_word_lookup",
            Self::InvalidWord => "invalid_word_lookup",
            Self::UnreachableHost => "unreachable_host",
            Self::PluralWord => "plural_word_lookup",
            Self::SpecialCharacters => "special_character_token",
            Self::ConcurrentRequests => "concurrent_requests",
            Self::UnknownEndpoint => "unknown_endpoint",
        }
    }

    /// Looks a case up by its stable name.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|case| case.name() == name)
    }

    /// One-line description for reports.
    #[must_use]
    pub const fn description(&self) -> &'static str {
        match self {
            Self::ValidWord => "returns word details for a valid word",
            Self::InvalidWord => "returns 404 for an invalid word",
            Self::UnreachableHost => "fails with ENOTFOUND when the host does not resolve",
            Self::PluralWord => "returns details for a plural word",
            Self::SpecialCharacters => "returns 404 for a word with special characters",
            Self::ConcurrentRequests => "serves concurrent requests without error",
            Self::UnknownEndpoint => "returns 404 for a non-existent endpoint",
        }
    }

    /// Which base URL the case targets.
    #[must_use]
    pub const fn target(&self) -> CaseTarget {
        match self {
            Self::UnreachableHost => CaseTarget::Unreachable,
            _ => CaseTarget::Api,
        }
    }

    /// Builds the request descriptor for this case.
    #[must_use]
    pub fn request(&self, settings: &VerifierSettings) -> LookupRequest {
        match self {
            Self::ValidWord | Self::ConcurrentRequests => {
                LookupRequest::new(&settings.base_url, VALID_WORD)
            }
            Self::InvalidWord => LookupRequest::new(&settings.base_url, MISSING_WORD),
            Self::UnreachableHost => LookupRequest::with_path(
                &settings.unreachable_base_url,
                ["entries", "en", VALID_WORD],
            ),
            Self::PluralWord => LookupRequest::new(&settings.base_url, PLURAL_WORD),
            Self::SpecialCharacters => LookupRequest::new(&settings.base_url, SPECIAL_TOKEN),
            Self::UnknownEndpoint => LookupRequest::new(&settings.base_url, UNKNOWN_ROUTE),
        }
    }

    /// How many identical requests the case issues.
    #[must_use]
    pub const fn fan_out(&self, settings: &VerifierSettings) -> usize {
        match self {
            Self::ConcurrentRequests => settings.concurrent_requests,
            _ => 1,
        }
    }

    /// What the case expects back.
    #[must_use]
    pub fn expectation(&self) -> Expectation {
        let suite = TestSuite::new(self.name()).stop_on_failure();
        let suite = match self {
            Self::UnreachableHost => {
                return Expectation::TransportError {
                    code: TransportErrorKind::HOST_NOT_FOUND,
                };
            }
            Self::ValidWord => suite
                .with_assertion(Assertion::status(200))
                .with_assertion(Assertion::IsJson)
                .with_assertion(Assertion::json_exists("$[0]"))
                .with_assertion(Assertion::json_equals("$[0].word", VALID_WORD)),
            Self::PluralWord => suite
                .with_assertion(Assertion::status(200))
                .with_assertion(Assertion::IsJson)
                .with_assertion(Assertion::json_exists("$[0]"))
                .with_assertion(Assertion::json_contains("$[0].word", PLURAL_WORD)),
            Self::InvalidWord | Self::SpecialCharacters => suite
                .with_assertion(Assertion::status(404))
                .with_assertion(Assertion::IsJson)
                .with_assertion(Assertion::json_equals("$.title", NOT_FOUND_TITLE)),
            Self::ConcurrentRequests => suite.with_assertion(Assertion::status(200)),
            Self::UnknownEndpoint => suite.with_assertion(Assertion::status(404)),
        };
        Expectation::Response(suite)
    }
}

impl std::fmt::Display for ContractCase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
