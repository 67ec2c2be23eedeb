//! Response assertions.
//!
//! This module provides the declarative checks a contract case runs
//! against an API response, and the results they produce.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A test assertion to run against a response.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Assertion {
    /// Check response status code.
    StatusCode {
        /// Expected status code.
        expected: u16,
    },
    /// Check body is valid JSON.
    IsJson,
    /// Check JSON path exists and optionally its value.
    JsonPath {
        /// JSONPath expression (e.g., "$[0].word").
        path: String,
        /// Expected value (as JSON).
        expected: Option<serde_json::Value>,
    },
    /// Check the string at a JSON path contains a substring.
    JsonContains {
        /// JSONPath expression.
        path: String,
        /// Substring that must be present.
        needle: String,
    },
}

impl Assertion {
    /// Status must equal `code`.
    #[must_use]
    pub const fn status(code: u16) -> Self {
        Self::StatusCode { expected: code }
    }

    /// Value at `path` must exist.
    #[must_use]
    pub fn json_exists(path: impl Into<String>) -> Self {
        Self::JsonPath {
            path: path.into(),
            expected: None,
        }
    }

    /// Value at `path` must equal `expected`.
    #[must_use]
    pub fn json_equals(path: impl Into<String>, expected: impl Into<serde_json::Value>) -> Self {
        Self::JsonPath {
            path: path.into(),
            expected: Some(expected.into()),
        }
    }

    /// String at `path` must contain `needle`.
    #[must_use]
    pub fn json_contains(path: impl Into<String>, needle: impl Into<String>) -> Self {
        Self::JsonContains {
            path: path.into(),
            needle: needle.into(),
        }
    }

    /// Get a human-readable description of this assertion.
    #[must_use]
    pub fn description(&self) -> String {
        match self {
            Self::StatusCode { expected } => format!("Status code = {expected}"),
            Self::IsJson => "Body is valid JSON".to_string(),
            Self::JsonPath {
                path,
                expected: Some(v),
            } => format!("JSON {path} equals {v}"),
            Self::JsonPath {
                path,
                expected: None,
            } => format!("JSON {path} exists"),
            Self::JsonContains { path, needle } => format!("JSON {path} contains {needle:?}"),
        }
    }
}

/// Result of running a single assertion.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssertionResult {
    /// The assertion that was run.
    pub assertion: Assertion,
    /// Whether the assertion passed.
    pub passed: bool,
    /// Actual value found (for display).
    pub actual: Option<String>,
    /// Error message if failed.
    pub error: Option<String>,
}

impl AssertionResult {
    /// Create a passed result.
    #[must_use]
    pub fn pass(assertion: Assertion) -> Self {
        Self {
            assertion,
            passed: true,
            actual: None,
            error: None,
        }
    }

    /// Create a passed result with actual value.
    #[must_use]
    pub fn pass_with_value(assertion: Assertion, actual: impl Into<String>) -> Self {
        Self {
            assertion,
            passed: true,
            actual: Some(actual.into()),
            error: None,
        }
    }

    /// Create a failed result.
    #[must_use]
    pub fn fail(assertion: Assertion, error: impl Into<String>) -> Self {
        Self {
            assertion,
            passed: false,
            actual: None,
            error: Some(error.into()),
        }
    }

    /// Create a failed result with actual value.
    #[must_use]
    pub fn fail_with_value(
        assertion: Assertion,
        actual: impl Into<String>,
        error: impl Into<String>,
    ) -> Self {
        Self {
            assertion,
            passed: false,
            actual: Some(actual.into()),
            error: Some(error.into()),
        }
    }
}

/// A named group of assertions run against one response.
///
/// Equality ignores `id`: two suites with the same name and assertions
/// describe the same check.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TestSuite {
    /// Unique identifier.
    #[serde(default = "generate_id")]
    pub id: Uuid,
    /// Test suite name.
    pub name: String,
    /// Assertions to run.
    #[serde(default)]
    pub assertions: Vec<Assertion>,
    /// Whether to stop on first failure.
    #[serde(default)]
    pub stop_on_failure: bool,
}

fn generate_id() -> Uuid {
    Uuid::now_v7()
}

impl PartialEq for TestSuite {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
            && self.assertions == other.assertions
            && self.stop_on_failure == other.stop_on_failure
    }
}

impl TestSuite {
    /// Create a new empty test suite.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::now_v7(),
            name: name.into(),
            assertions: Vec::new(),
            stop_on_failure: false,
        }
    }

    /// Add an assertion (builder pattern).
    #[must_use]
    pub fn with_assertion(mut self, assertion: Assertion) -> Self {
        self.assertions.push(assertion);
        self
    }

    /// Stop at the first failing assertion (builder pattern).
    #[must_use]
    pub fn stop_on_failure(mut self) -> Self {
        self.stop_on_failure = true;
        self
    }

    /// Check if the suite is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.assertions.is_empty()
    }

    /// Get the number of assertions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.assertions.len()
    }
}

/// Results from running a test suite.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TestResults {
    /// Test suite that was run.
    pub suite_name: String,
    /// Individual assertion results.
    pub results: Vec<AssertionResult>,
    /// Total number of assertions.
    pub total: usize,
    /// Number of passed assertions.
    pub passed: usize,
    /// Number of failed assertions.
    pub failed: usize,
}

impl TestResults {
    /// Create new test results.
    #[must_use]
    pub fn new(suite_name: impl Into<String>, results: Vec<AssertionResult>) -> Self {
        let total = results.len();
        let passed = results.iter().filter(|r| r.passed).count();
        let failed = total - passed;

        Self {
            suite_name: suite_name.into(),
            results,
            total,
            passed,
            failed,
        }
    }

    /// Check if all tests passed.
    #[must_use]
    pub const fn all_passed(&self) -> bool {
        self.failed == 0
    }

    /// First failure message, if any.
    #[must_use]
    pub fn first_failure(&self) -> Option<String> {
        self.results.iter().find(|r| !r.passed).map(|r| {
            format!(
                "{}: {}",
                r.assertion.description(),
                r.error.as_deref().unwrap_or("failed")
            )
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_assertion_description() {
        assert_eq!(Assertion::status(200).description(), "Status code = 200");
        assert_eq!(
            Assertion::json_equals("$.title", "No Definitions Found").description(),
            "JSON $.title equals \"No Definitions Found\""
        );
        assert_eq!(
            Assertion::json_contains("$[0].word", "dogs").description(),
            "JSON $[0].word contains \"dogs\""
        );
        assert_eq!(Assertion::json_exists("$[0]").description(), "JSON $[0] exists");
    }

    #[test]
    fn test_assertion_serde_tag() {
        let json = serde_json::to_value(Assertion::status(404)).expect("serialize");
        assert_eq!(json, serde_json::json!({"type": "status_code", "expected": 404}));
    }

    #[test]
    fn test_test_suite_builder() {
        let suite = TestSuite::new("valid word lookup")
            .with_assertion(Assertion::status(200))
            .with_assertion(Assertion::IsJson)
            .stop_on_failure();

        assert_eq!(suite.name, "valid word lookup");
        assert_eq!(suite.len(), 2);
        assert!(suite.stop_on_failure);
        assert!(!suite.is_empty());
    }

    #[test]
    fn test_suite_equality_ignores_id() {
        let build = || TestSuite::new("plural").with_assertion(Assertion::status(200));
        let (a, b) = (build(), build());

        assert_ne!(a.id, b.id);
        assert_eq!(a, b);
        assert_ne!(a, build().stop_on_failure());
        assert_ne!(a, build().with_assertion(Assertion::IsJson));
    }

    #[test]
    fn test_test_results() {
        let results = vec![
            AssertionResult::pass(Assertion::status(200)),
            AssertionResult::fail(Assertion::IsJson, "Invalid JSON"),
        ];

        let test_results = TestResults::new("Suite", results);
        assert_eq!(test_results.total, 2);
        assert_eq!(test_results.passed, 1);
        assert_eq!(test_results.failed, 1);
        assert!(!test_results.all_passed());
        assert_eq!(
            test_results.first_failure().as_deref(),
            Some("Body is valid JSON: Invalid JSON")
        );
    }
}
