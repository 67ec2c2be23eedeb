//! Test runner implementation.
//!
//! Executes assertions against lookup responses and produces test results.

use dictcheck_application::ports::AssertionEvaluator;
use dictcheck_domain::{Assertion, AssertionResult, ResponseSpec, TestResults, TestSuite};
use serde_json::Value;

/// Test runner that executes assertions against responses.
#[derive(Debug, Default)]
pub struct TestRunner;

impl TestRunner {
    /// Create a new test runner.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Run a test suite against a response.
    #[must_use]
    pub fn run(&self, suite: &TestSuite, response: &ResponseSpec) -> TestResults {
        let mut results = Vec::with_capacity(suite.assertions.len());

        for assertion in &suite.assertions {
            let result = Self::run_assertion(assertion, response);
            let failed = !result.passed;
            results.push(result);

            if failed && suite.stop_on_failure {
                break;
            }
        }

        TestResults::new(&suite.name, results)
    }

    /// Run a single assertion against a response.
    #[must_use]
    pub fn run_assertion(assertion: &Assertion, response: &ResponseSpec) -> AssertionResult {
        match assertion {
            Assertion::StatusCode { expected } => {
                Self::check_status_code(assertion, response, *expected)
            }
            Assertion::IsJson => Self::check_is_json(assertion, response),
            Assertion::JsonPath { path, expected } => {
                Self::check_json_path(assertion, response, path, expected.as_ref())
            }
            Assertion::JsonContains { path, needle } => {
                Self::check_json_contains(assertion, response, path, needle)
            }
        }
    }

    fn check_status_code(
        assertion: &Assertion,
        response: &ResponseSpec,
        expected: u16,
    ) -> AssertionResult {
        let actual = response.status;
        if actual == expected {
            AssertionResult::pass_with_value(assertion.clone(), actual.to_string())
        } else {
            AssertionResult::fail_with_value(
                assertion.clone(),
                actual.to_string(),
                format!("Expected status = {expected}, got {actual}"),
            )
        }
    }

    fn check_is_json(assertion: &Assertion, response: &ResponseSpec) -> AssertionResult {
        match serde_json::from_str::<Value>(&response.body) {
            Ok(_) => AssertionResult::pass(assertion.clone()),
            Err(e) => AssertionResult::fail_with_value(
                assertion.clone(),
                response.body_preview(),
                format!("Body is not valid JSON: {e}"),
            ),
        }
    }

    fn check_json_path(
        assertion: &Assertion,
        response: &ResponseSpec,
        path: &str,
        expected: Option<&Value>,
    ) -> AssertionResult {
        let value = match Self::lookup(assertion, response, path) {
            Ok(value) => value,
            Err(failure) => return failure,
        };

        match expected {
            Some(expected_value) if &value != expected_value => AssertionResult::fail_with_value(
                assertion.clone(),
                value.to_string(),
                format!("JSON path '{path}' value mismatch: expected {expected_value}, got {value}"),
            ),
            _ => AssertionResult::pass_with_value(assertion.clone(), value.to_string()),
        }
    }

    fn check_json_contains(
        assertion: &Assertion,
        response: &ResponseSpec,
        path: &str,
        needle: &str,
    ) -> AssertionResult {
        let value = match Self::lookup(assertion, response, path) {
            Ok(value) => value,
            Err(failure) => return failure,
        };

        match value.as_str() {
            Some(text) if text.contains(needle) => {
                AssertionResult::pass_with_value(assertion.clone(), value.to_string())
            }
            Some(_) => AssertionResult::fail_with_value(
                assertion.clone(),
                value.to_string(),
                format!("JSON path '{path}' value {value} does not contain {needle:?}"),
            ),
            None => AssertionResult::fail_with_value(
                assertion.clone(),
                value.to_string(),
                format!("JSON path '{path}' is not a string: {value}"),
            ),
        }
    }

    /// Parses the body and resolves `path`, or returns the failed result.
    fn lookup(
        assertion: &Assertion,
        response: &ResponseSpec,
        path: &str,
    ) -> Result<Value, AssertionResult> {
        let json = serde_json::from_str::<Value>(&response.body).map_err(|e| {
            AssertionResult::fail_with_value(
                assertion.clone(),
                response.body_preview(),
                format!("Failed to parse body as JSON: {e}"),
            )
        })?;

        match query_json_path(&json, path) {
            Ok(Some(value)) => Ok(value),
            Ok(None) => Err(AssertionResult::fail(
                assertion.clone(),
                format!("JSON path '{path}' not found"),
            )),
            Err(e) => Err(AssertionResult::fail(
                assertion.clone(),
                format!("Invalid JSON path '{path}': {e}"),
            )),
        }
    }
}

impl AssertionEvaluator for TestRunner {
    fn evaluate(&self, suite: &TestSuite, response: &ResponseSpec) -> TestResults {
        self.run(suite, response)
    }
}

/// Query a JSON value using a simple JSONPath-like syntax.
/// Supports: $.field, $.field.nested, $[0].field, $.array[0]
fn query_json_path(json: &Value, path: &str) -> Result<Option<Value>, String> {
    let path = path.trim();
    let Some(path) = path.strip_prefix('$') else {
        return Err("JSON path must start with '$'".to_string());
    };

    if path.is_empty() {
        return Ok(Some(json.clone()));
    }

    let path = path.strip_prefix('.').unwrap_or(path);
    let mut current = json;

    for segment in split_path_segments(path) {
        if let Some((name, index)) = parse_array_access(&segment) {
            if !name.is_empty() {
                match current.get(name) {
                    Some(v) => current = v,
                    None => return Ok(None),
                }
            }
            let idx: usize = index
                .parse()
                .map_err(|_| format!("Invalid array index: {index}"))?;
            match current.get(idx) {
                Some(v) => current = v,
                None => return Ok(None),
            }
        } else {
            match current.get(segment.as_str()) {
                Some(v) => current = v,
                None => return Ok(None),
            }
        }
    }

    Ok(Some(current.clone()))
}

/// Split a path into segments, respecting array brackets.
fn split_path_segments(path: &str) -> Vec<String> {
    let mut segments = Vec::new();
    let mut current = String::new();
    let mut in_bracket = false;

    for ch in path.chars() {
        match ch {
            '.' if !in_bracket => {
                if !current.is_empty() {
                    segments.push(std::mem::take(&mut current));
                }
            }
            '[' => {
                in_bracket = true;
                current.push(ch);
            }
            ']' => {
                in_bracket = false;
                current.push(ch);
            }
            _ => current.push(ch),
        }
    }

    if !current.is_empty() {
        segments.push(current);
    }

    segments
}

/// Parse array access like "field[0]" into ("field", "0").
fn parse_array_access(segment: &str) -> Option<(&str, &str)> {
    let bracket_start = segment.find('[')?;
    let inner = segment.strip_suffix(']')?;
    Some((&segment[..bracket_start], &inner[bracket_start + 1..]))
}
