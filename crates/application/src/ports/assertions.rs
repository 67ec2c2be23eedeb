//! Assertion evaluation port

use dictcheck_domain::{ResponseSpec, TestResults, TestSuite};

/// Port for running a suite of declarative assertions against a response.
pub trait AssertionEvaluator: Send + Sync {
    /// Runs every assertion in `suite` (honoring `stop_on_failure`).
    fn evaluate(&self, suite: &TestSuite, response: &ResponseSpec) -> TestResults;
}
