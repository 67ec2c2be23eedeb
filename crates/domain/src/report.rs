//! Contract run reports.

use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::testing::AssertionResult;

/// Outcome of one contract case.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum CaseOutcome {
    /// Every expectation held.
    Passed,
    /// An assertion mismatched or an unexpected transport error occurred.
    Failed {
        /// What went wrong, with expected vs. actual where available.
        reason: String,
    },
}

impl CaseOutcome {
    /// Returns true if the case passed.
    #[must_use]
    pub const fn is_passed(&self) -> bool {
        matches!(self, Self::Passed)
    }
}

/// Report for a single contract case.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CaseReport {
    /// Stable case name.
    pub case: String,
    /// Final outcome.
    pub outcome: CaseOutcome,
    /// Assertion results across all responses the case received.
    #[serde(default)]
    pub assertions: Vec<AssertionResult>,
    /// Number of requests the case issued.
    pub requests: usize,
    /// Wall-clock time for the case.
    #[serde(with = "crate::response::duration_millis")]
    pub duration: Duration,
}

impl CaseReport {
    /// Creates a passed report.
    #[must_use]
    pub fn passed(
        case: impl Into<String>,
        assertions: Vec<AssertionResult>,
        requests: usize,
        duration: Duration,
    ) -> Self {
        Self {
            case: case.into(),
            outcome: CaseOutcome::Passed,
            assertions,
            requests,
            duration,
        }
    }

    /// Creates a failed report.
    #[must_use]
    pub fn failed(
        case: impl Into<String>,
        reason: impl Into<String>,
        assertions: Vec<AssertionResult>,
        requests: usize,
        duration: Duration,
    ) -> Self {
        Self {
            case: case.into(),
            outcome: CaseOutcome::Failed {
                reason: reason.into(),
            },
            assertions,
            requests,
            duration,
        }
    }

    /// Returns true if the case passed.
    #[must_use]
    pub const fn is_passed(&self) -> bool {
        self.outcome.is_passed()
    }

    /// Failure reason, if the case failed.
    #[must_use]
    pub fn failure_reason(&self) -> Option<&str> {
        match &self.outcome {
            CaseOutcome::Passed => None,
            CaseOutcome::Failed { reason } => Some(reason),
        }
    }
}

/// Report for a full contract run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContractReport {
    /// Unique run identifier.
    pub run_id: Uuid,
    /// When the run started.
    pub started_at: DateTime<Utc>,
    /// Per-case reports, in case order.
    pub cases: Vec<CaseReport>,
    /// Number of cases.
    pub total: usize,
    /// Number of passed cases.
    pub passed: usize,
    /// Number of failed cases.
    pub failed: usize,
}

impl ContractReport {
    /// Builds a report from case reports.
    #[must_use]
    pub fn new(started_at: DateTime<Utc>, cases: Vec<CaseReport>) -> Self {
        let total = cases.len();
        let passed = cases.iter().filter(|c| c.is_passed()).count();
        Self {
            run_id: Uuid::now_v7(),
            started_at,
            cases,
            total,
            passed,
            failed: total - passed,
        }
    }

    /// Check if every case passed.
    #[must_use]
    pub const fn all_passed(&self) -> bool {
        self.failed == 0
    }

    /// Looks up a case report by name.
    #[must_use]
    pub fn case(&self, name: &str) -> Option<&CaseReport> {
        self.cases.iter().find(|c| c.case == name)
    }

    /// Iterates over failed cases.
    pub fn failures(&self) -> impl Iterator<Item = &CaseReport> {
        self.cases.iter().filter(|c| !c.is_passed())
    }
}
