//! Verify Contract Use Case
//!
//! Runs the dictionary API contract cases through the `HttpClient` port
//! and evaluates each response through the `AssertionEvaluator` port.

use std::sync::Arc;
use std::time::Instant;

use chrono::Utc;
use dictcheck_domain::{
    AssertionResult, CaseReport, ContractReport, LookupRequest, ResponseSpec, TestSuite,
};
use tokio::task::JoinSet;

use crate::contract::{ContractCase, Expectation, VerifierSettings};
use crate::error::{ApplicationError, ApplicationResult};
use crate::ports::{AssertionEvaluator, HttpClient, HttpClientError};

/// Outcome of one request: a response, or a transport error.
pub type RequestOutcome = Result<ResponseSpec, HttpClientError>;

/// Use case for verifying the dictionary API contract.
///
/// Cases share nothing but the read-only client and evaluator. No case
/// retries, and no timeout is added on top of the client's default.
///
/// # Example
///
/// ```ignore
/// let use_case = VerifyContract::new(
///     Arc::new(ReqwestHttpClient::new()?),
///     Arc::new(TestRunner::new()),
///     VerifierSettings::default(),
/// )?;
/// let report = use_case.run_all().await;
/// assert!(report.all_passed());
/// ```
pub struct VerifyContract<C: HttpClient, E: AssertionEvaluator> {
    client: Arc<C>,
    evaluator: Arc<E>,
    settings: VerifierSettings,
}

impl<C, E> VerifyContract<C, E>
where
    C: HttpClient + 'static,
    E: AssertionEvaluator,
{
    /// Creates a new `VerifyContract` use case.
    ///
    /// # Errors
    ///
    /// Returns `InvalidSettings` if the settings fail validation, e.g. a
    /// zero fan-out width that would let the concurrent case pass without
    /// sending anything.
    pub fn new(
        client: Arc<C>,
        evaluator: Arc<E>,
        settings: VerifierSettings,
    ) -> ApplicationResult<Self> {
        settings.validate()?;
        Ok(Self {
            client,
            evaluator,
            settings,
        })
    }

    /// Returns the settings the cases are built from.
    pub const fn settings(&self) -> &VerifierSettings {
        &self.settings
    }

    /// Runs every case in order and collects a report.
    pub async fn run_all(&self) -> ContractReport {
        let started_at = Utc::now();
        let mut cases = Vec::with_capacity(ContractCase::ALL.len());
        for case in ContractCase::ALL {
            cases.push(self.run_case(case).await);
        }

        let report = ContractReport::new(started_at, cases);
        tracing::info!(
            run_id = %report.run_id,
            total = report.total,
            passed = report.passed,
            failed = report.failed,
            "Contract run finished"
        );
        report
    }

    /// Runs a single case.
    pub async fn run_case(&self, case: ContractCase) -> CaseReport {
        let start = Instant::now();
        let request = case.request(&self.settings);
        let fan_out = case.fan_out(&self.settings);

        tracing::debug!(case = %case, url = ?request.url().ok(), fan_out, "Running contract case");

        let report = match case.expectation() {
            Expectation::Response(suite) => {
                let outcomes = if fan_out == 1 {
                    vec![self.client.execute(&request).await]
                } else {
                    match self.run_concurrent(&request, fan_out).await {
                        Ok(outcomes) => outcomes,
                        Err(e) => {
                            return CaseReport::failed(
                                case.name(),
                                e.to_string(),
                                Vec::new(),
                                fan_out,
                                start.elapsed(),
                            );
                        }
                    }
                };
                self.check_responses(case, &suite, outcomes, start)
            }
            Expectation::TransportError { code } => {
                let outcome = self.client.execute(&request).await;
                check_transport_error(case, code, outcome, start)
            }
        };

        match report.failure_reason() {
            None => tracing::info!(case = %case, duration = ?report.duration, "Case passed"),
            Some(reason) => tracing::warn!(case = %case, %reason, "Case failed"),
        }
        report
    }

    /// Issues `count` copies of `request` concurrently and waits for all.
    ///
    /// Results are returned in spawn order; completion order is not
    /// observed.
    ///
    /// # Errors
    ///
    /// Returns `Internal` if a request task panicked or was cancelled.
    pub async fn run_concurrent(
        &self,
        request: &LookupRequest,
        count: usize,
    ) -> ApplicationResult<Vec<RequestOutcome>> {
        let mut joins = JoinSet::new();
        for idx in 0..count {
            let client = Arc::clone(&self.client);
            let request = request.clone();
            joins.spawn(async move { (idx, client.execute(&request).await) });
        }

        let mut slots: Vec<Option<RequestOutcome>> = (0..count).map(|_| None).collect();
        while let Some(joined) = joins.join_next().await {
            let (idx, outcome) = joined
                .map_err(|e| ApplicationError::Internal(format!("request task failed: {e}")))?;
            if let Some(slot) = slots.get_mut(idx) {
                *slot = Some(outcome);
            }
        }

        Ok(slots.into_iter().flatten().collect())
    }

    fn check_responses(
        &self,
        case: ContractCase,
        suite: &TestSuite,
        outcomes: Vec<RequestOutcome>,
        start: Instant,
    ) -> CaseReport {
        let requests = outcomes.len();
        if requests == 0 {
            return CaseReport::failed(
                case.name(),
                "no requests were issued",
                Vec::new(),
                0,
                start.elapsed(),
            );
        }
        let mut assertions: Vec<AssertionResult> = Vec::new();
        let mut failure: Option<String> = None;

        for (idx, outcome) in outcomes.into_iter().enumerate() {
            let label = if requests > 1 {
                format!("request {}/{requests}: ", idx + 1)
            } else {
                String::new()
            };

            match outcome {
                Ok(response) => {
                    let results = self.evaluator.evaluate(suite, &response);
                    if failure.is_none() {
                        failure = results.first_failure().map(|f| format!("{label}{f}"));
                    }
                    assertions.extend(results.results);
                }
                Err(e) => {
                    if failure.is_none() {
                        failure = Some(format!("{label}unexpected transport error [{}]: {e}", e.code()));
                    }
                }
            }
        }

        match failure {
            None => CaseReport::passed(case.name(), assertions, requests, start.elapsed()),
            Some(reason) => {
                CaseReport::failed(case.name(), reason, assertions, requests, start.elapsed())
            }
        }
    }
}

/// A case expecting a transport error passes only on that exact code.
fn check_transport_error(
    case: ContractCase,
    expected_code: &str,
    outcome: RequestOutcome,
    start: Instant,
) -> CaseReport {
    match outcome {
        Err(e) if e.code() == expected_code => {
            CaseReport::passed(case.name(), Vec::new(), 1, start.elapsed())
        }
        Err(e) => CaseReport::failed(
            case.name(),
            format!("Expected transport error {expected_code}, got {}: {e}", e.code()),
            Vec::new(),
            1,
            start.elapsed(),
        ),
        Ok(response) => CaseReport::failed(
            case.name(),
            format!(
                "Expected transport error {expected_code}, got response {}",
                response.status_code()
            ),
            Vec::new(),
            1,
            start.elapsed(),
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    use dictcheck_domain::{Assertion, TestResults};
    use pretty_assertions::assert_eq;

    /// Mock HTTP client answering by the last path segment.
    struct MockHttpClient {
        routes: HashMap<String, RequestOutcome>,
        calls: AtomicUsize,
    }

    impl MockHttpClient {
        fn new() -> Self {
            Self {
                routes: HashMap::new(),
                calls: AtomicUsize::new(0),
            }
        }

        fn route(mut self, token: &str, outcome: RequestOutcome) -> Self {
            self.routes.insert(token.to_string(), outcome);
            self
        }

        /// Behaves like the real API for every case.
        fn healthy() -> Self {
            Self::new()
                .route("hello", Ok(response(200, r#"[{"word":"hello"}]"#)))
                .route("dogs", Ok(response(200, r#"[{"word":"dogs"}]"#)))
                .route("nonexistentword123", Ok(not_found()))
                .route("!@#$%", Ok(not_found()))
                .route("nonexistent-endpoint", Ok(response(404, "")))
        }
    }

    impl HttpClient for MockHttpClient {
        fn execute(
            &self,
            request: &LookupRequest,
        ) -> impl Future<Output = RequestOutcome> + Send {
            self.calls.fetch_add(1, Ordering::SeqCst);
            let result = if request.base_url.contains("unreachable") {
                Err(HttpClientError::DnsError {
                    host: "unreachable.invalid".to_string(),
                    message: "failed to lookup address information".to_string(),
                })
            } else {
                self.routes
                    .get(request.token())
                    .cloned()
                    .unwrap_or_else(|| Ok(response(404, "")))
            };
            async move { result }
        }
    }

    /// Evaluates status assertions only; everything else passes.
    struct StatusEvaluator;

    impl AssertionEvaluator for StatusEvaluator {
        fn evaluate(&self, suite: &TestSuite, response: &ResponseSpec) -> TestResults {
            let results = suite
                .assertions
                .iter()
                .map(|assertion| match assertion {
                    Assertion::StatusCode { expected } if *expected != response.status => {
                        AssertionResult::fail_with_value(
                            assertion.clone(),
                            response.status.to_string(),
                            format!("Expected status = {expected}, got {}", response.status),
                        )
                    }
                    _ => AssertionResult::pass(assertion.clone()),
                })
                .collect();
            TestResults::new(&suite.name, results)
        }
    }

    fn response(status: u16, body: &str) -> ResponseSpec {
        ResponseSpec::new(status, HashMap::new(), body.as_bytes().to_vec(), Duration::from_millis(5))
    }

    fn not_found() -> ResponseSpec {
        response(404, r#"{"title":"No Definitions Found"}"#)
    }

    fn settings() -> VerifierSettings {
        VerifierSettings::new("https://api.example.com/en", "https://unreachable.invalid")
    }

    fn use_case(client: MockHttpClient) -> VerifyContract<MockHttpClient, StatusEvaluator> {
        VerifyContract::new(Arc::new(client), Arc::new(StatusEvaluator), settings())
            .expect("valid settings")
    }

    #[tokio::test]
    async fn test_all_cases_pass_against_healthy_api() {
        let verifier = use_case(MockHttpClient::healthy());
        let report = verifier.run_all().await;

        assert_eq!(report.total, 7);
        assert!(report.all_passed(), "failures: {:?}", report.failures().collect::<Vec<_>>());
        // Six single requests plus ten concurrent ones.
        assert_eq!(verifier.client.calls.load(Ordering::SeqCst), 16);
        assert_eq!(
            report.cases.iter().map(|c| c.case.as_str()).collect::<Vec<_>>(),
            ContractCase::ALL.iter().map(ContractCase::name).collect::<Vec<_>>()
        );
    }

    #[tokio::test]
    async fn test_status_mismatch_fails_with_expected_and_actual() {
        let client = MockHttpClient::healthy().route("hello", Ok(response(500, "")));
        let report = use_case(client).run_case(ContractCase::ValidWord).await;

        assert!(!report.is_passed());
        assert_eq!(
            report.failure_reason(),
            Some("Status code = 200: Expected status = 200, got 500")
        );
    }

    #[tokio::test]
    async fn test_unexpected_transport_error_is_surfaced() {
        let client = MockHttpClient::healthy().route(
            "dogs",
            Err(HttpClientError::ConnectionRefused {
                host: "api.example.com".to_string(),
                port: 443,
            }),
        );
        let report = use_case(client).run_case(ContractCase::PluralWord).await;

        assert_eq!(
            report.failure_reason(),
            Some("unexpected transport error [ECONNREFUSED]: connection refused by api.example.com:443")
        );
    }

    #[tokio::test]
    async fn test_unreachable_host_requires_dns_failure() {
        let verifier = use_case(MockHttpClient::healthy());
        assert!(verifier.run_case(ContractCase::UnreachableHost).await.is_passed());

        let report = check_transport_error(
            ContractCase::UnreachableHost,
            "ENOTFOUND",
            Err(HttpClientError::Timeout("elapsed".to_string())),
            Instant::now(),
        );
        assert!(report
            .failure_reason()
            .is_some_and(|r| r.contains("got ETIMEDOUT")));

        let report = check_transport_error(
            ContractCase::UnreachableHost,
            "ENOTFOUND",
            Ok(response(200, "[]")),
            Instant::now(),
        );
        assert_eq!(
            report.failure_reason(),
            Some("Expected transport error ENOTFOUND, got response 200 OK")
        );
    }

    #[tokio::test]
    async fn test_concurrent_requests_all_resolve() {
        let verifier = use_case(MockHttpClient::healthy());
        let request = LookupRequest::new("https://api.example.com/en", "hello");

        let outcomes = verifier
            .run_concurrent(&request, 10)
            .await
            .expect("all tasks join");
        assert_eq!(outcomes.len(), 10);
        assert!(outcomes.iter().all(|o| o.as_ref().is_ok_and(|r| r.status == 200)));
    }

    #[tokio::test]
    async fn test_concurrent_case_reports_failing_request() {
        let mut client = MockHttpClient::healthy();
        client.routes.insert("hello".to_string(), Ok(response(429, "")));
        let verifier = use_case(client);

        let report = verifier.run_case(ContractCase::ConcurrentRequests).await;
        assert_eq!(report.requests, 10);
        assert_eq!(report.assertions.len(), 10);
        assert_eq!(
            report.failure_reason(),
            Some("request 1/10: Status code = 200: Expected status = 200, got 429")
        );
    }

    #[test]
    fn test_zero_fan_out_is_rejected() {
        let client = MockHttpClient::new().route(
            "hello",
            Err(HttpClientError::Other("down".to_string())),
        );
        let settings = VerifierSettings {
            concurrent_requests: 0,
            ..settings()
        };

        let Err(error) = VerifyContract::new(Arc::new(client), Arc::new(StatusEvaluator), settings)
        else {
            panic!("zero fan-out must be rejected");
        };
        assert!(matches!(error, ApplicationError::InvalidSettings(_)));
        assert_eq!(
            error.to_string(),
            "invalid settings: concurrent_requests must be at least 1"
        );
    }

    #[test]
    fn test_no_responses_is_a_failure() {
        let verifier = use_case(MockHttpClient::healthy());
        let Expectation::Response(suite) = ContractCase::ConcurrentRequests.expectation() else {
            panic!("expected a response suite");
        };

        let report = verifier.check_responses(
            ContractCase::ConcurrentRequests,
            &suite,
            Vec::new(),
            Instant::now(),
        );
        assert_eq!(report.failure_reason(), Some("no requests were issued"));
    }

    #[tokio::test]
    async fn test_concurrent_case_fails_when_api_is_down() {
        let client = MockHttpClient::healthy()
            .route("hello", Err(HttpClientError::Other("down".to_string())));
        let settings = VerifierSettings {
            concurrent_requests: 1,
            ..settings()
        };
        let verifier = VerifyContract::new(Arc::new(client), Arc::new(StatusEvaluator), settings)
            .expect("valid settings");

        let report = verifier.run_case(ContractCase::ConcurrentRequests).await;
        assert!(!report.is_passed());
        assert_eq!(report.requests, 1);
        assert_eq!(verifier.client.calls.load(Ordering::SeqCst), 1);
    }
}
