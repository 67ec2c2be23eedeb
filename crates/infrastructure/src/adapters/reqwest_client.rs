//! HTTP Client implementation using reqwest.
//!
//! This adapter implements the `HttpClient` port using the reqwest library.
//! It handles all HTTP communication with the dictionary API.

use std::collections::HashMap;
use std::future::Future;
use std::time::Instant;

use dictcheck_application::ports::{HttpClient, HttpClientError};
use dictcheck_domain::{LookupRequest, ResponseSpec};
use reqwest::{Client, Url};

/// Redirects followed before giving up.
const MAX_REDIRECTS: usize = 10;

/// Fragments resolvers put in host-not-found errors across platforms.
const DNS_MARKERS: &[&str] = &[
    "dns error",
    "failed to lookup address",
    "name or service not known",
    "nodename nor servname",
    "no such host",
    "name resolution",
];

/// HTTP client implementation using reqwest.
///
/// Wraps `reqwest::Client` and implements the `HttpClient` port from the
/// application layer. Requests are never retried and carry no timeout
/// beyond reqwest's default.
pub struct ReqwestHttpClient {
    client: Client,
}

impl ReqwestHttpClient {
    /// Creates a new HTTP client with default settings.
    ///
    /// Default configuration:
    /// - Follow redirects: up to 10
    /// - TLS verification: enabled
    /// - User-Agent: "dictcheck/<version>"
    ///
    /// # Errors
    ///
    /// Returns an error if the client cannot be created.
    pub fn new() -> Result<Self, HttpClientError> {
        Self::with_user_agent(concat!("dictcheck/", env!("CARGO_PKG_VERSION")))
    }

    /// Creates a new HTTP client sending the given User-Agent.
    ///
    /// # Errors
    ///
    /// Returns an error if the client cannot be created.
    pub fn with_user_agent(user_agent: &str) -> Result<Self, HttpClientError> {
        let client = Client::builder()
            .user_agent(user_agent)
            .redirect(reqwest::redirect::Policy::limited(MAX_REDIRECTS))
            .build()
            .map_err(|e| HttpClientError::Other(e.to_string()))?;

        Ok(Self { client })
    }

    async fn get(&self, url: Url) -> Result<ResponseSpec, HttpClientError> {
        tracing::debug!(%url, "Sending lookup request");
        let start = Instant::now();

        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(|e| Self::map_error(&e, &url))?;

        let duration = start.elapsed();
        let status = response.status().as_u16();

        let headers: HashMap<String, String> = response
            .headers()
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_str().unwrap_or("<binary>").to_string()))
            .collect();

        let body = response
            .bytes()
            .await
            .map_err(|e| HttpClientError::Other(format!("Failed to read body: {e}")))?
            .to_vec();

        tracing::debug!(%url, status, elapsed = ?duration, bytes = body.len(), "Lookup response received");

        Ok(ResponseSpec::new(status, headers, body, duration))
    }

    /// Maps reqwest errors to the port's `HttpClientError`.
    fn map_error(error: &reqwest::Error, url: &Url) -> HttpClientError {
        let message = error_chain(error);

        if error.is_timeout() {
            return HttpClientError::Timeout(message);
        }

        if error.is_redirect() {
            return HttpClientError::TooManyRedirects { max: MAX_REDIRECTS };
        }

        if error.is_connect() {
            return classify_connect(
                message,
                url.host_str().unwrap_or("unknown"),
                url.port_or_known_default().unwrap_or(80),
            );
        }

        HttpClientError::Other(message)
    }
}

impl HttpClient for ReqwestHttpClient {
    fn execute(
        &self,
        request: &LookupRequest,
    ) -> impl Future<Output = Result<ResponseSpec, HttpClientError>> + Send {
        let url = request.url();
        async move { self.get(url?).await }
    }
}

/// Joins an error with all of its sources.
///
/// reqwest's own `Display` stops at the outermost layer; the resolver
/// message only shows up further down the chain.
fn error_chain(error: &(dyn std::error::Error + 'static)) -> String {
    let mut message = error.to_string();
    let mut source = error.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}

/// Sorts a connect-phase failure by what its source chain says.
fn classify_connect(message: String, host: &str, port: u16) -> HttpClientError {
    let lower = message.to_lowercase();
    if DNS_MARKERS.iter().any(|marker| lower.contains(marker)) {
        return HttpClientError::DnsError {
            host: host.to_string(),
            message,
        };
    }
    if lower.contains("refused") {
        return HttpClientError::ConnectionRefused {
            host: host.to_string(),
            port,
        };
    }
    if lower.contains("certificate") || lower.contains("tls") {
        return HttpClientError::TlsError(message);
    }
    HttpClientError::ConnectionFailed(message)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_client_creation() {
        assert!(ReqwestHttpClient::new().is_ok());
        assert!(ReqwestHttpClient::with_user_agent("dictcheck-test/1.0").is_ok());
    }

    fn classify(message: &str) -> HttpClientError {
        classify_connect(message.to_string(), "nonexistent.api.dev", 443)
    }

    #[test]
    fn test_resolver_messages_classify_as_dns() {
        for message in [
            "error sending request: client error (Connect): dns error: failed to lookup address information: Name or service not known",
            "dns error: failed to lookup address information: nodename nor servname provided, or not known",
            "No such host is known. (os error 11001)",
            "dns error: Temporary failure in name resolution",
        ] {
            assert_eq!(classify(message).code(), "ENOTFOUND", "{message}");
        }
    }

    #[test]
    fn test_other_connect_failures() {
        assert_eq!(
            classify("tcp connect error: Connection refused (os error 111)"),
            HttpClientError::ConnectionRefused {
                host: "nonexistent.api.dev".to_string(),
                port: 443,
            }
        );
        assert_eq!(classify("invalid peer certificate: UnknownIssuer").code(), "ECERT");
        assert_eq!(classify("connection reset by peer").code(), "ECONNRESET");
    }

    #[test]
    fn test_non_connect_errors_are_not_classified() {
        let url = Url::parse("http://dns-error.invalid/en/hello").expect("url");
        let error = Client::new()
            .get(url.clone())
            .header("bad header", "x")
            .build()
            .expect_err("invalid header name");

        assert!(!error.is_connect());
        assert!(matches!(
            ReqwestHttpClient::map_error(&error, &url),
            HttpClientError::Other(_)
        ));
    }

    #[derive(Debug)]
    struct SendError(std::io::Error);

    impl std::fmt::Display for SendError {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            f.write_str("error sending request")
        }
    }

    impl std::error::Error for SendError {
        fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
            Some(&self.0)
        }
    }

    #[test]
    fn test_error_chain() {
        let error = SendError(std::io::Error::new(std::io::ErrorKind::NotFound, "dns error"));
        let message = error_chain(&error);
        assert_eq!(message, "error sending request: dns error");
        assert!(matches!(classify(&message), HttpClientError::DnsError { .. }));
    }

    #[tokio::test]
    async fn test_invalid_url_fails_before_sending() {
        let client = ReqwestHttpClient::new().expect("client");
        let request = LookupRequest::new("not a url", "hello");

        let error = client.execute(&request).await.expect_err("must fail");
        assert!(matches!(error, HttpClientError::InvalidUrl(_)));
        assert_eq!(error.code(), "EINVALIDURL");
    }

    #[tokio::test]
    async fn test_connection_refused() {
        let port = {
            let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("bind");
            listener.local_addr().expect("addr").port()
        };
        let client = ReqwestHttpClient::new().expect("client");
        let request = LookupRequest::new(format!("http://127.0.0.1:{port}/en"), "hello");

        let error = client.execute(&request).await.expect_err("nothing listens");
        assert_eq!(
            error,
            HttpClientError::ConnectionRefused {
                host: "127.0.0.1".to_string(),
                port,
            }
        );
        assert_eq!(error.code(), "ECONNREFUSED");
    }
}
