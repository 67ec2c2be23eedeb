//! HTTP Client port

use std::future::Future;

use dictcheck_domain::{DomainError, LookupRequest, ResponseSpec, TransportErrorKind};
use thiserror::Error;

/// Port for executing lookup requests.
///
/// This trait abstracts the HTTP client implementation, allowing
/// the application layer to be independent of specific HTTP libraries.
/// Implementations must not retry and must not impose a timeout beyond
/// the underlying client's default.
pub trait HttpClient: Send + Sync {
    /// Issues a GET for the request and returns the response snapshot.
    ///
    /// Any HTTP status, including 4xx and 5xx, is a successful return;
    /// only failures before a response arrives are errors.
    ///
    /// # Errors
    ///
    /// Returns the transport failure that prevented a response.
    fn execute(
        &self,
        request: &LookupRequest,
    ) -> impl Future<Output = Result<ResponseSpec, HttpClientError>> + Send;
}

/// Transport errors raised by an [`HttpClient`].
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum HttpClientError {
    /// The target URL could not be built or parsed.
    #[error("invalid URL: {0}")]
    InvalidUrl(String),

    /// The host name did not resolve.
    #[error("getaddrinfo ENOTFOUND {host}: {message}")]
    DnsError {
        /// Host that failed to resolve.
        host: String,
        /// Underlying resolver message.
        message: String,
    },

    /// The server actively refused the connection.
    #[error("connection refused by {host}:{port}")]
    ConnectionRefused {
        /// Target host.
        host: String,
        /// Target port.
        port: u16,
    },

    /// The connection could not be established or was dropped.
    #[error("connection failed: {0}")]
    ConnectionFailed(String),

    /// The client's default timeout elapsed.
    #[error("request timed out: {0}")]
    Timeout(String),

    /// TLS negotiation failed.
    #[error("TLS error: {0}")]
    TlsError(String),

    /// The redirect limit was exceeded.
    #[error("too many redirects (max {max})")]
    TooManyRedirects {
        /// Redirect limit.
        max: usize,
    },

    /// Any other failure, including reading the body.
    #[error("{0}")]
    Other(String),
}

impl HttpClientError {
    /// Categorizes this error.
    #[must_use]
    pub const fn kind(&self) -> TransportErrorKind {
        match self {
            Self::InvalidUrl(_) => TransportErrorKind::InvalidUrl,
            Self::DnsError { .. } => TransportErrorKind::DnsError,
            Self::ConnectionRefused { .. } => TransportErrorKind::ConnectionRefused,
            Self::ConnectionFailed(_) => TransportErrorKind::ConnectionFailed,
            Self::Timeout(_) => TransportErrorKind::Timeout,
            Self::TlsError(_) => TransportErrorKind::TlsError,
            Self::TooManyRedirects { .. } => TransportErrorKind::TooManyRedirects,
            Self::Other(_) => TransportErrorKind::Unknown,
        }
    }

    /// Errno-style code, e.g. `ENOTFOUND` for DNS failures.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        self.kind().code()
    }
}

impl From<DomainError> for HttpClientError {
    fn from(error: DomainError) -> Self {
        match error {
            DomainError::InvalidUrl(message) => Self::InvalidUrl(message),
            DomainError::InvalidSegment(_) => Self::InvalidUrl(error.to_string()),
        }
    }
}
