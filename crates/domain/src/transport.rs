//! Transport-level failure categories.
//!
//! A transport error happens before any HTTP response arrives. Each
//! category carries a stable errno-style code so that expectations
//! such as "the host does not resolve" can be written as `ENOTFOUND`.

use serde::{Deserialize, Serialize};

/// Categories of transport errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransportErrorKind {
    /// Invalid URL format.
    InvalidUrl,

    /// DNS resolution failed.
    DnsError,

    /// Could not establish connection.
    ConnectionFailed,

    /// Connection was refused by the server.
    ConnectionRefused,

    /// Request timed out.
    Timeout,

    /// TLS/SSL error.
    TlsError,

    /// Too many redirects.
    TooManyRedirects,

    /// Unknown or unexpected error.
    Unknown,
}

impl TransportErrorKind {
    /// Code reported when a host name does not resolve.
    pub const HOST_NOT_FOUND: &'static str = "ENOTFOUND";

    /// Returns the errno-style code for this category.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::InvalidUrl => "EINVALIDURL",
            Self::DnsError => Self::HOST_NOT_FOUND,
            Self::ConnectionFailed => "ECONNRESET",
            Self::ConnectionRefused => "ECONNREFUSED",
            Self::Timeout => "ETIMEDOUT",
            Self::TlsError => "ECERT",
            Self::TooManyRedirects => "EREDIRECT",
            Self::Unknown => "EUNKNOWN",
        }
    }
}

impl std::fmt::Display for TransportErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}
