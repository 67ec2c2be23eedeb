//! Lookup request descriptor

use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::{DomainError, DomainResult};

/// Descriptor of a single GET against the dictionary API.
///
/// A request is a base URL plus one or more path segments. Each segment
/// is appended verbatim as a single path component, so reserved
/// characters (`#`, `%`, `?`, `/`) are percent-encoded instead of being
/// interpreted as URL syntax.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LookupRequest {
    /// Base endpoint, e.g. `https://api.dictionaryapi.dev/api/v2/entries/en`
    pub base_url: String,
    /// Path segments appended to the base
    pub segments: Vec<String>,
}

impl LookupRequest {
    /// Creates a request for a single segment (a word or token) under the base.
    #[must_use]
    pub fn new(base_url: impl Into<String>, segment: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            segments: vec![segment.into()],
        }
    }

    /// Creates a request for a multi-segment path under the base.
    #[must_use]
    pub fn with_path<I, S>(base_url: impl Into<String>, segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            base_url: base_url.into(),
            segments: segments.into_iter().map(Into::into).collect(),
        }
    }

    /// Returns the last path segment (the looked-up word or token).
    #[must_use]
    pub fn token(&self) -> &str {
        self.segments.last().map_or("", String::as_str)
    }

    /// Builds the full target URL.
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL is malformed, cannot carry a path,
    /// or if any segment is empty.
    pub fn url(&self) -> DomainResult<Url> {
        let mut url = Url::parse(&self.base_url)
            .map_err(|e| DomainError::InvalidUrl(format!("{e}: {}", self.base_url)))?;

        if !matches!(url.scheme(), "http" | "https") {
            return Err(DomainError::InvalidUrl(format!(
                "URL must start with http:// or https://: {}",
                self.base_url
            )));
        }

        if self.segments.is_empty() {
            return Err(DomainError::InvalidSegment("no path segment given".to_string()));
        }
        if self.segments.iter().any(String::is_empty) {
            return Err(DomainError::InvalidSegment("path segment is empty".to_string()));
        }

        url.path_segments_mut()
            .map_err(|()| DomainError::InvalidUrl(format!("cannot be a base: {}", self.base_url)))?
            .pop_if_empty()
            .extend(&self.segments);

        Ok(url)
    }
}
