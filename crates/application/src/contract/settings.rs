//! Verifier settings

use serde::{Deserialize, Serialize};

use crate::error::{ApplicationError, ApplicationResult};

/// English entry point of the public dictionary API.
pub const DEFAULT_BASE_URL: &str = "https://api.dictionaryapi.dev/api/v2/entries/en";

/// A host that is expected never to resolve.
pub const DEFAULT_UNREACHABLE_BASE_URL: &str = "https://nonexistent.api.dev";

/// Where the contract cases send their requests.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct VerifierSettings {
    /// Base endpoint for lookups.
    pub base_url: String,
    /// Base URL on a non-resolving host, used by the unreachable-host case.
    pub unreachable_base_url: String,
    /// Fan-out width of the concurrent-requests case.
    pub concurrent_requests: usize,
    /// User-Agent sent with every request.
    pub user_agent: String,
}

impl Default for VerifierSettings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            unreachable_base_url: DEFAULT_UNREACHABLE_BASE_URL.to_string(),
            concurrent_requests: 10,
            user_agent: concat!("dictcheck/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

impl VerifierSettings {
    /// Settings pointing both bases at custom URLs.
    #[must_use]
    pub fn new(base_url: impl Into<String>, unreachable_base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            unreachable_base_url: unreachable_base_url.into(),
            ..Self::default()
        }
    }

    /// Validates the settings.
    ///
    /// # Errors
    ///
    /// Returns `InvalidSettings` if a URL is blank or not http(s), or if
    /// the fan-out width is zero.
    pub fn validate(&self) -> ApplicationResult<()> {
        for (key, value) in [
            ("base_url", &self.base_url),
            ("unreachable_base_url", &self.unreachable_base_url),
        ] {
            if value.trim().is_empty() {
                return Err(ApplicationError::InvalidSettings(format!("{key} is required")));
            }
            if !value.starts_with("http://") && !value.starts_with("https://") {
                return Err(ApplicationError::InvalidSettings(format!(
                    "{key} must start with http:// or https://"
                )));
            }
        }

        if self.concurrent_requests == 0 {
            return Err(ApplicationError::InvalidSettings(
                "concurrent_requests must be at least 1".to_string(),
            ));
        }

        Ok(())
    }
}
