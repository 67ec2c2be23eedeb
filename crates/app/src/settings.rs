//! Configuration loading.
//!
//! Built-in defaults, overridden by an optional `dictcheck.toml` in the
//! working directory, overridden by `DICTCHECK_*` environment variables.

use config::{Config, ConfigError, Environment, File, Source};
use dictcheck_application::VerifierSettings;

/// Base name of the optional configuration file.
const CONFIG_FILE: &str = "dictcheck";

/// Prefix of the environment variables read.
const ENV_PREFIX: &str = "DICTCHECK";

/// Loads settings from the working directory and the process environment.
pub fn load() -> Result<VerifierSettings, ConfigError> {
    from_sources(
        File::with_name(CONFIG_FILE).required(false),
        Environment::with_prefix(ENV_PREFIX).try_parsing(true),
    )
}

fn from_sources(
    file: impl Source + Send + Sync + 'static,
    env: Environment,
) -> Result<VerifierSettings, ConfigError> {
    Config::builder()
        .add_source(file)
        .add_source(env)
        .build()?
        .try_deserialize()
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;
    use config::{FileFormat, Map};
    use dictcheck_application::DEFAULT_BASE_URL;
    use pretty_assertions::assert_eq;

    fn env(vars: &[(&str, &str)]) -> Environment {
        let map: Map<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        Environment::with_prefix(ENV_PREFIX)
            .try_parsing(true)
            .source(Some(map))
    }

    #[test]
    fn test_defaults_without_sources() {
        let settings = from_sources(File::from_str("", FileFormat::Toml), env(&[])).unwrap();
        assert_eq!(settings, VerifierSettings::default());
        assert_eq!(settings.base_url, DEFAULT_BASE_URL);
        assert_eq!(settings.concurrent_requests, 10);
    }

    #[test]
    fn test_file_overrides_defaults() {
        let file = File::from_str(
            r#"
            base_url = "http://127.0.0.1:8080/en"
            concurrent_requests = 4
            "#,
            FileFormat::Toml,
        );

        let settings = from_sources(file, env(&[])).unwrap();
        assert_eq!(settings.base_url, "http://127.0.0.1:8080/en");
        assert_eq!(settings.concurrent_requests, 4);
        assert_eq!(
            settings.unreachable_base_url,
            VerifierSettings::default().unreachable_base_url
        );
    }

    #[test]
    fn test_environment_overrides_file() {
        let file = File::from_str(r#"base_url = "http://file.example/en""#, FileFormat::Toml);
        let vars = env(&[
            ("DICTCHECK_BASE_URL", "http://env.example/en"),
            ("DICTCHECK_CONCURRENT_REQUESTS", "3"),
            ("OTHER_BASE_URL", "http://ignored.example"),
        ]);

        let settings = from_sources(file, vars).unwrap();
        assert_eq!(settings.base_url, "http://env.example/en");
        assert_eq!(settings.concurrent_requests, 3);
    }

    #[test]
    fn test_invalid_number_is_rejected() {
        let file = File::from_str(r#"concurrent_requests = "many""#, FileFormat::Toml);
        assert!(from_sources(file, env(&[])).is_err());
    }
}
