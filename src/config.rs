/// Client configuration.
///
/// Values are resolved in three layers, later layers winning:
///   1. built-in defaults (a local development service on port 5001)
///   2. an optional TOML file (`aquamon.toml` by default)
///   3. environment variables, after loading `.env` if present
///
/// CLI flags are applied on top by the binary.

use std::env;
use std::fs;
use std::path::Path;

use serde::Deserialize;

pub const DEFAULT_CONFIG_PATH: &str = "./aquamon.toml";

pub const ENV_PREDICTION_URL: &str = "PREDICTION_SERVICE_URL";
pub const ENV_ALERTS_URL: &str = "ALERT_SERVICE_URL";
pub const ENV_TIMEOUT: &str = "REQUEST_TIMEOUT_SECS";
pub const ENV_LOG_LEVEL: &str = "AQUAMON_LOG_LEVEL";
pub const ENV_LOG_FILE: &str = "AQUAMON_LOG_FILE";

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Config {
    pub prediction_service_url: String,
    pub alert_service_url: String,
    /// Upper bound on each HTTP request, in seconds.
    pub request_timeout_secs: u64,
    /// Default tracing filter; `RUST_LOG` takes precedence when set.
    pub log_level: String,
    pub log_file: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            prediction_service_url: "http://localhost:5001/api/analyze".to_string(),
            alert_service_url: "http://localhost:5001/api/alerts".to_string(),
            request_timeout_secs: 30,
            log_level: "info".to_string(),
            log_file: None,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Read { path: String, source: std::io::Error },
    #[error("invalid config file {path}: {source}")]
    Parse { path: String, source: toml::de::Error },
    #[error("invalid value for {var}: {value:?}")]
    Env { var: &'static str, value: String },
}

impl Config {
    /// Parses configuration from TOML text. Missing keys keep their defaults.
    pub fn from_toml_str(text: &str, origin: &str) -> Result<Self, ConfigError> {
        toml::from_str(text).map_err(|source| ConfigError::Parse {
            path: origin.to_string(),
            source,
        })
    }

    /// Reads configuration from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let display = path.display().to_string();
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: display.clone(),
            source,
        })?;
        Self::from_toml_str(&text, &display)
    }

    /// Resolves the full configuration.
    ///
    /// An explicit `path` must exist; without one, `DEFAULT_CONFIG_PATH` is
    /// used only if present.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        dotenv::dotenv().ok();

        let mut config = match path {
            Some(p) => Self::from_file(p)?,
            None if Path::new(DEFAULT_CONFIG_PATH).exists() => {
                Self::from_file(Path::new(DEFAULT_CONFIG_PATH))?
            }
            None => Self::default(),
        };
        config.apply_overrides(|var| env::var(var).ok())?;
        Ok(config)
    }

    /// Applies environment-style overrides from `lookup`.
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup(ENV_PREDICTION_URL) {
            self.prediction_service_url = url;
        }
        if let Some(url) = lookup(ENV_ALERTS_URL) {
            self.alert_service_url = url;
        }
        if let Some(raw) = lookup(ENV_TIMEOUT) {
            self.request_timeout_secs = raw
                .trim()
                .parse::<u64>()
                .ok()
                .filter(|secs| *secs > 0)
                .ok_or(ConfigError::Env { var: ENV_TIMEOUT, value: raw })?;
        }
        if let Some(level) = lookup(ENV_LOG_LEVEL) {
            self.log_level = level;
        }
        if let Some(file) = lookup(ENV_LOG_FILE) {
            self.log_file = Some(file).filter(|f| !f.is_empty());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |var| map.get(var).cloned()
    }

    #[test]
    fn test_defaults_point_at_local_service() {
        let config = Config::default();
        assert_eq!(config.prediction_service_url, "http://localhost:5001/api/analyze");
        assert_eq!(config.alert_service_url, "http://localhost:5001/api/alerts");
        assert_eq!(config.request_timeout_secs, 30);
    }

    #[test]
    fn test_partial_toml_keeps_defaults_for_missing_keys() {
        let config = Config::from_toml_str(
            r#"prediction_service_url = "https://water.example/api/analyze""#,
            "inline",
        )
        .expect("partial config should parse");
        assert_eq!(config.prediction_service_url, "https://water.example/api/analyze");
        assert_eq!(config.alert_service_url, Config::default().alert_service_url);
    }

    #[test]
    fn test_malformed_toml_reports_origin() {
        let err = Config::from_toml_str("request_timeout_secs = \"soon\"", "bad.toml").unwrap_err();
        assert!(err.to_string().contains("bad.toml"), "got: {}", err);
    }

    #[test]
    fn test_from_file_reads_toml() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "alert_service_url = \"http://alerts.internal/api/alerts\"").unwrap();
        writeln!(file, "request_timeout_secs = 5").unwrap();
        let config = Config::from_file(file.path()).expect("temp config should load");
        assert_eq!(config.alert_service_url, "http://alerts.internal/api/alerts");
        assert_eq!(config.request_timeout_secs, 5);
    }

    #[test]
    fn test_missing_explicit_file_is_an_error() {
        let err = Config::from_file(Path::new("/nonexistent/aquamon.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }

    #[test]
    fn test_env_overrides_win_over_file_values() {
        let mut config = Config::default();
        config
            .apply_overrides(lookup_from(&[
                (ENV_PREDICTION_URL, "http://p/analyze"),
                (ENV_TIMEOUT, "12"),
                (ENV_LOG_FILE, "/tmp/aquamon.log"),
            ]))
            .unwrap();
        assert_eq!(config.prediction_service_url, "http://p/analyze");
        assert_eq!(config.request_timeout_secs, 12);
        assert_eq!(config.log_file.as_deref(), Some("/tmp/aquamon.log"));
        assert_eq!(config.alert_service_url, Config::default().alert_service_url);
    }

    #[test]
    fn test_invalid_timeout_override_is_rejected() {
        let mut config = Config::default();
        assert!(config.apply_overrides(lookup_from(&[(ENV_TIMEOUT, "0")])).is_err());
        assert!(config.apply_overrides(lookup_from(&[(ENV_TIMEOUT, "ten")])).is_err());
    }
}
