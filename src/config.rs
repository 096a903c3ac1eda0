//! Runtime settings gathered from the environment (and `.env`, loaded by the binary).

use std::time::Duration;

pub const DEFAULT_LOG_FILE_PATH: &str = "logs/pm_route_planner.log";
pub const DEFAULT_EXPORT_DIR: &str = "exports";
pub const DEFAULT_FETCH_TIMEOUT_SECS: u64 = 30;

/// Settings with environment overrides. CLI flags take precedence over these.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// `PM_API_URL`: default record source (URL or file path).
    pub api_url: Option<String>,
    /// `PM_EXPORT_DIR`
    pub export_dir: String,
    /// `LOG_FILE_PATH`
    pub log_file_path: String,
    /// `PM_FETCH_TIMEOUT_SECS`
    pub fetch_timeout: Duration,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_url: None,
            export_dir: DEFAULT_EXPORT_DIR.to_string(),
            log_file_path: DEFAULT_LOG_FILE_PATH.to_string(),
            fetch_timeout: Duration::from_secs(DEFAULT_FETCH_TIMEOUT_SECS),
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Builds the config from an arbitrary variable lookup. Blank values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let get = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());
        let defaults = Self::default();

        Self {
            api_url: get("PM_API_URL"),
            export_dir: get("PM_EXPORT_DIR").unwrap_or(defaults.export_dir),
            log_file_path: get("LOG_FILE_PATH").unwrap_or(defaults.log_file_path),
            fetch_timeout: get("PM_FETCH_TIMEOUT_SECS")
                .and_then(|v| v.trim().parse().ok())
                .map(Duration::from_secs)
                .unwrap_or(defaults.fetch_timeout),
        }
    }
}
