use std::time::Duration;

use anyhow::{bail, Context, Result};
use chrono::format::{Item, StrftimeItems};

const DEFAULT_BASE_URL: &str = "http://localhost:8000";
const DEFAULT_BASE_PATH: &str = "/job-sphere";
const DEFAULT_DATE_FORMAT: &str = "%-m/%-d/%Y";

/// Client configuration loaded from environment variables (and `.env` if present).
/// Every value has a default, so an empty environment yields a working local setup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Scheme, host and port of the Job Sphere server, without a trailing slash.
    pub base_url: String,
    /// Path prefix the server mounts its API under, e.g. `/job-sphere`.
    pub base_path: String,
    pub request_timeout: Duration,
    /// How long a transient notice stays visible before it is dismissed.
    pub notice_duration: Duration,
    /// strftime pattern for listings posted 30 or more days ago.
    pub date_format: String,
    pub rust_log: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            base_path: DEFAULT_BASE_PATH.to_string(),
            request_timeout: Duration::from_secs(30),
            notice_duration: Duration::from_secs(5),
            date_format: DEFAULT_DATE_FORMAT.to_string(),
            rust_log: "info".to_string(),
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let defaults = Config::default();
        let date_format =
            std::env::var("JOB_SPHERE_DATE_FORMAT").unwrap_or(defaults.date_format);
        validate_date_format(&date_format)?;

        Ok(Config {
            base_url: normalize_base_url(
                &std::env::var("JOB_SPHERE_URL").unwrap_or(defaults.base_url),
            ),
            base_path: normalize_base_path(
                &std::env::var("JOB_SPHERE_BASE_PATH").unwrap_or(defaults.base_path),
            ),
            request_timeout: secs_env("JOB_SPHERE_TIMEOUT_SECS", defaults.request_timeout)?,
            notice_duration: secs_env("JOB_SPHERE_NOTICE_SECS", defaults.notice_duration)?,
            date_format,
            rust_log: std::env::var("RUST_LOG").unwrap_or(defaults.rust_log),
        })
    }

    /// Applies command-line overrides on top of the environment.
    pub fn with_overrides(mut self, base_url: Option<String>, base_path: Option<String>) -> Self {
        if let Some(url) = base_url {
            self.base_url = normalize_base_url(&url);
        }
        if let Some(path) = base_path {
            self.base_path = normalize_base_path(&path);
        }
        self
    }

    /// Full URL of an API endpoint, e.g. `endpoint("/api/login")`.
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}{}{}", self.base_url, self.base_path, path)
    }
}

fn secs_env(key: &str, default: Duration) -> Result<Duration> {
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse::<u64>()
            .map(Duration::from_secs)
            .with_context(|| format!("{key} must be a whole number of seconds")),
        Err(_) => Ok(default),
    }
}

fn normalize_base_url(url: &str) -> String {
    url.trim().trim_end_matches('/').to_string()
}

fn normalize_base_path(path: &str) -> String {
    let trimmed = path.trim().trim_matches('/');
    if trimmed.is_empty() {
        String::new()
    } else {
        format!("/{trimmed}")
    }
}

/// chrono panics when formatting with a malformed pattern, so reject it at startup.
fn validate_date_format(pattern: &str) -> Result<()> {
    if StrftimeItems::new(pattern).any(|item| matches!(item, Item::Error)) {
        bail!("JOB_SPHERE_DATE_FORMAT '{pattern}' is not a valid strftime pattern");
    }
    Ok(())
}
