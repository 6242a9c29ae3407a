use crate::cache::DEFAULT_TTL_SECS;
use std::fmt;
use std::path::PathBuf;
use tracing::warn;

pub const ENV_API_URL: &str = "ESTATE_API_URL";
pub const ENV_API_KEY: &str = "ESTATE_API_KEY";
pub const ENV_API_SECRET: &str = "ESTATE_API_SECRET";
pub const ENV_SESSION_FILE: &str = "ESTATE_SESSION_FILE";
pub const ENV_HTTP_TIMEOUT: &str = "ESTATE_HTTP_TIMEOUT_SECS";

/// Connection settings for the property backend
#[derive(Clone)]
pub struct ApiConfig {
    /// API base URL, paths like `/properties` are appended
    pub base_url: String,
    pub api_key: String,
    pub api_secret: String,
    /// File holding the bearer token of the signed-in user
    pub session_file: PathBuf,
    pub timeout_secs: u64,
    pub cache_ttl_secs: i64,
}

impl fmt::Debug for ApiConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiConfig")
            .field("base_url", &self.base_url)
            .field("api_key", &self.api_key)
            .field("api_secret", &redacted(&self.api_secret))
            .field("session_file", &self.session_file)
            .field("timeout_secs", &self.timeout_secs)
            .field("cache_ttl_secs", &self.cache_ttl_secs)
            .finish()
    }
}

/// Placeholder printed instead of a secret value
pub(crate) fn redacted(secret: &str) -> &'static str {
    if secret.is_empty() {
        "<unset>"
    } else {
        "<redacted>"
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:4000/api".to_string(),
            api_key: String::new(),
            api_secret: String::new(),
            session_file: default_session_file(),
            timeout_secs: 30,
            cache_ttl_secs: DEFAULT_TTL_SECS,
        }
    }
}

impl ApiConfig {
    /// Defaults overridden by `ESTATE_*` environment variables
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(url) = lookup(ENV_API_URL) {
            config.base_url = url;
        }
        if let Some(key) = lookup(ENV_API_KEY) {
            config.api_key = key;
        }
        if let Some(secret) = lookup(ENV_API_SECRET) {
            config.api_secret = secret;
        }
        if let Some(path) = lookup(ENV_SESSION_FILE) {
            config.session_file = PathBuf::from(path);
        }
        if let Some(raw) = lookup(ENV_HTTP_TIMEOUT) {
            match raw.trim().parse::<u64>() {
                Ok(secs) if secs > 0 => config.timeout_secs = secs,
                _ => warn!(value = %raw, "ignoring invalid {}", ENV_HTTP_TIMEOUT),
            }
        }

        config
    }

    /// Names of required credentials that are empty
    pub fn missing_credentials(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.api_key.trim().is_empty() {
            missing.push(ENV_API_KEY);
        }
        if self.api_secret.trim().is_empty() {
            missing.push(ENV_API_SECRET);
        }
        missing
    }
}

fn default_session_file() -> PathBuf {
    std::env::var_os("HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".estate-gateway")
        .join("session_token")
}
