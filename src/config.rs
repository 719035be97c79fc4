/// Client configuration for the Purrr.love API.
use std::fmt;
use std::time::Duration;

/// Production API endpoint.
pub const DEFAULT_BASE_URL: &str = "https://api.purrr.love";

/// Request timeout applied unless the caller overrides it.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Header carrying the API credential on every authenticated request.
pub const API_KEY_HEADER: &str = "X-API-Key";

/// SDK version, baked in at build time.
pub const SDK_VERSION: &str = env!("CARGO_PKG_VERSION");

pub const BASE_URL_ENV: &str = "PURRR_LOVE_BASE_URL";
pub const API_KEY_ENV: &str = "PURRR_LOVE_API_KEY";

/// Configuration for a [`Executor`](crate::executor::Executor).
#[derive(Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// API root. Trailing slashes are stripped.
    pub base_url: String,
    pub api_key: Option<String>,
    /// Whole-request timeout. `None` leaves reqwest's default (no timeout).
    pub timeout: Option<Duration>,
    pub user_agent: String,
}

impl ClientConfig {
    /// Configuration for an arbitrary API root.
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: normalize_base_url(base_url),
            api_key: None,
            timeout: Some(DEFAULT_TIMEOUT),
            user_agent: default_user_agent(),
        }
    }

    /// Read `PURRR_LOVE_BASE_URL` and `PURRR_LOVE_API_KEY` from the
    /// environment. Unset or blank variables fall back to defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Like [`from_env`](Self::from_env), reading variables through `lookup`.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());
        let mut config = Self::new(var(BASE_URL_ENV).as_deref().unwrap_or(DEFAULT_BASE_URL));
        config.api_key = var(API_KEY_ENV);
        config
    }

    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn without_timeout(mut self) -> Self {
        self.timeout = None;
        self
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

// Keeps the credential out of logs and panic messages.
impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("base_url", &self.base_url)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("timeout", &self.timeout)
            .field("user_agent", &self.user_agent)
            .finish()
    }
}

/// Strip surrounding whitespace and any trailing `/` from an API root.
pub fn normalize_base_url(base_url: &str) -> String {
    base_url.trim().trim_end_matches('/').to_string()
}

pub fn default_user_agent() -> String {
    format!("PurrrLove-Rust-SDK/{SDK_VERSION}")
}
