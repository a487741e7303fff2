//! Configuration for the model finder

use std::time::Duration;

/// Environment variable holding the API key
pub const API_KEY_ENV: &str = "GEMINI_API_KEY";

/// Fallback environment variable for the API key
pub const FALLBACK_API_KEY_ENV: &str = "GOOGLE_API_KEY";

/// Environment variable overriding the API base URL
pub const BASE_URL_ENV: &str = "GEMINI_BASE_URL";

/// Configuration for the Gemini API client
#[derive(Clone)]
pub struct FinderConfig {
    /// API key for authentication
    pub api_key: String,

    /// Base URL for the API (can be overridden for testing)
    pub base_url: String,

    /// API version to use
    pub api_version: ApiVersion,

    /// HTTP client configuration
    pub http_config: HttpConfig,

    /// Number of descriptors requested per page; `None` leaves it to the server
    pub page_size: Option<u32>,
}

impl std::fmt::Debug for FinderConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FinderConfig")
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .field("api_version", &self.api_version)
            .field("http_config", &self.http_config)
            .field("page_size", &self.page_size)
            .finish()
    }
}

/// API version to use for requests
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ApiVersion {
    /// Stable v1 API
    V1,
    /// Beta API, the one the provider SDKs list models from
    #[default]
    V1Beta,
}

impl ApiVersion {
    /// Convert the API version to a string
    pub fn as_str(&self) -> &'static str {
        match self {
            ApiVersion::V1 => "v1",
            ApiVersion::V1Beta => "v1beta",
        }
    }
}

impl std::str::FromStr for ApiVersion {
    type Err = crate::error::Error;

    fn from_str(s: &str) -> crate::error::Result<Self> {
        match s {
            "v1" => Ok(ApiVersion::V1),
            "v1beta" => Ok(ApiVersion::V1Beta),
            other => Err(crate::error::Error::Config(format!(
                "unknown API version '{}' (expected v1 or v1beta)",
                other
            ))),
        }
    }
}

/// HTTP client configuration
#[derive(Debug, Clone)]
pub struct HttpConfig {
    /// Request timeout
    pub timeout: Duration,

    /// Connection timeout
    pub connect_timeout: Duration,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(300),
            connect_timeout: Duration::from_secs(30),
        }
    }
}

fn default_base_url() -> String {
    "https://generativelanguage.googleapis.com".to_string()
}

impl FinderConfig {
    /// Create a new configuration with an API key
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            ..Default::default()
        }
    }

    /// Load configuration from environment variables
    pub fn from_env() -> crate::error::Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    ///
    /// Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> crate::error::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let api_key = non_empty(API_KEY_ENV)
            .or_else(|| non_empty(FALLBACK_API_KEY_ENV))
            .ok_or_else(|| {
                crate::error::Error::Config(format!(
                    "{} environment variable not set",
                    API_KEY_ENV
                ))
            })?;

        let mut config = Self::new(api_key.trim());
        if let Some(base_url) = non_empty(BASE_URL_ENV) {
            config.base_url = base_url.trim_end_matches('/').to_string();
        }

        Ok(config)
    }

    /// Endpoint of the model collection
    pub fn models_endpoint(&self) -> String {
        format!("{}/{}/models", self.base_url, self.api_version.as_str())
    }
}

impl Default for FinderConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: default_base_url(),
            api_version: ApiVersion::default(),
            http_config: HttpConfig::default(),
            page_size: None,
        }
    }
}
