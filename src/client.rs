//! Gemini model registry client

use crate::{
    config::{ApiVersion, FinderConfig},
    error::{Error, Result},
    models::{ListModelsResponse, ModelDescriptor},
};
use reqwest::{Client as HttpClient, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, instrument, warn};

/// Header carrying the API key. The key never goes into a URL.
pub const API_KEY_HEADER: &str = "x-goog-api-key";

/// Client for the model registry endpoints
#[derive(Clone)]
pub struct GeminiClient {
    config: Arc<FinderConfig>,
    http_client: HttpClient,
}

impl GeminiClient {
    /// Create a new client with the given configuration
    pub fn new(config: FinderConfig) -> Result<Self> {
        let http_client = Self::build_http_client(&config)?;

        Ok(Self {
            config: Arc::new(config),
            http_client,
        })
    }

    /// Create a new client from environment variables
    pub fn from_env() -> Result<Self> {
        let config = FinderConfig::from_env()?;
        Self::new(config)
    }

    /// Get a builder for creating a customized client
    pub fn builder() -> GeminiClientBuilder {
        GeminiClientBuilder::default()
    }

    /// Fetch a single page of model descriptors
    #[instrument(skip(self))]
    pub async fn list_models_page(&self, page_token: Option<&str>) -> Result<ListModelsResponse> {
        let endpoint = self.config.models_endpoint();
        debug!("Listing models from {}", endpoint);

        let mut request = self
            .http_client
            .get(&endpoint)
            .header(API_KEY_HEADER, self.config.api_key.as_str());
        if let Some(size) = self.config.page_size {
            request = request.query(&[("pageSize", size)]);
        }
        if let Some(token) = page_token {
            request = request.query(&[("pageToken", token)]);
        }

        self.execute(request).await
    }

    /// Fetch every accessible model descriptor, following page tokens.
    ///
    /// Either the whole listing is returned or the first failure is.
    #[instrument(skip(self))]
    pub async fn list_models(&self) -> Result<Vec<ModelDescriptor>> {
        let mut models = Vec::new();
        let mut page_token: Option<String> = None;
        let mut seen = HashSet::new();
        let mut pages = 0usize;

        loop {
            let page = self.list_models_page(page_token.as_deref()).await?;
            pages += 1;
            let next = page.next_page().map(str::to_string);
            models.extend(page.models);

            match next {
                Some(next) if !seen.insert(next.clone()) => {
                    return Err(Error::InvalidResponse(format!(
                        "page token '{}' repeated",
                        next
                    )));
                }
                Some(next) => page_token = Some(next),
                None => break,
            }
        }

        debug!("Fetched {} models over {} pages", models.len(), pages);
        Ok(models)
    }

    /// Fetch one model descriptor by name, with or without the `models/` prefix
    #[instrument(skip(self))]
    pub async fn get_model(&self, name: &str) -> Result<ModelDescriptor> {
        let name = name.strip_prefix("models/").unwrap_or(name);
        if name.is_empty() {
            return Err(Error::Config("model name is empty".to_string()));
        }
        let endpoint = format!("{}/{}", self.config.models_endpoint(), name);

        self.execute(
            self.http_client
                .get(&endpoint)
                .header(API_KEY_HEADER, self.config.api_key.as_str()),
        )
        .await
    }

    /// Get the configuration
    pub fn config(&self) -> &FinderConfig {
        &self.config
    }

    /// Build the HTTP client with configuration
    fn build_http_client(config: &FinderConfig) -> Result<HttpClient> {
        HttpClient::builder()
            .timeout(config.http_config.timeout)
            .connect_timeout(config.http_config.connect_timeout)
            .build()
            .map_err(Error::from)
    }

    /// Send a request once and decode the body
    async fn execute<T>(&self, request: RequestBuilder) -> Result<T>
    where
        T: DeserializeOwned,
    {
        let response = request.send().await?;
        let status = response.status();

        if status.is_success() {
            return response.json::<T>().await.map_err(Error::from);
        }

        let error_body = response.text().await.unwrap_or_default();
        let error = handle_api_error(status, error_body);
        warn!("Model registry returned an error: {}", error);
        Err(error)
    }
}

/// Map a non-success response to an [`Error`]
pub(crate) fn handle_api_error(status: StatusCode, body: String) -> Error {
    let details = serde_json::from_str::<serde_json::Value>(&body).ok();

    match status {
        StatusCode::TOO_MANY_REQUESTS => {
            let retry_after = details
                .as_ref()
                .and_then(|d| d.get("retryAfter"))
                .and_then(|v| v.as_u64())
                .map(Duration::from_secs);

            Error::RateLimit { retry_after }
        }
        _ => Error::Api {
            status: status.as_u16(),
            message: details
                .as_ref()
                .and_then(|d| d.get("error"))
                .and_then(|e| e.get("message"))
                .and_then(|m| m.as_str())
                .unwrap_or(&body)
                .to_string(),
            details,
        },
    }
}

/// Builder for creating a customized GeminiClient
#[derive(Default)]
pub struct GeminiClientBuilder {
    config: Option<FinderConfig>,
}

impl GeminiClientBuilder {
    /// Start from an existing configuration
    pub fn config(mut self, config: FinderConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Set the API key
    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        let mut config = self.config.unwrap_or_default();
        config.api_key = key.into();
        self.config = Some(config);
        self
    }

    /// Set the base URL
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        let mut config = self.config.unwrap_or_default();
        config.base_url = url.into().trim_end_matches('/').to_string();
        self.config = Some(config);
        self
    }

    /// Set the API version
    pub fn api_version(mut self, version: ApiVersion) -> Self {
        let mut config = self.config.unwrap_or_default();
        config.api_version = version;
        self.config = Some(config);
        self
    }

    /// Set request timeout
    pub fn timeout(mut self, timeout: Duration) -> Self {
        let mut config = self.config.unwrap_or_default();
        config.http_config.timeout = timeout;
        self.config = Some(config);
        self
    }

    /// Set the page size requested from the registry
    pub fn page_size(mut self, size: u32) -> Self {
        let mut config = self.config.unwrap_or_default();
        config.page_size = Some(size);
        self.config = Some(config);
        self
    }

    /// Build the client
    pub fn build(self) -> Result<GeminiClient> {
        let config = self
            .config
            .ok_or_else(|| Error::Config("Configuration not properly initialized".to_string()))?;

        if config.api_key.is_empty() {
            return Err(Error::Config("API key is required".to_string()));
        }
        if config.page_size == Some(0) {
            return Err(Error::Config("page size must be positive".to_string()));
        }

        GeminiClient::new(config)
    }
}
