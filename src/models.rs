//! Model descriptors returned by the Gemini model registry

use serde::{Deserialize, Serialize};

/// Names of the generation methods a model may declare
pub mod generation_method {
    /// Content generation; the capability chat models expose
    pub const GENERATE_CONTENT: &str = "generateContent";
    /// Token counting
    pub const COUNT_TOKENS: &str = "countTokens";
    /// Embeddings
    pub const EMBED_CONTENT: &str = "embedContent";
    /// Context caching
    pub const CREATE_CACHED_CONTENT: &str = "createCachedContent";
    /// Batch generation
    pub const BATCH_GENERATE_CONTENT: &str = "batchGenerateContent";
}

/// Metadata describing one remotely hosted model
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct ModelDescriptor {
    /// Resource name, e.g. `models/gemini-pro`
    pub name: String,

    /// Capabilities the model offers
    #[serde(default)]
    pub supported_generation_methods: Vec<String>,

    /// Name of the base model
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_model_id: Option<String>,

    /// Version string
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,

    /// Human-readable name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,

    /// Short description
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Maximum input tokens
    #[serde(skip_serializing_if = "Option::is_none")]
    pub input_token_limit: Option<u64>,

    /// Maximum output tokens
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output_token_limit: Option<u64>,

    /// Default sampling temperature
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,

    /// Highest accepted temperature
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_temperature: Option<f32>,

    /// Default nucleus sampling value
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top_p: Option<f32>,

    /// Default top-k value
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top_k: Option<u32>,

    /// Whether the model supports thinking
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thinking: Option<bool>,
}

impl ModelDescriptor {
    /// Create a descriptor with a name and capability list
    pub fn new<I, S>(name: impl Into<String>, methods: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            supported_generation_methods: methods.into_iter().map(Into::into).collect(),
            ..Default::default()
        }
    }

    /// Whether the model declares `method` among its capabilities
    pub fn supports(&self, method: &str) -> bool {
        self.supported_generation_methods
            .iter()
            .any(|m| m == method)
    }

    /// Whether the model can generate content
    pub fn supports_generate_content(&self) -> bool {
        self.supports(generation_method::GENERATE_CONTENT)
    }

    /// Name without the `models/` collection prefix
    pub fn short_name(&self) -> &str {
        self.name.strip_prefix("models/").unwrap_or(&self.name)
    }

    /// One-line summary of the optional details, if any are present
    pub fn summary(&self) -> Option<String> {
        let mut parts = Vec::new();
        if let Some(display_name) = &self.display_name {
            parts.push(display_name.clone());
        }
        if let Some(limit) = self.input_token_limit {
            parts.push(format!("in {}", limit));
        }
        if let Some(limit) = self.output_token_limit {
            parts.push(format!("out {}", limit));
        }
        if parts.is_empty() {
            None
        } else {
            Some(parts.join(", "))
        }
    }
}

/// One page of the model listing
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct ListModelsResponse {
    /// Descriptors on this page
    #[serde(default)]
    pub models: Vec<ModelDescriptor>,

    /// Token for the following page
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_page_token: Option<String>,
}

impl ListModelsResponse {
    /// Token of the next page; empty tokens mean the listing is complete
    pub fn next_page(&self) -> Option<&str> {
        self.next_page_token.as_deref().filter(|t| !t.is_empty())
    }
}
