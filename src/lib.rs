//! # gemini-model-finder
//!
//! Lists the Gemini models an API key can reach and reports which of them
//! support content generation.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use gemini_model_finder::{list_generation_capable_models, GeminiClient};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // Create client from environment variable GEMINI_API_KEY
//!     let client = GeminiClient::from_env()?;
//!
//!     for name in list_generation_capable_models(&client).await? {
//!         println!("{}", name);
//!     }
//!
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]

pub mod client;
pub mod config;
pub mod error;
pub mod finder;
pub mod models;

// Re-export main types
pub use client::{GeminiClient, GeminiClientBuilder};
pub use config::{ApiVersion, FinderConfig, HttpConfig};
pub use error::{Error, Result};
pub use finder::{find_models, list_generation_capable_models, run, FinderReport, ModelSource};
pub use models::{generation_method, ListModelsResponse, ModelDescriptor};
