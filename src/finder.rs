//! Filtering the model listing by capability and reporting it on the console

use crate::{
    client::GeminiClient,
    error::Result,
    models::{generation_method, ModelDescriptor},
};
use std::future::Future;
use std::io::{self, Write};
use tracing::{debug, info};

/// Printed before the registry is contacted
pub const SEARCH_BANNER: &str = "🔍 Searching for available models...";

/// Prefix of every matching model line
pub const AVAILABLE_PREFIX: &str = "✅ AVAILABLE: ";

/// Printed when no model matched
pub const NONE_FOUND: &str = "❌ No chat models found. Check API Key permissions.";

/// Prefix of the failure line
pub const ERROR_PREFIX: &str = "❌ Error: ";

/// Anything that can produce the full list of model descriptors
pub trait ModelSource {
    /// Fetch every descriptor, in provider order
    fn fetch_models(&self) -> impl Future<Output = Result<Vec<ModelDescriptor>>> + Send;
}

impl ModelSource for GeminiClient {
    fn fetch_models(&self) -> impl Future<Output = Result<Vec<ModelDescriptor>>> + Send {
        self.list_models()
    }
}

impl<S: ModelSource + Sync> ModelSource for &S {
    fn fetch_models(&self) -> impl Future<Output = Result<Vec<ModelDescriptor>>> + Send {
        (**self).fetch_models()
    }
}

/// Descriptors from `source` that support `method`, in provider order
pub async fn find_models<S>(source: &S, method: &str) -> Result<Vec<ModelDescriptor>>
where
    S: ModelSource,
{
    let models = source.fetch_models().await?;
    let total = models.len();

    let matching: Vec<_> = models.into_iter().filter(|m| m.supports(method)).collect();
    debug!("{} of {} models support {}", matching.len(), total, method);

    Ok(matching)
}

/// Names of every model that supports content generation
pub async fn list_generation_capable_models<S>(source: &S) -> Result<Vec<String>>
where
    S: ModelSource,
{
    let models = find_models(source, generation_method::GENERATE_CONTENT).await?;
    Ok(models.into_iter().map(|m| m.name).collect())
}

/// Terminal outcome of one search
#[derive(Debug, Clone, PartialEq)]
pub enum FinderReport {
    /// At least one model matched
    Available(Vec<ModelDescriptor>),
    /// The listing succeeded but nothing matched
    NoneFound,
    /// Configuration or listing failed; holds the error description
    Failed(String),
}

impl FinderReport {
    /// Build a report from a search result
    pub fn from_result(result: Result<Vec<ModelDescriptor>>) -> Self {
        match result {
            Ok(models) if models.is_empty() => FinderReport::NoneFound,
            Ok(models) => FinderReport::Available(models),
            Err(e) => FinderReport::Failed(e.to_string()),
        }
    }

    /// Names of the matching models, empty unless `Available`
    pub fn names(&self) -> Vec<&str> {
        match self {
            FinderReport::Available(models) => models.iter().map(|m| m.name.as_str()).collect(),
            _ => Vec::new(),
        }
    }

    /// Write the outcome lines.
    ///
    /// With `verbose`, matching lines carry a summary of the descriptor.
    pub fn render<W: Write>(&self, out: &mut W, verbose: bool) -> io::Result<()> {
        match self {
            FinderReport::Available(models) => {
                for model in models {
                    match model.summary().filter(|_| verbose) {
                        Some(summary) => {
                            writeln!(out, "{}{} ({})", AVAILABLE_PREFIX, model.name, summary)?
                        }
                        None => writeln!(out, "{}{}", AVAILABLE_PREFIX, model.name)?,
                    }
                }
            }
            FinderReport::NoneFound => writeln!(out, "{}", NONE_FOUND)?,
            FinderReport::Failed(description) => {
                writeln!(out, "{}{}", ERROR_PREFIX, description)?
            }
        }
        Ok(())
    }
}

/// Print the banner, search `source` for `method`, and print the outcome.
///
/// `source` is a `Result` so that client construction failures are reported
/// the same way as listing failures. Only write errors are returned.
pub async fn run<S, W>(
    source: Result<S>,
    method: &str,
    verbose: bool,
    out: &mut W,
) -> io::Result<FinderReport>
where
    S: ModelSource,
    W: Write,
{
    writeln!(out, "{}", SEARCH_BANNER)?;
    out.flush()?;

    let result = match source {
        Ok(source) => find_models(&source, method).await,
        Err(e) => Err(e),
    };
    let report = FinderReport::from_result(result);

    match &report {
        FinderReport::Available(models) => info!("found {} matching models", models.len()),
        FinderReport::NoneFound => info!("no model supports {}", method),
        FinderReport::Failed(description) => info!("model search failed: {}", description),
    }

    report.render(out, verbose)?;
    out.flush()?;
    Ok(report)
}
