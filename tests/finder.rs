use anyhow::Result;
use gemini_model_finder::{
    finder::{AVAILABLE_PREFIX, ERROR_PREFIX, NONE_FOUND, SEARCH_BANNER},
    find_models, generation_method, list_generation_capable_models, run, Error, FinderReport,
    ModelDescriptor, ModelSource,
};
use std::sync::atomic::{AtomicUsize, Ordering};

/// In-memory registry returning a fixed listing
struct FixedSource {
    models: Vec<ModelDescriptor>,
    calls: AtomicUsize,
}

impl FixedSource {
    fn new(models: Vec<ModelDescriptor>) -> Self {
        Self {
            models,
            calls: AtomicUsize::new(0),
        }
    }
}

impl ModelSource for FixedSource {
    async fn fetch_models(&self) -> gemini_model_finder::Result<Vec<ModelDescriptor>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.models.clone())
    }
}

/// Registry that always rejects the key
struct RejectingSource;

impl ModelSource for RejectingSource {
    async fn fetch_models(&self) -> gemini_model_finder::Result<Vec<ModelDescriptor>> {
        Err(Error::Api {
            status: 400,
            message: "API key not valid. Please pass a valid API key.".to_string(),
            details: None,
        })
    }
}

fn chat(name: &str) -> ModelDescriptor {
    ModelDescriptor::new(name, ["generateContent", "countTokens"])
}

fn embedding(name: &str) -> ModelDescriptor {
    ModelDescriptor::new(name, ["embedContent"])
}

async fn capture<S: ModelSource>(
    source: gemini_model_finder::Result<S>,
) -> Result<(FinderReport, Vec<String>)> {
    let mut out = Vec::new();
    let report = run(source, generation_method::GENERATE_CONTENT, false, &mut out).await?;
    let text = String::from_utf8(out)?;
    Ok((report, text.lines().map(str::to_string).collect()))
}

#[tokio::test]
async fn test_single_generation_model_is_listed() -> Result<()> {
    let (report, lines) = capture(Ok(FixedSource::new(vec![chat("gemini-pro")]))).await?;

    assert_eq!(lines, vec![SEARCH_BANNER, "✅ AVAILABLE: gemini-pro"]);
    assert_eq!(report.names(), vec!["gemini-pro"]);
    Ok(())
}

#[tokio::test]
async fn test_no_generation_models() -> Result<()> {
    let source = FixedSource::new(vec![
        embedding("models/embedding-001"),
        embedding("models/text-embedding-004"),
    ]);
    let (report, lines) = capture(Ok(source)).await?;

    assert_eq!(report, FinderReport::NoneFound);
    assert_eq!(lines, vec![SEARCH_BANNER, NONE_FOUND]);
    Ok(())
}

#[tokio::test]
async fn test_empty_listing_reports_none_found() -> Result<()> {
    let (_, lines) = capture(Ok(FixedSource::new(Vec::new()))).await?;

    assert_eq!(
        lines,
        vec![
            "🔍 Searching for available models...",
            "❌ No chat models found. Check API Key permissions."
        ]
    );
    Ok(())
}

#[tokio::test]
async fn test_invalid_key_prints_single_error_line() -> Result<()> {
    let (report, lines) = capture(Ok(RejectingSource)).await?;

    assert_eq!(lines.len(), 2);
    assert_eq!(lines[0], SEARCH_BANNER);
    assert!(lines[1].starts_with(ERROR_PREFIX));
    assert!(lines[1].contains("API key not valid"));
    assert!(!lines.iter().any(|l| l.starts_with(AVAILABLE_PREFIX)));
    assert!(!lines.iter().any(|l| l == NONE_FOUND));
    assert!(matches!(report, FinderReport::Failed(_)));
    Ok(())
}

#[tokio::test]
async fn test_configuration_error_is_reported_like_listing_error() -> Result<()> {
    let source: gemini_model_finder::Result<FixedSource> = Err(Error::Config(
        "GEMINI_API_KEY environment variable not set".to_string(),
    ));
    let (_, lines) = capture(source).await?;

    assert_eq!(
        lines,
        vec![
            SEARCH_BANNER.to_string(),
            "❌ Error: Invalid configuration: GEMINI_API_KEY environment variable not set"
                .to_string()
        ]
    );
    Ok(())
}

#[tokio::test]
async fn test_available_lines_match_capable_descriptors_in_order() -> Result<()> {
    let source = FixedSource::new(vec![
        chat("models/gemini-2.5-flash"),
        embedding("models/embedding-001"),
        ModelDescriptor::new("models/aqa", ["generateAnswer"]),
        chat("models/gemini-2.5-pro"),
        ModelDescriptor::new("models/gemini-1.5-flash", ["countTokens", "generateContent"]),
    ]);
    let (_, lines) = capture(Ok(source)).await?;

    let available: Vec<_> = lines
        .iter()
        .filter_map(|l| l.strip_prefix(AVAILABLE_PREFIX))
        .collect();
    assert_eq!(
        available,
        vec![
            "models/gemini-2.5-flash",
            "models/gemini-2.5-pro",
            "models/gemini-1.5-flash"
        ]
    );
    assert!(!lines.iter().any(|l| l == NONE_FOUND));
    Ok(())
}

#[tokio::test]
async fn test_capability_match_is_exact() -> Result<()> {
    let source = FixedSource::new(vec![
        ModelDescriptor::new("models/a", ["GenerateContent"]),
        ModelDescriptor::new("models/b", ["streamGenerateContent"]),
    ]);

    assert!(list_generation_capable_models(&source).await?.is_empty());
    Ok(())
}

#[tokio::test]
async fn test_repeated_runs_are_identical() -> Result<()> {
    let source = FixedSource::new(vec![chat("models/gemini-pro"), embedding("models/e")]);

    let mut first = Vec::new();
    run(Ok(&source), "generateContent", false, &mut first).await?;
    let mut second = Vec::new();
    run(Ok(&source), "generateContent", false, &mut second).await?;

    assert_eq!(first, second);
    assert_eq!(source.calls.load(Ordering::SeqCst), 2);
    Ok(())
}

#[tokio::test]
async fn test_find_models_with_other_method() -> Result<()> {
    let source = FixedSource::new(vec![chat("models/gemini-pro"), embedding("models/e")]);

    let found = find_models(&source, generation_method::EMBED_CONTENT).await?;
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].name, "models/e");
    Ok(())
}

#[tokio::test]
async fn test_verbose_lines_include_summary() -> Result<()> {
    let mut model = chat("models/gemini-pro");
    model.display_name = Some("Gemini Pro".to_string());
    model.input_token_limit = Some(30720);

    let mut out = Vec::new();
    run(
        Ok(FixedSource::new(vec![model, chat("models/bare")])),
        "generateContent",
        true,
        &mut out,
    )
    .await?;

    let text = String::from_utf8(out)?;
    assert!(text.contains("✅ AVAILABLE: models/gemini-pro (Gemini Pro, in 30720)\n"));
    assert!(text.contains("✅ AVAILABLE: models/bare\n"));
    Ok(())
}
