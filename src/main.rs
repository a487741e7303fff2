//! Command-line entry point: prints the models an API key can use.

use clap::{ArgAction, Parser};
use dotenv::dotenv;
use gemini_model_finder::{
    generation_method, run, ApiVersion, FinderConfig, GeminiClient, Result,
};
use tracing_subscriber::EnvFilter;

/// Lists the Gemini models available to an API key
#[derive(Parser)]
#[command(author, version, about)]
struct Args {
    /// Override the API base URL
    #[arg(long)]
    base_url: Option<String>,

    /// API version to query (v1 or v1beta)
    #[arg(long, default_value = "v1beta")]
    api_version: String,

    /// Generation method a model must support
    #[arg(long, default_value = generation_method::GENERATE_CONTENT)]
    method: String,

    /// Descriptors requested per page
    #[arg(long)]
    page_size: Option<u32>,

    /// Increase log verbosity and show model details (repeatable)
    #[arg(short = 'v', long = "verbose", action = ArgAction::Count)]
    verbose: u8,
}

impl Args {
    fn client(&self) -> Result<GeminiClient> {
        let mut config = FinderConfig::from_env()?;
        config.api_version = self.api_version.parse::<ApiVersion>()?;

        let mut builder = GeminiClient::builder().config(config);
        if let Some(url) = &self.base_url {
            builder = builder.base_url(url);
        }
        if let Some(size) = self.page_size {
            builder = builder.page_size(size);
        }
        builder.build()
    }
}

fn init_logging(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .ok();
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    // Load API key from .env if present
    dotenv().ok();

    let args = Args::parse();
    init_logging(args.verbose);

    let source = args.client();

    let mut stdout = std::io::stdout().lock();
    run(source, &args.method, args.verbose > 0, &mut stdout).await?;

    Ok(())
}
