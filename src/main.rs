use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;

use travel_pilot::acquisition::acquire;
use travel_pilot::config::{Config, API_KEY_ENV_VAR};
use travel_pilot::inference::{GeminiClient, RetryPolicy};
use travel_pilot::logging::init_tracing;
use travel_pilot::orchestrator::AnalysisOrchestrator;
use travel_pilot::ui::analysis::AnalysisState;
use travel_pilot::ui::render::{render_json, render_result, render_state};

#[derive(Parser, Debug)]
#[command(name = "travel-pilot", version, about = "Translate menus and review products from a photo")]
struct Cli {
    /// Image of a menu or product
    image: Option<PathBuf>,

    /// Config file (default: ~/.config/travel-pilot/config.toml)
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Override the model name
    #[arg(long, value_name = "NAME")]
    model: Option<String>,

    /// Override the number of retries after the first attempt
    #[arg(long, value_name = "N")]
    max_retries: Option<u32>,

    /// Print the parsed result as JSON
    #[arg(long)]
    json: bool,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(cli).await {
        Ok(()) => {}
        Err(err) => {
            eprintln!("Error: {:#}", err);
            std::process::exit(1);
        }
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let mut config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    if let Some(model) = cli.model {
        config.api.model = model;
    }
    if let Some(max_retries) = cli.max_retries {
        config.retry.max_retries = max_retries;
    }
    config.validate()?;

    let Some(payload) = acquire(cli.image.as_deref())? else {
        print!("{}", render_state(&AnalysisState::Idle));
        return Ok(());
    };

    if !config.api.is_configured() {
        let path = cli.config.clone().unwrap_or_else(Config::config_path);
        anyhow::bail!(
            "Gemini API key is not configured: set api.api_key in {} or {}",
            path.display(),
            API_KEY_ENV_VAR
        );
    }

    let client = GeminiClient::new(&config.api)?;
    tracing::debug!(endpoint = client.endpoint(), "Using inference endpoint");

    let orchestrator = AnalysisOrchestrator::new(
        client,
        RetryPolicy::from(&config.retry),
        config.analysis.prompt(),
    );

    orchestrator.submit(payload.base64().to_string())?;
    eprint!("{}", render_state(&orchestrator.state()));

    match orchestrator.wait_settled().await {
        AnalysisState::Result(output) if cli.json => {
            let json = render_json(&output, &payload).context("Failed to encode result")?;
            println!("{}", json);
            Ok(())
        }
        AnalysisState::Result(output) => {
            print!("{}", render_result(&output, &payload));
            Ok(())
        }
        AnalysisState::Error(failure) => Err(anyhow::anyhow!("Analysis failed: {}", failure)),
        other => Err(anyhow::anyhow!(
            "Analysis ended in unexpected state: {}",
            other.label()
        )),
    }
}
