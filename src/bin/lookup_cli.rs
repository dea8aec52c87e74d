//! Command-line lookup: validates a document and prints the simulated result.

use doc_lookup_api::cli::run_lookup;
use doc_lookup_api::config::Config;
use doc_lookup_api::handlers::AppState;
use std::env;

/// Main entry point for the lookup utility.
///
/// Usage: `lookup_cli <DOCUMENT_TYPE> <DOCUMENT_NUMBER>`
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "doc_lookup_api=info".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = env::args().skip(1).collect();

    let config = Config::from_env()?;
    let state = AppState::from_config(&config);

    let result = run_lookup(&args, &state.simulator).await?;
    println!("{}", result.to_pretty_json()?);

    Ok(())
}
