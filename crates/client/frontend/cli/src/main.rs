//! Terminal client entry point.
use anyhow::Result;
use client_frontend_cli::{CliApp, CliConfig, logging};
use runtime::RuntimeConfig;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if it exists (silently ignore if not found)
    let _ = dotenvy::dotenv();

    let cli = CliConfig::from_env();
    let runtime = RuntimeConfig::from_env();

    let (_log_guard, log_file) = logging::setup_logging(&cli)?;

    let result = CliApp::new(cli, runtime).run().await;
    if let Err(err) = &result {
        tracing::error!(error = %err, log = %log_file.display(), "terminal client failed");
    }
    result
}
