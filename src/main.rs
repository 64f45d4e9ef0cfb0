use std::process::ExitCode;

use anyhow::{Context, Result};
use ollama_rag::{init_default_tracing, test_ollama_setup, Config, OllamaClient};

#[tokio::main]
async fn main() -> Result<ExitCode> {
    init_default_tracing();

    let config = Config::from_env();
    config
        .setup_directories()
        .with_context(|| format!("creating data directories under {}", config.data_dir.display()))?;
    println!("✅ Directories created/verified");

    let client = OllamaClient::new(&config)?;

    if test_ollama_setup(&client).await {
        Ok(ExitCode::SUCCESS)
    } else {
        Ok(ExitCode::FAILURE)
    }
}
