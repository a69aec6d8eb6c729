//! Terminal client entry point.
mod app;
mod config;
mod input;
mod logging;
mod presentation;

use anyhow::Result;
use clap::Parser;

use app::ClientApp;
use config::ClientConfig;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if it exists (silently ignore if not found)
    let _ = dotenvy::dotenv();

    let config = ClientConfig::parse();

    // Guard flushes the file writer on drop
    let _guard = logging::setup_logging(&config.log_dir())?;

    ClientApp::new(config).run().await
}
