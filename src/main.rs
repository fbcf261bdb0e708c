//! Minbar content server
//!
//! Main application entry point. An optional first argument names the
//! configuration file; otherwise `config.toml` in the working directory is
//! used when present.

use tracing::info;

use minbar::{config::Settings, server, services::Catalog, utils::logging};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();

    // Load configuration
    let settings = match std::env::args().nth(1) {
        Some(path) => Settings::from_file(path)?,
        None => Settings::new()?,
    };
    settings.validate()?;

    // Initialize logging
    let _log_guard = logging::init_logging(&settings.logging)?;

    info!("Starting {}...", minbar::info());

    info!("Loading catalogue from {}...", settings.data.directory);
    let catalog = Catalog::load(&settings.data.directory).await?;

    server::start_server(settings, catalog).await?;

    info!("Minbar has been shut down.");

    Ok(())
}
