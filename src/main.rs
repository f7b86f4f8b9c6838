use payroll::{
    launch,
    observability::{init_logging, log_config_info},
    Config, Result, APP_NAME, VERSION,
};
use tokio::signal;
use tracing::{error, info};

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if it exists (optional - won't fail if missing)
    // This must happen before any config is read from environment
    if let Err(e) = dotenvy::dotenv() {
        if !e.not_found() {
            eprintln!("Warning: Error loading .env file: {}", e);
        }
    }

    let config = Config::from_env()?;
    init_logging(&config.observability)?;

    info!(app_name = APP_NAME, version = VERSION, "Starting payroll service");
    log_config_info(&config);

    let app = launch(config).await?;
    info!(base_url = %app.base_url(), "Payroll service ready");

    if let Err(e) = signal::ctrl_c().await {
        error!(error = %e, "Failed to listen for shutdown signal");
    }
    info!("Shutdown signal received");

    app.shutdown().await?;

    info!("Payroll service shutdown completed");
    Ok(())
}
