//! Runs the context-load smoke test once against a fresh service instance on
//! an OS-assigned port. Exits non-zero when the test fails.

use clap::Parser;
use payroll::{observability::init_logging, run_context_load_smoke_test, Config};

#[derive(Parser, Debug)]
#[command(name = "payroll-smoke", version, about = "Payroll context-load smoke test")]
struct Cli {
    /// Address the service instance binds to
    #[arg(long, default_value = "127.0.0.1")]
    bind_address: String,

    /// Log level or filter directive (RUST_LOG takes precedence)
    #[arg(long, default_value = "warn")]
    log_level: String,

    /// Emit JSON log lines
    #[arg(long)]
    json_logs: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = Config::ephemeral();
    config.api.bind_address = cli.bind_address;
    config.observability.log_level = cli.log_level;
    config.observability.json_logging = cli.json_logs;

    init_logging(&config.observability)?;

    let report = run_context_load_smoke_test(config).await;
    eprintln!("payroll-smoke: {}", report);

    if !report.is_passed() {
        std::process::exit(1);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_cli_defaults() {
        let cli = Cli::parse_from(["payroll-smoke"]);
        assert_eq!(cli.bind_address, "127.0.0.1");
        assert_eq!(cli.log_level, "warn");
        assert!(!cli.json_logs);
    }
}
