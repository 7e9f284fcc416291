//! Claim Wizard - Console Binary
//!
//! Opens a claim intake session against the claims back office and drives it
//! from standard input, one command per line.
//!
//! # Usage
//!
//! ```bash
//! # Run with default configuration
//! cargo run --bin claim-wizard
//!
//! # Run against a remote back office
//! CLAIM_WIZARD_GATEWAY_URL=https://claims.example.com/api/v1 cargo run --bin claim-wizard
//! ```
//!
//! # Environment Variables
//!
//! * `CLAIM_WIZARD_GATEWAY_URL` - Back office base URL (default: http://localhost:8080/api/v1)
//! * `CLAIM_WIZARD_API_TOKEN` - Bearer token sent with every request
//! * `CLAIM_WIZARD_TIMEOUT_SECS` - Request timeout in seconds (default: 30)
//! * `CLAIM_WIZARD_LOG_LEVEL` - Log level: trace, debug, info, warn, error (default: info)
//! * `CLAIM_WIZARD_LOG_FORMAT` - `pretty` or `json` (default: pretty)
//! * `CLAIM_WIZARD_OPERATOR` - Operator name attached to remote calls

use std::sync::Arc;

use anyhow::Context;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use domain_claims::{ClaimWizard, HttpClaimGateway};
use interface_cli::{
    execute, parse, render_state, spawn_step_logger, CliConfig, ConsoleNotificationSink,
    LogFormat, Reply,
};

/// Main entry point for the console.
///
/// # Errors
///
/// Returns an error if:
/// - Configuration cannot be loaded or is invalid
/// - The HTTP client cannot be built
/// - Standard input cannot be read
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file if present (useful for local development)
    dotenvy::dotenv().ok();

    let config = CliConfig::from_env().context("failed to load configuration")?;
    config.validate()?;

    init_tracing(&config.log_level, config.log_format);

    let gateway = HttpClaimGateway::new(config.gateway_config())?;
    let mut wizard = ClaimWizard::new(Arc::new(gateway), Arc::new(ConsoleNotificationSink));
    if let Some(operator) = &config.operator {
        wizard = wizard.with_operator(operator.clone());
    }

    tracing::info!(
        session_id = %wizard.session_id(),
        gateway_url = %config.gateway_url,
        "Claim wizard session started"
    );

    let step_logger = spawn_step_logger(wizard.subscribe());

    println!("{}", render_state(&wizard.snapshot()));
    println!("Type `help` for the list of commands.");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await.context("failed to read input")? {
        if line.trim().is_empty() {
            continue;
        }
        let reply = match parse(&line) {
            Ok(command) => execute(&wizard, command).await,
            Err(error) => Err(error),
        };
        match reply {
            Ok(Reply::Text(text)) => println!("{text}"),
            Ok(Reply::Silent) => {}
            Ok(Reply::Quit) => break,
            Err(error) => eprintln!("{error}"),
        }
    }

    tracing::info!(session_id = %wizard.session_id(), "Claim wizard session closed");
    drop(wizard);
    step_logger.await?;
    Ok(())
}

/// Initializes the tracing subscriber for structured logging.
///
/// Logs go to standard error so they do not interleave with the prompt.
///
/// # Arguments
///
/// * `log_level` - The minimum log level to output (trace, debug, info, warn, error)
/// * `format` - Human-readable or JSON lines
fn init_tracing(log_level: &str, format: LogFormat) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(log_level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let registry = tracing_subscriber::registry().with(filter);
    match format {
        LogFormat::Pretty => registry
            .with(
                tracing_subscriber::fmt::layer()
                    .with_target(true)
                    .with_writer(std::io::stderr),
            )
            .init(),
        LogFormat::Json => registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_target(true)
                    .with_writer(std::io::stderr),
            )
            .init(),
    }
}
