#![warn(clippy::all, rust_2018_idioms)]

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::prelude::*;

use scar_logs::app::cli::{self, Cli};

/// Used when RUST_LOG is not set
const DEFAULT_LOG_FILTER: &str = "scar_logs=info,aws_config=warn,aws_sigv4=warn,aws_smithy_runtime=warn,aws_smithy_runtime_api=warn,aws_smithy_http=warn,hyper=warn";

fn init_logging() -> Result<()> {
    let directives =
        std::env::var("RUST_LOG").unwrap_or_else(|_| DEFAULT_LOG_FILTER.to_string());
    let filter = tracing_subscriber::EnvFilter::builder()
        .parse(&directives)
        .with_context(|| format!("Failed to parse log filter '{}'", directives))?;

    // Logs go to stderr so command output on stdout stays machine readable
    let subscriber = tracing_subscriber::registry().with(filter).with(
        tracing_subscriber::fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(false),
    );

    tracing::subscriber::set_global_default(subscriber)
        .context("Failed to set tracing subscriber")?;

    // Bridge log crate events from dependencies to tracing
    tracing_log::LogTracer::init().context("Failed to initialize log-to-tracing bridge")?;

    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Cli::parse();
    init_logging()?;

    tracing::debug!("scar-logs starting: {:?}", args);
    cli::run(args).await
}
