//! # drudge
//!
//! Prints headlines from the Drudge Report front page, section by section.
//!
//! ## Usage
//!
//! ```sh
//! drudge --sec top,1,2,3
//! ```
//!
//! Sections are printed in the order given. The first section that fails
//! stops the run with a non-zero exit status; nothing after it is printed.

use clap::Parser;
use drudge::Client;
use drudge::outputs;
use std::error::Error;
use std::io;
use std::process::ExitCode;
use tracing::{debug, info};
use tracing_subscriber::{EnvFilter, fmt as tfmt};

mod cli;

use cli::Cli;

#[tokio::main]
async fn main() -> ExitCode {
    // stdout carries the headlines, so logs go to stderr and stay quiet
    // unless RUST_LOG asks for more.
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tfmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(io::stderr)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .init();

    let args = Cli::parse();
    debug!(?args, "Parsed CLI arguments");

    match run(&args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            debug!(error = ?e, "Run failed");
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

async fn run(args: &Cli) -> Result<(), Box<dyn Error>> {
    let start_time = std::time::Instant::now();
    let client = Client::new(args.client_config())?;

    for section in &args.sections {
        let articles = client
            .section(section)
            .await
            .map_err(|e| format!("failed to fetch section {:?}: {e}", section.key()))?;

        outputs::write_section(
            &mut io::stdout().lock(),
            args.format,
            section,
            &articles,
            args.images,
        )
        .map_err(|e| format!("failed to print section {:?}: {e}", section.key()))?;
    }

    info!(
        sections = args.sections.len(),
        elapsed_ms = start_time.elapsed().as_millis() as u64,
        "Execution complete"
    );
    Ok(())
}
