//! E-Recycle Scanner CLI
//!
//! Resolves one barcode and prints the scan result as JSON.
//!
//! Usage:
//!   erecycle_scanner [--offline] <barcode>
//!
//! Environment: same as the API server (OFF_BASE_URL, OFF_TIMEOUT_SECS,
//! OFF_ENABLED, RUST_LOG). Logs go to stderr, JSON to stdout.

use erecycle_scanner::{BarcodeResolver, ScannerConfig};

use eyre::{eyre, Result};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

const USAGE: &str = "Usage: erecycle_scanner [--offline] <barcode>";

#[derive(Debug, PartialEq)]
enum Command {
    Help,
    Scan { barcode: String, offline: bool },
}

/// Parse arguments (program name already skipped)
fn parse_args<I>(args: I) -> Result<Command>
where
    I: IntoIterator<Item = String>,
{
    let mut offline = false;
    let mut barcode = None;
    for arg in args {
        match arg.as_str() {
            "--offline" => offline = true,
            "-h" | "--help" => return Ok(Command::Help),
            _ if barcode.is_none() => barcode = Some(arg),
            _ => return Err(eyre!("Unexpected argument: {}\n{}", arg, USAGE)),
        }
    }
    let barcode = barcode.ok_or_else(|| eyre!("Missing barcode\n{}", USAGE))?;
    Ok(Command::Scan { barcode, offline })
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    FmtSubscriber::builder()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();

    let (barcode, offline) = match parse_args(std::env::args().skip(1))? {
        Command::Help => {
            println!("{}", USAGE);
            return Ok(());
        }
        Command::Scan { barcode, offline } => (barcode, offline),
    };

    let mut config = ScannerConfig::from_env()?;
    if offline {
        config.external_lookup_enabled = false;
    }

    let resolver = BarcodeResolver::from_config(&config)?;

    match resolver.resolve(&barcode).await {
        Ok(result) => {
            println!("{}", serde_json::to_string_pretty(&result)?);
            Ok(())
        }
        Err(e) => {
            eprintln!("Error ({}): {}", e.http_status(), e.message);
            std::process::exit(1);
        }
    }
}
