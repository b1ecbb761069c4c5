//! # PAWfect
//!
//! Command line front end for the PAWfect site widgets.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                   apps/pawfect (THE BINARY)                 │
//! │                                                             │
//! │  ┌─────────────┐    ┌──────────────┐    ┌───────────────┐   │
//! │  │    CLI      │───▶│ Site Runtime │───▶│   Transport   │   │
//! │  │   (clap)    │    │   (tokio)    │    │  (simulated)  │   │
//! │  └─────────────┘    └──────┬───────┘    └───────────────┘   │
//! │                            ▼                                │
//! │                    ┌───────────────┐                        │
//! │                    │ pawfect-core  │                        │
//! │                    │ (THE WIDGETS) │                        │
//! │                    └───────────────┘                        │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```bash
//! pawfect sample -o contact.json
//! pawfect check -f contact.json
//! pawfect submit -f contact.json --latency-ms 500
//! pawfect inspect -f contact.json --path /CONTACT_US.html
//! ```

use clap::Parser;
use pawfect::cli;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

// =============================================================================
// APPLICATION ENTRY POINT
// =============================================================================

#[tokio::main]
async fn main() {
    // PAWFECT_LOG_FORMAT=json enables machine-parseable output.
    let log_format = std::env::var("PAWFECT_LOG_FORMAT").unwrap_or_else(|_| "text".to_string());

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "pawfect=info".into());

    match log_format.as_str() {
        "json" => {
            tracing_subscriber::registry()
                .with(filter)
                .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
                .init();
        }
        _ => {
            tracing_subscriber::registry()
                .with(filter)
                .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
                .init();
        }
    }

    let cli = cli::Cli::parse();

    if !cli.quiet && !cli.json_mode {
        print_banner();
    }

    if let Err(e) = cli::execute(cli).await {
        tracing::error!("Error: {}", e);
        std::process::exit(1);
    }
}

/// Print the PAWfect startup banner.
fn print_banner() {
    println!(
        r#"
  ╔═╗╔═╗╦ ╦┌─┐┌─┐┌─┐┌┬┐
  ╠═╝╠═╣║║║├┤ ├┤ │   │
  ╩  ╩ ╩╚╩╝└  └─┘└─┘ ┴

  PAWfect Animals site widgets v{}
"#,
        env!("CARGO_PKG_VERSION")
    );
}
