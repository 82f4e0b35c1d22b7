//! Trekroute CLI
//!
//! Calls a running proxy and prints the result as JSON.

#![allow(clippy::print_stdout)]

use clap::Parser;
use domain::TravelMode;
use presentation_cli::{Cli, Commands, RoutingApiClient, plan_request};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Determine log filter level from verbosity count
const fn log_filter_from_verbosity(verbose: u8) -> &'static str {
    match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Logs go to stderr so stdout stays machine-readable
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(log_filter_from_verbosity(
            cli.verbose,
        )))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let client = RoutingApiClient::new(&cli.url);

    let (output, ok) = match cli.command {
        Commands::Plan {
            from,
            to,
            mode,
            date,
            time,
            arrive_by,
        } => {
            let request = plan_request(from, to, mode, date, time, arrive_by);
            let result = client.plan_route(&request).await;
            (serde_json::to_value(&result)?, result.success)
        },

        Commands::Time { from, to, mode } => {
            let result = client
                .estimate_time(from, to, mode.map(TravelMode::from))
                .await;
            (serde_json::to_value(&result)?, result.success)
        },

        Commands::Health => {
            let connected = client.check_health().await;
            (serde_json::json!({ "otpConnected": connected }), connected)
        },
    };

    println!("{}", serde_json::to_string_pretty(&output)?);

    if !ok {
        std::process::exit(1);
    }

    Ok(())
}
