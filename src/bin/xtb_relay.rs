//! Command-line session relay for the xStation streaming API.
//!
//! Logs in, prints the server's reply, then sends every line typed on stdin
//! to the socket and prints whatever comes back.
//!
//! # Usage
//!
//! ```sh
//! cargo run --bin xtb-relay --features cli -- user123 password123 wss://ws.xtb.com/demo
//!
//! # or from the environment
//! export XTB_USER_ID="user123"
//! export XTB_PASSWORD="password123"
//! export XTB_ENDPOINT="wss://ws.xtb.com/demo"
//! cargo run --bin xtb-relay --features cli
//! ```

use std::process::ExitCode;

use clap::Parser;
use url::Url;
use xtb_relay::input::BlockingLines;
use xtb_relay::ws::relay::SessionRelayBuilder;

#[derive(Parser)]
#[command(
    name = "xtb-relay",
    about = "Log in to the xStation streaming API and relay stdin lines to the socket"
)]
struct Cli {
    /// Account identifier
    #[arg(env = "XTB_USER_ID")]
    user_id: String,
    /// Account password
    #[arg(env = "XTB_PASSWORD", hide_env_values = true)]
    password: String,
    /// WebSocket endpoint (ws:// or wss://)
    #[arg(env = "XTB_ENDPOINT")]
    endpoint: String,
    /// Hold input until the login reply arrives
    #[arg(long)]
    await_login: bool,
    /// Close the session when stdin ends
    #[arg(long)]
    close_on_eof: bool,
    /// Exit on an inbound payload that is not valid JSON
    #[arg(long)]
    strict_json: bool,
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "Session failed");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> xtb_relay::Result<()> {
    let endpoint = Url::parse(&cli.endpoint)?;

    let relay = SessionRelayBuilder::new(cli.user_id, cli.password, endpoint.as_str())
        .await_login_reply(cli.await_login)
        .close_on_eof(cli.close_on_eof)
        .strict_json(cli.strict_json)
        .build();

    // Stdin is read on its own thread so a pending read cannot keep the
    // runtime alive once the session is over.
    let input = BlockingLines::stdin();

    tokio::select! {
        summary = relay.run_lines(input, tokio::io::stdout()) => {
            let summary = summary?;
            tracing::info!(
                forwarded = summary.forwarded,
                replies = summary.replies,
                "Disconnected"
            );
        }
        _ = tokio::signal::ctrl_c() => {
            tracing::info!("Interrupted, exiting");
        }
    }

    Ok(())
}
