//! # staybook CLI entry point
//!
//! Parses command-line arguments, loads the API configuration from the
//! environment and dispatches to subcommand handlers on a local task set.

use std::process::ExitCode;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use staybook_cli::account::{run_account, AccountArgs};
use staybook_cli::bookings::{run_bookings, BookingsArgs};
use staybook_cli::console::print_toasts;
use staybook_cli::listings::{run_listings, ListingsArgs};
use staybook_cli::open_app;
use staybook_cli::properties::{run_properties, PropertiesArgs};
use staybook_client::ApiConfig;
use staybook_state::runtime::block_on_local;

/// Rental booking from the terminal.
///
/// Talks to the booking API at `STAYBOOK_API_URL`. Authenticated commands
/// forward `STAYBOOK_SESSION_COOKIE`.
#[derive(Parser, Debug)]
#[command(name = "staybook", version, about, long_about = None)]
struct Cli {
    /// Enable verbose output. Repeat for more verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Emit logs as JSON lines.
    #[arg(long, global = true)]
    json_logs: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Browse, search and book listings.
    Listings(ListingsArgs),

    /// Trips, reservations and cancellation.
    Bookings(BookingsArgs),

    /// Manage your listings as a landlord.
    Properties(PropertiesArgs),

    /// Session and user information.
    Account(AccountArgs),
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // RUST_LOG wins over -v.
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(match cli.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        })
    });
    if cli.json_logs {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .with_writer(std::io::stderr)
            .init();
    }

    match run(cli.command) {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            tracing::error!("{e:#}");
            eprintln!("error: {e:#}");
            ExitCode::from(1)
        }
    }
}

fn run(command: Commands) -> anyhow::Result<u8> {
    let config = ApiConfig::from_env().context("invalid API configuration")?;
    tracing::debug!(?config, "staybook CLI starting");

    let app = open_app(&config)?;

    block_on_local(async move {
        let _toasts = print_toasts(&app.toast);
        match &command {
            Commands::Listings(args) => run_listings(args, &app).await,
            Commands::Bookings(args) => run_bookings(args, &app).await,
            Commands::Properties(args) => run_properties(args, &app).await,
            Commands::Account(args) => run_account(args, &app).await,
        }
    })
    .context("failed to start the async runtime")?
}
