//! # Account Subcommand
//!
//! Session inspection: who is signed in, what they may open, and logout.

use anyhow::Result;
use clap::{Args, Subcommand};
use staybook_state::App;

use crate::console::exit_code;

/// Arguments for the `staybook account` subcommand.
#[derive(Args, Debug)]
pub struct AccountArgs {
    #[command(subcommand)]
    pub command: AccountCommand,
}

#[derive(Subcommand, Debug)]
pub enum AccountCommand {
    /// Show the signed-in user.
    Whoami {
        /// Ask the backend to resync the user from the identity provider.
        #[arg(long)]
        resync: bool,
    },

    /// Start a login.
    Login,

    /// End the session.
    Logout,

    /// Check whether the session may open a screen restricted to any of
    /// the given authorities. No authority means "any signed-in user".
    Access {
        #[arg(long = "authority")]
        authorities: Vec<String>,
    },
}

/// Execute the account subcommand.
pub async fn run_account(args: &AccountArgs, app: &App) -> Result<u8> {
    match &args.command {
        AccountCommand::Whoami { resync } => cmd_whoami(app, *resync).await,
        AccountCommand::Login => {
            app.auth.login();
            Ok(0)
        }
        AccountCommand::Logout => {
            app.auth.fetch(false).await;
            if !app.auth.is_authenticated() {
                println!("Not signed in.");
                return Ok(0);
            }
            app.auth.logout().await;
            Ok(if app.auth.is_authenticated() { 1 } else { 0 })
        }
        AccountCommand::Access { authorities } => {
            let granted = app.auth.authority_route_access(authorities.as_slice()).await;
            println!("{}", if granted { "granted" } else { "denied" });
            Ok(if granted { 0 } else { 1 })
        }
    }
}

async fn cmd_whoami(app: &App, resync: bool) -> Result<u8> {
    app.auth.fetch(resync).await;
    let state = app.auth.fetch_user().read();
    match state.value() {
        Some(user) if user.is_connected() => {
            let name = [user.first_name.as_deref(), user.last_name.as_deref()]
                .into_iter()
                .flatten()
                .collect::<Vec<_>>()
                .join(" ");
            println!("{name} <{}>", user.email.as_deref().unwrap_or_default());
            if !user.authorities.is_empty() {
                println!("Authorities: {}", user.authorities.join(", "));
            }
        }
        Some(_) => println!("Not signed in."),
        None => {}
    }
    Ok(exit_code(&state))
}
