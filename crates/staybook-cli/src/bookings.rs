//! # Bookings Subcommand
//!
//! A tenant's trips and a landlord's reservations, with cancellation.

use anyhow::{bail, Result};
use clap::{Args, Subcommand};
use staybook_state::views::{Audience, BookingsView};
use staybook_state::App;
use uuid::Uuid;

use crate::console::{booked_line, exit_code};

/// Authority a landlord session carries.
pub const LANDLORD_AUTHORITY: &str = "ROLE_LANDLORD";

/// Arguments for the `staybook bookings` subcommand.
#[derive(Args, Debug)]
pub struct BookingsArgs {
    #[command(subcommand)]
    pub command: BookingsCommand,
}

#[derive(Subcommand, Debug)]
pub enum BookingsCommand {
    /// List the signed-in tenant's bookings.
    Trips,

    /// List bookings made on the signed-in landlord's listings.
    Reservations,

    /// Cancel one booking.
    Cancel {
        /// Booking public id.
        id: Uuid,
        /// Cancel as the listing's landlord instead of its tenant.
        #[arg(long)]
        as_landlord: bool,
    },
}

/// Execute the bookings subcommand.
pub async fn run_bookings(args: &BookingsArgs, app: &App) -> Result<u8> {
    match &args.command {
        BookingsCommand::Trips => cmd_list(app, Audience::Tenant).await,
        BookingsCommand::Reservations => cmd_list(app, Audience::Landlord).await,
        BookingsCommand::Cancel { id, as_landlord } => {
            let audience = if *as_landlord {
                Audience::Landlord
            } else {
                Audience::Tenant
            };
            cmd_cancel(app, audience, *id).await
        }
    }
}

fn required_authorities(audience: Audience) -> &'static [&'static str] {
    match audience {
        Audience::Tenant => &[],
        Audience::Landlord => &[LANDLORD_AUTHORITY],
    }
}

async fn open(app: &App, audience: Audience) -> Result<Option<BookingsView>> {
    if !app.auth.authority_route_access(required_authorities(audience)).await {
        return Ok(None);
    }
    let view = BookingsView::new(app, audience);
    view.fetch().await?;
    Ok(Some(view))
}

fn fetch_state_code(app: &App, audience: Audience) -> u8 {
    match audience {
        Audience::Tenant => exit_code(&app.booking.booked_listing_state().read()),
        Audience::Landlord => exit_code(&app.booking.booked_listing_for_landlord_state().read()),
    }
}

async fn cmd_list(app: &App, audience: Audience) -> Result<u8> {
    let Some(view) = open(app, audience).await? else {
        return Ok(1);
    };
    let listings = view.state().listings;
    if listings.is_empty() {
        println!("Nothing booked.");
    }
    for booked in &listings {
        println!("{}", booked_line(booked));
    }
    Ok(fetch_state_code(app, audience))
}

async fn cmd_cancel(app: &App, audience: Audience, booking_public_id: Uuid) -> Result<u8> {
    let Some(view) = open(app, audience).await? else {
        return Ok(1);
    };
    let code = fetch_state_code(app, audience);
    if code != 0 {
        return Ok(code);
    }
    let Some(handle) = view.cancel(booking_public_id) else {
        bail!("booking {booking_public_id} is not in the list");
    };
    handle.await?;
    Ok(exit_code(&app.booking.cancel_state().read()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_reservations_need_the_landlord_authority() {
        assert!(required_authorities(Audience::Tenant).is_empty());
        assert_eq!(required_authorities(Audience::Landlord), &[LANDLORD_AUTHORITY]);
    }
}
