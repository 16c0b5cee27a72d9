//! # Listings Subcommand
//!
//! Tenant-side browsing: the category grid, a listing page, its booked
//! days, search, and booking a stay.

use anyhow::{bail, Result};
use chrono::NaiveDate;
use clap::{Args, Subcommand};
use staybook_client::booking::BookedDates;
use staybook_client::category::CategoryName;
use staybook_client::listing::{CountVo, ListingInfo, Search};
use staybook_state::views::{BookDateView, DisplayListingView, HomeView};
use staybook_state::App;
use uuid::Uuid;

use crate::console::{card_line, exit_code, listing_block, settled};

/// Arguments for the `staybook listings` subcommand.
#[derive(Args, Debug)]
pub struct ListingsArgs {
    #[command(subcommand)]
    pub command: ListingsCommand,
}

#[derive(Subcommand, Debug)]
pub enum ListingsCommand {
    /// List the first page of a category.
    Browse {
        /// Technical category name, e.g. BEACH or TINY_HOMES.
        #[arg(long, default_value = "ALL", value_parser = parse_category)]
        category: CategoryName,
    },

    /// Show one listing.
    Show {
        /// Listing public id.
        id: Uuid,
    },

    /// List the days a listing is already booked.
    Availability {
        /// Listing public id.
        id: Uuid,
    },

    /// Search listings by place, dates and capacity.
    Search {
        #[arg(long)]
        location: String,
        /// Check-in day (YYYY-MM-DD).
        #[arg(long)]
        from: NaiveDate,
        /// Check-out day (YYYY-MM-DD).
        #[arg(long)]
        to: NaiveDate,
        #[arg(long, default_value_t = 1)]
        guests: u32,
        #[arg(long, default_value_t = 0)]
        bedrooms: u32,
        #[arg(long, default_value_t = 0)]
        beds: u32,
        #[arg(long, default_value_t = 0)]
        baths: u32,
    },

    /// Book a listing for the given days. Requires a signed-in session.
    Book {
        /// Listing public id.
        id: Uuid,
        #[arg(long)]
        from: NaiveDate,
        #[arg(long)]
        to: NaiveDate,
    },
}

/// Execute the listings subcommand.
pub async fn run_listings(args: &ListingsArgs, app: &App) -> Result<u8> {
    match &args.command {
        ListingsCommand::Browse { category } => cmd_browse(app, *category).await,
        ListingsCommand::Show { id } => cmd_show(app, *id).await,
        ListingsCommand::Availability { id } => cmd_availability(app, *id).await,
        ListingsCommand::Search {
            location,
            from,
            to,
            guests,
            bedrooms,
            beds,
            baths,
        } => {
            let search = Search {
                dates: BookedDates {
                    start_date: from.and_time(chrono::NaiveTime::MIN).and_utc(),
                    end_date: to.and_time(chrono::NaiveTime::MIN).and_utc(),
                },
                infos: ListingInfo {
                    guests: CountVo { value: *guests },
                    bedrooms: CountVo { value: *bedrooms },
                    beds: CountVo { value: *beds },
                    baths: CountVo { value: *baths },
                },
                location: location.clone(),
            };
            cmd_search(app, search).await
        }
        ListingsCommand::Book { id, from, to } => cmd_book(app, *id, *from, *to).await,
    }
}

/// Clap value parser for [`CategoryName`].
pub fn parse_category(raw: &str) -> Result<CategoryName, String> {
    CategoryName::parse(&raw.to_ascii_uppercase()).ok_or_else(|| {
        let known: Vec<&str> = CategoryName::ALL.iter().map(CategoryName::as_str).collect();
        format!("unknown category {raw:?}, expected one of {}", known.join(", "))
    })
}

async fn cmd_browse(app: &App, name: CategoryName) -> Result<u8> {
    if let Some(category) = app.category.category_by_technical_name(name) {
        app.category.change_category(category);
    }
    let mut home = HomeView::new(app);
    home.init();
    let page = settled(&app.tenant.all_by_category_state()).await;

    let listings = home.state().listings.unwrap_or_default();
    if listings.is_empty() && page.is_ok() {
        println!("No listing in {name}.");
    }
    for card in &listings {
        println!("{}", card_line(card));
    }
    Ok(exit_code(&page))
}

async fn cmd_show(app: &App, public_id: Uuid) -> Result<u8> {
    let view = DisplayListingView::new(app);
    view.load(public_id).await?;

    let state = view.state();
    if let Some(listing) = &state.listing {
        print!("{}", listing_block(listing));
        if let Some(category) = state.category {
            println!("Category: {}", category.display_name);
        }
        Ok(0)
    } else {
        Ok(1)
    }
}

async fn cmd_availability(app: &App, public_id: Uuid) -> Result<u8> {
    let listing = fetch_listing(app, public_id).await?;
    let view = BookDateView::new(app, &listing, public_id);
    view.init().await?;

    let booked = view.state().booked_dates;
    if booked.is_empty() {
        println!("No booked day.");
    }
    for day in booked {
        println!("{day}");
    }
    Ok(exit_code(&app.booking.check_availability_state().read()))
}

async fn cmd_search(app: &App, search: Search) -> Result<u8> {
    let home = HomeView::new(app);
    home.search(search).await?;

    let state = home.state();
    if state.empty_search {
        println!("No listing matches the search.");
    }
    for card in state.listings.iter().flatten() {
        println!("{}", card_line(card));
    }
    Ok(exit_code(&app.tenant.search_state().read()))
}

async fn cmd_book(app: &App, public_id: Uuid, from: NaiveDate, to: NaiveDate) -> Result<u8> {
    app.auth.fetch(false).await;
    if !app.auth.is_authenticated() {
        app.auth.login();
        return Ok(1);
    }

    let listing = fetch_listing(app, public_id).await?;
    let view = BookDateView::new(app, &listing, public_id);
    view.init().await?;
    if let Some(taken) = view
        .state()
        .booked_dates
        .iter()
        .find(|day| (from..=to).contains(day))
    {
        bail!("{taken} is already booked");
    }

    view.on_date_change(vec![from, to]);
    let Some(handle) = view.book() else {
        bail!("check-out must differ from check-in");
    };
    println!("Total: {}", view.state().total_price);
    handle.await?;
    Ok(exit_code(&app.booking.create_booking_state().read()))
}

async fn fetch_listing(app: &App, public_id: Uuid) -> Result<staybook_client::listing::Listing> {
    app.tenant.get_one_by_public_id(public_id).await;
    let state = app.tenant.one_by_public_id_state().read();
    match (state.value(), state.error()) {
        (Some(listing), None) => Ok(listing.clone()),
        (_, Some(err)) => bail!("listing {public_id} unavailable: {err}"),
        (None, None) => bail!("listing {public_id} unavailable"),
    }
}
