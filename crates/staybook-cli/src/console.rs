//! # Terminal Surface
//!
//! The CLI plays the part of the browser shell: navigation requests and
//! toasts are printed instead of rendered, and a command waits for the
//! container it triggered to leave INIT before reporting.

use std::cell::RefCell;

use staybook_client::booking::BookedListing;
use staybook_client::listing::{CardListing, Listing};
use staybook_core::{RequestState, StateReader, Subscription};
use staybook_state::{Navigator, Notification, Severity, ToastService};
use tokio::sync::oneshot;

/// Navigator that reports where the app asked to go.
#[derive(Debug, Default)]
pub struct ConsoleNavigator;

impl Navigator for ConsoleNavigator {
    fn navigate(&self, path: &str, query: &[(String, String)]) {
        tracing::debug!(path, "navigate");
        if query.is_empty() {
            eprintln!("-> {path}");
        } else {
            let query: Vec<String> = query.iter().map(|(k, v)| format!("{k}={v}")).collect();
            eprintln!("-> {path}?{}", query.join("&"));
        }
    }

    fn redirect_external(&self, url: &str) {
        eprintln!("Open in a browser to continue: {url}");
    }
}

/// Print every toast to stderr until the returned subscription drops.
pub fn print_toasts(toast: &ToastService) -> Subscription {
    toast.subscribe(|n| eprintln!("{}", toast_line(n)))
}

/// One-line rendering of a toast.
pub fn toast_line(notification: &Notification) -> String {
    let label = match notification.severity {
        Severity::Success => "ok",
        Severity::Info => "info",
        Severity::Warn => "warn",
        Severity::Error => "error",
    };
    let text: Vec<&str> = [notification.summary.as_deref(), notification.detail.as_deref()]
        .into_iter()
        .flatten()
        .collect();
    format!("[{label}] {}", text.join(": "))
}

/// Wait for the next write that leaves INIT and return it.
///
/// Subscribes for changes only, so the call that produces the write must
/// be issued before this future is first polled but not yet completed.
pub async fn settled<T: Clone + 'static>(reader: &StateReader<RequestState<T>>) -> RequestState<T> {
    let (tx, rx) = oneshot::channel();
    let tx = RefCell::new(Some(tx));
    let _subscription = reader.subscribe_changes(move |state: &RequestState<T>| {
        if !state.is_init() {
            if let Some(tx) = tx.borrow_mut().take() {
                let _ = tx.send(state.clone());
            }
        }
    });
    match rx.await {
        Ok(state) => state,
        Err(_) => reader.read(),
    }
}

/// Exit code for a finished request.
pub fn exit_code<T>(state: &RequestState<T>) -> u8 {
    if state.is_ok() {
        0
    } else {
        1
    }
}

pub fn card_line(card: &CardListing) -> String {
    format!(
        "{}  {:<16} {:>6}/night  {}",
        card.public_id,
        card.booking_category.as_str(),
        card.price.value,
        card.location
    )
}

pub fn booked_line(booked: &BookedListing) -> String {
    format!(
        "{}  {} -> {}  total {:>6}  {}  (listing {})",
        booked.booking_public_id,
        booked.dates.start_date.date_naive(),
        booked.dates.end_date.date_naive(),
        booked.total_price.value,
        booked.location,
        booked.listing_public_id,
    )
}

pub fn listing_block(listing: &Listing) -> String {
    let infos = &listing.infos;
    let mut out = format!(
        "{}\n{}\n\n{} guests, {} bedrooms, {} beds, {} baths\n{}/night in {} ({})\nHosted by {}\n",
        listing.description.title.value,
        listing.description.description.value,
        infos.guests.value,
        infos.bedrooms.value,
        infos.beds.value,
        infos.baths.value,
        listing.price.value,
        listing.location,
        listing.category,
        listing.landlord.firstname,
    );
    for picture in &listing.pictures {
        let cover = if picture.is_cover { " (cover)" } else { "" };
        out.push_str(&format!("  picture {}{cover}\n", picture.file_content_type));
    }
    out
}
