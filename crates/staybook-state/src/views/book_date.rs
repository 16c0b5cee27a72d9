//! Date picker and booking button of a listing page.

use std::cell::RefCell;
use std::rc::Rc;

use chrono::{NaiveDate, NaiveTime};
use staybook_client::booking::{BookedDates, CreateBooking};
use staybook_client::listing::Listing;
use staybook_core::{Bindings, Status};
use tokio::task::JoinHandle;
use uuid::Uuid;

use crate::app::App;
use crate::runtime::spawn;
use crate::toast::Notification;

/// Local state of the booking widget.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BookDateState {
    /// Selected check-in and check-out days.
    pub booking_dates: Vec<NaiveDate>,
    pub total_price: u64,
    /// Days that cannot be picked.
    pub booked_dates: Vec<NaiveDate>,
    pub loading_booking: bool,
}

pub struct BookDateView {
    app: App,
    listing_public_id: Uuid,
    nightly_price: u32,
    state: Rc<RefCell<BookDateState>>,
    bindings: Bindings,
    closed: bool,
}

impl BookDateView {
    pub fn new(app: &App, listing: &Listing, listing_public_id: Uuid) -> Self {
        let state = Rc::new(RefCell::new(BookDateState::default()));
        let mut bindings = Bindings::new();

        let view_state = Rc::clone(&state);
        let toast = Rc::clone(&app.toast);
        bindings.bind(&app.booking.check_availability_state(), move |availability| {
            match availability.status() {
                Status::Ok => {
                    let ranges = availability.value().map(Vec::as_slice).unwrap_or_default();
                    view_state.borrow_mut().booked_dates = expand_booked_dates(ranges);
                }
                Status::Error => toast.send(
                    Notification::error()
                        .summary("Error")
                        .detail("Error when fetching the not available dates"),
                ),
                Status::Init => {}
            }
        });

        let view_state = Rc::clone(&state);
        let toast = Rc::clone(&app.toast);
        let navigator = Rc::clone(&app.navigator);
        bindings.bind(&app.booking.create_booking_state(), move |created| {
            match created.status() {
                Status::Ok => {
                    view_state.borrow_mut().loading_booking = false;
                    toast.send(Notification::success().detail("Booking created successfully"));
                    navigator.navigate("/booking", &[]);
                }
                Status::Error => {
                    view_state.borrow_mut().loading_booking = false;
                    toast.send(Notification::error().detail("Booking created failed"));
                }
                Status::Init => {}
            }
        });

        Self {
            app: app.clone(),
            listing_public_id,
            nightly_price: listing.price.value,
            state,
            bindings,
            closed: false,
        }
    }

    /// Load the days already booked.
    pub fn init(&self) -> JoinHandle<()> {
        let booking = Rc::clone(&self.app.booking);
        let id = self.listing_public_id;
        spawn(async move { booking.check_availability(id).await })
    }

    pub fn on_date_change(&self, dates: Vec<NaiveDate>) {
        let total = if self.is_valid_selection(&dates) {
            nights(dates[0], dates[1]) * u64::from(self.nightly_price)
        } else {
            0
        };
        let mut state = self.state.borrow_mut();
        state.booking_dates = dates;
        state.total_price = total;
    }

    /// Two distinct days are selected and a user is signed in.
    pub fn is_booking_valid(&self) -> bool {
        self.is_valid_selection(&self.state.borrow().booking_dates)
    }

    fn is_valid_selection(&self, dates: &[NaiveDate]) -> bool {
        dates.len() == 2 && dates[0] != dates[1] && self.app.auth.is_authenticated()
    }

    /// Book the selected days. Returns `None` and sends nothing unless
    /// [`is_booking_valid`](Self::is_booking_valid) holds.
    pub fn book(&self) -> Option<JoinHandle<()>> {
        let booking = {
            let mut state = self.state.borrow_mut();
            if !self.is_valid_selection(&state.booking_dates) {
                tracing::debug!(listing = %self.listing_public_id, "booking refused: invalid selection or anonymous user");
                return None;
            }
            let (start, end) = (state.booking_dates[0], state.booking_dates[1]);
            state.loading_booking = true;
            CreateBooking {
                start_date: start.and_time(NaiveTime::MIN).and_utc(),
                end_date: end.and_time(NaiveTime::MIN).and_utc(),
                listing_public_id: self.listing_public_id,
            }
        };
        let service = Rc::clone(&self.app.booking);
        Some(spawn(async move { service.create(booking).await }))
    }

    pub fn state(&self) -> BookDateState {
        self.state.borrow().clone()
    }

    /// Drop the bindings and return the create-booking container to INIT.
    pub fn teardown(&mut self) {
        if self.closed {
            return;
        }
        self.closed = true;
        self.bindings.teardown();
        self.app.booking.reset_create_booking();
    }
}

impl Drop for BookDateView {
    fn drop(&mut self) {
        self.teardown();
    }
}

/// Every day covered by `ranges`, in range order.
pub fn expand_booked_dates(ranges: &[BookedDates]) -> Vec<NaiveDate> {
    ranges.iter().flat_map(BookedDates::days).collect()
}

/// Nights between check-in and check-out; zero when inverted.
pub fn nights(start: NaiveDate, end: NaiveDate) -> u64 {
    u64::try_from((end - start).num_days()).unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    #[test]
    fn expand_concatenates_ranges() {
        let ranges = [
            BookedDates {
                start_date: Utc.with_ymd_and_hms(2026, 1, 30, 0, 0, 0).unwrap(),
                end_date: Utc.with_ymd_and_hms(2026, 2, 1, 0, 0, 0).unwrap(),
            },
            BookedDates {
                start_date: Utc.with_ymd_and_hms(2026, 3, 5, 0, 0, 0).unwrap(),
                end_date: Utc.with_ymd_and_hms(2026, 3, 5, 0, 0, 0).unwrap(),
            },
        ];
        let days = expand_booked_dates(&ranges);
        assert_eq!(days.len(), 4);
        assert_eq!(days[3], NaiveDate::from_ymd_opt(2026, 3, 5).unwrap());
    }

    #[test]
    fn nights_never_negative() {
        let a = NaiveDate::from_ymd_opt(2026, 4, 1).unwrap();
        let b = NaiveDate::from_ymd_opt(2026, 4, 4).unwrap();
        assert_eq!(nights(a, b), 3);
        assert_eq!(nights(b, a), 0);
    }

    mod proptests {
        use super::*;
        use chrono::Duration;
        use proptest::prelude::*;

        fn base() -> NaiveDate {
            NaiveDate::from_ymd_opt(2026, 1, 1).unwrap()
        }

        proptest! {
            #[test]
            fn expansion_has_one_day_per_covered_date(
                spans in prop::collection::vec((0i64..400, 0i64..30), 0..6),
            ) {
                let ranges: Vec<BookedDates> = spans
                    .iter()
                    .map(|&(offset, len)| {
                        let start = base() + Duration::days(offset);
                        BookedDates {
                            start_date: start.and_time(NaiveTime::MIN).and_utc(),
                            end_date: (start + Duration::days(len)).and_time(NaiveTime::MIN).and_utc(),
                        }
                    })
                    .collect();
                let expected: i64 = spans.iter().map(|&(_, len)| len + 1).sum();
                prop_assert_eq!(expand_booked_dates(&ranges).len() as i64, expected);
            }

            #[test]
            fn nights_match_day_distance(a in 0i64..1000, b in 0i64..1000) {
                let start = base() + Duration::days(a);
                let end = base() + Duration::days(b);
                prop_assert_eq!(nights(start, end), (b - a).max(0) as u64);
            }
        }
    }
}
