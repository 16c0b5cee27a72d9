//! Completion side of an operation gateway.
//!
//! A gateway awaits exactly one API call and then writes exactly one
//! `RequestState` into its own container. Failures are converted into
//! [`RequestError`] and shown to the [`AuthExpiryGuard`] before the write.

use staybook_client::ApiError;
use staybook_core::{RequestContainer, RequestError, StateBuilder};

use crate::auth::AuthExpiryGuard;

/// Write `result` into `container` as `OK(value)` or `ERROR(error)`.
pub(crate) fn settle<T: Clone + 'static>(
    operation: &'static str,
    container: &RequestContainer<T>,
    guard: &AuthExpiryGuard,
    result: Result<T, ApiError>,
) {
    match result {
        Ok(value) => {
            tracing::debug!(operation, "gateway completed");
            container.write(StateBuilder::new().for_success(value));
        }
        Err(err) => {
            let err = failure(operation, guard, err);
            container.write(StateBuilder::new().for_error(err));
        }
    }
}

/// Like [`settle`], but an error keeps `retained` as its value so the view
/// can tell which item the failed call was about.
pub(crate) fn settle_retaining<T: Clone + 'static>(
    operation: &'static str,
    container: &RequestContainer<T>,
    guard: &AuthExpiryGuard,
    result: Result<T, ApiError>,
    retained: T,
) {
    match result {
        Ok(value) => {
            tracing::debug!(operation, "gateway completed");
            container.write(StateBuilder::new().for_success(value));
        }
        Err(err) => {
            let err = failure(operation, guard, err);
            container.write(StateBuilder::new().for_error_with_value(err, retained));
        }
    }
}

fn failure(operation: &'static str, guard: &AuthExpiryGuard, err: ApiError) -> RequestError {
    let err = RequestError::from(err);
    tracing::warn!(operation, status = ?err.status, error = %err, "gateway failed");
    guard.inspect(&err);
    err
}
