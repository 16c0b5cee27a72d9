//! # Request State
//!
//! The immutable tri-state value describing the outcome of one asynchronous
//! server interaction.
//!
//! ## States
//!
//! INIT → OK | ERROR, and back to INIT on reset.
//!
//! ## Invariants
//!
//! - `OK` always carries a value and never an error.
//! - `ERROR` always carries an error; a value may be retained alongside it
//!   (e.g. the id of the item whose deletion failed).
//! - `INIT` carries neither. A reset never leaves a stale value behind.
//!
//! Fields are private; the only constructors are on [`StateBuilder`], so the
//! invariants hold for every instance in the program.

use std::fmt;
use std::marker::PhantomData;

use crate::error::RequestError;

/// Outcome status of a request container.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Status {
    /// No request has completed since construction or the last reset.
    Init,
    /// The last request completed successfully.
    Ok,
    /// The last request failed.
    Error,
}

impl Status {
    /// Whether this status ends a request (OK or ERROR).
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Ok | Self::Error)
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Init => "INIT",
            Self::Ok => "OK",
            Self::Error => "ERROR",
        };
        f.write_str(s)
    }
}

/// Immutable outcome of a server interaction.
#[derive(Debug, Clone, PartialEq)]
pub struct RequestState<T, E = RequestError> {
    status: Status,
    value: Option<T>,
    error: Option<E>,
}

impl<T, E> RequestState<T, E> {
    /// Start building a state. Mirrors the fluent style used at call sites:
    /// `RequestState::builder().for_success(v)`.
    pub fn builder() -> StateBuilder<T, E> {
        StateBuilder::new()
    }

    pub fn status(&self) -> Status {
        self.status
    }

    pub fn value(&self) -> Option<&T> {
        self.value.as_ref()
    }

    pub fn error(&self) -> Option<&E> {
        self.error.as_ref()
    }

    pub fn is_init(&self) -> bool {
        self.status == Status::Init
    }

    pub fn is_ok(&self) -> bool {
        self.status == Status::Ok
    }

    pub fn is_error(&self) -> bool {
        self.status == Status::Error
    }

    /// Consume the state, returning the value it carried, if any.
    pub fn into_value(self) -> Option<T> {
        self.value
    }
}

impl<T, E> Default for RequestState<T, E> {
    fn default() -> Self {
        StateBuilder::new().for_init()
    }
}

/// Fluent constructor for [`RequestState`].
///
/// Stateless: each method consumes the builder and produces a complete
/// state, so no partially configured state can escape.
pub struct StateBuilder<T, E = RequestError> {
    _marker: PhantomData<fn() -> (T, E)>,
}

impl<T, E> StateBuilder<T, E> {
    pub fn new() -> Self {
        Self {
            _marker: PhantomData,
        }
    }

    /// `OK` carrying `value`.
    pub fn for_success(self, value: T) -> RequestState<T, E> {
        RequestState {
            status: Status::Ok,
            value: Some(value),
            error: None,
        }
    }

    /// `ERROR` carrying `error` and no value.
    pub fn for_error(self, error: E) -> RequestState<T, E> {
        RequestState {
            status: Status::Error,
            value: None,
            error: Some(error),
        }
    }

    /// `ERROR` carrying `error` and a value retained for partial-failure
    /// display.
    pub fn for_error_with_value(self, error: E, value: T) -> RequestState<T, E> {
        RequestState {
            status: Status::Error,
            value: Some(value),
            error: Some(error),
        }
    }

    /// `INIT`. Always empty.
    pub fn for_init(self) -> RequestState<T, E> {
        RequestState {
            status: Status::Init,
            value: None,
            error: None,
        }
    }
}

impl<T, E: Default> StateBuilder<T, E> {
    /// `ERROR` carrying the generic unknown error.
    pub fn for_unknown_error(self) -> RequestState<T, E> {
        self.for_error(E::default())
    }
}

impl<T, E> Default for StateBuilder<T, E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T, E> fmt::Debug for StateBuilder<T, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("StateBuilder")
    }
}
