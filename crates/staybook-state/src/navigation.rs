//! Navigation sink.
//!
//! Views never route themselves; they ask a [`Navigator`] to move to an
//! in-app path or to leave the application for an external URL (identity
//! provider login and logout).

use std::cell::RefCell;
use std::fmt;

/// Where a navigation request pointed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavigationEvent {
    /// In-app route with its query parameters, in insertion order.
    Route {
        path: String,
        query: Vec<(String, String)>,
    },
    /// Full-page redirect outside the application.
    External(String),
}

impl fmt::Display for NavigationEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Route { path, query } if query.is_empty() => write!(f, "{path}"),
            Self::Route { path, query } => {
                write!(f, "{path}?")?;
                for (i, (k, v)) in query.iter().enumerate() {
                    if i > 0 {
                        f.write_str("&")?;
                    }
                    write!(f, "{k}={v}")?;
                }
                Ok(())
            }
            Self::External(url) => write!(f, "-> {url}"),
        }
    }
}

/// The routing capability handed to views and the auth service.
pub trait Navigator {
    /// Move to an in-app `path` with `query` parameters.
    fn navigate(&self, path: &str, query: &[(String, String)]);

    /// Leave the application for `url`.
    fn redirect_external(&self, url: &str);
}

/// A navigator that only records what was asked of it.
#[derive(Debug, Default)]
pub struct RecordingNavigator {
    history: RefCell<Vec<NavigationEvent>>,
}

impl RecordingNavigator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every navigation so far, oldest first.
    pub fn history(&self) -> Vec<NavigationEvent> {
        self.history.borrow().clone()
    }

    pub fn last(&self) -> Option<NavigationEvent> {
        self.history.borrow().last().cloned()
    }

    /// Paths of in-app routes, oldest first.
    pub fn routes(&self) -> Vec<String> {
        self.history
            .borrow()
            .iter()
            .filter_map(|event| match event {
                NavigationEvent::Route { path, .. } => Some(path.clone()),
                NavigationEvent::External(_) => None,
            })
            .collect()
    }

    /// External redirect targets, oldest first.
    pub fn redirects(&self) -> Vec<String> {
        self.history
            .borrow()
            .iter()
            .filter_map(|event| match event {
                NavigationEvent::External(url) => Some(url.clone()),
                NavigationEvent::Route { .. } => None,
            })
            .collect()
    }
}

impl Navigator for RecordingNavigator {
    fn navigate(&self, path: &str, query: &[(String, String)]) {
        tracing::debug!(path, "navigate");
        self.history.borrow_mut().push(NavigationEvent::Route {
            path: path.to_string(),
            query: query.to_vec(),
        });
    }

    fn redirect_external(&self, url: &str) {
        tracing::debug!(url, "external redirect");
        self.history
            .borrow_mut()
            .push(NavigationEvent::External(url.to_string()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recording_navigator_keeps_order_and_splits_kinds() {
        let nav = RecordingNavigator::new();
        nav.navigate("/booking", &[]);
        nav.redirect_external("http://idp/logout");
        nav.navigate("/", &[("location".into(), "PT".into())]);

        assert_eq!(nav.history().len(), 3);
        assert_eq!(nav.routes(), vec!["/booking", "/"]);
        assert_eq!(nav.redirects(), vec!["http://idp/logout"]);
        assert_eq!(nav.last().unwrap().to_string(), "/?location=PT");
    }
}
