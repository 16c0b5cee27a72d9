//! Toast notification bus.
//!
//! A broadcast cell: only subscribers present at send time see a
//! notification. Late subscribers miss earlier toasts.

use std::fmt;

use staybook_core::{ObservableState, Subscription};

/// Toast severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Severity {
    Success,
    Info,
    Warn,
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Success => "success",
            Self::Info => "info",
            Self::Warn => "warn",
            Self::Error => "error",
        };
        f.write_str(s)
    }
}

/// A user-facing message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub severity: Severity,
    pub summary: Option<String>,
    pub detail: Option<String>,
}

impl Notification {
    pub fn new(severity: Severity) -> Self {
        Self {
            severity,
            summary: None,
            detail: None,
        }
    }

    pub fn success() -> Self {
        Self::new(Severity::Success)
    }

    pub fn error() -> Self {
        Self::new(Severity::Error)
    }

    pub fn summary(mut self, summary: impl Into<String>) -> Self {
        self.summary = Some(summary.into());
        self
    }

    pub fn detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }
}

impl fmt::Display for Notification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}]", self.severity)?;
        if let Some(summary) = &self.summary {
            write!(f, " {summary}")?;
        }
        if let Some(detail) = &self.detail {
            write!(f, ": {detail}")?;
        }
        Ok(())
    }
}

/// Owner of the toast channel.
pub struct ToastService {
    channel: ObservableState<Notification>,
}

impl fmt::Debug for ToastService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ToastService")
            .field("sent", &self.channel.version())
            .finish()
    }
}

impl Default for ToastService {
    fn default() -> Self {
        Self::new()
    }
}

impl ToastService {
    pub fn new() -> Self {
        Self {
            channel: ObservableState::broadcast(Notification::new(Severity::Info).summary("INIT")),
        }
    }

    pub fn send(&self, notification: Notification) {
        tracing::debug!(severity = %notification.severity, "toast");
        self.channel.write(notification);
    }

    /// Receive every notification sent from now on.
    pub fn subscribe(&self, on_toast: impl Fn(&Notification) + 'static) -> Subscription {
        self.channel.subscribe(on_toast)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn late_subscriber_misses_earlier_toasts() {
        let toasts = ToastService::new();
        toasts.send(Notification::error().detail("first"));

        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        let _sub = toasts.subscribe(move |n| sink.borrow_mut().push(n.clone()));
        toasts.send(Notification::success().summary("second"));

        let seen = seen.borrow();
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0].severity, Severity::Success);
    }

    #[test]
    fn display_joins_summary_and_detail() {
        let n = Notification::error().summary("Error").detail("boom");
        assert_eq!(n.to_string(), "[error] Error: boom");
        assert_eq!(Notification::success().to_string(), "[success]");
    }
}
