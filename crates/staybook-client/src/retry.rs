//! Backoff for booking API calls.
//!
//! A response with any status, or a body that fails to decode, is final:
//! the gateway records it as the outcome of the operation. Without a
//! response, a GET is re-sent after connect errors and timeouts. Any other
//! method is re-sent only when the connection was never established, since
//! a timed-out POST or DELETE may already have been applied by the server.

use std::future::Future;
use std::time::Duration;

use crate::transport::Method;

/// How often and how long to wait before re-sending a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Backoff {
    /// Attempts after the first one.
    pub retries: u32,
    /// Delay before the first retry; doubled for each further retry.
    pub base: Duration,
}

impl Backoff {
    /// Three retries after 200, 400 and 800 ms.
    pub const DEFAULT: Self = Self {
        retries: 3,
        base: Duration::from_millis(200),
    };

    /// Delay before retry number `retry` (zero-based).
    pub fn delay(&self, retry: u32) -> Duration {
        self.base.saturating_mul(1u32.checked_shl(retry).unwrap_or(u32::MAX))
    }

    /// Run `attempt` until it succeeds, fails with an error `transient`
    /// rejects, or the retries are spent. The last error is returned.
    pub async fn run<T, E, F, Fut>(
        &self,
        endpoint: &str,
        transient: impl Fn(&E) -> bool,
        attempt: F,
    ) -> Result<T, E>
    where
        E: std::fmt::Display,
        F: Fn() -> Fut,
        Fut: Future<Output = Result<T, E>>,
    {
        let mut retry = 0;
        loop {
            match attempt().await {
                Err(err) if retry < self.retries && transient(&err) => {
                    let delay = self.delay(retry);
                    retry += 1;
                    tracing::warn!(
                        endpoint,
                        retry,
                        retries = self.retries,
                        ?delay,
                        error = %err,
                        "no response from booking API, retrying"
                    );
                    tokio::time::sleep(delay).await;
                }
                outcome => return outcome,
            }
        }
    }
}

/// Whether a `method` request that failed with `err` may be sent again.
pub(crate) fn is_resendable(method: Method, err: &reqwest::Error) -> bool {
    if err.is_builder() {
        return false;
    }
    match method {
        Method::Get => err.is_connect() || err.is_timeout() || err.is_request(),
        Method::Post | Method::Put | Method::Delete => err.is_connect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::fmt;

    #[derive(Debug, PartialEq)]
    enum Failure {
        Dropped,
        Rejected,
    }

    impl fmt::Display for Failure {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(f, "{self:?}")
        }
    }

    const INSTANT: Backoff = Backoff {
        retries: 3,
        base: Duration::ZERO,
    };

    fn dropped(e: &Failure) -> bool {
        *e == Failure::Dropped
    }

    #[test]
    fn default_schedule_doubles_from_200ms() {
        let delays: Vec<u128> = (0..3).map(|r| Backoff::DEFAULT.delay(r).as_millis()).collect();
        assert_eq!(delays, vec![200, 400, 800]);
    }

    #[test]
    fn delay_saturates_instead_of_overflowing() {
        assert_eq!(Backoff::DEFAULT.delay(40), Duration::from_millis(200).saturating_mul(u32::MAX));
    }

    #[tokio::test]
    async fn transient_failures_use_every_retry() {
        let calls = Cell::new(0);
        let result: Result<(), Failure> = INSTANT
            .run("GET /x", dropped, || {
                calls.set(calls.get() + 1);
                async { Err(Failure::Dropped) }
            })
            .await;
        assert_eq!(result, Err(Failure::Dropped));
        assert_eq!(calls.get(), 4);
    }

    #[tokio::test]
    async fn final_failures_are_not_retried() {
        let calls = Cell::new(0);
        let result: Result<(), Failure> = INSTANT
            .run("GET /x", dropped, || {
                calls.set(calls.get() + 1);
                async { Err(Failure::Rejected) }
            })
            .await;
        assert_eq!(result, Err(Failure::Rejected));
        assert_eq!(calls.get(), 1);
    }

    #[tokio::test]
    async fn success_after_a_dropped_attempt() {
        let calls = Cell::new(0);
        let result = INSTANT
            .run("GET /x", dropped, || {
                calls.set(calls.get() + 1);
                let n = calls.get();
                async move {
                    if n < 2 {
                        Err(Failure::Dropped)
                    } else {
                        Ok(n)
                    }
                }
            })
            .await;
        assert_eq!(result, Ok(2));
    }

    #[tokio::test]
    async fn refused_connection_is_resendable_for_every_method() {
        let err = reqwest::Client::builder()
            .timeout(Duration::from_millis(50))
            .build()
            .unwrap()
            .post("http://127.0.0.1:1/")
            .send()
            .await
            .unwrap_err();
        for method in [Method::Get, Method::Post, Method::Put, Method::Delete] {
            assert!(is_resendable(method, &err), "{method}");
        }
    }
}
