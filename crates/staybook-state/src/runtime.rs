//! Fire-and-forget issue of gateway calls.
//!
//! Services are `Rc`-shared, so their futures are `!Send` and run as local
//! tasks. Every spawn must happen inside a [`tokio::task::LocalSet`]; the
//! CLI and the test harnesses drive one on a current-thread runtime.

use std::future::Future;

use tokio::task::JoinHandle;

/// Issue `call` without waiting for it. The returned handle may be awaited
/// to observe completion; dropping it does not cancel the call.
pub fn spawn<F>(call: F) -> JoinHandle<()>
where
    F: Future<Output = ()> + 'static,
{
    tokio::task::spawn_local(call)
}

/// Run `future` to completion on a fresh current-thread runtime with a
/// `LocalSet`, so it may [`spawn`] gateway calls.
pub fn block_on_local<F: Future>(future: F) -> std::io::Result<F::Output> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    let local = tokio::task::LocalSet::new();
    Ok(local.block_on(&runtime, future))
}
