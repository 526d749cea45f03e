//! Executor for the synchronous surfaces
//!
//! The host shell calls the bridge and the install hook from plain threads.
//! Their futures run on a small pool of `prompt-manager-N` workers. Content
//! scripts attached from inside those futures land on the same pool, so a
//! popup blocked on an acknowledgement never starves the tab that sends it.
//!
//! Hosts that already run tokio keep background work on their own scheduler:
//! [`spawn`] prefers the caller's runtime and only falls back to the pool.

use std::{
    future::Future,
    sync::atomic::{AtomicUsize, Ordering},
};

use once_cell::sync::Lazy;
use tokio::{
    runtime::{Builder, Handle, Runtime},
    task::JoinHandle,
};

const WORKER_THREADS: usize = 2;
const THREAD_PREFIX: &str = "prompt-manager";

static POOL: Lazy<Runtime> = Lazy::new(|| {
    Builder::new_multi_thread()
        .worker_threads(WORKER_THREADS)
        .thread_name_fn(|| {
            static NEXT: AtomicUsize = AtomicUsize::new(0);
            format!("{}-{}", THREAD_PREFIX, NEXT.fetch_add(1, Ordering::Relaxed))
        })
        .enable_time()
        .build()
        .expect("Failed to create prompt-manager runtime")
});

/// Handle of the runtime the caller is on, or of the worker pool
pub fn handle() -> Handle {
    Handle::try_current().unwrap_or_else(|_| POOL.handle().clone())
}

pub fn spawn<F>(future: F) -> JoinHandle<F::Output>
where
    F: Future + Send + 'static,
    F::Output: Send + 'static,
{
    handle().spawn(future)
}

/// Drive a future to completion on the worker pool
///
/// Must not be called from inside an async context.
pub fn block_on<F: Future>(future: F) -> F::Output {
    POOL.block_on(future)
}
