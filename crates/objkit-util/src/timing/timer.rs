use std::panic::{self, AssertUnwindSafe};
use std::sync::{Arc, Condvar, Mutex, PoisonError};
use std::thread;
use std::time::{Duration, Instant};

use super::lock;

type Job = Box<dyn FnOnce() + Send>;

struct Pending {
    deadline: Instant,
    job: Job,
}

#[derive(Default)]
struct State {
    pending: Option<Pending>,
    started: bool,
    shutdown: bool,
}

#[derive(Default)]
struct Inner {
    state: Mutex<State>,
    wake: Condvar,
}

/// A re-armable one-shot timer backed by a single worker thread.
///
/// At most one job is scheduled at a time: scheduling replaces the pending
/// job and its deadline, cancelling drops it. The worker is spawned on the
/// first [`Timer::schedule`] and lives until the timer is dropped. Dropping
/// the timer discards a pending job without running it.
#[derive(Default)]
pub struct Timer {
    inner: Arc<Inner>,
}

impl Timer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run `job` on the worker thread once `delay` has elapsed, replacing
    /// any job still pending.
    pub fn schedule<F>(&self, delay: Duration, job: F)
    where
        F: FnOnce() + Send + 'static,
    {
        let replaced = {
            let mut state = lock(&self.inner.state);
            if !state.started {
                state.started = true;
                let inner = Arc::clone(&self.inner);
                thread::spawn(move || run(&inner));
            }
            state.pending.replace(Pending {
                deadline: Instant::now() + delay,
                job: Box::new(job),
            })
        };
        self.inner.wake.notify_one();
        // Dropped outside the lock: the job may own arbitrary state.
        drop(replaced);
    }

    /// Drop the pending job, if any.
    pub fn cancel(&self) {
        let cancelled = lock(&self.inner.state).pending.take();
        self.inner.wake.notify_one();
        drop(cancelled);
    }

    pub fn is_armed(&self) -> bool {
        lock(&self.inner.state).pending.is_some()
    }
}

impl Drop for Timer {
    fn drop(&mut self) {
        let discarded = {
            let mut state = lock(&self.inner.state);
            state.shutdown = true;
            state.pending.take()
        };
        self.inner.wake.notify_one();
        drop(discarded);
    }
}

fn run(inner: &Inner) {
    let mut state = lock(&inner.state);
    loop {
        if state.shutdown {
            return;
        }
        let Some(deadline) = state.pending.as_ref().map(|p| p.deadline) else {
            state = inner.wake.wait(state).unwrap_or_else(PoisonError::into_inner);
            continue;
        };
        let now = Instant::now();
        if now < deadline {
            state = inner
                .wake
                .wait_timeout(state, deadline - now)
                .unwrap_or_else(PoisonError::into_inner)
                .0;
            continue;
        }
        let Some(pending) = state.pending.take() else {
            continue;
        };
        drop(state);
        if panic::catch_unwind(AssertUnwindSafe(pending.job)).is_err() {
            tracing::warn!("timer job panicked");
        }
        state = lock(&inner.state);
    }
}
