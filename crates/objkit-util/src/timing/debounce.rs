use std::sync::{Arc, Mutex};
use std::time::Duration;

use super::{lock, Slot, Timer};
use crate::config::DebounceOptions;

struct Shared<A> {
    func: Box<dyn Fn(A) + Send + Sync>,
    wait: Duration,
    immediate: bool,
    slot: Mutex<Slot>,
}

impl<A> Shared<A> {
    fn fire(&self, generation: u64, args: A) {
        if !lock(&self.slot).release(generation) {
            return;
        }
        tracing::trace!(generation, "debounce firing");
        (self.func)(args);
    }

    fn expire(&self, generation: u64) {
        if lock(&self.slot).release(generation) {
            tracing::trace!(generation, "debounce window closed");
        }
    }
}

/// Collapses a burst of calls into one.
///
/// Every call restarts the `wait` window. In leading mode (`immediate`)
/// the function runs on a call that arrives while no window is open and
/// the rest of the burst is swallowed. In trailing mode the function runs
/// once the window closes, with the arguments of the last call.
///
/// A burst re-arms the same timer rather than starting new ones, so the
/// arguments of superseded calls are released straight away. Dropping the
/// wrapper discards a pending call.
///
/// # Example
///
/// ```
/// use std::sync::{mpsc, Mutex};
/// use std::time::Duration;
/// use objkit_util::Debounce;
///
/// let (tx, rx) = mpsc::channel();
/// let tx = Mutex::new(tx);
/// let debounced = Debounce::new(Duration::from_millis(20), false, move |n: u32| {
///     tx.lock().unwrap().send(n).unwrap();
/// });
/// debounced.call(1);
/// debounced.call(2);
/// assert_eq!(rx.recv_timeout(Duration::from_secs(2)), Ok(2));
/// ```
pub struct Debounce<A> {
    shared: Arc<Shared<A>>,
    timer: Timer,
}

impl<A: Send + 'static> Debounce<A> {
    pub fn new<F>(wait: Duration, immediate: bool, func: F) -> Self
    where
        F: Fn(A) + Send + Sync + 'static,
    {
        Self {
            shared: Arc::new(Shared {
                func: Box::new(func),
                wait,
                immediate,
                slot: Mutex::new(Slot::default()),
            }),
            timer: Timer::new(),
        }
    }

    pub fn with_options<F>(options: DebounceOptions, func: F) -> Self
    where
        F: Fn(A) + Send + Sync + 'static,
    {
        Self::new(options.wait(), options.immediate, func)
    }

    pub fn call(&self, args: A) {
        let mut slot = lock(&self.shared.slot);
        let idle = !slot.armed;
        let generation = slot.arm();
        let shared = Arc::clone(&self.shared);

        if !self.shared.immediate {
            self.timer
                .schedule(self.shared.wait, move || shared.fire(generation, args));
            return;
        }

        self.timer
            .schedule(self.shared.wait, move || shared.expire(generation));
        drop(slot);
        if idle {
            tracing::trace!(generation, "debounce leading call");
            (self.shared.func)(args);
        }
    }

    /// Close the current window without running anything.
    pub fn cancel(&self) {
        let mut slot = lock(&self.shared.slot);
        slot.disarm();
        self.timer.cancel();
    }

    pub fn is_pending(&self) -> bool {
        lock(&self.shared.slot).armed
    }
}
