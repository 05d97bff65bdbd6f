use std::sync::{Arc, Mutex};
use std::time::Duration;

use super::{lock, Slot, Timer};
use crate::config::ThrottleOptions;

struct Shared<A> {
    func: Box<dyn Fn(A) + Send + Sync>,
    wait: Duration,
    slot: Mutex<Slot>,
}

impl<A> Shared<A> {
    fn fire(&self, generation: u64, args: A) {
        if !lock(&self.slot).release(generation) {
            return;
        }
        tracing::trace!(generation, "throttle firing");
        (self.func)(args);
    }
}

/// Runs the wrapped function at most once per `wait`.
///
/// The first call arms a timer and keeps its arguments; calls made while
/// the timer is armed are dropped. When the timer expires the function runs
/// with the kept arguments and the next call arms a new timer.
///
/// # Example
///
/// ```
/// use std::sync::{mpsc, Mutex};
/// use std::time::Duration;
/// use objkit_util::Throttle;
///
/// let (tx, rx) = mpsc::channel();
/// let tx = Mutex::new(tx);
/// let throttled = Throttle::new(Duration::from_millis(20), move |n: u32| {
///     tx.lock().unwrap().send(n).unwrap();
/// });
/// throttled.call(1);
/// throttled.call(2);
/// assert_eq!(rx.recv_timeout(Duration::from_secs(2)), Ok(1));
/// ```
pub struct Throttle<A> {
    shared: Arc<Shared<A>>,
    timer: Timer,
}

impl<A: Send + 'static> Throttle<A> {
    pub fn new<F>(wait: Duration, func: F) -> Self
    where
        F: Fn(A) + Send + Sync + 'static,
    {
        Self {
            shared: Arc::new(Shared {
                func: Box::new(func),
                wait,
                slot: Mutex::new(Slot::default()),
            }),
            timer: Timer::new(),
        }
    }

    pub fn with_options<F>(options: ThrottleOptions, func: F) -> Self
    where
        F: Fn(A) + Send + Sync + 'static,
    {
        Self::new(options.wait(), func)
    }

    pub fn call(&self, args: A) {
        let mut slot = lock(&self.shared.slot);
        if slot.armed {
            tracing::trace!("throttle call dropped");
            return;
        }
        let generation = slot.arm();
        let shared = Arc::clone(&self.shared);
        self.timer
            .schedule(self.shared.wait, move || shared.fire(generation, args));
        tracing::trace!(generation, wait = ?self.shared.wait, "throttle armed");
    }

    /// Disarm a pending call, if any.
    pub fn cancel(&self) {
        let mut slot = lock(&self.shared.slot);
        slot.disarm();
        self.timer.cancel();
    }

    pub fn is_pending(&self) -> bool {
        lock(&self.shared.slot).armed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::mpsc;

    const WAIT: Duration = Duration::from_millis(40);
    const PATIENCE: Duration = Duration::from_secs(2);

    #[test]
    fn test_first_call_wins_within_window() {
        let (tx, rx) = mpsc::channel();
        let tx = Mutex::new(tx);
        let throttled = Throttle::new(WAIT, move |n: u32| {
            tx.lock().unwrap().send(n).unwrap();
        });
        throttled.call(1);
        throttled.call(2);
        throttled.call(3);
        assert!(throttled.is_pending());

        assert_eq!(rx.recv_timeout(PATIENCE), Ok(1));
        assert!(rx.recv_timeout(WAIT * 3).is_err());
        assert!(!throttled.is_pending());
    }

    #[test]
    fn test_next_window_after_fire() {
        let (tx, rx) = mpsc::channel();
        let tx = Mutex::new(tx);
        let throttled = Throttle::new(WAIT, move |n: u32| {
            tx.lock().unwrap().send(n).unwrap();
        });
        throttled.call(1);
        assert_eq!(rx.recv_timeout(PATIENCE), Ok(1));
        throttled.call(2);
        assert_eq!(rx.recv_timeout(PATIENCE), Ok(2));
    }

    #[test]
    fn test_cancel_drops_pending_call() {
        let (tx, rx) = mpsc::channel::<u32>();
        let tx = Mutex::new(tx);
        let throttled = Throttle::new(WAIT, move |n: u32| {
            tx.lock().unwrap().send(n).unwrap();
        });
        throttled.call(1);
        throttled.cancel();
        assert!(!throttled.is_pending());
        assert!(rx.recv_timeout(WAIT * 4).is_err());
    }

    #[test]
    fn test_with_options() {
        let (tx, rx) = mpsc::channel();
        let tx = Mutex::new(tx);
        let throttled = Throttle::with_options(ThrottleOptions { wait_ms: 5 }, move |s: &'static str| {
            tx.lock().unwrap().send(s).unwrap();
        });
        throttled.call("go");
        assert_eq!(rx.recv_timeout(PATIENCE), Ok("go"));
    }
}
