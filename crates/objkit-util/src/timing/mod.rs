//! Rate limiting wrappers built on a re-armable one-shot timer.
//!
//! Each wrapper owns one [`Timer`] with one worker thread, and keeps at most
//! one job scheduled on it. Callbacks run on the worker thread, so arguments
//! must be `Send + 'static`.

mod debounce;
mod throttle;
mod timer;

pub use debounce::Debounce;
pub use throttle::Throttle;
pub use timer::Timer;

use std::sync::{Mutex, MutexGuard, PoisonError};

/// Lock timer state; a panicking callback must not wedge the wrapper.
fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Arming state shared by the wrappers. `generation` identifies the armed
/// job so one that was already taken by the worker cannot act after losing
/// the race to a re-arm or cancel.
#[derive(Default)]
struct Slot {
    armed: bool,
    generation: u64,
}

impl Slot {
    /// Mark the slot armed and return the generation for the new job.
    fn arm(&mut self) -> u64 {
        self.generation += 1;
        self.armed = true;
        self.generation
    }

    fn disarm(&mut self) {
        self.generation += 1;
        self.armed = false;
    }

    /// Release the slot if `generation` still owns it.
    fn release(&mut self, generation: u64) -> bool {
        if self.generation != generation {
            return false;
        }
        self.armed = false;
        true
    }
}
