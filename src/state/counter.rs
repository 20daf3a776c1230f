// Failure counter

use std::sync::atomic::{AtomicUsize, Ordering};

/// Monotonic count of failed assertions.
///
/// The only way down is [`FailureCounter::reset`], which goes straight to zero.
#[derive(Debug, Default)]
pub struct FailureCounter {
    count: AtomicUsize,
}

impl FailureCounter {
    pub const fn new() -> Self {
        Self {
            count: AtomicUsize::new(0),
        }
    }

    /// Add one failure and return the updated total
    pub fn increment(&self) -> usize {
        self.count.fetch_add(1, Ordering::SeqCst) + 1
    }

    pub fn get(&self) -> usize {
        self.count.load(Ordering::SeqCst)
    }

    /// Zero the counter, returning the value it held
    pub fn reset(&self) -> usize {
        self.count.swap(0, Ordering::SeqCst)
    }
}
