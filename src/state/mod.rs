// State module - process-wide assertion bookkeeping

pub mod counter;

pub use counter::FailureCounter;

use crate::logging::LOG_TARGET;

/// Failed assertions since process start or the last reset
static FAILED_ASSERTIONS: FailureCounter = FailureCounter::new();

/// Number of failed assertions since process start or the last reset
pub fn failed_assertion_counter() -> usize {
    FAILED_ASSERTIONS.get()
}

/// Set the failed assertion counter back to zero
pub fn reset_failed_assertion_counter() {
    let previous = FAILED_ASSERTIONS.reset();
    tracing::debug!(
        target: LOG_TARGET,
        "Failed assertion counter reset (was {})",
        previous
    );
}

/// Count one failed assertion, returning the new total
pub(crate) fn record_failure() -> usize {
    FAILED_ASSERTIONS.increment()
}
