// Logger capability - the only interface assertions report through

use std::fmt;
use std::io::Write;
use std::sync::{Arc, Mutex};

use crate::logging::LOG_TARGET;

/// Receives one formatted message per failed assertion.
///
/// Assertions borrow the logger for the duration of a single call and never
/// keep it, so anything that can turn [`fmt::Arguments`] into a side effect
/// can act as a logger: a test framework's failure hook, a closure, or one of
/// the stock implementations in this module. References, boxes and `Arc`s
/// of a logger are loggers too, and `&dyn Logger` works wherever `&L` with
/// `L: Logger + ?Sized` is accepted.
pub trait Logger {
    fn report(&self, args: fmt::Arguments<'_>);
}

impl<L: Logger + ?Sized> Logger for &L {
    fn report(&self, args: fmt::Arguments<'_>) {
        (**self).report(args)
    }
}

impl<L: Logger + ?Sized> Logger for Box<L> {
    fn report(&self, args: fmt::Arguments<'_>) {
        (**self).report(args)
    }
}

impl<L: Logger + ?Sized> Logger for Arc<L> {
    fn report(&self, args: fmt::Arguments<'_>) {
        (**self).report(args)
    }
}

/// Adapts a closure into a [`Logger`]
///
/// ```
/// use softassert::{equal, logger::FnLogger};
///
/// let logger = FnLogger(|args: std::fmt::Arguments<'_>| eprintln!("{}", args));
/// assert!(!equal(&logger, "answer", 42, 41));
/// ```
#[derive(Debug, Clone, Copy)]
pub struct FnLogger<F>(pub F);

impl<F> Logger for FnLogger<F>
where
    F: Fn(fmt::Arguments<'_>),
{
    fn report(&self, args: fmt::Arguments<'_>) {
        (self.0)(args)
    }
}

/// Emits every report as a `tracing` error event
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingLogger;

impl Logger for TracingLogger {
    fn report(&self, args: fmt::Arguments<'_>) {
        tracing::error!(target: LOG_TARGET, "{}", args);
    }
}

/// Writes every report to standard error
#[derive(Debug, Clone, Copy, Default)]
pub struct StderrLogger;

impl Logger for StderrLogger {
    fn report(&self, args: fmt::Arguments<'_>) {
        let stderr = std::io::stderr();
        let mut handle = stderr.lock();
        // Nowhere left to report a failing stderr write
        let _ = writeln!(handle, "{}", args);
    }
}

/// Keeps every report in memory.
///
/// Mostly useful for testing code that wraps the assertions: the number of
/// reports and their rendered text can be inspected after the fact.
#[derive(Debug, Default)]
pub struct RecordingLogger {
    messages: Mutex<Vec<String>>,
}

impl RecordingLogger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of reports received so far
    pub fn count(&self) -> usize {
        self.lock().len()
    }

    /// All reports in arrival order
    pub fn messages(&self) -> Vec<String> {
        self.lock().clone()
    }

    /// Most recent report, if any
    pub fn last_message(&self) -> Option<String> {
        self.lock().last().cloned()
    }

    pub fn clear(&self) {
        self.lock().clear();
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<String>> {
        // A poisoned list is still a valid list of strings
        self.messages.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl Logger for RecordingLogger {
    fn report(&self, args: fmt::Arguments<'_>) {
        self.lock().push(args.to_string());
    }
}
