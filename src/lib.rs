//! Soft assertions for tests.
//!
//! Each assertion compares an expected and an actual value and, on mismatch,
//! sends one formatted message to a caller-supplied [`Logger`] and bumps a
//! process-wide failure counter. Nothing halts: every function returns a
//! boolean and the caller decides what a failure means.
//!
//! ```
//! use softassert::{RecordingLogger, equal, err_contains};
//!
//! let logger = RecordingLogger::new();
//! assert!(equal(&logger, "something()", vec![2, 9, 6], vec![2, 9, 6]));
//!
//! let opened: Result<(), String> = Err("permission denied".to_string());
//! assert!(!err_contains(&logger, "open()", &opened, "not found"));
//! assert_eq!(logger.count(), 1);
//! ```

pub mod assert;
pub mod config;
pub mod logger;
pub mod logging;
pub mod state;

pub use assert::{
    Failure, MaybeError, Reporter, equal, err_contains, err_is_nil, floats_are_close,
    panic_payload, panics,
};
pub use config::Config;
pub use logger::{FnLogger, Logger, RecordingLogger, StderrLogger, TracingLogger};
pub use state::{failed_assertion_counter, reset_failed_assertion_counter};
