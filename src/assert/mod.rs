// Assertion module
//
// The free functions run on the global reporter; build a `Reporter` directly
// to use a configuration other than the one loaded from disk.

pub mod diff;
pub mod engine;
pub mod error;
pub mod failure;

pub use diff::get_debug_diff;
pub use engine::Reporter;
pub use error::MaybeError;
pub use failure::Failure;

use crate::logger::Logger;
use std::fmt::Debug;

/// Report "got `actual`, want `expected`" unless the two compare equal
#[track_caller]
pub fn equal<L, E, A>(logger: &L, message: &str, expected: E, actual: A) -> bool
where
    L: Logger + ?Sized,
    E: PartialEq<A> + Debug,
    A: Debug,
{
    Reporter::global().equal(logger, message, expected, actual)
}

/// Report unless `|a - b| <= 0.1^precision`. See [`Reporter::floats_are_close`]
/// for why this is only approximate.
#[track_caller]
pub fn floats_are_close<L>(logger: &L, message: &str, a: f64, b: f64, precision: i32) -> bool
where
    L: Logger + ?Sized,
{
    Reporter::global().floats_are_close(logger, message, a, b, precision)
}

#[track_caller]
pub fn err_is_nil<L, M>(logger: &L, message: &str, err: M) -> bool
where
    L: Logger + ?Sized,
    M: MaybeError,
{
    Reporter::global().err_is_nil(logger, message, err)
}

#[track_caller]
pub fn err_contains<L, M>(logger: &L, message: &str, err: M, substring: &str) -> bool
where
    L: Logger + ?Sized,
    M: MaybeError,
{
    Reporter::global().err_contains(logger, message, err, substring)
}

/// Report unless `f` panics with a string containing `substring`.
///
/// The panic hook still prints expected panics; see [`Reporter::panics`].
#[track_caller]
pub fn panics<L, F, R>(logger: &L, message: &str, substring: &str, f: F)
where
    L: Logger + ?Sized,
    F: FnOnce() -> R,
{
    Reporter::global().panics(logger, message, substring, f)
}

#[track_caller]
pub fn panic_payload<L, T>(
    logger: &L,
    message: &str,
    outcome: std::thread::Result<T>,
    substring: &str,
) where
    L: Logger + ?Sized,
{
    Reporter::global().panic_payload(logger, message, outcome, substring)
}
