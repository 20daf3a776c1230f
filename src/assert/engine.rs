// Assertion reporter - compares, formats and reports failures

use once_cell::sync::Lazy;
use std::fmt::{self, Debug};
use std::panic::{self, AssertUnwindSafe, Location};

use super::diff::get_debug_diff;
use super::error::{MaybeError, payload_str};
use super::failure::Failure;
use crate::config::{Config, ReportConfig, ValueStyle};
use crate::logger::Logger;
use crate::logging::LOG_TARGET;
use crate::state;

static GLOBAL: Lazy<Reporter> = Lazy::new(|| Reporter::new(Config::load().unwrap_or_default()));

/// Runs assertions with a fixed report configuration.
///
/// Every failed assertion makes exactly one `report` call on the logger it
/// was given and bumps the process-wide failure counter. Nothing here panics
/// or returns an error on failure; the boolean result is the only signal
/// besides the report itself.
#[derive(Debug, Clone, Default)]
pub struct Reporter {
    config: ReportConfig,
}

/// One rendered report: location prefix, failure text, optional diff
struct Report<'a> {
    location: Option<&'a Location<'a>>,
    failure: &'a Failure,
    diff: Option<String>,
}

impl fmt::Display for Report<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(location) = self.location {
            write!(f, "{}:{}: ", location.file(), location.line())?;
        }
        write!(f, "{}", self.failure)?;
        if let Some(diff) = &self.diff {
            write!(f, "\n{}", diff)?;
        }
        Ok(())
    }
}

impl Reporter {
    /// Create a reporter with the given configuration
    pub fn new(config: Config) -> Self {
        Self {
            config: config.report,
        }
    }

    /// The reporter behind the free assertion functions, configured from the
    /// first config file found by [`Config::load`]
    pub fn global() -> &'static Reporter {
        &GLOBAL
    }

    /// Deep equality through `PartialEq`.
    ///
    /// Reports "got `actual`, want `expected`" using the configured debug
    /// style. Self-referential structures are not supported.
    #[track_caller]
    pub fn equal<L, E, A>(&self, logger: &L, message: &str, expected: E, actual: A) -> bool
    where
        L: Logger + ?Sized,
        E: PartialEq<A> + Debug,
        A: Debug,
    {
        if expected == actual {
            return true;
        }

        let expected = self.render(&expected);
        let actual = self.render(&actual);
        let diff = self
            .config
            .diff
            .then(|| get_debug_diff(&expected, &actual, self.config.color));

        let failure = Failure::NotEqual {
            message: message.to_string(),
            expected,
            actual,
        };
        self.fail(logger, Location::caller(), &failure, diff)
    }

    /// Absolute tolerance check: fails when `|a - b| > 0.1^precision`.
    ///
    /// Binary floating point makes this approximate. Values whose difference
    /// sits right at the threshold can land on either side of it, and a NaN
    /// difference never exceeds the threshold, so it passes.
    #[track_caller]
    pub fn floats_are_close<L>(
        &self,
        logger: &L,
        message: &str,
        a: f64,
        b: f64,
        precision: i32,
    ) -> bool
    where
        L: Logger + ?Sized,
    {
        let threshold = 0.1_f64.powi(precision);
        let difference = (a - b).abs();

        if difference > threshold {
            let failure = Failure::FloatsNotClose {
                message: message.to_string(),
                a,
                b,
                difference,
                threshold,
            };
            return self.fail(logger, Location::caller(), &failure, None);
        }
        true
    }

    /// Passes when `err` holds no error
    #[track_caller]
    pub fn err_is_nil<L, M>(&self, logger: &L, message: &str, err: M) -> bool
    where
        L: Logger + ?Sized,
        M: MaybeError,
    {
        match err.error_description() {
            None => true,
            Some(error) => {
                let failure = Failure::UnexpectedError {
                    message: message.to_string(),
                    error,
                };
                self.fail(logger, Location::caller(), &failure, None)
            }
        }
    }

    /// Passes when `err` holds an error whose description contains `substring`.
    ///
    /// Plain substring search, no patterns.
    #[track_caller]
    pub fn err_contains<L, M>(&self, logger: &L, message: &str, err: M, substring: &str) -> bool
    where
        L: Logger + ?Sized,
        M: MaybeError,
    {
        let description = err.error_description();
        self.check_contains(
            logger,
            Location::caller(),
            message,
            description.as_deref(),
            substring,
        )
    }

    /// Run `f` and check that it panics with a string payload containing
    /// `substring`.
    ///
    /// Unlike the other assertions, a block that returns normally is the
    /// failure case. A panic with a non-string payload fails as well. The
    /// panic is contained here; whatever state `f` captured is left as the
    /// panic left it.
    ///
    /// The process panic hook still runs before the unwind is caught, so the
    /// default hook prints "thread '..' panicked at .." to stderr even when
    /// the assertion passes. Callers who want quiet output install their own
    /// hook with `std::panic::set_hook`; this function never touches it, since
    /// the hook is process-wide and other threads may be panicking for real.
    #[track_caller]
    pub fn panics<L, F, R>(&self, logger: &L, message: &str, substring: &str, f: F)
    where
        L: Logger + ?Sized,
        F: FnOnce() -> R,
    {
        let outcome = panic::catch_unwind(AssertUnwindSafe(f));
        self.panic_payload(logger, message, outcome, substring)
    }

    /// Same checks as [`Reporter::panics`] on an outcome the caller already
    /// captured, e.g. with `std::panic::catch_unwind` or `JoinHandle::join`.
    #[track_caller]
    pub fn panic_payload<L, T>(
        &self,
        logger: &L,
        message: &str,
        outcome: std::thread::Result<T>,
        substring: &str,
    ) where
        L: Logger + ?Sized,
    {
        let location = Location::caller();

        let payload = match outcome {
            Ok(_) => {
                let failure = Failure::NothingPanicked {
                    message: message.to_string(),
                };
                self.fail(logger, location, &failure, None);
                return;
            }
            Err(payload) => payload,
        };

        match payload_str(payload.as_ref()) {
            Some(text) => {
                tracing::debug!(
                    target: LOG_TARGET,
                    "Captured panic at {}: {}",
                    location,
                    text
                );
                self.check_contains(logger, location, message, Some(text), substring);
            }
            None => {
                let failure = Failure::PayloadNotString {
                    message: message.to_string(),
                };
                self.fail(logger, location, &failure, None);
            }
        }
    }

    fn check_contains<L>(
        &self,
        logger: &L,
        location: &Location<'_>,
        message: &str,
        description: Option<&str>,
        substring: &str,
    ) -> bool
    where
        L: Logger + ?Sized,
    {
        let failure = match description {
            None => Failure::ErrorIsNil {
                message: message.to_string(),
            },
            Some(error) if !error.contains(substring) => Failure::SubstringMissing {
                message: message.to_string(),
                substring: substring.to_string(),
                error: error.to_string(),
            },
            Some(_) => return true,
        };
        self.fail(logger, location, &failure, None)
    }

    fn render<T: Debug + ?Sized>(&self, value: &T) -> String {
        match self.config.style {
            ValueStyle::Compact => format!("{:?}", value),
            ValueStyle::Pretty => format!("{:#?}", value),
        }
    }

    fn fail<L>(
        &self,
        logger: &L,
        location: &Location<'_>,
        failure: &Failure,
        diff: Option<String>,
    ) -> bool
    where
        L: Logger + ?Sized,
    {
        let total = state::record_failure();
        tracing::debug!(
            target: LOG_TARGET,
            kind = failure.kind(),
            total,
            "Assertion failed at {}:{}",
            location.file(),
            location.line()
        );

        let report = Report {
            location: self.config.location.then_some(location),
            failure,
            diff,
        };
        logger.report(format_args!("{}", report));
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logger::RecordingLogger;

    fn reporter_with(edit: impl FnOnce(&mut ReportConfig)) -> Reporter {
        let mut config = Config::default();
        edit(&mut config.report);
        Reporter::new(config)
    }

    #[test]
    fn test_equal_pass_is_silent() {
        let logger = RecordingLogger::new();
        let reporter = Reporter::default();

        assert!(reporter.equal(&logger, "message", 42, 42));
        assert!(reporter.equal(&logger, "message", vec![2, 9, 6], vec![2, 9, 6]));
        assert!(reporter.equal(&logger, "message", "abc".to_string(), "abc"));
        assert_eq!(logger.count(), 0);
    }

    #[test]
    fn test_equal_fail_reports_once() {
        let logger = RecordingLogger::new();
        let reporter = Reporter::default();

        assert!(!reporter.equal(&logger, "message", 7, 23));

        assert_eq!(logger.count(), 1);
        let text = logger.last_message().unwrap_or_default();
        assert!(text.contains("message: got 23, want 7"), "{}", text);
    }

    #[test]
    fn test_equal_reports_caller_location() {
        let logger = RecordingLogger::new();
        let reporter = Reporter::default();

        let line = line!() + 1;
        reporter.equal(&logger, "message", 1, 2);

        let text = logger.last_message().unwrap_or_default();
        assert!(
            text.starts_with(&format!("{}:{}: ", file!(), line)),
            "{}",
            text
        );
    }

    #[test]
    fn test_equal_without_location() {
        let logger = RecordingLogger::new();
        let reporter = reporter_with(|c| c.location = false);

        reporter.equal(&logger, "message", 1, 2);

        assert_eq!(
            logger.last_message().as_deref(),
            Some("message: got 2, want 1")
        );
    }

    #[test]
    fn test_equal_with_diff() {
        let logger = RecordingLogger::new();
        let reporter = reporter_with(|c| {
            c.location = false;
            c.diff = true;
        });

        reporter.equal(&logger, "something()", vec![2, 9, 6], vec![2, 8, 6]);

        let text = logger.last_message().unwrap_or_default();
        assert!(text.starts_with("something(): got [2, 8, 6], want [2, 9, 6]\n"));
        assert!(text.contains("Diff (Expected - / Actual +):"));
        assert!(text.contains("[-9-]{+8+}"), "{}", text);
    }

    #[test]
    fn test_equal_pretty_style() {
        #[derive(Debug, PartialEq)]
        struct Point {
            x: i32,
            y: i32,
        }

        let logger = RecordingLogger::new();
        let reporter = reporter_with(|c| c.style = ValueStyle::Pretty);

        reporter.equal(&logger, "point", Point { x: 1, y: 2 }, Point { x: 1, y: 3 });

        let text = logger.last_message().unwrap_or_default();
        assert!(text.contains("Point {\n    x: 1,\n    y: 3,\n}"), "{}", text);
    }

    #[test]
    fn test_floats_are_close() {
        let logger = RecordingLogger::new();
        let reporter = Reporter::default();

        assert!(reporter.floats_are_close(&logger, "message", 2.123, 2.124, 2));
        assert_eq!(logger.count(), 0);

        assert!(!reporter.floats_are_close(&logger, "message", 2.123, 2.125, 3));
        assert_eq!(logger.count(), 1);
        let text = logger.last_message().unwrap_or_default();
        assert!(text.contains("floats are not close"));
        assert!(text.contains("a: 2.123, b: 2.125"));
    }

    #[test]
    fn test_floats_are_close_zero_precision() {
        let logger = RecordingLogger::new();
        let reporter = Reporter::default();

        assert!(reporter.floats_are_close(&logger, "message", 1.0, 1.5, 0));
        assert!(!reporter.floats_are_close(&logger, "message", 1.0, 2.5, 0));
        assert_eq!(logger.count(), 1);
    }

    #[test]
    fn test_err_is_nil() {
        let logger = RecordingLogger::new();
        let reporter = Reporter::default();

        assert!(reporter.err_is_nil(&logger, "message", None::<String>));
        assert_eq!(logger.count(), 0);

        assert!(!reporter.err_is_nil(&logger, "message", Some("A dummy error")));
        assert_eq!(logger.count(), 1);
        let text = logger.last_message().unwrap_or_default();
        assert!(text.contains("unexpected error: message: A dummy error"));
    }

    #[test]
    fn test_err_contains() {
        let logger = RecordingLogger::new();
        let reporter = Reporter::default();

        assert!(!reporter.err_contains(&logger, "message", None::<String>, ""));
        assert_eq!(logger.count(), 1);
        assert!(
            logger
                .last_message()
                .unwrap_or_default()
                .contains("error is nil: message")
        );

        assert!(!reporter.err_contains(&logger, "message", Some("asdf"), "qwerty"));
        assert_eq!(logger.count(), 2);
        assert!(
            logger
                .last_message()
                .unwrap_or_default()
                .contains("substring: qwerty\nerror: asdf")
        );

        assert!(reporter.err_contains(&logger, "message", Some("asdf"), "asd"));
        assert_eq!(logger.count(), 2);
    }

    #[test]
    fn test_err_contains_is_not_a_pattern() {
        let logger = RecordingLogger::new();
        let reporter = Reporter::default();

        assert!(!reporter.err_contains(&logger, "message", Some("asdf"), "a.*f"));
        assert!(reporter.err_contains(&logger, "message", Some("a.*f"), "a.*f"));
    }

    #[test]
    fn test_panics_with_matching_payload() {
        let logger = RecordingLogger::new();
        let reporter = Reporter::default();

        reporter.panics(&logger, "Function calls panic", "panicked", || {
            panic!("I panicked :(")
        });

        assert_eq!(logger.count(), 0, "{:?}", logger.messages());
    }

    #[test]
    fn test_panics_with_formatted_payload() {
        let logger = RecordingLogger::new();
        let reporter = Reporter::default();
        let code = 7;

        reporter.panics(&logger, "Formatted panic", "code 7", || {
            panic!("failed with code {}", code)
        });

        assert_eq!(logger.count(), 0, "{:?}", logger.messages());
    }

    #[test]
    fn test_panics_with_unexpected_message() {
        let logger = RecordingLogger::new();
        let reporter = Reporter::default();

        reporter.panics(&logger, "Unexpected message", "panicked", || {
            panic!("Unexpected message")
        });

        assert_eq!(logger.count(), 1);
        let text = logger.last_message().unwrap_or_default();
        assert!(text.contains("expected substring missing"), "{}", text);
    }

    #[test]
    fn test_panics_when_nothing_panics() {
        let logger = RecordingLogger::new();
        let reporter = Reporter::default();

        reporter.panics(&logger, "Panic is not called", "panicked", || 1 + 1);

        assert_eq!(logger.count(), 1);
        let text = logger.last_message().unwrap_or_default();
        assert!(text.contains("nothing raised a panic"), "{}", text);
    }

    #[test]
    fn test_panics_with_non_string_payload() {
        let logger = RecordingLogger::new();
        let reporter = Reporter::default();

        reporter.panics(&logger, "", "panicked", || {
            std::panic::panic_any(vec![7_i64])
        });

        assert_eq!(logger.count(), 1);
        let text = logger.last_message().unwrap_or_default();
        assert!(text.contains("wasn't a string"), "{}", text);
    }

    #[test]
    fn test_panic_payload_from_join() {
        let logger = RecordingLogger::new();
        let reporter = Reporter::default();

        let outcome = std::thread::spawn(|| panic!("worker panicked")).join();
        reporter.panic_payload(&logger, "worker", outcome, "panicked");

        let outcome = std::thread::spawn(|| 5).join();
        reporter.panic_payload(&logger, "worker", outcome, "panicked");

        assert_eq!(logger.count(), 1);
        let text = logger.last_message().unwrap_or_default();
        assert!(text.contains("nothing raised a panic: worker"), "{}", text);
    }

    #[test]
    fn test_failures_bump_global_counter() {
        let logger = RecordingLogger::new();
        let reporter = Reporter::default();
        let before = state::failed_assertion_counter();

        reporter.equal(&logger, "message", 1, 2);
        reporter.err_is_nil(&logger, "message", Some("boom"));

        // Other tests may fail assertions concurrently, so only a lower bound holds
        assert!(state::failed_assertion_counter() >= before + 2);
    }
}
