// Failure taxonomy - one variant per way an assertion can fail

use thiserror::Error;

/// A failed assertion.
///
/// The `Display` output is the text handed to the logger, minus the location
/// prefix and any diff, which the reporter adds around it.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Failure {
    #[error("{message}: got {actual}, want {expected}")]
    NotEqual {
        message: String,
        expected: String,
        actual: String,
    },

    #[error(
        "{message}: floats are not close: a: {a}, b: {b}, difference: {difference}, threshold: {threshold} (approximate check, values near the threshold may not behave as expected)"
    )]
    FloatsNotClose {
        message: String,
        a: f64,
        b: f64,
        difference: f64,
        threshold: f64,
    },

    #[error("unexpected error: {message}: {error}")]
    UnexpectedError { message: String, error: String },

    #[error("error is nil: {message}")]
    ErrorIsNil { message: String },

    #[error("expected substring missing: {message}\nsubstring: {substring}\nerror: {error}")]
    SubstringMissing {
        message: String,
        substring: String,
        error: String,
    },

    #[error("nothing raised a panic: {message}")]
    NothingPanicked { message: String },

    #[error("panic payload wasn't a string: {message}")]
    PayloadNotString { message: String },
}

impl Failure {
    /// Short machine-friendly name, used in log events
    pub fn kind(&self) -> &'static str {
        match self {
            Failure::NotEqual { .. } => "not_equal",
            Failure::FloatsNotClose { .. } => "floats_not_close",
            Failure::UnexpectedError { .. } => "unexpected_error",
            Failure::ErrorIsNil { .. } => "error_is_nil",
            Failure::SubstringMissing { .. } => "substring_missing",
            Failure::NothingPanicked { .. } => "nothing_panicked",
            Failure::PayloadNotString { .. } => "payload_not_string",
        }
    }
}
