// Error-like inputs for the error assertions

use std::any::Any;
use std::fmt::Display;

/// Something that may or may not hold an error.
///
/// Implemented for `Option<E>` and `Result<T, E>` where `E: Display`, and for
/// references to either, so callers can pass `&result` without giving it up.
pub trait MaybeError {
    /// The error's description, or `None` when there is no error
    fn error_description(&self) -> Option<String>;
}

impl<E: Display> MaybeError for Option<E> {
    fn error_description(&self) -> Option<String> {
        self.as_ref().map(ToString::to_string)
    }
}

impl<T, E: Display> MaybeError for Result<T, E> {
    fn error_description(&self) -> Option<String> {
        self.as_ref().err().map(ToString::to_string)
    }
}

impl<M: MaybeError + ?Sized> MaybeError for &M {
    fn error_description(&self) -> Option<String> {
        (**self).error_description()
    }
}

/// Text of a panic payload, if it is one of the two string types `panic!` produces
pub fn payload_str(payload: &(dyn Any + Send)) -> Option<&str> {
    payload
        .downcast_ref::<&'static str>()
        .copied()
        .or_else(|| payload.downcast_ref::<String>().map(String::as_str))
}
