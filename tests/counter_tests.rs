// The failure counter is process-wide, so everything that reads it exactly
// lives in this one test to keep the harness's threads from interleaving.

use softassert::{
    RecordingLogger, equal, err_contains, err_is_nil, failed_assertion_counter, floats_are_close,
    panics, reset_failed_assertion_counter,
};

#[test]
fn test_failed_assertion_counter() {
    reset_failed_assertion_counter();
    assert_eq!(failed_assertion_counter(), 0);

    let logger = RecordingLogger::new();

    // Passing assertions leave it alone
    equal(&logger, "message", 42, 42);
    floats_are_close(&logger, "message", 2.123, 2.124, 2);
    err_is_nil(&logger, "message", None::<String>);
    err_contains(&logger, "message", Some("asdf"), "asd");
    panics(&logger, "message", "panicked", || panic!("I panicked :("));
    assert_eq!(failed_assertion_counter(), 0);
    assert_eq!(logger.count(), 0);

    // Each failure adds exactly one
    equal(&logger, "message", 1, 2);
    equal(&logger, "message", 1, 2);
    equal(&logger, "message", 1, 2);
    assert_eq!(failed_assertion_counter(), 3);
    assert_eq!(failed_assertion_counter(), 3);

    floats_are_close(&logger, "message", 2.123, 2.125, 3);
    err_is_nil(&logger, "message", Some("boom"));
    err_contains(&logger, "message", None::<String>, "");
    panics(&logger, "message", "panicked", || ());
    assert_eq!(failed_assertion_counter(), 7);
    assert_eq!(logger.count(), 7);

    reset_failed_assertion_counter();
    assert_eq!(failed_assertion_counter(), 0);

    reset_failed_assertion_counter();
    assert_eq!(failed_assertion_counter(), 0);

    equal(&logger, "message", "a", "b");
    assert_eq!(failed_assertion_counter(), 1);
}
