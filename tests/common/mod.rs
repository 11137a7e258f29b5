#![allow(dead_code)]

use std::panic::{catch_unwind, AssertUnwindSafe};

/// Installs a test subscriber so matcher dispatch traces show up under
/// `--nocapture`. Safe to call from every suite.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();
}

/// Runs `f` expecting the assertion inside to fail.
pub fn fails(f: impl FnOnce()) {
    let outcome = catch_unwind(AssertUnwindSafe(f));
    assert!(outcome.is_err(), "expected the assertion to fail");
}

/// Runs `f` expecting a failure whose message contains `fragment`.
pub fn fails_with(fragment: &str, f: impl FnOnce()) {
    let outcome = catch_unwind(AssertUnwindSafe(f));
    let payload = match outcome {
        Ok(()) => panic!("expected the assertion to fail"),
        Err(payload) => payload,
    };
    let message = payload
        .downcast_ref::<String>()
        .cloned()
        .or_else(|| payload.downcast_ref::<&str>().map(|s| s.to_string()))
        .unwrap_or_default();
    assert!(
        message.contains(fragment),
        "failure message {message:?} does not contain {fragment:?}"
    );
}
