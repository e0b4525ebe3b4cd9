// Unit tests for the logging bootstrap
// Only double-initialization semantics are testable in-process: fern's
// global logger can be applied once per test binary

use crate::logging::initialize;

/// **VALUE**: Verifies repeated initialization is safe and idempotent.
///
/// **WHY THIS MATTERS**: Embedding applications and their tests both call
/// `initialize`. If a second call errored or re-applied the dispatch, test
/// suites and hot-reload setups would crash at startup.
///
/// **BUG THIS CATCHES**: Would catch removal of the AtomicBool/Once guard,
/// which makes fern's `apply()` return a SetLoggerError on the second call.
#[test]
fn given_logger_initialized_when_initialized_again_then_returns_ok() {
    let dir = tempfile::tempdir().expect("tempdir");

    let first = initialize(dir.path());
    let second = initialize(dir.path());

    assert!(first.is_ok(), "first initialization should succeed");
    assert!(second.is_ok(), "second initialization should be a no-op");
}
