//! `SKIP_TEST_CLUSTER` policy for suites that need embedded PostgreSQL.

/// Whether `SKIP_TEST_CLUSTER` is set to `1`, `true` or `yes` (any case).
pub fn should_skip_test_cluster() -> bool {
    std::env::var("SKIP_TEST_CLUSTER")
        .map(|value| matches!(value.to_lowercase().as_str(), "1" | "true" | "yes"))
        .unwrap_or(false)
}

/// Report a cluster bootstrap failure.
///
/// Returns `None` with a skip marker on stderr when skipping is enabled and
/// panics otherwise, so CI breakage is never silently ignored.
pub fn handle_cluster_setup_failure<T>(reason: impl std::fmt::Display) -> Option<T> {
    if should_skip_test_cluster() {
        eprintln!("SKIP-TEST-CLUSTER: {reason}");
        None
    } else {
        panic!("Test cluster setup failed: {reason}. Set SKIP_TEST_CLUSTER=1 to skip.");
    }
}
