//! `SKIP_TEST_CLUSTER` policy for suites that need embedded PostgreSQL.
//!
//! CI must fail loudly when the cluster cannot start; local environments
//! without PostgreSQL binaries can opt out explicitly.

/// True when `SKIP_TEST_CLUSTER` is "1", "true", or "yes" (any case).
pub fn should_skip_test_cluster() -> bool {
    skip_requested(std::env::var("SKIP_TEST_CLUSTER").ok().as_deref())
}

fn skip_requested(flag: Option<&str>) -> bool {
    flag.is_some_and(|value| matches!(value.to_lowercase().as_str(), "1" | "true" | "yes"))
}

/// Return `None` with a skip marker when skipping is enabled; panic otherwise.
pub fn handle_cluster_setup_failure<T>(reason: impl std::fmt::Display) -> Option<T> {
    if should_skip_test_cluster() {
        eprintln!("SKIP-TEST-CLUSTER: {reason}");
        None
    } else {
        panic!("embedded PostgreSQL setup failed: {reason}. Set SKIP_TEST_CLUSTER=1 to skip.");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(Some("1"), true)]
    #[case(Some("TRUE"), true)]
    #[case(Some("yes"), true)]
    #[case(Some("0"), false)]
    #[case(Some(""), false)]
    #[case(None, false)]
    fn skip_flag_values(#[case] flag: Option<&str>, #[case] expected: bool) {
        assert_eq!(skip_requested(flag), expected);
    }
}
