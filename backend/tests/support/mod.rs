//! Helpers for suites that run against embedded PostgreSQL.
//!
//! Setting `SKIP_TEST_CLUSTER` to `1`, `true`, or `yes` turns a failed cluster
//! start into a skipped test instead of a panic.

pub mod embedded_postgres;

pub use embedded_postgres::{provision_database, shared_cluster};

const SKIP_ENV: &str = "SKIP_TEST_CLUSTER";

fn skip_requested() -> bool {
    std::env::var(SKIP_ENV).is_ok_and(|value| {
        ["1", "true", "yes"]
            .iter()
            .any(|accepted| value.eq_ignore_ascii_case(accepted))
    })
}

/// `None` when skipping is allowed; panics otherwise so CI never silently
/// loses database coverage.
pub fn handle_cluster_setup_failure<T>(reason: impl std::fmt::Display) -> Option<T> {
    assert!(
        skip_requested(),
        "embedded PostgreSQL unavailable: {reason}. Set {SKIP_ENV}=1 to skip."
    );
    eprintln!("SKIP-TEST-CLUSTER: {reason}");
    None
}

/// `postgres::Error` displays database failures as a bare `db error`; pull
/// the SQLSTATE and server message out instead.
pub fn format_postgres_error(error: &postgres::Error) -> String {
    error.as_db_error().map_or_else(
        || error.to_string(),
        |db| {
            let mut rendered = format!("{} ({})", db.message(), db.code().code());
            if let Some(detail) = db.detail() {
                rendered.push_str(": ");
                rendered.push_str(detail);
            }
            rendered
        },
    )
}
