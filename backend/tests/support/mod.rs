//! Shared helpers for backend integration tests.
//!
//! Each integration test compiles as its own crate, so suites pull these
//! helpers in with `mod support;`.

pub mod cluster_skip;
pub mod embedded_postgres;

pub use cluster_skip::handle_cluster_setup_failure;
pub use embedded_postgres::{provision_template_database, shared_cluster_handle};

/// Render a `postgres` error with its SQLSTATE and message.
///
/// `postgres::Error`'s `Display` collapses server errors to `db error`.
pub fn format_postgres_error(error: &postgres::Error) -> String {
    let Some(db_error) = error.as_db_error() else {
        return error.to_string();
    };

    let mut summary = format!(
        "postgres error {:?}: {}",
        db_error.code(),
        db_error.message()
    );
    if let Some(detail) = db_error.detail() {
        summary.push_str("; detail: ");
        summary.push_str(detail);
    }
    summary
}

/// Run a statement batch against `url` over a plain client connection.
pub fn execute_sql(url: &str, sql: &str) -> Result<(), String> {
    let mut client = postgres::Client::connect(url, postgres::NoTls)
        .map_err(|err| format_postgres_error(&err))?;
    client
        .batch_execute(sql)
        .map_err(|err| format_postgres_error(&err))
}
