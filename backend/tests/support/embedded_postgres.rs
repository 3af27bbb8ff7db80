//! Embedded PostgreSQL bootstrap for integration tests.
//!
//! One cluster is shared per test binary. A template database carrying the
//! embedded migrations is created once per migration-set hash, and each test
//! clones it into a throwaway database.

use std::path::PathBuf;
use std::sync::{Mutex, OnceLock};
use std::time::Duration;

use contacts_backend::outbound::persistence::MIGRATIONS;
use diesel::Connection;
use diesel::pg::PgConnection;
use diesel_migrations::MigrationHarness;
use pg_embedded_setup_unpriv::test_support::hash_directory;
use pg_embedded_setup_unpriv::{ClusterHandle, TemporaryDatabase};
use uuid::Uuid;

static TEMPLATE_LOCK: OnceLock<Mutex<()>> = OnceLock::new();

const TEMPLATE_NAME_PREFIX: &str = "contacts_template";
const RETRIES: usize = 5;
const RETRY_DELAY: Duration = Duration::from_millis(500);

/// Return the process-wide cluster, retrying transient bootstrap failures.
pub fn shared_cluster_handle() -> Result<&'static ClusterHandle, String> {
    ensure_stable_password();
    let mut last_error = String::new();
    for attempt in 1..=RETRIES {
        match pg_embedded_setup_unpriv::test_support::shared_cluster_handle() {
            Ok(handle) => return Ok(handle),
            Err(err) => last_error = format!("attempt {attempt}/{RETRIES}: {err:?}"),
        }
        std::thread::sleep(RETRY_DELAY);
    }
    Err(last_error)
}

/// Pin `PG_PASSWORD` so a reused data directory keeps accepting logins.
fn ensure_stable_password() {
    if std::env::var_os("PG_PASSWORD").is_none() {
        // SAFETY: runs before the cluster singleton spawns any threads.
        unsafe {
            std::env::set_var("PG_PASSWORD", "contacts_embedded_test");
        }
    }
}

fn migrations_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("migrations")
}

fn template_database_name() -> Result<String, String> {
    let hash = hash_directory(migrations_dir()).map_err(|err| format!("hash migrations: {err}"))?;
    let short_hash = hash.get(..8).unwrap_or(&hash);
    Ok(format!("{TEMPLATE_NAME_PREFIX}_{short_hash}"))
}

/// Apply every embedded migration to the database at `url`.
pub fn migrate_schema(url: &str) -> Result<(), String> {
    let mut conn = PgConnection::establish(url).map_err(|err| format!("connect: {err}"))?;
    conn.run_pending_migrations(MIGRATIONS)
        .map_err(|err| format!("migration: {err}"))?;
    Ok(())
}

fn ensure_template_database(cluster: &ClusterHandle) -> Result<String, String> {
    let template_name = template_database_name()?;
    let _lock = TEMPLATE_LOCK
        .get_or_init(|| Mutex::new(()))
        .lock()
        .unwrap_or_else(|err| err.into_inner());

    let exists = cluster
        .database_exists(template_name.as_str())
        .map_err(|err| format!("template check: {err:?}"))?;
    if !exists {
        cluster
            .create_database(template_name.as_str())
            .map_err(|err| format!("create template: {err:?}"))?;
        migrate_schema(&cluster.connection().database_url(&template_name))?;
    }
    Ok(template_name)
}

/// Clone the migrated template into a fresh database for one test.
pub fn provision_template_database(cluster: &ClusterHandle) -> Result<TemporaryDatabase, String> {
    let mut last_error = String::new();
    for attempt in 1..=RETRIES {
        let result = ensure_template_database(cluster).and_then(|template| {
            let name = format!("test_{}", Uuid::new_v4().simple());
            cluster
                .temporary_database_from_template(name.as_str(), template.as_str())
                .map_err(|err| format!("clone template: {err:?}"))
        });
        match result {
            Ok(database) => return Ok(database),
            Err(err) => last_error = format!("attempt {attempt}/{RETRIES}: {err}"),
        }
        std::thread::sleep(RETRY_DELAY);
    }
    Err(last_error)
}
