//! Embedded PostgreSQL provisioning for repository suites.
//!
//! One shared cluster per test binary. Each test gets its own database
//! cloned from a template that already has the embedded migrations applied,
//! so suites never see each other's rows and never drift from the schema
//! the server runs.

use std::path::PathBuf;
use std::sync::{Mutex, OnceLock};
use std::time::Duration;

use alumni_connect::domain::User;
use alumni_connect::outbound::persistence::MIGRATIONS;
use diesel::Connection;
use diesel::pg::PgConnection;
use diesel_migrations::MigrationHarness;
use pg_embedded_setup_unpriv::test_support::hash_directory;
use pg_embedded_setup_unpriv::{ClusterHandle, TemporaryDatabase};
use postgres::{Client, NoTls};
use uuid::Uuid;

use super::format_postgres_error;

static TEMPLATE_LOCK: OnceLock<Mutex<()>> = OnceLock::new();

const TEMPLATE_NAME_PREFIX: &str = "alumni_template";
const CLUSTER_RETRIES: usize = 5;
const RETRY_DELAY: Duration = Duration::from_millis(500);

/// Shared cluster for this test binary, retrying transient start-up failures.
pub fn shared_cluster() -> Result<&'static ClusterHandle, String> {
    let mut last_error = String::new();
    for attempt in 1..=CLUSTER_RETRIES {
        match pg_embedded_setup_unpriv::test_support::shared_cluster_handle() {
            Ok(handle) => return Ok(handle),
            Err(error) => last_error = format!("attempt {attempt}/{CLUSTER_RETRIES}: {error:?}"),
        }
        std::thread::sleep(RETRY_DELAY);
    }
    Err(last_error)
}

fn migrations_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("migrations")
}

fn template_database_name() -> Result<String, String> {
    let hash = hash_directory(migrations_dir()).map_err(|err| format!("hash migrations: {err}"))?;
    let short_hash = hash.get(..8).unwrap_or(&hash);
    Ok(format!("{TEMPLATE_NAME_PREFIX}_{short_hash}"))
}

fn migrate_schema(url: &str) -> Result<(), String> {
    let mut conn = PgConnection::establish(url).map_err(|err| format!("connect: {err}"))?;
    conn.run_pending_migrations(MIGRATIONS)
        .map_err(|err| format!("migrate: {err}"))?;
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

/// Fresh migrated database, dropped when the handle goes out of scope.
pub fn provision_database(cluster: &ClusterHandle) -> Result<TemporaryDatabase, String> {
    let template_name = ensure_template_database(cluster)?;
    let db_name = format!("test_{}", Uuid::new_v4().simple());
    cluster
        .temporary_database_from_template(db_name.as_str(), template_name.as_str())
        .map_err(|err| format!("create database from template: {err:?}"))
}

/// Insert identity rows directly; the service itself never writes users.
pub fn seed_users(url: &str, users: &[User]) -> Result<(), String> {
    let mut client = Client::connect(url, NoTls).map_err(|err| format_postgres_error(&err))?;
    for user in users {
        let role = user.role().as_str();
        client
            .execute(
                "INSERT INTO users (id, name, email, role) VALUES ($1, $2, $3, $4)",
                &[user.id().as_uuid(), &user.name(), &user.email(), &role],
            )
            .map_err(|err| format_postgres_error(&err))?;
    }
    Ok(())
}

/// Drop the status table to simulate schema loss.
pub fn drop_status_table(url: &str) -> Result<(), String> {
    let mut client = Client::connect(url, NoTls).map_err(|err| format_postgres_error(&err))?;
    client
        .batch_execute("DROP TABLE IF EXISTS application_statuses;")
        .map_err(|err| format_postgres_error(&err))
}
