//! Shared embedded PostgreSQL helpers for integration tests.
//!
//! - Each test gets a temporary database cloned from a template that already
//!   has the embedded Diesel migrations applied, keyed by a hash of the
//!   migrations directory so schema changes produce a fresh template.
//! - Table teardown uses `postgres` directly to simulate schema loss.

use std::path::PathBuf;
use std::sync::{Mutex, OnceLock};
use std::time::Duration;

use pg_embedded_setup_unpriv::test_support::hash_directory;
use pg_embedded_setup_unpriv::{ClusterHandle, TemporaryDatabase};
use postgres::{Client, NoTls};
use registry::outbound::persistence::run_pending_migrations;
use uuid::Uuid;

use super::format_postgres_error;

static TEMPLATE_LOCK: OnceLock<Mutex<()>> = OnceLock::new();

const TEMPLATE_NAME_PREFIX: &str = "registry_template";
const TEMPLATE_PROVISION_RETRIES: usize = 5;
const TEMPLATE_PROVISION_RETRY_DELAY: Duration = Duration::from_millis(500);

/// Failure while preparing a test database.
#[derive(Debug, thiserror::Error)]
#[error("{0}")]
pub struct SetupError(pub String);

fn migrations_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("migrations")
}

fn template_database_name() -> Result<String, SetupError> {
    let hash = hash_directory(migrations_dir())
        .map_err(|err| SetupError(format!("hash migrations: {err}")))?;
    let short_hash = hash.get(..8).unwrap_or(&hash);
    Ok(format!("{TEMPLATE_NAME_PREFIX}_{short_hash}"))
}

fn new_test_database_name() -> String {
    format!("test_{}", Uuid::new_v4().simple())
}

/// Create or reuse the template database with every migration applied.
fn ensure_template_database(cluster: &ClusterHandle) -> Result<String, SetupError> {
    let template_name = template_database_name()?;
    let _lock = TEMPLATE_LOCK
        .get_or_init(|| Mutex::new(()))
        .lock()
        .unwrap_or_else(|err| err.into_inner());

    let exists = cluster
        .database_exists(template_name.as_str())
        .map_err(|err| SetupError(format!("template check: {err:?}")))?;

    if !exists {
        cluster
            .create_database(template_name.as_str())
            .map_err(|err| SetupError(format!("create template: {err:?}")))?;

        let url = cluster.connection().database_url(&template_name);
        run_pending_migrations(&url).map_err(|err| SetupError(format!("migration: {err}")))?;
    }

    Ok(template_name)
}

fn provision_attempt(cluster: &ClusterHandle, attempt: usize) -> Result<TemporaryDatabase, SetupError> {
    let template_name = ensure_template_database(cluster).map_err(|error| {
        SetupError(format!(
            "attempt {attempt}/{TEMPLATE_PROVISION_RETRIES}: {error}"
        ))
    })?;
    cluster
        .temporary_database_from_template(new_test_database_name().as_str(), template_name.as_str())
        .map_err(|error| {
            SetupError(format!(
                "create database from template: attempt {attempt}/{TEMPLATE_PROVISION_RETRIES}: {error:?}"
            ))
        })
}

/// Provision a temporary database cloned from the migration template.
pub fn provision_template_database(
    cluster: &ClusterHandle,
) -> Result<TemporaryDatabase, SetupError> {
    let mut last_error = None;
    for attempt in 1..=TEMPLATE_PROVISION_RETRIES {
        match provision_attempt(cluster, attempt) {
            Ok(database) => return Ok(database),
            Err(error) => last_error = Some(error),
        }
        if attempt < TEMPLATE_PROVISION_RETRIES {
            std::thread::sleep(TEMPLATE_PROVISION_RETRY_DELAY);
        }
    }

    Err(last_error
        .unwrap_or_else(|| SetupError("create database from template: exhausted retries".into())))
}

/// Drop `table` (with CASCADE) to simulate a broken schema.
pub fn drop_table(url: &str, table: &str) -> Result<(), SetupError> {
    let mut client =
        Client::connect(url, NoTls).map_err(|err| SetupError(format_postgres_error(&err)))?;
    let escaped = table.replace('"', "\"\"");
    client
        .batch_execute(&format!(r#"DROP TABLE IF EXISTS "{escaped}" CASCADE"#))
        .map_err(|err| SetupError(format_postgres_error(&err)))
}
