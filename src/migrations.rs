//! Versioned schema migrations for the `pets` table.
//!
//! Migrations are applied in order and recorded in `schema_migrations`.
//! A version that is already recorded is skipped, so the history can only
//! grow: append new entries to [`MIGRATIONS`], never edit applied ones.

use std::collections::HashSet;

use tokio_postgres::Client;
use tracing::{debug, error, info};

use crate::error::ApiError;

/// A single named migration
#[derive(Debug)]
pub struct Migration {
    pub version: &'static str,
    pub sql: &'static str,
}

/// All migrations in order
pub const MIGRATIONS: &[Migration] = &[
    Migration {
        version: "001_create_pets",
        sql: r#"
            CREATE TABLE IF NOT EXISTS pets (
                id SERIAL PRIMARY KEY,
                name VARCHAR(100) NOT NULL,
                species VARCHAR(100) NOT NULL
            )
        "#,
    },
    Migration {
        version: "002_index_pets_species",
        sql: "CREATE INDEX IF NOT EXISTS idx_pets_species ON pets(species)",
    },
];

const CREATE_TRACKING_TABLE: &str = r#"
    CREATE TABLE IF NOT EXISTS schema_migrations (
        version TEXT PRIMARY KEY,
        applied_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
    )
"#;

/// Apply every pending migration, returning how many were applied
pub async fn run(client: &mut Client) -> Result<usize, ApiError> {
    info!("Running database migrations");

    client.batch_execute(CREATE_TRACKING_TABLE)
        .await
        .map_err(|e| {
            error!("Failed to create schema_migrations table: {}", e);
            ApiError::Database(format!("Migration tracking table creation failed: {}", e))
        })?;

    let rows = client
        .query("SELECT version FROM schema_migrations", &[])
        .await
        .map_err(ApiError::from)?;
    let applied_versions: HashSet<String> = rows.iter().map(|row| row.get::<_, String>(0)).collect();

    let to_apply = pending(MIGRATIONS, &applied_versions);
    debug!(
        already_applied = MIGRATIONS.len() - to_apply.len(),
        "skipping recorded migrations"
    );

    for migration in &to_apply {
        info!(migration = migration.version, "applying migration");

        let tx = client.transaction().await.map_err(ApiError::from)?;

        tx.batch_execute(migration.sql)
            .await
            .map_err(|e| {
                error!("Migration {} failed: {}", migration.version, e);
                ApiError::Database(format!("Migration {} failed: {}", migration.version, e))
            })?;

        tx.execute(
            "INSERT INTO schema_migrations (version) VALUES ($1)",
            &[&migration.version],
        )
        .await
        .map_err(ApiError::from)?;

        tx.commit().await.map_err(ApiError::from)?;
    }

    info!("Applied {} of {} migrations", to_apply.len(), MIGRATIONS.len());
    Ok(to_apply.len())
}

/// Migrations whose version is not yet recorded, in history order.
/// Recorded versions that no longer appear in `migrations` are ignored.
pub fn pending<'m>(migrations: &'m [Migration], applied: &HashSet<String>) -> Vec<&'m Migration> {
    migrations
        .iter()
        .filter(|m| !applied.contains(m.version))
        .collect()
}
