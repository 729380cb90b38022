//! Embedded database migrations
//!
//! All schema statements are embedded into the binary so the deployed
//! artifact is a single file with no external migration directory.

use crate::db::DbPool;

/// All migrations in order, each as (name, sql_content)
pub const MIGRATIONS: &[(&str, &str)] = &[(
    "001_create_store.sql",
    "CREATE TABLE IF NOT EXISTS store (
        key TEXT PRIMARY KEY,
        value TEXT NOT NULL,
        updated_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP
    );",
)];

/// Run all pending migrations on the database pool.
///
/// Applied migrations are tracked in a `_migrations` table so each one
/// runs exactly once per database file.
pub fn run_migrations(pool: &DbPool) -> anyhow::Result<()> {
    tracing::info!("Running migrations...");

    let conn = pool.get()?;

    conn.execute(
        "CREATE TABLE IF NOT EXISTS _migrations (
            name TEXT PRIMARY KEY,
            applied_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP
        )",
        [],
    )?;

    for (name, sql) in MIGRATIONS {
        let already_applied: bool = conn
            .query_row(
                "SELECT COUNT(*) > 0 FROM _migrations WHERE name = ?",
                [name],
                |row| row.get(0),
            )
            .unwrap_or(false);

        if already_applied {
            tracing::debug!("Skipping already applied migration: {}", name);
            continue;
        }

        tracing::info!("Running migration: {}", name);

        conn.execute_batch(sql)?;
        conn.execute("INSERT INTO _migrations (name) VALUES (?)", [name])?;
    }

    tracing::info!("Migrations completed");
    Ok(())
}

/// Run migrations for tests, panicking on failure.
pub fn run_migrations_for_tests(pool: &DbPool) -> anyhow::Result<()> {
    run_migrations(pool)
}
