//! Database Connection and Setup
//!
//! Opens the SQLite database and makes sure the schema is present.

use rusqlite::Connection;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;

use crate::domain::{DomainError, DomainResult};

impl From<rusqlite::Error> for DomainError {
    fn from(err: rusqlite::Error) -> Self {
        DomainError::Internal(err.to_string())
    }
}

/// Database state wrapper
#[derive(Clone)]
pub struct DbState {
    conn: Arc<Mutex<Connection>>,
}

impl DbState {
    /// Shared connection handle for repositories
    pub fn connection(&self) -> Arc<Mutex<Connection>> {
        Arc::clone(&self.conn)
    }
}

/// Open the database at `db_path` (`:memory:` for an in-memory database)
pub async fn init_db(db_path: &Path) -> DomainResult<DbState> {
    let conn = Connection::open(db_path)
        .map_err(|e| DomainError::Internal(format!("Failed to open {}: {}", db_path.display(), e)))?;

    conn.busy_timeout(Duration::from_secs(5))?;
    if db_path != Path::new(":memory:") {
        let mode: String = conn.query_row("PRAGMA journal_mode = WAL", [], |row| row.get(0))?;
        tracing::debug!(journal_mode = %mode, "sqlite journal mode set");
    }

    run_migrations(&conn)?;
    tracing::info!(path = %db_path.display(), "database ready");

    Ok(DbState {
        conn: Arc::new(Mutex::new(conn)),
    })
}

/// Check if a column exists in a table
fn column_exists(conn: &Connection, table: &str, column: &str) -> DomainResult<bool> {
    let mut stmt = conn.prepare(&format!("PRAGMA table_info({})", table))?;
    let names = stmt.query_map([], |row| row.get::<_, String>(1))?;
    for name in names {
        if name? == column {
            return Ok(true);
        }
    }
    Ok(false)
}

/// Create tables and add columns introduced after the first release
fn run_migrations(conn: &Connection) -> DomainResult<()> {
    conn.execute(
        "CREATE TABLE IF NOT EXISTS members (
            id TEXT PRIMARY KEY NOT NULL,
            name TEXT NOT NULL,
            role TEXT NOT NULL,
            team TEXT NOT NULL,
            bio TEXT,
            email TEXT,
            display_order INTEGER NOT NULL DEFAULT 0 CHECK (display_order >= 0),
            created_at INTEGER NOT NULL,
            updated_at INTEGER NOT NULL
        )",
        (),
    )?;

    if !column_exists(conn, "members", "image_url")? {
        conn.execute("ALTER TABLE members ADD COLUMN image_url TEXT", ())
            .map_err(|e| DomainError::Internal(format!("Failed to add image_url: {}", e)))?;
    }

    conn.execute(
        "CREATE INDEX IF NOT EXISTS idx_members_display_order ON members(display_order)",
        (),
    )?;

    Ok(())
}
