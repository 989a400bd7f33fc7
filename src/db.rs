// src/db.rs
use crate::error::{PlaygroundError, Result};
use rusqlite::Connection;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

// Full path to the database file. It lives next to the executable so the
// playground state travels with a portable install.
pub fn get_db_path(db_file_name: &str) -> Result<PathBuf> {
    let exe_path = env::current_exe()
        .map_err(|e| PlaygroundError::Storage(format!("Failed to get current executable path: {}", e)))?;

    let exe_dir = exe_path.parent().ok_or_else(|| {
        PlaygroundError::Storage(format!(
            "Failed to get parent directory of executable: {}",
            exe_path.display()
        ))
    })?;

    if !exe_dir.exists() {
        fs::create_dir_all(exe_dir).map_err(|e| PlaygroundError::io(exe_dir, e))?;
    }

    Ok(exe_dir.join(db_file_name))
}

pub fn init_connection(db_path: &Path) -> Result<Connection> {
    info!("[DB] Database path: {}", db_path.display());
    Ok(Connection::open(db_path)?)
}

// Creates the key-value table if it doesn't exist.
pub fn init_db_tables(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS playground_kv (
            key TEXT PRIMARY KEY NOT NULL,
            value TEXT NOT NULL,
            updated_at TEXT
        );
        "#,
    )?;
    info!("[DB] Database tables initialized successfully.");
    Ok(())
}

pub fn open_database(db_path: &Path) -> Result<Connection> {
    let conn = init_connection(db_path)?;
    init_db_tables(&conn)?;
    Ok(conn)
}
