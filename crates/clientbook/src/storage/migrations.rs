//! Schema versioning for the client store.
//!
//! The store has a single schema version. Opening a database creates the
//! clients collection if it is absent and stamps the version; a database
//! stamped with a newer version is refused.

use rusqlite::{Connection, OptionalExtension};
use tracing::info;

use crate::error::{Error, Result};

use super::schema::SCHEMA_STATEMENTS;

/// The current schema version.
pub const CURRENT_VERSION: i32 = 1;

/// Key used to store the schema version in the metadata table.
const VERSION_KEY: &str = "schema_version";

/// Initialize the database schema.
///
/// Creates the tables if they don't exist, then records the schema version
/// on a fresh database.
///
/// # Errors
///
/// Returns an error if schema creation fails or the database was written by
/// a newer schema.
pub fn initialize_schema(conn: &Connection) -> Result<()> {
    for statement in SCHEMA_STATEMENTS {
        conn.execute(statement, [])
            .map_err(|e| Error::store_write("create the client store", e))?;
    }

    let version = get_schema_version(conn)?;
    match version {
        0 => {
            set_schema_version(conn, CURRENT_VERSION)?;
            info!("Created client store schema v{}", CURRENT_VERSION);
            Ok(())
        }
        CURRENT_VERSION => Ok(()),
        found => Err(Error::SchemaVersion {
            found,
            supported: CURRENT_VERSION,
        }),
    }
}

/// Get the current schema version from the database.
///
/// Returns 0 if no version is set (fresh database).
fn get_schema_version(conn: &Connection) -> Result<i32> {
    let value: Option<String> = conn
        .query_row(
            "SELECT value FROM metadata WHERE key = ?1",
            [VERSION_KEY],
            |row| row.get(0),
        )
        .optional()
        .map_err(|e| Error::store_read("read the schema version", e))?;

    match value {
        Some(value) => value.parse().map_err(|_| {
            Error::internal(format!("invalid schema version in metadata: {value}"))
        }),
        None => Ok(0),
    }
}

/// Set the schema version in the database.
fn set_schema_version(conn: &Connection, version: i32) -> Result<()> {
    conn.execute(
        "INSERT OR REPLACE INTO metadata (key, value) VALUES (?1, ?2)",
        (VERSION_KEY, version.to_string()),
    )
    .map_err(|e| Error::store_write("record the schema version", e))?;
    Ok(())
}
