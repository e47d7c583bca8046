//! Storage layer for clientbook.
//!
//! This module provides `SQLite`-based persistent storage for client
//! records. [`Storage`] is the synchronous engine; [`RecordStore`] is the
//! shared asynchronous handle the rest of the crate talks to.

pub mod migrations;
pub mod schema;
mod store;

use std::path::{Path, PathBuf};

use rusqlite::{params, Connection, OptionalExtension};
use tracing::{debug, info};

use crate::client::{ClientRecord, NewClient};
use crate::error::{Error, Result};
use crate::validate::check_client;

pub use store::{ClientRepository, RecordStore};

/// Storage engine for client records.
///
/// Every method runs a single statement, so each call is its own
/// transaction.
#[derive(Debug)]
pub struct Storage {
    /// Path to the database file.
    path: PathBuf,
    /// Database connection.
    conn: Connection,
}

impl Storage {
    /// Open or create a storage database at the given path.
    ///
    /// Creates the parent directories and database file if they don't exist.
    /// Initializes the schema if this is a new database.
    ///
    /// # Errors
    ///
    /// Returns [`Error::StoreOpen`] if the database cannot be opened or its
    /// schema cannot be created, and [`Error::SchemaVersion`] if it was
    /// written by a newer schema.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                std::fs::create_dir_all(parent).map_err(|source| Error::DirectoryCreate {
                    path: parent.to_path_buf(),
                    source,
                })?;
            }
        }

        debug!("Opening client store at {}", path.display());
        let conn = Connection::open(&path).map_err(|source| Error::StoreOpen {
            path: path.clone(),
            source,
        })?;

        conn.execute_batch("PRAGMA journal_mode=WAL; PRAGMA synchronous=NORMAL;")
            .map_err(|source| Error::StoreOpen {
                path: path.clone(),
                source,
            })?;

        let storage = Self::initialize(path, conn)?;
        info!("Client store opened at {}", storage.path.display());
        Ok(storage)
    }

    /// Create an in-memory storage instance for testing.
    ///
    /// # Errors
    ///
    /// Returns an error if the in-memory database cannot be created.
    pub fn open_in_memory() -> Result<Self> {
        let path = PathBuf::from(":memory:");
        let conn = Connection::open_in_memory().map_err(|source| Error::StoreOpen {
            path: path.clone(),
            source,
        })?;

        Self::initialize(path, conn)
    }

    fn initialize(path: PathBuf, conn: Connection) -> Result<Self> {
        migrations::initialize_schema(&conn).map_err(|err| match err {
            Error::StoreRead { source, .. } | Error::StoreWrite { source, .. } => {
                Error::StoreOpen {
                    path: path.clone(),
                    source,
                }
            }
            other => other,
        })?;
        Ok(Self { path, conn })
    }

    /// Get the path to the database file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Insert a new client and return the id assigned to it.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`] if any field is blank or malformed, or
    /// [`Error::StoreWrite`] if the insert fails. Nothing is stored on error.
    pub fn insert(&self, client: &NewClient) -> Result<i64> {
        check_client(client)?;

        self.conn
            .execute(
                r"
                INSERT INTO clients (name, email, phone, company_code)
                VALUES (?1, ?2, ?3, ?4)
                ",
                params![client.name, client.email, client.phone, client.company_code],
            )
            .map_err(|e| Error::store_write("save the client", e))?;

        let id = self.conn.last_insert_rowid();
        debug!("Inserted client with id {}", id);
        Ok(id)
    }

    /// Get a client by its id.
    ///
    /// # Errors
    ///
    /// Returns [`Error::StoreRead`] if the database operation fails. A
    /// missing id is `Ok(None)`.
    pub fn get(&self, id: i64) -> Result<Option<ClientRecord>> {
        self.conn
            .query_row(
                r"
                SELECT id, name, email, phone, company_code
                FROM clients WHERE id = ?1
                ",
                [id],
                Self::row_to_client,
            )
            .optional()
            .map_err(|e| Error::store_read("find the client", e))
    }

    /// Get every stored client.
    ///
    /// Rows come back in id order, but callers should not rely on it.
    ///
    /// # Errors
    ///
    /// Returns [`Error::StoreRead`] if the database operation fails.
    pub fn list_all(&self) -> Result<Vec<ClientRecord>> {
        let read_err = |e: rusqlite::Error| Error::store_read("list the clients", e);

        let mut stmt = self
            .conn
            .prepare(
                r"
                SELECT id, name, email, phone, company_code
                FROM clients ORDER BY id
                ",
            )
            .map_err(read_err)?;

        let clients = stmt
            .query_map([], Self::row_to_client)
            .map_err(read_err)?
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(read_err)?;

        Ok(clients)
    }

    /// Replace every field of an existing client.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ClientNotFound`] if no client has this id (no row is
    /// created), [`Error::Validation`] for a malformed field, or
    /// [`Error::StoreWrite`] if the update fails.
    pub fn update(&self, record: &ClientRecord) -> Result<()> {
        check_client(&record.to_new_client())?;

        let affected = self
            .conn
            .execute(
                r"
                UPDATE clients
                SET name = ?2, email = ?3, phone = ?4, company_code = ?5,
                    updated_at = datetime('now')
                WHERE id = ?1
                ",
                params![
                    record.id,
                    record.name,
                    record.email,
                    record.phone,
                    record.company_code,
                ],
            )
            .map_err(|e| Error::store_write("update the client", e))?;

        if affected == 0 {
            return Err(Error::ClientNotFound { id: record.id });
        }
        debug!("Updated client {}", record.id);
        Ok(())
    }

    /// Delete a client by id.
    ///
    /// Returns `true` if a client was deleted, `false` if there was none.
    /// Both are successes.
    ///
    /// # Errors
    ///
    /// Returns [`Error::StoreWrite`] if the database operation fails.
    pub fn delete(&self, id: i64) -> Result<bool> {
        let affected = self
            .conn
            .execute("DELETE FROM clients WHERE id = ?1", [id])
            .map_err(|e| Error::store_write("delete the client", e))?;
        debug!("Delete of client {} removed {} row(s)", id, affected);
        Ok(affected > 0)
    }

    /// Count stored clients.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub fn count(&self) -> Result<i64> {
        self.conn
            .query_row("SELECT COUNT(*) FROM clients", [], |row| row.get(0))
            .map_err(|e| Error::store_read("count the clients", e))
    }

    /// Get database statistics.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub fn stats(&self) -> Result<StorageStats> {
        let total_clients = self.count()?;

        // sqlite_sequence only gets a row after the first insert.
        let last_assigned_id: i64 = self
            .conn
            .query_row(
                "SELECT seq FROM sqlite_sequence WHERE name = ?1",
                [schema::CLIENTS_TABLE],
                |row| row.get(0),
            )
            .optional()
            .map_err(|e| Error::store_read("read the id sequence", e))?
            .unwrap_or(0);

        let db_size_bytes = if self.path.to_string_lossy() == ":memory:" {
            0
        } else {
            std::fs::metadata(&self.path).map(|m| m.len()).unwrap_or(0)
        };

        Ok(StorageStats {
            total_clients,
            last_assigned_id,
            db_size_bytes,
        })
    }

    /// Convert a database row to a `ClientRecord`.
    fn row_to_client(row: &rusqlite::Row) -> rusqlite::Result<ClientRecord> {
        Ok(ClientRecord {
            id: row.get(0)?,
            name: row.get(1)?,
            email: row.get(2)?,
            phone: row.get(3)?,
            company_code: row.get(4)?,
        })
    }
}

/// Statistics about the storage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageStats {
    /// Total number of clients stored.
    pub total_clients: i64,
    /// Highest id ever assigned, including deleted clients.
    pub last_assigned_id: i64,
    /// Size of the database file in bytes.
    pub db_size_bytes: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_storage() -> Storage {
        Storage::open_in_memory().expect("failed to create test storage")
    }

    fn client(name: &str) -> NewClient {
        NewClient::new(name, "client@example.com", "612345678", "123456")
    }

    #[test]
    fn test_open_in_memory() {
        let storage = Storage::open_in_memory();
        assert!(storage.is_ok());
    }

    #[test]
    fn test_insert_and_get() {
        let storage = create_test_storage();
        let new = client("Ana Lopez");

        let id = storage.insert(&new).unwrap();
        let retrieved = storage.get(id).unwrap().expect("client should exist");

        assert_eq!(retrieved, new.with_id(id));
    }

    #[test]
    fn test_ids_start_at_one_and_increase() {
        let storage = create_test_storage();
        let first = storage.insert(&client("Ana")).unwrap();
        let second = storage.insert(&client("Bea")).unwrap();

        assert_eq!(first, 1);
        assert_eq!(second, 2);
    }

    #[test]
    fn test_ids_are_not_reused_after_delete() {
        let storage = create_test_storage();
        storage.insert(&client("Ana")).unwrap();
        let last = storage.insert(&client("Bea")).unwrap();
        assert!(storage.delete(last).unwrap());

        let next = storage.insert(&client("Cris")).unwrap();
        assert_eq!(next, last + 1);
    }

    #[test]
    fn test_insert_rejects_invalid_client() {
        let storage = create_test_storage();
        let mut bad = client("Ana");
        bad.email = "not-an-email".to_string();

        let err = storage.insert(&bad).unwrap_err();
        assert!(matches!(err, Error::Validation { .. }));
        assert_eq!(storage.count().unwrap(), 0);
    }

    #[test]
    fn test_get_nonexistent() {
        let storage = create_test_storage();
        assert!(storage.get(99999).unwrap().is_none());
    }

    #[test]
    fn test_list_all_grows_by_one() {
        let storage = create_test_storage();
        storage.insert(&client("Ana")).unwrap();
        let before = storage.list_all().unwrap();

        let id = storage.insert(&client("Bea")).unwrap();
        let after = storage.list_all().unwrap();

        assert_eq!(after.len(), before.len() + 1);
        assert_eq!(after.iter().filter(|c| c.id == id).count(), 1);
    }

    #[test]
    fn test_list_all_empty() {
        let storage = create_test_storage();
        assert!(storage.list_all().unwrap().is_empty());
    }

    #[test]
    fn test_update_replaces_fields() {
        let storage = create_test_storage();
        let id = storage.insert(&client("Ana")).unwrap();

        let updated = NewClient::new("Ana Maria", "ana@work.es", "+34 712 345 678", "654321")
            .with_id(id);
        storage.update(&updated).unwrap();

        assert_eq!(storage.get(id).unwrap(), Some(updated));
        assert_eq!(storage.count().unwrap(), 1);
    }

    #[test]
    fn test_update_missing_id_fails_without_creating() {
        let storage = create_test_storage();
        let ghost = client("Ghost").with_id(42);

        let err = storage.update(&ghost).unwrap_err();
        assert!(matches!(err, Error::ClientNotFound { id: 42 }));
        assert_eq!(storage.count().unwrap(), 0);
    }

    #[test]
    fn test_update_rejects_invalid_client() {
        let storage = create_test_storage();
        let id = storage.insert(&client("Ana")).unwrap();
        let mut record = storage.get(id).unwrap().unwrap();
        record.company_code = "12".to_string();

        assert!(matches!(
            storage.update(&record),
            Err(Error::Validation { .. })
        ));
        assert_eq!(storage.get(id).unwrap().unwrap().company_code, "123456");
    }

    #[test]
    fn test_delete_is_idempotent() {
        let storage = create_test_storage();
        let id = storage.insert(&client("Ana")).unwrap();

        assert!(storage.delete(id).unwrap());
        assert!(!storage.delete(id).unwrap());
        assert!(storage.get(id).unwrap().is_none());
    }

    #[test]
    fn test_stats() {
        let storage = create_test_storage();
        let empty = storage.stats().unwrap();
        assert_eq!(empty.total_clients, 0);
        assert_eq!(empty.last_assigned_id, 0);
        assert_eq!(empty.db_size_bytes, 0);

        let id = storage.insert(&client("Ana")).unwrap();
        storage.delete(id).unwrap();
        let stats = storage.stats().unwrap();
        assert_eq!(stats.total_clients, 0);
        assert_eq!(stats.last_assigned_id, id);
    }

    #[test]
    fn test_open_file_creates_parent_dirs() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("nested").join("clients.db");

        let storage = Storage::open(&path).unwrap();
        let id = storage.insert(&client("Ana")).unwrap();
        drop(storage);

        let reopened = Storage::open(&path).unwrap();
        assert_eq!(reopened.path(), path.as_path());
        assert!(reopened.get(id).unwrap().is_some());
        assert!(reopened.stats().unwrap().db_size_bytes > 0);
    }

    #[test]
    fn test_open_directory_fails_with_store_open() {
        let dir = tempfile::TempDir::new().unwrap();
        let err = Storage::open(dir.path()).unwrap_err();
        assert!(err.is_fatal(), "unexpected error: {err}");
    }
}
