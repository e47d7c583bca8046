//! Asynchronous access to the client store.
//!
//! A [`RecordStore`] owns the one database connection for the process. Each
//! operation is shipped to the blocking pool and runs as its own
//! transaction; two operations that are not awaited one after the other
//! carry no ordering guarantee between them.

use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tracing::debug;

use super::Storage;
use crate::client::{ClientRecord, NewClient};
use crate::error::{Error, Result};

/// The five operations the rest of the crate needs from a client store.
#[async_trait]
pub trait ClientRepository: Send + Sync {
    /// Insert a new client and return its assigned id.
    async fn create(&self, client: NewClient) -> Result<i64>;

    /// Fetch every client.
    async fn list_all(&self) -> Result<Vec<ClientRecord>>;

    /// Fetch one client; a missing id is `Ok(None)`.
    async fn get_by_id(&self, id: i64) -> Result<Option<ClientRecord>>;

    /// Replace the fields of an existing client.
    ///
    /// Fails with [`Error::ClientNotFound`] rather than creating a record.
    async fn update(&self, record: ClientRecord) -> Result<()>;

    /// Delete a client; deleting a missing id succeeds with `false`.
    async fn delete_by_id(&self, id: i64) -> Result<bool>;
}

/// Shared handle to the client store.
///
/// Cloning is cheap; every clone talks to the same connection.
#[derive(Debug, Clone)]
pub struct RecordStore {
    storage: Arc<Mutex<Storage>>,
    path: PathBuf,
}

impl RecordStore {
    /// Open (creating on first use) the store at the given path.
    ///
    /// # Errors
    ///
    /// Returns [`Error::StoreOpen`] if the engine rejects the open.
    pub async fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let open_path = path.clone();
        let storage = tokio::task::spawn_blocking(move || Storage::open(open_path))
            .await
            .map_err(|e| Error::internal(format!("store open task failed: {e}")))??;
        Ok(Self::from_storage(storage, path))
    }

    /// Open a throwaway in-memory store.
    ///
    /// # Errors
    ///
    /// Returns an error if the in-memory database cannot be created.
    pub async fn open_in_memory() -> Result<Self> {
        let storage = tokio::task::spawn_blocking(Storage::open_in_memory)
            .await
            .map_err(|e| Error::internal(format!("store open task failed: {e}")))??;
        Ok(Self::from_storage(storage, PathBuf::from(":memory:")))
    }

    fn from_storage(storage: Storage, path: PathBuf) -> Self {
        Self {
            storage: Arc::new(Mutex::new(storage)),
            path,
        }
    }

    /// Path of the underlying database.
    #[must_use]
    pub fn path(&self) -> &std::path::Path {
        &self.path
    }

    /// Run a closure against the engine on the blocking pool.
    ///
    /// # Errors
    ///
    /// Returns whatever the closure returns, or [`Error::Internal`] if the
    /// connection lock is poisoned or the task panics.
    pub async fn with_storage<T, F>(&self, operation: &'static str, f: F) -> Result<T>
    where
        F: FnOnce(&Storage) -> Result<T> + Send + 'static,
        T: Send + 'static,
    {
        let storage = Arc::clone(&self.storage);
        debug!(operation, "dispatching store operation");
        tokio::task::spawn_blocking(move || {
            let guard = storage
                .lock()
                .map_err(|_| Error::internal("client store lock poisoned"))?;
            f(&*guard)
        })
        .await
        .map_err(|e| Error::internal(format!("{operation} task failed: {e}")))?
    }
}

#[async_trait]
impl ClientRepository for RecordStore {
    async fn create(&self, client: NewClient) -> Result<i64> {
        self.with_storage("create", move |s| s.insert(&client)).await
    }

    async fn list_all(&self) -> Result<Vec<ClientRecord>> {
        self.with_storage("list_all", Storage::list_all).await
    }

    async fn get_by_id(&self, id: i64) -> Result<Option<ClientRecord>> {
        self.with_storage("get_by_id", move |s| s.get(id)).await
    }

    async fn update(&self, record: ClientRecord) -> Result<()> {
        self.with_storage("update", move |s| s.update(&record)).await
    }

    async fn delete_by_id(&self, id: i64) -> Result<bool> {
        self.with_storage("delete_by_id", move |s| s.delete(id)).await
    }
}
