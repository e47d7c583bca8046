//! Transfer buffer between the list view and the edit view.
//!
//! Choosing "edit" on a listed client parks that record in a single slot of
//! a small persistent key-value area. The edit view reads it on load and the
//! slot is cleared only after a successful update, so a failed update keeps
//! the edit context around for another try.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::client::ClientRecord;
use crate::error::{Error, Result};

/// Key of the slot holding the client being edited.
pub const TRANSFER_KEY: &str = "client_to_edit";

/// A persistent string-to-string key-value area.
pub trait KeyValueArea: Send + Sync {
    /// Read the value stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing store cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Store `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing store cannot be written.
    fn set(&mut self, key: &str, value: String) -> Result<()>;

    /// Remove `key` if present.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing store cannot be written.
    fn remove(&mut self, key: &str) -> Result<()>;
}

/// Key-value area held in memory only.
#[derive(Debug, Clone, Default)]
pub struct MemoryArea {
    entries: BTreeMap<String, String>,
}

impl MemoryArea {
    /// Create an empty area.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueArea for MemoryArea {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: String) -> Result<()> {
        self.entries.insert(key.to_string(), value);
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        self.entries.remove(key);
        Ok(())
    }
}

/// Key-value area persisted as a JSON object in a file.
///
/// The whole object is rewritten on every change.
#[derive(Debug, Clone)]
pub struct FileArea {
    path: PathBuf,
    entries: BTreeMap<String, String>,
}

impl FileArea {
    /// Open the area stored at `path`, starting empty if the file is absent.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let entries = match std::fs::read_to_string(&path) {
            Ok(text) if text.trim().is_empty() => BTreeMap::new(),
            Ok(text) => serde_json::from_str(&text)?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => BTreeMap::new(),
            Err(e) => return Err(e.into()),
        };
        debug!("Opened key-value area at {}", path.display());
        Ok(Self { path, entries })
    }

    /// Path of the backing file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn persist(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                std::fs::create_dir_all(parent).map_err(|source| Error::DirectoryCreate {
                    path: parent.to_path_buf(),
                    source,
                })?;
            }
        }
        let text = serde_json::to_string_pretty(&self.entries)?;
        std::fs::write(&self.path, text)?;
        Ok(())
    }
}

impl KeyValueArea for FileArea {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: String) -> Result<()> {
        self.entries.insert(key.to_string(), value);
        self.persist()
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        if self.entries.remove(key).is_some() {
            self.persist()?;
        }
        Ok(())
    }
}

/// Single-record hand-off slot.
#[derive(Debug)]
pub struct TransferBuffer<A> {
    area: A,
}

impl<A: KeyValueArea> TransferBuffer<A> {
    /// Create a buffer over the given area.
    pub fn new(area: A) -> Self {
        Self { area }
    }

    /// Park a record in the slot, replacing any previous occupant.
    ///
    /// # Errors
    ///
    /// Returns an error if the record cannot be serialized or stored.
    pub fn put(&mut self, record: &ClientRecord) -> Result<()> {
        let json = serde_json::to_string(record)?;
        self.area.set(TRANSFER_KEY, json)?;
        debug!(id = record.id, "client parked for editing");
        Ok(())
    }

    /// Read the parked record without removing it.
    ///
    /// A slot holding something that is not a client record reads as empty.
    ///
    /// # Errors
    ///
    /// Returns an error if the area cannot be read.
    pub fn take(&self) -> Result<Option<ClientRecord>> {
        let Some(json) = self.area.get(TRANSFER_KEY)? else {
            return Ok(None);
        };
        match serde_json::from_str(&json) {
            Ok(record) => Ok(Some(record)),
            Err(e) => {
                warn!(error = %e, "ignoring malformed client in transfer slot");
                Ok(None)
            }
        }
    }

    /// Empty the slot.
    ///
    /// # Errors
    ///
    /// Returns an error if the area cannot be written.
    pub fn clear(&mut self) -> Result<()> {
        self.area.remove(TRANSFER_KEY)
    }

    /// Access the underlying area.
    pub fn area(&self) -> &A {
        &self.area
    }
}
