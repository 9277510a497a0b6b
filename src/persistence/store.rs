//! # Save Storage
//!
//! Opaque byte storage for save data.

use crate::EldoriaResult;
use std::cell::RefCell;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// A place save bytes can be written to and read back from.
pub trait SaveStore {
    /// Returns the stored bytes, or `None` if nothing has been saved.
    fn read(&self) -> EldoriaResult<Option<Vec<u8>>>;

    /// Replaces the stored bytes.
    fn write(&self, bytes: &[u8]) -> EldoriaResult<()>;
}

/// Stores the save in a single file.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SaveStore for FileStore {
    fn read(&self) -> EldoriaResult<Option<Vec<u8>>> {
        match fs::read(&self.path) {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn write(&self, bytes: &[u8]) -> EldoriaResult<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, bytes)?;
        Ok(())
    }
}

/// Keeps the save in memory.
#[derive(Debug, Default)]
pub struct MemoryStore {
    bytes: RefCell<Option<Vec<u8>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store that already holds `bytes`.
    pub fn with_bytes(bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            bytes: RefCell::new(Some(bytes.into())),
        }
    }
}

impl SaveStore for MemoryStore {
    fn read(&self) -> EldoriaResult<Option<Vec<u8>>> {
        Ok(self.bytes.borrow().clone())
    }

    fn write(&self, bytes: &[u8]) -> EldoriaResult<()> {
        *self.bytes.borrow_mut() = Some(bytes.to_vec());
        Ok(())
    }
}
