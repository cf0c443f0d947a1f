// src/store.rs

use crate::error::{GuestbookError, Result};
use std::collections::HashMap;
use std::fs;
use std::io::{ErrorKind, Write};
use std::path::PathBuf;
use std::sync::{Mutex, PoisonError};

/// Blob holding the concatenated entry records.
pub const DATA_BLOB: &str = "data.txt";
/// Static page header, pass-through content.
pub const HEADER_BLOB: &str = "header.txt";
/// Static page footer, pass-through content.
pub const FOOTER_BLOB: &str = "footer.txt";
/// Static submission form, pass-through content.
pub const FORM_BLOB: &str = "form.html";

/// Storage for whole named text blobs. Each read and write covers the entire
/// blob; there is no partial update.
pub trait BlobStore: Send {
    /// Returns the full blob content. A blob that was never written reads as
    /// the empty string.
    fn load(&self, name: &str) -> Result<String>;

    /// Replaces the blob content wholesale.
    fn store(&self, name: &str, content: &str) -> Result<()>;
}

/// Standard blob directory (~/.config/guestbook/app-data).
pub fn default_dir() -> Result<PathBuf> {
    let home_dir = dirs::home_dir().ok_or(GuestbookError::HomeDirNotFound)?;
    Ok(home_dir.join(".config/guestbook/app-data"))
}

/// File-backed store: one file per blob under a data directory.
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: PathBuf) -> Result<Self> {
        fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }
}

impl BlobStore for FileStore {
    fn load(&self, name: &str) -> Result<String> {
        match fs::read_to_string(self.dir.join(name)) {
            Ok(content) => Ok(content),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(String::new()),
            Err(e) => Err(e.into()),
        }
    }

    fn store(&self, name: &str, content: &str) -> Result<()> {
        // Write to a temp file, then rename over the blob, so an interrupted
        // write can never leave a truncated log behind.
        let temp_path = self.dir.join(format!("{}.temp", name));
        let final_path = self.dir.join(name);
        let mut file = fs::File::create(&temp_path)?;
        file.write_all(content.as_bytes())?;
        file.flush()?;
        fs::rename(&temp_path, &final_path)?;
        Ok(())
    }
}

/// In-memory model store used by tests.
pub struct MemoryStore {
    blobs: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            blobs: Mutex::new(HashMap::new()),
        }
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl BlobStore for MemoryStore {
    fn load(&self, name: &str) -> Result<String> {
        let blobs = self.blobs.lock().unwrap_or_else(PoisonError::into_inner);
        Ok(blobs.get(name).cloned().unwrap_or_default())
    }

    fn store(&self, name: &str, content: &str) -> Result<()> {
        let mut blobs = self.blobs.lock().unwrap_or_else(PoisonError::into_inner);
        blobs.insert(name.to_string(), content.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_blob_reads_as_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path().to_path_buf()).unwrap();
        assert_eq!(store.load(DATA_BLOB).unwrap(), "");
    }

    #[test]
    fn store_then_load_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path().to_path_buf()).unwrap();
        store.store(DATA_BLOB, "some content\n").unwrap();
        assert_eq!(store.load(DATA_BLOB).unwrap(), "some content\n");
    }

    #[test]
    fn store_replaces_the_whole_blob() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path().to_path_buf()).unwrap();
        store.store(DATA_BLOB, "old").unwrap();
        store.store(DATA_BLOB, "new").unwrap();
        assert_eq!(store.load(DATA_BLOB).unwrap(), "new");
    }

    #[test]
    fn blobs_survive_reopening_the_store() {
        let dir = tempfile::tempdir().unwrap();
        {
            let store = FileStore::new(dir.path().to_path_buf()).unwrap();
            store.store(HEADER_BLOB, "<header/>").unwrap();
        }
        let store = FileStore::new(dir.path().to_path_buf()).unwrap();
        assert_eq!(store.load(HEADER_BLOB).unwrap(), "<header/>");
    }

    #[test]
    fn memory_store_matches_file_store_semantics() {
        let store = MemoryStore::new();
        assert_eq!(store.load(DATA_BLOB).unwrap(), "");
        store.store(DATA_BLOB, "one").unwrap();
        store.store(DATA_BLOB, "two").unwrap();
        assert_eq!(store.load(DATA_BLOB).unwrap(), "two");
    }
}
