//! # Filesystem-backed key/value store
//!
//! [`FileStore`] persists each key as one file under a base directory. It is
//! the native counterpart of the browser's `localStorage`.
//!
//! ## Layout
//!
//! ```text
//! <base_dir>/
//! ├── credentialHub_userData        # JSON blob
//! ├── credentialHub_resetTokens
//! └── ...
//! ```
//!
//! Key characters outside `[A-Za-z0-9._-]` are escaped as `%XX` so any key maps
//! to a single safe filename.
//!
//! ## Platform data directories
//!
//! Use `dirs::data_dir()` to obtain a platform-appropriate base:
//!
//! | Platform | Path |
//! |----------|------|
//! | macOS | `~/Library/Application Support/credentialhub/` |
//! | Linux | `~/.local/share/credentialhub/` |
//! | Windows | `C:\Users\<user>\AppData\Roaming\credentialhub\` |

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::kv::{KeyValueStore, StoreError};

/// Filesystem-backed KeyValueStore for desktop persistence.
#[derive(Clone, Debug)]
pub struct FileStore {
    base: PathBuf,
}

impl FileStore {
    pub fn new(base: PathBuf) -> Self {
        Self { base }
    }

    pub fn base(&self) -> &Path {
        &self.base
    }

    fn key_path(&self, key: &str) -> PathBuf {
        self.base.join(escape_key(key))
    }

    /// Delete every key under the base directory.
    pub fn clear(&self) -> Result<(), StoreError> {
        match std::fs::remove_dir_all(&self.base) {
            Err(e) if e.kind() != ErrorKind::NotFound => Err(e.into()),
            _ => Ok(()),
        }
    }
}

fn escape_key(key: &str) -> String {
    let mut out = String::with_capacity(key.len());
    for b in key.bytes() {
        match b {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'_' | b'-' => out.push(b as char),
            // A lone "." or ".." must never become a path component
            b'.' if key.len() > 2 => out.push('.'),
            _ => out.push_str(&format!("%{b:02X}")),
        }
    }
    // Escapes are always "%XX", so a bare "%" is free for the empty key
    if out.is_empty() {
        out.push('%');
    }
    out
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        match std::fs::read_to_string(self.key_path(key)) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        std::fs::create_dir_all(&self.base)?;
        std::fs::write(self.key_path(key), value)?;
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        match std::fs::remove_file(self.key_path(key)) {
            Err(e) if e.kind() != ErrorKind::NotFound => Err(e.into()),
            _ => Ok(()),
        }
    }
}
