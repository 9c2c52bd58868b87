//! # Browser Web Storage backend
//!
//! [`LocalStore`] is the [`KeyValueStore`] used on the **web platform**. It
//! wraps either `window.localStorage` (persistent across tabs and reloads) or
//! `window.sessionStorage` (scoped to the current tab).
//!
//! The `Storage` handle is looked up on every call rather than cached, so the
//! store stays a plain `Clone` value and works even if it was constructed
//! before the window finished loading. Browsers with storage disabled (private
//! mode, blocked cookies) surface as [`StoreError::Unavailable`].

use crate::kv::{KeyValueStore, StoreError};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Area {
    Local,
    Session,
}

/// Web Storage backed KeyValueStore.
#[derive(Clone, Debug)]
pub struct LocalStore {
    area: Area,
}

impl LocalStore {
    /// Store backed by `window.localStorage`.
    pub fn local() -> Self {
        Self { area: Area::Local }
    }

    /// Store backed by `window.sessionStorage`.
    pub fn session() -> Self {
        Self {
            area: Area::Session,
        }
    }

    fn storage(&self) -> Result<web_sys::Storage, StoreError> {
        let window =
            web_sys::window().ok_or_else(|| StoreError::Unavailable("no window".into()))?;
        let storage = match self.area {
            Area::Local => window.local_storage(),
            Area::Session => window.session_storage(),
        };
        storage
            .map_err(|e| StoreError::Unavailable(format!("{e:?}")))?
            .ok_or_else(|| StoreError::Unavailable(format!("{:?} storage disabled", self.area)))
    }
}

impl KeyValueStore for LocalStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        self.storage()?
            .get_item(key)
            .map_err(|e| StoreError::Unavailable(format!("{e:?}")))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        self.storage()?
            .set_item(key, value)
            .map_err(|e| StoreError::Unavailable(format!("{e:?}")))
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        self.storage()?
            .remove_item(key)
            .map_err(|e| StoreError::Unavailable(format!("{e:?}")))
    }
}
