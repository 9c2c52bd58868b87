//! Platform constructors for storage, the locator host and configuration.
//!
//! - **Web** (WASM + `web` feature): `localStorage` for persistent data,
//!   `sessionStorage` for tab-scoped flags, [`BrowserHost`](crate::BrowserHost)
//!   over `window.history`.
//! - **Native**: [`store::FileStore`] under `<data_dir>/credentialhub/`, an
//!   in-memory flag store and an in-memory host.

use std::rc::Rc;

use hub::HubConfig;

#[cfg(all(target_arch = "wasm32", feature = "web"))]
pub type PlatformStore = store::LocalStore;
#[cfg(not(all(target_arch = "wasm32", feature = "web")))]
pub type PlatformStore = store::FileStore;

#[cfg(all(target_arch = "wasm32", feature = "web"))]
pub type PlatformFlags = store::LocalStore;
#[cfg(not(all(target_arch = "wasm32", feature = "web")))]
pub type PlatformFlags = store::MemoryStore;

#[cfg(all(target_arch = "wasm32", feature = "web"))]
pub type PlatformHost = crate::BrowserHost;
#[cfg(not(all(target_arch = "wasm32", feature = "web")))]
pub type PlatformHost = hub::MemoryHost;

#[cfg(not(all(target_arch = "wasm32", feature = "web")))]
fn data_dir() -> std::path::PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| std::path::PathBuf::from("."))
        .join("credentialhub")
}

/// The persistent store, shared between the account service and its mailer.
pub fn make_store() -> Rc<PlatformStore> {
    #[cfg(all(target_arch = "wasm32", feature = "web"))]
    {
        Rc::new(store::LocalStore::local())
    }
    #[cfg(not(all(target_arch = "wasm32", feature = "web")))]
    {
        Rc::new(store::FileStore::new(data_dir()))
    }
}

/// The tab-scoped flag store.
pub fn make_flags() -> PlatformFlags {
    #[cfg(all(target_arch = "wasm32", feature = "web"))]
    {
        store::LocalStore::session()
    }
    #[cfg(not(all(target_arch = "wasm32", feature = "web")))]
    {
        store::MemoryStore::new()
    }
}

pub fn make_host() -> PlatformHost {
    #[cfg(all(target_arch = "wasm32", feature = "web"))]
    {
        crate::BrowserHost::new()
    }
    #[cfg(not(all(target_arch = "wasm32", feature = "web")))]
    {
        hub::MemoryHost::new("")
    }
}

/// Load `credentialhub.toml` from the data directory on native. The browser
/// has no config file and always uses the defaults.
pub fn load_config() -> HubConfig {
    #[cfg(all(target_arch = "wasm32", feature = "web"))]
    {
        HubConfig::default()
    }
    #[cfg(not(all(target_arch = "wasm32", feature = "web")))]
    {
        let path = data_dir().join(HubConfig::filename());
        match HubConfig::load(&path) {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!("Ignoring unreadable {}: {}", path.display(), e);
                HubConfig::default()
            }
        }
    }
}
