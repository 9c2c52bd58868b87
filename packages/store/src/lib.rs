//! String-keyed, string-valued storage used by the CredentialHub client.
//!
//! Everything the client persists (the user session, the registered-email set,
//! password-reset tokens, the demo mail log) is a JSON blob under a well-known
//! key in a [`KeyValueStore`]. Backends:
//!
//! | Backend | Platform |
//! |---------|----------|
//! | [`MemoryStore`] | tests, tab-scoped flags on native |
//! | [`FileStore`] | desktop / native persistence |
//! | `LocalStore` | browser `localStorage` / `sessionStorage` (wasm + `web` feature) |

pub mod json;
pub mod kv;

mod file_store;
mod memory;
pub use file_store::FileStore;
pub use memory::MemoryStore;

#[cfg(all(target_arch = "wasm32", feature = "web"))]
mod local;
#[cfg(all(target_arch = "wasm32", feature = "web"))]
pub use local::LocalStore;

pub use json::{read_json, try_read_json, write_json};
pub use kv::{KeyValueStore, StoreError};
