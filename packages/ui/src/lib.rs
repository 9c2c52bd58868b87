//! This crate contains all shared UI for the workspace.

use dioxus::prelude::*;

pub mod platform;

mod navigation;
pub use navigation::{use_navigation, AppAccounts, AppController, NavigationProvider, Navigator};

#[cfg(all(target_arch = "wasm32", feature = "web"))]
mod browser_host;
#[cfg(all(target_arch = "wasm32", feature = "web"))]
pub use browser_host::BrowserHost;

mod nav_buttons;
pub use nav_buttons::NavigationButtons;

pub mod views;

pub const APP_CSS: Asset = asset!("/assets/credentialhub.css");
