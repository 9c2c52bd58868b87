//! [`LocatorHost`] over the browser's `window.history` and URL fragment.
//!
//! `pushState` does not fire `popstate` or `hashchange`, so `push` never
//! notifies. `history.back()`/`forward()` do fire `popstate` later, and the
//! browser cannot say who caused it: every notification is delivered untagged
//! and the controller's settle window absorbs the echo.

use hub::host::Listener;
use hub::{LocatorChange, LocatorHost, Subscription, TransitionId};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};

const EVENTS: [&str; 2] = ["popstate", "hashchange"];

#[derive(Clone, Copy, Debug, Default)]
pub struct BrowserHost;

impl BrowserHost {
    pub fn new() -> Self {
        Self
    }

    fn history() -> Option<web_sys::History> {
        web_sys::window()?.history().ok()
    }
}

fn read_fragment() -> Option<String> {
    let hash = web_sys::window()?.location().hash().ok()?;
    let fragment = hash.strip_prefix('#').unwrap_or(&hash);
    (!fragment.is_empty()).then(|| fragment.to_string())
}

impl LocatorHost for BrowserHost {
    fn current_fragment(&self) -> Option<String> {
        read_fragment()
    }

    fn push(&self, fragment: &str, _transition: TransitionId) {
        let Some(history) = Self::history() else {
            return;
        };
        let url = format!("#{fragment}");
        if let Err(e) = history.push_state_with_url(&JsValue::NULL, "", Some(&url)) {
            tracing::error!("pushState failed for {}: {:?}", url, e);
        }
    }

    fn back(&self, _transition: TransitionId) {
        if let Some(Err(e)) = Self::history().map(|h| h.back()) {
            tracing::error!("history.back failed: {:?}", e);
        }
    }

    fn forward(&self, _transition: TransitionId) {
        if let Some(Err(e)) = Self::history().map(|h| h.forward()) {
            tracing::error!("history.forward failed: {:?}", e);
        }
    }

    fn subscribe(&self, listener: Listener) -> Subscription {
        let Some(window) = web_sys::window() else {
            return Subscription::new(|| {});
        };

        let callback = Closure::<dyn FnMut(web_sys::Event)>::wrap(Box::new(move |_event| {
            listener(&LocatorChange::external(read_fragment().unwrap_or_default()));
        }));
        for event in EVENTS {
            if let Err(e) =
                window.add_event_listener_with_callback(event, callback.as_ref().unchecked_ref())
            {
                tracing::error!("Failed to listen for {}: {:?}", event, e);
            }
        }

        Subscription::new(move || {
            for event in EVENTS {
                if let Err(e) = window
                    .remove_event_listener_with_callback(event, callback.as_ref().unchecked_ref())
                {
                    tracing::error!("Failed to stop listening for {}: {:?}", event, e);
                }
            }
            drop(callback);
        })
    }
}
