use dioxus::prelude::*;
use hub::Page;

use crate::{use_navigation, NavigationButtons};

/// Stand-in for pages whose forms live outside this client.
#[component]
pub fn PlaceholderView(page: Page) -> Element {
    let nav = use_navigation();

    rsx! {
        div {
            class: "page placeholder",
            NavigationButtons {}
            h1 { "{page}" }
            p { class: "muted", "This page is not available in this build." }
            button {
                class: "btn",
                onclick: move |_| nav.navigate(Page::Landing),
                "Back to home"
            }
        }
    }
}
