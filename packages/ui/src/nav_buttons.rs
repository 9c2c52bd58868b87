use dioxus::prelude::*;

use crate::use_navigation;

/// In-app back / forward buttons, disabled at either end of the history.
#[component]
pub fn NavigationButtons() -> Element {
    let nav = use_navigation();
    let snapshot = nav.snapshot();
    let back = nav.clone();
    let forward = nav.clone();

    rsx! {
        div {
            class: "nav-buttons",
            button {
                class: "nav-btn",
                title: "Back",
                disabled: !snapshot.can_go_back,
                onclick: move |_| back.back(),
                "\u{2190}"
            }
            button {
                class: "nav-btn",
                title: "Forward",
                disabled: !snapshot.can_go_forward,
                onclick: move |_| forward.forward(),
                "\u{2192}"
            }
        }
    }
}
