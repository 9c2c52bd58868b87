use dioxus::prelude::*;
use hub::{Network, Page, WalletConnection};

use crate::use_navigation;

#[component]
pub fn WalletConnectView() -> Element {
    let nav = use_navigation();
    let mut address = use_signal(String::new);
    let mut network = use_signal(Network::default);
    let mut error = use_signal(|| Option::<String>::None);

    let connect = {
        let nav = nav.clone();
        move |_| match WalletConnection::new(&address(), network()) {
            Ok(connection) => {
                error.set(None);
                nav.connect_wallet(&connection);
            }
            Err(e) => error.set(Some(e.to_string())),
        }
    };
    let home = nav.clone();

    rsx! {
        div {
            class: "page form-page",
            h1 { "Connect Your Wallet" }
            p { class: "subtitle", "Link a wallet to anchor your credentials." }
            label { r#for: "address", "Wallet address" }
            input {
                id: "address",
                placeholder: "0x...",
                value: "{address}",
                oninput: move |e| address.set(e.value()),
            }
            label { r#for: "network", "Network" }
            select {
                id: "network",
                value: "{network}",
                onchange: move |e| network.set(Network::from_name(&e.value())),
                for choice in Network::ALL {
                    option { value: "{choice}", "{choice}" }
                }
            }
            if let Some(message) = error() {
                p { class: "error", "{message}" }
            }
            button { class: "btn primary", onclick: connect, "Connect Wallet" }
            button {
                class: "btn link",
                onclick: move |_| home.navigate(Page::Landing),
                "Back to home"
            }
        }
    }
}
