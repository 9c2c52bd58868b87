use dioxus::prelude::*;
use hub::Page;

use crate::use_navigation;

#[component]
pub fn LandingView() -> Element {
    let nav = use_navigation();
    let start = nav.clone();
    let sign_in = nav.clone();
    let employer = nav.clone();

    rsx! {
        div {
            class: "page landing",
            h1 { "CredentialHub" }
            p {
                class: "subtitle",
                "Your verified professional profile, linked to your wallet."
            }
            div {
                class: "actions",
                button {
                    class: "btn primary",
                    onclick: move |_| start.navigate(Page::WalletConnect),
                    "Get Started"
                }
                button {
                    class: "btn",
                    onclick: move |_| sign_in.navigate(Page::UserLogin),
                    "Sign In"
                }
                button {
                    class: "btn link",
                    onclick: move |_| employer.navigate(Page::EmployerLogin),
                    "Employer / Institution Portal"
                }
            }
        }
    }
}
