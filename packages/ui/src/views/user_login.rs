//! Email / password sign-in.

use dioxus::prelude::*;
use hub::validation::validate_email;
use hub::{Page, ValidationError};

use crate::use_navigation;

#[component]
pub fn UserLoginView() -> Element {
    let nav = use_navigation();
    let mut email = use_signal(String::new);
    let mut password = use_signal(String::new);
    let mut error = use_signal(|| Option::<String>::None);

    let submit = {
        let nav = nav.clone();
        move |_| {
            if email().trim().is_empty() || password().is_empty() {
                error.set(Some(ValidationError::Missing.to_string()));
                return;
            }
            let address = match validate_email(&email()) {
                Ok(address) => address,
                Err(e) => {
                    error.set(Some(e.to_string()));
                    return;
                }
            };
            if nav.login(&address, &password()) {
                error.set(None);
            } else {
                error.set(Some("Invalid email or password. Please try again.".to_string()));
            }
        }
    };
    let forgot = nav.clone();
    let home = nav.clone();

    rsx! {
        div {
            class: "page form-page",
            h1 { "Sign In" }
            label { r#for: "email", "Email" }
            input {
                id: "email",
                r#type: "email",
                value: "{email}",
                oninput: move |e| email.set(e.value()),
            }
            label { r#for: "password", "Password" }
            input {
                id: "password",
                r#type: "password",
                value: "{password}",
                oninput: move |e| password.set(e.value()),
            }
            if let Some(message) = error() {
                p { class: "error", "{message}" }
            }
            button { class: "btn primary", onclick: submit, "Sign In" }
            button {
                class: "btn link",
                onclick: move |_| forgot.navigate(Page::ForgotPassword),
                "Forgot password?"
            }
            button {
                class: "btn link",
                onclick: move |_| home.navigate(Page::Landing),
                "Back to home"
            }
        }
    }
}
