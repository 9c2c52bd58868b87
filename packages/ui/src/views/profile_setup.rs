//! Profile details collected after the wallet is connected.

use dioxus::prelude::*;
use hub::{Page, ProfileForm};

use crate::use_navigation;

#[component]
pub fn ProfileSetupView() -> Element {
    let nav = use_navigation();
    let mut form = use_signal(ProfileForm::default);
    let mut error = use_signal(|| Option::<String>::None);

    if !nav.user().is_logged_in() {
        let wallet = nav.clone();
        return rsx! {
            div {
                class: "page form-page",
                h1 { "Set Up Your Profile" }
                p { class: "error", "Please connect your wallet first." }
                button {
                    class: "btn primary",
                    onclick: move |_| wallet.navigate(Page::WalletConnect),
                    "Connect Wallet"
                }
            }
        };
    }

    let email = form.read().email.trim().to_lowercase();
    let duplicate = !email.is_empty()
        && !nav.user().has_email(&email)
        && nav.check_email_exists(&email);

    let submit = {
        let nav = nav.clone();
        move |_| match nav.complete_profile(&form()) {
            Ok(()) => error.set(None),
            Err(e) => error.set(Some(e.to_string())),
        }
    };

    rsx! {
        div {
            class: "page form-page",
            h1 { "Set Up Your Profile" }
            label { r#for: "first-name", "First name" }
            input {
                id: "first-name",
                value: "{form.read().first_name}",
                oninput: move |e| form.write().first_name = e.value(),
            }
            label { r#for: "last-name", "Last name" }
            input {
                id: "last-name",
                value: "{form.read().last_name}",
                oninput: move |e| form.write().last_name = e.value(),
            }
            label { r#for: "age", "Age" }
            input {
                id: "age",
                r#type: "number",
                value: "{form.read().age}",
                oninput: move |e| form.write().age = e.value(),
            }
            label { r#for: "gender", "Gender" }
            select {
                id: "gender",
                value: "{form.read().gender}",
                onchange: move |e| form.write().gender = e.value(),
                option { value: "", "Select..." }
                option { value: "male", "Male" }
                option { value: "female", "Female" }
                option { value: "other", "Other" }
                option { value: "prefer-not-to-say", "Prefer not to say" }
            }
            label { r#for: "ssn", "Last 4 digits of SSN" }
            input {
                id: "ssn",
                maxlength: 4,
                value: "{form.read().last_four_ssn}",
                oninput: move |e| form.write().last_four_ssn = e.value(),
            }
            label { r#for: "email", "Email (optional)" }
            input {
                id: "email",
                r#type: "email",
                value: "{form.read().email}",
                oninput: move |e| form.write().email = e.value(),
            }
            if duplicate {
                p { class: "warning", "An account with this email already exists." }
            }
            label { r#for: "phone", "Phone (optional)" }
            input {
                id: "phone",
                r#type: "tel",
                value: "{form.read().phone}",
                oninput: move |e| form.write().phone = e.value(),
            }
            if let Some(message) = error() {
                p { class: "error", "{message}" }
            }
            button { class: "btn primary", onclick: submit, "Save Profile" }
        }
    }
}
