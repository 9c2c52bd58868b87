//! Set a new password from a `#reset-password?token=…` link.

use dioxus::prelude::*;
use hub::validation::validate_new_password;
use hub::Page;

use crate::use_navigation;

#[component]
pub fn ResetPasswordView() -> Element {
    let nav = use_navigation();
    let token = nav.query_param("token").filter(|t| !t.is_empty());
    let mut password = use_signal(String::new);
    let mut confirm = use_signal(String::new);
    let mut error = use_signal(|| Option::<String>::None);
    let mut done = use_signal(|| false);

    let Some(token) = token else {
        let forgot = nav.clone();
        return rsx! {
            div {
                class: "page form-page",
                h1 { "Reset Password" }
                p { class: "error", "Invalid reset link. No token found." }
                button {
                    class: "btn primary",
                    onclick: move |_| forgot.navigate(Page::ForgotPassword),
                    "Request a new link"
                }
            }
        };
    };

    let submit = {
        let nav = nav.clone();
        move |_| {
            if let Err(e) = validate_new_password(&password(), &confirm()) {
                error.set(Some(e.to_string()));
                return;
            }
            if nav.reset_password(&token, &password()) {
                error.set(None);
                done.set(true);
            } else {
                error.set(Some(
                    "Invalid or expired reset token. Please request a new reset link."
                        .to_string(),
                ));
            }
        }
    };
    let login = nav.clone();
    let forgot = nav.clone();

    rsx! {
        div {
            class: "page form-page",
            h1 { "Reset Password" }
            if done() {
                p { class: "success", "Password reset successfully!" }
                button {
                    class: "btn primary",
                    onclick: move |_| login.navigate(Page::UserLogin),
                    "Sign in"
                }
            } else {
                label { r#for: "password", "New password" }
                input {
                    id: "password",
                    r#type: "password",
                    value: "{password}",
                    oninput: move |e| password.set(e.value()),
                }
                label { r#for: "confirm", "Confirm password" }
                input {
                    id: "confirm",
                    r#type: "password",
                    value: "{confirm}",
                    oninput: move |e| confirm.set(e.value()),
                }
                if let Some(message) = error() {
                    p { class: "error", "{message}" }
                }
                button { class: "btn primary", onclick: submit, "Reset Password" }
                button {
                    class: "btn link",
                    onclick: move |_| forgot.navigate(Page::ForgotPassword),
                    "Request a new link"
                }
            }
        }
    }
}
