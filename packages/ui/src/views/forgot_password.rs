use dioxus::prelude::*;
use hub::validation::validate_email;
use hub::Page;

use crate::use_navigation;

#[derive(Clone, Debug, PartialEq)]
enum Status {
    Idle,
    Sent(String),
    Failed(String),
}

#[component]
pub fn ForgotPasswordView() -> Element {
    let nav = use_navigation();
    let mut email = use_signal(String::new);
    let mut status = use_signal(|| Status::Idle);

    let submit = {
        let nav = nav.clone();
        move |_| {
            let address = match validate_email(&email()) {
                Ok(address) => address,
                Err(e) => {
                    status.set(Status::Failed(e.to_string()));
                    return;
                }
            };
            if nav.send_password_reset_email(&address) {
                status.set(Status::Sent(address));
            } else {
                status.set(Status::Failed(
                    "Email not found. Please check your email address.".to_string(),
                ));
            }
        }
    };
    let login = nav.clone();

    rsx! {
        div {
            class: "page form-page",
            h1 { "Forgot Password" }
            match status() {
                Status::Sent(address) => rsx! {
                    p {
                        class: "success",
                        "Password reset email sent to {address}! Please check your inbox."
                    }
                },
                other => rsx! {
                    p { "Enter your account email and we will send you a reset link." }
                    label { r#for: "email", "Email" }
                    input {
                        id: "email",
                        r#type: "email",
                        value: "{email}",
                        oninput: move |e| email.set(e.value()),
                    }
                    if let Status::Failed(message) = other {
                        p { class: "error", "{message}" }
                    }
                    button { class: "btn primary", onclick: submit, "Send Reset Link" }
                },
            }
            button {
                class: "btn link",
                onclick: move |_| login.navigate(Page::UserLogin),
                "Back to sign in"
            }
        }
    }
}
