use dioxus::prelude::*;

use crate::{use_navigation, NavigationButtons};

#[component]
pub fn DashboardView() -> Element {
    let nav = use_navigation();
    let user = nav.user();
    let name = user.display_name().unwrap_or_else(|| "Guest".to_string());
    let email = user.email.clone().unwrap_or_default();
    let greeting = if nav.is_login_flow() {
        "Welcome back"
    } else {
        "Welcome"
    };
    let logout = nav.clone();

    rsx! {
        div {
            class: "page dashboard",
            NavigationButtons {}
            h1 { "{greeting}, {name}" }
            if !email.is_empty() {
                p { class: "subtitle", "{email}" }
            }
            section {
                h2 { "Education" }
                if user.education.is_empty() {
                    p { class: "muted", "No education added yet." }
                }
                for entry in user.education.iter() {
                    p { "{entry.degree} in {entry.field}, {entry.institution}" }
                }
            }
            section {
                h2 { "Work Experience" }
                if user.work_experience.is_empty() {
                    p { class: "muted", "No work experience added yet." }
                }
                for entry in user.work_experience.iter() {
                    p { "{entry.position} at {entry.company} ({entry.duration})" }
                }
            }
            button {
                class: "btn",
                onclick: move |_| logout.logout(),
                "Log out"
            }
        }
    }
}
