use dioxus::prelude::*;

use ui::views::PageOutlet;
use ui::NavigationProvider;

fn main() {
    dioxus::launch(App);
}

#[component]
fn App() -> Element {
    rsx! {
        document::Link { rel: "stylesheet", href: ui::APP_CSS }
        document::Title { "CredentialHub" }

        NavigationProvider {
            PageOutlet {}
        }
    }
}
