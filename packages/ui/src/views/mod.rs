use dioxus::prelude::*;
use hub::Page;

use crate::use_navigation;

mod landing;
pub use landing::LandingView;

mod user_login;
pub use user_login::UserLoginView;

mod forgot_password;
pub use forgot_password::ForgotPasswordView;

mod reset_password;
pub use reset_password::ResetPasswordView;

mod dashboard;
pub use dashboard::DashboardView;

mod wallet_connect;
pub use wallet_connect::WalletConnectView;

mod profile_setup;
pub use profile_setup::ProfileSetupView;

mod placeholder;
pub use placeholder::PlaceholderView;

/// Renders the view for the current page.
#[component]
pub fn PageOutlet() -> Element {
    let page = use_navigation().current_page();

    match page {
        Page::Landing => rsx! { LandingView {} },
        Page::UserLogin => rsx! { UserLoginView {} },
        Page::ForgotPassword => rsx! { ForgotPasswordView {} },
        Page::ResetPassword => rsx! { ResetPasswordView {} },
        Page::Dashboard => rsx! { DashboardView {} },
        Page::WalletConnect => rsx! { WalletConnectView {} },
        Page::ProfileSetup => rsx! { ProfileSetupView {} },
        other => rsx! { PlaceholderView { page: other } },
    }
}
