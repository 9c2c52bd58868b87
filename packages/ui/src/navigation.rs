//! Navigation and account context for the UI.
//!
//! [`NavigationProvider`] builds one [`NavigationController`] and one
//! [`AccountService`] for the app and exposes both through a [`Navigator`]
//! handle. The controller's observer copies every change into a signal, so any
//! component that reads [`Navigator::current_page`] re-renders on navigation,
//! including navigation done with the browser's own buttons.

use std::cell::RefCell;
use std::rc::Rc;

use dioxus::prelude::*;
use hub::{
    AccountService, DemoMailer, NavigationController, NavigationSnapshot, Page, ProfileError,
    ProfileForm, StorageKeys, Subscription, SystemClock, UserSession, WalletConnection,
};

use crate::platform::{self, PlatformFlags, PlatformHost, PlatformStore};

pub type AppController = NavigationController<PlatformHost, SystemClock>;
pub type AppAccounts = AccountService<
    Rc<PlatformStore>,
    PlatformFlags,
    DemoMailer<Rc<PlatformStore>>,
    SystemClock,
>;

/// Cloneable handle to the app's controller and account service.
#[derive(Clone)]
pub struct Navigator {
    controller: Rc<RefCell<AppController>>,
    accounts: Rc<RefCell<AppAccounts>>,
    snapshot: Signal<NavigationSnapshot>,
    user: Signal<UserSession>,
    _subscription: Rc<Subscription>,
}

impl Navigator {
    fn launch() -> Self {
        let config = platform::load_config();
        let store = platform::make_store();
        let keys = StorageKeys::with_prefix(&config.storage.key_prefix);
        let mailer = DemoMailer::new(Rc::clone(&store), keys.sent_emails);
        let accounts = AccountService::new(
            store,
            platform::make_flags(),
            mailer,
            SystemClock,
            config.clone(),
        );
        let controller =
            NavigationController::new(platform::make_host(), SystemClock, &config.navigation);

        let mut snapshot = Signal::new(controller.snapshot());
        let user = Signal::new(accounts.user().clone());

        let controller = Rc::new(RefCell::new(controller));
        controller
            .borrow_mut()
            .set_observer(move |next| snapshot.set(next.clone()));
        let subscription = NavigationController::connect(&controller);

        tracing::info!("Navigation started at {}", snapshot.peek().current);

        Self {
            controller,
            accounts: Rc::new(RefCell::new(accounts)),
            snapshot,
            user,
            _subscription: Rc::new(subscription),
        }
    }

    pub fn snapshot(&self) -> NavigationSnapshot {
        self.snapshot.read().clone()
    }

    pub fn current_page(&self) -> Page {
        self.snapshot.read().current
    }

    /// Query parameter of the current locator, e.g. the reset `token`.
    pub fn query_param(&self, name: &str) -> Option<String> {
        // Subscribe to navigation so a new locator re-renders the reader
        let _ = self.snapshot.read();
        self.controller
            .borrow()
            .current_locator()
            .param(name)
            .map(str::to_string)
    }

    pub fn navigate(&self, page: Page) {
        self.controller.borrow_mut().navigate_to(page);
    }

    pub fn back(&self) {
        self.controller.borrow_mut().go_back();
    }

    pub fn forward(&self) {
        self.controller.borrow_mut().go_forward();
    }

    pub fn user(&self) -> UserSession {
        self.user.read().clone()
    }

    fn refresh_user(&self) {
        let mut user = self.user;
        user.set(self.accounts.borrow().user().clone());
    }

    /// Record the wallet and continue to profile setup.
    pub fn connect_wallet(&self, connection: &WalletConnection) {
        self.accounts.borrow_mut().connect_wallet(connection);
        self.refresh_user();
        self.navigate(Page::ProfileSetup);
    }

    /// Save the profile and continue to the dashboard on success.
    pub fn complete_profile(&self, form: &ProfileForm) -> Result<(), ProfileError> {
        self.accounts.borrow_mut().complete_profile(form)?;
        self.refresh_user();
        self.navigate(Page::Dashboard);
        Ok(())
    }

    /// Sign in and go to the dashboard on success.
    pub fn login(&self, email: &str, password: &str) -> bool {
        let ok = self.accounts.borrow_mut().login(email, password);
        if ok {
            self.refresh_user();
            self.navigate(Page::Dashboard);
        }
        ok
    }

    /// Sign out and return to the landing page.
    pub fn logout(&self) {
        self.accounts.borrow_mut().logout();
        self.refresh_user();
        self.navigate(Page::Landing);
    }

    pub fn is_login_flow(&self) -> bool {
        self.accounts.borrow().is_login_flow()
    }

    pub fn send_password_reset_email(&self, email: &str) -> bool {
        self.accounts.borrow_mut().send_password_reset_email(email)
    }

    pub fn reset_password(&self, token: &str, new_password: &str) -> bool {
        let ok = self.accounts.borrow_mut().reset_password(token, new_password);
        if ok {
            self.refresh_user();
        }
        ok
    }

    pub fn check_email_exists(&self, email: &str) -> bool {
        self.accounts.borrow().check_email_exists(email)
    }
}

/// Get the app's [`Navigator`].
pub fn use_navigation() -> Navigator {
    use_context::<Navigator>()
}

/// Provider component that owns navigation and account state.
/// Wrap your app with this component.
#[component]
pub fn NavigationProvider(children: Element) -> Element {
    use_context_provider(Navigator::launch);

    rsx! {
        {children}
    }
}
