//! # Navigation controller
//!
//! [`NavigationController`] is the single source of truth for the current
//! [`Page`]. It keeps a [`NavigationHistory`] in step with the host's native
//! history stack, in both directions:
//!
//! - **Self-initiated**: [`navigate_to`](NavigationController::navigate_to),
//!   [`go_back`](NavigationController::go_back) and
//!   [`go_forward`](NavigationController::go_forward) update the history first,
//!   then drive the matching host primitive.
//! - **External**: [`handle_external_change`](NavigationController::handle_external_change)
//!   reconciles a change the user made with native controls.
//!
//! ## Feedback suppression
//!
//! A host may report our own `back`/`forward` calls back to us. Each
//! self-initiated transition gets a fresh [`TransitionId`] and opens a settle
//! window (`navigation.settle_delay_ms`):
//!
//! | Notification | Action |
//! |--------------|--------|
//! | tagged with one of our transition ids | echo, ignored; closes the window if it is the latest |
//! | untagged, window open | ignored |
//! | untagged, window closed | reconciled |
//!
//! The window closes on the clock alone, so a host that never reports back
//! cannot leave the controller deaf to the user.

use std::cell::RefCell;
use std::rc::Rc;

use chrono::{DateTime, Duration, Utc};

use crate::clock::{Clock, SystemClock};
use crate::config::NavigationConfig;
use crate::history::NavigationHistory;
use crate::host::{LocatorChange, LocatorHost, Subscription, TransitionId};
use crate::page::{Locator, Page};

/// Point-in-time view of the controller, handed to observers.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NavigationSnapshot {
    pub current: Page,
    pub history: Vec<Page>,
    pub cursor: usize,
    pub can_go_back: bool,
    pub can_go_forward: bool,
}

type Observer = Box<dyn FnMut(&NavigationSnapshot)>;

pub struct NavigationController<H, C = SystemClock> {
    host: H,
    clock: C,
    settle_delay: Duration,
    history: NavigationHistory,
    locator: Locator,
    last_transition: TransitionId,
    settle_until: Option<DateTime<Utc>>,
    observer: Option<Observer>,
}

impl<H: LocatorHost, C: Clock> NavigationController<H, C> {
    /// Create a controller seeded from the host's current locator.
    pub fn new(host: H, clock: C, config: &NavigationConfig) -> Self {
        let mut controller = Self {
            host,
            clock,
            settle_delay: config.settle_delay(),
            history: NavigationHistory::new(Page::Landing),
            locator: Locator::new(Page::Landing),
            last_transition: TransitionId::default(),
            settle_until: None,
            observer: None,
        };
        controller.initialize();
        controller
    }

    /// Derive the starting page from the host's locator, defaulting to
    /// [`Page::Landing`], and reset history to that single entry.
    pub fn initialize(&mut self) -> Page {
        self.locator = self
            .host
            .current_fragment()
            .and_then(|fragment| Locator::parse(&fragment))
            .unwrap_or_else(|| Locator::new(Page::Landing));
        self.history = NavigationHistory::new(self.locator.page());
        self.settle_until = None;
        tracing::debug!("Navigation initialized at {}", self.locator.page());
        self.notify_observer();
        self.locator.page()
    }

    /// Register a callback that receives a snapshot after every change.
    pub fn set_observer(&mut self, observer: impl FnMut(&NavigationSnapshot) + 'static) {
        self.observer = Some(Box::new(observer));
    }

    pub fn current_page(&self) -> Page {
        self.history.current()
    }

    /// The full locator of the current page, including any query.
    pub fn current_locator(&self) -> &Locator {
        &self.locator
    }

    pub fn history(&self) -> &[Page] {
        self.history.entries()
    }

    pub fn cursor(&self) -> usize {
        self.history.cursor()
    }

    pub fn can_go_back(&self) -> bool {
        self.history.can_go_back()
    }

    pub fn can_go_forward(&self) -> bool {
        self.history.can_go_forward()
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    /// Whether untagged host notifications are currently treated as echoes.
    pub fn is_settling(&self) -> bool {
        self.settle_until
            .is_some_and(|until| self.clock.now() < until)
    }

    pub fn snapshot(&self) -> NavigationSnapshot {
        NavigationSnapshot {
            current: self.current_page(),
            history: self.history.entries().to_vec(),
            cursor: self.history.cursor(),
            can_go_back: self.can_go_back(),
            can_go_forward: self.can_go_forward(),
        }
    }

    /// Go to `target`, discarding any forward entries. No-op if `target` is
    /// already current.
    pub fn navigate_to(&mut self, target: Page) {
        if target == self.current_page() {
            tracing::trace!("Already on {}", target);
            return;
        }
        let transition = self.begin_transition();
        self.history.push(target);
        self.locator = Locator::new(target);
        tracing::debug!("Navigate to {} ({:?})", target, transition);
        self.host.push(&self.locator.to_fragment(), transition);
        self.notify_observer();
    }

    pub fn go_back(&mut self) {
        if !self.can_go_back() {
            return;
        }
        let transition = self.begin_transition();
        if let Some(page) = self.history.step_back() {
            self.locator = Locator::new(page);
            tracing::debug!("Back to {} ({:?})", page, transition);
        }
        self.host.back(transition);
        self.notify_observer();
    }

    pub fn go_forward(&mut self) {
        if !self.can_go_forward() {
            return;
        }
        let transition = self.begin_transition();
        if let Some(page) = self.history.step_forward() {
            self.locator = Locator::new(page);
            tracing::debug!("Forward to {} ({:?})", page, transition);
        }
        self.host.forward(transition);
        self.notify_observer();
    }

    /// Reconcile a locator change reported by the host.
    pub fn handle_external_change(&mut self, change: &LocatorChange) {
        if let Some(origin) = change.origin {
            if origin == self.last_transition {
                self.settle_until = None;
            }
            tracing::trace!("Ignoring echo of {:?}", origin);
            return;
        }
        if self.is_settling() {
            tracing::trace!("Ignoring {:?} while settling", change.fragment);
            return;
        }
        self.settle_until = None;

        let Some(locator) = Locator::parse(&change.fragment) else {
            tracing::trace!("Ignoring unknown locator {:?}", change.fragment);
            return;
        };
        let page = locator.page();
        if page == self.current_page() {
            return;
        }

        match self.history.position(page) {
            Some(index) => {
                self.history.seek(index);
            }
            None => self.history.append(page),
        }
        self.locator = locator;
        tracing::debug!("External navigation to {}", page);
        self.notify_observer();
    }

    fn begin_transition(&mut self) -> TransitionId {
        self.last_transition = self.last_transition.next();
        let now = self.clock.now();
        self.settle_until = Some(
            now.checked_add_signed(self.settle_delay)
                .unwrap_or(DateTime::<Utc>::MAX_UTC),
        );
        self.last_transition
    }

    fn notify_observer(&mut self) {
        if self.observer.is_none() {
            return;
        }
        let snapshot = self.snapshot();
        if let Some(observer) = self.observer.as_mut() {
            observer(&snapshot);
        }
    }
}

impl<H: LocatorHost + 'static, C: Clock + 'static> NavigationController<H, C> {
    /// Route the host's change notifications into `this`.
    ///
    /// A notification that arrives while the controller is already borrowed is
    /// being delivered from inside one of our own transitions and is dropped.
    pub fn connect(this: &Rc<RefCell<Self>>) -> Subscription {
        let weak = Rc::downgrade(this);
        let listener = Box::new(move |change: &LocatorChange| {
            let Some(controller) = weak.upgrade() else {
                return;
            };
            match controller.try_borrow_mut() {
                Ok(mut controller) => controller.handle_external_change(change),
                Err(_) => tracing::trace!("Dropping re-entrant {:?}", change.fragment),
            };
        });
        let subscription = this.borrow().host.subscribe(listener);
        subscription
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;
    use crate::host::{HostCall, MemoryHost};

    fn controller_at(fragment: &str) -> (NavigationController<MemoryHost, ManualClock>, MemoryHost, ManualClock) {
        let host = MemoryHost::new(fragment);
        let clock = ManualClock::default();
        let controller =
            NavigationController::new(host.clone(), clock.clone(), &NavigationConfig::default());
        (controller, host, clock)
    }

    fn assert_consistent<H: LocatorHost, C: Clock>(controller: &NavigationController<H, C>) {
        assert!(controller.cursor() < controller.history().len());
        assert_eq!(controller.history()[controller.cursor()], controller.current_page());
        assert_eq!(controller.current_locator().page(), controller.current_page());
    }

    #[test]
    fn test_initialize_from_locator() {
        let (controller, _, _) = controller_at("#profile-setup");
        assert_eq!(controller.current_page(), Page::ProfileSetup);
        assert_eq!(controller.history(), &[Page::ProfileSetup]);
        assert_eq!(controller.cursor(), 0);
        assert!(!controller.can_go_back());
        assert!(!controller.can_go_forward());
    }

    #[test]
    fn test_initialize_defaults_to_landing() {
        for fragment in ["", "#", "#settings", "#Dashboard"] {
            let (controller, _, _) = controller_at(fragment);
            assert_eq!(controller.current_page(), Page::Landing, "{fragment:?}");
        }
    }

    #[test]
    fn test_initialize_keeps_reset_link_query() {
        let (controller, _, _) = controller_at("#reset-password?token=abc123");
        assert_eq!(controller.current_page(), Page::ResetPassword);
        assert_eq!(controller.current_locator().param("token"), Some("abc123"));
    }

    #[test]
    fn test_navigate_pushes_host_entries() {
        let (mut controller, host, _) = controller_at("landing");
        controller.navigate_to(Page::WalletConnect);
        controller.navigate_to(Page::ProfileSetup);

        assert_eq!(controller.current_page(), Page::ProfileSetup);
        assert_eq!(
            controller.history(),
            &[Page::Landing, Page::WalletConnect, Page::ProfileSetup]
        );
        assert_eq!(
            host.calls(),
            vec![
                HostCall::Push("wallet-connect".into()),
                HostCall::Push("profile-setup".into()),
            ]
        );
        assert_consistent(&controller);
    }

    #[test]
    fn test_navigate_to_current_page_is_noop() {
        let (mut controller, host, _) = controller_at("dashboard");
        let before = controller.snapshot();
        controller.navigate_to(Page::Dashboard);
        assert_eq!(controller.snapshot(), before);
        assert!(host.calls().is_empty());
        assert!(!controller.is_settling());
    }

    #[test]
    fn test_branch_discards_forward_entries() {
        let (mut controller, _, _) = controller_at("");
        controller.navigate_to(Page::WalletConnect);
        controller.navigate_to(Page::ProfileSetup);
        controller.go_back();

        assert_eq!(controller.current_page(), Page::WalletConnect);
        assert!(controller.can_go_forward());

        controller.navigate_to(Page::Dashboard);
        assert!(!controller.can_go_forward());
        assert_eq!(
            controller.history(),
            &[Page::Landing, Page::WalletConnect, Page::Dashboard]
        );

        let before = controller.snapshot();
        controller.go_forward();
        assert_eq!(controller.snapshot(), before);
    }

    #[test]
    fn test_back_then_forward_restores_position() {
        let (mut controller, host, _) = controller_at("");
        controller.navigate_to(Page::UserLogin);
        controller.navigate_to(Page::ForgotPassword);
        let before = (controller.current_page(), controller.cursor());

        controller.go_back();
        assert_eq!(controller.current_page(), Page::UserLogin);
        controller.go_forward();
        assert_eq!((controller.current_page(), controller.cursor()), before);

        assert_eq!(&host.calls()[2..], &[HostCall::Back, HostCall::Forward]);
        assert_eq!(host.current_fragment().as_deref(), Some("forgot-password"));
    }

    #[test]
    fn test_back_and_forward_are_bounded() {
        let (mut controller, host, _) = controller_at("");
        controller.go_back();
        controller.go_forward();
        assert!(host.calls().is_empty());
        assert_eq!(controller.current_page(), Page::Landing);
    }

    #[test]
    fn test_invariants_hold_over_mixed_sequence() {
        let (mut controller, host, clock) = controller_at("");
        let pages = Page::ALL;
        for step in 0..60usize {
            match step % 5 {
                0 | 3 => controller.navigate_to(pages[(step * 7) % pages.len()]),
                1 => controller.go_back(),
                2 => controller.go_forward(),
                _ => {
                    clock.advance(Duration::seconds(1));
                    host.simulate_back();
                }
            }
            assert_consistent(&controller);
        }
    }

    #[test]
    fn test_untagged_change_ignored_while_settling() {
        let (mut controller, _, clock) = controller_at("");
        controller.navigate_to(Page::UserLogin);
        assert!(controller.is_settling());

        controller.handle_external_change(&LocatorChange::external("dashboard"));
        assert_eq!(controller.current_page(), Page::UserLogin);

        // The window closes on time even though the host never reported back
        clock.advance(Duration::milliseconds(50));
        assert!(!controller.is_settling());
        controller.handle_external_change(&LocatorChange::external("dashboard"));
        assert_eq!(controller.current_page(), Page::Dashboard);
    }

    #[test]
    fn test_oversized_settle_delay_saturates() {
        let host = MemoryHost::new("landing");
        let clock = ManualClock::default();
        let config = NavigationConfig {
            settle_delay_ms: u64::MAX,
        };
        let mut controller = NavigationController::new(host.clone(), clock.clone(), &config);

        controller.navigate_to(Page::Dashboard);
        controller.go_back();
        controller.go_forward();
        assert_eq!(controller.current_page(), Page::Dashboard);
        assert!(controller.is_settling());

        // A tagged echo of the latest transition still reopens the controller
        controller.handle_external_change(&LocatorChange::echo("dashboard", TransitionId(3)));
        controller.handle_external_change(&LocatorChange::external("user-login"));
        assert_eq!(controller.current_page(), Page::UserLogin);
    }

    #[test]
    fn test_tagged_echo_is_ignored_and_closes_window() {
        let (mut controller, _, _) = controller_at("");
        controller.navigate_to(Page::UserLogin);
        controller.navigate_to(Page::Dashboard);
        controller.go_back();
        assert!(controller.is_settling());

        // Stale echo: ignored, window stays open
        controller.handle_external_change(&LocatorChange::echo("landing", TransitionId(1)));
        assert_eq!(controller.current_page(), Page::UserLogin);
        assert!(controller.is_settling());

        // Echo of the latest transition closes the window early
        controller.handle_external_change(&LocatorChange::echo("user-login", TransitionId(3)));
        assert!(!controller.is_settling());
        assert_eq!(controller.current_page(), Page::UserLogin);

        controller.handle_external_change(&LocatorChange::external("forgot-password"));
        assert_eq!(controller.current_page(), Page::ForgotPassword);
    }

    #[test]
    fn test_external_change_to_known_page_moves_cursor() {
        let (mut controller, _, clock) = controller_at("");
        controller.navigate_to(Page::UserLogin);
        controller.navigate_to(Page::Dashboard);
        clock.advance(Duration::seconds(1));

        controller.handle_external_change(&LocatorChange::external("#landing"));
        assert_eq!(controller.current_page(), Page::Landing);
        assert_eq!(controller.cursor(), 0);
        assert_eq!(controller.history().len(), 3);

        controller.handle_external_change(&LocatorChange::external("dashboard"));
        assert_eq!(controller.cursor(), 2);
        assert_eq!(controller.history().len(), 3);
    }

    #[test]
    fn test_external_change_to_new_page_appends() {
        let (mut controller, _, clock) = controller_at("");
        controller.navigate_to(Page::UserLogin);
        controller.navigate_to(Page::Dashboard);
        controller.go_back();
        clock.advance(Duration::seconds(1));

        controller.handle_external_change(&LocatorChange::external("employer-login"));
        // Appended after every entry, forward entries kept
        assert_eq!(
            controller.history(),
            &[Page::Landing, Page::UserLogin, Page::Dashboard, Page::EmployerLogin]
        );
        assert_eq!(controller.cursor(), 3);
        assert_consistent(&controller);
    }

    #[test]
    fn test_external_change_ignores_unknown_and_current() {
        let (mut controller, _, _) = controller_at("landing");
        let before = controller.snapshot();
        controller.handle_external_change(&LocatorChange::external("nowhere"));
        controller.handle_external_change(&LocatorChange::external(""));
        controller.handle_external_change(&LocatorChange::external("landing"));
        assert_eq!(controller.snapshot(), before);
    }

    #[test]
    fn test_external_change_records_query() {
        let (mut controller, _, _) = controller_at("");
        controller.handle_external_change(&LocatorChange::external("reset-password?token=t1"));
        assert_eq!(controller.current_page(), Page::ResetPassword);
        assert_eq!(controller.current_locator().param("token"), Some("t1"));
    }

    #[test]
    fn test_connect_routes_native_navigation() {
        let host = MemoryHost::new("landing");
        let clock = ManualClock::default();
        let controller = Rc::new(RefCell::new(NavigationController::new(
            host.clone(),
            clock.clone(),
            &NavigationConfig::default(),
        )));
        let subscription = NavigationController::connect(&controller);

        controller.borrow_mut().navigate_to(Page::UserLogin);
        controller.borrow_mut().navigate_to(Page::ForgotPassword);
        clock.advance(Duration::seconds(1));

        assert!(host.simulate_back());
        assert_eq!(controller.borrow().current_page(), Page::UserLogin);
        assert!(controller.borrow().can_go_forward());

        assert!(host.simulate_forward());
        assert_eq!(controller.borrow().current_page(), Page::ForgotPassword);

        host.simulate_fragment("employer-login");
        assert_eq!(controller.borrow().current_page(), Page::EmployerLogin);
        assert_eq!(controller.borrow().history().len(), 4);

        drop(subscription);
        assert_eq!(host.listener_count(), 0);
        host.simulate_fragment("dashboard");
        assert_eq!(controller.borrow().current_page(), Page::EmployerLogin);
    }

    #[test]
    fn test_connect_with_echoing_host() {
        let host = MemoryHost::new("landing").with_echoes();
        let clock = ManualClock::default();
        let controller = Rc::new(RefCell::new(NavigationController::new(
            host.clone(),
            clock.clone(),
            &NavigationConfig::default(),
        )));
        let _subscription = NavigationController::connect(&controller);

        controller.borrow_mut().navigate_to(Page::UserLogin);
        controller.borrow_mut().go_back();
        assert!(controller.borrow().is_settling());

        // The host reports our own back() after we released the borrow
        assert_eq!(host.deliver_echoes(), 1);
        let controller = controller.borrow();
        assert!(!controller.is_settling());
        assert_eq!(controller.current_page(), Page::Landing);
        assert_eq!(controller.history(), &[Page::Landing, Page::UserLogin]);
        assert!(controller.can_go_forward());
    }

    #[test]
    fn test_observer_sees_every_change() {
        let (mut controller, _, clock) = controller_at("");
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        controller.set_observer(move |snapshot| sink.borrow_mut().push(snapshot.current));

        controller.navigate_to(Page::UserLogin);
        controller.navigate_to(Page::UserLogin);
        controller.go_back();
        controller.go_forward();
        clock.advance(Duration::seconds(1));
        controller.handle_external_change(&LocatorChange::external("dashboard"));

        assert_eq!(
            *seen.borrow(),
            vec![Page::UserLogin, Page::Landing, Page::UserLogin, Page::Dashboard]
        );
    }
}
