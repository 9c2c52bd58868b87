//! # CredentialHub client core
//!
//! The navigation state machine and the account/session helpers behind the
//! CredentialHub client. Nothing here touches a DOM directly: the platform's
//! history facility comes in through [`LocatorHost`], storage through
//! [`store::KeyValueStore`], time through [`Clock`]. The `ui` crate wires the
//! browser implementations in; tests use [`MemoryHost`], [`store::MemoryStore`]
//! and [`ManualClock`].
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`page`] | The closed set of [`Page`]s and the [`Locator`] fragment parser |
//! | [`history`] | [`NavigationHistory`]: visited pages plus a cursor |
//! | [`host`] | [`LocatorHost`] trait, [`Subscription`] handles, in-memory [`MemoryHost`] |
//! | [`controller`] | [`NavigationController`]: history kept in sync with the host |
//! | [`session`] | [`UserSession`] and [`EmployerProfile`] records |
//! | [`accounts`] | [`AccountService`]: login, logout, sign-up, password reset, email registry |
//! | [`profile`] | Wallet connection and profile-setup form |
//! | [`tokens`] | Password-reset tokens |
//! | [`mail`] | Outbound mail abstraction and the demo mail log |
//! | [`validation`] | Form input shape checks |
//! | [`config`] | [`HubConfig`], loaded from `credentialhub.toml` |

pub mod accounts;
pub mod clock;
pub mod config;
pub mod controller;
pub mod error;
pub mod history;
pub mod host;
pub mod mail;
pub mod page;
pub mod password;
pub mod profile;
pub mod session;
pub mod tokens;
pub mod validation;

pub use accounts::{AccountService, StorageKeys};
pub use clock::{Clock, ManualClock, SystemClock};
pub use config::HubConfig;
pub use controller::{NavigationController, NavigationSnapshot};
pub use error::HubError;
pub use history::NavigationHistory;
pub use host::{HostCall, LocatorChange, LocatorHost, MemoryHost, Subscription, TransitionId};
pub use mail::{DemoMailer, EmailKind, EmailMessage, Mailer};
pub use page::{Locator, Page, UnknownPage};
pub use profile::{Network, ProfileError, ProfileForm, ProfileUpdate, WalletConnection};
pub use session::{AccountType, Attachment, Education, EmployerProfile, UserSession, WorkExperience};
pub use tokens::PasswordResetToken;
pub use validation::ValidationError;
