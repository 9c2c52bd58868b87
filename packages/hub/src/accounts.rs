//! # Accounts: session persistence and the demo credential-reset flow
//!
//! [`AccountService`] owns the in-memory [`UserSession`] and mirrors it into
//! the persistent store: the blob is written while the session has a wallet
//! address and deleted otherwise. It also keeps the registered-email set and
//! the password-reset token map.
//!
//! None of this is an authentication boundary. Every operation reports "not
//! found" as `false`; storage failures and malformed blobs are logged and
//! treated as absent data.
//!
//! | Method | Persisted keys touched |
//! |--------|------------------------|
//! | [`login`](AccountService::login) | `userData`, tab-scoped `isLogin` |
//! | [`logout`](AccountService::logout) | `userData`, `isLogin` |
//! | [`send_password_reset_email`](AccountService::send_password_reset_email) | `resetTokens`, `sentEmails` |
//! | [`reset_password`](AccountService::reset_password) | `userData`, `resetTokens` |
//! | [`check_email_exists`](AccountService::check_email_exists) | reads `registeredUsers`, `userData` |
//! | [`register_user`](AccountService::register_user) | `registeredUsers` |
//! | [`connect_wallet`](AccountService::connect_wallet) | `userData` |
//! | [`complete_profile`](AccountService::complete_profile) | `userData`, `registeredUsers`, `sentEmails` |

use chrono::{DateTime, Utc};
use store::{read_json, try_read_json, write_json, KeyValueStore};

use crate::clock::{Clock, SystemClock};
use crate::config::HubConfig;
use crate::mail::{log_sent_email, EmailMessage, Mailer};
use crate::page::{Locator, Page};
use crate::password::{accepts, hash_password};
use crate::profile::{ProfileError, ProfileForm, WalletConnection};
use crate::session::{EmployerProfile, UserSession};
use crate::tokens::{self, PasswordResetToken, ResetTokens};

/// Full storage key names, derived from the configured prefix.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StorageKeys {
    pub user_data: String,
    pub registered_users: String,
    pub reset_tokens: String,
    pub sent_emails: String,
    pub is_login: String,
}

impl StorageKeys {
    pub fn with_prefix(prefix: &str) -> Self {
        Self {
            user_data: format!("{prefix}userData"),
            registered_users: format!("{prefix}registeredUsers"),
            reset_tokens: format!("{prefix}resetTokens"),
            sent_emails: format!("{prefix}sentEmails"),
            is_login: format!("{prefix}isLogin"),
        }
    }
}

impl Default for StorageKeys {
    fn default() -> Self {
        Self::with_prefix(&crate::config::StorageConfig::default().key_prefix)
    }
}

/// Session owner and credential helpers.
///
/// `S` is the persistent store, `F` the tab-scoped flag store.
pub struct AccountService<S, F, M, C = SystemClock> {
    store: S,
    flags: F,
    mailer: M,
    clock: C,
    config: HubConfig,
    keys: StorageKeys,
    user: UserSession,
    employer: EmployerProfile,
}

impl<S, F, M, C> AccountService<S, F, M, C>
where
    S: KeyValueStore,
    F: KeyValueStore,
    M: Mailer,
    C: Clock,
{
    /// Build the service and restore any persisted session.
    pub fn new(store: S, flags: F, mailer: M, clock: C, config: HubConfig) -> Self {
        let keys = StorageKeys::with_prefix(&config.storage.key_prefix);
        let user = try_read_json(&store, &keys.user_data).unwrap_or_default();
        Self {
            store,
            flags,
            mailer,
            clock,
            config,
            keys,
            user,
            employer: EmployerProfile::default(),
        }
    }

    pub fn keys(&self) -> &StorageKeys {
        &self.keys
    }

    pub fn config(&self) -> &HubConfig {
        &self.config
    }

    pub fn user(&self) -> &UserSession {
        &self.user
    }

    /// Modify the in-memory session, then mirror it into storage.
    pub fn update_user(&mut self, update: impl FnOnce(&mut UserSession)) {
        update(&mut self.user);
        self.persist_user();
    }

    pub fn employer(&self) -> &EmployerProfile {
        &self.employer
    }

    pub fn update_employer(&mut self, update: impl FnOnce(&mut EmployerProfile)) {
        update(&mut self.employer);
    }

    fn persist_user(&self) {
        let result = if self.user.is_logged_in() {
            write_json(&self.store, &self.keys.user_data, &self.user)
        } else {
            self.store.remove(&self.keys.user_data)
        };
        if let Err(e) = result {
            tracing::error!("Failed to save user data: {}", e);
        }
    }

    fn persisted_user(&self) -> Option<UserSession> {
        try_read_json(&self.store, &self.keys.user_data)
    }

    /// Clear the session and its persisted copy. The caller navigates to
    /// [`Page::Landing`].
    pub fn logout(&mut self) {
        self.user = UserSession::default();
        if let Err(e) = self.store.remove(&self.keys.user_data) {
            tracing::error!("Failed to clear user data: {}", e);
        }
        if let Err(e) = self.flags.remove(&self.keys.is_login) {
            tracing::warn!("Failed to clear login flag: {}", e);
        }
        tracing::info!("User logged out");
    }

    /// Sign in with `email`.
    ///
    /// Restores the persisted session, overlays the configured display name
    /// and the lowercased email, and stores the result. Any non-empty pair is
    /// accepted unless `auth.require_password` is set and the persisted
    /// session for this email carries a password hash that does not match.
    /// On `true` the caller navigates to [`Page::Dashboard`].
    pub fn login(&mut self, email: &str, password: &str) -> bool {
        let email = email.trim().to_lowercase();
        if email.is_empty() || password.is_empty() {
            return false;
        }

        let mut session = self.persisted_user().unwrap_or_default();

        if self.config.auth.require_password && session.has_email(&email) {
            match accepts(session.password.as_deref(), password) {
                Ok(true) => {}
                Ok(false) => {
                    tracing::info!("Rejected login for {}", email);
                    return false;
                }
                Err(e) => {
                    tracing::warn!("Stored password for {} is unusable: {}", email, e);
                    return false;
                }
            }
        }

        if let Err(e) = self.flags.set(&self.keys.is_login, "true") {
            tracing::warn!("Failed to set login flag: {}", e);
        }

        session.first_name = Some(self.config.auth.display_first_name.clone());
        session.last_name = Some(self.config.auth.display_last_name.clone());
        session.email = Some(email.clone());
        self.user = session;
        self.persist_user();

        tracing::info!("User logged in with email: {}", email);
        true
    }

    /// Whether this tab entered through the login flow rather than sign-up.
    pub fn is_login_flow(&self) -> bool {
        matches!(self.flags.get(&self.keys.is_login), Ok(Some(flag)) if flag == "true")
    }

    /// Issue a reset token for `email` and mail the reset link.
    ///
    /// Returns `false` unless a persisted session with this email exists
    /// (case-insensitive). A new token replaces any previous one for the same
    /// email. Mail delivery problems are logged and never change the result.
    pub fn send_password_reset_email(&mut self, email: &str) -> bool {
        let email = email.trim().to_lowercase();
        if email.is_empty() {
            return false;
        }
        let matches = self
            .persisted_user()
            .is_some_and(|session| session.has_email(&email));
        if !matches {
            tracing::debug!("No stored session for {}, not sending reset", email);
            return false;
        }

        let now = self.clock.now();
        let ttl = self.config.reset.token_ttl();
        let mut tokens: ResetTokens = read_json(&self.store, &self.keys.reset_tokens);
        tokens.retain(|_, entry| entry.is_live(now));

        let expires_at = now
            .checked_add_signed(ttl)
            .unwrap_or(DateTime::<Utc>::MAX_UTC);
        let entry = PasswordResetToken::generate(expires_at);
        let link = format!(
            "{}#{}",
            self.config.reset.reset_link_base,
            Locator::new(Page::ResetPassword)
                .with_param("token", entry.token.as_str())
                .to_fragment()
        );
        tokens.insert(email.clone(), entry);

        if let Err(e) = write_json(&self.store, &self.keys.reset_tokens, &tokens) {
            tracing::error!("Failed to store reset token: {}", e);
            return false;
        }

        self.deliver(&EmailMessage::password_reset(&email, &link, ttl));

        tracing::info!("Password reset requested for {}", email);
        true
    }

    /// Set a new password using a live reset token. Single use.
    ///
    /// Unknown and expired tokens both return `false` and leave the stored
    /// session untouched.
    pub fn reset_password(&mut self, token: &str, new_password: &str) -> bool {
        if token.is_empty() || new_password.is_empty() {
            return false;
        }

        let now = self.clock.now();
        let mut tokens: ResetTokens = read_json(&self.store, &self.keys.reset_tokens);
        let Some(owner) = tokens::find_live(&tokens, token, now).map(str::to_string) else {
            return false;
        };

        let Some(mut session) = self.persisted_user().filter(|s| s.has_email(&owner)) else {
            tracing::warn!("Reset token for {} has no matching stored session", owner);
            return false;
        };

        let hash = match hash_password(new_password) {
            Ok(hash) => hash,
            Err(e) => {
                tracing::error!("Failed to hash new password: {}", e);
                return false;
            }
        };
        session.password = Some(hash);

        if let Err(e) = write_json(&self.store, &self.keys.user_data, &session) {
            tracing::error!("Failed to save reset password: {}", e);
            return false;
        }
        self.user = session;

        tokens.remove(&owner);
        if let Err(e) = write_json(&self.store, &self.keys.reset_tokens, &tokens) {
            tracing::error!("Failed to consume reset token: {}", e);
        }

        tracing::info!("Password reset successful for: {}", owner);
        true
    }

    /// Hand `message` to the mailer. A failure is logged and recorded in the
    /// sent-email log with its error.
    fn deliver(&self, message: &EmailMessage) {
        let Err(e) = self.mailer.send(message) else {
            return;
        };
        tracing::warn!("Failed to send {:?} email to {}: {}", message.kind, message.to, e);
        if let Err(e) = log_sent_email(
            &self.store,
            &self.keys.sent_emails,
            message,
            self.clock.now(),
            Some(e.to_string()),
        ) {
            tracing::error!("Failed to record unsent email: {}", e);
        }
    }

    /// Record the connected wallet. The session is persisted from here on.
    /// The caller navigates to [`Page::ProfileSetup`].
    pub fn connect_wallet(&mut self, connection: &WalletConnection) {
        self.update_user(|user| connection.apply(user));
        tracing::info!(
            "Wallet {} connected on {}",
            connection.address,
            connection.network
        );
    }

    /// Validate and store the profile-setup form.
    ///
    /// A new email that already belongs to another account is refused. On
    /// success a new email is registered and sent a confirmation mail. The
    /// caller navigates to [`Page::Dashboard`].
    pub fn complete_profile(&mut self, form: &ProfileForm) -> Result<(), ProfileError> {
        if !self.user.is_logged_in() {
            return Err(ProfileError::NoWallet);
        }
        let update = form.validate()?;

        let new_email = update
            .email
            .as_deref()
            .filter(|email| !self.user.has_email(email));
        if let Some(email) = new_email {
            if self.check_email_exists(email) {
                return Err(ProfileError::EmailTaken(email.to_string()));
            }
        }
        let new_email = new_email.map(str::to_string);

        self.update_user(|user| update.apply(user));
        if let Some(email) = new_email {
            self.register_user(&email);
            self.send_confirmation_email(&email);
        }
        tracing::info!("Profile saved for {}", update.first_name);
        Ok(())
    }

    /// Mail `email` a confirmation link back to the sign-in page.
    pub fn send_confirmation_email(&self, email: &str) {
        let link = format!(
            "{}#{}",
            self.config.reset.reset_link_base,
            Locator::new(Page::UserLogin)
                .with_param("confirm", email)
                .to_fragment()
        );
        self.deliver(&EmailMessage::confirmation(email, &link));
    }

    /// Whether `email` is already known: registered, in the active session,
    /// or in the persisted session.
    pub fn check_email_exists(&self, email: &str) -> bool {
        let email = email.trim().to_lowercase();
        if email.is_empty() {
            return false;
        }
        let registered: Vec<String> = read_json(&self.store, &self.keys.registered_users);
        registered.contains(&email)
            || self.user.has_email(&email)
            || self
                .persisted_user()
                .is_some_and(|session| session.has_email(&email))
    }

    /// Add `email` to the registered set. Idempotent.
    pub fn register_user(&self, email: &str) {
        let email = email.trim().to_lowercase();
        if email.is_empty() {
            return;
        }
        let mut registered: Vec<String> = read_json(&self.store, &self.keys.registered_users);
        if registered.contains(&email) {
            return;
        }
        registered.push(email.clone());
        match write_json(&self.store, &self.keys.registered_users, &registered) {
            Ok(()) => tracing::info!("Registered user email: {}", email),
            Err(e) => tracing::error!("Failed to register user: {}", e),
        }
    }

    /// Drop expired entries from the token map. Returns how many were removed.
    pub fn prune_expired_tokens(&self) -> usize {
        let now = self.clock.now();
        let mut tokens: ResetTokens = read_json(&self.store, &self.keys.reset_tokens);
        let before = tokens.len();
        tokens.retain(|_, entry| entry.is_live(now));
        let removed = before - tokens.len();
        if removed > 0 {
            if let Err(e) = write_json(&self.store, &self.keys.reset_tokens, &tokens) {
                tracing::error!("Failed to prune reset tokens: {}", e);
                return 0;
            }
        }
        removed
    }
}
