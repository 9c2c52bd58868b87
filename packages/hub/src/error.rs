//! Error type for the fallible internals of the client core.
//!
//! The operations page components call report "not found" as `false`; these
//! errors only describe genuinely unexpected failures, which are logged where
//! they are swallowed.

use store::StoreError;

use crate::config::ConfigError;
use crate::mail::MailError;
use crate::validation::ValidationError;

#[derive(Debug, thiserror::Error)]
pub enum HubError {
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Mail(#[from] MailError),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("password hashing failed: {0}")]
    PasswordHash(String),
}
