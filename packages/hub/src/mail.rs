//! # Outbound mail
//!
//! The client never blocks on mail. [`Mailer::send`] failures are logged by the
//! caller and the message is written to the demo mail log instead, so a broken
//! or unconfigured provider never stops a password reset.
//!
//! [`DemoMailer`] is the only provider in this crate: it appends every message
//! to the `sentEmails` log blob (a debugging aid) and logs the embedded link.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use store::{read_json, write_json, KeyValueStore, StoreError};

#[derive(Debug, thiserror::Error)]
pub enum MailError {
    #[error("mail provider not configured")]
    NotConfigured,
    #[error("mail delivery failed: {0}")]
    Delivery(String),
    #[error(transparent)]
    Store(#[from] StoreError),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EmailKind {
    Confirmation,
    PasswordReset,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmailMessage {
    pub to: String,
    pub subject: String,
    pub text: String,
    /// The actionable link embedded in the message.
    pub link: String,
    #[serde(rename = "type")]
    pub kind: EmailKind,
}

impl EmailMessage {
    pub fn password_reset(to: &str, link: &str, ttl: Duration) -> Self {
        let text = format!(
            "Password Reset Request\n\n\
             You requested to reset your password for your CredentialHub account.\n\n\
             Click this link to reset your password:\n{link}\n\n\
             This link will expire in {}.\n\n\
             If you didn't request a password reset, you can safely ignore this email.",
            describe_ttl(ttl)
        );
        Self {
            to: to.to_string(),
            subject: "Reset Your Password - CredentialHub".to_string(),
            text,
            link: link.to_string(),
            kind: EmailKind::PasswordReset,
        }
    }

    pub fn confirmation(to: &str, link: &str) -> Self {
        let text = format!(
            "Welcome to CredentialHub!\n\n\
             Thank you for signing up! Please confirm your email address to complete your registration.\n\n\
             Click this link to confirm your email:\n{link}\n\n\
             If you didn't create an account with CredentialHub, you can safely ignore this email."
        );
        Self {
            to: to.to_string(),
            subject: "Confirm Your Email - CredentialHub".to_string(),
            text,
            link: link.to_string(),
            kind: EmailKind::Confirmation,
        }
    }
}

fn describe_ttl(ttl: Duration) -> String {
    let minutes = ttl.num_minutes();
    if minutes >= 60 && minutes % 60 == 0 {
        match minutes / 60 {
            1 => "1 hour".to_string(),
            hours => format!("{hours} hours"),
        }
    } else if minutes == 1 {
        "1 minute".to_string()
    } else {
        format!("{minutes} minutes")
    }
}

pub trait Mailer {
    fn send(&self, message: &EmailMessage) -> Result<(), MailError>;
}

impl<M: Mailer + ?Sized> Mailer for &M {
    fn send(&self, message: &EmailMessage) -> Result<(), MailError> {
        (**self).send(message)
    }
}

/// One entry of the sent-mail log.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SentEmail {
    #[serde(flatten)]
    pub message: EmailMessage,
    pub sent_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Append `message` to the sent-mail log at `key`.
pub fn log_sent_email<S: KeyValueStore + ?Sized>(
    store: &S,
    key: &str,
    message: &EmailMessage,
    sent_at: DateTime<Utc>,
    error: Option<String>,
) -> Result<(), StoreError> {
    let mut log: Vec<SentEmail> = read_json(store, key);
    log.push(SentEmail {
        message: message.clone(),
        sent_at,
        error,
    });
    write_json(store, key, &log)
}

/// Read back the sent-mail log at `key`.
pub fn sent_emails<S: KeyValueStore + ?Sized>(store: &S, key: &str) -> Vec<SentEmail> {
    read_json(store, key)
}

/// Mailer that records messages in the sent-mail log instead of delivering them.
#[derive(Clone, Debug)]
pub struct DemoMailer<S> {
    store: S,
    key: String,
}

impl<S: KeyValueStore> DemoMailer<S> {
    pub fn new(store: S, key: impl Into<String>) -> Self {
        Self {
            store,
            key: key.into(),
        }
    }

    pub fn sent(&self) -> Vec<SentEmail> {
        sent_emails(&self.store, &self.key)
    }
}

impl<S: KeyValueStore> Mailer for DemoMailer<S> {
    fn send(&self, message: &EmailMessage) -> Result<(), MailError> {
        log_sent_email(&self.store, &self.key, message, Utc::now(), None)?;
        tracing::info!(
            "Demo mail to {} ({:?}): {}",
            message.to,
            message.kind,
            message.link
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use store::MemoryStore;

    #[test]
    fn test_password_reset_message() {
        let message = EmailMessage::password_reset(
            "a@x.com",
            "http://localhost:8080/#reset-password?token=abc",
            Duration::hours(1),
        );
        assert_eq!(message.kind, EmailKind::PasswordReset);
        assert!(message.text.contains("#reset-password?token=abc"));
        assert!(message.text.contains("expire in 1 hour."));
    }

    #[test]
    fn test_describe_ttl() {
        assert_eq!(describe_ttl(Duration::hours(1)), "1 hour");
        assert_eq!(describe_ttl(Duration::hours(3)), "3 hours");
        assert_eq!(describe_ttl(Duration::minutes(90)), "90 minutes");
        assert_eq!(describe_ttl(Duration::minutes(1)), "1 minute");
    }

    #[test]
    fn test_demo_mailer_appends_to_log() {
        let store = MemoryStore::new();
        let mailer = DemoMailer::new(store.clone(), "credentialHub_sentEmails");

        mailer
            .send(&EmailMessage::confirmation("a@x.com", "http://x/#confirm"))
            .unwrap();
        mailer
            .send(&EmailMessage::password_reset("a@x.com", "http://x/#r", Duration::hours(1)))
            .unwrap();

        let sent = mailer.sent();
        assert_eq!(sent.len(), 2);
        assert_eq!(sent[0].message.kind, EmailKind::Confirmation);
        assert_eq!(sent[1].message.link, "http://x/#r");
        assert!(sent[1].error.is_none());

        let raw = store.get("credentialHub_sentEmails").unwrap().unwrap();
        assert!(raw.contains(r#""type":"password-reset""#));
        assert!(raw.contains("sentAt"));
    }
}
