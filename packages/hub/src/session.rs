//! # Session records
//!
//! [`UserSession`] is the active user's profile as entered in the client. It is
//! mirrored into persistent storage while a wallet address is present (the
//! user is "logged in") and removed from storage otherwise. Field names
//! serialize in camelCase so persisted blobs keep the layout the web client
//! has always written (`walletAddress`, `lastFourSSN`, `workExperience`, …).
//!
//! Attachments cannot be serialized; they live only in memory for the current
//! page cycle and are never written or restored.
//!
//! [`EmployerProfile`] is the organization-side counterpart and is never
//! persisted.

use serde::{Deserialize, Serialize};

/// An uploaded file held in memory.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Attachment {
    pub name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Education {
    pub institution: String,
    pub degree: String,
    pub field: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkExperience {
    pub company: String,
    pub position: String,
    pub duration: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// The active user's profile.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserSession {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wallet_address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wallet_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub network: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gender: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub age: Option<String>,
    #[serde(
        default,
        rename = "lastFourSSN",
        skip_serializing_if = "Option::is_none"
    )]
    pub last_four_ssn: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile_image: Option<String>,
    #[serde(skip)]
    pub documents: Vec<Attachment>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    /// Argon2 PHC string once the password has been reset through the client.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    #[serde(default)]
    pub education: Vec<Education>,
    #[serde(default)]
    pub work_experience: Vec<WorkExperience>,
}

impl UserSession {
    /// A session with a wallet address is treated as logged in.
    pub fn is_logged_in(&self) -> bool {
        self.wallet_address
            .as_deref()
            .is_some_and(|address| !address.is_empty())
    }

    /// Case-insensitive match against the stored email.
    pub fn has_email(&self, email: &str) -> bool {
        self.email
            .as_deref()
            .is_some_and(|own| own.eq_ignore_ascii_case(email.trim()))
    }

    /// "First Last", or the email when no name is set.
    pub fn display_name(&self) -> Option<String> {
        let name = [self.first_name.as_deref(), self.last_name.as_deref()]
            .into_iter()
            .flatten()
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>()
            .join(" ");
        if name.is_empty() {
            self.email.clone()
        } else {
            Some(name)
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccountType {
    #[default]
    Employer,
    Institution,
}

/// The signed-in organization, held in memory only.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EmployerProfile {
    pub company_name: Option<String>,
    pub username: Option<String>,
    pub company_logo: Option<String>,
    pub company_about: Option<String>,
    pub account_type: Option<AccountType>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serializes_camel_case_without_documents() {
        let session = UserSession {
            wallet_address: Some("7xKX".into()),
            last_four_ssn: Some("1234".into()),
            documents: vec![Attachment {
                name: "resume.pdf".into(),
                content_type: "application/pdf".into(),
                bytes: vec![1, 2, 3],
            }],
            work_experience: vec![WorkExperience {
                company: "Acme".into(),
                position: "Engineer".into(),
                duration: "2020-2023".into(),
                description: None,
            }],
            ..Default::default()
        };

        let json: serde_json::Value = serde_json::to_value(&session).unwrap();
        assert_eq!(json["walletAddress"], "7xKX");
        assert_eq!(json["lastFourSSN"], "1234");
        assert_eq!(json["workExperience"][0]["company"], "Acme");
        assert!(json.get("documents").is_none());
        assert!(json.get("email").is_none());
    }

    #[test]
    fn test_deserialize_ignores_persisted_documents() {
        let raw = r#"{
            "walletAddress": "abc",
            "email": "A@X.com",
            "documents": [{}, {}],
            "education": [{"institution": "MIT", "degree": "BS", "field": "CS", "year": "2019"}]
        }"#;
        let session: UserSession = serde_json::from_str(raw).unwrap();
        assert!(session.documents.is_empty());
        assert_eq!(session.education[0].year.as_deref(), Some("2019"));
        assert!(session.work_experience.is_empty());
        assert!(session.is_logged_in());
        assert!(session.has_email("a@x.COM"));
    }

    #[test]
    fn test_logged_in_requires_non_empty_wallet() {
        let mut session = UserSession::default();
        assert!(!session.is_logged_in());
        session.wallet_address = Some(String::new());
        assert!(!session.is_logged_in());
    }

    #[test]
    fn test_display_name() {
        let mut session = UserSession {
            email: Some("a@x.com".into()),
            ..Default::default()
        };
        assert_eq!(session.display_name().as_deref(), Some("a@x.com"));
        session.first_name = Some("Ada".into());
        session.last_name = Some("Lovelace".into());
        assert_eq!(session.display_name().as_deref(), Some("Ada Lovelace"));
    }
}
