//! # Sign-up: wallet connection and profile setup
//!
//! Sign-up is two steps. [`WalletConnection`] records the wallet the user
//! connected. Its address is what makes a [`UserSession`] count as logged in
//! and therefore persisted. [`ProfileForm`] is the raw profile-setup input;
//! [`ProfileForm::validate`] checks it field by field in form order and yields
//! a [`ProfileUpdate`] that can be merged into the session.
//!
//! The account-side steps (duplicate-email check, registration, confirmation
//! mail) live in [`AccountService`](crate::AccountService).

use std::fmt;

use crate::session::UserSession;
use crate::validation::{
    validate_age, validate_email, validate_last_four_ssn, validate_phone,
    validate_wallet_address, ValidationError,
};

/// Wallet type recorded for every connection made from this client.
pub const DEFAULT_WALLET_TYPE: &str = "Gemini Wallet";

/// Chains the wallet may report.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Network {
    #[default]
    Mainnet,
    Arbitrum,
    Base,
    Polygon,
    Optimism,
}

impl Network {
    pub const ALL: [Network; 5] = [
        Network::Mainnet,
        Network::Arbitrum,
        Network::Base,
        Network::Polygon,
        Network::Optimism,
    ];

    /// Unknown chain ids fall back to [`Network::Mainnet`].
    pub fn from_chain_id(chain_id: u64) -> Self {
        match chain_id {
            42161 => Network::Arbitrum,
            8453 => Network::Base,
            137 => Network::Polygon,
            10 => Network::Optimism,
            _ => Network::Mainnet,
        }
    }

    pub fn chain_id(self) -> u64 {
        match self {
            Network::Mainnet => 1,
            Network::Arbitrum => 42161,
            Network::Base => 8453,
            Network::Polygon => 137,
            Network::Optimism => 10,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Network::Mainnet => "mainnet",
            Network::Arbitrum => "arbitrum",
            Network::Base => "base",
            Network::Polygon => "polygon",
            Network::Optimism => "optimism",
        }
    }

    /// Parse a stored network name. Unknown names fall back to mainnet.
    pub fn from_name(name: &str) -> Self {
        Network::ALL
            .into_iter()
            .find(|network| network.as_str() == name)
            .unwrap_or_default()
    }
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WalletConnection {
    pub address: String,
    pub wallet_type: String,
    pub network: Network,
}

impl WalletConnection {
    /// Validate `address` and build a connection on `network`.
    pub fn new(address: &str, network: Network) -> Result<Self, ValidationError> {
        Ok(Self {
            address: validate_wallet_address(address)?,
            wallet_type: DEFAULT_WALLET_TYPE.to_string(),
            network,
        })
    }

    pub fn apply(&self, session: &mut UserSession) {
        session.wallet_address = Some(self.address.clone());
        session.wallet_type = Some(self.wallet_type.clone());
        session.network = Some(self.network.to_string());
    }
}

/// Raw profile-setup input, as typed.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ProfileForm {
    pub first_name: String,
    pub last_name: String,
    pub gender: String,
    pub age: String,
    pub last_four_ssn: String,
    /// Optional.
    pub email: String,
    /// Optional.
    pub phone: String,
}

/// A [`ProfileForm`] that passed validation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProfileUpdate {
    pub first_name: String,
    pub last_name: String,
    pub gender: String,
    pub age: u8,
    pub last_four_ssn: String,
    pub email: Option<String>,
    pub phone: Option<String>,
}

fn required(value: &str, field: &'static str) -> Result<String, ValidationError> {
    let value = value.trim();
    if value.is_empty() {
        Err(ValidationError::Required(field))
    } else {
        Ok(value.to_string())
    }
}

impl ProfileForm {
    /// Check every field in form order and stop at the first problem.
    pub fn validate(&self) -> Result<ProfileUpdate, ValidationError> {
        let first_name = required(&self.first_name, "First name")?;
        let last_name = required(&self.last_name, "Last name")?;
        required(&self.age, "Age")?;
        let age = validate_age(&self.age)?;
        let gender = required(&self.gender, "Gender")?;
        let last_four_ssn = required(&self.last_four_ssn, "Last 4 digits of SSN")?;
        validate_last_four_ssn(&last_four_ssn)?;

        let email = match self.email.trim() {
            "" => None,
            email => Some(validate_email(email)?),
        };
        let phone = match self.phone.trim() {
            "" => None,
            phone => {
                validate_phone(phone)?;
                Some(phone.to_string())
            }
        };

        Ok(ProfileUpdate {
            first_name,
            last_name,
            gender,
            age,
            last_four_ssn,
            email,
            phone,
        })
    }
}

impl ProfileUpdate {
    /// Merge into `session`. Education and work history are left alone.
    pub fn apply(&self, session: &mut UserSession) {
        session.first_name = Some(self.first_name.clone());
        session.last_name = Some(self.last_name.clone());
        session.gender = Some(self.gender.clone());
        session.age = Some(self.age.to_string());
        session.last_four_ssn = Some(self.last_four_ssn.clone());
        if let Some(email) = &self.email {
            session.email = Some(email.clone());
        }
        if let Some(phone) = &self.phone {
            session.phone = Some(phone.clone());
        }
    }
}

/// Why profile setup was refused.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ProfileError {
    #[error("Please connect your wallet first")]
    NoWallet,
    #[error(transparent)]
    Invalid(#[from] ValidationError),
    #[error("An account with {0} already exists. Please sign in instead.")]
    EmailTaken(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::Education;

    fn filled() -> ProfileForm {
        ProfileForm {
            first_name: " Ada ".into(),
            last_name: "Lovelace".into(),
            gender: "female".into(),
            age: "36".into(),
            last_four_ssn: "1815".into(),
            ..Default::default()
        }
    }

    #[test]
    fn test_network_from_chain_id() {
        assert_eq!(Network::from_chain_id(137), Network::Polygon);
        assert_eq!(Network::from_chain_id(999_999), Network::Mainnet);
        for network in Network::ALL {
            assert_eq!(Network::from_chain_id(network.chain_id()), network);
            assert_eq!(Network::from_name(network.as_str()), network);
        }
    }

    #[test]
    fn test_wallet_connection_applies_to_session() {
        let connection =
            WalletConnection::new("0x52908400098527886E0F7030069857D2E4169EE7", Network::Base)
                .unwrap();
        let mut session = UserSession::default();
        connection.apply(&mut session);
        assert!(session.is_logged_in());
        assert_eq!(session.wallet_type.as_deref(), Some("Gemini Wallet"));
        assert_eq!(session.network.as_deref(), Some("base"));

        assert_eq!(
            WalletConnection::new("not-a-wallet", Network::Mainnet),
            Err(ValidationError::WalletAddress)
        );
    }

    #[test]
    fn test_validate_reports_first_problem_in_form_order() {
        let cases = [
            (ProfileForm { first_name: " ".into(), ..filled() }, ValidationError::Required("First name")),
            (ProfileForm { last_name: "".into(), ..filled() }, ValidationError::Required("Last name")),
            (ProfileForm { age: "".into(), gender: "".into(), ..filled() }, ValidationError::Required("Age")),
            (ProfileForm { age: "200".into(), ..filled() }, ValidationError::Age),
            (ProfileForm { gender: "".into(), ..filled() }, ValidationError::Required("Gender")),
            (ProfileForm { last_four_ssn: "".into(), ..filled() }, ValidationError::Required("Last 4 digits of SSN")),
            (ProfileForm { last_four_ssn: "12a4".into(), ..filled() }, ValidationError::LastFourSsn),
            (ProfileForm { email: "nope".into(), ..filled() }, ValidationError::Email),
            (ProfileForm { phone: "12".into(), ..filled() }, ValidationError::Phone),
        ];
        for (form, expected) in cases {
            assert_eq!(form.validate(), Err(expected.clone()), "{expected}");
        }
    }

    #[test]
    fn test_apply_keeps_history_and_optional_fields() {
        let mut session = UserSession {
            email: Some("kept@x.com".into()),
            education: vec![Education {
                institution: "Cambridge".into(),
                ..Default::default()
            }],
            ..Default::default()
        };

        let update = filled().validate().unwrap();
        assert_eq!(update.first_name, "Ada");
        assert_eq!(update.age, 36);
        update.apply(&mut session);
        assert_eq!(session.email.as_deref(), Some("kept@x.com"));
        assert_eq!(session.age.as_deref(), Some("36"));
        assert_eq!(session.education.len(), 1);

        let update = ProfileForm {
            email: " New@X.com ".into(),
            phone: "+1 (555) 010-0199".into(),
            ..filled()
        }
        .validate()
        .unwrap();
        update.apply(&mut session);
        assert_eq!(session.email.as_deref(), Some("new@x.com"));
        assert_eq!(session.phone.as_deref(), Some("+1 (555) 010-0199"));
    }
}
