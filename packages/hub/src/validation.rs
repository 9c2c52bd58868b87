//! Shape checks for form input.
//!
//! These run before an operation is attempted; a failure is shown to the user
//! and nothing is stored.

use std::fmt;

/// Characters that satisfy the password "special character" rule.
const PASSWORD_SPECIALS: &str = "!@#$%^&*()+-=[]{};':\"\\|,.<>/?";

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Please fill in all fields")]
    Missing,
    #[error("{0} is required")]
    Required(&'static str),
    #[error("Please enter a valid email address")]
    Email,
    #[error("Please enter a valid age (1-150)")]
    Age,
    #[error("Last 4 SSN must be exactly 4 digits")]
    LastFourSsn,
    #[error("Please enter a valid phone number")]
    Phone,
    #[error("Password must have: {}", join_rules(.0))]
    Password(Vec<PasswordRule>),
    #[error("Passwords do not match")]
    PasswordMismatch,
    #[error("Please enter a valid wallet address")]
    WalletAddress,
}

/// One requirement a password failed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PasswordRule {
    MinLength,
    Uppercase,
    Lowercase,
    Special,
    NoSpacesOrUnderscores,
}

impl fmt::Display for PasswordRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            PasswordRule::MinLength => "at least 6 characters long",
            PasswordRule::Uppercase => "one uppercase letter",
            PasswordRule::Lowercase => "one lowercase letter",
            PasswordRule::Special => "one special character",
            PasswordRule::NoSpacesOrUnderscores => "no spaces or underscores",
        })
    }
}

fn join_rules(rules: &[PasswordRule]) -> String {
    rules
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// `local@domain.tld`: no whitespace, one `@`, a dot somewhere after it with
/// non-empty text on both sides. Returns the trimmed, lowercased address.
pub fn validate_email(email: &str) -> Result<String, ValidationError> {
    let email = email.trim();
    if email.is_empty() {
        return Err(ValidationError::Missing);
    }
    if email.chars().any(char::is_whitespace) {
        return Err(ValidationError::Email);
    }
    let (local, domain) = email.split_once('@').ok_or(ValidationError::Email)?;
    if local.is_empty() || domain.contains('@') {
        return Err(ValidationError::Email);
    }
    let (host, tld) = domain.rsplit_once('.').ok_or(ValidationError::Email)?;
    if host.is_empty() || tld.is_empty() {
        return Err(ValidationError::Email);
    }
    Ok(email.to_lowercase())
}

/// A whole number of years between 1 and 150.
pub fn validate_age(age: &str) -> Result<u8, ValidationError> {
    let age = age.trim();
    if age.is_empty() {
        return Err(ValidationError::Missing);
    }
    match age.parse::<u8>() {
        Ok(n) if (1..=150).contains(&n) => Ok(n),
        _ => Err(ValidationError::Age),
    }
}

pub fn validate_last_four_ssn(ssn: &str) -> Result<(), ValidationError> {
    let ssn = ssn.trim();
    if ssn.is_empty() {
        return Err(ValidationError::Missing);
    }
    if ssn.len() == 4 && ssn.bytes().all(|b| b.is_ascii_digit()) {
        Ok(())
    } else {
        Err(ValidationError::LastFourSsn)
    }
}

/// 7 to 15 digits, optionally separated by `+ - ( ) .` or spaces.
pub fn validate_phone(phone: &str) -> Result<(), ValidationError> {
    let phone = phone.trim();
    if phone.is_empty() {
        return Err(ValidationError::Missing);
    }
    let mut digits = 0;
    for c in phone.chars() {
        match c {
            '0'..='9' => digits += 1,
            '+' | '-' | '(' | ')' | '.' | ' ' => {}
            _ => return Err(ValidationError::Phone),
        }
    }
    if (7..=15).contains(&digits) {
        Ok(())
    } else {
        Err(ValidationError::Phone)
    }
}

/// An EVM account address: `0x` followed by 40 hex digits. Returned trimmed,
/// with its original casing.
pub fn validate_wallet_address(address: &str) -> Result<String, ValidationError> {
    let address = address.trim();
    if address.is_empty() {
        return Err(ValidationError::Missing);
    }
    let hex = address
        .strip_prefix("0x")
        .or_else(|| address.strip_prefix("0X"))
        .ok_or(ValidationError::WalletAddress)?;
    if hex.len() == 40 && hex.bytes().all(|b| b.is_ascii_hexdigit()) {
        Ok(address.to_string())
    } else {
        Err(ValidationError::WalletAddress)
    }
}

/// Every rule `password` breaks, in display order.
pub fn password_violations(password: &str) -> Vec<PasswordRule> {
    let mut broken = Vec::new();
    if password.chars().count() < 6 {
        broken.push(PasswordRule::MinLength);
    }
    if !password.chars().any(|c| c.is_ascii_uppercase()) {
        broken.push(PasswordRule::Uppercase);
    }
    if !password.chars().any(|c| c.is_ascii_lowercase()) {
        broken.push(PasswordRule::Lowercase);
    }
    if !password.chars().any(|c| PASSWORD_SPECIALS.contains(c)) {
        broken.push(PasswordRule::Special);
    }
    if password.chars().any(|c| c.is_whitespace() || c == '_') {
        broken.push(PasswordRule::NoSpacesOrUnderscores);
    }
    broken
}

pub fn validate_password(password: &str) -> Result<(), ValidationError> {
    if password.is_empty() {
        return Err(ValidationError::Missing);
    }
    let broken = password_violations(password);
    if broken.is_empty() {
        Ok(())
    } else {
        Err(ValidationError::Password(broken))
    }
}

/// Validate a new password and its confirmation together.
pub fn validate_new_password(password: &str, confirm: &str) -> Result<(), ValidationError> {
    if password.is_empty() || confirm.is_empty() {
        return Err(ValidationError::Missing);
    }
    validate_password(password)?;
    if password != confirm {
        return Err(ValidationError::PasswordMismatch);
    }
    Ok(())
}
