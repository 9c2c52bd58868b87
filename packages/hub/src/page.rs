//! # Pages and locators
//!
//! A [`Page`] is one screen of the client. The native locator (the URL
//! fragment) names a page and may carry a query, e.g. the password-reset link
//! `#reset-password?token=…`. [`Locator`] is the parsed form of that fragment.
//! Only the segment before `?` is matched against the page set.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// A screen in the closed navigation set.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Page {
    #[default]
    Landing,
    WalletConnect,
    ProfileSetup,
    Dashboard,
    EmployerLogin,
    EmployerDashboard,
    InstitutionDashboard,
    IdVerification,
    UserLogin,
    ForgotPassword,
    ResetPassword,
}

impl Page {
    pub const ALL: [Page; 11] = [
        Page::Landing,
        Page::WalletConnect,
        Page::ProfileSetup,
        Page::Dashboard,
        Page::EmployerLogin,
        Page::EmployerDashboard,
        Page::InstitutionDashboard,
        Page::IdVerification,
        Page::UserLogin,
        Page::ForgotPassword,
        Page::ResetPassword,
    ];

    /// The fragment name of this page, e.g. `"wallet-connect"`.
    pub fn as_str(self) -> &'static str {
        match self {
            Page::Landing => "landing",
            Page::WalletConnect => "wallet-connect",
            Page::ProfileSetup => "profile-setup",
            Page::Dashboard => "dashboard",
            Page::EmployerLogin => "employer-login",
            Page::EmployerDashboard => "employer-dashboard",
            Page::InstitutionDashboard => "institution-dashboard",
            Page::IdVerification => "id-verification",
            Page::UserLogin => "user-login",
            Page::ForgotPassword => "forgot-password",
            Page::ResetPassword => "reset-password",
        }
    }
}

impl fmt::Display for Page {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A fragment that does not name any [`Page`].
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("unknown page: {0:?}")]
pub struct UnknownPage(pub String);

impl FromStr for Page {
    type Err = UnknownPage;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Page::ALL
            .into_iter()
            .find(|page| page.as_str() == s)
            .ok_or_else(|| UnknownPage(s.to_string()))
    }
}

/// A parsed native locator: a page plus optional query parameters.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Locator {
    page: Page,
    query: Vec<(String, String)>,
}

impl Locator {
    pub fn new(page: Page) -> Self {
        Self {
            page,
            query: Vec::new(),
        }
    }

    /// Builder method to append a query parameter.
    pub fn with_param(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((name.into(), value.into()));
        self
    }

    /// Parse a fragment such as `"#reset-password?token=abc"`.
    ///
    /// Returns `None` when the page segment is empty or not a known page.
    pub fn parse(fragment: &str) -> Option<Self> {
        let fragment = fragment.strip_prefix('#').unwrap_or(fragment);
        let (segment, query) = match fragment.split_once('?') {
            Some((segment, query)) => (segment, query),
            None => (fragment, ""),
        };
        let page = segment.parse::<Page>().ok()?;

        let query = query
            .split('&')
            .filter(|pair| !pair.is_empty())
            .map(|pair| {
                let (name, value) = pair.split_once('=').unwrap_or((pair, ""));
                (decode(name), decode(value))
            })
            .collect();

        Some(Self { page, query })
    }

    pub fn page(&self) -> Page {
        self.page
    }

    /// First value of the query parameter `name`.
    pub fn param(&self, name: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    /// Render as a fragment without the leading `#`.
    pub fn to_fragment(&self) -> String {
        let mut out = self.page.as_str().to_string();
        for (i, (name, value)) in self.query.iter().enumerate() {
            out.push(if i == 0 { '?' } else { '&' });
            out.push_str(&urlencoding::encode(name));
            out.push('=');
            out.push_str(&urlencoding::encode(value));
        }
        out
    }
}

impl From<Page> for Locator {
    fn from(page: Page) -> Self {
        Locator::new(page)
    }
}

fn decode(raw: &str) -> String {
    urlencoding::decode(raw)
        .map(|s| s.into_owned())
        .unwrap_or_else(|_| raw.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_page_parses_from_its_name() {
        for page in Page::ALL {
            assert_eq!(page.as_str().parse::<Page>(), Ok(page));
            assert_eq!(page.to_string(), page.as_str());
        }
        assert_eq!(
            "settings".parse::<Page>(),
            Err(UnknownPage("settings".to_string()))
        );
    }

    #[test]
    fn test_serde_uses_fragment_names() {
        let json = serde_json::to_string(&Page::InstitutionDashboard).unwrap();
        assert_eq!(json, r#""institution-dashboard""#);
        let page: Page = serde_json::from_str(r#""id-verification""#).unwrap();
        assert_eq!(page, Page::IdVerification);
    }

    #[test]
    fn test_parse_plain_fragment() {
        let locator = Locator::parse("#wallet-connect").unwrap();
        assert_eq!(locator.page(), Page::WalletConnect);
        assert!(locator.param("token").is_none());

        // Leading '#' is optional
        assert_eq!(Locator::parse("dashboard").unwrap().page(), Page::Dashboard);
    }

    #[test]
    fn test_parse_rejects_unknown_and_empty() {
        assert!(Locator::parse("").is_none());
        assert!(Locator::parse("#").is_none());
        assert!(Locator::parse("#nowhere").is_none());
        assert!(Locator::parse("#?token=abc").is_none());
        // Case matters
        assert!(Locator::parse("#Landing").is_none());
    }

    #[test]
    fn test_parse_reset_link_query() {
        let locator = Locator::parse("#reset-password?token=ab%2Fcd&x=1&flag").unwrap();
        assert_eq!(locator.page(), Page::ResetPassword);
        assert_eq!(locator.param("token"), Some("ab/cd"));
        assert_eq!(locator.param("x"), Some("1"));
        assert_eq!(locator.param("flag"), Some(""));
        assert!(locator.param("missing").is_none());
    }

    #[test]
    fn test_to_fragment() {
        assert_eq!(Locator::new(Page::UserLogin).to_fragment(), "user-login");
        let locator = Locator::new(Page::ResetPassword).with_param("token", "a b");
        assert_eq!(locator.to_fragment(), "reset-password?token=a%20b");
        assert_eq!(Locator::parse(&locator.to_fragment()), Some(locator));
    }
}
