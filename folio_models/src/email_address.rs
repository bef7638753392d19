use std::sync::LazyLock;

use nutype::nutype;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// `local@domain.tld` without whitespace, at least one `.` after the `@`.
pub static EMAIL_ADDRESS_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap());

#[nutype(
    validate(regex = EMAIL_ADDRESS_REGEX),
    derive(
        Debug,
        Clone,
        PartialEq,
        Eq,
        Hash,
        Display,
        TryFrom,
        FromStr,
        AsRef,
        Deref,
        Serialize,
        Deserialize
    )
)]
pub struct EmailAddress(String);

impl EmailAddress {
    pub fn with_name(self, name: impl Into<String>) -> Mailbox {
        Mailbox {
            name: Some(name.into()),
            email: self,
        }
    }
}

/// An email address with an optional display name, rendered as `Name <address>`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Mailbox {
    pub name: Option<String>,
    pub email: EmailAddress,
}

impl From<EmailAddress> for Mailbox {
    fn from(email: EmailAddress) -> Self {
        Self { name: None, email }
    }
}

impl std::fmt::Display for Mailbox {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.name.as_deref().map(str::trim).filter(|n| !n.is_empty()) {
            Some(name) => write!(f, "{name} <{}>", self.email),
            None => write!(f, "{}", self.email),
        }
    }
}
