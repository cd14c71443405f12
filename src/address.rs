//! Mailbox addresses.

use crate::{Error, Result};
use rand::Rng;
use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

/// Logins the service refuses to host.
pub const RESERVED_LOGINS: [&str; 6] = [
    "abuse",
    "webmaster",
    "contact",
    "postmaster",
    "hostmaster",
    "admin",
];

const LOGIN_CHARSET: &[u8] = b"abcdefghijklmnopqrstuvwxyz0123456789";
const RANDOM_LOGIN_LEN: usize = 10;

static ADDRESS_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([^@\s]+)@([^@\s]+)$").expect("address regex is valid"));

/// A disposable mailbox address, split into its `login` and `domain` parts.
///
/// Parse one from a string with [`str::parse`] or [`Address::try_from`]:
///
/// ```
/// use secmail_client::Address;
///
/// let address: Address = "ab12cd@1secmail.com".parse().unwrap();
/// assert_eq!(address.login(), "ab12cd");
/// assert_eq!(address.domain(), "1secmail.com");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Address {
    login: String,
    domain: String,
}

impl Address {
    /// Build an address from its parts, validating the combined form.
    pub fn new(login: impl Into<String>, domain: impl Into<String>) -> Result<Self> {
        let login = login.into();
        let domain = domain.into();
        format!("{login}@{domain}").parse()
    }

    /// The part before the `@`.
    pub fn login(&self) -> &str {
        &self.login
    }

    /// The part after the `@`.
    pub fn domain(&self) -> &str {
        &self.domain
    }

    /// Whether the login is one the service reserves.
    pub fn is_reserved(&self) -> bool {
        is_reserved_login(&self.login)
    }

    /// Query pairs identifying this mailbox on the wire.
    pub(crate) fn query(&self) -> [(&'static str, &str); 2] {
        [("login", &self.login), ("domain", &self.domain)]
    }
}

impl FromStr for Address {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let caps = ADDRESS_RE
            .captures(s)
            .ok_or_else(|| Error::InvalidAddress(s.to_string()))?;

        Ok(Self {
            login: caps[1].to_string(),
            domain: caps[2].to_string(),
        })
    }
}

impl TryFrom<&str> for Address {
    type Error = Error;

    fn try_from(s: &str) -> Result<Self> {
        s.parse()
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}", self.login, self.domain)
    }
}

impl Serialize for Address {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Address {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Case-insensitive check against [`RESERVED_LOGINS`].
pub fn is_reserved_login(login: &str) -> bool {
    RESERVED_LOGINS
        .iter()
        .any(|reserved| reserved.eq_ignore_ascii_case(login))
}

/// Generate a random lowercase alphanumeric login.
pub(crate) fn random_login<R: Rng + ?Sized>(rng: &mut R) -> String {
    loop {
        let login: String = (0..RANDOM_LOGIN_LEN)
            .map(|_| LOGIN_CHARSET[rng.random_range(0..LOGIN_CHARSET.len())] as char)
            .collect();
        if !is_reserved_login(&login) {
            return login;
        }
    }
}
