//! Account selection and the signer handle the client base constructs.

use serde::{Deserialize, Serialize};

/// Selects an account exposed by the backend, by position or by address.
///
/// The default selector is position 0, matching the convention that an
/// unspecified account means "the first one the wallet exposes".
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AccountSelector {
    /// Zero-based position in the backend's account list.
    Index(usize),
    /// An address, matched case-insensitively.
    Address(String),
}

impl Default for AccountSelector {
    fn default() -> Self {
        Self::Index(0)
    }
}

impl From<usize> for AccountSelector {
    fn from(index: usize) -> Self {
        Self::Index(index)
    }
}

impl From<&str> for AccountSelector {
    fn from(address: &str) -> Self {
        Self::Address(address.to_string())
    }
}

impl From<String> for AccountSelector {
    fn from(address: String) -> Self {
        Self::Address(address)
    }
}

impl std::fmt::Display for AccountSelector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Index(i) => write!(f, "#{i}"),
            Self::Address(a) => write!(f, "{a}"),
        }
    }
}

/// An account-bound handle, constructed once the address is confirmed to be
/// exposed by the backend. Signing itself is the host's concern.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Signer {
    address: String,
}

impl Signer {
    pub fn new(address: impl Into<String>) -> Self {
        Self {
            address: address.into(),
        }
    }

    /// The confirmed account address.
    pub fn address(&self) -> &str {
        &self.address
    }
}

impl std::fmt::Display for Signer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.address)
    }
}
