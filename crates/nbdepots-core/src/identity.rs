//! Depot identity: the normalized `(name, address)` pair used to recognise
//! the same real-world depot across repeated scrapes.

use sha2::{Digest, Sha256};

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DepotIdentity {
    name: String,
    address: String,
}

impl DepotIdentity {
    /// Trim, collapse internal whitespace, and lowercase both fields.
    #[must_use]
    pub fn new(name: &str, address: &str) -> Self {
        Self {
            name: normalize(name),
            address: normalize(address),
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn address(&self) -> &str {
        &self.address
    }

    /// Stable storage key: hex SHA-256 over `name \0 address`.
    #[must_use]
    pub fn key(&self) -> String {
        let input = format!("{}\x00{}", self.name, self.address);
        format!("{:x}", Sha256::digest(input.as_bytes()))
    }
}

fn normalize(value: &str) -> String {
    value
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}
