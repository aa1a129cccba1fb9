use std::fmt;
use std::str::FromStr;

use alloy_primitives::Address;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{FormatError, ValueKind};

pub const ACCOUNT_ID_LEN: usize = 32;
pub const H160_LEN: usize = 20;

/// A 32-byte account reference in the native (Substrate) namespace.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AccountId32(pub [u8; ACCOUNT_ID_LEN]);

/// A 20-byte address in the EVM namespace.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct H160(pub Address);

/// Which of the two disjoint shapes an [`AccountId32`] has.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccountKind {
    /// Last 12 bytes are the sentinel; the first 20 are an EVM address.
    Derived,
    /// Anything else. Its EVM address is a one-way hash projection.
    Native,
}

impl fmt::Display for AccountKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AccountKind::Derived => f.write_str("derived"),
            AccountKind::Native => f.write_str("native"),
        }
    }
}

fn strip_hex_prefix(text: &str) -> &str {
    let trimmed = text.trim();
    trimmed
        .strip_prefix("0x")
        .or_else(|| trimmed.strip_prefix("0X"))
        .unwrap_or(trimmed)
}

impl AccountId32 {
    /// Build from a raw byte slice. Anything other than 32 bytes is rejected.
    pub fn from_slice(bytes: &[u8]) -> Result<Self, FormatError> {
        let array: [u8; ACCOUNT_ID_LEN] = bytes
            .try_into()
            .map_err(|_| FormatError::length(ValueKind::AccountId, ACCOUNT_ID_LEN, bytes.len()))?;
        Ok(Self(array))
    }

    /// Parse 64 hex digits, with or without a `0x` prefix.
    pub fn from_hex(text: &str) -> Result<Self, FormatError> {
        let bytes = hex::decode(strip_hex_prefix(text))?;
        Self::from_slice(&bytes)
    }

    pub fn as_bytes(&self) -> &[u8; ACCOUNT_ID_LEN] {
        &self.0
    }
}

impl From<[u8; ACCOUNT_ID_LEN]> for AccountId32 {
    fn from(bytes: [u8; ACCOUNT_ID_LEN]) -> Self {
        Self(bytes)
    }
}

impl AsRef<[u8]> for AccountId32 {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Display for AccountId32 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

impl FromStr for AccountId32 {
    type Err = FormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s)
    }
}

impl H160 {
    pub const fn new(bytes: [u8; H160_LEN]) -> Self {
        Self(Address::new(bytes))
    }

    /// Build from a raw byte slice. Anything other than 20 bytes is rejected.
    pub fn from_slice(bytes: &[u8]) -> Result<Self, FormatError> {
        let array: [u8; H160_LEN] = bytes
            .try_into()
            .map_err(|_| FormatError::length(ValueKind::ChainAddress, H160_LEN, bytes.len()))?;
        Ok(Self::new(array))
    }

    pub fn as_bytes(&self) -> &[u8; H160_LEN] {
        &self.0.0.0
    }

    /// Checksum-cased text form, `0x` prefixed.
    pub fn to_checksum(&self) -> String {
        self.0.to_checksum(None)
    }
}

impl From<[u8; H160_LEN]> for H160 {
    fn from(bytes: [u8; H160_LEN]) -> Self {
        Self::new(bytes)
    }
}

impl From<Address> for H160 {
    fn from(address: Address) -> Self {
        Self(address)
    }
}

impl From<H160> for Address {
    fn from(address: H160) -> Self {
        address.0
    }
}

impl AsRef<[u8]> for H160 {
    fn as_ref(&self) -> &[u8] {
        self.as_bytes()
    }
}

impl fmt::Display for H160 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_checksum())
    }
}

impl FromStr for H160 {
    type Err = FormatError;

    /// Accepts 40 hex digits with an optional `0x`. Single-case input is
    /// taken as is; mixed-case input must carry a valid checksum.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let digits = strip_hex_prefix(s);
        let bytes = hex::decode(digits)?;
        let address = Self::from_slice(&bytes)?;

        let has_upper = digits.chars().any(|c| c.is_ascii_uppercase());
        let has_lower = digits.chars().any(|c| c.is_ascii_lowercase());
        if has_upper && has_lower {
            return Address::parse_checksummed(format!("0x{digits}"), None)
                .map(Self)
                .map_err(|_| FormatError::ChecksumMismatch(s.trim().to_string()));
        }
        Ok(address)
    }
}

// Both types travel through JSON as their canonical text form.

impl Serialize for AccountId32 {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for AccountId32 {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        text.parse().map_err(serde::de::Error::custom)
    }
}

impl Serialize for H160 {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for H160 {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        text.parse().map_err(serde::de::Error::custom)
    }
}
