//! Deterministic mapping between 32-byte account identifiers and 20-byte
//! EVM addresses.
//!
//! An identifier whose trailing 12 bytes are all [`SENTINEL`] was derived
//! from an EVM address and maps back to it verbatim. Every other identifier
//! maps to the last 20 bytes of its Keccak-256 hash, which cannot be undone.

use crate::account::{AccountId32, AccountKind, H160, H160_LEN};
use crate::checksum::keccak256;
use crate::error::FormatError;

/// Padding byte marking the tail of a derived identifier.
pub const SENTINEL: u8 = 0xEE;

/// Whether the identifier carries the sentinel tail.
pub fn is_derived(account: &AccountId32) -> bool {
    account.0[H160_LEN..].iter().all(|&b| b == SENTINEL)
}

/// Classify raw bytes. Fails only when the input is not exactly 32 bytes.
pub fn classify(bytes: &[u8]) -> Result<AccountKind, FormatError> {
    Ok(AccountId32::from_slice(bytes)?.kind())
}

/// Map raw identifier bytes to their EVM address.
pub fn to_chain_address(bytes: &[u8]) -> Result<H160, FormatError> {
    Ok(AccountId32::from_slice(bytes)?.to_chain_address())
}

/// Same as [`to_chain_address`], rendered with checksum casing.
pub fn to_chain_address_string(bytes: &[u8]) -> Result<String, FormatError> {
    to_chain_address(bytes).map(|address| address.to_checksum())
}

/// Pad an EVM address with the sentinel into a derived identifier.
pub fn to_account_identifier(address: &H160) -> AccountId32 {
    let mut out = [SENTINEL; 32];
    out[..H160_LEN].copy_from_slice(address.as_bytes());
    AccountId32(out)
}

/// [`to_account_identifier`] over raw bytes; anything but 20 bytes fails.
pub fn to_account_identifier_bytes(bytes: &[u8]) -> Result<AccountId32, FormatError> {
    Ok(to_account_identifier(&H160::from_slice(bytes)?))
}

/// [`to_account_identifier`] over hex text (checksum validated when mixed case).
pub fn to_account_identifier_str(text: &str) -> Result<AccountId32, FormatError> {
    Ok(to_account_identifier(&text.parse()?))
}

impl AccountId32 {
    pub fn kind(&self) -> AccountKind {
        if is_derived(self) {
            AccountKind::Derived
        } else {
            AccountKind::Native
        }
    }

    pub fn is_derived(&self) -> bool {
        is_derived(self)
    }

    /// EVM address of this identifier. Derived identifiers give back their
    /// leading 20 bytes; native ones are hashed.
    pub fn to_chain_address(&self) -> H160 {
        let mut out = [0u8; H160_LEN];
        match self.kind() {
            AccountKind::Derived => out.copy_from_slice(&self.0[..H160_LEN]),
            AccountKind::Native => out.copy_from_slice(&keccak256(&self.0)[12..]),
        }
        H160::new(out)
    }

    /// The EVM address this identifier was derived from, if any. `None` for
    /// native identifiers, whose hashed address has no inverse.
    pub fn original_address(&self) -> Option<H160> {
        match self.kind() {
            AccountKind::Derived => Some(self.to_chain_address()),
            AccountKind::Native => None,
        }
    }
}

impl H160 {
    pub fn to_account_identifier(&self) -> AccountId32 {
        to_account_identifier(self)
    }
}

impl From<H160> for AccountId32 {
    fn from(address: H160) -> Self {
        to_account_identifier(&address)
    }
}
