//! SS58 text encoding for [`AccountId32`].
//!
//! `base58(prefix ++ account ++ checksum)` where the checksum is the first
//! two bytes of `blake2b-512("SS58PRE" ++ prefix ++ account)`.

use blake2::{Blake2b512, Digest};

use crate::account::{ACCOUNT_ID_LEN, AccountId32};
use crate::error::FormatError;

/// Generic Substrate network prefix used by dev chains.
pub const GENERIC_PREFIX: u16 = 42;

/// Prefixes at or above this value cannot be encoded.
pub const MAX_PREFIX: u16 = 16_384;

const CHECKSUM_LEN: usize = 2;
const CONTEXT: &[u8] = b"SS58PRE";

fn checksum(data: &[u8]) -> [u8; CHECKSUM_LEN] {
    let mut hasher = Blake2b512::new();
    hasher.update(CONTEXT);
    hasher.update(data);
    let hash = hasher.finalize();
    [hash[0], hash[1]]
}

fn prefix_bytes(prefix: u16) -> Result<Vec<u8>, FormatError> {
    match prefix {
        0..=63 => Ok(vec![prefix as u8]),
        64..=16_383 => {
            let first = ((prefix & 0b0000_0000_1111_1100) as u8) >> 2;
            let second = ((prefix >> 8) as u8) | (((prefix & 0b0000_0000_0000_0011) as u8) << 6);
            Ok(vec![first | 0b0100_0000, second])
        }
        _ => Err(FormatError::InvalidSs58(format!(
            "network prefix {prefix} is out of range (max {})",
            MAX_PREFIX - 1
        ))),
    }
}

/// Encode `account` for the network identified by `prefix`.
pub fn encode(account: &AccountId32, prefix: u16) -> Result<String, FormatError> {
    let mut payload = prefix_bytes(prefix)?;
    payload.extend_from_slice(account.as_bytes());
    let sum = checksum(&payload);
    payload.extend_from_slice(&sum);
    Ok(bs58::encode(payload).into_string())
}

/// Decode an SS58 string into the account and its network prefix.
pub fn decode(text: &str) -> Result<(AccountId32, u16), FormatError> {
    let data = bs58::decode(text.trim())
        .into_vec()
        .map_err(|e| FormatError::InvalidSs58(format!("bad base58: {e}")))?;
    if data.len() < 2 {
        return Err(FormatError::InvalidSs58("too short".into()));
    }

    let (prefix_len, prefix) = match data[0] {
        0..=63 => (1, u16::from(data[0])),
        64..=127 => {
            let lower = (data[0] << 2) | (data[1] >> 6);
            let upper = data[1] & 0b0011_1111;
            (2, u16::from(lower) | (u16::from(upper) << 8))
        }
        other => {
            return Err(FormatError::InvalidSs58(format!(
                "reserved prefix byte {other:#04x}"
            )));
        }
    };

    let body_end = prefix_len + ACCOUNT_ID_LEN;
    if data.len() != body_end + CHECKSUM_LEN {
        return Err(FormatError::InvalidSs58(format!(
            "expected {} bytes, got {}",
            body_end + CHECKSUM_LEN,
            data.len()
        )));
    }

    if data[body_end..] != checksum(&data[..body_end]) {
        return Err(FormatError::InvalidSs58("checksum mismatch".into()));
    }

    let account = AccountId32::from_slice(&data[prefix_len..body_end])?;
    Ok((account, prefix))
}

impl AccountId32 {
    pub fn to_ss58(&self, prefix: u16) -> Result<String, FormatError> {
        encode(self, prefix)
    }
}
