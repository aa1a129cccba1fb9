use alloy_primitives::Address;

/// Checksums are rendered without a chain id.
const NO_CHAIN_ID: Option<u64> = None;

/// Keccak-256 (the pre-standard SHA-3 padding used by EVM chains).
pub fn keccak256(data: &[u8]) -> [u8; 32] {
    alloy_primitives::keccak256(data).0
}

/// Render a 20-byte address in mixed-case checksum form with a `0x` prefix.
pub fn to_checksum(address: &[u8; 20]) -> String {
    Address::new(*address).to_checksum(NO_CHAIN_ID)
}

/// Whether `text` (with or without `0x`) is a 40-digit hex address whose
/// letter casing matches its checksum exactly.
pub fn verify_checksum(text: &str) -> bool {
    let digits = text.strip_prefix("0x").unwrap_or(text);
    Address::parse_checksummed(format!("0x{digits}"), NO_CHAIN_ID).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn addr(hex_digits: &str) -> [u8; 20] {
        let mut out = [0u8; 20];
        hex::decode_to_slice(hex_digits, &mut out).unwrap();
        out
    }

    #[test]
    fn keccak_of_empty_input() {
        assert_eq!(
            hex::encode(keccak256(b"")),
            "c5d2460186f7233c927e7db2dcc703c0e500b653ca82273b7bfad8045d85a470"
        );
    }

    #[test]
    fn checksum_matches_published_vectors() {
        for expected in [
            "0x5aAeb6053F3E94C9b9A09f33669435E7Ef1BeAed",
            "0xfB6916095ca1df60bB79Ce92cE3Ea74c37c5d359",
            "0x52908400098527886E0F7030069857D2E4169EE7",
        ] {
            let lower = expected[2..].to_ascii_lowercase();
            assert_eq!(to_checksum(&addr(&lower)), expected);
        }
    }

    #[test]
    fn digits_only_address_has_no_casing() {
        assert_eq!(
            to_checksum(&[0x11; 20]),
            "0x1111111111111111111111111111111111111111"
        );
    }

    #[test]
    fn verify_accepts_correct_casing() {
        assert!(verify_checksum("0x5aAeb6053F3E94C9b9A09f33669435E7Ef1BeAed"));
        assert!(verify_checksum("5aAeb6053F3E94C9b9A09f33669435E7Ef1BeAed"));
    }

    #[test]
    fn verify_rejects_wrong_casing() {
        assert!(!verify_checksum("0x5AAeb6053F3E94C9b9A09f33669435E7Ef1BeAed"));
        assert!(!verify_checksum("0x5aaeb6053f3e94c9b9a09f33669435e7ef1beaed"));
    }

    #[test]
    fn verify_rejects_malformed() {
        assert!(!verify_checksum(""));
        assert!(!verify_checksum("0x1234"));
        assert!(!verify_checksum("0xzz1111111111111111111111111111111111111"));
    }
}
