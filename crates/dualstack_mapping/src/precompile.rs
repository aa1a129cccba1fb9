use crate::account::H160;

const fn fixed(last: u8) -> H160 {
    let mut bytes = [0u8; 20];
    bytes[19] = last;
    H160::new(bytes)
}

pub const ECRECOVER_PRECOMPILE: H160 = fixed(0x01);
/// SHA-256 over the raw call data; no selector.
pub const HASH_PRECOMPILE: H160 = fixed(0x02);
pub const RIPEMD160_PRECOMPILE: H160 = fixed(0x03);
pub const IDENTITY_PRECOMPILE: H160 = fixed(0x04);

/// Address prefix of the assets ERC-20 precompile on the reference dev chain.
pub const DEFAULT_ASSET_PREFIX: u16 = 0x0001;

/// ERC-20 precompile address exposing runtime asset `asset_id`.
///
/// Layout: `[asset_id: u32 BE][12 zero bytes][prefix: u16 BE][0x00 0x00]`.
pub fn asset_precompile_address(asset_id: u32, prefix: u16) -> H160 {
    let mut bytes = [0u8; 20];
    bytes[..4].copy_from_slice(&asset_id.to_be_bytes());
    bytes[16..18].copy_from_slice(&prefix.to_be_bytes());
    H160::new(bytes)
}

/// Recover the asset id from an address built by [`asset_precompile_address`].
pub fn asset_id_from_precompile(address: &H160, prefix: u16) -> Option<u32> {
    let bytes = address.as_bytes();
    let matches = bytes[4..16].iter().all(|&b| b == 0)
        && bytes[16..18] == prefix.to_be_bytes()
        && bytes[18..] == [0u8, 0];
    if !matches {
        return None;
    }
    Some(u32::from_be_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))
}
