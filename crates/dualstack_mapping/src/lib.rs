// Account and address mapping for dual-stack (Substrate + EVM) chains

pub mod account;
pub mod address_book;
pub mod checksum;
pub mod error;
pub mod mapping;
pub mod network;
pub mod precompile;
pub mod rpc_config;
pub mod ss58;

// Re-export primary types for convenient access.
pub use account::{AccountId32, AccountKind, H160};
pub use address_book::{AddressBook, AddressEntry};
pub use checksum::{keccak256, to_checksum, verify_checksum};
pub use error::{FormatError, ValueKind};
pub use mapping::{
    SENTINEL, classify, is_derived, to_account_identifier, to_account_identifier_bytes,
    to_account_identifier_str, to_chain_address, to_chain_address_string,
};
pub use network::Network;
pub use precompile::{
    DEFAULT_ASSET_PREFIX, HASH_PRECOMPILE, asset_id_from_precompile, asset_precompile_address,
};
pub use rpc_config::{RpcConfigStore, RpcEndpoints, validate_url};
