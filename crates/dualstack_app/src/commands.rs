use std::fmt;

use serde::Serialize;
use tracing::debug;

use dualstack_core::DualstackError;
use dualstack_mapping::network::Network;
use dualstack_mapping::rpc_config::RpcEndpoints;
use dualstack_mapping::{
    AccountId32, AccountKind, AddressBook, AddressEntry, FormatError, H160, ss58,
};

fn has_hex_prefix(text: &str) -> bool {
    text.get(..2).is_some_and(|prefix| prefix.eq_ignore_ascii_case("0x"))
}

/// Parse an account given as hex (`0x` + 64 digits) or as an SS58 string.
pub fn parse_account(text: &str) -> Result<AccountId32, FormatError> {
    let trimmed = text.trim();
    let looks_hex = has_hex_prefix(trimmed)
        || (trimmed.len() == 64 && trimmed.chars().all(|c| c.is_ascii_hexdigit()));
    if looks_hex {
        AccountId32::from_hex(trimmed)
    } else {
        ss58::decode(trimmed).map(|(account, _)| account)
    }
}

/// Whether `text` is shaped like a 20-byte hex address rather than an account.
fn looks_like_h160(text: &str) -> bool {
    let trimmed = text.trim();
    let digits = if has_hex_prefix(trimmed) { &trimmed[2..] } else { trimmed };
    digits.len() == 40
}

// ---------------------------------------------------------------------------
// Reports
// ---------------------------------------------------------------------------

/// Everything known about a native-side account.
#[derive(Debug, Clone, Serialize)]
pub struct AccountReport {
    pub account: AccountId32,
    pub kind: AccountKind,
    pub evm_address: H160,
    pub ss58: String,
    pub ss58_prefix: u16,
    /// Present only for derived identifiers.
    pub original_address: Option<H160>,
}

impl fmt::Display for AccountReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Account : {}", self.account)?;
        writeln!(f, "Kind    : {}", self.kind)?;
        writeln!(f, "SS58    : {} (prefix {})", self.ss58, self.ss58_prefix)?;
        write!(f, "EVM     : {}", self.evm_address)?;
        if self.kind == AccountKind::Native {
            write!(f, " (one-way)")?;
        }
        Ok(())
    }
}

/// An EVM address and the derived identifier it pads into.
#[derive(Debug, Clone, Serialize)]
pub struct AddressReport {
    pub evm_address: H160,
    pub account: AccountId32,
    pub ss58: String,
}

impl fmt::Display for AddressReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "EVM     : {}", self.evm_address)?;
        writeln!(f, "Account : {}", self.account)?;
        write!(f, "SS58    : {}", self.ss58)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct AssetPrecompileReport {
    pub asset_id: u32,
    pub prefix: u16,
    pub address: H160,
}

impl fmt::Display for AssetPrecompileReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Asset {} (prefix {:#06x}) -> {}",
            self.asset_id, self.prefix, self.address
        )
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Classification {
    pub kind: AccountKind,
}

impl fmt::Display for Classification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.kind)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct EndpointsReport(pub RpcEndpoints);

impl fmt::Display for EndpointsReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rpc = &self.0;
        writeln!(
            f,
            "{} (chain id {}){}",
            rpc.network,
            rpc.network.evm_chain_id(),
            if rpc.is_custom { " [custom]" } else { "" }
        )?;
        writeln!(f, "  EVM RPC      : {}", rpc.evm_rpc)?;
        write!(f, "  Substrate WS : {}", rpc.substrate_ws)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct BookListing(pub Vec<AddressEntry>);

impl fmt::Display for BookListing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return write!(f, "(address book is empty)");
        }
        for (i, entry) in self.0.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(
                f,
                "{}  {:<16} {:<7} {:<7} {}",
                entry.id,
                entry.label,
                format!("{:?}", entry.network).to_lowercase(),
                entry.kind.to_string(),
                entry.evm_address
            )?;
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Operations
// ---------------------------------------------------------------------------

pub fn classify(input: &str) -> Result<Classification, DualstackError> {
    let account = parse_account(input)?;
    Ok(Classification {
        kind: account.kind(),
    })
}

pub fn describe_account(input: &str, ss58_prefix: u16) -> Result<AccountReport, DualstackError> {
    let account = parse_account(input)?;
    debug!(%account, "describing account");
    Ok(AccountReport {
        account,
        kind: account.kind(),
        evm_address: account.to_chain_address(),
        ss58: account.to_ss58(ss58_prefix)?,
        ss58_prefix,
        original_address: account.original_address(),
    })
}

pub fn describe_address(input: &str, ss58_prefix: u16) -> Result<AddressReport, DualstackError> {
    let evm_address: H160 = input.parse()?;
    let account = evm_address.to_account_identifier();
    Ok(AddressReport {
        evm_address,
        account,
        ss58: account.to_ss58(ss58_prefix)?,
    })
}

pub fn ss58_encode(input: &str, ss58_prefix: u16) -> Result<String, DualstackError> {
    let account = parse_account(input)?;
    Ok(account.to_ss58(ss58_prefix)?)
}

pub fn asset_precompile(asset_id: u32, prefix: u16) -> AssetPrecompileReport {
    AssetPrecompileReport {
        asset_id,
        prefix,
        address: dualstack_mapping::asset_precompile_address(asset_id, prefix),
    }
}

/// Add `input` to the book. A 40-digit hex value is stored as an EVM
/// address; anything else must parse as an account.
pub fn book_add(
    book: &mut AddressBook,
    label: String,
    network: Network,
    input: &str,
) -> Result<String, DualstackError> {
    let id = if looks_like_h160(input) {
        book.add_evm(label, network, input.parse()?)
    } else {
        book.add_account(label, network, parse_account(input)?)
    };
    Ok(id)
}

pub fn book_list(book: &AddressBook) -> BookListing {
    BookListing(book.list().into_iter().cloned().collect())
}
