use std::fmt::Display;
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing::{info, warn};

use dualstack_core::DualstackError;
use dualstack_core::config::DualstackConfig;
use dualstack_mapping::network::Network;
use dualstack_mapping::{AddressBook, FormatError};

use crate::commands;

#[derive(Parser)]
#[command(
    name = "dualstack",
    version,
    about = "Map accounts between the Substrate and EVM namespaces of a dual-stack chain"
)]
pub struct Cli {
    /// Print machine-readable JSON instead of text
    #[arg(long, global = true)]
    pub json: bool,
    /// Network to use instead of the configured default (`local` or `hub`)
    #[arg(long, global = true)]
    pub network: Option<Network>,
    /// Read config from this file instead of ~/.dualstack/config.json
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,
    #[command(subcommand)]
    pub cmd: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Report whether an account is derived from an EVM address or native
    Classify {
        /// 32-byte account as 0x-hex or SS58
        account: String,
    },
    /// Map an account to its EVM address (one-way for native accounts)
    ToEvm {
        /// 32-byte account as 0x-hex or SS58
        account: String,
        /// SS58 prefix for the echoed account (defaults to config)
        #[arg(long)]
        prefix: Option<u16>,
    },
    /// Pad an EVM address into its derived 32-byte account
    ToAccount {
        /// 20-byte address, lowercase or checksum-cased
        address: String,
        /// SS58 prefix for the resulting account (defaults to config)
        #[arg(long)]
        prefix: Option<u16>,
    },
    /// Render an account as SS58
    Ss58 {
        /// 32-byte account as 0x-hex or SS58
        account: String,
        /// Network prefix, below 16384 (defaults to config)
        #[arg(long)]
        prefix: Option<u16>,
    },
    /// ERC-20 precompile address for a runtime asset
    AssetPrecompile {
        asset_id: u32,
        /// Precompile address prefix (defaults to config)
        #[arg(long)]
        prefix: Option<u16>,
    },
    /// Manage the address book
    Book {
        #[command(subcommand)]
        action: BookAction,
    },
    /// Show or change RPC endpoints
    Endpoints {
        #[command(subcommand)]
        action: Option<EndpointsAction>,
    },
    /// Print the effective configuration
    Config,
}

#[derive(Subcommand)]
pub enum BookAction {
    /// Add an account (hex/SS58) or EVM address under a label
    Add { label: String, value: String },
    /// List all entries
    List,
    /// Remove an entry by ID
    Remove { id: String },
}

#[derive(Subcommand)]
pub enum EndpointsAction {
    /// Override both endpoints for the selected network
    Set {
        #[arg(long)]
        evm: String,
        #[arg(long)]
        ws: String,
    },
    /// Restore the built-in endpoints for the selected network
    Reset,
}

/// What the binary tells the user when a command fails.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Failure {
    pub message: String,
    pub exit_code: u8,
}

/// Map an error to its user-facing message and exit code: 2 for bad
/// input, 3 for bad configuration, 1 for everything else.
pub fn describe_failure(err: &anyhow::Error) -> Failure {
    let typed = err.downcast_ref::<DualstackError>().map(|e| (e.user_message(), e.exit_code()));
    let (message, exit_code) = typed
        .or_else(|| {
            err.downcast_ref::<FormatError>().map(|e| {
                let e = DualstackError::Format(e.clone());
                (e.user_message(), e.exit_code())
            })
        })
        .unwrap_or_else(|| (format!("{err:#}"), 1));
    Failure { message, exit_code }
}

pub fn load_config(path: Option<&Path>) -> Result<DualstackConfig> {
    match path {
        Some(path) => DualstackConfig::load_from_path(path),
        None => DualstackConfig::load(),
    }
}

fn save_config(config: &DualstackConfig, path: Option<&Path>) -> Result<()> {
    let saved = match path {
        Some(path) => config.save_to_path(path),
        None => config.save(),
    };
    saved.map_err(storage)
}

fn storage(err: anyhow::Error) -> anyhow::Error {
    DualstackError::Storage(format!("{err:#}")).into()
}

fn emit<T: Serialize + Display>(out: &mut dyn Write, value: &T, json: bool) -> Result<()> {
    if json {
        writeln!(out, "{}", serde_json::to_string_pretty(value)?)?;
    } else {
        writeln!(out, "{value}")?;
    }
    Ok(())
}

/// Execute one parsed command against `config`, writing results to `out`.
pub fn run(cli: Cli, mut config: DualstackConfig, out: &mut dyn Write) -> Result<()> {
    let network = cli.network.unwrap_or(config.network);
    info!(network = ?network, "dualstack starting");

    match cli.cmd {
        Command::Classify { account } => emit(out, &commands::classify(&account)?, cli.json)?,
        Command::ToEvm { account, prefix } => {
            let prefix = prefix.unwrap_or(config.ss58_prefix);
            emit(out, &commands::describe_account(&account, prefix)?, cli.json)?
        }
        Command::ToAccount { address, prefix } => {
            let prefix = prefix.unwrap_or(config.ss58_prefix);
            emit(out, &commands::describe_address(&address, prefix)?, cli.json)?
        }
        Command::Ss58 { account, prefix } => {
            let prefix = prefix.unwrap_or(config.ss58_prefix);
            let encoded = commands::ss58_encode(&account, prefix)?;
            if cli.json {
                writeln!(out, "{}", serde_json::json!({ "ss58": encoded, "prefix": prefix }))?;
            } else {
                writeln!(out, "{encoded}")?;
            }
        }
        Command::AssetPrecompile { asset_id, prefix } => {
            let prefix = prefix.unwrap_or(config.asset_precompile_prefix);
            emit(out, &commands::asset_precompile(asset_id, prefix), cli.json)?
        }
        Command::Book { action } => {
            let path = config.address_book_path()?;
            let mut book = AddressBook::load_from_file(&path).map_err(storage)?;
            match action {
                BookAction::Add { label, value } => {
                    let id = commands::book_add(&mut book, label, network, &value)?;
                    book.save_to_file(&path).map_err(storage)?;
                    writeln!(out, "{id}")?;
                }
                BookAction::List => emit(out, &commands::book_list(&book), cli.json)?,
                BookAction::Remove { id } => {
                    if book.remove(&id).is_none() {
                        warn!(entry_id = %id, "no such address book entry");
                        anyhow::bail!("no entry with id {id}");
                    }
                    book.save_to_file(&path).map_err(storage)?;
                }
            }
        }
        Command::Endpoints { action } => {
            match action {
                Some(EndpointsAction::Set { evm, ws }) => {
                    config
                        .endpoints
                        .set_custom(network, evm, ws)
                        .map_err(DualstackError::from)?;
                    save_config(&config, cli.config.as_deref())?;
                }
                Some(EndpointsAction::Reset) => {
                    config.endpoints.reset_to_default(network);
                    save_config(&config, cli.config.as_deref())?;
                }
                None => {}
            }
            let endpoints = config
                .endpoints
                .get(network)
                .cloned()
                .with_context(|| format!("no endpoints configured for {network}"))?;
            emit(out, &commands::EndpointsReport(endpoints), cli.json)?
        }
        Command::Config => writeln!(out, "{}", serde_json::to_string_pretty(&config)?)?,
    }
    Ok(())
}
