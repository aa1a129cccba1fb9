use std::fmt;

use serde::{Deserialize, Serialize};

use crate::ss58::GENERIC_PREFIX;

/// Dual-stack networks with known endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Network {
    /// A dev node on localhost.
    Local,
    /// The public Hub testnet.
    Hub,
}

impl Network {
    pub const ALL: [Network; 2] = [Network::Local, Network::Hub];

    /// Human-readable label for the network.
    pub fn label(&self) -> &'static str {
        match self {
            Network::Local => "Local Dev Node",
            Network::Hub => "Hub Testnet",
        }
    }

    /// Chain ID reported by the EVM JSON-RPC endpoint.
    pub fn evm_chain_id(&self) -> u64 {
        match self {
            Network::Local => 420_420_420,
            Network::Hub => 420_420_417,
        }
    }

    pub fn default_ss58_prefix(&self) -> u16 {
        GENERIC_PREFIX
    }
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl std::str::FromStr for Network {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "local" => Ok(Network::Local),
            "hub" => Ok(Network::Hub),
            other => anyhow::bail!("unknown network: {other} (expected `local` or `hub`)"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn network_properties() {
        assert_eq!(Network::Local.evm_chain_id(), 420_420_420);
        assert_eq!(Network::Hub.evm_chain_id(), 420_420_417);
        assert_eq!(Network::Hub.default_ss58_prefix(), 42);
        assert_eq!(Network::Local.label(), "Local Dev Node");
    }

    #[test]
    fn network_display() {
        assert_eq!(format!("{}", Network::Hub), "Hub Testnet");
    }

    #[test]
    fn network_serde_round_trip() {
        let json = serde_json::to_string(&Network::Hub).unwrap();
        assert_eq!(json, "\"hub\"");
        let parsed: Network = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, Network::Hub);
    }

    #[test]
    fn network_from_str() {
        assert_eq!("LOCAL".parse::<Network>().unwrap(), Network::Local);
        assert!("mainnet".parse::<Network>().is_err());
    }
}
