use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::FormatError;
use crate::network::Network;

/// Endpoints for one network: the EVM JSON-RPC and the Substrate WebSocket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RpcEndpoints {
    pub network: Network,
    pub evm_rpc: String,
    pub substrate_ws: String,
    pub is_custom: bool,
}

impl RpcEndpoints {
    /// Built-in endpoints for `network`.
    pub fn defaults(network: Network) -> Self {
        let (evm_rpc, substrate_ws) = match network {
            Network::Local => ("http://localhost:8545", "ws://localhost:9944"),
            Network::Hub => (
                "https://services.polkadothub-rpc.com/testnet",
                "wss://asset-hub-paseo-rpc.n.dwellir.com",
            ),
        };
        Self {
            network,
            evm_rpc: evm_rpc.into(),
            substrate_ws: substrate_ws.into(),
            is_custom: false,
        }
    }
}

/// Per-network endpoint configuration with custom override support.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RpcConfigStore {
    configs: HashMap<Network, RpcEndpoints>,
}

impl RpcConfigStore {
    /// Create a store populated with the built-in endpoints.
    pub fn with_defaults() -> Self {
        let configs = Network::ALL
            .into_iter()
            .map(|network| (network, RpcEndpoints::defaults(network)))
            .collect();
        Self { configs }
    }

    /// Endpoints for a network. Returns `None` only if the store was
    /// deserialized from a file that omitted the network.
    pub fn get(&self, network: Network) -> Option<&RpcEndpoints> {
        self.configs.get(&network)
    }

    /// Override both endpoints for a network.
    ///
    /// Returns `Err` if either URL fails validation; the store is left
    /// untouched in that case.
    pub fn set_custom(
        &mut self,
        network: Network,
        evm_rpc: String,
        substrate_ws: String,
    ) -> Result<(), FormatError> {
        if !validate_url(&evm_rpc) {
            return Err(FormatError::InvalidUrl(format!("EVM RPC URL: {evm_rpc}")));
        }
        if !validate_url(&substrate_ws) {
            return Err(FormatError::InvalidUrl(format!("Substrate WS URL: {substrate_ws}")));
        }

        self.configs.insert(
            network,
            RpcEndpoints {
                network,
                evm_rpc,
                substrate_ws,
                is_custom: true,
            },
        );
        Ok(())
    }

    /// Reset a network's endpoints back to the built-in defaults.
    pub fn reset_to_default(&mut self, network: Network) {
        self.configs.insert(network, RpcEndpoints::defaults(network));
    }
}

impl Default for RpcConfigStore {
    fn default() -> Self {
        Self::with_defaults()
    }
}

/// Validate that a URL is well-formed, has a host, and uses HTTP(S) or WS(S).
pub fn validate_url(url: &str) -> bool {
    match url::Url::parse(url) {
        Ok(parsed) => {
            matches!(parsed.scheme(), "http" | "https" | "ws" | "wss") && parsed.host().is_some()
        }
        Err(_) => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_cover_all_networks() {
        let store = RpcConfigStore::with_defaults();
        for network in Network::ALL {
            let rpc = store.get(network).unwrap();
            assert!(!rpc.is_custom);
            assert!(validate_url(&rpc.evm_rpc));
            assert!(validate_url(&rpc.substrate_ws));
        }
    }

    #[test]
    fn set_custom_marks_as_custom() {
        let mut store = RpcConfigStore::with_defaults();
        store
            .set_custom(
                Network::Local,
                "http://127.0.0.1:8546".into(),
                "ws://127.0.0.1:9945".into(),
            )
            .unwrap();

        let rpc = store.get(Network::Local).unwrap();
        assert!(rpc.is_custom);
        assert_eq!(rpc.evm_rpc, "http://127.0.0.1:8546");
        assert_eq!(rpc.substrate_ws, "ws://127.0.0.1:9945");
    }

    #[test]
    fn set_custom_rejects_invalid_url_and_keeps_previous() {
        let mut store = RpcConfigStore::with_defaults();
        let result =
            store.set_custom(Network::Hub, "not-a-url".into(), "wss://ok.example.com".into());
        assert_eq!(
            result,
            Err(FormatError::InvalidUrl("EVM RPC URL: not-a-url".into()))
        );
        let result =
            store.set_custom(Network::Hub, "https://ok.example.com".into(), "ftp://x".into());
        assert!(matches!(
            result,
            Err(FormatError::InvalidUrl(msg)) if msg.starts_with("Substrate")
        ));
        assert!(!store.get(Network::Hub).unwrap().is_custom);
    }

    #[test]
    fn reset_to_default_restores_original() {
        let mut store = RpcConfigStore::with_defaults();
        let original = store.get(Network::Hub).unwrap().clone();

        store
            .set_custom(
                Network::Hub,
                "https://custom.example.com".into(),
                "wss://custom.example.com".into(),
            )
            .unwrap();
        assert_ne!(store.get(Network::Hub).unwrap(), &original);

        store.reset_to_default(Network::Hub);
        assert_eq!(store.get(Network::Hub).unwrap(), &original);
    }

    #[test]
    fn validate_url_accepts_supported_schemes() {
        assert!(validate_url("https://rpc.example.com"));
        assert!(validate_url("http://localhost:8545"));
        assert!(validate_url("ws://localhost:9944"));
        assert!(validate_url("wss://node.example.com"));
    }

    #[test]
    fn validate_url_rejects_garbage() {
        assert!(!validate_url(""));
        assert!(!validate_url("not a url"));
        assert!(!validate_url("ftp://server.com"));
        assert!(!validate_url("file:///etc/passwd"));
    }
}
