//! Option sets supplied by resource-list data sources.
//!
//! Forms such as the beacon node endpoint selector or the cluster peer
//! selector offer choices built from other deployed resources. The lists are
//! read-only inputs to selection; the engine never fetches them.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Ethereum nodes with JSON-RPC enabled, as `http://<name>:<rpcPort>`.
pub const ACTIVE_ETHEREUM_NODES: &str = "activeEthereumNodes";
/// IPFS peers, as `http://<name>:<apiPort>`.
pub const IPFS_PEERS: &str = "ipfsPeers";
/// Secrets holding Ethereum 2.0 keystores.
pub const KEYSTORE_SECRETS: &str = "keystoreSecrets";
/// Secrets holding passwords.
pub const PASSWORD_SECRETS: &str = "passwordSecrets";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectOption {
    pub label: String,
    pub value: String,
}

impl SelectOption {
    pub fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
        }
    }
}

/// Ethereum node as listed by the API.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EthereumNodeSummary {
    pub name: String,
    #[serde(default)]
    pub rpc: bool,
    #[serde(default)]
    pub rpc_port: u16,
}

/// IPFS peer as listed by the API.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IpfsPeerSummary {
    pub name: String,
    pub api_port: u16,
}

/// Named option lists keyed by the constants in this module.
#[derive(Debug, Clone, Default)]
pub struct OptionSets {
    sets: BTreeMap<&'static str, Vec<SelectOption>>,
}

impl OptionSets {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, name: &'static str, options: Vec<SelectOption>) -> Self {
        self.sets.insert(name, options);
        self
    }

    /// Options for `name`; empty when the list was never supplied.
    pub fn get(&self, name: &str) -> &[SelectOption] {
        self.sets.get(name).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn has_any(&self, name: &str) -> bool {
        !self.get(name).is_empty()
    }

    pub fn contains_value(&self, name: &str, value: &str) -> bool {
        self.get(name).iter().any(|option| option.value == value)
    }

    /// Endpoint options for nodes that serve JSON-RPC.
    pub fn ethereum_rpc_endpoints(nodes: &[EthereumNodeSummary]) -> Vec<SelectOption> {
        nodes
            .iter()
            .filter(|node| node.rpc)
            .map(|node| {
                SelectOption::new(&node.name, format!("http://{}:{}", node.name, node.rpc_port))
            })
            .collect()
    }

    /// Endpoint options for IPFS peers.
    pub fn ipfs_peer_endpoints(peers: &[IpfsPeerSummary]) -> Vec<SelectOption> {
        peers
            .iter()
            .map(|peer| {
                SelectOption::new(&peer.name, format!("http://{}:{}", peer.name, peer.api_port))
            })
            .collect()
    }

    /// Options for secrets, labelled and valued by secret name.
    pub fn secret_names<S: AsRef<str>>(names: &[S]) -> Vec<SelectOption> {
        names
            .iter()
            .map(|name| SelectOption::new(name.as_ref(), name.as_ref()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_rpc_nodes_are_offered() {
        let nodes: Vec<EthereumNodeSummary> = serde_json::from_str(
            r#"[
                {"name": "geth-1", "rpc": true, "rpcPort": 8545},
                {"name": "besu-1", "rpc": false, "rpcPort": 8545},
                {"name": "nethermind-1", "rpc": true, "rpcPort": 9545}
            ]"#,
        )
        .unwrap();

        let options = OptionSets::ethereum_rpc_endpoints(&nodes);
        assert_eq!(
            options,
            vec![
                SelectOption::new("geth-1", "http://geth-1:8545"),
                SelectOption::new("nethermind-1", "http://nethermind-1:9545"),
            ]
        );
    }

    #[test]
    fn test_peer_endpoints() {
        let peers = vec![IpfsPeerSummary {
            name: "peer-a".to_string(),
            api_port: 5001,
        }];
        let sets = OptionSets::new().with(IPFS_PEERS, OptionSets::ipfs_peer_endpoints(&peers));

        assert!(sets.has_any(IPFS_PEERS));
        assert!(sets.contains_value(IPFS_PEERS, "http://peer-a:5001"));
        assert!(!sets.has_any(ACTIVE_ETHEREUM_NODES));
    }

    #[test]
    fn test_secret_names() {
        let options = OptionSets::secret_names(&["wallet-password"]);
        assert_eq!(options[0].label, "wallet-password");
        assert_eq!(options[0].value, "wallet-password");
    }
}
