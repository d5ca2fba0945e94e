//! IPFS peer and cluster peer forms.

use super::name_rule;
use crate::options::IPFS_PEERS;
use crate::{Check, FieldRule, FormSnapshot, OptionSets, RuleProfile, RuleSet, SelectOption};
use console_validation::ItemCount;
use once_cell::sync::Lazy;
use regex::Regex;

static HOST: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9]([A-Za-z0-9.-]*[A-Za-z0-9])?$").unwrap());

/// Configuration profiles applied by `ipfs init`.
pub const INIT_PROFILES: &[&str] = &[
    "default-datastore",
    "badger-datastore",
    "flatfs",
    "lowpower",
    "randomports",
    "server",
    "test",
    "local-discovery",
    "default-networking",
];

pub const DEFAULT_INIT_PROFILE: &str = "default-datastore";

/// New IPFS peer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CreatePeerProfile;

impl RuleProfile for CreatePeerProfile {
    const FORM: &'static str = "ipfs-peer-create";

    fn select(_snapshot: &FormSnapshot, _options: &OptionSets) -> Self {
        CreatePeerProfile
    }

    fn rule_set(&self) -> RuleSet {
        RuleSet::new("ipfs-peer-create").rules([
            name_rule(
                "Please provide a name for your peer",
                "Peer name shouldn't contain whitespaces",
            ),
            FieldRule::required("initProfiles")
                .message("Please select at least one initial configuration profile")
                .check(Check::Count(ItemCount::at_least(1)))
                .check(Check::EachOneOf(INIT_PROFILES))
                .default_value(vec![DEFAULT_INIT_PROFILE]),
        ])
    }
}

/// API tab of an existing IPFS peer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PeerApiSettingsProfile;

impl RuleProfile for PeerApiSettingsProfile {
    const FORM: &'static str = "ipfs-peer-api";

    fn select(_snapshot: &FormSnapshot, _options: &OptionSets) -> Self {
        PeerApiSettingsProfile
    }

    fn rule_set(&self) -> RuleSet {
        RuleSet::new("ipfs-peer-api").rules([
            FieldRule::required("apiPort")
                .message("Please provide an API server port")
                .check_with(Check::Integer, "API Server Port is number")
                .check_with(Check::Port, "API Server Port is between 1 and 65535"),
            FieldRule::required("apiHost")
                .message("Please provide an API server host")
                .check_with(Check::Pattern(&HOST), "API Server Host is not a valid host"),
        ])
    }
}

/// Peers tab of an existing cluster peer.
///
/// The IPFS peer the cluster peer drives can only be picked when some peer
/// exists to pick from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClusterPeersProfile {
    WithActivePeers,
    NoActivePeers,
}

impl ClusterPeersProfile {
    pub fn peer_choices(options: &OptionSets) -> &[SelectOption] {
        options.get(IPFS_PEERS)
    }
}

impl RuleProfile for ClusterPeersProfile {
    const FORM: &'static str = "cluster-peer-peers";

    fn select(_snapshot: &FormSnapshot, options: &OptionSets) -> Self {
        if options.has_any(IPFS_PEERS) {
            ClusterPeersProfile::WithActivePeers
        } else {
            ClusterPeersProfile::NoActivePeers
        }
    }

    fn rule_set(&self) -> RuleSet {
        let peer_endpoint = match self {
            ClusterPeersProfile::WithActivePeers => FieldRule::required("peerEndpoint")
                .message("Please provide a peer endpoint")
                .check(Check::Url),
            ClusterPeersProfile::NoActivePeers => FieldRule::hidden("peerEndpoint"),
        };

        RuleSet::new("cluster-peer-peers").rules([
            peer_endpoint,
            FieldRule::optional("bootstrapPeers").list(),
        ])
    }
}
