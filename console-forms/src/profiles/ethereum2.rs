//! Ethereum 2.0 beacon node and validator forms.

use super::name_rule;
use crate::options::{ACTIVE_ETHEREUM_NODES, KEYSTORE_SECRETS};
use crate::{Check, FieldRule, FormSnapshot, OptionSets, RuleProfile, RuleSet};
use console_validation::ItemCount;
use serde::{Deserialize, Serialize};
use std::fmt;

pub const CLIENTS: &[&str] = &["prysm", "lighthouse", "nimbus", "teku"];

pub const MAINNET: &str = "mainnet";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Ethereum2Client {
    Prysm,
    Lighthouse,
    Nimbus,
    Teku,
}

impl Ethereum2Client {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "prysm" => Some(Ethereum2Client::Prysm),
            "lighthouse" => Some(Ethereum2Client::Lighthouse),
            "nimbus" => Some(Ethereum2Client::Nimbus),
            "teku" => Some(Ethereum2Client::Teku),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Ethereum2Client::Prysm => "prysm",
            Ethereum2Client::Lighthouse => "lighthouse",
            Ethereum2Client::Nimbus => "nimbus",
            Ethereum2Client::Teku => "teku",
        }
    }
}

impl fmt::Display for Ethereum2Client {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

fn client_of(snapshot: &FormSnapshot) -> Option<Ethereum2Client> {
    snapshot.text("client").and_then(Ethereum2Client::parse)
}

/// Prysm needs its own Ethereum 1 endpoint on every network but mainnet.
fn prysm_off_mainnet(snapshot: &FormSnapshot) -> bool {
    client_of(snapshot) == Some(Ethereum2Client::Prysm) && snapshot.text("network") != Some(MAINNET)
}

fn client_rule() -> FieldRule {
    FieldRule::required("client")
        .message("Please choose your client")
        .check_with(Check::OneOf(CLIENTS), "Please choose your client")
}

fn network_rule() -> FieldRule {
    FieldRule::required("network").message("Please choose your network")
}

/// New beacon node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CreateBeaconNodeProfile {
    /// Prysm off mainnet: Ethereum 1 endpoints must be given
    PrysmEndpoints,
    /// Endpoints are configured later from the node's page
    Standard,
}

impl RuleProfile for CreateBeaconNodeProfile {
    const FORM: &'static str = "beacon-node-create";

    fn select(snapshot: &FormSnapshot, _options: &OptionSets) -> Self {
        if prysm_off_mainnet(snapshot) {
            CreateBeaconNodeProfile::PrysmEndpoints
        } else {
            CreateBeaconNodeProfile::Standard
        }
    }

    fn rule_set(&self) -> RuleSet {
        let rules = RuleSet::new("beacon-node-create").rules([
            name_rule(
                "Please provide a name for your node",
                "Node name shouldn't contain whitespaces",
            ),
            client_rule(),
            network_rule(),
        ]);

        match self {
            CreateBeaconNodeProfile::PrysmEndpoints => rules.rule(
                FieldRule::required("eth1Endpoints")
                    .message("Please provide at least one Ethereum 1 endpoint")
                    .check(Check::EachUrl),
            ),
            CreateBeaconNodeProfile::Standard => rules.rule(FieldRule::hidden("eth1Endpoints")),
        }
    }
}

/// Ethereum 1 endpoints tab of an existing beacon node.
///
/// Endpoints come from [`ACTIVE_ETHEREUM_NODES`] or are typed in; either way
/// each must be an http(s) URL.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Eth1EndpointsProfile {
    /// Prysm off mainnet: one or more
    Required,
    /// Nimbus and teku: exactly one
    ExactlyOne,
    /// Everything else: zero or more
    Optional,
}

impl Eth1EndpointsProfile {
    /// Suggested endpoints for the selector.
    pub fn suggestions(options: &OptionSets) -> &[crate::SelectOption] {
        options.get(ACTIVE_ETHEREUM_NODES)
    }
}

impl RuleProfile for Eth1EndpointsProfile {
    const FORM: &'static str = "beacon-node-eth1-endpoints";

    fn select(snapshot: &FormSnapshot, _options: &OptionSets) -> Self {
        if prysm_off_mainnet(snapshot) {
            return Eth1EndpointsProfile::Required;
        }
        match client_of(snapshot) {
            Some(Ethereum2Client::Nimbus | Ethereum2Client::Teku) => Eth1EndpointsProfile::ExactlyOne,
            _ => Eth1EndpointsProfile::Optional,
        }
    }

    fn rule_set(&self) -> RuleSet {
        let endpoints = match self {
            Eth1EndpointsProfile::Required => FieldRule::required("eth1Endpoints")
                .message("Please provide at least one Ethereum 1 endpoint")
                .check(Check::Count(ItemCount::at_least(1))),
            Eth1EndpointsProfile::ExactlyOne => FieldRule::required("eth1Endpoints")
                .message("Please provide an Ethereum 1 endpoint")
                .check_with(
                    Check::Count(ItemCount::exactly(1)),
                    "Only one Ethereum 1 endpoint is allowed",
                ),
            Eth1EndpointsProfile::Optional => FieldRule::optional("eth1Endpoints"),
        };

        RuleSet::new("beacon-node-eth1-endpoints").rule(endpoints.check(Check::EachUrl))
    }
}

/// New validator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CreateValidatorProfile {
    /// Wallet password secret required, one beacon endpoint
    Prysm,
    /// Several beacon endpoints accepted
    Lighthouse,
    /// Nimbus, teku, or no client chosen yet
    SingleEndpoint,
}

impl CreateValidatorProfile {
    /// Keystore secrets offered for selection.
    pub fn keystore_choices(options: &OptionSets) -> &[crate::SelectOption] {
        options.get(KEYSTORE_SECRETS)
    }
}

impl RuleProfile for CreateValidatorProfile {
    const FORM: &'static str = "validator-create";

    fn select(snapshot: &FormSnapshot, _options: &OptionSets) -> Self {
        match client_of(snapshot) {
            Some(Ethereum2Client::Prysm) => CreateValidatorProfile::Prysm,
            Some(Ethereum2Client::Lighthouse) => CreateValidatorProfile::Lighthouse,
            Some(Ethereum2Client::Nimbus | Ethereum2Client::Teku) | None => {
                CreateValidatorProfile::SingleEndpoint
            }
        }
    }

    fn rule_set(&self) -> RuleSet {
        let rules = RuleSet::new("validator-create").rules([
            name_rule(
                "Please provide a name for your validator",
                "Validator name shouldn't contain whitespaces",
            ),
            client_rule(),
            network_rule(),
            FieldRule::required("keystores")
                .message("Please select at least one keystore")
                .check(Check::Count(ItemCount::at_least(1))),
        ]);

        let single_endpoint = FieldRule::required("beaconEndpoints")
            .message("Please provide a beacon node endpoint")
            .check_with(
                Check::Count(ItemCount::exactly(1)),
                "Only one beacon node endpoint is allowed",
            )
            .check(Check::EachUrl);

        match self {
            CreateValidatorProfile::Prysm => rules.rules([
                FieldRule::required("walletPasswordSecretName")
                    .message("Please select a wallet password secret"),
                single_endpoint,
            ]),
            CreateValidatorProfile::Lighthouse => rules.rules([
                FieldRule::hidden("walletPasswordSecretName"),
                FieldRule::required("beaconEndpoints")
                    .message("Please provide at least one beacon node endpoint")
                    .check(Check::Count(ItemCount::at_least(1)))
                    .check(Check::EachUrl),
            ]),
            CreateValidatorProfile::SingleEndpoint => rules.rules([
                FieldRule::hidden("walletPasswordSecretName"),
                single_endpoint,
            ]),
        }
    }
}
