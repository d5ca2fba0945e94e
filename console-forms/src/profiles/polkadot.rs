//! Polkadot node networking tab.

use crate::{Check, FieldRule, FormSnapshot, OptionSets, RuleProfile, RuleSet};

pub const SYNC_MODES: &[&str] = &["fast", "full"];

pub const DEFAULT_P2P_PORT: i64 = 30333;
pub const DEFAULT_RETAINED_BLOCKS: i64 = 256;

/// Retained blocks only mean something while pruning is on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NetworkingProfile {
    Pruned,
    Archive,
}

impl RuleProfile for NetworkingProfile {
    const FORM: &'static str = "polkadot-networking";

    fn select(snapshot: &FormSnapshot, _options: &OptionSets) -> Self {
        if snapshot.flag_or("pruning", true) {
            NetworkingProfile::Pruned
        } else {
            NetworkingProfile::Archive
        }
    }

    fn rule_set(&self) -> RuleSet {
        let rules = RuleSet::new("polkadot-networking").rules([
            FieldRule::optional("nodePrivateKeySecretName").default_value(""),
            FieldRule::optional("p2pPort")
                .check_with(Check::Integer, "P2P Port is number")
                .check_with(Check::Port, "P2P Port is between 1 and 65535")
                .default_value(DEFAULT_P2P_PORT),
            FieldRule::optional("syncMode")
                .check(Check::OneOf(SYNC_MODES))
                .default_value("full"),
            FieldRule::optional("pruning").default_value(true),
        ]);

        match self {
            NetworkingProfile::Pruned => rules.rule(
                FieldRule::optional("retainedBlocks")
                    .check_with(Check::Integer, "Retained Blocks is number")
                    .check_with(
                        Check::Range {
                            min: 0,
                            max: i64::MAX,
                        },
                        "Retained Blocks can't be negative",
                    )
                    .default_value(DEFAULT_RETAINED_BLOCKS),
            ),
            NetworkingProfile::Archive => rules.rule(FieldRule::hidden("retainedBlocks")),
        }
    }
}
