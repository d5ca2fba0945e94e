//! Rule-set selection.

use crate::{FormSnapshot, OptionSets, RuleSet};
use std::fmt::Debug;

/// A form whose rules depend on its own values.
///
/// Implementors are small enums (or plain structs of flags) naming every
/// rule-set variant the form can be in. [`select`](Self::select) is the
/// selection predicate: pure and total, so every snapshot maps to exactly one
/// variant and unmatched snapshots land on the form's permissive fallback.
/// [`rule_set`](Self::rule_set) matches exhaustively over the variant.
pub trait RuleProfile: Copy + Eq + Debug + Send + Sync + 'static {
    /// Form name used in logs.
    const FORM: &'static str;

    /// Pick the variant that applies to `snapshot`.
    fn select(snapshot: &FormSnapshot, options: &OptionSets) -> Self;

    /// Rules for this variant.
    fn rule_set(&self) -> RuleSet;
}

/// Select the rule set that applies to `snapshot`.
pub fn select_rule_set<P: RuleProfile>(snapshot: &FormSnapshot, options: &OptionSets) -> RuleSet {
    P::select(snapshot, options).rule_set()
}
