//! Named collections of field rules.

use crate::{FieldRule, Requiredness};

/// One validation profile: the ordered rules a form applies under a given
/// condition.
///
/// A field with no rule is absent from the form altogether; it is neither
/// rendered, validated nor submitted.
#[derive(Debug, Clone)]
pub struct RuleSet {
    name: &'static str,
    rules: Vec<FieldRule>,
}

impl RuleSet {
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            rules: Vec::new(),
        }
    }

    /// Append a rule, replacing an earlier rule for the same field.
    pub fn rule(mut self, rule: FieldRule) -> Self {
        match self.rules.iter().position(|r| r.field() == rule.field()) {
            Some(index) => self.rules[index] = rule,
            None => self.rules.push(rule),
        }
        self
    }

    /// Append several rules.
    pub fn rules(self, rules: impl IntoIterator<Item = FieldRule>) -> Self {
        rules.into_iter().fold(self, RuleSet::rule)
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn get(&self, field: &str) -> Option<&FieldRule> {
        self.rules.iter().find(|r| r.field() == field)
    }

    /// `None` when the form has no rule for `field`.
    pub fn requiredness(&self, field: &str) -> Option<Requiredness> {
        self.get(field).map(FieldRule::requiredness)
    }

    /// Whether the field exists in this rule set at all, hidden or not.
    pub fn offers(&self, field: &str) -> bool {
        self.get(field).is_some()
    }

    /// Whether the field is shown (and submitted).
    pub fn is_visible(&self, field: &str) -> bool {
        self.requiredness(field).is_some_and(Requiredness::is_visible)
    }

    /// Fields shown under this rule set, in declaration order.
    pub fn visible_fields(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.rules
            .iter()
            .filter(|r| r.requiredness().is_visible())
            .map(FieldRule::field)
    }

    pub fn iter(&self) -> impl Iterator<Item = &FieldRule> {
        self.rules.iter()
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> RuleSet {
        RuleSet::new("sample").rules([
            FieldRule::required("name"),
            FieldRule::optional("rpc"),
            FieldRule::hidden("rpcPort"),
            FieldRule::forbidden("miner"),
        ])
    }

    #[test]
    fn test_lookup() {
        let rules = sample();
        assert_eq!(rules.name(), "sample");
        assert_eq!(rules.requiredness("rpcPort"), Some(Requiredness::Hidden));
        assert_eq!(rules.requiredness("graphql"), None);
        assert!(rules.offers("rpcPort"));
        assert!(!rules.offers("graphql"));
        assert!(!rules.is_visible("miner"));
    }

    #[test]
    fn test_visible_fields_keep_order() {
        let fields: Vec<_> = sample().visible_fields().collect();
        assert_eq!(fields, vec!["name", "rpc"]);
    }

    #[test]
    fn test_later_rule_replaces_earlier() {
        let rules = sample().rule(FieldRule::required("rpcPort"));
        assert_eq!(rules.len(), 4);
        assert_eq!(rules.requiredness("rpcPort"), Some(Requiredness::Required));
    }
}
