//! Validation and payload construction against a selected rule set.

use crate::rule::integer;
use crate::{FieldRule, FieldValue, FormSnapshot, RuleSet};
use console_validation::ValidationResult;
use serde::Serialize;
use serde_json::{Map, Value};

/// Validate every rule of `rule_set` against `snapshot`.
///
/// Never fails and has no side effects: the same snapshot always yields the
/// same result. Fields without a rule are ignored.
pub fn validate(snapshot: &FormSnapshot, rule_set: &RuleSet) -> ValidationResult {
    rule_set
        .iter()
        .filter_map(|rule| {
            let field = rule.field();
            rule.evaluate(snapshot.get(field), snapshot.is_touched(field))
        })
        .collect()
}

/// The request body handed to the API.
///
/// Holds only fields that are required or optional under the rule set the
/// payload was built from.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Payload(Map<String, Value>);

impl Payload {
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.0.get(field)
    }

    pub fn contains(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }

    pub fn into_value(self) -> Value {
        Value::Object(self.0)
    }
}

/// Build the payload for `snapshot`.
///
/// Forbidden, hidden and rule-less fields are stripped whatever their stored
/// value. Absent fields and blank text take the rule's default, or are left
/// out; an emptied list is sent as `[]`. Values are shaped by the rule: list
/// rules always produce arrays without blank entries, numeric rules cast
/// text to numbers, text is trimmed.
pub fn build_payload(snapshot: &FormSnapshot, rule_set: &RuleSet) -> Payload {
    let mut body = Map::new();

    for rule in rule_set.iter().filter(|r| r.requiredness().is_visible()) {
        let field = rule.field();
        let value = snapshot
            .get(field)
            .filter(|value| !value.is_missing())
            .or(rule.fallback());

        if let Some(value) = value {
            body.insert(field.to_string(), normalize(rule, value));
        }
    }

    Payload(body)
}

fn normalize(rule: &FieldRule, value: &FieldValue) -> Value {
    match value {
        FieldValue::List(_) => items(value),
        FieldValue::Text(_) if rule.is_list() => items(value),
        FieldValue::Number(number) if rule.is_list() => Value::from(vec![number.to_string()]),
        FieldValue::Text(text) if rule.is_numeric() => match integer(value, rule.field()) {
            Ok(number) => Value::from(number),
            Err(_) => Value::from(text.trim()),
        },
        FieldValue::Text(text) => Value::from(text.trim()),
        FieldValue::Bool(flag) => Value::from(*flag),
        FieldValue::Number(number) => Value::from(*number),
    }
}

fn items(value: &FieldValue) -> Value {
    Value::from(value.items().into_iter().map(str::to_string).collect::<Vec<_>>())
}

/// Validate, then build the payload if the snapshot is valid.
pub fn prepare(snapshot: &FormSnapshot, rule_set: &RuleSet) -> Result<Payload, ValidationResult> {
    let result = validate(snapshot, rule_set);
    if result.is_valid() {
        Ok(build_payload(snapshot, rule_set))
    } else {
        Err(result)
    }
}

/// Fields shown under `previous` that are no longer shown under `next`.
///
/// These hold stale values once the form switches rule sets and must be
/// cleared.
pub fn stale_fields(previous: &RuleSet, next: &RuleSet) -> Vec<&'static str> {
    previous
        .visible_fields()
        .filter(|field| !next.is_visible(field))
        .collect()
}
