//! Field-level rules.

use crate::FieldValue;
use console_validation::{
    InRange, IsInteger, IsPort, IsUrl, ItemCount, Matches, NoWhitespace, OneOf, ValidationError,
};
use regex::Regex;
use serde::Serialize;

/// How a field participates in a form under one rule set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Requiredness {
    /// Rendered and must hold a non-blank value
    Required,
    /// Rendered; blank is accepted
    Optional,
    /// Rendered as unavailable; a user-entered value is an error
    Forbidden,
    /// Not rendered; any lingering value is dropped silently
    Hidden,
}

impl Requiredness {
    /// Required and optional fields are shown and submitted.
    pub fn is_visible(self) -> bool {
        matches!(self, Requiredness::Required | Requiredness::Optional)
    }
}

/// A check applied to a provided value.
#[derive(Debug, Clone)]
pub enum Check {
    /// Text must match the pattern
    Pattern(&'static Regex),
    /// Text must not contain whitespace
    NoWhitespace,
    /// Text must be an http(s) URL
    Url,
    /// Text must be one of the listed values
    OneOf(&'static [&'static str]),
    /// Value must be an integer (a number, or text that parses as one)
    Integer,
    /// Integer within an inclusive range
    Range { min: i64, max: i64 },
    /// Integer that is a valid TCP/UDP port
    Port,
    /// Number of non-blank items
    Count(ItemCount),
    /// Every item must be an http(s) URL
    EachUrl,
    /// Every item must be one of the listed values
    EachOneOf(&'static [&'static str]),
}

impl Check {
    fn apply(&self, value: &FieldValue, field: &str) -> Result<(), ValidationError> {
        match self {
            Check::Pattern(regex) => Matches(regex).validate(&value.to_string(), field),
            Check::NoWhitespace => NoWhitespace::validate(&value.to_string(), field),
            Check::Url => IsUrl::validate(value.to_string().trim(), field),
            Check::OneOf(allowed) => OneOf(allowed).validate(&value.to_string(), field),
            Check::Integer => integer(value, field).map(|_| ()),
            Check::Range { min, max } => {
                let number = integer(value, field)?;
                InRange { min: *min, max: *max }.validate(number, field)
            }
            Check::Port => IsPort::validate(integer(value, field)?, field),
            Check::Count(count) => count.validate(value.items().len(), field),
            Check::EachUrl => value
                .items()
                .into_iter()
                .try_for_each(|item| IsUrl::validate(item, field)),
            Check::EachOneOf(allowed) => value
                .items()
                .into_iter()
                .try_for_each(|item| OneOf(allowed).validate(item, field)),
        }
    }

    /// Whether the check expects a numeric value, so text can be cast.
    pub(crate) fn is_numeric(&self) -> bool {
        matches!(self, Check::Integer | Check::Range { .. } | Check::Port)
    }

    /// Whether the check looks at individual items, so the value is a list.
    pub(crate) fn is_list(&self) -> bool {
        matches!(self, Check::Count(_) | Check::EachUrl | Check::EachOneOf(_))
    }
}

pub(crate) fn integer(value: &FieldValue, field: &str) -> Result<i64, ValidationError> {
    match value {
        FieldValue::Number(number) => Ok(*number),
        FieldValue::Text(text) => IsInteger::parse(text, field),
        other => Err(ValidationError::new(field, format!("{} must be a number", field))
            .with_constraint("type")
            .with_value(other.to_string())),
    }
}

#[derive(Debug, Clone)]
struct RuleCheck {
    check: Check,
    message: Option<&'static str>,
}

/// Requiredness, checks and default of one field under one rule set.
#[derive(Debug, Clone)]
pub struct FieldRule {
    field: &'static str,
    requiredness: Requiredness,
    checks: Vec<RuleCheck>,
    required_message: Option<&'static str>,
    default: Option<FieldValue>,
    list: bool,
}

impl FieldRule {
    pub fn new(field: &'static str, requiredness: Requiredness) -> Self {
        Self {
            field,
            requiredness,
            checks: Vec::new(),
            required_message: None,
            default: None,
            list: false,
        }
    }

    pub fn required(field: &'static str) -> Self {
        Self::new(field, Requiredness::Required)
    }

    pub fn optional(field: &'static str) -> Self {
        Self::new(field, Requiredness::Optional)
    }

    pub fn forbidden(field: &'static str) -> Self {
        Self::new(field, Requiredness::Forbidden)
    }

    pub fn hidden(field: &'static str) -> Self {
        Self::new(field, Requiredness::Hidden)
    }

    /// Message shown when a required value is missing.
    pub fn message(mut self, message: &'static str) -> Self {
        self.required_message = Some(message);
        self
    }

    /// Add a check reporting the validator's own message.
    pub fn check(mut self, check: Check) -> Self {
        self.checks.push(RuleCheck { check, message: None });
        self
    }

    /// Add a check reporting `message` when it fails.
    pub fn check_with(mut self, check: Check, message: &'static str) -> Self {
        self.checks.push(RuleCheck {
            check,
            message: Some(message),
        });
        self
    }

    /// Value used when the field is absent.
    pub fn default_value(mut self, value: impl Into<FieldValue>) -> Self {
        self.default = Some(value.into());
        self
    }

    /// Submit the value as an array even when a single item was entered.
    /// Implied by item-level checks.
    pub fn list(mut self) -> Self {
        self.list = true;
        self
    }

    pub fn field(&self) -> &'static str {
        self.field
    }

    pub fn requiredness(&self) -> Requiredness {
        self.requiredness
    }

    pub fn fallback(&self) -> Option<&FieldValue> {
        self.default.as_ref()
    }

    pub(crate) fn is_numeric(&self) -> bool {
        self.checks.iter().any(|c| c.check.is_numeric())
    }

    pub(crate) fn is_list(&self) -> bool {
        self.list || self.checks.iter().any(|c| c.check.is_list())
    }

    /// Evaluate the rule against a field's current value.
    ///
    /// `touched` tells whether the user entered the value; a forbidden field
    /// only errors when it did.
    pub fn evaluate(&self, value: Option<&FieldValue>, touched: bool) -> Option<ValidationError> {
        let provided = value
            .filter(|value| !value.is_missing())
            .or(self.default.as_ref())
            .filter(|value| !value.is_blank());

        match (self.requiredness, provided) {
            (Requiredness::Hidden, _) => None,
            // A forbidden toggle left at `false` is not a user-entered value.
            (Requiredness::Forbidden, Some(value)) if touched && *value != FieldValue::Bool(false) => Some(
                ValidationError::new(self.field, format!("{} is not allowed", self.field))
                    .with_constraint("forbidden"),
            ),
            (Requiredness::Forbidden, _) => None,
            (Requiredness::Required, None) => {
                let message = self
                    .required_message
                    .map(str::to_string)
                    .unwrap_or_else(|| format!("{} is required", self.field));
                Some(ValidationError::new(self.field, message).with_constraint("required"))
            }
            (Requiredness::Optional, None) => None,
            (Requiredness::Required | Requiredness::Optional, Some(value)) => {
                self.checks.iter().find_map(|rule_check| {
                    rule_check
                        .check
                        .apply(value, self.field)
                        .err()
                        .map(|error| match rule_check.message {
                            Some(message) => error.with_message(message),
                            None => error,
                        })
                })
            }
        }
    }
}
