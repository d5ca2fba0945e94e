//! Field values held by a form snapshot.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The value of one form field.
///
/// Toggles hold booleans, numeric inputs hold either a parsed number or the
/// raw text the user typed, and multi-value inputs (endpoint lists, keystore
/// selections) hold a list of strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Bool(bool),
    Number(i64),
    Text(String),
    List(Vec<String>),
}

impl FieldValue {
    pub fn text(value: impl Into<String>) -> Self {
        FieldValue::Text(value.into())
    }

    pub fn list<I, S>(items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        FieldValue::List(items.into_iter().map(Into::into).collect())
    }

    /// Blank text and lists without any non-blank item count as "not
    /// provided". Booleans and numbers are always provided.
    pub fn is_blank(&self) -> bool {
        match self {
            FieldValue::Text(text) => text.trim().is_empty(),
            FieldValue::List(items) => items.iter().all(|item| item.trim().is_empty()),
            FieldValue::Bool(_) | FieldValue::Number(_) => false,
        }
    }

    /// Blank text is an input left empty, so it stands for no value at all
    /// and gives way to a default. An emptied list is still a value.
    pub fn is_missing(&self) -> bool {
        matches!(self, FieldValue::Text(text) if text.trim().is_empty())
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            FieldValue::Text(text) => Some(text),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            FieldValue::Bool(flag) => Some(*flag),
            _ => None,
        }
    }

    /// Trimmed, non-blank entries. A single text value is a one-item list,
    /// which is how single-select inputs feed multi-value rules.
    pub fn items(&self) -> Vec<&str> {
        match self {
            FieldValue::List(items) => items
                .iter()
                .map(|item| item.trim())
                .filter(|item| !item.is_empty())
                .collect(),
            FieldValue::Text(text) if !text.trim().is_empty() => vec![text.trim()],
            _ => Vec::new(),
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Bool(flag) => write!(f, "{}", flag),
            FieldValue::Number(number) => write!(f, "{}", number),
            FieldValue::Text(text) => write!(f, "{}", text),
            FieldValue::List(items) => write!(f, "{}", items.join(", ")),
        }
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        FieldValue::Bool(value)
    }
}

impl From<i64> for FieldValue {
    fn from(value: i64) -> Self {
        FieldValue::Number(value)
    }
}

impl From<u16> for FieldValue {
    fn from(value: u16) -> Self {
        FieldValue::Number(i64::from(value))
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Text(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::Text(value)
    }
}

impl From<Vec<String>> for FieldValue {
    fn from(value: Vec<String>) -> Self {
        FieldValue::List(value)
    }
}

impl From<Vec<&str>> for FieldValue {
    fn from(value: Vec<&str>) -> Self {
        FieldValue::list(value)
    }
}
