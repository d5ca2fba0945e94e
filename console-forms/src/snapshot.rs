//! Current values of one form instance.

use crate::FieldValue;
use std::collections::{BTreeMap, BTreeSet};

/// Field values of an in-progress form plus which of them the user touched.
///
/// Values loaded from an existing resource are inserted with
/// [`with`](Self::with) and stay untouched; values the user enters go through
/// [`set`](Self::set) and are marked touched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormSnapshot {
    values: BTreeMap<String, FieldValue>,
    touched: BTreeSet<String>,
}

impl FormSnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Prefill a value without marking it touched.
    pub fn with(mut self, field: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        self.values.insert(field.into(), value.into());
        self
    }

    /// Record a user-entered value.
    pub fn set(&mut self, field: impl Into<String>, value: impl Into<FieldValue>) {
        let field = field.into();
        self.touched.insert(field.clone());
        self.values.insert(field, value.into());
    }

    /// Drop a value and its touched flag.
    pub fn clear(&mut self, field: &str) -> Option<FieldValue> {
        self.touched.remove(field);
        self.values.remove(field)
    }

    pub fn get(&self, field: &str) -> Option<&FieldValue> {
        self.values.get(field)
    }

    pub fn contains(&self, field: &str) -> bool {
        self.values.contains_key(field)
    }

    /// Text value of `field`, if it holds text.
    pub fn text(&self, field: &str) -> Option<&str> {
        self.get(field).and_then(FieldValue::as_text)
    }

    /// Boolean value of `field`; absent or non-boolean reads as `false`.
    pub fn flag(&self, field: &str) -> bool {
        self.get(field).and_then(FieldValue::as_bool).unwrap_or(false)
    }

    /// Boolean value of `field`, or `default` when it is absent.
    pub fn flag_or(&self, field: &str, default: bool) -> bool {
        self.get(field).and_then(FieldValue::as_bool).unwrap_or(default)
    }

    pub fn is_touched(&self, field: &str) -> bool {
        self.touched.contains(field)
    }

    /// True once any field has been edited since the last reset.
    pub fn is_dirty(&self) -> bool {
        !self.touched.is_empty()
    }

    /// Forget every touched flag, keeping the values.
    pub fn mark_pristine(&mut self) {
        self.touched.clear();
    }

    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}
