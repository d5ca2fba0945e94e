//! Rule profiles of the console's create and update forms.

pub mod ethereum;
pub mod ethereum2;
pub mod ipfs;
pub mod polkadot;

use crate::{Check, FieldRule};

/// `name` of a new resource: required, no whitespace.
pub(crate) fn name_rule(missing: &'static str, whitespace: &'static str) -> FieldRule {
    FieldRule::required("name")
        .message(missing)
        .check_with(Check::NoWhitespace, whitespace)
}

/// Port input shown while `enabled`, hidden otherwise.
pub(crate) fn port_rule(field: &'static str, enabled: bool) -> FieldRule {
    if enabled {
        FieldRule::required(field).check(Check::Port)
    } else {
        FieldRule::hidden(field)
    }
}

/// Rule that exists only while `visible`, hidden otherwise.
pub(crate) fn shown_if(visible: bool, rule: FieldRule) -> FieldRule {
    if visible {
        rule
    } else {
        FieldRule::hidden(rule.field())
    }
}
