// Built-in validators

use crate::ValidationError;
use once_cell::sync::Lazy;
use regex::Regex;

static URL_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^https?://[^\s/$.?#].[^\s]*$").unwrap());

static NO_WHITESPACE_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\S*$").unwrap());

static INTEGER_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^-?[0-9]+$").unwrap());

// String validators

/// Validates that a string contains no whitespace at all
pub struct NoWhitespace;

impl NoWhitespace {
    pub fn validate(value: &str, field: &str) -> Result<(), ValidationError> {
        if NO_WHITESPACE_REGEX.is_match(value) {
            Ok(())
        } else {
            Err(ValidationError::new(
                field,
                format!("{} shouldn't contain whitespaces", field),
            )
            .with_constraint("pattern")
            .with_value(value.to_string()))
        }
    }
}

/// Validates an http(s) URL
pub struct IsUrl;

impl IsUrl {
    pub fn validate(value: &str, field: &str) -> Result<(), ValidationError> {
        if URL_REGEX.is_match(value) {
            Ok(())
        } else {
            Err(
                ValidationError::new(field, format!("{} must be a valid URL", field))
                    .with_constraint("url")
                    .with_value(value.to_string()),
            )
        }
    }
}

/// Validates a value against an arbitrary pattern
pub struct Matches<'a>(pub &'a Regex);

impl Matches<'_> {
    pub fn validate(&self, value: &str, field: &str) -> Result<(), ValidationError> {
        if self.0.is_match(value) {
            Ok(())
        } else {
            Err(ValidationError::new(
                field,
                format!("{} does not match the required format", field),
            )
            .with_constraint("pattern")
            .with_value(value.to_string()))
        }
    }
}

/// Validates membership in a fixed set of values
pub struct OneOf<'a>(pub &'a [&'a str]);

impl OneOf<'_> {
    pub fn validate(&self, value: &str, field: &str) -> Result<(), ValidationError> {
        if self.0.contains(&value) {
            Ok(())
        } else {
            Err(ValidationError::new(
                field,
                format!("{} must be one of: {}", field, self.0.join(", ")),
            )
            .with_constraint("oneOf")
            .with_value(value.to_string()))
        }
    }
}

// Number validators

/// Validates an integer within an inclusive range
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InRange {
    pub min: i64,
    pub max: i64,
}

impl InRange {
    pub fn validate(&self, value: i64, field: &str) -> Result<(), ValidationError> {
        if value < self.min || value > self.max {
            Err(ValidationError::new(
                field,
                format!("{} must be between {} and {}", field, self.min, self.max),
            )
            .with_constraint("range")
            .with_value(value.to_string()))
        } else {
            Ok(())
        }
    }
}

/// Validates a TCP/UDP port number
pub struct IsPort;

impl IsPort {
    pub fn validate(value: i64, field: &str) -> Result<(), ValidationError> {
        InRange { min: 1, max: 65535 }
            .validate(value, field)
            .map_err(|e| e.with_constraint("port"))
    }
}

/// Parses integer text typed into a numeric input
pub struct IsInteger;

impl IsInteger {
    pub fn parse(value: &str, field: &str) -> Result<i64, ValidationError> {
        let trimmed = value.trim();
        if !INTEGER_REGEX.is_match(trimmed) {
            return Err(
                ValidationError::new(field, format!("{} must be a number", field))
                    .with_constraint("type")
                    .with_value(value.to_string()),
            );
        }
        trimmed.parse::<i64>().map_err(|_| {
            ValidationError::new(field, format!("{} must be a number", field))
                .with_constraint("type")
                .with_value(value.to_string())
        })
    }
}

// List validators

/// Validates how many items a multi-value field holds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ItemCount {
    pub min: usize,
    pub max: Option<usize>,
}

impl ItemCount {
    /// Exactly `n` items.
    pub fn exactly(n: usize) -> Self {
        Self { min: n, max: Some(n) }
    }

    /// At least `n` items.
    pub fn at_least(n: usize) -> Self {
        Self { min: n, max: None }
    }

    pub fn validate(&self, count: usize, field: &str) -> Result<(), ValidationError> {
        let too_few = count < self.min;
        let too_many = self.max.is_some_and(|max| count > max);
        if !too_few && !too_many {
            return Ok(());
        }

        let message = match self.max {
            Some(max) if max == self.min => format!("{} must contain exactly {} item(s)", field, max),
            Some(max) => format!("{} must contain between {} and {} items", field, self.min, max),
            None => format!("{} must contain at least {} item(s)", field, self.min),
        };
        Err(ValidationError::new(field, message)
            .with_constraint("count")
            .with_value(count.to_string()))
    }
}
