//! Field validation primitives for chain console forms
//!
//! Provides the built-in validators used by form rule sets and the
//! per-field [`ValidationResult`] the console renders inline.
//!
//! # Examples
//!
//! ## Single validators
//!
//! ```
//! use console_validation::{IsPort, ItemCount, NoWhitespace};
//!
//! assert!(NoWhitespace::validate("geth-1", "name").is_ok());
//! assert!(NoWhitespace::validate("geth 1", "name").is_err());
//! assert!(IsPort::validate(8545, "rpcPort").is_ok());
//! assert!(ItemCount::exactly(1).validate(2, "eth1Endpoints").is_err());
//! ```
//!
//! ## Collecting results
//!
//! ```
//! use console_validation::{IsPort, OneOf, ValidationResult};
//!
//! let result: ValidationResult = [
//!     OneOf(&["fast", "full"]).validate("warp", "syncMode"),
//!     IsPort::validate(30333, "p2pPort"),
//! ]
//! .into_iter()
//! .filter_map(Result::err)
//! .collect();
//! assert_eq!(result.fields().collect::<Vec<_>>(), vec!["syncMode"]);
//! ```

mod errors;
mod result;
mod validators;

pub use errors::*;
pub use result::*;
pub use validators::*;
