// Errors raised while assembling console settings

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("setting `{0}` is not set")]
    KeyNotFound(String),

    /// A settings source (file, `.env`) could not be read
    #[error("cannot load settings: {0}")]
    LoadError(String),

    #[error("cannot parse settings file: {0}")]
    ParseError(String),

    /// A value was read but failed a check
    #[error("invalid setting: {0}")]
    ValidationError(String),

    /// A stored value does not have the requested type
    #[error("setting `{key}` has the wrong type: {message}")]
    InvalidValue { key: String, message: String },

    #[error("cannot store setting `{key}`: {message}")]
    SerializationError { key: String, message: String },
}

pub type Result<T> = std::result::Result<T, ConfigError>;
