//! Configuration management for the chain console
//!
//! Values are gathered from environment variables, `.env` files and
//! JSON/TOML/env files into a single key/value store, then read back into
//! typed sections such as [`ConsoleSettings`].
//!
//! ```
//! use console_config::{ConfigManager, ConsoleSettings};
//!
//! let manager = ConfigManager::new();
//! manager.set("api_base_url", "http://console-api:5000/api/v1").unwrap();
//!
//! let settings = ConsoleSettings::load(&manager).unwrap();
//! assert_eq!(settings.api_base_url, "http://console-api:5000/api/v1");
//! ```

pub mod env;
pub mod error;
pub mod loader;
pub mod settings;
pub mod validation;

pub use env::EnvLoader;
pub use error::{ConfigError, Result};
pub use loader::{ConfigLoader, FileFormat};
pub use settings::{ConsoleSettings, DEFAULT_API_BASE_URL};
pub use validation::{ConfigValidator, Validate};

use parking_lot::RwLock;
use serde::de::DeserializeOwned;
use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

/// Environment prefix used by [`ConfigManager::from_env`].
pub const ENV_PREFIX: &str = "CONSOLE";

/// Shared key/value configuration store
#[derive(Clone)]
pub struct ConfigManager {
    config: Arc<RwLock<HashMap<String, serde_json::Value>>>,
    env_prefix: Option<String>,
}

impl ConfigManager {
    pub fn new() -> Self {
        Self {
            config: Arc::new(RwLock::new(HashMap::new())),
            env_prefix: None,
        }
    }

    /// Create a manager whose environment loading only picks up
    /// `<prefix>_*` variables.
    pub fn with_prefix(prefix: impl Into<String>) -> Self {
        Self {
            config: Arc::new(RwLock::new(HashMap::new())),
            env_prefix: Some(prefix.into()),
        }
    }

    /// Builder starting from the `CONSOLE_` prefix.
    pub fn builder() -> ConfigManagerBuilder {
        ConfigManagerBuilder::new()
    }

    /// Load `CONSOLE_*` environment variables into a fresh manager.
    pub fn from_env() -> Result<Self> {
        let manager = Self::with_prefix(ENV_PREFIX);
        manager.load_env()?;
        Ok(manager)
    }

    pub fn load_env(&self) -> Result<()> {
        let loader = EnvLoader::new(self.env_prefix.clone());
        let env_vars = loader.load()?;

        let mut config = self.config.write();
        for (key, value) in env_vars {
            config.insert(key, serde_json::Value::String(value));
        }

        Ok(())
    }

    /// Load a `.env` file into the process environment, then read it.
    ///
    /// Without a path a missing `.env` is not an error.
    pub fn load_dotenv(&self, path: Option<&Path>) -> Result<()> {
        match path {
            Some(path) => {
                dotenvy::from_path(path).map_err(|e| ConfigError::LoadError(e.to_string()))?;
            }
            None => {
                dotenvy::dotenv().ok();
            }
        }
        self.load_env()
    }

    /// Merge the top-level keys of a configuration file.
    pub fn load_file(&self, path: impl AsRef<Path>, format: FileFormat) -> Result<()> {
        let data = ConfigLoader::new(format).load_file(path)?;

        match data {
            serde_json::Value::Object(map) => {
                let mut config = self.config.write();
                config.extend(map);
                Ok(())
            }
            _ => Err(ConfigError::ParseError(
                "configuration file must contain a table/object at the top level".to_string(),
            )),
        }
    }

    pub fn set<T: serde::Serialize>(&self, key: &str, value: T) -> Result<()> {
        let json_value =
            serde_json::to_value(value).map_err(|e| ConfigError::SerializationError {
                key: key.to_string(),
                message: e.to_string(),
            })?;

        self.config.write().insert(key.to_string(), json_value);
        Ok(())
    }

    /// Read a typed value.
    ///
    /// Strings coming from the environment are re-parsed as JSON when the
    /// direct conversion fails, so `"30"` reads as a number and `"true"` as
    /// a boolean.
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Result<T> {
        let config = self.config.read();

        let value = config
            .get(key)
            .ok_or_else(|| ConfigError::KeyNotFound(key.to_string()))?;

        let invalid = |err: serde_json::Error| ConfigError::InvalidValue {
            key: key.to_string(),
            message: err.to_string(),
        };

        match serde_json::from_value::<T>(value.clone()) {
            Ok(typed) => Ok(typed),
            Err(err) => match value {
                serde_json::Value::String(raw) => serde_json::from_str(raw).map_err(|_| invalid(err)),
                _ => Err(invalid(err)),
            },
        }
    }

    /// Read a typed value that may be missing. A present value of the wrong
    /// type is still an error.
    pub fn get_opt<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>> {
        match self.get(key) {
            Ok(value) => Ok(Some(value)),
            Err(ConfigError::KeyNotFound(_)) => Ok(None),
            Err(err) => Err(err),
        }
    }

    /// Read a typed value, falling back to `default` when it is missing or
    /// malformed.
    pub fn get_or<T: DeserializeOwned>(&self, key: &str, default: T) -> T {
        self.get(key).unwrap_or(default)
    }

    pub fn get_string(&self, key: &str) -> Result<String> {
        self.get(key)
    }

    pub fn get_bool(&self, key: &str) -> Result<bool> {
        self.get(key)
    }

    pub fn has(&self, key: &str) -> bool {
        self.config.read().contains_key(key)
    }

    pub fn keys(&self) -> Vec<String> {
        self.config.read().keys().cloned().collect()
    }

    /// Copy every key of `other` over this manager's values.
    pub fn merge(&self, other: &ConfigManager) {
        let other_config = other.config.read().clone();
        self.config.write().extend(other_config);
    }
}

impl Default for ConfigManager {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder assembling a [`ConfigManager`] from several sources.
///
/// Sources are applied in order: `.env`, environment, then files, so file
/// values win over environment values.
pub struct ConfigManagerBuilder {
    prefix: String,
    load_env: bool,
    load_dotenv: bool,
    dotenv_path: Option<String>,
    config_files: Vec<(String, Option<FileFormat>)>,
}

impl ConfigManagerBuilder {
    pub fn new() -> Self {
        Self {
            prefix: ENV_PREFIX.to_string(),
            load_env: false,
            load_dotenv: false,
            dotenv_path: None,
            config_files: Vec::new(),
        }
    }

    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }

    pub fn load_env(mut self) -> Self {
        self.load_env = true;
        self
    }

    pub fn load_dotenv(mut self, path: Option<String>) -> Self {
        self.load_dotenv = true;
        self.dotenv_path = path;
        self
    }

    /// Add a file; the format is detected from its extension when `None`.
    pub fn add_file(mut self, path: impl Into<String>, format: Option<FileFormat>) -> Self {
        self.config_files.push((path.into(), format));
        self
    }

    pub fn build(self) -> Result<ConfigManager> {
        let manager = ConfigManager::with_prefix(self.prefix);

        if self.load_dotenv {
            manager.load_dotenv(self.dotenv_path.as_deref().map(Path::new))?;
        }

        if self.load_env {
            manager.load_env()?;
        }

        for (path, format) in self.config_files {
            let format = match format {
                Some(format) => format,
                None => FileFormat::detect(&path)?,
            };
            manager.load_file(&path, format)?;
        }

        Ok(manager)
    }
}

impl Default for ConfigManagerBuilder {
    fn default() -> Self {
        Self::new()
    }
}
