// Typed console settings

use crate::{ConfigManager, ConfigValidator, Result, Validate};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Default backend API root.
pub const DEFAULT_API_BASE_URL: &str = "http://localhost:5000/api/v1";

/// Settings the console needs to reach the backend API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConsoleSettings {
    /// Root URL every resource path is appended to
    pub api_base_url: String,
    /// Whole-request timeout
    pub request_timeout_secs: u64,
    /// TCP connect timeout
    pub connect_timeout_secs: u64,
    /// Value of the `User-Agent` header
    pub user_agent: String,
}

impl Default for ConsoleSettings {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            request_timeout_secs: 30,
            connect_timeout_secs: 10,
            user_agent: format!("chain-console/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl ConsoleSettings {
    /// Read settings from a loaded manager, falling back to defaults for
    /// missing keys, then validate them. A malformed value is an error.
    pub fn load(manager: &ConfigManager) -> Result<Self> {
        let defaults = Self::default();
        let settings = Self {
            api_base_url: manager
                .get_opt("api_base_url")?
                .unwrap_or(defaults.api_base_url),
            request_timeout_secs: manager
                .get_opt("request_timeout_secs")?
                .unwrap_or(defaults.request_timeout_secs),
            connect_timeout_secs: manager
                .get_opt("connect_timeout_secs")?
                .unwrap_or(defaults.connect_timeout_secs),
            user_agent: manager.get_opt("user_agent")?.unwrap_or(defaults.user_agent),
        };

        settings.validate()?;
        Ok(settings)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }
}

impl Validate for ConsoleSettings {
    fn validate(&self) -> Result<()> {
        ConfigValidator::is_url(&self.api_base_url, "api_base_url")?;
        ConfigValidator::in_range(self.request_timeout_secs, 1, 600, "request_timeout_secs")?;
        ConfigValidator::in_range(self.connect_timeout_secs, 1, 120, "connect_timeout_secs")?;
        ConfigValidator::not_empty(&self.user_agent, "user_agent")
    }
}
