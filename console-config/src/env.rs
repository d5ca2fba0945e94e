// Environment variable loading

use crate::Result;
use std::collections::HashMap;
use std::env;

/// Reads `<PREFIX>_<KEY>` environment variables into lowercase keys.
pub struct EnvLoader {
    prefix: Option<String>,
}

impl EnvLoader {
    pub fn new(prefix: Option<String>) -> Self {
        Self { prefix }
    }

    /// Collect every matching variable.
    ///
    /// With a prefix of `CONSOLE`, `CONSOLE_API_BASE_URL` becomes
    /// `api_base_url`. Without a prefix every variable is returned.
    pub fn load(&self) -> Result<HashMap<String, String>> {
        Ok(self.collect(env::vars()))
    }

    fn collect(&self, vars: impl Iterator<Item = (String, String)>) -> HashMap<String, String> {
        let mut config = HashMap::new();

        for (key, value) in vars {
            match self.prefix.as_deref() {
                Some(prefix) => {
                    if let Some(rest) = key
                        .strip_prefix(prefix)
                        .and_then(|rest| rest.strip_prefix('_'))
                        && !rest.is_empty()
                    {
                        config.insert(rest.to_lowercase(), value);
                    }
                }
                None => {
                    config.insert(key.to_lowercase(), value);
                }
            }
        }

        config
    }
}

impl Default for EnvLoader {
    fn default() -> Self {
        Self::new(None)
    }
}
