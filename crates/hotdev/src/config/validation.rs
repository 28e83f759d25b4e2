use crate::config::ServerConfig;
use crate::error::{ConfigError, Result};

impl ServerConfig {
    /// Validate the loaded config and resolve `root` to a canonical path.
    ///
    /// # Errors
    ///
    /// - `ConfigError::RootNotFound` when the web root is missing or not a directory
    /// - `ConfigError::InvalidValue` for an empty host
    pub fn validate(&mut self) -> Result<()> {
        if self.host.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "host".to_string(),
                value: format!("{:?}", self.host),
                hint: "Use a host name such as localhost or an address such as 127.0.0.1"
                    .to_string(),
            }
            .into());
        }

        if !self.root.is_dir() {
            return Err(ConfigError::RootNotFound(self.root.clone()).into());
        }

        self.root = self
            .root
            .canonicalize()
            .map_err(|_| ConfigError::RootNotFound(self.root.clone()))?;

        Ok(())
    }
}
