use crate::cli::ServeArgs;
use crate::config::{ServerConfig, DEFAULT_CONFIG_FILE};
use crate::error::{ConfigError, Result};
use figment::{
    providers::{Env, Format as _, Json, Serialized},
    Figment,
};
use serde::Serialize;
use std::path::{Path, PathBuf};

/// Only the flags that were actually given on the command line.
#[derive(Debug, Default, Serialize)]
struct CliOverrides {
    #[serde(skip_serializing_if = "Option::is_none")]
    host: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    port: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    root: Option<PathBuf>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    ignore: Vec<String>,
}

impl From<&ServeArgs> for CliOverrides {
    fn from(args: &ServeArgs) -> Self {
        Self {
            host: args.host.clone(),
            port: args.port,
            root: args.root.clone(),
            ignore: args.ignore.clone(),
        }
    }
}

impl ServerConfig {
    /// Load configuration from defaults, config file, environment and CLI.
    ///
    /// The returned config is not validated yet; call [`ServerConfig::validate`]
    /// before starting anything.
    pub fn load(args: &ServeArgs) -> Result<Self> {
        Self::load_from(args, Path::new("."))
    }

    /// Same as [`ServerConfig::load`], looking for the default config file in `cwd`.
    pub fn load_from(args: &ServeArgs, cwd: &Path) -> Result<Self> {
        let mut figment = Figment::new().merge(Serialized::defaults(ServerConfig::default()));

        if let Some(path) = Self::config_file(args.config.as_deref(), cwd)? {
            tracing::debug!("Loading config file {}", path.display());
            figment = figment.merge(Json::file(path));
        }

        figment = figment
            .merge(Env::raw().only(&["host", "port"]))
            .merge(Serialized::defaults(CliOverrides::from(args)));

        figment.extract().map_err(|e| {
            ConfigError::InvalidValue {
                field: e
                    .path
                    .last()
                    .cloned()
                    .unwrap_or_else(|| "configuration".to_string()),
                value: e.to_string(),
                hint: "Check hotdev.config.json, HOST and PORT for typos and field types"
                    .to_string(),
            }
            .into()
        })
    }

    fn config_file(explicit: Option<&Path>, cwd: &Path) -> Result<Option<PathBuf>> {
        match explicit {
            Some(path) if path.is_file() => Ok(Some(path.to_path_buf())),
            Some(path) => Err(ConfigError::NotFound(path.to_path_buf()).into()),
            None => {
                let default_path = cwd.join(DEFAULT_CONFIG_FILE);
                Ok(default_path.is_file().then_some(default_path))
            }
        }
    }
}
