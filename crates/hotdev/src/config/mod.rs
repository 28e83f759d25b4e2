//! Server configuration with multi-source loading.
//!
//! Priority: CLI > environment (`HOST`, `PORT`) > config file > defaults.
//! The result is resolved once at startup and read-only afterwards.

mod loading;
mod validation;

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::dev::IgnoreList;

/// Default host name to listen on.
pub const DEFAULT_HOST: &str = "localhost";

/// Default port to listen on.
pub const DEFAULT_PORT: u16 = 8080;

/// Default web root, relative to the working directory.
pub const DEFAULT_ROOT: &str = "public";

/// Config file picked up from the working directory when `--config` is absent.
pub const DEFAULT_CONFIG_FILE: &str = "hotdev.config.json";

/// Resolved server configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ServerConfig {
    /// Host name or address to bind
    #[serde(default = "default_host")]
    pub host: String,

    /// TCP port to bind
    #[serde(default = "default_port")]
    pub port: u16,

    /// Web root; absolute and canonical after `validate()`
    #[serde(default = "default_root")]
    pub root: PathBuf,

    /// Extra watch ignore prefixes, on top of `.git` and `node_modules`
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub ignore: Vec<String>,
}

fn default_host() -> String {
    DEFAULT_HOST.to_string()
}

fn default_port() -> u16 {
    DEFAULT_PORT
}

fn default_root() -> PathBuf {
    PathBuf::from(DEFAULT_ROOT)
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            root: default_root(),
            ignore: Vec::new(),
        }
    }
}

impl ServerConfig {
    /// Base URL of the server, omitting the port when it is 80.
    pub fn server_url(&self) -> String {
        if self.port == 80 {
            format!("http://{}/", self.host)
        } else {
            format!("http://{}:{}/", self.host, self.port)
        }
    }

    /// Effective watch ignore list.
    pub fn ignore_list(&self) -> IgnoreList {
        IgnoreList::new(self.ignore.iter().cloned())
    }
}
