use clap::Args;
use std::path::PathBuf;

use crate::cli::validation::parse_ignore_prefix;

/// Arguments controlling what is served and where.
///
/// Every field is optional so that unset flags fall through to the
/// environment, the config file and finally the built-in defaults.
#[derive(Args, Debug, Clone, Default)]
pub struct ServeArgs {
    /// Directory to serve and watch
    ///
    /// Defaults to `public` relative to the working directory.
    #[arg(value_name = "ROOT")]
    pub root: Option<PathBuf>,

    /// Host name or address to listen on
    ///
    /// Overrides the HOST environment variable. Defaults to `localhost`.
    #[arg(long, value_name = "HOST")]
    pub host: Option<String>,

    /// Port to listen on
    ///
    /// Overrides the PORT environment variable. Defaults to 8080.
    #[arg(short, long, value_name = "PORT")]
    pub port: Option<u16>,

    /// Extra directory prefix to ignore when watching (repeatable)
    ///
    /// `.git` and `node_modules` are always ignored. Prefixes are relative to
    /// ROOT and compared against the parent directory of a changed file.
    #[arg(long = "ignore", value_name = "DIR", value_parser = parse_ignore_prefix)]
    pub ignore: Vec<String>,

    /// Path to a JSON config file
    ///
    /// Without this flag, `hotdev.config.json` in the working directory is
    /// used when present.
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,
}
