//! Command-line interface definition.
//!
//! `hotdev [OPTIONS] [ROOT]` serves `ROOT` (default `public`) and reloads
//! connected browsers whenever a file under it changes.

mod args;
mod validation;

use clap::Parser;

pub use args::ServeArgs;
pub use validation::parse_ignore_prefix;

/// hotdev - static file server with live reload
#[derive(Parser, Debug)]
#[command(
    name = "hotdev",
    version,
    about = "Static file development server with live reload",
    long_about = "hotdev serves a directory over HTTP and reloads every connected browser\n\
                  when a file under that directory changes. HTML pages get a small client\n\
                  script injected that listens on a Server-Sent Events stream."
)]
pub struct Cli {
    /// Enable verbose logging (debug level)
    #[arg(short, long)]
    pub verbose: bool,

    /// Suppress all output except errors
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,

    #[command(flatten)]
    pub serve: ServeArgs,
}
