//! hotdev entry point: parse arguments, set up logging, run the server.

use clap::Parser;
use hotdev::{cli, commands, error, logger};
use miette::Result;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let args = cli::Cli::parse();

    logger::init_logger(args.verbose, args.quiet, args.no_color);

    commands::serve_execute(args.serve)
        .await
        .map_err(error::to_miette)
}
