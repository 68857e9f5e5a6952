//! Binary crate for the `weather-api` service.
//!
//! This crate focuses on:
//! - Parsing CLI arguments and interactive configuration
//! - Serving the prediction HTTP API
//! - Logging setup

use clap::Parser;

mod api;
mod cli;
mod health;
mod logging;
mod pages;
mod server;
mod state;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cmd = cli::Cli::parse();
    logging::init_logger(cmd.verbose);
    cmd.run().await
}
