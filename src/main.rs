//! confpod - builds a podcast feed from a catalog of conference talks.
//!
//! Each run fills in missing audio metadata (GUID, byte length, duration)
//! by downloading and decoding the talk audio, then renders the whole
//! catalog as an RSS 2.0 feed with iTunes and Podcasting 2.0 extensions.

pub mod cli;
pub mod config;
pub mod db;
pub mod enrichment;
pub mod error;
pub mod feed;
pub mod model;
pub mod pipeline;
#[cfg(test)]
pub mod test_utils;

use clap::Parser;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

fn main() -> anyhow::Result<()> {
    let args = cli::Cli::parse();

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(true))
        .with(EnvFilter::from_default_env().add_directive("confpod=info".parse()?))
        .init();

    cli::run_command(&args)
}
