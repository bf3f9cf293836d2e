mod api;
mod cli;
mod core;
mod ops;
mod prelude;
mod quantity;
mod statistics;
mod tables;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::{cli::Args, prelude::*};

fn main() -> Result {
    let _ = dotenvy::dotenv();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .without_time()
        .compact()
        .init();

    Args::parse().command.run()
}
