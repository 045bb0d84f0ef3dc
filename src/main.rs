// src/main.rs
use anyhow::Result;
use clap::Parser;

use fakecheckr::cli::{self, Args};

fn main() -> Result<()> {
    let args = Args::parse();

    let default_filter = if args.verbose { "fakecheckr=debug" } else { "fakecheckr=info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .format_timestamp(None)
        .init();

    cli::run(&args)
}
