mod cli;
mod commands;

use anyhow::Result;
use clap::Parser;
use cli::Args;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    let args = Args::parse();

    // RUST_LOG wins; --debug raises the default from info to debug
    let default_filter = if args.debug {
        "markscan=debug,markscan_core=debug"
    } else {
        "markscan=info,markscan_core=info"
    };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    if args.list_regions {
        commands::regions::run(&args.target, args.json)
    } else {
        commands::scan::run(&args)
    }
}
