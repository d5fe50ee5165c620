//! compdb CLI: the `compdb` command.

mod cli;
mod commands;
mod config;
mod support;

use clap::Parser;
use cli::{Cli, Commands};

fn main() {
    let cli = Cli::parse();
    support::init_logging(cli.log_level.as_deref());

    match cli.command {
        Commands::LoadCompilations {
            entries,
            store,
            batch_size,
            config,
            json,
        } => commands::load_compilations::run(commands::load_compilations::Args {
            entries,
            store,
            batch_size,
            config,
            json,
        }),

        Commands::Inspect {
            store,
            collection,
            json,
        } => commands::inspect::run(store, collection, json),
    }
}
