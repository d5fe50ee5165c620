use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "compdb",
    about = "compdb: normalize compiler artifacts and load them as content-addressed resources",
    version
)]
pub struct Cli {
    /// Log filter directive (overrides RUST_LOG), e.g. `debug` or `compdb_batch=trace`
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Load one `compilations` record per entry and print the enriched entries
    LoadCompilations {
        /// Path to compilation entries JSONL
        #[arg(long)]
        entries: String,

        /// Path to the resource store JSONL (default: `.compdb/store.jsonl`)
        #[arg(long)]
        store: Option<String>,

        /// Maximum entries per loader call
        #[arg(long)]
        batch_size: Option<usize>,

        /// Optional TOML config; flags take precedence over its values
        #[arg(long)]
        config: Option<String>,

        /// Output enriched entries as JSON lines
        #[arg(long)]
        json: bool,
    },

    /// List stored resource ids per collection
    Inspect {
        /// Path to the resource store JSONL
        #[arg(long, default_value = ".compdb/store.jsonl")]
        store: String,

        /// Restrict output to one collection: sources, bytecodes, compilations, contracts
        #[arg(long)]
        collection: Option<String>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}
