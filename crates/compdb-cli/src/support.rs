use compdb_kernel::Collection;
use std::fmt::Display;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

const DEFAULT_LOG_FILTER: &str = "warn";

/// Install the stderr subscriber.
///
/// An explicit `--log-level` wins over `RUST_LOG`; with neither, only
/// warnings are shown.
pub fn init_logging(level: Option<&str>) {
    let filter = match level {
        Some(directive) => EnvFilter::try_new(directive).unwrap_or_else(|e| {
            exit_with_error(format!("invalid --log-level `{directive}`: {e}"))
        }),
        None => EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER)),
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false),
        )
        .with(filter)
        .init();
}

pub fn exit_with_error(message: impl Display) -> ! {
    eprintln!("error: {message}");
    std::process::exit(1);
}

pub fn parse_collection_or_exit(name: &str) -> Collection {
    name.parse().unwrap_or_else(|e| exit_with_error(e))
}

pub fn build_runtime_or_exit() -> tokio::runtime::Runtime {
    tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .unwrap_or_else(|e| exit_with_error(format!("failed to create tokio runtime: {e}")))
}
