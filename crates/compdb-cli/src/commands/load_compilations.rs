use crate::config::{self, LoadConfig};
use crate::support::{build_runtime_or_exit, exit_with_error};
use compdb_batch::{COMPILATION_KEY, load_compilations_batched, spawn_loader};
use compdb_compile::{CompilationEntry, read_entries_from_path};
use compdb_kernel::{Collection, Compilations, IdObject};
use compdb_store::MemoryResourceStore;
use tracing::info;

pub struct Args {
    pub entries: String,
    pub store: Option<String>,
    pub batch_size: Option<usize>,
    pub config: Option<String>,
    pub json: bool,
}

/// Run the compilations pass with the store on its own loader task.
///
/// The store comes back once every loader handle is dropped. On failure it
/// is discarded unsaved, so the on-disk store never reflects a partial run.
pub async fn load_into_store(
    entries: &[CompilationEntry],
    store: MemoryResourceStore,
    config: &LoadConfig,
) -> Result<(Vec<CompilationEntry>, MemoryResourceStore), String> {
    let (loader, service) = spawn_loader(store, config.channel_capacity);
    let result = load_compilations_batched(&loader, entries, config.batch_size).await;
    drop(loader);

    let store = service
        .await
        .map_err(|e| format!("loader task failed: {e}"))?;
    let loaded = result.map_err(|e| format!("load-compilations failed: {e}"))?;
    Ok((loaded, store))
}

pub fn run(args: Args) {
    let config = config::resolve(args.config.as_deref(), args.store, args.batch_size)
        .unwrap_or_else(|e| exit_with_error(e));

    let entries = read_entries_from_path(&args.entries)
        .unwrap_or_else(|e| exit_with_error(format!("failed to read {}: {e}", args.entries)));
    let store = MemoryResourceStore::open_jsonl(&config.store)
        .unwrap_or_else(|e| exit_with_error(format!("failed to open {}: {e}", config.store)));

    info!(
        entries = entries.len(),
        store = %config.store,
        batch_size = config.batch_size,
        "loading compilations"
    );

    let runtime = build_runtime_or_exit();
    let (loaded, store) = runtime
        .block_on(load_into_store(&entries, store, &config))
        .unwrap_or_else(|e| exit_with_error(e));

    store
        .save_jsonl(&config.store)
        .unwrap_or_else(|e| exit_with_error(format!("failed to save {}: {e}", config.store)));
    let stored = store.ids(Collection::Compilations).len();
    info!(loaded = loaded.len(), stored, "store saved");

    if args.json {
        for entry in &loaded {
            let line = serde_json::to_string(entry).unwrap_or_else(|e| {
                exit_with_error(format!("failed to render entry: {e}"))
            });
            println!("{line}");
        }
        return;
    }

    println!("compdb load-compilations {}", args.entries);
    println!();
    println!("  entries: {}", loaded.len());
    println!("  store: {}", config.store);
    println!("  batch size: {}", config.batch_size);
    println!("  compilations stored: {stored}");
    for (index, entry) in loaded.iter().enumerate() {
        let id: Option<IdObject<Compilations>> = entry.db.get(COMPILATION_KEY);
        match id {
            Some(id) => println!("  - entry {index}: {id}"),
            None => println!("  - entry {index}: (no compilation id)"),
        }
    }
}
