use crate::support::{exit_with_error, parse_collection_or_exit};
use compdb_kernel::Collection;
use compdb_store::MemoryResourceStore;
use serde_json::{Map, Value, json};

pub fn run(store_path: String, collection: Option<String>, json_output: bool) {
    let collections: Vec<Collection> = match collection.as_deref() {
        Some(name) => vec![parse_collection_or_exit(name)],
        None => Collection::ALL.to_vec(),
    };
    let store = MemoryResourceStore::load_jsonl(&store_path)
        .unwrap_or_else(|e| exit_with_error(format!("failed to load {store_path}: {e}")));

    if json_output {
        let mut by_collection = Map::new();
        for collection in &collections {
            by_collection.insert(collection.to_string(), json!(store.ids(*collection)));
        }
        let payload = json!({
            "store": store_path,
            "total": store.len(),
            "collections": Value::Object(by_collection),
        });
        match serde_json::to_string_pretty(&payload) {
            Ok(text) => println!("{text}"),
            Err(e) => exit_with_error(format!("failed to render inspect payload: {e}")),
        }
        return;
    }

    println!("compdb inspect {store_path}");
    println!();
    println!("  total records: {}", store.len());
    for collection in collections {
        let ids = store.ids(collection);
        println!("  {collection}: {}", ids.len());
        for id in ids {
            println!("    - {id}");
        }
    }
}
