//! Shared test utilities.

#![allow(dead_code, unused_imports)]

use std::path::{Path, PathBuf};
use std::sync::Arc;

use rust_decimal::Decimal;
use shopcart::storage::{FileStorage, MemoryStorage};
use shopcart::{CartState, CartStore, LineItem, ProductSnapshot};
use tempfile::TempDir;

/// Product with a whole-rupee price.
pub fn product(id: &str, price: i64) -> ProductSnapshot {
    ProductSnapshot::new(id, format!("Product {id}"), Decimal::from(price))
}

pub fn cart(lines: &[(&str, i64, u32)]) -> CartState {
    CartState::from_items(
        lines
            .iter()
            .map(|(id, price, qty)| LineItem::new(product(id, *price), *qty))
            .collect(),
    )
}

/// Store over shared in-memory storage, so tests can inspect what was written.
pub fn memory_store() -> (Arc<MemoryStorage>, CartStore) {
    let storage = Arc::new(MemoryStorage::new());
    let store = CartStore::open(Arc::clone(&storage), "cart").unwrap();
    (storage, store)
}

/// Store persisted under a fresh temp directory.
pub fn file_store() -> (TempDir, CartStore) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let store = reopen(temp_dir.path());
    (temp_dir, store)
}

/// Simulate a page reload: a new store over the same directory.
pub fn reopen(dir: &Path) -> CartStore {
    CartStore::open(FileStorage::new(dir), "cart").unwrap()
}

pub const CATALOG: &str = r#"
[[products]]
id = "kettle"
title = "Electric Kettle"
price = 500

[[products]]
id = "mug"
title = "Mug"
price = 120

[[products]]
id = "lamp"
title = "Desk Lamp"
price = 900
in_stock = false
"#;

/// Config + catalog in a temp dir, with storage pointed inside it.
pub fn temp_setup() -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let catalog_path = temp_dir.path().join("catalog.toml");
    std::fs::write(&catalog_path, CATALOG).unwrap();

    let config_path = temp_dir.path().join("config.toml");
    let content = format!(
        r#"[storage]
dir = "{}"
key = "cart"

[catalog]
path = "{}"
"#,
        temp_dir.path().join("data").display(),
        catalog_path.display()
    );
    std::fs::write(&config_path, content).unwrap();
    (temp_dir, config_path)
}
