use crate::store::{ItemStore, StoreError};
use std::env;
use std::path::PathBuf;

const DEFAULT_DATA_FILE: &str = "./lost_found_items.json";

pub fn data_file() -> PathBuf {
    env::var("DATA_FILE")
        .ok()
        .filter(|s| !s.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_DATA_FILE.to_string())
        .into()
}

/// Open the workbook named by `DATA_FILE`, creating it on first start.
pub async fn get_store() -> Result<ItemStore, StoreError> {
    ItemStore::open(data_file()).await
}
