pub mod workbook;

use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tempfile::NamedTempFile;
use thiserror::Error;
use tokio::sync::Mutex;

use crate::error::AppResult;
use crate::models::ItemSnapshot;
use workbook::Workbook;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Malformed workbook: {0}")]
    Format(#[from] serde_json::Error),

    #[error("Failed to replace workbook: {0}")]
    Persist(#[from] tempfile::PersistError),

    #[error("Storage task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

/// Flat-file item store. Every read loads the whole workbook; every write
/// replaces it.
///
/// `load` and `save` are the raw primitives. Mutations go through
/// [`ItemStore::update`], which holds the writer gate across the whole
/// load-mutate-save cycle so concurrent requests cannot lose each other's
/// changes.
#[derive(Clone)]
pub struct ItemStore {
    path: Arc<PathBuf>,
    gate: Arc<Mutex<()>>,
}

impl ItemStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: Arc::new(path.into()),
            gate: Arc::new(Mutex::new(())),
        }
    }

    /// Open the store, creating an empty workbook if the file is missing.
    pub async fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let store = Self::new(path);
        store.initialize().await?;
        Ok(store)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn initialize(&self) -> Result<(), StoreError> {
        if tokio::fs::try_exists(self.path()).await? {
            tracing::info!("Item store found at {}", self.path.display());
            return Ok(());
        }

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await?;
        }
        self.save(&ItemSnapshot::default()).await?;
        tracing::info!("Created empty item store at {}", self.path.display());
        Ok(())
    }

    pub async fn load(&self) -> Result<ItemSnapshot, StoreError> {
        let bytes = tokio::fs::read(self.path()).await?;
        let workbook: Workbook = serde_json::from_slice(&bytes)?;
        Ok(workbook.into_snapshot())
    }

    /// Replace the whole file. Readers see either the old or the new
    /// workbook, never a partial one.
    pub async fn save(&self, snapshot: &ItemSnapshot) -> Result<(), StoreError> {
        let bytes = serde_json::to_vec_pretty(&Workbook::from_snapshot(snapshot))?;
        let path = Arc::clone(&self.path);
        tokio::task::spawn_blocking(move || write_atomically(&path, &bytes)).await??;
        tracing::debug!(
            lost = snapshot.lost_items.len(),
            found = snapshot.found_items.len(),
            "Item store saved"
        );
        Ok(())
    }

    /// Raw file contents, for export.
    pub async fn read_raw(&self) -> Result<Vec<u8>, StoreError> {
        Ok(tokio::fs::read(self.path()).await?)
    }

    /// Run one gated load-mutate-save cycle. Nothing is written when
    /// `mutate` returns an error.
    pub async fn update<T, F>(&self, mutate: F) -> AppResult<T>
    where
        F: FnOnce(&mut ItemSnapshot) -> AppResult<T>,
    {
        let _guard = self.gate.lock().await;
        let mut snapshot = self.load().await?;
        let out = mutate(&mut snapshot)?;
        self.save(&snapshot).await?;
        Ok(out)
    }
}

fn write_atomically(path: &Path, bytes: &[u8]) -> Result<(), StoreError> {
    let dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(bytes)?;
    tmp.as_file().sync_all()?;
    tmp.persist(path)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;
    use crate::models::{Category, FoundItem, FoundStatus, ItemType};

    fn found(id: &str) -> FoundItem {
        FoundItem {
            id: id.into(),
            status: FoundStatus::Active,
            item_name: "Calculator".into(),
            category: Category::Electronics,
            location: "Lab 2".into(),
            date_found: "2024-05-01".into(),
            description: String::new(),
            contact: "f@x.com".into(),
            current_location: "Security office".into(),
            original_lost_item_id: None,
            item_type: ItemType::Found,
            date_posted: "2024-05-01T00:00:00.000Z".into(),
            finder: Default::default(),
            claim: Default::default(),
            college: "gitam-university".into(),
            student_name: String::new(),
            student_email: String::new(),
        }
    }

    #[tokio::test]
    async fn open_creates_empty_workbook() {
        let dir = tempfile::tempdir().unwrap();
        let store = ItemStore::open(dir.path().join("nested/items.json"))
            .await
            .unwrap();
        assert!(store.path().exists());
        assert_eq!(store.load().await.unwrap(), ItemSnapshot::default());
    }

    #[tokio::test]
    async fn open_keeps_existing_data() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("items.json");
        let store = ItemStore::open(&path).await.unwrap();
        store
            .update(|s| {
                s.found_items.push(found("f1"));
                Ok(())
            })
            .await
            .unwrap();

        let reopened = ItemStore::open(&path).await.unwrap();
        assert_eq!(reopened.load().await.unwrap().found_items.len(), 1);
    }

    #[tokio::test]
    async fn failed_update_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let store = ItemStore::open(dir.path().join("items.json")).await.unwrap();
        let before = store.read_raw().await.unwrap();

        let result: AppResult<()> = store
            .update(|s| {
                s.found_items.push(found("f1"));
                Err(AppError::Validation("nope".into()))
            })
            .await;

        assert!(matches!(result, Err(AppError::Validation(_))));
        assert_eq!(store.read_raw().await.unwrap(), before);
    }

    #[tokio::test]
    async fn corrupt_file_is_a_storage_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("items.json");
        std::fs::write(&path, b"not a workbook").unwrap();
        let store = ItemStore::new(&path);
        assert!(matches!(store.load().await, Err(StoreError::Format(_))));
    }

    #[tokio::test]
    async fn ungated_cycles_lose_an_update() {
        let dir = tempfile::tempdir().unwrap();
        let store = ItemStore::open(dir.path().join("items.json")).await.unwrap();

        // Two writers interleave load/save without the gate.
        let mut first = store.load().await.unwrap();
        let mut second = store.load().await.unwrap();
        first.found_items.push(found("from-first"));
        store.save(&first).await.unwrap();
        second.found_items.push(found("from-second"));
        store.save(&second).await.unwrap();

        let ids: Vec<_> = store
            .load()
            .await
            .unwrap()
            .found_items
            .into_iter()
            .map(|i| i.id)
            .collect();
        assert_eq!(ids, vec!["from-second".to_string()]);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn gated_updates_all_persist() {
        let dir = tempfile::tempdir().unwrap();
        let store = ItemStore::open(dir.path().join("items.json")).await.unwrap();

        let tasks: Vec<_> = (0..16)
            .map(|n| {
                let store = store.clone();
                tokio::spawn(async move {
                    store
                        .update(move |s| {
                            s.found_items.push(found(&format!("f{n}")));
                            Ok(())
                        })
                        .await
                })
            })
            .collect();
        for task in tasks {
            task.await.unwrap().unwrap();
        }

        assert_eq!(store.load().await.unwrap().found_items.len(), 16);
    }
}
