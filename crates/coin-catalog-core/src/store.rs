//! Persisted collection store
//!
//! The partitioner reports category creation and deletion to a
//! [`CollectionStore`] and asks it to save a snapshot after every structural
//! change. `collection.toml` under the base directory is the on-disk form.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::category::CoinCategory;
use crate::error::{CatalogError, Result, StoreError};

/// Object store collaborator for the partitioner
pub trait CollectionStore {
    /// A category was created in memory
    fn create(&mut self, category: &CoinCategory);

    /// A category was discarded in memory
    fn delete(&mut self, category: &CoinCategory);

    /// Persist the partition in display order
    fn save(&mut self, categories: &[CoinCategory]) -> std::result::Result<(), StoreError>;
}

/// On-disk layout of `collection.toml`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CollectionFile {
    pub saved_at: DateTime<Utc>,
    #[serde(default)]
    pub categories: Vec<CoinCategory>,
}

/// TOML file store under a base directory.
///
/// Creation and deletion need no separate record: every save rewrites the
/// whole file.
#[derive(Debug)]
pub struct FileCollectionStore {
    base_dir: PathBuf,
}

impl FileCollectionStore {
    const FILENAME: &'static str = "collection.toml";

    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
        }
    }

    pub fn path(base_dir: &Path) -> PathBuf {
        base_dir.join(Self::FILENAME)
    }

    /// Load categories ordered by their persisted index.
    /// A missing file is an empty collection.
    pub fn load(&self) -> Result<Vec<CoinCategory>> {
        let path = Self::path(&self.base_dir);
        if !path.exists() {
            return Ok(Vec::new());
        }

        let content = fs::read_to_string(&path)?;
        let file: CollectionFile =
            toml::from_str(&content).map_err(|e| CatalogError::ConfigParse {
                path: path.clone(),
                message: e.to_string(),
            })?;

        let mut categories = file.categories;
        categories.retain(|c| !c.is_empty());
        categories.sort_by_key(|c| c.index);
        log::debug!(
            "loaded {} categories from {}",
            categories.len(),
            path.display()
        );
        Ok(categories)
    }
}

impl CollectionStore for FileCollectionStore {
    fn create(&mut self, category: &CoinCategory) {
        log::trace!("category {} created", category.id);
    }

    fn delete(&mut self, category: &CoinCategory) {
        log::trace!("category {} deleted", category.id);
    }

    fn save(&mut self, categories: &[CoinCategory]) -> std::result::Result<(), StoreError> {
        let path = Self::path(&self.base_dir);
        fs::create_dir_all(&self.base_dir)?;

        let file = CollectionFile {
            saved_at: Utc::now(),
            categories: categories.to_vec(),
        };
        let content = toml::to_string_pretty(&file).map_err(|e| StoreError::Serialize {
            message: e.to_string(),
        })?;
        fs::write(&path, content)?;

        log::debug!(
            "saved {} categories to {}",
            categories.len(),
            path.display()
        );
        Ok(())
    }
}

/// In-process store that remembers what it was told
#[derive(Debug, Default)]
pub struct MemoryStore {
    pub created: Vec<Uuid>,
    pub deleted: Vec<Uuid>,
    /// Last successfully saved snapshot
    pub snapshot: Vec<CoinCategory>,
    pub save_count: usize,
    /// When set, `save` fails with this message
    pub fail_with: Option<String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            fail_with: Some(message.into()),
            ..Self::default()
        }
    }
}

impl CollectionStore for MemoryStore {
    fn create(&mut self, category: &CoinCategory) {
        self.created.push(category.id);
    }

    fn delete(&mut self, category: &CoinCategory) {
        self.deleted.push(category.id);
    }

    fn save(&mut self, categories: &[CoinCategory]) -> std::result::Result<(), StoreError> {
        if let Some(message) = &self.fail_with {
            return Err(StoreError::Unavailable {
                message: message.clone(),
            });
        }
        self.snapshot = categories.to_vec();
        self.save_count += 1;
        Ok(())
    }
}
