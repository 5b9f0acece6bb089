use std::path::PathBuf;
use thiserror::Error;

/// Failure reported by a [`CollectionStore`](crate::store::CollectionStore).
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to serialize collection: {message}")]
    Serialize { message: String },

    #[error("Store unavailable: {message}")]
    Unavailable { message: String },
}

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Category not found at position {index}")]
    CategoryNotFound { index: usize },

    #[error("Coin not found at position {index} in category {category}")]
    CoinNotFound { category: usize, index: usize },

    #[error("Invalid coin input: {}", issues.join("; "))]
    InvalidInput { issues: Vec<String> },

    #[error("Invalid value for {key}: '{value}'")]
    InvalidSetting { key: String, value: String },

    #[error("Config key not found: {key}")]
    ConfigKeyNotFound { key: String },

    #[error("Failed to parse config {path}: {message}")]
    ConfigParse { path: PathBuf, message: String },

    #[error("Collection saved in memory but not persisted: {0}")]
    Store(#[from] StoreError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML serialization error: {0}")]
    TomlSer(#[from] toml::ser::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, CatalogError>;

impl CatalogError {
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::CategoryNotFound { .. } => 2,
            Self::CoinNotFound { .. } => 3,
            Self::InvalidInput { .. } => 4,
            Self::InvalidSetting { .. } | Self::ConfigKeyNotFound { .. } => 5,
            Self::Store(_) => 6,
            _ => 1,
        }
    }
}
