pub mod category;
pub mod coin;
pub mod config;
pub mod error;
pub mod search;
pub mod store;
pub mod validation;

pub use coin::{format_year, Coin, Era};
pub use config::{Config, PreferenceStore};
pub use error::{CatalogError, Result, StoreError};
pub use store::{CollectionStore, FileCollectionStore, MemoryStore};
pub use validation::CoinDraft;

// Category system
pub use category::{
    CoinCategory, GroupingRule, Partitioner, Placement, PlacementKind, Removal, SortDirection,
    SortKey, SortSettings,
};
