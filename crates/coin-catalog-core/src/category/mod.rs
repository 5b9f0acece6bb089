//! # Category Module
//!
//! Partitions a flat coin collection into ordered categories.
//!
//! ## Module layout
//!
//! - `rule`: grouping rules (the classifier), sort direction and sort keys
//! - `group`: a single category of coins
//! - `partitioner`: places coins into categories and keeps them ordered
//!
//! ## Grouping rules
//!
//! - **Country & Value**: same country, face value and currency
//! - **Country**: same country
//! - **Country & Currency**: same currency within the same country
//! - **Year**: same year (unknown years group together)
//! - **No Category**: every coin stands alone
//!
//! Country and currency comparisons ignore case.
//!
//! ## Usage
//!
//! ```rust
//! use coin_catalog_core::category::{GroupingRule, Partitioner, SortDirection, SortSettings};
//! use coin_catalog_core::store::MemoryStore;
//! use coin_catalog_core::Coin;
//!
//! let settings = SortSettings::new(GroupingRule::ByCountry, SortDirection::Ascending);
//! let mut partitioner = Partitioner::new(settings, MemoryStore::new());
//!
//! partitioner.add_coin(Coin::new("France", 1.0, "Franc"))?;
//! partitioner.add_coin(Coin::new("Egypt", 5.0, "Piastre"))?;
//! partitioner.add_coin(Coin::new("FRANCE", 10.0, "Centime"))?;
//!
//! assert_eq!(partitioner.len(), 2);
//! assert_eq!(partitioner.categories()[0].title(), vec!["Egypt"]);
//! assert_eq!(partitioner.categories()[1].count_types(), 2);
//! # Ok::<(), coin_catalog_core::CatalogError>(())
//! ```

mod group;
mod partitioner;
mod rule;

// Re-exports
pub use group::CoinCategory;
pub use partitioner::{Partitioner, Placement, PlacementKind, Removal};
pub use rule::{GroupingRule, SortDirection, SortKey, SortSettings};
