//! Partitioner
//!
//! Owns the ordered list of categories for the active [`SortSettings`],
//! places new coins, keeps category indices dense (`0..N`) and saves a
//! snapshot to the [`CollectionStore`] after every structural change.
//!
//! A failed save is returned to the caller but the in-memory partition keeps
//! its new state; saves are whole snapshots, so the next successful save
//! brings the store back in line.

use crate::coin::Coin;
use crate::error::{CatalogError, Result};
use crate::search;
use crate::store::CollectionStore;

use super::group::CoinCategory;
use super::rule::SortSettings;

/// How a coin ended up in the partition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlacementKind {
    /// Quantity added to an identical existing entry
    Merged,
    /// Appended to an existing category
    Appended,
    /// New category created for it
    Created,
    /// Edited in place without moving
    Updated,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement {
    /// Position of the category holding the coin
    pub category: usize,
    pub kind: PlacementKind,
}

/// Outcome of removing a coin
#[derive(Debug, Clone, PartialEq)]
pub enum Removal {
    NotFound,
    Removed(Coin),
    /// The coin was the last member, so its category went with it
    CategoryDeleted(Coin),
}

pub struct Partitioner<S: CollectionStore> {
    categories: Vec<CoinCategory>,
    settings: SortSettings,
    store: S,
}

impl<S: CollectionStore> Partitioner<S> {
    /// Empty partition
    pub fn new(settings: SortSettings, store: S) -> Self {
        Self {
            categories: Vec::new(),
            settings,
            store,
        }
    }

    /// Adopt previously persisted categories.
    ///
    /// Categories are ordered by their stored index and empty ones dropped.
    /// If any was built under a different rule, or the stored order does not
    /// follow `settings.order`, the whole partition is rebuilt in memory for
    /// `settings`.
    pub fn with_categories(
        settings: SortSettings,
        store: S,
        mut categories: Vec<CoinCategory>,
    ) -> Self {
        categories.retain(|c| !c.is_empty());
        categories.sort_by_key(|c| c.index);

        let stale = categories.iter().any(|c| c.rule != settings.grouping);
        let mut partitioner = Self {
            categories,
            settings,
            store,
        };
        if stale || !partitioner.in_order() {
            log::info!(
                "stored categories do not match '{}' ({}), rebuilding",
                settings.grouping,
                settings.order
            );
            partitioner.rebuild();
        }
        partitioner.compact_indices();
        partitioner
    }

    pub fn settings(&self) -> SortSettings {
        self.settings
    }

    pub fn categories(&self) -> &[CoinCategory] {
        &self.categories
    }

    pub fn category(&self, index: usize) -> Option<&CoinCategory> {
        self.categories.get(index)
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }

    pub fn len(&self) -> usize {
        self.categories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    /// Distinct coin types across all categories
    pub fn count_types(&self) -> usize {
        self.categories.iter().map(|c| c.count_types()).sum()
    }

    /// Physical coins across all categories
    pub fn count_units(&self) -> u64 {
        self.categories.iter().map(|c| c.count_units()).sum()
    }

    pub fn fits_existing_category(&self, coin: &Coin) -> bool {
        self.matching_category(coin).is_some()
    }

    /// Categories matching a free-text query, with their positions
    pub fn search(&self, query: &str) -> Vec<(usize, &CoinCategory)> {
        self.categories
            .iter()
            .enumerate()
            .filter(|(_, c)| search::category_matches(c, query))
            .collect()
    }

    // ----- structural changes -----

    /// Place `coin` in the first matching category, merging it into an
    /// identical entry when there is one, or create a new category at its
    /// sorted position.
    pub fn add_coin(&mut self, coin: Coin) -> Result<Placement> {
        let placement = self.insert(coin);
        self.compact_indices();
        self.save()?;
        Ok(placement)
    }

    /// Remove the first member equal to `coin` from a category
    pub fn remove_coin(&mut self, category: usize, coin: &Coin) -> Result<Removal> {
        let position = self
            .categories
            .get(category)
            .and_then(|c| c.position(coin));
        match position {
            Some(index) => self.remove_coin_at(category, index),
            None => Ok(Removal::NotFound),
        }
    }

    /// Remove the member at `index`; deletes the category if it empties
    pub fn remove_coin_at(&mut self, category: usize, index: usize) -> Result<Removal> {
        let Some(target) = self.categories.get_mut(category) else {
            return Ok(Removal::NotFound);
        };
        let Some(coin) = target.remove_at(index) else {
            return Ok(Removal::NotFound);
        };

        let removal = if target.is_empty() {
            let removed = self.categories.remove(category);
            self.store.delete(&removed);
            log::debug!("category {} emptied and deleted", category);
            Removal::CategoryDeleted(coin)
        } else {
            Removal::Removed(coin)
        };

        self.compact_indices();
        self.save()?;
        Ok(removal)
    }

    /// Delete a whole category with all of its coins
    pub fn delete_category(&mut self, index: usize) -> Result<Option<CoinCategory>> {
        if index >= self.categories.len() {
            return Ok(None);
        }
        let removed = self.categories.remove(index);
        self.store.delete(&removed);
        self.compact_indices();
        self.save()?;
        Ok(Some(removed))
    }

    /// Reorder two coins inside a category
    pub fn swap_coins(&mut self, category: usize, i: usize, j: usize) -> Result<bool> {
        let swapped = self
            .categories
            .get_mut(category)
            .map(|c| c.swap(i, j))
            .unwrap_or(false);
        if swapped {
            self.save()?;
        }
        Ok(swapped)
    }

    /// Replace the coin at `index` of `category` with an edited version.
    ///
    /// The coin stays put while it still belongs with the other members (or,
    /// as a sole member, while no other category claims it and its sort key
    /// is unchanged). Otherwise it is taken out and placed again like a new
    /// coin. Returns `None` for an invalid position.
    pub fn update_coin(
        &mut self,
        category: usize,
        index: usize,
        edited: Coin,
    ) -> Result<Option<Placement>> {
        let rule = self.settings.grouping;
        let Some(target) = self.categories.get(category) else {
            return Ok(None);
        };
        let Some(current) = target.get(index) else {
            return Ok(None);
        };

        let sibling = target
            .coins()
            .iter()
            .enumerate()
            .find(|(i, _)| *i != index)
            .map(|(_, c)| c);

        let stays = match sibling {
            Some(other) => rule.matches(other, &edited),
            None => {
                let claimed = self
                    .categories
                    .iter()
                    .enumerate()
                    .any(|(i, c)| i != category && c.fits(&edited));
                !claimed && rule.sort_key(current) == rule.sort_key(&edited)
            }
        };

        let placement = if stays {
            self.categories[category].assign(index, edited);
            Placement {
                category,
                kind: PlacementKind::Updated,
            }
        } else {
            let emptied = {
                let target = &mut self.categories[category];
                target.remove_at(index);
                target.is_empty()
            };
            if emptied {
                let removed = self.categories.remove(category);
                self.store.delete(&removed);
            }
            self.insert(edited)
        };

        self.compact_indices();
        self.save()?;
        Ok(Some(placement))
    }

    /// Switch to new settings and rebuild the partition.
    /// Returns `false` without touching anything when nothing changed.
    pub fn resort(&mut self, settings: SortSettings) -> Result<bool> {
        if settings == self.settings {
            return Ok(false);
        }
        self.settings = settings;
        self.repartition()?;
        Ok(true)
    }

    /// Rebuild the partition for the current settings
    pub fn repartition(&mut self) -> Result<()> {
        self.rebuild();
        self.compact_indices();
        self.save()
    }

    // ----- internals -----

    fn rebuild(&mut self) {
        let mut coins = Vec::with_capacity(self.count_types());
        for mut category in std::mem::take(&mut self.categories) {
            self.store.delete(&category);
            coins.extend(category.take_coins());
        }
        log::info!(
            "re-partitioning {} coins by '{}' ({})",
            coins.len(),
            self.settings.grouping,
            self.settings.order
        );
        for coin in coins {
            self.insert(coin);
        }
    }

    /// No category sorts before the one preceding it
    fn in_order(&self) -> bool {
        let rule = self.settings.grouping;
        let keys: Vec<_> = self
            .categories
            .iter()
            .filter_map(|c| c.representative().map(|first| rule.sort_key(first)))
            .collect();
        keys.windows(2)
            .all(|pair| !self.settings.sorts_before(&pair[1], &pair[0]))
    }

    fn matching_category(&self, coin: &Coin) -> Option<usize> {
        let rule = self.settings.grouping;
        self.categories.iter().position(|c| match c.representative() {
            Some(first) => rule.matches(first, coin),
            None => false,
        })
    }

    /// Place a coin without compacting or saving
    fn insert(&mut self, coin: Coin) -> Placement {
        if let Some(position) = self.matching_category(&coin) {
            let category = &mut self.categories[position];

            if let Some(index) = category
                .coins()
                .iter()
                .position(|c| c.is_identical_type(&coin))
            {
                if let Some(existing) = category.get_mut(index) {
                    existing.add_quantity(coin.quantity());
                }
                log::debug!("merged coin into category {} entry {}", position, index);
                return Placement {
                    category: position,
                    kind: PlacementKind::Merged,
                };
            }

            category.add(coin);
            log::debug!("appended coin to category {}", position);
            return Placement {
                category: position,
                kind: PlacementKind::Appended,
            };
        }

        let position = self.insertion_index(&coin);
        let category = CoinCategory::with_coin(self.settings.grouping, coin);
        self.store.create(&category);
        self.categories.insert(position, category);
        log::debug!("created category at {}", position);
        Placement {
            category: position,
            kind: PlacementKind::Created,
        }
    }

    /// First position whose category the new coin sorts before, else the end
    fn insertion_index(&self, coin: &Coin) -> usize {
        let rule = self.settings.grouping;
        let key = rule.sort_key(coin);
        self.categories
            .iter()
            .position(|c| match c.representative() {
                Some(first) => self.settings.sorts_before(&key, &rule.sort_key(first)),
                None => false,
            })
            .unwrap_or(self.categories.len())
    }

    fn compact_indices(&mut self) {
        for (i, category) in self.categories.iter_mut().enumerate() {
            category.index = i;
        }
    }

    fn save(&mut self) -> Result<()> {
        self.store.save(&self.categories).map_err(|e| {
            log::warn!("collection changed in memory but was not saved: {}", e);
            CatalogError::Store(e)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::category::{GroupingRule, SortDirection};
    use crate::store::MemoryStore;

    fn partitioner(grouping: GroupingRule, order: SortDirection) -> Partitioner<MemoryStore> {
        Partitioner::new(SortSettings::new(grouping, order), MemoryStore::new())
    }

    fn franc() -> Coin {
        Coin::new("France", 1.0, "Franc").with_year(1960)
    }

    fn piastre() -> Coin {
        Coin::new("Egypt", 5.0, "Piastre")
    }

    fn countries<S: CollectionStore>(p: &Partitioner<S>) -> Vec<String> {
        p.categories()
            .iter()
            .map(|c| c.representative().unwrap().country().to_string())
            .collect()
    }

    fn assert_dense<S: CollectionStore>(p: &Partitioner<S>) {
        let indices: Vec<usize> = p.categories().iter().map(|c| c.index).collect();
        assert_eq!(indices, (0..p.len()).collect::<Vec<_>>());
    }

    #[test]
    fn test_first_coin_creates_category() {
        let mut p = partitioner(GroupingRule::ByCountryValueCurrency, SortDirection::Ascending);
        let placement = p.add_coin(franc()).unwrap();

        assert_eq!(placement.kind, PlacementKind::Created);
        assert_eq!(p.len(), 1);
        assert_eq!(p.categories()[0].index, 0);
        assert_eq!(p.categories()[0].count_types(), 1);
        assert_eq!(p.store().created.len(), 1);
        assert_eq!(p.store().save_count, 1);
    }

    #[test]
    fn test_identical_coin_merges_quantity() {
        let mut p = partitioner(GroupingRule::ByCountryValueCurrency, SortDirection::Ascending);
        p.add_coin(franc()).unwrap();
        let placement = p.add_coin(franc().with_quantity(1)).unwrap();

        assert_eq!(placement.kind, PlacementKind::Merged);
        assert_eq!(p.len(), 1);
        assert_eq!(p.count_types(), 1);
        assert_eq!(p.categories()[0].coins()[0].quantity(), 2);
    }

    #[test]
    fn test_merge_adds_full_quantity() {
        let mut p = partitioner(GroupingRule::ByCountry, SortDirection::Ascending);
        p.add_coin(franc()).unwrap();
        let types = p.count_types();
        let units = p.count_units();

        p.add_coin(franc().with_quantity(3)).unwrap();
        assert_eq!(p.count_types(), types);
        assert_eq!(p.count_units(), units + 3);
    }

    #[test]
    fn test_same_category_different_type_appends() {
        let mut p = partitioner(GroupingRule::ByCountryValueCurrency, SortDirection::Ascending);
        p.add_coin(franc()).unwrap();
        let placement = p.add_coin(franc().with_mint("Paris")).unwrap();

        assert_eq!(placement.kind, PlacementKind::Appended);
        assert_eq!(p.len(), 1);
        assert_eq!(p.categories()[0].count_types(), 2);
    }

    #[test]
    fn test_ascending_country_order() {
        let mut p = partitioner(GroupingRule::ByCountry, SortDirection::Ascending);
        p.add_coin(piastre()).unwrap();
        let placement = p.add_coin(franc()).unwrap();

        assert_eq!(placement.category, 1);
        assert_eq!(countries(&p), vec!["Egypt", "France"]);
        assert_dense(&p);
    }

    #[test]
    fn test_insert_before_is_case_insensitive() {
        let mut p = partitioner(GroupingRule::ByCountry, SortDirection::Ascending);
        p.add_coin(franc()).unwrap();
        p.add_coin(Coin::new("egypt", 1.0, "Pound")).unwrap();
        p.add_coin(Coin::new("BELGIUM", 1.0, "Franc")).unwrap();

        assert_eq!(countries(&p), vec!["BELGIUM", "egypt", "France"]);
    }

    #[test]
    fn test_descending_country_order() {
        let mut p = partitioner(GroupingRule::ByCountry, SortDirection::Descending);
        p.add_coin(piastre()).unwrap();
        p.add_coin(franc()).unwrap();
        p.add_coin(Coin::new("Greece", 1.0, "Drachma")).unwrap();

        assert_eq!(countries(&p), vec!["Greece", "France", "Egypt"]);
    }

    #[test]
    fn test_year_order_with_bce_and_unknown() {
        let mut p = partitioner(GroupingRule::ByYear, SortDirection::Ascending);
        p.add_coin(franc()).unwrap();
        p.add_coin(Coin::new("Rome", 1.0, "Denarius").with_year(-44)).unwrap();
        p.add_coin(piastre()).unwrap();
        p.add_coin(Coin::new("Egypt", 10.0, "Piastre").with_year(1960))
            .unwrap();

        let years: Vec<Option<i32>> = p
            .categories()
            .iter()
            .map(|c| c.representative().unwrap().year())
            .collect();
        assert_eq!(years, vec![Some(-44), None, Some(1960)]);
        assert_eq!(p.categories()[2].count_types(), 2);
    }

    #[test]
    fn test_unknown_year_sorts_after_bce_years() {
        let mut p = partitioner(GroupingRule::ByYear, SortDirection::Ascending);
        p.add_coin(Coin::new("Rome", 1.0, "Denarius").with_year(-44)).unwrap();
        p.add_coin(piastre()).unwrap();

        let years: Vec<Option<i32>> = p
            .categories()
            .iter()
            .map(|c| c.representative().unwrap().year())
            .collect();
        assert_eq!(years, vec![Some(-44), None]);
    }

    #[test]
    fn test_no_category_rule_appends_singletons() {
        let mut p = partitioner(GroupingRule::None, SortDirection::Ascending);
        p.add_coin(franc()).unwrap();
        p.add_coin(franc()).unwrap();
        p.add_coin(piastre()).unwrap();

        assert_eq!(p.len(), 3);
        assert_eq!(countries(&p), vec!["France", "France", "Egypt"]);
        assert!(p.categories().iter().all(|c| c.count_types() == 1));
    }

    #[test]
    fn test_removing_sole_member_deletes_category() {
        let mut p = partitioner(GroupingRule::ByCountry, SortDirection::Ascending);
        p.add_coin(piastre()).unwrap();
        p.add_coin(franc()).unwrap();
        p.add_coin(Coin::new("Greece", 1.0, "Drachma")).unwrap();

        let removal = p.remove_coin_at(1, 0).unwrap();
        assert_eq!(removal, Removal::CategoryDeleted(franc()));
        assert_eq!(countries(&p), vec!["Egypt", "Greece"]);
        assert_dense(&p);
        assert_eq!(p.store().deleted.len(), 1);
    }

    #[test]
    fn test_remove_member_keeps_category() {
        let mut p = partitioner(GroupingRule::ByCountry, SortDirection::Ascending);
        p.add_coin(franc()).unwrap();
        p.add_coin(Coin::new("France", 10.0, "Centime")).unwrap();

        let removal = p.remove_coin(0, &franc()).unwrap();
        assert_eq!(removal, Removal::Removed(franc()));
        assert_eq!(p.len(), 1);
        assert_eq!(p.categories()[0].count_types(), 1);
    }

    #[test]
    fn test_invalid_positions_are_noops() {
        let mut p = partitioner(GroupingRule::ByCountry, SortDirection::Ascending);
        p.add_coin(franc()).unwrap();
        let saves = p.store().save_count;

        assert_eq!(p.remove_coin_at(4, 0).unwrap(), Removal::NotFound);
        assert_eq!(p.remove_coin_at(0, 4).unwrap(), Removal::NotFound);
        assert_eq!(p.remove_coin(0, &piastre()).unwrap(), Removal::NotFound);
        assert!(p.delete_category(7).unwrap().is_none());
        assert!(!p.swap_coins(0, 0, 3).unwrap());
        assert!(p.update_coin(0, 9, piastre()).unwrap().is_none());
        assert_eq!(p.store().save_count, saves);
        assert_eq!(p.count_types(), 1);
    }

    #[test]
    fn test_delete_category_compacts_indices() {
        let mut p = partitioner(GroupingRule::ByCountry, SortDirection::Ascending);
        p.add_coin(piastre()).unwrap();
        p.add_coin(franc()).unwrap();
        p.add_coin(Coin::new("Greece", 1.0, "Drachma")).unwrap();

        let deleted = p.delete_category(1).unwrap().unwrap();
        assert_eq!(deleted.count_types(), 1);
        assert_eq!(p.categories().iter().map(|c| c.index).collect::<Vec<_>>(), vec![0, 1]);
        assert_eq!(countries(&p), vec!["Egypt", "Greece"]);
    }

    #[test]
    fn test_indices_stay_dense_after_mixed_operations() {
        let mut p = partitioner(GroupingRule::ByCountryValueCurrency, SortDirection::Descending);
        let coins = [
            franc(),
            piastre(),
            Coin::new("Greece", 1.0, "Drachma"),
            Coin::new("france", 1.0, "franc").with_mint("Paris"),
            Coin::new("Austria", 1.0, "Schilling"),
            Coin::new("Egypt", 10.0, "Piastre"),
        ];
        for coin in coins {
            p.add_coin(coin).unwrap();
            assert_dense(&p);
        }
        p.remove_coin_at(0, 0).unwrap();
        assert_dense(&p);
        p.delete_category(p.len() - 1).unwrap();
        assert_dense(&p);
        p.add_coin(Coin::new("Zambia", 1.0, "Kwacha")).unwrap();
        assert_dense(&p);
        assert_eq!(countries(&p)[0], "Zambia");
    }

    #[test]
    fn test_resort_same_settings_is_noop() {
        let mut p = partitioner(GroupingRule::ByCountry, SortDirection::Ascending);
        p.add_coin(piastre()).unwrap();
        p.add_coin(franc()).unwrap();
        let before = p.categories().to_vec();

        assert!(!p.resort(p.settings()).unwrap());
        assert_eq!(p.categories(), &before[..]);
    }

    #[test]
    fn test_repartition_is_idempotent() {
        let mut p = partitioner(GroupingRule::ByCountry, SortDirection::Ascending);
        p.add_coin(piastre()).unwrap();
        p.add_coin(franc()).unwrap();
        p.add_coin(Coin::new("France", 10.0, "Centime")).unwrap();
        p.add_coin(Coin::new("Greece", 1.0, "Drachma")).unwrap();

        let snapshot = |p: &Partitioner<MemoryStore>| -> Vec<Vec<Coin>> {
            p.categories().iter().map(|c| c.coins().to_vec()).collect()
        };
        let before = snapshot(&p);
        p.repartition().unwrap();
        assert_eq!(snapshot(&p), before);
        assert_dense(&p);
    }

    #[test]
    fn test_resort_regroups_by_new_rule() {
        let mut p = partitioner(GroupingRule::ByCountryValueCurrency, SortDirection::Ascending);
        p.add_coin(franc()).unwrap();
        p.add_coin(Coin::new("France", 10.0, "Centime").with_year(1960))
            .unwrap();
        p.add_coin(piastre().with_year(1938)).unwrap();
        assert_eq!(p.len(), 3);

        let by_year = SortSettings::new(GroupingRule::ByYear, SortDirection::Descending);
        assert!(p.resort(by_year).unwrap());
        assert_eq!(p.settings(), by_year);
        assert_eq!(p.len(), 2);
        assert_eq!(p.categories()[0].count_types(), 2);
        assert_eq!(p.categories()[1].representative().unwrap().year(), Some(1938));
        assert!(p.categories().iter().all(|c| c.rule == GroupingRule::ByYear));
        assert_eq!(p.count_units(), 3);
        assert_dense(&p);
    }

    #[test]
    fn test_update_in_place_when_still_fitting() {
        let mut p = partitioner(GroupingRule::ByCountry, SortDirection::Ascending);
        p.add_coin(franc()).unwrap();
        p.add_coin(Coin::new("France", 10.0, "Centime")).unwrap();
        let id = p.categories()[0].id;

        let placement = p
            .update_coin(0, 0, franc().with_grade(50))
            .unwrap()
            .unwrap();
        assert_eq!(placement.kind, PlacementKind::Updated);
        assert_eq!(p.categories()[0].id, id);
        assert_eq!(p.categories()[0].coins()[0].grade(), Some(50));
    }

    #[test]
    fn test_update_moves_coin_to_other_category() {
        let mut p = partitioner(GroupingRule::ByCountry, SortDirection::Ascending);
        p.add_coin(piastre()).unwrap();
        p.add_coin(franc()).unwrap();
        p.add_coin(Coin::new("France", 10.0, "Centime")).unwrap();

        let placement = p
            .update_coin(1, 1, Coin::new("Egypt", 10.0, "Piastre"))
            .unwrap()
            .unwrap();
        assert_eq!(placement.kind, PlacementKind::Appended);
        assert_eq!(placement.category, 0);
        assert_eq!(p.categories()[0].count_types(), 2);
        assert_eq!(p.categories()[1].count_types(), 1);
    }

    #[test]
    fn test_update_sole_member_resorts_when_key_changes() {
        let mut p = partitioner(GroupingRule::ByCountry, SortDirection::Ascending);
        p.add_coin(piastre()).unwrap();
        p.add_coin(franc()).unwrap();

        let placement = p
            .update_coin(0, 0, Coin::new("Zambia", 1.0, "Kwacha"))
            .unwrap()
            .unwrap();
        assert_eq!(placement.kind, PlacementKind::Created);
        assert_eq!(countries(&p), vec!["France", "Zambia"]);
        assert_dense(&p);
    }

    #[test]
    fn test_update_sole_member_merges_into_existing() {
        let mut p = partitioner(GroupingRule::ByCountry, SortDirection::Ascending);
        p.add_coin(piastre()).unwrap();
        p.add_coin(franc()).unwrap();

        let placement = p.update_coin(0, 0, franc()).unwrap().unwrap();
        assert_eq!(placement.kind, PlacementKind::Merged);
        assert_eq!(p.len(), 1);
        assert_eq!(p.count_units(), 2);
    }

    #[test]
    fn test_save_failure_keeps_in_memory_change() {
        let mut p = Partitioner::new(SortSettings::default(), MemoryStore::failing("offline"));
        let err = p.add_coin(franc()).unwrap_err();

        assert!(matches!(err, CatalogError::Store(_)));
        assert_eq!(p.len(), 1);
        assert!(p.store().snapshot.is_empty());
    }

    #[test]
    fn test_with_categories_rebuilds_stale_rule() {
        let mut country = CoinCategory::with_coin(GroupingRule::ByCountry, franc());
        country.add(Coin::new("France", 10.0, "Centime"));
        country.index = 3;

        let settings = SortSettings::new(GroupingRule::ByCountryValueCurrency, SortDirection::Ascending);
        let p = Partitioner::with_categories(settings, MemoryStore::new(), vec![country]);
        assert_eq!(p.len(), 2);
        assert_dense(&p);
    }

    #[test]
    fn test_with_categories_orders_by_index() {
        let mut egypt = CoinCategory::with_coin(GroupingRule::ByCountry, piastre());
        egypt.index = 5;
        let mut france = CoinCategory::with_coin(GroupingRule::ByCountry, franc());
        france.index = 2;
        let empty = CoinCategory::new(GroupingRule::ByCountry);

        let settings = SortSettings::new(GroupingRule::ByCountry, SortDirection::Descending);
        let p = Partitioner::with_categories(settings, MemoryStore::new(), vec![egypt, empty, france]);
        assert_eq!(countries(&p), vec!["France", "Egypt"]);
        assert_dense(&p);
    }

    #[test]
    fn test_with_categories_rebuilds_when_order_flipped() {
        let mut egypt = CoinCategory::with_coin(GroupingRule::ByCountry, piastre());
        egypt.index = 0;
        let mut france = CoinCategory::with_coin(GroupingRule::ByCountry, franc());
        france.index = 1;

        let settings = SortSettings::new(GroupingRule::ByCountry, SortDirection::Descending);
        let mut p = Partitioner::with_categories(settings, MemoryStore::new(), vec![egypt, france]);
        assert_eq!(countries(&p), vec!["France", "Egypt"]);

        p.add_coin(Coin::new("Greece", 1.0, "Drachma")).unwrap();
        assert_eq!(countries(&p), vec!["Greece", "France", "Egypt"]);
        assert_dense(&p);
    }

    #[test]
    fn test_with_categories_keeps_sorted_partition() {
        let mut egypt = CoinCategory::with_coin(GroupingRule::ByCountry, piastre());
        egypt.index = 0;
        egypt.add(Coin::new("Egypt", 10.0, "Piastre"));
        let mut france = CoinCategory::with_coin(GroupingRule::ByCountry, franc());
        france.index = 1;
        let ids = vec![egypt.id, france.id];

        let settings = SortSettings::new(GroupingRule::ByCountry, SortDirection::Ascending);
        let p = Partitioner::with_categories(settings, MemoryStore::new(), vec![egypt, france]);
        let kept: Vec<_> = p.categories().iter().map(|c| c.id).collect();
        assert_eq!(kept, ids);
        assert!(p.store().deleted.is_empty());
    }

    #[test]
    fn test_search_returns_positions() {
        let mut p = partitioner(GroupingRule::ByCountry, SortDirection::Ascending);
        p.add_coin(piastre()).unwrap();
        p.add_coin(franc()).unwrap();

        let hits: Vec<usize> = p.search("fra").into_iter().map(|(i, _)| i).collect();
        assert_eq!(hits, vec![1]);
        assert_eq!(p.search("").len(), 2);
    }
}
