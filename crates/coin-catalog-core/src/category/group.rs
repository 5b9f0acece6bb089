//! Coin Category
//!
//! An ordered group of coins sharing one grouping rule. Index-based
//! operations are total: an out-of-range index is a no-op or returns `None`.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::coin::{format_year, Coin, DEFAULT_YEAR};

use super::rule::GroupingRule;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoinCategory {
    /// Stable identity for the persisted store
    pub id: Uuid,
    /// Display position, kept dense by the partitioner
    pub index: usize,
    pub rule: GroupingRule,
    #[serde(default)]
    coins: Vec<Coin>,
}

impl CoinCategory {
    /// Empty category; the first coin added defines its identity
    pub fn new(rule: GroupingRule) -> Self {
        Self {
            id: Uuid::new_v4(),
            index: 0,
            rule,
            coins: Vec::new(),
        }
    }

    pub fn with_coin(rule: GroupingRule, coin: Coin) -> Self {
        let mut category = Self::new(rule);
        category.coins.push(coin);
        category
    }

    pub fn coins(&self) -> &[Coin] {
        &self.coins
    }

    pub fn is_empty(&self) -> bool {
        self.coins.is_empty()
    }

    /// First member, which stands for the whole category
    pub fn representative(&self) -> Option<&Coin> {
        self.coins.first()
    }

    /// Whether `coin` belongs here. An empty category accepts anything.
    pub fn fits(&self, coin: &Coin) -> bool {
        match self.representative() {
            Some(first) => self.rule.matches(first, coin),
            None => true,
        }
    }

    /// Append `coin` if it fits; returns whether it was added
    pub fn add(&mut self, coin: Coin) -> bool {
        if !self.fits(&coin) {
            return false;
        }
        self.coins.push(coin);
        true
    }

    pub fn get(&self, index: usize) -> Option<&Coin> {
        self.coins.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut Coin> {
        self.coins.get_mut(index)
    }

    pub fn position(&self, coin: &Coin) -> Option<usize> {
        self.coins.iter().position(|c| c == coin)
    }

    pub fn contains(&self, coin: &Coin) -> bool {
        self.position(coin).is_some()
    }

    /// Remove the first member equal to `coin`
    pub fn remove(&mut self, coin: &Coin) -> Option<Coin> {
        let index = self.position(coin)?;
        Some(self.coins.remove(index))
    }

    pub fn remove_at(&mut self, index: usize) -> Option<Coin> {
        if index < self.coins.len() {
            Some(self.coins.remove(index))
        } else {
            None
        }
    }

    /// Overwrite the member at `index`; returns whether it existed
    pub fn assign(&mut self, index: usize, coin: Coin) -> bool {
        match self.coins.get_mut(index) {
            Some(slot) => {
                *slot = coin;
                true
            }
            None => false,
        }
    }

    /// Swap two members; invalid indices leave the order untouched
    pub fn swap(&mut self, i: usize, j: usize) -> bool {
        if i < self.coins.len() && j < self.coins.len() {
            self.coins.swap(i, j);
            true
        } else {
            false
        }
    }

    pub fn clear(&mut self) {
        self.coins.clear();
    }

    /// Drop every member and hand them back in order
    pub fn take_coins(&mut self) -> Vec<Coin> {
        std::mem::take(&mut self.coins)
    }

    /// Number of distinct coin types (one entry per type)
    pub fn count_types(&self) -> usize {
        self.coins.len()
    }

    /// Number of physical coins across all entries
    pub fn count_units(&self) -> u64 {
        self.coins.iter().map(|c| u64::from(c.quantity())).sum()
    }

    /// Heading lines describing the category under its rule
    pub fn title(&self) -> Vec<String> {
        let Some(sample) = self.representative() else {
            return Vec::new();
        };
        match self.rule {
            GroupingRule::ByCountryValueCurrency => vec![
                sample.value_and_denomination(),
                sample.country().to_string(),
            ],
            GroupingRule::ByCountry => vec![sample.country().to_string()],
            GroupingRule::ByCurrency => vec![
                sample.country().to_string(),
                sample.currency().to_string(),
            ],
            GroupingRule::ByYear => vec![sample
                .year()
                .map(format_year)
                .unwrap_or_else(|| DEFAULT_YEAR.to_string())],
            GroupingRule::None => Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn franc() -> Coin {
        Coin::new("France", 1.0, "Franc").with_year(1960)
    }

    #[test]
    fn test_empty_category_accepts_anything() {
        let mut category = CoinCategory::new(GroupingRule::ByCountry);
        assert!(category.add(franc()));
        assert_eq!(category.count_types(), 1);
    }

    #[test]
    fn test_add_rejects_non_matching() {
        let mut category = CoinCategory::with_coin(GroupingRule::ByCountry, franc());
        assert!(!category.add(Coin::new("Egypt", 5.0, "Piastre")));
        assert!(category.add(Coin::new("france", 10.0, "Centime")));
        assert_eq!(category.count_types(), 2);
    }

    #[test]
    fn test_counts() {
        let mut category = CoinCategory::with_coin(
            GroupingRule::ByCountry,
            franc().with_quantity(3),
        );
        category.add(Coin::new("France", 2.0, "Franc").with_quantity(2));
        assert_eq!(category.count_types(), 2);
        assert_eq!(category.count_units(), 5);
    }

    #[test]
    fn test_index_operations_are_total() {
        let mut category = CoinCategory::with_coin(GroupingRule::ByCountry, franc());
        assert!(category.get(3).is_none());
        assert!(category.remove_at(3).is_none());
        assert!(!category.swap(0, 5));
        assert!(!category.assign(9, franc()));
        assert!(category.remove(&Coin::new("Egypt", 5.0, "Piastre")).is_none());
        assert_eq!(category.count_types(), 1);
    }

    #[test]
    fn test_swap_and_remove() {
        let second = Coin::new("France", 5.0, "Franc");
        let mut category = CoinCategory::with_coin(GroupingRule::ByCountry, franc());
        category.add(second.clone());

        assert!(category.swap(0, 1));
        assert_eq!(category.representative(), Some(&second));

        assert_eq!(category.remove(&second), Some(second));
        assert_eq!(category.coins(), &[franc()]);
    }

    #[test]
    fn test_title_per_rule() {
        let coin = franc();
        assert_eq!(
            CoinCategory::with_coin(GroupingRule::ByCountryValueCurrency, coin.clone()).title(),
            vec!["1 Franc", "France"]
        );
        assert_eq!(
            CoinCategory::with_coin(GroupingRule::ByYear, coin.clone()).title(),
            vec!["1960 CE"]
        );
        assert_eq!(
            CoinCategory::with_coin(GroupingRule::ByYear, Coin::default()).title(),
            vec!["(Year?)"]
        );
        assert!(CoinCategory::new(GroupingRule::ByCountry).title().is_empty());
    }

    #[test]
    fn test_clear_empties_category() {
        let mut category = CoinCategory::with_coin(GroupingRule::ByCountry, franc());
        category.clear();
        assert!(category.is_empty());
        assert_eq!(category.count_units(), 0);
        assert!(category.representative().is_none());
    }
}
