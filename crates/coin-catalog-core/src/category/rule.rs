//! Grouping rules and category ordering
//!
//! The classifier decides whether two coins share a category under a
//! [`GroupingRule`]; [`SortKey`] decides where a new category is placed.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::coin::{eq_ignore_case, Coin};

/// Equality predicate used to partition the collection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum GroupingRule {
    /// Same country, face value and currency
    #[default]
    #[serde(rename = "Country & Value")]
    ByCountryValueCurrency,
    #[serde(rename = "Country")]
    ByCountry,
    /// Same currency within the same country
    #[serde(rename = "Country & Currency")]
    ByCurrency,
    #[serde(rename = "Year")]
    ByYear,
    /// Every coin forms its own category
    #[serde(rename = "No Category")]
    None,
}

impl GroupingRule {
    pub const ALL: [GroupingRule; 5] = [
        Self::ByCountryValueCurrency,
        Self::ByCountry,
        Self::ByCurrency,
        Self::ByYear,
        Self::None,
    ];

    /// Display name, also the persisted preference value
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ByCountryValueCurrency => "Country & Value",
            Self::ByCountry => "Country",
            Self::ByCurrency => "Country & Currency",
            Self::ByYear => "Year",
            Self::None => "No Category",
        }
    }

    /// Parse a persisted name or a short alias. Anything unrecognised
    /// degrades to [`GroupingRule::None`].
    pub fn from_name(name: &str) -> Self {
        match name.trim().to_lowercase().as_str() {
            "country & value" | "country-value" | "country_value" => Self::ByCountryValueCurrency,
            "country" => Self::ByCountry,
            "country & currency" | "currency" => Self::ByCurrency,
            "year" => Self::ByYear,
            _ => Self::None,
        }
    }

    /// Whether two coins belong to the same category under this rule
    pub fn matches(&self, a: &Coin, b: &Coin) -> bool {
        match self {
            Self::ByCountryValueCurrency => {
                eq_ignore_case(a.country(), b.country())
                    && a.value() == b.value()
                    && eq_ignore_case(a.currency(), b.currency())
            }
            Self::ByCountry => eq_ignore_case(a.country(), b.country()),
            Self::ByCurrency => {
                eq_ignore_case(a.currency(), b.currency())
                    && eq_ignore_case(a.country(), b.country())
            }
            Self::ByYear => a.year() == b.year(),
            Self::None => false,
        }
    }

    /// Key used to place a category whose representative is `coin`
    pub fn sort_key(&self, coin: &Coin) -> SortKey {
        match self {
            Self::ByCountryValueCurrency | Self::ByCountry | Self::ByCurrency => {
                SortKey::Text(coin.country().to_lowercase())
            }
            Self::ByYear => SortKey::Year(coin.year().unwrap_or(0)),
            Self::None => SortKey::Unordered,
        }
    }
}

impl fmt::Display for GroupingRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Ordering applied to categories (not to coins inside a category)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

impl SortDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Ascending => "Ascending",
            Self::Descending => "Descending",
        }
    }
}

impl fmt::Display for SortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortDirection {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "ascending" | "asc" => Ok(Self::Ascending),
            "descending" | "desc" => Ok(Self::Descending),
            other => Err(format!("unknown sort direction '{}'", other)),
        }
    }
}

/// Active grouping rule and category order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SortSettings {
    pub grouping: GroupingRule,
    pub order: SortDirection,
}

impl SortSettings {
    pub fn new(grouping: GroupingRule, order: SortDirection) -> Self {
        Self { grouping, order }
    }

    /// Whether a new category keyed `new` goes before an existing one keyed `existing`
    pub fn sorts_before(&self, new: &SortKey, existing: &SortKey) -> bool {
        let wanted = match self.order {
            SortDirection::Ascending => Ordering::Less,
            SortDirection::Descending => Ordering::Greater,
        };
        new.compare(existing) == Some(wanted)
    }
}

/// Representative key of a category.
///
/// Country keys are lowercased so comparison is case-insensitive. An absent
/// year sorts as year zero, after every BCE year and before every CE year.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SortKey {
    Text(String),
    Year(i32),
    Unordered,
}

impl SortKey {
    /// `None` when the keys are not comparable
    pub fn compare(&self, other: &SortKey) -> Option<Ordering> {
        match (self, other) {
            (Self::Text(a), Self::Text(b)) => Some(a.cmp(b)),
            (Self::Year(a), Self::Year(b)) => Some(a.cmp(b)),
            _ => None,
        }
    }
}
