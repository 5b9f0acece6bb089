//! Free-text filtering of categories and coins
//!
//! A query is split on whitespace and matches when any word appears
//! (case-insensitively) in one of the searchable renderings. An empty query
//! matches everything.

use crate::category::{CoinCategory, GroupingRule};
use crate::coin::{Coin, Era, DEFAULT_VALUE, DEFAULT_YEAR, NOT_AVAILABLE};

fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

fn words(query: &str) -> Vec<&str> {
    query.split_whitespace().collect()
}

/// Era words a year answers to: "CE" for positive years, "BCE" for negative
fn era_word(year: i32) -> Option<Era> {
    match year {
        y if y > 0 => Some(Era::Ce),
        y if y < 0 => Some(Era::Bce),
        _ => None,
    }
}

fn value_text(coin: &Coin) -> String {
    if coin.has_value() {
        coin.value().to_string()
    } else {
        DEFAULT_VALUE.to_string()
    }
}

/// Renderings of a category that a search word may hit
fn category_fields(category: &CoinCategory) -> Vec<String> {
    let mut fields = vec![category.count_units().to_string()];
    let Some(sample) = category.representative() else {
        return fields;
    };

    match category.rule {
        GroupingRule::ByCountryValueCurrency => {
            fields.push(sample.country().to_string());
            fields.push(value_text(sample));
            fields.push(sample.currency().to_string());
            if sample.has_value() {
                if let Some(era) = sample.year().and_then(era_word) {
                    fields.push(era.to_string());
                }
            }
        }
        GroupingRule::ByCountry => fields.push(sample.country().to_string()),
        GroupingRule::ByCurrency => {
            fields.push(sample.currency().to_string());
            fields.push(sample.country().to_string());
        }
        GroupingRule::ByYear => {
            if let Some(year) = sample.year() {
                fields.push(year.to_string());
                if let Some(era) = era_word(year) {
                    fields.push(era.to_string());
                }
            }
        }
        GroupingRule::None => {}
    }
    fields
}

/// Renderings of a single coin that a search word may hit
fn coin_fields(coin: &Coin) -> Vec<String> {
    let mut fields = vec![value_text(coin), coin.currency().to_string()];
    match coin.year() {
        Some(year) => {
            fields.push(year.to_string());
            if let Some(era) = era_word(year) {
                fields.push(era.to_string());
            }
        }
        None => fields.push(DEFAULT_YEAR.to_string()),
    }
    fields.push(coin.mint().to_string());
    fields.push(
        coin.grade()
            .map(|g| g.to_string())
            .unwrap_or_else(|| NOT_AVAILABLE.to_string()),
    );
    fields.push(coin.quantity().to_string());
    fields.push(coin.country().to_string());
    fields
}

/// Whether any word of `fields` is hit by any word of `query`
fn any_word_hits(fields: &[String], query: &str) -> bool {
    let words = words(query);
    if words.is_empty() {
        return true;
    }
    words
        .iter()
        .any(|w| fields.iter().any(|f| contains_ignore_case(f, w)))
}

pub fn category_matches(category: &CoinCategory, query: &str) -> bool {
    any_word_hits(&category_fields(category), query)
}

pub fn coin_matches(coin: &Coin, query: &str) -> bool {
    any_word_hits(&coin_fields(coin), query)
}

/// Members of a category matching `query`, with their positions
pub fn filter_coins<'a>(category: &'a CoinCategory, query: &str) -> Vec<(usize, &'a Coin)> {
    category
        .coins()
        .iter()
        .enumerate()
        .filter(|(_, c)| coin_matches(c, query))
        .collect()
}
