//! User input for a new or edited coin

use crate::coin::{
    Coin, Era, DEFAULT_COMMENTS, DEFAULT_COUNTRY, DEFAULT_CURRENCY, DEFAULT_DESCRIPTION,
    DEFAULT_MINT, GRADE_MAX, GRADE_MIN,
};
use crate::error::{CatalogError, Result};

/// Years the universe existed before year zero
const UNIVERSE_AGE_YEARS: i64 = 13_800_000_000;

/// Raw coin input as typed by the user. Every field is optional.
#[derive(Debug, Clone, Default)]
pub struct CoinDraft {
    pub country: Option<String>,
    pub mint: Option<String>,
    /// Unsigned year; the era decides its sign
    pub year: Option<i64>,
    pub era: Option<Era>,
    pub currency: Option<String>,
    pub value: Option<f64>,
    pub grade: Option<i32>,
    pub comments: Option<String>,
    pub description: Option<String>,
    pub quantity: Option<i64>,
    pub obverse: Option<Vec<u8>>,
    pub reverse: Option<Vec<u8>>,
}

/// Trim and drop trailing punctuation, `None` when nothing is left
fn clean(text: &Option<String>) -> Option<String> {
    let trimmed = text
        .as_deref()?
        .trim()
        .trim_end_matches(|c: char| c.is_ascii_punctuation() && c != ')')
        .trim_end();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

impl CoinDraft {
    /// Start an edit from an existing coin
    pub fn from_coin(coin: &Coin) -> Self {
        let raw = |text: &str, default: &str| {
            if text == default {
                None
            } else {
                Some(text.to_string())
            }
        };
        Self {
            country: raw(coin.country(), DEFAULT_COUNTRY),
            mint: raw(coin.mint(), DEFAULT_MINT),
            year: coin.year().map(|y| i64::from(y).abs()),
            era: coin.year().map(Era::of_year),
            currency: raw(coin.currency(), DEFAULT_CURRENCY),
            value: coin.has_value().then(|| coin.value()),
            grade: coin.grade(),
            comments: raw(coin.comments(), DEFAULT_COMMENTS),
            description: raw(coin.description(), DEFAULT_DESCRIPTION),
            quantity: Some(i64::from(coin.quantity())),
            obverse: coin.obverse().map(<[u8]>::to_vec),
            reverse: coin.reverse().map(<[u8]>::to_vec),
        }
    }

    fn all_empty(&self) -> bool {
        clean(&self.country).is_none()
            && clean(&self.mint).is_none()
            && self.year.is_none()
            && clean(&self.currency).is_none()
            && self.value.is_none()
            && self.grade.is_none()
            && clean(&self.comments).is_none()
            && clean(&self.description).is_none()
            && self.obverse.is_none()
            && self.reverse.is_none()
    }

    /// Every problem with the input, empty when it is acceptable
    pub fn validate(&self, current_year: i32) -> Vec<String> {
        let mut issues = Vec::new();

        if self.all_empty() {
            issues.push("No information about the coin was entered".to_string());
        }

        if let Some(grade) = self.grade {
            if !(GRADE_MIN..=GRADE_MAX).contains(&grade) {
                issues.push(format!(
                    "Grade {} is outside the valid range [{}-{}]",
                    grade, GRADE_MIN, GRADE_MAX
                ));
            }
        }

        if let Some(year) = self.year {
            let current = i64::from(current_year);
            match self.era.unwrap_or(Era::Ce) {
                Era::Ce if year > current => issues.push(format!(
                    "Year {} CE is later than the current year ({} CE)",
                    year, current
                )),
                Era::Bce if year > UNIVERSE_AGE_YEARS - current => issues.push(format!(
                    "Year {} BCE makes the coin older than the universe",
                    year
                )),
                _ if i32::try_from(year).is_err() => {
                    issues.push(format!("Year {} is out of range", year))
                }
                _ => {}
            }
            if year < 0 {
                issues.push("Year must be entered without a sign; choose the era instead".into());
            }
            if year == 0 {
                issues.push("There is no year 0; 1 BCE is followed by 1 CE".into());
            }
        }

        if let Some(value) = self.value {
            if value < 0.0 || value.is_nan() {
                issues.push(format!("Value {} must not be negative", value));
            }
        }

        issues
    }

    /// Validate and build the coin
    pub fn into_coin(self, current_year: i32) -> Result<Coin> {
        let issues = self.validate(current_year);
        if !issues.is_empty() {
            return Err(CatalogError::InvalidInput { issues });
        }

        let mut coin = Coin::new(
            clean(&self.country).unwrap_or_default(),
            self.value.unwrap_or(0.0),
            clean(&self.currency).unwrap_or_default(),
        );
        coin.set_mint(clean(&self.mint).unwrap_or_default());
        coin.set_comments(clean(&self.comments).unwrap_or_default());
        coin.set_description(clean(&self.description).unwrap_or_default());
        coin.set_grade(self.grade);
        coin.set_quantity(self.quantity.unwrap_or(1));
        coin.set_obverse(self.obverse);
        coin.set_reverse(self.reverse);

        let year = match (self.year, self.era.unwrap_or(Era::Ce)) {
            (Some(y), Era::Ce) => i32::try_from(y).ok(),
            (Some(y), Era::Bce) => i32::try_from(y).ok().map(|y| -y),
            (None, _) => None,
        };
        coin.set_year(year);

        Ok(coin)
    }
}
