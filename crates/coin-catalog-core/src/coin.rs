//! Coin record
//!
//! A single entry of the collection. Absent text fields read back as
//! placeholder strings, quantity and value never drop below zero, and a grade
//! outside the Sheldon scale reads back as absent.

use serde::{Deserialize, Serialize};

/// Lowest grade on the Sheldon scale
pub const GRADE_MIN: i32 = 1;
/// Highest grade on the Sheldon scale
pub const GRADE_MAX: i32 = 70;

pub const DEFAULT_COUNTRY: &str = "(Country?)";
pub const DEFAULT_MINT: &str = "(Mint?)";
pub const DEFAULT_CURRENCY: &str = "(Currency?)";
pub const DEFAULT_YEAR: &str = "(Year?)";
pub const DEFAULT_GRADE: &str = "(Grade?)";
pub const DEFAULT_DESCRIPTION: &str = "(Description?)";
pub const DEFAULT_COMMENTS: &str = "(Comments?)";
pub const DEFAULT_VALUE: &str = "(Value?)";
pub const NOT_AVAILABLE: &str = "N/A";

const BULLET: &str = "➣ ";

/// Calendar era a year belongs to. Negative years are BCE.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Era {
    #[serde(rename = "BCE")]
    Bce,
    #[serde(rename = "CE")]
    Ce,
}

impl Era {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Bce => "BCE",
            Self::Ce => "CE",
        }
    }

    /// Era label for a signed year; year zero and below render as BCE.
    pub fn of_year(year: i32) -> Self {
        if year > 0 {
            Self::Ce
        } else {
            Self::Bce
        }
    }
}

impl std::fmt::Display for Era {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Render a signed year as `"1960 CE"` / `"44 BCE"`.
pub fn format_year(year: i32) -> String {
    format!("{} {}", year.unsigned_abs(), Era::of_year(year))
}

fn default_quantity() -> u32 {
    1
}

fn text_or<'a>(value: &'a str, default: &'a str) -> &'a str {
    if value.is_empty() {
        default
    } else {
        value
    }
}

fn clamp_value(value: f64) -> f64 {
    // NaN falls through to zero as well
    if value > 0.0 {
        value
    } else {
        0.0
    }
}

fn valid_grade(grade: Option<i32>) -> Option<i32> {
    grade.filter(|g| (GRADE_MIN..=GRADE_MAX).contains(g))
}

/// One coin entry. `quantity` counts identical pieces of this type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Coin {
    #[serde(default)]
    country: String,
    #[serde(default)]
    mint: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    year: Option<i32>,
    #[serde(default)]
    currency: String,
    #[serde(default)]
    value: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    grade: Option<i32>,
    #[serde(default)]
    comments: String,
    #[serde(default)]
    description: String,
    #[serde(default = "default_quantity")]
    quantity: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    obverse: Option<Vec<u8>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    reverse: Option<Vec<u8>>,
}

impl Default for Coin {
    fn default() -> Self {
        Self {
            country: String::new(),
            mint: String::new(),
            year: None,
            currency: String::new(),
            value: 0.0,
            grade: None,
            comments: String::new(),
            description: String::new(),
            quantity: default_quantity(),
            obverse: None,
            reverse: None,
        }
    }
}

impl Coin {
    /// Create a coin identified by country, face value and currency
    pub fn new(country: impl Into<String>, value: f64, currency: impl Into<String>) -> Self {
        Self {
            country: country.into(),
            currency: currency.into(),
            value: clamp_value(value),
            ..Self::default()
        }
    }

    pub fn with_year(mut self, year: i32) -> Self {
        self.year = Some(year);
        self
    }

    pub fn with_mint(mut self, mint: impl Into<String>) -> Self {
        self.mint = mint.into();
        self
    }

    pub fn with_grade(mut self, grade: i32) -> Self {
        self.set_grade(Some(grade));
        self
    }

    pub fn with_quantity(mut self, quantity: i64) -> Self {
        self.set_quantity(quantity);
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_comments(mut self, comments: impl Into<String>) -> Self {
        self.comments = comments.into();
        self
    }

    pub fn with_obverse(mut self, image: Vec<u8>) -> Self {
        self.obverse = Some(image);
        self
    }

    pub fn with_reverse(mut self, image: Vec<u8>) -> Self {
        self.reverse = Some(image);
        self
    }

    // ----- accessors -----

    pub fn country(&self) -> &str {
        text_or(&self.country, DEFAULT_COUNTRY)
    }

    pub fn set_country(&mut self, country: impl Into<String>) {
        self.country = country.into();
    }

    pub fn mint(&self) -> &str {
        text_or(&self.mint, DEFAULT_MINT)
    }

    pub fn set_mint(&mut self, mint: impl Into<String>) {
        self.mint = mint.into();
    }

    pub fn year(&self) -> Option<i32> {
        self.year
    }

    pub fn set_year(&mut self, year: Option<i32>) {
        self.year = year;
    }

    pub fn currency(&self) -> &str {
        text_or(&self.currency, DEFAULT_CURRENCY)
    }

    pub fn set_currency(&mut self, currency: impl Into<String>) {
        self.currency = currency.into();
    }

    pub fn value(&self) -> f64 {
        clamp_value(self.value)
    }

    /// Negative values are stored as zero
    pub fn set_value(&mut self, value: f64) {
        self.value = clamp_value(value);
    }

    pub fn grade(&self) -> Option<i32> {
        valid_grade(self.grade)
    }

    /// Grades outside `GRADE_MIN..=GRADE_MAX` are stored as absent
    pub fn set_grade(&mut self, grade: Option<i32>) {
        self.grade = valid_grade(grade);
    }

    pub fn comments(&self) -> &str {
        text_or(&self.comments, DEFAULT_COMMENTS)
    }

    pub fn set_comments(&mut self, comments: impl Into<String>) {
        self.comments = comments.into();
    }

    pub fn description(&self) -> &str {
        text_or(&self.description, DEFAULT_DESCRIPTION)
    }

    pub fn set_description(&mut self, description: impl Into<String>) {
        self.description = description.into();
    }

    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    /// Negative quantities are stored as zero
    pub fn set_quantity(&mut self, quantity: i64) {
        self.quantity = u32::try_from(quantity.max(0)).unwrap_or(u32::MAX);
    }

    pub fn add_quantity(&mut self, extra: u32) {
        self.quantity = self.quantity.saturating_add(extra);
    }

    pub fn obverse(&self) -> Option<&[u8]> {
        self.obverse.as_deref()
    }

    pub fn set_obverse(&mut self, image: Option<Vec<u8>>) {
        self.obverse = image;
    }

    pub fn reverse(&self) -> Option<&[u8]> {
        self.reverse.as_deref()
    }

    pub fn set_reverse(&mut self, image: Option<Vec<u8>>) {
        self.reverse = image;
    }

    /// Present images, obverse first
    pub fn images(&self) -> Vec<&[u8]> {
        self.obverse().into_iter().chain(self.reverse()).collect()
    }

    // ----- rendering -----

    /// A value of zero counts as unknown: nothing worthless gets minted.
    pub fn has_value(&self) -> bool {
        self.value() > 0.0
    }

    /// `"20 Cents"`, `"(Value?) Cents"`, `"20 (Currency?)"` or `"(Value?) (Currency?)"`
    pub fn value_and_denomination(&self) -> String {
        let value = if self.has_value() {
            self.value().to_string()
        } else {
            DEFAULT_VALUE.to_string()
        };
        format!("{} {}", value, self.currency())
    }

    pub fn year_label(&self) -> String {
        match self.year {
            Some(year) => format_year(year),
            None => DEFAULT_YEAR.to_string(),
        }
    }

    /// Bulleted description of every field
    pub fn summary(&self) -> String {
        let currency = if self.currency.is_empty() {
            "units of an unknown currency"
        } else {
            self.currency.as_str()
        };
        let mut out = String::from("Information about this coin:\n\n");
        out.push_str(&format!(
            "{BULLET}Value and Denomination: {} {}\n",
            self.value(),
            currency
        ));
        out.push_str(&format!(
            "{BULLET}Year: {}\n",
            self.year.map(format_year).unwrap_or_else(|| "Unknown Year".into())
        ));
        out.push_str(&format!(
            "{BULLET}Country: {}\n",
            text_or(&self.country, "Unknown Country")
        ));
        out.push_str(&format!(
            "{BULLET}Mint: {}\n",
            text_or(&self.mint, "Unknown Mint")
        ));
        out.push_str(&format!(
            "{BULLET}Grade: {}\n",
            self.grade()
                .map(|g| g.to_string())
                .unwrap_or_else(|| "Unknown Grade".into())
        ));
        out.push_str(&format!("{BULLET}Number of Coins: {}\n", self.quantity));
        out.push_str(&format!(
            "{BULLET}Additional Comments: {}\n",
            text_or(&self.comments, "No Additional Comments")
        ));
        out
    }

    /// One-line description of the main details
    pub fn short_summary(&self) -> String {
        let currency = if self.currency.is_empty() {
            "units of an unknown currency"
        } else {
            self.currency.as_str()
        };
        let year = match self.year {
            Some(year) => format!("Year: {}", format_year(year)),
            None => "Year unknown".to_string(),
        };
        let country = if self.country.is_empty() {
            "Country unknown".to_string()
        } else {
            format!("Country: {}", self.country)
        };
        let mint = if self.mint.is_empty() {
            "Mint unknown".to_string()
        } else {
            format!("Mint: {}", self.mint)
        };
        let grade = match self.grade() {
            Some(g) => format!("Grade: {}", g),
            None => "Grade unknown".to_string(),
        };
        format!(
            "{} {}. {}. {}. {}. {}.",
            self.value(),
            currency,
            year,
            country,
            mint,
            grade
        )
    }

    // ----- comparisons -----

    /// Same country, face value and currency
    pub fn is_same_type(&self, other: &Coin) -> bool {
        eq_ignore_case(self.country(), other.country())
            && self.value() == other.value()
            && eq_ignore_case(self.currency(), other.currency())
    }

    /// Equal on every descriptive field; quantity and images are ignored.
    /// Two such coins are merged into one entry with a combined quantity.
    pub fn is_identical_type(&self, other: &Coin) -> bool {
        eq_ignore_case(&self.country, &other.country)
            && self.value() == other.value()
            && eq_ignore_case(&self.currency, &other.currency)
            && eq_ignore_case(&self.mint, &other.mint)
            && self.year == other.year
            && self.grade() == other.grade()
            && self.comments == other.comments
            && self.description == other.description
    }
}

/// Case-insensitive string equality
pub(crate) fn eq_ignore_case(a: &str, b: &str) -> bool {
    a.to_lowercase() == b.to_lowercase()
}
