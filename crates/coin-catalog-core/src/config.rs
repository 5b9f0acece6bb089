use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::category::{GroupingRule, SortDirection, SortSettings};
use crate::error::{CatalogError, Result};

const CONFIG_FILE: &str = "config.toml";

pub const GROUPING_KEY: &str = "collection.grouping";
pub const ORDER_KEY: &str = "collection.order";

/// Default config template with rich comments
const DEFAULT_CONFIG_TEMPLATE: &str = r#"# coin-catalog configuration file
# Location: ~/.coin-catalog/config.toml

[collection]
# How coins are grouped into categories
# One of: "Country & Value", "Country", "Country & Currency", "Year", "No Category"
# Default: "Country & Value"
grouping = "Country & Value"

# Order of categories: "Ascending" or "Descending"
# Default: "Ascending"
order = "Ascending"
"#;

/// Key-value preferences read at startup and written on settings changes
pub trait PreferenceStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str) -> Result<()>;
}

impl SortSettings {
    /// Read the active settings; missing keys fall back to the defaults
    pub fn from_preferences(prefs: &impl PreferenceStore) -> Self {
        let grouping = prefs
            .get(GROUPING_KEY)
            .map(|v| GroupingRule::from_name(&v))
            .unwrap_or_default();
        let order = prefs
            .get(ORDER_KEY)
            .and_then(|v| v.parse().ok())
            .unwrap_or_default();
        Self { grouping, order }
    }

    pub fn write_preferences(&self, prefs: &mut impl PreferenceStore) -> Result<()> {
        prefs.set(GROUPING_KEY, self.grouping.as_str())?;
        prefs.set(ORDER_KEY, self.order.as_str())
    }
}

/// Global configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub collection: CollectionConfig,
}

/// Collection-related configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct CollectionConfig {
    #[serde(default, deserialize_with = "lenient_grouping")]
    pub grouping: GroupingRule,

    #[serde(default)]
    pub order: SortDirection,
}

/// Unknown grouping names read back as "No Category"
fn lenient_grouping<'de, D>(deserializer: D) -> std::result::Result<GroupingRule, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let name = String::deserialize(deserializer)?;
    Ok(GroupingRule::from_name(&name))
}

impl Config {
    /// Load config from base directory
    pub fn load(base_dir: &Path) -> Result<Self> {
        let path = base_dir.join(CONFIG_FILE);
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&path)?;
        let config: Config = toml::from_str(&content).map_err(|e| CatalogError::ConfigParse {
            path: path.clone(),
            message: e.to_string(),
        })?;

        Ok(config)
    }

    /// Save config to base directory
    pub fn save(&self, base_dir: &Path) -> Result<()> {
        let path = base_dir.join(CONFIG_FILE);
        fs::create_dir_all(base_dir)?;

        let content = toml::to_string_pretty(self)?;
        fs::write(&path, content)?;
        Ok(())
    }

    /// Get config file path
    pub fn path(base_dir: &Path) -> PathBuf {
        base_dir.join(CONFIG_FILE)
    }

    /// Initialize config with default template (rich comments)
    pub fn init(base_dir: &Path) -> Result<PathBuf> {
        let path = base_dir.join(CONFIG_FILE);
        fs::create_dir_all(base_dir)?;

        if !path.exists() {
            fs::write(&path, DEFAULT_CONFIG_TEMPLATE)?;
        }

        Ok(path)
    }

    pub fn settings(&self) -> SortSettings {
        SortSettings::new(self.collection.grouping, self.collection.order)
    }

    /// List all config keys with their current values
    pub fn list(&self) -> Vec<(String, String)> {
        vec![
            (
                GROUPING_KEY.to_string(),
                self.collection.grouping.to_string(),
            ),
            (ORDER_KEY.to_string(), self.collection.order.to_string()),
        ]
    }
}

impl PreferenceStore for Config {
    /// Get a config value by dot-notation key
    fn get(&self, key: &str) -> Option<String> {
        match key {
            GROUPING_KEY => Some(self.collection.grouping.to_string()),
            ORDER_KEY => Some(self.collection.order.to_string()),
            _ => None,
        }
    }

    /// Set a config value by dot-notation key
    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            GROUPING_KEY => {
                self.collection.grouping = GroupingRule::from_name(value);
                Ok(())
            }
            ORDER_KEY => {
                self.collection.order =
                    value.parse().map_err(|_| CatalogError::InvalidSetting {
                        key: key.to_string(),
                        value: value.to_string(),
                    })?;
                Ok(())
            }
            _ => Err(CatalogError::ConfigKeyNotFound {
                key: key.to_string(),
            }),
        }
    }
}
