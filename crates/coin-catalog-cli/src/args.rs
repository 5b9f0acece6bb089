use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use coin_catalog_core::{Era, GroupingRule, SortDirection};

#[derive(Parser)]
#[command(name = "coin-catalog")]
#[command(about = "Catalog a coin collection grouped into sorted categories")]
#[command(version)]
pub struct Cli {
    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Quiet output (errors only)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Base directory (default: ~/.coin-catalog)
    #[arg(long, global = true)]
    pub base_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
#[allow(clippy::enum_variant_names)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
    Elvish,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum EraArg {
    Bce,
    Ce,
}

impl From<EraArg> for Era {
    fn from(era: EraArg) -> Self {
        match era {
            EraArg::Bce => Era::Bce,
            EraArg::Ce => Era::Ce,
        }
    }
}

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum GroupingArg {
    /// Country, value and currency
    CountryValue,
    Country,
    /// Country and currency
    Currency,
    Year,
    /// Every coin in its own category
    None,
}

impl From<GroupingArg> for GroupingRule {
    fn from(rule: GroupingArg) -> Self {
        match rule {
            GroupingArg::CountryValue => GroupingRule::ByCountryValueCurrency,
            GroupingArg::Country => GroupingRule::ByCountry,
            GroupingArg::Currency => GroupingRule::ByCurrency,
            GroupingArg::Year => GroupingRule::ByYear,
            GroupingArg::None => GroupingRule::None,
        }
    }
}

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum OrderArg {
    Asc,
    Desc,
}

impl From<OrderArg> for SortDirection {
    fn from(order: OrderArg) -> Self {
        match order {
            OrderArg::Asc => SortDirection::Ascending,
            OrderArg::Desc => SortDirection::Descending,
        }
    }
}

/// Coin fields shared by `add` and `edit`
#[derive(Args, Debug, Default)]
pub struct CoinFields {
    /// Issuing country
    #[arg(short, long)]
    pub country: Option<String>,

    /// Mint mark or mint name
    #[arg(short, long)]
    pub mint: Option<String>,

    /// Year without sign (use --era for BCE)
    #[arg(short, long)]
    pub year: Option<i64>,

    /// Era of the year (default: ce)
    #[arg(long, value_enum)]
    pub era: Option<EraArg>,

    /// Currency name (e.g., "Franc")
    #[arg(long)]
    pub currency: Option<String>,

    /// Face value
    #[arg(long)]
    pub value: Option<f64>,

    /// Sheldon grade (1-70)
    #[arg(short, long)]
    pub grade: Option<i32>,

    /// Number of identical pieces
    #[arg(long)]
    pub quantity: Option<i64>,

    #[arg(long)]
    pub description: Option<String>,

    #[arg(long)]
    pub comments: Option<String>,

    /// Image file of the obverse
    #[arg(long)]
    pub obverse: Option<PathBuf>,

    /// Image file of the reverse
    #[arg(long)]
    pub reverse: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Add a coin to the collection
    Add {
        #[command(flatten)]
        fields: CoinFields,
    },

    /// List categories
    List {
        /// Show every coin under its category
        #[arg(short, long)]
        all: bool,
    },

    /// Show the coins of a category
    Show {
        /// Category position (0-based)
        category: usize,
    },

    /// Edit a coin; unspecified fields keep their value
    Edit {
        /// Category position (0-based)
        category: usize,

        /// Coin position inside the category (0-based)
        coin: usize,

        #[command(flatten)]
        fields: CoinFields,

        /// Clear the year
        #[arg(long, conflicts_with = "year")]
        no_year: bool,

        /// Clear the grade
        #[arg(long, conflicts_with = "grade")]
        no_grade: bool,
    },

    /// Remove a coin
    Remove {
        /// Category position (0-based)
        category: usize,

        /// Coin position inside the category (0-based)
        coin: usize,
    },

    /// Delete a category with all of its coins
    Delete {
        /// Category position (0-based)
        category: usize,

        /// Skip confirmation
        #[arg(short, long)]
        force: bool,
    },

    /// Swap two coins inside a category
    Move {
        /// Category position (0-based)
        category: usize,

        /// First coin position
        from: usize,

        /// Second coin position
        to: usize,
    },

    /// Change grouping and order, then rebuild the categories
    Sort {
        /// Grouping rule
        #[arg(short, long, value_enum)]
        by: Option<GroupingArg>,

        /// Category order
        #[arg(short, long, value_enum)]
        order: Option<OrderArg>,
    },

    /// Search categories and coins
    Search {
        /// Search words; any word may match
        #[arg(required = true)]
        query: Vec<String>,
    },

    /// Export the collection as JSON
    Export {
        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Get a config value
    Get {
        /// Config key (e.g., collection.grouping)
        key: String,
    },

    /// Set a config value
    Set {
        /// Config key (e.g., collection.order)
        key: String,

        /// Value to set (e.g., "Country" or "Descending")
        value: String,
    },

    /// List all config values
    List,

    /// Show config file path
    Path,

    /// Initialize config file with defaults
    Init,
}
