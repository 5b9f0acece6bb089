use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use chrono::Datelike;
use clap::{CommandFactory, Parser};
use clap_complete::generate;
use colored::Colorize;

use coin_catalog_core::search::filter_coins;
use coin_catalog_core::{
    CatalogError, Coin, CoinCategory, CoinDraft, Config, FileCollectionStore, GroupingRule,
    Partitioner, PlacementKind, PreferenceStore, Removal, Result, SortDirection, SortSettings,
};

mod args;
use args::{Cli, CoinFields, Commands, ConfigAction, Shell};

type Catalog = Partitioner<FileCollectionStore>;

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logger(cli.verbose, cli.quiet);

    let base_dir = resolve_base_dir(cli.base_dir);

    let result = match cli.command {
        Some(Commands::Add { fields }) => handle_add(&base_dir, fields),
        Some(Commands::List { all }) => handle_list(&base_dir, all),
        Some(Commands::Show { category }) => handle_show(&base_dir, category),
        Some(Commands::Edit {
            category,
            coin,
            fields,
            no_year,
            no_grade,
        }) => handle_edit(&base_dir, category, coin, fields, no_year, no_grade),
        Some(Commands::Remove { category, coin }) => handle_remove(&base_dir, category, coin),
        Some(Commands::Delete { category, force }) => handle_delete(&base_dir, category, force),
        Some(Commands::Move { category, from, to }) => {
            handle_move(&base_dir, category, from, to)
        }
        Some(Commands::Sort { by, order }) => handle_sort(
            &base_dir,
            by.map(Into::into),
            order.map(Into::into),
        ),
        Some(Commands::Search { query }) => handle_search(&base_dir, &query.join(" ")),
        Some(Commands::Export { output }) => handle_export(&base_dir, output.as_deref()),
        Some(Commands::Config { action }) => handle_config(action, &base_dir),
        Some(Commands::Completions { shell }) => {
            handle_completions(shell);
            Ok(())
        }
        None => {
            Cli::command().print_help().ok();
            Ok(())
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {}", "[ERROR]".red().bold(), e);
            ExitCode::from(e.exit_code() as u8)
        }
    }
}

/// `RUST_LOG` wins over the verbosity flags
fn init_logger(verbose: bool, quiet: bool) {
    let level = if verbose {
        log::LevelFilter::Debug
    } else if quiet {
        log::LevelFilter::Error
    } else {
        log::LevelFilter::Warn
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();
}

fn handle_completions(shell: Shell) {
    let mut cmd = Cli::command();
    let shell = match shell {
        Shell::Bash => clap_complete::Shell::Bash,
        Shell::Zsh => clap_complete::Shell::Zsh,
        Shell::Fish => clap_complete::Shell::Fish,
        Shell::PowerShell => clap_complete::Shell::PowerShell,
        Shell::Elvish => clap_complete::Shell::Elvish,
    };
    generate(shell, &mut cmd, "coin-catalog", &mut io::stdout());
}

fn resolve_base_dir(cli_base: Option<PathBuf>) -> PathBuf {
    if let Some(base) = cli_base {
        return base;
    }

    if let Ok(base) = std::env::var("COIN_CATALOG_DIR") {
        return PathBuf::from(base);
    }

    dirs::home_dir()
        .map(|h| h.join(".coin-catalog"))
        .unwrap_or_else(|| PathBuf::from(".coin-catalog"))
}

fn open_catalog(base_dir: &Path, settings: SortSettings) -> Result<Catalog> {
    let store = FileCollectionStore::new(base_dir);
    let categories = store.load()?;
    Ok(Partitioner::with_categories(settings, store, categories))
}

fn open_configured(base_dir: &Path) -> Result<Catalog> {
    let config = Config::load(base_dir)?;
    open_catalog(base_dir, config.settings())
}

fn current_year() -> i32 {
    chrono::Local::now().year()
}

fn category_at(catalog: &Catalog, index: usize) -> Result<&CoinCategory> {
    catalog
        .category(index)
        .ok_or(CatalogError::CategoryNotFound { index })
}

fn coin_at(catalog: &Catalog, category: usize, index: usize) -> Result<&Coin> {
    category_at(catalog, category)?
        .get(index)
        .ok_or(CatalogError::CoinNotFound { category, index })
}

fn read_image(path: Option<&Path>) -> Result<Option<Vec<u8>>> {
    path.map(fs::read).transpose().map_err(Into::into)
}

/// Overlay the given fields onto a draft
fn apply_fields(draft: &mut CoinDraft, fields: CoinFields) -> Result<()> {
    if fields.country.is_some() {
        draft.country = fields.country;
    }
    if fields.mint.is_some() {
        draft.mint = fields.mint;
    }
    if fields.year.is_some() {
        draft.year = fields.year;
    }
    if let Some(era) = fields.era {
        draft.era = Some(era.into());
    }
    if fields.currency.is_some() {
        draft.currency = fields.currency;
    }
    if fields.value.is_some() {
        draft.value = fields.value;
    }
    if fields.grade.is_some() {
        draft.grade = fields.grade;
    }
    if fields.quantity.is_some() {
        draft.quantity = fields.quantity;
    }
    if fields.description.is_some() {
        draft.description = fields.description;
    }
    if fields.comments.is_some() {
        draft.comments = fields.comments;
    }
    if let Some(image) = read_image(fields.obverse.as_deref())? {
        draft.obverse = Some(image);
    }
    if let Some(image) = read_image(fields.reverse.as_deref())? {
        draft.reverse = Some(image);
    }
    Ok(())
}

fn category_heading(category: &CoinCategory) -> String {
    let title = category.title();
    if title.is_empty() {
        category
            .representative()
            .map(Coin::short_summary)
            .unwrap_or_default()
    } else {
        title.join(" / ")
    }
}

fn print_category_line(index: usize, category: &CoinCategory) {
    println!(
        "  {} {} {}",
        format!("[{}]", index).dimmed(),
        category_heading(category).cyan(),
        format!(
            "({} types, {} coins)",
            category.count_types(),
            category.count_units()
        )
        .dimmed()
    );
}

fn print_coin_line(index: usize, coin: &Coin) {
    println!("      {} {}", format!("{}.", index).dimmed(), coin.short_summary());
}

fn handle_add(base_dir: &Path, fields: CoinFields) -> Result<()> {
    let mut draft = CoinDraft::default();
    apply_fields(&mut draft, fields)?;
    let coin = draft.into_coin(current_year())?;

    let mut catalog = open_configured(base_dir)?;
    let placement = catalog.add_coin(coin)?;

    let label = match placement.kind {
        PlacementKind::Merged => "Merged:".yellow(),
        PlacementKind::Created => "Created:".green(),
        PlacementKind::Appended | PlacementKind::Updated => "Added:".green(),
    };
    let category = category_at(&catalog, placement.category)?;
    println!(
        "{} [{}] {}",
        label,
        placement.category,
        category_heading(category)
    );
    Ok(())
}

fn handle_list(base_dir: &Path, all: bool) -> Result<()> {
    let catalog = open_configured(base_dir)?;
    if catalog.is_empty() {
        println!("No coins in the collection.");
        println!();
        println!("Add one with: coin-catalog add --country <COUNTRY> --value <VALUE>");
        return Ok(());
    }

    let settings = catalog.settings();
    println!();
    println!(
        "{} {} ({})",
        "Grouped by:".bold(),
        settings.grouping,
        settings.order
    );
    println!();
    for (index, category) in catalog.categories().iter().enumerate() {
        print_category_line(index, category);
        if all {
            for (i, coin) in category.coins().iter().enumerate() {
                print_coin_line(i, coin);
            }
        }
    }
    println!();
    println!(
        "{} categories, {} types, {} coins",
        catalog.len(),
        catalog.count_types(),
        catalog.count_units()
    );
    Ok(())
}

fn handle_show(base_dir: &Path, index: usize) -> Result<()> {
    let catalog = open_configured(base_dir)?;
    let category = category_at(&catalog, index)?;

    println!();
    println!("{}", category_heading(category).cyan().bold());
    println!();
    for (i, coin) in category.coins().iter().enumerate() {
        println!("{}", format!("[{}]", i).dimmed());
        print!("{}", coin.summary());
        if !coin.images().is_empty() {
            println!("  {} image(s) attached", coin.images().len());
        }
        println!();
    }
    Ok(())
}

fn handle_edit(
    base_dir: &Path,
    category: usize,
    index: usize,
    fields: CoinFields,
    no_year: bool,
    no_grade: bool,
) -> Result<()> {
    let mut catalog = open_configured(base_dir)?;
    let mut draft = CoinDraft::from_coin(coin_at(&catalog, category, index)?);
    apply_fields(&mut draft, fields)?;
    if no_year {
        draft.year = None;
        draft.era = None;
    }
    if no_grade {
        draft.grade = None;
    }
    let edited = draft.into_coin(current_year())?;

    let placement = catalog
        .update_coin(category, index, edited)?
        .ok_or(CatalogError::CoinNotFound { category, index })?;

    match placement.kind {
        PlacementKind::Updated => println!("{} [{}]", "Updated:".green(), placement.category),
        _ => println!(
            "{} [{}] {}",
            "Moved:".yellow(),
            placement.category,
            category_heading(category_at(&catalog, placement.category)?)
        ),
    }
    Ok(())
}

fn handle_remove(base_dir: &Path, category: usize, index: usize) -> Result<()> {
    let mut catalog = open_configured(base_dir)?;
    category_at(&catalog, category)?;

    match catalog.remove_coin_at(category, index)? {
        Removal::NotFound => return Err(CatalogError::CoinNotFound { category, index }),
        Removal::Removed(coin) => {
            println!("{} {}", "Removed:".red(), coin.short_summary());
        }
        Removal::CategoryDeleted(coin) => {
            println!("{} {}", "Removed:".red(), coin.short_summary());
            println!("Category [{}] was empty and has been deleted.", category);
        }
    }
    Ok(())
}

fn handle_delete(base_dir: &Path, index: usize, force: bool) -> Result<()> {
    let mut catalog = open_configured(base_dir)?;
    let category = category_at(&catalog, index)?;

    if !force {
        println!();
        println!(
            "Delete category '{}'? This will remove {} coins.",
            category_heading(category).yellow(),
            category.count_units()
        );
        println!();
        print!("Type 'yes' to confirm: ");
        io::stdout().flush()?;

        let mut input = String::new();
        io::stdin().read_line(&mut input)?;

        if input.trim() != "yes" {
            println!("Aborted.");
            return Ok(());
        }
    }

    if let Some(removed) = catalog.delete_category(index)? {
        println!("{} {}", "Deleted:".red(), category_heading(&removed));
    }
    Ok(())
}

fn handle_move(base_dir: &Path, category: usize, from: usize, to: usize) -> Result<()> {
    let mut catalog = open_configured(base_dir)?;
    coin_at(&catalog, category, from)?;
    coin_at(&catalog, category, to)?;

    if catalog.swap_coins(category, from, to)? {
        println!("{} [{}] {} <-> {}", "Moved:".green(), category, from, to);
    } else {
        println!("Nothing to move.");
    }
    Ok(())
}

fn handle_sort(
    base_dir: &Path,
    by: Option<GroupingRule>,
    order: Option<SortDirection>,
) -> Result<()> {
    let mut config = Config::load(base_dir)?;
    let current = config.settings();
    let settings = SortSettings::new(
        by.unwrap_or(current.grouping),
        order.unwrap_or(current.order),
    );

    apply_settings(base_dir, current, settings)?;
    settings.write_preferences(&mut config)?;
    config.save(base_dir)?;

    println!(
        "{} {} ({})",
        "Sorted:".green(),
        settings.grouping,
        settings.order
    );
    Ok(())
}

/// Rebuild the stored partition when the settings change
fn apply_settings(base_dir: &Path, current: SortSettings, settings: SortSettings) -> Result<()> {
    let mut catalog = open_catalog(base_dir, current)?;
    if catalog.resort(settings)? {
        log::info!(
            "rebuilt {} categories for '{}' {}",
            catalog.len(),
            settings.grouping,
            settings.order
        );
    }
    Ok(())
}

fn handle_search(base_dir: &Path, query: &str) -> Result<()> {
    let catalog = open_configured(base_dir)?;
    let matching: Vec<usize> = catalog.search(query).into_iter().map(|(i, _)| i).collect();
    let mut hits = 0;

    println!();
    for (index, category) in catalog.categories().iter().enumerate() {
        let category_hit = matching.contains(&index);
        let coins = filter_coins(category, query);
        if !category_hit && coins.is_empty() {
            continue;
        }
        hits += 1;
        print_category_line(index, category);
        for (i, coin) in coins {
            print_coin_line(i, coin);
        }
    }

    if hits == 0 {
        println!("No matches for '{}'.", query);
    }
    println!();
    Ok(())
}

fn handle_export(base_dir: &Path, output: Option<&Path>) -> Result<()> {
    let catalog = open_configured(base_dir)?;
    let json = serde_json::to_string_pretty(catalog.categories())?;

    match output {
        Some(path) => {
            fs::write(path, json)?;
            println!("{} {}", "Exported:".green(), path.display());
        }
        None => println!("{}", json),
    }
    Ok(())
}

fn handle_config(action: ConfigAction, base_dir: &Path) -> Result<()> {
    match action {
        ConfigAction::Get { key } => {
            let config = Config::load(base_dir)?;
            match config.get(&key) {
                Some(value) => {
                    println!("{}", value);
                }
                None => {
                    return Err(CatalogError::ConfigKeyNotFound { key });
                }
            }
        }
        ConfigAction::Set { key, value } => {
            let mut config = Config::load(base_dir)?;
            let current = config.settings();
            config.set(&key, &value)?;
            apply_settings(base_dir, current, config.settings())?;
            config.save(base_dir)?;
            println!("{} {} = {}", "Set:".green(), key, value);
        }
        ConfigAction::List => {
            let config = Config::load(base_dir)?;
            println!();
            for (key, value) in config.list() {
                println!("{} = {}", key.cyan(), value);
            }
            println!();
        }
        ConfigAction::Path => {
            let path = Config::path(base_dir);
            println!("{}", path.display());
        }
        ConfigAction::Init => {
            let path = Config::init(base_dir)?;
            println!("{} {}", "Initialized:".green(), path.display());
        }
    }

    Ok(())
}
