//! Promolist CLI application entry point
//!
//! Builds a promotion's product list from the catalog, with discounts and
//! a user-chosen order.
//!
//! # Usage
//!
//! ```bash
//! # Open the interactive editor (default command)
//! promolist
//! promolist edit
//!
//! # Try it without an API key
//! promolist --mock
//!
//! # Query the catalog directly
//! promolist search shirt --limit 5
//! promolist search --exclude 77 80 --json
//!
//! # Inspect configuration
//! promolist config path
//! promolist config show
//! ```
//!
//! # Configuration
//!
//! Configuration is stored in the user's config directory
//! (`~/.config/promolist/config.toml` on Linux) and created with defaults on
//! first run. Set the catalog key with `catalog.api_key` or
//! `PROMOLIST_CATALOG__API_KEY`.

use colored::Colorize;
use promolist::{
    PromoError,
    catalog::{Catalog, HttpCatalog, MockCatalog, ProductId, exclude_listed},
    cli::{Cli, Commands, ConfigCommands},
    config::PromoConfig,
    editor::PromoEditor,
    logging::{self, LogTarget},
    output,
    ui::EditorApp,
};
use std::collections::HashSet;
use std::path::Path;
use std::sync::Arc;
use tokio::runtime::Runtime;
use tracing::info;

type Result<T> = std::result::Result<T, PromoError>;

/// Pick the catalog backend named by the configuration
fn build_catalog(config: &PromoConfig) -> Result<Arc<dyn Catalog>> {
    if config.catalog.use_mock {
        info!("using bundled demo catalog");
        return Ok(Arc::new(MockCatalog::demo()));
    }
    let catalog = HttpCatalog::new(
        &config.catalog.base_url,
        config.catalog.api_key.clone(),
        config.catalog.timeout(),
    )?;
    Ok(Arc::new(catalog))
}

fn build_runtime() -> Result<Runtime> {
    Ok(tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?)
}

fn handle_edit_command(config: &PromoConfig, quiet: bool) -> Result<()> {
    let catalog = build_catalog(config)?;
    let runtime = build_runtime()?;
    let app = EditorApp::new(catalog, runtime.handle().clone(), config.picker.clone());

    let list = app.run(PromoEditor::new(config.catalog.page_size))?;
    info!(lines = list.len(), "editor closed");

    if !quiet {
        println!("{}", serde_json::to_string_pretty(list.lines())?);
    }
    Ok(())
}

fn handle_search_command(
    config: &PromoConfig,
    query: &str,
    page: u32,
    limit: Option<u32>,
    exclude: &[ProductId],
    json: bool,
    quiet: bool,
) -> Result<()> {
    let limit = limit.unwrap_or(config.catalog.page_size);
    if limit == 0 {
        return Err(PromoError::InvalidInput("--limit must be at least 1".into()));
    }

    let catalog = build_catalog(config)?;
    let runtime = build_runtime()?;
    let products = runtime.block_on(catalog.search(query, page, limit))?;
    let has_more = products.len() == limit as usize;

    let excluded: HashSet<ProductId> = exclude.iter().copied().collect();
    let products = exclude_listed(products, &excluded);

    if json {
        println!("{}", serde_json::to_string_pretty(&products)?);
        return Ok(());
    }

    for line in output::product_page(&products, quiet) {
        println!("{line}");
    }
    if !quiet {
        println!("{}", output::page_summary(products.len(), page, has_more).dimmed());
    }
    Ok(())
}

fn handle_config_command(config: &PromoConfig, path: &Path, command: &ConfigCommands) -> Result<()> {
    match command {
        ConfigCommands::Path => println!("{}", path.display()),
        ConfigCommands::Show => print!("{}", config.to_toml()?),
    }
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse_args();

    let config_path = match &cli.config {
        Some(path) => path.clone(),
        None => PromoConfig::config_path()?,
    };
    let mut config = PromoConfig::load_from(&config_path)?;
    if cli.mock {
        config.catalog.use_mock = true;
    }

    let quiet = cli.quiet;
    let command = cli.get_command();

    // the editor owns the terminal, so its logs go to a file
    let (level, target) = if command.is_interactive() {
        (config.log.level.as_str(), LogTarget::default_file())
    } else if quiet {
        ("error", LogTarget::Stderr)
    } else {
        (config.log.level.as_str(), LogTarget::Stderr)
    };
    let _log_guard = logging::init(level, &target)?;

    match &command {
        Commands::Edit => handle_edit_command(&config, quiet),
        Commands::Search {
            query,
            page,
            limit,
            exclude,
            json,
        } => handle_search_command(&config, query, *page, *limit, exclude, *json, quiet),
        Commands::Config { command } => handle_config_command(&config, &config_path, command),
    }
}
