//! Command-line interface definitions and parsing
//!
//! # Commands
//!
//! - **edit**: Interactive promotion editor (default)
//! - **search**: Query the product catalog and print one page of results
//! - **config**: Show the active configuration or its file location
//!
//! Global flags select an alternate config file, force the bundled demo
//! catalog, or silence informational output.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Configuration subcommands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum ConfigCommands {
    /// Print the path of the config file in use
    Path,
    /// Print the effective configuration as TOML
    Show,
}

#[derive(Parser, Debug)]
#[command(name = "promolist")]
#[command(about = "Build discounted product lists for a promotion", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Read configuration from this file instead of the default location
    #[arg(long = "config", value_name = "FILE", global = true)]
    pub config: Option<PathBuf>,

    /// Use the bundled demo catalog instead of the remote API
    #[arg(long = "mock", global = true)]
    pub mock: bool,

    /// Suppress informational output (only print results)
    #[arg(short = 'q', long = "quiet", global = true)]
    pub quiet: bool,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Open the interactive promotion editor (default)
    #[command(visible_alias = "e")]
    Edit,

    /// Search the product catalog
    #[command(visible_alias = "s")]
    Search {
        /// Search text (empty lists everything)
        #[arg(value_name = "QUERY", default_value = "")]
        query: String,

        /// Zero-based page number
        #[arg(short = 'p', long = "page", default_value_t = 0)]
        page: u32,

        /// Page size (defaults to `catalog.page_size`)
        #[arg(short = 'l', long = "limit", value_name = "N")]
        limit: Option<u32>,

        /// Hide these product ids from the results
        #[arg(short = 'x', long = "exclude", value_name = "ID", num_args = 0..)]
        exclude: Vec<u64>,

        /// Print the products as JSON
        #[arg(long = "json")]
        json: bool,
    },

    /// Inspect configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

impl Commands {
    /// Whether the command takes over the terminal
    #[must_use]
    pub const fn is_interactive(&self) -> bool {
        matches!(self, Self::Edit)
    }
}

impl Cli {
    /// Parse command line arguments
    #[must_use]
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Get the command, defaulting to Edit if none specified
    #[must_use]
    pub fn get_command(&self) -> Commands {
        self.command.clone().unwrap_or(Commands::Edit)
    }
}
