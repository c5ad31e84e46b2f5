//! Command-line interface definitions for newsdesk.
//!
//! This module defines the CLI arguments and options using the `clap` crate.
//! Connection settings can be provided via flags or environment variables and
//! override values from the YAML config file.

use crate::models::Language;
use clap::{Parser, Subcommand};

/// Command-line arguments for the newsdesk application.
///
/// # Examples
///
/// ```sh
/// # Home page view from a local content store
/// newsdesk home
///
/// # Hindi category page, written to a file
/// newsdesk --language hindi -o ./out/sports.json category Sports
///
/// # Archive listing with PDF reachability checks
/// newsdesk --origin https://cms.example.org archive --probe
///
/// # Offline, from a saved snapshot
/// newsdesk --snapshot ./snapshot.json article 42
/// ```
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Content store origin (overrides the config file)
    #[arg(long, env = "NEWSDESK_ORIGIN")]
    pub origin: Option<String>,

    /// Display language: english or hindi (overrides the config file)
    #[arg(short, long, env = "NEWSDESK_LANGUAGE")]
    pub language: Option<Language>,

    /// Optional path to config.yaml file
    #[arg(short, long)]
    pub config: Option<String>,

    /// Read articles and archives from a JSON snapshot instead of the store
    #[arg(long)]
    pub snapshot: Option<String>,

    /// Write the view to this file instead of stdout
    #[arg(short, long)]
    pub output: Option<String>,

    /// Emit localized cards (titles, relative times) instead of raw records
    #[arg(long)]
    pub localized: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Which page view to assemble.
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Home page: top stories and one block per category
    Home,
    /// Category page (exact, case-sensitive name, e.g. "Sports")
    Category { name: String },
    /// Single article with recommendations
    Article { id: u64 },
    /// Archive of print editions
    Archive {
        /// Check each PDF with a HEAD request
        #[arg(long)]
        probe: bool,
    },
}
