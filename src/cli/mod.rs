//! CLI module - Command-line interface for Cinebot
//!
//! This module provides a structured CLI using clap for argument parsing.

mod commands;

use clap::{Parser, Subcommand};

/// Cinebot - film search with per-user history and view stats
#[derive(Parser)]
#[command(name = "cinebot")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the HTTP API server
    #[command(alias = "daemon")]
    Serve,

    /// Search films by keyword and record the query
    #[command(alias = "s")]
    Search {
        /// User the search is recorded for
        #[arg(long, short)]
        user: i64,
        /// Search query
        #[arg(required = true)]
        query: Vec<String>,
    },

    /// Show details for a film and count the view
    Select {
        /// User the view is counted for
        #[arg(long, short)]
        user: i64,
        /// Film ID or selection token (e.g. 603 or film_603)
        film: String,
    },

    /// Show a user's recent searches
    #[command(alias = "h")]
    History {
        #[arg(long, short)]
        user: i64,
    },

    /// Show a user's most viewed films
    Stats {
        #[arg(long, short)]
        user: i64,
    },

    /// Create default config file
    #[command(alias = "--init")]
    Init,
}

pub use commands::*;
