//! CLI module - Command-line interface for Recipebook
//!
//! This module provides a structured CLI using clap for argument parsing.

mod commands;

use clap::{Parser, Subcommand};

/// Recipebook - recipe and nutrition store
#[derive(Parser)]
#[command(name = "recipebook")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create default config file
    #[command(alias = "--init")]
    Init,

    /// Check the database and show row counts
    #[command(alias = "st")]
    Status,

    /// List registered users
    #[command(alias = "u")]
    Users,

    /// List recipes with their products
    #[command(alias = "r")]
    Recipes {
        /// Only show recipes owned by this user
        #[arg(long)]
        user: Option<i32>,
    },

    /// Delete expired tokens
    PruneTokens,
}

pub use commands::*;
