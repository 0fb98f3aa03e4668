//! CLI argument parsing types.
//!
//! This module provides the command-line interface structure for the anapi binary.

use clap::{Parser, Subcommand, ValueEnum};

/// Action Network API command-line interface.
#[derive(Parser, Debug)]
#[command(name = "anapi", about = "Action Network API CLI", version)]
pub struct Cli {
    /// Output results as JSON instead of a table.
    #[arg(long, global = true, default_value = "false")]
    pub json: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Get a single record by id.
    Get {
        /// The type of record to get.
        entity: Entity,

        /// The record id (Action Network UUID).
        id: String,
    },

    /// List every record in a collection, following pagination links.
    List {
        /// The type of record to list.
        entity: Entity,
    },

    /// Search people with an OSDI filter query.
    Search {
        /// Field to match.
        #[arg(long, default_value = "email_address")]
        by: String,

        /// Exact value to search for.
        term: String,
    },

    /// Show the discovered link relations and message of the day.
    Resources,
}

/// Record types that can be operated on.
#[derive(ValueEnum, Clone, Debug, PartialEq, Eq)]
pub enum Entity {
    /// An activist record.
    #[value(alias = "people")]
    Person,
    /// A donation.
    #[value(alias = "donations")]
    Donation,
    /// An organizing tag.
    #[value(alias = "tags")]
    Tag,
}
