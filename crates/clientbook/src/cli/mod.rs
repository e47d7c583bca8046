//! Command-line interface for clientbook.
//!
//! This module provides the CLI structure for the `clientbook` binary. Each
//! subcommand maps onto one user action of the client book.

mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

pub use commands::{
    AddCommand, CheckCommand, ConfigCommand, FieldArg, ListCommand, OutputFormat,
    SaveChangesCommand,
};

/// clientbook - Keep a validated list of your clients
///
/// Registers clients with a name, email, Spanish phone number and six-digit
/// company code, and lets you list, edit and delete them.
#[derive(Debug, Parser)]
#[command(name = "clientbook")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to custom configuration file
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Increase verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// The command to execute
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Register a new client
    Add(AddCommand),

    /// List all clients
    List(ListCommand),

    /// Show one client
    Show {
        /// Client id
        id: i64,
    },

    /// Pick a client for editing
    Edit {
        /// Client id
        id: i64,
    },

    /// Save changes to the client picked with `edit`
    SaveChanges(SaveChangesCommand),

    /// Delete a client
    Delete {
        /// Client id
        id: i64,
    },

    /// Check a value against a field's validator
    Check(CheckCommand),

    /// View or validate configuration
    #[command(subcommand)]
    Config(ConfigCommand),
}

impl Cli {
    /// Get the verbosity level based on flags.
    #[must_use]
    pub fn verbosity(&self) -> crate::logging::Verbosity {
        crate::logging::Verbosity::from_flags(self.quiet, self.verbose)
    }
}
