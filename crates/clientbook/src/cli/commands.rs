//! CLI command definitions.
//!
//! This module defines the structure of all CLI subcommands.

use std::path::PathBuf;

use clap::{Args, Subcommand, ValueEnum};

use crate::client::Field;

/// Arguments for registering a new client.
#[derive(Debug, Args)]
pub struct AddCommand {
    /// Client name (letters and spaces)
    #[arg(short, long)]
    pub name: String,

    /// Contact email
    #[arg(short, long)]
    pub email: String,

    /// Spanish mobile number, optionally prefixed with +34, 0034 or 34
    #[arg(short, long)]
    pub phone: String,

    /// Six-digit company code
    #[arg(long = "company", value_name = "CODE")]
    pub company_code: String,
}

impl AddCommand {
    /// Field values in form order.
    #[must_use]
    pub fn values(&self) -> [(Field, &str); 4] {
        [
            (Field::Name, self.name.as_str()),
            (Field::Email, self.email.as_str()),
            (Field::Phone, self.phone.as_str()),
            (Field::CompanyCode, self.company_code.as_str()),
        ]
    }
}

/// List command arguments.
#[derive(Debug, Args)]
pub struct ListCommand {
    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    pub format: OutputFormat,
}

/// Arguments for saving changes to the client picked with `edit`.
///
/// Omitted fields keep the value loaded from the transfer slot.
#[derive(Debug, Default, Args)]
pub struct SaveChangesCommand {
    /// New client name
    #[arg(short, long)]
    pub name: Option<String>,

    /// New contact email
    #[arg(short, long)]
    pub email: Option<String>,

    /// New phone number
    #[arg(short, long)]
    pub phone: Option<String>,

    /// New company code
    #[arg(long = "company", value_name = "CODE")]
    pub company_code: Option<String>,
}

impl SaveChangesCommand {
    /// Fields the user asked to change, in form order.
    #[must_use]
    pub fn overrides(&self) -> Vec<(Field, &str)> {
        [
            (Field::Name, &self.name),
            (Field::Email, &self.email),
            (Field::Phone, &self.phone),
            (Field::CompanyCode, &self.company_code),
        ]
        .into_iter()
        .filter_map(|(field, value)| value.as_deref().map(|v| (field, v)))
        .collect()
    }
}

/// Check command arguments.
#[derive(Debug, Args)]
pub struct CheckCommand {
    /// Field whose validator to run
    #[arg(value_enum)]
    pub field: FieldArg,

    /// Value to check
    pub value: String,
}

/// Configuration commands.
#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration
    Show {
        /// Output as JSON
        #[arg(short, long)]
        json: bool,
    },

    /// Show the configuration file path
    Path,

    /// Validate configuration
    Validate {
        /// Path to configuration file to validate
        #[arg(short, long)]
        file: Option<PathBuf>,
    },
}

/// Form field argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum FieldArg {
    /// Client name
    Name,
    /// Contact email
    Email,
    /// Phone number
    Phone,
    /// Company code
    #[value(alias = "company_code")]
    Company,
}

impl From<FieldArg> for Field {
    fn from(arg: FieldArg) -> Self {
        match arg {
            FieldArg::Name => Self::Name,
            FieldArg::Email => Self::Email,
            FieldArg::Phone => Self::Phone,
            FieldArg::Company => Self::CompanyCode,
        }
    }
}

/// Output format for commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Plain text output
    Plain,
    /// Formatted table
    #[default]
    Table,
    /// JSON output
    Json,
}
