// CLI Layer
// ユーザー入力の受付とコマンドルーティング

pub mod commands;

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// 出力フォーマット
#[derive(Clone, Debug, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text output (default)
    #[default]
    Text,
    /// Structured JSON output
    Json,
}

/// Schemadiff - Database Schema Comparison CLI
///
/// Parse schema definitions written in different formats into one canonical
/// representation and report their structural differences.
#[derive(Parser, Debug)]
#[command(name = "schemadiff")]
#[command(author = "Schemadiff Contributors")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Database schema comparison CLI tool")]
#[command(long_about = "Schemadiff - Database Schema Comparison CLI

Parse schema definitions written in different formats into one canonical
representation and report their structural differences.

Schemadiff helps you:
  • Compare a PostgreSQL DDL schema against a DBML schema
  • Spot columns, indexes and constraints missing on either side
  • Inspect the canonical representation of a single schema file

Supported formats: postgresql, dbml")]
#[command(propagate_version = true)]
#[command(after_help = "EXAMPLES:
  # Compare a DDL schema against a DBML schema
  schemadiff diff postgresql schema.sql dbml schema.dbml

  # Inspect the canonical representation of one file
  schemadiff parse dbml schema.dbml

For detailed help on each command, use: schemadiff <command> --help")]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Output format (text or json)
    #[arg(id = "output_format", long = "format", global = true, value_enum, default_value = "text")]
    pub format: OutputFormat,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Compare two schema definition files
    ///
    /// Parses both inputs into the canonical schema representation and
    /// reports every table, column, index and constraint that is missing
    /// on one side or structurally different between the two.
    ///
    /// EXAMPLES:
    ///   schemadiff diff postgresql old.sql postgresql new.sql
    ///   schemadiff diff postgresql schema.sql dbml schema.dbml
    Diff {
        /// Format of the first schema file (postgresql, dbml)
        format1: String,

        /// Path to the first schema file
        file1: PathBuf,

        /// Format of the second schema file (postgresql, dbml)
        format2: String,

        /// Path to the second schema file
        file2: PathBuf,
    },

    /// Parse a schema definition file and print its canonical representation
    ///
    /// Useful for inspecting exactly what the comparison operates on.
    ///
    /// EXAMPLES:
    ///   schemadiff parse dbml schema.dbml
    ///   schemadiff parse postgresql schema.sql --format json
    Parse {
        /// Format of the schema file (postgresql, dbml)
        format: String,

        /// Path to the schema file
        file: PathBuf,
    },
}
