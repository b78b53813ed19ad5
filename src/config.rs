//! Configuration management for the formcheck CLI.
//!
//! Handles:
//! - Command-line argument parsing
//! - Schema directory configuration

use anyhow::Result;
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Command-line arguments for formcheck
#[derive(Debug, Parser)]
#[command(name = "formcheck")]
#[command(about = "Validate form data against a declarative schema")]
#[command(version)]
pub struct Args {
    /// Schema to validate against
    #[arg(
        long,
        short,
        help = "Registered schema name (e.g. 'person') or path to a .form.toml/.form.json file"
    )]
    pub schema: String,

    /// Form state to validate
    #[arg(help = "JSON file holding the form state object ('-' for stdin)")]
    pub state: PathBuf,

    /// Restrict validation to these fields
    #[arg(long = "field", short, help = "Only validate this field (repeatable)")]
    pub fields: Vec<String>,

    /// Additional schema directory
    #[arg(long, help = "Directory containing *.form.toml / *.form.json schemas")]
    pub schema_dir: Option<PathBuf>,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Log level
    #[arg(
        long,
        default_value = "warn",
        help = "Log level (trace, debug, info, warn, error)"
    )]
    pub log_level: String,
}

/// How the validation report is printed
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

/// Combined configuration from all sources
#[derive(Debug, Clone)]
pub struct Config {
    pub schema: String,
    pub state_path: PathBuf,
    /// Empty means every schema field
    pub fields: Vec<String>,
    /// Searched in order; later directories override earlier ones
    pub schema_dirs: Vec<PathBuf>,
    pub format: OutputFormat,
    pub log_level: String,
}

impl Config {
    /// Create configuration from command-line arguments
    pub fn from_args_and_env() -> Result<Self> {
        Self::from_args(Args::parse())
    }

    /// Create configuration from explicit arguments (useful for testing)
    pub fn from_args(args: Args) -> Result<Self> {
        let mut schema_dirs = Vec::new();

        // User config directory first, so an explicit directory wins
        if let Some(config_dir) = dirs::config_dir() {
            schema_dirs.push(config_dir.join("formcheck").join("schemas"));
        }

        if let Some(custom_dir) = args.schema_dir {
            schema_dirs.push(custom_dir);
        }

        Ok(Config {
            schema: args.schema,
            state_path: args.state,
            fields: args.fields,
            schema_dirs,
            format: args.format,
            log_level: args.log_level,
        })
    }

    /// `--schema` names a file rather than a registered schema
    pub fn schema_is_path(&self) -> bool {
        self.schema.ends_with(".toml") || self.schema.ends_with(".json")
    }

    /// State is read from stdin
    pub fn reads_stdin(&self) -> bool {
        self.state_path.as_os_str() == "-"
    }
}
