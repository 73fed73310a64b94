//! Command-line interface definitions.
//!
//! Defines all CLI arguments and subcommands using clap.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Public sitemap generator CLI
#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None, arg_required_else_help = true)]
pub struct Cli {
    /// Project root directory (default: current directory)
    #[arg(short, long)]
    pub root: Option<PathBuf>,

    /// Output directory path (relative to project root)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Config file name (default: sitemap.toml)
    #[arg(short = 'C', long, default_value = "sitemap.toml")]
    pub config: PathBuf,

    /// subcommands
    #[command(subcommand)]
    pub command: Commands,
}

/// Arguments for the `generate` command
#[derive(clap::Args, Debug, Clone, Default)]
pub struct GenerateArgs {
    /// Override the public base URL.
    ///
    /// Useful when the same content snapshot is published to a staging host:
    ///   rental-sitemap generate --base-url "https://staging.example.com"
    #[arg(long = "base-url")]
    pub base_url: Option<String>,

    /// Maximum number of URLs per generated sitemap file
    #[arg(long = "max-urls")]
    pub max_urls: Option<usize>,

    /// Minify the generated xml
    #[arg(short, long, action = clap::ArgAction::Set, num_args = 0..=1, default_missing_value = "true", require_equals = false)]
    pub minify: Option<bool>,

    /// Content snapshot file (relative to project root)
    #[arg(short, long)]
    pub data: Option<PathBuf>,
}

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Write a default config and an empty content snapshot
    Init {
        /// the name(path) of project directory, related to `root`
        name: Option<PathBuf>,
    },

    /// Build every public sitemap and publish them atomically
    Generate {
        #[command(flatten)]
        args: GenerateArgs,
    },

    /// Check URLs against the public sitemap policy
    Check {
        /// URLs (or paths) to check
        #[arg(required = true)]
        urls: Vec<String>,
    },
}

impl Cli {
    pub const fn is_init(&self) -> bool {
        matches!(self.command, Commands::Init { .. })
    }
    pub const fn is_generate(&self) -> bool {
        matches!(self.command, Commands::Generate { .. })
    }
    pub const fn is_check(&self) -> bool {
        matches!(self.command, Commands::Check { .. })
    }
}
