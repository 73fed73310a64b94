//! Configuration management for `sitemap.toml`.
//!
//! # Sections
//!
//! | Section     | Purpose                                        |
//! |-------------|------------------------------------------------|
//! | `[base]`    | Public base URL                                |
//! | `[sitemap]` | Output directory, index path, chunk size       |
//! | `[data]`    | Content snapshot and available locales         |
//!
//! # Example
//!
//! ```toml
//! [base]
//! url = "https://example.com"
//!
//! [sitemap]
//! output = "public"
//! max_urls = 45000
//!
//! [data]
//! snapshot = "data/snapshot.json"
//! locales = ["en", "fr"]
//! ```

mod base;
pub mod defaults;
mod error;
mod handle;
mod sitemap;

use base::BaseConfig;
use error::ConfigError;
use sitemap::{DataConfig, SitemapConfig};

pub use handle::{cfg, init_config};

use crate::cli::{Cli, Commands};
use anyhow::{Result, bail};
use educe::Educe;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

// ============================================================================
// Root Configuration
// ============================================================================

/// Root configuration structure representing sitemap.toml
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(deny_unknown_fields)]
pub struct SiteConfig {
    /// CLI arguments reference
    #[serde(skip)]
    pub cli: Option<&'static Cli>,

    /// Absolute path to the config file (set after loading)
    #[serde(skip)]
    pub config_path: PathBuf,

    /// Project root (set after loading)
    #[serde(skip)]
    pub root: Option<PathBuf>,

    /// Public site identity
    #[serde(default)]
    pub base: BaseConfig,

    /// Output settings
    #[serde(default)]
    pub sitemap: SitemapConfig,

    /// Content source settings
    #[serde(default)]
    pub data: DataConfig,
}

impl SiteConfig {
    /// Parse configuration from TOML string
    pub fn from_str(content: &str) -> Result<Self> {
        let config: SiteConfig = toml::from_str(content).map_err(ConfigError::from)?;
        Ok(config)
    }

    /// Load configuration from file path
    pub fn from_path(path: &Path) -> Result<Self> {
        let content =
            fs::read_to_string(path).map_err(|err| ConfigError::Io(path.to_path_buf(), err))?;
        Self::from_str(&content)
    }

    /// Get the root directory path
    pub fn get_root(&self) -> &Path {
        self.root.as_deref().unwrap_or(Path::new("./"))
    }

    /// Set the root directory path
    pub fn set_root(&mut self, path: &Path) {
        self.root = Some(path.to_path_buf());
    }

    /// Absolute path of the published index document.
    pub fn index_path(&self) -> PathBuf {
        self.sitemap.output.join(&self.sitemap.index)
    }

    /// Update configuration with CLI arguments
    pub fn update_with_cli(&mut self, cli: &'static Cli) {
        self.cli = Some(cli);

        let base = cli
            .root
            .as_ref()
            .cloned()
            .unwrap_or_else(|| self.get_root().to_owned());
        let root = match &cli.command {
            Commands::Init { name: Some(name) } => base.join(name),
            _ => base,
        };

        Self::update_option(&mut self.sitemap.output, cli.output.as_ref());

        if let Commands::Generate { args } = &cli.command {
            if args.base_url.is_some() {
                self.base.url = args.base_url.clone();
            }
            Self::update_option(&mut self.sitemap.max_urls, args.max_urls.as_ref());
            Self::update_option(&mut self.sitemap.minify, args.minify.as_ref());
            Self::update_option(&mut self.data.snapshot, args.data.as_ref());
        }

        self.update_path_with_root(&root, &cli.config);
    }

    /// Update config option if CLI value is provided
    fn update_option<T: Clone>(config_option: &mut T, cli_option: Option<&T>) {
        if let Some(option) = cli_option {
            *config_option = option.clone();
        }
    }

    /// Update all paths relative to root directory and normalize to absolute paths
    fn update_path_with_root(&mut self, root: &Path, config: &Path) {
        let root = Self::normalize_path(root);
        self.set_root(&root);

        self.config_path = Self::normalize_path(&root.join(config));
        self.sitemap.output = Self::resolve(&root, &self.sitemap.output);
        self.data.snapshot = Self::resolve(&root, &self.data.snapshot);
    }

    /// Resolve a configured path against root, with tilde expansion
    fn resolve(root: &Path, path: &Path) -> PathBuf {
        let expanded = PathBuf::from(shellexpand::tilde(&path.to_string_lossy()).into_owned());
        if expanded.is_relative() {
            Self::normalize_path(&root.join(expanded))
        } else {
            Self::normalize_path(&expanded)
        }
    }

    /// Normalize a path to absolute, using canonicalize if the path exists
    fn normalize_path(path: &Path) -> PathBuf {
        path.canonicalize().unwrap_or_else(|_| {
            // For non-existent paths, manually make them absolute
            if path.is_absolute() {
                path.to_path_buf()
            } else {
                std::env::current_dir()
                    .map(|cwd| cwd.join(path))
                    .unwrap_or_else(|_| path.to_path_buf())
            }
        })
    }

    /// Validate configuration for the current command
    pub fn validate(&self) -> Result<()> {
        if let Some(base_url) = &self.base.url
            && !base_url.is_empty()
            && !(base_url.starts_with("http://") || base_url.starts_with("https://"))
        {
            bail!(ConfigError::Validation(
                "[base.url] must start with http:// or https://".into()
            ));
        }

        if self.data.locales.iter().any(|locale| locale.trim().is_empty()) {
            bail!(ConfigError::Validation(
                "[data.locales] must not contain empty locales".into()
            ));
        }

        if self.sitemap.index.is_absolute() {
            bail!(ConfigError::Validation(
                "[sitemap.index] must be relative to [sitemap.output]".into()
            ));
        }

        if self.cli.is_some_and(Cli::is_generate) && !self.config_path.exists() {
            bail!("Config file not found");
        }

        Ok(())
    }
}

// ============================================================================
// Tests
// ============================================================================
