//! rental-sitemap - public sitemap generator for the rental marketplace.

mod check;
mod cli;
mod config;
mod generate;
mod init;
mod logger;
mod sitemap;
mod utils;

use anyhow::{Result, bail};
use check::check_urls;
use clap::Parser;
use cli::{Cli, Commands};
use config::{SiteConfig, init_config};
use generate::generate_sitemaps;
use init::new_project;
use std::path::Path;

fn main() -> Result<()> {
    let cli: &'static Cli = Box::leak(Box::new(Cli::parse()));
    let config = load_config(cli)?;
    init_config(config.clone());

    match &cli.command {
        Commands::Init { .. } => new_project(&config),
        Commands::Generate { .. } => generate_sitemaps(&config).map(|_| ()),
        Commands::Check { urls } => check_urls(urls),
    }
}

/// Load and validate configuration from CLI arguments
fn load_config(cli: &'static Cli) -> Result<SiteConfig> {
    let root = cli.root.as_deref().unwrap_or(Path::new("./"));
    let config_path = root.join(&cli.config);

    let mut config = if config_path.exists() {
        SiteConfig::from_path(&config_path)?
    } else {
        SiteConfig::default()
    };
    config.update_with_cli(cli);

    // `check` only needs the policy, so it runs without a config file
    let config_exists = config.config_path.exists();
    match (cli.is_init(), config_exists) {
        (true, true) => {
            bail!("Config file already exists. Remove it manually or init in a different path.")
        }
        (false, false) if !cli.is_check() => bail!("Config file not found."),
        _ => {}
    }

    if !cli.is_init() {
        config.validate()?;
    }

    Ok(config)
}
