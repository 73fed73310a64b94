//! Project initialization.
//!
//! Writes a default `sitemap.toml` and an empty content snapshot.

use crate::{config::SiteConfig, log};
use anyhow::{Context, Result, bail};
use std::{fs, path::Path};

/// Default config filename
const CONFIG_FILE: &str = "sitemap.toml";

/// Snapshot with no pages and no blogs
const EMPTY_SNAPSHOT: &str = "{\n  \"pages\": [],\n  \"blogs\": []\n}\n";

/// Create a new sitemap project at the configured root
pub fn new_project(config: &SiteConfig) -> Result<()> {
    let root = config.get_root();
    let config_path = if config.config_path.as_os_str().is_empty() {
        root.join(CONFIG_FILE)
    } else {
        config.config_path.clone()
    };

    if config_path.exists() {
        bail!(
            "Config file `{}` already exists. Remove it manually or init in a different path.",
            config_path.display()
        );
    }

    fs::create_dir_all(root).with_context(|| format!("Failed to create {}", root.display()))?;
    init_default_config(&config_path)?;
    init_snapshot(&config.data.snapshot)?;

    log!("init"; "created {}", config_path.display());
    Ok(())
}

/// Write default configuration file
fn init_default_config(path: &Path) -> Result<()> {
    let content = toml::to_string_pretty(&SiteConfig::default())?;
    fs::write(path, content).with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(())
}

/// Write an empty snapshot unless one is already there
fn init_snapshot(path: &Path) -> Result<()> {
    if path.exists() {
        log!("init"; "keeping existing {}", path.display());
        return Ok(());
    }

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    fs::write(path, EMPTY_SNAPSHOT).with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sitemap::provider::{SitemapDataProvider, SnapshotDataProvider};

    fn config_at(root: &Path) -> SiteConfig {
        let mut config = SiteConfig::default();
        config.set_root(root);
        config.config_path = root.join(CONFIG_FILE);
        config.data.snapshot = root.join("data/snapshot.json");
        config
    }

    #[test]
    fn test_new_project_writes_config_and_snapshot() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path().join("site");
        let config = config_at(&root);

        new_project(&config).unwrap();

        let loaded = SiteConfig::from_path(&root.join(CONFIG_FILE)).unwrap();
        assert_eq!(loaded.data.locales, vec!["en"]);

        let provider = SnapshotDataProvider::new(&config.data.snapshot, vec!["en".into()]);
        assert!(provider.page_translations().unwrap().is_empty());
        assert!(provider.published_blogs().unwrap().is_empty());
    }

    #[test]
    fn test_new_project_refuses_existing_config() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_at(dir.path());
        fs::write(&config.config_path, "[base]\n").unwrap();

        let err = new_project(&config).unwrap_err();
        assert!(err.to_string().contains("already exists"));
        assert_eq!(fs::read_to_string(&config.config_path).unwrap(), "[base]\n");
    }

    #[test]
    fn test_new_project_keeps_existing_snapshot() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_at(dir.path());
        fs::create_dir_all(dir.path().join("data")).unwrap();
        fs::write(&config.data.snapshot, r#"{"pages": [], "blogs": [{"id": 1}]}"#).unwrap();

        new_project(&config).unwrap();

        let content = fs::read_to_string(&config.data.snapshot).unwrap();
        assert!(content.contains(r#""id": 1"#));
    }
}
