//! Sitemap generation orchestration.
//!
//! # Flow
//!
//! ```text
//! generate_sitemaps()
//!     │
//!     ├── SnapshotDataProvider::from_config()
//!     │
//!     ├── PublicSitemapBuilder::build()  ──► abort on any error, nothing written
//!     │
//!     ├── write every leaf file          ──► output/sitemaps/*.xml
//!     │
//!     └── write the index last           ──► output/sitemap.xml
//! ```
//!
//! The index goes out after the files it references, so crawlers following
//! a fresh index never hit a missing file.

use crate::{
    config::SiteConfig,
    log,
    logger::ProgressBars,
    sitemap::{AtomicSitemapWriter, PublicSitemapBuilder, SitemapUrlPolicy, SnapshotDataProvider},
};
use anyhow::Result;

/// Build and publish every public sitemap. Returns the number of leaf files.
pub fn generate_sitemaps(config: &SiteConfig) -> Result<usize> {
    let provider = SnapshotDataProvider::from_config(config);
    let builder = PublicSitemapBuilder::new(
        provider,
        SitemapUrlPolicy::new(),
        config.base.url.as_deref(),
        config.sitemap.max_urls,
    )?;

    log!(
        "sitemap";
        "building for {} ({} urls per file)",
        builder.base_url(),
        builder.max_urls_per_sitemap()
    );
    let result = builder.build()?;
    log!(
        "sitemap";
        "{} urls in {} files",
        result.url_count(),
        result.files.len()
    );

    let writer = AtomicSitemapWriter::new(config.sitemap.minify);
    let output = &config.sitemap.output;

    let progress = ProgressBars::new_filtered(&[("publish", result.files.len() + 1)]);
    for file in &result.files {
        writer.write(&file.document, &output.join(&file.path))?;
        if let Some(progress) = &progress {
            progress.inc(0);
        }
    }

    let index_path = config.index_path();
    writer.write(&result.index, &index_path)?;
    if let Some(progress) = &progress {
        progress.inc(0);
        progress.finish();
    }

    log!(
        "publish";
        "files: {} + {}",
        result.files.len(),
        config.sitemap.index.display()
    );
    Ok(result.files.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sitemap::error::SitemapError;
    use std::{fs, path::Path};

    const SNAPSHOT: &str = r#"{
        "pages": [
            { "page_id": 1, "locale": "en", "slug": "about-us", "updated_at": "2025-01-02" },
            { "page_id": 1, "locale": "fr", "slug": "a-propos", "updated_at": null }
        ],
        "blogs": [
            { "id": 1, "countries": null, "updated_at": "2025-01-05",
              "translations": [
                  { "locale": "en", "slug": "hello-world", "title": "Hello World" },
                  { "locale": "fr", "slug": "bonjour" }
              ] }
        ]
    }"#;

    fn config_for(root: &Path, snapshot: &str) -> SiteConfig {
        let snapshot_path = root.join("data/snapshot.json");
        fs::create_dir_all(snapshot_path.parent().unwrap()).unwrap();
        fs::write(&snapshot_path, snapshot).unwrap();

        let mut config = SiteConfig::default();
        config.base.url = Some("https://example.com/".into());
        config.sitemap.output = root.join("public");
        config.data.snapshot = snapshot_path;
        config.data.locales = vec!["en".into(), "fr".into()];
        config
    }

    #[test]
    fn test_generate_publishes_files_and_index() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_for(dir.path(), SNAPSHOT);

        let count = generate_sitemaps(&config).unwrap();
        assert_eq!(count, 8);

        let public = dir.path().join("public");
        for name in [
            "static-en.xml",
            "static-fr.xml",
            "pages-en.xml",
            "pages-fr.xml",
            "blog-listings-en.xml",
            "blog-listings-fr.xml",
            "blogs-en-us-1.xml",
            "blogs-fr-us-1.xml",
        ] {
            assert!(public.join("sitemaps").join(name).is_file(), "{name}");
            assert!(!public.join("sitemaps").join(format!("{name}.tmp")).exists());
        }

        let index = fs::read_to_string(public.join("sitemap.xml")).unwrap();
        assert!(index.contains("<loc>https://example.com/sitemaps/blogs-fr-us-1.xml</loc>"));

        let pages = fs::read_to_string(public.join("sitemaps/pages-en.xml")).unwrap();
        assert!(pages.contains("<loc>https://example.com/en/page/about-us</loc>"));
        assert!(pages.contains(r#"hreflang="fr" href="https://example.com/fr/page/a-propos""#));
    }

    #[test]
    fn test_generate_respects_minify_and_index_name() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = config_for(dir.path(), SNAPSHOT);
        config.sitemap.minify = true;
        config.sitemap.index = "sitemap_index.xml".into();

        generate_sitemaps(&config).unwrap();

        let index = fs::read_to_string(dir.path().join("public/sitemap_index.xml")).unwrap();
        assert!(!index.contains('\n'));
    }

    #[test]
    fn test_blocked_url_publishes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let snapshot = r#"{
            "pages": [ { "page_id": 1, "locale": "en", "slug": "../admin/secret" } ],
            "blogs": []
        }"#;
        let config = config_for(dir.path(), snapshot);

        let err = generate_sitemaps(&config).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<SitemapError>(),
            Some(SitemapError::BlockedUrl { .. })
        ));
        assert!(!dir.path().join("public").exists());
    }

    #[test]
    fn test_missing_snapshot_fails() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = config_for(dir.path(), SNAPSHOT);
        config.data.snapshot = dir.path().join("missing.json");

        assert!(generate_sitemaps(&config).is_err());
    }
}
