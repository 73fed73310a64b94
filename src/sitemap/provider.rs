//! Content sources for the sitemap builder.
//!
//! The builder only sees [`SitemapDataProvider`]. Production runs use
//! [`SnapshotDataProvider`], which reads a JSON export of the marketplace
//! content tables:
//!
//! ```json
//! {
//!   "pages": [
//!     { "page_id": 1, "locale": "en", "slug": "about-us",
//!       "updated_at": "2025-01-02 09:00:00", "page_updated_at": "2025-01-01" }
//!   ],
//!   "blogs": [
//!     { "id": 1, "image": "https://cdn.example.com/a.jpg", "countries": ["us", "be"],
//!       "is_published": true, "updated_at": "2025-01-05T10:00:00Z",
//!       "translations": [
//!         { "locale": "en", "slug": "hello-world", "title": "Hello World", "updated_at": null }
//!       ] }
//!   ]
//! }
//! ```

use super::error::SitemapError;
use crate::{
    config::SiteConfig,
    utils::date::{self, Timestamp},
};
use anyhow::Result;
use serde::{Deserialize, Deserializer};
use std::{cell::OnceCell, fs, path::PathBuf};

// ============================================================================
// Content Rows
// ============================================================================

/// One localized slug of a static content page.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PageTranslationRow {
    pub page_id: u64,
    pub locale: String,
    pub slug: String,
    #[serde(default, deserialize_with = "date::deserialize_optional")]
    pub updated_at: Option<Timestamp>,
    #[serde(default, deserialize_with = "date::deserialize_optional")]
    pub page_updated_at: Option<Timestamp>,
}

/// A published blog post with all of its translations.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct BlogPost {
    pub id: u64,
    #[serde(default)]
    pub image: Option<String>,
    /// Two-letter country codes; `None` means visible everywhere.
    #[serde(default)]
    pub countries: Option<Vec<String>>,
    #[serde(default, deserialize_with = "date::deserialize_optional")]
    pub updated_at: Option<Timestamp>,
    #[serde(default)]
    pub translations: Vec<BlogTranslation>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct BlogTranslation {
    #[serde(default, deserialize_with = "null_as_default")]
    pub locale: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub slug: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "date::deserialize_optional")]
    pub updated_at: Option<Timestamp>,
}

impl BlogPost {
    /// Whether the post is listed under `country` (case-insensitive).
    pub fn is_visible_in(&self, country: &str) -> bool {
        match &self.countries {
            None => true,
            Some(countries) => countries.iter().any(|c| c.eq_ignore_ascii_case(country)),
        }
    }

    /// First translation for `locale`, if any.
    pub fn translation(&self, locale: &str) -> Option<&BlogTranslation> {
        self.translations.iter().find(|t| t.locale == locale)
    }
}

// ============================================================================
// Provider Contract
// ============================================================================

/// Read-only access to the content the public sitemaps are built from.
pub trait SitemapDataProvider {
    /// Available locales, in output order.
    fn locales(&self) -> Result<Vec<String>>;

    fn page_translations(&self) -> Result<Vec<PageTranslationRow>>;

    fn published_blogs(&self) -> Result<Vec<BlogPost>>;
}

// ============================================================================
// Snapshot Provider
// ============================================================================

/// Provider backed by a JSON content snapshot plus configured locales.
///
/// The snapshot is read on first access and reused for the remaining calls,
/// so one build sees one consistent view of the file.
#[derive(Debug)]
pub struct SnapshotDataProvider {
    path: PathBuf,
    locales: Vec<String>,
    snapshot: OnceCell<Snapshot>,
}

#[derive(Debug, Default, Deserialize)]
struct Snapshot {
    #[serde(default)]
    pages: Vec<SnapshotPage>,
    #[serde(default)]
    blogs: Vec<SnapshotBlog>,
}

/// Page row as exported; rows without a slug are dropped.
#[derive(Debug, Deserialize)]
struct SnapshotPage {
    page_id: u64,
    locale: String,
    #[serde(default)]
    slug: Option<String>,
    #[serde(default, deserialize_with = "date::deserialize_optional")]
    updated_at: Option<Timestamp>,
    #[serde(default, deserialize_with = "date::deserialize_optional")]
    page_updated_at: Option<Timestamp>,
}

#[derive(Debug, Deserialize)]
struct SnapshotBlog {
    #[serde(default = "published")]
    is_published: bool,
    #[serde(flatten)]
    post: BlogPost,
}

fn published() -> bool {
    true
}

impl SnapshotDataProvider {
    pub fn new(path: impl Into<PathBuf>, locales: Vec<String>) -> Self {
        Self {
            path: path.into(),
            locales,
            snapshot: OnceCell::new(),
        }
    }

    pub fn from_config(config: &SiteConfig) -> Self {
        Self::new(&config.data.snapshot, config.data.locales.clone())
    }

    fn snapshot(&self) -> Result<&Snapshot> {
        if let Some(snapshot) = self.snapshot.get() {
            return Ok(snapshot);
        }

        let content = fs::read_to_string(&self.path).map_err(|source| SitemapError::Io {
            path: self.path.clone(),
            source,
        })?;
        let snapshot: Snapshot =
            serde_json::from_str(&content).map_err(|source| SitemapError::Snapshot {
                path: self.path.clone(),
                source,
            })?;

        Ok(self.snapshot.get_or_init(|| snapshot))
    }
}

impl SitemapDataProvider for SnapshotDataProvider {
    fn locales(&self) -> Result<Vec<String>> {
        Ok(self.locales.clone())
    }

    fn page_translations(&self) -> Result<Vec<PageTranslationRow>> {
        let rows = self
            .snapshot()?
            .pages
            .iter()
            .filter_map(|page| {
                Some(PageTranslationRow {
                    page_id: page.page_id,
                    locale: page.locale.clone(),
                    slug: page.slug.clone()?,
                    updated_at: page.updated_at,
                    page_updated_at: page.page_updated_at,
                })
            })
            .collect();
        Ok(rows)
    }

    fn published_blogs(&self) -> Result<Vec<BlogPost>> {
        let blogs = self
            .snapshot()?
            .blogs
            .iter()
            .filter(|blog| blog.is_published)
            .map(|blog| blog.post.clone())
            .collect();
        Ok(blogs)
    }
}

/// Deserialize `null` as the type's default value.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    const SNAPSHOT: &str = r#"{
        "pages": [
            { "page_id": 1, "locale": "en", "slug": "about-us",
              "updated_at": "2025-01-02", "page_updated_at": "2025-01-01 08:00:00" },
            { "page_id": 1, "locale": "fr", "slug": null,
              "updated_at": "2025-01-03", "page_updated_at": "2025-01-01" }
        ],
        "blogs": [
            { "id": 1, "image": "https://cdn.example.com/1.jpg", "countries": null,
              "updated_at": "2025-01-05T10:00:00Z",
              "translations": [
                  { "locale": "en", "slug": "hello-world", "title": "Hello World", "updated_at": "2025-01-06" },
                  { "locale": "fr", "slug": null, "title": null, "updated_at": null }
              ] },
            { "id": 2, "is_published": false, "translations": [] },
            { "id": 3, "countries": ["US", "be"], "translations": [] }
        ]
    }"#;

    fn write_snapshot(dir: &Path, content: &str) -> PathBuf {
        let path = dir.join("snapshot.json");
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_snapshot_pages_drop_null_slugs() {
        let dir = tempfile::tempdir().unwrap();
        let provider = SnapshotDataProvider::new(write_snapshot(dir.path(), SNAPSHOT), vec![]);

        let rows = provider.page_translations().unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].slug, "about-us");
        assert_eq!(rows[0].updated_at, date::parse("2025-01-02"));
        assert_eq!(rows[0].page_updated_at, date::parse("2025-01-01 08:00:00"));
    }

    #[test]
    fn test_snapshot_blogs_skip_unpublished() {
        let dir = tempfile::tempdir().unwrap();
        let provider = SnapshotDataProvider::new(write_snapshot(dir.path(), SNAPSHOT), vec![]);

        let blogs = provider.published_blogs().unwrap();
        let ids: Vec<_> = blogs.iter().map(|b| b.id).collect();
        assert_eq!(ids, vec![1, 3]);

        let first = &blogs[0];
        assert_eq!(first.countries, None);
        assert_eq!(first.translations[1].slug, "");
        assert_eq!(first.translations[1].title, None);
        assert_eq!(blogs[1].image, None);
    }

    #[test]
    fn test_locales_come_from_config() {
        let provider = SnapshotDataProvider::new("unused.json", vec!["en".into(), "fr".into()]);
        assert_eq!(provider.locales().unwrap(), vec!["en", "fr"]);
    }

    #[test]
    fn test_missing_snapshot_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let provider = SnapshotDataProvider::new(dir.path().join("missing.json"), vec![]);

        let err = provider.page_translations().unwrap_err();
        assert!(matches!(
            err.downcast_ref::<SitemapError>(),
            Some(SitemapError::Io { .. })
        ));
    }

    #[test]
    fn test_malformed_snapshot_is_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_snapshot(dir.path(), r#"{"pages": [{"page_id": "one"}]}"#);
        let provider = SnapshotDataProvider::new(path, vec![]);

        let err = provider.published_blogs().unwrap_err();
        assert!(matches!(
            err.downcast_ref::<SitemapError>(),
            Some(SitemapError::Snapshot { .. })
        ));
    }

    #[test]
    fn test_blog_visibility_is_case_insensitive() {
        let blog = BlogPost {
            id: 1,
            image: None,
            countries: Some(vec!["US".into(), "be".into()]),
            updated_at: None,
            translations: vec![],
        };
        assert!(blog.is_visible_in("us"));
        assert!(blog.is_visible_in("be"));
        assert!(!blog.is_visible_in("fr"));

        let global = BlogPost { countries: None, ..blog.clone() };
        assert!(global.is_visible_in("fr"));

        let hidden = BlogPost { countries: Some(vec![]), ..blog };
        assert!(!hidden.is_visible_in("us"));
    }
}
