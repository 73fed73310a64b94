//! Build outputs.

use super::document::{SitemapIndex, UrlEntry, UrlSet};
use crate::utils::date::Timestamp;
#[cfg(test)]
use super::document::XmlDocument;
#[cfg(test)]
use anyhow::Result;

/// One leaf sitemap ready for publication.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SitemapFile {
    /// Path relative to the output root, e.g. `sitemaps/pages-en.xml`.
    pub path: String,
    pub document: UrlSet,
    /// Latest `lastmod` of the entries, if any carried one.
    pub last_modified: Option<Timestamp>,
    pub url_count: usize,
}

impl SitemapFile {
    /// Wrap `entries` as a file, or `None` when there is nothing to list.
    pub fn from_entries(path: impl Into<String>, entries: Vec<UrlEntry>) -> Option<Self> {
        if entries.is_empty() {
            return None;
        }

        let url_count = entries.len();
        let document = UrlSet::new(entries);
        Some(Self {
            path: path.into(),
            last_modified: document.last_modified(),
            url_count,
            document,
        })
    }

    #[cfg(test)]
    pub fn render(&self) -> Result<String> {
        self.document.render()
    }
}

/// Everything one `build()` produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SitemapBuildResult {
    pub index: SitemapIndex,
    pub files: Vec<SitemapFile>,
}

impl SitemapBuildResult {
    #[cfg(test)]
    pub fn file(&self, path: &str) -> Option<&SitemapFile> {
        self.files.iter().find(|f| f.path == path)
    }

    pub fn url_count(&self) -> usize {
        self.files.iter().map(|f| f.url_count).sum()
    }
}
