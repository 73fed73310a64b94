//! Sitemap XML documents.
//!
//! # Url-set
//!
//! ```xml
//! <?xml version="1.0" encoding="UTF-8"?>
//! <urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9"
//!         xmlns:xhtml="http://www.w3.org/1999/xhtml"
//!         xmlns:image="http://www.google.com/schemas/sitemap-image/1.1">
//!   <url>
//!     <loc>https://example.com/en/page/about-us</loc>
//!     <lastmod>2025-01-06T00:00:00+00:00</lastmod>
//!     <xhtml:link rel="alternate" hreflang="fr" href="https://example.com/fr/page/a-propos"/>
//!   </url>
//! </urlset>
//! ```
//!
//! # Index
//!
//! ```xml
//! <?xml version="1.0" encoding="UTF-8"?>
//! <sitemapindex xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">
//!   <sitemap>
//!     <loc>https://example.com/sitemaps/static-en.xml</loc>
//!   </sitemap>
//! </sitemapindex>
//! ```

use crate::utils::{
    date::{self, Timestamp},
    xml::{
        XmlWriter, create_xml_writer, finish, write_declaration, write_empty_elem,
        write_end_elem, write_start_elem, write_text_element,
    },
};
use anyhow::Result;

// ============================================================================
// Constants
// ============================================================================

const SITEMAP_NS: &str = "http://www.sitemaps.org/schemas/sitemap/0.9";
const XHTML_NS: &str = "http://www.w3.org/1999/xhtml";
const IMAGE_NS: &str = "http://www.google.com/schemas/sitemap-image/1.1";

/// Anything the writer can publish.
pub trait XmlDocument {
    fn render(&self) -> Result<String>;
}

// ============================================================================
// Url-set
// ============================================================================

/// Same content in another locale.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alternate {
    pub hreflang: String,
    pub href: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Image {
    pub loc: String,
    pub title: Option<String>,
}

/// One canonical URL with its metadata.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UrlEntry {
    pub loc: String,
    pub lastmod: Option<Timestamp>,
    pub alternates: Vec<Alternate>,
    pub image: Option<Image>,
}

impl UrlEntry {
    fn write(&self, writer: &mut XmlWriter) -> Result<()> {
        write_start_elem(writer, "url", &[])?;
        write_text_element(writer, "loc", &self.loc)?;
        if let Some(lastmod) = &self.lastmod {
            write_text_element(writer, "lastmod", &date::to_w3c(lastmod))?;
        }
        for alt in &self.alternates {
            write_empty_elem(
                writer,
                "xhtml:link",
                &[
                    ("rel", "alternate"),
                    ("hreflang", alt.hreflang.as_str()),
                    ("href", alt.href.as_str()),
                ],
            )?;
        }
        if let Some(image) = &self.image {
            write_start_elem(writer, "image:image", &[])?;
            write_text_element(writer, "image:loc", &image.loc)?;
            if let Some(title) = &image.title {
                write_text_element(writer, "image:title", title)?;
            }
            write_end_elem(writer, "image:image")?;
        }
        write_end_elem(writer, "url")
    }
}

/// A leaf sitemap.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UrlSet {
    entries: Vec<UrlEntry>,
}

impl UrlSet {
    pub fn new(entries: Vec<UrlEntry>) -> Self {
        Self { entries }
    }

    #[cfg(test)]
    pub fn entries(&self) -> &[UrlEntry] {
        &self.entries
    }

    /// Latest `lastmod` of all entries.
    pub fn last_modified(&self) -> Option<Timestamp> {
        date::latest(self.entries.iter().map(|e| e.lastmod))
    }
}

impl XmlDocument for UrlSet {
    fn render(&self) -> Result<String> {
        let mut writer = create_xml_writer();
        write_declaration(&mut writer)?;
        write_start_elem(
            &mut writer,
            "urlset",
            &[
                ("xmlns", SITEMAP_NS),
                ("xmlns:xhtml", XHTML_NS),
                ("xmlns:image", IMAGE_NS),
            ],
        )?;
        for entry in &self.entries {
            entry.write(&mut writer)?;
        }
        write_end_elem(&mut writer, "urlset")?;
        finish(writer)
    }
}

// ============================================================================
// Index
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexEntry {
    pub loc: String,
    pub lastmod: Option<Timestamp>,
}

/// Top-level document listing every leaf sitemap.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SitemapIndex {
    entries: Vec<IndexEntry>,
}

impl SitemapIndex {
    pub fn new(entries: Vec<IndexEntry>) -> Self {
        Self { entries }
    }

    #[cfg(test)]
    pub fn entries(&self) -> &[IndexEntry] {
        &self.entries
    }
}

impl XmlDocument for SitemapIndex {
    fn render(&self) -> Result<String> {
        let mut writer = create_xml_writer();
        write_declaration(&mut writer)?;
        write_start_elem(&mut writer, "sitemapindex", &[("xmlns", SITEMAP_NS)])?;
        for entry in &self.entries {
            write_start_elem(&mut writer, "sitemap", &[])?;
            write_text_element(&mut writer, "loc", &entry.loc)?;
            if let Some(lastmod) = &entry.lastmod {
                write_text_element(&mut writer, "lastmod", &date::to_w3c(lastmod))?;
            }
            write_end_elem(&mut writer, "sitemap")?;
        }
        write_end_elem(&mut writer, "sitemapindex")?;
        finish(writer)
    }
}

// ============================================================================
// Tests
// ============================================================================
