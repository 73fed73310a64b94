//! `[sitemap]` and `[data]` section configuration.

use super::defaults;
use educe::Educe;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// `[sitemap]` section in sitemap.toml - output settings.
///
/// # Example
/// ```toml
/// [sitemap]
/// output = "public"        # Publication root
/// index = "sitemap.xml"    # Index path, relative to output
/// max_urls = 45000         # URLs per leaf file
/// minify = false
/// ```
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(deny_unknown_fields)]
pub struct SitemapConfig {
    /// Directory the sitemap tree is published into.
    #[serde(default = "defaults::sitemap::output")]
    #[educe(Default = defaults::sitemap::output())]
    pub output: PathBuf,

    /// Index document path, relative to `output`.
    #[serde(default = "defaults::sitemap::index")]
    #[educe(Default = defaults::sitemap::index())]
    pub index: PathBuf,

    /// Maximum URLs per leaf file. Values below 1 are treated as 1.
    #[serde(default = "defaults::sitemap::max_urls")]
    #[educe(Default = defaults::sitemap::max_urls())]
    pub max_urls: usize,

    /// Strip indentation from published documents.
    #[serde(default = "defaults::r#false")]
    #[educe(Default = false)]
    pub minify: bool,
}

/// `[data]` section in sitemap.toml - content source.
///
/// # Example
/// ```toml
/// [data]
/// snapshot = "data/snapshot.json"
/// locales = ["en", "fr", "nl"]
/// ```
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(deny_unknown_fields)]
pub struct DataConfig {
    /// JSON content snapshot exported from the marketplace database.
    #[serde(default = "defaults::data::snapshot")]
    #[educe(Default = defaults::data::snapshot())]
    pub snapshot: PathBuf,

    /// Available locales, in output order.
    #[serde(default = "defaults::data::locales")]
    #[educe(Default = defaults::data::locales())]
    pub locales: Vec<String>,
}
