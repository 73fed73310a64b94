//! Sitemap generation error types.
//!
//! Every variant is fatal: raised with `bail!` through `anyhow::Result` and
//! recovered by callers with `downcast_ref::<SitemapError>()`.

use super::policy::Reason;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SitemapError {
    #[error("[base.url] is required to build sitemap URLs")]
    MissingBaseUrl,

    #[error("No locales configured for sitemap generation")]
    NoLocales,

    #[error("Blocked URL detected in sitemap generation: {url} ({reason})")]
    BlockedUrl { url: String, reason: Reason },

    #[error("IO error at `{path}`")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse content snapshot `{path}`")]
    Snapshot {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to atomically write sitemap to `{path}`")]
    Publish { path: PathBuf },
}
