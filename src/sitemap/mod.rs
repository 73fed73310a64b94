//! Public sitemap generation.
//!
//! # Pipeline
//!
//! ```text
//! SitemapDataProvider ──► PublicSitemapBuilder ──► SitemapBuildResult
//!                               │                       │
//!                         SitemapUrlPolicy        AtomicSitemapWriter
//!                                                       │
//!                                        output/sitemaps/*.xml + sitemap.xml
//! ```
//!
//! Building is pure: it reads the provider once and returns immutable
//! documents. Only the writer touches the filesystem.

mod builder;
mod document;
pub mod error;
mod file;
mod policy;
pub mod provider;
mod writer;

pub use builder::PublicSitemapBuilder;
pub use policy::{SitemapUrlPolicy, Verdict};
pub use provider::SnapshotDataProvider;
pub use writer::AtomicSitemapWriter;

/// Default limit of URLs per leaf sitemap, below the protocol's 50,000.
pub const DEFAULT_MAX_URLS: usize = 45_000;
