//! Utility modules shared by the sitemap pipeline.

pub mod date;
pub mod minify;
pub mod xml;
