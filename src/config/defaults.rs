//! Default values for configuration fields.
//!
//! These functions are used by serde for default deserialization.

// ============================================================================
// Common Defaults
// ============================================================================

pub fn r#false() -> bool {
    false
}

// ============================================================================
// [base] Section Defaults
// ============================================================================

pub mod base {
    pub fn url() -> Option<String> {
        None
    }
}

// ============================================================================
// [sitemap] Section Defaults
// ============================================================================

pub mod sitemap {
    use std::path::PathBuf;

    pub fn output() -> PathBuf {
        "public".into()
    }

    pub fn index() -> PathBuf {
        "sitemap.xml".into()
    }

    pub fn max_urls() -> usize {
        crate::sitemap::DEFAULT_MAX_URLS
    }
}

// ============================================================================
// [data] Section Defaults
// ============================================================================

pub mod data {
    use std::path::PathBuf;

    pub fn snapshot() -> PathBuf {
        "data/snapshot.json".into()
    }

    pub fn locales() -> Vec<String> {
        vec!["en".into()]
    }
}
