//! Global config handle.
//!
//! Uses `arc-swap` for lock-free reads. `main` installs the loaded config
//! once; components that need an application-wide default (such as the
//! public base URL) read it through [`cfg`].
//!
//! # Usage
//!
//! ```ignore
//! use crate::config::cfg;
//!
//! let base_url = cfg().base.url.clone();
//! ```

use super::SiteConfig;
use arc_swap::ArcSwap;
use std::sync::{Arc, LazyLock};

/// Global config storage.
///
/// Holds the default config until `init_config` installs the loaded one.
static CONFIG: LazyLock<ArcSwap<SiteConfig>> =
    LazyLock::new(|| ArcSwap::from_pointee(SiteConfig::default()));

/// Get current config as `Arc<SiteConfig>`.
#[inline]
pub fn cfg() -> Arc<SiteConfig> {
    CONFIG.load_full()
}

/// Install the loaded config (called once at startup).
#[inline]
pub fn init_config(config: SiteConfig) {
    CONFIG.store(Arc::new(config));
}
