//! Atomic publication of sitemap documents.
//!
//! Each document is written to `{path}.tmp` and renamed over the target, so
//! readers polling the path see either the old or the new file, never a
//! partial one. When the rename fails the temp file is copied over the
//! target and removed.

use super::{document::XmlDocument, error::SitemapError};
use crate::utils::minify::minify;
use anyhow::{Result, bail};
use std::{
    ffi::OsString,
    fs,
    path::{Path, PathBuf},
};

#[derive(Debug, Clone, Copy, Default)]
pub struct AtomicSitemapWriter {
    minify: bool,
}

impl AtomicSitemapWriter {
    pub const fn new(minify: bool) -> Self {
        Self { minify }
    }

    /// Render `document` and publish it at `path`.
    pub fn write(&self, document: &impl XmlDocument, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent).map_err(|source| SitemapError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }

        let xml = document.render()?;
        let content = minify(xml.as_bytes(), self.minify);

        let tmp = tmp_path(path);
        fs::write(&tmp, &*content).map_err(|source| SitemapError::Io {
            path: tmp.clone(),
            source,
        })?;

        if fs::rename(&tmp, path).is_ok() {
            return Ok(());
        }

        // Both steps run even if the copy fails, so no temp file is left behind
        let copied = fs::copy(&tmp, path).is_ok();
        let removed = fs::remove_file(&tmp).is_ok();
        if !copied || !removed {
            bail!(SitemapError::Publish {
                path: path.to_path_buf(),
            });
        }

        Ok(())
    }
}

/// `{path}.tmp`, next to the target.
fn tmp_path(path: &Path) -> PathBuf {
    let mut name = OsString::from(path.as_os_str());
    name.push(".tmp");
    PathBuf::from(name)
}
