//! Custom font loading.
//!
//! The cache is created once at startup from the configured font paths. Each
//! slot is read from disk at most once, on first use, and the outcome is kept
//! for the rest of the process: a font that failed to load is never retried
//! and the renderer's built-in font is used instead.

use super::Resource;
use crate::config::ThemeConfig;
use crate::error::{CoreError, Result};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, OnceLock};
use tracing::{info, warn};

const LOG_TARGET: &str = "subtune::theme";

/// Read a TrueType font file.
///
/// # Errors
///
/// Returns [`CoreError::UnsupportedFontFormat`] for paths not ending in
/// `.ttf`, or [`CoreError::FontReadFailed`] if the file cannot be read.
pub fn read_ttf_file(path: &Path) -> Result<Vec<u8>> {
    if !path.extension().is_some_and(|ext| ext == "ttf") {
        return Err(CoreError::UnsupportedFontFormat {
            path: path.to_path_buf(),
        });
    }
    fs::read(path).map_err(|source| CoreError::FontReadFailed {
        path: path.to_path_buf(),
        source,
    })
}

fn load_slot(path: &Path, name: &str) -> Option<Arc<Resource>> {
    match read_ttf_file(path) {
        Ok(content) => {
            info!(target: LOG_TARGET, "Loaded custom font {}", path.display());
            Some(Arc::new(Resource::new(name, content)))
        }
        Err(e) => {
            warn!(target: LOG_TARGET, "Error loading custom font, using default: {e}");
            None
        }
    }
}

/// Normal and bold custom fonts, each loaded at most once.
///
/// Safe to share between threads; concurrent first lookups of a slot read the
/// file once.
#[derive(Debug, Default)]
pub struct FontCache {
    normal_path: Option<PathBuf>,
    bold_path: Option<PathBuf>,
    normal: OnceLock<Option<Arc<Resource>>>,
    bold: OnceLock<Option<Arc<Resource>>>,
}

impl FontCache {
    /// Create a cache for the given font files. Nothing is read yet.
    #[must_use]
    pub fn new(normal_path: Option<PathBuf>, bold_path: Option<PathBuf>) -> Self {
        Self {
            normal_path,
            bold_path,
            normal: OnceLock::new(),
            bold: OnceLock::new(),
        }
    }

    #[must_use]
    pub fn from_config(config: &ThemeConfig) -> Self {
        let non_empty = |path: &Option<PathBuf>| {
            path.as_ref()
                .filter(|p| !p.as_os_str().is_empty())
                .cloned()
        };
        Self::new(non_empty(&config.normal_font), non_empty(&config.bold_font))
    }

    /// The custom regular font, if configured and loadable
    pub fn normal(&self) -> Option<Arc<Resource>> {
        self.normal
            .get_or_init(|| {
                self.normal_path
                    .as_deref()
                    .and_then(|path| load_slot(path, "normalFont"))
            })
            .clone()
    }

    /// The custom bold font, if configured and loadable.
    ///
    /// A configured regular font that failed to load disables this slot too.
    pub fn bold(&self) -> Option<Arc<Resource>> {
        self.bold
            .get_or_init(|| {
                let path = self.bold_path.as_deref()?;
                if self.normal_path.is_some() && self.normal().is_none() {
                    warn!(
                        target: LOG_TARGET,
                        "Custom regular font failed to load, not using bold font {}",
                        path.display()
                    );
                    return None;
                }
                load_slot(path, "boldFont")
            })
            .clone()
    }
}
