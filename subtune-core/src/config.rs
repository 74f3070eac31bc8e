use crate::error::{CoreError, Result};
use crate::lyrics::ActiveLinePosition;
use crate::theme::ThemeVariant;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SubtuneConfig {
    #[serde(default)]
    pub theme: ThemeConfig,
    #[serde(default)]
    pub lyrics: LyricsConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ThemeConfig {
    #[serde(default)]
    pub variant: ThemeVariant,
    /// Custom regular font (.ttf only)
    #[serde(default)]
    pub normal_font: Option<PathBuf>,
    /// Custom bold font (.ttf only)
    #[serde(default)]
    pub bold_font: Option<PathBuf>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LyricsConfig {
    #[serde(default = "default_placeholder_text")]
    pub placeholder_text: String,
    #[serde(default)]
    pub active_line_position: ActiveLinePosition,
    /// Number of lyric lines shown at once
    #[serde(default = "default_visible_lines")]
    pub visible_lines: usize,
    /// How often playback position is reported to the lyrics viewer
    #[serde(default = "default_tick_interval")]
    pub tick_interval_ms: u64,
}

fn default_placeholder_text() -> String {
    "Lyrics not available".to_string()
}

const fn default_visible_lines() -> usize {
    7
}

const fn default_tick_interval() -> u64 {
    100
}

impl Default for LyricsConfig {
    fn default() -> Self {
        Self {
            placeholder_text: default_placeholder_text(),
            active_line_position: ActiveLinePosition::default(),
            visible_lines: default_visible_lines(),
            tick_interval_ms: default_tick_interval(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Also write logs to ~/.config/subtune/subtune.log
    #[serde(default)]
    pub enabled: bool,
}

impl SubtuneConfig {
    /// Get the configuration directory path (~/.config/subtune/)
    #[must_use]
    pub fn config_dir() -> PathBuf {
        crate::paths::config_dir()
    }

    /// Get the config file path (~/.config/subtune/config.toml)
    #[must_use]
    pub fn config_path() -> PathBuf {
        crate::paths::config_path()
    }

    /// Load config from the default location, creating a template on first run
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::ConfigNotFound`] after writing the template, or an
    /// error if the file cannot be read or parsed.
    pub fn load_or_create() -> Result<Self> {
        Self::load_or_create_at(&Self::config_path())
    }

    /// Load config from `path`, writing the template there if it is missing
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::ConfigNotFound`] after writing the template, or an
    /// error if the file cannot be read or parsed.
    pub fn load_or_create_at(path: &Path) -> Result<Self> {
        if !path.exists() {
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::write(path, CONFIG_TEMPLATE)?;
            info!("Wrote config template to {}", path.display());

            return Err(CoreError::ConfigNotFound {
                path: path.to_path_buf(),
            });
        }

        let content = fs::read_to_string(path)?;
        Self::load_from_str(&content)
    }

    /// Parse config from TOML text
    ///
    /// # Errors
    ///
    /// Returns an error if the text is not valid TOML for this structure.
    pub fn load_from_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Check settings that parse but cannot be used.
    ///
    /// Problems are reported, not fatal: callers log them and fall back to
    /// defaults.
    #[must_use]
    pub fn validate(&self) -> Vec<CoreError> {
        let mut problems = Vec::new();

        for path in [&self.theme.normal_font, &self.theme.bold_font]
            .into_iter()
            .flatten()
        {
            if !path.as_os_str().is_empty() && !path.extension().is_some_and(|ext| ext == "ttf") {
                problems.push(CoreError::UnsupportedFontFormat { path: path.clone() });
            }
        }

        if self.lyrics.visible_lines == 0 {
            problems.push(CoreError::ConfigInvalid {
                message: "lyrics.visible_lines must be at least 1".to_string(),
            });
        }
        if self.lyrics.tick_interval_ms == 0 {
            problems.push(CoreError::ConfigInvalid {
                message: "lyrics.tick_interval_ms must be at least 1".to_string(),
            });
        }

        problems
    }
}

const CONFIG_TEMPLATE: &str = r#"# Subtune Configuration
# ~/.config/subtune/config.toml

[theme]
# "dark" or "light"
variant = "dark"
# Optional custom fonts. Only .ttf files are supported.
# normal_font = "/path/to/Regular.ttf"
# bold_font = "/path/to/Bold.ttf"

[lyrics]
placeholder_text = "Lyrics not available"
# Where the current line sits: "top_third" or "center"
active_line_position = "top_third"
visible_lines = 7
tick_interval_ms = 100

[logging]
# Also write logs to ~/.config/subtune/subtune.log
enabled = false
"#;
