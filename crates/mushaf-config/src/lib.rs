//! Mushaf engine configuration.
//!
//! Centralized settings loaded from `mushaf.toml`, with environment
//! variables (`MUSHAF_*`) taking precedence for temporary overrides.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Main configuration for the mushaf layout engine.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct MushafConfig {
    /// Line layout and justification settings.
    pub layout: LayoutConfig,
    /// Tajweed coloring settings.
    pub tajweed: TajweedConfig,
    /// Viewer/scheduler settings.
    pub view: ViewConfig,
}

/// Typesetting convention for the loaded mushaf.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum VariantConfig {
    #[default]
    Madinah,
    Indopak,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Which typesetting convention the rule tables follow.
    pub variant: VariantConfig,
    /// Path to the mushaf font file (.ttf/.otf). Required before any
    /// shaping can happen; a missing font fails construction.
    pub font: Option<PathBuf>,
    /// Column width in font units that a full line should occupy.
    pub line_width: f32,
    /// Natural width of one space glyph in font units.
    pub space_width: f32,
    /// Use uniform scaling only, never kashida (for comparison
    /// rendering).
    pub scale_only: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TajweedConfig {
    /// Attach recitation color classes to draw lists.
    pub enabled: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewConfig {
    /// Minimum page-cache capacity; the viewer grows it with the
    /// visible page count.
    pub cache_capacity: usize,
    /// Mark solver iteration budget for precomputed layouts.
    pub solver_iterations: usize,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            variant: VariantConfig::Madinah,
            font: None,
            line_width: 17000.0,
            space_width: 300.0,
            scale_only: false,
        }
    }
}

impl Default for TajweedConfig {
    fn default() -> Self {
        Self { enabled: true }
    }
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            cache_capacity: 5,
            solver_iterations: 300,
        }
    }
}

impl MushafConfig {
    /// Load configuration from a TOML file.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Ok(toml::from_str(&content)?)
    }

    /// Load from the default location (`mushaf.toml` in the current
    /// directory) or fall back to defaults when the file is absent.
    pub fn load_or_default() -> Self {
        Self::load_from_file("mushaf.toml").unwrap_or_default()
    }

    /// Overlay environment variables on top of file/default values.
    pub fn merge_with_env(&mut self) {
        if let Ok(font) = std::env::var("MUSHAF_FONT") {
            self.layout.font = Some(PathBuf::from(font));
        }
        if let Ok(val) = std::env::var("MUSHAF_VARIANT") {
            if val.eq_ignore_ascii_case("indopak") {
                self.layout.variant = VariantConfig::Indopak;
            } else if val.eq_ignore_ascii_case("madinah") {
                self.layout.variant = VariantConfig::Madinah;
            }
        }
        if let Ok(val) = std::env::var("MUSHAF_LINE_WIDTH") {
            if let Ok(width) = val.parse::<f32>() {
                self.layout.line_width = width;
            }
        }
        if let Ok(val) = std::env::var("MUSHAF_SCALE_ONLY") {
            self.layout.scale_only = val == "1" || val.eq_ignore_ascii_case("true");
        }
        if let Ok(val) = std::env::var("MUSHAF_TAJWEED") {
            self.tajweed.enabled = val == "1" || val.eq_ignore_ascii_case("true");
        }
        if let Ok(val) = std::env::var("MUSHAF_CACHE_CAP") {
            if let Ok(capacity) = val.parse::<usize>() {
                self.view.cache_capacity = capacity;
            }
        }
    }

    /// Recommended entry point: file (or defaults), then environment.
    pub fn load() -> Self {
        let mut config = Self::load_or_default();
        config.merge_with_env();
        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_sensible() {
        let config = MushafConfig::default();
        assert_eq!(config.layout.variant, VariantConfig::Madinah);
        assert!(config.tajweed.enabled);
        assert_eq!(config.view.cache_capacity, 5);
        assert_eq!(config.view.solver_iterations, 300);
    }

    #[test]
    fn toml_round_trip() {
        let config = MushafConfig::default();
        let toml_str = toml::to_string_pretty(&config).unwrap();
        let parsed: MushafConfig = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed.layout.variant, config.layout.variant);
        assert_eq!(parsed.view.cache_capacity, config.view.cache_capacity);
    }

    #[test]
    fn partial_files_fill_in_defaults() {
        let parsed: MushafConfig = toml::from_str(
            r#"
            [layout]
            variant = "indopak"
            "#,
        )
        .unwrap();
        assert_eq!(parsed.layout.variant, VariantConfig::Indopak);
        assert!(parsed.tajweed.enabled);
    }

    #[test]
    fn env_overrides_take_precedence() {
        unsafe {
            std::env::set_var("MUSHAF_VARIANT", "indopak");
            std::env::set_var("MUSHAF_CACHE_CAP", "9");
        }

        let mut config = MushafConfig::default();
        config.merge_with_env();

        assert_eq!(config.layout.variant, VariantConfig::Indopak);
        assert_eq!(config.view.cache_capacity, 9);

        unsafe {
            std::env::remove_var("MUSHAF_VARIANT");
            std::env::remove_var("MUSHAF_CACHE_CAP");
        }
    }

    #[test]
    fn missing_file_is_an_error_for_explicit_loads() {
        let result = MushafConfig::load_from_file("/nonexistent/mushaf.toml");
        assert!(matches!(result, Err(ConfigError::Io(_))));
    }
}
