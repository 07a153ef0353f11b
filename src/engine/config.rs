//! Layout configuration.
//!
//! A [`LayoutConfig`] is an immutable snapshot: every render receives one by
//! reference, and edits (CLI flags, merged settings files) produce a new
//! snapshot instead of mutating shared state. Settings files are flat JSON
//! objects whose keys mirror the fields in SCREAMING_SNAKE_CASE, e.g.
//!
//! ```json
//! { "BACKGROUND_COLOR": [245, 245, 245], "IMAGE_WIDTH": 1200, "FONT_PATH": null }
//! ```
//!
//! Values are validated when loaded, not when rendering.

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Vertical space kept free for the border and decoration.
pub const RESERVED_VERTICAL_MARGIN: u32 = 80;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub const fn channels(self) -> [u8; 3] {
        [self.0, self.1, self.2]
    }

    pub fn from_hex(hex: &str) -> Option<Rgb> {
        let hex = hex.trim_start_matches('#');
        match hex.len() {
            3 => {
                let r = u8::from_str_radix(&hex.get(0..1)?.repeat(2), 16).ok()?;
                let g = u8::from_str_radix(&hex.get(1..2)?.repeat(2), 16).ok()?;
                let b = u8::from_str_radix(&hex.get(2..3)?.repeat(2), 16).ok()?;
                Some(Rgb(r, g, b))
            }
            6 => {
                let r = u8::from_str_radix(hex.get(0..2)?, 16).ok()?;
                let g = u8::from_str_radix(hex.get(2..4)?, 16).ok()?;
                let b = u8::from_str_radix(hex.get(4..6)?, 16).ok()?;
                Some(Rgb(r, g, b))
            }
            _ => None,
        }
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{},{}", self.0, self.1, self.2)
    }
}

/// `"r,g,b"` or `"#rrggbb"` / `"#rgb"`.
impl FromStr for Rgb {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.starts_with('#') {
            return Rgb::from_hex(s).ok_or_else(|| format!("invalid hex color: {s}"));
        }

        let parts: Vec<&str> = s.split(',').map(str::trim).collect();
        let [r, g, b] = parts.as_slice() else {
            return Err(format!("expected R,G,B but got: {s}"));
        };
        let channel = |v: &str| {
            v.parse::<u8>()
                .map_err(|_| format!("color channel out of range 0-255: {v}"))
        };
        Ok(Rgb(channel(r)?, channel(g)?, channel(b)?))
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to access config file {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("config must be a JSON object")]
    NotAnObject,

    #[error("image size must be non-zero (got {width}x{height})")]
    ZeroImageSize { width: u32, height: u32 },

    #[error("padding {padding} leaves no room inside a {width}x{height} image")]
    PaddingTooLarge { padding: u32, width: u32, height: u32 },

    #[error("MIN_FONT_SIZE must be at least 1")]
    ZeroMinFontSize,

    #[error("MIN_FONT_SIZE ({min}) is larger than MAX_FONT_SIZE ({max})")]
    FontRange { min: u32, max: u32 },

    #[error("MAX_LINES must be at least 1")]
    ZeroMaxLines,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE", default, deny_unknown_fields)]
pub struct LayoutConfig {
    pub background_color: Rgb,
    pub text_color: Rgb,
    pub image_width: u32,
    pub image_height: u32,
    pub padding: u32,
    /// Size the search starts from
    pub base_font_size: u32,
    pub min_font_size: u32,
    pub max_font_size: u32,
    pub max_lines: usize,
    /// Custom font file tried before any system font
    pub font_path: Option<PathBuf>,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            background_color: Rgb(245, 245, 245),
            text_color: Rgb(50, 50, 50),
            image_width: 1200,
            image_height: 800,
            padding: 50,
            base_font_size: 40,
            min_font_size: 32,
            max_font_size: 100,
            max_lines: 5,
            font_path: None,
        }
    }
}

impl LayoutConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        let (width, height, padding) = (self.image_width, self.image_height, self.padding);

        if width == 0 || height == 0 {
            return Err(ConfigError::ZeroImageSize { width, height });
        }

        let inset = u64::from(padding) * 2;
        if inset >= u64::from(width)
            || inset + u64::from(RESERVED_VERTICAL_MARGIN) >= u64::from(height)
        {
            return Err(ConfigError::PaddingTooLarge {
                padding,
                width,
                height,
            });
        }

        if self.min_font_size == 0 {
            return Err(ConfigError::ZeroMinFontSize);
        }
        if self.min_font_size > self.max_font_size {
            return Err(ConfigError::FontRange {
                min: self.min_font_size,
                max: self.max_font_size,
            });
        }
        if self.max_lines == 0 {
            return Err(ConfigError::ZeroMaxLines);
        }

        Ok(())
    }

    /// Width available to a wrapped line.
    pub fn text_width(&self) -> f32 {
        self.image_width.saturating_sub(self.padding.saturating_mul(2)) as f32
    }

    /// Height a wrapped block must stay below.
    pub fn text_height_limit(&self) -> f32 {
        let reserved = self
            .padding
            .saturating_mul(2)
            .saturating_add(RESERVED_VERTICAL_MARGIN);
        self.image_height.saturating_sub(reserved) as f32
    }

    /// Overlays the keys of a JSON object onto this snapshot and returns
    /// the validated result. Keys not present keep their current value.
    pub fn merge_json(&self, json: &str) -> Result<Self, ConfigError> {
        let serde_json::Value::Object(overlay) = serde_json::from_str::<serde_json::Value>(json)? else {
            return Err(ConfigError::NotAnObject);
        };

        let mut merged = serde_json::to_value(self)?;
        if let serde_json::Value::Object(fields) = &mut merged {
            fields.extend(overlay);
        }

        let config: LayoutConfig = serde_json::from_value(merged)?;
        config.validate()?;
        Ok(config)
    }

    /// Loads a settings file on top of the defaults.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::default().merge_json(&text)
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn with_image_size(mut self, width: u32, height: u32) -> Self {
        self.image_width = width;
        self.image_height = height;
        self
    }

    pub fn with_padding(mut self, padding: u32) -> Self {
        self.padding = padding;
        self
    }

    pub fn with_font_sizes(mut self, base: u32, min: u32, max: u32) -> Self {
        self.base_font_size = base;
        self.min_font_size = min;
        self.max_font_size = max;
        self
    }

    pub fn with_max_lines(mut self, max_lines: usize) -> Self {
        self.max_lines = max_lines;
        self
    }

    pub fn with_colors(mut self, background: Rgb, text: Rgb) -> Self {
        self.background_color = background;
        self.text_color = text;
        self
    }

    pub fn with_font_path(mut self, font_path: Option<PathBuf>) -> Self {
        self.font_path = font_path;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let config = LayoutConfig::default();
        config.validate().unwrap();
        assert_eq!(config.text_width(), 1100.0);
        assert_eq!(config.text_height_limit(), 620.0);
    }

    #[test]
    fn merge_overrides_only_given_keys() {
        let base = LayoutConfig::default();
        let merged = base
            .merge_json(r#"{ "IMAGE_WIDTH": 1600, "TEXT_COLOR": [0, 0, 0] }"#)
            .unwrap();

        assert_eq!(merged.image_width, 1600);
        assert_eq!(merged.text_color, Rgb(0, 0, 0));
        assert_eq!(merged.image_height, base.image_height);
        assert_eq!(merged.background_color, base.background_color);
        // 元のスナップショットは変わらない
        assert_eq!(base.image_width, 1200);
    }

    #[test]
    fn accepts_settings_without_newer_keys() {
        let json = r#"{
            "BACKGROUND_COLOR": [255, 255, 255],
            "TEXT_COLOR": [10, 20, 30],
            "IMAGE_WIDTH": 1000,
            "IMAGE_HEIGHT": 700,
            "PADDING": 40,
            "BASE_FONT_SIZE": 44,
            "MIN_FONT_SIZE": 20,
            "MAX_FONT_SIZE": 120,
            "FONT_PATH": null
        }"#;
        let config = LayoutConfig::default().merge_json(json).unwrap();
        assert_eq!(config.padding, 40);
        assert_eq!(config.max_lines, 5);
        assert_eq!(config.font_path, None);
    }

    #[test]
    fn unknown_and_malformed_keys_are_rejected() {
        let base = LayoutConfig::default();
        assert!(matches!(
            base.merge_json(r#"{ "ACCENT_COLOR": [1, 2, 3] }"#),
            Err(ConfigError::Json(_))
        ));
        assert!(matches!(
            base.merge_json(r#"{ "IMAGE_WIDTH": "wide" }"#),
            Err(ConfigError::Json(_))
        ));
        assert!(matches!(
            base.merge_json(r#"{ "TEXT_COLOR": [300, 0, 0] }"#),
            Err(ConfigError::Json(_))
        ));
        assert!(matches!(base.merge_json("[1, 2]"), Err(ConfigError::NotAnObject)));
    }

    #[test]
    fn out_of_range_values_are_rejected() {
        let base = LayoutConfig::default();
        assert!(matches!(
            base.merge_json(r#"{ "MIN_FONT_SIZE": 60, "MAX_FONT_SIZE": 50 }"#),
            Err(ConfigError::FontRange { min: 60, max: 50 })
        ));
        assert!(matches!(
            base.merge_json(r#"{ "PADDING": 400 }"#),
            Err(ConfigError::PaddingTooLarge { .. })
        ));
        assert!(matches!(
            base.merge_json(r#"{ "IMAGE_HEIGHT": 0 }"#),
            Err(ConfigError::ZeroImageSize { .. })
        ));
        assert!(matches!(
            base.merge_json(r#"{ "MAX_LINES": 0 }"#),
            Err(ConfigError::ZeroMaxLines)
        ));
        assert!(matches!(
            base.merge_json(r#"{ "MIN_FONT_SIZE": 0 }"#),
            Err(ConfigError::ZeroMinFontSize)
        ));
    }

    #[test]
    fn base_size_outside_range_is_allowed() {
        let config = LayoutConfig::default().with_font_sizes(120, 32, 100);
        config.validate().unwrap();
    }

    #[test]
    fn save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");

        let config = LayoutConfig::default()
            .with_colors(Rgb(1, 2, 3), Rgb(4, 5, 6))
            .with_font_path(Some(PathBuf::from("/fonts/custom.ttf")));
        config.save(&path).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.contains("\"BACKGROUND_COLOR\""));

        assert_eq!(LayoutConfig::load(&path).unwrap(), config);
    }

    #[test]
    fn missing_file_is_an_io_error() {
        assert!(matches!(
            LayoutConfig::load("/nonexistent/settings.json"),
            Err(ConfigError::Io { .. })
        ));
    }

    #[test]
    fn parse_colors() {
        assert_eq!("245, 245, 245".parse::<Rgb>().unwrap(), Rgb(245, 245, 245));
        assert_eq!("#ff8000".parse::<Rgb>().unwrap(), Rgb(255, 128, 0));
        assert_eq!("#fff".parse::<Rgb>().unwrap(), Rgb(255, 255, 255));
        assert!("1,2".parse::<Rgb>().is_err());
        assert!("1,2,256".parse::<Rgb>().is_err());
        assert!("#12345".parse::<Rgb>().is_err());
        assert_eq!(Rgb(1, 2, 3).to_string(), "1,2,3");
    }
}
