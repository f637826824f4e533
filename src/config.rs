use serde::Deserialize;
use std::fs;
use std::path::Path;

use crate::block::{Block, MAX_HEADING_LEVEL};
use crate::error::{Error, Result};

static DEFAULT_CONFIG: &str = include_str!("default_config.toml");

#[derive(Debug, Clone, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct Config {
    pub page: PageConfig,
    pub font: FontConfig,
    pub layout: LayoutConfig,
}

/// Page geometry in points.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct PageConfig {
    pub width: f64,
    pub height: f64,
    pub margin_top: f64,
    pub margin_bottom: f64,
    pub margin_left: f64,
    pub margin_right: f64,
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            width: 612.0,
            height: 792.0,
            margin_top: 72.0,
            margin_bottom: 72.0,
            margin_left: 72.0,
            margin_right: 72.0,
        }
    }
}

impl PageConfig {
    /// Baseline of the first line on a page.
    pub fn top(&self) -> f64 {
        self.height - self.margin_top
    }

    /// Lowest baseline allowed on a page.
    pub fn bottom(&self) -> f64 {
        self.margin_bottom
    }

    pub fn content_width(&self) -> f64 {
        self.width - self.margin_left - self.margin_right
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct FontConfig {
    pub body_size: f64,
    pub heading_sizes: [f64; MAX_HEADING_LEVEL as usize],
    pub line_spacing: f64,
}

impl Default for FontConfig {
    fn default() -> Self {
        Self {
            body_size: 12.0,
            heading_sizes: [24.0, 18.0, 16.0, 14.0, 13.0, 12.0],
            line_spacing: 1.2,
        }
    }
}

impl FontConfig {
    /// Get the font size for a heading level (clamped to `1..=6`).
    pub fn heading_size(&self, level: u8) -> f64 {
        let index = level.clamp(1, MAX_HEADING_LEVEL) as usize - 1;
        self.heading_sizes[index]
    }

    /// Get the font size a block is set in.
    pub fn size_for(&self, block: &Block) -> f64 {
        match block {
            Block::Heading { level, .. } => self.heading_size(*level),
            Block::Paragraph { .. } | Block::ListItem { .. } => self.body_size,
        }
    }

    pub fn line_height(&self, font_size: f64) -> f64 {
        font_size * self.line_spacing
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct LayoutConfig {
    /// Vertical space between consecutive blocks on a page
    pub block_gap: f64,
    pub list_indent: f64,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            block_gap: 4.8,
            list_indent: 18.0,
        }
    }
}

impl Config {
    /// The configuration compiled into the binary from `default_config.toml`.
    ///
    /// `build.rs` rejects a malformed file, so the fallback is never taken in
    /// a successful build.
    pub fn compiled_default() -> Self {
        match toml::from_str(DEFAULT_CONFIG) {
            Ok(config) => config,
            Err(e) => {
                log::warn!("bundled default config is invalid: {e}");
                Self::default()
            }
        }
    }

    /// Load and validate a TOML config file. Missing keys take their defaults.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|source| Error::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Config = toml::from_str(&content).map_err(|source| Error::ConfigParse {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        log::debug!("loaded config from {}", path.display());
        Ok(config)
    }

    /// Reject geometry the layout engine cannot place text into.
    pub fn validate(&self) -> Result<()> {
        if let Some(name) = self.first_non_finite() {
            return Err(Error::InvalidConfig(format!("{name} must be a finite number")));
        }

        let page = &self.page;
        let margins = [
            page.margin_top,
            page.margin_bottom,
            page.margin_left,
            page.margin_right,
        ];
        if !(page.width > 0.0 && page.height > 0.0) {
            return Err(Error::InvalidConfig("page size must be positive".into()));
        }
        if margins.iter().any(|m| *m < 0.0) {
            return Err(Error::InvalidConfig("margins must not be negative".into()));
        }
        if page.content_width() - self.layout.list_indent <= 0.0 {
            return Err(Error::InvalidConfig(
                "horizontal margins and list indent leave no room for text".into(),
            ));
        }

        let font = &self.font;
        if std::iter::once(font.body_size)
            .chain(font.heading_sizes)
            .any(|s| s <= 0.0)
        {
            return Err(Error::InvalidConfig("font sizes must be positive".into()));
        }
        if font.line_spacing <= 0.0 {
            return Err(Error::InvalidConfig("line spacing must be positive".into()));
        }

        let tallest = font.heading_sizes.iter().fold(font.body_size, |a, b| a.max(*b));
        if page.top() - font.line_height(tallest) < page.bottom() {
            return Err(Error::InvalidConfig(
                "vertical margins leave no room for a line of text".into(),
            ));
        }

        if self.layout.block_gap < 0.0 || self.layout.list_indent < 0.0 {
            return Err(Error::InvalidConfig(
                "block gap and list indent must not be negative".into(),
            ));
        }
        Ok(())
    }

    /// Name of the first field holding NaN or an infinity.
    fn first_non_finite(&self) -> Option<&'static str> {
        let page = &self.page;
        let font = &self.font;
        let fields = [
            ("page.width", page.width),
            ("page.height", page.height),
            ("page.margin_top", page.margin_top),
            ("page.margin_bottom", page.margin_bottom),
            ("page.margin_left", page.margin_left),
            ("page.margin_right", page.margin_right),
            ("font.body_size", font.body_size),
            ("font.line_spacing", font.line_spacing),
            ("layout.block_gap", self.layout.block_gap),
            ("layout.list_indent", self.layout.list_indent),
        ];
        fields
            .into_iter()
            .chain(font.heading_sizes.map(|size| ("font.heading_sizes", size)))
            .find(|(_, value)| !value.is_finite())
            .map(|(name, _)| name)
    }
}
