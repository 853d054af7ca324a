//! Studio configuration and the caption styling constants used by the compositor.

use std::path::{Path, PathBuf};

use anyhow::Context as _;

use crate::foundation::error::{MemeError, MemeResult};
use crate::layout::CaptionAnchor;

/// Runtime configuration for a [`crate::MemeStudio`].
///
/// Every field has a default, so an empty JSON object is a valid config file.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StudioConfig {
    /// Root directory that relative template references resolve against.
    pub asset_root: PathBuf,
    /// Upper bound on a single template load, in milliseconds.
    pub asset_timeout_ms: u64,
    /// Explicit caption font file. Skips discovery when set.
    pub font_path: Option<PathBuf>,
    /// Preferred caption font families, tried in order before generic sans-serif.
    pub font_families: Vec<String>,
    /// Extra directories scanned for `.ttf`/`.otf`/`.ttc` files during discovery.
    pub font_dirs: Vec<PathBuf>,
    /// JSON template catalog replacing the built-in one.
    pub catalog_path: Option<PathBuf>,
    /// Capacity of the feed change broadcast channel.
    pub events_capacity: usize,
    /// Caption styling.
    pub style: CaptionStyle,
}

impl Default for StudioConfig {
    fn default() -> Self {
        Self {
            asset_root: PathBuf::from("."),
            asset_timeout_ms: 10_000,
            font_path: None,
            font_families: vec![
                "Anton".to_string(),
                "Impact".to_string(),
                "Arial Black".to_string(),
            ],
            font_dirs: Vec::new(),
            catalog_path: None,
            events_capacity: 64,
            style: CaptionStyle::default(),
        }
    }
}

impl StudioConfig {
    /// Read and validate a JSON config file.
    pub fn load(path: impl AsRef<Path>) -> MemeResult<Self> {
        let path = path.as_ref();
        let bytes = std::fs::read(path)
            .with_context(|| format!("read studio config '{}'", path.display()))?;
        let cfg: StudioConfig = serde_json::from_slice(&bytes)
            .map_err(|e| MemeError::validation(format!("parse studio config: {e}")))?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Reject configurations that cannot produce a usable studio.
    pub fn validate(&self) -> MemeResult<()> {
        if self.asset_timeout_ms == 0 {
            return Err(MemeError::validation("asset_timeout_ms must be > 0"));
        }
        if self.events_capacity == 0 {
            return Err(MemeError::validation("events_capacity must be > 0"));
        }
        self.style.validate()
    }

    /// Template load timeout as a [`std::time::Duration`].
    pub fn asset_timeout(&self) -> std::time::Duration {
        std::time::Duration::from_millis(self.asset_timeout_ms)
    }
}

/// Proportional caption styling, resolved against each template's pixel size.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CaptionStyle {
    /// Font size is `width / font_divisor`.
    pub font_divisor: f32,
    /// Outline width is `font_size / stroke_divisor`.
    pub stroke_divisor: f32,
    /// Line advance is `font_size * line_height_factor`.
    pub line_height_factor: f32,
    /// Lines wrap at `width * max_width_ratio`.
    pub max_width_ratio: f32,
    /// Top captions hang from `height * top_ratio`.
    pub top_ratio: f32,
    /// Bottom captions rest on `height * bottom_ratio`.
    pub bottom_ratio: f32,
    /// Glyph fill color (straight RGBA8).
    pub fill_rgba: [u8; 4],
    /// Glyph outline color (straight RGBA8).
    pub stroke_rgba: [u8; 4],
}

impl Default for CaptionStyle {
    fn default() -> Self {
        Self {
            font_divisor: 15.0,
            stroke_divisor: 15.0,
            line_height_factor: 1.1,
            max_width_ratio: 0.9,
            top_ratio: 0.05,
            bottom_ratio: 0.95,
            fill_rgba: [255, 255, 255, 255],
            stroke_rgba: [0, 0, 0, 255],
        }
    }
}

impl CaptionStyle {
    /// Reject non-finite or degenerate ratios.
    pub fn validate(&self) -> MemeResult<()> {
        let positive = [
            ("font_divisor", self.font_divisor),
            ("stroke_divisor", self.stroke_divisor),
            ("line_height_factor", self.line_height_factor),
            ("max_width_ratio", self.max_width_ratio),
        ];
        for (name, v) in positive {
            if !v.is_finite() || v <= 0.0 {
                return Err(MemeError::validation(format!(
                    "caption style {name} must be finite and > 0"
                )));
            }
        }
        for (name, v) in [("top_ratio", self.top_ratio), ("bottom_ratio", self.bottom_ratio)] {
            if !(0.0..=1.0).contains(&v) {
                return Err(MemeError::validation(format!(
                    "caption style {name} must be within [0, 1]"
                )));
            }
        }
        Ok(())
    }

    /// Resolve concrete pixel metrics for a `width` x `height` surface.
    pub fn metrics_for(&self, width: u32, height: u32) -> CaptionMetrics {
        let w = width as f32;
        let h = height as f32;
        let font_size = w / self.font_divisor;
        CaptionMetrics {
            font_size,
            stroke_width: font_size / self.stroke_divisor,
            line_height: font_size * self.line_height_factor,
            max_width: w * self.max_width_ratio,
            center_x: w / 2.0,
            top: CaptionAnchor::Top {
                y: h * self.top_ratio,
            },
            bottom: CaptionAnchor::Bottom {
                y: h * self.bottom_ratio,
            },
        }
    }
}

/// Pixel metrics for one render, derived from [`CaptionStyle::metrics_for`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CaptionMetrics {
    /// Caption font size in pixels.
    pub font_size: f32,
    /// Outline width in pixels.
    pub stroke_width: f32,
    /// Distance between stacked lines.
    pub line_height: f32,
    /// Wrap width.
    pub max_width: f32,
    /// Horizontal center every line is aligned on.
    pub center_x: f32,
    /// Anchor for the top caption.
    pub top: CaptionAnchor,
    /// Anchor for the bottom caption.
    pub bottom: CaptionAnchor,
}

#[cfg(test)]
#[path = "../tests/unit/config/config.rs"]
mod tests;
