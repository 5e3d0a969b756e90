// ABOUTME: Shading configuration: per-pass ShadeConfig/ShadeTarget and persisted ShadeSettings.
// ABOUTME: ShadeSettings mirrors the host preference store with its historical defaults.

use serde::{Deserialize, Serialize};

/// What qualifying backgrounds are rewritten to.
///
/// A tagged variant instead of run-time type sniffing: either a fixed
/// replacement color string, or a target lightness that every qualifying
/// background is mapped toward with hue and saturation held fixed.
#[derive(Debug, Clone, PartialEq)]
pub enum ShadeTarget {
    /// A fixed replacement color. `rgb(...)`/`rgba(...)` strings additionally
    /// drive foreground contrast correction; other forms are applied verbatim.
    Color(String),
    /// A target lightness in [0, 1).
    Lightness(f64),
}

/// Parameters of one shading pass.
#[derive(Debug, Clone, PartialEq)]
pub struct ShadeConfig {
    /// Lightness cutoff: backgrounds at or below this stay untouched.
    pub threshold: f64,
    pub target: ShadeTarget,
}

impl ShadeConfig {
    pub fn new(threshold: f64, target: ShadeTarget) -> Self {
        Self { threshold, target }
    }

    /// A pass mapping qualifying backgrounds to a target lightness.
    pub fn with_lightness(threshold: f64, lightness: f64) -> Self {
        Self::new(threshold, ShadeTarget::Lightness(lightness))
    }

    /// A pass replacing qualifying backgrounds with a fixed color.
    pub fn with_color(threshold: f64, color: impl Into<String>) -> Self {
        Self::new(threshold, ShadeTarget::Color(color.into()))
    }
}

/// Host-facing shading preferences.
///
/// Field defaults match the historical plugin configuration, so a partially
/// populated settings document fills in the remaining fields unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShadeSettings {
    /// Lightness cutoff above which an element is shaded.
    pub threshold: f64,
    /// Target lightness used when `use_color` is off.
    pub lightness: f64,
    /// When set, shade to the fixed `color` instead of a target lightness.
    pub use_color: bool,
    /// Fixed replacement background color.
    pub color: String,
    /// Preferred text color, exposed to hosts that pre-set page styles.
    pub text_color: String,
}

impl Default for ShadeSettings {
    fn default() -> Self {
        Self {
            threshold: 0.80,
            lightness: 0.66,
            use_color: false,
            color: "rgb(100, 190, 170)".to_string(),
            text_color: "rgb(0, 0, 0)".to_string(),
        }
    }
}

impl ShadeSettings {
    /// The shade target these settings select.
    pub fn target(&self) -> ShadeTarget {
        if self.use_color {
            ShadeTarget::Color(self.color.clone())
        } else {
            ShadeTarget::Lightness(self.lightness)
        }
    }

    /// The per-pass configuration these settings select.
    pub fn config(&self) -> ShadeConfig {
        ShadeConfig::new(self.threshold, self.target())
    }

    /// The page background color to install on documents that carry none:
    /// the fixed color when `use_color` is set, otherwise a neutral gray at
    /// the configured lightness.
    pub fn background_color(&self) -> String {
        if self.use_color {
            self.color.clone()
        } else {
            format!("hsl(0, 0%, {:.0}%)", self.lightness * 100.0)
        }
    }
}
