//! Scrollbars configuration
//!
//! The declarative options a host passes to [`crate::Scrollbars`]. Loadable
//! from TOML (or any serde format) so hosts can keep scrollbar presets next
//! to their theme files:
//!
//! ```toml
//! auto_height = true
//! auto_height_min = 0
//! auto_height_max = "50%"
//! auto_hide = true
//! thumb_min_size = 30
//!
//! [styles.thumb_vertical]
//! background-color = "rgba(255,255,255,.4)"
//! ```

use std::collections::BTreeMap;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{Result, ScrollbarError};
use crate::style::StyleValue;
use crate::surface::Part;

// ============================================================================
// Height Bounds
// ============================================================================

/// An auto-height bound: pixels or a percentage of the parent height
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "BoundRepr", into = "BoundRepr")]
pub enum HeightBound {
    Px(f32),
    Percent(f32),
}

impl HeightBound {
    /// Unbounded maximum
    pub const UNBOUNDED: HeightBound = HeightBound::Px(f32::INFINITY);

    /// Resolve to pixels against the parent height
    ///
    /// Percentages cannot be resolved without a parent measurement and
    /// yield `None`.
    pub fn resolve(&self, parent_height: Option<f32>) -> Option<f32> {
        match *self {
            HeightBound::Px(px) => Some(px),
            HeightBound::Percent(pct) => parent_height.map(|h| h * pct / 100.0),
        }
    }

    /// Style value for this bound, optionally widened by `extra` pixels
    pub fn to_style(&self, extra: f32) -> StyleValue {
        match *self {
            HeightBound::Px(px) => StyleValue::Px(px + extra),
            HeightBound::Percent(pct) if extra == 0.0 => StyleValue::Percent(pct),
            HeightBound::Percent(pct) => StyleValue::Calc { percent: pct, px: extra },
        }
    }
}

impl Default for HeightBound {
    fn default() -> Self {
        HeightBound::Px(0.0)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
enum BoundRepr {
    Px(f32),
    Text(String),
}

impl TryFrom<BoundRepr> for HeightBound {
    type Error = String;

    fn try_from(repr: BoundRepr) -> std::result::Result<Self, Self::Error> {
        match repr {
            BoundRepr::Px(px) => Ok(HeightBound::Px(px)),
            BoundRepr::Text(text) => {
                let text = text.trim();
                if let Some(pct) = text.strip_suffix('%') {
                    pct.trim()
                        .parse::<f32>()
                        .map(HeightBound::Percent)
                        .map_err(|e| format!("invalid percentage {text:?}: {e}"))
                } else {
                    text.strip_suffix("px")
                        .unwrap_or(text)
                        .trim()
                        .parse::<f32>()
                        .map(HeightBound::Px)
                        .map_err(|e| format!("invalid height bound {text:?}: {e}"))
                }
            }
        }
    }
}

impl From<HeightBound> for BoundRepr {
    fn from(bound: HeightBound) -> Self {
        match bound {
            HeightBound::Px(px) => BoundRepr::Px(px),
            HeightBound::Percent(pct) => BoundRepr::Text(format!("{pct}%")),
        }
    }
}

/// Auto-height settings for one scrollbars instance
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AutoHeightConfig {
    pub enabled: bool,
    pub min: HeightBound,
    pub max: HeightBound,
}

impl Default for AutoHeightConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            min: HeightBound::Px(0.0),
            max: HeightBound::UNBOUNDED,
        }
    }
}

impl AutoHeightConfig {
    /// Resolve both bounds to pixels, normalizing invalid input
    ///
    /// Unresolvable percentages fall back to `0` / unbounded. Negative
    /// bounds clamp to zero and `min > max` is swapped.
    pub fn resolve(&self, parent_height: Option<f32>) -> (f32, f32) {
        let min = self.min.resolve(parent_height).unwrap_or(0.0).max(0.0);
        let max = self
            .max
            .resolve(parent_height)
            .unwrap_or(f32::INFINITY)
            .max(0.0);
        if min > max {
            tracing::warn!(
                "autoHeight bounds inverted (min={min}, max={max}), swapping"
            );
            (max, min)
        } else {
            (min, max)
        }
    }
}

// ============================================================================
// Per-part maps
// ============================================================================

/// One value per rendered part
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, bound(deserialize = "T: Deserialize<'de> + Default"))]
pub struct PartMap<T> {
    pub container: T,
    pub view: T,
    pub track_horizontal: T,
    pub track_vertical: T,
    pub thumb_horizontal: T,
    pub thumb_vertical: T,
}

impl<T> PartMap<T> {
    pub fn get(&self, part: Part) -> &T {
        match part {
            Part::Container => &self.container,
            Part::View => &self.view,
            Part::TrackHorizontal => &self.track_horizontal,
            Part::TrackVertical => &self.track_vertical,
            Part::ThumbHorizontal => &self.thumb_horizontal,
            Part::ThumbVertical => &self.thumb_vertical,
        }
    }

    pub fn get_mut(&mut self, part: Part) -> &mut T {
        match part {
            Part::Container => &mut self.container,
            Part::View => &mut self.view,
            Part::TrackHorizontal => &mut self.track_horizontal,
            Part::TrackVertical => &mut self.track_vertical,
            Part::ThumbHorizontal => &mut self.thumb_horizontal,
            Part::ThumbVertical => &mut self.thumb_vertical,
        }
    }
}

/// Style overrides keyed by CSS property name
pub type StyleOverrides = BTreeMap<String, StyleValue>;

// ============================================================================
// Scrollbars Configuration
// ============================================================================

/// Configuration for a scrollbars instance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScrollbarsConfig {
    /// Size the container from its content within the bounds below
    pub auto_height: bool,
    /// Lower auto-height bound (default 0)
    pub auto_height_min: HeightBound,
    /// Upper auto-height bound (default unbounded)
    pub auto_height_max: HeightBound,
    /// Fade tracks out once scrolling stops
    pub auto_hide: bool,
    /// Idle time before tracks hide, in milliseconds
    pub auto_hide_timeout_ms: u64,
    /// Opacity transition duration, in milliseconds
    pub auto_hide_duration_ms: u64,
    /// Floor for non-zero thumb lengths
    pub thumb_min_size: Option<f32>,
    /// Render identical initial markup on server and client
    pub universal: bool,
    /// Delay of the one-shot remeasure after mount, in milliseconds
    pub settle_delay_ms: u64,
    /// How often scroll-stop detection compares offsets, in milliseconds
    pub scroll_stop_interval_ms: u64,
    /// Style overrides merged over computed styles
    pub styles: PartMap<StyleOverrides>,
    /// Class names applied once on mount
    pub class_names: PartMap<Option<String>>,
}

impl Default for ScrollbarsConfig {
    fn default() -> Self {
        Self {
            auto_height: false,
            auto_height_min: HeightBound::Px(0.0),
            auto_height_max: HeightBound::UNBOUNDED,
            auto_hide: false,
            auto_hide_timeout_ms: 1000,
            auto_hide_duration_ms: 200,
            thumb_min_size: None,
            universal: false,
            settle_delay_ms: 100,
            scroll_stop_interval_ms: 100,
            styles: PartMap::default(),
            class_names: PartMap::default(),
        }
    }
}

impl ScrollbarsConfig {
    /// Config with auto-height between `min` and `max` pixels
    pub fn auto_height(min: f32, max: f32) -> Self {
        Self {
            auto_height: true,
            auto_height_min: HeightBound::Px(min),
            auto_height_max: HeightBound::Px(max),
            ..Default::default()
        }
    }

    /// Enable auto-hide with the default timings
    pub fn with_auto_hide(mut self) -> Self {
        self.auto_hide = true;
        self
    }

    /// Set the thumb length floor
    pub fn with_thumb_min_size(mut self, px: f32) -> Self {
        self.thumb_min_size = Some(px);
        self
    }

    /// Enable universal rendering
    pub fn with_universal(mut self) -> Self {
        self.universal = true;
        self
    }

    /// Add a style override for a part
    pub fn with_style(mut self, part: Part, property: &str, value: StyleValue) -> Self {
        self.styles
            .get_mut(part)
            .insert(property.to_string(), value);
        self
    }

    /// Set the class name for a part
    pub fn with_class_name(mut self, part: Part, class: impl Into<String>) -> Self {
        *self.class_names.get_mut(part) = Some(class.into());
        self
    }

    /// Auto-height view of this config
    pub fn auto_height_config(&self) -> AutoHeightConfig {
        AutoHeightConfig {
            enabled: self.auto_height,
            min: self.auto_height_min,
            max: self.auto_height_max,
        }
    }

    pub fn auto_hide_timeout(&self) -> Duration {
        Duration::from_millis(self.auto_hide_timeout_ms)
    }

    pub fn settle_delay(&self) -> Duration {
        Duration::from_millis(self.settle_delay_ms)
    }

    pub fn scroll_stop_interval(&self) -> Duration {
        Duration::from_millis(self.scroll_stop_interval_ms.max(1))
    }

    /// Parse a config from TOML text
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let config: Self =
            toml::from_str(text).map_err(|e| ScrollbarError::ConfigParse(e.to_string()))?;
        Ok(config.normalized())
    }

    /// Normalize declarative input that would otherwise misbehave
    ///
    /// Pixel bounds are clamped to be non-negative and swapped when
    /// inverted. A non-positive `thumb_min_size` is dropped.
    pub fn normalized(mut self) -> Self {
        if let HeightBound::Px(min) = self.auto_height_min {
            self.auto_height_min = HeightBound::Px(min.max(0.0));
        }
        if let HeightBound::Px(max) = self.auto_height_max {
            self.auto_height_max = HeightBound::Px(max.max(0.0));
        }
        if let (HeightBound::Px(min), HeightBound::Px(max)) =
            (self.auto_height_min, self.auto_height_max)
        {
            if min > max {
                let err = ScrollbarError::InvalidConfig(format!(
                    "auto_height_min {min} > auto_height_max {max}, swapping"
                ));
                tracing::warn!("{err}");
                self.auto_height_min = HeightBound::Px(max);
                self.auto_height_max = HeightBound::Px(min);
            }
        }
        if matches!(self.thumb_min_size, Some(px) if !(px > 0.0)) {
            tracing::warn!("ignoring non-positive thumb_min_size");
            self.thumb_min_size = None;
        }
        self
    }
}
