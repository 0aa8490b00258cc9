//! Style values, per-part style sheets and minimal style patches
//!
//! Every measurement pass composes a complete [`StyleSheet`] from the
//! configuration and the current geometry. [`AppliedStyles`] remembers what
//! the surface last received and writes only the properties whose rendered
//! CSS text changed, so a pass over unchanged inputs performs zero writes.
//! Pixel values are rounded to whole pixels here, at the point of
//! application, never inside the geometry math. Rounding rather than
//! truncating keeps float error such as `47.999` from rendering as `47px`.

use std::fmt;

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::config::{HeightBound, ScrollbarsConfig};
use crate::geometry::Geometry;
use crate::surface::{Part, RenderSurface};
use crate::types::Axis;

// ============================================================================
// Style Properties
// ============================================================================

/// A CSS property written by the scrollbars
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum StyleProperty {
    Position,
    Overflow,
    WebkitOverflowScrolling,
    Display,
    Width,
    Height,
    MinHeight,
    MaxHeight,
    Top,
    Right,
    Bottom,
    Left,
    MarginRight,
    MarginBottom,
    Cursor,
    BorderRadius,
    BackgroundColor,
    Transform,
    Opacity,
    Transition,
    /// Any property only reachable through user overrides
    Custom(String),
}

impl StyleProperty {
    /// CSS property name
    pub fn css_name(&self) -> &str {
        match self {
            StyleProperty::Position => "position",
            StyleProperty::Overflow => "overflow",
            StyleProperty::WebkitOverflowScrolling => "-webkit-overflow-scrolling",
            StyleProperty::Display => "display",
            StyleProperty::Width => "width",
            StyleProperty::Height => "height",
            StyleProperty::MinHeight => "min-height",
            StyleProperty::MaxHeight => "max-height",
            StyleProperty::Top => "top",
            StyleProperty::Right => "right",
            StyleProperty::Bottom => "bottom",
            StyleProperty::Left => "left",
            StyleProperty::MarginRight => "margin-right",
            StyleProperty::MarginBottom => "margin-bottom",
            StyleProperty::Cursor => "cursor",
            StyleProperty::BorderRadius => "border-radius",
            StyleProperty::BackgroundColor => "background-color",
            StyleProperty::Transform => "transform",
            StyleProperty::Opacity => "opacity",
            StyleProperty::Transition => "transition",
            StyleProperty::Custom(name) => name,
        }
    }

    /// Parse a CSS property name (kebab or camel case)
    pub fn from_css_name(name: &str) -> StyleProperty {
        let kebab = to_kebab(name.trim());
        match kebab.as_str() {
            "position" => StyleProperty::Position,
            "overflow" => StyleProperty::Overflow,
            "-webkit-overflow-scrolling" | "webkit-overflow-scrolling" => {
                StyleProperty::WebkitOverflowScrolling
            }
            "display" => StyleProperty::Display,
            "width" => StyleProperty::Width,
            "height" => StyleProperty::Height,
            "min-height" => StyleProperty::MinHeight,
            "max-height" => StyleProperty::MaxHeight,
            "top" => StyleProperty::Top,
            "right" => StyleProperty::Right,
            "bottom" => StyleProperty::Bottom,
            "left" => StyleProperty::Left,
            "margin-right" => StyleProperty::MarginRight,
            "margin-bottom" => StyleProperty::MarginBottom,
            "cursor" => StyleProperty::Cursor,
            "border-radius" => StyleProperty::BorderRadius,
            "background-color" => StyleProperty::BackgroundColor,
            "transform" => StyleProperty::Transform,
            "opacity" => StyleProperty::Opacity,
            "transition" => StyleProperty::Transition,
            _ => StyleProperty::Custom(kebab),
        }
    }
}

fn to_kebab(name: &str) -> String {
    let mut out = String::with_capacity(name.len() + 4);
    for c in name.chars() {
        if c.is_ascii_uppercase() {
            out.push('-');
            out.push(c.to_ascii_lowercase());
        } else {
            out.push(c);
        }
    }
    out
}

impl fmt::Display for StyleProperty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.css_name())
    }
}

// ============================================================================
// Style Values
// ============================================================================

/// A CSS value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StyleValue {
    /// Pixels, rounded on output; infinite values render as `none`
    Px(f32),
    /// Free-form CSS text (keywords, colors, shorthands)
    Text(String),
    #[serde(skip)]
    Percent(f32),
    /// `calc(<percent>% + <px>px)`
    #[serde(skip)]
    Calc { percent: f32, px: f32 },
    /// Unitless number (opacity)
    #[serde(skip)]
    Number(f32),
    #[serde(skip)]
    TranslateX(f32),
    #[serde(skip)]
    TranslateY(f32),
}

impl StyleValue {
    pub fn text(value: &str) -> StyleValue {
        StyleValue::Text(value.to_string())
    }

    /// Rendered CSS text, exactly as written to the surface
    pub fn to_css(&self) -> String {
        match self {
            StyleValue::Px(px) if px.is_infinite() => "none".to_string(),
            StyleValue::Px(px) => format!("{}px", round_px(*px)),
            StyleValue::Text(text) => text.clone(),
            StyleValue::Percent(pct) => format!("{}%", pct),
            StyleValue::Calc { percent, px } => {
                format!("calc({}% + {}px)", percent, round_px(*px))
            }
            StyleValue::Number(n) => format!("{}", n),
            StyleValue::TranslateX(px) => format!("translateX({}px)", round_px(*px)),
            StyleValue::TranslateY(px) => format!("translateY({}px)", round_px(*px)),
        }
    }
}

/// Whole-pixel value as written to the surface
pub fn round_px(px: f32) -> i64 {
    let rounded = px.round() as i64;
    // Avoid "-0px"
    if rounded == 0 {
        0
    } else {
        rounded
    }
}

impl fmt::Display for StyleValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_css())
    }
}

// ============================================================================
// Style Sheet
// ============================================================================

type Declarations = SmallVec<[(StyleProperty, StyleValue); 12]>;

/// Complete desired styles for all six parts
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StyleSheet {
    parts: [Declarations; Part::COUNT],
}

impl StyleSheet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a property, replacing any earlier value for it
    pub fn set(&mut self, part: Part, property: StyleProperty, value: StyleValue) {
        let decls = &mut self.parts[part.index()];
        if let Some(slot) = decls.iter_mut().find(|(p, _)| *p == property) {
            slot.1 = value;
        } else {
            decls.push((property, value));
        }
    }

    /// Remove a property from a part
    pub fn unset(&mut self, part: Part, property: &StyleProperty) {
        self.parts[part.index()].retain(|(p, _)| p != property);
    }

    pub fn get(&self, part: Part, property: &StyleProperty) -> Option<&StyleValue> {
        self.parts[part.index()]
            .iter()
            .find(|(p, _)| p == property)
            .map(|(_, v)| v)
    }

    /// Declarations for one part, in insertion order
    pub fn declarations(&self, part: Part) -> impl Iterator<Item = (&StyleProperty, &StyleValue)> {
        self.parts[part.index()].iter().map(|(p, v)| (p, v))
    }
}

// ============================================================================
// Composition
// ============================================================================

/// Track thickness in pixels
pub const TRACK_THICKNESS: f32 = 6.0;
/// Distance between tracks and the container edges
pub const TRACK_INSET: f32 = 2.0;
/// Default thumb color
pub const THUMB_COLOR: &str = "rgba(0,0,0,.2)";

/// Inputs to one style composition
#[derive(Debug, Clone, Copy)]
pub struct StyleContext<'a> {
    pub config: &'a ScrollbarsConfig,
    /// Native scrollbar width from the probe
    pub scrollbar_width: f32,
    /// Geometry from the last successful measurement, if any
    pub geometry: Option<&'a Geometry>,
    /// Universal mode before the first client mount
    pub universal_pending: bool,
    /// Auto-hide: tracks currently shown
    pub tracks_shown: bool,
}

/// Compose the full style sheet for the given context
pub fn compose(ctx: &StyleContext<'_>) -> StyleSheet {
    use StyleProperty as P;
    use StyleValue as V;

    let config = ctx.config;
    let sw = ctx.scrollbar_width;
    let mut sheet = StyleSheet::new();

    // Container
    let c = Part::Container;
    sheet.set(c, P::Position, V::text("relative"));
    sheet.set(c, P::Overflow, V::text("hidden"));
    sheet.set(c, P::Width, V::Percent(100.0));
    if config.auto_height {
        sheet.set(c, P::Height, V::text("auto"));
        sheet.set(c, P::MinHeight, config.auto_height_min.to_style(0.0));
        sheet.set(c, P::MaxHeight, config.auto_height_max.to_style(0.0));
    } else {
        sheet.set(c, P::Height, V::Percent(100.0));
    }

    // View
    let v = Part::View;
    let inset = ctx.geometry.map(|g| g.view_inset).unwrap_or_default();
    if config.auto_height {
        sheet.set(v, P::Position, V::text("relative"));
    } else {
        sheet.set(v, P::Position, V::text("absolute"));
        for side in [P::Top, P::Left, P::Right, P::Bottom] {
            sheet.set(v, side, V::Px(0.0));
        }
    }
    sheet.set(v, P::Overflow, V::text("scroll"));
    sheet.set(v, P::WebkitOverflowScrolling, V::text("touch"));
    sheet.set(v, P::MarginRight, V::Px(inset.right));
    sheet.set(v, P::MarginBottom, V::Px(inset.bottom));
    if config.auto_height {
        let (min, max) = (config.auto_height_min, config.auto_height_max);
        if config.universal && ctx.universal_pending {
            sheet.set(v, P::MinHeight, min.to_style(0.0));
            sheet.set(v, P::MaxHeight, max.to_style(0.0));
        } else {
            sheet.set(v, P::MinHeight, min.to_style(sw));
            sheet.set(v, P::MaxHeight, bound_with_width(max, sw));
        }
    }
    if ctx.universal_pending {
        sheet.set(v, P::Overflow, V::text("hidden"));
        sheet.set(v, P::MarginRight, V::Px(0.0));
        sheet.set(v, P::MarginBottom, V::Px(0.0));
    }

    // Tracks and thumbs
    for axis in Axis::BOTH {
        let track = Part::track(axis);
        sheet.set(track, P::Position, V::text("absolute"));
        match axis {
            Axis::Vertical => {
                sheet.set(track, P::Width, V::Px(TRACK_THICKNESS));
                sheet.set(track, P::Right, V::Px(TRACK_INSET));
                sheet.set(track, P::Bottom, V::Px(TRACK_INSET));
                sheet.set(track, P::Top, V::Px(TRACK_INSET));
            }
            Axis::Horizontal => {
                sheet.set(track, P::Height, V::Px(TRACK_THICKNESS));
                sheet.set(track, P::Right, V::Px(TRACK_INSET));
                sheet.set(track, P::Bottom, V::Px(TRACK_INSET));
                sheet.set(track, P::Left, V::Px(TRACK_INSET));
            }
        }
        sheet.set(track, P::BorderRadius, V::Px(TRACK_THICKNESS / 2.0));
        if config.auto_hide {
            sheet.set(
                track,
                P::Transition,
                V::Text(format!("opacity {}ms", config.auto_hide_duration_ms)),
            );
            let opacity = if ctx.tracks_shown { 1.0 } else { 0.0 };
            sheet.set(track, P::Opacity, V::Number(opacity));
        }
        let visible = !ctx.universal_pending
            && ctx
                .geometry
                .is_some_and(|g| g.scrollbar_width > 0.0 && *g.track_visible.get(axis));
        sheet.set(
            track,
            P::Display,
            V::text(if visible { "block" } else { "none" }),
        );

        let thumb = Part::thumb(axis);
        sheet.set(thumb, P::Position, V::text("relative"));
        sheet.set(thumb, P::Display, V::text("block"));
        sheet.set(thumb, P::Cursor, V::text("pointer"));
        sheet.set(thumb, P::BorderRadius, V::text("inherit"));
        sheet.set(thumb, P::BackgroundColor, V::text(THUMB_COLOR));
        let state = ctx.geometry.and_then(|g| *g.thumb.get(axis));
        let (size, offset) = state.map(|t| (t.size, t.offset)).unwrap_or((0.0, 0.0));
        match axis {
            Axis::Vertical => {
                sheet.set(thumb, P::Width, V::Percent(100.0));
                sheet.set(thumb, P::Height, V::Px(size));
                sheet.set(thumb, P::Transform, V::TranslateY(offset));
            }
            Axis::Horizontal => {
                sheet.set(thumb, P::Height, V::Percent(100.0));
                sheet.set(thumb, P::Width, V::Px(size));
                sheet.set(thumb, P::Transform, V::TranslateX(offset));
            }
        }
    }

    // User overrides win over everything computed above
    for part in Part::ALL {
        for (name, value) in config.styles.get(part) {
            sheet.set(part, StyleProperty::from_css_name(name), value.clone());
        }
    }

    sheet
}

fn bound_with_width(bound: HeightBound, sw: f32) -> StyleValue {
    match bound {
        HeightBound::Px(px) if px.is_infinite() => StyleValue::Px(px),
        other => other.to_style(sw),
    }
}

// ============================================================================
// Applied Styles (diffing)
// ============================================================================

/// What the surface currently holds, as rendered CSS text
#[derive(Debug, Default)]
pub struct AppliedStyles {
    applied: FxHashMap<(Part, StyleProperty), String>,
    writes: u64,
    /// Writes per part, bumped on every set or clear
    revisions: [u64; Part::COUNT],
}

impl AppliedStyles {
    pub fn new() -> Self {
        Self::default()
    }

    /// Write the differences between `sheet` and the last applied state
    ///
    /// Properties that vanished from the sheet are cleared on the surface.
    /// Returns the number of writes performed.
    pub fn apply<S: RenderSurface + ?Sized>(
        &mut self,
        sheet: &StyleSheet,
        surface: &mut S,
    ) -> usize {
        let mut count = 0;

        for part in Part::ALL {
            for (property, value) in sheet.declarations(part) {
                let css = value.to_css();
                let key = (part, property.clone());
                if self.applied.get(&key) == Some(&css) {
                    continue;
                }
                surface.write_style(part, property.css_name(), Some(&css));
                self.applied.insert(key, css);
                self.revisions[part.index()] += 1;
                count += 1;
            }
        }

        let stale: Vec<(Part, StyleProperty)> = self
            .applied
            .keys()
            .filter(|(part, property)| sheet.get(*part, property).is_none())
            .cloned()
            .collect();
        for key in stale {
            surface.write_style(key.0, key.1.css_name(), None);
            self.revisions[key.0.index()] += 1;
            self.applied.remove(&key);
            count += 1;
        }

        self.writes += count as u64;
        if count > 0 {
            tracing::trace!("applied {count} style writes");
        }
        count
    }

    /// Last value written for a property
    pub fn get(&self, part: Part, property: &StyleProperty) -> Option<&str> {
        self.applied
            .get(&(part, property.clone()))
            .map(String::as_str)
    }

    /// Number of writes that have touched `part`
    pub fn revision(&self, part: Part) -> u64 {
        self.revisions[part.index()]
    }

    /// Total writes over this instance's lifetime
    pub fn total_writes(&self) -> u64 {
        self.writes
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{ContainerHeight, Geometry, ThumbGeometry, ViewInset};
    use crate::testing::FakeSurface;
    use crate::types::AxisPair;

    fn geometry(sw: f32) -> Geometry {
        Geometry {
            scrollbar_width: sw,
            container_height: ContainerHeight::Auto,
            view_inset: ViewInset {
                right: -sw,
                bottom: -sw,
            },
            track_visible: AxisPair::new(true, false),
            thumb: AxisPair::new(
                Some(ThumbGeometry {
                    size: 47.6,
                    offset: 10.2,
                }),
                Some(ThumbGeometry::default()),
            ),
        }
    }

    #[test]
    fn test_property_names() {
        assert_eq!(StyleProperty::MinHeight.css_name(), "min-height");
        assert_eq!(StyleProperty::from_css_name("maxHeight"), StyleProperty::MaxHeight);
        assert_eq!(StyleProperty::from_css_name("margin-right"), StyleProperty::MarginRight);
        assert_eq!(
            StyleProperty::from_css_name("boxShadow"),
            StyleProperty::Custom("box-shadow".into())
        );
    }

    #[test]
    fn test_value_rendering() {
        assert_eq!(StyleValue::Px(47.6).to_css(), "48px");
        assert_eq!(StyleValue::Px(-17.0).to_css(), "-17px");
        assert_eq!(StyleValue::Px(-0.2).to_css(), "0px");
        assert_eq!(StyleValue::Px(f32::INFINITY).to_css(), "none");
        assert_eq!(StyleValue::Percent(100.0).to_css(), "100%");
        assert_eq!(
            StyleValue::Calc { percent: 50.0, px: 17.0 }.to_css(),
            "calc(50% + 17px)"
        );
        assert_eq!(StyleValue::TranslateY(10.4).to_css(), "translateY(10px)");
        assert_eq!(StyleValue::Number(1.0).to_css(), "1");
    }

    #[test]
    fn test_sheet_set_replaces() {
        let mut sheet = StyleSheet::new();
        sheet.set(Part::View, StyleProperty::Overflow, StyleValue::text("scroll"));
        sheet.set(Part::View, StyleProperty::Overflow, StyleValue::text("hidden"));
        assert_eq!(sheet.declarations(Part::View).count(), 1);
        assert_eq!(
            sheet.get(Part::View, &StyleProperty::Overflow),
            Some(&StyleValue::text("hidden"))
        );
        sheet.unset(Part::View, &StyleProperty::Overflow);
        assert!(sheet.get(Part::View, &StyleProperty::Overflow).is_none());
    }

    #[test]
    fn test_compose_auto_height() {
        let config = ScrollbarsConfig::auto_height(0.0, 100.0);
        let geo = geometry(17.0);
        let sheet = compose(&StyleContext {
            config: &config,
            scrollbar_width: 17.0,
            geometry: Some(&geo),
            universal_pending: false,
            tracks_shown: true,
        });

        let css = |part, prop| sheet.get(part, &prop).map(StyleValue::to_css);
        assert_eq!(css(Part::Container, StyleProperty::Position).as_deref(), Some("relative"));
        assert_eq!(css(Part::Container, StyleProperty::MinHeight).as_deref(), Some("0px"));
        assert_eq!(css(Part::Container, StyleProperty::MaxHeight).as_deref(), Some("100px"));
        assert_eq!(css(Part::View, StyleProperty::Position).as_deref(), Some("relative"));
        assert_eq!(css(Part::View, StyleProperty::MinHeight).as_deref(), Some("17px"));
        assert_eq!(css(Part::View, StyleProperty::MaxHeight).as_deref(), Some("117px"));
        assert_eq!(css(Part::View, StyleProperty::MarginRight).as_deref(), Some("-17px"));
        assert!(sheet.get(Part::View, &StyleProperty::Top).is_none());
        assert_eq!(css(Part::TrackVertical, StyleProperty::Display).as_deref(), Some("block"));
        assert_eq!(css(Part::TrackHorizontal, StyleProperty::Display).as_deref(), Some("none"));
        assert_eq!(css(Part::ThumbVertical, StyleProperty::Height).as_deref(), Some("48px"));
        assert_eq!(
            css(Part::ThumbVertical, StyleProperty::Transform).as_deref(),
            Some("translateY(10px)")
        );
    }

    #[test]
    fn test_compose_zero_width_hides_tracks() {
        let config = ScrollbarsConfig::default();
        let geo = Geometry {
            thumb: AxisPair::new(None, None),
            ..geometry(0.0)
        };
        let sheet = compose(&StyleContext {
            config: &config,
            scrollbar_width: 0.0,
            geometry: Some(&geo),
            universal_pending: false,
            tracks_shown: true,
        });
        for axis in Axis::BOTH {
            assert_eq!(
                sheet.get(Part::track(axis), &StyleProperty::Display),
                Some(&StyleValue::text("none"))
            );
        }
        assert_eq!(
            sheet.get(Part::View, &StyleProperty::MarginBottom),
            Some(&StyleValue::Px(0.0))
        );
    }

    #[test]
    fn test_compose_universal_pending() {
        let config = ScrollbarsConfig::auto_height(0.0, 100.0).with_universal();
        let sheet = compose(&StyleContext {
            config: &config,
            scrollbar_width: 17.0,
            geometry: None,
            universal_pending: true,
            tracks_shown: false,
        });
        let css = |part, prop| sheet.get(part, &prop).map(StyleValue::to_css);
        assert_eq!(css(Part::View, StyleProperty::Overflow).as_deref(), Some("hidden"));
        assert_eq!(css(Part::View, StyleProperty::MarginRight).as_deref(), Some("0px"));
        assert_eq!(css(Part::View, StyleProperty::MaxHeight).as_deref(), Some("100px"));
        assert_eq!(css(Part::TrackVertical, StyleProperty::Display).as_deref(), Some("none"));
    }

    #[test]
    fn test_compose_auto_hide_and_overrides() {
        let config = ScrollbarsConfig::default()
            .with_auto_hide()
            .with_style(Part::ThumbVertical, "backgroundColor", StyleValue::text("red"));
        let sheet = compose(&StyleContext {
            config: &config,
            scrollbar_width: 17.0,
            geometry: None,
            universal_pending: false,
            tracks_shown: false,
        });
        assert_eq!(
            sheet.get(Part::TrackVertical, &StyleProperty::Transition),
            Some(&StyleValue::Text("opacity 200ms".into()))
        );
        assert_eq!(
            sheet.get(Part::TrackVertical, &StyleProperty::Opacity),
            Some(&StyleValue::Number(0.0))
        );
        assert_eq!(
            sheet.get(Part::ThumbVertical, &StyleProperty::BackgroundColor),
            Some(&StyleValue::text("red"))
        );
    }

    #[test]
    fn test_applied_styles_writes_only_changes() {
        let mut surface = FakeSurface::new(17.0);
        let mut applied = AppliedStyles::new();
        let mut sheet = StyleSheet::new();
        sheet.set(Part::ThumbVertical, StyleProperty::Height, StyleValue::Px(48.0));
        sheet.set(Part::ThumbVertical, StyleProperty::Transform, StyleValue::TranslateY(0.0));

        assert_eq!(applied.apply(&sheet, &mut surface), 2);
        assert_eq!(applied.apply(&sheet, &mut surface), 0);

        // Sub-pixel change that rounds to the same output is not a write
        sheet.set(Part::ThumbVertical, StyleProperty::Height, StyleValue::Px(48.2));
        assert_eq!(applied.apply(&sheet, &mut surface), 0);

        sheet.set(Part::ThumbVertical, StyleProperty::Transform, StyleValue::TranslateY(5.0));
        assert_eq!(applied.apply(&sheet, &mut surface), 1);
        assert_eq!(surface.style(Part::ThumbVertical, "transform"), Some("translateY(5px)"));

        // Removed properties are cleared
        sheet.unset(Part::ThumbVertical, &StyleProperty::Height);
        assert_eq!(applied.apply(&sheet, &mut surface), 1);
        assert_eq!(surface.style(Part::ThumbVertical, "height"), None);
        assert_eq!(applied.total_writes(), 4);
        assert_eq!(applied.revision(Part::ThumbVertical), 4);
        assert_eq!(applied.revision(Part::TrackVertical), 0);
    }
}
