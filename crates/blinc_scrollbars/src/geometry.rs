//! Scrollbar geometry
//!
//! Pure functions from raw layout reads to derived layout values. No I/O and
//! no rounding: identical inputs always produce identical [`Geometry`], and
//! whole-pixel conversion happens only when styles are applied.

use crate::config::AutoHeightConfig;
use crate::types::{Axis, AxisPair, RawMeasurement};

/// Height the container settles at
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum ContainerHeight {
    /// Sized by the surrounding layout
    #[default]
    Auto,
    /// Auto-height result, in pixels
    Px(f32),
}

/// Negative margins that push native scrollbars outside the clip box
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ViewInset {
    pub right: f32,
    pub bottom: f32,
}

/// Thumb length and position along its track
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ThumbGeometry {
    pub size: f32,
    pub offset: f32,
}

/// Derived layout for one measurement pass
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Geometry {
    /// Native scrollbar width the geometry was computed for
    pub scrollbar_width: f32,
    pub container_height: ContainerHeight,
    pub view_inset: ViewInset,
    /// Whether each track is needed (real overflow on that axis)
    pub track_visible: AxisPair<bool>,
    /// Thumbs; `None` when native scrollbars have no width and the
    /// overlay is not rendered at all
    pub thumb: AxisPair<Option<ThumbGeometry>>,
}

/// Compute the full geometry for a measurement
pub fn compute(
    raw: &RawMeasurement,
    scrollbar_width: f32,
    auto_height: &AutoHeightConfig,
    thumb_min_size: Option<f32>,
) -> Geometry {
    let mut geometry = Geometry {
        scrollbar_width,
        container_height: container_height(
            raw.content_scroll.height,
            auto_height,
            raw.parent_height,
        ),
        view_inset: view_inset(scrollbar_width),
        track_visible: AxisPair::new(
            raw.overflows(Axis::Vertical),
            raw.overflows(Axis::Horizontal),
        ),
        thumb: AxisPair::default(),
    };
    update_thumbs(&mut geometry, raw, thumb_min_size);
    geometry
}

/// Recompute only the thumbs, keeping sizes-derived fields as they are
///
/// This is the scroll path: content and viewport sizes are assumed
/// unchanged since the last full pass.
pub fn update_thumbs(geometry: &mut Geometry, raw: &RawMeasurement, thumb_min_size: Option<f32>) {
    for axis in Axis::BOTH {
        *geometry.thumb.get_mut(axis) = if geometry.scrollbar_width > 0.0 {
            Some(thumb(raw, axis, thumb_min_size))
        } else {
            None
        };
    }
}

/// Container height under auto-height, `Auto` otherwise
pub fn container_height(
    content_height: f32,
    auto_height: &AutoHeightConfig,
    parent_height: Option<f32>,
) -> ContainerHeight {
    if !auto_height.enabled {
        return ContainerHeight::Auto;
    }
    let (min, max) = auto_height.resolve(parent_height);
    ContainerHeight::Px(content_height.clamp(min, max))
}

/// View margins for the given native scrollbar width
pub fn view_inset(scrollbar_width: f32) -> ViewInset {
    if scrollbar_width > 0.0 {
        ViewInset {
            right: -scrollbar_width,
            bottom: -scrollbar_width,
        }
    } else {
        ViewInset::default()
    }
}

/// Thumb geometry along one axis
pub fn thumb(raw: &RawMeasurement, axis: Axis, thumb_min_size: Option<f32>) -> ThumbGeometry {
    let view = raw.view_client.along(axis);
    let content = raw.content_scroll.along(axis);
    let track = *raw.track_length.get(axis);
    let size = thumb_size(view, content, track, thumb_min_size);
    ThumbGeometry {
        size,
        offset: thumb_offset(raw.scroll_offset.along(axis), view, content, track, size),
    }
}

/// Thumb length: the visible fraction of content mapped onto the track
///
/// Zero when nothing overflows or the track has no length. A configured
/// minimum raises non-zero lengths but never past the track.
pub fn thumb_size(view: f32, content: f32, track: f32, min_size: Option<f32>) -> f32 {
    if content <= view || track <= 0.0 || view <= 0.0 {
        return 0.0;
    }
    let size = (view / content * track).clamp(0.0, track);
    if size >= track {
        return 0.0;
    }
    match min_size {
        Some(min) => size.max(min).min(track),
        None => size,
    }
}

/// Thumb position along the track for a scroll offset
///
/// Offsets outside `[0, max_scroll]` (elastic overscroll) pin the thumb to
/// the track ends.
pub fn thumb_offset(scroll: f32, view: f32, content: f32, track: f32, thumb: f32) -> f32 {
    let max_scroll = content - view;
    let travel = track - thumb;
    if max_scroll <= 0.0 || travel <= 0.0 {
        return 0.0;
    }
    (scroll / max_scroll).clamp(0.0, 1.0) * travel
}

/// Scroll distance corresponding to a thumb travel distance
///
/// The inverse of [`thumb_offset`]'s scale factor; used for both drag
/// deltas and absolute track positions.
pub fn scroll_for_thumb_travel(
    pixels: f32,
    view: f32,
    content: f32,
    track: f32,
    thumb: f32,
) -> f32 {
    let travel = track - thumb;
    let max_scroll = content - view;
    if travel <= 0.0 || max_scroll <= 0.0 {
        return 0.0;
    }
    pixels * max_scroll / travel
}
