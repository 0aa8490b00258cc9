//! Scroll synchronization
//!
//! [`ScrollSyncController`] owns the measured geometry of one scrollbars
//! instance. Size and content notifications trigger a full remeasurement;
//! scroll notifications take the cheap path that only moves thumbs. Every
//! pass ends in a minimal style patch, so a pass over unchanged inputs
//! writes nothing.

use crate::config::ScrollbarsConfig;
use crate::error::Result;
use crate::geometry::{self, Geometry};
use crate::style::{compose, AppliedStyles, StyleContext, StyleProperty, StyleSheet};
use crate::surface::{Part, RenderSurface};
use crate::types::{Axis, AxisPair, Offset, RawMeasurement};
use crate::values::ScrollValues;

/// Upper bound on measurement passes per event
pub const MAX_PASSES: usize = 3;

const LAYOUT_PROPERTY_COUNT: usize = 8;

/// Container and view properties that resize measured boxes. Tracks are
/// compared wholesale: any write to a track can change its inner length.
const LAYOUT_PROPERTIES: [(Part, StyleProperty); LAYOUT_PROPERTY_COUNT] = [
    (Part::Container, StyleProperty::Height),
    (Part::Container, StyleProperty::MinHeight),
    (Part::Container, StyleProperty::MaxHeight),
    (Part::View, StyleProperty::Overflow),
    (Part::View, StyleProperty::MarginRight),
    (Part::View, StyleProperty::MarginBottom),
    (Part::View, StyleProperty::MinHeight),
    (Part::View, StyleProperty::MaxHeight),
];

/// Snapshot of everything a measurement depends on
#[derive(Debug, PartialEq)]
struct LayoutKey {
    properties: [Option<String>; LAYOUT_PROPERTY_COUNT],
    track_revisions: [u64; 2],
}

/// Outcome of a synchronization pass
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PassResult {
    pub values: ScrollValues,
    /// Style writes performed by the pass
    pub writes: usize,
}

/// Keeps thumbs and styles in step with the view
pub struct ScrollSyncController {
    config: ScrollbarsConfig,
    scrollbar_width: f32,
    raw: Option<RawMeasurement>,
    geometry: Option<Geometry>,
    applied: AppliedStyles,
    /// Universal markup is still showing (no client mount yet)
    universal_pending: bool,
    tracks_shown: bool,
}

impl ScrollSyncController {
    pub fn new(config: ScrollbarsConfig) -> Self {
        let config = config.normalized();
        Self {
            universal_pending: config.universal,
            tracks_shown: !config.auto_hide,
            config,
            scrollbar_width: 0.0,
            raw: None,
            geometry: None,
            applied: AppliedStyles::new(),
        }
    }

    pub fn config(&self) -> &ScrollbarsConfig {
        &self.config
    }

    pub fn scrollbar_width(&self) -> f32 {
        self.scrollbar_width
    }

    /// Geometry of the last successful pass
    pub fn geometry(&self) -> Option<&Geometry> {
        self.geometry.as_ref()
    }

    /// Measurement of the last successful pass
    pub fn raw(&self) -> Option<&RawMeasurement> {
        self.raw.as_ref()
    }

    /// Total style writes since creation
    pub fn total_writes(&self) -> u64 {
        self.applied.total_writes()
    }

    /// Styles for the first render, before any measurement
    ///
    /// In universal mode this is identical on server and client.
    pub fn initial_sheet(&self, scrollbar_width: f32) -> StyleSheet {
        compose(&StyleContext {
            config: &self.config,
            scrollbar_width: if self.universal_pending { 0.0 } else { scrollbar_width },
            geometry: None,
            universal_pending: self.universal_pending,
            tracks_shown: self.tracks_shown,
        })
    }

    /// First client-side pass
    pub fn on_mount<S: RenderSurface + ?Sized>(
        &mut self,
        surface: &mut S,
        scrollbar_width: f32,
    ) -> Option<PassResult> {
        self.scrollbar_width = scrollbar_width;
        self.universal_pending = false;
        self.apply_class_names(surface);
        tracing::debug!(
            "scrollbars mounted (native width {scrollbar_width}px, auto_height={})",
            self.config.auto_height
        );
        let rendered = self.restyle(surface);
        self.remeasure(surface).map(|mut pass| {
            pass.writes += rendered;
            pass
        })
    }

    /// Scroll notification: move thumbs for the new offset
    ///
    /// Falls back to a full pass when no measurement exists yet.
    pub fn on_scroll<S: RenderSurface + ?Sized>(
        &mut self,
        surface: &mut S,
        offset: Offset,
    ) -> Option<PassResult> {
        let (Some(mut raw), Some(mut geometry)) = (self.raw, self.geometry) else {
            return self.remeasure(surface);
        };
        raw.scroll_offset = offset;
        geometry::update_thumbs(&mut geometry, &raw, self.config.thumb_min_size);
        self.raw = Some(raw);
        self.geometry = Some(geometry);

        let writes = self.restyle(surface);
        tracing::trace!("scroll pass at ({:.1}, {:.1}): {writes} writes", offset.x, offset.y);
        Some(PassResult {
            values: values_of(&raw),
            writes,
        })
    }

    /// Resize or content mutation: full remeasurement
    pub fn on_resize<S: RenderSurface + ?Sized>(&mut self, surface: &mut S) -> Option<PassResult> {
        self.remeasure(surface)
    }

    /// New declarative config: store it and remeasure
    pub fn on_config_change<S: RenderSurface + ?Sized>(
        &mut self,
        surface: &mut S,
        config: ScrollbarsConfig,
    ) -> Option<PassResult> {
        let config = config.normalized();
        if !config.auto_hide {
            self.tracks_shown = true;
        } else if !self.config.auto_hide {
            self.tracks_shown = false;
        }
        self.config = config;
        self.apply_class_names(surface);
        self.remeasure(surface)
    }

    fn apply_class_names<S: RenderSurface + ?Sized>(&self, surface: &mut S) {
        for part in Part::ALL {
            if let Some(class) = self.config.class_names.get(part) {
                surface.set_class_name(part, class);
            }
        }
    }

    /// Show or hide tracks (auto-hide)
    pub fn set_tracks_shown<S: RenderSurface + ?Sized>(
        &mut self,
        surface: &mut S,
        shown: bool,
    ) -> usize {
        if self.tracks_shown == shown {
            return 0;
        }
        self.tracks_shown = shown;
        self.restyle(surface)
    }

    pub fn tracks_shown(&self) -> bool {
        self.tracks_shown
    }

    /// Full pass: measure, compute, apply
    ///
    /// A pass that changes layout-affecting styles (any track style, view
    /// margins, height bounds) invalidated its own reads, so it measures
    /// again until the layout holds still, at most [`MAX_PASSES`] times.
    /// Failed reads leave the previous geometry in place; the next event
    /// retries.
    pub fn remeasure<S: RenderSurface + ?Sized>(&mut self, surface: &mut S) -> Option<PassResult> {
        let mut writes = 0;
        for _ in 0..MAX_PASSES {
            let raw = match measure(surface) {
                Ok(raw) => raw,
                Err(err) => {
                    tracing::debug!("skipping measurement pass: {err}");
                    return None;
                }
            };
            let layout_before = self.layout_key();
            let geometry = geometry::compute(
                &raw,
                self.scrollbar_width,
                &self.config.auto_height_config(),
                self.config.thumb_min_size,
            );
            self.raw = Some(raw);
            self.geometry = Some(geometry);
            writes += self.restyle(surface);

            if self.layout_key() == layout_before {
                break;
            }
        }

        let raw = self.raw?;
        tracing::trace!(
            "measurement pass: view {:?} content {:?} -> {writes} writes",
            raw.view_client,
            raw.content_scroll
        );
        Some(PassResult {
            values: values_of(&raw),
            writes,
        })
    }

    /// Applied values of every style that moves or resizes measured boxes
    fn layout_key(&self) -> LayoutKey {
        LayoutKey {
            properties: LAYOUT_PROPERTIES.map(|(part, property)| {
                self.applied.get(part, &property).map(str::to_owned)
            }),
            track_revisions: [
                self.applied.revision(Part::TrackVertical),
                self.applied.revision(Part::TrackHorizontal),
            ],
        }
    }

    /// Compose styles from current state and write the difference
    pub fn restyle<S: RenderSurface + ?Sized>(&mut self, surface: &mut S) -> usize {
        let sheet = compose(&StyleContext {
            config: &self.config,
            scrollbar_width: self.scrollbar_width,
            geometry: self.geometry.as_ref(),
            universal_pending: self.universal_pending,
            tracks_shown: self.tracks_shown,
        });
        self.applied.apply(&sheet, surface)
    }

    /// Current values read from the last measurement
    pub fn values(&self) -> Option<ScrollValues> {
        self.raw.as_ref().map(values_of)
    }
}

/// Read everything a pass needs from the surface
pub fn measure<S: RenderSurface + ?Sized>(surface: &S) -> Result<RawMeasurement> {
    Ok(RawMeasurement {
        container_client: surface.client_size(Part::Container)?,
        content_scroll: surface.scroll_size()?,
        view_client: surface.client_size(Part::View)?,
        scroll_offset: surface.scroll_offset()?,
        track_length: AxisPair::new(
            surface.inner_length(Part::TrackVertical, Axis::Vertical)?,
            surface.inner_length(Part::TrackHorizontal, Axis::Horizontal)?,
        ),
        parent_height: surface.parent_height(),
    })
}

fn values_of(raw: &RawMeasurement) -> ScrollValues {
    ScrollValues::new(raw.scroll_offset, raw.content_scroll, raw.view_client)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::FakeSurface;
    use crate::types::Size;

    fn mounted(config: ScrollbarsConfig, surface: &mut FakeSurface) -> ScrollSyncController {
        let mut sync = ScrollSyncController::new(config);
        let width = surface.native_width();
        sync.on_mount(surface, width).unwrap();
        sync
    }

    #[test]
    fn test_mount_computes_geometry() {
        let mut surface = FakeSurface::new(17.0).with_content(Size::new(200.0, 200.0));
        let sync = mounted(ScrollbarsConfig::auto_height(0.0, 100.0), &mut surface);

        let geometry = sync.geometry().unwrap();
        assert!(geometry.track_visible.vertical);
        assert_eq!(geometry.thumb.vertical.unwrap().size, 48.0);
        assert_eq!(surface.style(Part::ThumbVertical, "height"), Some("48px"));
    }

    #[test]
    fn test_repeated_pass_writes_nothing() {
        let mut surface = FakeSurface::new(17.0).with_content(Size::new(200.0, 400.0));
        let mut sync = mounted(ScrollbarsConfig::default(), &mut surface);

        let before = sync.geometry().copied();
        let pass = sync.on_resize(&mut surface).unwrap();
        assert_eq!(pass.writes, 0);
        assert_eq!(sync.geometry().copied(), before);

        let offset = surface.scroll_offset().unwrap();
        assert_eq!(sync.on_scroll(&mut surface, offset).unwrap().writes, 0);
    }

    #[test]
    fn test_scroll_moves_thumb_only() {
        let mut surface = FakeSurface::new(17.0)
            .with_viewport(Size::new(100.0, 100.0))
            .with_content(Size::new(100.0, 200.0));
        let mut sync = mounted(ScrollbarsConfig::default(), &mut surface);

        surface.set_scroll_offset(Axis::Vertical, 100.0);
        let pass = sync.on_scroll(&mut surface, Offset::new(0.0, 100.0)).unwrap();
        assert_eq!(pass.writes, 1);
        assert_eq!(pass.values.top, 1.0);
        assert_eq!(
            surface.style(Part::ThumbVertical, "transform"),
            Some("translateY(48px)")
        );
    }

    #[test]
    fn test_failed_measurement_keeps_previous_geometry() {
        let mut surface = FakeSurface::new(17.0).with_content(Size::new(100.0, 300.0));
        let mut sync = mounted(ScrollbarsConfig::default(), &mut surface);
        let before = sync.geometry().copied();

        surface.detach();
        assert!(sync.on_resize(&mut surface).is_none());
        assert_eq!(sync.geometry().copied(), before);

        surface.attach();
        surface.set_content(Size::new(100.0, 100.0));
        assert!(sync.on_resize(&mut surface).is_some());
        assert!(!sync.geometry().unwrap().track_visible.vertical);
    }

    #[test]
    fn test_config_change_remeasures() {
        let mut surface = FakeSurface::new(17.0).with_content(Size::new(100.0, 300.0));
        let mut sync = mounted(ScrollbarsConfig::default(), &mut surface);

        sync.on_config_change(&mut surface, ScrollbarsConfig::auto_height(0.0, 120.0))
            .unwrap();
        assert_eq!(surface.client_size(Part::Container).unwrap().height, 120.0);
        assert_eq!(surface.style(Part::Container, "max-height"), Some("120px"));
    }

    #[test]
    fn test_initial_sheet_universal() {
        let sync = ScrollSyncController::new(
            ScrollbarsConfig::auto_height(0.0, 100.0).with_universal(),
        );
        let sheet = sync.initial_sheet(17.0);
        assert_eq!(
            sheet
                .get(Part::View, &crate::style::StyleProperty::MaxHeight)
                .map(|v| v.to_css())
                .as_deref(),
            Some("100px")
        );
    }
}
