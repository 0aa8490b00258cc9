//! Headless render surface
//!
//! [`FakeSurface`] lays out the six scrollbar parts the way a browser would
//! from nothing but the inline styles written to it, so whole scrollbars
//! instances can be driven and asserted on without a DOM.
//!
//! Layout model:
//! - the view reserves the native scrollbar width on both axes while its
//!   `overflow` is `scroll`, and nothing otherwise
//! - with `height: auto` on the container the view box height is the
//!   content height plus that reserve, clamped by the view's own
//!   `min-height`/`max-height`, and the container follows it
//! - otherwise the container has the fixed viewport size and the view box
//!   is the container grown by its negative margins
//! - a track's inner length is the container length minus its insets, and
//!   zero while the track is `display: none`

use std::collections::BTreeMap;

use crate::error::{Result, ScrollbarError};
use crate::probe::{ProbeHost, ProbeId, ProbeReading, ProbeSpec};
use crate::surface::{Part, RenderSurface};
use crate::types::{Axis, Offset, Size};

/// Default fixed container size
pub const DEFAULT_VIEWPORT: Size = Size::new(100.0, 100.0);

/// In-memory [`RenderSurface`]
#[derive(Debug, Clone)]
pub struct FakeSurface {
    native_width: f32,
    viewport: Size,
    content: Size,
    parent_height: Option<f32>,
    offset: Offset,
    styles: BTreeMap<(Part, String), String>,
    class_names: BTreeMap<Part, String>,
    style_writes: usize,
    attached: bool,
    probe_fails: bool,
    probes_attached: u32,
    live_probes: u32,
    text_selection: bool,
    pointer_captured: bool,
    pending_scroll: bool,
}

impl FakeSurface {
    /// Surface whose native scrollbars are `native_width` pixels wide
    pub fn new(native_width: f32) -> Self {
        Self {
            native_width,
            viewport: DEFAULT_VIEWPORT,
            content: Size::ZERO,
            parent_height: None,
            offset: Offset::ZERO,
            styles: BTreeMap::new(),
            class_names: BTreeMap::new(),
            style_writes: 0,
            attached: true,
            probe_fails: false,
            probes_attached: 0,
            live_probes: 0,
            text_selection: true,
            pointer_captured: false,
            pending_scroll: false,
        }
    }

    pub fn with_content(mut self, content: Size) -> Self {
        self.content = content;
        self
    }

    /// Fixed container size used outside auto-height
    pub fn with_viewport(mut self, viewport: Size) -> Self {
        self.viewport = viewport;
        self
    }

    pub fn with_parent_height(mut self, height: f32) -> Self {
        self.parent_height = Some(height);
        self
    }

    /// Make every probe attachment fail
    pub fn with_failing_probe(mut self) -> Self {
        self.probe_fails = true;
        self
    }

    pub fn native_width(&self) -> f32 {
        self.native_width
    }

    /// Replace the content size, clamping the scroll offset like a browser
    pub fn set_content(&mut self, content: Size) {
        self.content = content;
        self.clamp_offset();
    }

    pub fn set_viewport(&mut self, viewport: Size) {
        self.viewport = viewport;
        self.clamp_offset();
    }

    /// Detach from the document: every layout read fails
    pub fn detach(&mut self) {
        self.attached = false;
    }

    pub fn attach(&mut self) {
        self.attached = true;
    }

    /// Scroll as the user would, queueing a native scroll notification
    pub fn user_scroll(&mut self, axis: Axis, value: f32) {
        self.set_scroll_offset(axis, value);
    }

    /// Consume the pending native scroll notification, if any
    pub fn take_scroll_event(&mut self) -> bool {
        std::mem::take(&mut self.pending_scroll)
    }

    /// Current inline style of a part
    pub fn style(&self, part: Part, property: &str) -> Option<&str> {
        self.styles
            .get(&(part, property.to_string()))
            .map(String::as_str)
    }

    pub fn class_name(&self, part: Part) -> Option<&str> {
        self.class_names.get(&part).map(String::as_str)
    }

    /// Style writes received so far
    pub fn style_writes(&self) -> usize {
        self.style_writes
    }

    pub fn text_selection_enabled(&self) -> bool {
        self.text_selection
    }

    pub fn pointer_captured(&self) -> bool {
        self.pointer_captured
    }

    /// Probes attached and not yet detached
    pub fn live_probes(&self) -> u32 {
        self.live_probes
    }

    pub fn probes_attached(&self) -> u32 {
        self.probes_attached
    }

    // ========================================================================
    // Layout
    // ========================================================================

    fn check_attached(&self, part: Part) -> Result<()> {
        if self.attached {
            Ok(())
        } else {
            Err(ScrollbarError::unavailable(part, "detached from document"))
        }
    }

    fn px(&self, part: Part, property: &str) -> Option<f32> {
        self.style(part, property)
            .and_then(|text| parse_length(text, self.parent_height))
    }

    fn auto_height(&self) -> bool {
        self.style(Part::Container, "height") == Some("auto")
    }

    /// Space the native scrollbars take inside the view
    fn reserve(&self) -> f32 {
        if self.style(Part::View, "overflow") == Some("scroll") {
            self.native_width
        } else {
            0.0
        }
    }

    fn view_box(&self) -> Size {
        let margin_right = self.px(Part::View, "margin-right").unwrap_or(0.0);
        let margin_bottom = self.px(Part::View, "margin-bottom").unwrap_or(0.0);
        let width = self.viewport.width - margin_right;
        let height = if self.auto_height() {
            let min = self.px(Part::View, "min-height").unwrap_or(0.0);
            let max = self.px(Part::View, "max-height").unwrap_or(f32::INFINITY);
            (self.content.height + self.reserve()).min(max).max(min)
        } else {
            self.viewport.height - margin_bottom
        };
        Size::new(width.max(0.0), height.max(0.0))
    }

    fn container(&self) -> Size {
        if !self.auto_height() {
            return self.viewport;
        }
        let margin_bottom = self.px(Part::View, "margin-bottom").unwrap_or(0.0);
        let min = self.px(Part::Container, "min-height").unwrap_or(0.0);
        let max = self.px(Part::Container, "max-height").unwrap_or(f32::INFINITY);
        let height = (self.view_box().height + margin_bottom).min(max).max(min);
        Size::new(self.viewport.width, height.max(0.0))
    }

    fn view_client(&self) -> Size {
        let outer = self.view_box();
        let reserve = self.reserve();
        Size::new(
            (outer.width - reserve).max(0.0),
            (outer.height - reserve).max(0.0),
        )
    }

    fn scroll_extent(&self) -> Size {
        let client = self.view_client();
        Size::new(
            self.content.width.max(client.width),
            self.content.height.max(client.height),
        )
    }

    fn max_offset(&self, axis: Axis) -> f32 {
        (self.scroll_extent().along(axis) - self.view_client().along(axis)).max(0.0)
    }

    fn clamp_offset(&mut self) {
        for axis in Axis::BOTH {
            let clamped = self.offset.along(axis).clamp(0.0, self.max_offset(axis));
            self.offset.set_along(axis, clamped);
        }
    }

    fn track_length(&self, part: Part, axis: Axis) -> f32 {
        if self.style(part, "display") == Some("none") {
            return 0.0;
        }
        let container = self.container();
        let (start, end) = match axis {
            Axis::Vertical => ("top", "bottom"),
            Axis::Horizontal => ("left", "right"),
        };
        let insets = self.px(part, start).unwrap_or(0.0) + self.px(part, end).unwrap_or(0.0);
        (container.along(axis) - insets).max(0.0)
    }
}

impl Default for FakeSurface {
    fn default() -> Self {
        Self::new(0.0)
    }
}

/// Parse a CSS length as this surface understands it
fn parse_length(text: &str, parent: Option<f32>) -> Option<f32> {
    let text = text.trim();
    if text == "none" {
        return Some(f32::INFINITY);
    }
    if let Some(inner) = text.strip_prefix("calc(").and_then(|t| t.strip_suffix(')')) {
        let (lhs, rhs) = inner.split_once('+')?;
        return Some(parse_length(lhs, parent)? + parse_length(rhs, parent)?);
    }
    if let Some(pct) = text.strip_suffix('%') {
        let pct: f32 = pct.trim().parse().ok()?;
        return parent.map(|h| h * pct / 100.0);
    }
    text.strip_suffix("px").unwrap_or(text).trim().parse().ok()
}

impl ProbeHost for FakeSurface {
    fn attach_probe(&mut self, _spec: &ProbeSpec) -> Result<ProbeId> {
        if self.probe_fails || !self.attached {
            return Err(ScrollbarError::unavailable(Part::Container, "probe cannot attach"));
        }
        self.probes_attached += 1;
        self.live_probes += 1;
        Ok(ProbeId(self.probes_attached as u64))
    }

    fn read_probe(&self, _probe: ProbeId) -> Result<ProbeReading> {
        Ok(ProbeReading {
            outer_width: crate::probe::PROBE_OUTER.width,
            client_width: crate::probe::PROBE_OUTER.width - self.native_width,
        })
    }

    fn detach_probe(&mut self, _probe: ProbeId) {
        self.live_probes = self.live_probes.saturating_sub(1);
    }
}

impl RenderSurface for FakeSurface {
    fn client_size(&self, part: Part) -> Result<Size> {
        self.check_attached(part)?;
        Ok(match part {
            Part::Container => self.container(),
            Part::View => self.view_client(),
            Part::TrackVertical => Size::new(
                self.px(part, "width").unwrap_or(0.0),
                self.track_length(part, Axis::Vertical),
            ),
            Part::TrackHorizontal => Size::new(
                self.track_length(part, Axis::Horizontal),
                self.px(part, "height").unwrap_or(0.0),
            ),
            Part::ThumbVertical | Part::ThumbHorizontal => Size::new(
                self.px(part, "width").unwrap_or(0.0),
                self.px(part, "height").unwrap_or(0.0),
            ),
        })
    }

    fn inner_length(&self, part: Part, axis: Axis) -> Result<f32> {
        self.check_attached(part)?;
        Ok(match part {
            Part::TrackVertical | Part::TrackHorizontal => self.track_length(part, axis),
            _ => self.client_size(part)?.along(axis),
        })
    }

    fn scroll_size(&self) -> Result<Size> {
        self.check_attached(Part::View)?;
        Ok(self.scroll_extent())
    }

    fn scroll_offset(&self) -> Result<Offset> {
        self.check_attached(Part::View)?;
        Ok(self.offset)
    }

    fn parent_height(&self) -> Option<f32> {
        self.parent_height
    }

    fn set_scroll_offset(&mut self, axis: Axis, value: f32) {
        let clamped = value.clamp(0.0, self.max_offset(axis));
        if clamped != self.offset.along(axis) {
            self.offset.set_along(axis, clamped);
            self.pending_scroll = true;
        }
    }

    fn write_style(&mut self, part: Part, property: &str, value: Option<&str>) {
        let key = (part, property.to_string());
        match value {
            Some(value) => {
                self.styles.insert(key, value.to_string());
            }
            None => {
                self.styles.remove(&key);
            }
        }
        self.style_writes += 1;
    }

    fn set_class_name(&mut self, part: Part, class: &str) {
        self.class_names.insert(part, class.to_string());
    }

    fn set_text_selection(&mut self, enabled: bool) {
        self.text_selection = enabled;
    }

    fn set_pointer_capture(&mut self, captured: bool) {
        self.pointer_captured = captured;
    }
}
