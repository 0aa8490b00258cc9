//! Thumb dragging
//!
//! Converts pointer movement on a thumb into native scroll offsets. The
//! controller never moves a thumb itself: it commands the view's scroll
//! position and the resulting scroll notification repaints the thumb, so
//! the view stays the single source of truth.

use blinc_core::events::event_types::*;
use blinc_core::fsm::{Fsm, StateTransitions};

use crate::error::{Result, ScrollbarError};
use crate::geometry;
use crate::surface::RenderSurface;
use crate::types::{Axis, RawMeasurement};

/// Drag interaction state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DragState {
    #[default]
    Idle,
    Dragging,
}

impl StateTransitions for DragState {
    fn on_event(&self, event: u32) -> Option<Self> {
        match (self, event) {
            (DragState::Idle, POINTER_DOWN) => Some(DragState::Dragging),
            (DragState::Dragging, DRAG) => Some(DragState::Dragging),
            (DragState::Dragging, DRAG_END | DRAG_CANCEL | UNMOUNT) => Some(DragState::Idle),
            _ => None,
        }
    }
}

/// Everything a drag needs, captured when it starts
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragSession {
    pub axis: Axis,
    /// Pointer position along `axis` at drag start
    pub start_pointer: f32,
    /// View scroll offset along `axis` at drag start
    pub start_scroll: f32,
    pub track_length: f32,
    pub thumb_size: f32,
    /// Content scroll extent along `axis`
    pub content_extent: f32,
    /// View client extent along `axis`
    pub view_extent: f32,
}

impl DragSession {
    fn capture(axis: Axis, pointer: f32, raw: &RawMeasurement, thumb_size: f32) -> Self {
        Self {
            axis,
            start_pointer: pointer,
            start_scroll: raw.scroll_offset.along(axis),
            track_length: *raw.track_length.get(axis),
            thumb_size,
            content_extent: raw.content_scroll.along(axis),
            view_extent: raw.view_client.along(axis),
        }
    }

    fn max_scroll(&self) -> f32 {
        (self.content_extent - self.view_extent).max(0.0)
    }

    /// Scroll offset for a pointer position during this drag
    pub fn scroll_for_pointer(&self, pointer: f32) -> f32 {
        let delta = geometry::scroll_for_thumb_travel(
            pointer - self.start_pointer,
            self.view_extent,
            self.content_extent,
            self.track_length,
            self.thumb_size,
        );
        (self.start_scroll + delta).clamp(0.0, self.max_scroll())
    }
}

/// Translates thumb drags and track clicks into scroll offsets
#[derive(Debug, Default)]
pub struct DragController {
    fsm: Fsm<DragState>,
    session: Option<DragSession>,
}

impl DragController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> DragState {
        self.fsm.state()
    }

    pub fn is_dragging(&self) -> bool {
        self.session.is_some()
    }

    pub fn session(&self) -> Option<&DragSession> {
        self.session.as_ref()
    }

    /// Pointer pressed on a thumb
    ///
    /// Ignored (returns false) while another drag is active, including one
    /// on the other axis.
    pub fn on_drag_start<S: RenderSurface + ?Sized>(
        &mut self,
        surface: &mut S,
        axis: Axis,
        pointer: f32,
        raw: &RawMeasurement,
        thumb_size: f32,
    ) -> bool {
        if !self.fsm.can_send(POINTER_DOWN) {
            tracing::trace!("ignoring {axis:?} drag start, drag already active");
            return false;
        }
        self.fsm.send(POINTER_DOWN);
        let mut session = DragSession::capture(axis, pointer, raw, thumb_size);
        if let Ok(offset) = surface.scroll_offset() {
            session.start_scroll = offset.along(axis);
        }
        self.session = Some(session);

        surface.set_text_selection(false);
        surface.set_pointer_capture(true);
        tracing::debug!("thumb drag start on {axis:?} at {pointer:.1}");
        true
    }

    /// Pointer moved during a drag; commands and returns the new offset
    pub fn on_drag_move<S: RenderSurface + ?Sized>(
        &mut self,
        surface: &mut S,
        pointer: f32,
    ) -> Result<f32> {
        let session = self.session.ok_or(ScrollbarError::StaleDragSession)?;
        self.fsm.send(DRAG);
        let target = session.scroll_for_pointer(pointer);
        surface.set_scroll_offset(session.axis, target);
        Ok(target)
    }

    /// Pointer released
    pub fn on_drag_end<S: RenderSurface + ?Sized>(
        &mut self,
        surface: &mut S,
    ) -> Result<DragSession> {
        self.finish(surface, DRAG_END)
    }

    /// Drag aborted by the host (capture lost, teardown)
    pub fn on_drag_cancel<S: RenderSurface + ?Sized>(
        &mut self,
        surface: &mut S,
    ) -> Result<DragSession> {
        self.finish(surface, DRAG_CANCEL)
    }

    fn finish<S: RenderSurface + ?Sized>(
        &mut self,
        surface: &mut S,
        event: u32,
    ) -> Result<DragSession> {
        let session = self.session.take().ok_or(ScrollbarError::StaleDragSession)?;
        self.fsm.send(event);
        surface.set_pointer_capture(false);
        surface.set_text_selection(true);
        tracing::debug!("thumb drag on {:?} ended", session.axis);
        Ok(session)
    }

    /// Click on a track outside the thumb: center the thumb on the pointer
    ///
    /// `pointer` is relative to the track's inner start. Returns the
    /// commanded offset.
    pub fn on_track_click<S: RenderSurface + ?Sized>(
        &mut self,
        surface: &mut S,
        axis: Axis,
        pointer: f32,
        raw: &RawMeasurement,
        thumb_size: f32,
    ) -> f32 {
        let view = raw.view_client.along(axis);
        let content = raw.content_scroll.along(axis);
        let track = *raw.track_length.get(axis);
        let target = geometry::scroll_for_thumb_travel(
            pointer - thumb_size / 2.0,
            view,
            content,
            track,
            thumb_size,
        )
        .clamp(0.0, raw.max_scroll(axis));
        surface.set_scroll_offset(axis, target);
        tracing::trace!("track click on {axis:?} at {pointer:.1} -> {target:.1}");
        target
    }
}
