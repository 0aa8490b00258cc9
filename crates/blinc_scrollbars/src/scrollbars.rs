//! Scrollbars facade
//!
//! [`Scrollbars`] is what a host embeds: it owns the render surface, the
//! sync and drag controllers and the deferred task scheduler, and runs every
//! notification through one ordered event queue.
//!
//! ```rust
//! use std::time::Duration;
//! use blinc_scrollbars::testing::FakeSurface;
//! use blinc_scrollbars::{Part, ScrollbarEvent, Scrollbars, ScrollbarsConfig, Size};
//!
//! let surface = FakeSurface::new(17.0).with_content(Size::new(100.0, 200.0));
//! let mut scrollbars = Scrollbars::new(surface, ScrollbarsConfig::auto_height(0.0, 100.0));
//! scrollbars.handle(ScrollbarEvent::Mount);
//! scrollbars.advance(Duration::from_millis(100));
//!
//! assert_eq!(scrollbars.surface().style(Part::ThumbVertical, "height"), Some("48px"));
//! ```

use std::collections::VecDeque;
use std::fmt;
use std::time::Duration;

use blinc_core::events::{event_name, event_types::*, EventType};
use blinc_core::fsm::{Fsm, StateTransitions};

use crate::config::ScrollbarsConfig;
use crate::drag::DragController;
use crate::geometry::ContainerHeight;
use crate::probe::{self, ScrollbarWidthCache};
use crate::scheduler::{TaskId, TaskScheduler};
use crate::style::StyleSheet;
use crate::surface::{Part, RenderSurface};
use crate::sync::{PassResult, ScrollSyncController};
use crate::types::{Axis, Offset, RawMeasurement, Size};
use crate::values::ScrollValues;

// ============================================================================
// Events
// ============================================================================

/// A notification from the host
#[derive(Debug, Clone, PartialEq)]
pub enum ScrollbarEvent {
    /// Parts are in the document; first client-side measurement
    Mount,
    /// The view's native scroll position changed
    Scroll,
    /// The container was resized
    Resize,
    /// The content changed size
    ContentChanged,
    /// New declarative configuration
    ConfigChanged(ScrollbarsConfig),
    /// Pointer pressed on a thumb; `pointer` is the pointer position along
    /// the thumb's axis
    ThumbPointerDown { axis: Axis, pointer: f32 },
    /// Pointer moved while a thumb is held
    PointerMove { pointer: f32 },
    /// Pointer released
    PointerUp,
    /// Pointer pressed on a track outside its thumb; `pointer` is relative
    /// to the track's inner start
    TrackPointerDown { axis: Axis, pointer: f32 },
    TrackEnter,
    TrackLeave,
    /// Pointer capture lost
    DragCancel,
    Unmount,
}

impl ScrollbarEvent {
    pub fn event_type(&self) -> EventType {
        match self {
            ScrollbarEvent::Mount => MOUNT,
            ScrollbarEvent::Scroll => SCROLL,
            ScrollbarEvent::Resize => RESIZE,
            ScrollbarEvent::ContentChanged => CONTENT_CHANGED,
            ScrollbarEvent::ConfigChanged(_) => CONFIG_CHANGED,
            ScrollbarEvent::ThumbPointerDown { .. } => POINTER_DOWN,
            ScrollbarEvent::PointerMove { .. } => POINTER_MOVE,
            ScrollbarEvent::PointerUp => POINTER_UP,
            ScrollbarEvent::TrackPointerDown { .. } => POINTER_DOWN,
            ScrollbarEvent::TrackEnter => POINTER_ENTER,
            ScrollbarEvent::TrackLeave => POINTER_LEAVE,
            ScrollbarEvent::DragCancel => DRAG_CANCEL,
            ScrollbarEvent::Unmount => UNMOUNT,
        }
    }

    /// Events that need a full remeasurement
    pub fn is_measurement(&self) -> bool {
        matches!(
            self,
            ScrollbarEvent::Mount
                | ScrollbarEvent::Resize
                | ScrollbarEvent::ContentChanged
                | ScrollbarEvent::ConfigChanged(_)
        )
    }
}

// ============================================================================
// State Machines
// ============================================================================

/// Instance lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Lifecycle {
    #[default]
    Created,
    Mounted,
    Unmounted,
}

impl StateTransitions for Lifecycle {
    fn on_event(&self, event: u32) -> Option<Self> {
        match (self, event) {
            (Lifecycle::Created, MOUNT) => Some(Lifecycle::Mounted),
            (Lifecycle::Created | Lifecycle::Mounted, UNMOUNT) => Some(Lifecycle::Unmounted),
            _ => None,
        }
    }
}

/// Whether the view is being scrolled right now
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ScrollActivity {
    #[default]
    Idle,
    Scrolling,
}

impl StateTransitions for ScrollActivity {
    fn on_event(&self, event: u32) -> Option<Self> {
        match (self, event) {
            (ScrollActivity::Idle, SCROLL) => Some(ScrollActivity::Scrolling),
            (ScrollActivity::Scrolling, SCROLL) => Some(ScrollActivity::Scrolling),
            (ScrollActivity::Scrolling, SCROLL_END | UNMOUNT) => Some(ScrollActivity::Idle),
            _ => None,
        }
    }
}

/// Deferred work keyed to one instance
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Task {
    /// One-shot remeasure after mount, for platforms that settle late
    SettleRemeasure,
    HideTracks,
    DetectScrollStop,
}

// ============================================================================
// Callbacks
// ============================================================================

type ValuesCallback = Box<dyn FnMut(&ScrollValues)>;
type Callback = Box<dyn FnMut()>;

#[derive(Default)]
struct Callbacks {
    on_update: Option<ValuesCallback>,
    on_scroll: Option<ValuesCallback>,
    on_scroll_frame: Option<ValuesCallback>,
    on_scroll_start: Option<Callback>,
    on_scroll_stop: Option<Callback>,
}

// ============================================================================
// Scrollbars
// ============================================================================

/// Custom scrollbars over a host-provided render surface
pub struct Scrollbars<S: RenderSurface> {
    surface: S,
    sync: ScrollSyncController,
    drag: DragController,
    tasks: TaskScheduler<Task>,
    queue: VecDeque<ScrollbarEvent>,
    lifecycle: Fsm<Lifecycle>,
    activity: Fsm<ScrollActivity>,
    width_cache: &'static ScrollbarWidthCache,
    hide_task: Option<TaskId>,
    /// Offset seen at the previous scroll-stop check
    stop_check_offset: Option<Offset>,
    track_hover: bool,
    callbacks: Callbacks,
}

impl<S: RenderSurface> Scrollbars<S> {
    /// Create an instance using the process-wide scrollbar width
    pub fn new(surface: S, config: ScrollbarsConfig) -> Self {
        Self::with_probe_cache(surface, config, probe::process_cache())
    }

    /// Create an instance that reads the native scrollbar width from `cache`
    pub fn with_probe_cache(
        surface: S,
        config: ScrollbarsConfig,
        cache: &'static ScrollbarWidthCache,
    ) -> Self {
        Self {
            surface,
            sync: ScrollSyncController::new(config),
            drag: DragController::new(),
            tasks: TaskScheduler::new(),
            queue: VecDeque::new(),
            lifecycle: Fsm::default(),
            activity: Fsm::default(),
            width_cache: cache,
            hide_task: None,
            stop_check_offset: None,
            track_hover: false,
            callbacks: Callbacks::default(),
        }
    }

    /// Called with fresh values after every style pass
    pub fn on_update(mut self, f: impl FnMut(&ScrollValues) + 'static) -> Self {
        self.callbacks.on_update = Some(Box::new(f));
        self
    }

    /// Called for every scroll notification
    pub fn on_scroll(mut self, f: impl FnMut(&ScrollValues) + 'static) -> Self {
        self.callbacks.on_scroll = Some(Box::new(f));
        self
    }

    /// Called once the thumbs reflect a scroll notification
    pub fn on_scroll_frame(mut self, f: impl FnMut(&ScrollValues) + 'static) -> Self {
        self.callbacks.on_scroll_frame = Some(Box::new(f));
        self
    }

    pub fn on_scroll_start(mut self, f: impl FnMut() + 'static) -> Self {
        self.callbacks.on_scroll_start = Some(Box::new(f));
        self
    }

    pub fn on_scroll_stop(mut self, f: impl FnMut() + 'static) -> Self {
        self.callbacks.on_scroll_stop = Some(Box::new(f));
        self
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn config(&self) -> &ScrollbarsConfig {
        self.sync.config()
    }

    pub fn sync(&self) -> &ScrollSyncController {
        &self.sync
    }

    pub fn lifecycle(&self) -> Lifecycle {
        self.lifecycle.state()
    }

    pub fn is_scrolling(&self) -> bool {
        self.activity.is_in(ScrollActivity::Scrolling)
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_dragging()
    }

    pub fn tracks_shown(&self) -> bool {
        self.sync.tracks_shown()
    }

    /// Container height derived from content in auto-height mode, for hosts
    /// laying out around the scrollbars; `None` before the first measurement
    pub fn container_height(&self) -> Option<ContainerHeight> {
        self.sync.geometry().map(|geometry| geometry.container_height)
    }

    /// Deferred tasks still waiting to run
    pub fn pending_tasks(&self) -> usize {
        self.tasks.pending_count()
    }

    /// Styles for the first render, before [`ScrollbarEvent::Mount`]
    ///
    /// With `universal` set this is independent of the environment, so
    /// server and client markup match.
    pub fn initial_styles(&mut self) -> StyleSheet {
        let width = if self.sync.config().universal {
            0.0
        } else {
            self.width_cache.get_or_probe(&mut self.surface)
        };
        self.sync.initial_sheet(width)
    }

    // ========================================================================
    // Event Queue
    // ========================================================================

    /// Queue an event without processing it
    ///
    /// Measurement events go ahead of any queued scroll notifications so
    /// thumbs never use stale extents.
    pub fn enqueue(&mut self, event: ScrollbarEvent) {
        if event.is_measurement() {
            if let Some(at) = self.queue.iter().position(|e| matches!(e, ScrollbarEvent::Scroll)) {
                self.queue.insert(at, event);
                return;
            }
        }
        self.queue.push_back(event);
    }

    /// Process every queued event in order
    pub fn flush(&mut self) {
        while let Some(event) = self.queue.pop_front() {
            self.dispatch(event);
        }
    }

    /// Queue an event and process the queue
    pub fn handle(&mut self, event: ScrollbarEvent) {
        self.enqueue(event);
        self.flush();
    }

    /// Queued, unprocessed events
    pub fn queued(&self) -> usize {
        self.queue.len()
    }

    fn dispatch(&mut self, event: ScrollbarEvent) {
        let kind = event.event_type();
        match self.lifecycle.state() {
            Lifecycle::Unmounted => {
                tracing::trace!("ignoring {} after unmount", event_name(kind));
                return;
            }
            Lifecycle::Created if !matches!(
                event,
                ScrollbarEvent::Mount | ScrollbarEvent::ConfigChanged(_) | ScrollbarEvent::Unmount
            ) =>
            {
                tracing::trace!("ignoring {} before mount", event_name(kind));
                return;
            }
            _ => {}
        }

        match event {
            ScrollbarEvent::Mount => self.mount(),
            ScrollbarEvent::Scroll => self.scroll(),
            ScrollbarEvent::Resize | ScrollbarEvent::ContentChanged => {
                let pass = self.sync.on_resize(&mut self.surface);
                self.after_pass(pass);
            }
            ScrollbarEvent::ConfigChanged(config) => self.reconfigure(config),
            ScrollbarEvent::ThumbPointerDown { axis, pointer } => self.drag_start(axis, pointer),
            ScrollbarEvent::PointerMove { pointer } => {
                if let Err(err) = self.drag.on_drag_move(&mut self.surface, pointer) {
                    tracing::trace!("pointer move ignored: {err}");
                }
            }
            ScrollbarEvent::PointerUp => {
                if self.drag.on_drag_end(&mut self.surface).is_ok() {
                    self.hide_tracks_later();
                }
            }
            ScrollbarEvent::DragCancel => {
                if self.drag.on_drag_cancel(&mut self.surface).is_ok() {
                    self.hide_tracks_later();
                }
            }
            ScrollbarEvent::TrackPointerDown { axis, pointer } => self.track_click(axis, pointer),
            ScrollbarEvent::TrackEnter => {
                self.track_hover = true;
                self.show_tracks();
            }
            ScrollbarEvent::TrackLeave => {
                self.track_hover = false;
                self.hide_tracks_later();
            }
            ScrollbarEvent::Unmount => self.unmount(),
        }
    }

    // ========================================================================
    // Handlers
    // ========================================================================

    fn mount(&mut self) {
        self.lifecycle.send(MOUNT);
        let width = self.width_cache.get_or_probe(&mut self.surface);
        let pass = self.sync.on_mount(&mut self.surface, width);
        self.after_pass(pass);
        self.tasks
            .schedule(self.sync.config().settle_delay(), Task::SettleRemeasure);
    }

    fn reconfigure(&mut self, config: ScrollbarsConfig) {
        if self.lifecycle.is_in(Lifecycle::Created) {
            self.sync = ScrollSyncController::new(config);
            return;
        }
        let was_auto_hide = self.sync.config().auto_hide;
        let pass = self.sync.on_config_change(&mut self.surface, config);
        self.after_pass(pass);
        if was_auto_hide && !self.sync.config().auto_hide {
            self.cancel_hide();
        }
    }

    fn scroll(&mut self) {
        let offset = match self.surface.scroll_offset() {
            Ok(offset) => offset,
            Err(err) => {
                tracing::debug!("scroll notification without a readable offset: {err}");
                return;
            }
        };

        if !self.activity.is_in(ScrollActivity::Scrolling) {
            self.activity.send(SCROLL);
            self.stop_check_offset = None;
            self.tasks
                .schedule(self.sync.config().scroll_stop_interval(), Task::DetectScrollStop);
            if let Some(f) = self.callbacks.on_scroll_start.as_mut() {
                f();
            }
            self.show_tracks();
        }

        let Some(pass) = self.sync.on_scroll(&mut self.surface, offset) else {
            return;
        };
        if let Some(f) = self.callbacks.on_scroll.as_mut() {
            f(&pass.values);
        }
        self.emit_update(&pass.values);
        if let Some(f) = self.callbacks.on_scroll_frame.as_mut() {
            f(&pass.values);
        }
    }

    fn drag_start(&mut self, axis: Axis, pointer: f32) {
        let Some((raw, thumb)) = self.thumb_on(axis) else {
            tracing::trace!("no {axis:?} thumb to drag");
            return;
        };
        if self
            .drag
            .on_drag_start(&mut self.surface, axis, pointer, &raw, thumb)
        {
            self.show_tracks();
        }
    }

    fn track_click(&mut self, axis: Axis, pointer: f32) {
        if self.drag.is_dragging() {
            return;
        }
        let Some((raw, thumb)) = self.thumb_on(axis) else {
            return;
        };
        self.drag
            .on_track_click(&mut self.surface, axis, pointer, &raw, thumb);
    }

    /// Last measurement and the thumb length on `axis`, if a thumb exists
    fn thumb_on(&self, axis: Axis) -> Option<(RawMeasurement, f32)> {
        let raw = *self.sync.raw()?;
        let thumb = (*self.sync.geometry()?.thumb.get(axis))?;
        (thumb.size > 0.0).then_some((raw, thumb.size))
    }

    fn after_pass(&mut self, pass: Option<PassResult>) {
        if let Some(pass) = pass {
            self.emit_update(&pass.values);
        }
    }

    fn emit_update(&mut self, values: &ScrollValues) {
        if let Some(f) = self.callbacks.on_update.as_mut() {
            f(values);
        }
    }

    // ========================================================================
    // Auto-hide
    // ========================================================================

    fn show_tracks(&mut self) {
        if !self.sync.config().auto_hide {
            return;
        }
        self.cancel_hide();
        self.set_tracks_shown(true);
    }

    /// Toggle track visibility; a pass that wrote anything reports an update
    fn set_tracks_shown(&mut self, shown: bool) {
        if self.sync.set_tracks_shown(&mut self.surface, shown) == 0 {
            return;
        }
        if let Some(values) = self.sync.values() {
            self.emit_update(&values);
        }
    }

    fn hide_tracks_later(&mut self) {
        if !self.sync.config().auto_hide || self.hide_blocked() {
            return;
        }
        self.cancel_hide();
        self.hide_task = Some(
            self.tasks
                .schedule(self.sync.config().auto_hide_timeout(), Task::HideTracks),
        );
    }

    fn hide_blocked(&self) -> bool {
        self.drag.is_dragging() || self.is_scrolling() || self.track_hover
    }

    fn cancel_hide(&mut self) {
        if let Some(id) = self.hide_task.take() {
            self.tasks.cancel(id);
        }
    }

    // ========================================================================
    // Time
    // ========================================================================

    /// Advance the instance clock, running every task that falls due
    pub fn advance(&mut self, elapsed: Duration) {
        let until = self.tasks.now().saturating_add(elapsed);
        while let Some((id, task)) = self.tasks.pop_due(until) {
            self.run_task(id, task);
        }
        self.tasks.finish_advance(until);
    }

    fn run_task(&mut self, id: TaskId, task: Task) {
        tracing::trace!("{} {task:?} at {:?}", event_name(TIMER), self.tasks.now());
        match task {
            Task::SettleRemeasure => {
                let pass = self.sync.remeasure(&mut self.surface);
                self.after_pass(pass);
            }
            Task::HideTracks => {
                if self.hide_task == Some(id) {
                    self.hide_task = None;
                }
                if !self.hide_blocked() {
                    self.set_tracks_shown(false);
                }
            }
            Task::DetectScrollStop => self.detect_scroll_stop(),
        }
    }

    fn detect_scroll_stop(&mut self) {
        let current = match self.surface.scroll_offset() {
            Ok(offset) => offset,
            Err(err) => {
                // Nothing can scroll a view that cannot be read
                tracing::debug!("ending scroll activity: {err}");
                self.finish_scroll();
                return;
            }
        };
        if self.stop_check_offset == Some(current) {
            self.finish_scroll();
            return;
        }
        self.stop_check_offset = Some(current);
        self.tasks
            .schedule(self.sync.config().scroll_stop_interval(), Task::DetectScrollStop);
    }

    fn finish_scroll(&mut self) {
        self.activity.send(SCROLL_END);
        self.stop_check_offset = None;
        if let Some(f) = self.callbacks.on_scroll_stop.as_mut() {
            f();
        }
        self.hide_tracks_later();
    }

    // ========================================================================
    // Teardown
    // ========================================================================

    /// Cancel all deferred work and release any drag; later events are
    /// ignored
    pub fn unmount(&mut self) {
        if self.lifecycle.is_in(Lifecycle::Unmounted) {
            return;
        }
        self.tasks.cancel_all();
        self.hide_task = None;
        if self.drag.is_dragging() {
            let _ = self.drag.on_drag_cancel(&mut self.surface);
        }
        self.activity.send(UNMOUNT);
        self.queue.clear();
        self.lifecycle.send(UNMOUNT);
        tracing::debug!("scrollbars unmounted");
    }

    // ========================================================================
    // Imperative API
    // ========================================================================

    fn live(&self) -> bool {
        !self.lifecycle.is_in(Lifecycle::Unmounted)
    }

    pub fn scroll_top(&mut self, top: f32) {
        if self.live() {
            self.surface.set_scroll_offset(Axis::Vertical, top.max(0.0));
        }
    }

    pub fn scroll_left(&mut self, left: f32) {
        if self.live() {
            self.surface.set_scroll_offset(Axis::Horizontal, left.max(0.0));
        }
    }

    pub fn scroll_to_top(&mut self) {
        self.scroll_top(0.0);
    }

    pub fn scroll_to_bottom(&mut self) {
        let bottom = self.get_scroll_height() - self.get_client_height();
        self.scroll_top(bottom);
    }

    pub fn scroll_to_left(&mut self) {
        self.scroll_left(0.0);
    }

    pub fn scroll_to_right(&mut self) {
        let right = self.get_scroll_width() - self.get_client_width();
        self.scroll_left(right);
    }

    pub fn get_scroll_top(&self) -> f32 {
        self.offset().y
    }

    pub fn get_scroll_left(&self) -> f32 {
        self.offset().x
    }

    pub fn get_scroll_width(&self) -> f32 {
        self.scroll_extent().width
    }

    pub fn get_scroll_height(&self) -> f32 {
        self.scroll_extent().height
    }

    pub fn get_client_width(&self) -> f32 {
        self.client().width
    }

    pub fn get_client_height(&self) -> f32 {
        self.client().height
    }

    /// Scroll summary read live from the surface
    ///
    /// Falls back to the last measured values when the surface cannot be
    /// read.
    pub fn get_values(&self) -> ScrollValues {
        let live = self
            .surface
            .scroll_offset()
            .and_then(|offset| Ok((offset, self.surface.scroll_size()?)))
            .and_then(|(offset, scroll)| {
                Ok(ScrollValues::new(
                    offset,
                    scroll,
                    self.surface.client_size(Part::View)?,
                ))
            });
        match live {
            Ok(values) => values,
            Err(err) => {
                tracing::debug!("get_values from last measurement: {err}");
                self.sync.values().unwrap_or_default()
            }
        }
    }

    fn offset(&self) -> Offset {
        self.surface.scroll_offset().unwrap_or_default()
    }

    fn scroll_extent(&self) -> Size {
        self.surface.scroll_size().unwrap_or_default()
    }

    fn client(&self) -> Size {
        self.surface.client_size(Part::View).unwrap_or_default()
    }
}

impl<S: RenderSurface + fmt::Debug> fmt::Debug for Scrollbars<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Scrollbars")
            .field("surface", &self.surface)
            .field("lifecycle", &self.lifecycle.state())
            .field("activity", &self.activity.state())
            .field("dragging", &self.drag.is_dragging())
            .field("queued", &self.queue.len())
            .field("pending_tasks", &self.tasks.pending_count())
            .finish()
    }
}
