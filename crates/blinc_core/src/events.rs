//! Event vocabulary
//!
//! Numeric event identifiers shared by every state machine in the
//! workspace. Widgets map these ids onto their own state enums through
//! [`crate::fsm::StateTransitions`].

/// Event type identifier
pub type EventType = u32;

/// Common event types
pub mod event_types {
    use super::EventType;

    pub const POINTER_DOWN: EventType = 1;
    pub const POINTER_UP: EventType = 2;
    pub const POINTER_MOVE: EventType = 3;
    pub const POINTER_ENTER: EventType = 4;
    pub const POINTER_LEAVE: EventType = 5;
    /// Drag event (pointer down + move)
    pub const DRAG: EventType = 6;
    /// Drag ended (pointer up after drag)
    pub const DRAG_END: EventType = 7;
    /// Drag aborted by the host (pointer capture lost, teardown)
    pub const DRAG_CANCEL: EventType = 8;
    pub const SCROLL: EventType = 30;
    /// Scroll offsets stopped changing
    pub const SCROLL_END: EventType = 31;
    pub const RESIZE: EventType = 40;
    /// Content inside a scroll view changed size
    pub const CONTENT_CHANGED: EventType = 41;
    /// Declarative configuration of a widget changed
    pub const CONFIG_CHANGED: EventType = 42;

    // Element lifecycle events
    pub const MOUNT: EventType = 60;
    pub const UNMOUNT: EventType = 61;

    // Deferred work
    pub const TIMER: EventType = 90;
}

/// Human-readable name for an event id, used in trace output
pub fn event_name(event: EventType) -> &'static str {
    use event_types::*;
    match event {
        POINTER_DOWN => "pointer_down",
        POINTER_UP => "pointer_up",
        POINTER_MOVE => "pointer_move",
        POINTER_ENTER => "pointer_enter",
        POINTER_LEAVE => "pointer_leave",
        DRAG => "drag",
        DRAG_END => "drag_end",
        DRAG_CANCEL => "drag_cancel",
        SCROLL => "scroll",
        SCROLL_END => "scroll_end",
        RESIZE => "resize",
        CONTENT_CHANGED => "content_changed",
        CONFIG_CHANGED => "config_changed",
        MOUNT => "mount",
        UNMOUNT => "unmount",
        TIMER => "timer",
        _ => "unknown",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_names() {
        assert_eq!(event_name(event_types::SCROLL), "scroll");
        assert_eq!(event_name(event_types::DRAG_CANCEL), "drag_cancel");
        assert_eq!(event_name(12345), "unknown");
    }
}
