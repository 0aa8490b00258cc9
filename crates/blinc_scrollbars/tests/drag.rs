//! Thumb drag and track click scenarios

mod common;

use blinc_scrollbars::testing::FakeSurface;
use blinc_scrollbars::{
    Axis, Part, ScrollbarEvent, ScrollbarWidthCache, Scrollbars, ScrollbarsConfig, Size,
};
use common::{mounted, pump};

static CACHE: ScrollbarWidthCache = ScrollbarWidthCache::new();

/// 100x100 viewport over 100x400 content: 96px track, 24px thumb, 72px of
/// thumb travel for 300px of scroll
fn tall() -> Scrollbars<FakeSurface> {
    let surface = FakeSurface::new(17.0)
        .with_viewport(Size::new(100.0, 100.0))
        .with_content(Size::new(100.0, 400.0));
    mounted(surface, ScrollbarsConfig::default(), &CACHE)
}

fn thumb_transform(sb: &Scrollbars<FakeSurface>) -> Option<String> {
    sb.surface()
        .style(Part::ThumbVertical, "transform")
        .map(str::to_string)
}

#[test]
fn test_layout_under_test() {
    let sb = tall();
    assert_eq!(sb.surface().style(Part::ThumbVertical, "height"), Some("24px"));
    assert_eq!(thumb_transform(&sb).as_deref(), Some("translateY(0px)"));
}

#[test]
fn test_drag_moves_view_and_thumb_follows() {
    let mut sb = tall();
    sb.handle(ScrollbarEvent::ThumbPointerDown {
        axis: Axis::Vertical,
        pointer: 10.0,
    });
    assert!(sb.is_dragging());
    assert!(!sb.surface().text_selection_enabled());
    assert!(sb.surface().pointer_captured());

    sb.handle(ScrollbarEvent::PointerMove { pointer: 46.0 });
    assert_eq!(sb.get_scroll_top(), 150.0);
    // Thumb only moves once the native scroll comes back around
    assert_eq!(thumb_transform(&sb).as_deref(), Some("translateY(0px)"));
    assert!(pump(&mut sb));
    assert_eq!(thumb_transform(&sb).as_deref(), Some("translateY(36px)"));

    sb.handle(ScrollbarEvent::PointerUp);
    assert!(!sb.is_dragging());
    assert!(sb.surface().text_selection_enabled());
    assert!(!sb.surface().pointer_captured());
}

#[test]
fn test_drag_round_trip_returns_to_start() {
    let mut sb = tall();
    sb.scroll_top(90.0);
    pump(&mut sb);

    sb.handle(ScrollbarEvent::ThumbPointerDown {
        axis: Axis::Vertical,
        pointer: 30.0,
    });
    sb.handle(ScrollbarEvent::PointerMove { pointer: 53.0 });
    pump(&mut sb);
    assert!(sb.get_scroll_top() > 90.0);

    sb.handle(ScrollbarEvent::PointerMove { pointer: 30.0 });
    pump(&mut sb);
    assert!((sb.get_scroll_top() - 90.0).abs() <= 1.0);
    sb.handle(ScrollbarEvent::PointerUp);
}

#[test]
fn test_drag_clamps_at_both_ends() {
    let mut sb = tall();
    sb.handle(ScrollbarEvent::ThumbPointerDown {
        axis: Axis::Vertical,
        pointer: 10.0,
    });
    sb.handle(ScrollbarEvent::PointerMove { pointer: 1000.0 });
    pump(&mut sb);
    assert_eq!(sb.get_scroll_top(), 300.0);
    assert_eq!(thumb_transform(&sb).as_deref(), Some("translateY(72px)"));

    sb.handle(ScrollbarEvent::PointerMove { pointer: -1000.0 });
    pump(&mut sb);
    assert_eq!(sb.get_scroll_top(), 0.0);
}

#[test]
fn test_track_click_centers_thumb_on_pointer() {
    let mut sb = tall();
    sb.handle(ScrollbarEvent::TrackPointerDown {
        axis: Axis::Vertical,
        pointer: 48.0,
    });
    assert_eq!(sb.get_scroll_top(), 150.0);
    pump(&mut sb);
    assert_eq!(thumb_transform(&sb).as_deref(), Some("translateY(36px)"));

    sb.handle(ScrollbarEvent::TrackPointerDown {
        axis: Axis::Vertical,
        pointer: 95.0,
    });
    assert_eq!(sb.get_scroll_top(), 300.0);
    assert!(!sb.is_dragging());
}

#[test]
fn test_other_axis_ignored_during_drag() {
    let surface = FakeSurface::new(17.0).with_content(Size::new(400.0, 400.0));
    let mut sb = mounted(surface, ScrollbarsConfig::default(), &CACHE);

    sb.handle(ScrollbarEvent::ThumbPointerDown {
        axis: Axis::Vertical,
        pointer: 0.0,
    });
    sb.handle(ScrollbarEvent::ThumbPointerDown {
        axis: Axis::Horizontal,
        pointer: 0.0,
    });
    sb.handle(ScrollbarEvent::PointerMove { pointer: 36.0 });
    assert_eq!(sb.get_scroll_top(), 150.0);
    assert_eq!(sb.get_scroll_left(), 0.0);

    // Track clicks wait for the drag to end too
    sb.handle(ScrollbarEvent::TrackPointerDown {
        axis: Axis::Horizontal,
        pointer: 90.0,
    });
    assert_eq!(sb.get_scroll_left(), 0.0);

    sb.handle(ScrollbarEvent::PointerUp);
    sb.handle(ScrollbarEvent::ThumbPointerDown {
        axis: Axis::Horizontal,
        pointer: 0.0,
    });
    sb.handle(ScrollbarEvent::PointerMove { pointer: 36.0 });
    assert_eq!(sb.get_scroll_left(), 150.0);
}

#[test]
fn test_stray_pointer_events_are_noops() {
    let mut sb = tall();
    sb.handle(ScrollbarEvent::PointerMove { pointer: 50.0 });
    sb.handle(ScrollbarEvent::PointerUp);
    sb.handle(ScrollbarEvent::DragCancel);
    assert_eq!(sb.get_scroll_top(), 0.0);
    assert!(!sb.surface_mut().take_scroll_event());
    assert!(sb.surface().text_selection_enabled());
}

#[test]
fn test_cancel_releases_pointer() {
    let mut sb = tall();
    sb.handle(ScrollbarEvent::ThumbPointerDown {
        axis: Axis::Vertical,
        pointer: 5.0,
    });
    sb.handle(ScrollbarEvent::DragCancel);
    assert!(!sb.is_dragging());
    assert!(!sb.surface().pointer_captured());
    sb.handle(ScrollbarEvent::PointerMove { pointer: 50.0 });
    assert_eq!(sb.get_scroll_top(), 0.0);
}

#[test]
fn test_no_thumb_no_drag() {
    let surface = FakeSurface::new(17.0).with_content(Size::new(50.0, 50.0));
    let mut sb = mounted(surface, ScrollbarsConfig::default(), &CACHE);
    sb.handle(ScrollbarEvent::ThumbPointerDown {
        axis: Axis::Vertical,
        pointer: 5.0,
    });
    assert!(!sb.is_dragging());
    assert!(sb.surface().text_selection_enabled());
}
