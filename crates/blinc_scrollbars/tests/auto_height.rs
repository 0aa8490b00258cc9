//! Auto-height sizing scenarios

mod common;

use blinc_scrollbars::testing::FakeSurface;
use blinc_scrollbars::{
    ContainerHeight, HeightBound, Part, RenderSurface, ScrollbarEvent, ScrollbarWidthCache,
    ScrollbarsConfig, Size,
};
use common::{content, mounted};

static CACHE: ScrollbarWidthCache = ScrollbarWidthCache::new();
static OVERLAY: ScrollbarWidthCache = ScrollbarWidthCache::new();

#[test]
fn test_bounds_become_styles() {
    let sb = mounted(content(200.0, 200.0), ScrollbarsConfig::auto_height(0.0, 100.0), &CACHE);
    let surface = sb.surface();

    assert_eq!(surface.style(Part::Container, "position"), Some("relative"));
    assert_eq!(surface.style(Part::Container, "min-height"), Some("0px"));
    assert_eq!(surface.style(Part::Container, "max-height"), Some("100px"));
    assert_eq!(surface.style(Part::View, "position"), Some("relative"));
    assert_eq!(surface.style(Part::View, "min-height"), Some("17px"));
    assert_eq!(surface.style(Part::View, "max-height"), Some("117px"));
    assert_eq!(surface.style(Part::View, "margin-right"), Some("-17px"));
    assert_eq!(surface.style(Part::View, "margin-bottom"), Some("-17px"));
}

#[test]
fn test_short_content_has_no_thumb() {
    let sb = mounted(content(100.0, 50.0), ScrollbarsConfig::auto_height(0.0, 100.0), &CACHE);

    assert_eq!(sb.surface().client_size(Part::View).unwrap().height, 50.0);
    assert_eq!(sb.surface().client_size(Part::Container).unwrap().height, 50.0);
    let geometry = sb.sync().geometry().unwrap();
    assert_eq!(geometry.thumb.vertical.unwrap().size, 0.0);
    assert!(!geometry.track_visible.vertical);
    assert_eq!(sb.surface().style(Part::TrackVertical, "display"), Some("none"));
}

#[test]
fn test_tall_content_is_clamped_and_scrolls() {
    let sb = mounted(content(100.0, 200.0), ScrollbarsConfig::auto_height(0.0, 100.0), &CACHE);

    assert_eq!(sb.surface().client_size(Part::Container).unwrap().height, 100.0);
    assert_eq!(sb.container_height(), Some(ContainerHeight::Px(100.0)));
    let geometry = sb.sync().geometry().unwrap();
    assert_eq!(geometry.thumb.vertical.unwrap().size, 48.0);
    assert_eq!(sb.surface().style(Part::ThumbVertical, "height"), Some("48px"));
    assert_eq!(sb.surface().style(Part::TrackVertical, "display"), Some("block"));
}

#[test]
fn test_minimum_is_enforced_for_empty_content() {
    let sb = mounted(content(100.0, 0.0), ScrollbarsConfig::auto_height(100.0, 200.0), &CACHE);

    assert_eq!(sb.surface().client_size(Part::Container).unwrap().height, 100.0);
    assert_eq!(sb.sync().geometry().unwrap().thumb.vertical.unwrap().size, 0.0);
}

#[test]
fn test_container_tracks_content_between_bounds() {
    let mut sb = mounted(content(100.0, 30.0), ScrollbarsConfig::auto_height(40.0, 120.0), &CACHE);
    let container = |sb: &blinc_scrollbars::Scrollbars<FakeSurface>| {
        sb.surface().client_size(Part::Container).unwrap().height
    };
    assert_eq!(container(&sb), 40.0);

    for (height, expected) in [(80.0, 80.0), (500.0, 120.0), (10.0, 40.0)] {
        sb.surface_mut().set_content(Size::new(100.0, height));
        sb.handle(ScrollbarEvent::ContentChanged);
        assert_eq!(container(&sb), expected, "content height {height}");
        assert_eq!(sb.container_height(), Some(ContainerHeight::Px(expected)));
    }
}

#[test]
fn test_percentage_bounds_use_calc() {
    let config = ScrollbarsConfig {
        auto_height: true,
        auto_height_max: HeightBound::Percent(50.0),
        ..Default::default()
    };
    let surface = content(100.0, 1000.0).with_parent_height(400.0);
    let sb = mounted(surface, config, &CACHE);

    assert_eq!(sb.surface().style(Part::Container, "max-height"), Some("50%"));
    assert_eq!(sb.surface().style(Part::View, "max-height"), Some("calc(50% + 17px)"));
    assert_eq!(sb.surface().client_size(Part::Container).unwrap().height, 200.0);
}

#[test]
fn test_overlay_scrollbars_hide_tracks() {
    let surface = FakeSurface::new(0.0).with_content(Size::new(300.0, 300.0));
    let sb = mounted(surface, ScrollbarsConfig::auto_height(0.0, 100.0), &OVERLAY);

    assert_eq!(sb.sync().scrollbar_width(), 0.0);
    assert_eq!(sb.surface().style(Part::TrackVertical, "display"), Some("none"));
    assert_eq!(sb.surface().style(Part::TrackHorizontal, "display"), Some("none"));
    assert_eq!(sb.surface().style(Part::View, "margin-right"), Some("0px"));
    assert!(sb.sync().geometry().unwrap().thumb.vertical.is_none());
}

#[test]
fn test_inverted_bounds_are_swapped() {
    let sb = mounted(content(100.0, 500.0), ScrollbarsConfig::auto_height(150.0, 60.0), &CACHE);
    assert_eq!(sb.surface().style(Part::Container, "min-height"), Some("60px"));
    assert_eq!(sb.surface().style(Part::Container, "max-height"), Some("150px"));
    assert_eq!(sb.surface().client_size(Part::Container).unwrap().height, 150.0);
}
