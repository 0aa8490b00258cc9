//! Shared helpers for scrollbars scenario tests

#![allow(dead_code)]

use std::time::Duration;

use blinc_scrollbars::testing::FakeSurface;
use blinc_scrollbars::{ScrollbarEvent, ScrollbarWidthCache, Scrollbars, ScrollbarsConfig, Size};

/// Install a test-friendly subscriber so `RUST_LOG=trace` shows pass logs
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Mount an instance over `surface` and let the settle remeasure run
pub fn mounted(
    surface: FakeSurface,
    config: ScrollbarsConfig,
    cache: &'static ScrollbarWidthCache,
) -> Scrollbars<FakeSurface> {
    init_tracing();
    let mut scrollbars = Scrollbars::with_probe_cache(surface, config, cache);
    scrollbars.handle(ScrollbarEvent::Mount);
    settle(&mut scrollbars);
    scrollbars
}

/// Run the post-mount settle delay
pub fn settle(scrollbars: &mut Scrollbars<FakeSurface>) {
    let delay = scrollbars.config().settle_delay();
    scrollbars.advance(delay);
}

/// Deliver the native scroll notification the surface queued, if any
pub fn pump(scrollbars: &mut Scrollbars<FakeSurface>) -> bool {
    if scrollbars.surface_mut().take_scroll_event() {
        scrollbars.handle(ScrollbarEvent::Scroll);
        true
    } else {
        false
    }
}

pub fn ms(n: u64) -> Duration {
    Duration::from_millis(n)
}

pub fn content(width: f32, height: f32) -> FakeSurface {
    FakeSurface::new(17.0).with_content(Size::new(width, height))
}
