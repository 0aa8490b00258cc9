//! Normalized scroll summary handed to callbacks and `get_values()`

use crate::types::{Offset, Size};

/// Scroll position and extents of the view
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ScrollValues {
    /// Horizontal progress, 0.0 at the left edge to 1.0 at the right
    pub left: f32,
    /// Vertical progress, 0.0 at the top to 1.0 at the bottom
    pub top: f32,
    pub scroll_left: f32,
    pub scroll_top: f32,
    pub scroll_width: f32,
    pub scroll_height: f32,
    pub client_width: f32,
    pub client_height: f32,
}

impl ScrollValues {
    pub fn new(offset: Offset, scroll: Size, client: Size) -> Self {
        Self {
            left: progress(offset.x, scroll.width, client.width),
            top: progress(offset.y, scroll.height, client.height),
            scroll_left: offset.x,
            scroll_top: offset.y,
            scroll_width: scroll.width,
            scroll_height: scroll.height,
            client_width: client.width,
            client_height: client.height,
        }
    }
}

/// `offset / (scroll - client)`, zero when there is nothing to scroll
fn progress(offset: f32, scroll: f32, client: f32) -> f32 {
    let range = scroll - client;
    if range <= 0.0 {
        return 0.0;
    }
    let p = offset / range;
    if p.is_finite() {
        p.clamp(0.0, 1.0)
    } else {
        0.0
    }
}
