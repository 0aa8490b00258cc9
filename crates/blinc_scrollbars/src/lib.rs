//! Blinc Scrollbars
//!
//! Custom scrollbars drawn over a native scroll view. The native bars keep
//! doing the scrolling (momentum, keyboard, accessibility) and are pushed
//! outside the visible clip; thin overlay tracks and thumbs mirror the
//! scroll state.
//!
//! # Overview
//!
//! - **Probe**: measures the native scrollbar width once per process
//! - **Geometry**: pure thumb and auto-height math
//! - **Sync**: keeps styles in step with resizes, content changes and scrolls,
//!   writing only what changed
//! - **Drag**: thumb drags and track clicks become native scroll offsets
//! - **Facade**: [`Scrollbars`] orders host notifications, runs deferred
//!   tasks and exposes the imperative scroll API
//!
//! # Quick Start
//!
//! ```rust
//! use blinc_scrollbars::testing::FakeSurface;
//! use blinc_scrollbars::{ScrollbarEvent, Scrollbars, ScrollbarsConfig, Size};
//!
//! let surface = FakeSurface::new(17.0).with_content(Size::new(100.0, 400.0));
//! let mut scrollbars = Scrollbars::new(surface, ScrollbarsConfig::default())
//!     .on_scroll_frame(|values| println!("top: {:.2}", values.top));
//!
//! scrollbars.handle(ScrollbarEvent::Mount);
//! scrollbars.scroll_to_bottom();
//! scrollbars.handle(ScrollbarEvent::Scroll);
//!
//! assert_eq!(scrollbars.get_values().top, 1.0);
//! ```
//!
//! # Hosts
//!
//! A host implements [`RenderSurface`] over its real elements and forwards
//! notifications as [`ScrollbarEvent`]s. Time is host-driven through
//! [`Scrollbars::advance`]. [`testing::FakeSurface`] is a complete headless
//! host that lays out parts from their styles.

pub mod config;
pub mod drag;
pub mod error;
pub mod geometry;
pub mod probe;
pub mod scheduler;
pub mod scrollbars;
pub mod style;
pub mod surface;
pub mod sync;
pub mod testing;
pub mod types;
pub mod values;

// Re-export commonly used types
pub use config::{AutoHeightConfig, HeightBound, PartMap, ScrollbarsConfig};
pub use drag::{DragController, DragSession, DragState};
pub use error::{Result, ScrollbarError};
pub use geometry::{ContainerHeight, Geometry, ThumbGeometry, ViewInset};
pub use probe::{
    scrollbar_width, ProbeHost, ProbeId, ProbeReading, ProbeSpec, ScrollbarWidthCache,
};
pub use scrollbars::{Lifecycle, ScrollActivity, ScrollbarEvent, Scrollbars};
pub use style::{StyleProperty, StyleSheet, StyleValue};
pub use surface::{Part, RenderSurface};
pub use sync::{PassResult, ScrollSyncController};
pub use types::{Axis, AxisPair, Offset, RawMeasurement, Size};
pub use values::ScrollValues;
