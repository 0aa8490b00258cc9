//! Rendering surface capability
//!
//! The scrollbars never touch real elements. The host hands the controller
//! a [`RenderSurface`]: enough to read committed layout, write styles and
//! move the native scroll position, and nothing more.

use crate::error::Result;
use crate::probe::ProbeHost;
use crate::types::{Axis, Offset, Size};

/// The six elements a scrollbars instance renders
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Part {
    /// Outer clipping box
    Container,
    /// Native scroll view holding the content
    View,
    TrackHorizontal,
    TrackVertical,
    ThumbHorizontal,
    ThumbVertical,
}

impl Part {
    pub const COUNT: usize = 6;

    pub const ALL: [Part; Part::COUNT] = [
        Part::Container,
        Part::View,
        Part::TrackHorizontal,
        Part::TrackVertical,
        Part::ThumbHorizontal,
        Part::ThumbVertical,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn track(axis: Axis) -> Part {
        match axis {
            Axis::Vertical => Part::TrackVertical,
            Axis::Horizontal => Part::TrackHorizontal,
        }
    }

    pub fn thumb(axis: Axis) -> Part {
        match axis {
            Axis::Vertical => Part::ThumbVertical,
            Axis::Horizontal => Part::ThumbHorizontal,
        }
    }

    /// Axis of a track or thumb
    pub fn axis(self) -> Option<Axis> {
        match self {
            Part::TrackVertical | Part::ThumbVertical => Some(Axis::Vertical),
            Part::TrackHorizontal | Part::ThumbHorizontal => Some(Axis::Horizontal),
            Part::Container | Part::View => None,
        }
    }
}

/// Capability-scoped handle onto the rendered scrollbars
///
/// Reads return already-committed layout and never block. A read that
/// cannot be served (element detached, not yet laid out) returns
/// [`crate::ScrollbarError::MeasurementUnavailable`].
pub trait RenderSurface: ProbeHost {
    /// `clientWidth`/`clientHeight` of a part
    fn client_size(&self, part: Part) -> Result<Size>;

    /// Client length of a part along an axis minus its padding
    fn inner_length(&self, part: Part, axis: Axis) -> Result<f32> {
        self.client_size(part).map(|s| s.along(axis))
    }

    /// `scrollWidth`/`scrollHeight` of the view
    fn scroll_size(&self) -> Result<Size>;

    /// `scrollLeft`/`scrollTop` of the view
    fn scroll_offset(&self) -> Result<Offset>;

    /// Client height of the container's parent, if known
    fn parent_height(&self) -> Option<f32> {
        None
    }

    /// Move the native scroll position of the view along an axis
    ///
    /// Hosts report the resulting scroll back through the normal scroll
    /// notification path.
    fn set_scroll_offset(&mut self, axis: Axis, value: f32);

    /// Write one inline style property; `None` removes it
    fn write_style(&mut self, part: Part, property: &str, value: Option<&str>);

    /// Set the class name of a part
    fn set_class_name(&mut self, _part: Part, _class: &str) {}

    /// Enable or disable document text selection
    fn set_text_selection(&mut self, enabled: bool);

    /// Capture or release the pointer for an in-progress drag
    fn set_pointer_capture(&mut self, captured: bool);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_part_indexing() {
        for (i, part) in Part::ALL.iter().enumerate() {
            assert_eq!(part.index(), i);
        }
        assert_eq!(Part::track(Axis::Vertical), Part::TrackVertical);
        assert_eq!(Part::thumb(Axis::Horizontal), Part::ThumbHorizontal);
        assert_eq!(Part::ThumbVertical.axis(), Some(Axis::Vertical));
        assert_eq!(Part::View.axis(), None);
    }
}
