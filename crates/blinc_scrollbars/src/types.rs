//! Shared measurement types

/// Scroll axis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    Vertical,
    Horizontal,
}

impl Axis {
    pub const BOTH: [Axis; 2] = [Axis::Vertical, Axis::Horizontal];
}

/// Width/height pair in pixels
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    pub const ZERO: Size = Size::new(0.0, 0.0);

    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Length along an axis (height for vertical, width for horizontal)
    pub fn along(&self, axis: Axis) -> f32 {
        match axis {
            Axis::Vertical => self.height,
            Axis::Horizontal => self.width,
        }
    }
}

/// Scroll position of the view (`scrollLeft`, `scrollTop`)
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Offset {
    pub x: f32,
    pub y: f32,
}

impl Offset {
    pub const ZERO: Offset = Offset::new(0.0, 0.0);

    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn along(&self, axis: Axis) -> f32 {
        match axis {
            Axis::Vertical => self.y,
            Axis::Horizontal => self.x,
        }
    }

    pub fn set_along(&mut self, axis: Axis, value: f32) {
        match axis {
            Axis::Vertical => self.y = value,
            Axis::Horizontal => self.x = value,
        }
    }
}

/// One value per axis
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct AxisPair<T> {
    pub vertical: T,
    pub horizontal: T,
}

impl<T> AxisPair<T> {
    pub const fn new(vertical: T, horizontal: T) -> Self {
        Self {
            vertical,
            horizontal,
        }
    }

    pub fn get(&self, axis: Axis) -> &T {
        match axis {
            Axis::Vertical => &self.vertical,
            Axis::Horizontal => &self.horizontal,
        }
    }

    pub fn get_mut(&mut self, axis: Axis) -> &mut T {
        match axis {
            Axis::Vertical => &mut self.vertical,
            Axis::Horizontal => &mut self.horizontal,
        }
    }
}

/// Layout reads captured fresh for one measurement pass
///
/// Never persisted: every pass re-reads the surface.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct RawMeasurement {
    /// Container `clientWidth`/`clientHeight`
    pub container_client: Size,
    /// View `scrollWidth`/`scrollHeight`
    pub content_scroll: Size,
    /// View `clientWidth`/`clientHeight`
    pub view_client: Size,
    /// View `scrollLeft`/`scrollTop`
    pub scroll_offset: Offset,
    /// Inner length of each track (client length minus padding)
    pub track_length: AxisPair<f32>,
    /// Client height of the container's parent, for percentage bounds
    pub parent_height: Option<f32>,
}

impl RawMeasurement {
    /// Whether content overflows the view along an axis
    pub fn overflows(&self, axis: Axis) -> bool {
        self.content_scroll.along(axis) > self.view_client.along(axis)
    }

    /// Maximum scroll offset along an axis
    pub fn max_scroll(&self, axis: Axis) -> f32 {
        (self.content_scroll.along(axis) - self.view_client.along(axis)).max(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_axis_accessors() {
        let size = Size::new(300.0, 400.0);
        assert_eq!(size.along(Axis::Vertical), 400.0);
        assert_eq!(size.along(Axis::Horizontal), 300.0);

        let mut offset = Offset::ZERO;
        offset.set_along(Axis::Vertical, 12.0);
        assert_eq!(offset.y, 12.0);
        assert_eq!(offset.along(Axis::Horizontal), 0.0);

        let mut pair = AxisPair::new(1, 2);
        *pair.get_mut(Axis::Horizontal) = 5;
        assert_eq!(*pair.get(Axis::Horizontal), 5);
    }

    #[test]
    fn test_overflow_and_max_scroll() {
        let raw = RawMeasurement {
            view_client: Size::new(100.0, 100.0),
            content_scroll: Size::new(100.0, 250.0),
            ..Default::default()
        };
        assert!(raw.overflows(Axis::Vertical));
        assert!(!raw.overflows(Axis::Horizontal));
        assert_eq!(raw.max_scroll(Axis::Vertical), 150.0);
        assert_eq!(raw.max_scroll(Axis::Horizontal), 0.0);
    }
}
