//! Scrollbar error types

use thiserror::Error;

use crate::surface::Part;

/// Scrollbar-related errors
///
/// None of these cross the [`crate::Scrollbars`] boundary during normal
/// operation. They travel between the surface and the controllers, where
/// they are logged and corrected locally.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ScrollbarError {
    /// A layout read failed (detached element, probe could not attach)
    #[error("Measurement unavailable for {part:?}: {reason}")]
    MeasurementUnavailable { part: Part, reason: String },

    /// Declarative input that had to be normalized
    #[error("Invalid scrollbar config: {0}")]
    InvalidConfig(String),

    /// Drag event received without an active drag session
    #[error("No active drag session")]
    StaleDragSession,

    /// Config text could not be parsed
    #[error("Failed to parse scrollbar config: {0}")]
    ConfigParse(String),
}

impl ScrollbarError {
    /// Shorthand for a failed layout read
    pub fn unavailable(part: Part, reason: impl Into<String>) -> Self {
        Self::MeasurementUnavailable {
            part,
            reason: reason.into(),
        }
    }
}

/// Result type for scrollbar operations
pub type Result<T> = std::result::Result<T, ScrollbarError>;
