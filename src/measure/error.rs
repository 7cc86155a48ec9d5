//! User-recoverable failures of calibration and measurement actions.

use thiserror::Error;

use crate::constants::MIN_POINT_SEPARATION;

/// Every failure the interaction state machine can report to the user.
///
/// The `Display` text is the message shown in the dialog body.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum MeasureError {
    #[error("Please load an image first.")]
    NoImageLoaded,

    #[error(
        "Points are too close together ({distance:.2} pixels apart, at least {minimum:.0} required)."
    )]
    PointsTooClose { distance: f64, minimum: f64 },

    #[error("Invalid distance entered. The reference distance must be a positive number.")]
    InvalidReferenceDistance,

    #[error("Please calibrate the image first in Calibration mode.")]
    CalibrationRequired,
}

impl MeasureError {
    pub fn points_too_close(distance: f64) -> Self {
        MeasureError::PointsTooClose {
            distance,
            minimum: MIN_POINT_SEPARATION,
        }
    }

    /// Dialog title for this error.
    pub fn title(&self) -> &'static str {
        match self {
            MeasureError::NoImageLoaded => "No Image",
            MeasureError::CalibrationRequired => "No Calibration",
            MeasureError::PointsTooClose { .. } | MeasureError::InvalidReferenceDistance => "Error",
        }
    }

    /// Warnings ask the user to do something first; errors reject their input.
    pub fn is_warning(&self) -> bool {
        matches!(
            self,
            MeasureError::NoImageLoaded | MeasureError::CalibrationRequired
        )
    }
}
