//! Outbound messages from the session to whatever renders dialogs.

use super::error::MeasureError;

/// Rough severity, for picking an icon or colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    Info,
    Warning,
    Error,
}

/// A result or problem the user should see in a dialog.
#[derive(Debug, Clone, PartialEq)]
pub enum Notification {
    Calibrated {
        pixel_distance: f64,
        known_distance: f64,
        factor: f64,
        unit: String,
    },
    Measured {
        pixel_distance: f64,
        real_distance: f64,
        unit: String,
    },
    Problem(MeasureError),
}

impl Notification {
    pub fn kind(&self) -> NotificationKind {
        match self.error() {
            None => NotificationKind::Info,
            Some(error) if error.is_warning() => NotificationKind::Warning,
            Some(_) => NotificationKind::Error,
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Notification::Calibrated { .. } => "Calibration Complete",
            Notification::Measured { .. } => "Measurement Result",
            Notification::Problem(error) => error.title(),
        }
    }

    /// Dialog body text.
    pub fn message(&self) -> String {
        match self {
            Notification::Calibrated {
                pixel_distance,
                known_distance,
                factor,
                unit,
            } => format!(
                "Calibration successful!\n\
                 Pixel distance: {:.2} pixels\n\
                 Known distance: {:.2} {}\n\
                 Scale: {:.6} {}/pixel",
                pixel_distance, known_distance, unit, factor, unit
            ),
            Notification::Measured {
                pixel_distance,
                real_distance,
                unit,
            } => format!(
                "Pixel distance: {:.2} pixels\nReal distance: {:.4} {}",
                pixel_distance, real_distance, unit
            ),
            Notification::Problem(error) => error.to_string(),
        }
    }

    pub fn error(&self) -> Option<&MeasureError> {
        match self {
            Notification::Problem(error) => Some(error),
            _ => None,
        }
    }
}
