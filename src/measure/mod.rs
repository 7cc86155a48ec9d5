//! Calibration and measurement core.
//!
//! This module has no UI code. The shell feeds it clicks, mode and unit
//! selections, image loads and zoom gestures, and renders what comes back:
//!
//! - [`geometry`] - points and Euclidean distance
//! - [`calibration`] - deriving and applying the units-per-pixel factor
//! - [`zoom`] - zoom state and the display/image coordinate transform
//! - [`session`] - the interaction state machine
//! - [`log`] - the append-only user log
//! - [`error`] / [`notification`] - what the user gets told

pub mod calibration;
pub mod error;
pub mod geometry;
pub mod log;
pub mod notification;
pub mod session;
pub mod zoom;

#[cfg(test)]
mod tests;

pub use geometry::Point2D;
pub use log::LogSink;
pub use notification::{Notification, NotificationKind};
pub use session::{InteractionMode, KnownDistance, LoadedImage, MeasureSession};
pub use zoom::ZoomDirection;
