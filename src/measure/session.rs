//! The interaction state machine.
//!
//! [`MeasureSession`] owns the mode, the calibration, the pending point
//! selection, the zoom and the log. Every public operation runs to completion
//! and never returns an error: failures become [`Notification`]s that the shell
//! drains with [`MeasureSession::take_notifications`].

use std::path::PathBuf;

use tracing::{debug, warn};

use super::calibration::{check_separation, Calibration};
use super::error::MeasureError;
use super::geometry::{distance, Point2D};
use super::log::LogSink;
use super::notification::Notification;
use super::zoom::{Zoom, ZoomDirection};
use crate::constants::DEFAULT_UNIT;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InteractionMode {
    #[default]
    Calibration,
    Measurement,
}

impl InteractionMode {
    pub fn display_name(&self) -> &'static str {
        match self {
            InteractionMode::Calibration => "Calibration",
            InteractionMode::Measurement => "Measurement",
        }
    }

    /// Status prompt shown right after entering the mode.
    pub fn prompt(&self) -> &'static str {
        match self {
            InteractionMode::Calibration => {
                "Calibration mode: Click two points on a known distance"
            }
            InteractionMode::Measurement => {
                "Measurement mode: Click two points to measure distance"
            }
        }
    }

    pub fn all() -> &'static [InteractionMode] {
        &[InteractionMode::Calibration, InteractionMode::Measurement]
    }
}

/// The user's answer to a reference-distance prompt.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum KnownDistance {
    Entered(f64),
    /// Confirmed with an empty or unparseable value.
    Missing,
    Cancelled,
}

/// Asks the user for the real length of the span just clicked.
///
/// Called synchronously in the middle of a calibration action, once the two
/// points have passed the separation check.
pub trait ReferencePrompt {
    fn request_known_distance(&mut self, unit: &str, pixel_distance: f64) -> KnownDistance;
}

impl<F> ReferencePrompt for F
where
    F: FnMut(&str, f64) -> KnownDistance,
{
    fn request_known_distance(&mut self, unit: &str, pixel_distance: f64) -> KnownDistance {
        self(unit, pixel_distance)
    }
}

/// A prepared answer, for shells that collect the value before delivering the click.
impl ReferencePrompt for KnownDistance {
    fn request_known_distance(&mut self, _unit: &str, _pixel_distance: f64) -> KnownDistance {
        *self
    }
}

/// The image currently on screen.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadedImage {
    pub path: PathBuf,
    pub width: u32,
    pub height: u32,
}

impl LoadedImage {
    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("image")
            .to_string()
    }
}

#[derive(Debug)]
pub struct MeasureSession {
    mode: InteractionMode,
    calibration: Calibration,
    /// Image-native points for the current action, at most two.
    pending: Vec<Point2D>,
    zoom: Zoom,
    image: Option<LoadedImage>,
    /// Endpoints of the last completed action, kept for drawing only.
    last_segment: Option<(Point2D, Point2D)>,
    log: LogSink,
    outbox: Vec<Notification>,
    status: String,
}

impl Default for MeasureSession {
    fn default() -> Self {
        Self::new(DEFAULT_UNIT)
    }
}

impl MeasureSession {
    pub fn new(unit: impl Into<String>) -> Self {
        Self {
            mode: InteractionMode::default(),
            calibration: Calibration::new(unit),
            pending: Vec::with_capacity(2),
            zoom: Zoom::default(),
            image: None,
            last_segment: None,
            log: LogSink::default(),
            outbox: Vec::new(),
            status: "Load an image to begin".to_string(),
        }
    }

    pub fn mode(&self) -> InteractionMode {
        self.mode
    }

    pub fn calibration(&self) -> &Calibration {
        &self.calibration
    }

    pub fn unit(&self) -> &str {
        self.calibration.unit()
    }

    pub fn pending(&self) -> &[Point2D] {
        &self.pending
    }

    pub fn zoom(&self) -> &Zoom {
        &self.zoom
    }

    pub fn image(&self) -> Option<&LoadedImage> {
        self.image.as_ref()
    }

    pub fn last_segment(&self) -> Option<(Point2D, Point2D)> {
        self.last_segment
    }

    pub fn log(&self) -> &LogSink {
        &self.log
    }

    pub fn status(&self) -> &str {
        &self.status
    }

    pub fn has_notifications(&self) -> bool {
        !self.outbox.is_empty()
    }

    /// Hand over every notification raised since the last call.
    pub fn take_notifications(&mut self) -> Vec<Notification> {
        std::mem::take(&mut self.outbox)
    }

    /// A new image is on screen. Zoom and pending points reset; the
    /// calibration is kept so images sharing a scale can reuse it.
    pub fn load_image(&mut self, image: LoadedImage) {
        self.zoom.reset();
        self.reset_points();
        self.log.append(format!(
            "Image loaded: {} ({}x{} px)",
            image.file_name(),
            image.width,
            image.height
        ));
        self.status = format!(
            "Image loaded: {} | Mode: {}",
            image.path.display(),
            self.mode.display_name()
        );
        self.image = Some(image);
    }

    pub fn switch_to(&mut self, mode: InteractionMode) {
        self.reset_points();

        if mode == InteractionMode::Measurement && !self.calibration.is_calibrated() {
            self.mode = InteractionMode::Calibration;
            self.log.append("Measurement mode refused: calibration required");
            self.status = InteractionMode::Calibration.prompt().to_string();
            self.report(MeasureError::CalibrationRequired);
            return;
        }

        self.mode = mode;
        self.log.append(format!("Mode changed to {}", mode.display_name()));
        self.status = mode.prompt().to_string();
    }

    /// Select a new unit label. Any calibration is dropped, which also forces
    /// the mode back to Calibration.
    pub fn change_unit(&mut self, unit: impl Into<String>) {
        let unit = unit.into();
        self.calibration.set_unit(unit.clone());
        self.reset_points();
        self.mode = InteractionMode::Calibration;
        self.log.append(format!("Unit changed to {}; calibration reset", unit));
        self.status = format!("Unit set to {} | Recalibrate before measuring", unit);
    }

    pub fn zoom_step(&mut self, direction: ZoomDirection) {
        let factor = self.zoom.step(direction);
        debug!("Zoom {:?} -> {:.3}", direction, factor);
    }

    pub fn reset_zoom(&mut self) {
        self.zoom.reset();
    }

    /// Drop any half-finished selection. Calibration and mode are untouched.
    pub fn cancel_pending(&mut self) {
        if self.pending.is_empty() && self.last_segment.is_none() {
            return;
        }
        self.reset_points();
        self.status = format!("{}: selection cleared", self.mode.display_name());
    }

    pub fn clear_log(&mut self) {
        self.log.clear();
    }

    /// The pixel distance the reference prompt would be asked about if the
    /// next click lands at `display_point`. `None` when that click would not
    /// consult the prompt: it does not complete a calibration pair, or the
    /// pair is too close together.
    pub fn prospective_span(&self, display_point: Point2D) -> Option<f64> {
        if self.image.is_none() || self.mode != InteractionMode::Calibration {
            return None;
        }
        match self.pending.as_slice() {
            [first] => Some(first.distance_to(&self.zoom.to_image_space(display_point)))
                .filter(|span| check_separation(*span).is_ok()),
            _ => None,
        }
    }

    /// Record a click given in display space.
    ///
    /// The second click of a pair runs the mode's action; `prompt` is only
    /// consulted by a calibration action whose points are far enough apart.
    pub fn click(&mut self, display_point: Point2D, prompt: &mut impl ReferencePrompt) {
        if let Err(error) = self.try_click(display_point, prompt) {
            self.report(error);
        }
    }

    fn try_click(
        &mut self,
        display_point: Point2D,
        prompt: &mut impl ReferencePrompt,
    ) -> Result<(), MeasureError> {
        if self.image.is_none() {
            return Err(MeasureError::NoImageLoaded);
        }

        self.last_segment = None;
        self.pending.push(self.zoom.to_image_space(display_point));
        self.status = format!(
            "{}: Point {} of 2 selected",
            self.mode.display_name(),
            self.pending.len()
        );

        let (first, second) = match self.pending.as_slice() {
            [first, second] => (*first, *second),
            _ => return Ok(()),
        };

        let outcome = match self.mode {
            InteractionMode::Calibration => self.run_calibration(first, second, prompt),
            InteractionMode::Measurement => self.run_measurement(first, second),
        };
        self.pending.clear();

        if outcome.is_err() {
            self.status = self.mode.prompt().to_string();
        }
        outcome
    }

    fn run_calibration(
        &mut self,
        first: Point2D,
        second: Point2D,
        prompt: &mut impl ReferencePrompt,
    ) -> Result<(), MeasureError> {
        let pixel_distance = distance(first, second);
        check_separation(pixel_distance)?;

        let known_distance = match prompt.request_known_distance(self.unit(), pixel_distance) {
            KnownDistance::Entered(value) => value,
            KnownDistance::Missing => return Err(MeasureError::InvalidReferenceDistance),
            KnownDistance::Cancelled => {
                self.status = "Calibration cancelled".to_string();
                return Ok(());
            }
        };

        let factor = self.calibration.calibrate(pixel_distance, known_distance)?;
        let unit = self.unit().to_string();

        self.log.append(format!(
            "Calibrated: {:.2} px = {:.2} {} ({:.6} {}/pixel)",
            pixel_distance, known_distance, unit, factor, unit
        ));
        self.status = format!(
            "Calibration complete: {:.6} {}/pixel | Switch to Measurement mode to measure distances",
            factor, unit
        );
        self.last_segment = Some((first, second));
        self.outbox.push(Notification::Calibrated {
            pixel_distance,
            known_distance,
            factor,
            unit,
        });
        Ok(())
    }

    fn run_measurement(&mut self, first: Point2D, second: Point2D) -> Result<(), MeasureError> {
        let pixel_distance = distance(first, second);
        let real_distance = self.calibration.to_real(pixel_distance)?;
        let unit = self.unit().to_string();

        self.log.append(format!(
            "Measured: {:.4} {} ({:.2} px)",
            real_distance, unit, pixel_distance
        ));
        self.status = format!(
            "Measured: {:.4} {} ({:.2} pixels)",
            real_distance, unit, pixel_distance
        );
        self.last_segment = Some((first, second));
        self.outbox.push(Notification::Measured {
            pixel_distance,
            real_distance,
            unit,
        });
        Ok(())
    }

    fn reset_points(&mut self) {
        self.pending.clear();
        self.last_segment = None;
    }

    fn report(&mut self, error: MeasureError) {
        warn!("{}", error);
        self.outbox.push(Notification::Problem(error));
    }
}
