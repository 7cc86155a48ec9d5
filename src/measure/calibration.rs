//! Pixel-to-real-world calibration.
//!
//! A calibration factor is real-world units per one image-native pixel. It is
//! only meaningful under the unit it was derived with, so changing the unit
//! drops it.

use super::error::MeasureError;
use crate::constants::MIN_POINT_SEPARATION;

/// Reject point pairs closer together than [`MIN_POINT_SEPARATION`] pixels.
pub fn check_separation(pixel_distance: f64) -> Result<(), MeasureError> {
    if pixel_distance < MIN_POINT_SEPARATION {
        return Err(MeasureError::points_too_close(pixel_distance));
    }
    Ok(())
}

/// Units per pixel from a reference span of `pixel_distance` pixels that is
/// `known_distance` units long.
pub fn derive_factor(pixel_distance: f64, known_distance: f64) -> Result<f64, MeasureError> {
    if !pixel_distance.is_finite() || pixel_distance <= 0.0 {
        return Err(MeasureError::points_too_close(pixel_distance));
    }
    if !known_distance.is_finite() || known_distance <= 0.0 {
        return Err(MeasureError::InvalidReferenceDistance);
    }
    Ok(known_distance / pixel_distance)
}

/// Convert a pixel distance with an explicit factor.
pub fn to_real(pixel_distance: f64, factor: f64) -> f64 {
    pixel_distance * factor
}

/// Active calibration: an optional factor and the unit label it applies to.
#[derive(Debug, Clone, PartialEq)]
pub struct Calibration {
    factor: Option<f64>,
    unit: String,
}

impl Calibration {
    pub fn new(unit: impl Into<String>) -> Self {
        Self {
            factor: None,
            unit: unit.into(),
        }
    }

    pub fn factor(&self) -> Option<f64> {
        self.factor
    }

    pub fn unit(&self) -> &str {
        &self.unit
    }

    pub fn is_calibrated(&self) -> bool {
        self.factor.is_some()
    }

    /// Derive and store a new factor, replacing any previous one.
    ///
    /// On error the previous calibration is kept.
    pub fn calibrate(
        &mut self,
        pixel_distance: f64,
        known_distance: f64,
    ) -> Result<f64, MeasureError> {
        let factor = derive_factor(pixel_distance, known_distance)?;
        self.factor = Some(factor);
        Ok(factor)
    }

    /// Convert a pixel distance to real-world units.
    pub fn to_real(&self, pixel_distance: f64) -> Result<f64, MeasureError> {
        self.factor
            .map(|factor| to_real(pixel_distance, factor))
            .ok_or(MeasureError::CalibrationRequired)
    }

    /// Switch to a new unit label. Always drops the factor.
    pub fn set_unit(&mut self, unit: impl Into<String>) {
        self.unit = unit.into();
        self.factor = None;
    }

    /// Short description for status text, e.g. `0.100000 cm/pixel`.
    pub fn describe(&self) -> String {
        match self.factor {
            Some(factor) => format!("{:.6} {}/pixel", factor, self.unit),
            None => "not calibrated".to_string(),
        }
    }
}

impl Default for Calibration {
    fn default() -> Self {
        Self::new(crate::constants::DEFAULT_UNIT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_derive_factor() {
        assert_eq!(derive_factor(100.0, 10.0), Ok(0.1));
    }

    #[test]
    fn test_to_real() {
        assert_eq!(to_real(250.0, 0.1), 25.0);
    }

    #[test]
    fn test_calibration_different_units() {
        // 200 pixels = 5 inches
        let factor = derive_factor(200.0, 5.0).unwrap();
        assert_eq!(factor, 0.025);
        assert_eq!(to_real(400.0, factor), 10.0);
    }

    #[test]
    fn test_derive_factor_rejects_bad_reference() {
        for known in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            assert_eq!(
                derive_factor(100.0, known),
                Err(MeasureError::InvalidReferenceDistance)
            );
        }
    }

    #[test]
    fn test_derive_factor_rejects_non_positive_span() {
        assert!(matches!(
            derive_factor(0.0, 10.0),
            Err(MeasureError::PointsTooClose { .. })
        ));
        assert!(matches!(
            derive_factor(-3.0, 10.0),
            Err(MeasureError::PointsTooClose { .. })
        ));
    }

    #[test]
    fn test_check_separation() {
        assert!(check_separation(1.0).is_ok());
        assert!(check_separation(250.0).is_ok());
        assert_eq!(
            check_separation(0.99),
            Err(MeasureError::PointsTooClose {
                distance: 0.99,
                minimum: MIN_POINT_SEPARATION,
            })
        );
    }

    #[test]
    fn test_sub_pixel_span_passes_positivity_but_not_separation() {
        // The two checks are independent: 0.5 px is a valid factor input
        assert!(derive_factor(0.5, 1.0).is_ok());
        assert!(check_separation(0.5).is_err());
    }

    #[test]
    fn test_new_calibration_is_unset() {
        let calibration = Calibration::new("cm");
        assert!(!calibration.is_calibrated());
        assert_eq!(calibration.unit(), "cm");
        assert_eq!(calibration.to_real(10.0), Err(MeasureError::CalibrationRequired));
    }

    #[test]
    fn test_calibrate_then_convert() {
        let mut calibration = Calibration::new("cm");
        assert_eq!(calibration.calibrate(100.0, 10.0), Ok(0.1));
        assert_eq!(calibration.factor(), Some(0.1));
        assert_eq!(calibration.to_real(250.0), Ok(25.0));
    }

    #[test]
    fn test_recalibration_overwrites() {
        let mut calibration = Calibration::new("cm");
        calibration.calibrate(100.0, 10.0).unwrap();
        calibration.calibrate(100.0, 50.0).unwrap();
        assert_eq!(calibration.factor(), Some(0.5));
    }

    #[test]
    fn test_failed_calibration_keeps_previous_factor() {
        let mut calibration = Calibration::new("cm");
        calibration.calibrate(100.0, 10.0).unwrap();
        assert!(calibration.calibrate(100.0, -2.0).is_err());
        assert_eq!(calibration.factor(), Some(0.1));
    }

    #[test]
    fn test_set_unit_invalidates_factor() {
        let mut calibration = Calibration::new("cm");
        calibration.calibrate(100.0, 10.0).unwrap();
        calibration.set_unit("in");
        assert_eq!(calibration.factor(), None);
        assert_eq!(calibration.unit(), "in");
    }

    #[test]
    fn test_set_same_unit_still_invalidates() {
        let mut calibration = Calibration::new("cm");
        calibration.calibrate(100.0, 10.0).unwrap();
        calibration.set_unit("cm");
        assert!(!calibration.is_calibrated());
    }

    #[test]
    fn test_describe() {
        let mut calibration = Calibration::new("mm");
        assert_eq!(calibration.describe(), "not calibrated");
        calibration.calibrate(100.0, 10.0).unwrap();
        assert_eq!(calibration.describe(), "0.100000 mm/pixel");
    }
}
