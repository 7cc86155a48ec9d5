//! Scenario tests for the measurement session.

use std::path::PathBuf;

use super::error::MeasureError;
use super::log::LOGS_CLEARED;
use super::*;

fn session_with_image(name: &str) -> MeasureSession {
    let mut session = MeasureSession::new("cm");
    session.load_image(LoadedImage {
        path: PathBuf::from(name),
        width: 1000,
        height: 700,
    });
    session
}

fn calibrate(session: &mut MeasureSession, a: (f64, f64), b: (f64, f64), known: f64) {
    session.click(a.into(), &mut KnownDistance::Entered(known));
    session.click(b.into(), &mut KnownDistance::Entered(known));
}

#[test]
fn test_end_to_end_calibrate_then_measure() {
    let mut session = session_with_image("ruler.png");

    calibrate(&mut session, (100.0, 50.0), (200.0, 50.0), 10.0);
    assert_eq!(session.calibration().factor(), Some(0.1));
    assert!(session.pending().is_empty());

    let notes = session.take_notifications();
    assert_eq!(
        notes,
        vec![Notification::Calibrated {
            pixel_distance: 100.0,
            known_distance: 10.0,
            factor: 0.1,
            unit: "cm".to_string(),
        }]
    );

    session.switch_to(InteractionMode::Measurement);
    assert_eq!(session.mode(), InteractionMode::Measurement);

    session.click(Point2D::new(150.0, 200.0), &mut KnownDistance::Cancelled);
    session.click(Point2D::new(250.0, 200.0), &mut KnownDistance::Cancelled);

    let notes = session.take_notifications();
    assert_eq!(
        notes,
        vec![Notification::Measured {
            pixel_distance: 100.0,
            real_distance: 10.0,
            unit: "cm".to_string(),
        }]
    );
    assert!(session.pending().is_empty());
    assert_eq!(session.status(), "Measured: 10.0000 cm (100.00 pixels)");
}

#[test]
fn test_measurement_mode_refused_without_calibration() {
    let mut session = session_with_image("plan.png");
    session.click(Point2D::new(1.0, 1.0), &mut KnownDistance::Cancelled);

    session.switch_to(InteractionMode::Measurement);

    assert_eq!(session.mode(), InteractionMode::Calibration);
    assert!(session.pending().is_empty());
    assert_eq!(
        session.take_notifications(),
        vec![Notification::Problem(MeasureError::CalibrationRequired)]
    );
}

#[test]
fn test_measurement_refused_even_without_image() {
    let mut session = MeasureSession::new("cm");
    session.switch_to(InteractionMode::Measurement);
    assert_eq!(session.mode(), InteractionMode::Calibration);
    assert_eq!(
        session.take_notifications()[0].error(),
        Some(&MeasureError::CalibrationRequired)
    );
}

#[test]
fn test_change_unit_invalidates_calibration() {
    let mut session = session_with_image("ruler.png");
    calibrate(&mut session, (0.0, 0.0), (100.0, 0.0), 10.0);
    assert!(session.calibration().is_calibrated());

    session.change_unit("cm");
    assert_eq!(session.calibration().factor(), None);

    session.switch_to(InteractionMode::Measurement);
    assert_eq!(session.mode(), InteractionMode::Calibration);
}

#[test]
fn test_too_close_keeps_previous_calibration() {
    let mut session = session_with_image("ruler.png");
    calibrate(&mut session, (0.0, 0.0), (100.0, 0.0), 10.0);
    session.take_notifications();

    calibrate(&mut session, (10.0, 10.0), (10.6, 10.0), 99.0);

    assert_eq!(session.calibration().factor(), Some(0.1));
    assert!(session.pending().is_empty());
    let notes = session.take_notifications();
    assert_eq!(notes.len(), 1);
    assert!(matches!(
        notes[0].error(),
        Some(MeasureError::PointsTooClose { .. })
    ));
}

#[test]
fn test_invalid_reference_keeps_previous_calibration() {
    let mut session = session_with_image("ruler.png");
    calibrate(&mut session, (0.0, 0.0), (100.0, 0.0), 10.0);
    session.take_notifications();

    for bad in [0.0, -5.0] {
        calibrate(&mut session, (0.0, 0.0), (50.0, 0.0), bad);
        assert_eq!(session.calibration().factor(), Some(0.1));
        assert!(session.pending().is_empty());
        assert_eq!(
            session.take_notifications(),
            vec![Notification::Problem(MeasureError::InvalidReferenceDistance)]
        );
    }
}

#[test]
fn test_recalibration_overwrites_silently() {
    let mut session = session_with_image("ruler.png");
    calibrate(&mut session, (0.0, 0.0), (100.0, 0.0), 10.0);
    calibrate(&mut session, (0.0, 0.0), (100.0, 0.0), 25.0);
    assert_eq!(session.calibration().factor(), Some(0.25));
}

#[test]
fn test_calibration_survives_new_image() {
    let mut session = session_with_image("first.png");
    calibrate(&mut session, (0.0, 0.0), (100.0, 0.0), 10.0);
    session.zoom_step(ZoomDirection::In);
    session.click(Point2D::new(3.0, 3.0), &mut KnownDistance::Cancelled);

    session.load_image(LoadedImage {
        path: PathBuf::from("second.png"),
        width: 640,
        height: 480,
    });

    assert_eq!(session.calibration().factor(), Some(0.1));
    assert_eq!(session.zoom().factor(), 1.0);
    assert!(session.pending().is_empty());
    assert_eq!(
        session.image().map(|i| i.file_name()),
        Some("second.png".to_string())
    );
}

#[test]
fn test_calibration_is_zoom_invariant() {
    // Same physical span clicked at 2 different zoom levels gives the same factor
    let mut at_one = session_with_image("ruler.png");
    calibrate(&mut at_one, (0.0, 0.0), (100.0, 0.0), 10.0);

    let mut zoomed = session_with_image("ruler.png");
    for _ in 0..3 {
        zoomed.zoom_step(ZoomDirection::In);
    }
    let z = zoomed.zoom().factor();
    calibrate(&mut zoomed, (0.0, 0.0), (100.0 * z, 0.0), 10.0);

    let a = at_one.calibration().factor().unwrap();
    let b = zoomed.calibration().factor().unwrap();
    assert!((a - b).abs() < 1e-12);
}

#[test]
fn test_zoom_between_clicks_keeps_pending_point() {
    let mut session = session_with_image("ruler.png");
    calibrate(&mut session, (0.0, 0.0), (100.0, 0.0), 10.0);
    session.switch_to(InteractionMode::Measurement);
    session.take_notifications();

    // First point at zoom 1.0 (image point 50,0)
    session.click(Point2D::new(50.0, 0.0), &mut KnownDistance::Cancelled);
    session.zoom_step(ZoomDirection::Out);
    session.zoom_step(ZoomDirection::Out);
    assert_eq!(session.pending(), &[Point2D::new(50.0, 0.0)]);

    // Second point at image (150,0), clicked in zoomed-out display space
    let display = session.zoom().to_display_space(Point2D::new(150.0, 0.0));
    session.click(display, &mut KnownDistance::Cancelled);

    match session.take_notifications().as_slice() {
        [Notification::Measured { real_distance, .. }] => {
            assert!((real_distance - 10.0).abs() < 1e-9);
        }
        other => panic!("unexpected notifications: {:?}", other),
    }
}

#[test]
fn test_zoom_does_not_touch_calibration() {
    let mut session = session_with_image("ruler.png");
    calibrate(&mut session, (0.0, 0.0), (100.0, 0.0), 10.0);
    session.zoom_step(ZoomDirection::In);
    session.reset_zoom();
    session.zoom_step(ZoomDirection::Out);
    assert_eq!(session.calibration().factor(), Some(0.1));
}

#[test]
fn test_log_records_actions_in_order() {
    let mut session = session_with_image("ruler.png");
    calibrate(&mut session, (0.0, 0.0), (100.0, 0.0), 10.0);
    session.switch_to(InteractionMode::Measurement);
    session.click(Point2D::new(0.0, 0.0), &mut KnownDistance::Cancelled);
    session.click(Point2D::new(0.0, 50.0), &mut KnownDistance::Cancelled);
    session.change_unit("in");

    let messages: Vec<&str> = session
        .log()
        .entries()
        .iter()
        .map(|e| e.message.as_str())
        .collect();
    assert_eq!(messages.len(), 5);
    assert!(messages[0].starts_with("Image loaded: ruler.png"));
    assert!(messages[1].starts_with("Calibrated:"));
    assert_eq!(messages[2], "Mode changed to Measurement");
    assert!(messages[3].starts_with("Measured: 5.0000 cm"));
    assert_eq!(messages[4], "Unit changed to in; calibration reset");
}

#[test]
fn test_clear_log_leaves_one_entry() {
    let mut session = session_with_image("ruler.png");
    calibrate(&mut session, (0.0, 0.0), (100.0, 0.0), 10.0);
    session.clear_log();
    assert_eq!(session.log().len(), 1);
    assert_eq!(session.log().entries()[0].message, LOGS_CLEARED);

    session.clear_log();
    assert_eq!(session.log().len(), 1);
}

#[test]
fn test_failures_never_leave_pending_points() {
    let mut session = session_with_image("ruler.png");
    let answers = [
        KnownDistance::Missing,
        KnownDistance::Cancelled,
        KnownDistance::Entered(-1.0),
        KnownDistance::Entered(f64::NAN),
    ];
    for mut answer in answers {
        session.click(Point2D::new(0.0, 0.0), &mut answer);
        session.click(Point2D::new(80.0, 60.0), &mut answer);
        assert!(session.pending().is_empty(), "pending left after {:?}", answer);
        assert!(!session.calibration().is_calibrated());
    }
}
