//! Gizmo overlays for selected points and completed segments.

use bevy::prelude::*;

use crate::constants::POINT_MARKER_RADIUS;
use crate::measure::{MeasureSession, Point2D};
use crate::theme;
use crate::ui::dialogs::ReferencePromptState;

use super::params::{world_from_display, CameraParams};
use super::ActiveSession;

/// Filled dot with an outline. Gizmos only stroke, so the fill is a stack
/// of shrinking circles.
fn draw_point(gizmos: &mut Gizmos, position: Vec2) {
    let mut radius = POINT_MARKER_RADIUS - 1.0;
    while radius > 0.0 {
        gizmos.circle_2d(Isometry2d::from_translation(position), radius, theme::POINT_FILL);
        radius -= 0.75;
    }
    gizmos.circle_2d(
        Isometry2d::from_translation(position),
        POINT_MARKER_RADIUS,
        theme::POINT_OUTLINE,
    );
}

/// World position of an image-space point at the current zoom
fn image_to_world(session: &MeasureSession, point: Point2D) -> Vec2 {
    world_from_display(session.zoom().to_display_space(point))
}

pub fn draw_markers(
    mut gizmos: Gizmos,
    session: Res<ActiveSession>,
    prompt: Res<ReferencePromptState>,
    camera: CameraParams,
) {
    if let Some((start, end)) = session.last_segment() {
        let (start, end) = (image_to_world(&session, start), image_to_world(&session, end));
        gizmos.line_2d(start, end, theme::SEGMENT_LINE);
        draw_point(&mut gizmos, start);
        draw_point(&mut gizmos, end);
    }

    let pending: Vec<Vec2> = session
        .pending()
        .iter()
        .map(|point| image_to_world(&session, *point))
        .collect();

    // Second point held while the reference prompt is open
    let held = prompt.held_point().map(world_from_display);

    if let Some(first) = pending.first() {
        let target = held.or_else(|| camera.cursor_world_pos());
        if let Some(target) = target {
            gizmos.line_2d(*first, target, theme::SEGMENT_PREVIEW);
        }
    }

    for position in pending.iter().chain(held.iter()) {
        draw_point(&mut gizmos, *position);
    }
}
