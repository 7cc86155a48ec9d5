//! Centralized color theme for the application.
//!
//! This module provides the colors used for canvas markers and UI accents.

use bevy::prelude::Color;
use bevy_egui::egui;

// ============================================================================
// Canvas Colors
// ============================================================================

/// Grey canvas background behind the image
pub const CANVAS_BACKGROUND: Color = Color::srgb(0.5, 0.5, 0.5);

/// Fill of a pending point marker
pub const POINT_FILL: Color = Color::srgb(1.0, 0.0, 0.0);

/// Outline of a pending point marker
pub const POINT_OUTLINE: Color = Color::WHITE;

/// Line joining the two points of a completed action
pub const SEGMENT_LINE: Color = Color::srgb(0.0, 0.0, 1.0);

/// Rubber-band line from the first pending point to the cursor
pub const SEGMENT_PREVIEW: Color = Color::srgba(0.0, 0.0, 1.0, 0.5);

// ============================================================================
// UI Colors
// ============================================================================

/// Mode label color while calibrating
pub const MODE_CALIBRATION: egui::Color32 = egui::Color32::from_rgb(255, 180, 60);

/// Mode label color while measuring
pub const MODE_MEASUREMENT: egui::Color32 = egui::Color32::from_rgb(100, 200, 100);

/// Warning dialog accent
pub const NOTICE_WARNING: egui::Color32 = egui::Color32::from_rgb(255, 165, 0);

/// Error dialog accent
pub const NOTICE_ERROR: egui::Color32 = egui::Color32::from_rgb(230, 80, 80);

/// Log timestamp text
pub const LOG_TIMESTAMP: egui::Color32 = egui::Color32::GRAY;
