// LogLens - ui/theme.rs
//
// Colour mapping and layout constants.
// No dependencies on app state or business logic.

use egui::Color32;

/// Colour for a row's level/severity string, matched case-insensitively.
/// Unknown levels fall back to the default text colour via `None`.
pub fn level_colour(level: &str) -> Option<Color32> {
    match level.to_lowercase().as_str() {
        "fatal" | "critical" => Some(Color32::from_rgb(220, 38, 38)), // Red 600
        "error" => Some(Color32::from_rgb(248, 113, 113)),            // Red 400
        "warn" | "warning" => Some(Color32::from_rgb(217, 119, 6)),   // Amber 600
        "info" | "log" => Some(Color32::from_rgb(209, 213, 219)),     // Gray 300
        "debug" | "trace" => Some(Color32::from_rgb(107, 114, 128)),  // Gray 500
        _ => None,
    }
}

/// Accent colour for warnings surfaced in the status area.
pub const WARNING_TEXT: Color32 = Color32::from_rgb(253, 186, 116); // Orange 300

/// Accent colour for the retention upsell dialog title.
pub const UPSELL_ACCENT: Color32 = Color32::from_rgb(52, 211, 153); // Emerald 400

/// Layout constants.
pub const EDITOR_HEIGHT: f32 = 140.0;
pub const DETAIL_PANE_WIDTH: f32 = 380.0;
pub const ROW_HEIGHT: f32 = 20.0;
pub const FIELD_REFERENCE_WIDTH: f32 = 420.0;
