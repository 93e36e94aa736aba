//! Display colors for vehicles and ride priorities.

use crate::model::Priority;

/// Color for vehicles without a palette entry.
pub const NEUTRAL_COLOR: &str = "#6b7280";

/// Color of baseline route lines, drawn dashed beneath the candidate plan.
pub const BASELINE_ROUTE_COLOR: &str = "#9ca3af";

const VEHICLE_COLORS: &[(&str, &str)] = &[
    ("V001", "#6366f1"), // indigo
    ("V002", "#f59e0b"), // amber
    ("V003", "#10b981"), // emerald
    ("V004", "#8b5cf6"), // violet
    ("V005", "#ec4899"), // pink
];

/// Palette entry for a vehicle, if it has one.
pub fn palette_color(vehicle_id: &str) -> Option<&'static str> {
    VEHICLE_COLORS
        .iter()
        .find(|(id, _)| *id == vehicle_id)
        .map(|(_, color)| *color)
}

/// Palette color for a vehicle, falling back to [`NEUTRAL_COLOR`].
pub fn vehicle_color(vehicle_id: &str) -> &'static str {
    palette_color(vehicle_id).unwrap_or(NEUTRAL_COLOR)
}

impl Priority {
    pub fn color(self) -> &'static str {
        match self {
            Priority::Urgent => "#ef4444",
            Priority::High => "#f97316",
            Priority::Medium => "#3b82f6",
            Priority::Low => "#6b7280",
        }
    }
}
