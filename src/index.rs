//! Lookups from rides and vehicles back into a plan's assignments.
//!
//! Plans are small, so these are linear scans. When a malformed plan lists a
//! ride under more than one vehicle, the earliest assignment in plan order
//! wins.

use crate::model::RouteAssignment;
use crate::palette;

/// Vehicle a ride is assigned to, if any.
pub fn assigned_vehicle_of<'a>(
    ride_id: &str,
    assignments: &'a [RouteAssignment],
) -> Option<&'a str> {
    assignments
        .iter()
        .find(|assignment| assignment.ride_ids_in_order.iter().any(|id| id == ride_id))
        .map(|assignment| assignment.vehicle_id.as_str())
}

/// A vehicle's assignment, if it has one.
pub fn assignment_of<'a>(
    vehicle_id: &str,
    assignments: &'a [RouteAssignment],
) -> Option<&'a RouteAssignment> {
    assignments
        .iter()
        .find(|assignment| assignment.vehicle_id == vehicle_id)
}

/// Highlight color for a ride: its vehicle's color, or `None` if unassigned.
pub fn assignment_color(ride_id: &str, assignments: &[RouteAssignment]) -> Option<&'static str> {
    assigned_vehicle_of(ride_id, assignments).map(palette::vehicle_color)
}
