//! Route geometry for rendering assignment plans on a map.
//!
//! Each assignment becomes one [`RouteLine`]. A precomputed road path from
//! the planner is authoritative; without one, the line is approximated as
//! vehicle position → pickup → dropoff → pickup → ... in assignment order.

use std::collections::HashMap;

use tracing::debug;

use crate::model::{OptimizeResponse, RideRequest, RouteAssignment, Vehicle};
use crate::palette::{self, BASELINE_ROUTE_COLOR};
use crate::polyline::Polyline;

/// How a route line's points were obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GeometrySource {
    /// The planner's path, used verbatim.
    Precomputed,
    /// Straight segments through the vehicle and ride stops.
    StraightLine,
}

/// Renderable geometry plus tooltip metadata for one vehicle's assignment.
#[derive(Debug, Clone, PartialEq)]
pub struct RouteLine {
    pub vehicle_id: String,
    /// Vehicle display name; the vehicle id when the vehicle is unknown.
    pub vehicle_name: String,
    pub color: String,
    pub points: Polyline,
    pub source: GeometrySource,
    pub ride_ids: Vec<String>,
    pub reasoning: String,
    /// Planner-computed miles; 0 when not computed.
    pub miles: f64,
}

impl RouteLine {
    /// Ride sequence for labels, e.g. `R001 → R005`.
    pub fn summary(&self) -> String {
        self.ride_ids.join(" → ")
    }

    /// Computed miles when available, otherwise the straight-line estimate.
    pub fn display_miles(&self) -> f64 {
        if self.miles > 0.0 {
            self.miles
        } else {
            self.points.length_miles()
        }
    }
}

/// Baseline and candidate route layers for one optimize response.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RouteLayers {
    /// Drawn underneath, in the baseline color.
    pub baseline: Vec<RouteLine>,
    pub candidate: Vec<RouteLine>,
}

/// Builds one route line per assignment, preserving plan order.
///
/// Ride ids missing from `rides` are skipped for that line only; an unknown
/// vehicle just loses its starting point. Neither fails the batch.
pub fn build_route_lines(
    assignments: &[RouteAssignment],
    rides: &[RideRequest],
    vehicles: &[Vehicle],
    color_override: Option<&str>,
) -> Vec<RouteLine> {
    let ride_map: HashMap<&str, &RideRequest> =
        rides.iter().map(|ride| (ride.id.as_str(), ride)).collect();

    assignments
        .iter()
        .map(|assignment| build_route_line(assignment, &ride_map, vehicles, color_override))
        .collect()
}

fn build_route_line(
    assignment: &RouteAssignment,
    ride_map: &HashMap<&str, &RideRequest>,
    vehicles: &[Vehicle],
    color_override: Option<&str>,
) -> RouteLine {
    let vehicle = vehicles
        .iter()
        .find(|vehicle| vehicle.id == assignment.vehicle_id);

    let (points, source) = match assignment.precomputed_path() {
        Some(path) => (path.clone(), GeometrySource::Precomputed),
        None => (
            straight_line_path(assignment, vehicle, ride_map),
            GeometrySource::StraightLine,
        ),
    };

    let color = color_override
        .unwrap_or_else(|| palette::vehicle_color(&assignment.vehicle_id))
        .to_string();

    RouteLine {
        vehicle_id: assignment.vehicle_id.clone(),
        vehicle_name: vehicle
            .map(|vehicle| vehicle.name.clone())
            .unwrap_or_else(|| assignment.vehicle_id.clone()),
        color,
        points,
        source,
        ride_ids: assignment.ride_ids_in_order.clone(),
        reasoning: assignment.reasoning.clone(),
        miles: assignment.route_miles,
    }
}

fn straight_line_path(
    assignment: &RouteAssignment,
    vehicle: Option<&Vehicle>,
    ride_map: &HashMap<&str, &RideRequest>,
) -> Polyline {
    let mut points = Vec::with_capacity(1 + 2 * assignment.ride_ids_in_order.len());

    match vehicle {
        Some(vehicle) => points.push(vehicle.position()),
        None => debug!(
            vehicle_id = %assignment.vehicle_id,
            "unknown vehicle, route starts at first pickup"
        ),
    }

    for ride_id in &assignment.ride_ids_in_order {
        match ride_map.get(ride_id.as_str()) {
            Some(ride) => {
                points.push(ride.pickup());
                points.push(ride.dropoff());
            }
            None => debug!(
                vehicle_id = %assignment.vehicle_id,
                ride_id = %ride_id,
                "ride missing from ride set, skipping stop"
            ),
        }
    }

    Polyline::new(points)
}

/// Builds both map layers for a response: the baseline in a single muted
/// color and the candidate in per-vehicle colors.
pub fn build_comparison_layers(
    response: &OptimizeResponse,
    rides: &[RideRequest],
    vehicles: &[Vehicle],
) -> RouteLayers {
    RouteLayers {
        baseline: build_route_lines(
            &response.naive_assignments,
            rides,
            vehicles,
            Some(BASELINE_ROUTE_COLOR),
        ),
        candidate: build_route_lines(&response.result.assignments, rides, vehicles, None),
    }
}
