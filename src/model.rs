//! Dispatch records consumed and produced by the comparison engine.
//!
//! These mirror the planner's wire format. Rides and vehicles are immutable
//! once loaded for a scenario; plans are produced atomically by the planner
//! and never partially applied.

use chrono::NaiveDateTime;
use serde::{Deserialize, Deserializer, Serialize};

use crate::comparison::{self, Comparison};
use crate::polyline::Polyline;

/// Ride priority as reported by the dispatcher.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    Low,
    Medium,
    High,
    Urgent,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ServiceType {
    #[default]
    Transfer,
    AirportArrival,
    AirportDeparture,
    Hourly,
    PointToPoint,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VehicleStatus {
    Available,
    EnRoute,
    OnTrip,
    OffDuty,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VehicleType {
    #[default]
    Sedan,
    Suv,
    Van,
    Sprinter,
}

/// A single ride request in the dispatch queue.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RideRequest {
    pub id: String,
    pub pickup_lat: f64,
    pub pickup_lng: f64,
    pub dropoff_lat: f64,
    pub dropoff_lng: f64,
    pub time_window_start: NaiveDateTime,
    pub time_window_end: NaiveDateTime,
    pub passenger_count: u32,
    pub priority: Priority,
    #[serde(default)]
    pub pickup_label: String,
    #[serde(default)]
    pub dropoff_label: String,
    #[serde(default)]
    pub service_type: ServiceType,
    #[serde(default)]
    pub luggage_count: u32,
    #[serde(default)]
    pub notes: String,
}

impl RideRequest {
    /// Pickup coordinate (lat, lng).
    pub fn pickup(&self) -> (f64, f64) {
        (self.pickup_lat, self.pickup_lng)
    }

    /// Dropoff coordinate (lat, lng).
    pub fn dropoff(&self) -> (f64, f64) {
        (self.dropoff_lat, self.dropoff_lng)
    }

    pub fn has_valid_window(&self) -> bool {
        self.time_window_start <= self.time_window_end
    }

    /// Pickup label, or the coordinate when the dispatcher left it blank.
    pub fn pickup_display(&self) -> String {
        label_or_coords(&self.pickup_label, self.pickup())
    }

    pub fn dropoff_display(&self) -> String {
        label_or_coords(&self.dropoff_label, self.dropoff())
    }
}

fn label_or_coords(label: &str, (lat, lng): (f64, f64)) -> String {
    if label.is_empty() {
        format!("{:.3}, {:.3}", lat, lng)
    } else {
        label.to_string()
    }
}

fn default_luggage_capacity() -> u32 {
    4
}

/// A fleet vehicle and its last known position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Vehicle {
    pub id: String,
    pub name: String,
    pub current_lat: f64,
    pub current_lng: f64,
    pub capacity: u32,
    pub status: VehicleStatus,
    #[serde(default)]
    pub vehicle_type: VehicleType,
    #[serde(default = "default_luggage_capacity")]
    pub luggage_capacity: u32,
}

impl Vehicle {
    /// Current coordinate (lat, lng).
    pub fn position(&self) -> (f64, f64) {
        (self.current_lat, self.current_lng)
    }
}

/// One vehicle's share of a plan.
///
/// Each ride id is expected to appear in at most one assignment per plan.
/// That is upstream's invariant; lookups here tolerate violations of it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteAssignment {
    pub vehicle_id: String,
    pub ride_ids_in_order: Vec<String>,
    #[serde(default)]
    pub reasoning: String,
    /// Precomputed road geometry. Authoritative when non-empty.
    #[serde(
        default,
        deserialize_with = "deserialize_path",
        skip_serializing_if = "Option::is_none"
    )]
    pub polyline: Option<Polyline>,
    /// Route distance in miles; 0 means the planner did not compute one.
    #[serde(default)]
    pub route_miles: f64,
}

impl RouteAssignment {
    /// The precomputed path, if the planner supplied at least one point.
    pub fn precomputed_path(&self) -> Option<&Polyline> {
        self.polyline.as_ref().filter(|path| !path.is_empty())
    }
}

/// Paths arrive either as coordinate pairs or as an encoded polyline string.
#[derive(Deserialize)]
#[serde(untagged)]
enum WirePath {
    Points(Vec<(f64, f64)>),
    Encoded(String),
}

fn deserialize_path<'de, D>(deserializer: D) -> Result<Option<Polyline>, D::Error>
where
    D: Deserializer<'de>,
{
    let wire = Option::<WirePath>::deserialize(deserializer)?;
    match wire {
        None => Ok(None),
        Some(WirePath::Points(points)) => Ok(Some(Polyline::new(points))),
        Some(WirePath::Encoded(encoded)) => Polyline::decode(&encoded)
            .map(Some)
            .map_err(serde::de::Error::custom),
    }
}

/// A complete proposed mapping of rides to vehicles.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AssignmentPlan {
    pub assignments: Vec<RouteAssignment>,
    #[serde(default)]
    pub overall_strategy: String,
    #[serde(default)]
    pub unassigned_rides: Vec<String>,
}

/// Rides and vehicles for one scenario.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SeedData {
    pub rides: Vec<RideRequest>,
    pub vehicles: Vec<Vehicle>,
}

#[derive(Debug, Clone, Serialize)]
pub struct OptimizeRequest<'a> {
    pub rides: &'a [RideRequest],
    pub vehicles: &'a [Vehicle],
}

/// Full planner response: the candidate plan plus the baseline it is
/// compared against.
///
/// Metrics are absent when no baseline was run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptimizeResponse {
    pub result: AssignmentPlan,
    /// Prompt/context used to produce the plan. Audit display only.
    #[serde(default)]
    pub prompt_used: String,
    #[serde(default)]
    pub naive_assignments: Vec<RouteAssignment>,
    #[serde(default)]
    pub naive_miles: Option<f64>,
    #[serde(default)]
    pub optimized_miles: Option<f64>,
    #[serde(default)]
    pub naive_violations: Option<u32>,
    #[serde(default)]
    pub optimized_violations: Option<u32>,
}

impl OptimizeResponse {
    /// Wraps a bare plan with no baseline attached.
    pub fn from_plan(result: AssignmentPlan) -> Self {
        Self {
            result,
            prompt_used: String::new(),
            naive_assignments: Vec::new(),
            naive_miles: None,
            optimized_miles: None,
            naive_violations: None,
            optimized_violations: None,
        }
    }

    pub fn plan(&self) -> &AssignmentPlan {
        &self.result
    }

    /// Baseline vs candidate metrics, or `None` when no baseline was run.
    pub fn comparison(&self) -> Option<Comparison> {
        comparison::compare_optional(
            self.naive_miles,
            self.optimized_miles,
            self.naive_violations,
            self.optimized_violations,
        )
    }
}

/// The optimize endpoint answers with either shape.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum OptimizeReply {
    Full(OptimizeResponse),
    Bare(AssignmentPlan),
}

impl From<OptimizeReply> for OptimizeResponse {
    fn from(reply: OptimizeReply) -> Self {
        match reply {
            OptimizeReply::Full(response) => response,
            OptimizeReply::Bare(plan) => OptimizeResponse::from_plan(plan),
        }
    }
}
