//! Test fixtures for fleet-compare.
//!
//! Provides realistic test data including:
//! - Real Portland locations
//! - Builders for rides, vehicles and assignments

#![allow(dead_code)]

pub mod portland_locations;

pub use portland_locations::*;

use chrono::NaiveDateTime;
use fleet_compare::model::{
    AssignmentPlan, OptimizeResponse, Priority, RideRequest, RouteAssignment, ServiceType,
    Vehicle, VehicleStatus, VehicleType,
};
use fleet_compare::polyline::Polyline;

fn at(time: &str) -> NaiveDateTime {
    NaiveDateTime::parse_from_str(time, "%Y-%m-%dT%H:%M:%S").expect("valid fixture time")
}

/// Builder for test rides with sensible defaults.
#[derive(Clone, Debug)]
pub struct TestRide(RideRequest);

impl TestRide {
    pub fn new(id: &str) -> Self {
        Self(RideRequest {
            id: id.to_string(),
            pickup_lat: 0.0,
            pickup_lng: 0.0,
            dropoff_lat: 0.0,
            dropoff_lng: 0.0,
            time_window_start: at("2026-02-28T10:00:00"),
            time_window_end: at("2026-02-28T10:30:00"),
            passenger_count: 1,
            priority: Priority::Medium,
            pickup_label: String::new(),
            dropoff_label: String::new(),
            service_type: ServiceType::Transfer,
            luggage_count: 0,
            notes: String::new(),
        })
    }

    pub fn from_to(mut self, pickup: &Location, dropoff: &Location) -> Self {
        (self.0.pickup_lat, self.0.pickup_lng) = pickup.coords();
        (self.0.dropoff_lat, self.0.dropoff_lng) = dropoff.coords();
        self.0.pickup_label = pickup.name.to_string();
        self.0.dropoff_label = dropoff.name.to_string();
        self
    }

    pub fn priority(mut self, priority: Priority) -> Self {
        self.0.priority = priority;
        self
    }

    /// Time window as `%Y-%m-%dT%H:%M:%S` strings.
    pub fn window(mut self, start: &str, end: &str) -> Self {
        self.0.time_window_start = at(start);
        self.0.time_window_end = at(end);
        self
    }

    pub fn build(self) -> RideRequest {
        self.0
    }
}

/// Builder for test vehicles with sensible defaults.
#[derive(Clone, Debug)]
pub struct TestVehicle(Vehicle);

impl TestVehicle {
    pub fn new(id: &str) -> Self {
        Self(Vehicle {
            id: id.to_string(),
            name: format!("Vehicle {}", id),
            current_lat: 0.0,
            current_lng: 0.0,
            capacity: 4,
            status: VehicleStatus::Available,
            vehicle_type: VehicleType::Sedan,
            luggage_capacity: 4,
        })
    }

    pub fn at(mut self, location: &Location) -> Self {
        (self.0.current_lat, self.0.current_lng) = location.coords();
        self
    }

    pub fn name(mut self, name: &str) -> Self {
        self.0.name = name.to_string();
        self
    }

    pub fn build(self) -> Vehicle {
        self.0
    }
}

/// Builder for test assignments.
#[derive(Clone, Debug)]
pub struct TestAssignment(RouteAssignment);

impl TestAssignment {
    pub fn new(vehicle_id: &str, ride_ids: &[&str]) -> Self {
        Self(RouteAssignment {
            vehicle_id: vehicle_id.to_string(),
            ride_ids_in_order: ride_ids.iter().map(|id| id.to_string()).collect(),
            reasoning: format!("{} handles {}", vehicle_id, ride_ids.join(", ")),
            polyline: None,
            route_miles: 0.0,
        })
    }

    pub fn path(mut self, points: &[(f64, f64)]) -> Self {
        self.0.polyline = Some(Polyline::new(points.to_vec()));
        self
    }

    pub fn miles(mut self, miles: f64) -> Self {
        self.0.route_miles = miles;
        self
    }

    pub fn build(self) -> RouteAssignment {
        self.0
    }
}

pub fn plan(assignments: Vec<RouteAssignment>) -> AssignmentPlan {
    AssignmentPlan {
        assignments,
        overall_strategy: "Cluster rides by neighborhood".to_string(),
        unassigned_rides: Vec::new(),
    }
}

pub fn response(result: AssignmentPlan, naive: Vec<RouteAssignment>) -> OptimizeResponse {
    OptimizeResponse {
        naive_assignments: naive,
        naive_miles: Some(100.0),
        optimized_miles: Some(60.0),
        naive_violations: Some(2),
        optimized_violations: Some(0),
        ..OptimizeResponse::from_plan(result)
    }
}

/// Three rides around downtown and the airport.
pub fn downtown_rides() -> Vec<RideRequest> {
    vec![
        TestRide::new("R001")
            .from_to(&PIONEER_SQUARE, &PDX_AIRPORT)
            .priority(Priority::Urgent)
            .build(),
        TestRide::new("R002").from_to(&UNION_STATION, &OHSU).build(),
        TestRide::new("R003").from_to(&MODA_CENTER, &ALBERTA_ARTS).build(),
    ]
}

pub fn depot_vehicles() -> Vec<Vehicle> {
    vec![
        TestVehicle::new("V001").at(&DEPOTS[0]).name("Sedan 1").build(),
        TestVehicle::new("V002").at(&DEPOTS[1]).name("Van 2").build(),
    ]
}
