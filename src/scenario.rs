//! The ride and vehicle set currently loaded for display.

use std::cell::OnceCell;

use tracing::warn;

use crate::bounds::{self, BoundingBox};
use crate::model::{RideRequest, SeedData, Vehicle};

/// Rides and vehicles for one scenario id.
///
/// The sets are replaced wholesale, never edited. Bounds are computed on
/// first use after each replacement rather than on every render.
#[derive(Debug, Default)]
pub struct Scenario {
    id: String,
    rides: Vec<RideRequest>,
    vehicles: Vec<Vehicle>,
    generation: u64,
    bounds: OnceCell<Option<BoundingBox>>,
}

impl Scenario {
    pub fn new(id: impl Into<String>, seed: SeedData) -> Self {
        let scenario = Self {
            id: id.into(),
            rides: seed.rides,
            vehicles: seed.vehicles,
            generation: 0,
            bounds: OnceCell::new(),
        };
        scenario.warn_inverted_windows();
        scenario
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn rides(&self) -> &[RideRequest] {
        &self.rides
    }

    pub fn vehicles(&self) -> &[Vehicle] {
        &self.vehicles
    }

    /// Bumped on every replacement.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Swaps in a new scenario and invalidates cached bounds.
    pub fn replace(&mut self, id: impl Into<String>, seed: SeedData) {
        self.id = id.into();
        self.rides = seed.rides;
        self.vehicles = seed.vehicles;
        self.generation += 1;
        self.bounds = OnceCell::new();
        self.warn_inverted_windows();
    }

    /// Rides whose time window closes before it opens. They are still shown.
    pub fn rides_with_inverted_window(&self) -> impl Iterator<Item = &RideRequest> {
        self.rides.iter().filter(|ride| !ride.has_valid_window())
    }

    fn warn_inverted_windows(&self) {
        for ride in self.rides_with_inverted_window() {
            warn!(
                scenario = %self.id,
                ride_id = %ride.id,
                pickup = %ride.pickup_display(),
                dropoff = %ride.dropoff_display(),
                "ride time window ends before it starts"
            );
        }
    }

    /// Viewport for the current sets; `None` when both are empty.
    pub fn bounds(&self) -> Option<BoundingBox> {
        *self
            .bounds
            .get_or_init(|| bounds::compute_bounds(&self.rides, &self.vehicles))
    }
}
