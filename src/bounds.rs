//! Map viewport covering every ride stop and vehicle.

use serde::{Deserialize, Serialize};

use crate::model::{RideRequest, Vehicle};

/// Padding added on every side of the enclosing box, in degrees.
pub const DEFAULT_PADDING_DEG: f64 = 0.01;

/// Axis-aligned lat/lng box.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub south: f64,
    pub west: f64,
    pub north: f64,
    pub east: f64,
}

impl BoundingBox {
    /// Smallest box containing every point, or `None` for no points.
    pub fn enclosing(points: impl IntoIterator<Item = (f64, f64)>) -> Option<Self> {
        points.into_iter().fold(None, |acc, (lat, lng)| {
            Some(match acc {
                None => Self {
                    south: lat,
                    west: lng,
                    north: lat,
                    east: lng,
                },
                Some(bbox) => Self {
                    south: bbox.south.min(lat),
                    west: bbox.west.min(lng),
                    north: bbox.north.max(lat),
                    east: bbox.east.max(lng),
                },
            })
        })
    }

    pub fn padded(self, padding: f64) -> Self {
        Self {
            south: self.south - padding,
            west: self.west - padding,
            north: self.north + padding,
            east: self.east + padding,
        }
    }

    pub fn contains(&self, (lat, lng): (f64, f64)) -> bool {
        (self.south..=self.north).contains(&lat) && (self.west..=self.east).contains(&lng)
    }

    pub fn center(&self) -> (f64, f64) {
        (
            (self.south + self.north) / 2.0,
            (self.west + self.east) / 2.0,
        )
    }
}

/// Viewport for a scenario: all pickups, dropoffs and vehicle positions,
/// padded by [`DEFAULT_PADDING_DEG`].
///
/// `None` when there is nothing to show; callers keep the current viewport.
pub fn compute_bounds(rides: &[RideRequest], vehicles: &[Vehicle]) -> Option<BoundingBox> {
    let stops = rides.iter().flat_map(|ride| [ride.pickup(), ride.dropoff()]);
    let positions = vehicles.iter().map(Vehicle::position);

    BoundingBox::enclosing(stops.chain(positions)).map(|bbox| bbox.padded(DEFAULT_PADDING_DEG))
}
