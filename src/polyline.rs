//! Polyline representation for route geometries.
//!
//! Routes are held as decoded coordinate sequences. Planners may ship the
//! compact encoded-polyline format instead; decoding happens once at the
//! boundary (when the assignment is deserialized).

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::haversine::haversine_miles;

/// Precision of the encoded format: 5 decimal places.
const ENCODING_FACTOR: f64 = 1e5;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PolylineError {
    #[error("encoded polyline truncated at byte {0}")]
    Truncated(usize),
    #[error("invalid polyline character {found:?} at byte {position}")]
    InvalidChar { found: char, position: usize },
    #[error("encoded value overflows at byte {0}")]
    Overflow(usize),
}

/// A polyline representing a route geometry as decoded coordinates.
///
/// Serializes as a bare `[[lat, lng], ...]` array.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Polyline {
    points: Vec<(f64, f64)>,
}

impl Polyline {
    /// Creates a new Polyline from decoded coordinate points.
    ///
    /// Each point is a (latitude, longitude) tuple.
    pub fn new(points: Vec<(f64, f64)>) -> Self {
        Self { points }
    }

    /// Decodes a polyline in the Google encoded-polyline format.
    pub fn decode(encoded: &str) -> Result<Self, PolylineError> {
        let bytes = encoded.as_bytes();
        let mut index = 0;
        let mut lat: i64 = 0;
        let mut lng: i64 = 0;
        let mut points = Vec::new();

        while index < bytes.len() {
            lat = accumulate(lat, decode_value(bytes, &mut index)?, index)?;
            lng = accumulate(lng, decode_value(bytes, &mut index)?, index)?;
            points.push((lat as f64 / ENCODING_FACTOR, lng as f64 / ENCODING_FACTOR));
        }

        Ok(Self { points })
    }

    /// Returns a reference to the coordinate points.
    pub fn points(&self) -> &[(f64, f64)] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Straight-line length in miles, summed segment by segment.
    pub fn length_miles(&self) -> f64 {
        self.points
            .windows(2)
            .map(|pair| haversine_miles(pair[0], pair[1]))
            .sum()
    }
}

/// Adds a decoded delta to the running coordinate.
fn accumulate(total: i64, delta: i64, index: usize) -> Result<i64, PolylineError> {
    total.checked_add(delta).ok_or(PolylineError::Overflow(index))
}

/// Reads one zig-zag encoded varint starting at `index`.
fn decode_value(bytes: &[u8], index: &mut usize) -> Result<i64, PolylineError> {
    let mut result: i64 = 0;
    let mut shift = 0;
    loop {
        let Some(&byte) = bytes.get(*index) else {
            return Err(PolylineError::Truncated(*index));
        };
        if !(63..=126).contains(&byte) {
            return Err(PolylineError::InvalidChar {
                found: byte as char,
                position: *index,
            });
        }
        if shift > 60 {
            return Err(PolylineError::Overflow(*index));
        }
        *index += 1;

        let chunk = i64::from(byte - 63);
        result |= (chunk & 0x1f) << shift;
        shift += 5;
        if chunk < 0x20 {
            break;
        }
    }

    Ok(if result & 1 != 0 { !(result >> 1) } else { result >> 1 })
}
