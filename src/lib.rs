//! fleet-compare: route reconciliation and plan comparison for dispatch maps.
//!
//! Turns planner assignments into renderable route lines, reconciles them
//! back onto rides and vehicles, compares a baseline plan against a
//! candidate, and tracks streamed planner reasoning.

pub mod model;
pub mod polyline;
pub mod haversine;
pub mod palette;
pub mod geometry;
pub mod bounds;
pub mod index;
pub mod comparison;
pub mod stream;
pub mod feed;
pub mod scenario;
pub mod client;
