//! Real Portland, OR locations for realistic test fixtures.

/// A named location with coordinates.
#[derive(Debug, Clone)]
pub struct Location {
    pub name: &'static str,
    pub lat: f64,
    pub lng: f64,
}

impl Location {
    pub const fn new(name: &'static str, lat: f64, lng: f64) -> Self {
        Self { name, lat, lng }
    }

    pub fn coords(&self) -> (f64, f64) {
        (self.lat, self.lng)
    }
}

pub const PDX_AIRPORT: Location =
    Location::new("Portland International Airport", 45.5898, -122.5951);
pub const PIONEER_SQUARE: Location = Location::new("Pioneer Courthouse Square", 45.5189, -122.6793);
pub const UNION_STATION: Location = Location::new("Union Station", 45.5289, -122.6765);
pub const OHSU: Location = Location::new("OHSU Hospital", 45.4992, -122.6856);
pub const MODA_CENTER: Location = Location::new("Moda Center", 45.5316, -122.6668);
pub const LLOYD_CENTER: Location = Location::new("Lloyd Center", 45.5316, -122.6535);
pub const ALBERTA_ARTS: Location = Location::new("Alberta Arts District", 45.5590, -122.6450);
pub const SELLWOOD: Location = Location::new("Sellwood Bridge", 45.4640, -122.6642);

/// Vehicle depots.
pub const DEPOTS: &[Location] = &[
    Location::new("Pearl District Depot", 45.5265, -122.6840),
    Location::new("Central Eastside Depot", 45.5170, -122.6600),
    Location::new("St. Johns Depot", 45.5896, -122.7537),
];
