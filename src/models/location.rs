//! Geographic points and their identity.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::distance::DistanceMatrix;

/// A latitude/longitude pair.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    /// Latitude.
    pub lat: f64,
    /// Longitude.
    pub lng: f64,
}

impl Coordinate {
    /// Creates a coordinate.
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Straight-line distance to another coordinate in degree units.
    pub fn euclidean_distance(&self, other: &Coordinate) -> f64 {
        let dlat = self.lat - other.lat;
        let dlng = self.lng - other.lng;
        (dlat * dlat + dlng * dlng).sqrt()
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}, {}", self.lat, self.lng)
    }
}

/// An immutable point with identity, bound to one index of a distance matrix.
///
/// Latitude and longitude are only used by angle-based heuristics; all
/// distances go through the [`DistanceMatrix`] the location was indexed in.
///
/// # Examples
///
/// ```
/// use u_cvrp::distance::EuclideanMatrix;
/// use u_cvrp::models::{Coordinate, Location};
///
/// let dm = EuclideanMatrix::new(&[Coordinate::new(0.0, 0.0), Coordinate::new(0.0, 2.0)]);
/// let depot = Location::new(10, Some("Depot".into()), Coordinate::new(0.0, 0.0), 0);
/// let shop = Location::new(11, None, Coordinate::new(0.0, 2.0), 1);
///
/// assert_eq!(depot.distance_to(&shop, &dm), 2000);
/// assert_eq!(shop.distance_to(&shop, &dm), 0);
/// assert_eq!(depot.to_string(), "Depot");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Location {
    id: u64,
    name: Option<String>,
    coordinate: Coordinate,
    index: usize,
}

impl Location {
    /// Creates a location stored at `index` of its distance matrix.
    pub fn new(id: u64, name: Option<String>, coordinate: Coordinate, index: usize) -> Self {
        Self {
            id,
            name,
            coordinate,
            index,
        }
    }

    /// Stable identifier.
    pub fn id(&self) -> u64 {
        self.id
    }

    /// Display name, if any.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Position.
    pub fn coordinate(&self) -> Coordinate {
        self.coordinate
    }

    /// Latitude.
    pub fn latitude(&self) -> f64 {
        self.coordinate.lat
    }

    /// Longitude.
    pub fn longitude(&self) -> f64 {
        self.coordinate.lng
    }

    /// Index of this location in its distance matrix.
    pub fn index(&self) -> usize {
        self.index
    }

    /// Scaled (×1000, rounded) distance from this location to `other`.
    ///
    /// Zero when both share a matrix index.
    pub fn distance_to(&self, other: &Location, matrix: &dyn DistanceMatrix) -> i64 {
        matrix.scaled_distance(self.index, other.index)
    }

    /// Angle of `other` as seen from this location, relative to EAST.
    ///
    /// Planar approximation on raw latitude/longitude; not valid on a sphere.
    pub fn angle_to(&self, other: &Location) -> f64 {
        let dlat = other.latitude() - self.latitude();
        let dlng = other.longitude() - self.longitude();
        dlat.atan2(dlng)
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.name {
            Some(name) => f.write_str(name),
            None => write!(f, "Location {}", self.id),
        }
    }
}
