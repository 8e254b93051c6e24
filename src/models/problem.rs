//! Serializable problem input.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use super::{Coordinate, ProblemError};

/// A depot as declared on a vehicle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DepotSpec {
    /// Depot id; vehicles sharing a depot repeat the same id.
    pub id: u64,
    /// Display name.
    #[serde(default)]
    pub name: Option<String>,
    /// Latitude.
    pub lat: f64,
    /// Longitude.
    pub lng: f64,
}

/// A vehicle with its capacity and home depot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VehicleSpec {
    /// Vehicle id.
    pub id: u64,
    /// Capacity in demand units.
    pub capacity: i64,
    /// Home depot.
    pub depot: DepotSpec,
}

/// A customer to be served.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomerSpec {
    /// Customer id.
    pub id: u64,
    /// Display name.
    #[serde(default)]
    pub name: Option<String>,
    /// Latitude.
    pub lat: f64,
    /// Longitude.
    pub lng: f64,
    /// Demand in capacity units.
    pub demand: i64,
}

impl CustomerSpec {
    /// Position of the customer.
    pub fn coordinate(&self) -> Coordinate {
        Coordinate::new(self.lat, self.lng)
    }
}

impl DepotSpec {
    /// Position of the depot.
    pub fn coordinate(&self) -> Coordinate {
        Coordinate::new(self.lat, self.lng)
    }
}

/// A CVRP instance: vehicles with depots, and customers with demands.
///
/// Distance-matrix locations are laid out depots first (distinct depots of
/// the vehicles, in first-seen order), then customers in input order.
///
/// # Examples
///
/// ```
/// use u_cvrp::models::VrpProblem;
///
/// let problem: VrpProblem = serde_json::from_str(r#"{
///     "id": 1,
///     "name": "demo",
///     "vehicles": [
///         {"id": 10, "capacity": 10, "depot": {"id": 100, "lat": 0.0, "lng": 0.0}},
///         {"id": 11, "capacity": 10, "depot": {"id": 100, "lat": 0.0, "lng": 0.0}}
///     ],
///     "customers": [
///         {"id": 1, "lat": 0.0, "lng": 1.0, "demand": 4},
///         {"id": 2, "name": "Mill", "lat": 0.0, "lng": 2.0, "demand": 4}
///     ]
/// }"#).unwrap();
///
/// assert_eq!(problem.depots().unwrap().len(), 1);
/// assert_eq!(problem.coordinates().unwrap().len(), 3);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VrpProblem {
    /// Instance id.
    pub id: u64,
    /// Instance name.
    pub name: String,
    /// Fleet.
    pub vehicles: Vec<VehicleSpec>,
    /// Customers to serve.
    pub customers: Vec<CustomerSpec>,
}

impl VrpProblem {
    /// Distinct depots of the fleet, in first-seen order.
    ///
    /// Fails with [`ProblemError::ConflictingDepot`] if one depot id is
    /// declared at two different positions.
    pub fn depots(&self) -> Result<Vec<&DepotSpec>, ProblemError> {
        let mut depots: Vec<&DepotSpec> = Vec::new();
        for vehicle in &self.vehicles {
            let depot = &vehicle.depot;
            match depots.iter().find(|d| d.id == depot.id) {
                Some(seen) if seen.coordinate() != depot.coordinate() => {
                    return Err(ProblemError::ConflictingDepot(depot.id));
                }
                Some(_) => {}
                None => depots.push(depot),
            }
        }
        Ok(depots)
    }

    /// Coordinates in distance-matrix order: depots, then customers.
    pub fn coordinates(&self) -> Result<Vec<Coordinate>, ProblemError> {
        let depots = self.depots()?;
        Ok(depots
            .iter()
            .map(|d| d.coordinate())
            .chain(self.customers.iter().map(CustomerSpec::coordinate))
            .collect())
    }

    /// Checks ids are unique and demands and capacities non-negative.
    pub fn validate(&self) -> Result<(), ProblemError> {
        let mut seen = HashSet::new();
        for c in &self.customers {
            if !seen.insert(c.id) {
                return Err(ProblemError::DuplicateCustomer(c.id));
            }
            if c.demand < 0 {
                return Err(ProblemError::NegativeDemand {
                    customer: c.id,
                    demand: c.demand,
                });
            }
        }

        let mut seen = HashSet::new();
        for v in &self.vehicles {
            if !seen.insert(v.id) {
                return Err(ProblemError::DuplicateVehicle(v.id));
            }
            if v.capacity < 0 {
                return Err(ProblemError::NegativeCapacity {
                    vehicle: v.id,
                    capacity: v.capacity,
                });
            }
        }

        self.depots().map(|_| ())
    }

    /// Sum of all customer demands.
    pub fn total_demand(&self) -> i64 {
        self.customers.iter().map(|c| c.demand).sum()
    }
}
