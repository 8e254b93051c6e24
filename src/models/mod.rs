//! Domain model for capacitated vehicle routing.
//!
//! Provides locations and coordinates, customers with demands, vehicles
//! with capacities and depots, the serializable problem input, and the
//! route-chain [`Solution`] an optimizer mutates.

mod customer;
mod error;
mod location;
mod problem;
mod route;
mod solution;
mod vehicle;

pub use customer::Customer;
pub use error::{ChainError, ProblemError};
pub use location::{Coordinate, Location};
pub use problem::{CustomerSpec, DepotSpec, VehicleSpec, VrpProblem};
pub use route::RouteSummary;
pub use solution::Solution;
pub use vehicle::{Depot, Vehicle};
