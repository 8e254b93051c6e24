//! Errors raised by problem construction and route-chain edits.

use thiserror::Error;

/// A chain edit or standstill query that would break route invariants.
///
/// Customers and vehicles are addressed by their index in the
/// [`Solution`](super::Solution).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ChainError {
    /// No customer at this index.
    #[error("unknown customer index {0}")]
    UnknownCustomer(usize),
    /// No vehicle at this index.
    #[error("unknown vehicle index {0}")]
    UnknownVehicle(usize),
    /// No customer with this id.
    #[error("unknown customer id {0}")]
    UnknownCustomerId(u64),
    /// The customer already belongs to a route; unassign it first.
    #[error("customer {customer} is already assigned to vehicle {vehicle}")]
    AlreadyAssigned {
        /// Customer index.
        customer: usize,
        /// Index of the vehicle that owns it.
        vehicle: usize,
    },
    /// The customer is in the unassigned pool.
    #[error("customer {0} is not assigned to any vehicle")]
    NotAssigned(usize),
    /// A standstill query on a customer whose owning vehicle is unset.
    #[error("customer {0} has no owning vehicle; its standstill is uninitialized")]
    UninitializedShadow(usize),
    /// Insert position past the end of the route.
    #[error("position {position} is out of range for a route of {len} customers")]
    PositionOutOfRange {
        /// Requested position.
        position: usize,
        /// Route length at the time of the insert.
        len: usize,
    },
    /// A customer id appears more than once across warm-start routes.
    #[error("customer id {0} appears more than once in the routes")]
    DuplicateInRoutes(u64),
    /// More warm-start routes than vehicles.
    #[error("{routes} routes supplied for {vehicles} vehicles")]
    TooManyRoutes {
        /// Supplied route count.
        routes: usize,
        /// Available vehicles.
        vehicles: usize,
    },
}

/// Input data that cannot form a solution.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProblemError {
    /// The distance provider does not cover exactly the problem's locations.
    #[error("distance matrix has {actual} locations, problem needs {expected}")]
    MatrixSize {
        /// Depots plus customers.
        expected: usize,
        /// Provider size.
        actual: usize,
    },
    /// Two customers share an id.
    #[error("duplicate customer id {0}")]
    DuplicateCustomer(u64),
    /// Two vehicles share an id.
    #[error("duplicate vehicle id {0}")]
    DuplicateVehicle(u64),
    /// Demand below zero.
    #[error("customer {customer} has negative demand {demand}")]
    NegativeDemand {
        /// Customer id.
        customer: u64,
        /// Rejected demand.
        demand: i64,
    },
    /// Capacity below zero.
    #[error("vehicle {vehicle} has negative capacity {capacity}")]
    NegativeCapacity {
        /// Vehicle id.
        vehicle: u64,
        /// Rejected capacity.
        capacity: i64,
    },
    /// One depot id is given two different positions.
    #[error("depot {0} is declared with conflicting coordinates")]
    ConflictingDepot(u64),
}
