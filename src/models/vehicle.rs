//! Depot and vehicle types.

use super::Location;

/// Where vehicles start and end their routes.
#[derive(Debug, Clone, PartialEq)]
pub struct Depot {
    id: u64,
    location: Location,
}

impl Depot {
    /// Creates a depot.
    pub fn new(id: u64, location: Location) -> Self {
        Self { id, location }
    }

    /// Depot id.
    pub fn id(&self) -> u64 {
        self.id
    }

    /// Depot location.
    pub fn location(&self) -> &Location {
        &self.location
    }
}

/// A vehicle with a capacity, a home depot, and its route.
///
/// The route is the ordered list of customer indices the vehicle visits,
/// bounded by the depot at both ends (the depot is not stored). It is the
/// primary state of the route chain; customer relations are derived from it.
///
/// # Examples
///
/// ```
/// use u_cvrp::models::Vehicle;
///
/// let v = Vehicle::new(0, 200, 0);
/// assert_eq!(v.capacity(), 200);
/// assert!(v.route().is_empty());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Vehicle {
    id: u64,
    capacity: i64,
    depot: usize,
    customers: Vec<usize>,
}

impl Vehicle {
    /// Creates a vehicle with an empty route, based at depot index `depot`.
    pub fn new(id: u64, capacity: i64, depot: usize) -> Self {
        Self {
            id,
            capacity,
            depot,
            customers: Vec::new(),
        }
    }

    /// Vehicle id.
    pub fn id(&self) -> u64 {
        self.id
    }

    /// Maximum total demand the vehicle can carry.
    pub fn capacity(&self) -> i64 {
        self.capacity
    }

    /// Index of the home depot in the solution.
    pub fn depot(&self) -> usize {
        self.depot
    }

    /// Customer indices in visiting order.
    pub fn route(&self) -> &[usize] {
        &self.customers
    }

    /// Number of customers on the route.
    pub fn len(&self) -> usize {
        self.customers.len()
    }

    /// Returns `true` if the vehicle visits no customer.
    pub fn is_empty(&self) -> bool {
        self.customers.is_empty()
    }

    pub(crate) fn route_mut(&mut self) -> &mut Vec<usize> {
        &mut self.customers
    }
}
