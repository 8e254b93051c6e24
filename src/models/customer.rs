//! Customer type and its derived route relations.

use super::Location;

/// A customer with a demand, visited by at most one vehicle.
///
/// Identity, location and demand never change. The owning vehicle and the
/// previous/next customers in its route are derived from the vehicles'
/// route lists and are only written by [`Solution`](super::Solution) chain
/// edits, so they always agree with those lists.
///
/// # Examples
///
/// ```
/// use u_cvrp::models::{Coordinate, Customer, Location};
///
/// let loc = Location::new(5, Some("Bakery".into()), Coordinate::new(0.0, 1.0), 1);
/// let c = Customer::new(5, loc, 4);
/// assert_eq!(c.id(), 5);
/// assert_eq!(c.demand(), 4);
/// assert!(!c.is_assigned());
/// assert_eq!(c.previous(), None);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Customer {
    id: u64,
    location: Location,
    demand: i64,
    vehicle: Option<usize>,
    previous: Option<usize>,
    next: Option<usize>,
}

impl Customer {
    /// Creates an unassigned customer.
    pub fn new(id: u64, location: Location, demand: i64) -> Self {
        Self {
            id,
            location,
            demand,
            vehicle: None,
            previous: None,
            next: None,
        }
    }

    /// Customer id.
    pub fn id(&self) -> u64 {
        self.id
    }

    /// Where the customer is served.
    pub fn location(&self) -> &Location {
        &self.location
    }

    /// Units of demand delivered to this customer.
    pub fn demand(&self) -> i64 {
        self.demand
    }

    /// Index of the owning vehicle, or `None` while unassigned.
    pub fn vehicle(&self) -> Option<usize> {
        self.vehicle
    }

    /// Index of the customer visited just before this one.
    ///
    /// `None` when this customer is first in its route (the standstill is
    /// then the depot) or unassigned.
    pub fn previous(&self) -> Option<usize> {
        self.previous
    }

    /// Index of the customer visited just after this one.
    pub fn next(&self) -> Option<usize> {
        self.next
    }

    /// Returns `true` if some vehicle visits this customer.
    pub fn is_assigned(&self) -> bool {
        self.vehicle.is_some()
    }

    pub(crate) fn attach(&mut self, vehicle: usize) {
        self.vehicle = Some(vehicle);
    }

    pub(crate) fn detach(&mut self) {
        self.vehicle = None;
        self.previous = None;
        self.next = None;
    }

    pub(crate) fn set_previous(&mut self, previous: Option<usize>) {
        self.previous = previous;
    }

    pub(crate) fn set_next(&mut self, next: Option<usize>) {
        self.next = next;
    }
}
