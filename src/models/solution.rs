//! The route-chain solution and its edits.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use log::{debug, info};

use super::{
    ChainError, Customer, Depot, Location, ProblemError, RouteSummary, Vehicle, VrpProblem,
};
use crate::distance::DistanceMatrix;

/// Vehicles with their routes, the customers they may visit, and the
/// distance provider all costs are read from.
///
/// Each vehicle's route list is the primary state. Every customer's owning
/// vehicle and previous/next neighbours are written only by the chain edits
/// below ([`assign`](Self::assign), [`unassign`](Self::unassign),
/// [`move_customer`](Self::move_customer),
/// [`swap_customers`](Self::swap_customers)), each of which touches the
/// edited customer and its direct neighbours only.
///
/// Customers and vehicles are addressed by index; see
/// [`customer_index`](Self::customer_index) to resolve an id.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use u_cvrp::distance::EuclideanMatrix;
/// use u_cvrp::models::{CustomerSpec, DepotSpec, Solution, VehicleSpec, VrpProblem};
///
/// let problem = VrpProblem {
///     id: 1,
///     name: "line".into(),
///     vehicles: vec![VehicleSpec {
///         id: 1,
///         capacity: 10,
///         depot: DepotSpec { id: 0, name: None, lat: 0.0, lng: 0.0 },
///     }],
///     customers: vec![
///         CustomerSpec { id: 1, name: None, lat: 0.0, lng: 1.0, demand: 4 },
///         CustomerSpec { id: 2, name: None, lat: 0.0, lng: 2.0, demand: 4 },
///     ],
/// };
/// let matrix = Arc::new(EuclideanMatrix::new(&problem.coordinates().unwrap()));
/// let mut solution = Solution::new(&problem, matrix).unwrap();
///
/// solution.assign(0, 0, None).unwrap();
/// solution.assign(1, 0, None).unwrap();
///
/// assert_eq!(solution.distance_from_previous_standstill(1), Ok(1000));
/// assert_eq!(solution.distance_to_depot(1), Ok(2000));
/// assert_eq!(solution.vehicle_demand(0), Ok(8));
/// ```
#[derive(Debug, Clone)]
pub struct Solution {
    id: u64,
    name: String,
    depots: Vec<Depot>,
    vehicles: Vec<Vehicle>,
    customers: Vec<Customer>,
    customer_index: HashMap<u64, usize>,
    matrix: Arc<dyn DistanceMatrix>,
}

impl Solution {
    /// Builds an empty solution (every customer unassigned).
    ///
    /// `matrix` must index the problem's locations in the order of
    /// [`VrpProblem::coordinates`]: depots first, then customers.
    pub fn new(
        problem: &VrpProblem,
        matrix: Arc<dyn DistanceMatrix>,
    ) -> Result<Self, ProblemError> {
        problem.validate()?;

        let mut depots: Vec<Depot> = Vec::new();
        let mut vehicles = Vec::with_capacity(problem.vehicles.len());
        for spec in &problem.vehicles {
            let depot = match depots.iter().position(|d| d.id() == spec.depot.id) {
                Some(index) => index,
                None => {
                    let index = depots.len();
                    let location = Location::new(
                        spec.depot.id,
                        spec.depot.name.clone(),
                        spec.depot.coordinate(),
                        index,
                    );
                    depots.push(Depot::new(spec.depot.id, location));
                    index
                }
            };
            vehicles.push(Vehicle::new(spec.id, spec.capacity, depot));
        }

        let expected = depots.len() + problem.customers.len();
        if matrix.size() != expected {
            return Err(ProblemError::MatrixSize {
                expected,
                actual: matrix.size(),
            });
        }

        let customers: Vec<Customer> = problem
            .customers
            .iter()
            .enumerate()
            .map(|(i, spec)| {
                let index = depots.len() + i;
                let location = Location::new(spec.id, spec.name.clone(), spec.coordinate(), index);
                Customer::new(spec.id, location, spec.demand)
            })
            .collect();
        let customer_index = customers
            .iter()
            .enumerate()
            .map(|(i, c)| (c.id(), i))
            .collect();

        info!(
            "solution {} ({}): {} depots, {} vehicles, {} customers",
            problem.id,
            problem.name,
            depots.len(),
            vehicles.len(),
            customers.len()
        );

        Ok(Self {
            id: problem.id,
            name: problem.name.clone(),
            depots,
            vehicles,
            customers,
            customer_index,
            matrix,
        })
    }

    /// Instance id.
    pub fn id(&self) -> u64 {
        self.id
    }

    /// Instance name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// All depots.
    pub fn depots(&self) -> &[Depot] {
        &self.depots
    }

    /// All vehicles with their routes.
    pub fn vehicles(&self) -> &[Vehicle] {
        &self.vehicles
    }

    /// All customers, assigned or not.
    pub fn customers(&self) -> &[Customer] {
        &self.customers
    }

    /// Vehicle at `index`.
    pub fn vehicle(&self, index: usize) -> Option<&Vehicle> {
        self.vehicles.get(index)
    }

    /// Customer at `index`.
    pub fn customer(&self, index: usize) -> Option<&Customer> {
        self.customers.get(index)
    }

    /// Index of the customer with the given id.
    pub fn customer_index(&self, id: u64) -> Option<usize> {
        self.customer_index.get(&id).copied()
    }

    /// Every location in matrix order: depots, then customers.
    pub fn locations(&self) -> impl Iterator<Item = &Location> + '_ {
        self.depots
            .iter()
            .map(Depot::location)
            .chain(self.customers.iter().map(Customer::location))
    }

    /// The shared distance provider.
    pub fn matrix(&self) -> &dyn DistanceMatrix {
        self.matrix.as_ref()
    }

    /// Customer indices on `vehicle`'s route, in order.
    pub fn route(&self, vehicle: usize) -> Option<&[usize]> {
        self.vehicles.get(vehicle).map(Vehicle::route)
    }

    /// Position of an assigned customer within its route.
    pub fn position_of(&self, customer: usize) -> Option<usize> {
        let vehicle = self.customers.get(customer)?.vehicle()?;
        self.vehicles[vehicle]
            .route()
            .iter()
            .position(|&c| c == customer)
    }

    /// Customers no vehicle visits, in index order.
    pub fn unassigned(&self) -> impl Iterator<Item = usize> + '_ {
        self.customers
            .iter()
            .enumerate()
            .filter(|(_, c)| !c.is_assigned())
            .map(|(i, _)| i)
    }

    fn check_customer(&self, customer: usize) -> Result<&Customer, ChainError> {
        self.customers
            .get(customer)
            .ok_or(ChainError::UnknownCustomer(customer))
    }

    fn check_vehicle(&self, vehicle: usize) -> Result<&Vehicle, ChainError> {
        self.vehicles
            .get(vehicle)
            .ok_or(ChainError::UnknownVehicle(vehicle))
    }

    /// Inserts `customer` into `vehicle`'s route at `position`, or appends it
    /// when `position` is `None`. Returns the position used.
    ///
    /// Fails with [`ChainError::AlreadyAssigned`] if the customer is on any
    /// route; unassign or [`move_customer`](Self::move_customer) instead.
    pub fn assign(
        &mut self,
        customer: usize,
        vehicle: usize,
        position: Option<usize>,
    ) -> Result<usize, ChainError> {
        if let Some(owner) = self.check_customer(customer)?.vehicle() {
            return Err(ChainError::AlreadyAssigned {
                customer,
                vehicle: owner,
            });
        }
        let len = self.check_vehicle(vehicle)?.len();
        let position = position.unwrap_or(len);
        if position > len {
            return Err(ChainError::PositionOutOfRange { position, len });
        }

        self.vehicles[vehicle].route_mut().insert(position, customer);
        self.customers[customer].attach(vehicle);
        self.link_at(vehicle, position);
        Ok(position)
    }

    /// Rewrites the neighbour relations around `position` of a route.
    fn link_at(&mut self, vehicle: usize, position: usize) {
        let route = self.vehicles[vehicle].route();
        let current = route[position];
        let previous = position.checked_sub(1).map(|p| route[p]);
        let next = route.get(position + 1).copied();

        self.customers[current].set_previous(previous);
        self.customers[current].set_next(next);
        if let Some(p) = previous {
            self.customers[p].set_next(Some(current));
        }
        if let Some(n) = next {
            self.customers[n].set_previous(Some(current));
        }
    }

    /// Removes `customer` from its route and reconnects its neighbours.
    ///
    /// Returns the vehicle and position it was removed from.
    pub fn unassign(&mut self, customer: usize) -> Result<(usize, usize), ChainError> {
        let c = self.check_customer(customer)?;
        let vehicle = c.vehicle().ok_or(ChainError::NotAssigned(customer))?;
        let (previous, next) = (c.previous(), c.next());
        let position = self
            .position_of(customer)
            .ok_or(ChainError::NotAssigned(customer))?;

        self.vehicles[vehicle].route_mut().remove(position);
        if let Some(p) = previous {
            self.customers[p].set_next(next);
        }
        if let Some(n) = next {
            self.customers[n].set_previous(previous);
        }
        self.customers[customer].detach();
        Ok((vehicle, position))
    }

    /// Checks a move without applying it.
    ///
    /// Returns the customer's current vehicle and the insert position it
    /// will take once removed from there.
    pub(crate) fn validate_move(
        &self,
        customer: usize,
        vehicle: usize,
        position: Option<usize>,
    ) -> Result<(usize, usize), ChainError> {
        let from = self
            .check_customer(customer)?
            .vehicle()
            .ok_or(ChainError::NotAssigned(customer))?;
        let mut len = self.check_vehicle(vehicle)?.len();
        if from == vehicle {
            len -= 1;
        }
        let position = position.unwrap_or(len);
        if position > len {
            return Err(ChainError::PositionOutOfRange { position, len });
        }
        Ok((from, position))
    }

    /// Moves an assigned customer to `position` of `vehicle` (appends when
    /// `None`). The position is taken after removal, so moves within one
    /// route index the shortened route.
    ///
    /// Validated up front: on error nothing has changed.
    pub fn move_customer(
        &mut self,
        customer: usize,
        vehicle: usize,
        position: Option<usize>,
    ) -> Result<usize, ChainError> {
        let (_, position) = self.validate_move(customer, vehicle, position)?;
        self.unassign(customer)?;
        self.assign(customer, vehicle, Some(position))
    }

    /// Exchanges the positions of two assigned customers, within one route
    /// or across two.
    pub fn swap_customers(&mut self, a: usize, b: usize) -> Result<(), ChainError> {
        let va = self
            .check_customer(a)?
            .vehicle()
            .ok_or(ChainError::NotAssigned(a))?;
        let vb = self
            .check_customer(b)?
            .vehicle()
            .ok_or(ChainError::NotAssigned(b))?;
        if a == b {
            return Ok(());
        }
        let pa = self.position_of(a).ok_or(ChainError::NotAssigned(a))?;
        let pb = self.position_of(b).ok_or(ChainError::NotAssigned(b))?;

        self.vehicles[va].route_mut()[pa] = b;
        self.vehicles[vb].route_mut()[pb] = a;
        self.customers[a].attach(vb);
        self.customers[b].attach(va);
        self.link_at(va, pa);
        self.link_at(vb, pb);
        Ok(())
    }

    /// Unassigns every customer.
    pub fn clear_routes(&mut self) {
        for vehicle in &mut self.vehicles {
            for customer in vehicle.route_mut().drain(..) {
                self.customers[customer].detach();
            }
        }
        debug!("solution {}: cleared all routes", self.id);
    }

    /// Replaces the current arrangement with `routes`, given as customer ids;
    /// `routes[i]` becomes the route of vehicle `i`.
    ///
    /// All ids are resolved and checked before anything changes. Customers
    /// not listed end up unassigned.
    pub fn assign_routes(&mut self, routes: &[Vec<u64>]) -> Result<(), ChainError> {
        if routes.len() > self.vehicles.len() {
            return Err(ChainError::TooManyRoutes {
                routes: routes.len(),
                vehicles: self.vehicles.len(),
            });
        }
        let mut seen = HashSet::new();
        let resolved = routes
            .iter()
            .map(|route| {
                route
                    .iter()
                    .map(|&id| {
                        if !seen.insert(id) {
                            return Err(ChainError::DuplicateInRoutes(id));
                        }
                        self.customer_index(id)
                            .ok_or(ChainError::UnknownCustomerId(id))
                    })
                    .collect::<Result<Vec<usize>, ChainError>>()
            })
            .collect::<Result<Vec<_>, ChainError>>()?;

        self.clear_routes();
        for (vehicle, route) in resolved.into_iter().enumerate() {
            for customer in route {
                self.assign(customer, vehicle, None)?;
            }
        }
        debug!(
            "solution {}: warm start with {} routes",
            self.id,
            routes.len()
        );
        Ok(())
    }

    /// The stop visited just before `customer`: the previous customer's
    /// location, or the owning vehicle's depot when the customer is first.
    pub fn previous_standstill(&self, customer: usize) -> Result<&Location, ChainError> {
        let c = self.check_customer(customer)?;
        let vehicle = c
            .vehicle()
            .ok_or(ChainError::UninitializedShadow(customer))?;
        Ok(match c.previous() {
            Some(p) => self.customers[p].location(),
            None => self.depot_location(vehicle),
        })
    }

    /// The stop visited just after `customer`: the next customer's location,
    /// or the depot when the customer is last.
    pub fn next_standstill(&self, customer: usize) -> Result<&Location, ChainError> {
        let c = self.check_customer(customer)?;
        let vehicle = c
            .vehicle()
            .ok_or(ChainError::UninitializedShadow(customer))?;
        Ok(match c.next() {
            Some(n) => self.customers[n].location(),
            None => self.depot_location(vehicle),
        })
    }

    fn depot_location(&self, vehicle: usize) -> &Location {
        self.depots[self.vehicles[vehicle].depot()].location()
    }

    /// Scaled distance from the previous standstill to `customer`.
    ///
    /// Fails with [`ChainError::UninitializedShadow`] while the customer is
    /// unassigned.
    pub fn distance_from_previous_standstill(&self, customer: usize) -> Result<i64, ChainError> {
        let standstill = self.previous_standstill(customer)?;
        Ok(standstill.distance_to(self.customers[customer].location(), self.matrix()))
    }

    /// Scaled distance from `customer` back to its vehicle's depot.
    ///
    /// Only a cost term for the last customer of a route, but defined for
    /// any assigned customer.
    pub fn distance_to_depot(&self, customer: usize) -> Result<i64, ChainError> {
        let c = self.check_customer(customer)?;
        let vehicle = c
            .vehicle()
            .ok_or(ChainError::UninitializedShadow(customer))?;
        let depot = self.depot_location(vehicle);
        Ok(c.location().distance_to(depot, self.matrix()))
    }

    /// Total demand on `vehicle`'s route.
    pub fn vehicle_demand(&self, vehicle: usize) -> Result<i64, ChainError> {
        Ok(self
            .check_vehicle(vehicle)?
            .route()
            .iter()
            .map(|&c| self.customers[c].demand())
            .sum())
    }

    /// Returns `true` if no vehicle carries more than its capacity.
    pub fn is_feasible(&self) -> bool {
        self.vehicles.iter().all(|v| {
            let demand: i64 = v.route().iter().map(|&c| self.customers[c].demand()).sum();
            demand <= v.capacity()
        })
    }

    /// All customers ordered for angle-based construction: ascending angle
    /// to the first depot as seen from the customer, then scaled round-trip
    /// distance to it, then id.
    pub fn customers_by_depot_angle(&self) -> Vec<usize> {
        let mut order: Vec<usize> = (0..self.customers.len()).collect();
        let Some(depot) = self.depots.first().map(Depot::location) else {
            order.sort_by_key(|&c| self.customers[c].id());
            return order;
        };
        let key = |c: usize| {
            let loc = self.customers[c].location();
            let round_trip =
                depot.distance_to(loc, self.matrix()) + loc.distance_to(depot, self.matrix());
            (loc.angle_to(depot), round_trip, self.customers[c].id())
        };
        order.sort_by(|&a, &b| {
            let (angle_a, trip_a, id_a) = key(a);
            let (angle_b, trip_b, id_b) = key(b);
            angle_a
                .total_cmp(&angle_b)
                .then(trip_a.cmp(&trip_b))
                .then(id_a.cmp(&id_b))
        });
        order
    }

    /// Matrix indices of a route's stops, depot at both ends.
    fn stops(&self, vehicle: &Vehicle) -> Vec<usize> {
        if vehicle.is_empty() {
            return Vec::new();
        }
        let depot = self.depots[vehicle.depot()].location().index();
        std::iter::once(depot)
            .chain(
                vehicle
                    .route()
                    .iter()
                    .map(|&c| self.customers[c].location().index()),
            )
            .chain(std::iter::once(depot))
            .collect()
    }

    /// Per-vehicle routes in provider units, one entry per vehicle.
    pub fn route_summaries(&self) -> Vec<RouteSummary> {
        let locations: Vec<&Location> = self.locations().collect();
        self.vehicles
            .iter()
            .map(|vehicle| {
                let stops = self.stops(vehicle);
                let (distance, time) = stops.windows(2).fold((0.0, 0.0), |(d, t), leg| {
                    (
                        d + self.matrix.distance(leg[0], leg[1]),
                        t + self.matrix.time(leg[0], leg[1]),
                    )
                });
                RouteSummary {
                    vehicle_id: vehicle.id(),
                    distance,
                    time,
                    total_demand: vehicle
                        .route()
                        .iter()
                        .map(|&c| self.customers[c].demand())
                        .sum(),
                    order: stops.iter().map(|&i| locations[i].coordinate()).collect(),
                    customer_ids: vehicle
                        .route()
                        .iter()
                        .map(|&c| self.customers[c].id())
                        .collect(),
                }
            })
            .collect()
    }

    /// Sum of route distances in provider units.
    pub fn total_distance(&self) -> f64 {
        self.route_summaries().iter().map(|r| r.distance).sum()
    }

    /// Longest route time; routes run in parallel.
    pub fn total_time(&self) -> f64 {
        self.route_summaries()
            .iter()
            .map(|r| r.time)
            .max_by(f64::total_cmp)
            .unwrap_or(0.0)
    }
}

impl PartialEq for Solution {
    /// Same instance and same arrangement; the provider is not compared.
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id && self.vehicles == other.vehicles && self.customers == other.customers
    }
}
