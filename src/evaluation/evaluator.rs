//! From-scratch constraint evaluation.

use serde::Serialize;

use super::HardSoftScore;
use crate::models::{Solution, Vehicle};

/// Hard: total demand over capacity, per vehicle.
pub const VEHICLE_CAPACITY: &str = "vehicleCapacity";
/// Soft: distance into every assigned customer.
pub const DISTANCE_TO_PREVIOUS_STANDSTILL: &str = "distanceToPreviousStandstill";
/// Soft: closing leg from each route's last customer back to its depot.
pub const DISTANCE_FROM_LAST_CUSTOMER_TO_DEPOT: &str = "distanceFromLastCustomerToDepot";

/// Capacity violation of one vehicle; zero when within capacity.
pub(crate) fn overflow(demand: i64, capacity: i64) -> i64 {
    (demand - capacity).max(0)
}

/// Scaled legs of one route: into each customer from its previous
/// standstill, then the closing leg back to the depot (`None` when empty).
fn route_legs(solution: &Solution, vehicle: &Vehicle) -> (Vec<i64>, Option<i64>) {
    let matrix = solution.matrix();
    let depot = solution.depots()[vehicle.depot()].location();
    let mut standstill = depot;
    let legs: Vec<i64> = vehicle
        .route()
        .iter()
        .map(|&c| {
            let location = solution.customers()[c].location();
            let d = standstill.distance_to(location, matrix);
            standstill = location;
            d
        })
        .collect();
    let closing = (!vehicle.is_empty()).then(|| standstill.distance_to(depot, matrix));
    (legs, closing)
}

/// Scores a solution by scanning every vehicle and customer.
///
/// - hard: Σ over vehicles of `max(0, demand - capacity)`
/// - soft: Σ over assigned customers of the distance from their previous
///   standstill, plus the return leg of every route's last customer
///
/// Unassigned customers contribute nothing.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use u_cvrp::distance::EuclideanMatrix;
/// use u_cvrp::evaluation::{evaluate, HardSoftScore};
/// use u_cvrp::models::{CustomerSpec, DepotSpec, Solution, VehicleSpec, VrpProblem};
///
/// let problem = VrpProblem {
///     id: 1,
///     name: "pair".into(),
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
/// assert_eq!(evaluate(&solution), HardSoftScore::ZERO);
///
/// solution.assign_routes(&[vec![1, 2]]).unwrap();
/// assert_eq!(evaluate(&solution), HardSoftScore::new(0, 4000));
/// ```
pub fn evaluate(solution: &Solution) -> HardSoftScore {
    let hard = solution
        .vehicles()
        .iter()
        .map(|v| {
            let demand: i64 = v
                .route()
                .iter()
                .map(|&c| solution.customers()[c].demand())
                .sum();
            overflow(demand, v.capacity())
        })
        .sum();

    let soft = solution
        .vehicles()
        .iter()
        .map(|v| {
            let (legs, closing) = route_legs(solution, v);
            legs.iter().sum::<i64>() + closing.unwrap_or(0)
        })
        .sum();

    HardSoftScore::new(hard, soft)
}

/// Total contribution of one constraint.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConstraintTotal {
    /// Constraint name.
    pub name: &'static str,
    /// Summed penalty.
    pub score: HardSoftScore,
    /// Number of vehicles or customers that were penalized.
    pub matches: usize,
}

/// An over-capacity vehicle.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CapacityMatch {
    /// Vehicle id.
    pub vehicle_id: u64,
    /// Demand on its route.
    pub demand: i64,
    /// Its capacity.
    pub capacity: i64,
    /// `demand - capacity`.
    pub overflow: i64,
}

/// A score broken down per constraint.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoreExplanation {
    /// Sum of all constraint totals; equals [`evaluate`].
    pub score: HardSoftScore,
    /// One entry per constraint, in declaration order.
    pub constraints: Vec<ConstraintTotal>,
    /// Vehicles carrying more than their capacity.
    pub capacity_matches: Vec<CapacityMatch>,
}

impl ScoreExplanation {
    /// Total for the named constraint.
    pub fn constraint(&self, name: &str) -> Option<&ConstraintTotal> {
        self.constraints.iter().find(|c| c.name == name)
    }
}

/// Like [`evaluate`], but keeps each constraint's share.
pub fn explain(solution: &Solution) -> ScoreExplanation {
    let capacity_matches: Vec<CapacityMatch> = solution
        .vehicles()
        .iter()
        .filter_map(|v| {
            let demand: i64 = v
                .route()
                .iter()
                .map(|&c| solution.customers()[c].demand())
                .sum();
            let overflow = overflow(demand, v.capacity());
            (overflow > 0).then(|| CapacityMatch {
                vehicle_id: v.id(),
                demand,
                capacity: v.capacity(),
                overflow,
            })
        })
        .collect();
    let capacity = ConstraintTotal {
        name: VEHICLE_CAPACITY,
        score: HardSoftScore::of_hard(capacity_matches.iter().map(|m| m.overflow).sum()),
        matches: capacity_matches.len(),
    };

    let mut previous = Vec::new();
    let mut closing = Vec::new();
    for v in solution.vehicles() {
        let (legs, last) = route_legs(solution, v);
        previous.extend(legs);
        closing.extend(last);
    }
    let previous = ConstraintTotal {
        name: DISTANCE_TO_PREVIOUS_STANDSTILL,
        score: HardSoftScore::of_soft(previous.iter().sum()),
        matches: previous.len(),
    };

    let closing = ConstraintTotal {
        name: DISTANCE_FROM_LAST_CUSTOMER_TO_DEPOT,
        score: HardSoftScore::of_soft(closing.iter().sum()),
        matches: closing.len(),
    };

    let constraints = vec![capacity, previous, closing];
    ScoreExplanation {
        score: constraints
            .iter()
            .fold(HardSoftScore::ZERO, |acc, c| acc + c.score),
        constraints,
        capacity_matches,
    }
}
