//! Incremental score maintenance for local search.
//!
//! Every chain edit is decomposed into removals and insertions of a single
//! customer. Inserting customer `c` between standstills `A` and `B` changes
//! the soft score by `d(A,c) + d(c,B) - d(A,B)`; removing it reverses that.
//! The hard score changes by the difference in the owning vehicle's
//! capacity overflow. Both are O(1) given the cached per-vehicle demand.

use log::{debug, trace};

use super::evaluator::{evaluate, overflow};
use super::HardSoftScore;
use crate::models::{ChainError, Solution};

/// Owns a [`Solution`] and keeps its score current across chain edits.
///
/// The cached score always equals [`evaluate`] on the owned solution;
/// [`recalculate`](Self::recalculate) rebuilds it from scratch.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use u_cvrp::distance::EuclideanMatrix;
/// use u_cvrp::evaluation::{evaluate, HardSoftScore, ScoreDirector};
/// use u_cvrp::models::{CustomerSpec, DepotSpec, Solution, VehicleSpec, VrpProblem};
///
/// let depot = DepotSpec { id: 0, name: None, lat: 0.0, lng: 0.0 };
/// let problem = VrpProblem {
///     id: 1,
///     name: "two trucks".into(),
///     vehicles: vec![
///         VehicleSpec { id: 1, capacity: 10, depot: depot.clone() },
///         VehicleSpec { id: 2, capacity: 10, depot },
///     ],
///     customers: vec![
///         CustomerSpec { id: 1, name: None, lat: 0.0, lng: 1.0, demand: 4 },
///         CustomerSpec { id: 2, name: None, lat: 0.0, lng: 2.0, demand: 4 },
///     ],
/// };
/// let matrix = Arc::new(EuclideanMatrix::new(&problem.coordinates().unwrap()));
/// let mut director = ScoreDirector::new(Solution::new(&problem, matrix).unwrap());
///
/// director.assign(0, 0, None).unwrap();
/// director.assign(1, 0, None).unwrap();
/// assert_eq!(director.score(), HardSoftScore::new(0, 4000));
///
/// director.move_customer(1, 1, None).unwrap();
/// assert_eq!(director.score(), HardSoftScore::new(0, 6000));
/// assert_eq!(director.score(), evaluate(director.solution()));
/// ```
#[derive(Debug, Clone)]
pub struct ScoreDirector {
    solution: Solution,
    demands: Vec<i64>,
    score: HardSoftScore,
}

impl ScoreDirector {
    /// Takes ownership of `solution` and scores it from scratch.
    pub fn new(solution: Solution) -> Self {
        let mut director = Self {
            solution,
            demands: Vec::new(),
            score: HardSoftScore::ZERO,
        };
        director.recalculate();
        director
    }

    /// The current score.
    pub fn score(&self) -> HardSoftScore {
        self.score
    }

    /// The solution being edited.
    pub fn solution(&self) -> &Solution {
        &self.solution
    }

    /// Releases the solution.
    pub fn into_solution(self) -> Solution {
        self.solution
    }

    /// Rebuilds cached demands and the score by a full scan.
    pub fn recalculate(&mut self) -> HardSoftScore {
        let customers = self.solution.customers();
        self.demands = self
            .solution
            .vehicles()
            .iter()
            .map(|v| v.route().iter().map(|&c| customers[c].demand()).sum())
            .collect();
        self.score = evaluate(&self.solution);
        debug!("recalculated score: {}", self.score);
        self.score
    }

    /// Soft cost of `customer` sitting between its two standstills, compared
    /// with driving straight past it.
    fn detour(&self, customer: usize) -> Result<i64, ChainError> {
        let previous = self.solution.previous_standstill(customer)?;
        let next = self.solution.next_standstill(customer)?;
        let here = self.solution.customers()[customer].location();
        let matrix = self.solution.matrix();
        Ok(previous.distance_to(here, matrix) + here.distance_to(next, matrix)
            - previous.distance_to(next, matrix))
    }

    /// Adds `delta` demand to `vehicle` and returns the hard score change.
    fn shift_demand(&mut self, vehicle: usize, delta: i64) -> i64 {
        let capacity = self.solution.vehicles()[vehicle].capacity();
        let before = overflow(self.demands[vehicle], capacity);
        self.demands[vehicle] += delta;
        overflow(self.demands[vehicle], capacity) - before
    }

    /// [`Solution::assign`], keeping the score current.
    pub fn assign(
        &mut self,
        customer: usize,
        vehicle: usize,
        position: Option<usize>,
    ) -> Result<usize, ChainError> {
        let position = self.solution.assign(customer, vehicle, position)?;
        let soft = self.detour(customer)?;
        let demand = self.solution.customers()[customer].demand();
        let hard = self.shift_demand(vehicle, demand);

        let delta = HardSoftScore::new(hard, soft);
        self.score += delta;
        trace!(
            "assign customer {} to vehicle {} at {}: delta {}, score {}",
            customer,
            vehicle,
            position,
            delta,
            self.score
        );
        Ok(position)
    }

    /// [`Solution::unassign`], keeping the score current.
    pub fn unassign(&mut self, customer: usize) -> Result<(usize, usize), ChainError> {
        let assigned = self
            .solution
            .customer(customer)
            .ok_or(ChainError::UnknownCustomer(customer))?
            .is_assigned();
        if !assigned {
            return Err(ChainError::NotAssigned(customer));
        }
        let soft = self.detour(customer)?;
        let (vehicle, position) = self.solution.unassign(customer)?;
        let demand = self.solution.customers()[customer].demand();
        let hard = self.shift_demand(vehicle, -demand);

        let delta = HardSoftScore::new(hard, -soft);
        self.score += delta;
        trace!(
            "unassign customer {} from vehicle {} at {}: delta {}, score {}",
            customer,
            vehicle,
            position,
            delta,
            self.score
        );
        Ok((vehicle, position))
    }

    /// [`Solution::move_customer`], keeping the score current.
    pub fn move_customer(
        &mut self,
        customer: usize,
        vehicle: usize,
        position: Option<usize>,
    ) -> Result<usize, ChainError> {
        let (_, position) = self.solution.validate_move(customer, vehicle, position)?;
        self.unassign(customer)?;
        self.assign(customer, vehicle, Some(position))
    }

    /// [`Solution::swap_customers`], keeping the score current.
    pub fn swap_customers(&mut self, a: usize, b: usize) -> Result<(), ChainError> {
        let (va, pa) = self.placement(a)?;
        let (vb, pb) = self.placement(b)?;
        if a == b {
            return Ok(());
        }

        // Remove the later one first so the earlier position stays valid.
        let ((x, vx, px), (y, vy, py)) = if va == vb && pa > pb {
            ((b, vb, pb), (a, va, pa))
        } else {
            ((a, va, pa), (b, vb, pb))
        };
        self.unassign(y)?;
        self.unassign(x)?;
        self.assign(y, vx, Some(px))?;
        self.assign(x, vy, Some(py))?;
        Ok(())
    }

    fn placement(&self, customer: usize) -> Result<(usize, usize), ChainError> {
        let vehicle = self
            .solution
            .customer(customer)
            .ok_or(ChainError::UnknownCustomer(customer))?
            .vehicle()
            .ok_or(ChainError::NotAssigned(customer))?;
        let position = self
            .solution
            .position_of(customer)
            .ok_or(ChainError::NotAssigned(customer))?;
        Ok((vehicle, position))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::distance::{DenseMatrix, EuclideanMatrix};
    use crate::models::{CustomerSpec, DepotSpec, VehicleSpec, VrpProblem};
    use proptest::prelude::*;
    use std::sync::Arc;

    fn customer(id: u64, lat: f64, lng: f64, demand: i64) -> CustomerSpec {
        CustomerSpec {
            id,
            name: None,
            lat,
            lng,
            demand,
        }
    }

    fn depot(id: u64, lat: f64) -> DepotSpec {
        DepotSpec {
            id,
            name: None,
            lat,
            lng: 0.0,
        }
    }

    fn problem() -> VrpProblem {
        VrpProblem {
            id: 3,
            name: "incremental".into(),
            vehicles: vec![
                VehicleSpec {
                    id: 1,
                    capacity: 10,
                    depot: depot(100, 0.0),
                },
                VehicleSpec {
                    id: 2,
                    capacity: 6,
                    depot: depot(200, 3.0),
                },
            ],
            customers: vec![
                customer(1, 0.0, 1.0, 4),
                customer(2, 0.0, 2.0, 4),
                customer(3, 1.0, 2.0, 5),
                customer(4, 2.0, 1.0, 3),
                customer(5, 3.0, 3.0, 2),
            ],
        }
    }

    fn setup() -> ScoreDirector {
        let p = problem();
        let matrix = EuclideanMatrix::new(&p.coordinates().expect("valid"));
        ScoreDirector::new(Solution::new(&p, Arc::new(matrix)).expect("valid"))
    }

    fn assert_in_sync(director: &ScoreDirector) {
        assert_eq!(director.score(), evaluate(director.solution()));
        let mut copy = director.clone();
        assert_eq!(copy.recalculate(), director.score());
    }

    #[test]
    fn test_capacity_scenario() {
        let mut d = setup();
        assert_eq!(d.score(), HardSoftScore::ZERO);
        d.assign(0, 0, None).expect("valid");
        d.assign(1, 0, None).expect("valid");
        assert_eq!(d.score(), HardSoftScore::new(0, 4000));

        d.assign(2, 0, Some(1)).expect("valid");
        assert_eq!(d.score().hard, 3);
        assert_in_sync(&d);
    }

    #[test]
    fn test_assign_unassign_restores_score() {
        let mut d = setup();
        d.assign(0, 0, None).expect("valid");
        d.assign(1, 0, None).expect("valid");
        let before = d.score();

        d.assign(3, 0, Some(1)).expect("valid");
        assert_ne!(d.score(), before);
        d.unassign(3).expect("valid");
        assert_eq!(d.score(), before);
        assert_in_sync(&d);
    }

    #[test]
    fn test_move_middle_to_other_route_end() {
        let mut d = setup();
        for c in 0..3 {
            d.assign(c, 0, None).expect("valid");
        }
        d.assign(3, 1, None).expect("valid");
        assert_in_sync(&d);

        d.move_customer(1, 1, None).expect("valid");
        assert_eq!(d.solution().route(0), Some(&[0, 2][..]));
        assert_eq!(d.solution().route(1), Some(&[3, 1][..]));
        assert_in_sync(&d);
    }

    #[test]
    fn test_swap_keeps_score_in_sync() {
        let mut d = setup();
        for c in 0..4 {
            d.assign(c, 0, None).expect("valid");
        }
        d.assign(4, 1, None).expect("valid");

        d.swap_customers(1, 2).expect("valid");
        assert_eq!(d.solution().route(0), Some(&[0, 2, 1, 3][..]));
        assert_in_sync(&d);

        d.swap_customers(3, 0).expect("valid");
        assert_eq!(d.solution().route(0), Some(&[3, 2, 1, 0][..]));
        assert_in_sync(&d);

        d.swap_customers(2, 4).expect("valid");
        assert_eq!(d.solution().route(0), Some(&[3, 4, 1, 0][..]));
        assert_eq!(d.solution().route(1), Some(&[2][..]));
        assert_in_sync(&d);
    }

    #[test]
    fn test_rejected_edits_leave_score_unchanged() {
        let mut d = setup();
        d.assign(0, 0, None).expect("valid");
        let before = d.score();

        assert!(matches!(
            d.assign(0, 1, None),
            Err(ChainError::AlreadyAssigned { .. })
        ));
        assert_eq!(d.unassign(1), Err(ChainError::NotAssigned(1)));
        assert_eq!(d.unassign(9), Err(ChainError::UnknownCustomer(9)));
        assert!(d.move_customer(0, 1, Some(4)).is_err());
        assert_eq!(d.swap_customers(0, 1), Err(ChainError::NotAssigned(1)));
        assert_eq!(d.score(), before);
        assert_in_sync(&d);
    }

    #[test]
    fn test_into_solution() {
        let mut d = setup();
        d.assign(4, 1, None).expect("valid");
        let solution = d.into_solution();
        assert_eq!(solution.route(1), Some(&[4][..]));
    }

    /// One op on a director: assign, unassign, move or swap, picked from the
    /// customer's state and `kind`.
    fn apply(d: &mut ScoreDirector, customer: usize, vehicle: usize, position: usize, kind: u8) {
        if !d.solution().customers()[customer].is_assigned() {
            let len = d.solution().vehicles()[vehicle].len();
            d.assign(customer, vehicle, Some(position.min(len)))
                .expect("valid");
            return;
        }
        match kind % 3 {
            0 => {
                d.unassign(customer).expect("valid");
            }
            1 => {
                let from = d.solution().customers()[customer].vehicle();
                let mut len = d.solution().vehicles()[vehicle].len();
                if from == Some(vehicle) {
                    len -= 1;
                }
                d.move_customer(customer, vehicle, Some(position.min(len)))
                    .expect("valid");
            }
            _ => {
                let other = (customer + position + 1) % d.solution().customers().len();
                if d.solution().customers()[other].is_assigned() {
                    d.swap_customers(customer, other).expect("valid");
                }
            }
        }
    }

    fn op() -> impl Strategy<Value = (usize, usize, usize, u8)> {
        (0..5usize, 0..2usize, 0..6usize, any::<u8>())
    }

    proptest! {
        #[test]
        fn prop_incremental_equals_full_euclidean(ops in prop::collection::vec(op(), 1..60)) {
            let mut d = setup();
            for (customer, vehicle, position, kind) in ops {
                apply(&mut d, customer, vehicle, position, kind);
                prop_assert_eq!(d.score(), evaluate(d.solution()));
            }
        }

        #[test]
        fn prop_incremental_equals_full_asymmetric(
            grid in prop::collection::vec(0.0..50.0f64, 49),
            ops in prop::collection::vec(op(), 1..60),
        ) {
            // 2 depots + 5 customers, arbitrary one-way distances.
            let distances: Vec<f64> = grid
                .iter()
                .enumerate()
                .map(|(k, &v)| if k / 7 == k % 7 { 0.0 } else { v })
                .collect();
            let matrix = DenseMatrix::from_distances(7, distances).expect("valid");
            let solution = Solution::new(&problem(), Arc::new(matrix)).expect("valid");
            let mut d = ScoreDirector::new(solution);
            for (customer, vehicle, position, kind) in ops {
                apply(&mut d, customer, vehicle, position, kind);
                prop_assert_eq!(d.score(), evaluate(d.solution()));
            }
        }
    }
}
