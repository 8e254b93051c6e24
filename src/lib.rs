//! # u-cvrp
//!
//! Capacitated vehicle routing core: a mutable route-chain solution model,
//! hard/soft scoring with incremental updates, and precomputed distance
//! providers. Move selection and search strategy are left to the caller.
//!
//! ## Modules
//!
//! - [`distance`] — Euclidean and road-network distance/time providers
//! - [`models`] — Problem input, locations, customers, vehicles, and the route-chain solution
//! - [`evaluation`] — Hard/soft score, full and incremental evaluation
//!
//! ## Example
//!
//! ```
//! use u_cvrp::distance::DistanceSource;
//! use u_cvrp::evaluation::{evaluate, ScoreDirector};
//! use u_cvrp::models::{CustomerSpec, DepotSpec, Solution, VehicleSpec, VrpProblem};
//!
//! let problem = VrpProblem {
//!     id: 1,
//!     name: "demo".into(),
//!     vehicles: vec![VehicleSpec {
//!         id: 1,
//!         capacity: 10,
//!         depot: DepotSpec { id: 0, name: None, lat: 0.0, lng: 0.0 },
//!     }],
//!     customers: vec![
//!         CustomerSpec { id: 1, name: None, lat: 0.0, lng: 1.0, demand: 4 },
//!         CustomerSpec { id: 2, name: None, lat: 0.0, lng: 2.0, demand: 4 },
//!         CustomerSpec { id: 3, name: None, lat: 1.0, lng: 1.0, demand: 5 },
//!     ],
//! };
//!
//! let matrix = DistanceSource::default()
//!     .build(&problem.coordinates().unwrap(), None)
//!     .unwrap();
//! let solution = Solution::new(&problem, matrix).unwrap();
//!
//! let mut director = ScoreDirector::new(solution);
//! for customer in director.solution().customers_by_depot_angle() {
//!     director.assign(customer, 0, None).unwrap();
//! }
//! assert_eq!(director.score().hard, 3);
//! assert_eq!(director.score(), evaluate(director.solution()));
//! ```

pub mod distance;
pub mod evaluation;
pub mod models;
