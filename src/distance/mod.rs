//! Distance and travel time providers.
//!
//! Every provider implements [`DistanceMatrix`] and is fully precomputed
//! before it is handed to a solution:
//!
//! - [`EuclideanMatrix`]: straight-line distances, triangular cache
//! - [`PathMatrix`]: road distances from a [`RoutingBackend`], full n×n
//! - [`DenseMatrix`]: caller-supplied n×n data
//! - [`EmptyMatrix`]: all-zero placeholder

mod error;
mod euclidean;
mod matrix;
mod path;
mod source;

pub use error::{MatrixError, RoutingError};
pub use euclidean::{EuclideanMatrix, DEFAULT_AVG_SPEED};
pub use matrix::{scale_distance, DenseMatrix, DistanceMatrix, EmptyMatrix, DISTANCE_SCALE};
pub use path::{Path, PathMatrix, RoutingBackend};
pub use source::DistanceSource;
