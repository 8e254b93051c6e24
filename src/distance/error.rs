//! Errors raised while building or querying distance matrices.

use thiserror::Error;

use crate::models::Coordinate;

/// Failure of a single point-to-point query against a [`RoutingBackend`].
///
/// [`RoutingBackend`]: super::RoutingBackend
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RoutingError {
    /// The backend found no path between the two points.
    #[error("no route from ({from}) to ({to})")]
    NoRoute {
        /// Origin of the query.
        from: Coordinate,
        /// Destination of the query.
        to: Coordinate,
    },
    /// The backend itself failed (I/O, protocol, service error).
    #[error("routing backend failed: {0}")]
    Backend(String),
}

/// Errors from distance matrix construction and checked lookups.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum MatrixError {
    /// A location index does not belong to the matrix.
    #[error("location index {index} is out of range for a matrix of size {size}")]
    OutOfRange {
        /// Offending index.
        index: usize,
        /// Number of locations in the matrix.
        size: usize,
    },
    /// Flattened data does not hold `size * size` entries.
    #[error("expected {expected} matrix entries, got {actual}")]
    DimensionMismatch {
        /// Required entry count.
        expected: usize,
        /// Supplied entry count.
        actual: usize,
    },
    /// An entry is negative, non-finite, or a non-zero diagonal.
    #[error("entry ({from}, {to}) is invalid: {value}")]
    InvalidEntry {
        /// Row index.
        from: usize,
        /// Column index.
        to: usize,
        /// Rejected value.
        value: f64,
    },
    /// Average speed for Euclidean travel times must be finite and positive.
    #[error("average speed must be finite and positive, got {0}")]
    InvalidSpeed(f64),
    /// Path distances were requested without a routing backend.
    #[error("path distances require a routing backend")]
    MissingBackend,
    /// A pairwise routing query failed; no partial matrix is produced.
    #[error("routing query from location {from} to location {to} failed")]
    Routing {
        /// Origin location index.
        from: usize,
        /// Destination location index.
        to: usize,
        /// Backend failure.
        #[source]
        source: RoutingError,
    },
}

/// Returns [`MatrixError::OutOfRange`] for the first index not below `size`.
pub(crate) fn check_bounds(from: usize, to: usize, size: usize) -> Result<(), MatrixError> {
    for index in [from, to] {
        if index >= size {
            return Err(MatrixError::OutOfRange { index, size });
        }
    }
    Ok(())
}
