//! Distance provider contract and dense precomputed matrices.

use std::fmt::Debug;

use super::error::{check_bounds, MatrixError};

/// Factor applied to raw distances before scoring.
pub const DISTANCE_SCALE: f64 = 1000.0;

/// Converts a raw distance to the fixed-point integer used by scoring.
///
/// Distances are multiplied by [`DISTANCE_SCALE`] and rounded half up, so
/// that sums over many legs do not accumulate floating point drift.
///
/// # Examples
///
/// ```
/// use u_cvrp::distance::scale_distance;
///
/// assert_eq!(scale_distance(1.0), 1000);
/// assert_eq!(scale_distance(1.2346), 1235);
/// assert_eq!(scale_distance(1.2344), 1234);
/// assert_eq!(scale_distance(0.0), 0);
/// ```
pub fn scale_distance(distance: f64) -> i64 {
    (distance * DISTANCE_SCALE + 0.5).floor() as i64
}

/// Read-only distance and travel-time lookups over a fixed location set.
///
/// Locations are addressed by their index in the set the provider was built
/// from. Every implementation guarantees `distance(i, i) == 0` and
/// `time(i, i) == 0`. Lookups are pure memory reads; all expensive work
/// happens at construction.
///
/// # Panics
///
/// [`distance`](Self::distance) and [`time`](Self::time) panic if either
/// index is `>= size()`. Use the `checked_*` variants to get a
/// [`MatrixError`] instead.
pub trait DistanceMatrix: Send + Sync + Debug {
    /// Number of locations covered by this provider.
    fn size(&self) -> usize;

    /// Travel distance from location `from` to location `to`.
    fn distance(&self, from: usize, to: usize) -> f64;

    /// Travel time from location `from` to location `to`.
    fn time(&self, from: usize, to: usize) -> f64;

    /// Bounds-checked [`distance`](Self::distance).
    fn checked_distance(&self, from: usize, to: usize) -> Result<f64, MatrixError> {
        check_bounds(from, to, self.size())?;
        Ok(self.distance(from, to))
    }

    /// Bounds-checked [`time`](Self::time).
    fn checked_time(&self, from: usize, to: usize) -> Result<f64, MatrixError> {
        check_bounds(from, to, self.size())?;
        Ok(self.time(from, to))
    }

    /// Fixed-point distance used by scoring (see [`scale_distance`]).
    ///
    /// Panics like [`distance`](Self::distance) on an out-of-range index,
    /// including `from == to`.
    fn scaled_distance(&self, from: usize, to: usize) -> i64 {
        assert_in_bounds(from, to, self.size());
        if from == to {
            return 0;
        }
        scale_distance(self.distance(from, to))
    }
}

/// Panics with a contract-violation message if an index is out of range.
pub(crate) fn assert_in_bounds(from: usize, to: usize, size: usize) {
    if let Err(err) = check_bounds(from, to, size) {
        panic!("{err}");
    }
}

/// A dense n×n distance and time matrix stored in row-major order.
///
/// Both directions of every pair are stored independently, so asymmetric
/// data (road networks) is represented exactly.
///
/// # Examples
///
/// ```
/// use u_cvrp::distance::{DenseMatrix, DistanceMatrix};
///
/// let dm = DenseMatrix::from_data(
///     2,
///     vec![0.0, 5.0, 7.0, 0.0],
///     vec![0.0, 60.0, 90.0, 0.0],
/// ).unwrap();
/// assert_eq!(dm.distance(0, 1), 5.0);
/// assert_eq!(dm.distance(1, 0), 7.0);
/// assert_eq!(dm.time(1, 0), 90.0);
/// assert!(!dm.is_symmetric(1e-10));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct DenseMatrix {
    distances: Vec<f64>,
    times: Vec<f64>,
    size: usize,
}

impl DenseMatrix {
    /// Creates a matrix from flattened row-major distance and time grids.
    ///
    /// Both grids must hold exactly `size * size` entries. Entries must be
    /// finite and non-negative, and the diagonal must be zero.
    pub fn from_data(
        size: usize,
        distances: Vec<f64>,
        times: Vec<f64>,
    ) -> Result<Self, MatrixError> {
        let expected = size * size;
        for grid in [&distances, &times] {
            if grid.len() != expected {
                return Err(MatrixError::DimensionMismatch {
                    expected,
                    actual: grid.len(),
                });
            }
            for (k, &value) in grid.iter().enumerate() {
                let (from, to) = (k / size, k % size);
                let valid = value.is_finite() && value >= 0.0 && (from != to || value == 0.0);
                if !valid {
                    return Err(MatrixError::InvalidEntry { from, to, value });
                }
            }
        }
        Ok(Self {
            distances,
            times,
            size,
        })
    }

    /// Creates a matrix whose travel time equals its distance.
    pub fn from_distances(size: usize, distances: Vec<f64>) -> Result<Self, MatrixError> {
        let times = distances.clone();
        Self::from_data(size, distances, times)
    }

    /// Returns `true` if distances are symmetric within the given tolerance.
    pub fn is_symmetric(&self, tol: f64) -> bool {
        for i in 0..self.size {
            for j in (i + 1)..self.size {
                if (self.distance(i, j) - self.distance(j, i)).abs() > tol {
                    return false;
                }
            }
        }
        true
    }
}

impl DistanceMatrix for DenseMatrix {
    fn size(&self) -> usize {
        self.size
    }

    fn distance(&self, from: usize, to: usize) -> f64 {
        assert_in_bounds(from, to, self.size);
        self.distances[from * self.size + to]
    }

    fn time(&self, from: usize, to: usize) -> f64 {
        assert_in_bounds(from, to, self.size);
        self.times[from * self.size + to]
    }
}

/// A provider where every leg is free. Placeholder before real data exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EmptyMatrix {
    size: usize,
}

impl EmptyMatrix {
    /// Creates an all-zero provider over `size` locations.
    pub fn new(size: usize) -> Self {
        Self { size }
    }
}

impl DistanceMatrix for EmptyMatrix {
    fn size(&self) -> usize {
        self.size
    }

    fn distance(&self, from: usize, to: usize) -> f64 {
        assert_in_bounds(from, to, self.size);
        0.0
    }

    fn time(&self, from: usize, to: usize) -> f64 {
        assert_in_bounds(from, to, self.size);
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> DenseMatrix {
        DenseMatrix::from_data(
            3,
            vec![0.0, 1.5, 2.0, 1.7, 0.0, 3.0, 2.0, 3.1, 0.0],
            vec![0.0, 10.0, 20.0, 12.0, 0.0, 30.0, 20.0, 31.0, 0.0],
        )
        .expect("valid")
    }

    #[test]
    fn test_scale_distance_rounds_half_up() {
        assert_eq!(scale_distance(0.0004), 0);
        assert_eq!(scale_distance(0.0005), 1);
        assert_eq!(scale_distance(2.0), 2000);
        assert_eq!(scale_distance(1.41421356), 1414);
    }

    #[test]
    fn test_from_data() {
        let dm = sample();
        assert_eq!(dm.size(), 3);
        assert_eq!(dm.distance(0, 1), 1.5);
        assert_eq!(dm.distance(1, 0), 1.7);
        assert_eq!(dm.time(2, 1), 31.0);
        assert_eq!(dm.distance(2, 2), 0.0);
    }

    #[test]
    fn test_from_data_invalid_size() {
        let err = DenseMatrix::from_data(2, vec![0.0, 1.0, 2.0], vec![0.0; 4]).unwrap_err();
        assert_eq!(
            err,
            MatrixError::DimensionMismatch {
                expected: 4,
                actual: 3
            }
        );
        let err = DenseMatrix::from_data(2, vec![0.0; 4], vec![0.0; 5]).unwrap_err();
        assert!(matches!(err, MatrixError::DimensionMismatch { actual: 5, .. }));
    }

    #[test]
    fn test_from_data_rejects_bad_entries() {
        let err = DenseMatrix::from_distances(2, vec![0.0, -1.0, 1.0, 0.0]).unwrap_err();
        assert!(matches!(err, MatrixError::InvalidEntry { from: 0, to: 1, .. }));

        let err = DenseMatrix::from_distances(2, vec![0.0, 1.0, f64::NAN, 0.0]).unwrap_err();
        assert!(matches!(err, MatrixError::InvalidEntry { from: 1, to: 0, .. }));

        let err = DenseMatrix::from_distances(2, vec![0.0, 1.0, 1.0, 4.0]).unwrap_err();
        assert!(matches!(err, MatrixError::InvalidEntry { from: 1, to: 1, .. }));
    }

    #[test]
    fn test_asymmetric_matrix() {
        assert!(!sample().is_symmetric(1e-10));
        let sym = DenseMatrix::from_distances(2, vec![0.0, 4.0, 4.0, 0.0]).expect("valid");
        assert!(sym.is_symmetric(1e-10));
    }

    #[test]
    fn test_checked_lookups() {
        let dm = sample();
        assert_eq!(dm.checked_distance(0, 2), Ok(2.0));
        assert_eq!(dm.checked_time(1, 0), Ok(12.0));
        assert_eq!(
            dm.checked_distance(0, 3),
            Err(MatrixError::OutOfRange { index: 3, size: 3 })
        );
        assert!(dm.checked_time(9, 0).is_err());
    }

    #[test]
    #[should_panic(expected = "out of range")]
    fn test_distance_out_of_range_panics() {
        sample().distance(3, 0);
    }

    #[test]
    fn test_scaled_distance() {
        let dm = sample();
        assert_eq!(dm.scaled_distance(0, 1), 1500);
        assert_eq!(dm.scaled_distance(1, 0), 1700);
        assert_eq!(dm.scaled_distance(1, 1), 0);
    }

    #[test]
    #[should_panic(expected = "out of range")]
    fn test_scaled_self_distance_out_of_range_panics() {
        EmptyMatrix::new(2).scaled_distance(5, 5);
    }

    #[test]
    fn test_empty_matrix() {
        let dm = EmptyMatrix::new(4);
        assert_eq!(dm.size(), 4);
        assert_eq!(dm.distance(0, 3), 0.0);
        assert_eq!(dm.time(3, 0), 0.0);
        assert!(dm.checked_distance(4, 0).is_err());
    }
}
