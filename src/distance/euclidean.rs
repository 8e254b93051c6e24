//! Straight-line distances with a compact triangular cache.

use log::debug;

use super::error::MatrixError;
use super::matrix::{assert_in_bounds, DistanceMatrix};
use crate::models::Coordinate;

/// Average speed used when none is configured.
pub const DEFAULT_AVG_SPEED: f64 = 60.0;

/// Euclidean distances between coordinates, cached as an upper triangle.
///
/// Straight-line distance is symmetric, so only the `n·(n-1)/2` pairs with
/// `i < j` are stored; about half the memory of a full matrix. Travel time
/// is `distance / avg_speed`.
///
/// # Examples
///
/// ```
/// use u_cvrp::distance::{DistanceMatrix, EuclideanMatrix};
/// use u_cvrp::models::Coordinate;
///
/// let dm = EuclideanMatrix::new(&[
///     Coordinate::new(0.0, 0.0),
///     Coordinate::new(3.0, 4.0),
/// ]);
/// assert!((dm.distance(0, 1) - 5.0).abs() < 1e-10);
/// assert_eq!(dm.distance(1, 0), dm.distance(0, 1));
/// assert!((dm.time(0, 1) - 5.0 / 60.0).abs() < 1e-10);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct EuclideanMatrix {
    n: usize,
    cache: Vec<f64>,
    avg_speed: f64,
}

impl EuclideanMatrix {
    /// Builds the cache using [`DEFAULT_AVG_SPEED`].
    pub fn new(coordinates: &[Coordinate]) -> Self {
        Self::build(coordinates, DEFAULT_AVG_SPEED)
    }

    /// Builds the cache with a custom average speed.
    ///
    /// Fails with [`MatrixError::InvalidSpeed`] unless the speed is finite
    /// and positive.
    pub fn with_speed(coordinates: &[Coordinate], avg_speed: f64) -> Result<Self, MatrixError> {
        if !avg_speed.is_finite() || avg_speed <= 0.0 {
            return Err(MatrixError::InvalidSpeed(avg_speed));
        }
        Ok(Self::build(coordinates, avg_speed))
    }

    fn build(coordinates: &[Coordinate], avg_speed: f64) -> Self {
        let n = coordinates.len();
        let mut matrix = Self {
            n,
            cache: vec![0.0; n * n.saturating_sub(1) / 2],
            avg_speed,
        };
        for i in 0..n {
            for j in (i + 1)..n {
                let idx = matrix.index(i, j);
                matrix.cache[idx] = coordinates[i].euclidean_distance(&coordinates[j]);
            }
        }
        debug!(
            "built euclidean matrix: {} locations, {} cached pairs",
            n,
            matrix.cache.len()
        );
        matrix
    }

    /// Position of the unordered pair `i < j` in the triangular cache.
    fn index(&self, i: usize, j: usize) -> usize {
        self.cache.len() - (self.n - i) * (self.n - i - 1) / 2 + (j - i - 1)
    }

    /// Average speed used to derive travel times.
    pub fn avg_speed(&self) -> f64 {
        self.avg_speed
    }
}

impl DistanceMatrix for EuclideanMatrix {
    fn size(&self) -> usize {
        self.n
    }

    fn distance(&self, from: usize, to: usize) -> f64 {
        assert_in_bounds(from, to, self.n);
        match from.cmp(&to) {
            std::cmp::Ordering::Equal => 0.0,
            std::cmp::Ordering::Less => self.cache[self.index(from, to)],
            std::cmp::Ordering::Greater => self.cache[self.index(to, from)],
        }
    }

    fn time(&self, from: usize, to: usize) -> f64 {
        self.distance(from, to) / self.avg_speed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn square() -> Vec<Coordinate> {
        vec![
            Coordinate::new(0.0, 0.0),
            Coordinate::new(0.0, 1.0),
            Coordinate::new(1.0, 1.0),
            Coordinate::new(1.0, 0.0),
        ]
    }

    #[test]
    fn test_cache_size() {
        assert_eq!(EuclideanMatrix::new(&square()).cache.len(), 6);
        assert_eq!(EuclideanMatrix::new(&[]).cache.len(), 0);
        assert_eq!(EuclideanMatrix::new(&[Coordinate::new(1.0, 1.0)]).cache.len(), 0);
    }

    #[test]
    fn test_triangular_index_is_dense() {
        let dm = EuclideanMatrix::new(&square());
        let mut seen = Vec::new();
        for i in 0..4 {
            for j in (i + 1)..4 {
                seen.push(dm.index(i, j));
            }
        }
        assert_eq!(seen, vec![0, 1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_distances() {
        let dm = EuclideanMatrix::new(&square());
        assert!((dm.distance(0, 1) - 1.0).abs() < 1e-10);
        assert!((dm.distance(0, 2) - 2f64.sqrt()).abs() < 1e-10);
        assert!((dm.distance(3, 1) - 2f64.sqrt()).abs() < 1e-10);
        assert_eq!(dm.distance(2, 2), 0.0);
        assert_eq!(dm.time(2, 2), 0.0);
    }

    #[test]
    fn test_custom_speed() {
        let dm = EuclideanMatrix::with_speed(&square(), 2.0).expect("valid");
        assert!((dm.time(0, 1) - 0.5).abs() < 1e-10);
        assert_eq!(dm.avg_speed(), 2.0);
    }

    #[test]
    fn test_invalid_speed() {
        assert_eq!(
            EuclideanMatrix::with_speed(&square(), 0.0),
            Err(MatrixError::InvalidSpeed(0.0))
        );
        assert!(EuclideanMatrix::with_speed(&square(), -3.0).is_err());
        assert!(EuclideanMatrix::with_speed(&square(), f64::INFINITY).is_err());
    }

    #[test]
    #[should_panic(expected = "out of range")]
    fn test_out_of_range_panics() {
        EuclideanMatrix::new(&square()).distance(0, 4);
    }

    #[test]
    fn test_checked_out_of_range() {
        let dm = EuclideanMatrix::new(&square());
        assert_eq!(
            dm.checked_distance(4, 4),
            Err(MatrixError::OutOfRange { index: 4, size: 4 })
        );
    }

    fn coordinates() -> impl Strategy<Value = Vec<Coordinate>> {
        prop::collection::vec((-90.0..90.0f64, -180.0..180.0f64), 3..12)
            .prop_map(|v| v.into_iter().map(|(lat, lng)| Coordinate::new(lat, lng)).collect())
    }

    proptest! {
        #[test]
        fn prop_zero_diagonal(coords in coordinates()) {
            let dm = EuclideanMatrix::new(&coords);
            for i in 0..coords.len() {
                prop_assert_eq!(dm.distance(i, i), 0.0);
                prop_assert_eq!(dm.time(i, i), 0.0);
            }
        }

        #[test]
        fn prop_symmetric(coords in coordinates()) {
            let dm = EuclideanMatrix::new(&coords);
            for i in 0..coords.len() {
                for j in 0..coords.len() {
                    prop_assert_eq!(dm.distance(i, j), dm.distance(j, i));
                }
            }
        }

        #[test]
        fn prop_triangle_inequality(coords in coordinates()) {
            let dm = EuclideanMatrix::new(&coords);
            let n = coords.len();
            for i in 0..n {
                for j in 0..n {
                    for k in 0..n {
                        let detour = dm.distance(i, j) + dm.distance(j, k);
                        prop_assert!(dm.distance(i, k) <= detour + 1e-9);
                    }
                }
            }
        }
    }
}
