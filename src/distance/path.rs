//! Road-network distances precomputed from an external routing backend.
//!
//! [`PathMatrix`] issues one point-to-point query per ordered pair of
//! locations. Road travel is asymmetric (one-way streets, turn
//! restrictions), so `(i, j)` and `(j, i)` are queried and stored
//! separately in a full n×n [`DenseMatrix`].
//!
//! Queries are independent and run in parallel. The matrix is committed
//! only after every query succeeded; a single failure aborts construction.

use log::{info, warn};
use rayon::prelude::*;

use super::error::{MatrixError, RoutingError};
use super::matrix::{DenseMatrix, DistanceMatrix};
use crate::models::Coordinate;

/// Result of a single point-to-point routing query.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Path {
    /// Road distance in meters.
    pub distance_meters: f64,
    /// Travel time in milliseconds.
    pub time_millis: u64,
}

/// A road-network router queried once per ordered location pair.
///
/// # Examples
///
/// ```
/// use u_cvrp::distance::{Path, RoutingBackend, RoutingError};
/// use u_cvrp::models::Coordinate;
///
/// struct Crow;
///
/// impl RoutingBackend for Crow {
///     fn route(&self, from: Coordinate, to: Coordinate) -> Result<Path, RoutingError> {
///         let meters = from.euclidean_distance(&to) * 1000.0;
///         Ok(Path { distance_meters: meters, time_millis: (meters * 100.0) as u64 })
///     }
/// }
///
/// let path = Crow.route(Coordinate::new(0.0, 0.0), Coordinate::new(0.0, 2.0)).unwrap();
/// assert_eq!(path.distance_meters, 2000.0);
/// ```
pub trait RoutingBackend: Send + Sync {
    /// Routes from `from` to `to`.
    fn route(&self, from: Coordinate, to: Coordinate) -> Result<Path, RoutingError>;
}

/// Distances (kilometers) and times (whole seconds) over a road network.
#[derive(Debug, Clone, PartialEq)]
pub struct PathMatrix {
    inner: DenseMatrix,
}

impl PathMatrix {
    /// Queries `backend` for every ordered pair `i != j` and caches the result.
    ///
    /// Distances are stored in kilometers (`meters / 1000`). Times are
    /// stored in seconds, truncated: `millis / 1000` discards sub-second
    /// precision.
    pub fn build<B>(coordinates: &[Coordinate], backend: &B) -> Result<Self, MatrixError>
    where
        B: RoutingBackend + ?Sized,
    {
        let n = coordinates.len();
        info!(
            "building path matrix: {} locations, {} routing queries",
            n,
            n * n.saturating_sub(1)
        );

        let legs = (0..n * n)
            .into_par_iter()
            .map(|k| {
                let (from, to) = (k / n, k % n);
                if from == to {
                    return Ok((0.0, 0.0));
                }
                match backend.route(coordinates[from], coordinates[to]) {
                    Ok(path) => Ok((
                        path.distance_meters / 1000.0,
                        (path.time_millis / 1000) as f64,
                    )),
                    Err(source) => {
                        warn!("routing query {} -> {} failed: {}", from, to, source);
                        Err(MatrixError::Routing { from, to, source })
                    }
                }
            })
            .collect::<Result<Vec<(f64, f64)>, MatrixError>>()?;

        let (distances, times): (Vec<f64>, Vec<f64>) = legs.into_iter().unzip();
        let inner = DenseMatrix::from_data(n, distances, times)?;
        info!("path matrix ready: {} locations", n);
        Ok(Self { inner })
    }

    /// The underlying dense storage.
    pub fn as_dense(&self) -> &DenseMatrix {
        &self.inner
    }
}

impl DistanceMatrix for PathMatrix {
    fn size(&self) -> usize {
        self.inner.size()
    }

    fn distance(&self, from: usize, to: usize) -> f64 {
        self.inner.distance(from, to)
    }

    fn time(&self, from: usize, to: usize) -> f64 {
        self.inner.time(from, to)
    }
}
