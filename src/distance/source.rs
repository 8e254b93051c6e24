//! Selection of the distance provider at problem-construction time.

use std::sync::Arc;

use log::info;
use serde::{Deserialize, Serialize};

use super::error::MatrixError;
use super::euclidean::{EuclideanMatrix, DEFAULT_AVG_SPEED};
use super::matrix::DistanceMatrix;
use super::path::{PathMatrix, RoutingBackend};
use crate::models::Coordinate;

fn default_avg_speed() -> f64 {
    DEFAULT_AVG_SPEED
}

/// Which provider backs a solution's distances.
///
/// Chosen once, before optimization starts; the rest of the crate only sees
/// the resulting [`DistanceMatrix`].
///
/// # Examples
///
/// ```
/// use u_cvrp::distance::{DistanceMatrix, DistanceSource};
/// use u_cvrp::models::Coordinate;
///
/// let coords = [Coordinate::new(0.0, 0.0), Coordinate::new(0.0, 1.0)];
/// let matrix = DistanceSource::default().build(&coords, None).unwrap();
/// assert_eq!(matrix.size(), 2);
/// assert_eq!(matrix.distance(0, 1), 1.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DistanceSource {
    /// Straight-line distances; time is `distance / avg_speed`.
    Euclidean {
        /// Average speed in distance units per time unit.
        #[serde(default = "default_avg_speed")]
        avg_speed: f64,
    },
    /// Road distances from a [`RoutingBackend`].
    Path,
}

impl Default for DistanceSource {
    fn default() -> Self {
        Self::Euclidean {
            avg_speed: DEFAULT_AVG_SPEED,
        }
    }
}

impl DistanceSource {
    /// Builds the provider for `coordinates`.
    ///
    /// `backend` is only consulted for [`DistanceSource::Path`], where it is
    /// required.
    pub fn build(
        &self,
        coordinates: &[Coordinate],
        backend: Option<&dyn RoutingBackend>,
    ) -> Result<Arc<dyn DistanceMatrix>, MatrixError> {
        info!(
            "selecting distance source {:?} for {} locations",
            self,
            coordinates.len()
        );
        match *self {
            Self::Euclidean { avg_speed } => Ok(Arc::new(EuclideanMatrix::with_speed(
                coordinates,
                avg_speed,
            )?)),
            Self::Path => {
                let backend = backend.ok_or(MatrixError::MissingBackend)?;
                Ok(Arc::new(PathMatrix::build(coordinates, backend)?))
            }
        }
    }
}
