//! Per-vehicle route output.

use serde::{Deserialize, Serialize};

use super::Coordinate;

/// A finished route, as reported to callers outside the optimizer.
///
/// Distance and time are in provider units (not scaled). `order` starts
/// and ends at the vehicle's depot; it is empty for an unused vehicle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteSummary {
    /// Vehicle driving the route.
    pub vehicle_id: u64,
    /// Total distance including the return leg.
    pub distance: f64,
    /// Total travel time including the return leg.
    pub time: f64,
    /// Sum of the visited customers' demands.
    pub total_demand: i64,
    /// Stops in driving order, depot at both ends.
    pub order: Vec<Coordinate>,
    /// Visited customer ids in order.
    pub customer_ids: Vec<u64>,
}

impl RouteSummary {
    /// Number of customers visited.
    pub fn len(&self) -> usize {
        self.customer_ids.len()
    }

    /// Returns `true` if the vehicle stays at its depot.
    pub fn is_empty(&self) -> bool {
        self.customer_ids.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serialize_field_names() {
        let summary = RouteSummary {
            vehicle_id: 2,
            distance: 1.5,
            time: 0.25,
            total_demand: 4,
            order: vec![Coordinate::new(0.0, 0.0), Coordinate::new(0.0, 0.0)],
            customer_ids: vec![],
        };
        let json = serde_json::to_value(&summary).expect("valid");
        assert_eq!(json["vehicle_id"], 2);
        assert_eq!(json["order"][0]["lat"], 0.0);
        assert!(summary.is_empty());
        assert_eq!(summary.len(), 0);
    }
}
