//! Solution scoring.
//!
//! - [`evaluate`]: full scan, pure
//! - [`explain`]: the same score broken down per constraint
//! - [`ScoreDirector`]: keeps the score current across chain edits

mod evaluator;
mod incremental;
mod score;

pub use evaluator::{
    evaluate, explain, CapacityMatch, ConstraintTotal, ScoreExplanation,
    DISTANCE_FROM_LAST_CUSTOMER_TO_DEPOT, DISTANCE_TO_PREVIOUS_STANDSTILL, VEHICLE_CAPACITY,
};
pub use incremental::ScoreDirector;
pub use score::HardSoftScore;
