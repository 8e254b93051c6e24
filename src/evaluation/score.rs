//! Two-level penalty score.

use std::fmt;
use std::ops::{Add, AddAssign, Sub, SubAssign};

use serde::{Deserialize, Serialize};

/// Hard and soft penalty magnitudes; smaller is better.
///
/// Ordering is lexicographic: any reduction of `hard` beats any amount of
/// `soft`. A score with `hard == 0` is feasible.
///
/// # Examples
///
/// ```
/// use u_cvrp::evaluation::HardSoftScore;
///
/// let feasible = HardSoftScore::new(0, 90_000);
/// let overloaded = HardSoftScore::new(1, 10);
/// assert!(feasible < overloaded);
/// assert!(feasible.is_feasible());
/// assert_eq!(overloaded.to_string(), "1hard/10soft");
/// ```
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct HardSoftScore {
    /// Total hard constraint violation.
    pub hard: i64,
    /// Total soft cost.
    pub soft: i64,
}

impl HardSoftScore {
    /// The score of an empty solution.
    pub const ZERO: Self = Self { hard: 0, soft: 0 };

    /// Creates a score.
    pub const fn new(hard: i64, soft: i64) -> Self {
        Self { hard, soft }
    }

    /// A pure hard penalty.
    pub const fn of_hard(hard: i64) -> Self {
        Self { hard, soft: 0 }
    }

    /// A pure soft penalty.
    pub const fn of_soft(soft: i64) -> Self {
        Self { hard: 0, soft }
    }

    /// Returns `true` if no hard constraint is broken.
    pub fn is_feasible(&self) -> bool {
        self.hard == 0
    }
}

impl Add for HardSoftScore {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(self.hard + rhs.hard, self.soft + rhs.soft)
    }
}

impl Sub for HardSoftScore {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self::new(self.hard - rhs.hard, self.soft - rhs.soft)
    }
}

impl AddAssign for HardSoftScore {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl SubAssign for HardSoftScore {
    fn sub_assign(&mut self, rhs: Self) {
        *self = *self - rhs;
    }
}

impl fmt::Display for HardSoftScore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}hard/{}soft", self.hard, self.soft)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hard_dominates_soft() {
        assert!(HardSoftScore::new(0, i64::MAX) < HardSoftScore::new(1, 0));
        assert!(HardSoftScore::new(2, 5) < HardSoftScore::new(2, 6));
        assert_eq!(
            [HardSoftScore::new(1, 0), HardSoftScore::new(0, 9)]
                .into_iter()
                .min(),
            Some(HardSoftScore::new(0, 9))
        );
    }

    #[test]
    fn test_arithmetic() {
        let mut s = HardSoftScore::of_hard(3) + HardSoftScore::of_soft(1200);
        assert_eq!(s, HardSoftScore::new(3, 1200));
        s -= HardSoftScore::new(3, 200);
        assert_eq!(s, HardSoftScore::of_soft(1000));
        s += HardSoftScore::new(1, 1);
        assert_eq!(s - s, HardSoftScore::ZERO);
        assert_eq!(HardSoftScore::default(), HardSoftScore::ZERO);
    }

    #[test]
    fn test_feasible() {
        assert!(HardSoftScore::of_soft(7).is_feasible());
        assert!(!HardSoftScore::of_hard(1).is_feasible());
    }

    #[test]
    fn test_serde() {
        let json = serde_json::to_string(&HardSoftScore::new(3, 4000)).expect("valid");
        assert_eq!(json, r#"{"hard":3,"soft":4000}"#);
    }
}
