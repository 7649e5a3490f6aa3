#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Number of aggregation buckets in one snapshot, one per integer degree.
pub const DEGREES_PER_ROTATION: usize = 360;

/// Struct to hold the aggregated result of one accumulation cycle.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RotationSnapshot {
    /// Mean distance observed at each integer degree, `no_value` where the
    /// cycle saw no samples. Always exactly `DEGREES_PER_ROTATION` entries.
    pub distances: Vec<i32>,
    /// Sentinel stored for degrees without samples.
    pub no_value: i32,
}

impl RotationSnapshot {
    /// A snapshot with every degree set to the sentinel.
    pub fn filled(no_value: i32) -> Self {
        RotationSnapshot {
            distances: vec![no_value; DEGREES_PER_ROTATION],
            no_value,
        }
    }

    /// Distance at `degree`, or `None` when that degree holds the sentinel
    /// or is out of range.
    pub fn distance_at(&self, degree: usize) -> Option<i32> {
        self.distances
            .get(degree)
            .copied()
            .filter(|value| *value != self.no_value)
    }

    /// Degrees that received at least one sample this cycle.
    pub fn measured(&self) -> impl Iterator<Item = (usize, i32)> + '_ {
        self.distances
            .iter()
            .enumerate()
            .filter(|(_, value)| **value != self.no_value)
            .map(|(degree, value)| (degree, *value))
    }
}
