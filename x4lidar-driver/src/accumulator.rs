use crate::packet::Reading;
use x4lidar_data::{RotationSnapshot, DEGREES_PER_ROTATION};

/// Per-degree sample bins for one accumulation cycle.
pub(crate) struct ScanAccumulator {
    buckets: Vec<Vec<u16>>,
}

impl ScanAccumulator {
    pub(crate) fn new() -> Self {
        ScanAccumulator {
            buckets: vec![Vec::new(); DEGREES_PER_ROTATION],
        }
    }

    /// Bins each reading by the integer degree it falls in. Readings
    /// outside [0, 360) are dropped.
    pub(crate) fn accumulate(&mut self, readings: &[Reading]) {
        for reading in readings {
            let degree = reading.angle.floor();
            if degree >= 0. && degree < DEGREES_PER_ROTATION as f64 {
                self.buckets[degree as usize].push(reading.distance);
            }
        }
    }

    /// Collapses the cycle into one snapshot and clears the bins. Empty
    /// degrees take `no_value`; the mean truncates.
    pub(crate) fn finalize(&mut self, no_value: i32) -> RotationSnapshot {
        let mut snapshot = RotationSnapshot::filled(no_value);
        for (degree, bucket) in self.buckets.iter_mut().enumerate() {
            if !bucket.is_empty() {
                let sum: u64 = bucket.iter().map(|distance| u64::from(*distance)).sum();
                snapshot.distances[degree] = (sum / bucket.len() as u64) as i32;
            }
            bucket.clear();
        }
        snapshot
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reading(distance: u16, angle: f64) -> Reading {
        Reading { distance, angle }
    }

    #[test]
    fn test_mean_per_bucket() {
        let mut accumulator = ScanAccumulator::new();
        accumulator.accumulate(&[
            reading(100, 45.2),
            reading(200, 45.6),
            reading(300, 45.9),
        ]);
        let snapshot = accumulator.finalize(0);
        assert_eq!(snapshot.distances[45], 200);
    }

    #[test]
    fn test_mean_truncates() {
        let mut accumulator = ScanAccumulator::new();
        accumulator.accumulate(&[reading(100, 10.0), reading(201, 10.99)]);
        let snapshot = accumulator.finalize(0);
        assert_eq!(snapshot.distances[10], 150);
    }

    #[test]
    fn test_empty_buckets_take_the_sentinel() {
        let mut accumulator = ScanAccumulator::new();
        accumulator.accumulate(&[reading(500, 7.5)]);
        let snapshot = accumulator.finalize(-1);
        assert_eq!(snapshot.distances[7], 500);
        for (degree, value) in snapshot.distances.iter().enumerate() {
            if degree != 7 {
                assert_eq!(*value, -1);
            }
        }
    }

    #[test]
    fn test_out_of_range_readings_are_dropped() {
        let mut accumulator = ScanAccumulator::new();
        accumulator.accumulate(&[reading(500, 360.0), reading(600, 512.3)]);
        let snapshot = accumulator.finalize(0);
        assert!(snapshot.distances.iter().all(|value| *value == 0));
    }

    #[test]
    fn test_buckets_reset_between_cycles() {
        let mut accumulator = ScanAccumulator::new();
        accumulator.accumulate(&[reading(800, 123.4)]);
        let first = accumulator.finalize(0);
        assert_eq!(first.distances[123], 800);
        let second = accumulator.finalize(0);
        assert!(second.distances.iter().all(|value| *value == 0));
    }
}
