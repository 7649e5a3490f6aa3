use crate::constants::{FRAME_HEADER_SIZE, FRAME_MARKER_WORD, FRAME_TYPE_POINT_CLOUD};
use crate::numeric::{angle_correction, to_angle, to_distance, to_u16};

/// One distance sample with its interpolated, corrected angle in degrees.
#[derive(Clone, Debug)]
pub(crate) struct Reading {
    pub(crate) distance: u16,
    pub(crate) angle: f64,
}

fn n_samples(frame: &[u8]) -> usize {
    frame[1] as usize
}

fn declared_checksum(frame: &[u8]) -> u16 {
    to_u16(frame[6], frame[7])
}

fn calc_checksum(frame: &[u8]) -> u16 {
    let mut checksum = FRAME_MARKER_WORD;
    checksum ^= to_u16(frame[0], frame[1]);
    checksum ^= to_u16(frame[2], frame[3]);
    checksum ^= to_u16(frame[4], frame[5]);
    for i in 0..n_samples(frame) {
        checksum ^= to_u16(
            frame[FRAME_HEADER_SIZE + 2 * i],
            frame[FRAME_HEADER_SIZE + 2 * i + 1],
        );
    }
    checksum
}

/// A candidate frame is kept only if it announces the point cloud frame
/// type, is long enough for its declared sample count and carries a
/// matching checksum. Everything else is stream noise and is dropped
/// without further notice.
pub(crate) fn validate_frame(frame: &[u8]) -> bool {
    if frame.len() < FRAME_HEADER_SIZE {
        return false;
    }
    if frame[0] != FRAME_TYPE_POINT_CLOUD {
        return false;
    }
    let n = n_samples(frame);
    if n == 0 || frame.len() < FRAME_HEADER_SIZE + 2 * n {
        return false;
    }
    calc_checksum(frame) == declared_checksum(frame)
}

/// Decodes a validated frame into readings. Bounds are re-checked so a
/// frame that slipped through produces nothing rather than a partial
/// result.
pub(crate) fn decode_frame(frame: &[u8]) -> Vec<Reading> {
    if frame.len() < FRAME_HEADER_SIZE {
        return Vec::new();
    }
    let n = n_samples(frame);
    if n == 0 || frame.len() < FRAME_HEADER_SIZE + 2 * n {
        return Vec::new();
    }

    let start_angle = to_angle(frame[2], frame[3]);
    let end_angle = to_angle(frame[4], frame[5]);
    let angle_shift = if start_angle < end_angle { 0. } else { 360. };
    let angle_diff = end_angle - start_angle + angle_shift;

    let mut readings = Vec::with_capacity(n);
    for i in 0..n {
        let distance = to_distance(
            frame[FRAME_HEADER_SIZE + 2 * i],
            frame[FRAME_HEADER_SIZE + 2 * i + 1],
        );
        if distance == 0 {
            // no echo
            continue;
        }
        let interpolated = if n > 1 {
            start_angle + angle_diff * (i as f64) / ((n - 1) as f64)
        } else {
            start_angle
        };
        let mut angle = interpolated + angle_correction(distance as f64);
        if angle > 360. {
            angle -= 360.;
        } else if angle < 0. {
            angle += 360.;
        }
        readings.push(Reading { distance, angle });
    }
    readings
}

#[cfg(test)]
mod tests {
    use super::*;

    // CT = 0, LSN = 2, start angle 10.0 degrees, end angle 12.0 degrees,
    // samples 1000 and 2000 quarter-unit-divided distances.
    const FRAME: [u8; 12] = [
        0x00, 0x02, 0x00, 0x05, 0x00, 0x06, 0x4A, 0x44, 0xA0, 0x0F, 0x40, 0x1F,
    ];

    #[test]
    fn test_calc_checksum() {
        assert_eq!(calc_checksum(&FRAME), 0x444A);
        assert_eq!(calc_checksum(&FRAME), declared_checksum(&FRAME));
    }

    #[test]
    fn test_validate_frame() {
        assert!(validate_frame(&FRAME));
    }

    #[test]
    fn test_validate_rejects_flipped_payload_octet() {
        let mut frame = FRAME;
        frame[8] ^= 0x01;
        assert!(!validate_frame(&frame));
    }

    #[test]
    fn test_validate_rejects_wrong_declared_checksum() {
        let mut frame = FRAME;
        frame[6] ^= 0x01;
        assert!(!validate_frame(&frame));
    }

    #[test]
    fn test_validate_rejects_wrong_frame_type() {
        let mut frame = FRAME;
        frame[0] = 0x01;
        assert!(!validate_frame(&frame));
    }

    #[test]
    fn test_validate_rejects_short_frames() {
        assert!(!validate_frame(&[]));
        assert!(!validate_frame(&FRAME[..7]));
        // header intact but payload truncated below the declared count
        assert!(!validate_frame(&FRAME[..11]));
    }

    #[test]
    fn test_validate_rejects_zero_sample_count() {
        let frame = [0x00, 0x00, 0x00, 0x05, 0x00, 0x06, 0x00, 0x00];
        assert!(!validate_frame(&frame));
    }

    #[test]
    fn test_decode_frame() {
        let readings = decode_frame(&FRAME);
        assert_eq!(readings.len(), 2);
        assert_eq!(readings[0].distance, 1000);
        assert_eq!(readings[1].distance, 2000);
        assert!((readings[0].angle - (10. + angle_correction(1000.))).abs() < 1e-12);
        assert!((readings[1].angle - (12. + angle_correction(2000.))).abs() < 1e-12);
    }

    #[test]
    fn test_decode_skips_zero_distance() {
        // first sample zeroed out, checksum adjusted
        let frame = [
            0x00, 0x02, 0x00, 0x05, 0x00, 0x06, 0xEA, 0x4B, 0x00, 0x00, 0x40, 0x1F,
        ];
        assert!(validate_frame(&frame));
        let readings = decode_frame(&frame);
        assert_eq!(readings.len(), 1);
        assert_eq!(readings[0].distance, 2000);
        assert!((readings[0].angle - (12. + angle_correction(2000.))).abs() < 1e-12);
    }

    #[test]
    fn test_decode_single_sample_uses_start_angle() {
        // LSN = 1, start angle == end angle == 90 degrees, distance 500
        let frame = [0x00, 0x01, 0x00, 0x2D, 0x00, 0x2D, 0x7A, 0x53, 0xD0, 0x07];
        assert!(validate_frame(&frame));
        let readings = decode_frame(&frame);
        assert_eq!(readings.len(), 1);
        assert_eq!(readings[0].distance, 500);
        assert!((readings[0].angle - (90. + angle_correction(500.))).abs() < 1e-12);
    }

    #[test]
    fn test_decode_wraparound_span() {
        // start angle 350, end angle 10: the span is 20 degrees forward
        // through zero. Distances sit near the correction pivot so the
        // corrected angles stay close to the interpolation.
        let frame = [
            0x00, 0x02, 0x00, 0xAF, 0x00, 0x05, 0xAA, 0xFD, 0x6C, 0x02, 0x6C, 0x02,
        ];
        assert!(validate_frame(&frame));
        let readings = decode_frame(&frame);
        assert_eq!(readings.len(), 2);
        let correction = angle_correction(155.);
        assert!((readings[0].angle - (350. + correction)).abs() < 1e-12);
        // 350 + 20 overflows 360 and is normalized back
        assert!((readings[1].angle - (370. + correction - 360.)).abs() < 1e-12);
        for reading in &readings {
            assert!(reading.angle >= 0. && reading.angle < 360.);
        }
    }

    #[test]
    fn test_decode_emits_angles_within_a_rotation() {
        for frame in [FRAME.to_vec(), FRAME.iter().rev().copied().collect()] {
            for reading in decode_frame(&frame) {
                assert!(reading.angle >= 0. && reading.angle < 360.);
            }
        }
    }
}
