//! The five-link tail and its travelling wave.

use crate::angle::ease_angle;
use crate::config::{BodyParams, TAIL_SEGMENTS};

/// One link of the tail chain.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TailSegment {
    pub index: usize,
    pub length: f64,
    pub angle: f64,
    pub target_angle: f64,
}

/// Ordered tail chain, root first.
#[derive(Debug, Clone, PartialEq)]
pub struct Tail {
    segments: [TailSegment; TAIL_SEGMENTS],
}

impl Tail {
    pub fn new(params: &BodyParams) -> Self {
        let segments = std::array::from_fn(|index| TailSegment {
            index,
            length: params.tail_length(index),
            angle: 0.0,
            target_angle: 0.0,
        });
        Self { segments }
    }

    pub fn segments(&self) -> &[TailSegment] {
        &self.segments
    }

    /// Wave target for segment `index`: opposite the body heading, offset by
    /// a sine whose phase advances and whose amplitude decays down the chain.
    pub fn wave_target(params: &BodyParams, index: usize, heading: f64, phase_time: f64) -> f64 {
        let wave = (phase_time * params.tail.frequency + index as f64 * params.tail.phase_step).sin();
        (heading + 180.0) + wave * params.tail_amplitude(index)
    }

    /// Retarget every segment for this tick and ease toward the new targets.
    pub fn update(&mut self, params: &BodyParams, heading: f64, phase_time: f64, dt: f64) {
        for segment in &mut self.segments {
            segment.target_angle = Self::wave_target(params, segment.index, heading, phase_time);
            segment.angle = ease_angle(
                segment.angle,
                segment.target_angle,
                params.tail.rate,
                dt,
                params.smoothing,
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_root_target_at_time_zero() {
        let params = BodyParams::default();
        assert_eq!(Tail::wave_target(&params, 0, 0.0, 0.0), 180.0);
    }

    #[test]
    fn test_wave_amplitude_decays_down_chain() {
        let params = BodyParams::default();
        // Peak of each segment's wave relative to the rest direction.
        let peaks: Vec<f64> = (0..TAIL_SEGMENTS)
            .map(|i| {
                let phase = (std::f64::consts::FRAC_PI_2 - i as f64 * 0.3) / 2.0;
                Tail::wave_target(&params, i, 0.0, phase) - 180.0
            })
            .collect();
        for pair in peaks.windows(2) {
            assert!(pair[1] < pair[0], "{:?}", peaks);
        }
        assert!((peaks[0] - 15.0).abs() < 1e-9);
    }

    #[test]
    fn test_update_moves_toward_opposite_heading() {
        let params = BodyParams::default();
        let mut tail = Tail::new(&params);
        tail.update(&params, 0.0, 0.0, 1.0);
        let root = tail.segments()[0];
        assert_eq!(root.target_angle, 180.0);
        // Normalized difference from 0 to 180 is +180; one tick at rate 0.1.
        assert!((root.angle - 18.0).abs() < 1e-9);
    }

    #[test]
    fn test_segment_lengths() {
        let tail = Tail::new(&BodyParams::default());
        let lengths: Vec<f64> = tail.segments().iter().map(|s| s.length).collect();
        assert_eq!(lengths, vec![15.0, 13.0, 11.0, 9.0, 7.0]);
    }
}
