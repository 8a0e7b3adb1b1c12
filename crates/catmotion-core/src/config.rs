//! Body parameters.
//!
//! Every constant of the animation lives here with a default matching the
//! classic desktop cat. Parameters deserialize from JSON with per-field
//! defaults, so a scene only has to mention what it changes.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::geometry::{Point, Rect};
use crate::limb::JointLimits;

/// Number of links in the tail chain.
pub const TAIL_SEGMENTS: usize = 5;

/// Largest accepted head jitter, in degrees either side of the heading.
pub const MAX_HEAD_JITTER: f64 = 180.0;

/// How eased quantities (limb, heading, head and tail angles) approach their
/// targets each tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SmoothingMode {
    /// `value += (target - value) * rate * dt`. Overshoots when `rate * dt > 1`.
    #[default]
    Linear,
    /// `value += (target - value) * (1 - exp(-rate * dt))`. Never overshoots.
    Exponential,
}

impl SmoothingMode {
    /// Fraction of the remaining distance covered in one tick of `dt`.
    #[inline]
    pub fn factor(self, rate: f64, dt: f64) -> f64 {
        match self {
            SmoothingMode::Linear => rate * dt,
            SmoothingMode::Exponential => 1.0 - (-rate * dt).exp(),
        }
    }
}

/// How the walking step behaves near the target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ArrivalMode {
    /// Always step `speed * dt`; may overshoot and jitter around the target.
    #[default]
    Unclamped,
    /// Step `min(speed * dt, distance)`.
    Clamped,
}

/// Behavior of the blink and ear-twitch pulses.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum PulseMode {
    /// Timers grow forever; each pulse is on only at the start of the body's life.
    #[default]
    Once,
    /// Timers wrap by their period, so the pulses recur.
    Periodic {
        #[serde(default = "default_blink_period")]
        blink_period: f64,
        #[serde(default = "default_ear_twitch_period")]
        ear_twitch_period: f64,
    },
}

fn default_blink_period() -> f64 {
    4.0
}

fn default_ear_twitch_period() -> f64 {
    7.0
}

impl PulseMode {
    /// Periodic pulses with the default periods.
    pub fn periodic() -> Self {
        PulseMode::Periodic {
            blink_period: default_blink_period(),
            ear_twitch_period: default_ear_twitch_period(),
        }
    }
}

/// Tail wave parameters. Segment `i` has length `base_length - i * length_step`
/// and wave amplitude `base_amplitude - i * amplitude_step`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TailParams {
    pub base_length: f64,
    pub length_step: f64,
    pub base_amplitude: f64,
    pub amplitude_step: f64,
    /// Phase offset between neighbouring segments (radians).
    pub phase_step: f64,
    /// Wave angular frequency applied to the state timer (radians per second).
    pub frequency: f64,
    pub rate: f64,
}

impl Default for TailParams {
    fn default() -> Self {
        Self {
            base_length: 15.0,
            length_step: 2.0,
            base_amplitude: 15.0,
            amplitude_step: 2.0,
            phase_step: 0.3,
            frequency: 2.0,
            rate: 0.1,
        }
    }
}

/// Random wandering: an explicit countdown re-armed with a duration drawn
/// from `[min_interval, max_interval]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct WanderParams {
    pub min_interval: f64,
    pub max_interval: f64,
    /// Probability that an expired countdown perturbs the target.
    pub chance: f64,
    /// Per-axis perturbation is drawn from `[-max_offset, max_offset]`.
    pub max_offset: f64,
    /// Perturbed targets are clamped into this rectangle.
    pub bounds: Rect,
}

impl Default for WanderParams {
    fn default() -> Self {
        Self {
            min_interval: 3.0,
            max_interval: 8.0,
            chance: 0.3,
            max_offset: 100.0,
            bounds: Rect::new(50.0, 50.0, 950.0, 650.0),
        }
    }
}

/// Pointer attraction: a pointer within `radius` of the body drags the target
/// by `(pointer - body) * pull`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PointerParams {
    pub radius: f64,
    pub pull: f64,
}

impl Default for PointerParams {
    fn default() -> Self {
        Self {
            radius: 100.0,
            pull: 0.001,
        }
    }
}

/// All tunables of a [`crate::body::CatBody`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BodyParams {
    pub width: f64,
    pub height: f64,
    /// Walking speed in world units per second.
    pub speed: f64,
    /// Upper bound accepted by `set_speed`.
    pub max_speed: f64,
    /// Walk-cycle phase advance (radians per second).
    pub walk_speed: f64,
    /// Distance above which the body walks.
    pub arrival_threshold: f64,
    pub heading_rate: f64,
    pub head_rate: f64,
    /// Head target jitter is drawn from `[-head_jitter, head_jitter]` each tick.
    pub head_jitter: f64,
    /// Distance from body center to head center along the heading.
    pub head_offset: f64,
    pub limb_length: f64,
    pub limb_limits: JointLimits,
    pub limb_smoothing: f64,
    /// Limb bases sit at `(±x, ±y)` around the body center; fronts at `-x`.
    pub limb_anchor: Point,
    pub gait_amplitude: f64,
    pub idle_sway_amplitude: f64,
    pub idle_sway_frequency: f64,
    pub blink_duration: f64,
    pub ear_twitch_duration: f64,
    pub tail: TailParams,
    pub wander: WanderParams,
    pub pointer: PointerParams,
    /// Target used by `go_home`.
    pub home: Point,
    /// Area sampled by `random_target`.
    pub random_area: Rect,
    pub smoothing: SmoothingMode,
    pub arrival: ArrivalMode,
    pub pulses: PulseMode,
}

impl Default for BodyParams {
    fn default() -> Self {
        Self {
            width: 60.0,
            height: 40.0,
            speed: 0.8,
            max_speed: 2.0,
            walk_speed: 2.0,
            arrival_threshold: 5.0,
            heading_rate: 0.1,
            head_rate: 0.05,
            head_jitter: 10.0,
            head_offset: 35.0,
            limb_length: 25.0,
            limb_limits: JointLimits::new(-30.0, 30.0),
            limb_smoothing: 0.1,
            limb_anchor: Point::new(25.0, 15.0),
            gait_amplitude: 20.0,
            idle_sway_amplitude: 5.0,
            idle_sway_frequency: 0.5,
            blink_duration: 0.1,
            ear_twitch_duration: 0.05,
            tail: TailParams::default(),
            wander: WanderParams::default(),
            pointer: PointerParams::default(),
            home: Point::new(400.0, 250.0),
            random_area: Rect::new(100.0, 100.0, 700.0, 400.0),
            smoothing: SmoothingMode::default(),
            arrival: ArrivalMode::default(),
            pulses: PulseMode::default(),
        }
    }
}

fn finite(name: &'static str, value: f64) -> Result<f64, ConfigError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(ConfigError::NonFinite(name))
    }
}

fn positive(name: &'static str, value: f64) -> Result<(), ConfigError> {
    if finite(name, value)? > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::NotPositive { name, value })
    }
}

fn non_negative(name: &'static str, value: f64) -> Result<(), ConfigError> {
    if finite(name, value)? >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::Negative { name, value })
    }
}

fn ordered(name: &'static str, min: f64, max: f64) -> Result<(), ConfigError> {
    finite(name, min)?;
    finite(name, max)?;
    if min <= max {
        Ok(())
    } else {
        Err(ConfigError::InvertedRange { name, min, max })
    }
}

/// Half-width of a symmetric `[-half, half]` sampling range.
fn sample_half_width(name: &'static str, half: f64) -> Result<(), ConfigError> {
    non_negative(name, half)?;
    if (half * 2.0).is_finite() {
        Ok(())
    } else {
        Err(ConfigError::Unsampleable(name))
    }
}

fn rect(name: &'static str, r: &Rect) -> Result<(), ConfigError> {
    if r.is_well_formed() {
        return Ok(());
    }
    ordered(name, r.min_x, r.max_x)?;
    ordered(name, r.min_y, r.max_y)?;
    Err(ConfigError::Unsampleable(name))
}

impl BodyParams {
    /// Check every parameter. The body itself accepts any values, but a
    /// NaN or inverted range would make the animation meaningless.
    pub fn validate(&self) -> Result<(), ConfigError> {
        positive("width", self.width)?;
        positive("height", self.height)?;
        non_negative("speed", self.speed)?;
        non_negative("max_speed", self.max_speed)?;
        finite("walk_speed", self.walk_speed)?;
        non_negative("arrival_threshold", self.arrival_threshold)?;
        non_negative("heading_rate", self.heading_rate)?;
        non_negative("head_rate", self.head_rate)?;
        non_negative("head_jitter", self.head_jitter)?;
        if self.head_jitter > MAX_HEAD_JITTER {
            return Err(ConfigError::OutOfRange {
                name: "head_jitter",
                value: self.head_jitter,
            });
        }
        finite("head_offset", self.head_offset)?;
        positive("limb_length", self.limb_length)?;
        ordered("limb_limits", self.limb_limits.min, self.limb_limits.max)?;
        non_negative("limb_smoothing", self.limb_smoothing)?;
        finite("limb_anchor.x", self.limb_anchor.x)?;
        finite("limb_anchor.y", self.limb_anchor.y)?;
        non_negative("gait_amplitude", self.gait_amplitude)?;
        non_negative("idle_sway_amplitude", self.idle_sway_amplitude)?;
        finite("idle_sway_frequency", self.idle_sway_frequency)?;
        non_negative("blink_duration", self.blink_duration)?;
        non_negative("ear_twitch_duration", self.ear_twitch_duration)?;

        let last = (TAIL_SEGMENTS - 1) as f64;
        let tail = &self.tail;
        non_negative("tail.length_step", tail.length_step)?;
        positive(
            "tail.base_length - last segment",
            tail.base_length - tail.length_step * last,
        )?;
        non_negative("tail.amplitude_step", tail.amplitude_step)?;
        non_negative(
            "tail.base_amplitude - last segment",
            tail.base_amplitude - tail.amplitude_step * last,
        )?;
        finite("tail.phase_step", tail.phase_step)?;
        finite("tail.frequency", tail.frequency)?;
        non_negative("tail.rate", tail.rate)?;

        let wander = &self.wander;
        positive("wander.min_interval", wander.min_interval)?;
        ordered("wander.interval", wander.min_interval, wander.max_interval)?;
        if !(0.0..=1.0).contains(&wander.chance) {
            return Err(ConfigError::Probability {
                name: "wander.chance",
                value: wander.chance,
            });
        }
        sample_half_width("wander.max_offset", wander.max_offset)?;
        rect("wander.bounds", &wander.bounds)?;

        non_negative("pointer.radius", self.pointer.radius)?;
        finite("pointer.pull", self.pointer.pull)?;
        finite("home.x", self.home.x)?;
        finite("home.y", self.home.y)?;
        rect("random_area", &self.random_area)?;

        if let PulseMode::Periodic {
            blink_period,
            ear_twitch_period,
        } = self.pulses
        {
            positive("pulses.blink_period", blink_period)?;
            positive("pulses.ear_twitch_period", ear_twitch_period)?;
        }
        Ok(())
    }

    /// Length of tail segment `index`.
    pub fn tail_length(&self, index: usize) -> f64 {
        self.tail.base_length - index as f64 * self.tail.length_step
    }

    /// Wave amplitude of tail segment `index`.
    pub fn tail_amplitude(&self, index: usize) -> f64 {
        self.tail.base_amplitude - index as f64 * self.tail.amplitude_step
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_defaults_are_valid() {
        BodyParams::default().validate().unwrap();
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let params: BodyParams =
            serde_json::from_str(r#"{"speed": 40.0, "smoothing": "exponential"}"#).unwrap();
        assert_eq!(params.speed, 40.0);
        assert_eq!(params.smoothing, SmoothingMode::Exponential);
        assert_eq!(params.width, 60.0);
        assert_eq!(params.wander, WanderParams::default());
    }

    #[test]
    fn test_periodic_pulses_parse() {
        let params: BodyParams =
            serde_json::from_str(r#"{"pulses": {"mode": "periodic", "blink_period": 2.5}}"#)
                .unwrap();
        assert_eq!(
            params.pulses,
            PulseMode::Periodic {
                blink_period: 2.5,
                ear_twitch_period: 7.0
            }
        );
    }

    #[test]
    fn test_rejects_inverted_limits() {
        let params = BodyParams {
            limb_limits: JointLimits::new(10.0, -10.0),
            ..Default::default()
        };
        let err = params.validate().unwrap_err();
        assert_eq!(err.code(), "CONFIG_004");
    }

    #[test]
    fn test_rejects_bad_wander_chance() {
        let mut params = BodyParams::default();
        params.wander.chance = 1.5;
        assert!(matches!(
            params.validate(),
            Err(ConfigError::Probability { .. })
        ));
    }

    #[test]
    fn test_rejects_nan() {
        let params = BodyParams {
            speed: f64::NAN,
            ..Default::default()
        };
        assert!(matches!(params.validate(), Err(ConfigError::NonFinite("speed"))));
    }

    #[test]
    fn test_rejects_unbounded_jitter() {
        let params = BodyParams {
            head_jitter: 1e308,
            ..Default::default()
        };
        let err = params.validate().unwrap_err();
        assert_eq!(err.code(), "CONFIG_009");
        assert!(BodyParams {
            head_jitter: MAX_HEAD_JITTER,
            ..Default::default()
        }
        .validate()
        .is_ok());
    }

    #[test]
    fn test_rejects_unsampleable_ranges() {
        let mut params = BodyParams::default();
        params.wander.max_offset = 1e308;
        assert!(matches!(
            params.validate(),
            Err(ConfigError::Unsampleable("wander.max_offset"))
        ));

        let mut params = BodyParams::default();
        params.random_area = Rect::new(-1e308, 0.0, 1e308, 10.0);
        assert!(matches!(
            params.validate(),
            Err(ConfigError::Unsampleable("random_area"))
        ));

        let mut params = BodyParams::default();
        params.random_area = Rect::new(10.0, 0.0, 0.0, 10.0);
        assert_eq!(params.validate().unwrap_err().code(), "CONFIG_004");
    }

    #[test]
    fn test_rejects_tail_that_shrinks_to_nothing() {
        let mut params = BodyParams::default();
        params.tail.length_step = 4.0;
        assert!(params.validate().is_err());
    }

    #[test]
    fn test_tail_lengths_and_amplitudes_decrease() {
        let params = BodyParams::default();
        let lengths: Vec<f64> = (0..TAIL_SEGMENTS).map(|i| params.tail_length(i)).collect();
        assert_eq!(lengths, vec![15.0, 13.0, 11.0, 9.0, 7.0]);
        for i in 1..TAIL_SEGMENTS {
            assert!(params.tail_amplitude(i) < params.tail_amplitude(i - 1));
        }
    }

    #[test]
    fn test_smoothing_factor() {
        assert_eq!(SmoothingMode::Linear.factor(0.1, 2.0), 0.2);
        let k = SmoothingMode::Exponential.factor(0.1, 1000.0);
        assert!(k > 0.99 && k <= 1.0);
    }
}
