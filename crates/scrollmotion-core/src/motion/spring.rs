//! Molecular: spring smoothing
//!
//! A damped spring per channel pulls the displayed value toward the raw
//! scroll-mapped target so fast scrolling does not make elements jump.

use serde::{Deserialize, Serialize};

use super::snapshot::{Channel, MotionSnapshot};
use crate::error::{Error, Result};

/// Spring parameters shared by every channel of a section
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpringParams {
    pub stiffness: f64,
    pub damping: f64,
    #[serde(default = "default_mass")]
    pub mass: f64,
}

fn default_mass() -> f64 {
    1.0
}

impl SpringParams {
    /// Section scroll spring
    pub const SECTION: SpringParams = SpringParams {
        stiffness: 100.0,
        damping: 30.0,
        mass: 1.0,
    };

    /// Softer spring used by reveal-on-scroll content
    pub const REVEAL: SpringParams = SpringParams {
        stiffness: 80.0,
        damping: 25.0,
        mass: 1.0,
    };

    /// Snappy spring for hover lifts on cards and buttons
    pub const HOVER: SpringParams = SpringParams {
        stiffness: 200.0,
        damping: 20.0,
        mass: 1.0,
    };

    pub fn new(stiffness: f64, damping: f64) -> Result<Self> {
        let params = Self {
            stiffness,
            damping,
            mass: 1.0,
        };
        params.validate()?;
        Ok(params)
    }

    /// Damping coefficient that makes this spring critically damped
    pub fn critical_damping(&self) -> f64 {
        2.0 * (self.stiffness * self.mass).sqrt()
    }

    pub fn validate(&self) -> Result<()> {
        if !(self.stiffness.is_finite() && self.stiffness > 0.0) {
            return Err(Error::invalid(format!(
                "spring stiffness must be positive, got {}",
                self.stiffness
            )));
        }
        if !(self.damping.is_finite() && self.damping >= 0.0) {
            return Err(Error::invalid(format!(
                "spring damping must be non-negative, got {}",
                self.damping
            )));
        }
        if !(self.mass.is_finite() && self.mass > 0.0) {
            return Err(Error::invalid(format!(
                "spring mass must be positive, got {}",
                self.mass
            )));
        }
        Ok(())
    }
}

impl Default for SpringParams {
    fn default() -> Self {
        Self::SECTION
    }
}

/// Per-section filter state
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum SmoothingState {
    /// No sample yet; the next call seeds from its target
    #[default]
    Uninitialized,
    Tracking {
        current: MotionSnapshot,
        velocity: MotionSnapshot,
    },
}

impl SmoothingState {
    pub fn current(&self) -> Option<MotionSnapshot> {
        match self {
            SmoothingState::Uninitialized => None,
            SmoothingState::Tracking { current, .. } => Some(*current),
        }
    }

    /// Whether the tracked values sit on `target` and have stopped moving
    pub fn is_settled(&self, target: &MotionSnapshot, tolerance: f64) -> bool {
        match self {
            SmoothingState::Uninitialized => true,
            SmoothingState::Tracking { current, velocity } => {
                current.max_distance(target) <= tolerance
                    && velocity.max_distance(&MotionSnapshot::ZERO) <= tolerance
            }
        }
    }
}

/// Spring per channel: a shared base with optional channel overrides
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChannelSprings {
    base: SpringParams,
    overrides: [Option<SpringParams>; Channel::ALL.len()],
}

impl ChannelSprings {
    pub fn uniform(base: SpringParams) -> Self {
        Self {
            base,
            overrides: [None; Channel::ALL.len()],
        }
    }

    /// Drive `channel` with `params` instead of the base spring
    pub fn with_override(mut self, channel: Channel, params: SpringParams) -> Self {
        self.overrides[channel.index()] = Some(params);
        self
    }

    pub fn base(&self) -> SpringParams {
        self.base
    }

    pub fn for_channel(&self, channel: Channel) -> SpringParams {
        self.overrides[channel.index()].unwrap_or(self.base)
    }

    /// Channels whose spring differs from the base
    pub fn overrides(&self) -> impl Iterator<Item = (Channel, SpringParams)> + '_ {
        Channel::ALL
            .into_iter()
            .filter_map(|c| self.overrides[c.index()].map(|p| (c, p)))
    }

    pub fn validate(&self) -> Result<()> {
        self.base.validate()?;
        for (channel, params) in self.overrides() {
            params.validate().map_err(|e| match e {
                Error::InvalidParameter(msg) => {
                    Error::InvalidParameter(format!("{}: {}", channel.name(), msg))
                }
                other => other,
            })?;
        }
        Ok(())
    }
}

impl From<SpringParams> for ChannelSprings {
    fn from(base: SpringParams) -> Self {
        Self::uniform(base)
    }
}

/// Advance the spring one step of `dt` seconds toward `target`
///
/// Semi-implicit Euler per channel:
/// `a = (k * (target - x) - c * v) / m`, `v += a * dt`, `x += v * dt`.
/// The first call on an uninitialized state returns `target` unchanged.
pub fn apply_smoothing(
    target: MotionSnapshot,
    state: &SmoothingState,
    params: SpringParams,
    dt: f64,
) -> Result<(MotionSnapshot, SmoothingState)> {
    apply_channel_smoothing(target, state, &ChannelSprings::uniform(params), dt)
}

/// `apply_smoothing` with a separate spring per channel
pub fn apply_channel_smoothing(
    target: MotionSnapshot,
    state: &SmoothingState,
    springs: &ChannelSprings,
    dt: f64,
) -> Result<(MotionSnapshot, SmoothingState)> {
    if !(dt.is_finite() && dt >= 0.0) {
        return Err(Error::invalid(format!("frame step must be non-negative, got {}", dt)));
    }
    springs.validate()?;

    let (mut current, mut velocity) = match state {
        SmoothingState::Uninitialized => {
            let seeded = SmoothingState::Tracking {
                current: target,
                velocity: MotionSnapshot::ZERO,
            };
            return Ok((target, seeded));
        }
        SmoothingState::Tracking { current, velocity } => (*current, *velocity),
    };

    for channel in Channel::ALL {
        let params = springs.for_channel(channel);
        let x = current.get(channel);
        let v = velocity.get(channel);
        let a = (params.stiffness * (target.get(channel) - x) - params.damping * v) / params.mass;
        let v = v + a * dt;
        velocity.set(channel, v);
        current.set(channel, x + v * dt);
    }

    Ok((current, SmoothingState::Tracking { current, velocity }))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn target() -> MotionSnapshot {
        MotionSnapshot {
            scale: 0.92,
            rotate_x: -8.0,
            translate_z: -80.0,
            opacity: 0.4,
            translate_y: 0.0,
        }
    }

    #[test]
    fn test_first_call_seeds_target() {
        let (out, state) =
            apply_smoothing(target(), &SmoothingState::Uninitialized, SpringParams::SECTION, 0.016)
                .unwrap();
        assert_eq!(out, target());
        assert_eq!(
            state,
            SmoothingState::Tracking {
                current: target(),
                velocity: MotionSnapshot::ZERO
            }
        );
    }

    #[test]
    fn test_single_step_matches_formula() {
        let state = SmoothingState::Tracking {
            current: MotionSnapshot::REST,
            velocity: MotionSnapshot::ZERO,
        };
        let params = SpringParams::new(100.0, 30.0).unwrap();
        let (out, _) = apply_smoothing(target(), &state, params, 0.1).unwrap();
        // a = 100 * (-80) = -8000, v = -800, x = -80
        assert!((out.translate_z - -80.0).abs() < 1e-9);
        // a = 100 * (0.92 - 1) = -8, v = -0.8, x = 1 - 0.08
        assert!((out.scale - 0.92).abs() < 1e-9);
    }

    #[test]
    fn test_converges_monotonically_when_critically_damped() {
        let params = SpringParams {
            stiffness: 100.0,
            damping: 20.0,
            mass: 1.0,
        };
        assert!((params.critical_damping() - 20.0).abs() < 1e-12);

        let mut state = SmoothingState::Tracking {
            current: MotionSnapshot::REST,
            velocity: MotionSnapshot::ZERO,
        };
        let goal = target();
        let mut prev = MotionSnapshot::REST.max_distance(&goal);
        for _ in 0..600 {
            let (out, next) = apply_smoothing(goal, &state, params, 1.0 / 60.0).unwrap();
            let distance = out.max_distance(&goal);
            assert!(distance <= prev + 1e-12, "distance grew: {} -> {}", prev, distance);
            prev = distance;
            state = next;
        }
        assert!(prev < 1e-6);
        assert!(state.is_settled(&goal, 1e-6));
    }

    #[test]
    fn test_zero_dt_holds_position() {
        let state = SmoothingState::Tracking {
            current: MotionSnapshot::REST,
            velocity: MotionSnapshot::ZERO,
        };
        let (out, _) = apply_smoothing(target(), &state, SpringParams::SECTION, 0.0).unwrap();
        assert_eq!(out, MotionSnapshot::REST);
    }

    #[test]
    fn test_rejects_negative_dt() {
        let result = apply_smoothing(
            target(),
            &SmoothingState::Uninitialized,
            SpringParams::SECTION,
            -0.01,
        );
        assert!(matches!(result, Err(Error::InvalidParameter(_))));
    }

    #[test]
    fn test_rejects_non_positive_stiffness() {
        for stiffness in [0.0, -10.0] {
            let params = SpringParams {
                stiffness,
                damping: 30.0,
                mass: 1.0,
            };
            let result = apply_smoothing(target(), &SmoothingState::Uninitialized, params, 0.016);
            assert!(matches!(result, Err(Error::InvalidParameter(_))));
        }
        assert!(SpringParams::new(0.0, 10.0).is_err());
    }

    #[test]
    fn test_channel_override_only_affects_its_channel() {
        let springs = ChannelSprings::uniform(SpringParams::SECTION)
            .with_override(Channel::TranslateZ, SpringParams::REVEAL);
        assert_eq!(springs.for_channel(Channel::Scale), SpringParams::SECTION);
        assert_eq!(springs.for_channel(Channel::TranslateZ), SpringParams::REVEAL);

        let state = SmoothingState::Tracking {
            current: MotionSnapshot::REST,
            velocity: MotionSnapshot::ZERO,
        };
        let dt = 1.0 / 60.0;
        let (split, _) = apply_channel_smoothing(target(), &state, &springs, dt).unwrap();
        let (shared, _) = apply_smoothing(target(), &state, SpringParams::SECTION, dt).unwrap();

        assert_eq!(split.scale, shared.scale);
        assert_eq!(split.opacity, shared.opacity);
        // k80 pulls z less hard than k100 on the first step
        assert!(split.translate_z > shared.translate_z);
        assert!(split.translate_z < 0.0);
    }

    #[test]
    fn test_rejects_bad_override() {
        let springs = ChannelSprings::uniform(SpringParams::SECTION).with_override(
            Channel::Opacity,
            SpringParams {
                stiffness: 0.0,
                damping: 1.0,
                mass: 1.0,
            },
        );
        match apply_channel_smoothing(target(), &SmoothingState::Uninitialized, &springs, 0.016) {
            Err(Error::InvalidParameter(msg)) => assert!(msg.starts_with("opacity")),
            other => panic!("expected InvalidParameter, got {:?}", other),
        }
    }
}
