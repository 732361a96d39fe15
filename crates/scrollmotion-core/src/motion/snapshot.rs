//! Molecular: evaluate every channel curve into a `MotionSnapshot`

use serde::{Deserialize, Serialize};

use super::range::Curve;
use crate::error::{Error, Result};

/// Visual channels driven by scroll
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Channel {
    Scale,
    RotateX,
    TranslateZ,
    Opacity,
    TranslateY,
}

impl Channel {
    pub const ALL: [Channel; 5] = [
        Channel::Scale,
        Channel::RotateX,
        Channel::TranslateZ,
        Channel::Opacity,
        Channel::TranslateY,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Channel::Scale => "scale",
            Channel::RotateX => "rotate_x",
            Channel::TranslateZ => "translate_z",
            Channel::Opacity => "opacity",
            Channel::TranslateY => "translate_y",
        }
    }

    /// Position in `Channel::ALL`
    #[inline]
    pub fn index(&self) -> usize {
        match self {
            Channel::Scale => 0,
            Channel::RotateX => 1,
            Channel::TranslateZ => 2,
            Channel::Opacity => 3,
            Channel::TranslateY => 4,
        }
    }

    /// Value an element has when nothing drives this channel
    pub fn rest_value(&self) -> f64 {
        match self {
            Channel::Scale | Channel::Opacity => 1.0,
            Channel::RotateX | Channel::TranslateZ | Channel::TranslateY => 0.0,
        }
    }
}

/// Transform values for one frame
///
/// Rotation is in degrees, translations in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MotionSnapshot {
    pub scale: f64,
    pub rotate_x: f64,
    pub translate_z: f64,
    pub opacity: f64,
    pub translate_y: f64,
}

impl MotionSnapshot {
    /// Untransformed, fully opaque element
    pub const REST: MotionSnapshot = MotionSnapshot {
        scale: 1.0,
        rotate_x: 0.0,
        translate_z: 0.0,
        opacity: 1.0,
        translate_y: 0.0,
    };

    /// All channels set to zero; used as the zero velocity
    pub const ZERO: MotionSnapshot = MotionSnapshot {
        scale: 0.0,
        rotate_x: 0.0,
        translate_z: 0.0,
        opacity: 0.0,
        translate_y: 0.0,
    };

    #[inline]
    pub fn get(&self, channel: Channel) -> f64 {
        match channel {
            Channel::Scale => self.scale,
            Channel::RotateX => self.rotate_x,
            Channel::TranslateZ => self.translate_z,
            Channel::Opacity => self.opacity,
            Channel::TranslateY => self.translate_y,
        }
    }

    #[inline]
    pub fn set(&mut self, channel: Channel, value: f64) {
        match channel {
            Channel::Scale => self.scale = value,
            Channel::RotateX => self.rotate_x = value,
            Channel::TranslateZ => self.translate_z = value,
            Channel::Opacity => self.opacity = value,
            Channel::TranslateY => self.translate_y = value,
        }
    }

    /// Largest absolute channel difference
    pub fn max_distance(&self, other: &MotionSnapshot) -> f64 {
        Channel::ALL
            .iter()
            .map(|&c| (self.get(c) - other.get(c)).abs())
            .fold(0.0, f64::max)
    }
}

impl Default for MotionSnapshot {
    fn default() -> Self {
        Self::REST
    }
}

/// One curve per channel
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MotionRanges {
    #[serde(default = "rest_scale")]
    pub scale: Curve,
    #[serde(default = "rest_zero")]
    pub rotate_x: Curve,
    #[serde(default = "rest_zero")]
    pub translate_z: Curve,
    #[serde(default = "rest_opacity")]
    pub opacity: Curve,
    #[serde(default = "rest_zero")]
    pub translate_y: Curve,
}

fn rest_scale() -> Curve {
    Curve::Constant(Channel::Scale.rest_value())
}

fn rest_opacity() -> Curve {
    Curve::Constant(Channel::Opacity.rest_value())
}

fn rest_zero() -> Curve {
    Curve::Constant(0.0)
}

impl Default for MotionRanges {
    /// Every channel held at rest
    fn default() -> Self {
        Self {
            scale: rest_scale(),
            rotate_x: rest_zero(),
            translate_z: rest_zero(),
            opacity: rest_opacity(),
            translate_y: rest_zero(),
        }
    }
}

impl MotionRanges {
    pub fn curve(&self, channel: Channel) -> &Curve {
        match channel {
            Channel::Scale => &self.scale,
            Channel::RotateX => &self.rotate_x,
            Channel::TranslateZ => &self.translate_z,
            Channel::Opacity => &self.opacity,
            Channel::TranslateY => &self.translate_y,
        }
    }

    /// Replace one channel's curve
    pub fn with(mut self, channel: Channel, curve: impl Into<Curve>) -> Self {
        let curve = curve.into();
        match channel {
            Channel::Scale => self.scale = curve,
            Channel::RotateX => self.rotate_x = curve,
            Channel::TranslateZ => self.translate_z = curve,
            Channel::Opacity => self.opacity = curve,
            Channel::TranslateY => self.translate_y = curve,
        }
        self
    }

    pub fn validate(&self) -> Result<()> {
        for channel in Channel::ALL {
            self.curve(channel).validate().map_err(|e| match e {
                Error::InvalidParameter(msg) => {
                    Error::InvalidParameter(format!("{}: {}", channel.name(), msg))
                }
                other => other,
            })?;
        }
        Ok(())
    }
}

/// Map a progress value through every channel curve
///
/// `progress` may be any real number; each channel clamps at its own
/// output bounds. NaN progress and malformed curves are rejected.
pub fn compute_raw_snapshot(progress: f64, ranges: &MotionRanges) -> Result<MotionSnapshot> {
    if progress.is_nan() {
        return Err(Error::invalid("scroll progress is NaN"));
    }
    ranges.validate()?;

    let mut snapshot = MotionSnapshot::REST;
    for channel in Channel::ALL {
        snapshot.set(channel, ranges.curve(channel).map(progress));
    }
    Ok(snapshot)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::motion::range::{Keyframes, MotionRange};

    fn stacked() -> MotionRanges {
        MotionRanges::default()
            .with(Channel::Scale, MotionRange::unit(1.0, 0.92))
            .with(Channel::RotateX, MotionRange::unit(0.0, -8.0))
            .with(Channel::TranslateZ, MotionRange::unit(0.0, -80.0))
            .with(Channel::Opacity, MotionRange::unit(1.0, 0.4))
    }

    #[test]
    fn test_scale_midpoint() {
        let ranges = MotionRanges::default().with(Channel::Scale, MotionRange::unit(1.0, 0.92));
        let snapshot = compute_raw_snapshot(0.5, &ranges).unwrap();
        assert!((snapshot.scale - 0.96).abs() < 1e-9);
        assert_eq!(snapshot.opacity, 1.0);
    }

    #[test]
    fn test_boundaries() {
        let ranges = stacked();
        let start = compute_raw_snapshot(0.0, &ranges).unwrap();
        assert_eq!(start, MotionSnapshot::REST);

        let end = compute_raw_snapshot(1.0, &ranges).unwrap();
        assert_eq!(end.scale, 0.92);
        assert_eq!(end.rotate_x, -8.0);
        assert_eq!(end.translate_z, -80.0);
        assert_eq!(end.opacity, 0.4);

        assert_eq!(compute_raw_snapshot(5.0, &ranges).unwrap(), end);
        assert_eq!(compute_raw_snapshot(-5.0, &ranges).unwrap(), start);
    }

    #[test]
    fn test_all_channels_bounded() {
        let ranges = stacked();
        for i in -30..=30 {
            let p = i as f64 * 0.17;
            let s = compute_raw_snapshot(p, &ranges).unwrap();
            assert!((0.92..=1.0).contains(&s.scale));
            assert!((-8.0..=0.0).contains(&s.rotate_x));
            assert!((-80.0..=0.0).contains(&s.translate_z));
            assert!((0.4..=1.0).contains(&s.opacity));
        }
    }

    #[test]
    fn test_pure() {
        let ranges = stacked();
        let a = compute_raw_snapshot(0.37, &ranges).unwrap();
        let b = compute_raw_snapshot(0.37, &ranges).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_keyframed_channel() {
        let ranges = MotionRanges::default().with(
            Channel::Opacity,
            Keyframes::new(vec![0.0, 0.5], vec![1.0, 0.3]).unwrap(),
        );
        let s = compute_raw_snapshot(0.25, &ranges).unwrap();
        assert!((s.opacity - 0.65).abs() < 1e-9);
        assert_eq!(compute_raw_snapshot(0.9, &ranges).unwrap().opacity, 0.3);
    }

    #[test]
    fn test_rejects_nan_progress() {
        assert!(matches!(
            compute_raw_snapshot(f64::NAN, &stacked()),
            Err(Error::InvalidParameter(_))
        ));
    }

    #[test]
    fn test_rejects_malformed_range() {
        let ranges = MotionRanges::default().with(
            Channel::RotateX,
            MotionRange {
                input_low: 1.0,
                input_high: 0.0,
                output_low: 0.0,
                output_high: -8.0,
            },
        );
        match compute_raw_snapshot(0.5, &ranges) {
            Err(Error::InvalidParameter(msg)) => assert!(msg.starts_with("rotate_x")),
            other => panic!("expected InvalidParameter, got {:?}", other),
        }
    }
}
