//! Named scroll effects used across the site's pages

use std::fmt;
use std::str::FromStr;

use super::range::{Keyframes, MotionRange};
use super::snapshot::{Channel, MotionRanges};
use super::spring::{ChannelSprings, SpringParams};
use crate::config::MotionConfig;
use crate::error::{Error, Result};

/// Per-card scroll delay for depth-scaled cards, in pixels
const CARD_DELAY_PX: f64 = 20.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Preset {
    /// Sections recede (shrink, tilt back, sink, fade) as they scroll away
    StackedDepth,
    /// Content straightens out of a tilt as it scrolls in
    Perspective,
    /// Fade and lift as the element enters the viewport
    Reveal,
    /// Opacity follows progress through a midpoint, with a small lift
    ScrollFade,
    /// Hero content fades over the first half while the image drifts down
    HeroFade,
    /// Cards inside a section shrink with a per-card stagger
    DepthScale { card_index: usize },
    /// Background drifts at `speed` relative to scroll
    Parallax { speed: f64 },
    /// Section swells and comes forward, then sinks and fades as it leaves
    ScrollDriven,
    /// Element grows into focus mid-viewport and settles slightly smaller
    ElementDepth,
}

impl Preset {
    pub const NAMES: [&'static str; 9] = [
        "stacked-depth",
        "perspective",
        "reveal",
        "scroll-fade",
        "hero-fade",
        "depth-scale:<card>",
        "parallax:<speed>",
        "scroll-driven",
        "element-depth",
    ];

    /// Channel curves over section progress
    pub fn ranges(&self, config: &MotionConfig) -> MotionRanges {
        let base = MotionRanges::default();
        match *self {
            Preset::StackedDepth => {
                let stacked = &config.stacked;
                base.with(Channel::Scale, stacked.scale_range())
                    .with(Channel::RotateX, stacked.rotate_x_range())
                    .with(Channel::TranslateZ, stacked.translate_z_range())
                    .with(Channel::Opacity, stacked.opacity_range())
            }
            Preset::Perspective => base
                .with(Channel::Scale, MotionRange::unit(0.92, 1.0))
                .with(Channel::RotateX, MotionRange::unit(8.0, 0.0)),
            Preset::Reveal => base
                .with(Channel::Opacity, MotionRange::unit(0.0, 1.0))
                .with(Channel::TranslateY, MotionRange::unit(60.0, 0.0)),
            Preset::ScrollFade => base
                .with(
                    Channel::Opacity,
                    Keyframes::from_stops(vec![0.0, 0.5, 1.0], vec![0.0, 0.5, 1.0]),
                )
                .with(Channel::TranslateY, MotionRange::unit(40.0, 0.0)),
            Preset::HeroFade => base
                .with(Channel::Opacity, MotionRange {
                    input_low: 0.0,
                    input_high: 0.5,
                    output_low: 1.0,
                    output_high: 0.3,
                })
                .with(Channel::TranslateY, MotionRange::unit(0.0, 100.0)),
            Preset::DepthScale { card_index } => {
                let i = card_index as f64;
                let shift = i * CARD_DELAY_PX / config.viewport_height;
                base.with(Channel::Scale, MotionRange {
                    input_low: -shift,
                    input_high: 1.0 - shift,
                    output_low: 1.0 - i * 0.02,
                    output_high: 0.95 - i * 0.05,
                })
            }
            Preset::Parallax { speed } => {
                base.with(Channel::TranslateY, MotionRange::unit(0.0, 100.0 * speed))
            }
            Preset::ScrollDriven => base
                .with(Channel::Scale, MotionRange::unit(1.0, 1.02))
                .with(Channel::RotateX, MotionRange::unit(0.0, -5.0))
                .with(
                    Channel::Opacity,
                    Keyframes::from_stops(vec![0.0, 0.8, 1.0], vec![1.0, 1.0, 0.5]),
                )
                .with(
                    Channel::TranslateZ,
                    Keyframes::from_stops(vec![0.0, 0.5, 1.0], vec![0.0, 20.0, -30.0]),
                ),
            Preset::ElementDepth => base.with(
                Channel::Scale,
                Keyframes::from_stops(vec![0.0, 0.5, 1.0], vec![0.9, 1.0, 0.95]),
            ),
        }
    }

    /// Springs for this effect; `None` tracks scroll directly
    pub fn spring(&self, config: &MotionConfig) -> Option<ChannelSprings> {
        match self {
            Preset::StackedDepth
            | Preset::Perspective
            | Preset::ScrollFade
            | Preset::DepthScale { .. }
            | Preset::Parallax { .. }
            | Preset::ElementDepth => Some(config.spring.into()),
            Preset::Reveal => Some(SpringParams::REVEAL.into()),
            // Depth lags behind the other channels
            Preset::ScrollDriven => Some(
                ChannelSprings::uniform(config.spring)
                    .with_override(Channel::TranslateZ, SpringParams::REVEAL),
            ),
            Preset::HeroFade => None,
        }
    }
}

impl fmt::Display for Preset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Preset::StackedDepth => write!(f, "stacked-depth"),
            Preset::Perspective => write!(f, "perspective"),
            Preset::Reveal => write!(f, "reveal"),
            Preset::ScrollFade => write!(f, "scroll-fade"),
            Preset::HeroFade => write!(f, "hero-fade"),
            Preset::DepthScale { card_index } => write!(f, "depth-scale:{}", card_index),
            Preset::Parallax { speed } => write!(f, "parallax:{}", speed),
            Preset::ScrollDriven => write!(f, "scroll-driven"),
            Preset::ElementDepth => write!(f, "element-depth"),
        }
    }
}

impl FromStr for Preset {
    type Err = Error;

    /// Parse a kebab-case preset name, e.g. `depth-scale:2` or `parallax:0.5`
    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim().to_lowercase();
        let (name, arg) = match s.split_once(':') {
            Some((name, arg)) => (name, Some(arg)),
            None => (s.as_str(), None),
        };

        let preset = match (name, arg) {
            ("stacked-depth" | "stacked", None) => Preset::StackedDepth,
            ("perspective", None) => Preset::Perspective,
            ("reveal", None) => Preset::Reveal,
            ("scroll-fade", None) => Preset::ScrollFade,
            ("hero-fade" | "hero", None) => Preset::HeroFade,
            ("scroll-driven", None) => Preset::ScrollDriven,
            ("element-depth", None) => Preset::ElementDepth,
            ("depth-scale", arg) => {
                let card_index = match arg {
                    Some(a) => a.parse().map_err(|_| {
                        Error::invalid(format!("depth-scale card index must be an integer: {}", a))
                    })?,
                    None => 0,
                };
                Preset::DepthScale { card_index }
            }
            ("parallax", arg) => {
                let speed = match arg {
                    Some(a) => a.parse::<f64>().map_err(|_| {
                        Error::invalid(format!("parallax speed must be a number: {}", a))
                    })?,
                    None => 0.5,
                };
                if !speed.is_finite() {
                    return Err(Error::invalid(format!("parallax speed must be finite: {}", speed)));
                }
                Preset::Parallax { speed }
            }
            _ => {
                return Err(Error::invalid(format!(
                    "unknown preset '{}' (expected one of: {})",
                    s,
                    Self::NAMES.join(", ")
                )))
            }
        };
        Ok(preset)
    }
}
