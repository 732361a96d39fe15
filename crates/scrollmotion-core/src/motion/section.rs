//! Molecular: section geometry and the per-section motion mapper
//!
//! Each full-viewport section owns a `SectionMotion`. The host calls
//! `sample()` once per animation frame with that section's progress and
//! the time since the previous frame, and calls `reset()` when the section
//! leaves observation.

use super::presets::Preset;
use super::snapshot::{compute_raw_snapshot, MotionRanges, MotionSnapshot};
use super::spring::{apply_channel_smoothing, ChannelSprings, SmoothingState, SpringParams};
use crate::config::MotionConfig;
use crate::error::{Error, Result};

/// Normalized progress of section `section_index` at global `scroll_offset`
///
/// `0.0` when the section's top reaches the viewport top, `1.0` one viewport
/// later. Left unclamped; curves clamp per channel.
pub fn map_section_progress(
    scroll_offset: f64,
    section_index: usize,
    viewport_height: f64,
) -> Result<f64> {
    SectionLayout::new(viewport_height)?.progress(scroll_offset, section_index)
}

/// Vertical arrangement of stacked full-viewport sections
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SectionLayout {
    viewport_height: f64,
    trigger_offset: f64,
    header_height: f64,
}

impl SectionLayout {
    pub fn new(viewport_height: f64) -> Result<Self> {
        if !(viewport_height.is_finite() && viewport_height > 0.0) {
            return Err(Error::invalid(format!(
                "viewport height must be positive, got {}",
                viewport_height
            )));
        }
        Ok(Self {
            viewport_height,
            trigger_offset: 0.0,
            header_height: 0.0,
        })
    }

    pub fn from_config(config: &MotionConfig) -> Result<Self> {
        Ok(Self::new(config.viewport_height)?
            .with_trigger_offset(config.trigger_offset)
            .with_header_height(config.header_height))
    }

    /// Shift every section's animation start by `offset` pixels
    pub fn with_trigger_offset(mut self, offset: f64) -> Self {
        self.trigger_offset = offset;
        self
    }

    pub fn with_header_height(mut self, height: f64) -> Self {
        self.header_height = height;
        self
    }

    #[inline]
    pub fn viewport_height(&self) -> f64 {
        self.viewport_height
    }

    #[inline]
    pub fn section_start(&self, index: usize) -> f64 {
        self.trigger_offset + index as f64 * self.viewport_height
    }

    #[inline]
    pub fn section_end(&self, index: usize) -> f64 {
        self.section_start(index) + self.viewport_height
    }

    pub fn progress(&self, scroll_offset: f64, index: usize) -> Result<f64> {
        if scroll_offset.is_nan() {
            return Err(Error::invalid("scroll offset is NaN"));
        }
        Ok((scroll_offset - self.section_start(index)) / self.viewport_height)
    }

    /// Scroll position that brings section `index` to the top, below the header
    pub fn section_offset(&self, index: usize) -> f64 {
        index as f64 * self.viewport_height + self.header_height
    }

    /// Index of the section under the viewport top at `scroll_offset`
    pub fn section_at(&self, scroll_offset: f64) -> usize {
        let relative = (scroll_offset - self.trigger_offset) / self.viewport_height;
        if relative.is_finite() && relative > 0.0 {
            relative.floor() as usize
        } else {
            0
        }
    }
}

/// Motion mapper for one section, owning its smoothing state
#[derive(Debug, Clone)]
pub struct SectionMotion {
    ranges: MotionRanges,
    spring: Option<ChannelSprings>,
    state: SmoothingState,
    /// Upper bound on a single spring step, in seconds
    max_step: f64,
    last_target: Option<MotionSnapshot>,
}

impl SectionMotion {
    /// Default cap on a single spring step
    pub const DEFAULT_MAX_STEP: f64 = 0.1;

    pub fn new(ranges: MotionRanges, spring: Option<SpringParams>) -> Self {
        Self::with_springs(ranges, spring.map(ChannelSprings::uniform))
    }

    /// Like `new`, with a separate spring per channel
    pub fn with_springs(ranges: MotionRanges, spring: Option<ChannelSprings>) -> Self {
        Self {
            ranges,
            spring,
            state: SmoothingState::Uninitialized,
            max_step: Self::DEFAULT_MAX_STEP,
            last_target: None,
        }
    }

    /// Build from a preset, honoring reduced motion and the frame step cap
    pub fn from_preset(preset: &Preset, config: &MotionConfig) -> Self {
        let spring = if config.reduced_motion {
            None
        } else {
            preset.spring(config)
        };
        let mut motion = Self::with_springs(preset.ranges(config), spring);
        motion.max_step = config.max_frame_step().as_secs_f64();
        motion
    }

    pub fn with_max_step(mut self, seconds: f64) -> Self {
        self.max_step = seconds;
        self
    }

    pub fn ranges(&self) -> &MotionRanges {
        &self.ranges
    }

    pub fn spring(&self) -> Option<ChannelSprings> {
        self.spring
    }

    pub fn state(&self) -> &SmoothingState {
        &self.state
    }

    /// Evaluate one frame
    ///
    /// `dt` is the time since the previous frame in seconds. Steps longer
    /// than the cap are shortened before reaching the spring.
    pub fn sample(&mut self, progress: f64, dt: f64) -> Result<MotionSnapshot> {
        if !(dt.is_finite() && dt >= 0.0) {
            return Err(Error::invalid(format!("frame step must be non-negative, got {}", dt)));
        }
        let target = compute_raw_snapshot(progress, &self.ranges)?;

        let Some(springs) = self.spring else {
            self.last_target = Some(target);
            return Ok(target);
        };

        let step = if dt > self.max_step {
            tracing::trace!("Capping frame step {:.3}s to {:.3}s", dt, self.max_step);
            self.max_step
        } else {
            dt
        };

        let (smoothed, state) = apply_channel_smoothing(target, &self.state, &springs, step)?;
        self.state = state;
        self.last_target = Some(target);
        Ok(smoothed)
    }

    /// Whether another frame would still move the element
    pub fn needs_update(&self, tolerance: f64) -> bool {
        match (self.spring, self.last_target) {
            (Some(_), Some(target)) => !self.state.is_settled(&target, tolerance),
            _ => false,
        }
    }

    /// Drop smoothing state; the next sample reseeds from its target
    pub fn reset(&mut self) {
        tracing::debug!("Resetting section motion state");
        self.state = SmoothingState::Uninitialized;
        self.last_target = None;
    }
}
