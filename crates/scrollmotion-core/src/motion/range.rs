//! Atomic: channel curves
//!
//! A curve maps a scroll progress value to one output channel. Outputs are
//! always clamped to the span of the declared output values, no matter how
//! far the input overshoots.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Two-point linear mapping `[input_low, input_high] -> [output_low, output_high]`
///
/// The input bounds must be ordered (`input_low <= input_high`). The output
/// bounds may run in either direction.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MotionRange {
    pub input_low: f64,
    pub input_high: f64,
    pub output_low: f64,
    pub output_high: f64,
}

impl MotionRange {
    /// Build a validated range
    pub fn new(input_low: f64, input_high: f64, output_low: f64, output_high: f64) -> Result<Self> {
        let range = Self {
            input_low,
            input_high,
            output_low,
            output_high,
        };
        range.validate()?;
        Ok(range)
    }

    /// Range over the unit progress interval `[0, 1]`
    pub fn unit(output_low: f64, output_high: f64) -> Self {
        Self {
            input_low: 0.0,
            input_high: 1.0,
            output_low,
            output_high,
        }
    }

    pub fn validate(&self) -> Result<()> {
        let bounds = [self.input_low, self.input_high, self.output_low, self.output_high];
        if bounds.iter().any(|b| !b.is_finite()) {
            return Err(Error::invalid(format!("motion range bounds must be finite: {:?}", self)));
        }
        if self.input_low > self.input_high {
            return Err(Error::invalid(format!(
                "motion range input bounds out of order: {} > {}",
                self.input_low, self.input_high
            )));
        }
        Ok(())
    }

    /// Interpolation factor for `progress`, clamped to [0, 1]
    ///
    /// A degenerate range (`input_low == input_high`) resolves to 0 at or
    /// below the bound and 1 above it.
    #[inline]
    pub fn factor(&self, progress: f64) -> f64 {
        let span = self.input_high - self.input_low;
        if span == 0.0 {
            return if progress <= self.input_low { 0.0 } else { 1.0 };
        }
        ((progress - self.input_low) / span).clamp(0.0, 1.0)
    }

    /// Map `progress` to the output interval without validating
    #[inline]
    pub fn map(&self, progress: f64) -> f64 {
        let t = self.factor(progress);
        // Weighted form reproduces both endpoints exactly
        let value = self.output_low * (1.0 - t) + self.output_high * t;
        let (lo, hi) = self.output_span();
        value.clamp(lo, hi)
    }

    /// Output bounds ordered as `(min, max)`
    #[inline]
    pub fn output_span(&self) -> (f64, f64) {
        if self.output_low <= self.output_high {
            (self.output_low, self.output_high)
        } else {
            (self.output_high, self.output_low)
        }
    }
}

/// Piecewise-linear curve through ordered breakpoints
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Keyframes {
    input: Vec<f64>,
    output: Vec<f64>,
}

impl Keyframes {
    pub fn new(input: Vec<f64>, output: Vec<f64>) -> Result<Self> {
        let keyframes = Self { input, output };
        keyframes.validate()?;
        Ok(keyframes)
    }

    /// Built-in stops known to be well formed
    pub(crate) fn from_stops(input: Vec<f64>, output: Vec<f64>) -> Self {
        debug_assert!(Self::new(input.clone(), output.clone()).is_ok());
        Self { input, output }
    }

    pub fn input(&self) -> &[f64] {
        &self.input
    }

    pub fn output(&self) -> &[f64] {
        &self.output
    }

    pub fn validate(&self) -> Result<()> {
        if self.input.len() != self.output.len() {
            return Err(Error::invalid(format!(
                "keyframes need matching stops: {} inputs, {} outputs",
                self.input.len(),
                self.output.len()
            )));
        }
        if self.input.len() < 2 {
            return Err(Error::invalid("keyframes need at least two stops"));
        }
        if self.input.iter().chain(&self.output).any(|v| !v.is_finite()) {
            return Err(Error::invalid("keyframe stops must be finite"));
        }
        if self.input.windows(2).any(|w| w[0] > w[1]) {
            return Err(Error::invalid(format!(
                "keyframe inputs must be non-decreasing: {:?}",
                self.input
            )));
        }
        Ok(())
    }

    /// Segment `i` as a two-point range
    fn segment(&self, i: usize) -> MotionRange {
        MotionRange {
            input_low: self.input[i],
            input_high: self.input[i + 1],
            output_low: self.output[i],
            output_high: self.output[i + 1],
        }
    }

    /// Map `progress` through the breakpoints without validating
    ///
    /// Unvalidated stops never panic: fewer than two usable stops hold the
    /// first output (or 0 when there is none).
    pub fn map(&self, progress: f64) -> f64 {
        let stops = self.input.len().min(self.output.len());
        if stops < 2 {
            return self.output.first().copied().unwrap_or(0.0);
        }
        let last = stops - 1;
        if progress <= self.input[0] {
            return self.output[0];
        }
        if progress > self.input[last] {
            return self.output[last];
        }
        let i = (0..last)
            .find(|&i| progress <= self.input[i + 1])
            .unwrap_or(last - 1);
        self.segment(i).map(progress)
    }
}

/// Curve driving a single channel
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Curve {
    /// Fixed value regardless of progress
    Constant(f64),
    Range(MotionRange),
    Keyframes(Keyframes),
}

impl Curve {
    pub fn validate(&self) -> Result<()> {
        match self {
            Curve::Constant(v) if !v.is_finite() => {
                Err(Error::invalid(format!("constant channel must be finite: {}", v)))
            }
            Curve::Constant(_) => Ok(()),
            Curve::Range(range) => range.validate(),
            Curve::Keyframes(keyframes) => keyframes.validate(),
        }
    }

    /// Evaluate without validating; callers validate once up front
    #[inline]
    pub fn map(&self, progress: f64) -> f64 {
        match self {
            Curve::Constant(v) => *v,
            Curve::Range(range) => range.map(progress),
            Curve::Keyframes(keyframes) => keyframes.map(progress),
        }
    }
}

impl From<MotionRange> for Curve {
    fn from(range: MotionRange) -> Self {
        Curve::Range(range)
    }
}

impl From<Keyframes> for Curve {
    fn from(keyframes: Keyframes) -> Self {
        Curve::Keyframes(keyframes)
    }
}
