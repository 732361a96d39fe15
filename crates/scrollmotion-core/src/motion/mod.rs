//! Scroll-driven motion system
//!
//! Maps scroll position to bounded visual transforms (scale, tilt, depth,
//! opacity, vertical offset) with optional spring smoothing.
//!
//! # Layers
//!
//! ## Atomic
//! - `range` - Linear and keyframed channel curves
//! - `easing` - Easing curves for timed transitions
//! - `timing` - Progress and interpolation helpers
//!
//! ## Molecular
//! - `snapshot` - Per-channel evaluation into a `MotionSnapshot`
//! - `spring` - Spring smoothing step
//! - `section` - Section geometry and the per-section mapper
//! - `entrance` - Timed entrance transitions and stagger
//! - `presets` - The site's named scroll effects
//!
//! # Usage
//!
//! ```ignore
//! use scrollmotion_core::motion::{SectionLayout, SectionMotion, Preset};
//! use scrollmotion_core::MotionConfig;
//!
//! let config = MotionConfig::default();
//! let layout = SectionLayout::from_config(&config)?;
//! let mut section = SectionMotion::from_preset(&Preset::StackedDepth, &config);
//!
//! // Once per animation frame
//! let progress = layout.progress(scroll_y, 2)?;
//! let snapshot = section.sample(progress, frame_dt)?;
//! ```

// Atomic
pub mod easing;
pub mod range;
pub mod timing;

// Molecular
pub mod entrance;
pub mod presets;
pub mod section;
pub mod snapshot;
pub mod spring;

pub use easing::{CubicBezier, EasingType};
pub use entrance::{Hover, Stagger, Transition};
pub use presets::Preset;
pub use range::{Curve, Keyframes, MotionRange};
pub use section::{map_section_progress, SectionLayout, SectionMotion};
pub use snapshot::{compute_raw_snapshot, Channel, MotionRanges, MotionSnapshot};
pub use spring::{apply_channel_smoothing, apply_smoothing, ChannelSprings, SmoothingState, SpringParams};
