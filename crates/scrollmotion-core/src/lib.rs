pub mod config;
pub mod error;
pub mod motion;
pub mod theme;

pub use config::{AppConfig, MotionConfig, ThemeConfig};
pub use error::{Error, Result};
pub use motion::{
    apply_channel_smoothing, apply_smoothing, compute_raw_snapshot, map_section_progress,
    ChannelSprings, Curve, EasingType, Keyframes, MotionRange, MotionRanges, MotionSnapshot,
    Preset, SectionLayout, SectionMotion, SmoothingState, SpringParams,
};
pub use theme::{ThemeMode, ThemePalette, ThemeState, ThemeStore};
