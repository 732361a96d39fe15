use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::motion::{MotionRange, SpringParams};
use crate::theme::ThemeMode;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub motion: MotionConfig,
    #[serde(default)]
    pub theme: ThemeConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Data directory path (theme preference lives here)
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
    /// Log level
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            log_level: default_log_level(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MotionConfig {
    /// Section height in pixels when the host cannot report one
    #[serde(default = "default_viewport_height")]
    pub viewport_height: f64,
    /// Scroll offset at which the first section starts animating
    #[serde(default)]
    pub trigger_offset: f64,
    /// Fixed header height added to section navigation offsets
    #[serde(default)]
    pub header_height: f64,
    /// Skip springs and collapse timed transitions
    #[serde(default)]
    pub reduced_motion: bool,
    /// Largest frame step fed to a spring, in milliseconds
    #[serde(default = "default_max_frame_ms")]
    pub max_frame_ms: u64,
    /// Frame rate for driven playback
    #[serde(default = "default_animation_fps")]
    pub animation_fps: u32,
    /// Spring used by scroll-linked sections
    #[serde(default)]
    pub spring: SpringParams,
    /// Channel endpoints for stacked depth sections
    #[serde(default)]
    pub stacked: StackedConfig,
}

impl Default for MotionConfig {
    fn default() -> Self {
        Self {
            viewport_height: default_viewport_height(),
            trigger_offset: 0.0,
            header_height: 0.0,
            reduced_motion: false,
            max_frame_ms: default_max_frame_ms(),
            animation_fps: default_animation_fps(),
            spring: SpringParams::default(),
            stacked: StackedConfig::default(),
        }
    }
}

impl MotionConfig {
    pub fn max_frame_step(&self) -> Duration {
        Duration::from_millis(self.max_frame_ms)
    }
}

/// `[start, end]` output pairs over a section's progress
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StackedConfig {
    #[serde(default = "default_stacked_scale")]
    pub scale: [f64; 2],
    #[serde(default = "default_stacked_rotate_x")]
    pub rotate_x: [f64; 2],
    #[serde(default = "default_stacked_translate_z")]
    pub translate_z: [f64; 2],
    #[serde(default = "default_stacked_opacity")]
    pub opacity: [f64; 2],
}

impl Default for StackedConfig {
    fn default() -> Self {
        Self {
            scale: default_stacked_scale(),
            rotate_x: default_stacked_rotate_x(),
            translate_z: default_stacked_translate_z(),
            opacity: default_stacked_opacity(),
        }
    }
}

impl StackedConfig {
    pub fn scale_range(&self) -> MotionRange {
        MotionRange::unit(self.scale[0], self.scale[1])
    }

    pub fn rotate_x_range(&self) -> MotionRange {
        MotionRange::unit(self.rotate_x[0], self.rotate_x[1])
    }

    pub fn translate_z_range(&self) -> MotionRange {
        MotionRange::unit(self.translate_z[0], self.translate_z[1])
    }

    pub fn opacity_range(&self) -> MotionRange {
        MotionRange::unit(self.opacity[0], self.opacity[1])
    }
}

/// Theme preference source
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemePreference {
    Light,
    Dark,
    /// Use the stored choice, else the system setting
    #[default]
    System,
}

impl ThemePreference {
    pub fn forced_mode(&self) -> Option<ThemeMode> {
        match self {
            ThemePreference::Light => Some(ThemeMode::Light),
            ThemePreference::Dark => Some(ThemeMode::Dark),
            ThemePreference::System => None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ThemeConfig {
    #[serde(default)]
    pub mode: ThemePreference,
    /// What the host reports for `prefers-color-scheme`
    #[serde(default)]
    pub system_prefers_dark: bool,
    /// Color transition duration in milliseconds
    #[serde(default = "default_transition_ms")]
    pub transition_ms: u64,
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            mode: ThemePreference::default(),
            system_prefers_dark: false,
            transition_ms: default_transition_ms(),
        }
    }
}

fn default_data_dir() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("scrollmotion")
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_viewport_height() -> f64 {
    1080.0
}

fn default_max_frame_ms() -> u64 {
    100
}

/// Highest playback rate that still yields a whole-millisecond tick
const MAX_ANIMATION_FPS: u32 = 1000;

fn default_animation_fps() -> u32 {
    60
}

fn default_stacked_scale() -> [f64; 2] {
    [1.0, 0.92]
}

fn default_stacked_rotate_x() -> [f64; 2] {
    [0.0, -8.0] // degrees, tilted back
}

fn default_stacked_translate_z() -> [f64; 2] {
    [0.0, -80.0]
}

fn default_stacked_opacity() -> [f64; 2] {
    [1.0, 0.4]
}

fn default_transition_ms() -> u64 {
    300
}

/// Expand tilde (~) in path to user's home directory
fn expand_tilde(path: &Path) -> PathBuf {
    if let Some(path_str) = path.to_str() {
        if let Some(stripped) = path_str.strip_prefix("~/") {
            if let Some(home) = dirs::home_dir() {
                return home.join(stripped);
            }
        } else if path_str == "~" {
            if let Some(home) = dirs::home_dir() {
                return home;
            }
        }
    }
    path.to_path_buf()
}

impl AppConfig {
    /// Load configuration from the default path or return defaults
    pub fn load() -> crate::Result<Self> {
        Self::load_from(&Self::config_path())
    }

    /// Load configuration from `path`, falling back to defaults if missing
    pub fn load_from(path: &Path) -> crate::Result<Self> {
        if path.exists() {
            tracing::debug!("Loading config from {}", path.display());
            let content = std::fs::read_to_string(path)?;
            Self::from_toml(&content)
        } else {
            tracing::debug!("No config at {}, using defaults", path.display());
            Ok(Self::default())
        }
    }

    pub fn from_toml(content: &str) -> crate::Result<Self> {
        let config: Self =
            toml::from_str(content).map_err(|e| crate::Error::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values the motion system cannot run with
    pub fn validate(&self) -> crate::Result<()> {
        let motion = &self.motion;
        if !(motion.viewport_height.is_finite() && motion.viewport_height > 0.0) {
            return Err(crate::Error::Config(format!(
                "motion.viewport_height must be positive, got {}",
                motion.viewport_height
            )));
        }
        if motion.max_frame_ms == 0 {
            return Err(crate::Error::Config(
                "motion.max_frame_ms must be at least 1".to_string(),
            ));
        }
        if !(1..=MAX_ANIMATION_FPS).contains(&motion.animation_fps) {
            return Err(crate::Error::Config(format!(
                "motion.animation_fps must be between 1 and {}, got {}",
                MAX_ANIMATION_FPS, motion.animation_fps
            )));
        }
        motion
            .spring
            .validate()
            .map_err(|e| crate::Error::Config(format!("motion.spring: {}", e)))?;
        for range in [
            motion.stacked.scale_range(),
            motion.stacked.rotate_x_range(),
            motion.stacked.translate_z_range(),
            motion.stacked.opacity_range(),
        ] {
            range
                .validate()
                .map_err(|e| crate::Error::Config(format!("motion.stacked: {}", e)))?;
        }
        Ok(())
    }

    /// Save configuration to the default path
    pub fn save(&self) -> crate::Result<()> {
        self.save_to(&Self::config_path())
    }

    pub fn save_to(&self, path: &Path) -> crate::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)
            .map_err(|e| crate::Error::Config(e.to_string()))?;
        std::fs::write(path, content)?;
        tracing::info!("Wrote config to {}", path.display());

        Ok(())
    }

    /// Get the configuration file path
    /// Always uses ~/.config/scrollmotion/config.toml on all platforms
    pub fn config_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".config")
            .join("scrollmotion")
            .join("config.toml")
    }

    /// Get the persisted theme file path
    pub fn theme_path(&self) -> PathBuf {
        self.data_dir().join("theme")
    }

    /// Get the data directory (with tilde expansion)
    pub fn data_dir(&self) -> PathBuf {
        expand_tilde(&self.general.data_dir)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.motion.viewport_height, 1080.0);
        assert_eq!(config.motion.spring, SpringParams::SECTION);
        assert_eq!(config.motion.stacked.scale, [1.0, 0.92]);
        assert_eq!(config.motion.animation_fps, 60);
        assert_eq!(config.theme.mode, ThemePreference::System);
        assert_eq!(config.theme.transition_ms, 300);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = AppConfig::from_toml(
            r#"
            [motion]
            viewport_height = 800.0
            reduced_motion = true

            [motion.spring]
            stiffness = 200.0
            damping = 20.0

            [theme]
            mode = "dark"
            "#,
        )
        .unwrap();
        assert_eq!(config.motion.viewport_height, 800.0);
        assert!(config.motion.reduced_motion);
        assert_eq!(config.motion.spring, SpringParams::HOVER);
        assert_eq!(config.motion.max_frame_ms, 100);
        assert_eq!(config.motion.stacked.opacity, [1.0, 0.4]);
        assert_eq!(config.theme.mode.forced_mode(), Some(ThemeMode::Dark));
        assert_eq!(config.general.log_level, "info");
    }

    #[test]
    fn test_rejects_bad_values() {
        let err = AppConfig::from_toml("[motion]\nviewport_height = 0.0\n").unwrap_err();
        assert!(matches!(err, crate::Error::Config(_)));

        let err = AppConfig::from_toml("[motion.spring]\nstiffness = -1.0\ndamping = 1.0\n")
            .unwrap_err();
        assert!(matches!(err, crate::Error::Config(_)));

        assert!(AppConfig::from_toml("[motion\n").is_err());
    }

    #[test]
    fn test_rejects_zero_frame_step() {
        let err = AppConfig::from_toml("[motion]\nmax_frame_ms = 0\n").unwrap_err();
        assert!(matches!(err, crate::Error::Config(msg) if msg.contains("max_frame_ms")));
        assert!(AppConfig::from_toml("[motion]\nmax_frame_ms = 1\n").is_ok());
    }

    #[test]
    fn test_rejects_out_of_range_fps() {
        for fps in [0, 1001, u32::MAX] {
            let err = AppConfig::from_toml(&format!("[motion]\nanimation_fps = {}\n", fps))
                .unwrap_err();
            assert!(matches!(err, crate::Error::Config(msg) if msg.contains("animation_fps")));
        }
        let config = AppConfig::from_toml("[motion]\nanimation_fps = 1000\n").unwrap();
        assert_eq!(config.motion.animation_fps, 1000);
    }

    #[test]
    fn test_round_trip_through_file() {
        let path = std::env::temp_dir()
            .join(format!("scrollmotion-config-{}", std::process::id()))
            .join("config.toml");
        let mut config = AppConfig::default();
        config.motion.header_height = 72.0;
        config.save_to(&path).unwrap();

        let loaded = AppConfig::load_from(&path).unwrap();
        assert_eq!(loaded.motion.header_height, 72.0);

        let _ = std::fs::remove_dir_all(path.parent().unwrap());
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let path = std::env::temp_dir().join("scrollmotion-does-not-exist/config.toml");
        let config = AppConfig::load_from(&path).unwrap();
        assert_eq!(config.motion.viewport_height, 1080.0);
    }

    #[test]
    fn test_expand_tilde_passthrough() {
        let p = PathBuf::from("/tmp/scrollmotion");
        assert_eq!(expand_tilde(&p), p);
    }
}
