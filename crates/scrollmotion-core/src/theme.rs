//! Light/dark theme state
//!
//! The active mode lives in a `ThemeState` the host owns and passes down;
//! persistence goes through an injected `ThemeStore`.

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::sync::Mutex;

use serde::{Deserialize, Serialize};

use crate::config::ThemeConfig;
use crate::error::{Error, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeMode {
    #[default]
    Light,
    Dark,
}

impl ThemeMode {
    pub fn toggled(self) -> Self {
        match self {
            ThemeMode::Light => ThemeMode::Dark,
            ThemeMode::Dark => ThemeMode::Light,
        }
    }

    pub fn is_dark(self) -> bool {
        self == ThemeMode::Dark
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ThemeMode::Light => "light",
            ThemeMode::Dark => "dark",
        }
    }
}

impl fmt::Display for ThemeMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ThemeMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "light" => Ok(ThemeMode::Light),
            "dark" => Ok(ThemeMode::Dark),
            other => Err(Error::invalid(format!(
                "unknown theme mode '{}' (expected light or dark)",
                other
            ))),
        }
    }
}

/// Where the chosen mode is persisted between sessions
pub trait ThemeStore: Send + Sync {
    fn load(&self) -> Result<Option<ThemeMode>>;
    fn save(&self, mode: ThemeMode) -> Result<()>;
}

/// In-process store, for hosts without persistent storage
#[derive(Debug, Default)]
pub struct MemoryThemeStore {
    mode: Mutex<Option<ThemeMode>>,
}

impl MemoryThemeStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_mode(mode: ThemeMode) -> Self {
        Self {
            mode: Mutex::new(Some(mode)),
        }
    }
}

impl ThemeStore for MemoryThemeStore {
    fn load(&self) -> Result<Option<ThemeMode>> {
        let mode = self
            .mode
            .lock()
            .map_err(|_| Error::Config("theme store lock poisoned".to_string()))?;
        Ok(*mode)
    }

    fn save(&self, mode: ThemeMode) -> Result<()> {
        let mut slot = self
            .mode
            .lock()
            .map_err(|_| Error::Config("theme store lock poisoned".to_string()))?;
        *slot = Some(mode);
        Ok(())
    }
}

/// Plain-text file holding `light` or `dark`
#[derive(Debug, Clone)]
pub struct FileThemeStore {
    path: PathBuf,
}

impl FileThemeStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ThemeStore for FileThemeStore {
    /// An empty file counts as no choice; anything but `dark` reads as light
    fn load(&self) -> Result<Option<ThemeMode>> {
        if !self.path.exists() {
            return Ok(None);
        }
        let content = std::fs::read_to_string(&self.path)?;
        let value = content.trim();
        if value.is_empty() {
            return Ok(None);
        }
        match value.parse() {
            Ok(mode) => Ok(Some(mode)),
            Err(e) => {
                tracing::warn!("Reading theme file {} as light: {}", self.path.display(), e);
                Ok(Some(ThemeMode::Light))
            }
        }
    }

    fn save(&self, mode: ThemeMode) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&self.path, mode.as_str())?;
        Ok(())
    }
}

/// Active theme plus the store it persists to
pub struct ThemeState<S: ThemeStore> {
    mode: ThemeMode,
    store: S,
}

impl<S: ThemeStore> ThemeState<S> {
    /// Stored choice first, then the system preference, then light
    pub fn resolve(store: S, system_prefers_dark: bool) -> Result<Self> {
        let mode = match store.load()? {
            Some(mode) => mode,
            None if system_prefers_dark => ThemeMode::Dark,
            None => ThemeMode::Light,
        };
        tracing::debug!("Resolved theme mode: {}", mode);
        Ok(Self { mode, store })
    }

    /// Resolve honoring a forced mode from configuration
    pub fn from_config(store: S, config: &ThemeConfig) -> Result<Self> {
        match config.mode.forced_mode() {
            Some(mode) => Ok(Self { mode, store }),
            None => Self::resolve(store, config.system_prefers_dark),
        }
    }

    pub fn mode(&self) -> ThemeMode {
        self.mode
    }

    pub fn is_dark(&self) -> bool {
        self.mode.is_dark()
    }

    pub fn palette(&self) -> ThemePalette {
        ThemePalette::for_mode(self.mode)
    }

    pub fn set(&mut self, mode: ThemeMode) -> Result<()> {
        self.store.save(mode)?;
        if mode != self.mode {
            tracing::info!("Theme changed: {} -> {}", self.mode, mode);
        }
        self.mode = mode;
        Ok(())
    }

    pub fn toggle(&mut self) -> Result<ThemeMode> {
        let next = self.mode.toggled();
        self.set(next)?;
        Ok(next)
    }

    pub fn store(&self) -> &S {
        &self.store
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShadowSize {
    Sm,
    Md,
    Lg,
    Xl,
}

impl FromStr for ShadowSize {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "sm" => Ok(ShadowSize::Sm),
            "md" => Ok(ShadowSize::Md),
            "lg" => Ok(ShadowSize::Lg),
            "xl" => Ok(ShadowSize::Xl),
            other => Err(Error::invalid(format!("unknown shadow size '{}'", other))),
        }
    }
}

/// Color tokens for one mode, as CSS color strings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ThemePalette {
    pub mode: ThemeMode,
    pub text: &'static str,
    pub muted: &'static str,
    pub background: &'static str,
    pub accent: &'static str,
    pub border: &'static str,
    pub shadow: &'static str,
}

impl ThemePalette {
    pub const LIGHT: ThemePalette = ThemePalette {
        mode: ThemeMode::Light,
        text: "#1a1a1a",
        muted: "#666666",
        background: "#ffffff",
        accent: "#f59e0b",
        border: "#e5e5e5",
        shadow: "rgba(0, 0, 0, 0.1)",
    };

    pub const DARK: ThemePalette = ThemePalette {
        mode: ThemeMode::Dark,
        text: "#ffffff",
        muted: "#b3b3cc",
        background: "#111111",
        accent: "#d97706",
        border: "#333333",
        shadow: "rgba(0, 0, 0, 0.3)",
    };

    pub fn for_mode(mode: ThemeMode) -> Self {
        match mode {
            ThemeMode::Light => Self::LIGHT,
            ThemeMode::Dark => Self::DARK,
        }
    }

    /// CSS box-shadow for `size`; dark mode uses heavier shadows
    pub fn box_shadow(&self, size: ShadowSize) -> &'static str {
        match (self.mode, size) {
            (ThemeMode::Dark, ShadowSize::Sm) => "0 1px 2px rgba(0, 0, 0, 0.3)",
            (ThemeMode::Dark, ShadowSize::Md) => "0 4px 6px rgba(0, 0, 0, 0.3)",
            (ThemeMode::Dark, ShadowSize::Lg) => "0 10px 15px rgba(0, 0, 0, 0.4)",
            (ThemeMode::Dark, ShadowSize::Xl) => "0 20px 25px rgba(0, 0, 0, 0.4)",
            (ThemeMode::Light, ShadowSize::Sm) => "0 1px 2px rgba(0, 0, 0, 0.05)",
            (ThemeMode::Light, ShadowSize::Md) => "0 4px 6px rgba(0, 0, 0, 0.1)",
            (ThemeMode::Light, ShadowSize::Lg) => "0 10px 15px rgba(0, 0, 0, 0.1)",
            (ThemeMode::Light, ShadowSize::Xl) => "0 20px 25px rgba(0, 0, 0, 0.1)",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ThemePreference;

    fn temp_theme_path(name: &str) -> PathBuf {
        std::env::temp_dir()
            .join(format!("scrollmotion-theme-{}-{}", name, std::process::id()))
            .join("theme")
    }

    #[test]
    fn test_parse_mode() {
        assert_eq!("Dark".parse::<ThemeMode>().unwrap(), ThemeMode::Dark);
        assert_eq!(" light\n".parse::<ThemeMode>().unwrap(), ThemeMode::Light);
        assert!("sepia".parse::<ThemeMode>().is_err());
    }

    #[test]
    fn test_resolution_priority() {
        let state = ThemeState::resolve(MemoryThemeStore::new(), false).unwrap();
        assert_eq!(state.mode(), ThemeMode::Light);

        let state = ThemeState::resolve(MemoryThemeStore::new(), true).unwrap();
        assert_eq!(state.mode(), ThemeMode::Dark);

        let stored = MemoryThemeStore::with_mode(ThemeMode::Light);
        let state = ThemeState::resolve(stored, true).unwrap();
        assert_eq!(state.mode(), ThemeMode::Light);
    }

    #[test]
    fn test_forced_mode_overrides_store() {
        let config = ThemeConfig {
            mode: ThemePreference::Dark,
            ..Default::default()
        };
        let stored = MemoryThemeStore::with_mode(ThemeMode::Light);
        let state = ThemeState::from_config(stored, &config).unwrap();
        assert!(state.is_dark());
    }

    #[test]
    fn test_toggle_persists() {
        let mut state = ThemeState::resolve(MemoryThemeStore::new(), false).unwrap();
        assert_eq!(state.toggle().unwrap(), ThemeMode::Dark);
        assert_eq!(state.store().load().unwrap(), Some(ThemeMode::Dark));
        assert_eq!(state.toggle().unwrap(), ThemeMode::Light);
        assert_eq!(state.palette(), ThemePalette::LIGHT);
    }

    #[test]
    fn test_file_store_round_trip() {
        let path = temp_theme_path("roundtrip");
        let store = FileThemeStore::new(&path);
        assert_eq!(store.load().unwrap(), None);

        store.save(ThemeMode::Dark).unwrap();
        let state = ThemeState::resolve(FileThemeStore::new(&path), false).unwrap();
        assert!(state.is_dark());

        let _ = std::fs::remove_dir_all(path.parent().unwrap());
    }

    #[test]
    fn test_file_store_unknown_value_is_light() {
        let path = temp_theme_path("garbage");
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(&path, "purple").unwrap();

        // A stored value wins over the system preference even when unreadable
        let state = ThemeState::resolve(FileThemeStore::new(&path), true).unwrap();
        assert_eq!(state.mode(), ThemeMode::Light);

        std::fs::write(&path, "DARK\n").unwrap();
        assert_eq!(FileThemeStore::new(&path).load().unwrap(), Some(ThemeMode::Dark));

        let _ = std::fs::remove_dir_all(path.parent().unwrap());
    }

    #[test]
    fn test_file_store_empty_defers_to_system() {
        let path = temp_theme_path("empty");
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(&path, "  \n").unwrap();

        let state = ThemeState::resolve(FileThemeStore::new(&path), true).unwrap();
        assert!(state.is_dark());

        let _ = std::fs::remove_dir_all(path.parent().unwrap());
    }

    #[test]
    fn test_palette_shadows() {
        let dark = ThemePalette::for_mode(ThemeMode::Dark);
        assert_eq!(dark.background, "#111111");
        assert_eq!(dark.box_shadow(ShadowSize::Lg), "0 10px 15px rgba(0, 0, 0, 0.4)");
        assert_eq!(
            ThemePalette::LIGHT.box_shadow("md".parse().unwrap()),
            "0 4px 6px rgba(0, 0, 0, 0.1)"
        );
    }
}
