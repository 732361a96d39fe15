use anyhow::Result;

use scrollmotion_core::theme::{FileThemeStore, ShadowSize};
use scrollmotion_core::{AppConfig, ThemeMode, ThemeState};

fn load_state(config: &AppConfig) -> Result<ThemeState<FileThemeStore>> {
    let store = FileThemeStore::new(config.theme_path());
    Ok(ThemeState::from_config(store, &config.theme)?)
}

pub fn show(config: &AppConfig) -> Result<()> {
    let state = load_state(config)?;
    let palette = state.palette();

    println!("Theme: {}", state.mode());
    if let Some(forced) = config.theme.mode.forced_mode() {
        println!("  (forced to {} by config)", forced);
    }
    println!("  text:       {}", palette.text);
    println!("  muted:      {}", palette.muted);
    println!("  background: {}", palette.background);
    println!("  accent:     {}", palette.accent);
    println!("  border:     {}", palette.border);
    println!("  shadow md:  {}", palette.box_shadow(ShadowSize::Md));
    println!("  transition: {}ms", config.theme.transition_ms);

    Ok(())
}

pub fn toggle(config: &AppConfig) -> Result<()> {
    let mut state = load_state(config)?;
    let mode = state.toggle()?;
    println!("Theme set to {}.", mode);
    warn_if_forced(config);
    Ok(())
}

pub fn set(config: &AppConfig, mode: ThemeMode) -> Result<()> {
    let mut state = load_state(config)?;
    state.set(mode)?;
    println!("Theme set to {}.", mode);
    warn_if_forced(config);
    Ok(())
}

fn warn_if_forced(config: &AppConfig) {
    if let Some(forced) = config.theme.mode.forced_mode() {
        println!(
            "Note: config forces {}; set theme.mode = \"system\" to use the saved choice.",
            forced
        );
    }
}
