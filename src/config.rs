// config.rs - Command Line and Settings File
//
// The CLI picks an optional auto-start duration, a settings file and the log
// verbosity. The settings file is read once at startup and never written; its
// fields go through the same validation as the settings view.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use log::{info, warn};

use crate::settings::{OverlaySettings, SettingsApplier, SettingsForm};

/// CLI argument parsing structure
#[derive(Parser, Debug, Default)]
#[command(name = "focus-overlay")]
#[command(about = "A countdown timer shown as an always-on-top, click-through overlay")]
#[command(version)]
pub struct Cli {
    /// Start a countdown of this many minutes right away
    #[arg(short, long)]
    pub minutes: Option<i64>,

    /// Settings file to read instead of the default location
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    /// Get the appropriate log level based on verbose flag
    pub fn log_level(&self) -> &'static str {
        if self.verbose { "debug" } else { "info" }
    }

    /// The explicit `--config` path, or the per-user default
    pub fn settings_path(&self) -> Option<PathBuf> {
        self.config.clone().or_else(default_settings_path)
    }
}

/// `<config_dir>/FocusOverlay/settings.json`
pub fn default_settings_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("FocusOverlay").join("settings.json"))
}

/// Read a settings form from a JSON file. Missing fields take defaults.
pub fn read_settings_form(path: &Path) -> Result<SettingsForm> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("Failed to read settings file {}", path.display()))?;
    let partial: serde_json::Value = serde_json::from_str(&contents)
        .with_context(|| format!("Failed to parse settings file {}", path.display()))?;

    // Absent keys keep the factory value rather than an empty string
    let mut merged = serde_json::to_value(SettingsForm::defaults())
        .context("Failed to serialize default settings")?;
    if let (Some(target), Some(source)) = (merged.as_object_mut(), partial.as_object()) {
        for (key, value) in source {
            target.insert(key.clone(), value.clone());
        }
    }
    serde_json::from_value(merged)
        .with_context(|| format!("Settings file {} has the wrong shape", path.display()))
}

/// Settings for this run: the file at `path` if it is readable, else defaults
pub fn load_settings(path: Option<&Path>) -> OverlaySettings {
    let defaults = OverlaySettings::default();
    let Some(path) = path else {
        return defaults;
    };
    if !path.exists() {
        info!("No settings file at {}, using defaults", path.display());
        return defaults;
    }

    match read_settings_form(path) {
        Ok(form) => {
            let applied = SettingsApplier.apply(&defaults, &form);
            info!(
                "Settings loaded from {} ({} field(s) ignored)",
                path.display(),
                applied.rejected.len()
            );
            applied.settings
        }
        Err(e) => {
            warn!("{:#}, using defaults", e);
            defaults
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::Anchor;
    use crate::settings::Color;

    fn temp_file(name: &str, contents: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!(
            "focus-overlay-{}-{}.json",
            std::process::id(),
            name
        ));
        fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn verbose_switches_log_level() {
        let cli = Cli::parse_from(["focus-overlay", "--verbose", "--minutes", "25"]);
        assert_eq!(cli.log_level(), "debug");
        assert_eq!(cli.minutes, Some(25));
        assert_eq!(Cli::parse_from(["focus-overlay"]).log_level(), "info");
    }

    #[test]
    fn explicit_config_wins() {
        let cli = Cli::parse_from(["focus-overlay", "-c", "/tmp/custom.json"]);
        assert_eq!(cli.settings_path(), Some(PathBuf::from("/tmp/custom.json")));
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let path = temp_file("partial", r#"{ "font_size": "48", "anchor": "top-right" }"#);
        let settings = load_settings(Some(&path));
        fs::remove_file(&path).ok();

        assert_eq!(settings.font_size, 48.0);
        assert_eq!(settings.anchor, Anchor::TopRight);
        assert_eq!(settings.background, OverlaySettings::default().background);
    }

    #[test]
    fn invalid_fields_are_ignored() {
        let path = temp_file(
            "invalid",
            r##"{ "background": "#nothex", "text_color": "#FF00FF00", "font_size": "-5" }"##,
        );
        let settings = load_settings(Some(&path));
        fs::remove_file(&path).ok();

        assert_eq!(settings.text_color, Color::from_argb(0xFF00FF00));
        assert_eq!(settings.background, OverlaySettings::default().background);
        assert_eq!(settings.font_size, 100.0);
    }

    #[test]
    fn broken_or_missing_file_falls_back() {
        let path = temp_file("broken", "{ not json");
        assert_eq!(load_settings(Some(&path)), OverlaySettings::default());
        assert!(read_settings_form(&path).is_err());
        fs::remove_file(&path).ok();

        let missing = std::env::temp_dir().join("focus-overlay-does-not-exist.json");
        assert_eq!(load_settings(Some(&missing)), OverlaySettings::default());
        assert_eq!(load_settings(None), OverlaySettings::default());
    }
}
