//! Program settings.
//!
//! Every program starts from its own [`Settings`] and lets an optional JSON
//! file override any subset of the fields.

use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::{Deserialize, Serialize};

/// Name of the settings file looked up in the working directory.
pub const SETTINGS_FILE: &str = "gl-tutorials.json";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    pub title: String,
    pub width: u32,
    pub height: u32,
    pub fullscreen: bool,
    pub vsync: bool,
    pub asset_root: PathBuf,
    pub mouse_sensitivity: f32,
    pub move_speed: f32,
    pub zoom_sensitivity: f32,
    pub log_level: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            title: "Introduction to Modern OpenGL".to_owned(),
            width: 800,
            height: 600,
            fullscreen: false,
            vsync: false,
            asset_root: PathBuf::from("."),
            mouse_sensitivity: 0.1,
            move_speed: 5.0,
            zoom_sensitivity: -3.0,
            log_level: "info".to_owned(),
        }
    }
}

/// The subset of [`Settings`] a file may override.
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SettingsOverrides {
    pub title: Option<String>,
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub fullscreen: Option<bool>,
    pub vsync: Option<bool>,
    pub asset_root: Option<PathBuf>,
    pub mouse_sensitivity: Option<f32>,
    pub move_speed: Option<f32>,
    pub zoom_sensitivity: Option<f32>,
    pub log_level: Option<String>,
}

impl Settings {
    /// Per-program defaults with the given window title and size.
    pub fn new(title: &str, width: u32, height: u32) -> Self {
        Self {
            title: title.to_owned(),
            width,
            height,
            ..Self::default()
        }
    }

    /// Applies the first settings file found, if any.
    pub fn load(self) -> anyhow::Result<Self> {
        match settings_path() {
            Some(path) => self.load_from(&path),
            None => Ok(self),
        }
    }

    /// Applies the overrides stored in `path`.
    pub fn load_from(self, path: &Path) -> anyhow::Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read settings {}", path.display()))?;
        let overrides: SettingsOverrides = serde_json::from_str(&text)
            .with_context(|| format!("invalid settings in {}", path.display()))?;
        Ok(self.apply(overrides))
    }

    pub fn apply(mut self, overrides: SettingsOverrides) -> Self {
        if let Some(title) = overrides.title {
            self.title = title;
        }
        if let Some(width) = overrides.width {
            self.width = width;
        }
        if let Some(height) = overrides.height {
            self.height = height;
        }
        if let Some(fullscreen) = overrides.fullscreen {
            self.fullscreen = fullscreen;
        }
        if let Some(vsync) = overrides.vsync {
            self.vsync = vsync;
        }
        if let Some(asset_root) = overrides.asset_root {
            self.asset_root = asset_root;
        }
        if let Some(sensitivity) = overrides.mouse_sensitivity {
            self.mouse_sensitivity = sensitivity;
        }
        if let Some(speed) = overrides.move_speed {
            self.move_speed = speed;
        }
        if let Some(sensitivity) = overrides.zoom_sensitivity {
            self.zoom_sensitivity = sensitivity;
        }
        if let Some(level) = overrides.log_level {
            self.log_level = level;
        }
        self
    }

    pub fn fly_controller(&self) -> crate::camera::FlyController {
        crate::camera::FlyController {
            move_speed: self.move_speed,
            mouse_sensitivity: self.mouse_sensitivity,
            zoom_sensitivity: self.zoom_sensitivity,
        }
    }

    pub fn assets(&self) -> crate::assets::Assets {
        crate::assets::Assets::new(&self.asset_root)
    }
}

/// The working directory file wins over the per-user config directory.
fn settings_path() -> Option<PathBuf> {
    let local = PathBuf::from(SETTINGS_FILE);
    if local.is_file() {
        return Some(local);
    }
    let user = dirs::config_dir()?.join("gl-tutorials").join("settings.json");
    user.is_file().then_some(user)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_overrides_keep_program_defaults() {
        let base = Settings::new("Hello Texture", 400, 300);
        let overrides: SettingsOverrides =
            serde_json::from_str(r#"{ "vsync": true, "asset_root": "assets" }"#).unwrap();
        let settings = base.apply(overrides);

        assert_eq!(settings.title, "Hello Texture");
        assert_eq!((settings.width, settings.height), (400, 300));
        assert!(settings.vsync);
        assert_eq!(settings.asset_root, PathBuf::from("assets"));
        assert_eq!(settings.move_speed, 5.0);
    }

    #[test]
    fn unknown_fields_are_rejected() {
        let result = serde_json::from_str::<SettingsOverrides>(r#"{ "widht": 10 }"#);
        assert!(result.is_err());
    }

    #[test]
    fn load_from_missing_file_fails_with_path() {
        let err = Settings::default()
            .load_from(Path::new("/no/such/settings.json"))
            .unwrap_err();
        assert!(format!("{err:#}").contains("/no/such/settings.json"));
    }

    #[test]
    fn controller_uses_settings() {
        let settings = Settings {
            move_speed: 2.0,
            ..Settings::default()
        };
        let controller = settings.fly_controller();
        assert_eq!(controller.move_speed, 2.0);
        assert_eq!(controller.zoom_sensitivity, -3.0);
    }
}
