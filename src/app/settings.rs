use serde::{Deserialize, Serialize};

use crate::units::GridRatio;

#[derive(Clone, Serialize, Deserialize)]
#[serde(default)]
pub(super) struct AppSettings {
    pub image_dpi: f32,
    pub ui_scale_factor: f32,
    pub grid: GridRatio,
    pub ruler_width: f32,
    pub last_map_path: Option<String>,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            image_dpi: 100.0,
            ui_scale_factor: 1.0,
            grid: GridRatio::default(),
            ruler_width: 5.0,
            last_map_path: None,
        }
    }
}

pub(super) fn load_settings(path: &str) -> Option<AppSettings> {
    let s = std::fs::read_to_string(path).ok()?;
    if path.ends_with(".toml") {
        toml::from_str::<AppSettings>(&s)
            .ok()
            .or_else(|| serde_json::from_str::<AppSettings>(&s).ok())
    } else {
        serde_json::from_str::<AppSettings>(&s)
            .ok()
            .or_else(|| toml::from_str::<AppSettings>(&s).ok())
    }
}

pub(super) fn save_settings(path: &str, settings: &AppSettings) -> Result<(), String> {
    if path.ends_with(".toml") {
        let toml = toml::to_string_pretty(settings).map_err(|e| e.to_string())?;
        std::fs::write(path, toml).map_err(|e| e.to_string())
    } else {
        let json = serde_json::to_string_pretty(settings).map_err(|e| e.to_string())?;
        std::fs::write(path, json).map_err(|e| e.to_string())
    }
}
