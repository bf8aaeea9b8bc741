use eframe::egui;
use serde::{Deserialize, Serialize};

/// Real-world feet represented by a span of inches on the printed map.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct GridRatio {
    pub map_inches: f32,
    pub feet: f32,
}

impl Default for GridRatio {
    fn default() -> Self {
        // 1" of map is one 5 ft grid square.
        Self {
            map_inches: 1.0,
            feet: 5.0,
        }
    }
}

impl GridRatio {
    pub fn feet_per_inch(&self) -> f32 {
        self.feet / self.map_inches
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScaleParams {
    pub display_dpi: f32,
    pub ui_scale_factor: f32,
    pub image_dpi: f32,
    pub grid: GridRatio,
}

impl Default for ScaleParams {
    fn default() -> Self {
        Self {
            display_dpi: 96.0,
            ui_scale_factor: 1.0,
            image_dpi: 100.0,
            grid: GridRatio::default(),
        }
    }
}

impl ScaleParams {
    pub fn effective_dpi(&self) -> f32 {
        self.display_dpi * self.ui_scale_factor
    }

    /// Factor a source image is stretched by so its assumed native DPI
    /// matches the display.
    pub fn map_resize_factor(&self) -> f32 {
        self.display_dpi / self.image_dpi
    }
}

pub fn distance(a: egui::Pos2, b: egui::Pos2) -> f32 {
    (b - a).length()
}

pub fn feet(pixels: f32, scale: &ScaleParams) -> f32 {
    let inches = pixels / scale.effective_dpi();
    inches * scale.grid.feet_per_inch()
}

/// Fixed-precision display form; only this final value is rounded.
pub fn format_feet(feet: f32) -> String {
    format!("{:.1} ft", feet)
}

pub fn label(a: egui::Pos2, b: egui::Pos2, scale: &ScaleParams) -> String {
    format_feet(feet(distance(a, b), scale))
}
