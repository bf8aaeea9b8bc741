use crate::model::Scene;
use crate::registry::DrawingRegistry;
use crate::ruler::{RulerStyle, RulerTool};
use crate::units::ScaleParams;
use eframe::egui;

mod actions;
mod map;
mod render;
mod settings;
mod update;

// Logical egui points per inch at a window scale of 1.
const BASE_DPI: f32 = 96.0;

#[derive(Clone, Copy, Debug, Default)]
struct View {
    pan_screen: egui::Vec2,
}

impl View {
    fn world_to_screen(&self, origin: egui::Pos2, world: egui::Pos2) -> egui::Pos2 {
        origin + self.pan_screen + world.to_vec2()
    }

    fn screen_to_world(&self, origin: egui::Pos2, screen: egui::Pos2) -> egui::Pos2 {
        (screen - origin - self.pan_screen).to_pos2()
    }

    /// Keep the visible window inside `content` (the background map bounds).
    fn clamp_to_content(&mut self, viewport: egui::Vec2, content: egui::Rect) {
        let a = egui::vec2(viewport.x - content.max.x, viewport.y - content.max.y);
        let b = egui::vec2(-content.min.x, -content.min.y);
        self.pan_screen.x = self.pan_screen.x.clamp(a.x.min(b.x), a.x.max(b.x));
        self.pan_screen.y = self.pan_screen.y.clamp(a.y.min(b.y), a.y.max(b.y));
    }
}

pub struct MapApp {
    scene: Scene,
    registry: DrawingRegistry,
    ruler: RulerTool,
    view: View,
    display_dpi: f32,
    settings: settings::AppSettings,
    settings_path: String,
    map_texture: Option<egui::TextureHandle>,
    status: Option<String>,
    open_dialog_queued: bool,
}

impl MapApp {
    fn config_path() -> Option<String> {
        if let Some(home) = std::env::var_os("HOME") {
            let path = std::path::PathBuf::from(home)
                .join(".config")
                .join("battlemat.toml");
            if path.exists() {
                return Some(path.display().to_string());
            }
        }
        if std::path::Path::new("settings.toml").exists() {
            return Some("settings.toml".to_string());
        }
        None
    }

    pub fn new(cc: &eframe::CreationContext<'_>) -> Self {
        let settings_path = Self::config_path().unwrap_or_else(|| "settings.toml".to_string());
        let settings = settings::load_settings(&settings_path)
            .or_else(|| settings::load_settings("settings.json"))
            .unwrap_or_default();

        let mut app = Self {
            scene: Scene::new(),
            registry: DrawingRegistry::new(),
            ruler: RulerTool::new(),
            view: View::default(),
            display_dpi: cc.egui_ctx.pixels_per_point() * BASE_DPI,
            settings,
            settings_path,
            map_texture: None,
            status: None,
            open_dialog_queued: false,
        };

        match app.settings.last_map_path.clone() {
            Some(path) if std::path::Path::new(&path).exists() => {
                app.load_map(&cc.egui_ctx, std::path::Path::new(&path));
            }
            _ => {
                // Nothing to restore; go straight to the picker on first frame.
                app.open_dialog_queued = true;
            }
        }
        app
    }

    fn scale_params(&self) -> ScaleParams {
        ScaleParams {
            display_dpi: self.display_dpi,
            ui_scale_factor: self.settings.ui_scale_factor,
            image_dpi: self.settings.image_dpi,
            grid: self.settings.grid,
        }
    }

    fn ruler_style(&self) -> RulerStyle {
        RulerStyle {
            stroke_width: self.settings.ruler_width,
            ..RulerStyle::default()
        }
    }
}
