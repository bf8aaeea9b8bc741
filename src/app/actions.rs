use std::path::Path;

use eframe::egui;

use crate::model::{ItemKind, Tag};

use super::{MapApp, View, map, settings};

impl MapApp {
    pub(super) fn open_map_dialog(&mut self, ctx: &egui::Context) {
        let Some(path) = rfd::FileDialog::new()
            .add_filter("Image files", map::MAP_FILE_EXTENSIONS)
            .pick_file()
        else {
            // Cancelled; whatever is on the canvas stays.
            return;
        };
        self.load_map(ctx, &path);
    }

    pub(super) fn load_map(&mut self, ctx: &egui::Context, path: &Path) {
        let color = match map::decode_map(path) {
            Ok(color) => color,
            Err(e) => {
                log::error!("map load failed: {e}");
                self.status = Some(format!("Map load failed: {e}"));
                return;
            }
        };
        let source_size = egui::vec2(color.width() as f32, color.height() as f32);
        let texture = ctx.load_texture("background_map", color, egui::TextureOptions::LINEAR);

        // A new map resets every annotation and the pan offset.
        self.ruler.reset();
        self.registry.reset();
        self.scene.clear();
        self.view = View::default();

        let factor = self.scale_params().map_resize_factor();
        let id = self.scene.create(
            Tag::BackgroundMap,
            None,
            ItemKind::Image {
                pos: egui::Pos2::ZERO,
                texture: texture.id(),
                size: source_size * factor,
            },
        );
        self.registry.persist([id]);
        self.map_texture = Some(texture);

        let path_str = path.display().to_string();
        log::info!(
            "loaded map {} ({}x{} px, scaled {:.2}x)",
            path_str,
            source_size.x,
            source_size.y,
            factor
        );
        self.status = Some(format!("Loaded {}", path_str));
        self.settings.last_map_path = Some(path_str);
        self.persist_settings();
    }

    pub(super) fn persist_settings(&mut self) {
        if let Err(e) = settings::save_settings(&self.settings_path, &self.settings) {
            log::warn!("failed to save settings to {}: {e}", self.settings_path);
            self.status = Some(format!("Settings save failed: {e}"));
        }
    }

    pub(super) fn background_bounds(&self) -> Option<egui::Rect> {
        self.scene
            .with_tag(Tag::BackgroundMap)
            .next()
            .map(|item| item.bounds())
    }
}
