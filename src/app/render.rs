use eframe::egui;

use crate::model::{Item, ItemKind, Scene};

use super::View;

pub(super) fn draw_canvas(
    painter: &egui::Painter,
    rect: egui::Rect,
    origin: egui::Pos2,
    view: &View,
    scene: &Scene,
    has_map: bool,
) {
    let bg = painter.ctx().style().visuals.extreme_bg_color;
    painter.rect_filled(rect, 0.0, bg);

    for item in scene.items() {
        draw_item(painter, origin, view, item);
    }

    if !has_map {
        painter.text(
            rect.center(),
            egui::Align2::CENTER_CENTER,
            "No map loaded — ⌘O to open one",
            egui::FontId::proportional(18.0),
            painter.ctx().style().visuals.weak_text_color(),
        );
    }
}

fn draw_item(painter: &egui::Painter, origin: egui::Pos2, view: &View, item: &Item) {
    match &item.kind {
        ItemKind::Image { pos, texture, size } => {
            let screen = egui::Rect::from_min_size(view.world_to_screen(origin, *pos), *size);
            let uv = egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0));
            painter.image(*texture, screen, uv, egui::Color32::WHITE);
        }
        ItemKind::Line { a, b, width, color } => {
            painter.line_segment(
                [
                    view.world_to_screen(origin, *a),
                    view.world_to_screen(origin, *b),
                ],
                egui::Stroke::new(*width, *color),
            );
        }
        ItemKind::Rect { rect, fill } => {
            let screen = egui::Rect::from_min_max(
                view.world_to_screen(origin, rect.min),
                view.world_to_screen(origin, rect.max),
            );
            painter.rect_filled(screen, 4.0, *fill);
        }
        ItemKind::Text {
            pos,
            text,
            font_size,
            color,
            ..
        } => {
            painter.text(
                view.world_to_screen(origin, *pos),
                egui::Align2::LEFT_TOP,
                text,
                egui::FontId::proportional(*font_size),
                *color,
            );
        }
    }
}
