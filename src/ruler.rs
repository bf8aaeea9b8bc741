use eframe::egui;

use crate::model::{GroupId, ItemId, ItemKind, Scene, Tag};
use crate::registry::DrawingRegistry;
use crate::units::{self, ScaleParams};

/// Pixel radius around a secondary click that still counts as hitting an
/// annotation.
pub const HIT_TOLERANCE: f32 = 5.0;

const LABEL_OFFSET: egui::Vec2 = egui::Vec2 { x: 25.0, y: 25.0 };

#[derive(Clone, Copy, Debug)]
pub struct RulerStyle {
    pub stroke_width: f32,
    pub stroke_color: egui::Color32,
    pub label_color: egui::Color32,
    pub label_font_size: f32,
    pub bubble_fill: egui::Color32,
    pub bubble_padding: f32,
}

impl Default for RulerStyle {
    fn default() -> Self {
        Self {
            stroke_width: 5.0,
            stroke_color: egui::Color32::from_rgb(0x55, 0x66, 0xFF),
            label_color: egui::Color32::from_rgb(245, 245, 245),
            label_font_size: 26.0,
            bubble_fill: egui::Color32::from_rgb(0x22, 0x22, 0x22),
            bubble_padding: 5.0,
        }
    }
}

#[derive(Clone, Copy, Debug)]
struct Session {
    start: egui::Pos2,
    group: GroupId,
}

#[derive(Clone, Copy, Debug)]
struct Preview {
    line: ItemId,
    label: ItemId,
    bubble: ItemId,
    end: egui::Pos2,
}

/// Click/move/click measuring interaction.
///
/// Idle until a primary click captures a start point; while drawing, every
/// pointer move replaces the transient preview (line, length label, label
/// bubble); a second primary click makes the current preview permanent.
#[derive(Debug, Default)]
pub struct RulerTool {
    session: Option<Session>,
    preview: Option<Preview>,
}

impl RulerTool {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_drawing(&self) -> bool {
        self.session.is_some()
    }

    /// Formatted length of the line currently being drawn, if any.
    pub fn live_label(&self, scale: &ScaleParams) -> Option<String> {
        let session = self.session?;
        let preview = self.preview?;
        Some(units::label(session.start, preview.end, scale))
    }

    /// Forget any in-progress line without touching the scene. Used when the
    /// scene is rebuilt under the tool, e.g. on map load.
    pub fn reset(&mut self) {
        self.session = None;
        self.preview = None;
    }

    pub fn primary_click(
        &mut self,
        scene: &mut Scene,
        registry: &mut DrawingRegistry,
        scale: &ScaleParams,
        style: &RulerStyle,
        pos: egui::Pos2,
        measure: impl FnOnce(&str) -> egui::Vec2,
    ) {
        match self.session {
            None => {
                self.session = Some(Session {
                    start: pos,
                    group: scene.allocate_group(),
                });
            }
            Some(_) => {
                // Refresh at the commit point so a click-click with no motion
                // still commits a zero-length line.
                self.rebuild_preview(scene, registry, scale, style, pos, measure);
                if let Some(preview) = self.preview.take() {
                    registry.persist([preview.line, preview.label, preview.bubble]);
                }
                self.session = None;
            }
        }
    }

    pub fn pointer_moved(
        &mut self,
        scene: &mut Scene,
        registry: &mut DrawingRegistry,
        scale: &ScaleParams,
        style: &RulerStyle,
        pos: egui::Pos2,
        measure: impl FnOnce(&str) -> egui::Vec2,
    ) {
        if self.session.is_some() {
            self.rebuild_preview(scene, registry, scale, style, pos, measure);
        }
    }

    /// Secondary-click delete: remove the nearest annotation group within
    /// tolerance. Disabled while a line is being drawn so the gesture cannot
    /// eat the live preview. Returns the removed item ids.
    pub fn delete_at(
        &mut self,
        scene: &mut Scene,
        registry: &mut DrawingRegistry,
        pos: egui::Pos2,
    ) -> Vec<ItemId> {
        if self.session.is_some() {
            return Vec::new();
        }
        let Some(hit) = scene.closest_within(pos, HIT_TOLERANCE) else {
            return Vec::new();
        };
        let removed = match scene.get(hit).and_then(|item| item.group) {
            Some(group) => scene.remove_group(group),
            None => scene.remove(hit).map(|item| vec![item.id]).unwrap_or_default(),
        };
        registry.remove(&removed);
        removed
    }

    fn rebuild_preview(
        &mut self,
        scene: &mut Scene,
        registry: &mut DrawingRegistry,
        scale: &ScaleParams,
        style: &RulerStyle,
        pos: egui::Pos2,
        measure: impl FnOnce(&str) -> egui::Vec2,
    ) {
        let Some(session) = self.session else {
            return;
        };
        let text = units::label(session.start, pos, scale);
        let text_size = measure(&text);

        registry.clear_transient(scene);

        let line = scene.create(
            Tag::RulerLine,
            Some(session.group),
            ItemKind::Line {
                a: session.start,
                b: pos,
                width: style.stroke_width,
                color: style.stroke_color,
            },
        );
        let label_pos = pos + LABEL_OFFSET;
        let label = scene.create(
            Tag::RulerText,
            Some(session.group),
            ItemKind::Text {
                pos: label_pos,
                text,
                size: text_size,
                font_size: style.label_font_size,
                color: style.label_color,
            },
        );
        let bubble_rect =
            egui::Rect::from_min_size(label_pos, text_size).expand(style.bubble_padding);
        let bubble = scene.create(
            Tag::RulerBubble,
            Some(session.group),
            ItemKind::Rect {
                rect: bubble_rect,
                fill: style.bubble_fill,
            },
        );
        // The bubble was created above the label; put the text back on top.
        scene.bring_to_front(label);

        self.preview = Some(Preview {
            line,
            label,
            bubble,
            end: pos,
        });
    }
}
