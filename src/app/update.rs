use crate::model;
use eframe::egui;

use super::{BASE_DPI, MapApp, render};

impl eframe::App for MapApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.display_dpi = ctx.pixels_per_point() * BASE_DPI;

        ctx.input_mut(|i| {
            if i.consume_key(egui::Modifiers::COMMAND, egui::Key::O) {
                self.open_dialog_queued = true;
            }
        });

        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            egui::menu::bar(ui, |ui| {
                ui.menu_button("File", |ui| {
                    if ui.button("Open Map… (⌘O)").clicked() {
                        self.open_dialog_queued = true;
                        ui.close_menu();
                    }
                });
                ui.menu_button("Scale", |ui| {
                    ui.label("Grid ratio (map inches : feet)");
                    if ui
                        .add(
                            egui::Slider::new(&mut self.settings.grid.map_inches, 0.5..=6.0)
                                .text("Map inches"),
                        )
                        .changed()
                    {
                        self.persist_settings();
                    }
                    if ui
                        .add(egui::Slider::new(&mut self.settings.grid.feet, 1.0..=50.0).text("Feet"))
                        .changed()
                    {
                        self.persist_settings();
                    }
                    ui.separator();
                    if ui
                        .add(
                            egui::Slider::new(&mut self.settings.image_dpi, 50.0..=300.0)
                                .text("Image DPI"),
                        )
                        .changed()
                    {
                        // Applies to the next map load.
                        self.persist_settings();
                    }
                    if ui
                        .add(
                            egui::Slider::new(&mut self.settings.ui_scale_factor, 0.5..=3.0)
                                .text("UI scale factor"),
                        )
                        .changed()
                    {
                        self.persist_settings();
                    }
                    ui.separator();
                    if ui
                        .add(
                            egui::Slider::new(&mut self.settings.ruler_width, 1.0..=12.0)
                                .text("Ruler width"),
                        )
                        .changed()
                    {
                        self.persist_settings();
                    }
                });
            });
        });

        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                if let Some(status) = &self.status {
                    ui.label(status);
                } else {
                    ui.label("Ready");
                }
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if let Some(length) = self.ruler.live_label(&self.scale_params()) {
                        ui.label(length);
                        ui.separator();
                    }
                    let rulers = self
                        .scene
                        .with_tag(model::Tag::RulerLine)
                        .filter(|item| self.registry.is_persisted(item.id))
                        .count();
                    ui.label(format!("Rulers: {}", rulers));
                });
            });
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            let (rect, response) =
                ui.allocate_exact_size(ui.available_size(), egui::Sense::click_and_drag());
            let origin = rect.min;

            if response.hovered() {
                ctx.set_cursor_icon(egui::CursorIcon::Crosshair);
            }

            // Wheel scrolls the view; Shift turns it horizontal. Ctrl/Cmd is
            // reserved for zoom.
            let scroll = ctx.input(|i| i.raw_scroll_delta);
            if scroll != egui::Vec2::ZERO {
                if let Some(hover_pos) = ctx.input(|i| i.pointer.hover_pos()) {
                    if rect.contains(hover_pos) {
                        let modifiers = ctx.input(|i| i.modifiers);
                        if modifiers.command || modifiers.ctrl {
                            // TODO: zoom about the hovered point; needs the grid
                            // scale to follow the view transform first.
                            log::debug!("zoom gesture ignored (unimplemented)");
                        } else if modifiers.shift {
                            self.view.pan_screen.x += scroll.x + scroll.y;
                        } else {
                            self.view.pan_screen += scroll;
                        }
                    }
                }
            }
            if response.dragged_by(egui::PointerButton::Middle) {
                self.view.pan_screen += response.drag_delta();
            }
            if let Some(content) = self.background_bounds() {
                self.view.clamp_to_content(rect.size(), content);
            }

            let pointer_world = ctx
                .input(|i| i.pointer.hover_pos().or(i.pointer.interact_pos()))
                .filter(|p| rect.contains(*p))
                .map(|p| self.view.screen_to_world(origin, p));

            let scale = self.scale_params();
            let style = self.ruler_style();
            let measure = |text: &str| {
                ctx.fonts_mut(|f| {
                    f.layout_no_wrap(
                        text.to_owned(),
                        egui::FontId::proportional(style.label_font_size),
                        style.label_color,
                    )
                })
                .size()
            };

            if let Some(world_pos) = pointer_world {
                if response.clicked() {
                    self.ruler.primary_click(
                        &mut self.scene,
                        &mut self.registry,
                        &scale,
                        &style,
                        world_pos,
                        measure,
                    );
                }
                if self.ruler.is_drawing() {
                    self.ruler.pointer_moved(
                        &mut self.scene,
                        &mut self.registry,
                        &scale,
                        &style,
                        world_pos,
                        measure,
                    );
                }
                if response.secondary_clicked() {
                    let removed =
                        self.ruler
                            .delete_at(&mut self.scene, &mut self.registry, world_pos);
                    if !removed.is_empty() {
                        self.status = Some(format!("Removed {} item(s)", removed.len()));
                    }
                }
            }

            let painter = ui.painter_at(rect);
            render::draw_canvas(
                &painter,
                rect,
                origin,
                &self.view,
                &self.scene,
                self.map_texture.is_some(),
            );
        });

        if self.open_dialog_queued {
            self.open_dialog_queued = false;
            self.open_map_dialog(ctx);
        }
    }
}
