use super::ShareDropApp;
use crate::receive::{open_download, CodeEntryState};
use crate::upload::{ShareResult, StagingPhase};
use crate::utils::file_size::FileSizeUtils;
use eframe::egui::{self, Align, Align2, Color32, FontId, RichText, Stroke};
use tracing::warn;

const ACCENT: Color32 = Color32::from_rgb(161, 89, 225);
const ERROR: Color32 = Color32::from_rgb(220, 50, 50);

impl ShareDropApp {
    pub fn render(&mut self, ctx: &egui::Context) {
        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical().show(ui, |ui| {
                ui.add_space(20.0);
                ui.vertical_centered(|ui| {
                    ui.heading("Share Drop");
                    ui.add_space(5.0);
                    ui.label(
                        RichText::new("Send files with a 6-digit code")
                            .color(ui.visuals().text_color().gamma_multiply(0.7)),
                    );
                });

                ui.add_space(20.0);
                self.render_send(ui);
                ui.add_space(20.0);
                self.render_receive(ui);
                ui.add_space(20.0);
            });
        });

        self.render_drag_overlay(ctx);
    }

    fn render_send(&mut self, ui: &mut egui::Ui) {
        ui.group(|ui| {
            ui.set_width(ui.available_width());

            if let Some(result) = self.state.staging.result().cloned() {
                self.render_success(ui, &result);
                return;
            }

            ui.heading("Send files");
            ui.add_space(8.0);

            let frozen = self.state.staging.is_frozen();
            let (rect, response) = ui.allocate_exact_size(
                egui::vec2(ui.available_width(), 110.0),
                egui::Sense::click(),
            );
            self.drop_zone = Some(rect);

            let weak = ui.visuals().weak_text_color();
            let border = if response.hovered() && !frozen {
                ACCENT
            } else {
                weak.gamma_multiply(0.5)
            };
            let painter = ui.painter();
            painter.rect_stroke(rect, 8.0, Stroke::new(1.5, border));
            painter.text(
                rect.center() - egui::vec2(0.0, 10.0),
                Align2::CENTER_CENTER,
                "📁 Drag files here or click to choose",
                FontId::proportional(14.0),
                ui.visuals().text_color(),
            );
            painter.text(
                rect.center() + egui::vec2(0.0, 14.0),
                Align2::CENTER_CENTER,
                "or drop them anywhere in the window",
                FontId::proportional(11.0),
                weak,
            );

            let pick = response.clicked() && !frozen;
            if response.hovered() && !frozen {
                ui.ctx().set_cursor_icon(egui::CursorIcon::PointingHand);
            }

            let mut remove = None;
            if !self.state.staging.is_empty() {
                ui.add_space(10.0);
                for (index, file) in self.state.staging.files().iter().enumerate() {
                    ui.horizontal(|ui| {
                        ui.vertical(|ui| {
                            ui.label(RichText::new(&file.name).strong());
                            let extension = FileSizeUtils::extension(&file.name);
                            let size = FileSizeUtils::format_size(file.size);
                            let meta = if extension.is_empty() {
                                size
                            } else {
                                format!("{} • {}", extension, size)
                            };
                            ui.label(RichText::new(meta).small().color(weak));
                        });
                        ui.with_layout(egui::Layout::right_to_left(Align::Center), |ui| {
                            if ui
                                .add_enabled(!frozen, egui::Button::new("✕").small())
                                .on_hover_text("Remove file")
                                .clicked()
                            {
                                remove = Some(index);
                            }
                        });
                    });
                    ui.add_space(4.0);
                }
            }
            if let Some(index) = remove {
                self.state.staging.remove_file(index);
            }

            ui.add_space(10.0);
            ui.label(RichText::new(self.state.get_status_text()).color(weak));
            ui.add_space(6.0);

            let mut send = false;
            ui.vertical_centered(|ui| {
                let label = if self.state.staging.phase() == StagingPhase::Submitting {
                    "⏳ Sending..."
                } else {
                    "📤 Send"
                };
                ui.add_enabled_ui(self.state.staging.can_submit(), |ui| {
                    let button = egui::Button::new(label).min_size(egui::vec2(200.0, 40.0));
                    if ui.add(button).clicked() {
                        send = true;
                    }
                });
            });

            if let Some(error) = &self.state.error_message {
                ui.add_space(5.0);
                ui.vertical_centered(|ui| {
                    ui.colored_label(ERROR, error);
                });
            }

            if pick {
                self.pick_files();
            } else if send {
                self.start_upload(ui.ctx());
            }
        });
    }

    fn render_success(&mut self, ui: &mut egui::Ui, result: &ShareResult) {
        ui.heading("Upload complete");
        ui.label(
            RichText::new("Enter this 6-digit code on the receiving device.")
                .color(ui.visuals().weak_text_color()),
        );
        ui.add_space(12.0);

        let slots = ui
            .vertical_centered(|ui| {
                ui.horizontal(|ui| {
                    for digit in result.code_slots() {
                        code_slot(ui, Some(digit));
                    }
                })
                .response
            })
            .inner
            .interact(egui::Sense::click())
            .on_hover_text("Click to copy the code");

        if slots.clicked() {
            ui.output_mut(|o| o.copied_text = result.share_code.clone());
            self.state.code_copied = true;
        }
        if self.state.code_copied {
            ui.vertical_centered(|ui| {
                ui.label(RichText::new("Copied").small().color(ACCENT));
            });
        }

        ui.add_space(8.0);
        ui.vertical_centered(|ui| {
            if ui.link(RichText::new(result.display_url()).small()).clicked() {
                if let Err(e) = open_download(&result.download_url) {
                    warn!("{}", e);
                    self.state.error_message = Some(e.to_string());
                }
            }
        });
    }

    fn render_receive(&mut self, ui: &mut egui::Ui) {
        ui.group(|ui| {
            ui.set_width(ui.available_width());
            ui.heading("Receive files");
            ui.add_space(8.0);
            ui.label("Share code");

            let entry_state = self.state.code_entry.state();
            let mut buffer = self.state.code_entry.code().to_string();
            let response = ui.add_enabled(
                entry_state != CodeEntryState::Submitting,
                egui::TextEdit::singleline(&mut buffer)
                    .hint_text("000000")
                    .font(egui::TextStyle::Monospace)
                    .desired_width(120.0),
            );
            if response.changed() {
                self.state.code_entry.set_input(&buffer);
            }
            let enter_pressed =
                response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));

            ui.add_space(6.0);
            let slots = self.state.code_entry.slots();
            ui.horizontal(|ui| {
                for digit in &slots[..3] {
                    code_slot(ui, *digit);
                }
                ui.label("–");
                for digit in &slots[3..] {
                    code_slot(ui, *digit);
                }
            });

            ui.add_space(10.0);
            let mut confirm = false;
            ui.vertical_centered(|ui| {
                let label = if entry_state == CodeEntryState::Submitting {
                    "⏳ Opening..."
                } else {
                    "Confirm"
                };
                let button = egui::Button::new(label).min_size(egui::vec2(200.0, 36.0));
                if ui
                    .add_enabled(self.state.code_entry.can_submit(), button)
                    .clicked()
                {
                    confirm = true;
                }
            });

            if let Some(error) = &self.state.receive_error {
                ui.add_space(5.0);
                ui.vertical_centered(|ui| {
                    ui.colored_label(ERROR, error);
                });
            }

            if confirm || (enter_pressed && self.state.code_entry.can_submit()) {
                self.start_resolve(ui.ctx());
            }
        });
    }

    fn render_drag_overlay(&self, ctx: &egui::Context) {
        let visible = self.drag.as_ref().is_some_and(|d| d.overlay_visible());
        if !visible {
            return;
        }

        let screen = ctx.screen_rect();
        let painter = ctx.layer_painter(egui::LayerId::new(
            egui::Order::Foreground,
            egui::Id::new("drag_overlay"),
        ));
        painter.rect_filled(screen, 0.0, Color32::from_rgba_unmultiplied(161, 89, 225, 28));
        painter.rect_stroke(screen.shrink(8.0), 10.0, Stroke::new(2.0, ACCENT));
        painter.text(
            screen.center(),
            Align2::CENTER_CENTER,
            "Drop files here",
            FontId::proportional(20.0),
            ACCENT,
        );
    }
}

fn code_slot(ui: &mut egui::Ui, digit: Option<char>) {
    let (rect, _) = ui.allocate_exact_size(egui::vec2(34.0, 42.0), egui::Sense::hover());
    let stroke = Stroke::new(1.0, ui.visuals().widgets.noninteractive.bg_stroke.color);
    let text_color = ui.visuals().strong_text_color();
    let painter = ui.painter();
    painter.rect_stroke(rect, 6.0, stroke);
    if let Some(digit) = digit {
        painter.text(
            rect.center(),
            Align2::CENTER_CENTER,
            digit,
            FontId::monospace(22.0),
            text_color,
        );
    }
}
