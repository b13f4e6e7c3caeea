use eframe::egui::{self, Color32, RichText, Ui};
use fuzzy_matcher::skim::SkimMatcherV2;

use crate::util::fuzzy_match_score;

use super::super::{StatusMessage, ViewModel};

const CONTEXT_LIST_HEIGHT: f32 = 160.0;

impl ViewModel {
    pub(in crate::app) fn draw_controls(&mut self, ui: &mut Ui) {
        ui.heading("Render Controls");
        ui.separator();
        ui.add_space(4.0);

        let rotate_label = format!("Rotate: {}", self.rotating);
        if ui
            .button(rotate_label)
            .on_hover_text("Spin the scene about its vertical axis.")
            .clicked()
        {
            self.rotating = !self.rotating;
        }
        if ui.button("Reset camera").clicked() {
            self.yaw = 0.0;
            self.pitch = 0.55;
            self.zoom = 0.6;
            self.pan = egui::Vec2::ZERO;
        }

        ui.separator();
        self.draw_context_picker(ui);

        ui.separator();
        self.draw_context_info(ui);

        ui.separator();
        self.draw_window_inputs(ui);

        if let Some(status) = &self.status {
            ui.add_space(6.0);
            match status {
                StatusMessage::Error(message) => {
                    ui.label(RichText::new(message).color(Color32::from_rgb(235, 110, 100)));
                }
                StatusMessage::Info(message) => {
                    ui.horizontal(|ui| {
                        ui.spinner();
                        ui.label(message);
                    });
                }
            }
        }

        if let Some(summary) = &self.last_render {
            ui.separator();
            ui.label(RichText::new("Last render").strong());
            ui.label(format!("Nodes in window: {}", summary.node_count));
            ui.label(format!("Roots: {}", summary.root_count));
            ui.label(format!("Resolved links: {}", summary.edge_count));
        }
    }

    fn draw_context_picker(&mut self, ui: &mut Ui) {
        ui.label("Path Context ID")
            .on_hover_text("Type to fuzzy-filter the known path contexts.");
        ui.text_edit_singleline(&mut self.context_search);

        let query = self.context_search.trim();
        let matcher = SkimMatcherV2::default();
        let candidates = self
            .context_ids
            .iter()
            .copied()
            .filter(|id| query.is_empty() || fuzzy_match_score(&matcher, &id.to_string(), query).is_some())
            .collect::<Vec<_>>();

        let selected_id = self.context.as_ref().map(|context| context.id);
        let mut picked = None;
        egui::ScrollArea::vertical()
            .id_salt("context_list")
            .max_height(CONTEXT_LIST_HEIGHT)
            .show(ui, |ui| {
                if candidates.is_empty() {
                    ui.label("No path contexts match.");
                }
                for id in candidates {
                    if ui
                        .selectable_label(selected_id == Some(id), id.to_string())
                        .clicked()
                    {
                        picked = Some(id);
                    }
                }
            });

        if let Some(id) = picked
            && selected_id != Some(id)
        {
            self.select_context(id);
        }
    }

    fn draw_context_info(&self, ui: &mut Ui) {
        let Some(context) = &self.context else {
            ui.label("Select a path context to render.");
            return;
        };

        ui.label(format!("Growth Type: {}", context.growth_type));
        ui.label(format!("Growth Index: {}", context.growth_index));
        ui.label(format!("Growth Offset: {}", context.growth_offset));
        ui.label(format!("Max Dist: {}", context.max_dist));
    }

    fn draw_window_inputs(&mut self, ui: &mut Ui) {
        egui::Grid::new("window_inputs")
            .num_columns(2)
            .spacing([8.0, 6.0])
            .show(ui, |ui| {
                ui.label("From Dist:");
                ui.add(egui::DragValue::new(&mut self.from_dist).speed(0.1));
                ui.end_row();

                ui.label("To Dist:");
                ui.add(egui::DragValue::new(&mut self.to_dist).speed(0.1));
                ui.end_row();
            });

        ui.add_space(4.0);
        ui.horizontal(|ui| {
            ui.label("Main point color:");
            ui.color_edit_button_srgba(&mut self.main_point_color)
                .on_hover_text("Fill color for points whose coordinates sum to a multiple of 3.");
        });

        ui.add_space(4.0);
        ui.horizontal(|ui| {
            let step_button = ui
                .add_enabled(self.context.is_some(), egui::Button::new("Render From/To + 1"))
                .on_hover_text("Move both bounds forward by one and render.");
            if step_button.clicked() {
                self.step_render();
            }

            let render_button = ui
                .add_enabled(self.context.is_some(), egui::Button::new("Render"))
                .on_hover_text("Rebuild the scene from the nodes inside [From, To].");
            if render_button.clicked() {
                self.request_render();
            }
        });
    }
}
