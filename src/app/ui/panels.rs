use std::path::Path;

use eframe::egui::{self, Align, Context, Layout};

use super::super::ViewModel;

impl ViewModel {
    pub(in crate::app) fn show(&mut self, ctx: &Context, data_path: &Path) {
        self.update_fps_counter(ctx);
        self.poll_pending(ctx);

        egui::TopBottomPanel::top("top_bar")
            .resizable(false)
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    ui.heading("pathview");
                    ui.separator();
                    ui.label(format!("dataset: {}", data_path.display()));
                    ui.label(format!("contexts: {}", self.context_ids.len()));
                    if let Some(summary) = &self.last_render {
                        ui.label(format!(
                            "ctx {} dist {}..={}",
                            summary.request.path_ctx_id,
                            summary.request.window.from,
                            summary.request.window.to
                        ));
                    }
                    ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                        ui.label(self.scene_stats_text());
                        if let Some(fps_text) = self.fps_display_text() {
                            ui.label(fps_text);
                        }
                    });
                });
            });

        egui::SidePanel::left("controls")
            .resizable(true)
            .default_width(300.0)
            .show(ctx, |ui| self.draw_controls(ui));

        egui::CentralPanel::default()
            .frame(egui::Frame::NONE)
            .show(ctx, |ui| self.draw_scene(ui));
    }
}
