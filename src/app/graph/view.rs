use eframe::egui::{self, Align2, Color32, FontId, Sense, Ui, vec2};

use super::super::ViewModel;
use super::super::render_utils::{
    ProjectedKind, Projection, circle_visible, draw_background, draw_projected, edge_visible,
    project_primitive,
};

impl ViewModel {
    pub(in crate::app) fn draw_scene(&mut self, ui: &mut Ui) {
        let (rect, response) = ui.allocate_exact_size(ui.available_size(), Sense::click_and_drag());
        let painter = ui.painter_at(rect);

        draw_background(&painter, rect);

        self.handle_scene_zoom(ui, rect, &response);
        self.handle_scene_drag(&response);
        self.advance_rotation(ui);

        let projection = Projection {
            rect,
            yaw: self.yaw,
            pitch: self.pitch,
            zoom: self.zoom,
            pan: self.pan,
        };

        let projected = &mut self.view_scratch.projected;
        projected.clear();
        projected.extend(
            self.scene
                .reference()
                .iter()
                .chain(self.scene.primitives())
                .filter_map(|primitive| project_primitive(&projection, primitive))
                .filter(|primitive| match primitive.kind {
                    ProjectedKind::Point { center, radius, .. } => {
                        circle_visible(rect, center, radius)
                    }
                    ProjectedKind::Line { start, end, .. } => edge_visible(rect, start, end, 1.0),
                }),
        );
        projected.sort_by(|a, b| a.depth.total_cmp(&b.depth));

        for primitive in projected.iter() {
            draw_projected(&painter, primitive, self.main_point_color);
        }

        if let Some(hovered) = Self::hovered_point(ui, projected)
            && let ProjectedKind::Point {
                center,
                radius,
                point,
                class,
            } = hovered.kind
        {
            ui.output_mut(|output| {
                output.cursor_icon = egui::CursorIcon::PointingHand;
            });
            painter.circle_stroke(center, radius + 2.0, (1.5, Color32::WHITE));
            painter.text(
                center + vec2(radius + 6.0, -radius - 6.0),
                Align2::LEFT_BOTTOM,
                format!("({}, {}, {}) {}", point.x, point.y, point.z, class.label()),
                FontId::monospace(12.0),
                Color32::WHITE,
            );
        }

        if self.scene.primitives().is_empty() {
            painter.text(
                rect.left_top() + vec2(12.0, 12.0),
                Align2::LEFT_TOP,
                "No nodes drawn for the current window.",
                FontId::proportional(14.0),
                Color32::from_gray(170),
            );
        }
    }
}
