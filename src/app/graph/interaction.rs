use eframe::egui::{self, Pos2, Rect, Ui};

use super::super::ViewModel;
use super::super::render_utils::{ProjectedKind, ProjectedPrimitive};

const ORBIT_SPEED: f32 = 0.01;
const PITCH_LIMIT: f32 = 1.5;
const ROTATION_STEP: f32 = 0.005;

impl ViewModel {
    pub(in crate::app) fn handle_scene_zoom(&mut self, ui: &Ui, rect: Rect, response: &egui::Response) {
        if !response.hovered() {
            return;
        }

        let scroll = ui.input(|input| input.raw_scroll_delta.y);
        if scroll.abs() <= f32::EPSILON {
            return;
        }

        let pointer = ui
            .input(|input| input.pointer.hover_pos())
            .unwrap_or_else(|| rect.center());
        let anchor = pointer - rect.center() - self.pan;

        let zoom_factor = (1.0 + (scroll * 0.0018)).clamp(0.85, 1.15);
        let next_zoom = (self.zoom * zoom_factor).clamp(0.05, 12.0);
        self.pan += anchor * (1.0 - next_zoom / self.zoom);
        self.zoom = next_zoom;
    }

    pub(in crate::app) fn handle_scene_drag(&mut self, response: &egui::Response) {
        if response.dragged_by(egui::PointerButton::Primary) {
            let delta = response.drag_delta();
            self.yaw += delta.x * ORBIT_SPEED;
            self.pitch = (self.pitch + delta.y * ORBIT_SPEED).clamp(-PITCH_LIMIT, PITCH_LIMIT);
        } else if response.dragged_by(egui::PointerButton::Secondary)
            || response.dragged_by(egui::PointerButton::Middle)
        {
            self.pan += response.drag_delta();
        }
    }

    /// Spins the scene about its vertical axis while rotation is on.
    pub(in crate::app) fn advance_rotation(&mut self, ui: &Ui) {
        if !self.rotating {
            return;
        }

        self.yaw = (self.yaw + ROTATION_STEP) % std::f32::consts::TAU;
        ui.ctx().request_repaint();
    }

    pub(in crate::app) fn hovered_point(
        ui: &Ui,
        projected: &[ProjectedPrimitive],
    ) -> Option<ProjectedPrimitive> {
        let pointer: Pos2 = ui.input(|input| input.pointer.hover_pos())?;

        projected
            .iter()
            .filter_map(|primitive| match primitive.kind {
                ProjectedKind::Point { center, radius, .. } => {
                    let distance = center.distance(pointer);
                    (distance <= radius.max(4.0)).then_some((*primitive, distance))
                }
                ProjectedKind::Line { .. } => None,
            })
            .min_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(primitive, _)| primitive)
    }
}
