use eframe::egui::{Color32, Painter, Pos2, Rect, Stroke, Vec2};

use pathview::canvas::{Axis, Primitive};
use pathview::path::{Point, PointClass};

const CAMERA_DISTANCE: f32 = 144.0;
const FIELD_OF_VIEW_DEG: f32 = 20.0;
const NEAR_PLANE: f32 = 1.0;

pub(super) const DEFAULT_MAIN_POINT_COLOR: Color32 = Color32::from_rgb(0xff, 0x80, 0x00);
pub(super) const SECONDARY_POINT_COLOR: Color32 = Color32::from_rgb(0xff, 0xff, 0x00);
pub(super) const EDGE_COLOR: Color32 = Color32::from_rgb(0xff, 0xff, 0xff);

pub(super) fn point_color(class: PointClass, main_point_color: Color32) -> Color32 {
    match class {
        PointClass::Primary => main_point_color,
        PointClass::Secondary => SECONDARY_POINT_COLOR,
    }
}

pub(super) fn axis_color(axis: Axis) -> Color32 {
    match axis {
        Axis::X => Color32::from_rgb(0xff, 0x00, 0x00),
        Axis::Y => Color32::from_rgb(0x00, 0xff, 0x00),
        Axis::Z => Color32::from_rgb(0x00, 0x00, 0xff),
    }
}

/// Orbit camera looking at the origin.
#[derive(Clone, Copy)]
pub(super) struct Projection {
    pub(super) rect: Rect,
    pub(super) yaw: f32,
    pub(super) pitch: f32,
    pub(super) zoom: f32,
    pub(super) pan: Vec2,
}

impl Projection {
    fn focal_length(&self) -> f32 {
        (self.rect.height() * 0.5) / (FIELD_OF_VIEW_DEG.to_radians() * 0.5).tan()
    }

    /// Screen position and perspective scale, `None` behind the camera.
    pub(super) fn project(&self, point: Point) -> Option<(Pos2, f32)> {
        let (x, y, z) = (point.x as f32, point.y as f32, point.z as f32);

        let (sin_yaw, cos_yaw) = self.yaw.sin_cos();
        let rx = x * cos_yaw + z * sin_yaw;
        let rz = -x * sin_yaw + z * cos_yaw;

        let (sin_pitch, cos_pitch) = self.pitch.sin_cos();
        let ry = y * cos_pitch - rz * sin_pitch;
        let rz = y * sin_pitch + rz * cos_pitch;

        let depth = CAMERA_DISTANCE - rz;
        if depth < NEAR_PLANE {
            return None;
        }

        let scale = self.focal_length() / depth * self.zoom;
        let screen = self.rect.center() + self.pan + Vec2::new(rx * scale, -ry * scale);
        Some((screen, scale))
    }
}

#[derive(Clone, Copy)]
pub(super) struct ProjectedPrimitive {
    pub(super) kind: ProjectedKind,
    pub(super) depth: f32,
}

#[derive(Clone, Copy)]
pub(super) enum ProjectedKind {
    Point {
        center: Pos2,
        radius: f32,
        point: Point,
        class: PointClass,
    },
    Line {
        start: Pos2,
        end: Pos2,
        color: Color32,
    },
}

pub(super) fn project_primitive(
    projection: &Projection,
    primitive: &Primitive,
) -> Option<ProjectedPrimitive> {
    match *primitive {
        Primitive::Point { point, class } => {
            let (center, scale) = projection.project(point)?;
            Some(ProjectedPrimitive {
                kind: ProjectedKind::Point {
                    center,
                    radius: (0.3 * scale).clamp(1.5, 14.0),
                    point,
                    class,
                },
                depth: scale,
            })
        }
        Primitive::Edge { from, to } => project_line(projection, from, to, EDGE_COLOR),
        Primitive::Axis { axis, from, to } => project_line(projection, from, to, axis_color(axis)),
    }
}

fn project_line(
    projection: &Projection,
    from: Point,
    to: Point,
    color: Color32,
) -> Option<ProjectedPrimitive> {
    let (start, start_scale) = projection.project(from)?;
    let (end, end_scale) = projection.project(to)?;
    Some(ProjectedPrimitive {
        kind: ProjectedKind::Line { start, end, color },
        depth: (start_scale + end_scale) * 0.5,
    })
}

pub(super) fn draw_background(painter: &Painter, rect: Rect) {
    painter.rect_filled(rect, 0.0, Color32::from_rgb(19, 23, 29));
}

pub(super) fn draw_projected(
    painter: &Painter,
    primitive: &ProjectedPrimitive,
    main_point_color: Color32,
) {
    match primitive.kind {
        ProjectedKind::Point {
            center,
            radius,
            class,
            ..
        } => {
            painter.circle_filled(center, radius, point_color(class, main_point_color));
        }
        ProjectedKind::Line { start, end, color } => {
            painter.line_segment([start, end], Stroke::new(1.0, color));
        }
    }
}

pub(super) fn circle_visible(rect: Rect, position: Pos2, radius: f32) -> bool {
    !(position.x + radius < rect.left()
        || position.x - radius > rect.right()
        || position.y + radius < rect.top()
        || position.y - radius > rect.bottom())
}

pub(super) fn edge_visible(rect: Rect, start: Pos2, end: Pos2, padding: f32) -> bool {
    let min_x = start.x.min(end.x) - padding;
    let max_x = start.x.max(end.x) + padding;
    let min_y = start.y.min(end.y) - padding;
    let max_y = start.y.max(end.y) + padding;

    !(max_x < rect.left() || min_x > rect.right() || max_y < rect.top() || min_y > rect.bottom())
}

#[cfg(test)]
mod tests {
    use eframe::egui::{Rect, pos2, vec2};

    use super::*;

    fn projection(yaw: f32) -> Projection {
        Projection {
            rect: Rect::from_min_size(pos2(0.0, 0.0), vec2(800.0, 600.0)),
            yaw,
            pitch: 0.0,
            zoom: 1.0,
            pan: Vec2::ZERO,
        }
    }

    #[test]
    fn origin_projects_to_center() {
        let (screen, _) = projection(0.3).project(Point::new(0, 0, 0)).unwrap();
        assert!((screen.x - 400.0).abs() < 1e-3);
        assert!((screen.y - 300.0).abs() < 1e-3);
    }

    #[test]
    fn positive_y_goes_up_on_screen() {
        let (screen, _) = projection(0.0).project(Point::new(0, 10, 0)).unwrap();
        assert!(screen.y < 300.0);
    }

    #[test]
    fn closer_points_scale_larger() {
        let (_, near) = projection(0.0).project(Point::new(0, 0, 40)).unwrap();
        let (_, far) = projection(0.0).project(Point::new(0, 0, -40)).unwrap();
        assert!(near > far);
    }

    #[test]
    fn points_behind_camera_are_dropped() {
        assert!(projection(0.0).project(Point::new(0, 0, 200)).is_none());
    }

    #[test]
    fn classes_have_distinct_colors() {
        assert_ne!(
            point_color(PointClass::Primary, DEFAULT_MAIN_POINT_COLOR),
            point_color(PointClass::Secondary, DEFAULT_MAIN_POINT_COLOR)
        );
    }

    #[test]
    fn chosen_main_color_only_recolors_primary_points() {
        let chosen = Color32::from_rgb(0x20, 0x90, 0xff);
        assert_eq!(point_color(PointClass::Primary, chosen), chosen);
        assert_eq!(
            point_color(PointClass::Secondary, chosen),
            SECONDARY_POINT_COLOR
        );
    }
}
