//! Boundary between the draw traversal and whatever owns the visible scene.

use tracing::debug;

use crate::path::{DrawCommand, Point, PointClass};

/// Mutable rendering surface fed by [`apply_commands`].
pub trait DrawSurface {
    /// Drops every point and edge, keeping fixed reference geometry.
    fn clear(&mut self);
    fn add_point(&mut self, point: Point, class: PointClass);
    fn add_edge(&mut self, from: Point, to: Point);
}

/// Resets `surface` once, then replays `commands` in order.
pub fn apply_commands<S: DrawSurface + ?Sized>(surface: &mut S, commands: &[DrawCommand]) {
    surface.clear();
    for command in commands {
        match *command {
            DrawCommand::Point { point, class } => surface.add_point(point, class),
            DrawCommand::Edge { from, to } => surface.add_edge(from, to),
        }
    }
    debug!(commands = commands.len(), "applied draw commands");
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Axis {
    X,
    Y,
    Z,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Primitive {
    Point { point: Point, class: PointClass },
    Edge { from: Point, to: Point },
    Axis { axis: Axis, from: Point, to: Point },
}

/// In-memory scene group: reference axes plus the current window's primitives.
#[derive(Clone, Debug)]
pub struct Scene {
    reference: Vec<Primitive>,
    primitives: Vec<Primitive>,
    point_count: usize,
    edge_count: usize,
    revision: u64,
}

impl Scene {
    pub const AXIS_EXTENT: i32 = 70;

    pub fn new() -> Self {
        let extent = Self::AXIS_EXTENT;
        let reference = vec![
            Primitive::Axis {
                axis: Axis::X,
                from: Point::new(-extent, 0, 0),
                to: Point::new(extent, 0, 0),
            },
            Primitive::Axis {
                axis: Axis::Y,
                from: Point::new(0, -extent, 0),
                to: Point::new(0, extent, 0),
            },
            Primitive::Axis {
                axis: Axis::Z,
                from: Point::new(0, 0, -extent),
                to: Point::new(0, 0, extent),
            },
        ];

        Self {
            reference,
            primitives: Vec::new(),
            point_count: 0,
            edge_count: 0,
            revision: 0,
        }
    }

    pub fn reference(&self) -> &[Primitive] {
        &self.reference
    }

    pub fn primitives(&self) -> &[Primitive] {
        &self.primitives
    }

    pub fn point_count(&self) -> usize {
        self.point_count
    }

    pub fn edge_count(&self) -> usize {
        self.edge_count
    }

    /// Bumped on every `clear`.
    pub fn revision(&self) -> u64 {
        self.revision
    }
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}

impl DrawSurface for Scene {
    fn clear(&mut self) {
        self.primitives.clear();
        self.point_count = 0;
        self.edge_count = 0;
        self.revision = self.revision.wrapping_add(1);
    }

    fn add_point(&mut self, point: Point, class: PointClass) {
        self.primitives.push(Primitive::Point { point, class });
        self.point_count += 1;
    }

    fn add_edge(&mut self, from: Point, to: Point) {
        self.primitives.push(Primitive::Edge { from, to });
        self.edge_count += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct CallLog {
        calls: Vec<String>,
    }

    impl DrawSurface for CallLog {
        fn clear(&mut self) {
            self.calls.push("clear".to_owned());
        }

        fn add_point(&mut self, point: Point, class: PointClass) {
            self.calls
                .push(format!("point {} {} {} {}", point.x, point.y, point.z, class.label()));
        }

        fn add_edge(&mut self, from: Point, to: Point) {
            self.calls.push(format!("edge {},{},{}->{},{},{}", from.x, from.y, from.z, to.x, to.y, to.z));
        }
    }

    #[test]
    fn clears_once_before_commands_in_order() {
        let commands = [
            DrawCommand::Point {
                point: Point::new(1, 1, 1),
                class: PointClass::Secondary,
            },
            DrawCommand::Edge {
                from: Point::new(0, 0, 0),
                to: Point::new(1, 1, 1),
            },
        ];
        let mut log = CallLog::default();
        apply_commands(&mut log, &commands);

        assert_eq!(
            log.calls,
            vec![
                "clear".to_owned(),
                "point 1 1 1 secondary".to_owned(),
                "edge 0,0,0->1,1,1".to_owned(),
            ]
        );
    }

    #[test]
    fn empty_sequence_still_clears() {
        let mut log = CallLog::default();
        apply_commands(&mut log, &[]);
        assert_eq!(log.calls, vec!["clear".to_owned()]);
    }

    #[test]
    fn scene_keeps_reference_axes_across_clear() {
        let mut scene = Scene::new();
        scene.add_point(Point::new(3, 0, 0), PointClass::Primary);
        scene.add_edge(Point::new(0, 0, 0), Point::new(3, 0, 0));
        assert_eq!(scene.primitives().len(), 2);

        scene.clear();
        assert!(scene.primitives().is_empty());
        assert_eq!(scene.point_count(), 0);
        assert_eq!(scene.edge_count(), 0);
        assert_eq!(scene.reference().len(), 3);
    }

    #[test]
    fn redraw_replaces_instead_of_accumulating() {
        let commands = [
            DrawCommand::Point {
                point: Point::new(0, 0, 0),
                class: PointClass::Primary,
            },
            DrawCommand::Point {
                point: Point::new(1, 0, 0),
                class: PointClass::Secondary,
            },
            DrawCommand::Edge {
                from: Point::new(0, 0, 0),
                to: Point::new(1, 0, 0),
            },
        ];
        let mut scene = Scene::new();
        apply_commands(&mut scene, &commands);
        let first = scene.primitives().to_vec();
        let first_revision = scene.revision();

        apply_commands(&mut scene, &commands);
        assert_eq!(scene.primitives(), first.as_slice());
        assert_eq!(scene.point_count(), 2);
        assert_eq!(scene.edge_count(), 1);
        assert_ne!(scene.revision(), first_revision);
    }
}
