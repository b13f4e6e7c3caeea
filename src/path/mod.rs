mod classify;
mod forest;
mod ingest;
mod traverse;
mod window;

pub use classify::{PointClass, classify};
pub use forest::{Forest, ForestNode};
pub use ingest::{RawPathNode, RawPoint, normalize};
pub use traverse::{DrawCommand, traverse};
pub use window::{DistanceWindow, RangeError, validate};

use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Point {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }
}

/// A node of one path context, as ingested for a single window.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PathNode {
    pub id: i64,
    pub distance: i64,
    pub point: Point,
    pub trio_id: i32,
    pub connection_mask: u32,
    /// Ids of preceding nodes, in the order the record listed them.
    pub linked_ids: Vec<i64>,
}
