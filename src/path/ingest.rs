use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::{PathNode, Point};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RawPoint {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

/// Node record as delivered by the node-query collaborator.
///
/// Only `path_node_id` is required; every other field falls back to its
/// default when absent.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawPathNode {
    pub path_node_id: i64,
    #[serde(default)]
    pub path_ctx_id: i32,
    #[serde(default)]
    pub point: Option<RawPoint>,
    #[serde(default)]
    pub d: i64,
    #[serde(default)]
    pub trio_id: i32,
    #[serde(default)]
    pub connection_mask: u32,
    #[serde(default)]
    pub linked_path_node_ids: Option<Vec<i64>>,
}

impl From<RawPathNode> for PathNode {
    fn from(raw: RawPathNode) -> Self {
        let point = raw.point.unwrap_or_default();
        Self {
            id: raw.path_node_id,
            distance: raw.d,
            point: Point::new(point.x, point.y, point.z),
            trio_id: raw.trio_id,
            connection_mask: raw.connection_mask,
            linked_ids: raw.linked_path_node_ids.unwrap_or_default(),
        }
    }
}

/// Canonicalizes raw records, ordered by ascending `(distance, id)`.
///
/// A repeated id keeps only its first record in that order.
pub fn normalize(raw: Vec<RawPathNode>) -> Vec<PathNode> {
    let mut nodes = raw.into_iter().map(PathNode::from).collect::<Vec<_>>();
    nodes.sort_by_key(|node| (node.distance, node.id));

    let mut seen = HashSet::with_capacity(nodes.len());
    let before = nodes.len();
    nodes.retain(|node| seen.insert(node.id));

    let dropped = before - nodes.len();
    if dropped > 0 {
        warn!(dropped, "dropped path node records with repeated ids");
    }
    debug!(nodes = nodes.len(), "normalized path node records");

    nodes
}
