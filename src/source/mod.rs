mod dataset;

pub use dataset::JsonDataset;

use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::path::{DistanceWindow, RawPathNode};

/// Coordinate system and growth parameters a window of nodes belongs to.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PathContext {
    #[serde(rename = "path_ctx_id")]
    pub id: i32,
    pub growth_type: i32,
    pub growth_index: i32,
    pub growth_offset: i32,
    pub max_dist: i64,
}

/// Node-query collaborator.
pub trait NodeSource: Send + Sync {
    /// Known context ids, ascending.
    fn path_context_ids(&self) -> Result<Vec<i32>>;

    fn path_context(&self, path_ctx_id: i32) -> Result<PathContext>;

    /// Records of `path_ctx_id` with `window.from <= d <= window.to`.
    fn path_nodes(&self, path_ctx_id: i32, window: DistanceWindow) -> Result<Vec<RawPathNode>>;
}
