use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result, anyhow};
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, info};

use super::{NodeSource, PathContext};
use crate::path::{DistanceWindow, RawPathNode};

/// Path contexts and their node records loaded from a JSON document.
#[derive(Clone, Debug, Default)]
pub struct JsonDataset {
    contexts: BTreeMap<i32, PathContext>,
    nodes_by_context: BTreeMap<i32, Vec<RawPathNode>>,
}

impl JsonDataset {
    pub fn load(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("failed to read dataset {}", path.display()))?;
        let dataset = Self::from_json_str(&raw)
            .with_context(|| format!("failed to parse dataset {}", path.display()))?;

        info!(
            path = %path.display(),
            contexts = dataset.contexts.len(),
            nodes = dataset.node_count(),
            "loaded path dataset"
        );
        Ok(dataset)
    }

    /// Accepts `{"path_contexts", "path_nodes"}`, a single path-nodes
    /// response `{"path_ctx_id", "max_dist", "path_nodes"}`, or a bare array
    /// of node records.
    pub fn from_json_str(raw: &str) -> Result<Self> {
        let parsed: Value = serde_json::from_str(raw).context("invalid JSON dataset")?;

        let (declared, records) = match parsed {
            Value::Array(records) => (Vec::new(), parse_records(Value::Array(records))?),
            Value::Object(mut object) => {
                let records = match object.remove("path_nodes") {
                    Some(value) if !value.is_null() => parse_records(value)?,
                    _ => Vec::new(),
                };

                let declared = if let Some(value) = object.remove("path_contexts") {
                    Vec::<PathContext>::deserialize(value).context("invalid path_contexts list")?
                } else if object.contains_key("path_ctx_id") {
                    vec![
                        PathContext::deserialize(Value::Object(object))
                            .context("invalid path context fields")?,
                    ]
                } else {
                    Vec::new()
                };

                (declared, records)
            }
            _ => return Err(anyhow!("unexpected JSON type for path dataset")),
        };

        Ok(Self::from_parts(declared, records))
    }

    pub fn from_parts(declared: Vec<PathContext>, records: Vec<RawPathNode>) -> Self {
        let mut contexts = declared
            .into_iter()
            .map(|context| (context.id, context))
            .collect::<BTreeMap<_, _>>();
        let mut nodes_by_context: BTreeMap<i32, Vec<RawPathNode>> = BTreeMap::new();

        for record in records {
            nodes_by_context
                .entry(record.path_ctx_id)
                .or_default()
                .push(record);
        }

        for (&path_ctx_id, records) in &nodes_by_context {
            let max_dist = records.iter().map(|record| record.d).max().unwrap_or(0);
            contexts.entry(path_ctx_id).or_insert_with(|| {
                debug!(path_ctx_id, max_dist, "synthesized path context from records");
                PathContext {
                    id: path_ctx_id,
                    max_dist,
                    ..PathContext::default()
                }
            });
        }

        Self {
            contexts,
            nodes_by_context,
        }
    }

    pub fn node_count(&self) -> usize {
        self.nodes_by_context.values().map(Vec::len).sum()
    }
}

fn parse_records(value: Value) -> Result<Vec<RawPathNode>> {
    Vec::<RawPathNode>::deserialize(value).context("invalid path_nodes list")
}

impl NodeSource for JsonDataset {
    fn path_context_ids(&self) -> Result<Vec<i32>> {
        Ok(self.contexts.keys().copied().collect())
    }

    fn path_context(&self, path_ctx_id: i32) -> Result<PathContext> {
        self.contexts
            .get(&path_ctx_id)
            .cloned()
            .ok_or_else(|| anyhow!("unknown path context {path_ctx_id}"))
    }

    fn path_nodes(&self, path_ctx_id: i32, window: DistanceWindow) -> Result<Vec<RawPathNode>> {
        if !self.contexts.contains_key(&path_ctx_id) {
            return Err(anyhow!("unknown path context {path_ctx_id}"));
        }

        Ok(self
            .nodes_by_context
            .get(&path_ctx_id)
            .map(|records| {
                records
                    .iter()
                    .filter(|record| window.contains(record.d))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FULL: &str = r#"{
        "path_contexts": [
            {"path_ctx_id": 7, "growth_type": 3, "growth_index": 1, "growth_offset": 2, "max_dist": 5}
        ],
        "path_nodes": [
            {"path_node_id": 1, "path_ctx_id": 7, "point": {"x": 0, "y": 0, "z": 0}, "d": 0},
            {"path_node_id": 2, "path_ctx_id": 7, "point": {"x": 3, "y": 0, "z": 0}, "d": 1, "linked_path_node_ids": [1]},
            {"path_node_id": 3, "path_ctx_id": 7, "point": {"x": 3, "y": 3, "z": 0}, "d": 2, "linked_path_node_ids": [2]},
            {"path_node_id": 9, "path_ctx_id": 4, "d": 6}
        ]
    }"#;

    #[test]
    fn parses_declared_and_synthesized_contexts() {
        let dataset = JsonDataset::from_json_str(FULL).unwrap();

        assert_eq!(dataset.path_context_ids().unwrap(), vec![4, 7]);
        let declared = dataset.path_context(7).unwrap();
        assert_eq!(declared.growth_type, 3);
        assert_eq!(declared.max_dist, 5);

        let synthesized = dataset.path_context(4).unwrap();
        assert_eq!(synthesized.max_dist, 6);
        assert_eq!(synthesized.growth_type, 0);
    }

    #[test]
    fn filters_window_inclusively() {
        let dataset = JsonDataset::from_json_str(FULL).unwrap();
        let ids = dataset
            .path_nodes(7, DistanceWindow::new(1, 2))
            .unwrap()
            .into_iter()
            .map(|record| record.path_node_id)
            .collect::<Vec<_>>();
        assert_eq!(ids, vec![2, 3]);
    }

    #[test]
    fn parses_single_response_shape() {
        let dataset = JsonDataset::from_json_str(
            r#"{"path_ctx_id": 2, "dist": 0, "to_dist": 1, "max_dist": 8,
                "path_nodes": [{"path_node_id": 5, "path_ctx_id": 2, "d": 0}]}"#,
        )
        .unwrap();

        assert_eq!(dataset.path_context(2).unwrap().max_dist, 8);
        assert_eq!(dataset.node_count(), 1);
    }

    #[test]
    fn parses_bare_record_array() {
        let dataset = JsonDataset::from_json_str(
            r#"[{"path_node_id": 1, "path_ctx_id": 3, "d": 0},
                {"path_node_id": 2, "path_ctx_id": 3, "d": 4, "linked_path_node_ids": [1]}]"#,
        )
        .unwrap();

        assert_eq!(dataset.path_context_ids().unwrap(), vec![3]);
        assert_eq!(dataset.path_context(3).unwrap().max_dist, 4);
    }

    #[test]
    fn null_path_nodes_is_an_empty_context() {
        let dataset =
            JsonDataset::from_json_str(r#"{"path_ctx_id": 1, "max_dist": 3, "path_nodes": null}"#)
                .unwrap();
        assert!(
            dataset
                .path_nodes(1, DistanceWindow::new(0, 3))
                .unwrap()
                .is_empty()
        );
    }

    #[test]
    fn unknown_context_is_an_error() {
        let dataset = JsonDataset::from_json_str(FULL).unwrap();
        assert!(dataset.path_context(99).is_err());
        assert!(dataset.path_nodes(99, DistanceWindow::new(0, 0)).is_err());
    }

    #[test]
    fn rejects_non_container_json() {
        assert!(JsonDataset::from_json_str("42").is_err());
        assert!(JsonDataset::from_json_str("{not json").is_err());
    }
}
