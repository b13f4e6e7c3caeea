use std::collections::HashMap;

use tracing::debug;

use super::{DistanceWindow, PathNode};

#[derive(Clone, Debug)]
pub struct ForestNode {
    pub node: PathNode,
    children: Vec<usize>,
}

/// Parent-to-children view of one distance window.
///
/// Nodes live in an arena in insertion order; children and roots are arena
/// indices. A node with several resolved parents is a child of each of them,
/// so the structure is a DAG rather than a strict tree.
#[derive(Clone, Debug, Default)]
pub struct Forest {
    nodes: Vec<ForestNode>,
    index_by_id: HashMap<i64, usize>,
    roots: Vec<usize>,
    edge_count: usize,
}

impl Forest {
    /// Builds the forest from nodes ordered by ascending `(distance, id)`.
    ///
    /// Linked ids only resolve against nodes indexed earlier; anything else,
    /// including ids outside the window, is dropped.
    pub fn build(ordered_nodes: Vec<PathNode>, window: DistanceWindow) -> Self {
        let mut nodes: Vec<ForestNode> = Vec::with_capacity(ordered_nodes.len());
        let mut index_by_id: HashMap<i64, usize> = HashMap::with_capacity(ordered_nodes.len());
        let mut edge_count = 0usize;
        let mut dropped_links = 0usize;
        let mut skipped_nodes = 0usize;

        for node in ordered_nodes {
            if !window.contains(node.distance) {
                skipped_nodes += 1;
                continue;
            }

            let index = nodes.len();
            for preceding_id in &node.linked_ids {
                match index_by_id.get(preceding_id) {
                    Some(&parent) => {
                        nodes[parent].children.push(index);
                        edge_count += 1;
                    }
                    None => dropped_links += 1,
                }
            }

            index_by_id.insert(node.id, index);
            nodes.push(ForestNode {
                node,
                children: Vec::new(),
            });
        }

        let roots = nodes
            .iter()
            .enumerate()
            .filter(|(_, entry)| entry.node.distance == window.from)
            .map(|(index, _)| index)
            .collect::<Vec<_>>();

        debug!(
            nodes = nodes.len(),
            roots = roots.len(),
            edges = edge_count,
            dropped_links,
            skipped_nodes,
            "built path forest"
        );

        Self {
            nodes,
            index_by_id,
            roots,
            edge_count,
        }
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn edge_count(&self) -> usize {
        self.edge_count
    }

    pub fn get(&self, id: i64) -> Option<&PathNode> {
        self.index_by_id.get(&id).map(|&index| &self.nodes[index].node)
    }

    /// Child ids of `id` in append order, empty when `id` is not indexed.
    pub fn children(&self, id: i64) -> Vec<i64> {
        self.index_by_id
            .get(&id)
            .map(|&index| {
                self.nodes[index]
                    .children
                    .iter()
                    .map(|&child| self.nodes[child].node.id)
                    .collect()
            })
            .unwrap_or_default()
    }

    pub fn root_ids(&self) -> Vec<i64> {
        self.roots
            .iter()
            .map(|&index| self.nodes[index].node.id)
            .collect()
    }

    pub(super) fn roots(&self) -> &[usize] {
        &self.roots
    }

    pub(super) fn entry(&self, index: usize) -> &ForestNode {
        &self.nodes[index]
    }

    pub(super) fn child_indices(&self, index: usize) -> &[usize] {
        &self.nodes[index].children
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::path::Point;

    fn node(id: i64, distance: i64, linked_ids: &[i64]) -> PathNode {
        PathNode {
            id,
            distance,
            point: Point::default(),
            trio_id: 0,
            connection_mask: 0,
            linked_ids: linked_ids.to_vec(),
        }
    }

    #[test]
    fn appends_children_in_link_order() {
        let forest = Forest::build(
            vec![
                node(1, 0, &[]),
                node(2, 1, &[1]),
                node(3, 1, &[1]),
                node(4, 2, &[3, 2]),
            ],
            DistanceWindow::new(0, 2),
        );

        assert_eq!(forest.root_ids(), vec![1]);
        assert_eq!(forest.children(1), vec![2, 3]);
        assert_eq!(forest.children(2), vec![4]);
        assert_eq!(forest.children(3), vec![4]);
        assert!(forest.children(4).is_empty());
        assert_eq!(forest.edge_count(), 4);
    }

    #[test]
    fn unresolved_links_are_dropped() {
        let forest = Forest::build(
            vec![node(10, 2, &[99, 5]), node(11, 3, &[10, 42])],
            DistanceWindow::new(2, 3),
        );

        assert_eq!(forest.len(), 2);
        assert_eq!(forest.children(10), vec![11]);
        assert_eq!(forest.edge_count(), 1);
    }

    #[test]
    fn roots_are_nodes_at_window_start_by_ascending_id() {
        let forest = Forest::build(
            vec![
                node(2, 1, &[]),
                node(8, 1, &[]),
                node(5, 2, &[2]),
                node(1, 3, &[]),
            ],
            DistanceWindow::new(1, 3),
        );

        assert_eq!(forest.root_ids(), vec![2, 8]);
    }

    #[test]
    fn out_of_window_nodes_never_contribute_edges() {
        let forest = Forest::build(
            vec![node(1, 0, &[]), node(2, 1, &[1]), node(3, 2, &[2])],
            DistanceWindow::new(1, 1),
        );

        assert!(forest.get(1).is_none());
        assert!(forest.get(3).is_none());
        assert_eq!(forest.root_ids(), vec![2]);
        assert_eq!(forest.edge_count(), 0);
    }

    #[test]
    fn forward_references_do_not_resolve() {
        let forest = Forest::build(
            vec![node(1, 0, &[2]), node(2, 0, &[1])],
            DistanceWindow::new(0, 0),
        );

        assert_eq!(forest.children(1), vec![2]);
        assert!(forest.children(2).is_empty());
    }

    #[test]
    fn repeated_link_adds_repeated_child() {
        let forest = Forest::build(
            vec![node(1, 0, &[]), node(2, 1, &[1, 1])],
            DistanceWindow::new(0, 1),
        );

        assert_eq!(forest.children(1), vec![2, 2]);
    }

    #[test]
    fn empty_input_builds_empty_forest() {
        let forest = Forest::build(Vec::new(), DistanceWindow::new(0, 3));
        assert!(forest.is_empty());
        assert!(forest.root_ids().is_empty());
    }
}
