use serde::{Deserialize, Serialize};

use super::{Forest, Point, PointClass, classify};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DrawCommand {
    Point { point: Point, class: PointClass },
    Edge { from: Point, to: Point },
}

/// Walks every root depth-first and emits the draw sequence.
///
/// Children are taken from the end of each child list. A node is emitted
/// when it is unwound, followed by the edge from the node beneath it on the
/// stack. Child lists are consumed once for the whole walk: a node reachable
/// through `k` parents is drawn `k` times, but its own children are only
/// expanded on the first visit.
pub fn traverse(forest: &Forest) -> Vec<DrawCommand> {
    let mut commands = Vec::with_capacity(forest.len() * 2);
    let mut remaining: Vec<usize> = (0..forest.len())
        .map(|index| forest.child_indices(index).len())
        .collect();
    let mut stack: Vec<usize> = Vec::new();

    for &root in forest.roots() {
        stack.push(root);

        loop {
            while let Some(&top) = stack.last() {
                if remaining[top] == 0 {
                    break;
                }
                remaining[top] -= 1;
                stack.push(forest.child_indices(top)[remaining[top]]);
            }

            let Some(index) = stack.pop() else {
                break;
            };

            let point = forest.entry(index).node.point;
            commands.push(DrawCommand::Point {
                point,
                class: classify(point),
            });

            if let Some(&parent) = stack.last() {
                commands.push(DrawCommand::Edge {
                    from: forest.entry(parent).node.point,
                    to: point,
                });
            }
        }
    }

    commands
}
