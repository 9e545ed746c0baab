use std::collections::VecDeque;

use super::NodeId;
use super::edge::Edge;
use super::node::Node;

/// Multi-source breadth-first labelling of every node with its hop count to
/// the nearest selected node, capped at `max_levels`. Edges are walked in
/// both directions whatever the direction of their relations.
pub(super) fn compute_distances(
    nodes: &mut [Node],
    edges: &[Edge],
    selected: &[NodeId],
    max_levels: i32,
) {
    if selected.is_empty() {
        for node in nodes.iter_mut() {
            node.distance_to_selected = -1;
        }
        return;
    }

    let mut neighbours = vec![Vec::new(); nodes.len()];
    for edge in edges {
        let (first, second) = (edge.node1.index(), edge.node2.index());
        neighbours[first].push(second);
        neighbours[second].push(first);
    }

    let max_levels = max_levels.max(0);
    let mut distances = vec![i32::MAX; nodes.len()];
    let mut queue = VecDeque::with_capacity(selected.len());

    for &NodeId(index) in selected {
        if index < distances.len() && distances[index] != 0 {
            distances[index] = 0;
            queue.push_back(index);
        }
    }

    while let Some(current) = queue.pop_front() {
        let depth = distances[current];
        if depth >= max_levels {
            continue;
        }

        for &next in &neighbours[current] {
            if distances[next] <= depth + 1 {
                continue;
            }
            distances[next] = depth + 1;
            queue.push_back(next);
        }
    }

    for (node, distance) in nodes.iter_mut().zip(distances) {
        node.distance_to_selected = distance.min(max_levels);
    }
}
