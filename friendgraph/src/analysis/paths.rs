use std::collections::HashMap;

use petgraph::algo::dijkstra;
use petgraph::graph::NodeIndex;

use crate::analysis::components::{is_connected, largest_component};
use crate::model::FriendGraph;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PathStats {
    pub diameter: usize,
    pub radius: usize,
    pub average_shortest_path: f64,
}

/// Hop distance from `source` to every node reachable from it, including `source` itself.
pub fn shortest_path_lengths(graph: &FriendGraph, source: NodeIndex) -> HashMap<NodeIndex, usize> {
    dijkstra(graph.inner(), source, None, |_| 1usize)
}

/// Every shortest path length from every node, including the zero-length path from a node to
/// itself. Unreachable pairs are absent.
pub fn all_shortest_path_lengths(graph: &FriendGraph) -> Vec<usize> {
    graph
        .node_indices()
        .flat_map(|source| shortest_path_lengths(graph, source).into_values())
        .collect()
}

/// Eccentricity of every node in index order. `None` for an empty or disconnected graph.
pub fn eccentricities(graph: &FriendGraph) -> Option<Vec<usize>> {
    if graph.is_empty() || !is_connected(graph) {
        return None;
    }
    Some(
        graph
            .node_indices()
            .map(|source| {
                shortest_path_lengths(graph, source)
                    .into_values()
                    .max()
                    .unwrap_or(0)
            })
            .collect(),
    )
}

/// Diameter, radius and average shortest path length of `graph`, computed on its largest
/// connected component when it is disconnected. `None` for an empty graph.
pub fn path_stats(graph: &FriendGraph) -> Option<PathStats> {
    if graph.is_empty() {
        return None;
    }
    if is_connected(graph) {
        connected_path_stats(graph)
    } else {
        connected_path_stats(&largest_component(graph))
    }
}

fn connected_path_stats(graph: &FriendGraph) -> Option<PathStats> {
    let n = graph.node_count();
    let mut diameter = 0;
    let mut radius = usize::MAX;
    let mut total = 0;
    for source in graph.node_indices() {
        let lengths = shortest_path_lengths(graph, source);
        let eccentricity = lengths.values().copied().max().unwrap_or(0);
        diameter = diameter.max(eccentricity);
        radius = radius.min(eccentricity);
        total += lengths.values().sum::<usize>();
    }
    if radius == usize::MAX {
        return None;
    }
    let average_shortest_path = if n > 1 {
        total as f64 / (n * (n - 1)) as f64
    } else {
        0.0
    };
    Some(PathStats {
        diameter,
        radius,
        average_shortest_path,
    })
}
