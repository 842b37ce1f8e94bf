use petgraph::graph::NodeIndex;

use crate::model::FriendGraph;

/// Number of triangles through `node`.
pub fn triangles(graph: &FriendGraph, node: NodeIndex) -> usize {
    let neighbors = graph.neighbors(node).collect::<Vec<_>>();
    let mut count = 0;
    for (i, &a) in neighbors.iter().enumerate() {
        for &b in &neighbors[i + 1..] {
            if graph.has_edge(a, b) {
                count += 1;
            }
        }
    }
    count
}

/// Fraction of pairs of neighbours of `node` that are themselves connected. 0 for nodes with
/// fewer than two neighbours.
pub fn local_clustering(graph: &FriendGraph, node: NodeIndex) -> f64 {
    let degree = graph.degree(node);
    if degree < 2 {
        return 0.0;
    }
    let possible = degree * (degree - 1) / 2;
    triangles(graph, node) as f64 / possible as f64
}

/// Local clustering of every node in index order.
pub fn local_clustering_all(graph: &FriendGraph) -> Vec<f64> {
    graph
        .node_indices()
        .map(|node| local_clustering(graph, node))
        .collect()
}

/// Mean local clustering over all nodes, 0 for an empty graph.
pub fn average_clustering(graph: &FriendGraph) -> f64 {
    if graph.is_empty() {
        return 0.0;
    }
    local_clustering_all(graph).iter().sum::<f64>() / graph.node_count() as f64
}

/// `3 * triangles / connected triples`, 0 when there are no connected triples.
pub fn transitivity(graph: &FriendGraph) -> f64 {
    let mut closed = 0;
    let mut triples = 0;
    for node in graph.node_indices() {
        let degree = graph.degree(node);
        // Each triangle is seen once from each of its three corners.
        closed += triangles(graph, node);
        triples += degree * degree.saturating_sub(1) / 2;
    }
    if triples == 0 {
        return 0.0;
    }
    closed as f64 / triples as f64
}

#[cfg(test)]
mod tests {
    use petgraph::graph::NodeIndex;

    use crate::analysis::clustering::{
        average_clustering, local_clustering, local_clustering_all, transitivity, triangles,
    };
    use crate::test_util::{assert_close, indexed_graph};

    #[test]
    fn triangle_with_tail() {
        // Triangle 0-1-2 and tail 2-3.
        let graph = indexed_graph(4, &[(0, 1), (1, 2), (2, 0), (2, 3)]);
        assert_eq!(triangles(&graph, NodeIndex::new(2)), 1);
        assert_close(local_clustering(&graph, NodeIndex::new(0)), 1.0);
        assert_close(local_clustering(&graph, NodeIndex::new(2)), 1.0 / 3.0);
        assert_close(local_clustering(&graph, NodeIndex::new(3)), 0.0);
        assert_close(average_clustering(&graph), (1.0 + 1.0 + 1.0 / 3.0) / 4.0);
        // 1 triangle, triples: 1 + 1 + 3 + 0 = 5
        assert_close(transitivity(&graph), 3.0 / 5.0);
    }

    #[test]
    fn complete_graph() {
        let graph = indexed_graph(4, &[(0, 1), (0, 2), (0, 3), (1, 2), (1, 3), (2, 3)]);
        assert!(local_clustering_all(&graph).iter().all(|c| (c - 1.0).abs() < 1e-9));
        assert_close(transitivity(&graph), 1.0);
    }

    #[test]
    fn no_triples() {
        assert_close(transitivity(&indexed_graph(2, &[(0, 1)])), 0.0);
        assert_close(average_clustering(&indexed_graph(0, &[])), 0.0);
    }
}
