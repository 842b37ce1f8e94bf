use petgraph::graph::NodeIndex;

use crate::model::{FriendGraph, Person};

pub fn person(id: &str, friends: &[&str]) -> Person {
    Person::new(id).with_friends(friends.iter().map(|id| id.to_string()).collect())
}

/// `n` nodes with ids `"0".."n-1"` and edges given by index pairs.
pub fn indexed_graph(n: usize, edges: &[(usize, usize)]) -> FriendGraph {
    let mut graph = FriendGraph::with_nodes(n);
    for &(a, b) in edges {
        graph.add_edge(NodeIndex::new(a), NodeIndex::new(b));
    }
    graph
}

pub fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-9,
        "expected {expected}, got {actual}"
    );
}
