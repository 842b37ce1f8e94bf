use petgraph::graph::NodeIndex;
use petgraph::visit::Bfs;

use crate::model::FriendGraph;

pub fn component_count(graph: &FriendGraph) -> usize {
    petgraph::algo::connected_components(graph.inner())
}

pub fn is_connected(graph: &FriendGraph) -> bool {
    component_count(graph) <= 1
}

/// Node sets of every connected component, in order of their lowest node index.
pub fn connected_components(graph: &FriendGraph) -> Vec<Vec<NodeIndex>> {
    let inner = graph.inner();
    let mut seen = vec![false; graph.node_count()];
    let mut components = vec![];
    for start in graph.node_indices() {
        if seen[start.index()] {
            continue;
        }
        let mut component = vec![];
        let mut bfs = Bfs::new(inner, start);
        while let Some(index) = bfs.next(inner) {
            seen[index.index()] = true;
            component.push(index);
        }
        components.push(component);
    }
    components
}

/// The induced subgraph of the largest connected component. Ties go to the component holding
/// the lowest node index. An empty graph yields an empty graph.
pub fn largest_component(graph: &FriendGraph) -> FriendGraph {
    let largest = connected_components(graph)
        .into_iter()
        .reduce(|largest, component| {
            if component.len() > largest.len() {
                component
            } else {
                largest
            }
        });
    match largest {
        Some(mut nodes) => {
            nodes.sort();
            graph.subgraph(&nodes)
        }
        None => FriendGraph::default(),
    }
}
