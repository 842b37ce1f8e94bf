use std::collections::{BTreeMap, HashMap};

use petgraph::graph::{NodeIndex, UnGraph};
use petgraph::visit::EdgeRef;
use serde_json::Value;

use crate::model::PersonId;

pub type Graph = UnGraph<Node, ()>;

#[derive(Debug, Default, Clone, PartialEq)]
pub struct Node {
    pub id: PersonId,
    pub attributes: BTreeMap<String, Value>,
}

impl Node {
    pub fn new(id: impl ToString) -> Self {
        Self {
            id: id.to_string(),
            attributes: BTreeMap::new(),
        }
    }

    /// Display name of the node, falling back to its id.
    pub fn name(&self) -> &str {
        self.attributes
            .get("name")
            .and_then(Value::as_str)
            .unwrap_or(&self.id)
    }
}

/// A simple undirected graph keyed by [PersonId]: no self-loops and no parallel edges.
///
/// Node indices are dense (`0..node_count`) because nodes are never removed.
#[derive(Debug, Default, Clone)]
pub struct FriendGraph {
    graph: Graph,
    node_map: HashMap<PersonId, NodeIndex>,
}

impl FriendGraph {
    /// A graph of `n` isolated, attribute-less nodes with ids `"0".."n-1"`. Node `i` has index
    /// `i`.
    pub fn with_nodes(n: usize) -> Self {
        let mut graph = Self::default();
        for i in 0..n {
            graph.add_node(Node::new(i));
        }
        graph
    }

    /// Adds `node` unless a node with the same id already exists. Returns the index of the node
    /// with that id either way.
    pub fn add_node(&mut self, node: Node) -> NodeIndex {
        if let Some(index) = self.node_map.get(&node.id) {
            return *index;
        }
        let id = node.id.clone();
        let index = self.graph.add_node(node);
        self.node_map.insert(id, index);
        index
    }

    /// Adds an edge between `a` and `b`. Self-loops and duplicate edges are refused and
    /// `false` is returned.
    pub fn add_edge(&mut self, a: NodeIndex, b: NodeIndex) -> bool {
        if a == b || self.graph.find_edge(a, b).is_some() {
            return false;
        }
        self.graph.add_edge(a, b, ());
        true
    }

    /// Removes the edge between `a` and `b` if there is one.
    pub fn remove_edge(&mut self, a: NodeIndex, b: NodeIndex) -> bool {
        match self.graph.find_edge(a, b) {
            Some(edge) => self.graph.remove_edge(edge).is_some(),
            None => false,
        }
    }

    pub fn has_edge(&self, a: NodeIndex, b: NodeIndex) -> bool {
        self.graph.find_edge(a, b).is_some()
    }

    pub fn contains_node(&self, id: &str) -> bool {
        self.node_map.contains_key(id)
    }

    pub fn contains_edge(&self, a: &str, b: &str) -> bool {
        match (self.node_map.get(a), self.node_map.get(b)) {
            (Some(a), Some(b)) => self.has_edge(*a, *b),
            _ => false,
        }
    }

    pub fn index(&self, id: &str) -> Option<NodeIndex> {
        self.node_map.get(id).copied()
    }

    /// Panics if `index` does not belong to this graph.
    pub fn node(&self, index: NodeIndex) -> &Node {
        &self.graph[index]
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    pub fn is_empty(&self) -> bool {
        self.graph.node_count() == 0
    }

    pub fn node_indices(&self) -> impl Iterator<Item = NodeIndex> + '_ {
        self.graph.node_indices()
    }

    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.graph.node_indices().map(move |index| &self.graph[index])
    }

    pub fn neighbors(&self, index: NodeIndex) -> impl Iterator<Item = NodeIndex> + '_ {
        self.graph.neighbors(index)
    }

    pub fn degree(&self, index: NodeIndex) -> usize {
        self.graph.neighbors(index).count()
    }

    /// Each undirected edge exactly once.
    pub fn edges(&self) -> impl Iterator<Item = (NodeIndex, NodeIndex)> + '_ {
        self.graph
            .edge_references()
            .map(|edge| (edge.source(), edge.target()))
    }

    /// Each undirected edge exactly once, as a pair of ids.
    pub fn edge_ids(&self) -> impl Iterator<Item = (&str, &str)> {
        self.edges()
            .map(|(a, b)| (self.node(a).id.as_str(), self.node(b).id.as_str()))
    }

    /// The underlying petgraph graph, for use with [petgraph::algo].
    pub fn inner(&self) -> &Graph {
        &self.graph
    }

    /// The induced subgraph on `nodes`. Node order follows `nodes`.
    pub fn subgraph(&self, nodes: &[NodeIndex]) -> FriendGraph {
        let mut subgraph = FriendGraph::default();
        let mut index_map = HashMap::with_capacity(nodes.len());
        for &index in nodes {
            index_map.insert(index, subgraph.add_node(self.node(index).clone()));
        }
        for (a, b) in self.edges() {
            if let (Some(a), Some(b)) = (index_map.get(&a), index_map.get(&b)) {
                subgraph.add_edge(*a, *b);
            }
        }
        subgraph
    }
}

#[cfg(test)]
mod tests {
    use petgraph::graph::NodeIndex;

    use crate::model::{FriendGraph, Node};

    #[test]
    fn add_node_deduplicates_ids() {
        let mut graph = FriendGraph::default();
        let a = graph.add_node(Node::new("a"));
        let b = graph.add_node(Node::new("b"));
        assert_eq!(graph.add_node(Node::new("a")), a);
        assert_ne!(a, b);
        assert_eq!(graph.node_count(), 2);
    }

    #[test]
    fn add_edge_refuses_self_loops_and_duplicates() {
        let mut graph = FriendGraph::with_nodes(2);
        let (a, b) = (NodeIndex::new(0), NodeIndex::new(1));
        assert!(!graph.add_edge(a, a));
        assert!(graph.add_edge(a, b));
        assert!(!graph.add_edge(a, b));
        assert!(!graph.add_edge(b, a));
        assert_eq!(graph.edge_count(), 1);
        assert!(graph.contains_edge("0", "1"));
        assert!(graph.contains_edge("1", "0"));
    }

    #[test]
    fn remove_edge() {
        let mut graph = FriendGraph::with_nodes(3);
        graph.add_edge(NodeIndex::new(0), NodeIndex::new(1));
        graph.add_edge(NodeIndex::new(1), NodeIndex::new(2));
        assert!(graph.remove_edge(NodeIndex::new(1), NodeIndex::new(0)));
        assert!(!graph.remove_edge(NodeIndex::new(0), NodeIndex::new(2)));
        assert_eq!(graph.edge_count(), 1);
        assert!(graph.contains_edge("1", "2"));
    }

    #[test]
    fn subgraph_keeps_induced_edges() {
        let mut graph = FriendGraph::with_nodes(4);
        graph.add_edge(NodeIndex::new(0), NodeIndex::new(1));
        graph.add_edge(NodeIndex::new(1), NodeIndex::new(2));
        graph.add_edge(NodeIndex::new(2), NodeIndex::new(3));
        let sub = graph.subgraph(&[NodeIndex::new(1), NodeIndex::new(2), NodeIndex::new(3)]);
        assert_eq!(sub.node_count(), 3);
        assert_eq!(sub.edge_count(), 2);
        assert!(!sub.contains_node("0"));
        assert!(sub.contains_edge("2", "3"));
    }

    #[test]
    fn node_name_falls_back_to_id() {
        let mut node = Node::new("42");
        assert_eq!(node.name(), "42");
        node.attributes
            .insert("name".to_string(), serde_json::json!("Ann Smith"));
        assert_eq!(node.name(), "Ann Smith");
    }
}
