//! Descriptive statistics over a [FriendGraph] and comparisons against random-graph models.
//!
//! Everything in here is a pure function of the graph, apart from the random models which take
//! an explicit RNG or seed.

use crate::model::FriendGraph;

pub use compare::{compare, Comparison, ModelKind, ModelParams};
pub use degree::{DegreeDistribution, DegreeStats};
pub use paths::PathStats;
pub use powerlaw::PowerLawFit;
pub use top::{top_nodes, Ranked};

pub mod clustering;
pub mod compare;
pub mod components;
pub mod degree;
pub mod models;
pub mod paths;
pub mod powerlaw;
pub mod top;

#[derive(Debug, Clone, PartialEq)]
pub struct Summary {
    pub nodes: usize,
    pub edges: usize,
    pub components: usize,
    pub degrees: Option<DegreeStats>,
    pub transitivity: f64,
    pub average_clustering: f64,
    /// Taken on the largest connected component when the graph is disconnected.
    pub paths: Option<PathStats>,
    pub power_law: Option<PowerLawFit>,
}

pub fn summarize(graph: &FriendGraph) -> Summary {
    let degree_sequence = degree::degree_sequence(graph);
    Summary {
        nodes: graph.node_count(),
        edges: graph.edge_count(),
        components: components::component_count(graph),
        degrees: degree::degree_stats(&degree_sequence),
        transitivity: clustering::transitivity(graph),
        average_clustering: clustering::average_clustering(graph),
        paths: paths::path_stats(graph),
        power_law: powerlaw::fit(&degree_sequence),
    }
}

/// Per-node measure used to rank and size nodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Measure {
    #[default]
    Degree,
    Clustering,
}

impl Measure {
    pub fn name(&self) -> &'static str {
        match self {
            Measure::Degree => "degree",
            Measure::Clustering => "local clustering",
        }
    }

    /// Value of the measure for every node in index order.
    pub fn values(&self, graph: &FriendGraph) -> Vec<f64> {
        match self {
            Measure::Degree => degree::degree_sequence(graph)
                .into_iter()
                .map(|d| d as f64)
                .collect(),
            Measure::Clustering => clustering::local_clustering_all(graph),
        }
    }
}
