use std::fmt;

use log::{debug, warn};
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::analysis::clustering::average_clustering;
use crate::analysis::components::largest_component;
use crate::analysis::degree::{degree_distribution, degree_sequence, density, DegreeDistribution};
use crate::analysis::models::{
    barabasi_albert, configuration_model, erdos_renyi, watts_strogatz, ModelError,
};
use crate::analysis::paths::path_stats;
use crate::model::FriendGraph;

pub const DEFAULT_P_WS: f64 = 0.4;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModelKind {
    ErdosRenyi,
    BarabasiAlbert,
    WattsStrogatz,
    Configuration,
}

impl ModelKind {
    pub const ALL: [ModelKind; 4] = [
        ModelKind::ErdosRenyi,
        ModelKind::BarabasiAlbert,
        ModelKind::WattsStrogatz,
        ModelKind::Configuration,
    ];
}

impl fmt::Display for ModelKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ModelKind::ErdosRenyi => "Erdős–Rényi",
            ModelKind::BarabasiAlbert => "Barabási–Albert",
            ModelKind::WattsStrogatz => "Watts–Strogatz",
            ModelKind::Configuration => "Configuration model",
        };
        f.write_str(name)
    }
}

/// Parameters of the comparison models. Unset values are derived from the real graph.
#[derive(Debug, Clone, PartialEq)]
pub struct ModelParams {
    /// Edge probability of the Erdős–Rényi model. Defaults to the real graph's density.
    pub p_er: Option<f64>,
    /// Attachment count of the Barabási–Albert model. Defaults to `round(m / n)`, at least 1.
    pub m_ba: Option<usize>,
    /// Rewiring probability of the Watts–Strogatz model.
    pub p_ws: f64,
    /// Seed for reproducible models. Random when unset.
    pub seed: Option<u64>,
}

impl Default for ModelParams {
    fn default() -> Self {
        Self {
            p_er: None,
            m_ba: None,
            p_ws: DEFAULT_P_WS,
            seed: None,
        }
    }
}

/// The properties compared between the real graph and each model. Diameter, clustering and
/// average path length are taken on the largest connected component.
#[derive(Debug, Clone, PartialEq)]
pub struct Properties {
    pub nodes: usize,
    pub edges: usize,
    pub diameter: Option<usize>,
    pub average_clustering: f64,
    pub average_shortest_path: Option<f64>,
    pub degree_distribution: DegreeDistribution,
}

pub fn properties(graph: &FriendGraph) -> Properties {
    let largest = largest_component(graph);
    let paths = path_stats(&largest);
    Properties {
        nodes: graph.node_count(),
        edges: graph.edge_count(),
        diameter: paths.map(|p| p.diameter),
        average_clustering: average_clustering(&largest),
        average_shortest_path: paths.map(|p| p.average_shortest_path),
        degree_distribution: degree_distribution(&degree_sequence(graph)),
    }
}

/// Absolute differences between a model and the real graph. Path based differences are `None`
/// when either side has no value.
#[derive(Debug, Clone, PartialEq)]
pub struct Difference {
    pub edges: usize,
    pub diameter: Option<usize>,
    pub average_clustering: f64,
    pub average_shortest_path: Option<f64>,
    /// Sum of squared per-degree count differences.
    pub degree_distribution: usize,
}

pub fn difference(real: &Properties, model: &Properties) -> Difference {
    let degree_distribution = real
        .degree_distribution
        .keys()
        .chain(model.degree_distribution.keys())
        .collect::<std::collections::BTreeSet<_>>()
        .into_iter()
        .map(|degree| {
            let a = real.degree_distribution.get(degree).copied().unwrap_or(0);
            let b = model.degree_distribution.get(degree).copied().unwrap_or(0);
            a.abs_diff(b).pow(2)
        })
        .sum();
    Difference {
        edges: real.edges.abs_diff(model.edges),
        diameter: real.diameter.zip(model.diameter).map(|(a, b)| a.abs_diff(b)),
        average_clustering: (real.average_clustering - model.average_clustering).abs(),
        average_shortest_path: real
            .average_shortest_path
            .zip(model.average_shortest_path)
            .map(|(a, b)| (a - b).abs()),
        degree_distribution,
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ModelComparison {
    pub kind: ModelKind,
    pub properties: Properties,
    pub difference: Difference,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Comparison {
    pub real: Properties,
    /// One entry per model that could be generated, in [ModelKind::ALL] order.
    pub models: Vec<ModelComparison>,
}

/// Generates one graph per [ModelKind] sized like `graph` and compares their properties with
/// `graph`'s. Models whose parameters are invalid for `graph` are skipped.
pub fn compare(graph: &FriendGraph, params: &ModelParams) -> Comparison {
    let mut rng = match params.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let real = properties(graph);
    let models = ModelKind::ALL
        .iter()
        .filter_map(|&kind| match generate(kind, graph, params, &mut rng) {
            Ok(model) => {
                let properties = properties(&model);
                let difference = difference(&real, &properties);
                Some(ModelComparison {
                    kind,
                    properties,
                    difference,
                })
            }
            Err(err) => {
                warn!("Skipping {} model: {}", kind, err);
                None
            }
        })
        .collect();
    Comparison { real, models }
}

/// Generates a `kind` model matching `graph`.
pub fn generate(
    kind: ModelKind,
    graph: &FriendGraph,
    params: &ModelParams,
    rng: &mut StdRng,
) -> Result<FriendGraph, ModelError> {
    let n = graph.node_count();
    let degrees = degree_sequence(graph);
    let model = match kind {
        ModelKind::ErdosRenyi => {
            let p = params.p_er.unwrap_or_else(|| density(graph));
            debug!("{}: n = {}, p = {}", kind, n, p);
            erdos_renyi(n, p, rng)?
        }
        ModelKind::BarabasiAlbert => {
            let m = params.m_ba.unwrap_or_else(|| default_attachment(graph));
            debug!("{}: n = {}, m = {}", kind, n, m);
            barabasi_albert(n, m, rng)?
        }
        ModelKind::WattsStrogatz => {
            let k = mean_degree(&degrees).round() as usize;
            debug!("{}: n = {}, k = {}, p = {}", kind, n, k, params.p_ws);
            watts_strogatz(n, k, params.p_ws, rng)?
        }
        ModelKind::Configuration => configuration_model(&degrees, rng)?,
    };
    Ok(model)
}

fn default_attachment(graph: &FriendGraph) -> usize {
    if graph.is_empty() {
        return 1;
    }
    let m = (graph.edge_count() as f64 / graph.node_count() as f64).round() as usize;
    m.max(1)
}

fn mean_degree(degrees: &[usize]) -> f64 {
    if degrees.is_empty() {
        return 0.0;
    }
    degrees.iter().sum::<usize>() as f64 / degrees.len() as f64
}

#[cfg(test)]
mod tests {
    use crate::analysis::compare::{
        compare, difference, properties, ModelKind, ModelParams, Properties,
    };
    use crate::analysis::degree::DegreeDistribution;
    use crate::test_util::{assert_close, indexed_graph};

    fn ring(n: usize) -> crate::model::FriendGraph {
        let edges = (0..n).map(|i| (i, (i + 1) % n)).collect::<Vec<_>>();
        indexed_graph(n, &edges)
    }

    #[test]
    fn properties_of_disconnected_graph() {
        let graph = indexed_graph(6, &[(0, 1), (1, 2), (2, 0), (3, 4)]);
        let props = properties(&graph);
        assert_eq!(props.nodes, 6);
        assert_eq!(props.edges, 4);
        assert_eq!(props.diameter, Some(1));
        assert_close(props.average_clustering, 1.0);
        assert_eq!(props.average_shortest_path, Some(1.0));
        assert_eq!(
            props.degree_distribution,
            DegreeDistribution::from([(0, 1), (1, 2), (2, 3)])
        );
    }

    #[test]
    fn difference_is_absolute() {
        let real = Properties {
            nodes: 3,
            edges: 2,
            diameter: Some(2),
            average_clustering: 0.0,
            average_shortest_path: Some(4.0 / 3.0),
            degree_distribution: DegreeDistribution::from([(1, 2), (2, 1)]),
        };
        let model = Properties {
            nodes: 3,
            edges: 3,
            diameter: Some(1),
            average_clustering: 1.0,
            average_shortest_path: None,
            degree_distribution: DegreeDistribution::from([(2, 3)]),
        };
        let diff = difference(&real, &model);
        assert_eq!(diff.edges, 1);
        assert_eq!(diff.diameter, Some(1));
        assert_close(diff.average_clustering, 1.0);
        assert_eq!(diff.average_shortest_path, None);
        // degree 1: (2 - 0)^2, degree 2: (1 - 3)^2
        assert_eq!(diff.degree_distribution, 8);
    }

    #[test]
    fn compares_against_every_model() {
        let graph = ring(12);
        let comparison = compare(
            &graph,
            &ModelParams {
                seed: Some(1),
                ..Default::default()
            },
        );
        let kinds = comparison.models.iter().map(|m| m.kind).collect::<Vec<_>>();
        assert_eq!(kinds, ModelKind::ALL.to_vec());
        for model in &comparison.models {
            assert_eq!(model.properties.nodes, 12);
        }
        // WS with k = 2 keeps the ring's edge count.
        assert_eq!(comparison.models[2].properties.edges, 12);
        assert_eq!(comparison.models[1].properties.edges, 11);
    }

    #[test]
    fn seeded_comparisons_are_reproducible() {
        let graph = ring(15);
        let params = ModelParams {
            seed: Some(99),
            ..Default::default()
        };
        assert_eq!(compare(&graph, &params), compare(&graph, &params));
    }

    #[test]
    fn invalid_models_are_skipped() {
        // A single node: BA needs m < n, WS needs k < n (k = 0 is fine).
        let graph = indexed_graph(1, &[]);
        let comparison = compare(&graph, &ModelParams::default());
        let kinds = comparison.models.iter().map(|m| m.kind).collect::<Vec<_>>();
        assert_eq!(
            kinds,
            vec![
                ModelKind::ErdosRenyi,
                ModelKind::WattsStrogatz,
                ModelKind::Configuration
            ]
        );
    }
}
