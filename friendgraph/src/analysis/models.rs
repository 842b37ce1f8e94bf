use std::collections::BTreeSet;

use petgraph::graph::NodeIndex;
use rand::seq::SliceRandom;
use rand::Rng;
use thiserror::Error;

use crate::model::FriendGraph;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ModelError {
    #[error("probability must be within [0, 1], got {0}")]
    InvalidProbability(f64),

    #[error("attachment count must satisfy 1 <= m < n, got m = {m}, n = {n}")]
    InvalidAttachment { m: usize, n: usize },

    #[error("neighbour count must satisfy k < n, got k = {k}, n = {n}")]
    InvalidNeighbours { k: usize, n: usize },

    #[error("degree sequence must have an even sum, got {0}")]
    OddDegreeSum(usize),
}

fn check_probability(p: f64) -> Result<(), ModelError> {
    if (0.0..=1.0).contains(&p) {
        Ok(())
    } else {
        Err(ModelError::InvalidProbability(p))
    }
}

fn add(graph: &mut FriendGraph, a: usize, b: usize) -> bool {
    graph.add_edge(NodeIndex::new(a), NodeIndex::new(b))
}

/// `G(n, p)`: every pair of nodes is connected independently with probability `p`.
pub fn erdos_renyi<R: Rng>(n: usize, p: f64, rng: &mut R) -> Result<FriendGraph, ModelError> {
    check_probability(p)?;
    let mut graph = FriendGraph::with_nodes(n);
    for a in 0..n {
        for b in a + 1..n {
            if rng.gen_bool(p) {
                add(&mut graph, a, b);
            }
        }
    }
    Ok(graph)
}

/// Preferential attachment: starting from `m` unconnected nodes, each new node links to `m`
/// distinct existing nodes picked with probability proportional to their degree.
pub fn barabasi_albert<R: Rng>(n: usize, m: usize, rng: &mut R) -> Result<FriendGraph, ModelError> {
    if m < 1 || m >= n {
        return Err(ModelError::InvalidAttachment { m, n });
    }
    let mut graph = FriendGraph::with_nodes(n);
    let mut targets = (0..m).collect::<Vec<_>>();
    // Every node appears once per incident edge.
    let mut repeated = Vec::with_capacity(2 * m * (n - m));
    for source in m..n {
        for &target in &targets {
            add(&mut graph, source, target);
        }
        repeated.extend(targets.iter().copied());
        repeated.extend(std::iter::repeat(source).take(m));

        let mut chosen = BTreeSet::new();
        while chosen.len() < m {
            if let Some(&node) = repeated.choose(rng) {
                chosen.insert(node);
            }
        }
        targets = chosen.into_iter().collect();
    }
    Ok(graph)
}

/// Small world: a ring where each node links to its `k / 2` nearest neighbours on each side,
/// after which each edge `(u, v)` is rewired to `(u, w)` with probability `p`. Rewiring never
/// creates self-loops or duplicate edges, so the edge count stays `n * (k / 2)`.
pub fn watts_strogatz<R: Rng>(
    n: usize,
    k: usize,
    p: f64,
    rng: &mut R,
) -> Result<FriendGraph, ModelError> {
    check_probability(p)?;
    if k >= n {
        return Err(ModelError::InvalidNeighbours { k, n });
    }
    let half = k / 2;
    let mut graph = FriendGraph::with_nodes(n);
    for j in 1..=half {
        for u in 0..n {
            add(&mut graph, u, (u + j) % n);
        }
    }
    for j in 1..=half {
        for u in 0..n {
            let v = (u + j) % n;
            if !rng.gen_bool(p) {
                continue;
            }
            // Already connected to everything.
            if graph.degree(NodeIndex::new(u)) >= n - 1 {
                continue;
            }
            let mut w = rng.gen_range(0..n);
            while w == u || graph.has_edge(NodeIndex::new(u), NodeIndex::new(w)) {
                w = rng.gen_range(0..n);
            }
            if graph.remove_edge(NodeIndex::new(u), NodeIndex::new(v)) {
                add(&mut graph, u, w);
            }
        }
    }
    Ok(graph)
}

/// Random stub matching over `degrees`, where node `i` gets `degrees[i]` stubs. Parallel edges
/// collapse and self-loops are dropped, so realised degrees can fall below the requested ones.
pub fn configuration_model<R: Rng>(
    degrees: &[usize],
    rng: &mut R,
) -> Result<FriendGraph, ModelError> {
    let total = degrees.iter().sum::<usize>();
    if total % 2 != 0 {
        return Err(ModelError::OddDegreeSum(total));
    }
    let mut stubs = degrees
        .iter()
        .enumerate()
        .flat_map(|(node, &degree)| std::iter::repeat(node).take(degree))
        .collect::<Vec<_>>();
    stubs.shuffle(rng);
    let mut graph = FriendGraph::with_nodes(degrees.len());
    for pair in stubs.chunks_exact(2) {
        add(&mut graph, pair[0], pair[1]);
    }
    Ok(graph)
}
