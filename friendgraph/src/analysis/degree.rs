use std::collections::BTreeMap;

use crate::model::FriendGraph;

/// degree -> number of nodes with that degree.
pub type DegreeDistribution = BTreeMap<usize, usize>;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DegreeStats {
    pub min: usize,
    pub max: usize,
    pub mean: f64,
}

/// Degree of every node, in node index order.
pub fn degree_sequence(graph: &FriendGraph) -> Vec<usize> {
    graph
        .node_indices()
        .map(|index| graph.degree(index))
        .collect()
}

/// `None` for an empty sequence.
pub fn degree_stats(degrees: &[usize]) -> Option<DegreeStats> {
    let min = *degrees.iter().min()?;
    let max = *degrees.iter().max()?;
    let mean = degrees.iter().sum::<usize>() as f64 / degrees.len() as f64;
    Some(DegreeStats { min, max, mean })
}

pub fn degree_distribution(degrees: &[usize]) -> DegreeDistribution {
    degrees
        .iter()
        .fold(DegreeDistribution::new(), |mut distribution, &degree| {
            *distribution.entry(degree).or_default() += 1;
            distribution
        })
}

/// `2m / (n(n-1))`, or 0 for graphs with fewer than two nodes.
pub fn density(graph: &FriendGraph) -> f64 {
    let n = graph.node_count();
    if n < 2 {
        return 0.0;
    }
    2.0 * graph.edge_count() as f64 / (n * (n - 1)) as f64
}

#[cfg(test)]
mod tests {
    use crate::analysis::degree::{
        degree_distribution, degree_sequence, degree_stats, density, DegreeStats,
    };
    use crate::test_util::{assert_close, indexed_graph};

    #[test]
    fn hand_computed_sequence() {
        // 0 - 1 - 2 - 3 and 1 - 3, plus isolated 4
        let graph = indexed_graph(5, &[(0, 1), (1, 2), (2, 3), (1, 3)]);
        let degrees = degree_sequence(&graph);
        assert_eq!(degrees, vec![1, 3, 2, 2, 0]);
        assert_eq!(
            degree_stats(&degrees),
            Some(DegreeStats {
                min: 0,
                max: 3,
                mean: 1.6
            })
        );
    }

    #[test]
    fn empty_sequence_has_no_stats() {
        assert_eq!(degree_stats(&[]), None);
    }

    #[test]
    fn distribution_counts_degrees() {
        let distribution = degree_distribution(&[1, 3, 2, 2, 0]);
        assert_eq!(
            distribution.into_iter().collect::<Vec<_>>(),
            vec![(0, 1), (1, 1), (2, 2), (3, 1)]
        );
    }

    #[test]
    fn density_of_small_graphs() {
        assert_close(density(&indexed_graph(0, &[])), 0.0);
        assert_close(density(&indexed_graph(1, &[])), 0.0);
        assert_close(density(&indexed_graph(3, &[(0, 1), (1, 2), (0, 2)])), 1.0);
        assert_close(density(&indexed_graph(4, &[(0, 1)])), 1.0 / 6.0);
    }
}
