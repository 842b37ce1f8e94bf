use crate::model::{FriendGraph, PersonId};

#[derive(Debug, Clone, PartialEq)]
pub struct Ranked {
    pub id: PersonId,
    pub name: String,
    pub value: f64,
}

/// The `n` nodes with the highest `values`, where `values[i]` belongs to node index `i`. Ties
/// are broken by id.
pub fn top_nodes(graph: &FriendGraph, values: &[f64], n: usize) -> Vec<Ranked> {
    let mut ranked = graph
        .node_indices()
        .zip(values)
        .map(|(index, &value)| {
            let node = graph.node(index);
            Ranked {
                id: node.id.clone(),
                name: node.name().to_string(),
                value,
            }
        })
        .collect::<Vec<_>>();
    ranked.sort_by(|a, b| b.value.total_cmp(&a.value).then_with(|| a.id.cmp(&b.id)));
    ranked.truncate(n);
    ranked
}
