use std::collections::{HashMap, HashSet};

use log::debug;

use crate::model::{FriendGraph, Node, Person, PersonId};

/// Accumulates [Person] records and builds the mutual-friendship [FriendGraph] from them.
///
/// Records sharing an id are merged: the first record's profile is kept and the friend lists
/// are unioned.
#[derive(Debug, Default)]
pub struct Builder {
    records: Vec<Person>,
    positions: HashMap<PersonId, usize>,
}

impl Builder {
    pub fn merge(&mut self, person: Person) {
        match self.positions.get(&person.id) {
            Some(&position) => {
                let existing = &mut self.records[position];
                for id in person.friends_ids {
                    if !existing.friends_ids.contains(&id) {
                        existing.friends_ids.push(id);
                    }
                }
            }
            None => {
                self.positions.insert(person.id.clone(), self.records.len());
                self.records.push(person);
            }
        }
    }

    pub fn extend(&mut self, people: impl IntoIterator<Item = Person>) {
        for person in people {
            self.merge(person);
        }
    }

    /// Builds the graph in two passes: all nodes, then all mutual edges.
    ///
    /// `a -- b` is added iff `b` is in `a`'s friend list and `a` is in `b`'s. The edge scan
    /// visits every pair of records, so it is quadratic in the number of records.
    pub fn build(&self) -> FriendGraph {
        let mut graph = FriendGraph::default();
        let indices = self
            .records
            .iter()
            .map(|person| {
                graph.add_node(Node {
                    id: person.id.clone(),
                    attributes: person.node_attributes(),
                })
            })
            .collect::<Vec<_>>();

        let friend_sets = self
            .records
            .iter()
            .map(|person| {
                person
                    .friends_ids
                    .iter()
                    .map(String::as_str)
                    .collect::<HashSet<_>>()
            })
            .collect::<Vec<_>>();

        for (i, a) in self.records.iter().enumerate() {
            for (j, b) in self.records.iter().enumerate().skip(i + 1) {
                if friend_sets[i].contains(b.id.as_str()) && friend_sets[j].contains(a.id.as_str())
                {
                    graph.add_edge(indices[i], indices[j]);
                }
            }
        }

        debug!(
            "Built graph with {} nodes and {} edges from {} records",
            graph.node_count(),
            graph.edge_count(),
            self.records.len()
        );
        graph
    }
}
