pub use builder::Builder;
pub use graph::{FriendGraph, Graph, Node};
pub use person::{Person, PersonId};

mod builder;
mod graph;
mod person;

/// Everything a [crate::Generator] can render: the collected records and the graph built from
/// them.
#[derive(Debug, Default)]
pub struct Model {
    records: Vec<Person>,
    graph: FriendGraph,
}

impl Model {
    pub fn new(records: Vec<Person>) -> Self {
        let mut builder = Builder::default();
        builder.extend(records.iter().cloned());
        let graph = builder.build();
        Self { records, graph }
    }

    pub fn records(&self) -> &[Person] {
        &self.records
    }

    pub fn graph(&self) -> &FriendGraph {
        &self.graph
    }
}
