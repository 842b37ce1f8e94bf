use anyhow::Result;

use crate::model::Person;

pub use buffer::Buffer;
pub use json_file::JsonFile;

mod buffer;
mod json_file;

/// An [Input] provides the full set of [Person] records a graph is built from, e.g. by crawling
/// an API ([crate::Collector]) or by reading a previously saved records file ([JsonFile]).
///
/// Records are consumed once per [crate::Executor::execute].
pub trait Input {
    fn records(&mut self) -> Result<Vec<Person>>;
}
