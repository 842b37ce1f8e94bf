pub use collector::Collector;
pub use executor::Executor;
pub use generator::Generator;
pub use input::Input;
pub use model::Model;
pub use output::Output;
pub use source::Source;

pub mod analysis;
pub mod collector;
pub mod executor;
pub mod generator;
pub mod input;
pub mod model;
pub mod output;
pub mod source;

#[cfg(test)]
mod test_util;
