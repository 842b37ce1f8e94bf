use std::fmt::Debug;

use anyhow::Result;

use crate::model::Model;
use crate::output::Output;

pub use dot::{Dot, DEFAULT_TOP};
pub use gml::Gml;
pub use histogram::{Bin, Histogram, DEFAULT_BINS};
pub use json::Json;
pub use summary::Summary;

mod dot;
mod gml;
mod histogram;
mod json;
mod summary;

/// Renders a [Model] (or some aspect of it) as text into an [Output].
pub trait Generator: Debug {
    fn generate(&mut self, model: &Model, output: &mut dyn Output) -> Result<()>;
}

/// Formats `value` with 4 decimals.
pub(crate) fn round4(value: f64) -> String {
    format!("{:.4}", value)
}
