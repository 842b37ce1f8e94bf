use anyhow::Result;
use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use serde_json::Value;

use crate::generator::Generator;
use crate::model::{Model, Person};
use crate::output::Output;

/// The annotated records as a json array, indented by four spaces. Non-ASCII text is written
/// as-is.
#[derive(Debug, Default)]
pub struct Json {}

impl Generator for Json {
    fn generate(&mut self, model: &Model, output: &mut dyn Output) -> Result<()> {
        let items = Value::Array(model.records().iter().map(Person::to_item).collect());
        let mut data = Vec::new();
        let mut serializer =
            serde_json::Serializer::with_formatter(&mut data, PrettyFormatter::with_indent(b"    "));
        items.serialize(&mut serializer)?;
        output.write_str(&String::from_utf8(data)?)?;
        output.newline()
    }
}
