use std::collections::BTreeMap;

use anyhow::Result;
use serde_json::Value;

use crate::generator::Generator;
use crate::model::Model;
use crate::output::Output;

const INDENT: &str = "  ";

/// The graph in GML. Nodes get their index as `id` and their person id as `label`; node
/// attributes become GML keys. Strings are quoted with `"`, `&` and non-ASCII characters
/// escaped as `&#NNN;` character references. Booleans become 0/1, objects become nested lists
/// and arrays repeat their key once per element.
#[derive(Debug, Default)]
pub struct Gml {}

impl Generator for Gml {
    fn generate(&mut self, model: &Model, o: &mut dyn Output) -> Result<()> {
        let graph = model.graph();
        o.write_line("graph [")?;
        for index in graph.node_indices() {
            let node = graph.node(index);
            write_open(o, 1, "node")?;
            write_key(o, 2, "id", &index.index().to_string())?;
            write_key(o, 2, "label", &quote(&node.id))?;
            write_attributes(o, 2, &node.attributes)?;
            write_close(o, 1)?;
        }
        for (a, b) in graph.edges() {
            write_open(o, 1, "edge")?;
            write_key(o, 2, "source", &a.index().to_string())?;
            write_key(o, 2, "target", &b.index().to_string())?;
            write_close(o, 1)?;
        }
        o.write_line("]")
    }
}

fn write_attributes(o: &mut dyn Output, depth: usize, attributes: &BTreeMap<String, Value>) -> Result<()> {
    for (key, value) in attributes {
        if key == "id" || key == "label" || !is_valid_key(key) {
            continue;
        }
        write_value(o, depth, key, value)?;
    }
    Ok(())
}

fn write_value(o: &mut dyn Output, depth: usize, key: &str, value: &Value) -> Result<()> {
    match value {
        Value::Null => Ok(()),
        Value::Bool(b) => write_key(o, depth, key, if *b { "1" } else { "0" }),
        Value::Number(n) => write_key(o, depth, key, &n.to_string()),
        Value::String(s) => write_key(o, depth, key, &quote(s)),
        Value::Array(items) => {
            for item in items {
                write_value(o, depth, key, item)?;
            }
            Ok(())
        }
        Value::Object(fields) => {
            write_open(o, depth, key)?;
            for (child_key, child) in fields {
                if is_valid_key(child_key) {
                    write_value(o, depth + 1, child_key, child)?;
                }
            }
            write_close(o, depth)
        }
    }
}

fn write_open(o: &mut dyn Output, depth: usize, key: &str) -> Result<()> {
    o.write_str(&INDENT.repeat(depth))?;
    o.write_str(key)?;
    o.write_line(" [")
}

fn write_close(o: &mut dyn Output, depth: usize) -> Result<()> {
    o.write_str(&INDENT.repeat(depth))?;
    o.write_line("]")
}

fn write_key(o: &mut dyn Output, depth: usize, key: &str, value: &str) -> Result<()> {
    o.write_str(&INDENT.repeat(depth))?;
    o.write_str(key)?;
    o.write(' ')?;
    o.write_line(value)
}

/// GML keys start with a letter and continue with letters, digits or `_`.
fn is_valid_key(key: &str) -> bool {
    let mut chars = key.chars();
    matches!(chars.next(), Some(c) if c.is_ascii_alphabetic())
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

fn quote(value: &str) -> String {
    let mut quoted = String::with_capacity(value.len() + 2);
    quoted.push('"');
    for c in value.chars() {
        if c == '"' || c == '&' || !c.is_ascii() || c.is_ascii_control() {
            quoted.push_str(&format!("&#{};", c as u32));
        } else {
            quoted.push(c);
        }
    }
    quoted.push('"');
    quoted
}
