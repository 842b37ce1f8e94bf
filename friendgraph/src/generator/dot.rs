use std::collections::HashSet;

use anyhow::Result;

use crate::analysis::{top_nodes, Measure};
use crate::generator::Generator;
use crate::model::Model;
use crate::output::Output;

pub const DEFAULT_TOP: usize = 15;

const MIN_WIDTH: f64 = 0.1;
const MAX_WIDTH: f64 = 0.6;

/// The graph as an undirected Graphviz document laid out with `neato` (a spring layout). Node
/// size and colour scale with `measure` and only the `top` highest-ranked nodes are labelled.
#[derive(Debug)]
pub struct Dot {
    top: usize,
    measure: Measure,
}

impl Default for Dot {
    fn default() -> Self {
        Self::new(DEFAULT_TOP, Measure::default())
    }
}

impl Dot {
    pub fn new(top: usize, measure: Measure) -> Self {
        Self { top, measure }
    }
}

impl Generator for Dot {
    fn generate(&mut self, model: &Model, o: &mut dyn Output) -> Result<()> {
        let graph = model.graph();
        let values = self.measure.values(graph);
        let max = values.iter().copied().fold(0.0, f64::max);
        let labelled = top_nodes(graph, &values, self.top)
            .into_iter()
            .map(|ranked| ranked.id)
            .collect::<HashSet<_>>();

        o.write_line("graph friends {")?;
        o.write_line("    layout=neato;")?;
        o.write_line("    overlap=false;")?;
        o.write_line(&format!(
            "    label={};",
            quote(&format!("Friend network (node size: {})", self.measure.name()))
        ))?;
        o.write_line("    node [shape=circle, style=filled, fontsize=8];")?;
        o.write_line("    edge [color=\"#00000033\"];")?;

        for (index, value) in graph.node_indices().zip(&values) {
            let node = graph.node(index);
            let scale = if max > 0.0 { value / max } else { 0.0 };
            let label = if labelled.contains(&node.id) {
                node.name()
            } else {
                ""
            };
            o.write_line(&format!(
                "    {} [label={}, width={:.3}, fillcolor=\"{}\"];",
                quote(&node.id),
                quote(label),
                MIN_WIDTH + (MAX_WIDTH - MIN_WIDTH) * scale,
                color(scale)
            ))?;
        }
        for (a, b) in graph.edge_ids() {
            o.write_line(&format!("    {} -- {};", quote(a), quote(b)))?;
        }
        o.write_line("}")
    }
}

/// Diverging blue-white-red colour for `scale` in `[0, 1]`.
fn color(scale: f64) -> String {
    const LOW: [f64; 3] = [33.0, 102.0, 172.0];
    const MID: [f64; 3] = [247.0, 247.0, 247.0];
    const HIGH: [f64; 3] = [178.0, 24.0, 43.0];
    let scale = scale.clamp(0.0, 1.0);
    let (from, to, t) = if scale < 0.5 {
        (LOW, MID, scale * 2.0)
    } else {
        (MID, HIGH, (scale - 0.5) * 2.0)
    };
    let channel = |i: usize| (from[i] + (to[i] - from[i]) * t).round() as u8;
    format!("#{:02x}{:02x}{:02x}", channel(0), channel(1), channel(2))
}

fn quote(value: &str) -> String {
    format!("\"{}\"", value.replace('\\', "\\\\").replace('"', "\\\""))
}
