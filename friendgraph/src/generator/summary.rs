use anyhow::Result;

use crate::analysis::compare::{ModelComparison, Properties};
use crate::analysis::{compare, summarize, top_nodes, Measure, ModelParams};
use crate::generator::dot::DEFAULT_TOP;
use crate::generator::{round4, Generator};
use crate::model::Model;
use crate::output::Output;

/// A plain text report: graph statistics, the top nodes by [Measure] and the comparison with
/// random-graph models.
#[derive(Debug)]
pub struct Summary {
    params: ModelParams,
    top: usize,
    measure: Measure,
}

impl Default for Summary {
    fn default() -> Self {
        Self::new(ModelParams::default(), DEFAULT_TOP, Measure::default())
    }
}

impl Summary {
    pub fn new(params: ModelParams, top: usize, measure: Measure) -> Self {
        Self {
            params,
            top,
            measure,
        }
    }
}

impl Generator for Summary {
    fn generate(&mut self, model: &Model, o: &mut dyn Output) -> Result<()> {
        let graph = model.graph();
        let summary = summarize(graph);

        o.write_line("Graph")?;
        write_row(o, "Records", model.records().len().to_string())?;
        write_row(o, "Nodes", summary.nodes.to_string())?;
        write_row(o, "Edges", summary.edges.to_string())?;
        write_row(o, "Connected components", summary.components.to_string())?;
        if let Some(degrees) = summary.degrees {
            write_row(o, "Min degree", degrees.min.to_string())?;
            write_row(o, "Max degree", degrees.max.to_string())?;
            write_row(o, "Mean degree", round4(degrees.mean))?;
        }
        write_row(o, "Transitivity", round4(summary.transitivity))?;
        write_row(o, "Average clustering", round4(summary.average_clustering))?;
        match summary.paths {
            Some(paths) => {
                write_row(o, "Diameter", paths.diameter.to_string())?;
                write_row(o, "Radius", paths.radius.to_string())?;
                write_row(
                    o,
                    "Average shortest path",
                    round4(paths.average_shortest_path),
                )?;
            }
            None => write_row(o, "Diameter", "n/a".to_string())?,
        }
        match summary.power_law {
            Some(fit) => {
                write_row(o, "Power law alpha", round4(fit.alpha))?;
                write_row(o, "Power law sigma", round4(fit.sigma))?;
                write_row(o, "Power law x_min", fit.x_min.to_string())?;
            }
            None => write_row(o, "Power law alpha", "n/a".to_string())?,
        }

        if graph.is_empty() {
            return Ok(());
        }

        o.newline()?;
        o.write_line(&format!("Top {} nodes by {}", self.top, self.measure.name()))?;
        let values = self.measure.values(graph);
        for (rank, ranked) in top_nodes(graph, &values, self.top).iter().enumerate() {
            o.write_line(&format!(
                "  {:>3}. {} (ID: {}): {}",
                rank + 1,
                ranked.name,
                ranked.id,
                round4(ranked.value)
            ))?;
        }

        o.newline()?;
        o.write_line("Model comparison")?;
        let comparison = compare(graph, &self.params);
        write_table_header(o, "distinct degrees")?;
        write_properties(o, "Real graph", &comparison.real)?;
        for model in &comparison.models {
            write_properties(o, &model.kind.to_string(), &model.properties)?;
        }
        o.newline()?;
        o.write_line("Absolute difference from the real graph")?;
        write_table_header(o, "sq. degree diff")?;
        for model in &comparison.models {
            write_difference(o, model)?;
        }
        Ok(())
    }
}

fn write_row(o: &mut dyn Output, label: &str, value: String) -> Result<()> {
    o.write_line(&format!("  {:<24}{}", format!("{}:", label), value))
}

fn write_table_header(o: &mut dyn Output, last_column: &str) -> Result<()> {
    o.write_line(&format!(
        "  {:<22}{:>8}{:>10}{:>12}{:>12}{:>18}",
        "", "edges", "diameter", "clustering", "avg path", last_column
    ))
}

fn write_properties(o: &mut dyn Output, name: &str, properties: &Properties) -> Result<()> {
    o.write_line(&format!(
        "  {:<22}{:>8}{:>10}{:>12}{:>12}{:>18}",
        name,
        properties.edges,
        or_na(properties.diameter.map(|d| d.to_string())),
        round4(properties.average_clustering),
        or_na(properties.average_shortest_path.map(round4)),
        properties.degree_distribution.len(),
    ))
}

fn write_difference(o: &mut dyn Output, model: &ModelComparison) -> Result<()> {
    let difference = &model.difference;
    o.write_line(&format!(
        "  {:<22}{:>8}{:>10}{:>12}{:>12}{:>18}",
        model.kind.to_string(),
        difference.edges,
        or_na(difference.diameter.map(|d| d.to_string())),
        round4(difference.average_clustering),
        or_na(difference.average_shortest_path.map(round4)),
        difference.degree_distribution,
    ))
}

fn or_na(value: Option<String>) -> String {
    value.unwrap_or_else(|| "n/a".to_string())
}
