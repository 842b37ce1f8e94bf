use anyhow::Result;
use itertools::Itertools;

use crate::analysis::clustering::local_clustering_all;
use crate::analysis::degree::degree_sequence;
use crate::analysis::paths::all_shortest_path_lengths;
use crate::generator::Generator;
use crate::model::Model;
use crate::output::Output;

pub const DEFAULT_BINS: usize = 50;
const BAR_WIDTH: usize = 50;

/// Text histograms of node degrees, local clustering coefficients and shortest path lengths.
#[derive(Debug)]
pub struct Histogram {
    bins: usize,
}

impl Default for Histogram {
    fn default() -> Self {
        Self::new(DEFAULT_BINS)
    }
}

impl Histogram {
    pub fn new(bins: usize) -> Self {
        Self { bins: bins.max(1) }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Bin {
    pub start: f64,
    pub end: f64,
    pub count: usize,
}

impl Generator for Histogram {
    fn generate(&mut self, model: &Model, o: &mut dyn Output) -> Result<()> {
        let graph = model.graph();
        let degrees = degree_sequence(graph)
            .into_iter()
            .map(|d| d as f64)
            .collect_vec();
        let path_lengths = all_shortest_path_lengths(graph)
            .into_iter()
            .filter(|&length| length > 0)
            .map(|length| length as f64)
            .collect_vec();

        write_histogram(o, "Degree distribution", &bins(&degrees, self.bins))?;
        o.newline()?;
        write_histogram(
            o,
            "Local clustering coefficient distribution",
            &bins(&local_clustering_all(graph), self.bins),
        )?;
        o.newline()?;
        write_histogram(
            o,
            "Shortest path length distribution",
            &bins(&path_lengths, self.bins),
        )
    }
}

/// Splits `[min, max]` of `values` into `count` equal-width bins. Every bin is half-open except
/// the last, which also holds `max`. When all values are equal the range is widened to
/// `[v - 0.5, v + 0.5]`. No bins for no values.
pub fn bins(values: &[f64], count: usize) -> Vec<Bin> {
    let Some((min, max)) = values.iter().copied().minmax().into_option() else {
        return vec![];
    };
    let (min, max) = if min == max {
        (min - 0.5, max + 0.5)
    } else {
        (min, max)
    };
    let count = count.max(1);
    let width = (max - min) / count as f64;
    let mut bins = (0..count)
        .map(|i| Bin {
            start: min + width * i as f64,
            end: if i + 1 == count {
                max
            } else {
                min + width * (i + 1) as f64
            },
            count: 0,
        })
        .collect_vec();
    for value in values {
        let i = (((value - min) / width) as usize).min(count - 1);
        bins[i].count += 1;
    }
    bins
}

fn write_histogram(o: &mut dyn Output, title: &str, bins: &[Bin]) -> Result<()> {
    o.write_line(title)?;
    if bins.is_empty() {
        return o.write_line("  (no data)");
    }
    let largest = bins.iter().map(|bin| bin.count).max().unwrap_or(0).max(1);
    for (i, bin) in bins.iter().enumerate() {
        let bar = "#".repeat((bin.count * BAR_WIDTH).div_ceil(largest));
        let close = if i + 1 == bins.len() { ']' } else { ')' };
        o.write_line(&format!(
            "  [{:>10.4}, {:>10.4}{} {:>6} {}",
            bin.start, bin.end, close, bin.count, bar
        ))?;
    }
    Ok(())
}
