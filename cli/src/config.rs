use std::path::PathBuf;

use anyhow::{anyhow, Result};
use clap::{Parser, ValueEnum};
use friendgraph::analysis::{Measure, ModelParams};
use friendgraph::generator;
use itertools::Itertools;

#[derive(Parser, Debug)]
#[command(name = "friendgraph", author, version, about)]
pub struct Config {
    /// Id of the person whose friends (and their friends) are collected.
    #[arg(long, env = "USER_ID")]
    pub user_id: Option<String>,

    /// VK API access token. Use --authorize to obtain one.
    #[arg(long, env = "ACCESS_TOKEN", hide_env_values = true)]
    pub access_token: Option<String>,

    /// VK application id, used by --authorize.
    #[arg(long, env = "APP_ID")]
    pub app_id: Option<String>,

    /// Print the OAuth URL to open in a browser to obtain an access token, then exit.
    #[arg(long, requires = "app_id")]
    pub authorize: bool,

    /// Read previously saved records (the output of the `json` generator) instead of collecting
    /// them from the API.
    #[arg(short, long, value_name = "PATH")]
    pub records: Option<PathBuf>,

    /// Path to a [friendgraph::source::vk::Config] in json format.
    #[arg(long)]
    pub source_config: Option<PathBuf>,

    /// Pause between friend list requests, in milliseconds.
    #[arg(long, default_value_t = 500)]
    pub delay_ms: u64,

    /// Name of generators to use.
    #[arg(short, long, required_unless_present = "authorize")]
    pub generator: Vec<GeneratorName>,

    /// All relative --outputs will be relative to this path. Defaults to working directory.
    #[arg(long, default_value = ".")]
    pub output_root: PathBuf,

    /// Each argument should be a key=value pair where the key is a [GeneratorName] and the value
    /// is the path of the file to write.
    ///
    /// See also --output-root to set the relative root directory.
    ///
    /// If not supplied, each generator writes to its default file name, e.g.
    /// `friends_of_friends.json` for `json`.
    ///
    /// Example:
    ///     --output-root ./out -o gml=graph.gml -o summary=report.txt
    #[arg(short, long, value_parser=parse_output)]
    pub output: Vec<Output>,

    /// Also write the output of these generators to stdout.
    #[arg(long)]
    pub stdout: Vec<GeneratorName>,

    /// Write every generator's output to stdout only.
    #[arg(long)]
    pub dry_run: bool,

    /// Seed for the random-graph models. Random when not set.
    #[arg(long)]
    pub seed: Option<u64>,

    /// Edge probability of the Erdős–Rényi model. Defaults to the density of the graph.
    #[arg(long)]
    pub p_er: Option<f64>,

    /// Edges attached per new node in the Barabási–Albert model. Defaults to edges / nodes.
    #[arg(long)]
    pub m_ba: Option<usize>,

    /// Rewiring probability of the Watts–Strogatz model.
    #[arg(long, default_value_t = friendgraph::analysis::compare::DEFAULT_P_WS)]
    pub p_ws: f64,

    /// Number of highest ranked nodes listed in the summary and labelled in the dot graph.
    #[arg(long, default_value_t = generator::DEFAULT_TOP)]
    pub top: usize,

    /// Per-node measure used to rank nodes.
    #[arg(long, value_enum, default_value_t = MeasureName::Degree)]
    pub measure: MeasureName,

    /// Number of bins of each histogram.
    #[arg(long, default_value_t = generator::DEFAULT_BINS)]
    pub bins: usize,
}

#[derive(ValueEnum, Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum GeneratorName {
    Json,
    Gml,
    Dot,
    Summary,
    Histogram,
}

#[derive(ValueEnum, Copy, Clone, Debug, Eq, PartialEq)]
pub enum MeasureName {
    Degree,
    Clustering,
}

#[derive(Clone, Debug)]
pub struct Output {
    pub generator: GeneratorName,
    pub path: PathBuf,
}

fn parse_output(arg: &str) -> Result<Output> {
    let vec = arg.split('=').collect_vec();
    if vec.len() != 2 {
        return Err(anyhow!(
            "output must be in the form '<generator>=<output/path>'"
        ));
    }
    let generator = GeneratorName::from_str(vec[0], true)
        .map_err(|_| anyhow!("'{}' is not a valid generator name", vec[0]))?;
    let path = PathBuf::from(vec[1]);
    Ok(Output { generator, path })
}

impl Config {
    pub fn model_params(&self) -> ModelParams {
        ModelParams {
            p_er: self.p_er,
            m_ba: self.m_ba,
            p_ws: self.p_ws,
            seed: self.seed,
        }
    }
}

impl MeasureName {
    pub fn measure(&self) -> Measure {
        match self {
            MeasureName::Degree => Measure::Degree,
            MeasureName::Clustering => Measure::Clustering,
        }
    }
}

impl GeneratorName {
    pub fn create_impl(&self, config: &Config) -> Box<dyn friendgraph::Generator> {
        let measure = config.measure.measure();
        match self {
            GeneratorName::Json => Box::<generator::Json>::default(),
            GeneratorName::Gml => Box::<generator::Gml>::default(),
            GeneratorName::Dot => Box::new(generator::Dot::new(config.top, measure)),
            GeneratorName::Summary => Box::new(generator::Summary::new(
                config.model_params(),
                config.top,
                measure,
            )),
            GeneratorName::Histogram => Box::new(generator::Histogram::new(config.bins)),
        }
    }

    pub fn default_file_name(&self) -> &'static str {
        match self {
            GeneratorName::Json => "friends_of_friends.json",
            GeneratorName::Gml => "friends_network.gml",
            GeneratorName::Dot => "friends_network.dot",
            GeneratorName::Summary => "summary.txt",
            GeneratorName::Histogram => "histograms.txt",
        }
    }
}
