use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;

use anyhow::{Context, Result};
use log::{info, warn};
use serde_json::Value;

use crate::input::Input;
use crate::model::Person;

/// Reads records from a json array previously written by [crate::generator::Json].
#[derive(Debug)]
pub struct JsonFile {
    path: PathBuf,
}

impl JsonFile {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self { path: path.into() }
    }
}

impl Input for JsonFile {
    fn records(&mut self) -> Result<Vec<Person>> {
        info!("Reading records from {:?}...", self.path);
        let file = File::open(&self.path)
            .with_context(|| format!("open records file {:?}", self.path))?;
        let items: Vec<Value> = serde_json::from_reader(BufReader::new(file))
            .with_context(|| format!("parse records file {:?}", self.path))?;
        let total = items.len();
        let records = items
            .into_iter()
            .filter_map(Person::from_item)
            .collect::<Vec<_>>();
        if records.len() < total {
            warn!(
                "Skipped {} records without an id in {:?}",
                total - records.len(),
                self.path
            );
        }
        Ok(records)
    }
}
