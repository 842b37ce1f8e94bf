use anyhow::Result;

use crate::input::Input;
use crate::model::Person;

/// Stores all records in memory.
#[derive(Debug, Default, Clone)]
pub struct Buffer {
    records: Vec<Person>,
}

impl Buffer {
    pub fn new(records: Vec<Person>) -> Self {
        Self { records }
    }
}

impl Input for Buffer {
    fn records(&mut self) -> Result<Vec<Person>> {
        Ok(self.records.clone())
    }
}
