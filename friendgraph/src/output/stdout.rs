use std::io::{stdout, Write};

use anyhow::Result;

use crate::output::Output;

/// Writes to stdout, preceded by a `header` line on first write.
#[derive(Debug, Default)]
pub struct StdOut {
    header: String,
    started: bool,
}

impl StdOut {
    pub fn new(header: impl ToString) -> Self {
        Self {
            header: header.to_string(),
            started: false,
        }
    }

    fn start(&mut self) -> Result<()> {
        if !self.started && !self.header.is_empty() {
            writeln!(stdout(), "{}", self.header)?;
        }
        self.started = true;
        Ok(())
    }
}

impl Output for StdOut {
    fn write_str(&mut self, data: &str) -> Result<()> {
        self.start()?;
        stdout().write_all(data.as_bytes())?;
        Ok(())
    }

    fn write(&mut self, data: char) -> Result<()> {
        let mut buf = [0; 4];
        self.write_str(data.encode_utf8(&mut buf))
    }

    fn newline(&mut self) -> Result<()> {
        self.write('\n')
    }

    fn flush(&mut self) -> Result<()> {
        stdout().flush()?;
        Ok(())
    }
}
