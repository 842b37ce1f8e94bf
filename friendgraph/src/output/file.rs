use std::fs;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};

use crate::output::Output;

/// Writes to a single file. The file (and any missing parent directories) is created, or an
/// existing file truncated, on the first write or flush, never by [File::new].
#[derive(Debug)]
pub struct File {
    path: PathBuf,
    writer: Option<BufWriter<fs::File>>,
}

impl File {
    pub fn new<P: Into<PathBuf>>(path: P) -> Result<Self> {
        let path = path.into();
        if path.is_dir() {
            return Err(anyhow!("output path {:?} is a directory", path));
        }
        Ok(Self { path, writer: None })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn writer(&mut self) -> Result<&mut BufWriter<fs::File>> {
        if self.writer.is_none() {
            if let Some(parent) = self.path.parent() {
                fs::create_dir_all(parent).with_context(|| format!("create {:?}", parent))?;
            }
            let file =
                fs::File::create(&self.path).with_context(|| format!("create {:?}", self.path))?;
            self.writer = Some(BufWriter::new(file));
        }
        self.writer
            .as_mut()
            .ok_or_else(|| anyhow!("output file {:?} is not open", self.path))
    }
}

impl Output for File {
    fn write_str(&mut self, data: &str) -> Result<()> {
        self.writer()?.write_all(data.as_bytes())?;
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
        let path = self.path.clone();
        self.writer()?
            .flush()
            .with_context(|| format!("flush {:?}", path))
    }
}
