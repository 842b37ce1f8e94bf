use std::fmt::Debug;

use anyhow::Result;

pub use buffer::Buffer;
pub use file::File;
pub use stdout::StdOut;

mod buffer;
mod file;
mod stdout;

/// Destination for the text a [crate::Generator] produces.
pub trait Output: Debug {
    fn write_str(&mut self, data: &str) -> Result<()>;
    fn write(&mut self, data: char) -> Result<()>;
    fn newline(&mut self) -> Result<()>;

    /// Called once a generator has finished writing.
    fn flush(&mut self) -> Result<()> {
        Ok(())
    }

    fn write_line(&mut self, data: &str) -> Result<()> {
        self.write_str(data)?;
        self.newline()
    }
}
