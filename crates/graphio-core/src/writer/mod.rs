//! Format writers: the inverse of readers
//!
//! A writer is driven as `begin` → `add_node`* → `add_edge`* → `end`.
//! [`GraphWriterHelper`] does this for a whole [`SourceGraph`](crate::SourceGraph).

pub mod dgs;
pub mod edge;
pub mod factory;
pub mod graphml;
pub mod helper;

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::attributes::AttributeMap;
use crate::error::{Error, Result};

pub use dgs::DgsWriter;
pub use edge::EdgeWriter;
pub use factory::{writer_for, WriterFormat};
pub use graphml::GraphMlWriter;
pub use helper::GraphWriterHelper;

/// Output side of one graph format
pub trait GraphWriter {
    /// Start writing the graph `graph_id` to `out`
    fn begin_stream(&mut self, out: Box<dyn Write>, graph_id: &str) -> Result<()>;

    /// Start writing the graph `graph_id` to a file, created or truncated
    fn begin(&mut self, target: &Path, graph_id: &str) -> Result<()> {
        let file = File::create(target).map_err(|e| Error::resource(target, e))?;
        self.begin_stream(Box::new(BufWriter::new(file)), graph_id)
    }

    fn add_node(&mut self, id: &str, attributes: Option<&AttributeMap>) -> Result<()>;

    fn add_edge(
        &mut self,
        id: &str,
        from: &str,
        to: &str,
        directed: bool,
        attributes: Option<&AttributeMap>,
    ) -> Result<()>;

    /// Finish the document, flush and release the output
    fn end(&mut self) -> Result<()>;
}

/// Output held by a writer between `begin` and `end`
#[derive(Default)]
pub struct Output {
    out: Option<Box<dyn Write>>,
}

impl Output {
    pub fn open(&mut self, out: Box<dyn Write>) -> Result<()> {
        if self.out.is_some() {
            return Err(Error::AlreadyStarted);
        }
        self.out = Some(out);
        Ok(())
    }

    pub fn get(&mut self) -> Result<&mut dyn Write> {
        match self.out.as_mut() {
            Some(out) => Ok(out.as_mut()),
            None => Err(Error::NotStarted),
        }
    }

    /// Flush and drop the output
    pub fn close(&mut self) -> Result<()> {
        let mut out = self.out.take().ok_or(Error::NotStarted)?;
        out.flush()?;
        Ok(())
    }
}
