//! Edge-list writer
//!
//! Writes one `from to` line per edge. Nodes are implied by the edges, so
//! isolated nodes, attributes and edge direction are not written.

use std::io::Write;

use super::{GraphWriter, Output};
use crate::attributes::AttributeMap;
use crate::error::{Error, Result};

pub struct EdgeWriter {
    output: Output,
    comment_char: Option<char>,
}

impl EdgeWriter {
    pub fn new() -> Self {
        Self {
            output: Output::default(),
            comment_char: Some('#'),
        }
    }

    /// Comment character the reading side will use
    pub fn with_comment_char(mut self, comment_char: Option<char>) -> Self {
        self.comment_char = comment_char;
        self
    }

    fn identifier(&self, id: &str) -> Result<String> {
        if id.contains('"') || id.contains('\n') || id.contains('\r') {
            return Err(Error::Unrepresentable(format!(
                "identifier {:?} in edge-list format",
                id
            )));
        }
        let needs_quotes = id.is_empty()
            || id
                .chars()
                .any(|c| c.is_whitespace() || Some(c) == self.comment_char);
        if needs_quotes {
            Ok(format!("\"{}\"", id))
        } else {
            Ok(id.to_string())
        }
    }
}

impl Default for EdgeWriter {
    fn default() -> Self {
        Self::new()
    }
}

impl GraphWriter for EdgeWriter {
    fn begin_stream(&mut self, out: Box<dyn Write>, graph_id: &str) -> Result<()> {
        self.output.open(out)?;
        if let Some(c) = self.comment_char {
            if !graph_id.contains('\n') {
                writeln!(self.output.get()?, "{} {}", c, graph_id)?;
            }
        }
        Ok(())
    }

    fn add_node(&mut self, _id: &str, _attributes: Option<&AttributeMap>) -> Result<()> {
        self.output.get()?;
        Ok(())
    }

    fn add_edge(
        &mut self,
        _id: &str,
        from: &str,
        to: &str,
        _directed: bool,
        _attributes: Option<&AttributeMap>,
    ) -> Result<()> {
        let line = format!("{} {}", self.identifier(from)?, self.identifier(to)?);
        writeln!(self.output.get()?, "{}", line)?;
        Ok(())
    }

    fn end(&mut self) -> Result<()> {
        self.output.close()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::writer::testing::SharedBuffer;

    #[test]
    fn test_edge_lines() {
        let buffer = SharedBuffer::default();
        let mut writer = EdgeWriter::new();

        writer.begin_stream(Box::new(buffer.clone()), "g").unwrap();
        writer.add_node("a", None).unwrap();
        writer.add_edge("0", "a", "b", true, None).unwrap();
        writer.add_edge("1", "New York", "#2", false, None).unwrap();
        writer.end().unwrap();

        assert_eq!(buffer.text(), "# g\na b\n\"New York\" \"#2\"\n");
    }

    #[test]
    fn test_embedded_quote_is_unrepresentable() {
        let buffer = SharedBuffer::default();
        let mut writer = EdgeWriter::new().with_comment_char(None);
        writer.begin_stream(Box::new(buffer.clone()), "g").unwrap();

        let err = writer.add_edge("0", "say \"hi\"", "b", false, None).unwrap_err();
        assert!(matches!(err, Error::Unrepresentable(_)));
        writer.end().unwrap();
        assert_eq!(buffer.text(), "");
    }
}
