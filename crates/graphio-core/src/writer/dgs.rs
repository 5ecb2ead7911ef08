//! DGS writer, the default output format
//!
//! ```text
//! DGS004
//! "graph" 0 0
//! an "a" color="red"
//! ae "0" "a" > "b" weight=2
//! ```

use std::io::Write;

use serde_json::Value;

use super::{GraphWriter, Output};
use crate::attributes::AttributeMap;
use crate::error::Result;

const MAGIC: &str = "DGS004";

#[derive(Default)]
pub struct DgsWriter {
    output: Output,
}

impl DgsWriter {
    pub fn new() -> Self {
        Self::default()
    }
}

fn quote(s: &str) -> String {
    format!("\"{}\"", s.replace('\\', "\\\\").replace('"', "\\\""))
}

fn is_plain_name(s: &str) -> bool {
    !s.is_empty()
        && s.chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '.')
        && !s.starts_with(|c: char| c.is_ascii_digit())
}

fn write_attributes(out: &mut dyn Write, attributes: Option<&AttributeMap>) -> Result<()> {
    let Some(attributes) = attributes else {
        return Ok(());
    };
    for (name, value) in attributes {
        let name = if is_plain_name(name) {
            name.clone()
        } else {
            quote(name)
        };
        match value {
            Value::Null => write!(out, " {}", name)?,
            Value::Bool(_) | Value::Number(_) => write!(out, " {}={}", name, value)?,
            Value::String(s) => write!(out, " {}={}", name, quote(s))?,
            other => write!(out, " {}={}", name, quote(&other.to_string()))?,
        }
    }
    Ok(())
}

impl GraphWriter for DgsWriter {
    fn begin_stream(&mut self, out: Box<dyn Write>, graph_id: &str) -> Result<()> {
        self.output.open(out)?;
        let out = self.output.get()?;
        writeln!(out, "{}", MAGIC)?;
        writeln!(out, "{} 0 0", quote(graph_id))?;
        Ok(())
    }

    fn add_node(&mut self, id: &str, attributes: Option<&AttributeMap>) -> Result<()> {
        let out = self.output.get()?;
        write!(out, "an {}", quote(id))?;
        write_attributes(out, attributes)?;
        writeln!(out)?;
        Ok(())
    }

    fn add_edge(
        &mut self,
        id: &str,
        from: &str,
        to: &str,
        directed: bool,
        attributes: Option<&AttributeMap>,
    ) -> Result<()> {
        let out = self.output.get()?;
        let arrow = if directed { " >" } else { "" };
        write!(out, "ae {} {}{} {}", quote(id), quote(from), arrow, quote(to))?;
        write_attributes(out, attributes)?;
        writeln!(out)?;
        Ok(())
    }

    fn end(&mut self) -> Result<()> {
        self.output.close()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attributes::attributes;
    use crate::error::Error;
    use crate::writer::testing::SharedBuffer;
    use serde_json::json;

    #[test]
    fn test_dgs_document() {
        let buffer = SharedBuffer::default();
        let mut writer = DgsWriter::new();

        writer.begin_stream(Box::new(buffer.clone()), "g").unwrap();
        writer
            .add_node(
                "a",
                Some(&attributes([("color", json!("red")), ("size", json!(2))])),
            )
            .unwrap();
        writer.add_node("b", None).unwrap();
        writer.add_edge("0", "a", "b", true, None).unwrap();
        writer
            .add_edge("1", "b", "a", false, Some(&attributes([("odd key", json!(null))])))
            .unwrap();
        writer.end().unwrap();

        assert_eq!(
            buffer.text(),
            "DGS004\n\
             \"g\" 0 0\n\
             an \"a\" color=\"red\" size=2\n\
             an \"b\"\n\
             ae \"0\" \"a\" > \"b\"\n\
             ae \"1\" \"b\" \"a\" \"odd key\"\n"
        );
    }

    #[test]
    fn test_quotes_are_escaped() {
        assert_eq!(quote("say \"hi\""), "\"say \\\"hi\\\"\"");
    }

    #[test]
    fn test_write_before_begin_fails() {
        let mut writer = DgsWriter::new();
        assert!(matches!(writer.add_node("a", None), Err(Error::NotStarted)));
        assert!(matches!(writer.end(), Err(Error::NotStarted)));
    }
}
