//! GraphML writer
//!
//! GraphML declares attribute keys before the graph, so elements are
//! buffered until `end` and the document is written in one go.

use std::io::Write;

use serde_json::Value;

use super::{GraphWriter, Output};
use crate::attributes::{value_text, AttributeMap};
use crate::error::Result;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Domain {
    Node,
    Edge,
}

impl Domain {
    fn as_str(self) -> &'static str {
        match self {
            Self::Node => "node",
            Self::Edge => "edge",
        }
    }
}

struct Key {
    domain: Domain,
    name: String,
    kind: &'static str,
}

#[derive(Default)]
pub struct GraphMlWriter {
    output: Output,
    graph_id: String,
    keys: Vec<Key>,
    body: String,
}

impl GraphMlWriter {
    pub fn new() -> Self {
        Self::default()
    }

    fn key_for(&mut self, domain: Domain, name: &str, value: &Value) -> String {
        let index = match self
            .keys
            .iter()
            .position(|k| k.domain == domain && k.name == name)
        {
            Some(index) => index,
            None => {
                self.keys.push(Key {
                    domain,
                    name: name.to_string(),
                    kind: value_kind(value),
                });
                self.keys.len() - 1
            }
        };
        format!("d{}", index)
    }

    fn push_data(&mut self, domain: Domain, attributes: Option<&AttributeMap>) {
        let Some(attributes) = attributes else {
            return;
        };
        for (name, value) in attributes {
            let key = self.key_for(domain, name, value);
            self.body.push_str(&format!(
                "      <data key=\"{}\">{}</data>\n",
                key,
                xml_escape(&value_text(value))
            ));
        }
    }

    fn push_element(
        &mut self,
        open: String,
        tag: &str,
        domain: Domain,
        attributes: Option<&AttributeMap>,
    ) {
        if attributes.map_or(true, |a| a.is_empty()) {
            self.body.push_str(&format!("    {}/>\n", open));
            return;
        }
        self.body.push_str(&format!("    {}>\n", open));
        self.push_data(domain, attributes);
        self.body.push_str(&format!("    </{}>\n", tag));
    }
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Bool(_) => "boolean",
        Value::Number(n) if n.is_i64() || n.is_u64() => "long",
        Value::Number(_) => "double",
        _ => "string",
    }
}

fn xml_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

impl GraphWriter for GraphMlWriter {
    fn begin_stream(&mut self, out: Box<dyn Write>, graph_id: &str) -> Result<()> {
        self.output.open(out)?;
        self.graph_id = graph_id.to_string();
        self.keys.clear();
        self.body.clear();
        Ok(())
    }

    fn add_node(&mut self, id: &str, attributes: Option<&AttributeMap>) -> Result<()> {
        self.output.get()?;
        let open = format!("<node id=\"{}\"", xml_escape(id));
        self.push_element(open, "node", Domain::Node, attributes);
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
        self.output.get()?;
        let open = format!(
            "<edge id=\"{}\" source=\"{}\" target=\"{}\" directed=\"{}\"",
            xml_escape(id),
            xml_escape(from),
            xml_escape(to),
            directed
        );
        self.push_element(open, "edge", Domain::Edge, attributes);
        Ok(())
    }

    fn end(&mut self) -> Result<()> {
        let out = self.output.get()?;
        writeln!(out, r#"<?xml version="1.0" encoding="UTF-8"?>"#)?;
        writeln!(out, r#"<graphml xmlns="http://graphml.graphdrawing.org/xmlns">"#)?;
        for (i, key) in self.keys.iter().enumerate() {
            writeln!(
                out,
                "  <key id=\"d{}\" for=\"{}\" attr.name=\"{}\" attr.type=\"{}\"/>",
                i,
                key.domain.as_str(),
                xml_escape(&key.name),
                key.kind
            )?;
        }
        writeln!(
            out,
            "  <graph id=\"{}\" edgedefault=\"undirected\">",
            xml_escape(&self.graph_id)
        )?;
        out.write_all(self.body.as_bytes())?;
        writeln!(out, "  </graph>")?;
        writeln!(out, "</graphml>")?;

        self.body.clear();
        self.output.close()
    }
}
