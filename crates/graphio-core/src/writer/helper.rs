//! Output a whole graph through a writer

use std::io::Write;
use std::path::Path;

use super::{writer_for, GraphWriter};
use crate::error::Result;
use crate::graph::SourceGraph;

/// Writes a graph to a file or stream
///
/// The writer receives every node, then every edge, each in the graph's
/// iteration order, between `begin` and `end`. On failure the error is
/// returned as is; whatever was already written stays in place.
pub struct GraphWriterHelper<'g, G: SourceGraph + ?Sized> {
    graph: &'g G,
}

impl<'g, G: SourceGraph + ?Sized> GraphWriterHelper<'g, G> {
    pub fn new(graph: &'g G) -> Self {
        Self { graph }
    }

    /// Write to `path` in the format its extension names (DGS by default)
    pub fn write(&self, path: &Path) -> Result<()> {
        let mut writer = writer_for(path);
        self.write_with(path, writer.as_mut())
    }

    /// Write to `path` with the given writer, whatever the extension
    pub fn write_with(&self, path: &Path, writer: &mut dyn GraphWriter) -> Result<()> {
        writer.begin(path, self.graph.id())?;
        self.output_graph(writer)?;
        writer.end()?;
        tracing::info!(path = %path.display(), graph = self.graph.id(), "graph written");
        Ok(())
    }

    /// Write to an open stream with the given writer
    pub fn write_to(&self, out: Box<dyn Write>, writer: &mut dyn GraphWriter) -> Result<()> {
        writer.begin_stream(out, self.graph.id())?;
        self.output_graph(writer)?;
        writer.end()
    }

    fn output_graph(&self, writer: &mut dyn GraphWriter) -> Result<()> {
        let mut nodes = 0usize;
        for node in self.graph.nodes() {
            writer.add_node(node.id, Some(node.attributes))?;
            nodes += 1;
        }

        let mut edges = 0usize;
        for edge in self.graph.edges() {
            writer.add_edge(
                edge.id,
                edge.from,
                edge.to,
                edge.directed,
                Some(edge.attributes),
            )?;
            edges += 1;
        }

        tracing::debug!(nodes, edges, "graph output");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attributes::AttributeMap;
    use crate::error::Error;
    use crate::graph::MemoryGraph;
    use crate::listener::EventLog;
    use crate::reader::{EdgeReader, GraphReader};
    use crate::writer::testing::SharedBuffer;
    use crate::Event;
    use std::cell::RefCell;
    use std::rc::Rc;

    /// Records the calls it receives
    #[derive(Default)]
    struct CallLog {
        calls: Rc<RefCell<Vec<String>>>,
        fail_on_edge: bool,
    }

    impl GraphWriter for CallLog {
        fn begin_stream(&mut self, _out: Box<dyn Write>, graph_id: &str) -> Result<()> {
            self.calls.borrow_mut().push(format!("begin {}", graph_id));
            Ok(())
        }

        fn add_node(&mut self, id: &str, _attributes: Option<&AttributeMap>) -> Result<()> {
            self.calls.borrow_mut().push(format!("node {}", id));
            Ok(())
        }

        fn add_edge(
            &mut self,
            id: &str,
            from: &str,
            to: &str,
            directed: bool,
            _attributes: Option<&AttributeMap>,
        ) -> Result<()> {
            if self.fail_on_edge {
                return Err(Error::Unrepresentable(format!("edge {}", id)));
            }
            self.calls
                .borrow_mut()
                .push(format!("edge {} {} {} {}", id, from, to, directed));
            Ok(())
        }

        fn end(&mut self) -> Result<()> {
            self.calls.borrow_mut().push("end".to_string());
            Ok(())
        }
    }

    fn sample_graph() -> MemoryGraph {
        let mut graph = MemoryGraph::new("sample");
        graph.add_node("isolated", None);
        graph.add_edge("e1", "n1", "n2", true, None).unwrap();
        graph.add_edge("e2", "n2", "n3", false, None).unwrap();
        graph
    }

    #[test]
    fn test_nodes_before_edges_inside_begin_end() {
        let graph = sample_graph();
        let mut writer = CallLog::default();

        GraphWriterHelper::new(&graph)
            .write_to(Box::new(std::io::sink()), &mut writer)
            .unwrap();

        assert_eq!(
            *writer.calls.borrow(),
            vec![
                "begin sample",
                "node isolated",
                "node n1",
                "node n2",
                "node n3",
                "edge e1 n1 n2 true",
                "edge e2 n2 n3 false",
                "end",
            ]
        );
    }

    #[test]
    fn test_writer_failure_propagates_without_end() {
        let graph = sample_graph();
        let mut writer = CallLog {
            fail_on_edge: true,
            ..CallLog::default()
        };

        let err = GraphWriterHelper::new(&graph)
            .write_to(Box::new(std::io::sink()), &mut writer)
            .unwrap_err();

        assert!(matches!(err, Error::Unrepresentable(_)));
        assert_eq!(writer.calls.borrow().last().unwrap(), "node n3");
    }

    #[test]
    fn test_write_resolves_format_by_extension() {
        let dir = tempfile::tempdir().unwrap();
        let graph = sample_graph();
        let helper = GraphWriterHelper::new(&graph);

        let dgs = dir.path().join("out");
        helper.write(&dgs).unwrap();
        let text = std::fs::read_to_string(&dgs).unwrap();
        assert!(text.starts_with("DGS004\n\"sample\" 0 0\n"));
        assert!(text.contains("ae \"e1\" \"n1\" > \"n2\"\n"));

        let graphml = dir.path().join("out.graphml");
        helper.write(&graphml).unwrap();
        let text = std::fs::read_to_string(&graphml).unwrap();
        assert!(text.contains("<edge id=\"e2\" source=\"n2\" target=\"n3\" directed=\"false\"/>"));
    }

    #[test]
    fn test_missing_directory_is_resource_error() {
        let dir = tempfile::tempdir().unwrap();
        let graph = sample_graph();
        let err = GraphWriterHelper::new(&graph)
            .write(&dir.path().join("nope").join("g.dgs"))
            .unwrap_err();
        assert_eq!(err.phase(), crate::Phase::Resource);
    }

    #[test]
    fn test_edge_format_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("g.edge");

        let mut graph = MemoryGraph::new("g");
        graph.add_node("n1", None);
        graph.add_node("n2", None);
        graph.add_edge("x", "n1", "n2", true, None).unwrap();
        GraphWriterHelper::new(&graph).write(&path).unwrap();

        let log = Rc::new(RefCell::new(EventLog::new()));
        let mut reader = EdgeReader::directed(true);
        reader.add_listener(log.clone());
        reader.read_path(&path).unwrap();

        assert_eq!(
            log.borrow().events,
            vec![Event::edge_added("0", "n1", "n2", true)]
        );
    }

    #[test]
    fn test_stream_output_of_star_file() {
        let graph = Rc::new(RefCell::new(MemoryGraph::new("star")));
        let mut reader = EdgeReader::new();
        reader.add_listener(graph.clone());
        reader.read_str("hub a b c\n").unwrap();

        let buffer = SharedBuffer::default();
        let mut writer = crate::writer::EdgeWriter::new().with_comment_char(None);
        GraphWriterHelper::new(&*graph.borrow())
            .write_to(Box::new(buffer.clone()), &mut writer)
            .unwrap();

        assert_eq!(buffer.text(), "hub a\nhub b\nhub c\n");
    }
}
