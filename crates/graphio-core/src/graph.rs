//! Graph access consumed by writers, and an in-memory graph built from events

use std::collections::HashMap;

use crate::attributes::{merge, AttributeMap};
use crate::listener::{ExtendedGraphListener, GraphListener, ListenerError, ListenerResult};

/// Read-only view of a node
#[derive(Debug, Clone, Copy)]
pub struct NodeView<'a> {
    pub id: &'a str,
    pub attributes: &'a AttributeMap,
}

/// Read-only view of an edge
#[derive(Debug, Clone, Copy)]
pub struct EdgeView<'a> {
    pub id: &'a str,
    pub from: &'a str,
    pub to: &'a str,
    pub directed: bool,
    pub attributes: &'a AttributeMap,
}

/// A fully built graph that can be walked node by node and edge by edge
pub trait SourceGraph {
    fn id(&self) -> &str;

    fn nodes(&self) -> Box<dyn Iterator<Item = NodeView<'_>> + '_>;

    fn edges(&self) -> Box<dyn Iterator<Item = EdgeView<'_>> + '_>;
}

#[derive(Debug, Clone)]
struct Node {
    id: String,
    attributes: AttributeMap,
}

#[derive(Debug, Clone)]
struct Edge {
    id: String,
    from: String,
    to: String,
    directed: bool,
    attributes: AttributeMap,
}

/// Graph held in memory, in insertion order
///
/// As a listener it applies events to itself: endpoints of a new edge are
/// created on first reference, removing a node removes its edges.
#[derive(Debug, Clone, Default)]
pub struct MemoryGraph {
    id: String,
    attributes: AttributeMap,
    nodes: Vec<Node>,
    edges: Vec<Edge>,
    node_index: HashMap<String, usize>,
    edge_index: HashMap<String, usize>,
    step: Option<f64>,
}

impl MemoryGraph {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Self::default()
        }
    }

    pub fn attributes(&self) -> &AttributeMap {
        &self.attributes
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn contains_node(&self, id: &str) -> bool {
        self.node_index.contains_key(id)
    }

    pub fn node(&self, id: &str) -> Option<NodeView<'_>> {
        self.node_index.get(id).map(|&i| node_view(&self.nodes[i]))
    }

    pub fn edge(&self, id: &str) -> Option<EdgeView<'_>> {
        self.edge_index.get(id).map(|&i| edge_view(&self.edges[i]))
    }

    /// Time of the last step seen, if any
    pub fn step(&self) -> Option<f64> {
        self.step
    }

    /// Add a node, merging attributes into an existing node of the same id
    pub fn add_node(&mut self, id: &str, attributes: Option<&AttributeMap>) {
        let index = self.ensure_node(id);
        merge(&mut self.nodes[index].attributes, attributes);
    }

    /// Add an edge, creating missing endpoints
    pub fn add_edge(
        &mut self,
        id: &str,
        from: &str,
        to: &str,
        directed: bool,
        attributes: Option<&AttributeMap>,
    ) -> Result<(), ListenerError> {
        if self.edge_index.contains_key(id) {
            return Err(ListenerError::new(format!("Edge already exists: {}", id)));
        }
        self.ensure_node(from);
        self.ensure_node(to);

        self.edge_index.insert(id.to_string(), self.edges.len());
        self.edges.push(Edge {
            id: id.to_string(),
            from: from.to_string(),
            to: to.to_string(),
            directed,
            attributes: attributes.cloned().unwrap_or_default(),
        });
        Ok(())
    }

    /// Remove a node and every edge touching it
    pub fn remove_node(&mut self, id: &str) -> Result<(), ListenerError> {
        if !self.node_index.contains_key(id) {
            return Err(ListenerError::new(format!("Node not found: {}", id)));
        }
        self.nodes.retain(|n| n.id != id);
        self.edges.retain(|e| e.from != id && e.to != id);
        self.reindex();
        Ok(())
    }

    pub fn remove_edge(&mut self, id: &str) -> Result<(), ListenerError> {
        if !self.edge_index.contains_key(id) {
            return Err(ListenerError::new(format!("Edge not found: {}", id)));
        }
        self.edges.retain(|e| e.id != id);
        self.reindex();
        Ok(())
    }

    fn ensure_node(&mut self, id: &str) -> usize {
        if let Some(&index) = self.node_index.get(id) {
            return index;
        }
        let index = self.nodes.len();
        self.nodes.push(Node {
            id: id.to_string(),
            attributes: AttributeMap::new(),
        });
        self.node_index.insert(id.to_string(), index);
        index
    }

    fn node_attributes_mut(&mut self, id: &str) -> Result<&mut AttributeMap, ListenerError> {
        match self.node_index.get(id) {
            Some(&i) => Ok(&mut self.nodes[i].attributes),
            None => Err(ListenerError::new(format!("Node not found: {}", id))),
        }
    }

    fn edge_attributes_mut(&mut self, id: &str) -> Result<&mut AttributeMap, ListenerError> {
        match self.edge_index.get(id) {
            Some(&i) => Ok(&mut self.edges[i].attributes),
            None => Err(ListenerError::new(format!("Edge not found: {}", id))),
        }
    }

    fn reindex(&mut self) {
        self.node_index = self
            .nodes
            .iter()
            .enumerate()
            .map(|(i, n)| (n.id.clone(), i))
            .collect();
        self.edge_index = self
            .edges
            .iter()
            .enumerate()
            .map(|(i, e)| (e.id.clone(), i))
            .collect();
    }
}

fn node_view(node: &Node) -> NodeView<'_> {
    NodeView {
        id: &node.id,
        attributes: &node.attributes,
    }
}

fn edge_view(edge: &Edge) -> EdgeView<'_> {
    EdgeView {
        id: &edge.id,
        from: &edge.from,
        to: &edge.to,
        directed: edge.directed,
        attributes: &edge.attributes,
    }
}

impl SourceGraph for MemoryGraph {
    fn id(&self) -> &str {
        &self.id
    }

    fn nodes(&self) -> Box<dyn Iterator<Item = NodeView<'_>> + '_> {
        Box::new(self.nodes.iter().map(node_view))
    }

    fn edges(&self) -> Box<dyn Iterator<Item = EdgeView<'_>> + '_> {
        Box::new(self.edges.iter().map(edge_view))
    }
}

impl GraphListener for MemoryGraph {
    fn graph_changed(&mut self, attributes: Option<&AttributeMap>) -> ListenerResult {
        merge(&mut self.attributes, attributes);
        Ok(())
    }

    fn node_added(&mut self, id: &str, attributes: Option<&AttributeMap>) -> ListenerResult {
        self.add_node(id, attributes);
        Ok(())
    }

    fn node_changed(&mut self, id: &str, attributes: Option<&AttributeMap>) -> ListenerResult {
        merge(self.node_attributes_mut(id)?, attributes);
        Ok(())
    }

    fn node_removed(&mut self, id: &str) -> ListenerResult {
        self.remove_node(id)
    }

    fn edge_added(
        &mut self,
        id: &str,
        from: &str,
        to: &str,
        directed: bool,
        attributes: Option<&AttributeMap>,
    ) -> ListenerResult {
        self.add_edge(id, from, to, directed, attributes)
    }

    fn edge_changed(&mut self, id: &str, attributes: Option<&AttributeMap>) -> ListenerResult {
        merge(self.edge_attributes_mut(id)?, attributes);
        Ok(())
    }

    fn edge_removed(&mut self, id: &str) -> ListenerResult {
        self.remove_edge(id)
    }

    fn step_begins(&mut self, time: f64) -> ListenerResult {
        self.step = Some(time);
        Ok(())
    }

    fn unknown_event_detected(&mut self, raw: &str) -> ListenerResult {
        tracing::warn!(graph = %self.id, raw, "ignoring unknown event");
        Ok(())
    }
}

impl ExtendedGraphListener for MemoryGraph {
    fn graph_attribute_removed(&mut self, name: &str) -> ListenerResult {
        self.attributes.remove(name);
        Ok(())
    }

    fn node_attribute_removed(&mut self, id: &str, name: &str) -> ListenerResult {
        self.node_attributes_mut(id)?.remove(name);
        Ok(())
    }

    fn edge_attribute_removed(&mut self, id: &str, name: &str) -> ListenerResult {
        self.edge_attributes_mut(id)?.remove(name);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attributes::attributes;
    use crate::reader::{EdgeReader, GraphReader};
    use serde_json::json;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn test_edges_create_nodes_lazily() {
        let mut graph = MemoryGraph::new("g");
        graph.add_edge("0", "a", "b", false, None).unwrap();
        graph.add_edge("1", "b", "c", true, None).unwrap();

        let ids: Vec<&str> = graph.nodes().map(|n| n.id).collect();
        assert_eq!(ids, vec!["a", "b", "c"]);
        assert_eq!(graph.edge_count(), 2);
        assert!(graph.edge("1").unwrap().directed);
    }

    #[test]
    fn test_duplicate_edge_is_rejected() {
        let mut graph = MemoryGraph::new("g");
        graph.add_edge("0", "a", "b", false, None).unwrap();
        assert!(graph.add_edge("0", "c", "d", false, None).is_err());
        assert!(!graph.contains_node("c"));
    }

    #[test]
    fn test_remove_node_drops_incident_edges() {
        let mut graph = MemoryGraph::new("g");
        graph.add_edge("0", "a", "b", false, None).unwrap();
        graph.add_edge("1", "b", "c", false, None).unwrap();
        graph.add_edge("2", "c", "a", false, None).unwrap();

        graph.node_removed("b").unwrap();

        assert_eq!(graph.node_count(), 2);
        let remaining: Vec<&str> = graph.edges().map(|e| e.id).collect();
        assert_eq!(remaining, vec!["2"]);
        assert!(graph.edge("2").is_some());
        assert!(graph.node_removed("b").is_err());
    }

    #[test]
    fn test_attribute_events() {
        let mut graph = MemoryGraph::new("g");
        graph
            .node_added("a", Some(&attributes([("color", "red")])))
            .unwrap();
        graph
            .node_changed("a", Some(&attributes([("size", json!(3))])))
            .unwrap();
        graph.node_attribute_removed("a", "color").unwrap();

        let node = graph.node("a").unwrap();
        assert_eq!(node.attributes.len(), 1);
        assert_eq!(node.attributes["size"], json!(3));

        assert!(graph.edge_changed("missing", None).is_err());
    }

    #[test]
    fn test_builds_from_edge_reader() {
        let graph = Rc::new(RefCell::new(MemoryGraph::new("g")));
        let mut reader = EdgeReader::new();
        reader.add_extended_listener(graph.clone());
        reader.read_str("a b c\nc d\nd d\n").unwrap();

        let graph = graph.borrow();
        assert_eq!(graph.node_count(), 4);
        assert_eq!(graph.edge_count(), 3);
        let edge = graph.edge("2").unwrap();
        assert_eq!((edge.from, edge.to), ("c", "d"));
    }
}
