//! Graph mutation events produced by format readers

use serde::{Deserialize, Serialize};

use crate::attributes::AttributeMap;

/// A single graph mutation, delivered once to every registered listener
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum Event {
    GraphChanged {
        attributes: Option<AttributeMap>,
    },
    NodeAdded {
        id: String,
        attributes: Option<AttributeMap>,
    },
    NodeChanged {
        id: String,
        attributes: Option<AttributeMap>,
    },
    NodeRemoved {
        id: String,
    },
    EdgeAdded {
        id: String,
        from: String,
        to: String,
        directed: bool,
        attributes: Option<AttributeMap>,
    },
    EdgeChanged {
        id: String,
        attributes: Option<AttributeMap>,
    },
    EdgeRemoved {
        id: String,
    },
    /// Every following event happens at `time`, until the next step
    StepBegins {
        time: f64,
    },
    /// Input the reader could not interpret, passed on verbatim
    Unknown {
        raw: String,
    },

    // Attribute removal, only seen by extended listeners
    GraphAttributeRemoved {
        name: String,
    },
    NodeAttributeRemoved {
        id: String,
        name: String,
    },
    EdgeAttributeRemoved {
        id: String,
        name: String,
    },
}

impl Event {
    /// Short snake_case name of the event variant
    pub fn kind(&self) -> &'static str {
        match self {
            Self::GraphChanged { .. } => "graph_changed",
            Self::NodeAdded { .. } => "node_added",
            Self::NodeChanged { .. } => "node_changed",
            Self::NodeRemoved { .. } => "node_removed",
            Self::EdgeAdded { .. } => "edge_added",
            Self::EdgeChanged { .. } => "edge_changed",
            Self::EdgeRemoved { .. } => "edge_removed",
            Self::StepBegins { .. } => "step_begins",
            Self::Unknown { .. } => "unknown",
            Self::GraphAttributeRemoved { .. } => "graph_attribute_removed",
            Self::NodeAttributeRemoved { .. } => "node_attribute_removed",
            Self::EdgeAttributeRemoved { .. } => "edge_attribute_removed",
        }
    }

    pub fn edge_added(
        id: impl Into<String>,
        from: impl Into<String>,
        to: impl Into<String>,
        directed: bool,
    ) -> Self {
        Self::EdgeAdded {
            id: id.into(),
            from: from.into(),
            to: to.into(),
            directed,
            attributes: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_edge_added_serializes_tagged() {
        let event = Event::edge_added("0", "a", "b", false);
        let value = serde_json::to_value(&event).unwrap();

        assert_eq!(
            value,
            json!({
                "event": "edge_added",
                "id": "0",
                "from": "a",
                "to": "b",
                "directed": false,
                "attributes": null,
            })
        );
        assert_eq!(event.kind(), "edge_added");
    }
}
