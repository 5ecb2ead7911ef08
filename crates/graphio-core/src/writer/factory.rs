//! Writer lookup by file extension

use std::path::Path;

use serde::{Deserialize, Serialize};

use super::{DgsWriter, EdgeWriter, GraphMlWriter, GraphWriter};

/// Output formats with a writer
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WriterFormat {
    #[default]
    Dgs,
    Edge,
    #[serde(rename = "graphml")]
    GraphMl,
}

const EXTENSIONS: &[(&str, WriterFormat)] = &[
    ("dgs", WriterFormat::Dgs),
    ("edge", WriterFormat::Edge),
    ("edges", WriterFormat::Edge),
    ("el", WriterFormat::Edge),
    ("graphml", WriterFormat::GraphMl),
];

impl WriterFormat {
    /// Format for a file name; DGS when the extension is missing or unknown
    pub fn for_path(path: &Path) -> Self {
        path.extension()
            .and_then(|ext| ext.to_str())
            .and_then(Self::from_extension)
            .unwrap_or_default()
    }

    pub fn from_extension(ext: &str) -> Option<Self> {
        let ext = ext.to_ascii_lowercase();
        EXTENSIONS
            .iter()
            .find(|(known, _)| *known == ext)
            .map(|(_, format)| *format)
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "dgs" => Some(Self::Dgs),
            "edge" => Some(Self::Edge),
            "graphml" => Some(Self::GraphMl),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Dgs => "dgs",
            Self::Edge => "edge",
            Self::GraphMl => "graphml",
        }
    }

    pub fn create(self) -> Box<dyn GraphWriter> {
        match self {
            Self::Dgs => Box::new(DgsWriter::new()),
            Self::Edge => Box::new(EdgeWriter::new()),
            Self::GraphMl => Box::new(GraphMlWriter::new()),
        }
    }
}

/// Writer for a file name, see [`WriterFormat::for_path`]
pub fn writer_for(path: &Path) -> Box<dyn GraphWriter> {
    let format = WriterFormat::for_path(path);
    tracing::debug!(path = %path.display(), format = format.name(), "resolved writer");
    format.create()
}
