//! CLI command implementations

pub mod completions;
pub mod config;
pub mod convert;
pub mod parse;
pub mod stats;

use std::cell::RefCell;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use clap::Args;
use graphio_core::{EdgeReader, EdgeReaderConfig, GraphReader, MemoryGraph};

use crate::config::{parse_comment_char, Config};

/// Options shared by the commands that read an edge-list file
#[derive(Args)]
pub struct ReadArgs {
    /// Input file (edge-list format)
    pub input: PathBuf,

    /// Read edges as directed
    #[arg(long, conflicts_with = "undirected")]
    pub directed: bool,

    /// Read edges as undirected, overriding the config file
    #[arg(long)]
    pub undirected: bool,

    /// Comment character, or "none"
    #[arg(long)]
    pub comment_char: Option<String>,
}

impl ReadArgs {
    /// Reader settings: command line first, then the config file
    pub fn reader_config(&self, config: &Config) -> anyhow::Result<EdgeReaderConfig> {
        let mut reader = config.reader_config();
        if self.directed {
            reader.directed = true;
        }
        if self.undirected {
            reader.directed = false;
        }
        if let Some(value) = &self.comment_char {
            reader.comment_char = parse_comment_char(value).map_err(|e| anyhow::anyhow!(e))?;
        }
        Ok(reader)
    }
}

/// Read a whole edge-list file into memory
pub fn load_graph(
    path: &Path,
    reader_config: EdgeReaderConfig,
) -> anyhow::Result<(MemoryGraph, u64)> {
    let graph_id = path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("graph")
        .to_string();
    let graph = Rc::new(RefCell::new(MemoryGraph::new(graph_id)));

    let mut reader = EdgeReader::with_config(reader_config);
    reader.add_extended_listener(graph.clone());
    reader.read_path(path)?;

    tracing::info!(
        "Read {} nodes and {} edges from {:?}",
        graph.borrow().node_count(),
        graph.borrow().edge_count(),
        path
    );

    let graph = graph.take();
    Ok((graph, reader.suppressed_self_loops()))
}
