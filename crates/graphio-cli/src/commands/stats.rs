//! Stats command

use clap::Args;
use graphio_core::SourceGraph;
use serde::Serialize;

use super::{load_graph, ReadArgs};
use crate::config::Config;

#[derive(Args)]
pub struct StatsArgs {
    #[command(flatten)]
    pub read: ReadArgs,

    /// Print as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Serialize)]
pub struct GraphStats {
    pub graph: String,
    pub nodes: usize,
    pub edges: usize,
    pub directed_edges: usize,
    pub self_loops_dropped: u64,
}

pub fn run(args: &StatsArgs, config: &Config) -> anyhow::Result<()> {
    let (graph, self_loops) = load_graph(&args.read.input, args.read.reader_config(config)?)?;

    let stats = GraphStats {
        graph: graph.id().to_string(),
        nodes: graph.node_count(),
        edges: graph.edge_count(),
        directed_edges: graph.edges().filter(|e| e.directed).count(),
        self_loops_dropped: self_loops,
    };

    if args.json {
        println!("{}", serde_json::to_string_pretty(&stats)?);
    } else {
        println!("Graph:              {}", stats.graph);
        println!("Nodes:              {}", stats.nodes);
        println!("Edges:              {}", stats.edges);
        println!("Directed edges:     {}", stats.directed_edges);
        println!("Self-loops dropped: {}", stats.self_loops_dropped);
    }

    Ok(())
}
