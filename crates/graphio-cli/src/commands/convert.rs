//! Convert command

use std::path::PathBuf;

use clap::{Args, ValueEnum};
use graphio_core::{GraphWriterHelper, WriterFormat};

use super::{load_graph, ReadArgs};
use crate::config::Config;
use crate::Cli;

/// Output format
#[derive(Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    Dgs,
    Edge,
    #[value(name = "graphml")]
    GraphMl,
}

impl From<OutputFormat> for WriterFormat {
    fn from(f: OutputFormat) -> Self {
        match f {
            OutputFormat::Dgs => WriterFormat::Dgs,
            OutputFormat::Edge => WriterFormat::Edge,
            OutputFormat::GraphMl => WriterFormat::GraphMl,
        }
    }
}

#[derive(Args)]
pub struct ConvertArgs {
    #[command(flatten)]
    pub read: ReadArgs,

    /// Output file; its extension picks the format unless --format is given
    pub output: PathBuf,

    /// Output format
    #[arg(short, long)]
    pub format: Option<OutputFormat>,
}

pub fn run(args: &ConvertArgs, cli: &Cli, config: &Config) -> anyhow::Result<()> {
    let (graph, _) = load_graph(&args.read.input, args.read.reader_config(config)?)?;

    let format = match args.format {
        Some(format) => format.into(),
        None => args
            .output
            .extension()
            .and_then(|ext| ext.to_str())
            .and_then(WriterFormat::from_extension)
            .unwrap_or(config.default_format),
    };
    tracing::debug!("Writing {:?} as {}", args.output, format.name());

    let mut writer = format.create();
    GraphWriterHelper::new(&graph).write_with(&args.output, writer.as_mut())?;

    if !cli.quiet {
        println!(
            "Wrote {} nodes and {} edges to {:?}",
            graph.node_count(),
            graph.edge_count(),
            args.output
        );
    }
    Ok(())
}
