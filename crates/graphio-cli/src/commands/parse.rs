//! Parse command: stream events as JSON lines

use std::cell::RefCell;
use std::io::{self, Write};
use std::rc::Rc;

use clap::Args;
use graphio_core::{EdgeReader, Event, EventReceiver, GraphReader, ListenerError, ListenerResult};

use super::ReadArgs;
use crate::config::Config;

#[derive(Args)]
pub struct ParseArgs {
    #[command(flatten)]
    pub read: ReadArgs,

    /// Stop after this many lines of input
    #[arg(long)]
    pub max_lines: Option<usize>,
}

/// Writes each event as one JSON object per line
pub struct JsonLines<W: Write> {
    out: W,
    written: usize,
}

impl<W: Write> JsonLines<W> {
    pub fn new(out: W) -> Self {
        Self { out, written: 0 }
    }
}

impl<W: Write> EventReceiver for JsonLines<W> {
    fn receive(&mut self, event: Event) -> ListenerResult {
        let line = serde_json::to_string(&event).map_err(|e| ListenerError::new(e.to_string()))?;
        writeln!(self.out, "{}", line).map_err(|e| ListenerError::new(e.to_string()))?;
        self.written += 1;
        Ok(())
    }
}

pub fn run(args: &ParseArgs, config: &Config) -> anyhow::Result<()> {
    let reader_config = args.read.reader_config(config)?;
    tracing::info!("Parsing {:?} (directed: {})", args.read.input, reader_config.directed);

    let sink = Rc::new(RefCell::new(JsonLines::new(io::stdout().lock())));
    let mut reader = EdgeReader::with_config(reader_config);
    reader.add_extended_listener(sink.clone());
    reader.begin_path(&args.read.input)?;

    let mut lines = 0;
    let result = loop {
        if args.max_lines.is_some_and(|max| lines >= max) {
            break Ok(());
        }
        match reader.next_events() {
            Ok(true) => lines += 1,
            Ok(false) => break Ok(()),
            Err(e) => break Err(e),
        }
    };
    reader.end()?;
    result?;

    let mut sink = sink.borrow_mut();
    sink.out.flush()?;
    tracing::debug!("Wrote {} events", sink.written);
    Ok(())
}
