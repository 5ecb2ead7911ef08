//! graphio core - streaming graph format readers and writers
//!
//! Readers turn line-oriented graph text into a stream of graph mutation
//! events pushed synchronously to registered listeners. Writers go the other
//! way, turning a built graph back into text.

pub mod attributes;
pub mod dispatch;
pub mod error;
pub mod event;
pub mod graph;
pub mod limits;
pub mod listener;
pub mod reader;
pub mod token;
pub mod tokenizer;
pub mod writer;

pub use attributes::AttributeMap;
pub use dispatch::{ListenerRegistry, SharedExtendedListener, SharedListener, Subscriber};
pub use error::{Error, Phase, Result};
pub use event::Event;
pub use graph::{EdgeView, MemoryGraph, NodeView, SourceGraph};
pub use listener::{
    EventLog, EventReceiver, ExtendedGraphListener, GraphListener, ListenerError,
    ListenerResult,
};
pub use reader::{EdgeReader, EdgeReaderConfig, GraphReader, ReaderCore, Session};
pub use token::Token;
pub use tokenizer::{Tokenizer, TokenizerConfig};
pub use writer::{
    writer_for, DgsWriter, EdgeWriter, GraphMlWriter, GraphWriter, GraphWriterHelper,
    WriterFormat,
};
