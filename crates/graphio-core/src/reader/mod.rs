//! Format readers: pull-based grammar runners that push events to listeners
//!
//! A reader is driven as `begin_*` → `next_events` (repeated until it
//! returns false) → `end`, or in one shot with [`GraphReader::parse_all`].
//! Everything runs on the caller's thread: each event reaches every
//! listener before the next token is read.
//!
//! Concrete dialects compose a [`ReaderCore`], which owns the listener
//! registry and the per-session state, and implement only the grammar step.

pub mod edge;

use std::fs::File;
use std::io::{BufRead, BufReader, Cursor};
use std::path::Path;

use crate::dispatch::{ListenerRegistry, SharedExtendedListener, SharedListener};
use crate::error::{Error, Result};
use crate::event::Event;
use crate::token::Token;
use crate::tokenizer::{Tokenizer, TokenizerConfig};

pub use edge::{EdgeReader, EdgeReaderConfig};

/// State of one open read session, dropped on `end`
///
/// The first lexical or listener error fails the session: every later
/// read returns [`Error::SessionFailed`] until the session is ended.
pub struct Session {
    tokenizer: Tokenizer<Box<dyn BufRead>>,
    source: String,
    next_edge_id: u64,
    failed: bool,
}

impl Session {
    fn new(tokenizer: Tokenizer<Box<dyn BufRead>>, source: String) -> Self {
        Self {
            tokenizer,
            source,
            next_edge_id: 0,
            failed: false,
        }
    }

    pub fn next_token(&mut self) -> Result<Token> {
        if self.failed {
            return Err(Error::SessionFailed);
        }
        let token = self.tokenizer.next_token();
        if token.is_err() {
            self.failed = true;
        }
        token
    }

    /// Deliver an event to every listener, failing the session on rejection
    pub fn dispatch(&mut self, listeners: &ListenerRegistry, event: &Event) -> Result<()> {
        if self.failed {
            return Err(Error::SessionFailed);
        }
        listeners.dispatch(event).map_err(|e| {
            self.failed = true;
            Error::Listener(e)
        })
    }

    /// Next synthesized edge identifier: "0", "1", ... per session
    pub fn allocate_edge_id(&mut self) -> String {
        let id = self.next_edge_id;
        self.next_edge_id += 1;
        id.to_string()
    }

    /// Current input line
    pub fn line(&self) -> usize {
        self.tokenizer.line()
    }
}

/// Listener registry and session handling shared by every reader
pub struct ReaderCore {
    listeners: ListenerRegistry,
    config: TokenizerConfig,
    session: Option<Session>,
}

impl ReaderCore {
    pub fn new(config: TokenizerConfig) -> Self {
        Self {
            listeners: ListenerRegistry::new(),
            config,
            session: None,
        }
    }

    pub fn listeners_mut(&mut self) -> &mut ListenerRegistry {
        &mut self.listeners
    }

    pub fn is_open(&self) -> bool {
        self.session.is_some()
    }

    /// Start a session over `source`
    pub fn open(&mut self, source: Box<dyn BufRead>, label: impl Into<String>) -> Result<()> {
        if self.session.is_some() {
            return Err(Error::AlreadyStarted);
        }
        let label = label.into();
        tracing::debug!(source = %label, "begin read session");

        let tokenizer = Tokenizer::new(source, self.config.clone());
        self.session = Some(Session::new(tokenizer, label));
        Ok(())
    }

    /// End the session, releasing the source
    pub fn close(&mut self) -> Result<()> {
        let session = self.session.take().ok_or(Error::NotStarted)?;
        tracing::debug!(
            source = %session.source,
            lines = session.line(),
            edges = session.next_edge_id,
            failed = session.failed,
            "end read session"
        );
        Ok(())
    }

    /// The open session together with the listeners to dispatch to
    pub fn parts(&mut self) -> Result<(&mut Session, &ListenerRegistry)> {
        let session = self.session.as_mut().ok_or(Error::NotStarted)?;
        Ok((session, &self.listeners))
    }
}

/// A reader for one graph text format
///
/// Listeners must not be added to or removed from a reader from inside one
/// of their own callbacks.
pub trait GraphReader {
    fn core(&self) -> &ReaderCore;

    fn core_mut(&mut self) -> &mut ReaderCore;

    /// Read from the source until at least one event could be produced or
    /// the input ends. Returns false once the input is exhausted; no event is
    /// produced by that call or by any later one.
    fn next_events(&mut self) -> Result<bool>;

    /// Read the events of the next step. Dialects without steps read one
    /// group of events, like [`next_events`](Self::next_events).
    fn next_step(&mut self) -> Result<bool> {
        self.next_events()
    }

    /// Continue parsing inside an included sub-stream
    fn enter_include(&mut self, _source: &Path) -> Result<()> {
        Err(Error::IncludeUnsupported)
    }

    /// Start a session over an arbitrary buffered source
    fn begin_reader(&mut self, source: Box<dyn BufRead>, label: &str) -> Result<()> {
        self.core_mut().open(source, label)
    }

    /// Start a session over a file
    fn begin_path(&mut self, path: &Path) -> Result<()> {
        let file = File::open(path).map_err(|e| Error::resource(path, e))?;
        self.begin_reader(
            Box::new(BufReader::new(file)),
            &path.display().to_string(),
        )
    }

    /// Start a session over in-memory text
    fn begin_str(&mut self, text: &str) -> Result<()> {
        self.begin_reader(Box::new(Cursor::new(text.as_bytes().to_vec())), "<string>")
    }

    /// End the session and release the source
    fn end(&mut self) -> Result<()> {
        self.core_mut().close()
    }

    /// Drain the open session, then end it. The session is ended even when
    /// reading fails; the first error wins.
    fn parse_all(&mut self) -> Result<()> {
        let drained = loop {
            match self.next_events() {
                Ok(true) => continue,
                Ok(false) => break Ok(()),
                Err(e) => break Err(e),
            }
        };
        let ended = if self.core().is_open() {
            self.end()
        } else {
            Ok(())
        };
        drained.and(ended)
    }

    /// Read a whole file in one shot
    fn read_path(&mut self, path: &Path) -> Result<()> {
        self.begin_path(path)?;
        self.parse_all()
    }

    /// Read in-memory text in one shot
    fn read_str(&mut self, text: &str) -> Result<()> {
        self.begin_str(text)?;
        self.parse_all()
    }

    fn add_listener(&mut self, listener: SharedListener) {
        self.core_mut().listeners_mut().add_listener(listener);
    }

    fn add_extended_listener(&mut self, listener: SharedExtendedListener) {
        self.core_mut().listeners_mut().add_extended_listener(listener);
    }

    fn remove_listener(&mut self, listener: &SharedListener) -> bool {
        self.core_mut().listeners_mut().remove_listener(listener)
    }

    fn remove_extended_listener(&mut self, listener: &SharedExtendedListener) -> bool {
        self.core_mut()
            .listeners_mut()
            .remove_extended_listener(listener)
    }
}
