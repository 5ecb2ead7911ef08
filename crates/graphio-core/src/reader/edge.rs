//! Reader for the edge-list format
//!
//! Each line names two nodes and stands for one edge between them:
//!
//! ```text
//! # comment
//! a b
//! "New York" Boston
//! ```
//!
//! A line may also name one anchor node followed by several peers, which
//! links the anchor to every peer in turn. Nodes are never declared; they
//! are implied by the edges that mention them. Edge identifiers are
//! synthesized per session ("0", "1", ...) and self-loops are dropped.

use std::io::BufRead;

use serde::{Deserialize, Serialize};

use super::{GraphReader, ReaderCore};
use crate::error::Result;
use crate::event::Event;
use crate::token::Token;
use crate::tokenizer::TokenizerConfig;

/// Settings of an edge-list reader
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EdgeReaderConfig {
    /// Direction of every edge read by this reader
    pub directed: bool,

    /// Line comment character
    pub comment_char: Option<char>,
}

impl Default for EdgeReaderConfig {
    fn default() -> Self {
        Self {
            directed: false,
            comment_char: Some('#'),
        }
    }
}

/// Edge-list format reader
pub struct EdgeReader {
    core: ReaderCore,
    directed: bool,
    self_loops: u64,
}

impl EdgeReader {
    /// Reader producing undirected edges
    pub fn new() -> Self {
        Self::with_config(EdgeReaderConfig::default())
    }

    pub fn directed(directed: bool) -> Self {
        Self::with_config(EdgeReaderConfig {
            directed,
            ..EdgeReaderConfig::default()
        })
    }

    pub fn with_config(config: EdgeReaderConfig) -> Self {
        let tokenizer = TokenizerConfig {
            comment_char: config.comment_char,
            eol_significant: true,
            ..TokenizerConfig::default()
        };
        Self {
            core: ReaderCore::new(tokenizer),
            directed: config.directed,
            self_loops: 0,
        }
    }

    pub fn is_directed(&self) -> bool {
        self.directed
    }

    /// Self-loops dropped since the current or last session began
    pub fn suppressed_self_loops(&self) -> u64 {
        self.self_loops
    }
}

impl Default for EdgeReader {
    fn default() -> Self {
        Self::new()
    }
}

impl GraphReader for EdgeReader {
    fn core(&self) -> &ReaderCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut ReaderCore {
        &mut self.core
    }

    fn begin_reader(&mut self, source: Box<dyn BufRead>, label: &str) -> Result<()> {
        self.core.open(source, label)?;
        self.self_loops = 0;
        Ok(())
    }

    fn next_events(&mut self) -> Result<bool> {
        let directed = self.directed;
        let (session, listeners) = self.core.parts()?;

        let token = session.next_token()?;
        if token == Token::Eof {
            return Ok(false);
        }
        let Some(anchor) = token.into_identifier() else {
            return Ok(true);
        };

        loop {
            let Some(peer) = session.next_token()?.into_identifier() else {
                break;
            };

            if peer == anchor {
                tracing::trace!(line = session.line(), node = %anchor, "self-loop dropped");
                self.self_loops += 1;
                continue;
            }

            let id = session.allocate_edge_id();
            tracing::trace!(line = session.line(), %id, from = %anchor, to = %peer, "edge");
            let event = Event::EdgeAdded {
                id,
                from: anchor.clone(),
                to: peer,
                directed,
                attributes: None,
            };
            session.dispatch(listeners, &event)?;
        }

        Ok(true)
    }
}
