//! Error types for graphio core

use std::path::PathBuf;

use thiserror::Error;

use crate::listener::ListenerError;

/// Result type alias using graphio's Error
pub type Result<T> = std::result::Result<T, Error>;

/// Phase of a read or write session in which a failure occurred
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Malformed token in the input
    Lexical,
    /// Token sequence that does not match the dialect grammar
    Grammar,
    /// A listener rejected an event
    Listener,
    /// Source or target could not be opened, read or written
    Resource,
    /// The reader or writer was driven out of order
    Usage,
}

/// graphio error types
#[derive(Error, Debug)]
pub enum Error {
    #[error("Lexical error at line {line}, column {column}: {message}")]
    Lexical {
        line: usize,
        column: usize,
        message: String,
    },

    #[error("Grammar error at line {line}: {message}")]
    Grammar { line: usize, message: String },

    #[error(transparent)]
    Listener(#[from] ListenerError),

    #[error("Cannot open {}: {source}", path.display())]
    Resource {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("No session in progress, call begin first")]
    NotStarted,

    #[error("A session is already in progress, call end first")]
    AlreadyStarted,

    #[error("The session failed earlier and can only be ended")]
    SessionFailed,

    #[error("This format does not support included sub-streams")]
    IncludeUnsupported,

    #[error("Cannot represent in this format: {0}")]
    Unrepresentable(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl Error {
    pub(crate) fn lexical(line: usize, column: usize, message: impl Into<String>) -> Self {
        Self::Lexical {
            line,
            column,
            message: message.into(),
        }
    }

    pub(crate) fn resource(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Resource {
            path: path.into(),
            source,
        }
    }

    /// Session phase this error belongs to
    pub fn phase(&self) -> Phase {
        match self {
            Self::Lexical { .. } => Phase::Lexical,
            Self::Grammar { .. } => Phase::Grammar,
            Self::Listener(_) => Phase::Listener,
            Self::Resource { .. } | Self::Io(_) | Self::Serialization(_) => Phase::Resource,
            Self::NotStarted
            | Self::AlreadyStarted
            | Self::SessionFailed
            | Self::IncludeUnsupported => Phase::Usage,
            Self::Unrepresentable(_) => Phase::Grammar,
        }
    }

    /// Line of the input the error refers to, when known
    pub fn line(&self) -> Option<usize> {
        match self {
            Self::Lexical { line, .. } | Self::Grammar { line, .. } => Some(*line),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_phase_classification() {
        assert_eq!(Error::lexical(3, 7, "bad").phase(), Phase::Lexical);
        assert_eq!(
            Error::from(ListenerError::new("rejected")).phase(),
            Phase::Listener
        );
        assert_eq!(Error::NotStarted.phase(), Phase::Usage);
        assert_eq!(Error::SessionFailed.phase(), Phase::Usage);

        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        assert_eq!(Error::resource("g.edge", io).phase(), Phase::Resource);
    }

    #[test]
    fn test_lexical_message_has_position() {
        let err = Error::lexical(4, 2, "unterminated quoted string");
        assert_eq!(err.line(), Some(4));
        assert_eq!(
            err.to_string(),
            "Lexical error at line 4, column 2: unterminated quoted string"
        );
    }
}
