//! Tokens produced by the tokenizer

/// A single lexical token
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    /// Bare word
    Word(String),
    /// Word with numeric shape, kept as its literal text
    Number(String),
    /// Quoted string, without its delimiters
    Quoted(String),
    /// End of line, only produced when end-of-line is significant
    Eol,
    /// End of input, returned on every call once reached
    Eof,
}

impl Token {
    /// Consume the token, returning its text when it can name an identifier
    pub fn into_identifier(self) -> Option<String> {
        match self {
            Self::Word(s) | Self::Number(s) | Self::Quoted(s) => Some(s),
            Self::Eol | Self::Eof => None,
        }
    }
}
