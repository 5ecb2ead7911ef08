//! Line-oriented tokenizer shared by the format readers
//!
//! The tokenizer pulls one physical line at a time from a [`BufRead`] and
//! hands out tokens on demand. It keeps no history beyond the current line.

use std::io::{BufRead, Read};

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::limits::{MAX_LINE_LEN, MAX_TOKEN_LEN};
use crate::token::Token;

/// Lexical settings of a tokenizer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TokenizerConfig {
    /// Character that starts a comment running to end of line
    pub comment_char: Option<char>,

    /// When true, end of line is returned as [`Token::Eol`]; otherwise it is whitespace
    pub eol_significant: bool,

    /// Delimiter of quoted strings. Escapes are not supported.
    pub quote_char: char,
}

impl Default for TokenizerConfig {
    fn default() -> Self {
        Self {
            comment_char: Some('#'),
            eol_significant: false,
            quote_char: '"',
        }
    }
}

/// Tokenizer over a buffered character source
pub struct Tokenizer<R> {
    source: R,
    config: TokenizerConfig,
    buf: Vec<u8>,
    line: Vec<char>,
    pos: usize,
    line_no: usize,
    eol_pending: bool,
    exhausted: bool,
}

impl<R: BufRead> Tokenizer<R> {
    pub fn new(source: R, config: TokenizerConfig) -> Self {
        Self {
            source,
            config,
            buf: Vec::new(),
            line: Vec::new(),
            pos: 0,
            line_no: 0,
            eol_pending: false,
            exhausted: false,
        }
    }

    /// Number of the line the last token came from (1-based, 0 before any read)
    pub fn line(&self) -> usize {
        self.line_no
    }

    /// Produce the next token
    ///
    /// Once the input is exhausted every call returns [`Token::Eof`]. A last
    /// line without a trailing newline still ends with [`Token::Eol`] when
    /// end of line is significant.
    pub fn next_token(&mut self) -> Result<Token> {
        loop {
            if self.pos >= self.line.len() {
                if self.exhausted {
                    return Ok(Token::Eof);
                }
                if self.eol_pending {
                    self.eol_pending = false;
                    if self.config.eol_significant {
                        return Ok(Token::Eol);
                    }
                }
                if !self.fill_line()? {
                    self.exhausted = true;
                    return Ok(Token::Eof);
                }
                continue;
            }

            let c = self.line[self.pos];
            if c.is_whitespace() {
                self.pos += 1;
            } else if Some(c) == self.config.comment_char {
                self.pos = self.line.len();
            } else if c == self.config.quote_char {
                return self.read_quoted();
            } else {
                return self.read_word();
            }
        }
    }

    /// Read the next physical line. At most `MAX_LINE_LEN + 1` bytes are
    /// pulled from the source for one line.
    fn fill_line(&mut self) -> Result<bool> {
        self.buf.clear();
        let limit = MAX_LINE_LEN as u64 + 1;
        let read = (&mut self.source)
            .take(limit)
            .read_until(b'\n', &mut self.buf)?;
        if read == 0 {
            return Ok(false);
        }

        self.line_no += 1;
        if self.buf.len() > MAX_LINE_LEN {
            return Err(Error::lexical(
                self.line_no,
                1,
                format!("line longer than {} bytes", MAX_LINE_LEN),
            ));
        }

        let text = std::str::from_utf8(&self.buf)
            .map_err(|_| Error::lexical(self.line_no, 1, "input is not valid UTF-8"))?;
        self.line = text
            .trim_end_matches(|c| c == '\n' || c == '\r')
            .chars()
            .collect();
        self.pos = 0;
        self.eol_pending = true;
        Ok(true)
    }

    fn read_quoted(&mut self) -> Result<Token> {
        let open = self.pos;
        let start = open + 1;
        let quote = self.config.quote_char;

        let Some(len) = self.line[start..].iter().position(|&c| c == quote) else {
            return Err(Error::lexical(
                self.line_no,
                open + 1,
                "unterminated quoted string",
            ));
        };
        if len > MAX_TOKEN_LEN {
            return Err(Error::lexical(self.line_no, open + 1, "quoted string too long"));
        }

        let text: String = self.line[start..start + len].iter().collect();
        self.pos = start + len + 1;
        Ok(Token::Quoted(text))
    }

    fn read_word(&mut self) -> Result<Token> {
        let start = self.pos;
        let quote = self.config.quote_char;
        let comment = self.config.comment_char;

        let len = self.line[start..]
            .iter()
            .position(|&c| c.is_whitespace() || c == quote || Some(c) == comment)
            .unwrap_or(self.line.len() - start);
        if len > MAX_TOKEN_LEN {
            return Err(Error::lexical(self.line_no, start + 1, "word too long"));
        }

        let text: String = self.line[start..start + len].iter().collect();
        self.pos = start + len;

        if is_numeric(&text) {
            Ok(Token::Number(text))
        } else {
            Ok(Token::Word(text))
        }
    }
}

/// `-?digits[.digits]`, with at least one digit
fn is_numeric(text: &str) -> bool {
    let body = text.strip_prefix('-').unwrap_or(text);
    let mut digit = false;
    let mut dot = false;
    for c in body.chars() {
        match c {
            '0'..='9' => digit = true,
            '.' if !dot => dot = true,
            _ => return false,
        }
    }
    digit
}
