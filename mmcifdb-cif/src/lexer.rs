//! CIF tokenizer.
//!
//! Splits CIF text into reserved words, tags and values. Quoting is removed
//! here so later stages only ever see the logical content of a value.

use crate::document::Value;
use crate::error::{ParseError, Result};

/// Kind of a lexical token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenKind {
    /// `data_<name>` block header.
    DataBlock(String),
    /// `save_<name>` frame header.
    SaveStart(String),
    /// Bare `save_` closing a frame.
    SaveEnd,
    /// `loop_` keyword.
    Loop,
    /// Data name starting with an underscore.
    Tag(String),
    /// Any value token.
    Value(Value),
}

impl TokenKind {
    /// Short description used in error messages.
    #[must_use]
    pub fn describe(&self) -> String {
        match self {
            Self::DataBlock(name) => format!("data_{name}"),
            Self::SaveStart(name) => format!("save_{name}"),
            Self::SaveEnd => "save_".to_string(),
            Self::Loop => "loop_".to_string(),
            Self::Tag(tag) => format!("tag '{tag}'"),
            Self::Value(value) => format!("value '{value}'"),
        }
    }
}

/// Token with its source line (1-based).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    /// Token kind.
    pub kind: TokenKind,
    /// Line where the token starts.
    pub line: usize,
}

/// Streaming tokenizer over CIF text.
pub struct Lexer<'a> {
    input: &'a str,
    pos: usize,
    line: usize,
}

impl<'a> Lexer<'a> {
    /// Creates a lexer over the given text.
    #[must_use]
    pub fn new(input: &'a str) -> Self {
        Self {
            input,
            pos: 0,
            line: 1,
        }
    }

    fn bytes(&self) -> &'a [u8] {
        self.input.as_bytes()
    }

    fn at_line_start(&self) -> bool {
        self.pos == 0 || self.bytes()[self.pos - 1] == b'\n'
    }

    /// Skips whitespace and comments. Returns false at end of input.
    fn skip_trivia(&mut self) -> bool {
        let bytes = self.bytes();
        while self.pos < bytes.len() {
            match bytes[self.pos] {
                b'\n' => {
                    self.line += 1;
                    self.pos += 1;
                }
                b' ' | b'\t' | b'\r' => self.pos += 1,
                b'#' => {
                    while self.pos < bytes.len() && bytes[self.pos] != b'\n' {
                        self.pos += 1;
                    }
                }
                _ => return true,
            }
        }
        false
    }

    fn read_text_field(&mut self) -> Result<Token> {
        let start_line = self.line;
        let start = self.pos + 1;
        let rest = &self.input[start..];
        let end = rest
            .find("\n;")
            .ok_or(ParseError::UnterminatedTextField { line: start_line })?;

        let raw = &rest[..end];
        self.line += raw.matches('\n').count() + 1;
        self.pos = start + end + 2;

        let content = raw
            .strip_prefix("\r\n")
            .or_else(|| raw.strip_prefix('\n'))
            .unwrap_or(raw)
            .trim_end_matches('\r');

        Ok(Token {
            kind: TokenKind::Value(Value::Text(content.to_string())),
            line: start_line,
        })
    }

    fn read_quoted(&mut self, quote: u8) -> Result<Token> {
        let bytes = self.bytes();
        let start = self.pos + 1;
        let mut i = start;

        while i < bytes.len() {
            match bytes[i] {
                b'\n' => break,
                b if b == quote
                    && bytes.get(i + 1).is_none_or(|next| next.is_ascii_whitespace()) =>
                {
                    let text = &self.input[start..i];
                    self.pos = i + 1;
                    return Ok(Token {
                        kind: TokenKind::Value(Value::Text(text.to_string())),
                        line: self.line,
                    });
                }
                _ => i += 1,
            }
        }

        Err(ParseError::UnterminatedQuote { line: self.line })
    }

    fn read_bare(&mut self) -> Result<Token> {
        let bytes = self.bytes();
        let start = self.pos;
        while self.pos < bytes.len() && !bytes[self.pos].is_ascii_whitespace() {
            self.pos += 1;
        }
        let word = &self.input[start..self.pos];
        let line = self.line;

        let kind = if word.starts_with('_') {
            TokenKind::Tag(word.to_string())
        } else if let Some(name) = strip_reserved(word, "data_") {
            TokenKind::DataBlock(name.to_string())
        } else if let Some(name) = strip_reserved(word, "save_") {
            if name.is_empty() {
                TokenKind::SaveEnd
            } else {
                TokenKind::SaveStart(name.to_string())
            }
        } else if word.eq_ignore_ascii_case("loop_") {
            TokenKind::Loop
        } else if strip_reserved(word, "global_").is_some() || strip_reserved(word, "stop_").is_some()
        {
            return Err(ParseError::Unsupported {
                word: word.to_string(),
                line,
            });
        } else {
            TokenKind::Value(match word {
                "?" => Value::Unknown,
                "." => Value::Inapplicable,
                _ => Value::Text(word.to_string()),
            })
        };

        Ok(Token { kind, line })
    }
}

impl Iterator for Lexer<'_> {
    type Item = Result<Token>;

    fn next(&mut self) -> Option<Self::Item> {
        if !self.skip_trivia() {
            return None;
        }

        let token = match self.bytes()[self.pos] {
            b';' if self.at_line_start() => self.read_text_field(),
            quote @ (b'\'' | b'"') => self.read_quoted(quote),
            _ => self.read_bare(),
        };

        if token.is_err() {
            // Stop after the first error.
            self.pos = self.input.len();
        }
        Some(token)
    }
}

/// Case-insensitive prefix strip for reserved words.
fn strip_reserved<'w>(word: &'w str, prefix: &str) -> Option<&'w str> {
    let head = word.get(..prefix.len())?;
    head.eq_ignore_ascii_case(prefix)
        .then(|| &word[prefix.len()..])
}
