//! CIF document parser.
//!
//! This module builds a [`Document`] from the token stream produced by the
//! [`Lexer`](crate::lexer::Lexer).

use crate::document::{Block, Document, Entry, Frame, Loop, Pair, Value};
use crate::error::{ParseError, Result};
use crate::lexer::{Lexer, Token, TokenKind};
use std::iter::Peekable;
use std::path::Path;

/// Parses a CIF document from a string.
///
/// # Arguments
/// * `input` - CIF text
///
/// # Returns
/// Parsed document or parse error.
///
/// # Errors
/// Returns `ParseError` if the text is not well-formed CIF.
pub fn parse(input: &str) -> Result<Document> {
    let document = Parser::new(input).parse_document()?;
    tracing::debug!(
        "Parsed CIF document with {} block(s), {} frame(s)",
        document.blocks.len(),
        document.blocks.iter().map(|b| b.frames.len()).sum::<usize>()
    );
    Ok(document)
}

/// Parses a CIF document from a file.
///
/// # Errors
/// Returns `ParseError` if the file cannot be read or is not well-formed CIF.
pub fn parse_file(path: &Path) -> Result<Document> {
    tracing::info!("Reading CIF document {}", path.display());
    let text = std::fs::read_to_string(path)?;
    parse(&text)
}

struct Parser<'a> {
    tokens: Peekable<Lexer<'a>>,
}

impl<'a> Parser<'a> {
    fn new(input: &'a str) -> Self {
        Self {
            tokens: Lexer::new(input).peekable(),
        }
    }

    fn next(&mut self) -> Result<Option<Token>> {
        self.tokens.next().transpose()
    }

    /// Takes the next token if it is a tag.
    fn next_tag(&mut self) -> Result<Option<String>> {
        match self
            .tokens
            .next_if(|t| matches!(t, Ok(Token { kind: TokenKind::Tag(_), .. })))
            .transpose()?
        {
            Some(Token {
                kind: TokenKind::Tag(tag),
                ..
            }) => Ok(Some(tag)),
            _ => Ok(None),
        }
    }

    /// Takes the next token if it is a value.
    fn next_value(&mut self) -> Result<Option<Value>> {
        match self
            .tokens
            .next_if(|t| matches!(t, Ok(Token { kind: TokenKind::Value(_), .. })))
            .transpose()?
        {
            Some(Token {
                kind: TokenKind::Value(value),
                ..
            }) => Ok(Some(value)),
            _ => Ok(None),
        }
    }

    fn parse_document(mut self) -> Result<Document> {
        let mut document = Document::default();

        while let Some(token) = self.next()? {
            let line = token.line;
            match token.kind {
                TokenKind::DataBlock(name) => document.blocks.push(Block::new(name)),
                kind => {
                    let Some(block) = document.blocks.last_mut() else {
                        return Err(ParseError::unexpected(
                            kind.describe(),
                            line,
                            "content before the first data block",
                        ));
                    };
                    match kind {
                        TokenKind::SaveStart(name) => {
                            let frame = self.parse_frame(name)?;
                            block.frames.push(frame);
                        }
                        other => {
                            let entry = self.parse_entry(other, line, "data block")?;
                            block.entries.push(entry);
                        }
                    }
                }
            }
        }

        Ok(document)
    }

    fn parse_frame(&mut self, name: String) -> Result<Frame> {
        let mut frame = Frame::new(name);

        loop {
            let Some(token) = self.next()? else {
                return Err(ParseError::UnterminatedFrame { name: frame.name });
            };
            match token.kind {
                TokenKind::SaveEnd => return Ok(frame),
                TokenKind::DataBlock(_) => {
                    return Err(ParseError::UnterminatedFrame { name: frame.name });
                }
                TokenKind::SaveStart(inner) => {
                    return Err(ParseError::unexpected(
                        format!("save_{inner}"),
                        token.line,
                        format!("nested inside save frame '{}'", frame.name),
                    ));
                }
                kind => {
                    let entry = self.parse_entry(kind, token.line, "save frame")?;
                    frame.entries.push(entry);
                }
            }
        }
    }

    /// Parses a pair or loop starting with the given token.
    fn parse_entry(&mut self, kind: TokenKind, line: usize, context: &str) -> Result<Entry> {
        match kind {
            TokenKind::Tag(tag) => {
                let value = self
                    .next_value()?
                    .ok_or(ParseError::MissingValue { tag: tag.clone(), line })?;
                Ok(Entry::Pair(Pair { tag, value }))
            }
            TokenKind::Loop => self.parse_loop(line).map(Entry::Loop),
            other => Err(ParseError::unexpected(
                other.describe(),
                line,
                format!("expected a tag or loop_ in {context}"),
            )),
        }
    }

    fn parse_loop(&mut self, line: usize) -> Result<Loop> {
        let mut tags = Vec::new();
        while let Some(tag) = self.next_tag()? {
            tags.push(tag);
        }
        if tags.is_empty() {
            return Err(ParseError::unexpected("loop_", line, "loop without tags"));
        }

        let mut values = Vec::new();
        while let Some(value) = self.next_value()? {
            values.push(value);
        }

        Loop::new(tags, values, line)
    }
}
