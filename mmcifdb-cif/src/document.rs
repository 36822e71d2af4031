//! CIF document model.
//!
//! A [`Document`] holds data blocks. Each [`Block`] holds tag/value pairs,
//! loops and save frames; a [`Frame`] holds pairs and loops. Tag lookup is
//! case-insensitive, as CIF data names are.

use crate::error::{ParseError, Result};
use std::fmt;

/// A single CIF value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    /// `?` - value is unknown.
    Unknown,
    /// `.` - value is inapplicable.
    Inapplicable,
    /// Literal text with quoting removed.
    Text(String),
}

impl Value {
    /// Returns the text of the value, or `None` for `?` and `.`.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            Self::Unknown | Self::Inapplicable => None,
        }
    }

    /// Returns true for `?` and `.`.
    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Unknown | Self::Inapplicable)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unknown => f.write_str("?"),
            Self::Inapplicable => f.write_str("."),
            Self::Text(text) => f.write_str(text),
        }
    }
}

/// Tag/value pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pair {
    /// Data name, including the leading underscore.
    pub tag: String,
    /// Value.
    pub value: Value,
}

/// Loop (table) of values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Loop {
    tags: Vec<String>,
    values: Vec<Value>,
}

impl Loop {
    /// Creates a loop from its header tags and row-major values.
    ///
    /// # Errors
    /// Returns `ParseError::LoopMismatch` if the values do not fill whole rows.
    pub fn new(tags: Vec<String>, values: Vec<Value>, line: usize) -> Result<Self> {
        if tags.is_empty() || values.len() % tags.len() != 0 {
            return Err(ParseError::LoopMismatch {
                line,
                tags: tags.len(),
                values: values.len(),
            });
        }
        Ok(Self { tags, values })
    }

    /// Returns the loop header tags.
    #[must_use]
    pub fn tags(&self) -> &[String] {
        &self.tags
    }

    /// Returns the number of columns.
    #[must_use]
    pub fn width(&self) -> usize {
        self.tags.len()
    }

    /// Returns the number of rows.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len() / self.tags.len()
    }

    /// Returns true if the loop has no rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Returns the column position of a tag.
    #[must_use]
    pub fn column_index(&self, tag: &str) -> Option<usize> {
        self.tags.iter().position(|t| t.eq_ignore_ascii_case(tag))
    }

    /// Returns true if the loop has a column for the tag.
    #[must_use]
    pub fn has_tag(&self, tag: &str) -> bool {
        self.column_index(tag).is_some()
    }

    /// Iterates over rows in source order.
    pub fn rows(&self) -> impl Iterator<Item = &[Value]> {
        self.values.chunks(self.tags.len())
    }

    /// Iterates over one column.
    pub fn column(&self, tag: &str) -> Option<impl Iterator<Item = &Value>> {
        let index = self.column_index(tag)?;
        Some(self.rows().map(move |row| &row[index]))
    }

    /// Selects the given columns, in the given order, for every row.
    ///
    /// Returns `None` unless every tag is present in the loop.
    #[must_use]
    pub fn select(&self, tags: &[&str]) -> Option<Vec<Vec<&Value>>> {
        let indices = tags
            .iter()
            .map(|tag| self.column_index(tag))
            .collect::<Option<Vec<_>>>()?;

        Some(
            self.rows()
                .map(|row| indices.iter().map(|&i| &row[i]).collect())
                .collect(),
        )
    }
}

/// Pair or loop inside a block or frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Entry {
    /// Single tag/value pair.
    Pair(Pair),
    /// Loop of values.
    Loop(Loop),
}

/// Tag lookup shared by blocks and frames.
pub trait TagLookup {
    /// Returns the pairs and loops in source order.
    fn entries(&self) -> &[Entry];

    /// Finds a single value for a tag.
    ///
    /// Matches a pair, or a loop column when the loop has exactly one row.
    fn find_value(&self, tag: &str) -> Option<&Value> {
        self.entries().iter().find_map(|entry| match entry {
            Entry::Pair(pair) if pair.tag.eq_ignore_ascii_case(tag) => Some(&pair.value),
            Entry::Loop(lp) if lp.len() == 1 => {
                lp.column_index(tag).map(|index| &lp.values[index])
            }
            _ => None,
        })
    }

    /// Finds the text of a single value, skipping `?` and `.`.
    fn find_str(&self, tag: &str) -> Option<&str> {
        self.find_value(tag).and_then(Value::as_str)
    }

    /// Finds the loop that has a column for the tag.
    fn find_loop(&self, tag: &str) -> Option<&Loop> {
        self.entries().iter().find_map(|entry| match entry {
            Entry::Loop(lp) if lp.has_tag(tag) => Some(lp),
            _ => None,
        })
    }
}

/// Save frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    /// Frame name without the `save_` prefix.
    pub name: String,
    /// Pairs and loops in source order.
    pub entries: Vec<Entry>,
}

impl Frame {
    /// Creates an empty frame.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            entries: Vec::new(),
        }
    }
}

impl TagLookup for Frame {
    fn entries(&self) -> &[Entry] {
        &self.entries
    }
}

/// Data block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Block {
    /// Block name without the `data_` prefix.
    pub name: String,
    /// Pairs and loops outside any frame, in source order.
    pub entries: Vec<Entry>,
    /// Save frames in source order.
    pub frames: Vec<Frame>,
}

impl Block {
    /// Creates an empty block.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            entries: Vec::new(),
            frames: Vec::new(),
        }
    }

    /// Iterates over save frames in source order.
    pub fn frames(&self) -> impl Iterator<Item = &Frame> {
        self.frames.iter()
    }

    /// Finds a frame by exact name.
    #[must_use]
    pub fn find_frame(&self, name: &str) -> Option<&Frame> {
        self.frames.iter().find(|f| f.name == name)
    }
}

impl TagLookup for Block {
    fn entries(&self) -> &[Entry] {
        &self.entries
    }
}

/// Parsed CIF document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Document {
    /// Data blocks in source order.
    pub blocks: Vec<Block>,
}

impl Document {
    /// Returns the only data block of the document.
    ///
    /// # Errors
    /// Returns `ParseError::BlockCount` unless there is exactly one block.
    pub fn sole_block(&self) -> Result<&Block> {
        match self.blocks.as_slice() {
            [block] => Ok(block),
            blocks => Err(ParseError::BlockCount {
                found: blocks.len(),
            }),
        }
    }

    /// Finds a block by name.
    #[must_use]
    pub fn find_block(&self, name: &str) -> Option<&Block> {
        self.blocks.iter().find(|b| b.name.eq_ignore_ascii_case(name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(s: &str) -> Value {
        Value::Text(s.to_string())
    }

    fn sample_loop() -> Loop {
        Loop::new(
            vec![
                "_item.name".to_string(),
                "_item.category_id".to_string(),
                "_item.mandatory_code".to_string(),
            ],
            vec![
                text("_a.id"),
                text("a"),
                text("yes"),
                text("_b.a_id"),
                text("b"),
                text("no"),
            ],
            1,
        )
        .expect("Failed to build loop")
    }

    #[test]
    fn test_value_as_str() {
        assert_eq!(text("x").as_str(), Some("x"));
        assert_eq!(Value::Unknown.as_str(), None);
        assert_eq!(Value::Inapplicable.as_str(), None);
        assert!(Value::Unknown.is_null());
        assert!(!text("?").is_null());
    }

    #[test]
    fn test_value_display() {
        assert_eq!(Value::Unknown.to_string(), "?");
        assert_eq!(Value::Inapplicable.to_string(), ".");
        assert_eq!(text("abc").to_string(), "abc");
    }

    #[test]
    fn test_loop_shape() {
        let lp = sample_loop();
        assert_eq!(lp.width(), 3);
        assert_eq!(lp.len(), 2);
        assert!(!lp.is_empty());
        assert_eq!(lp.column_index("_ITEM.CATEGORY_ID"), Some(1));
    }

    #[test]
    fn test_loop_mismatch() {
        let result = Loop::new(
            vec!["_a".to_string(), "_b".to_string()],
            vec![text("1")],
            7,
        );
        assert!(matches!(
            result,
            Err(ParseError::LoopMismatch {
                line: 7,
                tags: 2,
                values: 1
            })
        ));
    }

    #[test]
    fn test_loop_select_reorders_columns() {
        let lp = sample_loop();
        let rows = lp
            .select(&["_item.category_id", "_item.name"])
            .expect("columns exist");
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0], vec![&text("a"), &text("_a.id")]);
        assert_eq!(rows[1], vec![&text("b"), &text("_b.a_id")]);
    }

    #[test]
    fn test_loop_select_missing_column() {
        let lp = sample_loop();
        assert!(lp.select(&["_item.name", "_item_type.code"]).is_none());
    }

    #[test]
    fn test_loop_column() {
        let lp = sample_loop();
        let names: Vec<_> = lp
            .column("_item.name")
            .expect("column exists")
            .filter_map(Value::as_str)
            .collect();
        assert_eq!(names, vec!["_a.id", "_b.a_id"]);
    }

    #[test]
    fn test_find_value_pair_and_single_row_loop() {
        let mut frame = Frame::new("_a.id");
        frame.entries.push(Entry::Pair(Pair {
            tag: "_item_type.code".to_string(),
            value: text("code"),
        }));
        frame.entries.push(Entry::Loop(
            Loop::new(vec!["_item.name".to_string()], vec![text("_a.id")], 1)
                .expect("Failed to build loop"),
        ));

        assert_eq!(frame.find_str("_Item_Type.Code"), Some("code"));
        assert_eq!(frame.find_str("_item.name"), Some("_a.id"));
        assert!(frame.find_value("_item.missing").is_none());
    }

    #[test]
    fn test_find_value_skips_multi_row_loop() {
        let mut frame = Frame::new("_a.id");
        frame.entries.push(Entry::Loop(sample_loop()));

        assert!(frame.find_value("_item.name").is_none());
        assert!(frame.find_loop("_item.name").is_some());
    }

    #[test]
    fn test_sole_block() {
        let mut doc = Document::default();
        assert!(matches!(
            doc.sole_block(),
            Err(ParseError::BlockCount { found: 0 })
        ));

        doc.blocks.push(Block::new("one"));
        assert_eq!(doc.sole_block().expect("one block").name, "one");

        doc.blocks.push(Block::new("two"));
        assert!(matches!(
            doc.sole_block(),
            Err(ParseError::BlockCount { found: 2 })
        ));
        assert!(doc.find_block("TWO").is_some());
    }
}
