//! Dictionary reader.
//!
//! Extracts [`Category`] and [`Item`] definitions from the save frames of a
//! DDL2 dictionary. Item definitions are not always kept in their own frame:
//! a frame may define several related items at once through an `_item.name`
//! loop. Those grouped items are collected first, so category assembly does
//! not depend on the order in which frames appear.

use crate::error::DictError;
use crate::filter::ItemFilter;
use crate::model::{Category, Item, category_of, local_name};
use mmcifdb_cif::{Block, Document, Frame, TagLookup, Value};
use std::collections::{HashMap, HashSet};
use std::path::Path;

const CATEGORY_DESCRIPTION: &str = "_category.description";
const CATEGORY_KEY_NAME: &str = "_category_key.name";
const ITEM_NAME: &str = "_item.name";
const ITEM_CATEGORY_ID: &str = "_item.category_id";
const ITEM_MANDATORY_CODE: &str = "_item.mandatory_code";
const ITEM_DESCRIPTION: &str = "_item_description.description";
const ITEM_TYPE_CODE: &str = "_item_type.code";
const ITEM_DEFAULT_VALUE: &str = "_item_default.value";

/// Strips quote, semicolon and whitespace decoration from both ends of a value.
///
/// Applying it more than once gives the same result as applying it once.
#[must_use]
pub fn strip_value(value: &str) -> &str {
    value.trim_matches(|c: char| c == '"' || c == ';' || c.is_whitespace())
}

/// Reader over a parsed dictionary with a single data block.
#[derive(Debug, Clone)]
pub struct DictReader {
    document: Document,
}

impl DictReader {
    /// Wraps a parsed document.
    ///
    /// # Errors
    /// Returns `DictError` unless the document has exactly one data block.
    pub fn new(document: Document) -> Result<Self, DictError> {
        document.sole_block()?;
        Ok(Self { document })
    }

    /// Parses a dictionary from text.
    ///
    /// # Errors
    /// Returns `DictError` if the text is not a single-block CIF document.
    pub fn parse(text: &str) -> Result<Self, DictError> {
        Self::new(mmcifdb_cif::parse(text)?)
    }

    /// Reads and parses a dictionary file.
    ///
    /// # Errors
    /// Returns `DictError` if the file cannot be read or parsed.
    pub fn from_path(path: &Path) -> Result<Self, DictError> {
        Self::new(mmcifdb_cif::parse_file(path)?)
    }

    /// Returns the dictionary data block.
    #[must_use]
    pub fn block(&self) -> &Block {
        &self.document.blocks[0]
    }

    /// Extracts the requested categories.
    ///
    /// See [`read_categories`].
    #[must_use]
    pub fn get_categories<S: AsRef<str>>(
        &self,
        categories: &[S],
        filter: Option<&ItemFilter>,
    ) -> Vec<Category> {
        read_categories(self.block(), categories, filter)
    }
}

/// Extracts the requested categories and their items from a dictionary block.
///
/// # Arguments
/// * `block` - Dictionary data block
/// * `requested` - Category ids to extract
/// * `filter` - Optional item filter applied while items are attached
///
/// # Returns
/// Categories in the order their frames appear. Requested ids without a
/// category frame are logged and left out.
#[must_use]
pub fn read_categories<S: AsRef<str>>(
    block: &Block,
    requested: &[S],
    filter: Option<&ItemFilter>,
) -> Vec<Category> {
    let search: HashSet<&str> = requested.iter().map(AsRef::as_ref).collect();
    let mut categories: Vec<Category> = Vec::new();
    let mut positions: HashMap<String, usize> = HashMap::new();

    for frame in block.frames() {
        if !search.contains(frame.name.as_str()) {
            continue;
        }
        if positions.contains_key(&frame.name) {
            tracing::warn!("Duplicate category frame {}, keeping the first", frame.name);
            continue;
        }
        tracing::info!("Found category {}", frame.name);
        positions.insert(frame.name.clone(), categories.len());
        categories.push(parse_category(frame));
    }

    let mut reported = HashSet::new();
    for id in requested.iter().map(AsRef::as_ref) {
        if !positions.contains_key(id) && reported.insert(id) {
            tracing::warn!("Category {} not found in dictionary", id);
        }
    }

    let grouped_items = find_grouped_items(block, &search);

    for frame in block.frames() {
        let Some(&position) = positions.get(category_of(&frame.name)) else {
            continue;
        };
        let category = &mut categories[position];

        if let Some(item) = grouped_items.get(&frame.name) {
            tracing::debug!("Found grouped item {}", frame.name);
            category.add_item(item.clone(), filter);
        } else if frame.find_str(ITEM_NAME).is_some() {
            tracing::debug!("Found item {}", frame.name);
            category.add_item(parse_item(frame), filter);
        }
    }

    for category in &categories {
        tracing::debug!(
            "Finished category {} with {} item(s)",
            category.id,
            category.len()
        );
    }

    categories
}

/// Collects items defined in `_item.name` loops, keyed by full name.
///
/// When an item appears in several loops, the last definition in frame order
/// wins.
fn find_grouped_items(block: &Block, search: &HashSet<&str>) -> HashMap<String, Item> {
    let mut items: HashMap<String, Item> = HashMap::new();

    for frame in block.frames() {
        let Some(item_loop) = frame.find_loop(ITEM_NAME) else {
            continue;
        };
        let Some(rows) = item_loop.select(&[ITEM_NAME, ITEM_CATEGORY_ID, ITEM_MANDATORY_CODE])
        else {
            tracing::debug!(
                "Frame {} has an item loop without category or mandatory columns",
                frame.name
            );
            continue;
        };

        let description = frame_text(frame, ITEM_DESCRIPTION).unwrap_or_default();
        let type_code = frame_text(frame, ITEM_TYPE_CODE);
        let default_value = frame_text(frame, ITEM_DEFAULT_VALUE);

        for row in rows {
            let (Some(full_name), Some(category_id)) = (value_text(row[0]), value_text(row[1]))
            else {
                continue;
            };
            if !search.contains(category_id) {
                continue;
            }

            let mut item = Item::new(full_name, local_name(full_name));
            item.description = description.clone();
            item.mandatory_code = value_text(row[2]).is_some_and(is_yes);
            item.type_code = type_code.clone();
            item.default_value = default_value.clone();
            items.insert(full_name.to_string(), item);
        }
    }

    items
}

fn parse_category(frame: &Frame) -> Category {
    let description = frame_text(frame, CATEGORY_DESCRIPTION).unwrap_or_default();

    let key_names = match frame.find_str(CATEGORY_KEY_NAME) {
        Some(name) => vec![key_name(name)],
        None => frame
            .find_loop(CATEGORY_KEY_NAME)
            .and_then(|keys| keys.column(CATEGORY_KEY_NAME))
            .map(|column| column.filter_map(Value::as_str).map(key_name).collect())
            .unwrap_or_default(),
    };

    Category::new(frame.name.clone(), description, key_names)
}

fn parse_item(frame: &Frame) -> Item {
    let name = frame
        .find_str(ITEM_NAME)
        .map(|name| local_name(strip_value(name)))
        .unwrap_or_else(|| local_name(&frame.name));

    let mut item = Item::new(frame.name.clone(), name);
    item.description = frame_text(frame, ITEM_DESCRIPTION).unwrap_or_default();
    item.mandatory_code = frame.find_str(ITEM_MANDATORY_CODE).is_some_and(is_yes);
    item.type_code = frame_text(frame, ITEM_TYPE_CODE);
    item.default_value = frame_text(frame, ITEM_DEFAULT_VALUE);
    item
}

fn key_name(value: &str) -> String {
    local_name(strip_value(value)).to_string()
}

fn is_yes(value: &str) -> bool {
    strip_value(value).eq_ignore_ascii_case("yes")
}

/// Stripped, non-empty text of a value.
fn value_text(value: &Value) -> Option<&str> {
    value.as_str().map(strip_value).filter(|s| !s.is_empty())
}

fn frame_text(frame: &Frame, tag: &str) -> Option<String> {
    frame.find_value(tag).and_then(value_text).map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const DICTIONARY: &str = r#"data_mini.dic

save__chem_comp_atom.atom_id
    _item_description.description
;              The value of _chem_comp_atom.atom_id must uniquely identify
               each atom in each monomer in the CHEM_COMP_ATOM list.
;
    _item.name                  '_chem_comp_atom.atom_id'
    _item.category_id             chem_comp_atom
    _item.mandatory_code          yes
    _item_type.code               atcode
save_

save_chem_comp
    _category.description
;              Data items in the CHEM_COMP category give details about each
               of the chemical components.
;
    _category.id                  chem_comp
    _category.mandatory_code      no
    _category_key.name          '_chem_comp.id'
save_

save__chem_comp.formula_weight
    _item_description.description
;              Formula mass in daltons of the chemical component.
;
    _item.name                  '_chem_comp.formula_weight'
    _item.category_id             chem_comp
    _item.mandatory_code          no
    _item_type.code               float
save_

save__chem_comp.id
    _item_description.description
;              The value of _chem_comp.id must uniquely identify each item in
               the CHEM_COMP list.
;
    loop_
    _item.name
    _item.category_id
    _item.mandatory_code
         '_chem_comp.id'               chem_comp            yes
         '_chem_comp_atom.comp_id'     chem_comp_atom       yes
    _item_type.code               ucode
save_

save__chem_comp.name
    _item_description.description
;              The full name of the component.
;
    _item.name                  '_chem_comp.name'
    _item.category_id             chem_comp
    _item.mandatory_code          no
    _item_type.code               line
save_

save__chem_comp.mon_nstd_flag
    _item_description.description
;              'yes' indicates that this is a 'standard' monomer.
;
    _item.name                  '_chem_comp.mon_nstd_flag'
    _item.category_id             chem_comp
    _item.mandatory_code          no
    _item_default.value           no
    _item_type.code               ucode
save_

save_chem_comp_atom
    _category.description
;              Data items in the CHEM_COMP_ATOM category record details about
               the atoms in a chemical component.
;
    _category.id                  chem_comp_atom
    _category.mandatory_code      no
    loop_
    _category_key.name          '_chem_comp_atom.comp_id'
                                '_chem_comp_atom.atom_id'
save_

save__chem_comp_atom.comp_id
    _item_description.description
;              This data item is a pointer to _chem_comp.id in the CHEM_COMP
               category.
;
    _item.name                  '_chem_comp_atom.comp_id'
    _item.category_id             chem_comp_atom
    _item.mandatory_code          yes
save_

save_citation
    _category.description
;              Data items in the CITATION category record details about the
               literature cited.
;
    _category.id                  citation
    _category_key.name          '_citation.id'
save_
"#;

    fn reader() -> DictReader {
        DictReader::parse(DICTIONARY).expect("Failed to parse dictionary")
    }

    fn item_names(category: &Category) -> Vec<&str> {
        category.items().iter().map(|i| i.name.as_str()).collect()
    }

    #[test]
    fn test_strip_value() {
        assert_eq!(strip_value("\"quoted\""), "quoted");
        assert_eq!(strip_value(";\n  text field\n;"), "text field");
        assert_eq!(strip_value("  value;  "), "value");
        assert_eq!(strip_value("inner\"quote"), "inner\"quote");
        assert_eq!(strip_value(""), "");
    }

    #[test]
    fn test_strip_value_idempotent() {
        let samples = [
            "\" ;x\"",
            " ;x",
            "\"a\";",
            ";;\"\"  b  \"\";;",
            "plain",
            "   ",
            "\"\"",
            "'single'",
        ];
        for sample in samples {
            let once = strip_value(sample);
            assert_eq!(strip_value(once), once, "not idempotent for {sample:?}");
        }
    }

    #[test]
    fn test_categories_in_frame_order() {
        let categories = reader().get_categories(&["chem_comp_atom", "chem_comp"], None);
        let ids: Vec<_> = categories.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["chem_comp", "chem_comp_atom"]);
    }

    #[test]
    fn test_category_scalar_key() {
        let categories = reader().get_categories(&["chem_comp"], None);
        let chem_comp = &categories[0];

        assert_eq!(chem_comp.key_names, vec!["id"]);
        assert!(chem_comp.description.starts_with("Data items in the CHEM_COMP category"));
        assert!(chem_comp.description.ends_with("chemical components."));
    }

    #[test]
    fn test_category_loop_key() {
        let categories = reader().get_categories(&["chem_comp_atom"], None);
        assert_eq!(categories[0].key_names, vec!["comp_id", "atom_id"]);
    }

    #[test]
    fn test_category_items() {
        let categories = reader().get_categories(&["chem_comp"], None);
        let chem_comp = &categories[0];

        assert_eq!(
            item_names(chem_comp),
            vec!["formula_weight", "id", "name", "mon_nstd_flag"]
        );

        let id = chem_comp.get_item("id").expect("id item");
        assert_eq!(id.full_name, "_chem_comp.id");
        assert!(id.is_index());
        assert!(id.mandatory_code);
        assert_eq!(id.type_code.as_deref(), Some("ucode"));

        let name = chem_comp.get_item("name").expect("name item");
        assert!(!name.is_index());
        assert!(!name.mandatory_code);
        assert_eq!(name.type_code.as_deref(), Some("line"));
        assert_eq!(name.description, "The full name of the component.");
        assert_eq!(name.default_value, None);

        let flag = chem_comp.get_item("mon_nstd_flag").expect("flag item");
        assert_eq!(flag.default_value.as_deref(), Some("no"));
    }

    #[test]
    fn test_grouped_item_resolution() {
        let categories = reader().get_categories(&["chem_comp_atom"], None);
        let atom = &categories[0];

        let comp_id = atom.get_item("comp_id").expect("comp_id item");
        assert_eq!(comp_id.full_name, "_chem_comp_atom.comp_id");
        assert_eq!(comp_id.type_code.as_deref(), Some("ucode"));
        assert!(comp_id.mandatory_code);
        assert!(comp_id.is_index());
    }

    #[test]
    fn test_item_frame_before_category_frame() {
        let categories = reader().get_categories(&["chem_comp_atom"], None);
        let atom = &categories[0];

        assert_eq!(item_names(atom), vec!["atom_id", "comp_id"]);
        let atom_id = atom.get_item("atom_id").expect("atom_id item");
        assert_eq!(atom_id.type_code.as_deref(), Some("atcode"));
        assert!(atom_id.is_index());
    }

    #[test]
    fn test_category_without_items() {
        let categories = reader().get_categories(&["citation"], None);
        assert_eq!(categories.len(), 1);
        assert!(categories[0].is_empty());
        assert_eq!(categories[0].key_names, vec!["id"]);
    }

    #[test]
    fn test_missing_category_is_absent() {
        let categories = reader().get_categories(&["chem_comp", "no_such_category"], None);
        assert_eq!(categories.len(), 1);
        assert_eq!(categories[0].id, "chem_comp");

        let none = reader().get_categories(&["no_such_category"], None);
        assert!(none.is_empty());
    }

    #[test]
    fn test_unrequested_categories_ignored() {
        let categories = reader().get_categories(&["chem_comp"], None);
        assert_eq!(categories.len(), 1);
        assert!(categories[0].get_item("comp_id").is_none());
    }

    #[test]
    fn test_include_filter() {
        let filter = ItemFilter::include(["chem_comp.id"]);
        let categories = reader().get_categories(&["chem_comp", "chem_comp_atom"], Some(&filter));

        assert_eq!(item_names(&categories[0]), vec!["id"]);
        assert_eq!(item_names(&categories[1]), vec!["atom_id", "comp_id"]);
    }

    #[test]
    fn test_exclude_filter() {
        let filter = ItemFilter::exclude(["chem_comp.name", "chem_comp.formula_weight"]);
        let categories = reader().get_categories(&["chem_comp"], Some(&filter));

        assert_eq!(item_names(&categories[0]), vec!["id", "mon_nstd_flag"]);
    }

    #[test]
    fn test_repeated_reads_are_identical() {
        let reader = reader();
        let first = reader.get_categories(&["chem_comp", "chem_comp_atom"], None);
        let second = reader.get_categories(&["chem_comp", "chem_comp_atom"], None);

        assert_eq!(first, second);
        for (a, b) in first.iter().zip(&second) {
            assert_eq!(item_names(a), item_names(b));
        }
    }

    #[test]
    fn test_later_own_frame_definition_wins() {
        let text = r#"data_d
save__a.id
    loop_
    _item.name
    _item.category_id
    _item.mandatory_code
       '_a.id'    a    yes
       '_b.a_id'  b    no
    _item_type.code   int
save_

save__b.a_id
    loop_
    _item.name
    _item.category_id
    _item.mandatory_code
       '_b.a_id'  b    yes
    _item_type.code   code
save_

save_b
    _category_key.name  '_b.a_id'
save_
"#;
        let reader = DictReader::parse(text).expect("Failed to parse");
        let categories = reader.get_categories(&["b"], None);
        let item = categories[0].get_item("a_id").expect("a_id item");

        assert_eq!(item.type_code.as_deref(), Some("code"));
        assert!(item.mandatory_code);
    }

    #[test]
    fn test_last_grouped_definition_wins() {
        let text = r#"data_d
save__a.id
    loop_
    _item.name
    _item.category_id
    _item.mandatory_code
       '_a.id'    a    yes
       '_b.x'     b    no
    _item_type.code   int
save_

save__c.id
    _item_description.description   'Shared identifier.'
    loop_
    _item.name
    _item.category_id
    _item.mandatory_code
       '_c.id'    c    yes
       '_b.x'     b    yes
    _item_type.code   code
save_

save_b
    _category_key.name  '_b.x'
save_

save__b.x
    _item.name           '_b.x'
    _item.mandatory_code no
save_
"#;
        let reader = DictReader::parse(text).expect("Failed to parse");
        let categories = reader.get_categories(&["b"], None);
        let item = categories[0].get_item("x").expect("x item");

        assert_eq!(item.type_code.as_deref(), Some("code"));
        assert!(item.mandatory_code);
        assert_eq!(item.description, "Shared identifier.");
    }

    #[test]
    fn test_grouped_loop_after_item_frame() {
        let text = r#"data_d
save__b.x
    _item.name           '_b.x'
    _item.mandatory_code no
save_

save_b
    _category_key.name  '_b.x'
save_

save__a.id
    loop_
    _item.name
    _item.category_id
    _item.mandatory_code
       '_a.id'    a    yes
       '_b.x'     b    yes
    _item_type.code   code
save_
"#;
        let reader = DictReader::parse(text).expect("Failed to parse");
        let categories = reader.get_categories(&["b"], None);
        assert_eq!(categories[0].len(), 1);

        let item = categories[0].get_item("x").expect("x item");
        assert_eq!(item.type_code.as_deref(), Some("code"));
        assert!(item.mandatory_code);
        assert!(item.is_index());
    }

    #[test]
    fn test_null_values_are_absent() {
        let text = r#"data_d
save_a
    _category.description  ?
    _category_key.name     '_a.id'
save_
save__a.id
    _item.name             '_a.id'
    _item.mandatory_code   yes
    _item_type.code        .
    _item_default.value    ?
save_
"#;
        let reader = DictReader::parse(text).expect("Failed to parse");
        let categories = reader.get_categories(&["a"], None);
        let item = categories[0].get_item("id").expect("id item");

        assert_eq!(categories[0].description, "");
        assert_eq!(item.type_code, None);
        assert_eq!(item.default_value, None);
    }

    #[test]
    fn test_requires_single_block() {
        let result = DictReader::parse("data_a\n_x 1\ndata_b\n_x 2\n");
        assert!(matches!(
            result,
            Err(DictError::Parse(mmcifdb_cif::ParseError::BlockCount { found: 2 }))
        ));
    }

    #[test]
    fn test_from_path() {
        let mut file = tempfile::NamedTempFile::new().expect("Failed to create temp file");
        file.write_all(DICTIONARY.as_bytes())
            .expect("Failed to write temp file");

        let reader = DictReader::from_path(file.path()).expect("Failed to read dictionary");
        assert_eq!(reader.block().name, "mini.dic");
        assert_eq!(reader.block().frames.len(), 9);
    }
}
