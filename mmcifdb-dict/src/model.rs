//! Category and item definitions.
//!
//! A category corresponds to a destination table and an item to one of its
//! columns. Both are built once by the dictionary reader and are read-only
//! afterwards.

use crate::filter::ItemFilter;
use std::hash::{Hash, Hasher};

/// Returns the category part of a data name.
///
/// Leading underscores are dropped and the text before the first dot is kept,
/// so `_chem_comp.id` and `chem_comp` both give `chem_comp`.
#[must_use]
pub fn category_of(name: &str) -> &str {
    let name = name.trim_start_matches('_');
    name.split_once('.').map_or(name, |(category, _)| category)
}

/// Returns the local part of a data name (after the first dot).
///
/// Names without a dot are returned unchanged.
#[must_use]
pub fn local_name(name: &str) -> &str {
    name.split_once('.').map_or(name, |(_, local)| local)
}

/// Item (attribute) definition.
#[derive(Debug, Clone)]
pub struct Item {
    /// Fully-qualified name, e.g. `_chem_comp.id`.
    pub full_name: String,
    /// Local name within the category, e.g. `id`.
    pub name: String,
    /// Description text.
    pub description: String,
    /// Whether a value is required (`_item.mandatory_code yes`).
    pub mandatory_code: bool,
    /// Domain type code (`_item_type.code`).
    pub type_code: Option<String>,
    /// Default value literal (`_item_default.value`).
    pub default_value: Option<String>,
    index: bool,
}

impl Item {
    /// Creates a new item definition.
    #[must_use]
    pub fn new(full_name: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            full_name: full_name.into(),
            name: name.into(),
            description: String::new(),
            mandatory_code: false,
            type_code: None,
            default_value: None,
            index: false,
        }
    }

    /// Returns true if the item is part of its category's key.
    ///
    /// Only meaningful once the item has been added to a category.
    #[must_use]
    pub const fn is_index(&self) -> bool {
        self.index
    }
}

impl PartialEq for Item {
    fn eq(&self, other: &Self) -> bool {
        self.full_name == other.full_name
    }
}

impl Eq for Item {}

impl Hash for Item {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.full_name.hash(state);
    }
}

/// Category (table) definition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Category {
    /// Category identifier, also the table name.
    pub id: String,
    /// Description text.
    pub description: String,
    /// Local names of the key items, in declaration order.
    pub key_names: Vec<String>,
    items: Vec<Item>,
}

impl Category {
    /// Creates a new category with no items.
    #[must_use]
    pub fn new(id: impl Into<String>, description: impl Into<String>, key_names: Vec<String>) -> Self {
        Self {
            id: id.into(),
            description: description.into(),
            key_names,
            items: Vec::new(),
        }
    }

    /// Returns the items in the order they were added.
    #[must_use]
    pub fn items(&self) -> &[Item] {
        &self.items
    }

    /// Returns the number of items.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns true if the category has no items.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Looks up an item by local name.
    #[must_use]
    pub fn get_item(&self, name: &str) -> Option<&Item> {
        self.items.iter().find(|item| item.name == name)
    }

    /// Returns true if the local name is one of the key names.
    #[must_use]
    pub fn is_key(&self, name: &str) -> bool {
        self.key_names.iter().any(|key| key == name)
    }

    /// Adds an item to the category.
    ///
    /// The item is rejected if the filter excludes it, if it belongs to
    /// another category, or if an item with the same full name is already
    /// present. Accepted items get their index flag set from the key names.
    ///
    /// # Returns
    /// True if the item was added.
    pub fn add_item(&mut self, mut item: Item, filter: Option<&ItemFilter>) -> bool {
        if category_of(&item.full_name) != self.id {
            tracing::warn!(
                "Item {} does not belong to category {}, skipping",
                item.full_name,
                self.id
            );
            return false;
        }

        if let Some(filter) = filter
            && !filter.should_include(&self.id, &item.name)
        {
            tracing::debug!("Item {} filtered out", item.full_name);
            return false;
        }

        if self.items.contains(&item) {
            tracing::debug!("Item {} already present in {}", item.full_name, self.id);
            return false;
        }

        item.index = self.is_key(&item.name);
        self.items.push(item);
        true
    }
}
