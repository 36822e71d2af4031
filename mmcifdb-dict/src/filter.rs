//! Item-level include/exclude filtering.
//!
//! Filter entries are fully-qualified item names such as `chem_comp.id`. A
//! leading underscore (`_chem_comp.id`) is accepted. Categories that no entry
//! mentions are never filtered.

use crate::model::category_of;
use std::collections::HashSet;

/// Include/exclude filter applied while items are added to categories.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ItemFilter {
    include_items: HashSet<String>,
    exclude_items: HashSet<String>,
    filtered_categories: HashSet<String>,
}

impl ItemFilter {
    /// Creates a filter from an allow-list and a deny-list.
    ///
    /// Callers are expected to pass only one non-empty list.
    #[must_use]
    pub fn new<I, E, S, T>(include_items: I, exclude_items: E) -> Self
    where
        I: IntoIterator<Item = S>,
        E: IntoIterator<Item = T>,
        S: AsRef<str>,
        T: AsRef<str>,
    {
        let include_items = normalize(include_items);
        let exclude_items = normalize(exclude_items);
        let filtered_categories = include_items
            .iter()
            .chain(&exclude_items)
            .map(|name| category_of(name).to_string())
            .collect();

        Self {
            include_items,
            exclude_items,
            filtered_categories,
        }
    }

    /// Creates a filter that keeps only the listed items of their categories.
    #[must_use]
    pub fn include<I, S>(items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self::new(items, std::iter::empty::<&str>())
    }

    /// Creates a filter that drops the listed items.
    #[must_use]
    pub fn exclude<I, S>(items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self::new(std::iter::empty::<&str>(), items)
    }

    /// Returns the allow-list.
    #[must_use]
    pub fn include_items(&self) -> &HashSet<String> {
        &self.include_items
    }

    /// Returns the deny-list.
    #[must_use]
    pub fn exclude_items(&self) -> &HashSet<String> {
        &self.exclude_items
    }

    /// Returns the categories mentioned by either list.
    #[must_use]
    pub fn filtered_categories(&self) -> &HashSet<String> {
        &self.filtered_categories
    }

    /// Returns true if the filter has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.include_items.is_empty() && self.exclude_items.is_empty()
    }

    /// Decides whether an item is kept.
    ///
    /// # Arguments
    /// * `category_id` - Owning category, e.g. `chem_comp`
    /// * `item_name` - Local item name, e.g. `id`
    #[must_use]
    pub fn should_include(&self, category_id: &str, item_name: &str) -> bool {
        if !self.filtered_categories.contains(category_id) {
            return true;
        }

        let full_name = format!("{category_id}.{item_name}");
        if !self.include_items.is_empty() && !self.include_items.contains(&full_name) {
            return false;
        }
        !self.exclude_items.contains(&full_name)
    }
}

fn normalize<I, S>(items: I) -> HashSet<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    items
        .into_iter()
        .map(|name| name.as_ref().trim().trim_start_matches('_').to_string())
        .filter(|name| !name.is_empty())
        .collect()
}
