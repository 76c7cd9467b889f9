use std::collections::{BTreeMap, VecDeque};

use serde::{Deserialize, Serialize};

use crate::item::{Item, ItemKind};

/// Items the player has picked up but not yet used, grouped by kind.
///
/// Items within a category keep the order they were picked up in, and a
/// category never exists without at least one item in it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Inventory {
    items: BTreeMap<ItemKind, VecDeque<Item>>,
}

impl Inventory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, item: Item) {
        self.items.entry(item.kind()).or_default().push_back(item);
    }

    /// Removes and returns the oldest item of `kind`.
    pub fn remove(&mut self, kind: ItemKind) -> Option<Item> {
        let category = self.items.get_mut(&kind)?;
        let item = category.pop_front()?;
        if category.is_empty() {
            self.items.remove(&kind);
        }
        Some(item)
    }

    /// Removes and returns the oldest item of the category called `name`.
    ///
    /// Unknown names behave like empty categories.
    pub fn remove_item(&mut self, name: &str) -> Option<Item> {
        self.remove(name.parse().ok()?)
    }

    pub fn items(&self) -> &BTreeMap<ItemKind, VecDeque<Item>> {
        &self.items
    }

    pub fn count(&self, kind: ItemKind) -> usize {
        self.items.get(&kind).map_or(0, VecDeque::len)
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
