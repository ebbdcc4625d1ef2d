//! Symbol table records and their name-keyed storage

use crate::objects::DxfObject;
use crate::types::Handle;
use indexmap::IndexMap;

pub mod block_record;
pub mod layer;
pub mod linetype;
pub mod textstyle;

pub use block_record::{BlockFlags, BlockRecord};
pub use layer::{Layer, LayerFlags};
pub use linetype::{LineType, LineTypeElement, LineTypeElementFlags};
pub use textstyle::{TextGenerationFlags, TextStyle};

/// Base trait for all table entries
pub trait TableEntry {
    /// Get the entry's name
    fn name(&self) -> &str;

    /// Object metadata read with the entry
    fn object(&self) -> &DxfObject;

    /// Get the entry's handle, if the file carried one
    fn handle(&self) -> Option<Handle> {
        self.object().handle
    }
}

/// Generic table for storing named entries.
///
/// Lookup is case-insensitive. Entries keep their insertion order and are
/// also addressable by that position, which is what the id newtypes in
/// [`crate::document`] wrap.
#[derive(Debug, Clone)]
pub struct Table<T: TableEntry> {
    entries: IndexMap<String, T>,
}

impl<T: TableEntry> Table<T> {
    /// Create a new empty table
    pub fn new() -> Self {
        Table {
            entries: IndexMap::new(),
        }
    }

    /// Add an entry and return its position.
    ///
    /// Fails if an entry with the same name (ignoring case) exists.
    pub fn add(&mut self, entry: T) -> Result<usize, String> {
        let key = entry.name().to_uppercase();
        if self.entries.contains_key(&key) {
            return Err(format!("Table entry '{}' already exists", entry.name()));
        }
        let (index, _) = self.entries.insert_full(key, entry);
        Ok(index)
    }

    /// Get an entry by name
    pub fn get(&self, name: &str) -> Option<&T> {
        self.entries.get(&name.to_uppercase())
    }

    /// Position of the entry with this name
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.entries.get_index_of(&name.to_uppercase())
    }

    /// Get an entry by position
    pub fn get_index(&self, index: usize) -> Option<&T> {
        self.entries.get_index(index).map(|(_, entry)| entry)
    }

    /// Get a mutable entry by position
    pub fn get_index_mut(&mut self, index: usize) -> Option<&mut T> {
        self.entries.get_index_mut(index).map(|(_, entry)| entry)
    }

    /// Check if an entry exists
    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(&name.to_uppercase())
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the table is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over all entries in insertion order
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.entries.values()
    }

    /// Get all entry names
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.values().map(|e| e.name())
    }
}

impl<T: TableEntry> Default for Table<T> {
    fn default() -> Self {
        Self::new()
    }
}
