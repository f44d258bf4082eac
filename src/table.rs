#[cfg(test)]
#[path = "./table_tests.rs"]
mod tests;

use crate::value::Value;
use foldhash::HashMap;

/// Tables with at least this many entries use a hash index for lookups.
pub(crate) const INDEXED_TABLE_THRESHOLD: usize = 6;

/// How a table came to exist during parsing. Controls which later
/// statements are allowed to open it again or add to it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum TableState {
    /// Created as an intermediate step of a longer header path.
    Implicit,
    /// Defined by its own `[header]`.
    Header,
    /// Created by a dotted key on the left of an assignment.
    Dotted,
    /// An inline `{ ... }` value. Sealed: nothing may be added later.
    Inline,
}

type TableEntry = (String, Value);

/// A TOML table: key-value pairs in insertion order.
///
/// Small tables are plain linear scans; once a table reaches
/// [`INDEXED_TABLE_THRESHOLD`] entries a hash index is built and kept in
/// sync, so lookups stay O(1) on wide tables without paying the map
/// overhead on the typical handful-of-keys case. Iteration order is
/// always insertion order, which is also the order the writer emits.
#[derive(Clone)]
pub struct Table {
    entries: Vec<TableEntry>,
    /// Maps key name to entry index. `None` below the threshold.
    index: Option<HashMap<String, usize>>,
    pub(crate) state: TableState,
}

impl Table {
    /// Creates an empty table.
    pub fn new() -> Self {
        Table {
            entries: Vec::new(),
            index: None,
            state: TableState::Header,
        }
    }

    pub(crate) fn with_state(state: TableState) -> Self {
        Table {
            entries: Vec::new(),
            index: None,
            state,
        }
    }

    /// Returns the number of entries.
    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if the table has no entries.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn find_index(&self, name: &str) -> Option<usize> {
        if let Some(index) = &self.index {
            return index.get(name).copied();
        }
        for (i, entry) in self.entries.iter().enumerate() {
            if entry.0 == name {
                return Some(i);
            }
        }
        None
    }

    /// Returns a reference to the value for `name`.
    pub fn get(&self, name: &str) -> Option<&Value> {
        let i = self.find_index(name)?;
        Some(&self.entries[i].1)
    }

    /// Returns a mutable reference to the value for `name`.
    pub fn get_mut(&mut self, name: &str) -> Option<&mut Value> {
        let i = self.find_index(name)?;
        Some(&mut self.entries[i].1)
    }

    /// Returns `true` if the table contains the key.
    #[inline]
    pub fn contains_key(&self, name: &str) -> bool {
        self.find_index(name).is_some()
    }

    /// Inserts a key-value pair. If the key already exists its value is
    /// replaced in place, keeping the original position, and the old value
    /// is returned.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        let key = key.into();
        let value = value.into();
        if let Some(i) = self.find_index(&key) {
            return Some(std::mem::replace(&mut self.entries[i].1, value));
        }
        let i = self.entries.len();
        if let Some(index) = &mut self.index {
            index.insert(key.clone(), i);
        }
        self.entries.push((key, value));
        if self.index.is_none() && self.entries.len() >= INDEXED_TABLE_THRESHOLD {
            self.build_index();
        }
        None
    }

    /// Removes the entry for `name`, returning its value. Later entries
    /// shift down, so insertion order is preserved.
    pub fn remove(&mut self, name: &str) -> Option<Value> {
        let i = self.find_index(name)?;
        let (_, value) = self.entries.remove(i);
        if self.index.is_some() {
            if self.entries.len() >= INDEXED_TABLE_THRESHOLD {
                self.build_index();
            } else {
                self.index = None;
            }
        }
        Some(value)
    }

    fn build_index(&mut self) {
        let mut index = HashMap::default();
        for (i, (key, _)) in self.entries.iter().enumerate() {
            index.insert(key.clone(), i);
        }
        self.index = Some(index);
    }

    /// Returns a slice of all entries, in insertion order.
    #[inline]
    pub fn entries(&self) -> &[TableEntry] {
        &self.entries
    }

    /// Returns an iterator over `(key, value)` pairs in insertion order.
    pub fn iter(&self) -> std::slice::Iter<'_, TableEntry> {
        self.entries.iter()
    }

    /// Returns an iterator over mutable references to the values.
    pub fn values_mut(&mut self) -> impl Iterator<Item = &mut Value> {
        self.entries.iter_mut().map(|(_, v)| v)
    }
}

impl Default for Table {
    fn default() -> Self {
        Self::new()
    }
}

impl PartialEq for Table {
    fn eq(&self, other: &Self) -> bool {
        self.entries == other.entries
    }
}

impl std::fmt::Debug for Table {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut map = f.debug_map();
        for (k, v) in &self.entries {
            map.entry(k, v);
        }
        map.finish()
    }
}

impl<'a> IntoIterator for &'a Table {
    type Item = &'a TableEntry;
    type IntoIter = std::slice::Iter<'a, TableEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

impl IntoIterator for Table {
    type Item = TableEntry;
    type IntoIter = std::vec::IntoIter<TableEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Table {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut table = Table::new();
        for (key, value) in iter {
            table.insert(key, value);
        }
        table
    }
}
