//! Id-keyed registry preserving catalog file order.
//!
//! Iteration order is the order entries appear in the catalog, which keeps
//! uniform picks over a registry reproducible for a given seed. Lookups go
//! through a `BTreeMap` index built once at load time.

use std::collections::BTreeMap;

use crate::error::CatalogError;

/// An ordered, id-indexed collection of catalog entries.
#[derive(Debug, Clone, PartialEq)]
pub struct Registry<K, V> {
    /// Entries in catalog order.
    entries: Vec<V>,
    /// Id -> position in `entries`.
    index: BTreeMap<K, usize>,
}

impl<K: Ord + Clone + core::fmt::Display, V> Registry<K, V> {
    /// Build a registry, failing on the first duplicate id.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::DuplicateId`] naming `kind` and the repeated
    /// id.
    pub fn build(
        entries: Vec<V>,
        kind: &'static str,
        key: impl Fn(&V) -> &K,
    ) -> Result<Self, CatalogError> {
        let mut index = BTreeMap::new();
        for (position, entry) in entries.iter().enumerate() {
            let id = key(entry);
            if index.insert(id.clone(), position).is_some() {
                return Err(CatalogError::DuplicateId {
                    kind,
                    id: id.to_string(),
                });
            }
        }
        Ok(Self { entries, index })
    }

    /// Look up an entry by id.
    pub fn get(&self, id: &K) -> Option<&V> {
        self.index
            .get(id)
            .and_then(|position| self.entries.get(*position))
    }

    /// Whether an entry with this id exists.
    pub fn contains(&self, id: &K) -> bool {
        self.index.contains_key(id)
    }

    /// Iterate entries in catalog order.
    pub fn iter(&self) -> core::slice::Iter<'_, V> {
        self.entries.iter()
    }

    /// Entries as a slice, in catalog order.
    pub fn as_slice(&self) -> &[V] {
        &self.entries
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the registry holds no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<'a, K, V> IntoIterator for &'a Registry<K, V> {
    type Item = &'a V;
    type IntoIter = core::slice::Iter<'a, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
