use std::collections::BTreeMap;

use serde::{Serialize, Serializer};
use strum::IntoEnumIterator;
use tracing::warn;

use crate::catalog::{Catalog, LocationPair};
use crate::config::items;

use super::Trap;

/// Flat name to id mapping with its reverse.
///
/// Serializes as a plain `{name: id}` object.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NameTable {
    by_name: BTreeMap<String, u64>,
    by_id: BTreeMap<u64, String>,
}

impl Serialize for NameTable {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.by_name.serialize(serializer)
    }
}

impl NameTable {
    /// Every item a world can hold: Leek, then filler items, then one item
    /// per catalog chart, then traps.
    pub fn items(catalog: &Catalog) -> Self {
        let mut table = Self::default();
        table.merge(items::LEEK_NAME, items::LEEK_CODE);
        for (name, code) in items::FILLER_ITEMS {
            table.merge(name, code);
        }
        for entry in catalog.iter() {
            table.merge(&entry.display_name, entry.item_code);
        }
        for trap in Trap::iter() {
            table.merge(trap.name(), trap.code());
        }
        table
    }

    /// Both check locations of every catalog chart.
    pub fn locations(catalog: &Catalog) -> Self {
        let mut table = Self::default();
        for entry in catalog.iter() {
            let pair = LocationPair::derive(entry);
            for (name, code) in LocationPair::names(&entry.display_name)
                .into_iter()
                .zip(pair.codes())
            {
                table.merge(&name, code);
            }
        }
        table
    }

    /// Earlier layers win; a clash is logged and the later entry dropped.
    fn merge(&mut self, name: &str, id: u64) {
        if self.by_name.contains_key(name) || self.by_id.contains_key(&id) {
            warn!("Name table clash for {:?} ({}), keeping the first entry", name, id);
            return;
        }
        self.by_name.insert(name.to_string(), id);
        self.by_id.insert(id, name.to_string());
    }

    pub fn id(&self, name: &str) -> Option<u64> {
        self.by_name.get(name).copied()
    }

    pub fn name(&self, id: u64) -> Option<&str> {
        self.by_id.get(&id).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.by_name.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_name.is_empty()
    }
}
