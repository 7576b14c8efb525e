//! Persisted modification log.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::Result;
use crate::types::{ContentId, ContentPatch, ContentRecord};

/// Storage key holding the serialized log.
pub const MODIFICATIONS_KEY: &str = "contentModifications";

/// Additions, patches and removals layered over the base catalog.
///
/// Serialized as a JSON object with `added` (array of records), `updated`
/// (object keyed by id) and `removed` (array of ids). Missing sections
/// read as empty.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModificationLog {
    /// Records created through the store, in creation order.
    pub added: Vec<ContentRecord>,
    /// Accumulated patches for base records.
    pub updated: BTreeMap<ContentId, ContentPatch>,
    /// Tombstones for base records.
    pub removed: BTreeSet<ContentId>,
}

/// Which section of the log a mutation landed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogTarget {
    /// The id belonged to an added record, which was changed in place.
    Added,
    /// The id was treated as a base record.
    Base,
}

impl ModificationLog {
    /// Parse the stored JSON form.
    pub fn parse(raw: &str) -> Result<Self> {
        Ok(serde_json::from_str(raw)?)
    }

    /// Serialize to the stored JSON form.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// True when the log changes nothing.
    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.updated.is_empty() && self.removed.is_empty()
    }

    /// Position of an added record.
    pub fn added_index(&self, id: ContentId) -> Option<usize> {
        self.added.iter().position(|record| record.id == id)
    }

    /// Every id the log mentions in any section.
    pub fn ids(&self) -> impl Iterator<Item = ContentId> + '_ {
        self.added
            .iter()
            .map(|record| record.id)
            .chain(self.updated.keys().copied())
            .chain(self.removed.iter().copied())
    }

    /// Append a newly created record.
    pub fn record_add(&mut self, record: ContentRecord) {
        self.added.push(record);
    }

    /// Patch an added record in place, or accumulate a base-record patch.
    pub fn record_update(&mut self, id: ContentId, patch: &ContentPatch) -> LogTarget {
        if let Some(index) = self.added_index(id) {
            self.added[index].apply(patch);
            return LogTarget::Added;
        }

        self.updated.entry(id).or_default().merge(patch);
        LogTarget::Base
    }

    /// Undo an addition, or tombstone a base record.
    pub fn record_remove(&mut self, id: ContentId) -> LogTarget {
        if let Some(index) = self.added_index(id) {
            self.added.remove(index);
            return LogTarget::Added;
        }

        self.removed.insert(id);
        LogTarget::Base
    }
}
