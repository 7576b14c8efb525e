//! The immutable base catalog.

use std::collections::HashSet;
use std::path::Path;
use std::sync::Arc;

use tracing::debug;

use crate::Result;
use crate::error::InvalidInputError;
use crate::types::{ContentId, ContentRecord, slugify};

/// The seed records shipped with the application.
///
/// Loaded once at startup and never mutated; cloning shares the records.
#[derive(Debug, Clone)]
pub struct BaseCatalog {
    records: Arc<[ContentRecord]>,
}

impl BaseCatalog {
    /// Build a catalog from records, rejecting duplicate ids.
    ///
    /// Records without a slug get one derived from their title.
    pub fn from_records(records: Vec<ContentRecord>) -> Result<Self> {
        let mut seen = HashSet::with_capacity(records.len());
        let mut records = records;

        for record in &mut records {
            if !seen.insert(record.id) {
                return Err(InvalidInputError::Catalog {
                    reason: format!("duplicate id {}", record.id),
                }
                .into());
            }
            if record.slug.is_empty() {
                record.slug = slugify(&record.title);
            }
        }

        debug!(records = records.len(), "Loaded base catalog");

        Ok(Self {
            records: records.into(),
        })
    }

    /// Parse a JSON array of records.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let records: Vec<ContentRecord> =
            serde_json::from_str(json).map_err(|e| InvalidInputError::Catalog {
                reason: e.to_string(),
            })?;
        Self::from_records(records)
    }

    /// Read and parse a JSON catalog file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|e| InvalidInputError::Catalog {
            reason: format!("cannot read {}: {}", path.display(), e),
        })?;
        Self::from_json_str(&json)
    }

    pub fn records(&self) -> &[ContentRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn ids(&self) -> impl Iterator<Item = ContentId> + '_ {
        self.records.iter().map(|record| record.id)
    }
}
