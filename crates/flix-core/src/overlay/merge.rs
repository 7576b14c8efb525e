//! Folding the modification log onto the base catalog.

use crate::types::ContentRecord;

use super::ModificationLog;

/// Compute the effective catalog.
///
/// Patches are applied to base records first, tombstoned base records are
/// then dropped, and added records are appended in stored order. Ids in
/// `removed` or `updated` that match no base record have no effect.
///
/// Pure: neither input is modified and the same inputs always yield the
/// same output.
pub fn merge(base: &[ContentRecord], log: &ModificationLog) -> Vec<ContentRecord> {
    let mut merged = Vec::with_capacity(base.len() + log.added.len());

    for record in base {
        if log.removed.contains(&record.id) {
            continue;
        }
        match log.updated.get(&record.id) {
            Some(patch) => merged.push(record.patched(patch)),
            None => merged.push(record.clone()),
        }
    }

    merged.extend(log.added.iter().cloned());
    merged
}
