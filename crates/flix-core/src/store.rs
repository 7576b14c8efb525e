//! The content store.
//!
//! [`ContentStore`] is the single point of mutation for the catalog. It
//! holds the effective catalog in memory, owns the modification log's
//! read/patch/persist cycle and announces every change on its
//! [`ChangeBus`].
//!
//! ## Mutation cycle
//!
//! ```text
//! add / update / remove
//!   -> read stored log -> patch log -> persist log
//!   -> patch in-memory catalog -> publish ChangeNotice
//! ```
//!
//! A failed persist aborts the cycle: the in-memory catalog is untouched
//! and nothing is published, so the caller sees the error and the catalog
//! keeps showing what is actually stored.

use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use chrono::Utc;
use tokio::sync::watch;
use tracing::{debug, info, instrument, warn};

use crate::Result;
use crate::bus::{ChangeBus, ChangeNotice, ChangeOp};
use crate::catalog::BaseCatalog;
use crate::error::InvalidInputError;
use crate::overlay::{MODIFICATIONS_KEY, ModificationLog, merge};
use crate::traits::Persistence;
use crate::types::{ContentDraft, ContentId, ContentPatch, ContentRecord};

/// What consumers observe: the effective catalog and whether the first
/// load has happened yet.
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogView {
    pub records: Arc<[ContentRecord]>,
    pub is_loading: bool,
}

impl CatalogView {
    fn loading() -> Self {
        Self {
            records: Arc::from(Vec::new()),
            is_loading: true,
        }
    }
}

/// Effective catalog plus the mutation operations on it.
///
/// Construct one per context at startup and share it with an `Arc`. The
/// store performs no authorization; gate `add`/`update`/`remove` behind
/// [`Authenticator::require_admin`](crate::Authenticator::require_admin)
/// before exposing them.
#[derive(Debug)]
pub struct ContentStore<P> {
    base: BaseCatalog,
    backend: P,
    bus: ChangeBus,
    view: watch::Sender<CatalogView>,
    write: Mutex<()>,
    last_issued: AtomicI64,
}

impl<P: Persistence> ContentStore<P> {
    /// Create a store in the loading state. Call [`load`](Self::load) to
    /// populate it.
    pub fn new(base: BaseCatalog, backend: P) -> Self {
        Self::with_bus(base, backend, ChangeBus::new())
    }

    /// Create a store that publishes on an existing bus.
    pub fn with_bus(base: BaseCatalog, backend: P, bus: ChangeBus) -> Self {
        let (view, _) = watch::channel(CatalogView::loading());
        Self {
            base,
            backend,
            bus,
            view,
            write: Mutex::new(()),
            last_issued: AtomicI64::new(0),
        }
    }

    /// Create and load a store.
    pub fn open(base: BaseCatalog, backend: P) -> Self {
        let store = Self::new(base, backend);
        store.load();
        store
    }

    pub fn base(&self) -> &BaseCatalog {
        &self.base
    }

    pub fn backend(&self) -> &P {
        &self.backend
    }

    pub fn bus(&self) -> &ChangeBus {
        &self.bus
    }

    /// Snapshot of the effective catalog.
    pub fn catalog(&self) -> Arc<[ContentRecord]> {
        Arc::clone(&self.view.borrow().records)
    }

    pub fn view(&self) -> CatalogView {
        self.view.borrow().clone()
    }

    pub fn is_loading(&self) -> bool {
        self.view.borrow().is_loading
    }

    /// Look up a record in the effective catalog.
    pub fn get(&self, id: ContentId) -> Option<ContentRecord> {
        self.view.borrow().records.iter().find(|r| r.id == id).cloned()
    }

    /// Watch the published view; the receiver wakes on every change.
    pub fn subscribe(&self) -> watch::Receiver<CatalogView> {
        self.view.subscribe()
    }

    /// The stored modification log. A malformed stored value reads as empty.
    pub fn modifications(&self) -> Result<ModificationLog> {
        self.load_log()
    }

    /// Read the stored log, merge it over the base catalog and publish the
    /// result.
    ///
    /// Never fails: an unreadable or malformed log is logged and the base
    /// catalog is served unmodified.
    #[instrument(skip(self))]
    pub fn load(&self) {
        let _guard = self.lock();

        let log = self.load_log().unwrap_or_else(|e| {
            warn!(error = %e, "Could not read modification log, serving base catalog");
            ModificationLog::default()
        });

        let records: Arc<[ContentRecord]> = merge(self.base.records(), &log).into();
        debug!(
            records = records.len(),
            added = log.added.len(),
            updated = log.updated.len(),
            removed = log.removed.len(),
            "Merged catalog"
        );

        self.view.send_if_modified(|view| {
            if !view.is_loading && view.records == records {
                return false;
            }
            view.records = records;
            view.is_loading = false;
            true
        });
    }

    /// Re-read and re-merge. Same as [`load`](Self::load).
    pub fn refresh(&self) {
        self.load();
    }

    /// Add a new record with a freshly generated id.
    #[instrument(skip(self, draft), fields(title = %draft.title))]
    pub fn add(&self, draft: ContentDraft) -> Result<ContentRecord> {
        draft.validate()?;
        let _guard = self.lock();

        let mut log = self.load_log()?;
        let id = self.next_id(&log)?;
        let record = draft.into_record(id);

        log.record_add(record.clone());
        self.persist(&log)?;

        self.view.send_modify(|view| {
            let mut records = view.records.to_vec();
            records.push(record.clone());
            view.records = records.into();
        });
        self.bus.publish(ChangeNotice::now(ChangeOp::Added, id));

        info!(%id, "Added content");
        Ok(record)
    }

    /// Patch a record. Unknown ids store an inert patch.
    #[instrument(skip(self, patch))]
    pub fn update(&self, id: ContentId, patch: &ContentPatch) -> Result<()> {
        patch.validate()?;
        let _guard = self.lock();

        let mut log = self.load_log()?;
        let target = log.record_update(id, patch);
        self.persist(&log)?;

        self.view.send_if_modified(|view| {
            if !view.records.iter().any(|r| r.id == id) {
                return false;
            }
            view.records = view
                .records
                .iter()
                .map(|r| if r.id == id { r.patched(patch) } else { r.clone() })
                .collect();
            true
        });
        self.bus.publish(ChangeNotice::now(ChangeOp::Updated, id));

        info!(%id, ?target, "Updated content");
        Ok(())
    }

    /// Remove a record. Added records are dropped from the log; base
    /// records are tombstoned.
    #[instrument(skip(self))]
    pub fn remove(&self, id: ContentId) -> Result<()> {
        let _guard = self.lock();

        let mut log = self.load_log()?;
        let target = log.record_remove(id);
        self.persist(&log)?;

        self.view.send_if_modified(|view| {
            if !view.records.iter().any(|r| r.id == id) {
                return false;
            }
            view.records = view.records.iter().filter(|r| r.id != id).cloned().collect();
            true
        });
        self.bus.publish(ChangeNotice::now(ChangeOp::Removed, id));

        info!(%id, ?target, "Removed content");
        Ok(())
    }

    fn lock(&self) -> MutexGuard<'_, ()> {
        // The guard only orders mutations; there is no data to poison.
        self.write.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Backend failures propagate; a malformed value reads as empty.
    fn load_log(&self) -> Result<ModificationLog> {
        let Some(raw) = self.backend.get(MODIFICATIONS_KEY)? else {
            return Ok(ModificationLog::default());
        };

        match ModificationLog::parse(&raw) {
            Ok(log) => Ok(log),
            Err(e) => {
                warn!(error = %e, "Ignoring malformed modification log");
                Ok(ModificationLog::default())
            }
        }
    }

    fn persist(&self, log: &ModificationLog) -> Result<()> {
        let json = log.to_json()?;
        self.backend.set(MODIFICATIONS_KEY, &json)
    }

    /// Wall-clock milliseconds, bumped past every id this store knows of.
    fn next_id(&self, log: &ModificationLog) -> Result<ContentId> {
        let known_max = {
            let view = self.view.borrow();
            self.base
                .ids()
                .chain(log.ids())
                .chain(view.records.iter().map(|r| r.id))
                .map(ContentId::get)
                .max()
                .unwrap_or(0)
        };

        let floor = known_max.max(self.last_issued.load(Ordering::Relaxed));
        let now = Utc::now().timestamp_millis();
        let id = if now > floor {
            now
        } else {
            floor.checked_add(1).ok_or_else(|| InvalidInputError::Other {
                message: format!("no content id left above {}", floor),
            })?
        };

        self.last_issued.store(id, Ordering::Relaxed);
        Ok(ContentId::new(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{Error, InvalidInputError, StorageError};
    use crate::memory::MemoryStorage;
    use crate::types::ContentKind;

    fn record(id: i64, title: &str, rating: f64) -> ContentRecord {
        let mut draft = ContentDraft::new(ContentKind::Movie, title, "Drama");
        draft.rating = rating;
        draft.into_record(ContentId::new(id))
    }

    fn base() -> BaseCatalog {
        BaseCatalog::from_records(vec![record(1, "A", 3.0), record(2, "B", 4.0)]).unwrap()
    }

    fn draft(title: &str) -> ContentDraft {
        let mut draft = ContentDraft::new(ContentKind::Movie, title, "Drama");
        draft.rating = 2.0;
        draft
    }

    #[test]
    fn starts_loading_until_loaded() {
        let store = ContentStore::new(base(), MemoryStorage::new());
        assert!(store.is_loading());
        assert!(store.catalog().is_empty());

        store.load();
        assert!(!store.is_loading());
        assert_eq!(store.catalog().len(), 2);
    }

    #[test]
    fn malformed_log_falls_back_to_base() {
        let storage = MemoryStorage::new();
        storage.set(MODIFICATIONS_KEY, "{definitely not json").unwrap();

        let store = ContentStore::open(base(), storage);
        assert_eq!(&*store.catalog(), base().records());
        assert!(store.modifications().unwrap().is_empty());
    }

    #[test]
    fn mutation_over_malformed_log_starts_fresh() {
        let storage = MemoryStorage::new();
        storage.set(MODIFICATIONS_KEY, "[1,2,3]").unwrap();

        let store = ContentStore::open(base(), storage.clone());
        store.remove(ContentId::new(2)).unwrap();

        let raw = storage.get(MODIFICATIONS_KEY).unwrap().unwrap();
        let log = ModificationLog::parse(&raw).unwrap();
        assert_eq!(log.removed.len(), 1);
    }

    #[test]
    fn generated_ids_skip_known_ids() {
        let future = Utc::now().timestamp_millis() + 1_000_000;
        let catalog = BaseCatalog::from_records(vec![record(future, "Future", 1.0)]).unwrap();
        let store = ContentStore::open(catalog, MemoryStorage::new());

        let first = store.add(draft("X")).unwrap();
        let second = store.add(draft("Y")).unwrap();

        assert_eq!(first.id.get(), future + 1);
        assert_eq!(second.id.get(), future + 2);
    }

    #[test]
    fn exhausted_id_space_is_an_error() {
        let catalog = BaseCatalog::from_records(vec![record(i64::MAX, "Last", 1.0)]).unwrap();
        let storage = MemoryStorage::new();
        let store = ContentStore::open(catalog, storage.clone());

        let err = store.add(draft("Overflow")).unwrap_err();
        assert!(matches!(
            err,
            Error::InvalidInput(InvalidInputError::Other { .. })
        ));
        assert_eq!(store.catalog().len(), 1);
        assert_eq!(storage.get(MODIFICATIONS_KEY).unwrap(), None);
    }

    #[test]
    fn invalid_draft_is_rejected_before_storage() {
        let storage = MemoryStorage::new();
        let store = ContentStore::open(base(), storage.clone());

        let mut bad = draft("Bad");
        bad.rating = 7.0;
        let err = store.add(bad).unwrap_err();

        assert!(matches!(
            err,
            Error::InvalidInput(InvalidInputError::Rating { .. })
        ));
        assert_eq!(storage.get(MODIFICATIONS_KEY).unwrap(), None);
    }

    #[test]
    fn quota_failure_leaves_catalog_and_bus_untouched() {
        let storage = MemoryStorage::with_quota(64);
        let store = ContentStore::open(base(), storage);
        let mut notices = store.bus().subscribe();

        let mut big = draft("Big");
        big.description = "x".repeat(200);
        let err = store.add(big).unwrap_err();

        assert!(matches!(
            err,
            Error::Storage(StorageError::QuotaExceeded { .. })
        ));
        assert_eq!(store.catalog().len(), 2);
        assert!(notices.try_recv().is_err());
    }

    #[test]
    fn mutations_publish_notices() {
        let store = ContentStore::open(base(), MemoryStorage::new());
        let mut notices = store.bus().subscribe();

        let added = store.add(draft("C")).unwrap();
        store
            .update(
                ContentId::new(1),
                &ContentPatch {
                    year: Some(1990),
                    ..ContentPatch::default()
                },
            )
            .unwrap();
        store.remove(added.id).unwrap();

        let ops: Vec<ChangeOp> = std::iter::from_fn(|| notices.try_recv().ok())
            .map(|n| n.op)
            .collect();
        assert_eq!(ops, vec![ChangeOp::Added, ChangeOp::Updated, ChangeOp::Removed]);
    }

    #[test]
    fn refresh_without_changes_does_not_wake_watchers() {
        let store = ContentStore::open(base(), MemoryStorage::new());
        let mut rx = store.subscribe();
        rx.mark_unchanged();

        store.refresh();
        assert!(!rx.has_changed().unwrap());

        store.remove(ContentId::new(1)).unwrap();
        assert!(rx.has_changed().unwrap());
    }

    #[test]
    fn update_of_added_record_stays_in_added() {
        let store = ContentStore::open(base(), MemoryStorage::new());
        let added = store.add(draft("C")).unwrap();

        store
            .update(
                added.id,
                &ContentPatch {
                    title: Some("C2".to_string()),
                    ..ContentPatch::default()
                },
            )
            .unwrap();

        let log = store.modifications().unwrap();
        assert!(log.updated.is_empty());
        assert_eq!(log.added[0].title, "C2");
        assert_eq!(store.get(added.id).unwrap().title, "C2");
    }
}
