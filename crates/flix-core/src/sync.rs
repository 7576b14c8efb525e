//! Cross-context catalog synchronisation.

use std::sync::Arc;

use futures_util::StreamExt;
use tokio::sync::broadcast::error::RecvError;
use tokio::task::JoinHandle;
use tracing::{debug, trace};

use crate::Result;
use crate::overlay::MODIFICATIONS_KEY;
use crate::store::ContentStore;
use crate::traits::Persistence;

/// Background task that keeps a store's catalog in step with the stored log.
///
/// Every same-context [`ChangeNotice`](crate::ChangeNotice) and every
/// storage event for the modifications key triggers a full
/// [`refresh`](ContentStore::refresh). Events from other contexts arrive
/// asynchronously, so a write in one context becomes visible in another
/// some time later, never synchronously.
///
/// The task stops when the handle is dropped.
#[derive(Debug)]
pub struct CatalogSync {
    task: JoinHandle<()>,
}

impl CatalogSync {
    /// Subscribe to both channels and start listening. Must be called from
    /// within a tokio runtime.
    pub fn spawn<P>(store: Arc<ContentStore<P>>) -> Result<Self>
    where
        P: Persistence + 'static,
        P::Events: 'static,
    {
        let mut notices = store.bus().subscribe();
        let mut events = Box::pin(store.backend().events()?);

        let task = tokio::spawn(async move {
            let mut events_open = true;

            loop {
                tokio::select! {
                    notice = notices.recv() => match notice {
                        Ok(notice) => {
                            trace!(op = ?notice.op, id = %notice.id, "Local change");
                            store.refresh();
                        }
                        Err(RecvError::Lagged(skipped)) => {
                            debug!(skipped, "Change bus lagged, refreshing");
                            store.refresh();
                        }
                        Err(RecvError::Closed) => break,
                    },
                    event = events.next(), if events_open => match event {
                        Some(event) if event.key == MODIFICATIONS_KEY => {
                            debug!("Modification log changed in another context");
                            store.refresh();
                        }
                        Some(_) => {}
                        None => {
                            debug!("Storage event stream ended");
                            events_open = false;
                        }
                    },
                }
            }
        });

        Ok(Self { task })
    }

    /// Whether the listening task is still alive.
    pub fn is_running(&self) -> bool {
        !self.task.is_finished()
    }

    /// Stop listening.
    pub fn stop(self) {
        drop(self);
    }
}

impl Drop for CatalogSync {
    fn drop(&mut self) {
        self.task.abort();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::BaseCatalog;
    use crate::memory::MemoryStorage;
    use crate::types::{ContentDraft, ContentId, ContentKind};
    use std::time::Duration;

    fn base() -> BaseCatalog {
        let records = (1..=3)
            .map(|i| {
                ContentDraft::new(ContentKind::Movie, format!("T{}", i), "Drama")
                    .into_record(ContentId::new(i))
            })
            .collect();
        BaseCatalog::from_records(records).unwrap()
    }

    #[tokio::test]
    async fn other_context_picks_up_removal() {
        let tab_a = MemoryStorage::new();
        let tab_b = tab_a.open_context();

        let store_a = Arc::new(ContentStore::open(base(), tab_a));
        let store_b = Arc::new(ContentStore::open(base(), tab_b));
        let _sync_b = CatalogSync::spawn(Arc::clone(&store_b)).unwrap();

        let mut rx = store_b.subscribe();
        rx.mark_unchanged();

        store_a.remove(ContentId::new(2)).unwrap();

        tokio::time::timeout(Duration::from_secs(2), rx.changed())
            .await
            .expect("context b never refreshed")
            .unwrap();

        let ids: Vec<i64> = store_b.catalog().iter().map(|r| r.id.get()).collect();
        assert_eq!(ids, vec![1, 3]);
    }

    #[tokio::test]
    async fn stopping_aborts_the_task() {
        let store = Arc::new(ContentStore::open(base(), MemoryStorage::new()));
        let sync = CatalogSync::spawn(Arc::clone(&store)).unwrap();
        assert!(sync.is_running());
        sync.stop();

        // The aborted task released its reference to the store.
        tokio::time::timeout(Duration::from_secs(1), async {
            while Arc::strong_count(&store) > 1 {
                tokio::task::yield_now().await;
            }
        })
        .await
        .unwrap();
    }
}
