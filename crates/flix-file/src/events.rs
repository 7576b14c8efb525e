//! Change events for file-backed storage.

use std::collections::HashMap;
use std::path::Path;
use std::pin::Pin;
use std::sync::PoisonError;
use std::task::{Context, Poll};

use futures_util::Stream;
use notify::{RecursiveMode, Watcher};
use tokio::sync::mpsc;
use tracing::{trace, warn};

use flix_core::Result;
use flix_core::error::StorageError;
use flix_core::traits::StorageEvent;

use crate::storage::FileStorage;

/// Stream of values changed by other processes.
///
/// A `notify` watcher on the storage directory wakes the stream promptly;
/// a periodic rescan catches anything the watcher missed. A key is
/// reported when its content differs from what this stream last saw,
/// unless the change is the echo of a write this storage handle made and
/// the stream has not accounted for yet. Each own write is skipped at most
/// once, so another process writing the same content later is reported.
pub struct FileEvents {
    inner: Pin<Box<dyn Stream<Item = StorageEvent> + Send>>,
}

impl FileEvents {
    pub(crate) fn from_storage(storage: FileStorage) -> Result<Self> {
        let dir = storage.storage_dir();
        std::fs::create_dir_all(&dir).map_err(|e| StorageError::Unavailable {
            message: format!("cannot create {}: {}", dir.display(), e),
        })?;

        let (tx, mut rx) = mpsc::unbounded_channel::<String>();

        let mut watcher = notify::recommended_watcher(move |res: notify::Result<notify::Event>| {
            let Ok(event) = res else {
                return;
            };
            if matches!(event.kind, notify::EventKind::Access(_)) {
                return;
            }
            for key in event.paths.iter().filter_map(|p| key_of(p)) {
                let _ = tx.send(key);
            }
        })
        .map_err(|e| StorageError::Unavailable {
            message: format!("failed to create file watcher: {}", e),
        })?;

        watcher
            .watch(&dir, RecursiveMode::NonRecursive)
            .map_err(|e| StorageError::Unavailable {
                message: format!("failed to watch {}: {}", dir.display(), e),
            })?;

        // Own writes before this point are already part of the snapshot.
        let mut acked = storage
            .written()
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .generations();
        let mut seen = snapshot(&dir);

        let stream = async_stream::stream! {
            let _watcher = watcher;
            let mut interval = tokio::time::interval(storage.poll_interval());

            loop {
                let keys: Vec<String> = tokio::select! {
                    Some(key) = rx.recv() => vec![key],
                    _ = interval.tick() => {
                        let mut keys: Vec<String> = snapshot(&dir).into_keys().collect();
                        keys.extend(seen.keys().cloned());
                        keys.sort();
                        keys.dedup();
                        keys
                    }
                };

                for key in keys {
                    if let Some(event) = check(&storage, &key, &mut seen, &mut acked) {
                        yield event;
                    }
                }
            }
        };

        Ok(Self {
            inner: Box::pin(stream),
        })
    }
}

impl Stream for FileEvents {
    type Item = StorageEvent;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        self.inner.as_mut().poll_next(cx)
    }
}

/// `<key>.json` → `key`; anything else (lock, temp files) is ignored.
fn key_of(path: &Path) -> Option<String> {
    if path.extension().is_none_or(|ext| ext != "json") {
        return None;
    }
    let stem = path.file_stem()?.to_str()?;
    if stem.starts_with('.') {
        return None;
    }
    Some(stem.to_string())
}

/// Current contents of every value file in `dir`.
fn snapshot(dir: &Path) -> HashMap<String, Option<String>> {
    let Ok(entries) = std::fs::read_dir(dir) else {
        return HashMap::new();
    };

    entries
        .filter_map(|entry| entry.ok())
        .filter_map(|entry| {
            let path = entry.path();
            let key = key_of(&path)?;
            let content = FileStorage::read_path(&path).ok()?;
            Some((key, content))
        })
        .collect()
}

fn check(
    storage: &FileStorage,
    key: &str,
    seen: &mut HashMap<String, Option<String>>,
    acked: &mut HashMap<String, u64>,
) -> Option<StorageEvent> {
    let current = match FileStorage::read_path(&storage.value_path(key)) {
        Ok(current) => current,
        Err(e) => {
            warn!(key, error = %e, "Could not read changed value");
            return None;
        }
    };

    if seen.get(key) == Some(&current) {
        return None;
    }
    seen.insert(key.to_string(), current.clone());

    let own = storage
        .written()
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
        .get(key)
        .cloned();

    if let Some(own) = own {
        let unacked = acked.get(key).is_none_or(|&g| g < own.generation);
        // Whatever happens next, this write is now accounted for.
        acked.insert(key.to_string(), own.generation);
        if unacked && own.value == current {
            trace!(key, "Skipping own write");
            return None;
        }
    }

    Some(StorageEvent {
        key: key.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use flix_core::traits::Persistence;
    use futures_util::StreamExt;
    use std::time::Duration;
    use tempfile::TempDir;

    #[test]
    fn key_extraction() {
        assert_eq!(
            key_of(Path::new("/x/storage/contentModifications.json")).as_deref(),
            Some("contentModifications")
        );
        assert_eq!(key_of(Path::new("/x/storage/a.json.tmp")), None);
        assert_eq!(key_of(Path::new("/x/storage/.lock")), None);
    }

    #[tokio::test]
    async fn reports_writes_from_another_handle() {
        let dir = TempDir::new().unwrap();
        let writer = FileStorage::new(dir.path());
        let reader = FileStorage::new(dir.path()).with_poll_interval(Duration::from_millis(50));

        let mut events = reader.events().unwrap();
        writer.set("contentModifications", r#"{"removed":[1]}"#).unwrap();

        let event = tokio::time::timeout(Duration::from_secs(5), events.next())
            .await
            .expect("no storage event")
            .unwrap();
        assert_eq!(event.key, "contentModifications");
    }

    #[tokio::test]
    async fn foreign_write_repeating_own_value_is_reported() {
        let dir = TempDir::new().unwrap();
        let a = FileStorage::new(dir.path()).with_poll_interval(Duration::from_millis(20));
        let b = FileStorage::new(dir.path());
        let key = "contentModifications";

        let mut events = a.events().unwrap();

        a.set(key, "V1").unwrap();
        let own = tokio::time::timeout(Duration::from_millis(300), events.next()).await;
        assert!(own.is_err(), "own write was reported");

        b.set(key, "V2").unwrap();
        let event = tokio::time::timeout(Duration::from_secs(5), events.next())
            .await
            .expect("write of V2 not reported")
            .unwrap();
        assert_eq!(event.key, key);

        b.set(key, "V1").unwrap();
        let event = tokio::time::timeout(Duration::from_secs(5), events.next())
            .await
            .expect("write of V1 by the other handle not reported")
            .unwrap();
        assert_eq!(event.key, key);
        assert_eq!(a.get(key).unwrap().as_deref(), Some("V1"));
    }

    #[test]
    fn own_write_is_skipped_once() {
        let dir = TempDir::new().unwrap();
        let a = FileStorage::new(dir.path());
        let b = FileStorage::new(dir.path());
        let key = "currentUser";
        let mut seen = HashMap::new();
        let mut acked = HashMap::new();

        a.set(key, "same").unwrap();
        assert!(check(&a, key, &mut seen, &mut acked).is_none());

        b.set(key, "other").unwrap();
        assert!(check(&a, key, &mut seen, &mut acked).is_some());

        b.set(key, "same").unwrap();
        assert!(check(&a, key, &mut seen, &mut acked).is_some());
    }

    #[tokio::test]
    async fn own_writes_are_not_reported() {
        let dir = TempDir::new().unwrap();
        let storage = FileStorage::new(dir.path()).with_poll_interval(Duration::from_millis(20));

        let mut events = storage.events().unwrap();
        storage.set("currentUser", "{}").unwrap();

        let next = tokio::time::timeout(Duration::from_millis(300), events.next()).await;
        assert!(next.is_err(), "own write was reported");
    }
}
