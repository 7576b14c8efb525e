//! In-memory persistence backend.
//!
//! Every handle obtained through [`MemoryStorage::open_context`] shares the
//! same values but has its own context identity, so a write through one
//! handle is reported as a [`StorageEvent`] to all the others. This mirrors
//! how separate browser tabs share local storage.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use tokio::sync::broadcast;
use tracing::trace;
use uuid::Uuid;

use crate::Result;
use crate::error::StorageError;
use crate::traits::{Persistence, StorageEvent};

const EVENT_CAPACITY: usize = 64;

#[derive(Debug)]
struct Shared {
    values: Mutex<HashMap<String, String>>,
    quota: Option<usize>,
    events: broadcast::Sender<(Uuid, String)>,
}

/// Shared in-memory key-value store.
#[derive(Debug, Clone)]
pub struct MemoryStorage {
    shared: Arc<Shared>,
    context: Uuid,
}

impl MemoryStorage {
    /// Create an empty store with no quota.
    pub fn new() -> Self {
        Self::build(None)
    }

    /// Create an empty store that refuses writes once keys and values
    /// together would exceed `bytes`.
    pub fn with_quota(bytes: usize) -> Self {
        Self::build(Some(bytes))
    }

    fn build(quota: Option<usize>) -> Self {
        let (events, _) = broadcast::channel(EVENT_CAPACITY);
        Self {
            shared: Arc::new(Shared {
                values: Mutex::new(HashMap::new()),
                quota,
                events,
            }),
            context: Uuid::new_v4(),
        }
    }

    /// Open another context on the same storage.
    pub fn open_context(&self) -> Self {
        Self {
            shared: Arc::clone(&self.shared),
            context: Uuid::new_v4(),
        }
    }

    /// Identity of this context.
    pub fn context_id(&self) -> Uuid {
        self.context
    }

    fn values(&self) -> Result<MutexGuard<'_, HashMap<String, String>>> {
        self.shared.values.lock().map_err(|_| {
            StorageError::Unavailable {
                message: "memory storage lock poisoned".to_string(),
            }
            .into()
        })
    }

    fn notify(&self, key: &str) {
        // No receivers is fine: nobody is listening yet.
        let _ = self.shared.events.send((self.context, key.to_string()));
    }
}

impl Default for MemoryStorage {
    fn default() -> Self {
        Self::new()
    }
}

impl Persistence for MemoryStorage {
    type Events = std::pin::Pin<Box<dyn futures_core::Stream<Item = StorageEvent> + Send>>;

    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.values()?.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        {
            let mut values = self.values()?;

            if let Some(quota) = self.shared.quota {
                let others: usize = values
                    .iter()
                    .filter(|(k, _)| k.as_str() != key)
                    .map(|(k, v)| k.len() + v.len())
                    .sum();
                let needed = others + key.len() + value.len();
                if needed > quota {
                    return Err(StorageError::QuotaExceeded {
                        key: key.to_string(),
                        needed,
                        quota,
                    }
                    .into());
                }
            }

            values.insert(key.to_string(), value.to_string());
        }

        trace!(context = %self.context, key, "memory storage set");
        self.notify(key);
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        let existed = self.values()?.remove(key).is_some();
        if existed {
            self.notify(key);
        }
        Ok(())
    }

    fn events(&self) -> Result<Self::Events> {
        let mut rx = self.shared.events.subscribe();
        let me = self.context;

        let stream = async_stream::stream! {
            loop {
                match rx.recv().await {
                    Ok((origin, key)) if origin != me => yield StorageEvent { key },
                    Ok(_) => continue,
                    Err(broadcast::error::RecvError::Lagged(_)) => continue,
                    Err(broadcast::error::RecvError::Closed) => break,
                }
            }
        };

        Ok(Box::pin(stream))
    }
}
