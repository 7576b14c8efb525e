//! flix-core - Catalog overlay for Bahama Flix.
//!
//! A fixed [`BaseCatalog`] is combined with a persisted
//! [`ModificationLog`] to produce the effective catalog held by a
//! [`ContentStore`]. [`CatalogSync`] keeps stores in separate contexts
//! consistent with each other through the [`Persistence`] backend's change
//! events.

pub mod auth;
pub mod bus;
pub mod catalog;
pub mod error;
pub mod memory;
pub mod overlay;
pub mod query;
pub mod store;
pub mod sync;
pub mod traits;
pub mod types;

pub use auth::{Authenticator, CURRENT_USER_KEY, User};
pub use bus::{ChangeBus, ChangeNotice, ChangeOp};
pub use catalog::BaseCatalog;
pub use error::Error;
pub use memory::MemoryStorage;
pub use overlay::{MODIFICATIONS_KEY, ModificationLog, merge};
pub use query::{CatalogQuery, CatalogStats};
pub use store::{CatalogView, ContentStore};
pub use sync::CatalogSync;
pub use traits::{Persistence, StorageEvent, StorageEvents};
pub use types::{ContentDraft, ContentId, ContentKind, ContentPatch, ContentRecord, slugify};

/// Result type alias using the crate's Error type.
pub type Result<T> = std::result::Result<T, Error>;
