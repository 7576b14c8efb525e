//! Catalog data types.
//!
//! Records, drafts and patches enforce the catalog invariants (rating range,
//! season count, non-empty title) at the points where they enter the store.

mod content_id;
mod patch;
mod record;
mod slug;

pub use content_id::ContentId;
pub use patch::ContentPatch;
pub use record::{ContentDraft, ContentKind, ContentRecord, parse_cast};
pub use slug::slugify;
