//! flix-file - Filesystem-backed persistence.

mod events;
mod storage;

pub use events::FileEvents;
pub use storage::FileStorage;
