//! The modification overlay.
//!
//! This module defines the persisted log of catalog changes and the merge
//! that layers it over the base catalog. Mutating the log goes through
//! [`ContentStore`](crate::ContentStore).

mod log;
mod merge;

pub use log::{LogTarget, MODIFICATIONS_KEY, ModificationLog};
pub use merge::merge;
