//! Core traits for the store's collaborators.

mod persistence;

pub use persistence::{Persistence, StorageEvent, StorageEvents};
