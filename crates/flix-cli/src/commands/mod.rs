//! Command implementations.

pub mod account;
pub mod admin;
pub mod catalog;
pub mod watch;
