//! Entity storage.

pub mod storage;

pub use storage::{EntityStore, Slot};
