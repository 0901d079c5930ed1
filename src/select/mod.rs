//! Predicate-filtered traversal of entity stores.
//!
//! - [`predicate`]: the atom vocabulary and the `And` combinator
//! - [`cursor`]: the filtered cursor, shared by read-only and mutable views
//! - [`views`]: named views on [`EntityStore`](crate::data::storage::EntityStore)

pub mod cursor;
pub mod predicate;
pub mod views;

pub use cursor::{Cursor, CursorMut, FilteredCursor, SlotRef};
pub use predicate::{And, ElemAtom, EntityAtom, NotNull, Predicate};
