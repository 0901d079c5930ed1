//! `EntityId`: a strong, zero-cost handle for stored mesh entities
//!
//! Every element and node lives in a slot of an
//! [`EntityStore`](crate::data::storage::EntityStore); its `EntityId` is that
//! slot's index. Ids stay stable when other entities are tombstoned, which is
//! what lets every process agree on numbering without compaction.
//!
//! This module provides:
//! - A transparent `EntityId` newtype around `u64` for zero-cost FFI and
//!   memory layout guarantees.
//! - Conversions to and from slot indices.
//! - Implementations of common traits (`Debug`, `Display`, ordering,
//!   hashing) so `EntityId` can be used in maps, sets, and printed easily.

use std::fmt;

/// # Memory layout
/// This type is `repr(transparent)`, meaning it has the same ABI and
/// alignment as its single field (`u64`) and can be passed to FFI
/// exactly like a `u64`.
#[derive(
    Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize, serde::Deserialize,
)]
#[repr(transparent)]
pub struct EntityId(u64);

impl EntityId {
    /// Creates an `EntityId` from a raw `u64` value.
    #[inline]
    pub const fn new(raw: u64) -> Self {
        EntityId(raw)
    }

    /// Creates the id belonging to slot `index`.
    #[inline]
    pub const fn from_index(index: usize) -> Self {
        EntityId(index as u64)
    }

    /// Returns the inner `u64` value of this `EntityId`.
    #[inline]
    pub const fn get(self) -> u64 {
        self.0
    }

    /// Returns the slot index this id refers to.
    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

// -----------------------------------------------------------------------------
// Formatting traits
// -----------------------------------------------------------------------------

impl fmt::Debug for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("EntityId").field(&self.get()).finish()
    }
}

/// Prints the numeric id without any wrapper text.
impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.get())
    }
}

// -----------------------------------------------------------------------------
// FFI and layout guarantees
// -----------------------------------------------------------------------------

/// `EntityId` can be sent over MPI as a `u64`.
#[cfg(feature = "mpi-support")]
unsafe impl mpi::datatype::Equivalence for EntityId {
    type Out = <u64 as mpi::datatype::Equivalence>::Out;

    fn equivalent_datatype() -> Self::Out {
        u64::equivalent_datatype()
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn index_roundtrip() {
        let id = EntityId::from_index(42);
        assert_eq!(id.index(), 42);
        assert_eq!(id.get(), 42);
        assert_eq!(id, EntityId::new(42));
    }

    #[test]
    fn debug_and_display() {
        let id = EntityId::new(7);
        assert_eq!(format!("{:?}", id), "EntityId(7)");
        assert_eq!(format!("{}", id), "7");
    }

    #[test]
    fn ordering_follows_slot_order() {
        let a = EntityId::from_index(1);
        let b = EntityId::from_index(2);
        assert!(a < b);
        use std::collections::HashSet;
        let set: HashSet<_> = [a, b, a].into_iter().collect();
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn serde_is_transparent_integer() {
        let id = EntityId::new(123);
        let s = serde_json::to_string(&id).unwrap();
        assert_eq!(s, "123");
        let back: EntityId = serde_json::from_str(&s).unwrap();
        assert_eq!(back, id);
    }
}
