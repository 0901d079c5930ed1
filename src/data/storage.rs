//! Sparse, append-only storage for mesh entities.
//!
//! An [`EntityStore`] owns a vector of [`Slot`]s. Deleting an entity turns its
//! slot into a tombstone (`None`) instead of shifting later entities, so every
//! entity keeps its id (= slot index) for the store's lifetime. Only
//! [`EntityStore::compact`] renumbers, and it needs `&mut self`, so no cursor
//! can observe it.

use std::ops::Range;

use crate::debug_invariants::DebugInvariants;
use crate::entity::MeshEntity;
use crate::mesh_error::MeshSelectError;
use crate::topology::ownership::ProcessorId;
use crate::topology::point::EntityId;

/// One position in a store: a live entity or a tombstone.
pub type Slot<E> = Option<E>;

/// Indexable, possibly-sparse sequence of entities of one kind.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct EntityStore<E> {
    slots: Vec<Slot<E>>,
    processor_id: ProcessorId,
}

impl<E> EntityStore<E> {
    /// Create an empty store for the partition `processor_id`.
    pub fn new(processor_id: ProcessorId) -> Self {
        Self {
            slots: Vec::new(),
            processor_id,
        }
    }

    pub fn with_capacity(processor_id: ProcessorId, capacity: usize) -> Self {
        Self {
            slots: Vec::with_capacity(capacity),
            processor_id,
        }
    }

    /// Identifier of the local partition; used by ownership views.
    #[inline]
    pub fn processor_id(&self) -> ProcessorId {
        self.processor_id
    }

    /// Number of slots, tombstones included.
    #[inline]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Returns true if the store has no slots at all.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Number of slots holding a live entity.
    pub fn n_live(&self) -> usize {
        self.slots.iter().filter(|slot| slot.is_some()).count()
    }

    /// Returns true if `index` is in range and tombstoned.
    pub fn is_tombstone(&self, index: usize) -> bool {
        matches!(self.slots.get(index), Some(None))
    }

    pub fn get(&self, id: EntityId) -> Option<&E> {
        self.slots.get(id.index()).and_then(Option::as_ref)
    }

    pub fn get_mut(&mut self, id: EntityId) -> Option<&mut E> {
        self.slots.get_mut(id.index()).and_then(Option::as_mut)
    }

    /// Full read-only span of slots.
    #[inline]
    pub fn raw_slots(&self) -> &[Slot<E>] {
        &self.slots
    }

    /// Full mutable span of slots. Entities may be edited in place, but the
    /// slice cannot grow or shrink.
    #[inline]
    pub fn raw_slots_mut(&mut self) -> &mut [Slot<E>] {
        &mut self.slots
    }

    /// Read-only sub-span `[range.start, range.end)` of the slots.
    pub fn raw_range(&self, range: Range<usize>) -> Result<&[Slot<E>], MeshSelectError> {
        let len = self.slots.len();
        let end = range.end;
        self.slots
            .get(range)
            .ok_or(MeshSelectError::SlotOutOfBounds { index: end, len })
    }

    /// Mutable sub-span `[range.start, range.end)` of the slots.
    pub fn raw_range_mut(
        &mut self,
        range: Range<usize>,
    ) -> Result<&mut [Slot<E>], MeshSelectError> {
        let len = self.slots.len();
        let end = range.end;
        self.slots
            .get_mut(range)
            .ok_or(MeshSelectError::SlotOutOfBounds { index: end, len })
    }
}

impl<E: MeshEntity> EntityStore<E> {
    /// Append `entity` in a new slot and return its id.
    pub fn push(&mut self, mut entity: E) -> EntityId {
        let id = EntityId::from_index(self.slots.len());
        entity.set_id(id);
        self.slots.push(Some(entity));
        id
    }

    /// Tombstone the slot of `id` and hand back the removed entity.
    pub fn tombstone(&mut self, id: EntityId) -> Result<E, MeshSelectError> {
        let len = self.slots.len();
        let slot = self
            .slots
            .get_mut(id.index())
            .ok_or(MeshSelectError::SlotOutOfBounds {
                index: id.index(),
                len,
            })?;
        let entity = slot
            .take()
            .ok_or(MeshSelectError::AlreadyTombstoned(id.index()))?;
        log::debug!("tombstoned slot {id}");
        Ok(entity)
    }

    /// Drop every tombstone and renumber the survivors contiguously.
    ///
    /// Returns the old-index -> new-id table (`None` for dropped slots) so
    /// callers can rewrite references held elsewhere.
    pub fn compact(&mut self) -> Vec<Option<EntityId>> {
        let before = self.slots.len();
        let mut remap = Vec::with_capacity(before);
        let mut next = 0usize;
        for slot in &mut self.slots {
            match slot {
                Some(entity) => {
                    let id = EntityId::from_index(next);
                    entity.set_id(id);
                    remap.push(Some(id));
                    next += 1;
                }
                None => remap.push(None),
            }
        }
        self.slots.retain(Option::is_some);
        log::debug!(
            "compacted store: {before} slots -> {} ({} tombstones dropped)",
            self.slots.len(),
            before - self.slots.len()
        );
        crate::debug_invariants!(self.validate_invariants(), "EntityStore::compact");
        remap
    }
}

impl<E: MeshEntity> Default for EntityStore<E> {
    fn default() -> Self {
        Self::new(ProcessorId::UNPARTITIONED)
    }
}

impl<E: MeshEntity> DebugInvariants for EntityStore<E> {
    fn debug_assert_invariants(&self) {
        crate::debug_invariants!(self.validate_invariants(), "EntityStore");
    }

    fn validate_invariants(&self) -> Result<(), MeshSelectError> {
        for (slot, entity) in self.slots.iter().enumerate() {
            if let Some(entity) = entity {
                if entity.id().index() != slot {
                    return Err(MeshSelectError::IdMismatch {
                        slot,
                        found: entity.id(),
                    });
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::Node;

    fn store_of(n: usize) -> EntityStore<Node> {
        let mut store = EntityStore::new(ProcessorId::new(0));
        for i in 0..n {
            store.push(Node::new([i as f64, 0.0, 0.0]));
        }
        store
    }

    #[test]
    fn push_assigns_slot_ids() {
        let store = store_of(3);
        for (i, slot) in store.raw_slots().iter().enumerate() {
            assert_eq!(slot.as_ref().unwrap().id(), EntityId::from_index(i));
        }
        store.validate_invariants().unwrap();
    }

    #[test]
    fn tombstone_keeps_indices() {
        let mut store = store_of(3);
        let removed = store.tombstone(EntityId::new(1)).unwrap();
        assert_eq!(removed.point(), [1.0, 0.0, 0.0]);
        assert_eq!(store.len(), 3);
        assert_eq!(store.n_live(), 2);
        assert!(store.is_tombstone(1));
        assert!(!store.is_tombstone(0));
        assert!(!store.is_tombstone(99));
        assert!(store.get(EntityId::new(1)).is_none());
        assert_eq!(store.get(EntityId::new(2)).unwrap().id(), EntityId::new(2));
    }

    #[test]
    fn tombstone_errors() {
        let mut store = store_of(2);
        assert_eq!(
            store.tombstone(EntityId::new(5)).unwrap_err(),
            MeshSelectError::SlotOutOfBounds { index: 5, len: 2 }
        );
        store.tombstone(EntityId::new(0)).unwrap();
        assert_eq!(
            store.tombstone(EntityId::new(0)).unwrap_err(),
            MeshSelectError::AlreadyTombstoned(0)
        );
    }

    #[test]
    fn compact_renumbers_and_reports_map() {
        let mut store = store_of(4);
        store.tombstone(EntityId::new(0)).unwrap();
        store.tombstone(EntityId::new(2)).unwrap();
        let remap = store.compact();
        assert_eq!(
            remap,
            vec![None, Some(EntityId::new(0)), None, Some(EntityId::new(1))]
        );
        assert_eq!(store.len(), 2);
        assert_eq!(store.get(EntityId::new(1)).unwrap().point()[0], 3.0);
        store.validate_invariants().unwrap();
    }

    #[test]
    fn raw_range_bounds() {
        let store = store_of(3);
        assert_eq!(store.raw_range(1..3).unwrap().len(), 2);
        assert_eq!(
            store.raw_range(1..4).unwrap_err(),
            MeshSelectError::SlotOutOfBounds { index: 4, len: 3 }
        );
    }

    #[test]
    fn id_mismatch_detected() {
        let mut store = store_of(2);
        store
            .get_mut(EntityId::new(1))
            .unwrap()
            .set_id(EntityId::new(7));
        assert_eq!(
            store.validate_invariants().unwrap_err(),
            MeshSelectError::IdMismatch {
                slot: 1,
                found: EntityId::new(7)
            }
        );
    }

    #[test]
    fn serde_keeps_tombstones() {
        let mut store = store_of(3);
        store.tombstone(EntityId::new(1)).unwrap();
        let json = serde_json::to_string(&store).unwrap();
        let back: EntityStore<Node> = serde_json::from_str(&json).unwrap();
        assert_eq!(back.len(), 3);
        assert!(back.is_tombstone(1));
        assert_eq!(back.processor_id(), ProcessorId::new(0));
        back.validate_invariants().unwrap();
    }
}
