#![allow(dead_code)]
use mesh_select::prelude::*;

pub fn pid(p: u32) -> ProcessorId {
    ProcessorId::new(p)
}

/// Per-slot description: `None` is a tombstone.
pub type SlotSpec = Option<(RefinementState, u32, u32)>;

/// Point elements with the given (state, level, owner); tombstones are pushed
/// and then deleted so every store keeps its slot layout.
pub fn elem_store(local: u32, spec: &[SlotSpec]) -> EntityStore<Elem> {
    let mut store = EntityStore::new(pid(local));
    for (i, slot) in spec.iter().enumerate() {
        let (state, level, owner) = slot.unwrap_or((RefinementState::Active, 0, local));
        let elem = Elem::new(CellType::Vertex, vec![EntityId::from_index(i)])
            .unwrap()
            .with_refinement_state(state)
            .with_level(level)
            .with_processor_id(pid(owner));
        let id = store.push(elem);
        if slot.is_none() {
            store.tombstone(id).unwrap();
        }
    }
    store
}

/// The five-slot store used throughout the scenarios, owned by processor 0.
pub fn five_slot_store() -> EntityStore<Elem> {
    use RefinementState::*;
    elem_store(
        0,
        &[
            Some((Active, 0, 0)),
            None,
            Some((Ancestor, 1, 1)),
            Some((Active, 1, 0)),
            Some((SubActive, 2, 1)),
        ],
    )
}

/// Slot indices an iterator of entities visits.
pub fn indices<'a, E: MeshEntity + 'a>(it: impl Iterator<Item = &'a E>) -> Vec<usize> {
    it.map(|e| e.id().index()).collect()
}
