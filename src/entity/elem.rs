//! Mesh elements.

use crate::entity::{MeshEntity, RefinableEntity};
use crate::mesh_error::MeshSelectError;
use crate::topology::cell_type::CellType;
use crate::topology::ownership::{ProcessorId, SubdomainId};
use crate::topology::point::EntityId;
use crate::topology::refinement::RefinementState;

/// A geometric element with its node connectivity and refinement metadata.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Elem {
    id: EntityId,
    cell_type: CellType,
    nodes: Vec<EntityId>,
    level: u32,
    subdomain_id: SubdomainId,
    processor_id: ProcessorId,
    refinement_state: RefinementState,
}

impl Elem {
    /// Creates an active, level-0, unpartitioned element in subdomain 0.
    ///
    /// The node count must match `cell_type`.
    pub fn new(cell_type: CellType, nodes: Vec<EntityId>) -> Result<Self, MeshSelectError> {
        let expected = cell_type.n_vertices();
        if nodes.len() != expected {
            return Err(MeshSelectError::NodeCountMismatch {
                cell_type: cell_type.to_string(),
                expected,
                found: nodes.len(),
            });
        }
        Ok(Self {
            // assigned by the store on insertion
            id: EntityId::new(0),
            cell_type,
            nodes,
            level: 0,
            subdomain_id: 0,
            processor_id: ProcessorId::UNPARTITIONED,
            refinement_state: RefinementState::Active,
        })
    }

    pub fn with_level(mut self, level: u32) -> Self {
        self.level = level;
        self
    }

    pub fn with_subdomain(mut self, subdomain_id: SubdomainId) -> Self {
        self.subdomain_id = subdomain_id;
        self
    }

    pub fn with_processor_id(mut self, processor_id: ProcessorId) -> Self {
        self.processor_id = processor_id;
        self
    }

    pub fn with_refinement_state(mut self, state: RefinementState) -> Self {
        self.refinement_state = state;
        self
    }

    /// Node ids this element connects, in local vertex order.
    pub fn nodes(&self) -> &[EntityId] {
        &self.nodes
    }

    pub fn set_processor_id(&mut self, processor_id: ProcessorId) {
        self.processor_id = processor_id;
    }

    pub fn set_subdomain_id(&mut self, subdomain_id: SubdomainId) {
        self.subdomain_id = subdomain_id;
    }

    pub fn set_refinement_state(&mut self, state: RefinementState) {
        self.refinement_state = state;
    }

    pub fn set_level(&mut self, level: u32) {
        self.level = level;
    }

    /// Rewrites node references through `map` (old id -> new id).
    pub(crate) fn remap_nodes(&mut self, map: impl Fn(EntityId) -> Option<EntityId>) {
        for node in &mut self.nodes {
            if let Some(new) = map(*node) {
                *node = new;
            }
        }
    }
}

impl MeshEntity for Elem {
    fn id(&self) -> EntityId {
        self.id
    }

    fn processor_id(&self) -> ProcessorId {
        self.processor_id
    }

    fn is_active(&self) -> bool {
        self.refinement_state.is_active()
    }

    fn set_id(&mut self, id: EntityId) {
        self.id = id;
    }
}

impl RefinableEntity for Elem {
    fn refinement_state(&self) -> RefinementState {
        self.refinement_state
    }

    fn level(&self) -> u32 {
        self.level
    }

    fn cell_type(&self) -> CellType {
        self.cell_type
    }

    fn subdomain_id(&self) -> SubdomainId {
        self.subdomain_id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(raw: &[u64]) -> Vec<EntityId> {
        raw.iter().copied().map(EntityId::new).collect()
    }

    #[test]
    fn new_checks_node_count() {
        let err = Elem::new(CellType::Triangle, ids(&[0, 1])).unwrap_err();
        assert_eq!(
            err,
            MeshSelectError::NodeCountMismatch {
                cell_type: "Triangle".into(),
                expected: 3,
                found: 2,
            }
        );
        assert!(Elem::new(CellType::Triangle, ids(&[0, 1, 2])).is_ok());
    }

    #[test]
    fn defaults_and_builders() {
        let e = Elem::new(CellType::Segment, ids(&[3, 4])).unwrap();
        assert!(e.is_active());
        assert_eq!(e.level(), 0);
        assert_eq!(e.subdomain_id(), 0);
        assert!(e.processor_id().is_unpartitioned());

        let e = e
            .with_level(2)
            .with_subdomain(5)
            .with_processor_id(ProcessorId::new(1))
            .with_refinement_state(RefinementState::Ancestor);
        assert!(!e.is_active());
        assert_eq!(e.refinement_state(), RefinementState::Ancestor);
        assert_eq!(e.level(), 2);
        assert_eq!(e.subdomain_id(), 5);
        assert_eq!(e.processor_id(), ProcessorId::new(1));
        assert_eq!(e.nodes(), &ids(&[3, 4])[..]);
    }
}
