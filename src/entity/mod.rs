//! Mesh entities and the attribute surface selection predicates read.
//!
//! [`MeshEntity`] is implemented by everything an
//! [`EntityStore`](crate::data::storage::EntityStore) can hold. Only entities
//! that also implement [`RefinableEntity`] (elements) can be filtered by
//! refinement state, level, cell type, or subdomain; asking for such a view on
//! a node store does not compile.

pub mod elem;
pub mod node;

pub use elem::Elem;
pub use node::Node;

use crate::topology::cell_type::CellType;
use crate::topology::ownership::{ProcessorId, SubdomainId};
use crate::topology::point::EntityId;
use crate::topology::refinement::RefinementState;

/// Attributes shared by elements and nodes.
pub trait MeshEntity {
    fn id(&self) -> EntityId;

    /// Partition that owns this entity.
    fn processor_id(&self) -> ProcessorId;

    /// Whether the entity takes part in the current computation.
    ///
    /// Entities without a refinement state are always active.
    fn is_active(&self) -> bool {
        true
    }

    /// Called by the store when the entity is placed in slot `id`.
    fn set_id(&mut self, id: EntityId);
}

/// Refinement-tree and classification attributes carried by elements.
pub trait RefinableEntity: MeshEntity {
    fn refinement_state(&self) -> RefinementState;
    /// Refinement depth; 0 for elements of the initial mesh.
    fn level(&self) -> u32;
    fn cell_type(&self) -> CellType;
    fn subdomain_id(&self) -> SubdomainId;
}
