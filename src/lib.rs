#![cfg_attr(docsrs, feature(doc_cfg))]
//! # mesh-select
//!
//! mesh-select keeps the elements and nodes of a partitioned mesh in sparse,
//! append-only stores and lets callers walk precise subsets of them ("active
//! elements owned by this rank", "level-2 elements", "nodes on processor 7")
//! without copying and without tripping over deleted entities.
//!
//! ## Features
//! - Tombstoning stores: deleting an entity leaves an empty slot, so ids stay stable
//! - A small, closed vocabulary of selection atoms plus an `And` combinator
//! - One filtered cursor implementation for read-only and mutable traversal
//! - Named views for elements and nodes; element-only views do not exist on nodes
//! - Optional MPI datatype interop for ids (`mpi-support`)
//!
//! ## Usage
//!
//! ```
//! use mesh_select::prelude::*;
//!
//! let mut mesh = Mesh::serial();
//! let nodes: Vec<_> = (0..3).map(|i| mesh.add_node(Node::new([i as f64, 0.0, 0.0]))).collect();
//! let tri = Elem::new(CellType::Triangle, nodes).unwrap().with_level(1);
//! mesh.add_elem(tri).unwrap();
//! mesh.partition_with(|_| ProcessorId::new(0));
//!
//! for elem in mesh.elements_mut().local_level_mut(1) {
//!     elem.set_subdomain_id(4);
//! }
//! assert_eq!(mesh.elements().active_subdomain(4).count(), 1);
//! ```
//!
//! ## Invariant checking
//! Cursor preconditions (no dereference or advance past the end) are asserted
//! in debug builds and with the `strict-invariants` feature. Store and mesh
//! structure can be validated through [`DebugInvariants`].

pub mod data;
pub mod debug_invariants;
pub mod entity;
pub mod mesh;
pub mod mesh_error;
pub mod select;
pub mod topology;

pub use debug_invariants::DebugInvariants;

/// A convenient prelude to import the most-used traits & types:
pub mod prelude {
    pub use crate::data::storage::{EntityStore, Slot};
    pub use crate::debug_invariants::DebugInvariants;
    pub use crate::entity::{Elem, MeshEntity, Node, RefinableEntity};
    pub use crate::mesh::{Mesh, MeshConfig};
    pub use crate::mesh_error::MeshSelectError;
    pub use crate::select::cursor::{Cursor, CursorMut, FilteredCursor};
    pub use crate::select::predicate::{And, ElemAtom, EntityAtom, NotNull, Predicate};
    pub use crate::topology::cell_type::CellType;
    pub use crate::topology::ownership::{INVALID_PROCESSOR_ID, ProcessorId, SubdomainId};
    pub use crate::topology::point::EntityId;
    pub use crate::topology::refinement::RefinementState;
}
