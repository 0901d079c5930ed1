//! Identifiers and classification enums shared by entities and predicates.
//!
//! - [`point::EntityId`]: slot-index id of an element or node
//! - [`ownership::ProcessorId`]: owning partition, with the unpartitioned sentinel
//! - [`cell_type::CellType`]: element shapes
//! - [`refinement::RefinementState`]: position in the refinement tree

pub mod cell_type;
pub mod ownership;
pub mod point;
pub mod refinement;
