//! MeshSelectError: unified error type for mesh-select public APIs
//!
//! Iteration itself never fails; these variants cover container management
//! (adding, tombstoning, compacting entities) and invariant validation.

use thiserror::Error;

use crate::topology::ownership::ProcessorId;
use crate::topology::point::EntityId;

/// Unified error type for mesh-select operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MeshSelectError {
    /// A slot index past the end of the store was addressed.
    #[error("slot {index} out of bounds (store has {len} slots)")]
    SlotOutOfBounds { index: usize, len: usize },
    /// The slot was already tombstoned.
    #[error("slot {0} is already tombstoned")]
    AlreadyTombstoned(usize),
    /// An element was given a node list that does not fit its cell type.
    #[error("cell type {cell_type} expects {expected} nodes, found {found}")]
    NodeCountMismatch {
        cell_type: String,
        expected: usize,
        found: usize,
    },
    /// An element references a node that is missing or tombstoned.
    #[error("element {elem} references missing node {node}")]
    DanglingNode { elem: EntityId, node: EntityId },
    /// A stored entity carries an id that differs from its slot index.
    #[error("entity in slot {slot} carries id {found}")]
    IdMismatch { slot: usize, found: EntityId },
    /// The local processor id is not a valid rank for the communicator size.
    #[error("processor id {processor_id} invalid for {n_processors} processors")]
    InvalidProcessorId {
        processor_id: ProcessorId,
        n_processors: u32,
    },
    /// A store's local processor id disagrees with its mesh configuration.
    #[error("{store} store is on processor {found}, mesh is on processor {expected}")]
    ProcessorIdMismatch {
        store: &'static str,
        expected: ProcessorId,
        found: ProcessorId,
    },
}
