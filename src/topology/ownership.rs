//! Ownership tags for mesh entities.
//!
//! Every entity records the [`ProcessorId`] of the partition that owns it.
//! [`ProcessorId::UNPARTITIONED`] is the reserved sentinel for entities that
//! have not been assigned to any partition yet.

use std::fmt;

/// Partition (MPI rank) identifier.
#[derive(
    Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize, serde::Deserialize,
)]
#[repr(transparent)]
pub struct ProcessorId(u32);

/// Shorthand for [`ProcessorId::UNPARTITIONED`].
pub const INVALID_PROCESSOR_ID: ProcessorId = ProcessorId::UNPARTITIONED;

impl ProcessorId {
    /// Owner of entities that belong to no partition.
    pub const UNPARTITIONED: ProcessorId = ProcessorId(u32::MAX);

    #[inline]
    pub const fn new(rank: u32) -> Self {
        ProcessorId(rank)
    }

    #[inline]
    pub const fn get(self) -> u32 {
        self.0
    }

    /// Returns true for the unpartitioned sentinel.
    #[inline]
    pub const fn is_unpartitioned(self) -> bool {
        self.0 == u32::MAX
    }
}

impl Default for ProcessorId {
    fn default() -> Self {
        ProcessorId::UNPARTITIONED
    }
}

impl From<u32> for ProcessorId {
    fn from(rank: u32) -> Self {
        ProcessorId(rank)
    }
}

impl fmt::Debug for ProcessorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_unpartitioned() {
            f.write_str("ProcessorId(UNPARTITIONED)")
        } else {
            f.debug_tuple("ProcessorId").field(&self.0).finish()
        }
    }
}

impl fmt::Display for ProcessorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_unpartitioned() {
            f.write_str("unpartitioned")
        } else {
            write!(f, "{}", self.0)
        }
    }
}

#[cfg(feature = "mpi-support")]
unsafe impl mpi::datatype::Equivalence for ProcessorId {
    type Out = <u32 as mpi::datatype::Equivalence>::Out;

    fn equivalent_datatype() -> Self::Out {
        u32::equivalent_datatype()
    }
}

/// Physical/material region tag carried by elements.
pub type SubdomainId = u16;
