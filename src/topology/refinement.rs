//! Refinement state of elements in an adaptive hierarchy.

/// Where an element sits in the refinement tree.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq, serde::Serialize, serde::Deserialize)]
pub enum RefinementState {
    /// Leaf element currently used in computation.
    #[default]
    Active,
    /// Refined into children and kept for the hierarchy.
    Ancestor,
    /// Descendant of a coarsened element, kept transiently.
    SubActive,
}

impl RefinementState {
    #[inline]
    pub fn is_active(self) -> bool {
        self == RefinementState::Active
    }
}
