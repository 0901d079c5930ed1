use crate::mesh_error::MeshSelectError;

/// Trait for validating data structure invariants.
pub trait DebugInvariants {
    /// Assert invariants in debug builds or when invariant checking is enabled.
    fn debug_assert_invariants(&self);
    /// Validate invariants and return the first error encountered.
    fn validate_invariants(&self) -> Result<(), MeshSelectError>;
}

/// Helper macro to run a fallible check and panic on error when invariant
/// checking is enabled.
#[macro_export]
macro_rules! debug_invariants {
    ($expr:expr, $($ctx:tt)*) => {
        #[cfg(any(debug_assertions, feature = "strict-invariants", feature = "check-invariants"))]
        if let Err(e) = $expr {
            panic!(concat!("[invariants] ", $($ctx)*, ": {}"), e);
        }
    };
}

/// Precondition check on cursor use. Fires in debug builds and whenever the
/// `strict-invariants` feature is enabled; a no-op otherwise.
#[cfg(any(debug_assertions, feature = "strict-invariants"))]
macro_rules! contract_assert {
    ($($tt:tt)*) => { assert!($($tt)*); };
}
#[cfg(not(any(debug_assertions, feature = "strict-invariants")))]
macro_rules! contract_assert {
    ($($tt:tt)*) => {
        ()
    };
}
pub(crate) use contract_assert;
