use crate::mesh_error::MeshError;
use crate::topology::region_set::RegionSet;
use crate::topology::validation::{validate_connections, validate_partition};

/// Trait for validating data structure invariants.
pub trait DebugInvariants {
    /// Assert invariants in debug builds or when invariant checking is enabled.
    fn debug_assert_invariants(&self);
    /// Validate invariants and return the first error encountered.
    fn validate_invariants(&self) -> Result<(), MeshError>;
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

impl DebugInvariants for RegionSet {
    fn debug_assert_invariants(&self) {
        debug_invariants!(self.validate_invariants(), "region set");
    }

    /// The regions must tile their own bounding box and every link must
    /// be mirrored.
    fn validate_invariants(&self) -> Result<(), MeshError> {
        let (nx, ny) = self.extent();
        validate_partition(self, nx, ny)?;
        validate_connections(self)
    }
}
