//! Error types for the koppen-classify crate.

/// Error type for all fallible operations in the koppen-classify crate.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ClassifyError {
    /// Returned when a convention name is not Kottek06, Peel07 or GFDL.
    #[error("unrecognized convention '{name}' (expected Kottek06, Peel07 or GFDL)")]
    UnrecognizedConvention {
        /// The name as provided.
        name: String,
    },

    /// Returned when a class label is not in the catalog.
    #[error("unknown Köppen class '{label}'")]
    UnknownClass {
        /// The label as provided.
        label: String,
    },

    /// Returned when an input array does not have the expected spatial shape.
    #[error("{field}: expected shape {expected:?}, got {got:?}")]
    ShapeMismatch {
        /// Name of the mismatched input.
        field: &'static str,
        /// Expected shape.
        expected: Vec<usize>,
        /// Actual shape.
        got: Vec<usize>,
    },

    /// Wraps an error from the climatology layer.
    #[error(transparent)]
    Climatology(#[from] koppen_climatology::ClimatologyError),
}
