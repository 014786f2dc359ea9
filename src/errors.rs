//! Runtime errors

/// Everything that can go wrong at runtime in the decomposition and transform code.
///
/// Operand-type mismatches never reach this enum: those pairings do not compile.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum LinalgError {
    /// (DimensionMismatch) Two operands disagree on a dimension
    #[error("(DimensionMismatch) expected extent {expected} but found {found}")]
    DimensionMismatch { expected: usize, found: usize },
    /// (EigenvectorsNotComputed) Only eigenvalues were requested at decomposition time
    #[error("(EigenvectorsNotComputed) the decomposition was run in values-only mode")]
    EigenvectorsNotComputed,
    /// (IndexOutOfRange) Accessor index past the number of available entries
    #[error("(IndexOutOfRange) index {index} is out of range (len = {len})")]
    IndexOutOfRange { index: usize, len: usize },
    /// (NotPositiveDefinite) The normal-equation matrix has no Cholesky factor
    #[error("(NotPositiveDefinite) AᵗA is not positive definite")]
    NotPositiveDefinite,
    /// (SolveFailed) The backend refused to solve the system
    #[error("(SolveFailed) {0}")]
    SolveFailed(&'static str),
    /// (InvalidCutoffRatio) Relative truncation ratio outside `[0, 1)`
    #[error("(InvalidCutoffRatio) cutoff ratio {0} must lie in [0, 1)")]
    InvalidCutoffRatio(f64),
    /// (Singular) The linear part has no inverse
    #[error("(Singular) the linear part of the transform is not invertible")]
    Singular,
    /// (MissingFactor) The requested SVD factor was cleared by the decomposition flags
    #[error("(MissingFactor) the {0} factor was not computed")]
    MissingFactor(&'static str),
}
