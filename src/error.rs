use super::*;

/// Precondition-violation taxonomy. These are the only errors
/// the core ever returns; a successful `solve` always mutates `output.x`
/// to completion, and numerical degeneracies (L1 saturation) are not
/// errors at all — see `separation` and `propagator`.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum GtvError {
    #[error("chain length n must be >= 1, got {0}")]
    EmptyChain(usize),
    #[error("exponent must be >= 1, got {0}")]
    NonPositiveExponent(i32),
    #[error("buffer {name} has length {actual}, expected {expected}")]
    BufferLengthMismatch {
        name: &'static str,
        expected: usize,
        actual: usize,
    },
    #[error("piecewise degree must be 1 or 2, got {0}")]
    InvalidPiecewiseDegree(i32),
    #[error("piecewise function {index} is not convex: breakpoints or sub-gradients are not non-decreasing")]
    NonConvexPiecewise { index: usize },
    #[error("Huber cutoff at index {index} must be strictly positive, got {value}")]
    NonPositiveHuberCutoff { index: usize, value: Floating },
    #[error("deviation scale c_dev[{index}] must be non-negative, got {value}")]
    NegativeDeviationScale { index: usize, value: Floating },
    #[error("separation scale c_sep[{index}] must be non-negative, got {value}")]
    NegativeSeparationScale { index: usize, value: Floating },
    #[error("fast_linear_l2 requires sum(c_dev) ~= 0, got {0}")]
    LinearL2NotZeroSum(Floating),
    #[error("fast_l2_l1 requires p == 2 and q == 1, got p={p} q={q}")]
    WrongFamilyForFastL2L1 { p: i32, q: i32 },
    #[error("fast_linear_l2 requires p == 1 and q == 2, got p={p} q={q}")]
    WrongFamilyForFastLinearL2 { p: i32, q: i32 },
}
