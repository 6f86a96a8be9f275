use super::*;

/// Deviation function family for a chain index.
///
/// A tagged-variant enum rather than a trait object: the combination set
/// is small and fixed, each arm touches a disjoint subset of `InputData`,
/// and dispatch sits in the hot propagation loop where predictable
/// branching and inlining matter more than open extensibility.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeviationType {
    /// `c_dev[i] * |x - a_dev[i]|^p / p`.
    Lp,
    /// Convex piecewise polynomial of degree 1 or 2.
    PiecewiseLp,
    /// Huber loss with per-index cutoff `huber_d[i]`.
    HuberD,
}

/// Separation function family for a chain edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeparationType {
    /// `c_sep[i] * |x_i - x_{i+1}|^q / q`.
    Lq,
    /// Huber loss with per-edge cutoff `huber_s[i]`.
    HuberS,
}

/// Degree of a piecewise deviation function.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PiecewiseDegree {
    Linear = 1,
    Quadratic = 2,
}

impl PiecewiseDegree {
    pub fn as_i32(self) -> i32 {
        self as i32
    }

    pub fn try_from_i32(deg: i32) -> Result<Self, GtvError> {
        match deg {
            1 => Ok(PiecewiseDegree::Linear),
            2 => Ok(PiecewiseDegree::Quadratic),
            other => Err(GtvError::InvalidPiecewiseDegree(other)),
        }
    }

    /// Number of entries in a function's leading intercept block.
    pub fn intercept_len(self) -> usize {
        self.as_i32() as usize
    }

    /// Number of entries in one breakpoint block: `(lambda, coeffs...)`.
    pub fn block_len(self) -> usize {
        self.intercept_len() + 1
    }
}
