use super::*;

/// Tolerances and search-bound defaults shared by every `solve`/`fast_*`
/// call. Bundled so that `InputData` can be
/// constructed once per problem instance and never mutated afterwards.
#[derive(derive_getters::Getters, Debug, Clone, Copy, PartialEq)]
pub struct SolverConfig {
    /// Bisection interval termination (spec default `1e-6`).
    sol_esp: Floating,
    /// KKT residual termination (spec default `1e-6`).
    drvt_esp: Floating,
    /// L1-inverse saturation constant (spec default `1e10`).
    infinity: Floating,
    /// Uniform lower search bound for every `x_i` (spec default `-1e4`).
    lb: Floating,
    /// Uniform upper search bound for every `x_i` (spec default `1e4`).
    ub: Floating,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            sol_esp: 1e-6,
            drvt_esp: 1e-6,
            infinity: 1e10,
            lb: -1e4,
            ub: 1e4,
        }
    }
}

impl SolverConfig {
    pub fn new(sol_esp: Floating, drvt_esp: Floating, infinity: Floating, lb: Floating, ub: Floating) -> Self {
        Self {
            sol_esp,
            drvt_esp,
            infinity,
            lb,
            ub,
        }
    }

    pub fn with_bounds(mut self, lb: Floating, ub: Floating) -> Self {
        self.lb = lb;
        self.ub = ub;
        self
    }
}
