use super::*;

/// Outcome of one forward chain walk from a trial `x[index]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PropagationOutcome {
    /// The trial was too low (`x[i+1]` fell below its lower bound):
    /// bisect up.
    LowerEscape,
    /// The trial was too high: bisect down.
    UpperEscape,
    /// The walk reached the end of the chain; the accumulated
    /// sub-gradient's sign decides the next move.
    Reached,
}

/// Advances `output.st_index` past function `i`'s block when the
/// deviation family is piecewise.
pub(crate) fn advance_pw_cursor(input: &InputData, output: &mut OutputData, i: usize) {
    if *input.deviation_type() == DeviationType::PiecewiseLp {
        let pw_deg = (*input.pw_deg()).expect("PiecewiseLp deviation requires pw_deg");
        let bkp_num = input.bkp_nums()[i];
        *output.st_index_mut() += PiecewiseEval::stride(pw_deg, bkp_num);
    }
}

/// Walks forward from a tentative `x[index]`, reconstructing
/// `x[index+1..n]` by inverting the separation sub-gradient at each edge
/// and tightening `output.bounds` as divergence is detected.
pub struct Propagator;

impl Propagator {
    pub fn propagate(
        input: &InputData,
        output: &mut OutputData,
        index: usize,
    ) -> (PropagationOutcome, Floating) {
        let n = *input.n();
        let mut f_drvt = DerivativeOracle::subgrad(input, output, index, true);

        for i in index..n.saturating_sub(1) {
            let z = SeparationInverse::invert(input, f_drvt, i);
            let x_next = output.x()[i] + z;
            output.x_mut()[i + 1] = x_next;

            let (lo_next, hi_next) = output.bound(i + 1);
            if x_next < lo_next {
                for j in index..=i {
                    let xj = output.x()[j];
                    debug_assert!(xj >= output.bound(j).0);
                    output.bounds_mut()[j].0 = xj;
                }
                return (PropagationOutcome::LowerEscape, f_drvt);
            }
            if x_next > hi_next {
                for j in index..=i {
                    let xj = output.x()[j];
                    debug_assert!(xj <= output.bound(j).1);
                    output.bounds_mut()[j].1 = xj;
                }
                return (PropagationOutcome::UpperEscape, f_drvt);
            }

            advance_pw_cursor(input, output, i);
            let drvt_delta = DerivativeOracle::subgrad(input, output, i + 1, false);
            f_drvt += drvt_delta;
        }

        if f_drvt > 0.0 {
            for i in index..n {
                let xi = output.x()[i];
                debug_assert!(xi <= output.bound(i).1);
                output.bounds_mut()[i].1 = xi;
            }
        } else if f_drvt < 0.0 {
            for i in index..n {
                let xi = output.x()[i];
                debug_assert!(xi >= output.bound(i).0);
                output.bounds_mut()[i].0 = xi;
            }
        }

        (PropagationOutcome::Reached, f_drvt)
    }
}
