use super::*;

/// Main KKT solve: for each anchor index in order, bisects
/// its trial value against the current divergence bounds until either
/// the interval is tight or the residual sub-gradient is within
/// tolerance, then advances to the next index.
///
/// `output` must come from [`OutputData::new`] against the same `input`
/// (or from [`OutputData::reset`]); bounds are assumed to start at
/// `[input.lb(), input.ub()]` for every index.
pub fn solve(input: &InputData, output: &mut OutputData) {
    let n = *input.n();

    for i in 0..n {
        let (mut l, mut u) = output.bound(i);

        if u - l < input.sol_esp() {
            output.x_mut()[i] = (l + u) / 2.0;
            trace!(target: "gtv::solve", index = i, x = output.x()[i], "interval already tight");
            advance_pw_cursor(input, output, i);
            continue;
        }

        output.x_mut()[i] = (l + u) / 2.0;
        let st_index = *output.st_index();
        let (mut state, mut f_drvt) = Propagator::propagate(input, output, i);

        while u - l >= input.sol_esp() {
            let len_before = u - l;
            match state {
                PropagationOutcome::LowerEscape => l = output.x()[i],
                PropagationOutcome::UpperEscape => u = output.x()[i],
                PropagationOutcome::Reached => {
                    if f_drvt.abs() < input.drvt_esp() {
                        debug!(target: "gtv::solve", index = i, x = output.x()[i], "KKT residual within tolerance");
                        return;
                    } else if f_drvt < 0.0 {
                        l = output.x()[i];
                    } else {
                        u = output.x()[i];
                    }
                }
            }
            debug_assert!(
                u - l < len_before,
                "bisection interval failed to shrink at index {i}: floating-point pathology"
            );

            output.x_mut()[i] = (l + u) / 2.0;
            *output.st_index_mut() = st_index;
            let result = Propagator::propagate(input, output, i);
            state = result.0;
            f_drvt = result.1;
        }

        *output.st_index_mut() = st_index;
        advance_pw_cursor(input, output, i);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn trivial_fused_lasso_collapses_to_weighted_mean() {
        let input = InputData::builder(3, 2, 1)
            .c_dev(DVector::from_vec(vec![1.0, 1.0, 1.0]))
            .a_dev(DVector::from_vec(vec![0.0, 10.0, 0.0]))
            .c_sep(DVector::from_vec(vec![100.0, 100.0]))
            .config(SolverConfig::default().with_bounds(-20.0, 20.0))
            .build()
            .unwrap();
        let mut output = OutputData::new(&input);
        solve(&input, &mut output);
        let mean = 10.0 / 3.0;
        for i in 0..3 {
            assert_relative_eq!(output.x()[i], mean, epsilon = 1e-6);
        }
    }

    #[test]
    fn symmetric_l1_l1_chain_collapses_to_zero() {
        let input = InputData::builder(5, 1, 1)
            .c_dev(DVector::from_vec(vec![1.0; 5]))
            .a_dev(DVector::from_vec(vec![-2.0, -1.0, 0.0, 1.0, 2.0]))
            .c_sep(DVector::from_vec(vec![0.5; 4]))
            .config(SolverConfig::default().with_bounds(-5.0, 5.0))
            .build()
            .unwrap();
        let mut output = OutputData::new(&input);
        solve(&input, &mut output);
        for i in 0..5 {
            assert_relative_eq!(output.x()[i], 0.0, epsilon = 1e-4);
        }
    }

    #[test]
    fn piecewise_linear_optimum_sits_at_sign_change_breakpoint() {
        // single function, degree 1, breakpoints at -5 (slope -1 -> 1) and 5 (slope 1 -> 3);
        // the right sub-gradient turns non-negative exactly at x = -5.
        let pw = DVector::from_vec(vec![-1.0, -5.0, 1.0, 5.0, 3.0]);
        let input = InputData::builder(1, 1, 1)
            .piecewise(PiecewiseDegree::Linear, vec![2], pw)
            .build()
            .unwrap();
        let mut output = OutputData::new(&input);
        solve(&input, &mut output);
        assert_relative_eq!(output.x()[0], -5.0, epsilon = 1e-6);
        assert_eq!(*output.st_index(), input.pw().len());
    }

    #[test]
    fn huber_separation_respects_kink_bound() {
        let input = InputData::builder(3, 2, 2)
            .c_dev(DVector::from_vec(vec![1.0, 1.0, 1.0]))
            .a_dev(DVector::from_vec(vec![0.0, 100.0, 0.0]))
            .c_sep(DVector::from_vec(vec![1.0, 1.0]))
            .huber_s(DVector::from_vec(vec![1.0, 1.0]))
            .build()
            .unwrap();
        let mut output = OutputData::new(&input);
        solve(&input, &mut output);
        for i in 0..2 {
            assert!((output.x()[i] - output.x()[i + 1]).abs() <= 1.0 + 1e-6);
        }
        for i in 0..3 {
            assert!(output.x()[i] > input.lb() && output.x()[i] < input.ub());
        }
    }

    #[test]
    fn repeated_solve_on_reset_output_is_idempotent() {
        let input = InputData::builder(4, 2, 1)
            .c_dev(DVector::from_vec(vec![1.0, 2.0, 1.0, 3.0]))
            .a_dev(DVector::from_vec(vec![-1.0, 4.0, 2.0, -3.0]))
            .c_sep(DVector::from_vec(vec![0.7, 0.7, 0.7]))
            .build()
            .unwrap();
        let mut output = OutputData::new(&input);
        solve(&input, &mut output);
        let first: Vec<Floating> = output.x().iter().copied().collect();

        output.reset(&input);
        solve(&input, &mut output);
        for (a, b) in first.iter().zip(output.x().iter()) {
            assert_relative_eq!(a, b, epsilon = 1e-6);
        }
    }

    #[test]
    fn solution_stays_within_box_bounds() {
        let input = InputData::builder(6, 2, 1)
            .c_dev(DVector::from_vec(vec![1.0; 6]))
            .a_dev(DVector::from_vec(vec![-3.0, 8.0, -5.0, 2.0, 0.0, 9.0]))
            .c_sep(DVector::from_vec(vec![0.3; 5]))
            .build()
            .unwrap();
        let mut output = OutputData::new(&input);
        solve(&input, &mut output);
        for i in 0..6 {
            assert!(output.x()[i] >= input.lb() && output.x()[i] <= input.ub());
        }
    }
}
