use super::*;

/// Computes the right sub-gradient of `f_i`, optionally summed with the
/// contribution of `h_{i-1}` with respect to `x_i`. Pure
/// given the piecewise cursor `output.st_index()`; callers are
/// responsible for positioning it at the start of function `index`'s
/// block before calling into the `PiecewiseLp` arm.
pub struct DerivativeOracle;

impl DerivativeOracle {
    /// Right sub-gradient of `f_index` alone.
    pub fn deviation_subgrad(input: &InputData, output: &OutputData, index: usize) -> Floating {
        match input.deviation_type() {
            DeviationType::Lp => {
                let p = *input.p();
                let diff = output.x()[index] - input.a_dev()[index];
                let mut v = input.c_dev()[index] * pow_conv(diff, p - 1);
                // Odd p: the right sub-gradient at x = a is +c_dev[i]*0 = 0,
                // The right sub-gradient at the kink is the even-p value (0),
                // on odd p >= 3.
                if p % 2 == 1 && diff < 0.0 {
                    v = -v;
                }
                v
            }
            DeviationType::PiecewiseLp => {
                let pw_deg = (*input.pw_deg()).expect("PiecewiseLp deviation requires pw_deg");
                let st_index = *output.st_index();
                let bkp_num = input.bkp_nums()[index];
                let x = output.x()[index];
                let piece = PiecewiseEval::locate_piece(input.pw(), pw_deg, bkp_num, st_index, x);
                debug_assert!(PiecewiseEval::piece_valid(
                    input.pw(),
                    pw_deg,
                    bkp_num,
                    st_index,
                    x,
                    piece
                ));
                let coeffs = PiecewiseEval::piece_coeffs(input.pw(), pw_deg, st_index, piece);
                let deg = pw_deg.as_i32();
                let mut v = coeffs[0] * pow_conv(x, deg - 1);
                for (k, &b) in coeffs.iter().enumerate().skip(1) {
                    v -= b * pow_conv(x, deg - k as i32 - 1);
                }
                v
            }
            DeviationType::HuberD => {
                let diff = output.x()[index] - input.a_dev()[index];
                input.c_dev()[index] * huber_drvt(diff, input.huber_d()[index])
            }
        }
    }

    /// Derivative of `h_{index-1}(x_{index-1} - x_index)` with respect to
    /// `x_index` (note the sign: the argument is `x_{index-1} - x_index`).
    fn separation_subgrad_wrt_next(input: &InputData, output: &OutputData, index: usize) -> Floating {
        let x_prev = output.x()[index - 1];
        let x_cur = output.x()[index];
        let c = input.c_sep()[index - 1];
        match input.separation_type() {
            SeparationType::Lq => {
                let q = *input.q();
                if q % 2 == 0 {
                    -c * pow_conv(x_prev - x_cur, q - 1)
                } else if q == 1 {
                    // Right sub-gradient convention at the kink.
                    if x_prev - x_cur >= 0.0 {
                        -c
                    } else {
                        c
                    }
                } else if x_prev - x_cur >= 0.0 {
                    -c * pow_conv(x_prev - x_cur, q - 1)
                } else {
                    c * pow_conv(x_cur - x_prev, q - 1)
                }
            }
            SeparationType::HuberS => c * huber_drvt(x_cur - x_prev, input.huber_s()[index - 1]),
        }
    }

    /// Right sub-gradient of `f_index`, plus (when `incl_prev` and
    /// `index > 0`) the `h_{index-1}` contribution.
    pub fn subgrad(input: &InputData, output: &OutputData, index: usize, incl_prev: bool) -> Floating {
        let incl_prev = incl_prev && index > 0;
        let mut v = Self::deviation_subgrad(input, output, index);
        if incl_prev {
            v += Self::separation_subgrad_wrt_next(input, output, index);
        }
        v
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lp_quadratic_subgrad() {
        let input = InputData::builder(2, 2, 1)
            .c_dev(DVector::from_vec(vec![2.0, 2.0]))
            .a_dev(DVector::from_vec(vec![1.0, 1.0]))
            .c_sep(DVector::from_vec(vec![1.0]))
            .build()
            .unwrap();
        let mut output = OutputData::new(&input);
        output.x_mut()[0] = 3.0;
        // c * (x - a)^(p-1) = 2 * 2 = 4
        assert_eq!(DerivativeOracle::deviation_subgrad(&input, &output, 0), 4.0);
    }

    #[test]
    fn l1_separation_right_subgrad_at_kink() {
        let input = InputData::builder(2, 1, 1)
            .c_dev(DVector::from_vec(vec![1.0, 1.0]))
            .a_dev(DVector::zeros(2))
            .c_sep(DVector::from_vec(vec![0.5]))
            .build()
            .unwrap();
        let output = OutputData::new(&input);
        // x_0 == x_1 == 0: right sub-gradient of h_0 wrt x_1 at the tie.
        let v = DerivativeOracle::subgrad(&input, &output, 1, true);
        // deviation subgrad at x_1=0, a=0, p=1: +c_dev = 1; separation at tie: x_prev - x_cur >= 0 -> -c_sep = -0.5
        assert_eq!(v, 0.5);
    }
}
