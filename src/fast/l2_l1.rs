use super::*;

fn l1_slope(value: Floating, anchor: Floating, slope: Floating) -> Floating {
    debug_assert!(slope >= 0.0);
    if value > anchor {
        slope
    } else {
        -slope
    }
}

fn pick_side(bound_index: &[usize; 2]) -> usize {
    if bound_index[0] <= bound_index[1] {
        0
    } else {
        1
    }
}

/// Closed-form fused-lasso solver for the `L2` deviation / `L1`
/// separation family: `min sum c_dev_i*(x_i-a_dev_i)^2 + sum c_sep_i*|x_i-x_{i+1}|`.
///
/// Runs in amortized linear time by accumulating the two-sided running
/// sub-gradient of each candidate piece instead of re-walking the chain
/// per bisection step; only valid for `p == 2, q == 1`.
pub fn fast_l2_l1(input: &InputData, output: &mut OutputData) -> Result<(), GtvError> {
    if *input.p() != 2 || *input.q() != 1 {
        return Err(GtvError::WrongFamilyForFastL2L1 {
            p: *input.p(),
            q: *input.q(),
        });
    }
    let n = *input.n();
    if n == 0 {
        return Err(GtvError::EmptyChain(n));
    }

    let mut i = 0usize;
    while i < n {
        let mut bound_index = [i, i];
        let mut accu_coeff = [input.c_dev()[i], input.c_dev()[i]];
        let mut accu_const = [
            -input.c_dev()[i] * input.a_dev()[i],
            -input.c_dev()[i] * input.a_dev()[i],
        ];
        let (mut l, mut u) = output.bound(i);
        output.x_mut()[i] = (l + u) / 2.0;

        while u - l >= input.sol_esp() {
            let side = pick_side(&bound_index);
            let mut st_index = bound_index[side];
            let mut drvt_coeff = accu_coeff[side];
            let mut drvt_const = accu_const[side];
            let l1_const = if i > 0 {
                l1_slope(output.x()[i], output.x()[i - 1], input.c_sep()[i - 1])
            } else {
                0.0
            };
            let mut drvt_value = drvt_coeff * output.x()[i] + drvt_const + l1_const;
            let mut direction: i32;

            loop {
                if st_index >= n - 1 {
                    break;
                }
                if drvt_value >= 0.0 {
                    if drvt_value < input.c_sep()[st_index] {
                        drvt_coeff += input.c_dev()[st_index + 1];
                        drvt_const += -input.c_dev()[st_index + 1] * input.a_dev()[st_index + 1];
                        st_index += 1;
                        drvt_value = drvt_coeff * output.x()[i] + drvt_const + l1_const;
                    } else {
                        bound_index[1] = st_index;
                        accu_coeff[1] = drvt_coeff;
                        accu_const[1] = drvt_const;
                        break;
                    }
                } else if -drvt_value <= input.c_sep()[st_index] {
                    drvt_coeff += input.c_dev()[st_index + 1];
                    drvt_const += -input.c_dev()[st_index + 1] * input.a_dev()[st_index + 1];
                    st_index += 1;
                    drvt_value = drvt_coeff * output.x()[i] + drvt_const + l1_const;
                } else {
                    bound_index[0] = st_index;
                    accu_coeff[0] = drvt_coeff;
                    accu_const[0] = drvt_const;
                    break;
                }
            }

            direction = if drvt_value >= 0.0 { 1 } else { -1 };
            if st_index == n - 1 {
                if direction == 1 {
                    bound_index[1] = st_index;
                    accu_coeff[1] = drvt_coeff;
                    accu_const[1] = drvt_const;
                } else {
                    bound_index[0] = st_index;
                    accu_coeff[0] = drvt_coeff;
                    accu_const[0] = drvt_const;
                }
            }

            if direction == -1 {
                l = output.x()[i];
            } else {
                u = output.x()[i];
            }
            output.x_mut()[i] = (l + u) / 2.0;
        }

        let side = pick_side(&bound_index);
        let st_index = bound_index[side];
        for j in i + 1..=st_index {
            output.x_mut()[j] = output.x()[i];
        }
        i = st_index + 1;
    }
    Ok(())
}
