use super::*;

const ZERO_SUM_TOLERANCE: Floating = 1e-6;

/// Closed-form solver for the linear deviation / `L2` separation family
/// (`min sum c_dev_i*x_i + sum c_sep_i*(x_i-x_{i+1})^2`, unconstrained).
/// The deviation term is linear, so a finite minimizer only exists when
/// the chain's total deviation slope is (numerically) zero; ported from
/// graph-Laplacian style closed form via a running prefix sum.
pub fn fast_linear_l2(input: &InputData, output: &mut OutputData) -> Result<(), GtvError> {
    if *input.p() != 1 || *input.q() != 2 {
        return Err(GtvError::WrongFamilyForFastLinearL2 {
            p: *input.p(),
            q: *input.q(),
        });
    }
    let n = *input.n();
    if n == 0 {
        return Err(GtvError::EmptyChain(n));
    }

    let sum: Floating = input.c_dev().iter().sum();
    if sum.abs() >= ZERO_SUM_TOLERANCE {
        return Err(GtvError::LinearL2NotZeroSum(sum));
    }

    output.x_mut()[0] = 0.0;
    let mut running = 0.0;
    for i in 0..n - 1 {
        running += input.c_dev()[i];
        let prev = output.x()[i];
        output.x_mut()[i + 1] = prev + running;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_nonzero_sum() {
        let input = InputData::builder(3, 1, 2)
            .c_dev(DVector::from_vec(vec![1.0, 1.0, 1.0]))
            .a_dev(DVector::zeros(3))
            .c_sep(DVector::from_vec(vec![1.0, 1.0]))
            .build()
            .unwrap();
        let mut output = OutputData::new(&input);
        assert!(matches!(
            fast_linear_l2(&input, &mut output),
            Err(GtvError::LinearL2NotZeroSum(_))
        ));
    }

    #[test]
    fn zero_sum_chain_resolves_to_prefix_sums() {
        let input = InputData::builder(4, 1, 2)
            .c_dev(DVector::from_vec(vec![2.0, -1.0, -1.0, 0.0]))
            .a_dev(DVector::zeros(4))
            .c_sep(DVector::from_vec(vec![1.0, 1.0, 1.0]))
            .build()
            .unwrap();
        let mut output = OutputData::new(&input);
        fast_linear_l2(&input, &mut output).unwrap();
        // running = [2, 1, 0]; x[i+1] = x[i] + running[i]
        assert_eq!(output.x()[0], 0.0);
        assert_eq!(output.x()[1], 2.0);
        assert_eq!(output.x()[2], 3.0);
        assert_eq!(output.x()[3], 3.0);
    }
}
