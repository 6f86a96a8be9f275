use super::*;

/// Sets `output.obj_val` from the current `output.x`.
/// Dispatches on the active deviation/separation family.
pub fn comp_obj(input: &InputData, output: &mut OutputData) {
    if *input.deviation_type() == DeviationType::PiecewiseLp {
        let pw_deg = (*input.pw_deg()).expect("PiecewiseLp deviation requires pw_deg");
        let total = match pw_deg {
            PiecewiseDegree::Linear => pl_tv(input, output),
            PiecewiseDegree::Quadratic => pq_tv(input, output),
        };
        output.set_obj_val(total);
        return;
    }

    let mut obj = 0.0;
    match input.deviation_type() {
        DeviationType::Lp => {
            let p = *input.p();
            for i in 0..*input.n() {
                let diff = (output.x()[i] - input.a_dev()[i]).abs();
                obj += (1.0 / p as Floating) * input.c_dev()[i] * pow_conv(diff, p);
            }
        }
        DeviationType::HuberD => {
            for i in 0..*input.n() {
                let diff = output.x()[i] - input.a_dev()[i];
                obj += input.c_dev()[i] * huber_obj(diff, input.huber_d()[i]);
            }
        }
        DeviationType::PiecewiseLp => unreachable!("handled above"),
    }

    match input.separation_type() {
        SeparationType::Lq => {
            let q = *input.q();
            for i in 0..input.n().saturating_sub(1) {
                let diff = (output.x()[i] - output.x()[i + 1]).abs();
                obj += (1.0 / q as Floating) * input.c_sep()[i] * pow_conv(diff, q);
            }
        }
        SeparationType::HuberS => {
            for i in 0..input.n().saturating_sub(1) {
                let diff = output.x()[i] - output.x()[i + 1];
                obj += input.c_sep()[i] * huber_obj(diff, input.huber_s()[i]);
            }
        }
    }

    output.set_obj_val(obj);
}

fn quadratic_func(a: Floating, b: Floating, x0: Floating, x: Floating) -> Floating {
    0.5 * a * (x - x0) * (x + x0) - b * (x - x0)
}

/// Value of one degree-1 convex piecewise deviation function at `x`
/// Built as a running antiderivative of the per-piece slopes with the
/// convention `f(lambda_1) = 0`.
fn pl_func(pw: &[Floating], bkp_num: usize, x: Floating) -> Floating {
    if bkp_num == 0 {
        return pw[0] * x;
    }
    let lambda = |k: usize| pw[2 * k - 1];
    let b = |j: usize| pw[2 * j];

    if x <= lambda(1) {
        return (x - lambda(1)) * b(0);
    }
    let mut y = 0.0;
    for j in 1..bkp_num {
        if x <= lambda(j + 1) {
            return y + (x - lambda(j)) * b(j);
        }
        y += (lambda(j + 1) - lambda(j)) * b(j);
    }
    y + (x - lambda(bkp_num)) * b(bkp_num)
}

/// Value of one degree-2 convex piecewise deviation function at `x`
/// Same running-antiderivative construction as [`pl_func`], one degree up.
fn pq_func(pw: &[Floating], bkp_num: usize, x: Floating) -> Floating {
    if bkp_num == 0 {
        return 0.5 * pw[0] * x * x - pw[1] * x;
    }
    let lambda = |k: usize| pw[2 + 3 * (k - 1)];
    let coeffs = |j: usize| (pw[3 * j], pw[3 * j + 1]);

    let (a0, b0) = coeffs(0);
    if x <= lambda(1) {
        return quadratic_func(a0, b0, lambda(1), x);
    }
    let mut y = 0.0;
    for j in 1..bkp_num {
        let (aj, bj) = coeffs(j);
        if x <= lambda(j + 1) {
            return y + quadratic_func(aj, bj, lambda(j), x);
        }
        y += quadratic_func(aj, bj, lambda(j), lambda(j + 1));
    }
    let (ak, bk) = coeffs(bkp_num);
    y + quadratic_func(ak, bk, lambda(bkp_num), x)
}

fn pl_tv(input: &InputData, output: &OutputData) -> Floating {
    let mut cost = 0.0;
    let mut offset = 0usize;
    for i in 0..*input.n() {
        let bkp_num = input.bkp_nums()[i];
        let stride = PiecewiseEval::stride(PiecewiseDegree::Linear, bkp_num);
        cost += pl_func(&input.pw().as_slice()[offset..offset + stride], bkp_num, output.x()[i]);
        offset += stride;
    }
    for i in 0..input.n().saturating_sub(1) {
        cost += input.c_sep()[i] * (output.x()[i + 1] - output.x()[i]).abs();
    }
    cost
}

fn pq_tv(input: &InputData, output: &OutputData) -> Floating {
    let mut cost = 0.0;
    let mut offset = 0usize;
    for i in 0..*input.n() {
        let bkp_num = input.bkp_nums()[i];
        let stride = PiecewiseEval::stride(PiecewiseDegree::Quadratic, bkp_num);
        cost += pq_func(&input.pw().as_slice()[offset..offset + stride], bkp_num, output.x()[i]);
        offset += stride;
    }
    for i in 0..input.n().saturating_sub(1) {
        cost += input.c_sep()[i] * (output.x()[i + 1] - output.x()[i]).abs();
    }
    cost
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn lp_lq_objective_matches_closed_form() {
        let input = InputData::builder(2, 2, 1)
            .c_dev(DVector::from_vec(vec![1.0, 1.0]))
            .a_dev(DVector::from_vec(vec![0.0, 0.0]))
            .c_sep(DVector::from_vec(vec![1.0]))
            .build()
            .unwrap();
        let mut output = OutputData::new(&input);
        output.x_mut()[0] = 1.0;
        output.x_mut()[1] = 2.0;
        comp_obj(&input, &mut output);
        // 0.5*1^2 + 0.5*2^2 + 1*|1-2| = 0.5 + 2 + 1 = 3.5
        assert_relative_eq!(*output.obj_val(), 3.5, epsilon = 1e-12);
    }

    #[test]
    fn piecewise_linear_continuous_at_breakpoint() {
        // degree 1, single function, 2 breakpoints: [-1, -5, 1, 5, 3]
        let pw = DVector::from_vec(vec![-1.0, -5.0, 1.0, 5.0, 3.0]);
        let input = InputData::builder(1, 1, 1)
            .piecewise(PiecewiseDegree::Linear, vec![2], pw)
            .build()
            .unwrap();
        let mut output = OutputData::new(&input);
        output.x_mut()[0] = -5.0;
        comp_obj(&input, &mut output);
        assert_relative_eq!(*output.obj_val(), 0.0, epsilon = 1e-9);
    }
}
