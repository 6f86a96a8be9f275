use super::*;
use rand::Rng;

pub const PW_BKP_UNIF: (Floating, Floating) = (-15.0, -1.0);
pub const PW_DEG2_UNIF: (Floating, Floating) = (0.5, 5.0);
pub const PW_DEG1_UNIF: (Floating, Floating) = (-50.0, -25.0);
pub const PW_INC_UNIF: (Floating, Floating) = (0.1, 2.0);
pub const PW_BKPNUM_UNIF: (usize, usize) = (100, 200);
pub const PW_CSEP_UNIF: (Floating, Floating) = (0.0, 1.0);
pub const LPLQ_ADEV_UNIF: (Floating, Floating) = (-1.0, 1.0);
pub const LPLQ_CDEV_UNIF: (Floating, Floating) = (0.0, 1.0);

/// Random breakpoint count per function, uniform in `[100, 200]`.
pub fn gen_pw_bkp_nums_random(rng: &mut impl Rng, n: usize) -> Vec<usize> {
    (0..n)
        .map(|_| rng.gen_range(PW_BKPNUM_UNIF.0..=PW_BKPNUM_UNIF.1))
        .collect()
}

/// Same breakpoint count for every function.
pub fn gen_pw_bkp_nums_uniform(n: usize, bkp_num: usize) -> Vec<usize> {
    vec![bkp_num; n]
}

/// Breakpoint count sampled uniformly in `[lb, ub]` per function.
pub fn gen_pw_bkp_nums_range(rng: &mut impl Rng, n: usize, lb: usize, ub: usize) -> Vec<usize> {
    assert!(lb <= ub);
    (0..n).map(|_| rng.gen_range(lb..=ub)).collect()
}

/// Builds a convex piecewise coefficient buffer for `n` functions of
/// the given degree, with `bkp_nums[i]` breakpoints for function `i`.
/// Coefficients are walked left to right with a random positive
/// increment added to each sub-gradient, guaranteeing convexity by
/// construction; for the linear case the last half of each function's
/// pieces are forced to a positive slope so the problem has a bounded
/// minimum.
pub fn gen_pw_funcs(rng: &mut impl Rng, pw_deg: PiecewiseDegree, bkp_nums: &[usize]) -> DVector<Floating> {
    let n = bkp_nums.len();
    let total_bkps: usize = bkp_nums.iter().sum();
    let len = match pw_deg {
        PiecewiseDegree::Linear => 2 * total_bkps + n,
        PiecewiseDegree::Quadratic => 3 * total_bkps + 2 * n,
    };
    let mut pw = vec![0.0; len];
    let mut idx = 0usize;

    match pw_deg {
        PiecewiseDegree::Quadratic => {
            for i in 0..n {
                let mut a = rng.gen_range(PW_DEG2_UNIF.0..PW_DEG2_UNIF.1);
                let mut b = rng.gen_range(PW_DEG1_UNIF.0..PW_DEG1_UNIF.1);
                pw[idx] = a;
                pw[idx + 1] = b;
                let mut lambda = rng.gen_range(PW_BKP_UNIF.0..PW_BKP_UNIF.1);
                for j in 0..bkp_nums[i] {
                    pw[idx + 2 + 3 * j] = lambda;
                    let l_grad = a * lambda - b;
                    let r_grad = l_grad + rng.gen_range(PW_INC_UNIF.0..PW_INC_UNIF.1);
                    a += rng.gen_range(PW_INC_UNIF.0..PW_INC_UNIF.1);
                    b = a * lambda - r_grad;
                    pw[idx + 2 + 3 * j + 1] = a;
                    pw[idx + 2 + 3 * j + 2] = b;
                    lambda += rng.gen_range(PW_INC_UNIF.0..PW_INC_UNIF.1);
                }
                idx += 3 * bkp_nums[i] + 2;
            }
        }
        PiecewiseDegree::Linear => {
            for i in 0..n {
                let mut b = rng.gen_range(PW_DEG1_UNIF.0..PW_DEG1_UNIF.1);
                pw[idx] = b;
                let mut lambda = rng.gen_range(PW_BKP_UNIF.0..PW_BKP_UNIF.1);
                for j in 0..bkp_nums[i] {
                    pw[idx + 1 + 2 * j] = lambda;
                    b += rng.gen_range(PW_INC_UNIF.0..PW_INC_UNIF.1);
                    if j >= bkp_nums[i] / 2 && b <= 0.0 {
                        b = 1.0;
                    }
                    pw[idx + 1 + 2 * j + 1] = b;
                    lambda += rng.gen_range(PW_INC_UNIF.0..PW_INC_UNIF.1);
                }
                idx += 2 * bkp_nums[i] + 1;
            }
        }
    }
    DVector::from_vec(pw)
}

/// Separation scales under a single target penalty `lambda`: either
/// uniform or sampled from `[0.5*lambda, 1.5*lambda]`.
pub fn fill_sep_uniform(rng: &mut impl Rng, n: usize, lambda: Floating, with_sample: bool) -> DVector<Floating> {
    let m = n.saturating_sub(1);
    if !with_sample {
        DVector::from_element(m, lambda)
    } else {
        DVector::from_iterator(m, (0..m).map(|_| rng.gen_range(0.5 * lambda..1.5 * lambda)))
    }
}

/// Separation scales sampled independently in `[0, 1]`.
pub fn fill_sep_weighted(rng: &mut impl Rng, n: usize) -> DVector<Floating> {
    let m = n.saturating_sub(1);
    DVector::from_iterator(m, (0..m).map(|_| rng.gen_range(PW_CSEP_UNIF.0..PW_CSEP_UNIF.1)))
}

fn gen_lp_lq_dev(rng: &mut impl Rng, n: usize, c_dev_one: bool) -> (DVector<Floating>, DVector<Floating>) {
    let a_dev = DVector::from_iterator(n, (0..n).map(|_| rng.gen_range(LPLQ_ADEV_UNIF.0..LPLQ_ADEV_UNIF.1)));
    let c_dev = if c_dev_one {
        DVector::from_element(n, 1.0)
    } else {
        DVector::from_iterator(n, (0..n).map(|_| rng.gen_range(LPLQ_CDEV_UNIF.0..LPLQ_CDEV_UNIF.1)))
    };
    (c_dev, a_dev)
}

/// Weighted LP-LQ instance: independent `c_sep[i]` in `[0, 1]`.
pub fn gen_lp_lq_funcs(rng: &mut impl Rng, n: usize, c_dev_one: bool) -> (DVector<Floating>, DVector<Floating>, DVector<Floating>) {
    let (c_dev, a_dev) = gen_lp_lq_dev(rng, n, c_dev_one);
    let c_sep = fill_sep_weighted(rng, n);
    (c_dev, a_dev, c_sep)
}

/// Non-weighted (or lightly resampled) LP-LQ instance pinned to a
/// single target penalty `lambda`.
pub fn gen_lp_lq_funcs_with_lambda(
    rng: &mut impl Rng,
    n: usize,
    lambda: Floating,
    resample: bool,
    c_dev_one: bool,
) -> (DVector<Floating>, DVector<Floating>, DVector<Floating>) {
    assert!(lambda >= 0.0);
    let (c_dev, a_dev) = gen_lp_lq_dev(rng, n, c_dev_one);
    let c_sep = fill_sep_uniform(rng, n, lambda, resample);
    (c_dev, a_dev, c_sep)
}

/// LP-LQ instance with a single penalty sampled once from `[lambda_lb, lambda_ub]`.
pub fn gen_lp_lq_funcs_with_lambda_range(
    rng: &mut impl Rng,
    n: usize,
    lambda_lb: Floating,
    lambda_ub: Floating,
    c_dev_one: bool,
) -> (DVector<Floating>, DVector<Floating>, DVector<Floating>) {
    assert!(lambda_lb >= 0.0 && lambda_lb < lambda_ub);
    let (c_dev, a_dev) = gen_lp_lq_dev(rng, n, c_dev_one);
    let lambda = rng.gen_range(lambda_lb..lambda_ub);
    let c_sep = DVector::from_element(n.saturating_sub(1), lambda);
    (c_dev, a_dev, c_sep)
}

/// Linear-L2 instance with a zero-sum deviation slope, required for
/// the closed-form graph-Laplacian solver to have a finite minimizer.
pub fn gen_linear_l2_funcs(rng: &mut impl Rng, n: usize) -> (DVector<Floating>, DVector<Floating>) {
    assert!(n >= 1);
    let mut c_dev = vec![0.0; n];
    let mut sum = 0.0;
    for c in c_dev.iter_mut().take(n - 1) {
        let v = rng.gen_range(-100.0..100.0);
        *c = v;
        sum += v;
    }
    c_dev[n - 1] = -sum;
    let c_sep = DVector::from_element(n.saturating_sub(1), 0.5);
    (DVector::from_vec(c_dev), c_sep)
}

/// Huber cutoffs scaled to the magnitude of each `baselines[i]`.
pub fn gen_huber_scales(rng: &mut impl Rng, baselines: &[Floating], l_ratio: Floating, r_ratio: Floating) -> DVector<Floating> {
    assert!(l_ratio > 0.0 && r_ratio > 0.0 && l_ratio < r_ratio);
    DVector::from_iterator(baselines.len(), baselines.iter().map(|b| rng.gen_range(l_ratio..r_ratio) * b.abs()))
}

/// The adversarial instance from Condat's worst-case analysis of taut-string
/// algorithms: a chain with unit deviation/separation scales and an anchor
/// sequence that forces maximal propagation.
pub fn condat_worst_case(n: usize) -> (DVector<Floating>, DVector<Floating>, DVector<Floating>) {
    assert!(n > 3);
    let alpha = 4.0 / ((n - 2) as Floating * (n - 3) as Floating);
    let c_dev = DVector::from_element(n, 1.0);
    let c_sep = DVector::from_element(n - 1, 1.0);
    let mut a_dev = vec![0.0; n];
    a_dev[0] = -2.0;
    for i in 2..=n - 1 {
        a_dev[i - 1] = alpha * (i - 2) as Floating;
    }
    a_dev[n - 1] = alpha * (n - 3) as Floating + 2.0;
    (c_dev, DVector::from_vec(a_dev), c_sep)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn pw_bkp_nums_uniform_is_constant() {
        let bkp_nums = gen_pw_bkp_nums_uniform(5, 3);
        assert_eq!(bkp_nums, vec![3, 3, 3, 3, 3]);
    }

    #[test]
    fn pw_funcs_buffer_has_expected_length() {
        let mut rng = StdRng::seed_from_u64(7);
        let bkp_nums = vec![2usize, 0, 3];
        let pw = gen_pw_funcs(&mut rng, PiecewiseDegree::Linear, &bkp_nums);
        assert_eq!(pw.len(), PiecewiseEval::stride(PiecewiseDegree::Linear, 2) + PiecewiseEval::stride(PiecewiseDegree::Linear, 0) + PiecewiseEval::stride(PiecewiseDegree::Linear, 3));
    }

    #[test]
    fn linear_l2_funcs_sum_to_zero() {
        let mut rng = StdRng::seed_from_u64(11);
        let (c_dev, c_sep) = gen_linear_l2_funcs(&mut rng, 6);
        assert_eq!(c_sep.len(), 5);
        let sum: Floating = c_dev.iter().sum();
        assert!(sum.abs() < 1e-9);
    }

    #[test]
    fn condat_worst_case_has_expected_anchors() {
        let (c_dev, a_dev, c_sep) = condat_worst_case(5);
        assert_eq!(c_dev.len(), 5);
        assert_eq!(c_sep.len(), 4);
        assert_eq!(a_dev[0], -2.0);
    }
}
