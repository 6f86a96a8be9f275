use super::*;

/// A chain-structured GTV problem instance. Immutable once
/// built; lives for the duration of one `solve`/`fast_*` call and can be
/// shared across threads, each of which should solve into its own
/// `OutputData`.
#[derive(derive_getters::Getters, Debug, Clone)]
pub struct InputData {
    n: usize,
    deviation_type: DeviationType,
    separation_type: SeparationType,
    p: i32,
    q: i32,
    c_dev: DVector<Floating>,
    a_dev: DVector<Floating>,
    c_sep: DVector<Floating>,
    huber_d: DVector<Floating>,
    huber_s: DVector<Floating>,
    pw_deg: Option<PiecewiseDegree>,
    bkp_nums: Vec<usize>,
    pw: DVector<Floating>,
    config: SolverConfig,
}

impl InputData {
    pub fn sol_esp(&self) -> Floating {
        *self.config.sol_esp()
    }
    pub fn drvt_esp(&self) -> Floating {
        *self.config.drvt_esp()
    }
    pub fn infinity(&self) -> Floating {
        *self.config.infinity()
    }
    pub fn lb(&self) -> Floating {
        *self.config.lb()
    }
    pub fn ub(&self) -> Floating {
        *self.config.ub()
    }

    /// Offset into `pw` of the start of deviation function `index`'s
    /// block, computed from `bkp_nums` (used by callers that need to
    /// seek without walking the chain, e.g. tests and the generator).
    pub fn pw_start(&self, index: usize) -> usize {
        let pw_deg = self.pw_deg.expect("pw_start requires piecewise deviation");
        self.bkp_nums[..index]
            .iter()
            .map(|&k| PiecewiseEval::stride(pw_deg, k))
            .sum()
    }

    /// Builder entry point.
    pub fn builder(n: usize, p: i32, q: i32) -> InputDataBuilder {
        InputDataBuilder::new(n, p, q)
    }
}

/// Builder for [`InputData`] (teacher-crate convention: fluent setters
/// over zeroed defaults, finished by a fallible `build`).
#[derive(Debug, Clone)]
pub struct InputDataBuilder {
    n: usize,
    deviation_type: DeviationType,
    separation_type: SeparationType,
    p: i32,
    q: i32,
    c_dev: DVector<Floating>,
    a_dev: DVector<Floating>,
    c_sep: DVector<Floating>,
    huber_d: DVector<Floating>,
    huber_s: DVector<Floating>,
    pw_deg: Option<PiecewiseDegree>,
    bkp_nums: Vec<usize>,
    pw: DVector<Floating>,
    config: SolverConfig,
}

impl InputDataBuilder {
    pub fn new(n: usize, p: i32, q: i32) -> Self {
        let n_sep = n.saturating_sub(1);
        Self {
            n,
            deviation_type: DeviationType::Lp,
            separation_type: SeparationType::Lq,
            p,
            q,
            c_dev: DVector::zeros(n),
            a_dev: DVector::zeros(n),
            c_sep: DVector::zeros(n_sep),
            huber_d: DVector::zeros(n),
            huber_s: DVector::zeros(n_sep),
            pw_deg: None,
            bkp_nums: vec![0; n],
            pw: DVector::zeros(0),
            config: SolverConfig::default(),
        }
    }

    pub fn deviation_type(mut self, t: DeviationType) -> Self {
        self.deviation_type = t;
        self
    }

    pub fn separation_type(mut self, t: SeparationType) -> Self {
        self.separation_type = t;
        self
    }

    pub fn c_dev(mut self, v: DVector<Floating>) -> Self {
        self.c_dev = v;
        self
    }

    pub fn a_dev(mut self, v: DVector<Floating>) -> Self {
        self.a_dev = v;
        self
    }

    pub fn c_sep(mut self, v: DVector<Floating>) -> Self {
        self.c_sep = v;
        self
    }

    /// Switches on Huber deviation with the given per-index cutoffs.
    pub fn huber_d(mut self, cutoffs: DVector<Floating>) -> Self {
        self.deviation_type = DeviationType::HuberD;
        self.huber_d = cutoffs;
        self
    }

    /// Switches on Huber separation with the given per-edge cutoffs.
    pub fn huber_s(mut self, cutoffs: DVector<Floating>) -> Self {
        self.separation_type = SeparationType::HuberS;
        self.huber_s = cutoffs;
        self
    }

    /// Switches on a piecewise deviation function, fixing `p = pw_deg`
    /// and `q = 1` (piecewise deviation is only defined in combination
    /// with L1 separation).
    pub fn piecewise(mut self, pw_deg: PiecewiseDegree, bkp_nums: Vec<usize>, pw: DVector<Floating>) -> Self {
        self.deviation_type = DeviationType::PiecewiseLp;
        self.p = pw_deg.as_i32();
        self.q = 1;
        self.pw_deg = Some(pw_deg);
        self.bkp_nums = bkp_nums;
        self.pw = pw;
        self
    }

    pub fn config(mut self, config: SolverConfig) -> Self {
        self.config = config;
        self
    }

    pub fn build(self) -> Result<InputData, GtvError> {
        if let Err(e) = self.validate() {
            error!(target: "gtv::input_data", error = %e, "rejected InputData");
            return Err(e);
        }
        Ok(InputData {
            n: self.n,
            deviation_type: self.deviation_type,
            separation_type: self.separation_type,
            p: self.p,
            q: self.q,
            c_dev: self.c_dev,
            a_dev: self.a_dev,
            c_sep: self.c_sep,
            huber_d: self.huber_d,
            huber_s: self.huber_s,
            pw_deg: self.pw_deg,
            bkp_nums: self.bkp_nums,
            pw: self.pw,
            config: self.config,
        })
    }

    fn validate(&self) -> Result<(), GtvError> {
        if self.n < 1 {
            return Err(GtvError::EmptyChain(self.n));
        }
        if self.p < 1 {
            return Err(GtvError::NonPositiveExponent(self.p));
        }
        if self.q < 1 {
            return Err(GtvError::NonPositiveExponent(self.q));
        }
        let n_sep = self.n.saturating_sub(1);
        check_len("c_dev", self.c_dev.len(), self.n)?;
        check_len("a_dev", self.a_dev.len(), self.n)?;
        check_len("c_sep", self.c_sep.len(), n_sep)?;

        for (i, &c) in self.c_dev.iter().enumerate() {
            if c < 0.0 {
                return Err(GtvError::NegativeDeviationScale { index: i, value: c });
            }
        }
        for (i, &c) in self.c_sep.iter().enumerate() {
            if c < 0.0 {
                return Err(GtvError::NegativeSeparationScale { index: i, value: c });
            }
        }

        if self.deviation_type == DeviationType::HuberD {
            check_len("huber_d", self.huber_d.len(), self.n)?;
            for (i, &d) in self.huber_d.iter().enumerate() {
                if d <= 0.0 {
                    return Err(GtvError::NonPositiveHuberCutoff { index: i, value: d });
                }
            }
        }
        if self.separation_type == SeparationType::HuberS {
            check_len("huber_s", self.huber_s.len(), n_sep)?;
            for (i, &d) in self.huber_s.iter().enumerate() {
                if d <= 0.0 {
                    return Err(GtvError::NonPositiveHuberCutoff { index: i, value: d });
                }
            }
        }

        if self.deviation_type == DeviationType::PiecewiseLp {
            let pw_deg = self
                .pw_deg
                .ok_or(GtvError::InvalidPiecewiseDegree(0))?;
            check_len("bkp_nums", self.bkp_nums.len(), self.n)?;
            let expected_pw_len: usize = self
                .bkp_nums
                .iter()
                .map(|&k| PiecewiseEval::stride(pw_deg, k))
                .sum();
            check_len("pw", self.pw.len(), expected_pw_len)?;
            self.validate_piecewise_convexity(pw_deg)?;
        }

        Ok(())
    }

    fn validate_piecewise_convexity(&self, pw_deg: PiecewiseDegree) -> Result<(), GtvError> {
        let mut st_index = 0usize;
        for (i, &bkp_num) in self.bkp_nums.iter().enumerate() {
            if bkp_num > 0 {
                let lambda = |j: usize| -> Floating {
                    self.pw[st_index + pw_deg.intercept_len() + pw_deg.block_len() * j]
                };
                let right_subgrad_at = |piece: usize, x: Floating| -> Floating {
                    let coeffs = PiecewiseEval::piece_coeffs(&self.pw, pw_deg, st_index, piece);
                    let deg = pw_deg.as_i32();
                    let mut v = coeffs[0] * pow_conv(x, deg - 1);
                    for (k, &b) in coeffs.iter().enumerate().skip(1) {
                        v -= b * pow_conv(x, deg - k as i32 - 1);
                    }
                    v
                };

                if pw_deg == PiecewiseDegree::Quadratic {
                    for piece in 0..=bkp_num {
                        let coeffs = PiecewiseEval::piece_coeffs(&self.pw, pw_deg, st_index, piece);
                        if coeffs[0] < 0.0 {
                            return Err(GtvError::NonConvexPiecewise { index: i });
                        }
                    }
                }

                for j in 0..bkp_num {
                    if j > 0 && lambda(j) <= lambda(j - 1) {
                        return Err(GtvError::NonConvexPiecewise { index: i });
                    }
                    let left = right_subgrad_at(j, lambda(j));
                    let right = right_subgrad_at(j + 1, lambda(j));
                    if right < left {
                        return Err(GtvError::NonConvexPiecewise { index: i });
                    }
                }

                // Bounded minimum: the last piece must eventually grow.
                let probe = lambda(bkp_num - 1) + 1.0;
                if right_subgrad_at(bkp_num, probe) <= 0.0 {
                    return Err(GtvError::NonConvexPiecewise { index: i });
                }
            }
            st_index += PiecewiseEval::stride(pw_deg, bkp_num);
        }
        Ok(())
    }
}

fn check_len(name: &'static str, actual: usize, expected: usize) -> Result<(), GtvError> {
    if actual != expected {
        return Err(GtvError::BufferLengthMismatch {
            name,
            expected,
            actual,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_empty_chain() {
        let err = InputData::builder(0, 2, 1).build().unwrap_err();
        assert_eq!(err, GtvError::EmptyChain(0));
    }

    #[test]
    fn rejects_negative_deviation_scale() {
        let err = InputData::builder(2, 2, 1)
            .c_dev(DVector::from_vec(vec![-1.0, 1.0]))
            .build()
            .unwrap_err();
        assert_eq!(
            err,
            GtvError::NegativeDeviationScale { index: 0, value: -1.0 }
        );
    }

    #[test]
    fn accepts_minimal_lp_lq() {
        let input = InputData::builder(3, 2, 1)
            .c_dev(DVector::from_vec(vec![1.0, 1.0, 1.0]))
            .a_dev(DVector::from_vec(vec![0.0, 10.0, 0.0]))
            .c_sep(DVector::from_vec(vec![100.0, 100.0]))
            .build()
            .unwrap();
        assert_eq!(*input.n(), 3);
    }

    #[test]
    fn rejects_quadratic_piece_with_negative_leading_coefficient() {
        // 3 pieces over breakpoints lambda=[0, 10]: (a0=1,b0=0), (a1=-0.8,b1=-5),
        // (a2=1,b2=10). Both boundary sub-gradient comparisons pass
        // (g0(0)=0 <= g1(0)=5, g1(10)=-3 <= g2(10)=0) and the tail probe at
        // lambda+1=11 is positive (g2(11)=1), but piece 1's negative leading
        // coefficient makes its sub-gradient decrease across its own interval
        // (5 -> -3), so the function isn't convex.
        let pw = DVector::from_vec(vec![1.0, 0.0, 0.0, -0.8, -5.0, 10.0, 1.0, 10.0]);
        let err = InputData::builder(1, 2, 1)
            .piecewise(PiecewiseDegree::Quadratic, vec![2], pw)
            .build()
            .unwrap_err();
        assert_eq!(err, GtvError::NonConvexPiecewise { index: 0 });
    }

    #[test]
    fn rejects_huber_with_nonpositive_cutoff() {
        let err = InputData::builder(2, 2, 1)
            .huber_d(DVector::from_vec(vec![0.0, 1.0]))
            .build()
            .unwrap_err();
        assert_eq!(
            err,
            GtvError::NonPositiveHuberCutoff { index: 0, value: 0.0 }
        );
    }
}
