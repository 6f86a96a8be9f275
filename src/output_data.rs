use super::*;

/// Inclusive divergence bound `[lo, hi]` proved so far for one chain index
/// Narrows monotonically over the life of
/// one `solve` call; never widens.
pub type Bounds = (Floating, Floating);

/// Per-`solve`-call workspace. Owned exclusively by the
/// invocation that mutates it; never shared between concurrent solves.
#[derive(derive_getters::Getters, Debug, Clone)]
pub struct OutputData {
    n: usize,
    x: DVector<Floating>,
    obj_val: Floating,
    bounds: Vec<Bounds>,
    st_index: usize,
}

impl OutputData {
    /// Allocates a fresh workspace for `input`, with every bound set to
    /// `[input.lb(), input.ub()]` and `x` initialised to zero. Sizes
    /// every buffer up front so a `solve` that returns early never needs
    /// to grow anything.
    pub fn new(input: &InputData) -> Self {
        let n = *input.n();
        Self {
            n,
            x: DVector::zeros(n),
            obj_val: 0.0,
            bounds: vec![(input.lb(), input.ub()); n],
            st_index: 0,
        }
    }

    /// Resets `x` to zero and every bound to `[input.lb(), input.ub()]`,
    /// so that calling `solve` twice on a freshly reset output yields the
    /// same `x` up to `sol_esp`.
    pub fn reset(&mut self, input: &InputData) {
        self.x.fill(0.0);
        self.obj_val = 0.0;
        for b in self.bounds.iter_mut() {
            *b = (input.lb(), input.ub());
        }
        self.st_index = 0;
    }

    pub fn x_mut(&mut self) -> &mut DVector<Floating> {
        &mut self.x
    }

    pub fn bounds_mut(&mut self) -> &mut Vec<Bounds> {
        &mut self.bounds
    }

    pub fn st_index_mut(&mut self) -> &mut usize {
        &mut self.st_index
    }

    pub fn set_obj_val(&mut self, v: Floating) {
        self.obj_val = v;
    }

    pub fn bound(&self, i: usize) -> Bounds {
        self.bounds[i]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn initialises_bounds_from_input() {
        let input = InputData::builder(3, 2, 1)
            .c_dev(DVector::from_vec(vec![1.0, 1.0, 1.0]))
            .a_dev(DVector::zeros(3))
            .c_sep(DVector::from_vec(vec![1.0, 1.0]))
            .build()
            .unwrap();
        let output = OutputData::new(&input);
        assert_eq!(output.bound(0), (input.lb(), input.ub()));
        assert_eq!(*output.x(), DVector::zeros(3));
    }
}
