use super::*;

/// Locates the active piece of a convex piecewise deviation function and
/// evaluates its right sub-gradient.
///
/// `st_index` is the offset into `pw` of the start of this function's
/// block (intercept entries included); `bkp_num` is its breakpoint count.
pub struct PiecewiseEval;

impl PiecewiseEval {
    /// Number of `Floating` entries one deviation function with `bkp_num`
    /// breakpoints occupies in the flat `pw` buffer.
    pub fn stride(pw_deg: PiecewiseDegree, bkp_num: usize) -> usize {
        pw_deg.block_len() * bkp_num + pw_deg.intercept_len()
    }

    /// Binary search over the `bkp_num` breakpoints of the function
    /// starting at `st_index`, returning the piece index `j` in
    /// `[0, bkp_num]` such that `x` lies in `[lambda_{j-1}, lambda_j)`
    /// (right-continuous: `x` equal to a breakpoint belongs to the piece
    /// starting there). Total: `bkp_num == 0` returns `0`.
    pub fn locate_piece(
        pw: &DVector<Floating>,
        pw_deg: PiecewiseDegree,
        bkp_num: usize,
        st_index: usize,
        x: Floating,
    ) -> usize {
        if bkp_num == 0 {
            return 0;
        }
        let lambda = |mid: usize| -> Floating {
            pw[st_index + pw_deg.intercept_len() + pw_deg.block_len() * mid]
        };
        let mut head = 0usize;
        let mut tail = bkp_num;
        while head < tail {
            let mid = (head + tail) / 2;
            if x < lambda(mid) {
                if mid == 0 || x >= lambda(mid - 1) {
                    return mid;
                }
                tail = mid;
            } else {
                if mid == bkp_num - 1 || x < lambda(mid + 1) {
                    return mid + 1;
                }
                head = mid + 1;
            }
        }
        head
    }

    /// `true` when `piece_index` is a valid piece for `x` under the
    /// function at `st_index` — used in `debug_assert!`s, mirroring the
    /// original `pwValid` sanity check.
    pub fn piece_valid(
        pw: &DVector<Floating>,
        pw_deg: PiecewiseDegree,
        bkp_num: usize,
        st_index: usize,
        x: Floating,
        piece_index: usize,
    ) -> bool {
        let in_range = piece_index <= bkp_num;
        if !in_range {
            return false;
        }
        if bkp_num == 0 {
            return true;
        }
        let lambda = |j: usize| -> Floating {
            pw[st_index + pw_deg.intercept_len() + pw_deg.block_len() * j]
        };
        if piece_index == 0 {
            x < lambda(0)
        } else if piece_index == bkp_num {
            x >= lambda(piece_index - 1)
        } else {
            x >= lambda(piece_index - 1) && x < lambda(piece_index)
        }
    }

    /// Leading coefficient `a_j` and secondary coefficients
    /// `b_{j,1..pw_deg-1}` of piece `piece_index`, as a slice of length
    /// `pw_deg`.
    pub fn piece_coeffs(
        pw: &DVector<Floating>,
        pw_deg: PiecewiseDegree,
        st_index: usize,
        piece_index: usize,
    ) -> &[Floating] {
        let start = st_index + pw_deg.block_len() * piece_index;
        let deg = pw_deg.intercept_len();
        &pw.as_slice()[start..start + deg]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn locates_with_no_breakpoints() {
        let pw = DVector::from_vec(vec![3.0]);
        assert_eq!(
            PiecewiseEval::locate_piece(&pw, PiecewiseDegree::Linear, 0, 0, 42.0),
            0
        );
    }

    #[test]
    fn right_continuous_at_breakpoint() {
        // degree 1, 2 breakpoints: [b0, (l1,b1), (l2,b2)]
        let pw = DVector::from_vec(vec![-5.0, -1.0, 5.0, 1.0, 3.0]);
        assert_eq!(
            PiecewiseEval::locate_piece(&pw, PiecewiseDegree::Linear, 2, 0, -1.0),
            1
        );
        assert_eq!(
            PiecewiseEval::locate_piece(&pw, PiecewiseDegree::Linear, 2, 0, -1.5),
            0
        );
        assert_eq!(
            PiecewiseEval::locate_piece(&pw, PiecewiseDegree::Linear, 2, 0, 1.0),
            2
        );
        assert_eq!(
            PiecewiseEval::locate_piece(&pw, PiecewiseDegree::Linear, 2, 0, 100.0),
            2
        );
    }

    #[test]
    fn stride_matches_layout() {
        assert_eq!(PiecewiseEval::stride(PiecewiseDegree::Linear, 2), 5);
        assert_eq!(PiecewiseEval::stride(PiecewiseDegree::Quadratic, 2), 8);
    }
}
