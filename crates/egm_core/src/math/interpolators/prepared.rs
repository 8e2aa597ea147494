//! Prepared evaluation when only the last coordinate varies.
//!
//! Inner loops of a consumption-saving solver often evaluate a policy or
//! value array at thousands of points that share every coordinate except the
//! last (for example, all cash-on-hand nodes for one permanent-income and
//! one shock value). [`prep`] searches the shared axes once; the
//! `only_last*` functions then search, walk, or reuse the last-axis brackets
//! only.
//!
//! # Search modes
//!
//! | mode | last-axis brackets | precondition |
//! |------|--------------------|--------------|
//! | [`LastDimSearch::Binary`] | binary search per query | none |
//! | [`LastDimSearch::Monotone`] | search first query, then walk forward | queries non-decreasing |
//! | [`LastDimSearch::FromRep`] | reused from [`PrepState::last`] | brackets filled by an earlier call or by the caller |
//!
//! The monotone precondition is the caller's responsibility. It is checked
//! with a debug assertion only; unsorted input yields wrong brackets in
//! release builds, never a panic.
//!
//! Results are bit-identical to [`interp`](super::interp) at the same
//! brackets, because every path ends in the same kernel.

use super::kernel::interp_at;
use crate::math::grid_search::{advance_bracket, binary_search};
use num_traits::Float;

/// How last-axis brackets are obtained by [`only_last_vec`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum LastDimSearch {
    /// Independent binary search for every query.
    #[default]
    Binary,
    /// Binary search for the first query, forward walk for the rest.
    Monotone,
    /// No search; use the brackets already stored in the state.
    FromRep,
}

/// Search state for a batch that shares `S` leading coordinates.
///
/// `shared` holds the brackets of the leading axes, found once by [`prep`].
/// `last` holds one last-axis bracket per query and is rewritten by every
/// searching call to [`only_last_vec`]. The state is tied to the grids it
/// was built from; rebuild it when they change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrepState<const S: usize> {
    shared: [usize; S],
    last: Vec<usize>,
}

impl<const S: usize> PrepState<S> {
    /// Build a state from known brackets.
    ///
    /// Useful with [`LastDimSearch::FromRep`] when the caller already knows
    /// where every query falls.
    pub fn with_last(shared: [usize; S], last: Vec<usize>) -> Self {
        Self { shared, last }
    }

    /// Brackets of the shared leading axes.
    #[inline]
    pub fn shared(&self) -> &[usize; S] {
        &self.shared
    }

    /// Per-query brackets on the last axis.
    #[inline]
    pub fn last(&self) -> &[usize] {
        &self.last
    }

    /// Mutable access to the per-query brackets.
    #[inline]
    pub fn last_mut(&mut self) -> &mut [usize] {
        &mut self.last
    }

    /// Number of queries the state was sized for.
    #[inline]
    pub fn len(&self) -> usize {
        self.last.len()
    }

    /// Returns true if the state holds no queries.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.last.is_empty()
    }
}

/// Search the shared leading axes once and size the state for `n` queries.
///
/// `grids` and `xi` are the leading `S` axes of the full `S + 1` rank grid.
/// This is the only allocation on the prepared path.
///
/// # Example
///
/// ```
/// use egm_core::math::interpolators::{only_last_vec, prep, LastDimSearch};
///
/// let g1 = [0.0, 1.0, 2.0];
/// let g2 = [0.0, 1.0, 2.0, 3.0];
/// // value[i1 * 4 + i2] = i1 + i2
/// let value: Vec<f64> = (0..12).map(|k| (k / 4 + k % 4) as f64).collect();
///
/// let xs = [0.5, 1.0, 2.5];
/// let mut state = prep([&g1[..]], [1.5], xs.len());
/// let mut yi = [0.0; 3];
/// only_last_vec(&mut state, [&g1[..], &g2[..]], &value, [1.5], &xs, &mut yi, LastDimSearch::Monotone);
///
/// assert_eq!(yi, [2.0, 2.5, 4.0]);
/// ```
pub fn prep<T: Float, const S: usize>(grids: [&[T]; S], xi: [T; S], n: usize) -> PrepState<S> {
    let mut shared = [0usize; S];
    for axis in 0..S {
        shared[axis] = binary_search(grids[axis], xi[axis]);
    }
    PrepState {
        shared,
        last: vec![0; n],
    }
}

/// Evaluate one point, searching only the last axis.
///
/// The leading coordinates of `xi` must be the ones `state` was prepared
/// for. `state.last` is not touched.
#[inline]
pub fn only_last<T: Float, const S: usize, const D: usize>(
    state: &PrepState<S>,
    grids: [&[T]; D],
    value: &[T],
    xi: [T; D],
) -> T {
    assert_eq!(S + 1, D, "prepared state must cover all but the last axis");

    let mut js = [0usize; D];
    js[..S].copy_from_slice(&state.shared);
    js[D - 1] = binary_search(grids[D - 1], xi[D - 1]);

    interp_at(grids, value, xi, js)
}

/// Evaluate a batch that varies only in the last coordinate.
///
/// `shared_xi` are the leading coordinates `state` was prepared for,
/// `xi_last[i]` is the last coordinate of query `i` and `yi[i]` receives
/// its value. Brackets on the last axis are produced according to `search`
/// and stored in `state.last` so a later call can use
/// [`LastDimSearch::FromRep`].
///
/// Allocation-free.
pub fn only_last_vec<T: Float, const S: usize, const D: usize>(
    state: &mut PrepState<S>,
    grids: [&[T]; D],
    value: &[T],
    shared_xi: [T; S],
    xi_last: &[T],
    yi: &mut [T],
    search: LastDimSearch,
) {
    assert_eq!(S + 1, D, "prepared state must cover all but the last axis");
    debug_assert_eq!(xi_last.len(), yi.len(), "query and output lengths differ");
    debug_assert_eq!(state.last.len(), yi.len(), "state sized for a different batch");

    let grid_last = grids[D - 1];
    let n = yi.len();

    match search {
        LastDimSearch::Binary => {
            for (j, &x) in state.last[..n].iter_mut().zip(xi_last) {
                *j = binary_search(grid_last, x);
            }
        }
        LastDimSearch::Monotone => {
            debug_assert!(
                xi_last.windows(2).all(|w| w[0] <= w[1]),
                "monotone search requires non-decreasing last-axis queries"
            );
            let mut j = 0;
            for (i, &x) in xi_last[..n].iter().enumerate() {
                j = if i == 0 {
                    binary_search(grid_last, x)
                } else {
                    advance_bracket(grid_last, j, x)
                };
                state.last[i] = j;
            }
        }
        LastDimSearch::FromRep => {
            debug_assert!(
                state.last[..n].iter().all(|&j| j + 1 < grid_last.len()),
                "stored bracket out of range"
            );
        }
    }

    let mut js = [0usize; D];
    js[..S].copy_from_slice(&state.shared);
    let mut xi = [T::zero(); D];
    xi[..S].copy_from_slice(&shared_xi);

    for (i, y) in yi.iter_mut().enumerate() {
        js[D - 1] = state.last[i];
        xi[D - 1] = xi_last[i];
        *y = interp_at(grids, value, xi, js);
    }
}
