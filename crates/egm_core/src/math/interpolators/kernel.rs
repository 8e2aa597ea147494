//! Rank-generic multilinear kernel.
//!
//! All interpolation entry points funnel into [`interp_at`], which evaluates
//! the tensor-product interpolant once the per-axis brackets are known. The
//! rank `D` is a const generic, so the corner loop has a fixed trip count of
//! `2^D` and no runtime dispatch on dimensionality.

use crate::math::grid_search::binary_search;
use num_traits::Float;

/// Row-major strides of a value tensor laid out on `grids`.
///
/// The last axis is contiguous: `strides[D - 1] == 1`.
#[inline]
pub(crate) fn strides<T, const D: usize>(grids: &[&[T]; D]) -> [usize; D] {
    let mut strides = [1usize; D];
    for axis in (0..D.saturating_sub(1)).rev() {
        strides[axis] = strides[axis + 1] * grids[axis + 1].len();
    }
    strides
}

/// Number of elements a value tensor on `grids` must hold.
#[inline]
pub(crate) fn tensor_len<T, const D: usize>(grids: &[&[T]; D]) -> usize {
    grids.iter().map(|g| g.len()).product()
}

/// Locate the bracket of every coordinate of `xi`.
#[inline]
pub fn search<T: Float, const D: usize>(grids: [&[T]; D], xi: [T; D]) -> [usize; D] {
    let mut js = [0usize; D];
    for axis in 0..D {
        js[axis] = binary_search(grids[axis], xi[axis]);
    }
    js
}

/// Evaluate the multilinear interpolant at `xi` using known brackets `js`.
///
/// With `lo_i = grid_i[j_i + 1] - xi_i` and `hi_i = xi_i - grid_i[j_i]`, the
/// result is
///
/// ```text
/// sum over corners k in {0,1}^D of  prod_i (k_i == 0 ? lo_i : hi_i) * value[j + k]
/// ---------------------------------------------------------------------------------
///                     prod_i (grid_i[j_i + 1] - grid_i[j_i])
/// ```
///
/// Queries outside the grid extrapolate linearly from the boundary bracket.
///
/// # Preconditions
///
/// `value` is row-major on `grids`, every grid is strictly increasing and
/// `js[i] <= grids[i].len() - 2`. Violations are caught by debug assertions
/// only; in release builds the result is unspecified.
#[inline]
pub fn interp_at<T: Float, const D: usize>(
    grids: [&[T]; D],
    value: &[T],
    xi: [T; D],
    js: [usize; D],
) -> T {
    debug_assert_eq!(
        value.len(),
        tensor_len(&grids),
        "value array does not match grid shape"
    );

    let strides = strides(&grids);

    let mut lo = [T::zero(); D];
    let mut hi = [T::zero(); D];
    let mut denom = T::one();
    let mut base = 0;
    for axis in 0..D {
        let grid = grids[axis];
        let j = js[axis];
        debug_assert!(j + 1 < grid.len(), "bracket {} out of range on axis {}", j, axis);
        debug_assert!(
            grid[j + 1] > grid[j],
            "zero-width or inverted interval at index {} on axis {}",
            j,
            axis
        );

        lo[axis] = grid[j + 1] - xi[axis];
        hi[axis] = xi[axis] - grid[j];
        denom = denom * (grid[j + 1] - grid[j]);
        base += j * strides[axis];
    }

    // Corner bits run from axis 0 (most significant) to axis D-1
    let mut nom = T::zero();
    for corner in 0..(1usize << D) {
        let mut weight = T::one();
        let mut offset = base;
        for axis in 0..D {
            if (corner >> (D - 1 - axis)) & 1 == 0 {
                weight = weight * lo[axis];
            } else {
                weight = weight * hi[axis];
                offset += strides[axis];
            }
        }
        nom = nom + weight * value[offset];
    }

    nom / denom
}

/// Evaluate the multilinear interpolant at a single point.
///
/// # Example
///
/// ```
/// use egm_core::math::interpolators::interp;
///
/// let grid = [0.0, 1.0, 2.0, 3.0];
/// let value = [0.0, 1.0, 4.0, 9.0];
/// assert_eq!(interp([&grid[..]], &value, [1.5]), 2.5);
/// ```
#[inline]
pub fn interp<T: Float, const D: usize>(grids: [&[T]; D], value: &[T], xi: [T; D]) -> T {
    let js = search(grids, xi);
    interp_at(grids, value, xi, js)
}

/// Evaluate at a batch of points.
///
/// `xi[axis][i]` is coordinate `axis` of query `i`; `yi[i]` receives the
/// result. Each query is independent of the others.
#[inline]
pub fn interp_vec<T: Float, const D: usize>(
    grids: [&[T]; D],
    value: &[T],
    xi: [&[T]; D],
    yi: &mut [T],
) {
    debug_assert!(
        xi.iter().all(|x| x.len() == yi.len()),
        "query and output lengths differ"
    );

    for (i, y) in yi.iter_mut().enumerate() {
        let mut point = [T::zero(); D];
        for axis in 0..D {
            point[axis] = xi[axis][i];
        }
        *y = interp(grids, value, point);
    }
}

/// Evaluate at a point and record the brackets found in `js`.
///
/// A later call to [`interp_from_rep`] with the same `js` skips the search.
#[inline]
pub fn interp_to_rep<T: Float, const D: usize>(
    js: &mut [usize; D],
    grids: [&[T]; D],
    value: &[T],
    xi: [T; D],
) -> T {
    *js = search(grids, xi);
    interp_at(grids, value, xi, *js)
}

/// Evaluate at a point with brackets previously stored by [`interp_to_rep`].
///
/// `xi` need not be the point that produced `js`; if it lies in a different
/// cell the result is the linear extension of the recorded cell.
#[inline]
pub fn interp_from_rep<T: Float, const D: usize>(
    js: &[usize; D],
    grids: [&[T]; D],
    value: &[T],
    xi: [T; D],
) -> T {
    interp_at(grids, value, xi, *js)
}
