//! Rank-specific entry points for one-point and batched evaluation.
//!
//! These are thin positional wrappers over the generic kernel, for call
//! sites that know their rank and hold each grid in its own variable.
//! Value arrays are row-major with the last axis contiguous.

use super::kernel::{interp, interp_vec};
use num_traits::Float;

/// Linear interpolation on a 1D grid.
///
/// # Example
///
/// ```
/// use egm_core::math::interpolators::interp_1d;
///
/// let grid = [0.0, 1.0, 2.0, 3.0];
/// let value = [0.0, 1.0, 4.0, 9.0];
/// assert_eq!(interp_1d(&grid, &value, 1.5), 2.5);
/// ```
#[inline]
pub fn interp_1d<T: Float>(grid1: &[T], value: &[T], xi1: T) -> T {
    interp([grid1], value, [xi1])
}

/// Bilinear interpolation; `value[i1 * n2 + i2]`.
///
/// # Example
///
/// ```
/// use egm_core::math::interpolators::interp_2d;
///
/// let grid = [0.0, 1.0];
/// let value = [0.0, 1.0, 1.0, 2.0];
/// assert_eq!(interp_2d(&grid, &grid, &value, 0.5, 0.5), 1.0);
/// ```
#[inline]
pub fn interp_2d<T: Float>(grid1: &[T], grid2: &[T], value: &[T], xi1: T, xi2: T) -> T {
    interp([grid1, grid2], value, [xi1, xi2])
}

/// Trilinear interpolation.
#[inline]
pub fn interp_3d<T: Float>(
    grid1: &[T],
    grid2: &[T],
    grid3: &[T],
    value: &[T],
    xi1: T,
    xi2: T,
    xi3: T,
) -> T {
    interp([grid1, grid2, grid3], value, [xi1, xi2, xi3])
}

/// 4D multilinear interpolation.
#[inline]
#[allow(clippy::too_many_arguments)]
pub fn interp_4d<T: Float>(
    grid1: &[T],
    grid2: &[T],
    grid3: &[T],
    grid4: &[T],
    value: &[T],
    xi1: T,
    xi2: T,
    xi3: T,
    xi4: T,
) -> T {
    interp([grid1, grid2, grid3, grid4], value, [xi1, xi2, xi3, xi4])
}

/// 5D multilinear interpolation.
#[inline]
#[allow(clippy::too_many_arguments)]
pub fn interp_5d<T: Float>(
    grid1: &[T],
    grid2: &[T],
    grid3: &[T],
    grid4: &[T],
    grid5: &[T],
    value: &[T],
    xi1: T,
    xi2: T,
    xi3: T,
    xi4: T,
    xi5: T,
) -> T {
    interp(
        [grid1, grid2, grid3, grid4, grid5],
        value,
        [xi1, xi2, xi3, xi4, xi5],
    )
}

/// Linear interpolation at each element of `xi1`.
#[inline]
pub fn interp_1d_vec<T: Float>(grid1: &[T], value: &[T], xi1: &[T], yi: &mut [T]) {
    interp_vec([grid1], value, [xi1], yi)
}

/// Bilinear interpolation at the points `(xi1[i], xi2[i])`.
#[inline]
pub fn interp_2d_vec<T: Float>(
    grid1: &[T],
    grid2: &[T],
    value: &[T],
    xi1: &[T],
    xi2: &[T],
    yi: &mut [T],
) {
    interp_vec([grid1, grid2], value, [xi1, xi2], yi)
}

/// Trilinear interpolation at the points `(xi1[i], xi2[i], xi3[i])`.
#[inline]
#[allow(clippy::too_many_arguments)]
pub fn interp_3d_vec<T: Float>(
    grid1: &[T],
    grid2: &[T],
    grid3: &[T],
    value: &[T],
    xi1: &[T],
    xi2: &[T],
    xi3: &[T],
    yi: &mut [T],
) {
    interp_vec([grid1, grid2, grid3], value, [xi1, xi2, xi3], yi)
}

/// 4D multilinear interpolation at the points `(xi1[i], .., xi4[i])`.
#[inline]
#[allow(clippy::too_many_arguments)]
pub fn interp_4d_vec<T: Float>(
    grid1: &[T],
    grid2: &[T],
    grid3: &[T],
    grid4: &[T],
    value: &[T],
    xi1: &[T],
    xi2: &[T],
    xi3: &[T],
    xi4: &[T],
    yi: &mut [T],
) {
    interp_vec(
        [grid1, grid2, grid3, grid4],
        value,
        [xi1, xi2, xi3, xi4],
        yi,
    )
}

/// 5D multilinear interpolation at the points `(xi1[i], .., xi5[i])`.
#[inline]
#[allow(clippy::too_many_arguments)]
pub fn interp_5d_vec<T: Float>(
    grid1: &[T],
    grid2: &[T],
    grid3: &[T],
    grid4: &[T],
    grid5: &[T],
    value: &[T],
    xi1: &[T],
    xi2: &[T],
    xi3: &[T],
    xi4: &[T],
    xi5: &[T],
    yi: &mut [T],
) {
    interp_vec(
        [grid1, grid2, grid3, grid4, grid5],
        value,
        [xi1, xi2, xi3, xi4, xi5],
        yi,
    )
}
