//! Bracket search on sorted grids.
//!
//! Every interpolation kernel locates its query with [`binary_search`].
//! The search never fails: queries outside the grid are clamped to the
//! first or last interval, and the caller extrapolates linearly from there.

use num_traits::Float;

/// Find the bracket index `j` such that `grid[j] <= xi <= grid[j + 1]`.
///
/// The result always lies in `[0, grid.len() - 2]`:
/// - `xi <= grid[0]` returns `0`
/// - `xi >= grid[N - 2]` returns `N - 2`
/// - otherwise interval halving finds the largest `j` with `grid[j] <= xi`
///
/// Runs in O(log N) comparisons without allocation. `grid` must be strictly
/// increasing with at least two points; this is only checked in debug builds.
///
/// # Example
///
/// ```
/// use egm_core::math::grid_search::binary_search;
///
/// let grid = [0.0, 1.0, 2.0, 3.0];
/// assert_eq!(binary_search(&grid, 1.5), 1);
/// assert_eq!(binary_search(&grid, -4.0), 0);
/// assert_eq!(binary_search(&grid, 10.0), 2);
/// ```
#[inline]
pub fn binary_search<T: Float>(grid: &[T], xi: T) -> usize {
    let n = grid.len();
    debug_assert!(n >= 2, "grid needs at least 2 points, got {}", n);

    if xi <= grid[0] {
        return 0;
    }
    if xi >= grid[n - 2] {
        return n - 2;
    }

    // Invariant: grid[imin] <= xi and imin + len <= n
    let mut imin = 0;
    let mut len = n;
    let mut half = len / 2;
    while half > 0 {
        let imid = imin + half;
        if grid[imid] <= xi {
            imin = imid;
        }
        len -= half;
        half = len / 2;
    }

    imin
}

/// Walk a known bracket forward until it contains `xi`.
///
/// Starting from bracket `j`, advances while `xi >= grid[j + 1]`, stopping at
/// the last interval `N - 2`. The bracket never moves backwards, so the
/// result is only correct when `xi` is not below `grid[j]`. Used for batches
/// of non-decreasing queries, where the amortised cost per query is O(1).
///
/// # Example
///
/// ```
/// use egm_core::math::grid_search::advance_bracket;
///
/// let grid = [0.0, 1.0, 2.0, 3.0];
/// assert_eq!(advance_bracket(&grid, 0, 2.5), 2);
/// assert_eq!(advance_bracket(&grid, 1, 1.2), 1);
/// assert_eq!(advance_bracket(&grid, 0, 99.0), 2);
/// ```
#[inline]
pub fn advance_bracket<T: Float>(grid: &[T], mut j: usize, xi: T) -> usize {
    let last = grid.len() - 2;
    while j < last && xi >= grid[j + 1] {
        j += 1;
    }
    j
}
