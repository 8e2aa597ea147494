//! Multilinear interpolation on rectangular grids.
//!
//! This module provides tensor-product linear interpolation in any rank,
//! with fixed-arity wrappers for 1 to 5 dimensions, batched evaluation,
//! bracket reuse and prepared evaluation when only the last coordinate
//! varies.
//!
//! ## Layout
//!
//! Grids are borrowed slices, each strictly increasing with at least two
//! points. Values are a flat row-major tensor: the value at node
//! `(i_1, ..., i_D)` sits at `i_1 * N_2 * ... * N_D + ... + i_D`, so the
//! last axis is contiguous.
//!
//! ## Available Functions
//!
//! - [`interp`] / [`interp_vec`]: Rank-generic point and batch evaluation
//! - [`interp_1d`] .. [`interp_5d`] and their `_vec` forms: Fixed-arity wrappers
//! - [`interp_to_rep`] / [`interp_from_rep`]: Record and reuse brackets
//! - [`prep`], [`only_last`], [`only_last_vec`]: Prepared evaluation along the last axis
//! - [`MultilinearInterpolator`]: Validated facade returning [`InterpolationError`](crate::types::InterpolationError)
//!
//! The free functions check their preconditions with debug assertions only;
//! they return a value for any input and extrapolate linearly outside the
//! grid. Use [`MultilinearInterpolator`] when inputs come from outside the
//! program.
//!
//! ## Example
//!
//! ```
//! use egm_core::math::interpolators::{interp_1d, interp_2d};
//!
//! let grid = [0.0, 1.0, 2.0, 3.0];
//! let value = [0.0, 1.0, 4.0, 9.0];
//! assert_eq!(interp_1d(&grid, &value, 1.5), 2.5);
//!
//! let g1 = [0.0, 1.0];
//! let g2 = [0.0, 1.0];
//! let v = [0.0, 1.0, 1.0, 2.0];
//! assert_eq!(interp_2d(&g1, &g2, &v, 0.5, 0.5), 1.0);
//! ```

mod kernel;
mod multilinear;
mod points;
mod prepared;

// Re-export public items at module level
pub use kernel::{interp, interp_at, interp_from_rep, interp_to_rep, interp_vec, search};
pub use multilinear::{validate_grid, MultilinearInterpolator};
pub use points::{
    interp_1d, interp_1d_vec, interp_2d, interp_2d_vec, interp_3d, interp_3d_vec, interp_4d,
    interp_4d_vec, interp_5d, interp_5d_vec,
};
pub use prepared::{only_last, only_last_vec, prep, LastDimSearch, PrepState};
