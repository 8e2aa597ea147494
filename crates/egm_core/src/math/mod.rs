//! Numerical kernels for EGM solvers.
//!
//! - [`grid_search`]: Clamped bracket search on sorted grids
//! - [`interpolators`]: Multilinear interpolation in 1 to 5 dimensions
//! - [`upper_envelope`]: Non-convex upper envelope of EGM segments
//! - [`grids`]: Constructors for non-uniform grids

pub mod grid_search;
pub mod grids;
pub mod interpolators;
pub mod upper_envelope;
