//! # egm_core: Numerical Kernel for Endogenous Grid Method Solvers
//!
//! egm_core provides the routines that run in the inner loop of a
//! consumption-saving model solver:
//! - Clamped bracket search on sorted grids (`math::grid_search`)
//! - Multilinear interpolation in 1 to 5 dimensions, with batched, bracket
//!   reuse and prepared "only last dimension" variants (`math::interpolators`)
//! - The non-convex upper envelope that resolves folds in the endogenous
//!   grid (`math::upper_envelope`)
//! - Non-uniform grid constructors (`math::grids`)
//! - Error types: `InterpolationError`, `EnvelopeError`, `GridError` (`types::error`)
//!
//! ## Hot Paths
//!
//! The free interpolation functions and [`UpperEnvelope::compute`] do not
//! allocate and do not return errors. Their preconditions (strictly
//! increasing grids, matching shapes) are checked with debug assertions
//! only. The checked entry points [`MultilinearInterpolator::new`],
//! [`EgmKnots::new`] and [`upper_envelope`] validate caller input once and
//! return typed errors.
//!
//! [`UpperEnvelope::compute`]: math::upper_envelope::UpperEnvelope::compute
//! [`MultilinearInterpolator::new`]: math::interpolators::MultilinearInterpolator::new
//! [`EgmKnots::new`]: math::upper_envelope::EgmKnots::new
//! [`upper_envelope`]: math::upper_envelope::upper_envelope
//!
//! ## Usage Examples
//!
//! ```rust
//! use egm_core::math::interpolators::{interp_2d, prep, only_last_vec, LastDimSearch};
//! use egm_core::math::upper_envelope::{EgmKnots, PostDecisionTransform, UpperEnvelope};
//!
//! // Bilinear interpolation
//! let g = [0.0, 1.0];
//! let value = [0.0, 1.0, 1.0, 2.0];
//! assert_eq!(interp_2d(&g, &g, &value, 0.5, 0.5), 1.0);
//!
//! // Prepared evaluation along the last axis
//! let xs = [0.25, 0.5, 0.75];
//! let mut state = prep([&g[..]], [0.5], xs.len());
//! let mut yi = [0.0; 3];
//! only_last_vec(&mut state, [&g[..], &g[..]], &value, [0.5], &xs, &mut yi, LastDimSearch::Monotone);
//! assert_eq!(yi, [0.75, 1.0, 1.25]);
//!
//! // Upper envelope with log utility
//! let grid_a = [0.0, 1.0, 2.0];
//! let m_vec = [1.0, 2.0, 3.0];
//! let c_vec = [1.0, 1.5, 2.0];
//! let w_vec = [0.0, 0.1, 0.2];
//! let knots = EgmKnots::new(&grid_a, &m_vec, &c_vec, &w_vec).unwrap();
//! let envelope = UpperEnvelope::new(|c: f64, _: &()| c.ln(), PostDecisionTransform::Level);
//!
//! let grid_m = [0.5, 1.5, 2.5];
//! let mut c_ast = [0.0; 3];
//! let mut v_ast = [0.0; 3];
//! let summary = envelope.compute(&knots, &grid_m, &mut c_ast, &mut v_ast, &());
//! assert_eq!(c_ast[0], 0.5);
//! assert!(summary.is_complete());
//! ```
//!
//! ## Feature Flags
//!
//! - `serde`: Enable serialisation for error types, search modes and envelope summaries

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod math;
pub mod types;
