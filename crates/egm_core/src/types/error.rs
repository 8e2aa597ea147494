//! Error types for structured error handling.
//!
//! This module provides:
//! - `InterpolationError`: Errors from validating interpolation inputs
//! - `EnvelopeError`: Errors from validating upper-envelope inputs
//! - `GridError`: Errors from grid construction
//!
//! The numerical kernels themselves never return errors. These types are
//! produced only by the checked constructors that sit in front of them.

use thiserror::Error;

/// Interpolation-related errors.
///
/// Provides structured error handling for interpolation set-up
/// with descriptive context for each failure mode.
///
/// # Variants
/// - `InsufficientData`: Not enough grid points on an axis
/// - `NonMonotonicData`: Grid is not strictly increasing
/// - `ShapeMismatch`: Value tensor length does not match the grids
/// - `InvalidInput`: General invalid input error
///
/// # Examples
/// ```
/// use egm_core::types::InterpolationError;
///
/// let err = InterpolationError::InsufficientData { axis: 0, got: 1, need: 2 };
/// assert!(format!("{}", err).contains("need at least 2"));
/// ```
#[derive(Error, Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum InterpolationError {
    /// Insufficient grid points on an axis.
    #[error("Insufficient grid points on axis {axis}: got {got}, need at least {need}")]
    InsufficientData {
        /// Axis index
        axis: usize,
        /// Number of points provided
        got: usize,
        /// Minimum number of points required
        need: usize,
    },

    /// Grid is not strictly increasing.
    #[error("Grid on axis {axis} is not strictly increasing at index {index}")]
    NonMonotonicData {
        /// Axis index
        axis: usize,
        /// Index where monotonicity violation was detected
        index: usize,
    },

    /// Value tensor length does not match the product of grid lengths.
    #[error("Value array has {got} elements, grids imply {expected}")]
    ShapeMismatch {
        /// Number of elements supplied
        got: usize,
        /// Product of the grid lengths
        expected: usize,
    },

    /// Invalid input data or parameters.
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// Upper-envelope errors.
///
/// # Examples
/// ```
/// use egm_core::types::EnvelopeError;
///
/// let err = EnvelopeError::InsufficientKnots { got: 1 };
/// assert_eq!(format!("{}", err), "Upper envelope needs at least 2 EGM knots, got 1");
/// ```
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum EnvelopeError {
    /// Two arrays that must have equal length do not.
    #[error("Length mismatch: {name} has {got} elements, expected {expected}")]
    LengthMismatch {
        /// Name of the offending array
        name: &'static str,
        /// Length supplied
        got: usize,
        /// Length required
        expected: usize,
    },

    /// Fewer than two knots, so no segment exists.
    #[error("Upper envelope needs at least 2 EGM knots, got {got}")]
    InsufficientKnots {
        /// Number of knots supplied
        got: usize,
    },
}

/// Grid construction errors.
#[derive(Error, Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum GridError {
    /// Upper bound does not exceed lower bound.
    #[error("Invalid grid bounds: x_max ({max}) must exceed x_min ({min})")]
    InvalidBounds {
        /// Lower bound
        min: f64,
        /// Upper bound
        max: f64,
    },

    /// Fewer than two points requested.
    #[error("A grid needs at least 2 points, got {0}")]
    InsufficientPoints(usize),

    /// Curvature parameter below one.
    #[error("Grid curvature phi must be >= 1, got {0}")]
    InvalidCurvature(f64),

    /// Construction produced a non-increasing sequence (floating-point collapse).
    #[error("Generated grid is not strictly increasing at index {index}")]
    NotStrictlyIncreasing {
        /// First index `i` with `y[i] <= y[i-1]`
        index: usize,
    },
}
