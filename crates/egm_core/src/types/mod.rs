//! Core types shared across the kernels.
//!
//! This module provides:
//! - `error`: Structured error types for interpolation, envelope and grid set-up
//!
//! # Re-exports
//!
//! [`InterpolationError`], [`EnvelopeError`] and [`GridError`] from `error`.

pub mod error;

pub use error::{EnvelopeError, GridError, InterpolationError};
