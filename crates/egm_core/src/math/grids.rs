//! Grid constructors.
//!
//! Both constructors return strictly increasing grids that can be handed
//! straight to the interpolation kernels and the upper envelope.

use crate::types::GridError;
use num_traits::Float;

fn as_f64<T: Float>(x: T) -> f64 {
    x.to_f64().unwrap_or(f64::NAN)
}

fn check_bounds<T: Float>(x_min: T, x_max: T, n: usize) -> Result<(), GridError> {
    // Negated so NaN bounds are rejected
    if !(x_max > x_min) {
        return Err(GridError::InvalidBounds {
            min: as_f64(x_min),
            max: as_f64(x_max),
        });
    }
    if n < 2 {
        return Err(GridError::InsufficientPoints(n));
    }
    Ok(())
}

fn check_increasing<T: Float>(y: &[T]) -> Result<(), GridError> {
    match y.windows(2).position(|w| !(w[1] > w[0])) {
        Some(i) => Err(GridError::NotStrictlyIncreasing { index: i + 1 }),
        None => Ok(()),
    }
}

/// Grid on `[x_min, x_max]` with spacing that widens towards `x_max`.
///
/// Built by the recursion
///
/// ```text
/// y[0] = x_min
/// y[i] = y[i-1] + (x_max - y[i-1]) / (n - i)^phi
/// ```
///
/// `phi = 1` gives equal spacing; larger `phi` puts more points near
/// `x_min`. The last point equals `x_max` up to rounding.
///
/// # Arguments
///
/// * `x_min` - First grid point
/// * `x_max` - Last grid point, must exceed `x_min`
/// * `n` - Number of points, at least 2
/// * `phi` - Curvature, at least 1
///
/// # Example
///
/// ```
/// use egm_core::math::grids::nonlinspace;
///
/// let grid = nonlinspace(0.0_f64, 10.0, 5, 1.1).unwrap();
/// assert_eq!(grid.len(), 5);
/// assert_eq!(grid[0], 0.0);
/// assert!((grid[4] - 10.0).abs() < 1e-12);
/// assert!(grid[1] - grid[0] < grid[4] - grid[3]);
/// ```
pub fn nonlinspace<T: Float>(x_min: T, x_max: T, n: usize, phi: T) -> Result<Vec<T>, GridError> {
    check_bounds(x_min, x_max, n)?;
    if !(phi >= T::one()) {
        return Err(GridError::InvalidCurvature(as_f64(phi)));
    }

    let mut y = Vec::with_capacity(n);
    y.push(x_min);
    for i in 1..n {
        let prev = y[i - 1];
        let remaining = T::from(n - i).unwrap_or_else(T::one);
        y.push(prev + (x_max - prev) / remaining.powf(phi));
    }

    check_increasing(&y)?;
    Ok(y)
}

/// Grid on `[x_min, x_max]` that is close to equidistant in logs.
///
/// Points are geometrically spaced after shifting by
/// `pivot = |x_min| + 0.25`, which keeps the shifted range positive for any
/// `x_min`. Both endpoints are exact.
///
/// # Example
///
/// ```
/// use egm_core::math::grids::equilogspace;
///
/// let grid = equilogspace(0.0_f64, 20.0, 6).unwrap();
/// assert_eq!(grid[0], 0.0);
/// assert_eq!(grid[5], 20.0);
/// assert!(grid.windows(2).all(|w| w[1] > w[0]));
/// ```
pub fn equilogspace<T: Float>(x_min: T, x_max: T, n: usize) -> Result<Vec<T>, GridError> {
    check_bounds(x_min, x_max, n)?;

    let quarter = T::from(0.25).unwrap_or_else(T::zero);
    let pivot = x_min.abs() + quarter;
    let lo = (x_min + pivot).ln();
    let hi = (x_max + pivot).ln();
    let last = T::from(n - 1).unwrap_or_else(T::one);

    let mut y: Vec<T> = (0..n)
        .map(|i| {
            let t = T::from(i).unwrap_or_else(T::zero) / last;
            (lo + t * (hi - lo)).exp() - pivot
        })
        .collect();
    y[0] = x_min;
    y[n - 1] = x_max;

    check_increasing(&y)?;
    Ok(y)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    // ========================================
    // nonlinspace
    // ========================================

    #[test]
    fn test_nonlinspace_phi_one_is_linspace() {
        let grid = nonlinspace(0.0, 4.0, 5, 1.0).unwrap();
        for (i, &y) in grid.iter().enumerate() {
            assert_relative_eq!(y, i as f64, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_nonlinspace_spacing_widens() {
        let grid = nonlinspace(0.0, 1.0, 20, 1.5).unwrap();
        let steps: Vec<f64> = grid.windows(2).map(|w| w[1] - w[0]).collect();
        assert!(steps.windows(2).all(|s| s[1] > s[0]));
        assert_relative_eq!(grid[19], 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_nonlinspace_two_points() {
        let grid = nonlinspace(-1.0, 3.0, 2, 2.0).unwrap();
        assert_eq!(grid, vec![-1.0, 3.0]);
    }

    #[test]
    fn test_nonlinspace_rejects_bad_arguments() {
        assert_eq!(
            nonlinspace(1.0, 1.0, 5, 1.1).unwrap_err(),
            GridError::InvalidBounds { min: 1.0, max: 1.0 }
        );
        assert_eq!(
            nonlinspace(0.0, 1.0, 1, 1.1).unwrap_err(),
            GridError::InsufficientPoints(1)
        );
        assert_eq!(
            nonlinspace(0.0, 1.0, 5, 0.5).unwrap_err(),
            GridError::InvalidCurvature(0.5)
        );
        assert!(nonlinspace(0.0, f64::NAN, 5, 1.1).is_err());
    }

    // ========================================
    // equilogspace
    // ========================================

    #[test]
    fn test_equilogspace_endpoints_exact() {
        let grid = equilogspace(-2.0, 7.5, 11).unwrap();
        assert_eq!(grid[0], -2.0);
        assert_eq!(grid[10], 7.5);
    }

    #[test]
    fn test_equilogspace_log_spacing_after_shift() {
        let grid = equilogspace(0.0, 10.0, 8).unwrap();
        let pivot = 0.25;
        let ratios: Vec<f64> = grid
            .windows(2)
            .map(|w| (w[1] + pivot) / (w[0] + pivot))
            .collect();
        for r in &ratios[1..] {
            assert_relative_eq!(*r, ratios[0], epsilon = 1e-10);
        }
    }

    #[test]
    fn test_equilogspace_rejects_inverted_bounds() {
        assert!(matches!(
            equilogspace(3.0, 1.0, 4),
            Err(GridError::InvalidBounds { .. })
        ));
    }

    #[test]
    fn test_grids_with_f32() {
        let grid = equilogspace(0.0_f32, 5.0, 4).unwrap();
        assert_eq!(grid.len(), 4);
        assert!(grid.windows(2).all(|w| w[1] > w[0]));
    }
}
