//! Validated multilinear interpolator over borrowed grids.

use super::kernel::{interp, interp_vec, tensor_len};
use super::prepared::{only_last_vec, prep, LastDimSearch, PrepState};
use crate::types::InterpolationError;
use num_traits::Float;

/// Multilinear interpolator on a rectangular `D`-dimensional grid.
///
/// Borrows the grids and the row-major value tensor from the caller and
/// checks them once at construction, so the evaluation methods can run the
/// unchecked kernels. Queries outside the grid extrapolate linearly from the
/// boundary cell.
///
/// # Type Parameters
///
/// * `T` - Floating-point type (e.g., `f64`, `f32`)
/// * `D` - Number of dimensions
///
/// # Example
///
/// ```
/// use egm_core::math::interpolators::MultilinearInterpolator;
///
/// let m = [0.0_f64, 1.0, 2.0];
/// let p = [0.5, 1.5];
/// // value[im * 2 + ip] = m + p
/// let value = [0.5, 1.5, 1.5, 2.5, 2.5, 3.5];
///
/// let interp = MultilinearInterpolator::new([&m[..], &p[..]], &value).unwrap();
/// assert!((interp.evaluate([1.25, 1.0]) - 2.25).abs() < 1e-12);
/// assert_eq!(interp.domain(0), (0.0, 2.0));
/// ```
#[derive(Debug, Clone, Copy)]
pub struct MultilinearInterpolator<'a, T: Float, const D: usize> {
    grids: [&'a [T]; D],
    values: &'a [T],
}

impl<'a, T: Float, const D: usize> MultilinearInterpolator<'a, T, D> {
    /// Construct an interpolator after validating grids and tensor shape.
    ///
    /// # Returns
    ///
    /// * `Ok(MultilinearInterpolator)` - Inputs satisfy the kernel preconditions
    /// * `Err(InterpolationError::InvalidInput)` - `D == 0`
    /// * `Err(InterpolationError::InsufficientData)` - An axis has fewer than 2 points
    /// * `Err(InterpolationError::NonMonotonicData)` - An axis is not strictly increasing
    /// * `Err(InterpolationError::ShapeMismatch)` - `values.len()` differs from the grid product
    pub fn new(grids: [&'a [T]; D], values: &'a [T]) -> Result<Self, InterpolationError> {
        if D == 0 {
            return Err(InterpolationError::InvalidInput(
                "interpolator needs at least one dimension".to_string(),
            ));
        }

        for (axis, grid) in grids.iter().enumerate() {
            validate_grid(axis, grid)?;
        }

        let expected = tensor_len(&grids);
        if values.len() != expected {
            return Err(InterpolationError::ShapeMismatch {
                got: values.len(),
                expected,
            });
        }

        Ok(Self { grids, values })
    }

    /// Interpolated value at `xi`.
    #[inline]
    pub fn evaluate(&self, xi: [T; D]) -> T {
        interp(self.grids, self.values, xi)
    }

    /// Interpolated values at a batch of points, one slice per coordinate.
    ///
    /// # Returns
    ///
    /// * `Err(InterpolationError::InvalidInput)` - A coordinate slice and `yi` differ in length
    pub fn evaluate_vec(&self, xi: [&[T]; D], yi: &mut [T]) -> Result<(), InterpolationError> {
        if let Some(axis) = xi.iter().position(|x| x.len() != yi.len()) {
            return Err(InterpolationError::InvalidInput(format!(
                "coordinate {} has {} queries but output has {} slots",
                axis,
                xi[axis].len(),
                yi.len()
            )));
        }
        interp_vec(self.grids, self.values, xi, yi);
        Ok(())
    }

    /// Prepare a batch of `n` queries sharing the leading `S = D - 1` coordinates.
    ///
    /// # Panics
    ///
    /// Panics if `S + 1 != D`.
    pub fn prepare<const S: usize>(&self, shared_xi: [T; S], n: usize) -> PrepState<S> {
        assert_eq!(S + 1, D, "prepared state must cover all but the last axis");
        let leading: [&[T]; S] = std::array::from_fn(|axis| self.grids[axis]);
        prep(leading, shared_xi, n)
    }

    /// Evaluate a prepared batch; see [`only_last_vec`].
    ///
    /// # Returns
    ///
    /// * `Err(InterpolationError::InvalidInput)` - Batch lengths disagree with the state
    pub fn evaluate_only_last<const S: usize>(
        &self,
        state: &mut PrepState<S>,
        shared_xi: [T; S],
        xi_last: &[T],
        yi: &mut [T],
        search: LastDimSearch,
    ) -> Result<(), InterpolationError> {
        if xi_last.len() != yi.len() || state.len() != yi.len() {
            return Err(InterpolationError::InvalidInput(format!(
                "batch of {} queries, {} outputs, state sized for {}",
                xi_last.len(),
                yi.len(),
                state.len()
            )));
        }
        only_last_vec(state, self.grids, self.values, shared_xi, xi_last, yi, search);
        Ok(())
    }

    /// `(min, max)` of the grid on `axis`.
    ///
    /// # Panics
    ///
    /// Panics if `axis >= D`.
    #[inline]
    pub fn domain(&self, axis: usize) -> (T, T) {
        let grid = self.grids[axis];
        (grid[0], grid[grid.len() - 1])
    }

    /// The borrowed grids.
    #[inline]
    pub fn grids(&self) -> &[&'a [T]; D] {
        &self.grids
    }

    /// The borrowed value tensor.
    #[inline]
    pub fn values(&self) -> &'a [T] {
        self.values
    }
}

/// Check that `grid` has at least two strictly increasing points.
pub fn validate_grid<T: Float>(axis: usize, grid: &[T]) -> Result<(), InterpolationError> {
    if grid.len() < 2 {
        return Err(InterpolationError::InsufficientData {
            axis,
            got: grid.len(),
            need: 2,
        });
    }
    // `!(a < b)` also rejects NaN
    if let Some(index) = grid.windows(2).position(|w| !(w[0] < w[1])) {
        return Err(InterpolationError::NonMonotonicData {
            axis,
            index: index + 1,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::interpolators::interp_2d;
    use approx::assert_relative_eq;

    // ========================================
    // Construction Tests
    // ========================================

    #[test]
    fn test_new_valid() {
        let g = [0.0, 1.0, 2.0];
        let v = [0.0, 1.0, 4.0];
        assert!(MultilinearInterpolator::new([&g[..]], &v).is_ok());
    }

    #[test]
    fn test_new_insufficient_axis() {
        let g1 = [0.0, 1.0];
        let g2 = [0.0];
        let v = [0.0, 1.0];
        match MultilinearInterpolator::new([&g1[..], &g2[..]], &v) {
            Err(InterpolationError::InsufficientData { axis, got, need }) => {
                assert_eq!((axis, got, need), (1, 1, 2));
            }
            other => panic!("Expected InsufficientData error, got {:?}", other),
        }
    }

    #[test]
    fn test_new_duplicate_knot_rejected() {
        let g = [0.0, 1.0, 1.0, 2.0];
        let v = [0.0; 4];
        match MultilinearInterpolator::new([&g[..]], &v) {
            Err(InterpolationError::NonMonotonicData { axis, index }) => {
                assert_eq!((axis, index), (0, 2));
            }
            other => panic!("Expected NonMonotonicData error, got {:?}", other),
        }
    }

    #[test]
    fn test_new_nan_knot_rejected() {
        let g = [0.0, f64::NAN, 2.0];
        let v = [0.0; 3];
        assert!(MultilinearInterpolator::new([&g[..]], &v).is_err());
    }

    #[test]
    fn test_new_shape_mismatch() {
        let g1 = [0.0, 1.0, 2.0];
        let g2 = [0.0, 1.0];
        let v = [0.0; 5];
        assert_eq!(
            MultilinearInterpolator::new([&g1[..], &g2[..]], &v).unwrap_err(),
            InterpolationError::ShapeMismatch {
                got: 5,
                expected: 6
            }
        );
    }

    #[test]
    fn test_new_zero_rank_rejected() {
        let v = [1.0];
        let result = MultilinearInterpolator::<f64, 0>::new([], &v);
        assert!(matches!(result, Err(InterpolationError::InvalidInput(_))));
    }

    // ========================================
    // Evaluation Tests
    // ========================================

    #[test]
    fn test_evaluate_matches_free_function() {
        let g1 = [0.0, 0.5, 2.0];
        let g2 = [1.0, 2.0, 3.0, 5.0];
        let v: Vec<f64> = (0..12).map(|k| (k as f64).sin()).collect();
        let interp = MultilinearInterpolator::new([&g1[..], &g2[..]], &v).unwrap();

        for &(x, y) in &[(0.1, 1.5), (1.9, 4.9), (-1.0, 6.0)] {
            assert_eq!(interp.evaluate([x, y]), interp_2d(&g1, &g2, &v, x, y));
        }
    }

    #[test]
    fn test_evaluate_vec_length_checked() {
        let g = [0.0, 1.0];
        let v = [0.0, 1.0];
        let interp = MultilinearInterpolator::new([&g[..]], &v).unwrap();

        let mut yi = [0.0; 2];
        assert!(interp.evaluate_vec([&[0.25, 0.75][..]], &mut yi).is_ok());
        assert_relative_eq!(yi[0], 0.25);
        assert_relative_eq!(yi[1], 0.75);

        let mut short = [0.0; 1];
        assert!(interp.evaluate_vec([&[0.25, 0.75][..]], &mut short).is_err());
    }

    #[test]
    fn test_prepare_and_evaluate_only_last() {
        let g1 = [0.0, 1.0, 2.0];
        let g2 = [0.0, 1.0, 2.0, 3.0];
        let v: Vec<f64> = (0..12).map(|k| (k * k) as f64).collect();
        let interp = MultilinearInterpolator::new([&g1[..], &g2[..]], &v).unwrap();

        let xs = [0.0, 0.5, 2.5, 3.0];
        let mut state = interp.prepare([0.75], xs.len());
        assert_eq!(state.shared(), &[0]);

        let mut yi = [0.0; 4];
        interp
            .evaluate_only_last(&mut state, [0.75], &xs, &mut yi, LastDimSearch::Monotone)
            .unwrap();
        for (i, &x) in xs.iter().enumerate() {
            assert_eq!(yi[i], interp.evaluate([0.75, x]));
        }

        let mut wrong = [0.0; 3];
        assert!(interp
            .evaluate_only_last(&mut state, [0.75], &xs[..3], &mut wrong, LastDimSearch::Binary)
            .is_err());
    }

    #[test]
    fn test_domain_and_accessors() {
        let g1 = [-1.0, 0.0];
        let g2 = [2.0, 3.0, 7.0];
        let v = [0.0; 6];
        let interp = MultilinearInterpolator::new([&g1[..], &g2[..]], &v).unwrap();
        assert_eq!(interp.domain(0), (-1.0, 0.0));
        assert_eq!(interp.domain(1), (2.0, 7.0));
        assert_eq!(interp.grids()[1], &g2[..]);
        assert_eq!(interp.values().len(), 6);
    }

    #[test]
    fn test_with_f32() {
        let g: [f32; 3] = [0.0, 1.0, 2.0];
        let v: [f32; 3] = [0.0, 2.0, 4.0];
        let interp = MultilinearInterpolator::new([&g[..]], &v).unwrap();
        assert!((interp.evaluate([0.5_f32]) - 1.0).abs() < 1e-6);
    }
}
