//! Non-convex upper envelope for EGM solutions.
//!
//! The endogenous grid method inverts the Euler equation on a grid of
//! end-of-period assets `a`, producing cash-on-hand `m`, consumption `c` and
//! a post-decision value term `w` at every asset knot. With discrete choices
//! the map `a -> m` can fold back on itself, so several asset segments cover
//! the same `m`. The upper envelope evaluates every segment that covers a
//! target point and keeps the one with the highest value of choice.
//!
//! ## Algorithm
//!
//! 1. Target points with `m <= m_vec[0]` are credit constrained: consume
//!    everything, `c = m`, and value `u(m) + cont(w_vec[0])`.
//! 2. Every segment `(a_i, a_{i+1})` with `a_i <= a_{i+1}` is linear in
//!    `(m, c)` and in `(a, w)`. For each target `m` inside `[m_i, m_{i+1}]`,
//!    or beyond the top knot on the last segment, the candidate is
//!    `c = c_i + slope * (m - m_i)`, `a = m - c`, `w` interpolated at `a`
//!    and `v = u(c) + cont(w)`.
//! 3. A candidate replaces the current choice only if its value is strictly
//!    larger, so the first maximum found wins ties.
//!
//! Target points no segment reaches keep `c = 0` and `v = -inf`. That
//! sentinel signals knots that do not span the target grid; it is reported
//! through [`EnvelopeSummary`] and never patched.
//!
//! Cost is O(Na * Nm) and the scan does not allocate.

use crate::types::EnvelopeError;
use num_traits::Float;

/// How the stored post-decision term enters the value of choice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PostDecisionTransform {
    /// `w` is the post-decision value itself.
    #[default]
    Level,
    /// `w` stores the negative inverse of the post-decision value, which is
    /// recovered as `-1 / w`.
    NegativeInverse,
}

impl PostDecisionTransform {
    /// Map the boolean `use_inv_w` flag onto a transform.
    pub fn from_use_inv_w(use_inv_w: bool) -> Self {
        if use_inv_w {
            Self::NegativeInverse
        } else {
            Self::Level
        }
    }

    /// Continuation value recovered from the stored term `w`.
    ///
    /// # Example
    ///
    /// ```
    /// use egm_core::math::upper_envelope::PostDecisionTransform;
    ///
    /// assert_eq!(PostDecisionTransform::Level.continuation(-0.5), -0.5);
    /// assert_eq!(PostDecisionTransform::NegativeInverse.continuation(-0.5), 2.0);
    /// ```
    #[inline]
    pub fn continuation<T: Float>(self, w: T) -> T {
        match self {
            Self::Level => w,
            Self::NegativeInverse => -T::one() / w,
        }
    }
}

/// Borrowed EGM output: one `(a, m, c, w)` tuple per asset knot.
///
/// `grid_a` is ordered by construction; `m_vec` need not be monotone.
#[derive(Debug, Clone, Copy)]
pub struct EgmKnots<'a, T> {
    grid_a: &'a [T],
    m_vec: &'a [T],
    c_vec: &'a [T],
    w_vec: &'a [T],
}

impl<'a, T: Float> EgmKnots<'a, T> {
    /// Bundle the four knot arrays after checking their lengths.
    ///
    /// # Returns
    ///
    /// * `Err(EnvelopeError::InsufficientKnots)` - Fewer than 2 asset knots
    /// * `Err(EnvelopeError::LengthMismatch)` - `m_vec`, `c_vec` or `w_vec` differs in length from `grid_a`
    pub fn new(
        grid_a: &'a [T],
        m_vec: &'a [T],
        c_vec: &'a [T],
        w_vec: &'a [T],
    ) -> Result<Self, EnvelopeError> {
        let na = grid_a.len();
        if na < 2 {
            return Err(EnvelopeError::InsufficientKnots { got: na });
        }
        for (name, arr) in [("m_vec", m_vec), ("c_vec", c_vec), ("w_vec", w_vec)] {
            if arr.len() != na {
                return Err(EnvelopeError::LengthMismatch {
                    name,
                    got: arr.len(),
                    expected: na,
                });
            }
        }

        Ok(Self {
            grid_a,
            m_vec,
            c_vec,
            w_vec,
        })
    }

    /// Number of asset knots.
    #[inline]
    pub fn len(&self) -> usize {
        self.grid_a.len()
    }

    /// Always false for a constructed value; present for API symmetry.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.grid_a.is_empty()
    }

    /// End-of-period assets.
    pub fn grid_a(&self) -> &'a [T] {
        self.grid_a
    }

    /// Implied cash-on-hand.
    pub fn m_vec(&self) -> &'a [T] {
        self.m_vec
    }

    /// Implied consumption.
    pub fn c_vec(&self) -> &'a [T] {
        self.c_vec
    }

    /// Post-decision value terms.
    pub fn w_vec(&self) -> &'a [T] {
        self.w_vec
    }
}

/// Coverage report of one envelope run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct EnvelopeSummary {
    /// Target points at or below `m_vec[0]`.
    pub constrained: usize,
    /// Target points left at the `-inf` sentinel.
    pub uncovered: usize,
}

impl EnvelopeSummary {
    /// Returns true if no target point was left at the sentinel.
    #[inline]
    pub fn is_complete(&self) -> bool {
        self.uncovered == 0
    }
}

/// Upper envelope bound to a utility function and a post-decision transform.
///
/// The utility is any `Fn(c, &args) -> u`; `args` carries whatever extra
/// parameters the model needs (risk aversion, a discrete choice, ...). It is
/// called once per constrained point and once per segment candidate, and
/// must be pure.
///
/// # Example
///
/// ```
/// use egm_core::math::upper_envelope::{EgmKnots, PostDecisionTransform, UpperEnvelope};
///
/// let grid_a = [0.0, 1.0, 2.0];
/// let m_vec = [1.0, 3.0, 5.0];
/// let c_vec = [1.0, 2.0, 3.0];
/// let w_vec = [0.0, 0.5, 1.0];
/// let knots = EgmKnots::new(&grid_a, &m_vec, &c_vec, &w_vec).unwrap();
///
/// let crra = |c: f64, rho: &f64| c.powf(1.0 - rho) / (1.0 - rho);
/// let envelope = UpperEnvelope::new(crra, PostDecisionTransform::Level);
///
/// let grid_m = [0.5, 2.0, 6.0];
/// let mut c_ast = [0.0; 3];
/// let mut v_ast = [0.0; 3];
/// let summary = envelope.compute(&knots, &grid_m, &mut c_ast, &mut v_ast, &2.0);
///
/// assert_eq!(c_ast[0], 0.5);
/// assert!((c_ast[1] - 1.5).abs() < 1e-12);
/// assert!(summary.is_complete());
/// ```
#[derive(Debug, Clone, Copy)]
pub struct UpperEnvelope<U> {
    utility: U,
    transform: PostDecisionTransform,
}

impl<U> UpperEnvelope<U> {
    /// Bind `utility` and `transform`.
    pub fn new(utility: U, transform: PostDecisionTransform) -> Self {
        Self { utility, transform }
    }

    /// The post-decision transform in use.
    pub fn transform(&self) -> PostDecisionTransform {
        self.transform
    }

    /// Run the envelope on `grid_m`, overwriting `c_ast` and `v_ast`.
    ///
    /// `grid_m` must be non-decreasing and both outputs must have its
    /// length; the length check is a debug assertion only. Use
    /// [`upper_envelope`] for a checked entry point.
    pub fn compute<T, A>(
        &self,
        knots: &EgmKnots<'_, T>,
        grid_m: &[T],
        c_ast: &mut [T],
        v_ast: &mut [T],
        args: &A,
    ) -> EnvelopeSummary
    where
        T: Float,
        A: ?Sized,
        U: Fn(T, &A) -> T,
    {
        debug_assert_eq!(c_ast.len(), grid_m.len(), "c_ast length differs from grid_m");
        debug_assert_eq!(v_ast.len(), grid_m.len(), "v_ast length differs from grid_m");

        let EgmKnots {
            grid_a,
            m_vec,
            c_vec,
            w_vec,
        } = *knots;
        let na = grid_a.len();
        let nm = grid_m.len();

        c_ast.fill(T::zero());
        v_ast.fill(T::neg_infinity());

        // Credit constrained: consume everything
        let mut constrained = 0;
        while constrained < nm && grid_m[constrained] <= m_vec[0] {
            let m = grid_m[constrained];
            c_ast[constrained] = m;
            v_ast[constrained] = (self.utility)(m, args) + self.transform.continuation(w_vec[0]);
            constrained += 1;
        }

        let m_top = m_vec[na - 1];
        for ia in 0..na - 1 {
            let a_low = grid_a[ia];
            let a_high = grid_a[ia + 1];
            // Inverted asset interval: not a valid policy branch
            if a_low > a_high {
                continue;
            }
            let w_low = w_vec[ia];
            let w_slope = (w_vec[ia + 1] - w_low) / (a_high - a_low);

            let m_low = m_vec[ia];
            let m_high = m_vec[ia + 1];
            let c_low = c_vec[ia];
            let c_slope = (c_vec[ia + 1] - c_low) / (m_high - m_low);

            let is_last = ia == na - 2;

            for (im, &m) in grid_m.iter().enumerate() {
                let inside = m >= m_low && m <= m_high;
                let above = is_last && m > m_top;
                if !(inside || above) {
                    continue;
                }

                let c = c_low + c_slope * (m - m_low);
                let a = m - c;
                let w = w_low + w_slope * (a - a_low);
                let v = (self.utility)(c, args) + self.transform.continuation(w);

                if v > v_ast[im] {
                    v_ast[im] = v;
                    c_ast[im] = c;
                }
            }
        }

        EnvelopeSummary {
            constrained,
            uncovered: v_ast.iter().filter(|&&v| v == T::neg_infinity()).count(),
        }
    }
}

/// Checked upper envelope.
///
/// Validates the output lengths against `grid_m`, runs
/// [`UpperEnvelope::compute`] and logs the coverage. Uncovered target
/// points are reported with a `warn` event and in the returned summary;
/// their sentinel values are left in place.
///
/// # Returns
///
/// * `Ok(EnvelopeSummary)` - Envelope computed (possibly with uncovered points)
/// * `Err(EnvelopeError::LengthMismatch)` - `c_ast` or `v_ast` differs in length from `grid_m`
pub fn upper_envelope<T, A, U>(
    utility: U,
    transform: PostDecisionTransform,
    knots: &EgmKnots<'_, T>,
    grid_m: &[T],
    c_ast: &mut [T],
    v_ast: &mut [T],
    args: &A,
) -> Result<EnvelopeSummary, EnvelopeError>
where
    T: Float,
    A: ?Sized,
    U: Fn(T, &A) -> T,
{
    let nm = grid_m.len();
    for (name, len) in [("c_ast", c_ast.len()), ("v_ast", v_ast.len())] {
        if len != nm {
            return Err(EnvelopeError::LengthMismatch {
                name,
                got: len,
                expected: nm,
            });
        }
    }

    let summary =
        UpperEnvelope::new(utility, transform).compute(knots, grid_m, c_ast, v_ast, args);

    tracing::debug!(
        knots = knots.len(),
        targets = nm,
        constrained = summary.constrained,
        uncovered = summary.uncovered,
        ?transform,
        "Upper envelope computed"
    );

    if !summary.is_complete() {
        let first = v_ast
            .iter()
            .position(|&v| v == T::neg_infinity())
            .and_then(|im| grid_m[im].to_f64());
        tracing::warn!(
            uncovered = summary.uncovered,
            first_uncovered_m = ?first,
            "EGM knots do not cover the target grid; sentinel values left in place"
        );
    }

    Ok(summary)
}
