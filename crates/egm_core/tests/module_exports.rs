//! Integration tests for module exports.
//!
//! Verify that all public modules and types are reachable via absolute paths.

/// Test that grid search functions are accessible via absolute path.
#[test]
fn test_grid_search_exports() {
    use egm_core::math::grid_search::advance_bracket;
    use egm_core::math::grid_search::binary_search;

    let grid = [0.0_f64, 1.0, 2.0];
    assert_eq!(binary_search(&grid, 1.5), 1);
    assert_eq!(advance_bracket(&grid, 0, 1.5), 1);
}

/// Test that every interpolation entry point is re-exported.
#[test]
fn test_interpolator_exports() {
    use egm_core::math::interpolators::{
        interp, interp_1d, interp_1d_vec, interp_2d, interp_2d_vec, interp_3d, interp_3d_vec,
        interp_4d, interp_4d_vec, interp_5d, interp_5d_vec, interp_at, interp_from_rep,
        interp_to_rep, interp_vec, only_last, only_last_vec, prep, search, validate_grid,
        LastDimSearch, MultilinearInterpolator, PrepState,
    };

    let g = [0.0_f64, 1.0];
    let v1 = [0.0, 1.0];
    let v2 = [0.0; 4];
    let v3 = [0.0; 8];
    let v4 = [0.0; 16];
    let v5 = [0.0; 32];

    let _ = interp([&g[..]], &v1, [0.5]);
    let _ = interp_at([&g[..]], &v1, [0.5], [0]);
    let _ = search([&g[..], &g[..]], [0.5, 0.5]);
    let _ = interp_1d(&g, &v1, 0.5);
    let _ = interp_2d(&g, &g, &v2, 0.5, 0.5);
    let _ = interp_3d(&g, &g, &g, &v3, 0.5, 0.5, 0.5);
    let _ = interp_4d(&g, &g, &g, &g, &v4, 0.5, 0.5, 0.5, 0.5);
    let _ = interp_5d(&g, &g, &g, &g, &g, &v5, 0.5, 0.5, 0.5, 0.5, 0.5);

    let xs = [0.5];
    let mut yi = [0.0];
    interp_vec([&g[..]], &v1, [&xs[..]], &mut yi);
    interp_1d_vec(&g, &v1, &xs, &mut yi);
    interp_2d_vec(&g, &g, &v2, &xs, &xs, &mut yi);
    interp_3d_vec(&g, &g, &g, &v3, &xs, &xs, &xs, &mut yi);
    interp_4d_vec(&g, &g, &g, &g, &v4, &xs, &xs, &xs, &xs, &mut yi);
    interp_5d_vec(&g, &g, &g, &g, &g, &v5, &xs, &xs, &xs, &xs, &xs, &mut yi);

    let mut js = [0usize; 2];
    let _ = interp_to_rep(&mut js, [&g[..], &g[..]], &v2, [0.5, 0.5]);
    let _ = interp_from_rep(&js, [&g[..], &g[..]], &v2, [0.5, 0.5]);

    let mut state: PrepState<1> = prep([&g[..]], [0.5], 1);
    let _ = only_last(&state, [&g[..], &g[..]], &v2, [0.5, 0.5]);
    only_last_vec(&mut state, [&g[..], &g[..]], &v2, [0.5], &xs, &mut yi, LastDimSearch::default());

    assert!(validate_grid(0, &g).is_ok());
    assert!(MultilinearInterpolator::new([&g[..]], &v1).is_ok());
}

/// Test that upper envelope types are accessible via absolute path.
#[test]
fn test_upper_envelope_exports() {
    use egm_core::math::upper_envelope::{
        upper_envelope, EgmKnots, EnvelopeSummary, PostDecisionTransform, UpperEnvelope,
    };

    let a = [0.0_f64, 1.0];
    let knots = EgmKnots::new(&a, &a, &a, &a).unwrap();
    let envelope = UpperEnvelope::new(|c: f64, _: &()| c, PostDecisionTransform::Level);
    assert_eq!(envelope.transform(), PostDecisionTransform::Level);

    let mut c = [0.0];
    let mut v = [0.0];
    let summary: EnvelopeSummary = upper_envelope(
        |c: f64, _: &()| c,
        PostDecisionTransform::Level,
        &knots,
        &[0.5],
        &mut c,
        &mut v,
        &(),
    )
    .unwrap();
    assert!(summary.is_complete());
}

/// Test that grid constructors and error types are accessible via absolute path.
#[test]
fn test_grids_and_error_exports() {
    use egm_core::math::grids::{equilogspace, nonlinspace};
    use egm_core::types::error::{EnvelopeError, GridError, InterpolationError};
    use egm_core::types::{EnvelopeError as E, GridError as G, InterpolationError as I};

    assert!(nonlinspace(0.0_f64, 1.0, 3, 1.0).is_ok());
    assert!(equilogspace(0.0_f64, 1.0, 3).is_ok());

    let _: E = EnvelopeError::InsufficientKnots { got: 0 };
    let _: G = GridError::InsufficientPoints(1);
    let _: I = InterpolationError::InvalidInput("x".to_string());
}
