//! Integration tests for the OWLQN optimizer.
//!
//! Purpose
//! -------
//! - Validate the end-to-end pipeline: from a user smooth objective, through
//!   pseudo-gradients, curvature history, and the orthant-constrained line
//!   search, to a converged sparse solution.
//! - Exercise realistic regimes (diagonal quadratics with mixed curvature,
//!   a finite-difference-only logistic model, a held-out side channel)
//!   rather than toy edge cases only.
//!
//! Coverage
//! --------
//! - Convergence on a known convex problem with `C = 0`, dimension in the
//!   hundreds, well under the iteration budget.
//! - Closed-form soft-threshold solutions of the separable lasso-style bowl.
//! - Sparsity monotonicity: increasing `C` never decreases the zero count.
//! - Monotone descent of the regularized objective across iterations.
//! - `C = 0` degeneracy: no coordinate forced to exactly zero.
//! - Finite-difference gradient fallback on an oracle without `grad`.
//! - Observer and held-out-metric plumbing.
//! - Precondition violations surfaced by the entry point.
//!
//! Exclusions
//! ----------
//! - Fine-grained validation of low-level building blocks (pseudo-gradient
//!   coordinate rules, ring-buffer wraparound, projection idempotence);
//!   these are covered by unit tests in the source modules.
//! - Stress testing over extreme dimensions or adversarial oracles; those
//!   belong in targeted property tests.
use approx::assert_relative_eq;
use ndarray::{array, Array1};
use owlqn::{
    minimize, minimize_with_observer, Cost, Grad, IterationRecord, OwlqnError, OwlqnOptions,
    OwlqnResult, Point, SmoothObjective,
};

/// Separable quadratic `0.5 * sum_i h_i (x_i - t_i)^2`.
///
/// With the L1 penalty the minimizer has the closed form
/// `x̂_i = sign(t_i) * max(|t_i| - C / h_i, 0)`, which makes it the natural
/// end-to-end fixture: sparsity, convergence, and descent are all checkable
/// against pencil-and-paper values.
struct DiagonalBowl;

/// Target vector and per-coordinate curvature for [`DiagonalBowl`].
struct BowlData {
    target: Array1<f64>,
    curvature: Array1<f64>,
}

impl SmoothObjective for DiagonalBowl {
    type Data = BowlData;

    fn value(&self, x: &Point, data: &BowlData) -> OwlqnResult<Cost> {
        let diff = x - &data.target;
        Ok(0.5 * (&diff * &diff * &data.curvature).sum())
    }

    fn check(&self, x: &Point, data: &BowlData) -> OwlqnResult<()> {
        if x.len() != data.target.len() {
            return Err(OwlqnError::GradientDimMismatch {
                expected: data.target.len(),
                found: x.len(),
            });
        }
        Ok(())
    }

    fn grad(&self, x: &Point, data: &BowlData) -> OwlqnResult<Grad> {
        Ok((x - &data.target) * &data.curvature)
    }
}

/// Closed-form minimizer of `0.5 h (x - t)^2 + C |x|` per coordinate.
fn soft_threshold(target: f64, curvature: f64, c: f64) -> f64 {
    let shrunk = target.abs() - c / curvature;
    if shrunk <= 0.0 { 0.0 } else { target.signum() * shrunk }
}

fn mixed_curvature_data(dim: usize) -> BowlData {
    let target = Array1::from_iter((0..dim).map(|i| {
        let v = (i as f64 * 0.37).sin() * 3.0;
        if i % 7 == 0 { -v } else { v }
    }));
    let curvature = Array1::from_iter((0..dim).map(|i| 0.5 + (i % 5) as f64));
    BowlData { target, curvature }
}

#[test]
// Convergence on a known convex problem: C = 0, a few hundred dimensions,
// far fewer iterations than the budget.
fn converges_on_quadratic_in_a_few_hundred_dimensions() {
    let dim = 300;
    let data = mixed_curvature_data(dim);
    let opts = OwlqnOptions::default();

    let outcome = minimize(&DiagonalBowl, Array1::zeros(dim), &data, 0.0, &opts)
        .expect("minimize should succeed");

    assert!(outcome.converged, "status: {}", outcome.status);
    assert!(
        outcome.iterations < 100,
        "expected convergence well under the budget, took {}",
        outcome.iterations
    );
    for i in 0..dim {
        assert_relative_eq!(outcome.x_hat[i], data.target[i], epsilon = 1e-3);
    }
}

#[test]
// The converged solution of the separable bowl must match the per-coordinate
// soft-threshold closed form.
fn l1_solution_matches_soft_threshold_closed_form() {
    let data = BowlData {
        target: array![3.0, -0.2, 1.5, -4.0, 0.05],
        curvature: array![1.0, 1.0, 2.0, 0.5, 1.0],
    };
    let c = 1.0;
    let opts = OwlqnOptions::default();

    let outcome = minimize(&DiagonalBowl, Array1::zeros(5), &data, c, &opts)
        .expect("minimize should succeed");

    assert!(outcome.converged, "status: {}", outcome.status);
    for i in 0..5 {
        let expected = soft_threshold(data.target[i], data.curvature[i], c);
        if expected == 0.0 {
            assert_eq!(outcome.x_hat[i], 0.0, "coordinate {i} should be exactly zero");
        } else {
            assert_relative_eq!(outcome.x_hat[i], expected, epsilon = 1e-3);
        }
    }
}

#[test]
// Sparsity monotonicity: for a fixed convex smooth loss and starting point,
// increasing C never decreases the number of zero coordinates.
fn zero_count_is_monotone_in_regularization_strength() {
    let dim = 40;
    let data = mixed_curvature_data(dim);
    let opts = OwlqnOptions::default();

    let mut previous_zeros = 0;
    for &c in &[0.0, 0.25, 0.5, 1.0, 2.0, 4.0] {
        let outcome = minimize(&DiagonalBowl, Array1::zeros(dim), &data, c, &opts)
            .expect("minimize should succeed");
        let zeros = outcome.x_hat.iter().filter(|&&v| v == 0.0).count();
        assert!(
            zeros >= previous_zeros,
            "zero count dropped from {previous_zeros} to {zeros} at C = {c}"
        );
        previous_zeros = zeros;
    }
}

#[test]
// Monotone descent: the regularized objective is non-increasing across
// accepted iterations under the sufficient-decrease acceptance rule.
fn objective_values_are_non_increasing() {
    let dim = 25;
    let data = mixed_curvature_data(dim);
    let opts = OwlqnOptions::default();

    let mut values: Vec<f64> = Vec::new();
    minimize_with_observer(
        &DiagonalBowl,
        Array1::zeros(dim),
        &data,
        0.7,
        &opts,
        |record: &IterationRecord| values.push(record.value),
    )
    .expect("minimize should succeed");

    assert!(values.len() >= 2);
    for pair in values.windows(2) {
        assert!(pair[1] <= pair[0] + 1e-12, "objective rose from {} to {}", pair[0], pair[1]);
    }
}

#[test]
// C = 0 degeneracy: plain quasi-Newton descent, no coordinate forced to
// exactly zero when the true minimum has none there.
fn zero_penalty_forces_no_coordinate_to_zero() {
    let data = BowlData {
        target: array![0.9, -1.1, 2.3, -0.4],
        curvature: array![1.0, 2.0, 0.5, 3.0],
    };
    let opts = OwlqnOptions::default();

    let outcome = minimize(&DiagonalBowl, Array1::zeros(4), &data, 0.0, &opts)
        .expect("minimize should succeed");

    assert!(outcome.converged);
    for (i, &v) in outcome.x_hat.iter().enumerate() {
        assert!(v != 0.0, "coordinate {i} was forced to zero with C = 0");
        assert_relative_eq!(v, data.target[i], epsilon = 1e-3);
    }
}

// ---------------------------------------------------------------------------
// Finite-difference fallback and observer plumbing on a logistic model.
// ---------------------------------------------------------------------------

/// Binary logistic negative log-likelihood without an analytic gradient,
/// forcing the finite-difference fallback. Labels are ±1.
struct LogisticNll;

struct LogisticData {
    train: Vec<(Array1<f64>, f64)>,
    heldout: Vec<(Array1<f64>, f64)>,
}

impl SmoothObjective for LogisticNll {
    type Data = LogisticData;

    fn value(&self, w: &Point, data: &LogisticData) -> OwlqnResult<Cost> {
        let mut nll = 0.0;
        for (x, y) in &data.train {
            let margin = y * w.dot(x);
            nll += (1.0 + (-margin).exp()).ln();
        }
        Ok(nll)
    }

    fn check(&self, w: &Point, data: &LogisticData) -> OwlqnResult<()> {
        match data.train.iter().find(|(x, _)| x.len() != w.len()) {
            Some((x, _)) => Err(OwlqnError::GradientDimMismatch {
                expected: w.len(),
                found: x.len(),
            }),
            None => Ok(()),
        }
    }

    fn heldout_metric(&self, w: &Point, data: &LogisticData) -> Option<f64> {
        if data.heldout.is_empty() {
            return None;
        }
        let correct =
            data.heldout.iter().filter(|(x, y)| y * w.dot(x) > 0.0).count();
        Some(correct as f64 / data.heldout.len() as f64)
    }
}

fn logistic_fixture() -> LogisticData {
    // Non-separable: the two clusters overlap at the origin-adjacent points,
    // so the NLL has a finite minimizer.
    let train = vec![
        (array![1.0, 0.2], 1.0),
        (array![0.8, -0.1], 1.0),
        (array![0.1, 0.05], -1.0),
        (array![-1.0, -0.3], -1.0),
        (array![-0.7, 0.1], -1.0),
        (array![0.1, 0.05], 1.0),
    ];
    let heldout = vec![(array![1.2, 0.1], 1.0), (array![-0.9, -0.2], -1.0)];
    LogisticData { train, heldout }
}

#[test]
fn finite_difference_fallback_trains_a_logistic_model() {
    let data = logistic_fixture();
    let opts = OwlqnOptions::default();

    let outcome = minimize(&LogisticNll, Array1::zeros(2), &data, 0.05, &opts)
        .expect("minimize should succeed");

    assert!(outcome.converged, "status: {}", outcome.status);
    // The first feature separates the clusters; its weight must be positive.
    assert!(outcome.x_hat[0] > 0.0);
    // FD runs burn many more cost evaluations than gradient calls.
    let cost_count = outcome.fn_evals.get("cost_count").copied().unwrap_or(0);
    let grad_count = outcome.fn_evals.get("gradient_count").copied().unwrap_or(0);
    assert!(cost_count > grad_count);
}

#[test]
fn observer_receives_heldout_metric_each_iteration() {
    let data = logistic_fixture();
    let opts = OwlqnOptions::default();

    let mut records: Vec<IterationRecord> = Vec::new();
    minimize_with_observer(
        &LogisticNll,
        Array1::zeros(2),
        &data,
        0.05,
        &opts,
        |record: &IterationRecord| records.push(record.clone()),
    )
    .expect("minimize should succeed");

    assert!(!records.is_empty());
    for record in &records {
        assert!(record.heldout_metric.is_some());
        assert!(record.pseudo_grad_norm.is_finite());
    }
    // The last delivered record is the converged iterate.
    let last = records.last().expect("at least one record");
    assert_eq!(last.heldout_metric, Some(1.0));
}

// ---------------------------------------------------------------------------
// Entry-point preconditions.
// ---------------------------------------------------------------------------

#[test]
fn empty_starting_point_is_rejected() {
    let data = BowlData { target: array![], curvature: array![] };
    let result = minimize(&DiagonalBowl, array![], &data, 0.0, &OwlqnOptions::default());
    assert_eq!(result, Err(OwlqnError::EmptyPoint));
}

#[test]
fn negative_l1_strength_is_rejected() {
    let data = BowlData { target: array![1.0], curvature: array![1.0] };
    let result = minimize(&DiagonalBowl, array![0.0], &data, -1.0, &OwlqnOptions::default());
    assert!(matches!(result, Err(OwlqnError::InvalidL1Strength { .. })));
}

#[test]
fn oracle_check_failures_propagate() {
    // x0 of dimension 2 against 1-dimensional data trips the check hook.
    let data = BowlData { target: array![1.0], curvature: array![1.0] };
    let result = minimize(&DiagonalBowl, array![0.0, 0.0], &data, 0.0, &OwlqnOptions::default());
    assert_eq!(result, Err(OwlqnError::GradientDimMismatch { expected: 1, found: 2 }));
}
