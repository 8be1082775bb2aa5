//! Public API surface for OWLQN minimization.
//!
//! - [`SmoothObjective`]: trait users implement for the smooth part of their
//!   objective (negative log-likelihood plus any smooth regularization).
//! - [`OwlqnOptions`]: configuration for the optimizer.
//! - [`IterationRecord`]: per-iteration progress snapshot handed to observers.
//! - [`OwlqnOutcome`]: normalized result returned by the high-level
//!   `minimize` API.
//!
//! Convention: the optimizer *minimizes* `f(x) = smooth_loss(x) + C·‖x‖₁`.
//! User code implements only the smooth part; the L1 penalty and its
//! non-differentiability are handled internally via the pseudo-gradient.
use crate::{
    errors::{OwlqnError, OwlqnResult},
    types::{
        Cost, FnEvalMap, Grad, Point, DEFAULT_HISTORY_SIZE, DEFAULT_LINE_SEARCH_ALPHA,
        DEFAULT_LINE_SEARCH_BETA, DEFAULT_MAX_BACKTRACKS, DEFAULT_MAX_ITERATIONS,
        DEFAULT_MIN_GRADIENT_NORM,
    },
    validation::{
        validate_point, validate_value, verify_history_size, verify_line_search_alpha,
        verify_line_search_beta, verify_max_backtracks, verify_max_iter, verify_min_grad_norm,
    },
};

/// User-implemented smooth-objective oracle.
///
/// You supply the smooth, convex part of the objective; the optimizer adds
/// the `C·‖x‖₁` penalty itself. If you provide an analytic gradient, return
/// the gradient of the *smooth* part only (the penalty never contributes
/// to the gradient).
///
/// - `type Data`: per-model data carried into `value`/`grad`/`check`
///   (dataset, feature tables, sufficient statistics, ...).
///
/// Required:
/// - `value(&Point, &Data) -> OwlqnResult<Cost>`: evaluate the smooth loss.
///   - Errors: return a descriptive `OwlqnError` for invalid inputs or
///     model failures.
/// - `check(&Point, &Data) -> OwlqnResult<()>`: validation hook to reject
///   obviously invalid `x`/`data` pairs. Called once before optimization.
///
/// Optional:
/// - `grad(&Point, &Data) -> OwlqnResult<Grad>`: analytic smooth gradient.
///   If not implemented, robust finite differences are used automatically.
/// - `heldout_metric(&Point, &Data) -> Option<f64>`: held-out loss or
///   accuracy evaluated at `x`, reported once per iteration through the
///   observer. Purely a diagnostic side channel; it never influences the
///   optimization.
pub trait SmoothObjective {
    type Data: 'static;

    // Required methods
    fn value(&self, x: &Point, data: &Self::Data) -> OwlqnResult<Cost>;
    fn check(&self, x: &Point, data: &Self::Data) -> OwlqnResult<()>;

    // Optional methods
    fn grad(&self, _x: &Point, _data: &Self::Data) -> OwlqnResult<Grad> {
        Err(OwlqnError::GradientNotImplemented)
    }

    fn heldout_metric(&self, _x: &Point, _data: &Self::Data) -> Option<f64> {
        None
    }
}

/// Optimizer-level configuration.
///
/// Replaces the classic compiled-in OWLQN constants with explicit, validated
/// tunables so tests can run with tiny histories or tight iteration caps.
///
/// Fields:
/// - `history_size` — number of curvature pairs retained for the two-loop
///   recursion (`m`).
/// - `line_search_alpha` — sufficient-decrease coefficient in the Armijo
///   acceptance test.
/// - `line_search_beta` — multiplicative step-shrink factor; the first trial
///   step is always `1.0` regardless of `beta`.
/// - `max_iterations` — hard cap on outer iterations. Reaching it is not an
///   error; the best point found is returned with `converged = false`.
/// - `min_gradient_norm` — stop when the pseudo-gradient L2 norm falls
///   below this threshold.
/// - `max_backtracks` — cap on step shrinks within one line search;
///   exhausting it surfaces [`OwlqnError::LineSearchFailed`].
/// - `verbose` — if `true`, the driver logs one `info`-level line per
///   iteration (objective, pseudo-gradient norm, held-out metric if any).
///
/// Default: `{ history_size: 10, line_search_alpha: 0.1,
/// line_search_beta: 0.5, max_iterations: 300, min_gradient_norm: 1e-4,
/// max_backtracks: 50, verbose: false }`.
#[derive(Debug, Clone, PartialEq)]
pub struct OwlqnOptions {
    pub history_size: usize,
    pub line_search_alpha: f64,
    pub line_search_beta: f64,
    pub max_iterations: usize,
    pub min_gradient_norm: f64,
    pub max_backtracks: usize,
    pub verbose: bool,
}

impl OwlqnOptions {
    /// Construct validated options.
    ///
    /// # Rules
    /// - `history_size`, `max_iterations`, `max_backtracks` must be ≥ 1.
    /// - `line_search_alpha` and `line_search_beta` must lie strictly inside
    ///   `(0, 1)`.
    /// - `min_gradient_norm` must be finite and strictly positive.
    ///
    /// # Errors
    /// Returns the matching `Invalid*` variant for the first violated rule.
    pub fn new(
        history_size: usize, line_search_alpha: f64, line_search_beta: f64,
        max_iterations: usize, min_gradient_norm: f64, max_backtracks: usize, verbose: bool,
    ) -> OwlqnResult<Self> {
        verify_history_size(history_size)?;
        verify_line_search_alpha(line_search_alpha)?;
        verify_line_search_beta(line_search_beta)?;
        verify_max_iter(max_iterations)?;
        verify_min_grad_norm(min_gradient_norm)?;
        verify_max_backtracks(max_backtracks)?;
        Ok(Self {
            history_size,
            line_search_alpha,
            line_search_beta,
            max_iterations,
            min_gradient_norm,
            max_backtracks,
            verbose,
        })
    }
}

impl Default for OwlqnOptions {
    fn default() -> Self {
        Self {
            history_size: DEFAULT_HISTORY_SIZE,
            line_search_alpha: DEFAULT_LINE_SEARCH_ALPHA,
            line_search_beta: DEFAULT_LINE_SEARCH_BETA,
            max_iterations: DEFAULT_MAX_ITERATIONS,
            min_gradient_norm: DEFAULT_MIN_GRADIENT_NORM,
            max_backtracks: DEFAULT_MAX_BACKTRACKS,
            verbose: false,
        }
    }
}

/// Per-iteration progress snapshot.
///
/// Handed to the observer callback at the *top* of each outer iteration,
/// before the stopping check, so the record for the final iterate is always
/// delivered.
#[derive(Debug, Clone, PartialEq)]
pub struct IterationRecord {
    /// Zero-based outer iteration index.
    pub iteration: usize,
    /// Regularized objective value at the current point.
    pub value: Cost,
    /// L2 norm of the pseudo-gradient at the current point.
    pub pseudo_grad_norm: f64,
    /// Held-out metric from the oracle, if it provides one.
    pub heldout_metric: Option<f64>,
}

/// Canonical result returned by `minimize`.
///
/// - `x_hat`: best parameter vector found.
/// - `value`: regularized objective `f(x̂)`.
/// - `converged`: `true` if the pseudo-gradient norm fell below
///   `min_gradient_norm`, `false` if the iteration budget ran out.
/// - `status`: human-readable termination status string.
/// - `iterations`: number of completed outer iterations.
/// - `fn_evals`: evaluation counters (`"cost_count"`, `"gradient_count"`).
/// - `pseudo_grad_norm`: final pseudo-gradient L2 norm, so callers can
///   distinguish convergence from budget exhaustion quantitatively.
#[derive(Debug, Clone, PartialEq)]
pub struct OwlqnOutcome {
    pub x_hat: Point,
    pub value: Cost,
    pub converged: bool,
    pub status: String,
    pub iterations: usize,
    pub fn_evals: FnEvalMap,
    pub pseudo_grad_norm: f64,
}

impl OwlqnOutcome {
    /// Build a validated [`OwlqnOutcome`] from final driver state.
    ///
    /// Performs:
    /// - `x_hat` check via `validate_point` (non-empty and all finite).
    /// - `value` check via `validate_value` (finite).
    ///
    /// # Errors
    /// Propagates any validation errors for `x_hat` or `value`.
    pub fn new(
        x_hat: Point, value: Cost, converged: bool, status: String, iterations: usize,
        fn_evals: FnEvalMap, pseudo_grad_norm: f64,
    ) -> OwlqnResult<Self> {
        validate_point(&x_hat)?;
        validate_value(value)?;
        Ok(Self { x_hat, value, converged, status, iterations, fn_evals, pseudo_grad_norm })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Validation rules enforced by `OwlqnOptions::new`.
    // - The documented defaults of `OwlqnOptions::default`.
    // - Outcome validation in `OwlqnOutcome::new`.
    //
    // They intentionally DO NOT cover:
    // - Driver behavior consuming these options (tested in `driver` and the
    //   integration suite).
    // -------------------------------------------------------------------------

    #[test]
    fn options_defaults_match_documented_values() {
        let opts = OwlqnOptions::default();
        assert_eq!(opts.history_size, 10);
        assert_eq!(opts.line_search_alpha, 0.1);
        assert_eq!(opts.line_search_beta, 0.5);
        assert_eq!(opts.max_iterations, 300);
        assert_eq!(opts.min_gradient_norm, 1e-4);
        assert_eq!(opts.max_backtracks, 50);
        assert!(!opts.verbose);
    }

    #[test]
    fn options_reject_zero_history_and_iteration_caps() {
        assert!(matches!(
            OwlqnOptions::new(0, 0.1, 0.5, 300, 1e-4, 50, false),
            Err(OwlqnError::InvalidHistorySize { .. })
        ));
        assert!(matches!(
            OwlqnOptions::new(10, 0.1, 0.5, 0, 1e-4, 50, false),
            Err(OwlqnError::InvalidMaxIter { .. })
        ));
        assert!(matches!(
            OwlqnOptions::new(10, 0.1, 0.5, 300, 1e-4, 0, false),
            Err(OwlqnError::InvalidMaxBacktracks { .. })
        ));
    }

    #[test]
    fn options_reject_out_of_range_line_search_coefficients() {
        assert!(matches!(
            OwlqnOptions::new(10, 1.0, 0.5, 300, 1e-4, 50, false),
            Err(OwlqnError::InvalidLineSearchAlpha { .. })
        ));
        assert!(matches!(
            OwlqnOptions::new(10, 0.1, 0.0, 300, 1e-4, 50, false),
            Err(OwlqnError::InvalidLineSearchBeta { .. })
        ));
    }

    #[test]
    fn outcome_rejects_non_finite_results() {
        let fn_evals = FnEvalMap::new();
        let bad_x = array![1.0, f64::NAN];
        assert!(OwlqnOutcome::new(
            bad_x,
            0.0,
            true,
            "s".to_string(),
            1,
            fn_evals.clone(),
            0.0
        )
        .is_err());
        let bad_value = OwlqnOutcome::new(
            array![1.0],
            f64::INFINITY,
            true,
            "s".to_string(),
            1,
            fn_evals,
            0.0,
        );
        assert_eq!(bad_value, Err(OwlqnError::NonFiniteCost { value: f64::INFINITY }));
    }
}
