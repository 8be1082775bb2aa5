//! High-level entry points for minimizing `smooth_loss(x) + C·‖x‖₁`.
//!
//! This validates the run's preconditions, wraps the user oracle in a
//! [`RegularizedObjective`], and delegates the solve to the driver.
use crate::{
    driver::run_owlqn,
    errors::OwlqnResult,
    objective::RegularizedObjective,
    traits::{IterationRecord, OwlqnOptions, OwlqnOutcome, SmoothObjective},
    types::Point,
    validation::{validate_point, verify_l1_strength},
};

/// Minimize `f(x) = smooth_loss(x) + c·‖x‖₁` starting from `x0`.
///
/// # Behavior
/// - Validates `x0` (non-empty, finite) and `c` (finite, ≥ 0); `c = 0`
///   degenerates to plain limited-memory quasi-Newton descent and is fully
///   supported.
/// - Validates the initial guess via `f.check(x0, data)`.
/// - Runs the orthant-wise outer loop until the pseudo-gradient norm falls
///   below `opts.min_gradient_norm` or `opts.max_iterations` is exhausted.
///
/// # Parameters
/// - `f`: Your model implementing [`SmoothObjective`].
/// - `x0`: Starting point, typically all zeros for sparse training.
/// - `data`: Model data passed through to `value`/`grad`.
/// - `c`: L1 regularization strength.
/// - `opts`: Optimizer options (history size, line-search tunables, caps).
///
/// # Errors
/// - Precondition violations (`EmptyPoint`, `InvalidPoint`,
///   `InvalidL1Strength`) and any error from `f.check`.
/// - Runtime errors from the driver (oracle failures, `LineSearchFailed`).
///
/// # Returns
/// An [`OwlqnOutcome`] with the best point, final objective, convergence
/// flag and status, iteration count, evaluation counters, and the final
/// pseudo-gradient norm.
///
/// # Example
/// ```
/// use ndarray::{array, Array1};
/// use owlqn::{minimize, OwlqnOptions, OwlqnResult, SmoothObjective};
///
/// /// Smooth part of a lasso-style objective: 0.5 * ||x - t||^2.
/// struct Bowl;
///
/// impl SmoothObjective for Bowl {
///     type Data = Array1<f64>;
///
///     fn value(&self, x: &Array1<f64>, target: &Array1<f64>) -> OwlqnResult<f64> {
///         let diff = x - target;
///         Ok(0.5 * diff.dot(&diff))
///     }
///
///     fn check(&self, _x: &Array1<f64>, _target: &Array1<f64>) -> OwlqnResult<()> {
///         Ok(())
///     }
///
///     fn grad(&self, x: &Array1<f64>, target: &Array1<f64>) -> OwlqnResult<Array1<f64>> {
///         Ok(x - target)
///     }
/// }
///
/// let target = array![2.0, -0.3];
/// let outcome = minimize(&Bowl, Array1::zeros(2), &target, 0.5, &OwlqnOptions::default())?;
/// assert!(outcome.converged);
/// // The weak coordinate is driven to exactly zero by the L1 penalty.
/// assert_eq!(outcome.x_hat[1], 0.0);
/// # Ok::<(), owlqn::OwlqnError>(())
/// ```
pub fn minimize<F: SmoothObjective>(
    f: &F, x0: Point, data: &F::Data, c: f64, opts: &OwlqnOptions,
) -> OwlqnResult<OwlqnOutcome> {
    minimize_with_observer(f, x0, data, c, opts, |_record: &IterationRecord| {})
}

/// Like [`minimize`], additionally invoking `observer` once per iteration.
///
/// The observer receives an [`IterationRecord`] at the top of every outer
/// iteration — including the final one, before the stopping check — and is a
/// pure side channel: it cannot influence the run.
pub fn minimize_with_observer<F, O>(
    f: &F, x0: Point, data: &F::Data, c: f64, opts: &OwlqnOptions, observer: O,
) -> OwlqnResult<OwlqnOutcome>
where
    F: SmoothObjective,
    O: FnMut(&IterationRecord),
{
    validate_point(&x0)?;
    verify_l1_strength(c)?;
    f.check(&x0, data)?;
    let objective = RegularizedObjective::new(f, data, c);
    run_owlqn(&objective, x0, opts, observer)
}
