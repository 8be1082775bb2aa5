//! Execution core: the outer OWLQN iteration loop.
//!
//! The driver ties the pieces together: seed `(x, grad, f)` from the
//! regularized objective, then per iteration compute the pseudo-gradient,
//! report progress, test the stopping criterion, build a quasi-Newton
//! direction from the curvature history, correct it for orthant consistency,
//! run the constrained line search, and rotate the history. Strictly forward
//! iteration; all state is owned by one invocation, so independent runs can
//! proceed in parallel across threads.
use log::{debug, info};

use crate::{
    errors::OwlqnResult,
    history::CurvatureHistory,
    line_search::constrained_search,
    objective::RegularizedObjective,
    orthant::project,
    pseudo_gradient::pseudo_gradient,
    traits::{IterationRecord, OwlqnOptions, OwlqnOutcome, SmoothObjective},
    types::Point,
};

const STATUS_CONVERGED: &str = "pseudo-gradient norm below tolerance";
const STATUS_MAX_ITER: &str = "maximum iterations reached";

/// Run the OWLQN outer loop from `x0`.
///
/// Invariant: at the top of each iteration `(x, grad, f)` are mutually
/// consistent — both were evaluated at `x` by the same wrapper call.
///
/// Termination:
/// - `‖pg‖₂ < min_gradient_norm` → converged, current point returned.
/// - Iteration budget exhausted → best point so far returned with
///   `converged = false`; not an error. The outcome's `pseudo_grad_norm`
///   lets callers judge how far off the run stopped.
///
/// # Errors
/// - Propagates objective evaluation errors.
/// - [`OwlqnError::LineSearchFailed`](crate::errors::OwlqnError) when a
///   search exhausts its shrink budget.
pub(crate) fn run_owlqn<F, O>(
    objective: &RegularizedObjective<'_, F>, x0: Point, opts: &OwlqnOptions,
    mut observer: O,
) -> OwlqnResult<OwlqnOutcome>
where
    F: SmoothObjective,
    O: FnMut(&IterationRecord),
{
    let c = objective.l1_strength();
    let (mut f, mut grad) = objective.eval(&x0)?;
    let mut x = x0;
    let mut history = CurvatureHistory::new(opts.history_size);

    let mut converged = false;
    let mut iterations = 0;
    let mut pg_norm = f64::NAN;

    for iter in 0..opts.max_iterations {
        let pg = pseudo_gradient(&x, &grad, c);
        pg_norm = pg.dot(&pg).sqrt();

        let record = IterationRecord {
            iteration: iter,
            value: f,
            pseudo_grad_norm: pg_norm,
            heldout_metric: objective.heldout_metric(&x),
        };
        if opts.verbose {
            match record.heldout_metric {
                Some(metric) => info!(
                    "iter = {}, obj = {:.6e}, ||pg|| = {:.6e}, heldout = {:.6e}",
                    iter + 1,
                    f,
                    pg_norm,
                    metric
                ),
                None => {
                    info!("iter = {}, obj = {:.6e}, ||pg|| = {:.6e}", iter + 1, f, pg_norm)
                }
            }
        }
        observer(&record);

        if pg_norm < opts.min_gradient_norm {
            converged = true;
            break;
        }

        let mut dx = history.two_loop(&pg).mapv(|v| -v);
        if dx.dot(&pg) >= 0.0 {
            // The Hessian approximation ignores the kink at zero, so the
            // product can point uphill for the pseudo-gradient. Restricting
            // dx to the orthant of -pg restores a descent direction.
            dx = project(&dx, &pg.mapv(|v| -v));
        }

        let step = constrained_search(objective, &x, &pg, f, &dx, opts)?;

        let s = &step.x - &x;
        let y = &step.grad - &grad;
        if !history.push(s, y) {
            debug!("iteration {iter}: degenerate curvature pair skipped");
        }

        x = step.x;
        grad = step.grad;
        f = step.value;
        iterations = iter + 1;
    }

    if !converged {
        // The loop's norm was taken before the last accepted step; the
        // outcome must report the norm at the point it returns.
        let pg = pseudo_gradient(&x, &grad, c);
        pg_norm = pg.dot(&pg).sqrt();
    }

    let status = if converged { STATUS_CONVERGED } else { STATUS_MAX_ITER };
    if opts.verbose {
        info!("finished after {iterations} iterations: {status}");
    }
    OwlqnOutcome::new(
        x,
        f,
        converged,
        status.to_string(),
        iterations,
        objective.fn_evals(),
        pg_norm,
    )
}
