//! Orthant-constrained backtracking line search.
//!
//! Trial points along the candidate direction are projected back onto the
//! orthant fixed at the start of the search, so no coordinate crosses zero
//! and keeps going within one step. Acceptance uses a sufficient-decrease
//! test with the pseudo-gradient standing in for the gradient. Unlike the
//! classic formulation, the shrink loop is bounded: exhausting the budget is
//! a reported failure, not an infinite loop.
use crate::{
    errors::{OwlqnError, OwlqnResult},
    objective::RegularizedObjective,
    orthant::{orthant_reference, project},
    traits::{OwlqnOptions, SmoothObjective},
    types::{Cost, Grad, Point},
};

/// Accepted line-search step.
#[derive(Debug)]
pub struct LineSearchStep {
    /// Accepted (already projected) point.
    pub x: Point,
    /// Smooth gradient at `x`.
    pub grad: Grad,
    /// Regularized objective at `x`.
    pub value: Cost,
    /// Step size that produced `x`.
    pub step_size: f64,
    /// Number of shrinks performed before acceptance (0 = unit step).
    pub backtracks: usize,
}

/// Backtracking search along `dx` from `x0`, confined to one orthant.
///
/// The orthant reference is `x0` with zero coordinates replaced by `-pg0`.
/// Starting from `t = 1/beta` (so the first trial is the unit step), each
/// trial shrinks `t` by `beta`, projects `x0 + t·dx` onto the reference, and
/// evaluates the regularized objective there. The first trial satisfying
///
/// `f(x) <= f0 + alpha·(x − x0)·pg0`
///
/// is accepted. Note the decrease term uses the *projected* displacement,
/// not `t·dx`; projection can only shrink the predicted decrease, so the
/// test stays conservative.
///
/// # Errors
/// - [`OwlqnError::LineSearchFailed`] after `max_backtracks` rejected trials.
/// - Propagates objective evaluation errors via `?`.
pub fn constrained_search<F: SmoothObjective>(
    objective: &RegularizedObjective<'_, F>, x0: &Point, pg0: &Grad, f0: Cost, dx: &Point,
    opts: &OwlqnOptions,
) -> OwlqnResult<LineSearchStep> {
    let reference = orthant_reference(x0, pg0);
    let beta = opts.line_search_beta;
    let mut t = 1.0 / beta;

    for backtracks in 0..opts.max_backtracks {
        t *= beta;
        let trial = x0 + &dx.mapv(|v| t * v);
        let x = project(&trial, &reference);
        let (value, grad) = objective.eval(&x)?;
        let predicted = (&x - x0).dot(pg0);
        if value <= f0 + opts.line_search_alpha * predicted {
            return Ok(LineSearchStep { x, grad, value, step_size: t, backtracks });
        }
    }

    Err(OwlqnError::LineSearchFailed { backtracks: opts.max_backtracks, step_size: t })
}
