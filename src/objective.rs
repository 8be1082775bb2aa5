//! Regularized objective wrapper around a user [`SmoothObjective`].
//!
//! The wrapper owns the full objective `f(x) = smooth_loss(x) + C·‖x‖₁` and
//! the *smooth* gradient: the L1 term contributes no gradient here because
//! its non-differentiability is handled entirely by the pseudo-gradient.
//! Analytic gradients are validated and used when the oracle provides them;
//! otherwise the smooth part is finite-differenced (central first, forward
//! retry on failure). Every evaluation is counted so the outcome can report
//! how much oracle work a run cost.
use std::cell::{Cell, RefCell};

use crate::{
    errors::{OwlqnError, OwlqnResult},
    traits::SmoothObjective,
    types::{Cost, FnEvalMap, Grad, Point},
    validation::{validate_grad, validate_value},
};
use finitediff::FiniteDiff;

/// Full regularized objective `smooth_loss(x) + C·‖x‖₁` over a user oracle.
///
/// - [`RegularizedObjective::eval`] returns a fresh `(value, gradient)` pair;
///   nothing is written through output parameters and nothing is cached, so
///   the oracle contract stays referentially transparent.
/// - Evaluation counters use interior mutability (`Cell`) because the
///   finite-difference closures only see `&self`.
pub struct RegularizedObjective<'a, F: SmoothObjective> {
    f: &'a F,
    data: &'a F::Data,
    c: f64,
    cost_count: Cell<u64>,
    grad_count: Cell<u64>,
}

impl<'a, F: SmoothObjective> RegularizedObjective<'a, F> {
    /// Wrap a user oracle with L1 strength `c`.
    ///
    /// `c` is assumed already validated (finite, non-negative) by the entry
    /// point.
    pub fn new(f: &'a F, data: &'a F::Data, c: f64) -> Self {
        Self { f, data, c, cost_count: Cell::new(0), grad_count: Cell::new(0) }
    }

    /// L1 strength for this run.
    pub fn l1_strength(&self) -> f64 {
        self.c
    }

    /// Evaluate the regularized objective and the smooth gradient at `x`.
    ///
    /// Called once to seed the run and once per line-search trial point.
    ///
    /// # Errors
    /// - Propagates oracle errors from `value`/`grad` via `?`.
    /// - [`OwlqnError::NonFiniteCost`] if the smooth value is not finite.
    /// - [`OwlqnError::GradientDimMismatch`] / [`OwlqnError::InvalidGradient`]
    ///   if the gradient fails validation.
    pub fn eval(&self, x: &Point) -> OwlqnResult<(Cost, Grad)> {
        let smooth = self.smooth_value(x)?;
        let grad = self.smooth_grad(x)?;
        let penalty = self.c * x.fold(0.0, |acc, &v| acc + v.abs());
        Ok((smooth + penalty, grad))
    }

    /// Held-out metric from the oracle at `x`, if it provides one.
    pub fn heldout_metric(&self, x: &Point) -> Option<f64> {
        self.f.heldout_metric(x, self.data)
    }

    /// Snapshot of the evaluation counters for the outcome.
    pub fn fn_evals(&self) -> FnEvalMap {
        let mut map = FnEvalMap::new();
        map.insert("cost_count".to_string(), self.cost_count.get());
        map.insert("gradient_count".to_string(), self.grad_count.get());
        map
    }

    fn smooth_value(&self, x: &Point) -> OwlqnResult<Cost> {
        self.cost_count.set(self.cost_count.get() + 1);
        let value = self.f.value(x, self.data)?;
        validate_value(value)?;
        Ok(value)
    }

    fn smooth_grad(&self, x: &Point) -> OwlqnResult<Grad> {
        self.grad_count.set(self.grad_count.get() + 1);
        let dim = x.len();
        match self.f.grad(x, self.data) {
            Ok(g) => {
                validate_grad(&g, dim)?;
                Ok(g)
            }
            Err(OwlqnError::GradientNotImplemented) => self.finite_diff_grad(x),
            Err(e) => Err(e),
        }
    }

    /// Finite-difference the *smooth* part at `x`.
    ///
    /// The penalty's kink is deliberately excluded; differencing across it
    /// would poison the curvature history.
    ///
    /// The FD closure must return `f64`, so `?` is unavailable inside it; the
    /// first oracle error is captured in `closure_err` and the closure
    /// returns `NaN`. After differencing, a captured error (or a gradient
    /// failing validation) triggers one forward-difference retry.
    fn finite_diff_grad(&self, x: &Point) -> OwlqnResult<Grad> {
        let closure_err: RefCell<Option<OwlqnError>> = RefCell::new(None);
        let smooth = |x: &Point| -> f64 {
            match self.smooth_value(x) {
                Ok(value) => value,
                Err(e) => {
                    let mut slot = closure_err.borrow_mut();
                    if slot.is_none() {
                        *slot = Some(e);
                    }
                    f64::NAN
                }
            }
        };
        let fd_grad = x.central_diff(&smooth);
        if closure_err.borrow().is_some() || validate_grad(&fd_grad, x.len()).is_err() {
            return run_forward_diff(x, &smooth, &closure_err);
        }
        Ok(fd_grad)
    }
}

/// Compute a forward-difference gradient of `func` at `x`, with error capture.
///
/// Clears `closure_err`, performs `forward_diff`, surfaces any captured
/// oracle error, and validates the resulting gradient.
///
/// # Errors
/// Returns any error captured during evaluation of `func` inside the FD
/// routine or by validation of the resulting gradient.
fn run_forward_diff<G: Fn(&Point) -> f64>(
    x: &Point, func: &G, closure_err: &RefCell<Option<OwlqnError>>,
) -> OwlqnResult<Grad> {
    closure_err.replace(None);
    let fd_grad = x.forward_diff(func);
    if let Some(err) = closure_err.take() {
        return Err(err);
    }
    validate_grad(&fd_grad, x.len())?;
    Ok(fd_grad)
}
