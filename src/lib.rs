//! owlqn — orthant-wise limited-memory quasi-Newton optimization.
//!
//! Purpose
//! -------
//! Fit the parameters of L1-regularized models (classically log-linear /
//! maximum-entropy models) by minimizing `f(x) = smooth_loss(x) + C·‖x‖₁`.
//! Callers implement a single trait, [`SmoothObjective`], for the smooth part
//! and invoke [`minimize`]; the crate handles everything the L1 penalty's
//! non-differentiability demands: pseudo-gradients, orthant-confined steps,
//! and curvature estimates built from smooth gradients only.
//!
//! Key behaviors
//! -------------
//! - Compute the minimum-norm subgradient of the full objective
//!   ([`pseudo_gradient`]) and use it for direction selection and stopping.
//! - Approximate inverse-Hessian products with a bounded curvature history
//!   and the two-loop recursion ([`history`]), skipping degenerate pairs.
//! - Confine each step to one orthant via a backtracking line search with
//!   sign projection ([`line_search`]), which is what produces exact zeros
//!   in the solution.
//! - Centralize configuration ([`OwlqnOptions`]) and validation
//!   ([`validation`]) so the solver layers can assume sane, finite inputs.
//!
//! Invariants & assumptions
//! ------------------------
//! - The smooth part is convex and (twice-)differentiable; the oracle must
//!   return a complete, consistent `(value, gradient)` pair per call.
//! - `C` is a fixed, non-negative scalar for the whole run; `C = 0` reduces
//!   the algorithm to plain L-BFGS descent and is fully supported.
//! - All vectors are `ndarray` containers over `f64` ([`Point`], [`Grad`]);
//!   everything is assumed finite whenever optimization proceeds.
//! - One driver invocation owns all its state; independent runs may proceed
//!   in parallel across threads without sharing.
//!
//! Conventions
//! -----------
//! - The optimizer always *minimizes*. For maximum-likelihood training,
//!   implement the negative log-likelihood as the smooth loss.
//! - The gradient exposed by [`SmoothObjective::grad`] is for the smooth
//!   part only; the penalty contributes no gradient anywhere.
//! - Errors bubble up as [`OwlqnResult<T>`] / [`OwlqnError`]; this crate
//!   never intentionally panics and uses no `unsafe`.
//!
//! Downstream usage
//! ----------------
//! - Model crates implement [`SmoothObjective`] for their types, then call
//!   [`minimize`] with a starting point (typically all zeros), a data
//!   payload, the L1 strength, and an [`OwlqnOptions`] configuration.
//! - Progress is observable per iteration through
//!   [`minimize_with_observer`], which also carries an optional held-out
//!   metric from the oracle; the observer is a pure side channel.
//!
//! Testing notes
//! -------------
//! - Unit tests in submodules cover the pseudo-gradient coordinate rules,
//!   projection idempotence, history wraparound and degeneracy handling,
//!   line-search acceptance/failure, and option validation.
//! - Integration tests exercise [`minimize`] on quadratic bowls: known
//!   soft-threshold solutions, sparsity monotonicity in `C`, monotone
//!   descent, and the `C = 0` degeneracy.

pub mod api;
pub mod errors;
pub mod history;
pub mod line_search;
pub mod objective;
pub mod orthant;
pub mod pseudo_gradient;
pub mod traits;
pub mod types;
pub mod validation;

mod driver;

// ---- Re-exports (primary public surface) ----------------------------------

pub use self::api::{minimize, minimize_with_observer};
pub use self::errors::{OwlqnError, OwlqnResult};
pub use self::pseudo_gradient::pseudo_gradient;
pub use self::traits::{IterationRecord, OwlqnOptions, OwlqnOutcome, SmoothObjective};
pub use self::types::{Cost, FnEvalMap, Grad, Point};

// ---- Optional convenience prelude for downstream crates -------------------
//
// Downstream crates can write
//
//     use owlqn::prelude::*;
//
// to import the main optimizer surface in a single line.

pub mod prelude {
    pub use super::api::{minimize, minimize_with_observer};
    pub use super::errors::{OwlqnError, OwlqnResult};
    pub use super::traits::{IterationRecord, OwlqnOptions, OwlqnOutcome, SmoothObjective};
    pub use super::types::{Cost, Grad, Point};
}
