//! types — shared numeric aliases and default tunables.
//!
//! Purpose
//! -------
//! Centralize the core numeric types and default constants used by the
//! OWLQN optimizer. By defining these in one place, the rest of the
//! crate can stay agnostic to `ndarray` and can more easily evolve if
//! the backend changes.
//!
//! Conventions
//! -----------
//! - `Point` and `Grad` are treated conceptually as column vectors with
//!   length equal to the number of model parameters (features).
//! - `Cost` is the scalar regularized objective
//!   `f(x) = smooth_loss(x) + C * ||x||_1`.
//! - The `DEFAULT_*` constants are the documented defaults of
//!   [`OwlqnOptions`](crate::traits::OwlqnOptions); callers may override
//!   any of them per run.
use ndarray::Array1;
use std::collections::HashMap;

/// Parameter vector `x` being optimized.
///
/// Alias for `ndarray::Array1<f64>`, used as the canonical parameter type
/// throughout the optimizer.
pub type Point = Array1<f64>;

/// Gradient vector of the *smooth* part of the objective.
///
/// Alias for `ndarray::Array1<f64>`, matching the shape of `Point`. The
/// L1 penalty never contributes here; its non-differentiability is handled
/// entirely by the pseudo-gradient.
pub type Grad = Array1<f64>;

/// Scalar objective value used by the optimizer.
pub type Cost = f64;

/// Function-evaluation counters reported in the outcome.
///
/// Maps human-readable counter names (e.g., `"cost_count"`) to counts.
pub type FnEvalMap = HashMap<String, u64>;

/// Default number of curvature pairs retained for the two-loop recursion.
pub const DEFAULT_HISTORY_SIZE: usize = 10;

/// Default sufficient-decrease coefficient for the backtracking search.
pub const DEFAULT_LINE_SEARCH_ALPHA: f64 = 0.1;

/// Default step-shrink factor for the backtracking search.
pub const DEFAULT_LINE_SEARCH_BETA: f64 = 0.5;

/// Default cap on outer iterations.
pub const DEFAULT_MAX_ITERATIONS: usize = 300;

/// Default stopping threshold on the pseudo-gradient L2 norm.
pub const DEFAULT_MIN_GRADIENT_NORM: f64 = 1e-4;

/// Default cap on step shrinks within a single line search.
pub const DEFAULT_MAX_BACKTRACKS: usize = 50;
