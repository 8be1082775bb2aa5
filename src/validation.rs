//! Validation helpers for the OWLQN optimizer.
//!
//! This module centralizes common consistency checks used across the
//! optimizer interface:
//!
//! - **Option checks**: [`verify_history_size`], [`verify_line_search_alpha`],
//!   [`verify_line_search_beta`], [`verify_min_grad_norm`],
//!   [`verify_max_iter`], [`verify_max_backtracks`] validate the tunables in
//!   [`OwlqnOptions`](crate::traits::OwlqnOptions).
//! - **Input checks**: [`validate_point`] and [`verify_l1_strength`] guard
//!   the `minimize` preconditions.
//! - **Oracle outputs**: [`validate_grad`] and [`validate_value`] enforce
//!   dimension and finiteness on everything the smooth objective returns.
//!
//! These helpers standardize error reporting by returning domain-specific
//! [`OwlqnError`] variants, making higher-level code more uniform and easier
//! to debug.
use crate::{
    errors::{OwlqnError, OwlqnResult},
    types::{Grad, Point},
};

/// Validate the history size (number of retained curvature pairs).
///
/// # Errors
/// Returns [`OwlqnError::InvalidHistorySize`] if `size == 0`.
pub fn verify_history_size(size: usize) -> OwlqnResult<()> {
    if size == 0 {
        return Err(OwlqnError::InvalidHistorySize {
            size,
            reason: "History size must be at least 1.",
        });
    }
    Ok(())
}

/// Validate the sufficient-decrease coefficient.
///
/// The Armijo-style acceptance test only makes sense for `alpha` strictly
/// inside `(0, 1)`.
///
/// # Errors
/// Returns [`OwlqnError::InvalidLineSearchAlpha`] for non-finite values or
/// values outside the open unit interval.
pub fn verify_line_search_alpha(alpha: f64) -> OwlqnResult<()> {
    if !alpha.is_finite() {
        return Err(OwlqnError::InvalidLineSearchAlpha {
            alpha,
            reason: "Alpha must be finite.",
        });
    }
    if alpha <= 0.0 || alpha >= 1.0 {
        return Err(OwlqnError::InvalidLineSearchAlpha {
            alpha,
            reason: "Alpha must lie strictly inside (0, 1).",
        });
    }
    Ok(())
}

/// Validate the backtracking shrink factor.
///
/// A factor outside `(0, 1)` would either never shrink the step or collapse
/// it immediately.
///
/// # Errors
/// Returns [`OwlqnError::InvalidLineSearchBeta`] for non-finite values or
/// values outside the open unit interval.
pub fn verify_line_search_beta(beta: f64) -> OwlqnResult<()> {
    if !beta.is_finite() {
        return Err(OwlqnError::InvalidLineSearchBeta { beta, reason: "Beta must be finite." });
    }
    if beta <= 0.0 || beta >= 1.0 {
        return Err(OwlqnError::InvalidLineSearchBeta {
            beta,
            reason: "Beta must lie strictly inside (0, 1).",
        });
    }
    Ok(())
}

/// Validate the stopping threshold on the pseudo-gradient norm.
///
/// # Errors
/// Returns [`OwlqnError::InvalidMinGradNorm`] if the value is non-finite or
/// ≤ 0.0.
pub fn verify_min_grad_norm(tol: f64) -> OwlqnResult<()> {
    if !tol.is_finite() {
        return Err(OwlqnError::InvalidMinGradNorm { tol, reason: "Tolerance must be finite." });
    }
    if tol <= 0.0 {
        return Err(OwlqnError::InvalidMinGradNorm { tol, reason: "Tolerance must be positive." });
    }
    Ok(())
}

/// Validate the outer iteration cap.
///
/// # Errors
/// Returns [`OwlqnError::InvalidMaxIter`] if `max_iter == 0`.
pub fn verify_max_iter(max_iter: usize) -> OwlqnResult<()> {
    if max_iter == 0 {
        return Err(OwlqnError::InvalidMaxIter {
            max_iter,
            reason: "Maximum iterations must be greater than zero.",
        });
    }
    Ok(())
}

/// Validate the per-search backtracking cap.
///
/// # Errors
/// Returns [`OwlqnError::InvalidMaxBacktracks`] if `max_backtracks == 0`.
pub fn verify_max_backtracks(max_backtracks: usize) -> OwlqnResult<()> {
    if max_backtracks == 0 {
        return Err(OwlqnError::InvalidMaxBacktracks {
            max_backtracks,
            reason: "Maximum backtracks must be greater than zero.",
        });
    }
    Ok(())
}

/// Validate the L1 regularization strength.
///
/// `c = 0` is explicitly allowed; the optimizer then degenerates to plain
/// limited-memory quasi-Newton descent.
///
/// # Errors
/// Returns [`OwlqnError::InvalidL1Strength`] if the value is non-finite or
/// negative.
pub fn verify_l1_strength(c: f64) -> OwlqnResult<()> {
    if !c.is_finite() {
        return Err(OwlqnError::InvalidL1Strength {
            value: c,
            reason: "L1 strength must be finite.",
        });
    }
    if c < 0.0 {
        return Err(OwlqnError::InvalidL1Strength {
            value: c,
            reason: "L1 strength must be non-negative.",
        });
    }
    Ok(())
}

/// Validate a starting or result point: non-empty with finite entries.
///
/// # Errors
/// - [`OwlqnError::EmptyPoint`] if the vector has length 0.
/// - [`OwlqnError::InvalidPoint`] with the index/value of the first
///   offending element.
pub fn validate_point(x: &Point) -> OwlqnResult<()> {
    if x.is_empty() {
        return Err(OwlqnError::EmptyPoint);
    }
    for (index, &value) in x.iter().enumerate() {
        if !value.is_finite() {
            return Err(OwlqnError::InvalidPoint {
                index,
                value,
                reason: "Point coordinates must be finite.",
            });
        }
    }
    Ok(())
}

/// Validate a gradient vector against dimension and finiteness.
///
/// Checks:
/// - `grad.len() == dim`
/// - every element is finite (`NaN` or `±∞` are rejected)
///
/// # Errors
/// - [`OwlqnError::GradientDimMismatch`] if length does not match `dim`.
/// - [`OwlqnError::InvalidGradient`] with the index/value/reason of the first
///   offending element.
pub fn validate_grad(grad: &Grad, dim: usize) -> OwlqnResult<()> {
    if grad.len() != dim {
        return Err(OwlqnError::GradientDimMismatch { expected: dim, found: grad.len() });
    }
    for (index, &value) in grad.iter().enumerate() {
        if !value.is_finite() {
            return Err(OwlqnError::InvalidGradient {
                index,
                value,
                reason: "Gradient elements must be finite.",
            });
        }
    }
    Ok(())
}

/// Validate that a scalar objective value is finite.
///
/// Negative values are fine as long as they are finite.
///
/// # Errors
/// Returns [`OwlqnError::NonFiniteCost`] if the value is `NaN` or infinite.
pub fn validate_value(value: f64) -> OwlqnResult<()> {
    if !value.is_finite() {
        return Err(OwlqnError::NonFiniteCost { value });
    }
    Ok(())
}
