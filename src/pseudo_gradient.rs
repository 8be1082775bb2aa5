//! Minimum-norm subgradient of the regularized objective.
//!
//! At points where some coordinate of `x` is exactly zero the full objective
//! `smooth(x) + C·‖x‖₁` is not differentiable; its subgradient set at such a
//! coordinate is the interval `[grad_i − C, grad_i + C]`. The pseudo-gradient
//! picks the element of that set closest to zero, which generalizes the
//! gradient for direction selection and stopping. It is never stored as "the"
//! gradient — the curvature history always uses smooth gradients.
use ndarray::Zip;

use crate::types::{Grad, Point};

/// Compute the pseudo-gradient of `smooth + C·‖x‖₁` at `x`.
///
/// Per coordinate:
/// - `x_i != 0`: `grad_i + C·sign(x_i)` (the objective is differentiable
///   there).
/// - `x_i == 0` with `grad_i − C > 0`: `grad_i − C` (moving negative still
///   increases the objective less than staying, so the left derivative
///   drives).
/// - `x_i == 0` with `grad_i + C < 0`: `grad_i + C` (symmetric case on the
///   positive side).
/// - otherwise `0`: zero lies inside the subgradient interval, so the
///   coordinate is already optimal.
///
/// O(D); recomputed every outer iteration.
pub fn pseudo_gradient(x: &Point, grad: &Grad, c: f64) -> Grad {
    Zip::from(x).and(grad).map_collect(|&x, &g| {
        if x > 0.0 {
            g + c
        } else if x < 0.0 {
            g - c
        } else {
            let gm = g - c;
            if gm > 0.0 {
                return gm;
            }
            let gp = g + c;
            if gp < 0.0 {
                return gp;
            }
            0.0
        }
    })
}
