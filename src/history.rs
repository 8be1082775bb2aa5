//! history — curvature-pair ring buffer and the two-loop recursion.
//!
//! Purpose
//! -------
//! Maintain a bounded history of step/gradient-difference pairs
//! `(s_k, y_k, rho_k)` and produce the limited-memory approximation to the
//! inverse-Hessian–vector product `H⁻¹·v` via the standard L-BFGS two-loop
//! recursion. Memory is O(m·D) regardless of iteration count.
//!
//! Invariants & assumptions
//! ------------------------
//! - The buffer holds at most `capacity` pairs; pushing into a full buffer
//!   overwrites the oldest entry. Overwritten content is unreachable — the
//!   recursion walks stored entries only, never stale slots.
//! - Every stored pair has finite `rho = 1/(y·s)`: pairs with degenerate
//!   curvature (`y·s ≈ 0`, which would blow `rho` up) are rejected at push
//!   time, so the recursion never divides by (near-)zero.
//! - `y·y > 0` for every stored pair (a zero `y` implies `y·s = 0`, which is
//!   rejected), so the initial Hessian scaling is always well defined.
//!
//! Conventions
//! -----------
//! - `s_k = x_{k+1} − x_k`, `y_k = grad_{k+1} − grad_k` where `grad` is the
//!   gradient of the *smooth* part of the objective.
//! - The first recursion loop walks pairs newest→oldest, the second
//!   oldest→newest, as in the textbook formulation.
//! - Initial scaling uses `(s·y)/(y·y)` of the most recent pair; identity
//!   when no history is stored yet.
use ndarray::Array1;

use crate::types::Grad;

/// One stored curvature pair.
struct Correction {
    s: Array1<f64>,
    y: Array1<f64>,
    rho: f64,
}

/// Fixed-capacity ring buffer of curvature pairs.
///
/// An arena of at most `capacity` slots plus a write index; capacity and
/// overwrite behavior are explicit invariants rather than implicit modulo
/// arithmetic over iteration counters.
pub struct CurvatureHistory {
    slots: Vec<Correction>,
    write: usize,
    capacity: usize,
}

impl CurvatureHistory {
    /// Create an empty history retaining at most `capacity` pairs.
    ///
    /// `capacity` is assumed already validated (≥ 1) by the options layer.
    pub fn new(capacity: usize) -> Self {
        Self { slots: Vec::with_capacity(capacity), write: 0, capacity }
    }

    /// Number of stored pairs (≤ capacity).
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Store a new pair, overwriting the oldest when full.
    ///
    /// Returns `false` without storing when the pair's curvature is
    /// degenerate: `|y·s|` at or below machine epsilon relative to
    /// `‖y‖·‖s‖` would make `rho` huge even when the product is still a
    /// representable float. Skipping the pair entirely keeps the recursion
    /// free of per-pair guards.
    pub fn push(&mut self, s: Array1<f64>, y: Array1<f64>) -> bool {
        let ys = y.dot(&s);
        if ys.abs() <= f64::EPSILON * (s.dot(&s) * y.dot(&y)).sqrt() {
            return false;
        }
        let rho = 1.0 / ys;
        if !rho.is_finite() {
            return false;
        }
        let correction = Correction { s, y, rho };
        if self.slots.len() < self.capacity {
            self.slots.push(correction);
        } else {
            self.slots[self.write] = correction;
        }
        self.write = (self.write + 1) % self.capacity;
        true
    }

    /// Approximate `H⁻¹·v` over the stored pairs via the two-loop recursion.
    ///
    /// With no history this is the identity (returns a copy of `v`). The
    /// product is computed over the unconstrained input; it is *not* itself
    /// guaranteed descent-compatible with the orthant constraint — the
    /// driver corrects the resulting direction when needed.
    pub fn two_loop(&self, v: &Grad) -> Grad {
        let mut q = v.to_owned();
        if self.slots.is_empty() {
            return q;
        }

        let mut alphas = Vec::with_capacity(self.slots.len());
        let mut gamma = 1.0;
        for (k, corr) in self.chronological().rev().enumerate() {
            if k == 0 {
                gamma = corr.s.dot(&corr.y) / corr.y.dot(&corr.y);
            }
            let alpha = corr.rho * corr.s.dot(&q);
            q.scaled_add(-alpha, &corr.y);
            alphas.push(alpha);
        }

        q *= gamma;

        for (corr, &alpha) in self.chronological().zip(alphas.iter().rev()) {
            let beta = corr.rho * corr.y.dot(&q);
            q.scaled_add(alpha - beta, &corr.s);
        }
        q
    }

    /// Stored pairs oldest→newest.
    fn chronological(&self) -> impl DoubleEndedIterator<Item = &Correction> + '_ {
        let n = self.slots.len();
        let start = if n == self.capacity { self.write } else { 0 };
        (0..n).map(move |k| &self.slots[(start + k) % n])
    }
}
