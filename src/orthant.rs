//! Orthant reference vectors and sign projection.
//!
//! An orthant is the region of parameter space where every coordinate's sign
//! is fixed. Each OWLQN step is confined to one orthant: a coordinate may
//! move to zero, but never through it, within a single step. That is the
//! mechanism that produces exact zeros in the solution.
use ndarray::Zip;

use crate::types::{Grad, Point};

/// Build the orthant reference for a line search starting at `x0`.
///
/// Equal to `x0` except where `x0[i] == 0`, in which case the reference takes
/// `-pg0[i]`: a zero coordinate is allowed to move only in the direction the
/// pseudo-gradient says decreases the objective.
pub fn orthant_reference(x0: &Point, pg0: &Grad) -> Point {
    Zip::from(x0).and(pg0).map_collect(|&x, &pg| if x != 0.0 { x } else { -pg })
}

/// Project `v` onto the orthant described by `reference`.
///
/// Any coordinate whose sign disagrees with the reference's sign is zeroed.
/// A coordinate with a zero reference sign is always zeroed. Idempotent:
/// projecting an already-projected vector with the same reference is the
/// identity.
pub fn project(v: &Point, reference: &Point) -> Point {
    Zip::from(v).and(reference).map_collect(|&v, &r| if v * r <= 0.0 { 0.0 } else { v })
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn reference_keeps_nonzero_coordinates_and_flips_pg_at_zeros() {
        let x0 = array![2.0, 0.0, -3.0, 0.0];
        let pg0 = array![1.0, -4.0, 1.0, 5.0];

        let reference = orthant_reference(&x0, &pg0);

        assert_eq!(reference, array![2.0, 4.0, -3.0, -5.0]);
    }

    #[test]
    fn projection_zeroes_sign_disagreements() {
        let v = array![1.0, -2.0, 3.0, -4.0];
        let reference = array![1.0, 1.0, -1.0, -1.0];

        let projected = project(&v, &reference);

        assert_eq!(projected, array![1.0, 0.0, 0.0, -4.0]);
    }

    #[test]
    fn projection_zeroes_coordinates_with_zero_reference() {
        let v = array![5.0, -5.0];
        let reference = array![0.0, -1.0];

        assert_eq!(project(&v, &reference), array![0.0, -5.0]);
    }

    #[test]
    // Projecting twice with the same reference must be a no-op the second
    // time.
    fn projection_is_idempotent() {
        let v = array![1.5, -0.5, 0.0, 2.0, -7.0];
        let reference = array![1.0, 1.0, -1.0, -2.0, -1.0];

        let once = project(&v, &reference);
        let twice = project(&once, &reference);

        assert_eq!(once, twice);
    }
}
