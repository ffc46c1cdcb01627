//! Small numerical helpers shared by the curve implementations.

use crate::scalar::Scalar;
use crate::Vector;
use arrayvec::ArrayVec;

#[inline]
pub fn min_max<S: Scalar>(a: S, b: S) -> (S, S) {
    if a < b {
        (a, b)
    } else {
        (b, a)
    }
}

/// Signed angle from `a` to `b`, in `(-π, π]`.
///
/// Positive when `b` is reached from `a` by a rotation in the direction of
/// increasing angles (from the x axis towards the y axis).
#[inline]
pub fn directed_angle<S: Scalar>(a: Vector<S>, b: Vector<S>) -> S {
    S::atan2(a.cross(b), a.dot(b))
}

/// Angle of `v` with the x axis, in `(-π, π]`.
#[inline]
pub fn vector_angle<S: Scalar>(v: Vector<S>) -> S {
    S::atan2(v.y, v.x)
}

/// Real roots of `a * x² + b * x + c`.
///
/// Degrades to the linear equation when `a` is zero. Returns nothing for the
/// degenerate constant equation.
pub fn quadratic_polynomial_roots<S: Scalar>(a: S, b: S, c: S) -> ArrayVec<S, 2> {
    let mut result = ArrayVec::new();

    if S::abs(a) < S::EPSILON {
        if S::abs(b) > S::EPSILON {
            result.push(-c / b);
        }
        return result;
    }

    let delta = b * b - S::FOUR * a * c;
    if delta > S::ZERO {
        let sqrt_delta = S::sqrt(delta);
        result.push((-b - sqrt_delta) / (S::TWO * a));
        result.push((-b + sqrt_delta) / (S::TWO * a));
    } else if S::abs(delta) < S::EPSILON {
        result.push(-b / (S::TWO * a));
    }

    result
}

/// Returns whether two values are within `epsilon` of each other.
#[inline]
pub fn fuzzy_eq<S: Scalar>(a: S, b: S, epsilon: S) -> bool {
    S::abs(a - b) <= epsilon
}

#[cfg(test)]
use crate::vector;

#[test]
fn directed_angle_quadrants() {
    use core::f64::consts::{FRAC_PI_2, PI};

    let x = vector(1.0f64, 0.0);
    assert!(fuzzy_eq(directed_angle(x, vector(0.0, 1.0)), FRAC_PI_2, 1e-12));
    assert!(fuzzy_eq(directed_angle(x, vector(0.0, -1.0)), -FRAC_PI_2, 1e-12));
    assert!(fuzzy_eq(directed_angle(x, vector(-1.0, 0.0)), PI, 1e-12));
    assert!(fuzzy_eq(directed_angle(x, x), 0.0, 1e-12));
}

#[test]
fn quadratic_roots() {
    let roots = quadratic_polynomial_roots(1.0f64, -3.0, 2.0);
    assert_eq!(roots.len(), 2);
    assert!(fuzzy_eq(roots[0], 1.0, 1e-12));
    assert!(fuzzy_eq(roots[1], 2.0, 1e-12));

    let linear = quadratic_polynomial_roots(0.0f64, 2.0, -1.0);
    assert_eq!(&linear[..], &[0.5]);

    assert!(quadratic_polynomial_roots(1.0f64, 0.0, 1.0).is_empty());
}
