use crate::scalar::Scalar;
use crate::traits::Transformation;
use crate::utils::min_max;
use crate::{point, Box2D, CubicCurve, Point, Vector};

use core::hash::{Hash, Hasher};
use core::ops::Range;

/// A 2d curve segment defined by three points: the beginning of the segment, a control
/// point and the end of the segment.
///
/// The curve is defined by equation:
/// ```∀ t ∈ [0..1],  P(t) = (1 - t)² * from + 2 * (1 - t) * t * ctrl + t² * to```
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub struct QuadraticCurve<S> {
    pub from: Point<S>,
    pub ctrl: Point<S>,
    pub to: Point<S>,
}

impl<S: Scalar> QuadraticCurve<S> {
    #[inline]
    pub fn new(from: Point<S>, ctrl: Point<S>, to: Point<S>) -> Self {
        QuadraticCurve { from, ctrl, to }
    }

    /// Sample the curve at t (expecting t between 0 and 1).
    ///
    /// Evaluated with de Casteljau's algorithm so that the end points are
    /// reproduced exactly at `t = 0` and `t = 1`.
    pub fn sample(&self, t: S) -> Point<S> {
        let a = self.from.lerp(self.ctrl, t);
        let b = self.ctrl.lerp(self.to, t);
        a.lerp(b, t)
    }

    /// Sample the x coordinate of the curve at t (expecting t between 0 and 1).
    pub fn x(&self, t: S) -> S {
        let t2 = t * t;
        let one_t = S::ONE - t;
        let one_t2 = one_t * one_t;

        self.from.x * one_t2 + self.ctrl.x * S::TWO * one_t * t + self.to.x * t2
    }

    /// Sample the y coordinate of the curve at t (expecting t between 0 and 1).
    pub fn y(&self, t: S) -> S {
        let t2 = t * t;
        let one_t = S::ONE - t;
        let one_t2 = one_t * one_t;

        self.from.y * one_t2 + self.ctrl.y * S::TWO * one_t * t + self.to.y * t2
    }

    #[inline]
    fn derivative_coefficients(&self, t: S) -> (S, S, S) {
        (S::TWO * t - S::TWO, -S::FOUR * t + S::TWO, S::TWO * t)
    }

    /// Sample the curve's derivative at t (expecting t between 0 and 1).
    pub fn derivative(&self, t: S) -> Vector<S> {
        let (c0, c1, c2) = self.derivative_coefficients(t);
        self.from.to_vector() * c0 + self.ctrl.to_vector() * c1 + self.to.to_vector() * c2
    }

    /// Swap the beginning and the end of the segment.
    pub fn flip(&self) -> Self {
        QuadraticCurve {
            from: self.to,
            ctrl: self.ctrl,
            to: self.from,
        }
    }

    /// Return the x inflection point or None if this curve is x-monotonic.
    pub fn local_x_extremum_t(&self) -> Option<S> {
        let div = self.from.x - S::TWO * self.ctrl.x + self.to.x;
        if div == S::ZERO {
            return None;
        }
        let t = (self.from.x - self.ctrl.x) / div;
        if t > S::ZERO && t < S::ONE {
            return Some(t);
        }

        None
    }

    /// Return the y inflection point or None if this curve is y-monotonic.
    pub fn local_y_extremum_t(&self) -> Option<S> {
        let div = self.from.y - S::TWO * self.ctrl.y + self.to.y;
        if div == S::ZERO {
            return None;
        }
        let t = (self.from.y - self.ctrl.y) / div;
        if t > S::ZERO && t < S::ONE {
            return Some(t);
        }

        None
    }

    /// Returns the smallest range of x that contains this curve.
    pub fn bounding_range_x(&self) -> (S, S) {
        let (min_x, max_x) = min_max(self.from.x, self.to.x);
        match self.local_x_extremum_t() {
            Some(t) => {
                let x = self.x(t);
                (S::min(min_x, x), S::max(max_x, x))
            }
            None => (min_x, max_x),
        }
    }

    /// Returns the smallest range of y that contains this curve.
    pub fn bounding_range_y(&self) -> (S, S) {
        let (min_y, max_y) = min_max(self.from.y, self.to.y);
        match self.local_y_extremum_t() {
            Some(t) => {
                let y = self.y(t);
                (S::min(min_y, y), S::max(max_y, y))
            }
            None => (min_y, max_y),
        }
    }

    /// Returns the smallest rectangle that contains the curve.
    pub fn bounding_box(&self) -> Box2D<S> {
        let (min_x, max_x) = self.bounding_range_x();
        let (min_y, max_y) = self.bounding_range_y();

        Box2D {
            min: point(min_x, min_y),
            max: point(max_x, max_y),
        }
    }

    /// Returns a conservative rectangle that contains the curve: the bounds of
    /// its control polygon.
    pub fn fast_bounding_box(&self) -> Box2D<S> {
        Box2D::from_points(self.from, self.to).union_point(self.ctrl)
    }

    /// Return the sub-curve inside a given range of t.
    ///
    /// This is equivalent splitting at the range's end points.
    pub fn split_range(&self, t_range: Range<S>) -> Self {
        let t0 = t_range.start;
        let t1 = t_range.end;

        let from = self.sample(t0);
        let to = self.sample(t1);
        let ctrl = from + (self.ctrl - self.from).lerp(self.to - self.ctrl, t0) * (t1 - t0);

        QuadraticCurve { from, ctrl, to }
    }

    /// Split this curve into two sub-curves.
    ///
    /// Both halves share the exact same split point.
    pub fn split(&self, t: S) -> (QuadraticCurve<S>, QuadraticCurve<S>) {
        let ctrl_a = self.from.lerp(self.ctrl, t);
        let ctrl_b = self.ctrl.lerp(self.to, t);
        let split_point = ctrl_a.lerp(ctrl_b, t);

        (
            QuadraticCurve {
                from: self.from,
                ctrl: ctrl_a,
                to: split_point,
            },
            QuadraticCurve {
                from: split_point,
                ctrl: ctrl_b,
                to: self.to,
            },
        )
    }

    /// Return the curve before the split point.
    pub fn before_split(&self, t: S) -> QuadraticCurve<S> {
        self.split(t).0
    }

    /// Return the curve after the split point.
    pub fn after_split(&self, t: S) -> QuadraticCurve<S> {
        self.split(t).1
    }

    /// Elevate this curve to a third order bézier.
    pub fn to_cubic(&self) -> CubicCurve<S> {
        CubicCurve {
            from: self.from,
            ctrl1: (self.from + self.ctrl.to_vector() * S::TWO) / S::THREE,
            ctrl2: (self.to + self.ctrl.to_vector() * S::TWO) / S::THREE,
            to: self.to,
        }
    }

    /// Applies the transform to this curve and returns the results.
    ///
    /// Control points transform like end points, which is exact for affine
    /// transforms.
    #[inline]
    pub fn transformed<T: Transformation<S>>(&self, transform: &T) -> Self {
        QuadraticCurve {
            from: transform.transform_point(self.from),
            ctrl: transform.transform_point(self.ctrl),
            to: transform.transform_point(self.to),
        }
    }

    pub fn is_defined(&self) -> bool {
        [self.from, self.ctrl, self.to]
            .iter()
            .all(|p| p.x.is_finite() && p.y.is_finite())
    }
}

impl<S: Scalar> Hash for QuadraticCurve<S> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        for p in &[self.from, self.ctrl, self.to] {
            p.x.hash_bits().hash(state);
            p.y.hash_bits().hash(state);
        }
    }
}

#[cfg(test)]
fn fuzzy_eq_point(a: Point<f64>, b: Point<f64>) -> bool {
    (a - b).length() < 1e-10
}

#[test]
fn split_shares_the_mid_point() {
    let curve = QuadraticCurve::new(point(0.0, 0.0), point(5.0, 10.0), point(10.0, 0.0));
    let (a, b) = curve.split(0.5);

    assert_eq!(a.to, b.from);
    assert_eq!(a.to, curve.sample(0.5));
    assert_eq!(a.to, point(5.0, 5.0));
    assert_eq!(a.sample(0.0), curve.sample(0.0));
    assert_eq!(b.sample(1.0), curve.sample(1.0));
}

#[test]
fn split_preserves_shape() {
    let curve = QuadraticCurve::new(point(1.0, 2.0), point(-3.0, 7.0), point(4.0, -1.0));
    let (a, b) = curve.split(0.3);

    for i in 0..=10 {
        let t = i as f64 / 10.0;
        assert!(fuzzy_eq_point(a.sample(t), curve.sample(t * 0.3)));
        assert!(fuzzy_eq_point(b.sample(t), curve.sample(0.3 + t * 0.7)));
    }

    assert!(fuzzy_eq_point(curve.split_range(0.3..1.0).ctrl, b.ctrl));
}

#[test]
fn bounding_box() {
    let curve = QuadraticCurve::new(point(0.0, 0.0), point(5.0, 10.0), point(10.0, 0.0));
    let bounds = curve.bounding_box();
    assert_eq!(bounds, Box2D::new(0.0, 0.0, 10.0, 5.0));

    let fast = curve.fast_bounding_box();
    assert!(fast.contains_box(&bounds));
}

#[test]
fn elevation() {
    let curve = QuadraticCurve::new(point(0.0, 0.0), point(3.0, 9.0), point(6.0, 0.0));
    let cubic = curve.to_cubic();
    for i in 0..=8 {
        let t = i as f64 / 8.0;
        assert!(fuzzy_eq_point(curve.sample(t), cubic.sample(t)));
    }
}

#[test]
fn sample_and_x_y_agree() {
    let curve = QuadraticCurve::new(point(1.0, 1.0), point(2.0, 8.0), point(9.0, 3.0));
    for i in 0..=10 {
        let t = i as f64 / 10.0;
        let p = curve.sample(t);
        assert!((p.x - curve.x(t)).abs() < 1e-10);
        assert!((p.y - curve.y(t)).abs() < 1e-10);
    }
}
