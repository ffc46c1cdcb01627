use crate::scalar::Scalar;
use crate::traits::Transformation;
use crate::utils::{min_max, quadratic_polynomial_roots};
use crate::{point, Box2D, Point, Vector};
use arrayvec::ArrayVec;

use core::hash::{Hash, Hasher};
use core::ops::Range;

/// A 2d curve segment defined by four points: the beginning of the segment, two control
/// points and the end of the segment.
///
/// The curve is defined by equation:
/// ```∀ t ∈ [0..1],  P(t) = (1 - t)³ * from + 3 * (1 - t)² * t * ctrl1 + 3 * t² * (1 - t) * ctrl2 + t³ * to```
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub struct CubicCurve<S> {
    pub from: Point<S>,
    pub ctrl1: Point<S>,
    pub ctrl2: Point<S>,
    pub to: Point<S>,
}

impl<S: Scalar> CubicCurve<S> {
    #[inline]
    pub fn new(from: Point<S>, ctrl1: Point<S>, ctrl2: Point<S>, to: Point<S>) -> Self {
        CubicCurve {
            from,
            ctrl1,
            ctrl2,
            to,
        }
    }

    // The three levels of de Casteljau's construction at t.
    #[inline]
    fn de_casteljau(&self, t: S) -> ([Point<S>; 3], [Point<S>; 2], Point<S>) {
        let a = self.from.lerp(self.ctrl1, t);
        let b = self.ctrl1.lerp(self.ctrl2, t);
        let c = self.ctrl2.lerp(self.to, t);
        let ab = a.lerp(b, t);
        let bc = b.lerp(c, t);
        let abc = ab.lerp(bc, t);

        ([a, b, c], [ab, bc], abc)
    }

    /// Sample the curve at t (expecting t between 0 and 1).
    pub fn sample(&self, t: S) -> Point<S> {
        self.de_casteljau(t).2
    }

    /// Sample the x coordinate of the curve at t (expecting t between 0 and 1).
    pub fn x(&self, t: S) -> S {
        let t2 = t * t;
        let t3 = t2 * t;
        let one_t = S::ONE - t;
        let one_t2 = one_t * one_t;
        let one_t3 = one_t2 * one_t;

        self.from.x * one_t3
            + self.ctrl1.x * S::THREE * one_t2 * t
            + self.ctrl2.x * S::THREE * one_t * t2
            + self.to.x * t3
    }

    /// Sample the y coordinate of the curve at t (expecting t between 0 and 1).
    pub fn y(&self, t: S) -> S {
        let t2 = t * t;
        let t3 = t2 * t;
        let one_t = S::ONE - t;
        let one_t2 = one_t * one_t;
        let one_t3 = one_t2 * one_t;

        self.from.y * one_t3
            + self.ctrl1.y * S::THREE * one_t2 * t
            + self.ctrl2.y * S::THREE * one_t * t2
            + self.to.y * t3
    }

    /// Sample the curve's derivative at t (expecting t between 0 and 1).
    pub fn derivative(&self, t: S) -> Vector<S> {
        let one_t = S::ONE - t;
        let d0 = self.ctrl1 - self.from;
        let d1 = self.ctrl2 - self.ctrl1;
        let d2 = self.to - self.ctrl2;

        (d0 * (one_t * one_t) + d1 * (S::TWO * one_t * t) + d2 * (t * t)) * S::THREE
    }

    /// Swap the beginning and the end of the segment.
    pub fn flip(&self) -> Self {
        CubicCurve {
            from: self.to,
            ctrl1: self.ctrl2,
            ctrl2: self.ctrl1,
            to: self.from,
        }
    }

    // Roots of the derivative of one coordinate in ]0, 1[.
    fn local_extrema_t(p0: S, p1: S, p2: S, p3: S) -> ArrayVec<S, 2> {
        let a = p3 - S::THREE * p2 + S::THREE * p1 - p0;
        let b = S::TWO * (p2 - S::TWO * p1 + p0);
        let c = p1 - p0;

        quadratic_polynomial_roots(a, b, c)
            .into_iter()
            .filter(|&t| t > S::ZERO && t < S::ONE)
            .collect()
    }

    /// Values of t in ]0, 1[ where the x coordinate reaches a local extremum.
    pub fn local_x_extrema_t(&self) -> ArrayVec<S, 2> {
        Self::local_extrema_t(self.from.x, self.ctrl1.x, self.ctrl2.x, self.to.x)
    }

    /// Values of t in ]0, 1[ where the y coordinate reaches a local extremum.
    pub fn local_y_extrema_t(&self) -> ArrayVec<S, 2> {
        Self::local_extrema_t(self.from.y, self.ctrl1.y, self.ctrl2.y, self.to.y)
    }

    /// Returns the smallest range of x that contains this curve.
    pub fn bounding_range_x(&self) -> (S, S) {
        let (mut min_x, mut max_x) = min_max(self.from.x, self.to.x);
        for t in self.local_x_extrema_t() {
            let x = self.x(t);
            min_x = S::min(min_x, x);
            max_x = S::max(max_x, x);
        }

        (min_x, max_x)
    }

    /// Returns the smallest range of y that contains this curve.
    pub fn bounding_range_y(&self) -> (S, S) {
        let (mut min_y, mut max_y) = min_max(self.from.y, self.to.y);
        for t in self.local_y_extrema_t() {
            let y = self.y(t);
            min_y = S::min(min_y, y);
            max_y = S::max(max_y, y);
        }

        (min_y, max_y)
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
        Box2D::from_points(self.from, self.to)
            .union_point(self.ctrl1)
            .union_point(self.ctrl2)
    }

    /// Split this curve into two sub-curves.
    ///
    /// Both halves share the exact same split point.
    pub fn split(&self, t: S) -> (CubicCurve<S>, CubicCurve<S>) {
        let ([a, _, c], [ab, bc], abc) = self.de_casteljau(t);

        (
            CubicCurve {
                from: self.from,
                ctrl1: a,
                ctrl2: ab,
                to: abc,
            },
            CubicCurve {
                from: abc,
                ctrl1: bc,
                ctrl2: c,
                to: self.to,
            },
        )
    }

    /// Return the curve before the split point.
    pub fn before_split(&self, t: S) -> CubicCurve<S> {
        self.split(t).0
    }

    /// Return the curve after the split point.
    pub fn after_split(&self, t: S) -> CubicCurve<S> {
        self.split(t).1
    }

    /// Return the sub-curve inside a given range of t.
    ///
    /// This is equivalent splitting at the range's end points.
    pub fn split_range(&self, t_range: Range<S>) -> Self {
        let after = self.after_split(t_range.start);
        let span = S::ONE - t_range.start;
        if span == S::ZERO {
            return after;
        }

        after.before_split((t_range.end - t_range.start) / span)
    }

    /// Applies the transform to this curve and returns the results.
    #[inline]
    pub fn transformed<T: Transformation<S>>(&self, transform: &T) -> Self {
        CubicCurve {
            from: transform.transform_point(self.from),
            ctrl1: transform.transform_point(self.ctrl1),
            ctrl2: transform.transform_point(self.ctrl2),
            to: transform.transform_point(self.to),
        }
    }

    pub fn is_defined(&self) -> bool {
        [self.from, self.ctrl1, self.ctrl2, self.to]
            .iter()
            .all(|p| p.x.is_finite() && p.y.is_finite())
    }
}

impl<S: Scalar> Hash for CubicCurve<S> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        for p in &[self.from, self.ctrl1, self.ctrl2, self.to] {
            p.x.hash_bits().hash(state);
            p.y.hash_bits().hash(state);
        }
    }
}

#[cfg(test)]
fn fuzzy_eq_point(a: Point<f64>, b: Point<f64>) -> bool {
    (a - b).length() < 1e-9
}

#[test]
fn split_consistency() {
    let curve = CubicCurve::new(
        point(0.0, 0.0),
        point(1.0, 5.0),
        point(7.0, -3.0),
        point(10.0, 2.0),
    );

    for i in 0..=10 {
        let t = i as f64 / 10.0;
        let (a, b) = curve.split(t);
        assert_eq!(a.to, b.from);
        assert_eq!(a.sample(1.0), b.sample(0.0));
        assert_eq!(a.sample(0.0), curve.sample(0.0));
        assert_eq!(b.sample(1.0), curve.sample(1.0));
        assert_eq!(a.to, curve.sample(t));
    }
}

#[test]
fn split_range() {
    let curve = CubicCurve::new(
        point(0.0, 0.0),
        point(1.0, 5.0),
        point(7.0, -3.0),
        point(10.0, 2.0),
    );
    let sub = curve.split_range(0.25..0.75);
    assert!(fuzzy_eq_point(sub.from, curve.sample(0.25)));
    assert!(fuzzy_eq_point(sub.to, curve.sample(0.75)));
    assert!(fuzzy_eq_point(sub.sample(0.5), curve.sample(0.5)));
}

#[test]
fn bounding_box() {
    // S shaped curve with extrema strictly inside on the y axis.
    let curve = CubicCurve::new(
        point(0.0, 0.0),
        point(0.0, 10.0),
        point(10.0, -10.0),
        point(10.0, 0.0),
    );

    let bounds = curve.bounding_box();
    let (min_y, max_y): (f64, f64) = curve.bounding_range_y();
    assert!(max_y > 2.8 && max_y < 2.9);
    assert!((min_y + max_y).abs() < 1e-12);
    assert_eq!(bounds.min.x, 0.0);
    assert_eq!(bounds.max.x, 10.0);

    for i in 0..=100 {
        let p = curve.sample(i as f64 / 100.0);
        assert!(bounds.inflate(1e-9, 1e-9).contains_point(p));
    }
}

#[test]
fn derivative() {
    let curve = CubicCurve::new(
        point(0.0, 0.0),
        point(1.0, 0.0),
        point(2.0, 0.0),
        point(3.0, 0.0),
    );
    assert!(fuzzy_eq_point(curve.derivative(0.5).to_point(), point(3.0, 0.0)));
}
