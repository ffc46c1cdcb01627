//! Linear interpolation between two values of the same kind, for animations.
//!
//! Every field is blended independently with `a * (1 - u) + b * u`, which
//! returns `a` at `u = 0` and `b` at `u = 1` exactly.

use crate::scalar::Scalar;
use crate::{
    Angle, Box2D, Circle, CubicCurve, Curve, EllipticCurve, LineSegment, Point, QuadraticCurve,
    Shape, Vector,
};

/// Types that can be blended with another value of the same type.
pub trait Interpolate<S>: Sized {
    /// Returns the value at `u` between `self` (`u = 0`) and `other` (`u = 1`).
    fn lerp(&self, other: &Self, u: S) -> Self;

    /// Returns an interpolator from `self` to `to`.
    fn interpolate_to(&self, to: &Self) -> Interpolator<Self>
    where
        Self: Clone,
    {
        Interpolator::new(self.clone(), to.clone())
    }
}

/// The two end points of an animation.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub struct Interpolator<T> {
    pub from: T,
    pub to: T,
}

impl<T> Interpolator<T> {
    #[inline]
    pub fn new(from: T, to: T) -> Self {
        Interpolator { from, to }
    }

    /// Returns the value at `u`, `u` being expected between 0 and 1.
    #[inline]
    pub fn interpolate<S>(&self, u: S) -> T
    where
        T: Interpolate<S>,
    {
        self.from.lerp(&self.to, u)
    }

    /// The interpolator going from `to` to `from`.
    pub fn reversed(self) -> Self {
        Interpolator {
            from: self.to,
            to: self.from,
        }
    }
}

#[inline]
fn lerp_scalar<S: Scalar>(a: S, b: S, u: S) -> S {
    a * (S::ONE - u) + b * u
}

impl Interpolate<f32> for f32 {
    #[inline]
    fn lerp(&self, other: &Self, u: f32) -> Self {
        lerp_scalar(*self, *other, u)
    }
}

impl Interpolate<f64> for f64 {
    #[inline]
    fn lerp(&self, other: &Self, u: f64) -> Self {
        lerp_scalar(*self, *other, u)
    }
}

#[inline]
fn lerp_point<S: Scalar>(a: Point<S>, b: Point<S>, u: S) -> Point<S> {
    Point::new(lerp_scalar(a.x, b.x, u), lerp_scalar(a.y, b.y, u))
}

#[inline]
fn lerp_vector<S: Scalar>(a: Vector<S>, b: Vector<S>, u: S) -> Vector<S> {
    Vector::new(lerp_scalar(a.x, b.x, u), lerp_scalar(a.y, b.y, u))
}

#[inline]
fn lerp_angle<S: Scalar>(a: Angle<S>, b: Angle<S>, u: S) -> Angle<S> {
    Angle::radians(lerp_scalar(a.radians, b.radians, u))
}

impl<S: Scalar> Interpolate<S> for Point<S> {
    #[inline]
    fn lerp(&self, other: &Self, u: S) -> Self {
        lerp_point(*self, *other, u)
    }
}

impl<S: Scalar> Interpolate<S> for Vector<S> {
    #[inline]
    fn lerp(&self, other: &Self, u: S) -> Self {
        lerp_vector(*self, *other, u)
    }
}

impl<S: Scalar> Interpolate<S> for Angle<S> {
    #[inline]
    fn lerp(&self, other: &Self, u: S) -> Self {
        lerp_angle(*self, *other, u)
    }
}

impl<S: Scalar> Interpolate<S> for LineSegment<S> {
    fn lerp(&self, other: &Self, u: S) -> Self {
        LineSegment {
            from: lerp_point(self.from, other.from, u),
            to: lerp_point(self.to, other.to, u),
        }
    }
}

impl<S: Scalar> Interpolate<S> for Box2D<S> {
    fn lerp(&self, other: &Self, u: S) -> Self {
        Box2D {
            min: lerp_point(self.min, other.min, u),
            max: lerp_point(self.max, other.max, u),
        }
    }
}

impl<S: Scalar> Interpolate<S> for Circle<S> {
    fn lerp(&self, other: &Self, u: S) -> Self {
        Circle {
            center: lerp_point(self.center, other.center, u),
            radius: lerp_scalar(self.radius, other.radius, u),
        }
    }
}

impl<S: Scalar> Interpolate<S> for QuadraticCurve<S> {
    fn lerp(&self, other: &Self, u: S) -> Self {
        QuadraticCurve {
            from: lerp_point(self.from, other.from, u),
            ctrl: lerp_point(self.ctrl, other.ctrl, u),
            to: lerp_point(self.to, other.to, u),
        }
    }
}

impl<S: Scalar> Interpolate<S> for CubicCurve<S> {
    fn lerp(&self, other: &Self, u: S) -> Self {
        CubicCurve {
            from: lerp_point(self.from, other.from, u),
            ctrl1: lerp_point(self.ctrl1, other.ctrl1, u),
            ctrl2: lerp_point(self.ctrl2, other.ctrl2, u),
            to: lerp_point(self.to, other.to, u),
        }
    }
}

impl<S: Scalar> Interpolate<S> for EllipticCurve<S> {
    fn lerp(&self, other: &Self, u: S) -> Self {
        EllipticCurve {
            center: lerp_point(self.center, other.center, u),
            radii: lerp_vector(self.radii, other.radii, u),
            x_rotation: lerp_angle(self.x_rotation, other.x_rotation, u),
            start_angle: lerp_angle(self.start_angle, other.start_angle, u),
            sweep_angle: lerp_angle(self.sweep_angle, other.sweep_angle, u),
        }
    }
}

impl<S: Scalar> Interpolate<S> for Curve<S> {
    /// Curves of the same kind are blended field by field. Lines, quadratic
    /// and cubic curves of different kinds are blended as cubic curves in
    /// between the end points. Anything else jumps to `other` at `u = 1`.
    fn lerp(&self, other: &Self, u: S) -> Self {
        match (self, other) {
            (Curve::Line(a), Curve::Line(b)) => Curve::Line(a.lerp(b, u)),
            (Curve::Quadratic(a), Curve::Quadratic(b)) => Curve::Quadratic(a.lerp(b, u)),
            (Curve::Cubic(a), Curve::Cubic(b)) => Curve::Cubic(a.lerp(b, u)),
            (Curve::Elliptic(a), Curve::Elliptic(b)) => Curve::Elliptic(a.lerp(b, u)),
            _ => step(self, other, u, |a, b| match (a.to_cubic(), b.to_cubic()) {
                (Some(a), Some(b)) => Curve::Cubic(a.lerp(&b, u)),
                _ => *a,
            }),
        }
    }
}

impl<S: Scalar> Interpolate<S> for Shape<S> {
    /// Shapes of different kinds jump to `other` at `u = 1`.
    fn lerp(&self, other: &Self, u: S) -> Self {
        match (self, other) {
            (Shape::Point(a), Shape::Point(b)) => Shape::Point(lerp_point(*a, *b, u)),
            (Shape::Segment(a), Shape::Segment(b)) => Shape::Segment(a.lerp(b, u)),
            (Shape::Box(a), Shape::Box(b)) => Shape::Box(a.lerp(b, u)),
            (Shape::Circle(a), Shape::Circle(b)) => Shape::Circle(a.lerp(b, u)),
            _ => step(self, other, u, |a, _| *a),
        }
    }
}

/// Handles the end points of interpolations between incompatible values.
///
/// Returns `from` before and at `u = 0`, `to` from `u = 1` on, and calls
/// `between` otherwise.
pub fn step<S: Scalar, T: Clone>(from: &T, to: &T, u: S, between: impl Fn(&T, &T) -> T) -> T {
    if u <= S::ZERO {
        from.clone()
    } else if u >= S::ONE {
        to.clone()
    } else {
        between(from, to)
    }
}

#[cfg(test)]
use crate::{point, vector};

#[test]
fn boundaries_are_exact() {
    let a = Box2D::new(0.1, 0.2, 10.3, 10.7);
    let b = Box2D::new(-3.3, 1.9, 7.1, 20.0);
    let i = a.interpolate_to(&b);
    assert_eq!(i.interpolate(0.0), a);
    assert_eq!(i.interpolate(1.0), b);

    let c0 = Circle::new(0.3, 0.1, 1.7);
    let c1 = Circle::new(-9.1, 4.4, 0.3);
    let ci = Interpolator::new(c0, c1);
    assert_eq!(ci.interpolate(0.0), c0);
    assert_eq!(ci.interpolate(1.0), c1);

    let s0 = LineSegment::new(0.1, 0.7, 0.3, 0.9);
    let s1 = LineSegment::new(1.1, -0.7, 5.3, 2.9);
    assert_eq!(s0.lerp(&s1, 0.0), s0);
    assert_eq!(s0.lerp(&s1, 1.0), s1);

    let v0 = vector(0.1f32, 0.2);
    let v1 = vector(-7.3f32, 3.3);
    let vi = Interpolator::new(v0, v1);
    assert_eq!(vi.interpolate(0.0), v0);
    assert_eq!(vi.interpolate(1.0), v1);
}

#[test]
fn mid_point() {
    let i = Interpolator::new(Circle::new(0.0, 0.0, 1.0), Circle::new(10.0, 20.0, 3.0));
    assert_eq!(i.interpolate(0.5), Circle::new(5.0, 10.0, 2.0));
    assert_eq!(i.reversed().interpolate(0.25), Circle::new(7.5, 15.0, 2.5));
}

#[test]
fn mismatched_curves() {
    let line = Curve::Line(LineSegment::new(0.0, 0.0, 3.0, 0.0));
    let quad = Curve::Quadratic(QuadraticCurve::new(point(0.0, 0.0), point(1.5, 3.0), point(3.0, 0.0)));
    let i = Interpolator::new(line, quad);

    assert_eq!(i.interpolate(0.0), line);
    assert_eq!(i.interpolate(1.0), quad);
    match i.interpolate(0.5) {
        Curve::Cubic(c) => {
            assert_eq!(c.from, point(0.0, 0.0));
            assert_eq!(c.to, point(3.0, 0.0));
        }
        other => panic!("{:?}", other),
    }
}

#[test]
fn mismatched_shapes() {
    let p = Shape::Point(point(1.0, 1.0));
    let c = Shape::Circle(Circle::new(0.0, 0.0, 2.0));
    assert_eq!(p.lerp(&c, 0.0), p);
    assert_eq!(p.lerp(&c, 0.99), p);
    assert_eq!(p.lerp(&c, 1.0), c);
}
