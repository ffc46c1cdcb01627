use crate::scalar::Scalar;
use crate::traits::Transformation;
use crate::{point, Box2D, Circle, CubicCurve, EllipticCurve, LineSegment, Point, QuadraticCurve, Vector};

use core::hash::{Hash, Hasher};
use core::ops::Range;

/// Types that can report an axis-aligned bounding box.
pub trait BoundingBox {
    type Scalar: Scalar;

    /// Returns the smallest rectangle that contains the shape.
    fn bounding_box(&self) -> Box2D<Self::Scalar>;

    fn x_min(&self) -> Self::Scalar {
        self.bounding_box().min.x
    }

    fn y_min(&self) -> Self::Scalar {
        self.bounding_box().min.y
    }

    fn x_max(&self) -> Self::Scalar {
        self.bounding_box().max.x
    }

    fn y_max(&self) -> Self::Scalar {
        self.bounding_box().max.y
    }
}

/// Common APIs to curve types.
pub trait ParametricCurve: Copy + Sized {
    type Scalar: Scalar;

    /// Start of the curve.
    fn from(&self) -> Point<Self::Scalar>;

    /// End of the curve.
    fn to(&self) -> Point<Self::Scalar>;

    /// Sample the curve at t (expecting t between 0 and 1).
    fn sample(&self, t: Self::Scalar) -> Point<Self::Scalar>;

    /// Sample x at t (expecting t between 0 and 1).
    fn x(&self, t: Self::Scalar) -> Self::Scalar {
        self.sample(t).x
    }

    /// Sample y at t (expecting t between 0 and 1).
    fn y(&self, t: Self::Scalar) -> Self::Scalar {
        self.sample(t).y
    }

    /// Sample the derivative at t (expecting t between 0 and 1).
    fn derivative(&self, t: Self::Scalar) -> Vector<Self::Scalar>;

    /// Split this curve into two sub-curves.
    fn split(&self, t: Self::Scalar) -> (Self, Self);

    /// Return the curve before the split point.
    fn before_split(&self, t: Self::Scalar) -> Self {
        self.split(t).0
    }

    /// Return the curve after the split point.
    fn after_split(&self, t: Self::Scalar) -> Self {
        self.split(t).1
    }

    /// Return the curve inside a given range of t.
    ///
    /// This is equivalent splitting at the range's end points.
    fn split_range(&self, t_range: Range<Self::Scalar>) -> Self;

    /// Swap the direction of the segment.
    fn flip(&self) -> Self;
}

macro_rules! impl_parametric_curve {
    ($ty:ident) => {
        impl<S: Scalar> ParametricCurve for $ty<S> {
            type Scalar = S;
            fn from(&self) -> Point<S> {
                self.from
            }
            fn to(&self) -> Point<S> {
                self.to
            }
            fn sample(&self, t: S) -> Point<S> {
                self.sample(t)
            }
            fn x(&self, t: S) -> S {
                self.x(t)
            }
            fn y(&self, t: S) -> S {
                self.y(t)
            }
            fn derivative(&self, t: S) -> Vector<S> {
                self.derivative(t)
            }
            fn split(&self, t: S) -> (Self, Self) {
                self.split(t)
            }
            fn before_split(&self, t: S) -> Self {
                self.before_split(t)
            }
            fn after_split(&self, t: S) -> Self {
                self.after_split(t)
            }
            fn split_range(&self, t_range: Range<S>) -> Self {
                self.split_range(t_range)
            }
            fn flip(&self) -> Self {
                self.flip()
            }
        }

        impl<S: Scalar> BoundingBox for $ty<S> {
            type Scalar = S;
            fn bounding_box(&self) -> Box2D<S> {
                self.bounding_box()
            }
        }
    };
}

impl_parametric_curve!(LineSegment);
impl_parametric_curve!(QuadraticCurve);
impl_parametric_curve!(CubicCurve);

impl<S: Scalar> ParametricCurve for EllipticCurve<S> {
    type Scalar = S;
    fn from(&self) -> Point<S> {
        self.sample(S::ZERO)
    }
    fn to(&self) -> Point<S> {
        self.sample(S::ONE)
    }
    fn sample(&self, t: S) -> Point<S> {
        self.sample(t)
    }
    fn derivative(&self, t: S) -> Vector<S> {
        self.derivative(t)
    }
    fn split(&self, t: S) -> (Self, Self) {
        self.split(t)
    }
    fn split_range(&self, t_range: Range<S>) -> Self {
        self.split_range(t_range)
    }
    fn flip(&self) -> Self {
        self.flip()
    }
}

impl<S: Scalar> BoundingBox for EllipticCurve<S> {
    type Scalar = S;
    fn bounding_box(&self) -> Box2D<S> {
        self.bounding_box()
    }
}

impl<S: Scalar> BoundingBox for Point<S> {
    type Scalar = S;
    fn bounding_box(&self) -> Box2D<S> {
        Box2D {
            min: *self,
            max: *self,
        }
    }
}

impl<S: Scalar> BoundingBox for Box2D<S> {
    type Scalar = S;
    fn bounding_box(&self) -> Box2D<S> {
        *self
    }
}

impl<S: Scalar> BoundingBox for Circle<S> {
    type Scalar = S;
    fn bounding_box(&self) -> Box2D<S> {
        self.bounding_box()
    }
}

/// One of the four curve kinds a spline is made of.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub enum Curve<S> {
    Line(LineSegment<S>),
    Quadratic(QuadraticCurve<S>),
    Cubic(CubicCurve<S>),
    Elliptic(EllipticCurve<S>),
}

macro_rules! dispatch {
    ($curve:expr, $c:ident => $e:expr) => {
        match $curve {
            Curve::Line($c) => $e,
            Curve::Quadratic($c) => $e,
            Curve::Cubic($c) => $e,
            Curve::Elliptic($c) => $e,
        }
    };
}

macro_rules! dispatch_map {
    ($curve:expr, $c:ident => $e:expr) => {
        match $curve {
            Curve::Line($c) => Curve::Line($e),
            Curve::Quadratic($c) => Curve::Quadratic($e),
            Curve::Cubic($c) => Curve::Cubic($e),
            Curve::Elliptic($c) => Curve::Elliptic($e),
        }
    };
}

impl<S: Scalar> Curve<S> {
    /// Applies the transform to this curve and returns the results.
    pub fn transformed<T: Transformation<S>>(&self, transform: &T) -> Self {
        dispatch_map!(self, c => c.transformed(transform))
    }

    pub fn is_defined(&self) -> bool {
        dispatch!(self, c => c.is_defined())
    }

    /// Returns this curve as a cubic bézier curve, if it can be represented
    /// exactly as one.
    ///
    /// Elliptic arcs can't.
    pub fn to_cubic(&self) -> Option<CubicCurve<S>> {
        match self {
            Curve::Line(line) => Some(CubicCurve {
                from: line.from,
                ctrl1: line.sample(S::ONE / S::THREE),
                ctrl2: line.sample(S::TWO / S::THREE),
                to: line.to,
            }),
            Curve::Quadratic(quad) => Some(quad.to_cubic()),
            Curve::Cubic(cubic) => Some(*cubic),
            Curve::Elliptic(_) => None,
        }
    }

    /// Returns the variant as a string, for diagnostics.
    pub fn kind(&self) -> &'static str {
        match self {
            Curve::Line(_) => "line",
            Curve::Quadratic(_) => "quadratic",
            Curve::Cubic(_) => "cubic",
            Curve::Elliptic(_) => "elliptic",
        }
    }
}

impl<S: Scalar> ParametricCurve for Curve<S> {
    type Scalar = S;

    fn from(&self) -> Point<S> {
        dispatch!(self, c => ParametricCurve::from(c))
    }

    fn to(&self) -> Point<S> {
        dispatch!(self, c => ParametricCurve::to(c))
    }

    fn sample(&self, t: S) -> Point<S> {
        dispatch!(self, c => c.sample(t))
    }

    fn x(&self, t: S) -> S {
        dispatch!(self, c => c.x(t))
    }

    fn y(&self, t: S) -> S {
        dispatch!(self, c => c.y(t))
    }

    fn derivative(&self, t: S) -> Vector<S> {
        dispatch!(self, c => c.derivative(t))
    }

    fn split(&self, t: S) -> (Self, Self) {
        match self {
            Curve::Line(c) => {
                let (a, b) = c.split(t);
                (Curve::Line(a), Curve::Line(b))
            }
            Curve::Quadratic(c) => {
                let (a, b) = c.split(t);
                (Curve::Quadratic(a), Curve::Quadratic(b))
            }
            Curve::Cubic(c) => {
                let (a, b) = c.split(t);
                (Curve::Cubic(a), Curve::Cubic(b))
            }
            Curve::Elliptic(c) => {
                let (a, b) = c.split(t);
                (Curve::Elliptic(a), Curve::Elliptic(b))
            }
        }
    }

    fn split_range(&self, t_range: Range<S>) -> Self {
        dispatch_map!(self, c => c.split_range(t_range))
    }

    fn flip(&self) -> Self {
        dispatch_map!(self, c => c.flip())
    }
}

impl<S: Scalar> BoundingBox for Curve<S> {
    type Scalar = S;
    fn bounding_box(&self) -> Box2D<S> {
        dispatch!(self, c => c.bounding_box())
    }
}

impl<S> From<LineSegment<S>> for Curve<S> {
    fn from(c: LineSegment<S>) -> Self {
        Curve::Line(c)
    }
}

impl<S> From<QuadraticCurve<S>> for Curve<S> {
    fn from(c: QuadraticCurve<S>) -> Self {
        Curve::Quadratic(c)
    }
}

impl<S> From<CubicCurve<S>> for Curve<S> {
    fn from(c: CubicCurve<S>) -> Self {
        Curve::Cubic(c)
    }
}

impl<S> From<EllipticCurve<S>> for Curve<S> {
    fn from(c: EllipticCurve<S>) -> Self {
        Curve::Elliptic(c)
    }
}

impl<S: Scalar> Hash for Curve<S> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        core::mem::discriminant(self).hash(state);
        dispatch!(self, c => c.hash(state))
    }
}

#[cfg(test)]
use crate::{vector, Angle};

#[cfg(test)]
fn test_curves() -> [Curve<f64>; 4] {
    [
        Curve::Line(LineSegment::new(0.0, 0.0, 4.0, 3.0)),
        Curve::Quadratic(QuadraticCurve::new(point(0.0, 0.0), point(2.0, 6.0), point(4.0, 0.0))),
        Curve::Cubic(CubicCurve::new(
            point(0.0, 0.0),
            point(1.0, 4.0),
            point(3.0, -4.0),
            point(4.0, 0.0),
        )),
        Curve::Elliptic(EllipticCurve::new(
            point(0.0, 0.0),
            vector(3.0, 2.0),
            Angle::radians(0.2),
            Angle::radians(0.5),
            Angle::radians(2.5),
        )),
    ]
}

#[test]
fn split_consistency() {
    for curve in &test_curves() {
        for i in 0..=4 {
            let t = i as f64 / 4.0;
            let (a, b) = curve.split(t);
            assert_eq!(a.sample(1.0), b.sample(0.0), "{}", curve.kind());
            assert_eq!(a.sample(0.0), curve.sample(0.0), "{}", curve.kind());
            assert!((b.sample(1.0) - curve.sample(1.0)).length() < 1e-12);
        }
    }
}

#[test]
fn bounds_contain_samples() {
    for curve in &test_curves() {
        let bounds = curve.bounding_box().inflate(1e-9, 1e-9);
        for i in 0..=50 {
            assert!(bounds.contains_point(curve.sample(i as f64 / 50.0)));
        }
        assert!(curve.x_min() <= curve.x_max());
        assert!(curve.y_min() <= curve.y_max());
    }
}

#[test]
fn cubic_conversion() {
    let [line, quad, cubic, arc] = test_curves();
    for curve in &[line, quad, cubic] {
        let c = curve.to_cubic().unwrap();
        for i in 0..=4 {
            let t = i as f64 / 4.0;
            assert!((c.sample(t) - curve.sample(t)).length() < 1e-12);
        }
    }
    assert!(arc.to_cubic().is_none());
}

#[test]
fn endpoints_of_flipped_curves() {
    for curve in &test_curves() {
        let flipped = curve.flip();
        assert!((flipped.from() - curve.to()).length() < 1e-12);
        assert!((flipped.to() - curve.from()).length() < 1e-12);
    }
}
