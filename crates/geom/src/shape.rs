use crate::curve::BoundingBox;
use crate::scalar::Scalar;
use crate::traits::Transformation;
use crate::{point, Box2D, Circle, LineSegment, Point};

use core::hash::{Hash, Hasher};

/// The closed set of primitive shapes that can be tested against each other.
///
/// `contains` and `intersects` are exact for every pair of variants.
/// `intersects` is symmetric: each pair is implemented once and the reversed
/// pair delegates to it.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub enum Shape<S> {
    Point(Point<S>),
    Segment(LineSegment<S>),
    Box(Box2D<S>),
    Circle(Circle<S>),
}

impl<S: Scalar> Shape<S> {
    #[inline]
    pub fn contains_xy(&self, x: S, y: S) -> bool {
        self.contains_point(point(x, y))
    }

    pub fn contains_point(&self, p: Point<S>) -> bool {
        match self {
            Shape::Point(q) => *q == p,
            Shape::Segment(segment) => segment.contains_point(p),
            Shape::Box(b) => b.contains_point(p),
            Shape::Circle(circle) => circle.contains_point(p),
        }
    }

    /// Returns whether `other` lies entirely inside this shape.
    pub fn contains(&self, other: &Shape<S>) -> bool {
        match *other {
            Shape::Point(p) => self.contains_point(p),
            Shape::Segment(ref segment) => match self {
                Shape::Point(p) => segment.from == *p && segment.to == *p,
                Shape::Segment(s) => s.contains_segment(segment),
                Shape::Box(b) => b.contains_segment(segment),
                Shape::Circle(c) => c.contains_segment(segment),
            },
            Shape::Box(ref other_box) => match self {
                Shape::Point(p) => other_box.min == *p && other_box.max == *p,
                // Only a degenerate box can lie on a segment.
                Shape::Segment(s) => other_box
                    .edges()
                    .iter()
                    .all(|edge| s.contains_segment(edge)),
                Shape::Box(b) => b.contains_box(other_box),
                Shape::Circle(c) => c.contains_box(other_box),
            },
            Shape::Circle(ref circle) => match self {
                Shape::Point(p) => circle.radius == S::ZERO && circle.center == *p,
                Shape::Segment(s) => circle.radius == S::ZERO && s.contains_point(circle.center),
                Shape::Box(b) => b.contains_circle(circle),
                Shape::Circle(c) => c.contains_circle(circle),
            },
        }
    }

    /// Containment test against anything that has bounds.
    ///
    /// Only the bounds of `other` are considered.
    pub fn contains_bounds<B: BoundingBox<Scalar = S>>(&self, other: &B) -> bool {
        self.bounding_box().contains_box(&other.bounding_box())
    }

    /// Returns whether the two shapes have at least one point in common.
    pub fn intersects(&self, other: &Shape<S>) -> bool {
        match (self, other) {
            (Shape::Point(a), Shape::Point(b)) => a == b,
            (Shape::Point(p), Shape::Segment(s)) => s.contains_point(*p),
            (Shape::Point(p), Shape::Box(b)) => b.contains_point(*p),
            (Shape::Point(p), Shape::Circle(c)) => c.contains_point(*p),
            (Shape::Segment(a), Shape::Segment(b)) => a.intersects(b),
            (Shape::Segment(s), Shape::Box(b)) => b.intersects_segment(s),
            (Shape::Segment(s), Shape::Circle(c)) => c.intersects_segment(s),
            (Shape::Box(a), Shape::Box(b)) => a.intersects_box(b),
            (Shape::Box(b), Shape::Circle(c)) => b.intersects_circle(c),
            (Shape::Circle(a), Shape::Circle(b)) => a.intersects_circle(b),
            _ => other.intersects(self),
        }
    }

    /// The smallest box containing both shapes.
    #[inline]
    pub fn union(&self, other: &Shape<S>) -> Box2D<S> {
        self.bounding_box().union(&other.bounding_box())
    }

    /// Applies the transform to this shape.
    ///
    /// Boxes stay axis-aligned, the result is the bounding box of the
    /// transformed corners. Circles stay circles that contain the transformed
    /// disc.
    pub fn transformed<T: Transformation<S>>(&self, transform: &T) -> Self {
        match self {
            Shape::Point(p) => Shape::Point(transform.transform_point(*p)),
            Shape::Segment(s) => Shape::Segment(s.transformed(transform)),
            Shape::Box(b) => Shape::Box(b.transformed(transform)),
            Shape::Circle(c) => Shape::Circle(c.transformed(transform)),
        }
    }

    pub fn is_defined(&self) -> bool {
        match self {
            Shape::Point(p) => p.x.is_finite() && p.y.is_finite(),
            Shape::Segment(s) => s.is_defined(),
            Shape::Box(b) => b.is_defined(),
            Shape::Circle(c) => c.is_defined() && c.radius >= S::ZERO,
        }
    }
}

impl<S: Scalar> BoundingBox for Shape<S> {
    type Scalar = S;

    fn bounding_box(&self) -> Box2D<S> {
        match self {
            Shape::Point(p) => Box2D { min: *p, max: *p },
            Shape::Segment(s) => s.bounding_box(),
            Shape::Box(b) => *b,
            Shape::Circle(c) => c.bounding_box(),
        }
    }
}

impl<S: Scalar> Hash for Shape<S> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        core::mem::discriminant(self).hash(state);
        match self {
            Shape::Point(p) => {
                p.x.hash_bits().hash(state);
                p.y.hash_bits().hash(state);
            }
            Shape::Segment(s) => s.hash(state),
            Shape::Box(b) => b.hash(state),
            Shape::Circle(c) => c.hash(state),
        }
    }
}

impl<S> From<Point<S>> for Shape<S> {
    fn from(p: Point<S>) -> Self {
        Shape::Point(p)
    }
}

impl<S> From<LineSegment<S>> for Shape<S> {
    fn from(s: LineSegment<S>) -> Self {
        Shape::Segment(s)
    }
}

impl<S> From<Box2D<S>> for Shape<S> {
    fn from(b: Box2D<S>) -> Self {
        Shape::Box(b)
    }
}

impl<S> From<Circle<S>> for Shape<S> {
    fn from(c: Circle<S>) -> Self {
        Shape::Circle(c)
    }
}

#[cfg(test)]
fn test_shapes() -> std::vec::Vec<Shape<f64>> {
    std::vec![
        Shape::Point(point(0.0, 0.0)),
        Shape::Point(point(5.0, 5.0)),
        Shape::Point(point(12.0, -3.0)),
        Shape::Segment(LineSegment::new(-5.0, 5.0, 15.0, 5.0)),
        Shape::Segment(LineSegment::new(0.0, 0.0, 10.0, 10.0)),
        Shape::Segment(LineSegment::new(20.0, 0.0, 20.0, 30.0)),
        Shape::Segment(LineSegment::new(4.0, 4.0, 4.0, 4.0)),
        Shape::Box(Box2D::new(0.0, 0.0, 10.0, 10.0)),
        Shape::Box(Box2D::new(10.0, 10.0, 20.0, 12.0)),
        Shape::Box(Box2D::new(-4.0, -4.0, -1.0, -1.0)),
        Shape::Circle(Circle::new(15.0, 5.0, 4.0)),
        Shape::Circle(Circle::new(15.0, 5.0, 6.0)),
        Shape::Circle(Circle::new(0.0, 0.0, 1.0)),
        Shape::Circle(Circle::new(5.0, 5.0, 0.0)),
    ]
}

#[test]
fn intersects_is_symmetric() {
    let shapes = test_shapes();
    for a in &shapes {
        for b in &shapes {
            assert_eq!(a.intersects(b), b.intersects(a), "{:?} {:?}", a, b);
        }
    }
}

#[test]
fn union_contains_both() {
    let shapes = test_shapes();
    for a in &shapes {
        for b in &shapes {
            let u = Shape::Box(a.union(b));
            assert!(u.contains(a), "{:?} {:?}", a, b);
            assert!(u.contains(b), "{:?} {:?}", a, b);
        }
    }
}

#[test]
fn contains_itself() {
    for shape in &test_shapes() {
        assert!(shape.contains(shape), "{:?}", shape);
    }
}

#[test]
fn box_and_circle() {
    let b = Shape::from(Box2D::new(0.0, 0.0, 10.0, 10.0));
    assert!(!b.intersects(&Circle::new(15.0, 5.0, 4.0).into()));
    assert!(b.intersects(&Circle::new(15.0, 5.0, 6.0).into()));
    assert!(b.contains(&Circle::new(5.0, 5.0, 2.0).into()));
    assert!(b.contains_xy(10.0, 0.0));
}

#[test]
fn degenerate_box_on_segment() {
    let s = Shape::from(LineSegment::new(0.0, 0.0, 10.0, 0.0));
    assert!(s.contains(&Box2D::new(2.0, 0.0, 4.0, 0.0).into()));
    assert!(!s.contains(&Box2D::new(2.0, 0.0, 4.0, 1.0).into()));
}

#[test]
fn contains_bounds_of_curves() {
    use crate::QuadraticCurve;

    let b = Shape::from(Box2D::new(0.0, 0.0, 10.0, 10.0));
    let inside = QuadraticCurve::new(point(1.0, 1.0), point(5.0, 9.0), point(9.0, 1.0));
    let outside = QuadraticCurve::new(point(1.0, 1.0), point(5.0, 30.0), point(9.0, 1.0));
    assert!(b.contains_bounds(&inside));
    assert!(!b.contains_bounds(&outside));
}

#[test]
fn transformed_keeps_kind() {
    use crate::{Rotation, Translation};

    let t = Translation::new(1.0, 2.0);
    let c = Shape::from(Circle::new(0.0, 0.0, 3.0));
    assert_eq!(c.transformed(&t), Shape::Circle(Circle::new(1.0, 2.0, 3.0)));

    let b = Shape::from(Box2D::new(0.0, 0.0, 2.0, 2.0));
    match b.transformed(&Rotation::radians(1.0)) {
        Shape::Box(r) => assert!(r.is_defined()),
        other => panic!("{:?}", other),
    }
}
