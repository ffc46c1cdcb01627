use crate::curve::BoundingBox;
use crate::error::{expect_arity, InitError};
use crate::scalar::Scalar;
use crate::traits::Transformation;
use crate::{point, Circle, LineSegment, Point, Vector};

use core::hash::{Hash, Hasher};

/// An axis-aligned rectangle defined by its minimum and maximum corners.
///
/// A box is *defined* when `min.x <= max.x`, `min.y <= max.y` and all
/// coordinates are finite. [`Box2D::undefined`] spans from `+∞` to `-∞` so that
/// it is the identity element of [`Box2D::union`]: folding bounds starting from
/// it never needs a special first iteration.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub struct Box2D<S> {
    pub min: Point<S>,
    pub max: Point<S>,
}

impl<S: Scalar> Box2D<S> {
    /// Creates a box from two opposite corners, in any order.
    #[inline]
    pub fn new(x0: S, y0: S, x1: S, y1: S) -> Self {
        Box2D {
            min: point(S::min(x0, x1), S::min(y0, y1)),
            max: point(S::max(x0, x1), S::max(y0, y1)),
        }
    }

    /// Creates the smallest box containing both points.
    #[inline]
    pub fn from_points(a: Point<S>, b: Point<S>) -> Self {
        Box2D::new(a.x, a.y, b.x, b.y)
    }

    /// The empty box, identity of [`Box2D::union`].
    #[inline]
    pub fn undefined() -> Self {
        Box2D {
            min: point(S::infinity(), S::infinity()),
            max: point(S::neg_infinity(), S::neg_infinity()),
        }
    }

    #[inline]
    pub fn x_min(&self) -> S {
        self.min.x
    }

    #[inline]
    pub fn y_min(&self) -> S {
        self.min.y
    }

    #[inline]
    pub fn x_max(&self) -> S {
        self.max.x
    }

    #[inline]
    pub fn y_max(&self) -> S {
        self.max.y
    }

    #[inline]
    pub fn width(&self) -> S {
        self.max.x - self.min.x
    }

    #[inline]
    pub fn height(&self) -> S {
        self.max.y - self.min.y
    }

    #[inline]
    pub fn size(&self) -> Vector<S> {
        self.max - self.min
    }

    #[inline]
    pub fn center(&self) -> Point<S> {
        self.min.lerp(self.max, S::HALF)
    }

    /// Returns whether all coordinates are finite and the corners are ordered.
    pub fn is_defined(&self) -> bool {
        self.min.x.is_finite()
            && self.min.y.is_finite()
            && self.max.x.is_finite()
            && self.max.y.is_finite()
            && self.min.x <= self.max.x
            && self.min.y <= self.max.y
    }

    /// The smallest box containing both boxes.
    #[inline]
    pub fn union(&self, other: &Self) -> Self {
        Box2D {
            min: point(S::min(self.min.x, other.min.x), S::min(self.min.y, other.min.y)),
            max: point(S::max(self.max.x, other.max.x), S::max(self.max.y, other.max.y)),
        }
    }

    /// The smallest box containing this box and a point.
    #[inline]
    pub fn union_point(&self, p: Point<S>) -> Self {
        Box2D {
            min: point(S::min(self.min.x, p.x), S::min(self.min.y, p.y)),
            max: point(S::max(self.max.x, p.x), S::max(self.max.y, p.y)),
        }
    }

    /// Returns whether the point is inside the box or on its boundary.
    #[inline]
    pub fn contains_point(&self, p: Point<S>) -> bool {
        self.contains_xy(p.x, p.y)
    }

    #[inline]
    pub fn contains_xy(&self, x: S, y: S) -> bool {
        self.min.x <= x && x <= self.max.x && self.min.y <= y && y <= self.max.y
    }

    /// Returns whether the point is strictly inside the box.
    #[inline]
    pub fn contains_point_strictly(&self, p: Point<S>) -> bool {
        self.min.x < p.x && p.x < self.max.x && self.min.y < p.y && p.y < self.max.y
    }

    #[inline]
    pub fn contains_box(&self, other: &Self) -> bool {
        self.min.x <= other.min.x
            && other.max.x <= self.max.x
            && self.min.y <= other.min.y
            && other.max.y <= self.max.y
    }

    #[inline]
    pub fn contains_segment(&self, segment: &LineSegment<S>) -> bool {
        self.contains_point(segment.from) && self.contains_point(segment.to)
    }

    #[inline]
    pub fn contains_circle(&self, circle: &Circle<S>) -> bool {
        self.contains_box(&circle.bounding_box())
    }

    /// Containment test for shapes this type does not know about, using their
    /// bounds only.
    #[inline]
    pub fn contains_bounds<B: BoundingBox<Scalar = S>>(&self, shape: &B) -> bool {
        self.contains_box(&shape.bounding_box())
    }

    #[inline]
    pub fn intersects_box(&self, other: &Self) -> bool {
        self.min.x <= other.max.x
            && other.min.x <= self.max.x
            && self.min.y <= other.max.y
            && other.min.y <= self.max.y
    }

    /// Returns whether the segment touches the box or its interior.
    pub fn intersects_segment(&self, segment: &LineSegment<S>) -> bool {
        let (x_min, y_min, x_max, y_max) = (self.min.x, self.min.y, self.max.x, self.max.y);
        let LineSegment { from: p0, to: p1 } = *segment;

        // Both end points on the outer side of one of the box's sides.
        if (p0.x < x_min && p1.x < x_min)
            || (p0.x > x_max && p1.x > x_max)
            || (p0.y < y_min && p1.y < y_min)
            || (p0.y > y_max && p1.y > y_max)
        {
            return false;
        }

        if self.contains_point_strictly(p0) || self.contains_point_strictly(p1) {
            return true;
        }

        self.edges().iter().any(|edge| edge.intersects(segment))
    }

    /// Returns whether the circle touches the box or its interior.
    pub fn intersects_circle(&self, circle: &Circle<S>) -> bool {
        let c = circle.center;
        let closest = point(
            S::max(self.min.x, S::min(c.x, self.max.x)),
            S::max(self.min.y, S::min(c.y, self.max.y)),
        );

        (c - closest).square_length() <= circle.radius * circle.radius
    }

    /// The four sides of the box, counter-clockwise starting from the bottom
    /// left corner.
    pub fn edges(&self) -> [LineSegment<S>; 4] {
        let (x0, y0, x1, y1) = (self.min.x, self.min.y, self.max.x, self.max.y);
        [
            LineSegment::new(x0, y0, x1, y0),
            LineSegment::new(x1, y0, x1, y1),
            LineSegment::new(x1, y1, x0, y1),
            LineSegment::new(x0, y1, x0, y0),
        ]
    }

    /// Transforms the four corners and returns their bounding box.
    pub fn transformed<T: Transformation<S>>(&self, transform: &T) -> Self {
        let corners = [
            self.min,
            point(self.max.x, self.min.y),
            self.max,
            point(self.min.x, self.max.y),
        ];

        corners
            .iter()
            .fold(Box2D::undefined(), |bounds, &corner| {
                bounds.union_point(transform.transform_point(corner))
            })
    }

    #[inline]
    pub fn translate(&self, by: Vector<S>) -> Self {
        Box2D {
            min: self.min + by,
            max: self.max + by,
        }
    }

    /// Grows the box by `dx` horizontally and `dy` vertically on each side.
    #[inline]
    pub fn inflate(&self, dx: S, dy: S) -> Self {
        Box2D {
            min: point(self.min.x - dx, self.min.y - dy),
            max: point(self.max.x + dx, self.max.y + dy),
        }
    }
}

impl<S: Scalar> Default for Box2D<S> {
    fn default() -> Self {
        Box2D::undefined()
    }
}

impl<S: Scalar> Hash for Box2D<S> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.min.x.hash_bits().hash(state);
        self.min.y.hash_bits().hash(state);
        self.max.x.hash_bits().hash(state);
        self.max.y.hash_bits().hash(state);
    }
}

impl<S: Scalar> TryFrom<&[S]> for Box2D<S> {
    type Error = InitError;

    /// Builds a box out of `[x_min, y_min, x_max, y_max]`.
    fn try_from(values: &[S]) -> Result<Self, InitError> {
        let [x0, y0, x1, y1] = expect_arity::<S, 4>(values)?;
        Ok(Box2D::new(x0, y0, x1, y1))
    }
}

#[test]
fn union() {
    let a = Box2D::new(0.0, 0.0, 10.0, 10.0);
    let b = Box2D::new(20.0, 20.0, 30.0, 30.0);
    assert_eq!(a.union(&b), Box2D::new(0.0, 0.0, 30.0, 30.0));
}

#[test]
fn undefined_is_union_identity() {
    let a = Box2D::new(-1.0, 2.0, 3.0, 4.0);
    let undefined = Box2D::undefined();
    assert!(!undefined.is_defined());
    assert_eq!(undefined.union(&a), a);
    assert_eq!(a.union(&undefined), a);
    assert!(!undefined.contains_point(point(0.0, 0.0)));
}

#[test]
fn normalized_corners() {
    let a = Box2D::new(10.0, 0.0, 0.0, -5.0);
    assert_eq!(a.min, point(0.0, -5.0));
    assert_eq!(a.max, point(10.0, 0.0));
    assert!(a.is_defined());
}

#[test]
fn intersects_circle() {
    let b = Box2D::new(0.0, 0.0, 10.0, 10.0);
    assert!(!b.intersects_circle(&Circle::new(15.0, 5.0, 4.0)));
    assert!(b.intersects_circle(&Circle::new(15.0, 5.0, 6.0)));
    assert!(b.intersects_circle(&Circle::new(15.0, 5.0, 5.0)));
    assert!(b.intersects_circle(&Circle::new(5.0, 5.0, 1.0)));
    // Diagonal from a corner.
    assert!(!b.intersects_circle(&Circle::new(13.0, 14.0, 4.9)));
    assert!(b.intersects_circle(&Circle::new(13.0, 14.0, 5.0)));
}

#[test]
fn intersects_segment() {
    let b = Box2D::new(0.0, 0.0, 10.0, 10.0);

    // Rejected by a separating side.
    assert!(!b.intersects_segment(&LineSegment::new(-5.0, -1.0, 20.0, -1.0)));
    // One end point strictly inside.
    assert!(b.intersects_segment(&LineSegment::new(5.0, 5.0, 50.0, 50.0)));
    // Crossing without any end point inside.
    assert!(b.intersects_segment(&LineSegment::new(-5.0, 5.0, 15.0, 5.0)));
    // Lying on a side.
    assert!(b.intersects_segment(&LineSegment::new(2.0, 0.0, 8.0, 0.0)));
    // Passing next to a corner.
    assert!(!b.intersects_segment(&LineSegment::new(9.0, 12.0, 12.0, 9.0)));
    // Touching a corner.
    assert!(b.intersects_segment(&LineSegment::new(8.0, 12.0, 12.0, 8.0)));
}

#[test]
fn contains() {
    let b = Box2D::new(0.0, 0.0, 10.0, 10.0);
    assert!(b.contains_point(point(0.0, 10.0)));
    assert!(!b.contains_point_strictly(point(0.0, 10.0)));
    assert!(b.contains_box(&Box2D::new(1.0, 1.0, 10.0, 2.0)));
    assert!(!b.contains_box(&Box2D::new(1.0, 1.0, 11.0, 2.0)));
    assert!(b.contains_segment(&LineSegment::new(0.0, 0.0, 10.0, 10.0)));
    assert!(b.contains_circle(&Circle::new(5.0, 5.0, 5.0)));
    assert!(!b.contains_circle(&Circle::new(5.0, 5.0, 5.5)));
}

#[test]
fn transformed() {
    use crate::Rotation;
    use core::f64::consts::FRAC_PI_4;

    let b = Box2D::new(-1.0f64, -1.0, 1.0, 1.0);
    let r = b.transformed(&Rotation::radians(FRAC_PI_4));
    let half_diagonal = core::f64::consts::SQRT_2;
    assert!((r.max.x - half_diagonal).abs() < 1e-12);
    assert!((r.min.y + half_diagonal).abs() < 1e-12);
}
