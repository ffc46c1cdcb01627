use crate::error::{expect_arity, InitError};
use crate::scalar::Scalar;
use crate::traits::Transformation;
use crate::{point, Box2D, LineSegment, Point};

use core::hash::{Hash, Hasher};

/// A circle defined by its center and a non-negative radius.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub struct Circle<S> {
    pub center: Point<S>,
    pub radius: S,
}

impl<S: Scalar> Circle<S> {
    #[inline]
    pub fn new(cx: S, cy: S, radius: S) -> Self {
        Circle {
            center: point(cx, cy),
            radius,
        }
    }

    pub fn bounding_box(&self) -> Box2D<S> {
        let c = self.center;
        let r = self.radius;
        Box2D {
            min: point(c.x - r, c.y - r),
            max: point(c.x + r, c.y + r),
        }
    }

    pub fn is_defined(&self) -> bool {
        self.center.x.is_finite() && self.center.y.is_finite() && self.radius.is_finite()
    }

    /// Returns whether the point is inside the disc or on the circle.
    #[inline]
    pub fn contains_point(&self, p: Point<S>) -> bool {
        (p - self.center).square_length() <= self.radius * self.radius
    }

    #[inline]
    pub fn contains_segment(&self, segment: &LineSegment<S>) -> bool {
        self.contains_point(segment.from) && self.contains_point(segment.to)
    }

    pub fn contains_box(&self, b: &Box2D<S>) -> bool {
        self.contains_point(b.min)
            && self.contains_point(b.max)
            && self.contains_point(point(b.min.x, b.max.y))
            && self.contains_point(point(b.max.x, b.min.y))
    }

    pub fn contains_circle(&self, other: &Self) -> bool {
        if other.radius > self.radius {
            return false;
        }
        let dr = self.radius - other.radius;
        (other.center - self.center).square_length() <= dr * dr
    }

    pub fn intersects_segment(&self, segment: &LineSegment<S>) -> bool {
        segment.square_distance_to_point(self.center) <= self.radius * self.radius
    }

    pub fn intersects_circle(&self, other: &Self) -> bool {
        let r = self.radius + other.radius;
        (other.center - self.center).square_length() <= r * r
    }

    #[inline]
    pub fn intersects_box(&self, b: &Box2D<S>) -> bool {
        b.intersects_circle(self)
    }

    /// Applies the transform to this circle.
    ///
    /// Under a non-uniform scale or a shear the image is an ellipse, and the
    /// result is the smallest circle around the transformed center that
    /// contains it. The result is exact for translations, rotations and
    /// uniform scales.
    pub fn transformed<T: Transformation<S>>(&self, transform: &T) -> Self {
        let c = self.center;
        let r = self.radius;
        let center = transform.transform_point(c);
        let a = transform.transform_point(point(c.x + r, c.y)) - center;
        let b = transform.transform_point(point(c.x, c.y + r)) - center;

        // Largest singular value of the matrix with columns `a` and `b`.
        let aa = a.square_length();
        let bb = b.square_length();
        let ab = a.dot(b);
        let half_sum = (aa + bb) * S::HALF;
        let half_diff = (aa - bb) * S::HALF;
        let radius = (half_sum + (half_diff * half_diff + ab * ab).sqrt()).sqrt();

        Circle { center, radius }
    }
}

impl<S: Scalar> Hash for Circle<S> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.center.x.hash_bits().hash(state);
        self.center.y.hash_bits().hash(state);
        self.radius.hash_bits().hash(state);
    }
}

impl<S: Scalar> TryFrom<&[S]> for Circle<S> {
    type Error = InitError;

    /// Builds a circle out of `[cx, cy, radius]`.
    fn try_from(values: &[S]) -> Result<Self, InitError> {
        let [cx, cy, r] = expect_arity::<S, 3>(values)?;
        if r < S::ZERO {
            return Err(InitError::NegativeRadius);
        }
        Ok(Circle::new(cx, cy, r))
    }
}

#[test]
fn contains() {
    let c = Circle::new(0.0, 0.0, 5.0);
    assert!(c.contains_point(point(3.0, 4.0)));
    assert!(!c.contains_point(point(3.0, 4.1)));
    assert!(c.contains_circle(&Circle::new(1.0, 0.0, 4.0)));
    assert!(!c.contains_circle(&Circle::new(1.0, 0.0, 4.5)));
    assert!(c.contains_box(&Box2D::new(-3.0, -4.0, 3.0, 4.0)));
    assert!(!c.contains_box(&Box2D::new(-3.0, -4.0, 3.0, 4.5)));
}

#[test]
fn intersects() {
    let c = Circle::new(0.0, 0.0, 5.0);
    assert!(c.intersects_circle(&Circle::new(8.0, 0.0, 3.0)));
    assert!(!c.intersects_circle(&Circle::new(8.0, 0.0, 2.9)));
    assert!(c.intersects_segment(&LineSegment::new(-10.0, 5.0, 10.0, 5.0)));
    assert!(!c.intersects_segment(&LineSegment::new(-10.0, 6.0, 10.0, 6.0)));
    assert!(!c.intersects_segment(&LineSegment::new(6.0, -10.0, 6.0, -8.0)));
}

#[test]
fn transformed() {
    use crate::{Scale, Translation};

    let c = Circle::new(1.0f64, 2.0, 3.0);
    let moved = c.transformed(&Translation::new(10.0, -2.0));
    assert_eq!(moved, Circle::new(11.0, 0.0, 3.0));

    let scaled = c.transformed(&Scale::new(2.0));
    assert_eq!(scaled, Circle::new(2.0, 4.0, 6.0));
}

#[test]
fn transformed_non_uniform() {
    use crate::Transform;

    let c = Circle::new(0.0f64, 0.0, 1.0);

    let stretched = c.transformed(&Transform::scale(3.0, 1.0));
    assert_eq!(stretched, Circle::new(0.0, 0.0, 3.0));
    let stretched = c.transformed(&Transform::scale(1.0, 3.0));
    assert_eq!(stretched, Circle::new(0.0, 0.0, 3.0));

    // Every point of the sheared circle is inside the result.
    let shear = Transform::new(1.0, 0.0, 2.0, 1.0, 5.0, 0.0);
    let sheared = c.transformed(&shear);
    assert!((sheared.center - point(5.0, 0.0)).length() < 1e-12);
    let mut farthest: f64 = 0.0;
    for i in 0..360 {
        let angle = (i as f64).to_radians();
        let p = shear.transform_point(point(angle.cos(), angle.sin()));
        farthest = farthest.max((p - sheared.center).length());
        assert!((p - sheared.center).length() <= sheared.radius + 1e-9, "{:?}", p);
    }
    // And it is not larger than needed.
    assert!(sheared.radius - farthest < 1e-3);
}

#[test]
fn negative_radius() {
    let values = [0.0, 0.0, -1.0];
    assert_eq!(Circle::try_from(&values[..]), Err(InitError::NegativeRadius));
}
