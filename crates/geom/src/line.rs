use crate::error::{expect_arity, InitError};
use crate::scalar::Scalar;
use crate::traits::Transformation;
use crate::utils::min_max;
use crate::{point, Box2D, Point, Vector};

use core::hash::{Hash, Hasher};
use core::ops::Range;

/// A linear segment.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub struct LineSegment<S> {
    pub from: Point<S>,
    pub to: Point<S>,
}

impl<S: Scalar> LineSegment<S> {
    #[inline]
    pub fn new(x0: S, y0: S, x1: S, y1: S) -> Self {
        LineSegment {
            from: point(x0, y0),
            to: point(x1, y1),
        }
    }

    /// Sample the segment at t (expecting t between 0 and 1).
    #[inline]
    pub fn sample(&self, t: S) -> Point<S> {
        self.from.lerp(self.to, t)
    }

    /// Sample the x coordinate of the segment at t (expecting t between 0 and 1).
    #[inline]
    pub fn x(&self, t: S) -> S {
        self.from.x * (S::ONE - t) + self.to.x * t
    }

    /// Sample the y coordinate of the segment at t (expecting t between 0 and 1).
    #[inline]
    pub fn y(&self, t: S) -> S {
        self.from.y * (S::ONE - t) + self.to.y * t
    }

    #[inline]
    pub fn from(&self) -> Point<S> {
        self.from
    }

    #[inline]
    pub fn to(&self) -> Point<S> {
        self.to
    }

    /// Returns an inverted version of this segment where the beginning and the end
    /// points are swapped.
    #[inline]
    pub fn flip(&self) -> Self {
        LineSegment {
            from: self.to,
            to: self.from,
        }
    }

    /// Return the sub-segment inside a given range of t.
    ///
    /// This is equivalent splitting at the range's end points.
    pub fn split_range(&self, t_range: Range<S>) -> Self {
        LineSegment {
            from: self.from.lerp(self.to, t_range.start),
            to: self.from.lerp(self.to, t_range.end),
        }
    }

    /// Split this curve into two sub-segments.
    #[inline]
    pub fn split(&self, t: S) -> (Self, Self) {
        let split_point = self.sample(t);

        (
            LineSegment {
                from: self.from,
                to: split_point,
            },
            LineSegment {
                from: split_point,
                to: self.to,
            },
        )
    }

    /// Return the segment before the split point.
    #[inline]
    pub fn before_split(&self, t: S) -> Self {
        LineSegment {
            from: self.from,
            to: self.sample(t),
        }
    }

    /// Return the segment after the split point.
    #[inline]
    pub fn after_split(&self, t: S) -> Self {
        LineSegment {
            from: self.sample(t),
            to: self.to,
        }
    }

    /// Return the minimum bounding rectangle
    #[inline]
    pub fn bounding_box(&self) -> Box2D<S> {
        let (min_x, max_x) = self.bounding_range_x();
        let (min_y, max_y) = self.bounding_range_y();

        Box2D {
            min: point(min_x, min_y),
            max: point(max_x, max_y),
        }
    }

    #[inline]
    pub fn bounding_range_x(&self) -> (S, S) {
        min_max(self.from.x, self.to.x)
    }

    #[inline]
    pub fn bounding_range_y(&self) -> (S, S) {
        min_max(self.from.y, self.to.y)
    }

    /// Returns the vector between this segment's `from` and `to` points.
    #[inline]
    pub fn to_vector(&self) -> Vector<S> {
        self.to - self.from
    }

    /// Sample the segment's derivative, constant along the segment.
    #[inline]
    pub fn derivative(&self, _t: S) -> Vector<S> {
        self.to_vector()
    }

    /// Computes the length of this segment.
    #[inline]
    pub fn length(&self) -> S {
        self.to_vector().length()
    }

    /// Computes the squared length of this segment.
    #[inline]
    pub fn square_length(&self) -> S {
        self.to_vector().square_length()
    }

    #[inline]
    pub fn mid_point(&self) -> Point<S> {
        self.sample(S::HALF)
    }

    #[inline]
    pub fn translate(&self, by: Vector<S>) -> Self {
        LineSegment {
            from: self.from + by,
            to: self.to + by,
        }
    }

    /// Applies the transform to this segment and returns the results.
    #[inline]
    pub fn transformed<T: Transformation<S>>(&self, transform: &T) -> Self {
        LineSegment {
            from: transform.transform_point(self.from),
            to: transform.transform_point(self.to),
        }
    }

    /// Returns whether all coordinates are finite.
    pub fn is_defined(&self) -> bool {
        self.from.x.is_finite()
            && self.from.y.is_finite()
            && self.to.x.is_finite()
            && self.to.y.is_finite()
    }

    /// Computes the intersection of two non-parallel segments.
    ///
    /// The result is provided in the form of the `t` parameter of each
    /// segment. Touching end points count as an intersection. Parallel and
    /// collinear segments yield `None`, see [`segment_hit`] for a test that
    /// also handles overlapping collinear segments.
    pub fn intersection_t(&self, other: &Self) -> Option<(S, S)> {
        let v1 = self.to_vector();
        let v2 = other.to_vector();

        let v1_cross_v2 = v1.cross(v2);

        if v1_cross_v2 == S::ZERO {
            // The segments are parallel
            return None;
        }

        let sign_v1_cross_v2 = S::signum(v1_cross_v2);
        let abs_v1_cross_v2 = S::abs(v1_cross_v2);

        let v3 = other.from - self.from;

        // t and u should be divided by v1_cross_v2, but we postpone that to not lose precision.
        // We have to respect the sign of v1_cross_v2 (and therefore t and u) so we apply it now and
        // will use the absolute value of v1_cross_v2 afterwards.
        let t = v3.cross(v2) * sign_v1_cross_v2;
        let u = v3.cross(v1) * sign_v1_cross_v2;

        if t < S::ZERO || t > abs_v1_cross_v2 || u < S::ZERO || u > abs_v1_cross_v2 {
            return None;
        }

        Some((t / abs_v1_cross_v2, u / abs_v1_cross_v2))
    }

    /// Returns a point shared by both segments, if any.
    #[inline]
    pub fn intersection(&self, other: &Self) -> Option<Point<S>> {
        segment_hit(self, other)
    }

    /// Returns whether the two segments have at least one point in common.
    ///
    /// This is symmetric: `a.intersects(&b) == b.intersects(&a)`.
    #[inline]
    pub fn intersects(&self, other: &Self) -> bool {
        segment_hit(self, other).is_some()
    }

    /// Returns whether both segments lie on the same line.
    pub fn is_collinear_with(&self, other: &Self) -> bool {
        let v3 = other.from - self.from;
        self.to_vector().cross(other.to_vector()) == S::ZERO
            && v3.cross(self.to_vector()) == S::ZERO
            && v3.cross(other.to_vector()) == S::ZERO
    }

    /// Returns whether the point lies on the segment.
    ///
    /// The distance to the supporting line is compared against an epsilon
    /// relative to the segment's length.
    pub fn contains_point(&self, p: Point<S>) -> bool {
        let v = self.to_vector();
        let cross = (p - self.from).cross(v);
        let tolerance = S::EPSILON * S::max(v.length(), S::ONE);
        S::abs(cross) <= tolerance && in_bounds(self, p)
    }

    /// Returns whether `other` lies entirely on this segment.
    #[inline]
    pub fn contains_segment(&self, other: &Self) -> bool {
        self.contains_point(other.from) && self.contains_point(other.to)
    }

    pub fn distance_to_point(&self, p: Point<S>) -> S {
        self.square_distance_to_point(p).sqrt()
    }

    pub fn square_distance_to_point(&self, p: Point<S>) -> S {
        (self.closest_point(p) - p).square_length()
    }

    pub fn closest_point(&self, p: Point<S>) -> Point<S> {
        let v1 = self.to - self.from;
        let v2 = p - self.from;
        let len2 = v1.dot(v1);
        if len2 == S::ZERO {
            return self.from;
        }
        let t = S::min(S::max(v2.dot(v1) / len2, S::ZERO), S::ONE);

        self.from + v1 * t
    }
}

// Inclusive bounds test, used once collinearity is established.
#[inline]
fn in_bounds<S: Scalar>(segment: &LineSegment<S>, p: Point<S>) -> bool {
    let (x0, x1) = segment.bounding_range_x();
    let (y0, y1) = segment.bounding_range_y();
    p.x >= x0 && p.x <= x1 && p.y >= y0 && p.y <= y1
}

/// Returns a point shared by the two segments, or `None`.
///
/// For crossing segments this is the crossing point. For overlapping collinear
/// segments this is the first end point found inside the overlap.
pub fn segment_hit<S: Scalar>(a: &LineSegment<S>, b: &LineSegment<S>) -> Option<Point<S>> {
    if let Some((t, _)) = a.intersection_t(b) {
        return Some(a.sample(t));
    }

    if !a.is_collinear_with(b) {
        return None;
    }

    [a.from, a.to, b.from, b.to]
        .iter()
        .copied()
        .find(|&p| in_bounds(a, p) && in_bounds(b, p))
}

impl<S: Scalar> Hash for LineSegment<S> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.from.x.hash_bits().hash(state);
        self.from.y.hash_bits().hash(state);
        self.to.x.hash_bits().hash(state);
        self.to.y.hash_bits().hash(state);
    }
}

impl<S: Scalar> TryFrom<&[S]> for LineSegment<S> {
    type Error = InitError;

    /// Builds a segment out of `[x0, y0, x1, y1]`.
    fn try_from(values: &[S]) -> Result<Self, InitError> {
        let [x0, y0, x1, y1] = expect_arity::<S, 4>(values)?;
        Ok(LineSegment::new(x0, y0, x1, y1))
    }
}

#[cfg(test)]
fn fuzzy_eq_f64(a: f64, b: f64, epsilon: f64) -> bool {
    f64::abs(a - b) <= epsilon
}

#[cfg(test)]
fn fuzzy_eq_point(a: Point<f64>, b: Point<f64>, epsilon: f64) -> bool {
    fuzzy_eq_f64(a.x, b.x, epsilon) && fuzzy_eq_f64(a.y, b.y, epsilon)
}

#[test]
fn intersection_rotated() {
    use core::f64::consts::PI;
    let epsilon = 0.0001;
    let count: u32 = 100;

    for i in 0..count {
        for j in 0..count {
            if i % (count / 2) == j % (count / 2) {
                // avoid the colinear case.
                continue;
            }

            let angle1 = i as f64 / (count as f64) * 2.0 * PI;
            let angle2 = j as f64 / (count as f64) * 2.0 * PI;

            let l1 = LineSegment {
                from: point(10.0 * angle1.cos(), 10.0 * angle1.sin()),
                to: point(-10.0 * angle1.cos(), -10.0 * angle1.sin()),
            };

            let l2 = LineSegment {
                from: point(10.0 * angle2.cos(), 10.0 * angle2.sin()),
                to: point(-10.0 * angle2.cos(), -10.0 * angle2.sin()),
            };

            assert!(l1.intersects(&l2));

            assert!(fuzzy_eq_point(
                l1.sample(l1.intersection_t(&l2).unwrap().0),
                point(0.0, 0.0),
                epsilon
            ));

            assert!(fuzzy_eq_point(
                l2.sample(l1.intersection_t(&l2).unwrap().1),
                point(0.0, 0.0),
                epsilon
            ));
        }
    }
}

#[test]
fn intersection_touching() {
    let l1 = LineSegment::new(0.0, 0.0, 10.0, 10.0);
    let l2 = LineSegment::new(10.0, 10.0, 10.0, 0.0);

    assert!(l1.intersects(&l2));
    assert_eq!(l1.intersection(&l2), Some(point(10.0, 10.0)));
}

#[test]
fn intersection_collinear() {
    let l1 = LineSegment::new(0.0, 0.0, 10.0, 0.0);
    let overlapping = LineSegment::new(5.0, 0.0, 15.0, 0.0);
    let disjoint = LineSegment::new(11.0, 0.0, 15.0, 0.0);
    let parallel = LineSegment::new(0.0, 1.0, 10.0, 1.0);

    assert!(l1.intersects(&overlapping));
    assert_eq!(l1.intersection(&overlapping), Some(point(10.0, 0.0)));
    assert!(!l1.intersects(&disjoint));
    assert!(!l1.intersects(&parallel));

    let diagonal = LineSegment::new(0.0, 0.0, 4.0, 4.0);
    let inner = LineSegment::new(3.0, 3.0, 1.0, 1.0);
    assert!(diagonal.intersects(&inner));
    assert!(inner.intersects(&diagonal));
}

#[test]
fn intersection_degenerate() {
    let l1 = LineSegment::new(0.0, 0.0, 10.0, 0.0);
    let on = LineSegment::new(3.0, 0.0, 3.0, 0.0);
    let off = LineSegment::new(3.0, 1.0, 3.0, 1.0);

    assert!(l1.intersects(&on));
    assert!(on.intersects(&l1));
    assert!(!l1.intersects(&off));
    assert!(!off.intersects(&l1));

    // Two points at the same x but different y are not collinear-overlapping.
    let p1 = LineSegment::new(1.0, 0.0, 1.0, 0.0);
    let p2 = LineSegment::new(1.0, 5.0, 1.0, 5.0);
    assert!(!p1.intersects(&p2));
}

#[test]
fn intersection_symmetry() {
    let coords = [-2.0, 0.0, 1.5, 3.0];
    let mut segments = std::vec::Vec::new();
    for &x0 in &coords {
        for &y0 in &coords {
            for &(x1, y1) in &[(3.0, 3.0), (0.0, 1.5), (-2.0, 3.0), (1.5, -2.0)] {
                segments.push(LineSegment::new(x0, y0, x1, y1));
            }
        }
    }

    for p in &segments {
        for q in &segments {
            assert_eq!(p.intersects(q), q.intersects(p), "{:?} {:?}", p, q);
        }
    }
}

#[test]
fn bounding_box() {
    let l1 = LineSegment::new(1.0, 5.0, 5.0, 7.0);
    let l2 = LineSegment::new(5.0, 5.0, 1.0, 1.0);

    assert_eq!(l1.bounding_box(), Box2D::new(1.0, 5.0, 5.0, 7.0));
    assert_eq!(l2.bounding_box(), Box2D::new(1.0, 1.0, 5.0, 5.0));
}

#[test]
fn split() {
    let l = LineSegment::new(0.0, 0.0, 10.0, 4.0);
    let (a, b) = l.split(0.25);
    assert_eq!(a.to, b.from);
    assert_eq!(a.from, l.from);
    assert_eq!(b.to, l.to);
    assert_eq!(a.to, point(2.5, 1.0));
    assert_eq!(l.split_range(0.25..1.0), b);
}

#[test]
fn contains_point() {
    let l = LineSegment::new(0.0, 0.0, 10.0, 10.0);
    assert!(l.contains_point(point(5.0, 5.0)));
    assert!(l.contains_point(point(0.0, 0.0)));
    assert!(!l.contains_point(point(11.0, 11.0)));
    assert!(!l.contains_point(point(5.0, 6.0)));
    assert!(l.contains_segment(&LineSegment::new(2.0, 2.0, 3.0, 3.0)));
}

#[test]
fn from_slice() {
    let values = [1.0, 2.0, 3.0, 4.0];
    assert_eq!(
        LineSegment::try_from(&values[..]),
        Ok(LineSegment::new(1.0, 2.0, 3.0, 4.0))
    );
    assert_eq!(
        LineSegment::try_from(&values[..3]),
        Err(InitError::Arity { expected: 4, found: 3 })
    );
}

#[test]
fn signed_zero_hash() {
    use std::collections::hash_map::DefaultHasher;

    fn hash_of(segment: &LineSegment<f64>) -> u64 {
        let mut hasher = DefaultHasher::new();
        segment.hash(&mut hasher);
        hasher.finish()
    }

    let a = LineSegment::new(0.0, 0.0, 1.0, 1.0);
    let b = LineSegment::new(-0.0, 0.0, 1.0, 1.0);
    assert_eq!(a, b);
    assert_eq!(hash_of(&a), hash_of(&b));
    assert_ne!(hash_of(&a), hash_of(&LineSegment::new(0.0, 0.0, 1.0, 2.0)));
}
