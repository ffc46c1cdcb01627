//! Elliptic arc related maths and tools.

use core::hash::{Hash, Hasher};
use core::ops::Range;

use crate::scalar::{Float, Scalar};
use crate::traits::{transform_vector, Transformation};
use crate::utils::directed_angle;
use crate::{point, vector, Angle, Box2D, Point, Rotation, Vector};

/// An elliptic arc curve segment using the SVG's end-point notation.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub struct SvgArc<S> {
    pub from: Point<S>,
    pub to: Point<S>,
    pub radii: Vector<S>,
    pub x_rotation: Angle<S>,
    pub flags: ArcFlags,
}

/// An elliptic arc curve segment.
///
/// The ellipse is centered on `center`, its axes have the lengths `radii.x`
/// and `radii.y` and are rotated by `x_rotation`. The arc starts at
/// `start_angle` and spans `sweep_angle`, positive in the direction going from
/// the x axis towards the y axis.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub struct EllipticCurve<S> {
    pub center: Point<S>,
    pub radii: Vector<S>,
    pub x_rotation: Angle<S>,
    pub start_angle: Angle<S>,
    pub sweep_angle: Angle<S>,
}

/// Flag parameters for arcs as described by the SVG specification.
///
/// For most situations using the SVG arc notation, there are four different arcs
/// (two different ellipses, each with two different arc sweeps) that satisfy the
/// arc parameter set. The flags indicate which one of the four arcs are drawn.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub struct ArcFlags {
    /// Of the four candidate arc sweeps, two will represent an arc sweep of greater
    /// than or equal to 180 degrees (the "large-arc"), and two will represent an arc
    /// sweep of less than or equal to 180 degrees (the "small arc"). If large_arc is
    /// true, then one of the two larger arc sweeps will be chosen; otherwise, if
    /// large_arc is false, one of the smaller arc sweeps will be chosen.
    pub large_arc: bool,
    /// If sweep is true, then the arc will be drawn in a "positive-angle" direction
    /// (the ellipse formula x=cx+rx*cos(theta) and y=cy+ry*sin(theta) is evaluated
    /// such that theta starts at an angle corresponding to the current point and
    /// increases positively until the arc reaches the destination position).
    pub sweep: bool,
}

impl<S: Scalar> EllipticCurve<S> {
    #[inline]
    pub fn new(
        center: Point<S>,
        radii: Vector<S>,
        x_rotation: Angle<S>,
        start_angle: Angle<S>,
        sweep_angle: Angle<S>,
    ) -> Self {
        EllipticCurve {
            center,
            radii,
            x_rotation,
            start_angle,
            sweep_angle,
        }
    }

    /// Converts from the SVG end-point parameterization.
    ///
    /// Follows the conversion of the SVG 1.1 implementation notes (F.6.5),
    /// scaling the radii up when they are too small to join both end points
    /// (F.6.6). Zero radii and coincident end points are not special-cased:
    /// they produce non-finite values, see [`SvgArc::is_straight_line`].
    pub fn from_svg_arc(arc: &SvgArc<S>) -> EllipticCurve<S> {
        let mut rx = S::abs(arc.radii.x);
        let mut ry = S::abs(arc.radii.y);

        let phi = arc.x_rotation.radians;
        let cos_phi = Float::cos(phi);
        let sin_phi = Float::sin(phi);

        // F.6.5.1: half distance between the end points, in the ellipse's frame.
        let hd = (arc.from - arc.to) * S::HALF;
        let mid = arc.from.lerp(arc.to, S::HALF);
        let p = point(
            cos_phi * hd.x + sin_phi * hd.y,
            -sin_phi * hd.x + cos_phi * hd.y,
        );

        // F.6.6.2
        let lambda = (p.x * p.x) / (rx * rx) + (p.y * p.y) / (ry * ry);
        if lambda > S::ONE {
            let scale = S::sqrt(lambda);
            rx *= scale;
            ry *= scale;
        }

        // F.6.5.2
        let rxpy = rx * p.y;
        let rypx = ry * p.x;
        let sum_of_sq = rxpy * rxpy + rypx * rypx;
        let rxry = rx * ry;
        let radicand = S::max((rxry * rxry - sum_of_sq) / sum_of_sq, S::ZERO);
        let sign = if arc.flags.large_arc == arc.flags.sweep {
            -S::ONE
        } else {
            S::ONE
        };
        let coef = sign * S::sqrt(radicand);

        let transformed_cx = coef * rxpy / ry;
        let transformed_cy = -coef * rypx / rx;

        // F.6.5.3
        let center = point(
            cos_phi * transformed_cx - sin_phi * transformed_cy + mid.x,
            sin_phi * transformed_cx + cos_phi * transformed_cy + mid.y,
        );

        // F.6.5.5 and F.6.5.6
        let u = vector((p.x - transformed_cx) / rx, (p.y - transformed_cy) / ry);
        let v = vector((-p.x - transformed_cx) / rx, (-p.y - transformed_cy) / ry);

        let start_angle = directed_angle(vector(S::ONE, S::ZERO), u);
        let mut sweep_angle = directed_angle(u, v);
        if arc.flags.sweep && sweep_angle < S::ZERO {
            sweep_angle += S::TWO * S::PI();
        } else if !arc.flags.sweep && sweep_angle > S::ZERO {
            sweep_angle -= S::TWO * S::PI();
        }

        EllipticCurve {
            center,
            radii: vector(rx, ry),
            x_rotation: arc.x_rotation,
            start_angle: Angle::radians(start_angle),
            sweep_angle: Angle::radians(sweep_angle),
        }
    }

    /// Converts to the SVG end-point parameterization.
    pub fn to_svg_arc(&self) -> SvgArc<S> {
        let sweep = self.sweep_angle.radians;
        SvgArc {
            from: self.from(),
            to: self.to(),
            radii: vector(S::abs(self.radii.x), S::abs(self.radii.y)),
            x_rotation: self.x_rotation,
            flags: ArcFlags {
                large_arc: S::abs(sweep) > S::PI(),
                sweep: sweep > S::ZERO,
            },
        }
    }

    /// The angle on the ellipse at t (expecting t between 0 and 1).
    #[inline]
    pub fn get_angle(&self, t: S) -> Angle<S> {
        Angle::radians(self.start_angle.radians + self.sweep_angle.radians * t)
    }

    #[inline]
    pub fn end_angle(&self) -> Angle<S> {
        self.get_angle(S::ONE)
    }

    /// Point of the ellipse at a given angle.
    pub fn sample_ellipse(&self, angle: Angle<S>) -> Point<S> {
        let (sin_a, cos_a) = Float::sin_cos(angle.radians);
        let local = vector(self.radii.x * cos_a, self.radii.y * sin_a);

        self.center + Rotation::radians(self.x_rotation.radians).transform_vector(local)
    }

    /// Sample the curve at t (expecting t between 0 and 1).
    #[inline]
    pub fn sample(&self, t: S) -> Point<S> {
        self.sample_ellipse(self.get_angle(t))
    }

    #[inline]
    pub fn x(&self, t: S) -> S {
        self.sample(t).x
    }

    #[inline]
    pub fn y(&self, t: S) -> S {
        self.sample(t).y
    }

    #[inline]
    pub fn from(&self) -> Point<S> {
        self.sample(S::ZERO)
    }

    #[inline]
    pub fn to(&self) -> Point<S> {
        self.sample(S::ONE)
    }

    /// Sample the curve's derivative at t (expecting t between 0 and 1).
    pub fn derivative(&self, t: S) -> Vector<S> {
        let (sin_a, cos_a) = Float::sin_cos(self.get_angle(t).radians);
        let local = vector(-self.radii.x * sin_a, self.radii.y * cos_a);

        Rotation::radians(self.x_rotation.radians).transform_vector(local)
            * self.sweep_angle.radians
    }

    /// Return the sub-curve inside a given range of t.
    ///
    /// This is equivalent splitting at the range's end points.
    pub fn split_range(&self, t_range: Range<S>) -> Self {
        let angle_1 = self.sweep_angle.radians * t_range.start;
        let angle_2 = self.sweep_angle.radians * t_range.end;

        EllipticCurve {
            start_angle: Angle::radians(self.start_angle.radians + angle_1),
            sweep_angle: Angle::radians(angle_2 - angle_1),
            ..*self
        }
    }

    /// Split this curve into two sub-curves.
    ///
    /// The split happens on the angle, both halves share the split angle
    /// exactly.
    pub fn split(&self, t: S) -> (EllipticCurve<S>, EllipticCurve<S>) {
        let split_angle = self.sweep_angle.radians * t;
        (
            EllipticCurve {
                sweep_angle: Angle::radians(split_angle),
                ..*self
            },
            EllipticCurve {
                start_angle: Angle::radians(self.start_angle.radians + split_angle),
                sweep_angle: Angle::radians(self.sweep_angle.radians - split_angle),
                ..*self
            },
        )
    }

    /// Return the curve before the split point.
    pub fn before_split(&self, t: S) -> EllipticCurve<S> {
        self.split(t).0
    }

    /// Return the curve after the split point.
    pub fn after_split(&self, t: S) -> EllipticCurve<S> {
        self.split(t).1
    }

    /// Swap the direction of the segment.
    pub fn flip(&self) -> Self {
        EllipticCurve {
            start_angle: self.end_angle(),
            sweep_angle: -self.sweep_angle,
            ..*self
        }
    }

    /// Returns whether the ellipse reaches `angle` along the arc.
    fn covers_angle(&self, angle: S) -> bool {
        let sweep = self.sweep_angle.radians;
        let d = if sweep >= S::ZERO {
            angle - self.start_angle.radians
        } else {
            self.start_angle.radians - angle
        };

        positive_rem(d, S::TWO * S::PI()) <= S::abs(sweep)
    }

    // Angles of the ellipse's extrema along one axis, each followed by its
    // opposite.
    fn extremum_angles(&self, y: bool) -> [S; 2] {
        let (sin_phi, cos_phi) = Float::sin_cos(self.x_rotation.radians);
        let (rx, ry) = (self.radii.x, self.radii.y);
        let a = if y {
            S::atan2(ry * cos_phi, rx * sin_phi)
        } else {
            S::atan2(-ry * sin_phi, rx * cos_phi)
        };

        [a, a + S::PI()]
    }

    fn bounding_range(&self, y: bool) -> (S, S) {
        let coord = |p: Point<S>| if y { p.y } else { p.x };
        let from = coord(self.from());
        let to = coord(self.to());
        let (mut min, mut max) = (S::min(from, to), S::max(from, to));

        for angle in self.extremum_angles(y) {
            if self.covers_angle(angle) {
                let v = coord(self.sample_ellipse(Angle::radians(angle)));
                min = S::min(min, v);
                max = S::max(max, v);
            }
        }

        (min, max)
    }

    /// Returns the smallest range of x that contains this curve.
    pub fn bounding_range_x(&self) -> (S, S) {
        self.bounding_range(false)
    }

    /// Returns the smallest range of y that contains this curve.
    pub fn bounding_range_y(&self) -> (S, S) {
        self.bounding_range(true)
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

    /// Applies the transform to this arc and returns the result.
    ///
    /// Transforms are not linear in angles, so the radii, rotation and angles
    /// are recovered from the images of probe points: the end of each axis
    /// and the two end points of the arc. The result is exact for similarity
    /// transforms and for axis-aligned scales of unrotated ellipses.
    pub fn transformed<T: Transformation<S>>(&self, transform: &T) -> Self {
        let rotation = Rotation::radians(self.x_rotation.radians);
        let axis_x = transform_vector(transform, rotation.transform_vector(vector(self.radii.x, S::ZERO)));
        let axis_y = transform_vector(transform, rotation.transform_vector(vector(S::ZERO, self.radii.y)));

        let center = transform.transform_point(self.center);
        let radii = vector(axis_x.length(), axis_y.length());
        let x_rotation = S::atan2(axis_x.y, axis_x.x);

        let frame = Rotation::radians(-x_rotation);
        let angle_of = |p: Point<S>| {
            let local = frame.transform_vector(transform.transform_point(p) - center);
            S::atan2(local.y / radii.y, local.x / radii.x)
        };
        let a0 = angle_of(self.from());
        let a1 = angle_of(self.to());

        // A mirroring transform reverses the direction of the sweep.
        let mirrored = axis_x.cross(axis_y) < S::ZERO;
        let positive = (self.sweep_angle.radians > S::ZERO) != mirrored;

        let two_pi = S::TWO * S::PI();
        let mut da = a1 - a0;
        if positive && da < S::ZERO {
            da += two_pi;
        } else if !positive && da > S::ZERO {
            da -= two_pi;
        }

        // atan2 folds full turns, restore the large arc.
        if S::abs(self.sweep_angle.radians) > S::PI() && S::abs(da) <= S::PI() {
            da = if positive { da + two_pi } else { da - two_pi };
        }

        EllipticCurve {
            center,
            radii,
            x_rotation: Angle::radians(x_rotation),
            start_angle: Angle::radians(a0),
            sweep_angle: Angle::radians(da),
        }
    }

    pub fn is_defined(&self) -> bool {
        self.center.x.is_finite()
            && self.center.y.is_finite()
            && self.radii.x.is_finite()
            && self.radii.y.is_finite()
            && self.x_rotation.radians.is_finite()
            && self.start_angle.radians.is_finite()
            && self.sweep_angle.radians.is_finite()
    }
}

#[inline]
fn positive_rem<S: Scalar>(x: S, m: S) -> S {
    let r = x % m;
    if r < S::ZERO {
        r + m
    } else {
        r
    }
}

impl<S: Scalar> Hash for EllipticCurve<S> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        for v in &[
            self.center.x,
            self.center.y,
            self.radii.x,
            self.radii.y,
            self.x_rotation.radians,
            self.start_angle.radians,
            self.sweep_angle.radians,
        ] {
            v.hash_bits().hash(state);
        }
    }
}

impl<S: Scalar> SvgArc<S> {
    /// Converts to the center parameterization.
    #[inline]
    pub fn to_arc(&self) -> EllipticCurve<S> {
        EllipticCurve::from_svg_arc(self)
    }

    /// Per SVG#ArcOutOfRangeParameters, this arc should be treated as a straight line
    /// segment (or omitted when both end points are equal).
    pub fn is_straight_line(&self) -> bool {
        S::abs(self.radii.x) <= S::EPSILON
            || S::abs(self.radii.y) <= S::EPSILON
            || self.from == self.to
    }
}

impl<S: Scalar> From<SvgArc<S>> for EllipticCurve<S> {
    fn from(svg: SvgArc<S>) -> Self {
        svg.to_arc()
    }
}

impl<S: Scalar> Hash for SvgArc<S> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        for v in &[
            self.from.x,
            self.from.y,
            self.to.x,
            self.to.y,
            self.radii.x,
            self.radii.y,
            self.x_rotation.radians,
        ] {
            v.hash_bits().hash(state);
        }
        self.flags.hash(state);
    }
}

#[cfg(test)]
fn fuzzy_eq_point(a: Point<f64>, b: Point<f64>, epsilon: f64) -> bool {
    (a - b).length() <= epsilon
}

#[cfg(test)]
fn fuzzy_eq_f64(a: f64, b: f64, epsilon: f64) -> bool {
    f64::abs(a - b) <= epsilon
}

#[test]
fn half_circle_from_svg() {
    use core::f64::consts::PI;

    let arc = SvgArc {
        from: point(0.0, 0.0),
        to: point(10.0, 0.0),
        radii: vector(5.0, 5.0),
        x_rotation: Angle::radians(0.0),
        flags: ArcFlags {
            large_arc: false,
            sweep: true,
        },
    };

    let curve = arc.to_arc();
    assert!(fuzzy_eq_point(curve.center, point(5.0, 0.0), 1e-12));
    assert!(fuzzy_eq_f64(curve.sweep_angle.radians, PI, 1e-12));
    assert!(fuzzy_eq_point(curve.from(), point(0.0, 0.0), 1e-12));
    assert!(fuzzy_eq_point(curve.to(), point(10.0, 0.0), 1e-12));
    // Positive sweep goes through negative y from (0, 0).
    assert!(fuzzy_eq_point(curve.sample(0.5), point(5.0, -5.0), 1e-12));

    let back = curve.to_svg_arc();
    assert!(fuzzy_eq_point(back.from, arc.from, 1e-12));
    assert!(fuzzy_eq_point(back.to, arc.to, 1e-12));
    assert!(back.flags.sweep);
    assert!(!back.flags.large_arc);
}

#[test]
fn svg_round_trip_all_flags() {
    for &large_arc in &[false, true] {
        for &sweep in &[false, true] {
            let flags = ArcFlags { large_arc, sweep };
            let arc = SvgArc {
                from: point(1.0, 2.0),
                to: point(7.0, 4.0),
                radii: vector(8.0, 5.0),
                x_rotation: Angle::radians(0.3),
                flags,
            };

            let curve = arc.to_arc();
            assert!(curve.is_defined());
            assert_eq!(curve.sweep_angle.radians > 0.0, sweep);
            assert_eq!(curve.sweep_angle.radians.abs() > core::f64::consts::PI, large_arc);

            let back = curve.to_svg_arc();
            assert!(fuzzy_eq_point(back.from, arc.from, 1e-9));
            assert!(fuzzy_eq_point(back.to, arc.to, 1e-9));
            assert!(fuzzy_eq_point(back.radii.to_point(), arc.radii.to_point(), 1e-9));
            assert_eq!(back.x_rotation, arc.x_rotation);
            assert_eq!(back.flags, flags);
        }
    }
}

#[test]
fn arc_round_trip_all_flags() {
    use core::f64::consts::PI;

    let sweeps = [PI / 3.0, -PI / 3.0, 1.5 * PI, -1.5 * PI];
    for &sweep in &sweeps {
        let curve = EllipticCurve::new(
            point(3.0, -2.0),
            vector(6.0, 2.5),
            Angle::radians(-0.4),
            Angle::radians(0.7),
            Angle::radians(sweep),
        );

        let back = curve.to_svg_arc().to_arc();
        assert!(fuzzy_eq_point(back.center, curve.center, 1e-9));
        assert!(fuzzy_eq_point(back.radii.to_point(), curve.radii.to_point(), 1e-9));
        assert!(fuzzy_eq_f64(back.start_angle.radians, curve.start_angle.radians, 1e-9));
        assert!(fuzzy_eq_f64(back.sweep_angle.radians, curve.sweep_angle.radians, 1e-9));
    }
}

#[test]
fn radii_too_small() {
    let arc = SvgArc {
        from: point(0.0, 0.0),
        to: point(10.0, 0.0),
        radii: vector(1.0, 1.0),
        x_rotation: Angle::radians(0.0),
        flags: ArcFlags::default(),
    };

    let curve = arc.to_arc();
    assert!(curve.is_defined());
    assert!(fuzzy_eq_point(curve.radii.to_point(), point(5.0, 5.0), 1e-12));
    assert!(fuzzy_eq_point(curve.to(), arc.to, 1e-12));
}

#[test]
fn zero_radius_is_a_line() {
    let arc = SvgArc {
        from: point(0.0, 0.0),
        to: point(10.0, 0.0),
        radii: vector(0.0, 3.0),
        x_rotation: Angle::radians(0.0),
        flags: ArcFlags::default(),
    };
    assert!(arc.is_straight_line());
    assert!(!arc.to_arc().is_defined());
}

#[test]
fn split_shares_the_split_point() {
    let curve = EllipticCurve::new(
        point(0.0, 0.0),
        vector(4.0, 2.0),
        Angle::radians(0.5),
        Angle::radians(-1.0),
        Angle::radians(4.0),
    );

    for i in 0..=10 {
        let t = i as f64 / 10.0;
        let (a, b) = curve.split(t);
        assert_eq!(a.sample(1.0), b.sample(0.0));
        assert_eq!(a.sample(0.0), curve.sample(0.0));
        assert!(fuzzy_eq_point(b.sample(1.0), curve.sample(1.0), 1e-12));
        assert!(fuzzy_eq_point(a.to(), curve.sample(t), 1e-12));
    }
}

#[test]
fn bounding_box() {
    use core::f64::consts::PI;

    // Upper half of a circle.
    let half = EllipticCurve::new(
        point(0.0, 0.0),
        vector(1.0, 1.0),
        Angle::radians(0.0),
        Angle::radians(0.0),
        Angle::radians(PI),
    );
    let b = half.bounding_box();
    assert!(fuzzy_eq_point(b.min, point(-1.0, 0.0), 1e-12));
    assert!(fuzzy_eq_point(b.max, point(1.0, 1.0), 1e-12));

    // The same half, walked backwards from the other end.
    let b2 = half.flip().bounding_box();
    assert!(fuzzy_eq_point(b2.min, b.min, 1e-12));
    assert!(fuzzy_eq_point(b2.max, b.max, 1e-12));

    // Rotated ellipse, sampled bounds must be contained.
    let curve = EllipticCurve::new(
        point(2.0, 1.0),
        vector(5.0, 2.0),
        Angle::radians(0.6),
        Angle::radians(-2.0),
        Angle::radians(-3.5),
    );
    let bounds = curve.bounding_box().inflate(1e-9, 1e-9);
    let mut sampled = Box2D::undefined();
    for i in 0..=1000 {
        let p = curve.sample(i as f64 / 1000.0);
        assert!(bounds.contains_point(p));
        sampled = sampled.union_point(p);
    }
    assert!(fuzzy_eq_point(sampled.min, bounds.min, 1e-3));
    assert!(fuzzy_eq_point(sampled.max, bounds.max, 1e-3));
}

#[test]
fn transformed_matches_sampled_points() {
    use crate::Transform;

    let curve = EllipticCurve::new(
        point(1.0, 2.0),
        vector(3.0, 1.5),
        Angle::radians(0.0),
        Angle::radians(0.3),
        Angle::radians(4.0),
    );

    let transforms = [
        Transform::rotation(Angle::radians(1.1)).then_translate(vector(5.0, -3.0)),
        Transform::scale(2.0, 0.5),
        Transform::scale(1.0, -1.0),
        Transform::scale(-3.0, 3.0).then_rotate(Angle::radians(-2.5)),
    ];

    for transform in &transforms {
        let t_curve = curve.transformed(transform);
        for i in 0..=8 {
            let t = i as f64 / 8.0;
            let expected = transform.transform_point(curve.sample(t));
            assert!(fuzzy_eq_point(t_curve.sample(t), expected, 1e-9));
        }
        assert!(fuzzy_eq_f64(t_curve.sweep_angle.radians.abs(), 4.0, 1e-9));
    }
}
