//! Path building utilities.
//!
//! [`PathSink`] is the drawing interface splines and paths are replayed into
//! (see [`Spline::draw`] and [`Path::draw`]). [`PathBuilder`] implements it to
//! build new paths and [`PathSerializer`](crate::PathSerializer) implements it
//! to write SVG path strings.
//!
//! ## Examples
//!
//! ```
//! use figura_path::Path;
//! use figura_path::math::point;
//!
//! let mut builder = Path::builder();
//!
//! builder.move_to(point(0.0, 0.0));
//! builder.line_to(point(1.0, 0.0));
//! builder.quadratic_curve_to(point(2.0, 0.0), point(2.0, 1.0));
//!
//! builder.move_to(point(10.0, 0.0));
//! builder.cubic_curve_to(point(12.0, 2.0), point(11.0, 2.0), point(5.0, 0.0));
//! builder.close_path();
//!
//! let path = builder.build();
//! assert_eq!(path.len(), 2);
//! assert!(path[1].is_closed());
//! ```

use crate::geom::{
    ArcFlags, CubicCurve, Curve, EllipticCurve, LineSegment, ParametricCurve, QuadraticCurve,
    SvgArc,
};
use crate::math::*;
use crate::{Path, Spline};

use std::mem;

/// The drawing interface splines and paths are replayed into.
///
/// Every command except `move_to` continues from the end of the previous
/// one. All positions are in absolute coordinates.
pub trait PathSink {
    /// Starts a new spline at the given position.
    ///
    /// Corresponding SVG command: `M`.
    fn move_to(&mut self, to: Point);

    /// Corresponding SVG commands: `L`, `H` and `V`.
    fn line_to(&mut self, to: Point);

    /// Corresponding SVG commands: `Q` and `T`.
    fn quadratic_curve_to(&mut self, ctrl: Point, to: Point);

    /// Corresponding SVG commands: `C` and `S`.
    fn cubic_curve_to(&mut self, ctrl1: Point, ctrl2: Point, to: Point);

    /// Adds an elliptic arc given in center parameterization.
    ///
    /// Corresponding SVG command: `A`.
    fn elliptic_curve_to(&mut self, arc: &EllipticCurve<f64>);

    /// Ends the current spline by connecting it back to its initial point.
    ///
    /// Corresponding SVG command: `Z`.
    fn close_path(&mut self);

    /// Adds any kind of curve, starting at the current position.
    fn curve_to(&mut self, curve: &Curve<f64>) {
        match curve {
            Curve::Line(line) => self.line_to(line.to),
            Curve::Quadratic(quad) => self.quadratic_curve_to(quad.ctrl, quad.to),
            Curve::Cubic(cubic) => self.cubic_curve_to(cubic.ctrl1, cubic.ctrl2, cubic.to),
            Curve::Elliptic(arc) => self.elliptic_curve_to(arc),
        }
    }
}

/// Reflection of a control point through the current point, used by the
/// smooth curve commands (`S` and `T`).
#[inline]
pub fn reflect(ctrl: Point, current: Point) -> Point {
    current + (current - ctrl)
}

/// Returns whether the two points are equal up to rounding errors.
///
/// Arcs recover their end points through trigonometry, so a spline closed by
/// an arc lands a few ulps away from its start.
pub fn nearly_equal(a: Point, b: Point) -> bool {
    let scale = 1f64.max(a.x.abs()).max(a.y.abs()).max(b.x.abs()).max(b.y.abs());
    let tolerance = 1e-12 * scale;
    (a - b).square_length() <= tolerance * tolerance
}

/// Builds a [`Path`] one command at a time.
///
/// The builder follows the SVG conventions:
///
/// - drawing without a current position starts a spline where the command
///   would have ended,
/// - `close_path` draws a line back to the spline's start when needed, and
///   drawing after it continues from that start in a new spline,
/// - splines without curves (a lone `move_to`) are not kept.
#[derive(Clone, Debug, Default)]
pub struct PathBuilder {
    splines: Vec<Spline>,
    curves: Vec<Curve<f64>>,
    start: Point,
    current: Option<Point>,
}

impl PathBuilder {
    pub fn new() -> Self {
        PathBuilder::default()
    }

    pub fn with_capacity(splines: usize) -> Self {
        PathBuilder {
            splines: Vec::with_capacity(splines),
            ..PathBuilder::default()
        }
    }

    /// The position drawing commands continue from, if any.
    pub fn current_position(&self) -> Option<Point> {
        self.current
    }

    /// The first point of the spline in progress.
    pub fn start_position(&self) -> Point {
        self.start
    }

    /// The last curve of the spline in progress.
    pub fn previous_curve(&self) -> Option<&Curve<f64>> {
        self.curves.last()
    }

    pub fn move_to(&mut self, to: Point) {
        self.end_spline(false);
        self.start = to;
        self.current = Some(to);
    }

    // Returns the position to draw from, or starts a spline at `to`.
    fn begin_curve(&mut self, to: Point) -> Option<Point> {
        match self.current {
            Some(from) => Some(from),
            None => {
                self.move_to(to);
                None
            }
        }
    }

    fn push(&mut self, curve: Curve<f64>) {
        self.current = Some(ParametricCurve::to(&curve));
        self.curves.push(curve);
    }

    pub fn line_to(&mut self, to: Point) {
        if let Some(from) = self.begin_curve(to) {
            self.push(Curve::Line(LineSegment { from, to }));
        }
    }

    pub fn horizontal_line_to(&mut self, x: f64) {
        let y = self.current.unwrap_or(self.start).y;
        self.line_to(point(x, y));
    }

    pub fn vertical_line_to(&mut self, y: f64) {
        let x = self.current.unwrap_or(self.start).x;
        self.line_to(point(x, y));
    }

    pub fn quadratic_curve_to(&mut self, ctrl: Point, to: Point) {
        if let Some(from) = self.begin_curve(to) {
            self.push(Curve::Quadratic(QuadraticCurve { from, ctrl, to }));
        }
    }

    /// Quadratic curve with its control point reflected from the previous
    /// quadratic curve, or at the current position otherwise.
    pub fn smooth_quadratic_curve_to(&mut self, to: Point) {
        let Some(from) = self.begin_curve(to) else {
            return;
        };
        let ctrl = match self.curves.last() {
            Some(Curve::Quadratic(prev)) => reflect(prev.ctrl, from),
            _ => from,
        };
        self.push(Curve::Quadratic(QuadraticCurve { from, ctrl, to }));
    }

    pub fn cubic_curve_to(&mut self, ctrl1: Point, ctrl2: Point, to: Point) {
        if let Some(from) = self.begin_curve(to) {
            self.push(Curve::Cubic(CubicCurve {
                from,
                ctrl1,
                ctrl2,
                to,
            }));
        }
    }

    /// Cubic curve with its first control point reflected from the previous
    /// cubic curve, or at the current position otherwise.
    pub fn smooth_cubic_curve_to(&mut self, ctrl2: Point, to: Point) {
        let Some(from) = self.begin_curve(to) else {
            return;
        };
        let ctrl1 = match self.curves.last() {
            Some(Curve::Cubic(prev)) => reflect(prev.ctrl2, from),
            _ => from,
        };
        self.push(Curve::Cubic(CubicCurve {
            from,
            ctrl1,
            ctrl2,
            to,
        }));
    }

    /// Adds an elliptic arc in SVG end-point parameterization.
    ///
    /// Arcs ending where they start are omitted and arcs with a zero radius
    /// become lines, per SVG's out-of-range parameters rules.
    pub fn arc_to(&mut self, radii: Vector, x_rotation: Angle, flags: ArcFlags, to: Point) {
        let Some(from) = self.begin_curve(to) else {
            return;
        };
        let arc = SvgArc {
            from,
            to,
            radii,
            x_rotation,
            flags,
        };

        if from == to {
            return;
        }
        if arc.is_straight_line() {
            self.push(Curve::Line(LineSegment { from, to }));
            return;
        }

        self.push(Curve::Elliptic(arc.to_arc()));
    }

    /// Adds an elliptic arc in center parameterization.
    ///
    /// A line joins the current position to the start of the arc when they
    /// differ.
    pub fn elliptic_curve_to(&mut self, arc: &EllipticCurve<f64>) {
        let arc_from = arc.from();
        match self.current {
            None => self.move_to(arc_from),
            Some(current) if !nearly_equal(current, arc_from) => self.line_to(arc_from),
            Some(_) => {}
        }

        self.push(Curve::Elliptic(*arc));
    }

    pub fn close_path(&mut self) {
        let Some(current) = self.current else {
            return;
        };

        if !self.curves.is_empty() && !nearly_equal(current, self.start) {
            self.push(Curve::Line(LineSegment {
                from: current,
                to: self.start,
            }));
        }

        self.end_spline(true);
        self.current = Some(self.start);
    }

    fn end_spline(&mut self, closed: bool) {
        if self.curves.is_empty() {
            return;
        }

        let curves = mem::take(&mut self.curves);
        self.splines.push(Spline::new(curves, closed));
    }

    pub fn build(mut self) -> Path {
        self.end_spline(false);
        Path::new(self.splines)
    }
}

impl PathSink for PathBuilder {
    fn move_to(&mut self, to: Point) {
        self.move_to(to);
    }

    fn line_to(&mut self, to: Point) {
        self.line_to(to);
    }

    fn quadratic_curve_to(&mut self, ctrl: Point, to: Point) {
        self.quadratic_curve_to(ctrl, to);
    }

    fn cubic_curve_to(&mut self, ctrl1: Point, ctrl2: Point, to: Point) {
        self.cubic_curve_to(ctrl1, ctrl2, to);
    }

    fn elliptic_curve_to(&mut self, arc: &EllipticCurve<f64>) {
        self.elliptic_curve_to(arc);
    }

    fn close_path(&mut self) {
        self.close_path();
    }
}

#[test]
fn close_synthesizes_a_segment() {
    let mut builder = PathBuilder::new();
    builder.move_to(point(0.0, 0.0));
    builder.line_to(point(10.0, 0.0));
    builder.line_to(point(10.0, 10.0));
    builder.close_path();
    let path = builder.build();

    assert_eq!(path.len(), 1);
    let spline = &path[0];
    assert!(spline.is_closed());
    assert_eq!(spline.len(), 3);
    assert_eq!(
        spline.curves()[2],
        Curve::Line(LineSegment::new(10.0, 10.0, 0.0, 0.0))
    );
}

#[test]
fn close_at_start_adds_nothing() {
    let mut builder = PathBuilder::new();
    builder.move_to(point(0.0, 0.0));
    builder.line_to(point(10.0, 0.0));
    builder.line_to(point(0.0, 0.0));
    builder.close_path();
    let path = builder.build();

    assert_eq!(path[0].len(), 2);
    assert!(path[0].is_closed());
}

#[test]
fn lone_move_to_is_dropped() {
    let mut builder = PathBuilder::new();
    builder.move_to(point(0.0, 0.0));
    builder.move_to(point(5.0, 5.0));
    builder.line_to(point(6.0, 6.0));
    builder.move_to(point(1.0, 1.0));
    let path = builder.build();

    assert_eq!(path.len(), 1);
    assert_eq!(path[0].from(), Some(point(5.0, 5.0)));
}

#[test]
fn drawing_after_close_starts_at_the_start() {
    let mut builder = PathBuilder::new();
    builder.move_to(point(1.0, 1.0));
    builder.line_to(point(5.0, 1.0));
    builder.close_path();
    builder.line_to(point(1.0, 5.0));
    let path = builder.build();

    assert_eq!(path.len(), 2);
    assert!(path[0].is_closed());
    assert!(!path[1].is_closed());
    assert_eq!(path[1].from(), Some(point(1.0, 1.0)));
}

#[test]
fn implicit_move_to() {
    let mut builder = PathBuilder::new();
    builder.line_to(point(3.0, 3.0));
    builder.line_to(point(4.0, 3.0));
    let path = builder.build();

    assert_eq!(path.len(), 1);
    assert_eq!(path[0].len(), 1);
    assert_eq!(path[0].from(), Some(point(3.0, 3.0)));
}

#[test]
fn smooth_curves_reflect_control_points() {
    let mut builder = PathBuilder::new();
    builder.move_to(point(0.0, 0.0));
    builder.quadratic_curve_to(point(1.0, 2.0), point(2.0, 0.0));
    builder.smooth_quadratic_curve_to(point(4.0, 0.0));
    builder.smooth_cubic_curve_to(point(5.0, 1.0), point(6.0, 0.0));
    builder.smooth_cubic_curve_to(point(7.0, 1.0), point(8.0, 0.0));
    let path = builder.build();
    let curves = path[0].curves();

    match (curves[1], curves[2], curves[3]) {
        (Curve::Quadratic(q), Curve::Cubic(c1), Curve::Cubic(c2)) => {
            assert_eq!(q.ctrl, point(3.0, -2.0));
            // Previous curve is not a cubic: the control point is the current point.
            assert_eq!(c1.ctrl1, point(4.0, 0.0));
            assert_eq!(c2.ctrl1, point(7.0, -1.0));
        }
        other => panic!("{:?}", other),
    }
}

#[test]
fn degenerate_arcs() {
    let mut builder = PathBuilder::new();
    builder.move_to(point(0.0, 0.0));
    builder.arc_to(vector(0.0, 5.0), Angle::zero(), ArcFlags::default(), point(10.0, 0.0));
    builder.arc_to(vector(5.0, 5.0), Angle::zero(), ArcFlags::default(), point(10.0, 0.0));
    builder.arc_to(vector(5.0, 5.0), Angle::zero(), ArcFlags::default(), point(0.0, 0.0));
    let path = builder.build();
    let curves = path[0].curves();

    assert_eq!(curves.len(), 2);
    assert_eq!(curves[0], Curve::Line(LineSegment::new(0.0, 0.0, 10.0, 0.0)));
    assert!(matches!(curves[1], Curve::Elliptic(_)));
}
