//! A chain of curves.

use crate::builder::{nearly_equal, PathSink};
use crate::geom::traits::Transformation;
use crate::geom::{BoundingBox, Curve, ParametricCurve};
use crate::math::*;
use crate::serializer::{FormatOptions, PathSerializer};

use std::borrow::Cow;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::ops::Index;
use std::sync::OnceLock;

/// An ordered sequence of curves where each curve starts at the end of the
/// previous one.
///
/// When the spline is closed, the last curve ends at the start of the first
/// one.
///
/// Splines are immutable. The bounding box and the default path string are
/// computed on first access and cached; the caches are not part of the
/// spline's equality or hash.
#[derive(Clone, Default)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub struct Spline {
    curves: Vec<Curve<f64>>,
    closed: bool,
    #[cfg_attr(feature = "serialization", serde(skip))]
    bounds: OnceLock<Box2D>,
    #[cfg_attr(feature = "serialization", serde(skip))]
    path_string: OnceLock<String>,
}

/// Maps a parameter over a sequence of `n` items to the index of the item and
/// the parameter within it.
///
/// Every item gets an equal share of the range, regardless of its length.
pub(crate) fn item_parameter(u: f64, n: usize) -> (usize, f64) {
    debug_assert!(n > 0);
    let scaled = u * n as f64;
    // Float to int casts saturate, negative values map to 0.
    let index = (scaled.floor() as usize).min(n - 1);
    (index, scaled - index as f64)
}

impl Spline {
    /// Creates a spline from a list of connected curves.
    ///
    /// The curves are not checked for continuity.
    pub fn new(curves: Vec<Curve<f64>>, closed: bool) -> Self {
        Spline {
            curves,
            closed,
            bounds: OnceLock::new(),
            path_string: OnceLock::new(),
        }
    }

    /// Creates an open spline with no curves.
    pub fn empty() -> Self {
        Spline::new(Vec::new(), false)
    }

    pub fn curves(&self) -> &[Curve<f64>] {
        &self.curves
    }

    pub fn iter(&self) -> std::slice::Iter<Curve<f64>> {
        self.curves.iter()
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    /// Number of curves.
    pub fn len(&self) -> usize {
        self.curves.len()
    }

    pub fn is_empty(&self) -> bool {
        self.curves.is_empty()
    }

    /// Start of the first curve.
    pub fn from(&self) -> Option<Point> {
        self.curves.first().map(|curve| curve.from())
    }

    /// End of the last curve.
    pub fn to(&self) -> Option<Point> {
        self.curves.last().map(|curve| curve.to())
    }

    /// The smallest box containing all of the curves.
    ///
    /// Undefined for an empty spline.
    pub fn bounding_box(&self) -> Box2D {
        *self.bounds.get_or_init(|| {
            self.curves
                .iter()
                .fold(Box2D::undefined(), |bounds, curve| {
                    bounds.union(&curve.bounding_box())
                })
        })
    }

    /// Samples the spline at `u`, each curve covering an equal share of the
    /// `[0, 1]` range.
    pub fn sample(&self, u: f64) -> Option<Point> {
        if self.curves.is_empty() {
            return None;
        }
        let (index, t) = item_parameter(u, self.curves.len());
        Some(self.curves[index].sample(t))
    }

    /// Splits the spline in two open splines at `u`.
    ///
    /// `u` is mapped to a curve the same way as in [`Spline::sample`].
    pub fn split(&self, u: f64) -> (Spline, Spline) {
        if self.curves.is_empty() {
            return (Spline::empty(), Spline::empty());
        }

        let (index, t) = item_parameter(u, self.curves.len());
        let (a, b) = self.curves[index].split(t);

        let mut before = Vec::with_capacity(index + 1);
        before.extend_from_slice(&self.curves[..index]);
        before.push(a);

        let mut after = Vec::with_capacity(self.curves.len() - index);
        after.push(b);
        after.extend_from_slice(&self.curves[index + 1..]);

        (Spline::new(before, false), Spline::new(after, false))
    }

    /// Replaces the curve at `u` with its two halves.
    ///
    /// The spline keeps its shape and closedness.
    pub fn subdivide(&self, u: f64) -> Spline {
        if self.curves.is_empty() {
            return self.clone();
        }

        let (index, t) = item_parameter(u, self.curves.len());
        let (a, b) = self.curves[index].split(t);

        let mut curves = Vec::with_capacity(self.curves.len() + 1);
        curves.extend_from_slice(&self.curves[..index]);
        curves.push(a);
        curves.push(b);
        curves.extend_from_slice(&self.curves[index + 1..]);

        Spline::new(curves, self.closed)
    }

    /// Applies the transform to every curve.
    pub fn transformed<T: Transformation<f64>>(&self, transform: &T) -> Spline {
        let curves = self
            .curves
            .iter()
            .map(|curve| curve.transformed(transform))
            .collect();
        Spline::new(curves, self.closed)
    }

    /// The same spline, traversed in the opposite direction.
    pub fn reversed(&self) -> Spline {
        let curves = self.curves.iter().rev().map(|curve| curve.flip()).collect();
        Spline::new(curves, self.closed)
    }

    /// Returns whether all curves have finite coordinates.
    pub fn is_defined(&self) -> bool {
        self.curves.iter().all(Curve::is_defined)
    }

    /// Replays the spline into a drawing sink.
    ///
    /// The closing line of a closed spline is left to `close_path`, unless
    /// it is too short for `close_path` to add it back.
    pub fn draw(&self, sink: &mut impl PathSink) {
        let Some(first) = self.curves.first() else {
            return;
        };
        let start = first.from();

        let mut curves = &self.curves[..];
        if self.closed && curves.len() > 1 {
            if let Some(Curve::Line(line)) = curves.last() {
                if line.to == start && !nearly_equal(line.from, start) {
                    curves = &curves[..curves.len() - 1];
                }
            }
        }

        sink.move_to(start);
        for curve in curves {
            sink.curve_to(curve);
        }
        if self.closed {
            sink.close_path();
        }
    }

    /// The SVG path string of this spline with the default options.
    pub fn path_string(&self) -> &str {
        self.path_string
            .get_or_init(|| self.format(&FormatOptions::DEFAULT))
    }

    /// The SVG path string of this spline.
    ///
    /// Only the string for the default options is cached.
    pub fn to_path_string(&self, options: &FormatOptions) -> Cow<str> {
        if *options == FormatOptions::DEFAULT {
            Cow::Borrowed(self.path_string())
        } else {
            Cow::Owned(self.format(options))
        }
    }

    fn format(&self, options: &FormatOptions) -> String {
        let mut serializer = PathSerializer::new(options);
        self.draw(&mut serializer);
        serializer.build()
    }
}

impl PartialEq for Spline {
    fn eq(&self, other: &Self) -> bool {
        self.closed == other.closed && self.curves == other.curves
    }
}

impl Hash for Spline {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.closed.hash(state);
        self.curves.hash(state);
    }
}

impl fmt::Debug for Spline {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("Spline")
            .field("curves", &self.curves)
            .field("closed", &self.closed)
            .finish()
    }
}

impl fmt::Display for Spline {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.path_string())
    }
}

impl BoundingBox for Spline {
    type Scalar = f64;
    fn bounding_box(&self) -> Box2D {
        self.bounding_box()
    }
}

impl Index<usize> for Spline {
    type Output = Curve<f64>;
    fn index(&self, index: usize) -> &Curve<f64> {
        &self.curves[index]
    }
}

impl<'l> IntoIterator for &'l Spline {
    type Item = &'l Curve<f64>;
    type IntoIter = std::slice::Iter<'l, Curve<f64>>;
    fn into_iter(self) -> Self::IntoIter {
        self.curves.iter()
    }
}

/// Collects curves into an open spline.
impl FromIterator<Curve<f64>> for Spline {
    fn from_iter<I: IntoIterator<Item = Curve<f64>>>(iter: I) -> Self {
        Spline::new(iter.into_iter().collect(), false)
    }
}

#[cfg(test)]
use crate::geom::{LineSegment, QuadraticCurve};

#[cfg(test)]
fn square() -> Spline {
    Spline::new(
        vec![
            Curve::Line(LineSegment::new(0.0, 0.0, 10.0, 0.0)),
            Curve::Line(LineSegment::new(10.0, 0.0, 10.0, 10.0)),
            Curve::Line(LineSegment::new(10.0, 10.0, 0.0, 10.0)),
            Curve::Line(LineSegment::new(0.0, 10.0, 0.0, 0.0)),
        ],
        true,
    )
}

#[test]
fn uniform_weighting() {
    assert_eq!(item_parameter(0.0, 4), (0, 0.0));
    assert_eq!(item_parameter(0.5, 4), (2, 0.0));
    assert_eq!(item_parameter(0.625, 4), (2, 0.5));
    assert_eq!(item_parameter(1.0, 4), (3, 1.0));
    assert_eq!(item_parameter(1.0, 1), (0, 1.0));
}

#[test]
fn sample() {
    let s = square();
    assert_eq!(s.sample(0.0), Some(point(0.0, 0.0)));
    assert_eq!(s.sample(0.125), Some(point(5.0, 0.0)));
    assert_eq!(s.sample(0.375), Some(point(10.0, 5.0)));
    assert_eq!(s.sample(1.0), Some(point(0.0, 0.0)));
    assert_eq!(Spline::empty().sample(0.5), None);
}

#[test]
fn split() {
    let s = square();
    let (a, b) = s.split(0.375);

    assert!(!a.is_closed());
    assert!(!b.is_closed());
    assert_eq!(a.len(), 2);
    assert_eq!(b.len(), 3);
    assert_eq!(a.to(), Some(point(10.0, 5.0)));
    assert_eq!(b.from(), Some(point(10.0, 5.0)));
    assert_eq!(a.from(), s.from());
    assert_eq!(b.to(), s.to());
}

#[test]
fn subdivide() {
    let s = square();
    let d = s.subdivide(0.125);
    assert!(d.is_closed());
    assert_eq!(d.len(), 5);
    assert_eq!(d[0].to(), point(5.0, 0.0));
    assert_eq!(d[1].from(), point(5.0, 0.0));
    assert_eq!(d.bounding_box(), s.bounding_box());
}

#[test]
fn bounds() {
    let s = Spline::new(
        vec![
            Curve::Line(LineSegment::new(0.0, 0.0, 10.0, 0.0)),
            Curve::Quadratic(QuadraticCurve::new(
                point(10.0, 0.0),
                point(5.0, 10.0),
                point(0.0, 0.0),
            )),
        ],
        false,
    );
    assert_eq!(s.bounding_box(), Box2D::new(0.0, 0.0, 10.0, 5.0));
    assert!(!Spline::empty().bounding_box().is_defined());
}

#[test]
fn path_string_is_cached() {
    let s = square();
    let a = s.path_string();
    let b = s.path_string();
    assert_eq!(a, "M0,0H10V10H0Z");
    assert!(std::ptr::eq(a, b));
    assert!(matches!(s.to_path_string(&FormatOptions::DEFAULT), Cow::Borrowed(_)));
    assert_eq!(s.to_path_string(&FormatOptions::relative()), "M0,0h10v10h-10z");
}

#[test]
fn equality_ignores_caches() {
    let a = square();
    let b = square();
    let _ = a.bounding_box();
    let _ = a.path_string();
    assert_eq!(a, b);

    use std::collections::hash_map::DefaultHasher;
    let hash = |s: &Spline| {
        let mut hasher = DefaultHasher::new();
        s.hash(&mut hasher);
        hasher.finish()
    };
    assert_eq!(hash(&a), hash(&b));
}

#[test]
fn reversed() {
    let s = square();
    let r = s.reversed();
    assert!(r.is_closed());
    assert_eq!(r.from(), Some(point(0.0, 0.0)));
    assert_eq!(r[0].to(), point(0.0, 10.0));
    assert_eq!(r.reversed(), s);
}

#[test]
fn transformed() {
    let s = square().transformed(&Translation::new(1.0, 2.0));
    assert_eq!(s.bounding_box(), Box2D::new(1.0, 2.0, 11.0, 12.0));
    assert!(s.is_defined());
}

#[test]
fn zero_length_closing_line_is_kept() {
    let mut builder = crate::PathBuilder::new();
    builder.move_to(point(0.0, 0.0));
    builder.line_to(point(10.0, 0.0));
    builder.line_to(point(0.0, 0.0));
    builder.line_to(point(0.0, 0.0));
    builder.close_path();
    let path = builder.build();
    let s = &path[0];
    assert_eq!(s.len(), 3);

    // close_path wouldn't add a line from the start to itself back.
    assert_eq!(s.path_string(), "M0,0H10H0H0Z");

    let mut copy = crate::PathBuilder::new();
    s.draw(&mut copy);
    assert_eq!(copy.build()[0], *s);

    // A regular closing line is still left to close_path.
    assert_eq!(square().path_string(), "M0,0H10V10H0Z");
}
