//! The compound path data structure.

use crate::builder::{PathBuilder, PathSink};
use crate::geom::traits::Transformation;
use crate::geom::{BoundingBox, Curve};
use crate::math::*;
use crate::serializer::{FormatOptions, PathSerializer};
use crate::spline::{item_parameter, Spline};

use std::borrow::Cow;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::ops::Index;
use std::sync::OnceLock;

/// An ordered list of splines, possibly disjoint.
///
/// Like [`Spline`], paths are immutable and lazily cache their bounding box
/// and their default path string.
///
/// # Examples
///
/// ```
/// use figura_path::Path;
/// use figura_path::math::{point, Box2D};
///
/// let mut builder = Path::builder();
/// builder.move_to(point(0.0, 0.0));
/// builder.line_to(point(4.0, 0.0));
/// builder.move_to(point(10.0, 10.0));
/// builder.line_to(point(10.0, 12.0));
/// let path = builder.build();
///
/// assert_eq!(path.bounding_box(), Box2D::new(0.0, 0.0, 10.0, 12.0));
/// assert_eq!(path.to_string(), "M0,0H4M10,10V12");
/// ```
#[derive(Clone, Default)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub struct Path {
    splines: Vec<Spline>,
    #[cfg_attr(feature = "serialization", serde(skip))]
    bounds: OnceLock<Box2D>,
    #[cfg_attr(feature = "serialization", serde(skip))]
    path_string: OnceLock<String>,
}

impl Path {
    pub fn new(splines: Vec<Spline>) -> Self {
        Path {
            splines,
            bounds: OnceLock::new(),
            path_string: OnceLock::new(),
        }
    }

    /// Creates an empty path.
    pub fn empty() -> Self {
        Path::new(Vec::new())
    }

    /// Creates a [`PathBuilder`].
    pub fn builder() -> PathBuilder {
        PathBuilder::new()
    }

    pub fn splines(&self) -> &[Spline] {
        &self.splines
    }

    pub fn iter(&self) -> std::slice::Iter<Spline> {
        self.splines.iter()
    }

    /// Iterates over the curves of every spline.
    pub fn curves(&self) -> impl Iterator<Item = &Curve<f64>> + '_ {
        self.splines.iter().flat_map(|spline| spline.iter())
    }

    /// Number of splines.
    pub fn len(&self) -> usize {
        self.splines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.splines.is_empty()
    }

    /// The smallest box containing all of the splines.
    ///
    /// Undefined for an empty path.
    pub fn bounding_box(&self) -> Box2D {
        *self.bounds.get_or_init(|| {
            self.splines
                .iter()
                .fold(Box2D::undefined(), |bounds, spline| {
                    bounds.union(&spline.bounding_box())
                })
        })
    }

    /// Samples the path at `u`, each spline covering an equal share of the
    /// `[0, 1]` range.
    pub fn sample(&self, u: f64) -> Option<Point> {
        if self.splines.is_empty() {
            return None;
        }
        let (index, t) = item_parameter(u, self.splines.len());
        self.splines[index].sample(t)
    }

    /// Splits the path in two at `u`.
    ///
    /// The spline at `u` is split in two open splines, the others are kept as
    /// they are.
    pub fn split(&self, u: f64) -> (Path, Path) {
        if self.splines.is_empty() {
            return (Path::empty(), Path::empty());
        }

        let (index, t) = item_parameter(u, self.splines.len());
        let (a, b) = self.splines[index].split(t);

        let mut before = Vec::with_capacity(index + 1);
        before.extend_from_slice(&self.splines[..index]);
        before.push(a);

        let mut after = Vec::with_capacity(self.splines.len() - index);
        after.push(b);
        after.extend_from_slice(&self.splines[index + 1..]);

        (Path::new(before), Path::new(after))
    }

    /// Subdivides the spline at `u`, see [`Spline::subdivide`].
    pub fn subdivide(&self, u: f64) -> Path {
        if self.splines.is_empty() {
            return self.clone();
        }

        let (index, t) = item_parameter(u, self.splines.len());
        let mut splines = self.splines.clone();
        splines[index] = self.splines[index].subdivide(t);

        Path::new(splines)
    }

    /// Applies the transform to every spline.
    pub fn transformed<T: Transformation<f64>>(&self, transform: &T) -> Path {
        self.splines
            .iter()
            .map(|spline| spline.transformed(transform))
            .collect()
    }

    /// The same path with every spline in reverse order and direction.
    pub fn reversed(&self) -> Path {
        self.splines.iter().rev().map(Spline::reversed).collect()
    }

    /// Returns whether all curves have finite coordinates.
    pub fn is_defined(&self) -> bool {
        self.splines.iter().all(Spline::is_defined)
    }

    /// Replays every spline into a drawing sink.
    pub fn draw(&self, sink: &mut impl PathSink) {
        for spline in &self.splines {
            spline.draw(sink);
        }
    }

    /// The SVG path string of this path with the default options.
    pub fn path_string(&self) -> &str {
        self.path_string.get_or_init(|| {
            self.splines
                .iter()
                .map(Spline::path_string)
                .collect::<String>()
        })
    }

    /// The SVG path string of this path.
    ///
    /// Only the string for the default options is cached.
    pub fn to_path_string(&self, options: &FormatOptions) -> Cow<str> {
        if *options == FormatOptions::DEFAULT {
            return Cow::Borrowed(self.path_string());
        }

        let mut serializer = PathSerializer::new(options);
        self.draw(&mut serializer);
        Cow::Owned(serializer.build())
    }
}

impl PartialEq for Path {
    fn eq(&self, other: &Self) -> bool {
        self.splines == other.splines
    }
}

impl Hash for Path {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.splines.hash(state);
    }
}

impl fmt::Debug for Path {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("Path")
            .field("splines", &self.splines)
            .finish()
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.path_string())
    }
}

impl BoundingBox for Path {
    type Scalar = f64;
    fn bounding_box(&self) -> Box2D {
        self.bounding_box()
    }
}

impl Index<usize> for Path {
    type Output = Spline;
    fn index(&self, index: usize) -> &Spline {
        &self.splines[index]
    }
}

impl<'l> IntoIterator for &'l Path {
    type Item = &'l Spline;
    type IntoIter = std::slice::Iter<'l, Spline>;
    fn into_iter(self) -> Self::IntoIter {
        self.splines.iter()
    }
}

impl FromIterator<Spline> for Path {
    fn from_iter<I: IntoIterator<Item = Spline>>(iter: I) -> Self {
        Path::new(iter.into_iter().collect())
    }
}

impl From<Spline> for Path {
    fn from(spline: Spline) -> Self {
        Path::new(vec![spline])
    }
}

#[cfg(test)]
fn two_squares() -> Path {
    let mut builder = Path::builder();
    for offset in [0.0, 20.0] {
        builder.move_to(point(offset, offset));
        builder.line_to(point(offset + 10.0, offset));
        builder.line_to(point(offset + 10.0, offset + 10.0));
        builder.line_to(point(offset, offset + 10.0));
        builder.close_path();
    }
    builder.build()
}

#[test]
fn empty_path() {
    let path = Path::empty();
    assert!(path.is_empty());
    assert!(!path.bounding_box().is_defined());
    assert_eq!(path.bounding_box(), Box2D::undefined());
    assert_eq!(path.sample(0.5), None);
    assert_eq!(path.path_string(), "");
}

#[test]
fn bounds() {
    let path = two_squares();
    assert_eq!(path.bounding_box(), Box2D::new(0.0, 0.0, 30.0, 30.0));
    assert_eq!(path.curves().count(), 8);
}

#[test]
fn sample_and_split() {
    let path = two_squares();
    assert_eq!(path.sample(0.0), Some(point(0.0, 0.0)));
    assert_eq!(path.sample(0.5), Some(point(20.0, 20.0)));
    assert_eq!(path.sample(0.5625), Some(point(25.0, 20.0)));

    let (a, b) = path.split(0.25);
    assert_eq!(a.len(), 1);
    assert_eq!(b.len(), 2);
    assert_eq!(a[0].to(), Some(point(10.0, 10.0)));
    assert_eq!(b[0].from(), Some(point(10.0, 10.0)));
    assert!(b[1].is_closed());

    let d = path.subdivide(0.75);
    assert_eq!(d.len(), 2);
    assert_eq!(d[1].len(), 5);
    assert_eq!(d[0], path[0]);
}

#[test]
fn path_string() {
    let path = two_squares();
    assert_eq!(path.path_string(), "M0,0H10V10H0ZM20,20H30V30H20Z");
    assert_eq!(format!("{}", path), path.path_string());
    assert_eq!(
        path.to_path_string(&FormatOptions::relative()),
        "M0,0h10v10h-10zM20,20h10v10h-10z"
    );
}

#[test]
fn draw_into_builder_round_trips() {
    let path = two_squares();
    let mut builder = Path::builder();
    path.draw(&mut builder);
    assert_eq!(builder.build(), path);
}

#[test]
fn reversed() {
    let path = two_squares();
    let r = path.reversed();
    assert_eq!(r[0].from(), Some(point(20.0, 20.0)));
    assert_eq!(r.bounding_box(), path.bounding_box());
    assert_eq!(r.reversed(), path);
}
