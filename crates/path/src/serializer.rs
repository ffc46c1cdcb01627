//! Writes splines and paths using the SVG path syntax.
//!
//! The output is compact: commands are followed by their first coordinate
//! without separator, coordinate pairs are joined with a comma and separated
//! with a space. Axis-aligned lines use `H` and `V`, and quadratic or cubic
//! curves whose first control point is the reflection of the previous one use
//! `T` and `S`.

use crate::builder::{reflect, PathSink};
use crate::geom::EllipticCurve;
use crate::math::*;

use std::f64::consts::PI;

/// Parameters for the path serializer.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
#[non_exhaustive]
pub struct FormatOptions {
    /// Maximum number of digits after the decimal point.
    ///
    /// When `None`, numbers are written with the shortest representation that
    /// parses back to the same value.
    ///
    /// Default value: `None`.
    pub precision: Option<usize>,

    /// Whether to use relative (lowercase) commands.
    ///
    /// The first command of each spline is always an absolute `M`.
    ///
    /// Default value: `false`.
    pub relative: bool,
}

impl FormatOptions {
    pub const DEFAULT: Self = FormatOptions {
        precision: None,
        relative: false,
    };

    #[inline]
    pub fn precision(precision: usize) -> Self {
        Self::DEFAULT.with_precision(precision)
    }

    #[inline]
    pub fn relative() -> Self {
        Self::DEFAULT.with_relative(true)
    }

    #[inline]
    pub const fn with_precision(mut self, precision: usize) -> Self {
        self.precision = Some(precision);
        self
    }

    #[inline]
    pub const fn with_relative(mut self, relative: bool) -> Self {
        self.relative = relative;
        self
    }
}

impl Default for FormatOptions {
    fn default() -> Self {
        Self::DEFAULT
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
enum Previous {
    None,
    Quadratic(Point),
    Cubic(Point),
}

/// A [`PathSink`] that builds a `String` representation of the path using
/// the SVG syntax.
pub struct PathSerializer {
    path: String,
    options: FormatOptions,
    start: Point,
    current: Point,
    previous: Previous,
}

impl PathSerializer {
    pub fn new(options: &FormatOptions) -> Self {
        PathSerializer {
            path: String::new(),
            options: *options,
            start: point(0.0, 0.0),
            current: point(0.0, 0.0),
            previous: Previous::None,
        }
    }

    pub fn build(self) -> String {
        self.path
    }

    fn command(&mut self, absolute: char) {
        if self.options.relative {
            self.path.push(absolute.to_ascii_lowercase());
        } else {
            self.path.push(absolute);
        }
    }

    fn number(&mut self, value: f64) {
        // Negative zero compares equal to zero, and would print as "-0".
        let value = if value == 0.0 { 0.0 } else { value };
        match self.options.precision {
            None => self.path += &format!("{}", value),
            Some(precision) => {
                let mut s = format!("{:.*}", precision, value);
                if s.contains('.') {
                    let trimmed = s.trim_end_matches('0').trim_end_matches('.').len();
                    s.truncate(trimmed);
                }
                if s == "-0" {
                    s.remove(0);
                }
                self.path += &s;
            }
        }
    }

    fn pair(&mut self, p: Point) {
        self.number(p.x);
        self.path.push(',');
        self.number(p.y);
    }

    // Writes a point, relative to the current position if needed.
    fn position(&mut self, p: Point) {
        if self.options.relative {
            let v = p - self.current;
            self.pair(v.to_point());
        } else {
            self.pair(p);
        }
    }

    fn arc_segment(&mut self, arc: &EllipticCurve<f64>) {
        let svg = arc.to_svg_arc();
        self.command('A');
        self.pair(svg.radii.to_point());
        self.path.push(' ');
        self.number(svg.x_rotation.radians * 180.0 / PI);
        self.path.push(' ');
        self.path.push(if svg.flags.large_arc { '1' } else { '0' });
        self.path.push(',');
        self.path.push(if svg.flags.sweep { '1' } else { '0' });
        self.path.push(' ');
        self.position(svg.to);
        self.current = svg.to;
    }
}

impl PathSink for PathSerializer {
    fn move_to(&mut self, to: Point) {
        self.path.push('M');
        self.pair(to);
        self.start = to;
        self.current = to;
        self.previous = Previous::None;
    }

    fn line_to(&mut self, to: Point) {
        let from = self.current;
        if to.y == from.y {
            self.command('H');
            self.number(if self.options.relative { to.x - from.x } else { to.x });
        } else if to.x == from.x {
            self.command('V');
            self.number(if self.options.relative { to.y - from.y } else { to.y });
        } else {
            self.command('L');
            self.position(to);
        }
        self.current = to;
        self.previous = Previous::None;
    }

    fn quadratic_curve_to(&mut self, ctrl: Point, to: Point) {
        let implicit_ctrl = match self.previous {
            Previous::Quadratic(prev) => reflect(prev, self.current),
            _ => self.current,
        };

        if ctrl == implicit_ctrl {
            self.command('T');
        } else {
            self.command('Q');
            self.position(ctrl);
            self.path.push(' ');
        }
        self.position(to);
        self.current = to;
        self.previous = Previous::Quadratic(ctrl);
    }

    fn cubic_curve_to(&mut self, ctrl1: Point, ctrl2: Point, to: Point) {
        let implicit_ctrl = match self.previous {
            Previous::Cubic(prev) => reflect(prev, self.current),
            _ => self.current,
        };

        if ctrl1 == implicit_ctrl {
            self.command('S');
        } else {
            self.command('C');
            self.position(ctrl1);
            self.path.push(' ');
        }
        self.position(ctrl2);
        self.path.push(' ');
        self.position(to);
        self.current = to;
        self.previous = Previous::Cubic(ctrl2);
    }

    fn elliptic_curve_to(&mut self, arc: &EllipticCurve<f64>) {
        // An arc can't express a full turn in endpoint form.
        if arc.sweep_angle.radians.abs() >= 2.0 * PI {
            let (a, b) = arc.split(0.5);
            self.arc_segment(&a);
            self.arc_segment(&b);
        } else {
            self.arc_segment(arc);
        }
        self.previous = Previous::None;
    }

    fn close_path(&mut self) {
        self.command('Z');
        self.current = self.start;
        self.previous = Previous::None;
    }
}

#[cfg(test)]
fn serialize(options: &FormatOptions, draw: impl FnOnce(&mut PathSerializer)) -> String {
    let mut serializer = PathSerializer::new(options);
    draw(&mut serializer);
    serializer.build()
}

#[test]
fn compact_commands() {
    let s = serialize(&FormatOptions::DEFAULT, |s| {
        s.move_to(point(0.0, 0.0));
        s.line_to(point(10.0, 0.0));
        s.line_to(point(10.0, 10.0));
        s.line_to(point(-2.5, 3.0));
        s.close_path();
    });
    assert_eq!(s, "M0,0H10V10L-2.5,3Z");
}

#[test]
fn smooth_curves() {
    let s = serialize(&FormatOptions::DEFAULT, |s| {
        s.move_to(point(0.0, 0.0));
        s.quadratic_curve_to(point(1.0, 2.0), point(2.0, 0.0));
        s.quadratic_curve_to(point(3.0, -2.0), point(4.0, 0.0));
        s.cubic_curve_to(point(5.0, 1.0), point(6.0, 1.0), point(7.0, 0.0));
        s.cubic_curve_to(point(8.0, -1.0), point(9.0, 1.0), point(10.0, 0.0));
    });
    assert_eq!(s, "M0,0Q1,2 2,0T4,0C5,1 6,1 7,0S9,1 10,0");
}

#[test]
fn relative_commands() {
    let s = serialize(&FormatOptions::relative(), |s| {
        s.move_to(point(1.0, 1.0));
        s.line_to(point(3.0, 1.0));
        s.line_to(point(4.0, 5.0));
        s.close_path();
        s.move_to(point(10.0, 10.0));
        s.line_to(point(10.0, 12.0));
    });
    assert_eq!(s, "M1,1h2l1,4zM10,10v2");
}

#[test]
fn precision() {
    let options = FormatOptions::precision(2);
    let s = serialize(&options, |s| {
        s.move_to(point(0.333333, -0.0001));
        s.line_to(point(1.5, 2.0));
    });
    assert_eq!(s, "M0.33,0L1.5,2");
}

#[test]
fn arcs() {
    use crate::geom::{ArcFlags, SvgArc};

    let arc = SvgArc {
        from: point(0.0, 0.0),
        to: point(10.0, 0.0),
        radii: vector(5.0, 5.0),
        x_rotation: Angle::zero(),
        flags: ArcFlags {
            large_arc: false,
            sweep: true,
        },
    }
    .to_arc();

    let s = serialize(&FormatOptions::precision(6), |s| {
        s.move_to(point(0.0, 0.0));
        s.elliptic_curve_to(&arc);
    });
    assert_eq!(s, "M0,0A5,5 0 0,1 10,0");

    let full = EllipticCurve {
        center: point(0.0, 0.0),
        radii: vector(2.0, 2.0),
        x_rotation: Angle::zero(),
        start_angle: Angle::zero(),
        sweep_angle: Angle::radians(2.0 * PI),
    };
    let s = serialize(&FormatOptions::precision(6), |s| {
        s.move_to(point(2.0, 0.0));
        s.elliptic_curve_to(&full);
    });
    assert_eq!(s, "M2,0A2,2 0 0,1 -2,0A2,2 0 0,1 2,0");
}
