//! Parsers for the arguments of a single drawing command.
//!
//! Each parser can be created either before the command letter, in which case
//! it reads and checks it, or after it with `with_command`.

use crate::path::builder::reflect;
use crate::path::geom::{ArcFlags, CubicCurve, Curve, LineSegment, QuadraticCurve, SvgArc};
use crate::path::math::{point, vector, Angle, Point};
use crate::{Input, NumberParser, Parse, ParseError, Parser};

use arrayvec::ArrayVec;

use std::mem;

enum Progress {
    Done,
    Cont,
    Error(ParseError),
}

/// The numbers and flags following a command letter.
#[derive(Clone, Debug, Default)]
struct Arguments {
    values: ArrayVec<f64, 7>,
    number: NumberParser,
}

impl Arguments {
    /// Parses values until there are `count` of them.
    ///
    /// Values at the indices listed in `flags` are single `0` or `1`
    /// characters.
    fn parse(&mut self, input: &mut Input, count: usize, flags: &[usize]) -> Progress {
        while self.values.len() < count {
            if flags.contains(&self.values.len()) {
                input.skip_separators();
                match input.head() {
                    Some('0') => self.values.push(0.0),
                    Some('1') => self.values.push(1.0),
                    Some(c) => {
                        return Progress::Error(ParseError::Flag {
                            src: c,
                            position: input.position(),
                        })
                    }
                    None if input.is_last() => {
                        return Progress::Error(ParseError::UnexpectedEnd {
                            position: input.position(),
                        })
                    }
                    None => return Progress::Cont,
                }
                input.step();
                continue;
            }

            match mem::take(&mut self.number).parse(input) {
                Parse::Done(value) => self.values.push(value),
                Parse::Cont(number) => {
                    self.number = number;
                    return Progress::Cont;
                }
                Parse::Error(error) => return Progress::Error(error),
            }
        }

        Progress::Done
    }

    fn point(&self, index: usize) -> Point {
        point(self.values[index], self.values[index + 1])
    }
}

/// Reads the command letter, if it belongs to `accepted`.
fn parse_command(
    input: &mut Input,
    expected: &'static str,
    accepted: &[char],
) -> Result<Option<char>, ParseError> {
    input.skip_whitespace();
    match input.head() {
        Some(c) if accepted.contains(&c) => {
            input.step();
            Ok(Some(c))
        }
        Some(c) => Err(ParseError::Expected {
            expected,
            src: c,
            position: input.position(),
        }),
        None if input.is_last() => Err(ParseError::UnexpectedEnd {
            position: input.position(),
        }),
        None => Ok(None),
    }
}

macro_rules! command_or_cont {
    ($self:ident, $input:ident, $expected:expr, $accepted:expr) => {
        match $self.command {
            Some(c) => c,
            None => match parse_command($input, $expected, $accepted) {
                Ok(Some(c)) => {
                    $self.command = Some(c);
                    c
                }
                Ok(None) => return Parse::Cont($self),
                Err(error) => return Parse::Error(error),
            },
        }
    };
}

macro_rules! arguments_or_cont {
    ($self:ident, $input:ident, $count:expr, $flags:expr) => {
        match $self.args.parse($input, $count, $flags) {
            Progress::Done => {}
            Progress::Cont => return Parse::Cont($self),
            Progress::Error(error) => return Parse::Error(error),
        }
    };
}

/// Parses a line command: `L`, `H` or `V` and their relative variants.
#[derive(Clone, Debug)]
pub struct SegmentParser {
    from: Point,
    command: Option<char>,
    args: Arguments,
}

impl SegmentParser {
    const COMMANDS: [char; 6] = ['L', 'l', 'H', 'h', 'V', 'v'];

    /// A parser for a line starting at `from`.
    pub fn new(from: Point) -> Self {
        SegmentParser {
            from,
            command: None,
            args: Arguments::default(),
        }
    }

    /// A parser for the arguments of `command`, already read.
    pub fn with_command(command: char, from: Point) -> Self {
        debug_assert!(Self::COMMANDS.contains(&command));
        SegmentParser {
            command: Some(command),
            ..SegmentParser::new(from)
        }
    }
}

impl Parser for SegmentParser {
    type Output = LineSegment<f64>;

    fn parse(mut self, input: &mut Input) -> Parse<LineSegment<f64>, Self> {
        let command = command_or_cont!(self, input, "line command", &Self::COMMANDS);
        let relative = command.is_ascii_lowercase();
        let from = self.from;

        let count = match command {
            'H' | 'h' | 'V' | 'v' => 1,
            _ => 2,
        };
        arguments_or_cont!(self, input, count, &[]);

        let v = self.args.values[0];
        let to = match (command, relative) {
            ('H' | 'h', false) => point(v, from.y),
            ('H' | 'h', true) => point(from.x + v, from.y),
            ('V' | 'v', false) => point(from.x, v),
            ('V' | 'v', true) => point(from.x, from.y + v),
            (_, false) => self.args.point(0),
            (_, true) => from + self.args.point(0).to_vector(),
        };

        Parse::Done(LineSegment { from, to })
    }
}

/// Parses a quadratic curve command: `Q` or `T` and their relative variants.
#[derive(Clone, Debug)]
pub struct QuadraticCurveParser {
    from: Point,
    smooth_ctrl: Point,
    command: Option<char>,
    args: Arguments,
}

impl QuadraticCurveParser {
    const COMMANDS: [char; 4] = ['Q', 'q', 'T', 't'];

    /// A parser for a quadratic curve starting at `from`.
    ///
    /// `previous` is the curve ending at `from`, if any. `T` reflects its
    /// control point when it is a quadratic curve.
    pub fn new(from: Point, previous: Option<&Curve<f64>>) -> Self {
        let smooth_ctrl = match previous {
            Some(Curve::Quadratic(prev)) => reflect(prev.ctrl, from),
            _ => from,
        };
        QuadraticCurveParser {
            from,
            smooth_ctrl,
            command: None,
            args: Arguments::default(),
        }
    }

    pub fn with_command(command: char, from: Point, previous: Option<&Curve<f64>>) -> Self {
        debug_assert!(Self::COMMANDS.contains(&command));
        QuadraticCurveParser {
            command: Some(command),
            ..QuadraticCurveParser::new(from, previous)
        }
    }
}

impl Parser for QuadraticCurveParser {
    type Output = QuadraticCurve<f64>;

    fn parse(mut self, input: &mut Input) -> Parse<QuadraticCurve<f64>, Self> {
        let command = command_or_cont!(self, input, "quadratic curve command", &Self::COMMANDS);
        let smooth = command == 'T' || command == 't';
        arguments_or_cont!(self, input, if smooth { 2 } else { 4 }, &[]);

        let from = self.from;
        let offset = if command.is_ascii_lowercase() {
            from.to_vector()
        } else {
            vector(0.0, 0.0)
        };

        let curve = if smooth {
            QuadraticCurve {
                from,
                ctrl: self.smooth_ctrl,
                to: self.args.point(0) + offset,
            }
        } else {
            QuadraticCurve {
                from,
                ctrl: self.args.point(0) + offset,
                to: self.args.point(2) + offset,
            }
        };

        Parse::Done(curve)
    }
}

/// Parses a cubic curve command: `C` or `S` and their relative variants.
#[derive(Clone, Debug)]
pub struct CubicCurveParser {
    from: Point,
    smooth_ctrl: Point,
    command: Option<char>,
    args: Arguments,
}

impl CubicCurveParser {
    const COMMANDS: [char; 4] = ['C', 'c', 'S', 's'];

    /// A parser for a cubic curve starting at `from`.
    ///
    /// `previous` is the curve ending at `from`, if any. `S` reflects its
    /// second control point when it is a cubic curve.
    pub fn new(from: Point, previous: Option<&Curve<f64>>) -> Self {
        let smooth_ctrl = match previous {
            Some(Curve::Cubic(prev)) => reflect(prev.ctrl2, from),
            _ => from,
        };
        CubicCurveParser {
            from,
            smooth_ctrl,
            command: None,
            args: Arguments::default(),
        }
    }

    pub fn with_command(command: char, from: Point, previous: Option<&Curve<f64>>) -> Self {
        debug_assert!(Self::COMMANDS.contains(&command));
        CubicCurveParser {
            command: Some(command),
            ..CubicCurveParser::new(from, previous)
        }
    }
}

impl Parser for CubicCurveParser {
    type Output = CubicCurve<f64>;

    fn parse(mut self, input: &mut Input) -> Parse<CubicCurve<f64>, Self> {
        let command = command_or_cont!(self, input, "cubic curve command", &Self::COMMANDS);
        let smooth = command == 'S' || command == 's';
        arguments_or_cont!(self, input, if smooth { 4 } else { 6 }, &[]);

        let from = self.from;
        let offset = if command.is_ascii_lowercase() {
            from.to_vector()
        } else {
            vector(0.0, 0.0)
        };

        let curve = if smooth {
            CubicCurve {
                from,
                ctrl1: self.smooth_ctrl,
                ctrl2: self.args.point(0) + offset,
                to: self.args.point(2) + offset,
            }
        } else {
            CubicCurve {
                from,
                ctrl1: self.args.point(0) + offset,
                ctrl2: self.args.point(2) + offset,
                to: self.args.point(4) + offset,
            }
        };

        Parse::Done(curve)
    }
}

/// Parses an elliptic arc command: `A` or `a`.
///
/// The arc is returned in SVG end-point parameterization, with the rotation
/// converted from degrees.
#[derive(Clone, Debug)]
pub struct EllipticCurveParser {
    from: Point,
    command: Option<char>,
    args: Arguments,
}

impl EllipticCurveParser {
    const COMMANDS: [char; 2] = ['A', 'a'];

    pub fn new(from: Point) -> Self {
        EllipticCurveParser {
            from,
            command: None,
            args: Arguments::default(),
        }
    }

    pub fn with_command(command: char, from: Point) -> Self {
        debug_assert!(Self::COMMANDS.contains(&command));
        EllipticCurveParser {
            command: Some(command),
            ..EllipticCurveParser::new(from)
        }
    }
}

impl Parser for EllipticCurveParser {
    type Output = SvgArc<f64>;

    fn parse(mut self, input: &mut Input) -> Parse<SvgArc<f64>, Self> {
        let command = command_or_cont!(self, input, "arc command", &Self::COMMANDS);
        arguments_or_cont!(self, input, 7, &[3, 4]);

        let from = self.from;
        let values = &self.args.values;
        let mut to = self.args.point(5);
        if command == 'a' {
            to += from.to_vector();
        }

        Parse::Done(SvgArc {
            from,
            to,
            radii: vector(values[0], values[1]),
            x_rotation: Angle::degrees(values[2]),
            flags: ArcFlags {
                large_arc: values[3] == 1.0,
                sweep: values[4] == 1.0,
            },
        })
    }
}

#[test]
fn segments() {
    let from = point(1.0, 2.0);
    let parse = |src: &str| {
        SegmentParser::new(from)
            .parse_str(src)
    };

    assert_eq!(parse("L 3 4"), Ok(LineSegment { from, to: point(3.0, 4.0) }));
    assert_eq!(parse("l3,4"), Ok(LineSegment { from, to: point(4.0, 6.0) }));
    assert_eq!(parse("H5"), Ok(LineSegment { from, to: point(5.0, 2.0) }));
    assert_eq!(parse("h5"), Ok(LineSegment { from, to: point(6.0, 2.0) }));
    assert_eq!(parse("V-1"), Ok(LineSegment { from, to: point(1.0, -1.0) }));
    assert_eq!(parse("v-1"), Ok(LineSegment { from, to: point(1.0, 1.0) }));
    assert!(matches!(parse("Q 1 1"), Err(ParseError::Expected { src: 'Q', .. })));
    assert!(matches!(parse("L 1"), Err(ParseError::UnexpectedEnd { .. })));
    assert!(matches!(parse("L 1 x"), Err(ParseError::Number { .. })));
}

#[test]
fn smooth_curves() {
    let previous = Curve::Quadratic(QuadraticCurve {
        from: point(0.0, 0.0),
        ctrl: point(1.0, 2.0),
        to: point(2.0, 0.0),
    });
    let parse = |src: &str, previous: Option<&Curve<f64>>| {
        QuadraticCurveParser::new(point(2.0, 0.0), previous)
            .parse_str(src)
    };

    assert_eq!(parse("T4,0", Some(&previous)).map(|c| c.ctrl), Ok(point(3.0, -2.0)));
    assert_eq!(parse("t2,0", Some(&previous)).map(|c| c.to), Ok(point(4.0, 0.0)));
    assert_eq!(parse("T4,0", None).map(|c| c.ctrl), Ok(point(2.0, 0.0)));

    // A quadratic curve before S doesn't count.
    let cubic = CubicCurveParser::new(point(2.0, 0.0), Some(&previous))
        .parse_str("S5,1 6,0");
    assert_eq!(cubic.map(|c| c.ctrl1), Ok(point(2.0, 0.0)));

    let previous = Curve::Cubic(CubicCurve {
        from: point(0.0, 0.0),
        ctrl1: point(0.0, 1.0),
        ctrl2: point(1.0, 1.0),
        to: point(2.0, 0.0),
    });
    let cubic = CubicCurveParser::new(point(2.0, 0.0), Some(&previous))
        .parse_str("s1,-1 2,0");
    assert_eq!(
        cubic,
        Ok(CubicCurve {
            from: point(2.0, 0.0),
            ctrl1: point(3.0, -1.0),
            ctrl2: point(3.0, -1.0),
            to: point(4.0, 0.0),
        })
    );
}

#[test]
fn arcs() {
    let parse = |src: &str| {
        EllipticCurveParser::new(point(0.0, 0.0))
            .parse_str(src)
    };

    let arc = parse("A5,5 30 0,1 10,0").unwrap();
    assert_eq!(arc.to, point(10.0, 0.0));
    assert_eq!(arc.radii, vector(5.0, 5.0));
    assert_eq!(
        arc.flags,
        ArcFlags {
            large_arc: false,
            sweep: true
        }
    );
    assert!((arc.x_rotation.radians - std::f64::consts::PI / 6.0).abs() < 1e-12);

    // Flags don't need separators.
    let arc = parse("a5 5 0 1010 0");
    assert_eq!(
        arc.map(|arc| (arc.to, arc.flags)),
        Ok((
            point(10.0, 0.0),
            ArcFlags {
                large_arc: true,
                sweep: false
            }
        ))
    );

    assert!(matches!(parse("A5,5 0 2,1 10,0"), Err(ParseError::Flag { src: '2', .. })));
}
