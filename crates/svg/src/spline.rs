use crate::curves::{CubicCurveParser, EllipticCurveParser, QuadraticCurveParser, SegmentParser};
use crate::path::builder::nearly_equal;
use crate::path::geom::{Curve, LineSegment, ParametricCurve, SvgArc};
use crate::path::math::{point, Point};
use crate::path::Spline;
use crate::{Input, NumberParser, Parse, ParseError, Parser, ParserOptions};

use log::{debug, trace};

use std::mem;

#[derive(Clone, Debug)]
enum Step {
    MoveTo,
    MoveToX { relative: bool, number: NumberParser },
    MoveToY { relative: bool, x: f64, number: NumberParser },
    Command,
    Segment(SegmentParser),
    Quadratic(QuadraticCurveParser),
    Cubic(CubicCurveParser),
    Elliptic(EllipticCurveParser),
}

pub(crate) fn is_drawing_command(c: char) -> bool {
    matches!(
        c,
        'L' | 'l' | 'H' | 'h' | 'V' | 'v' | 'Q' | 'q' | 'T' | 't' | 'C' | 'c' | 'S' | 's' | 'A' | 'a'
    )
}

fn starts_number(c: char) -> bool {
    matches!(c, '0'..='9' | '.' | '-' | '+')
}

/// Parses a spline: a move-to command followed by drawing commands, up to a
/// close command or anything that can't continue the spline.
///
/// Commands repeat implicitly when their letter is omitted, a move-to
/// command being followed by implicit line commands. `Z` adds a line back to
/// the start of the spline when the spline doesn't already end there.
///
/// The spline ends without error at the end of the input, before another
/// move-to command, or at a character that can't start a command, which is
/// left unconsumed.
#[derive(Clone, Debug)]
pub struct SplineParser {
    stop_at: Option<char>,
    origin: Point,
    start: Point,
    current: Point,
    implicit: Option<char>,
    curves: Vec<Curve<f64>>,
    step: Step,
}

impl SplineParser {
    pub fn new() -> Self {
        Self::with_options(&ParserOptions::DEFAULT)
    }

    pub fn with_options(options: &ParserOptions) -> Self {
        Self::with_origin(point(0.0, 0.0), options)
    }

    /// A parser for a spline whose relative move-to command is relative to
    /// `origin`.
    pub fn with_origin(origin: Point, options: &ParserOptions) -> Self {
        SplineParser {
            stop_at: options.stop_at,
            origin,
            start: origin,
            current: origin,
            implicit: None,
            curves: Vec::new(),
            step: Step::MoveTo,
        }
    }

    /// A parser for a spline starting at `start` without a move-to command,
    /// as after a close command.
    pub fn starting_at(start: Point, options: &ParserOptions) -> Self {
        SplineParser {
            step: Step::Command,
            ..Self::with_origin(start, options)
        }
    }

    fn push(&mut self, curve: Curve<f64>) {
        self.current = curve.to();
        self.curves.push(curve);
    }

    fn push_arc(&mut self, arc: SvgArc<f64>) {
        if arc.from == arc.to {
            trace!("Skipping arc ending at its start {:?}", arc.to);
            return;
        }

        if arc.is_straight_line() {
            self.push(Curve::Line(LineSegment {
                from: arc.from,
                to: arc.to,
            }));
        } else {
            self.push(Curve::Elliptic(arc.to_arc()));
        }
    }

    fn close(mut self) -> (Spline, Point) {
        if !self.curves.is_empty() && !nearly_equal(self.current, self.start) {
            let closing = LineSegment {
                from: self.current,
                to: self.start,
            };
            self.push(Curve::Line(closing));
        }
        trace!("Closed spline with {} curves", self.curves.len());
        (Spline::new(self.curves, true), self.start)
    }

    fn finish(self) -> (Spline, Point) {
        trace!("Open spline with {} curves", self.curves.len());
        (Spline::new(self.curves, false), self.current)
    }

    fn curve_parser(&self, command: char) -> Step {
        let from = self.current;
        let previous = self.curves.last();
        match command {
            'Q' | 'q' | 'T' | 't' => {
                Step::Quadratic(QuadraticCurveParser::with_command(command, from, previous))
            }
            'C' | 'c' | 'S' | 's' => {
                Step::Cubic(CubicCurveParser::with_command(command, from, previous))
            }
            'A' | 'a' => Step::Elliptic(EllipticCurveParser::with_command(command, from)),
            _ => Step::Segment(SegmentParser::with_command(command, from)),
        }
    }

    /// Parses the spline, also returning the position following it.
    pub(crate) fn parse_spline(mut self, input: &mut Input) -> Parse<(Spline, Point), Self> {
        loop {
            match mem::replace(&mut self.step, Step::Command) {
                Step::MoveTo => {
                    input.skip_whitespace();
                    match input.head() {
                        Some(c @ ('M' | 'm')) => {
                            input.step();
                            self.step = Step::MoveToX {
                                relative: c == 'm',
                                number: NumberParser::new(),
                            };
                        }
                        Some(c) => {
                            return Parse::Error(ParseError::MissingMoveTo {
                                command: c,
                                position: input.position(),
                            });
                        }
                        None if input.is_last() => return Parse::Done(self.finish()),
                        None => {
                            self.step = Step::MoveTo;
                            return Parse::Cont(self);
                        }
                    }
                }
                Step::MoveToX { relative, number } => match number.parse(input) {
                    Parse::Done(x) => {
                        self.step = Step::MoveToY {
                            relative,
                            x,
                            number: NumberParser::new(),
                        };
                    }
                    Parse::Cont(number) => {
                        self.step = Step::MoveToX { relative, number };
                        return Parse::Cont(self);
                    }
                    Parse::Error(error) => return Parse::Error(error),
                },
                Step::MoveToY {
                    relative,
                    x,
                    number,
                } => match number.parse(input) {
                    Parse::Done(y) => {
                        let mut to = point(x, y);
                        if relative {
                            to += self.origin.to_vector();
                        }
                        self.start = to;
                        self.current = to;
                        self.implicit = Some(if relative { 'l' } else { 'L' });
                    }
                    Parse::Cont(number) => {
                        self.step = Step::MoveToY {
                            relative,
                            x,
                            number,
                        };
                        return Parse::Cont(self);
                    }
                    Parse::Error(error) => return Parse::Error(error),
                },
                Step::Command => {
                    input.skip_separators();
                    let Some(c) = input.head() else {
                        if input.is_last() {
                            return Parse::Done(self.finish());
                        }
                        return Parse::Cont(self);
                    };

                    if self.stop_at == Some(c) {
                        return Parse::Done(self.finish());
                    }

                    let command = if is_drawing_command(c) {
                        input.step();
                        c
                    } else if c == 'Z' || c == 'z' {
                        input.step();
                        return Parse::Done(self.close());
                    } else if c == 'M' || c == 'm' {
                        return Parse::Done(self.finish());
                    } else if let (true, Some(implicit)) = (starts_number(c), self.implicit) {
                        implicit
                    } else {
                        debug!("Spline ends at {:?} ({})", c, input.position());
                        return Parse::Done(self.finish());
                    };

                    self.implicit = Some(command);
                    self.step = self.curve_parser(command);
                }
                Step::Segment(parser) => match parser.parse(input) {
                    Parse::Done(line) => self.push(Curve::Line(line)),
                    Parse::Cont(parser) => {
                        self.step = Step::Segment(parser);
                        return Parse::Cont(self);
                    }
                    Parse::Error(error) => return Parse::Error(error),
                },
                Step::Quadratic(parser) => match parser.parse(input) {
                    Parse::Done(curve) => self.push(Curve::Quadratic(curve)),
                    Parse::Cont(parser) => {
                        self.step = Step::Quadratic(parser);
                        return Parse::Cont(self);
                    }
                    Parse::Error(error) => return Parse::Error(error),
                },
                Step::Cubic(parser) => match parser.parse(input) {
                    Parse::Done(curve) => self.push(Curve::Cubic(curve)),
                    Parse::Cont(parser) => {
                        self.step = Step::Cubic(parser);
                        return Parse::Cont(self);
                    }
                    Parse::Error(error) => return Parse::Error(error),
                },
                Step::Elliptic(parser) => match parser.parse(input) {
                    Parse::Done(arc) => self.push_arc(arc),
                    Parse::Cont(parser) => {
                        self.step = Step::Elliptic(parser);
                        return Parse::Cont(self);
                    }
                    Parse::Error(error) => return Parse::Error(error),
                },
            }
        }
    }
}

impl Default for SplineParser {
    fn default() -> Self {
        SplineParser::new()
    }
}

impl Parser for SplineParser {
    type Output = Spline;

    fn parse(self, input: &mut Input) -> Parse<Spline, Self> {
        self.parse_spline(input).map(|(spline, _)| spline)
    }
}

#[cfg(test)]
use crate::parse_spline;

#[test]
fn square() {
    let spline = parse_spline("M0,0L10,0L10,10Z").unwrap();
    assert!(spline.is_closed());
    assert_eq!(spline.len(), 3);
    assert_eq!(spline[2], Curve::Line(LineSegment::new(10.0, 10.0, 0.0, 0.0)));
}

#[test]
fn close_without_closing_segment() {
    let spline = parse_spline("M0,0 10,0 10,10 0,0 z").unwrap();
    assert!(spline.is_closed());
    assert_eq!(spline.len(), 3);
}

#[test]
fn implicit_commands() {
    let spline = parse_spline("m1 1 2 0 0 2 h1 1 c1,1 1,1 1,0 0,1 0,1 1,0").unwrap();
    assert_eq!(spline.len(), 6);
    assert_eq!(spline.from(), Some(point(1.0, 1.0)));
    assert_eq!(spline[0].to(), point(3.0, 1.0));
    assert_eq!(spline[1].to(), point(3.0, 3.0));
    assert_eq!(spline[3].to(), point(5.0, 3.0));
    assert!(matches!(spline[5], Curve::Cubic(_)));
    assert_eq!(spline.to(), Some(point(7.0, 3.0)));
}

#[test]
fn lenient_termination() {
    let mut input = Input::complete("M0,0 L1,1 # trailing garbage");
    let spline = SplineParser::new().parse(&mut input).finish(&input).unwrap();
    assert_eq!(spline.len(), 1);
    assert_eq!(input.rest(), "# trailing garbage");

    let mut input = Input::complete("M0,0 L1,1 M5,5");
    let spline = SplineParser::new().parse(&mut input).finish(&input).unwrap();
    assert_eq!(spline.len(), 1);
    assert_eq!(input.rest(), "M5,5");
}

#[test]
fn strict_within_commands() {
    assert!(matches!(parse_spline("M0,0 L1"), Err(ParseError::UnexpectedEnd { .. })));
    assert!(matches!(parse_spline("M0,0 C1,1 2,2 x"), Err(ParseError::Number { .. })));
    assert!(matches!(parse_spline("M0"), Err(ParseError::UnexpectedEnd { .. })));
    assert!(matches!(
        parse_spline("L1,1"),
        Err(ParseError::MissingMoveTo { command: 'L', .. })
    ));
}

#[test]
fn arcs() {
    let spline = parse_spline("M0,0 A5,5 0 0,1 10,0").unwrap();
    assert_eq!(spline.len(), 1);
    match spline[0] {
        Curve::Elliptic(arc) => {
            let svg = arc.to_svg_arc();
            assert!((svg.from - point(0.0, 0.0)).length() < 1e-12);
            assert!((svg.to - point(10.0, 0.0)).length() < 1e-12);
        }
        other => panic!("{:?}", other),
    }

    // Degenerate arcs.
    let spline = parse_spline("M0,0 A0,5 0 0,1 10,0 A5,5 0 0,1 10,0").unwrap();
    assert_eq!(spline.len(), 1);
    assert_eq!(spline[0], Curve::Line(LineSegment::new(0.0, 0.0, 10.0, 0.0)));
}

#[test]
fn arc_closed_by_z() {
    let spline = parse_spline("M10,0 A10,10 0 0,1 -10,0 A10,10 0 0,1 10,0 Z").unwrap();
    assert!(spline.is_closed());
    assert_eq!(spline.len(), 2);
}
