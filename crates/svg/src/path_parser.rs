use crate::path::math::{point, Point};
use crate::path::{Path, Spline};
use crate::spline::{is_drawing_command, SplineParser};
use crate::{Input, Parse, ParseError, Parser, ParserOptions};

use log::{debug, trace};

/// Parses a path: a sequence of splines.
///
/// The path must start with a move-to command. Relative move-to commands are
/// relative to the end of the previous spline, and drawing commands following
/// a close command start a new spline at the start of the closed one.
///
/// Splines without curves are not kept.
#[derive(Clone, Debug)]
pub struct PathParser {
    options: ParserOptions,
    splines: Vec<Spline>,
    current: Point,
    started: bool,
    closed: bool,
    spline: Option<SplineParser>,
}

impl PathParser {
    pub fn new() -> Self {
        Self::with_options(&ParserOptions::DEFAULT)
    }

    pub fn with_options(options: &ParserOptions) -> Self {
        PathParser {
            options: *options,
            splines: Vec::new(),
            current: point(0.0, 0.0),
            started: false,
            closed: false,
            spline: None,
        }
    }

    fn finish(self) -> Path {
        trace!("Path with {} splines", self.splines.len());
        Path::new(self.splines)
    }
}

impl Default for PathParser {
    fn default() -> Self {
        PathParser::new()
    }
}

impl Parser for PathParser {
    type Output = Path;

    fn parse(mut self, input: &mut Input) -> Parse<Path, Self> {
        loop {
            if let Some(parser) = self.spline.take() {
                match parser.parse_spline(input) {
                    Parse::Done((spline, end)) => {
                        self.current = end;
                        self.closed = spline.is_closed();
                        if !spline.is_empty() {
                            self.splines.push(spline);
                        }
                    }
                    Parse::Cont(parser) => {
                        self.spline = Some(parser);
                        return Parse::Cont(self);
                    }
                    Parse::Error(error) => return Parse::Error(error),
                }
            }

            input.skip_whitespace();
            let Some(c) = input.head() else {
                if input.is_last() {
                    return Parse::Done(self.finish());
                }
                return Parse::Cont(self);
            };

            if self.options.stop_at == Some(c) {
                return Parse::Done(self.finish());
            }

            if c == 'M' || c == 'm' {
                self.started = true;
                self.spline = Some(SplineParser::with_origin(self.current, &self.options));
            } else if !self.started {
                return Parse::Error(ParseError::MissingMoveTo {
                    command: c,
                    position: input.position(),
                });
            } else if self.closed && is_drawing_command(c) {
                self.spline = Some(SplineParser::starting_at(self.current, &self.options));
            } else {
                debug!("Path ends at {:?} ({})", c, input.position());
                return Parse::Done(self.finish());
            }
        }
    }
}

#[cfg(test)]
use crate::path::geom::{Curve, LineSegment, ParametricCurve};
#[cfg(test)]
use crate::{parse_chunks, parse_path, parse_path_with_options, Position};

#[test]
fn empty() {
    assert_eq!(parse_path(""), Ok(Path::empty()));
    assert_eq!(parse_path("  \n "), Ok(Path::empty()));
}

#[test]
fn simple_square() {
    let path = parse_path("M0,0L10,0L10,10Z").unwrap();
    assert_eq!(path.len(), 1);
    assert!(path[0].is_closed());
    assert_eq!(path[0].len(), 3);

    let reparsed = parse_path(path.path_string()).unwrap();
    assert_eq!(reparsed, path);
}

#[test]
fn multiple_splines() {
    let path = parse_path("M 0 0 L 1 0 M 5 5 l 1 0 m 1 1 h 1").unwrap();
    assert_eq!(path.len(), 3);
    assert_eq!(path[1][0], Curve::Line(LineSegment::new(5.0, 5.0, 6.0, 5.0)));
    assert_eq!(path[2][0], Curve::Line(LineSegment::new(7.0, 6.0, 8.0, 6.0)));
}

#[test]
fn lone_move_to_is_dropped() {
    let path = parse_path("M 1 1 m 1 1 l 1 1 M 9 9").unwrap();
    assert_eq!(path.len(), 1);
    assert_eq!(path[0][0], Curve::Line(LineSegment::new(2.0, 2.0, 3.0, 3.0)));
}

#[test]
fn drawing_after_close() {
    let path = parse_path("M1,1 h2 v2 z l-1,-1").unwrap();
    assert_eq!(path.len(), 2);
    assert!(path[0].is_closed());
    assert_eq!(path[1][0], Curve::Line(LineSegment::new(1.0, 1.0, 0.0, 0.0)));

    // Relative move-to after a close command starts from the closed spline's start.
    let path = parse_path("M1,1 h2 v2 z m1,0 h1").unwrap();
    assert_eq!(path[1].from(), Some(point(2.0, 1.0)));
}

#[test]
fn need_start() {
    assert_eq!(
        parse_path("L 1 1"),
        Err(ParseError::MissingMoveTo {
            command: 'L',
            position: Position::default(),
        })
    );
    assert_eq!(
        parse_path("\n x 0 0"),
        Err(ParseError::MissingMoveTo {
            command: 'x',
            position: Position {
                offset: 2,
                line: 1,
                column: 1
            },
        })
    );
}

#[test]
fn lenient_termination() {
    let mut input = Input::complete("M0,0 L1,1 z ; M2,2 L3,3");
    let path = PathParser::new().parse(&mut input).finish(&input).unwrap();
    assert_eq!(path.len(), 1);
    assert_eq!(input.rest(), "; M2,2 L3,3");

    // Garbage in the middle of a command is an error.
    assert!(matches!(parse_path("M0,0 L1,;"), Err(ParseError::Number { .. })));
}

#[test]
fn stop() {
    let options = ParserOptions::DEFAULT.with_stop_at('|');
    let parse = |src: &str| parse_path_with_options(src, &options);

    assert_eq!(parse("M 0 0 L 1 1 | xxxxxx").map(|p| p.len()), Ok(1));
    assert_eq!(parse("M 0 0 L 1 1| xxxxxx").map(|p| p.len()), Ok(1));
    assert_eq!(parse("| xxxxxx"), Ok(Path::empty()));
    assert_eq!(parse("    | xxxxxx"), Ok(Path::empty()));
}

#[test]
fn smooth_curves() {
    let path = parse_path("M0,0 Q1,2 2,0 T4,0 C5,1 6,1 7,0 S9,1 10,0").unwrap();
    let curves = path[0].curves();
    match (curves[1], curves[2], curves[3]) {
        (Curve::Quadratic(q), Curve::Cubic(c1), Curve::Cubic(c2)) => {
            assert_eq!(q.ctrl, point(3.0, -2.0));
            assert_eq!(c1.ctrl1, point(5.0, 1.0));
            assert_eq!(c2.ctrl1, point(8.0, -1.0));
        }
        other => panic!("{:?}", other),
    }
    assert_eq!(path.path_string(), "M0,0Q1,2 2,0T4,0C5,1 6,1 7,0S9,1 10,0");
}

#[test]
fn chunked_input() {
    let whole = parse_path("M1,1L2,2").unwrap();
    let chunked = parse_chunks(PathParser::new(), ["M1,1L", "2,2"]).unwrap();
    assert_eq!(chunked, whole);

    // Any split point gives the same result.
    let src = "M 10.5,-3e1 q 1 2 3 4 t 5 6 A 5 5 30 1 0 40 40 C 1,2 3,4 5,6 z m1 1 h 2";
    let whole = parse_path(src).unwrap();
    for i in 0..src.len() {
        let (a, b) = src.split_at(i);
        assert_eq!(parse_chunks(PathParser::new(), [a, b]), Ok(whole.clone()), "{:?}", i);
    }
}

#[test]
fn chunk_positions() {
    let result = parse_chunks(PathParser::new(), ["M0,0\nL1", ",x"]);
    assert_eq!(
        result,
        Err(ParseError::Number {
            src: "x".to_string(),
            position: Position {
                offset: 8,
                line: 1,
                column: 3
            },
        })
    );
}

#[test]
fn round_trip() {
    let src = "M0,0 A5,5 0 0,1 10,0 Q 15,5 10,10 C 5,15 0,15 -5,10 Z M 20,20 h 5 v 5 s 1,1 2,2";
    let path = parse_path(src).unwrap();
    let reparsed = parse_path(path.path_string()).unwrap();

    assert_eq!(reparsed.len(), path.len());
    for (a, b) in path.iter().zip(reparsed.iter()) {
        assert_eq!(a.len(), b.len());
        assert_eq!(a.is_closed(), b.is_closed());
        for (ca, cb) in a.iter().zip(b.iter()) {
            assert_eq!(ca.kind(), cb.kind());
            assert!((ca.from() - cb.from()).length() < 1e-9);
            assert!((ca.to() - cb.to()).length() < 1e-9);
            assert!((ca.sample(0.5) - cb.sample(0.5)).length() < 1e-9);
        }
    }
}

#[test]
fn zero_length_closing_line_round_trip() {
    let path = parse_path("M0,0L10,0L10,10L0,0L0,0Z").unwrap();
    assert_eq!(path[0].len(), 4);
    assert_eq!(path.path_string(), "M0,0H10V10L0,0H0Z");

    let reparsed = parse_path(path.path_string()).unwrap();
    assert_eq!(reparsed, path);
}

#[test]
fn unexpected_end_position() {
    let mut input = Input::new("M0,0\nL1", false);
    let state = PathParser::new().parse(&mut input);
    assert!(state.is_cont());
    assert_eq!(
        state.finish(&input),
        Err(ParseError::UnexpectedEnd {
            position: Position {
                offset: 7,
                line: 1,
                column: 2
            },
        })
    );

    assert_eq!(
        parse_chunks(PathParser::new(), ["M0,0\n", "L1,"]),
        Err(ParseError::UnexpectedEnd {
            position: Position {
                offset: 8,
                line: 1,
                column: 3
            },
        })
    );
}
