#![deny(bare_trait_objects)]
#![deny(unconditional_recursion)]

//! A resumable parser for the SVG path syntax.
//!
//! This crate is reexported in [figura](https://docs.rs/figura/).
//!
//! # Overview
//!
//! The parsers read the `d` attribute syntax of SVG paths:
//! `M/m L/l H/h V/v Q/q T/t C/c S/s A/a Z/z`, uppercase commands taking
//! absolute coordinates and lowercase commands coordinates relative to the
//! current position.
//!
//! Every parser implements [`Parser`]. Parsing consumes the parser and
//! returns a [`Parse`]: either a value, an error, or the parser itself when
//! the input ran out before the value was complete. In the latter case,
//! [`Parse::feed`] resumes parsing with the next chunk of input exactly where
//! it stopped, even in the middle of a number.
//!
//! Parsing is lenient at spline and path boundaries: a character that can't
//! start a command ends the path successfully, leaving the rest of the input
//! unconsumed. It is strict within a command: a command with missing or
//! malformed arguments is an error, and so is a path that doesn't start with a
//! move-to command.
//!
//! # Examples
//!
//! ```
//! use figura_svg::parse_path;
//!
//! let path = parse_path("M0,0 L10,0 L10,10 Z").unwrap();
//!
//! assert_eq!(path.len(), 1);
//! assert!(path[0].is_closed());
//! assert_eq!(path[0].len(), 3);
//! ```

pub use figura_path as path;

mod curves;
mod error;
mod input;
mod number;
mod path_parser;
mod spline;

#[doc(inline)]
pub use crate::curves::{CubicCurveParser, EllipticCurveParser, QuadraticCurveParser, SegmentParser};
#[doc(inline)]
pub use crate::error::ParseError;
#[doc(inline)]
pub use crate::input::{Input, Position};
#[doc(inline)]
pub use crate::number::NumberParser;
#[doc(inline)]
pub use crate::path_parser::PathParser;
#[doc(inline)]
pub use crate::spline::SplineParser;

use crate::path::{Path, Spline};

/// A parser that can be suspended when it runs out of input.
pub trait Parser: Sized {
    type Output;

    /// Parses as much of the input as possible.
    ///
    /// Never returns [`Parse::Cont`] when the input is the last chunk.
    fn parse(self, input: &mut Input) -> Parse<Self::Output, Self>;

    /// Parses a whole input held in a single string.
    fn parse_str(self, src: &str) -> Result<Self::Output, ParseError> {
        let mut input = Input::complete(src);
        self.parse(&mut input).finish(&input)
    }
}

/// The result of running a [`Parser`] on a chunk of input.
#[derive(Clone, Debug, PartialEq)]
pub enum Parse<T, P> {
    /// A complete value was parsed.
    Done(T),
    /// The input is malformed.
    Error(ParseError),
    /// The parser needs more input to produce a value.
    Cont(P),
}

impl<T, P> Parse<T, P> {
    pub fn is_done(&self) -> bool {
        matches!(self, Parse::Done(_))
    }

    pub fn is_cont(&self) -> bool {
        matches!(self, Parse::Cont(_))
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Parse<U, P> {
        match self {
            Parse::Done(value) => Parse::Done(f(value)),
            Parse::Error(error) => Parse::Error(error),
            Parse::Cont(parser) => Parse::Cont(parser),
        }
    }
}

impl<P: Parser> Parse<P::Output, P> {
    /// Resumes parsing with the next chunk of input.
    ///
    /// Finished parses are returned unchanged.
    pub fn feed(self, input: &mut Input) -> Self {
        match self {
            Parse::Cont(parser) => parser.parse(input),
            finished => finished,
        }
    }

    /// Ends the parse at the end of `input`.
    ///
    /// A parser still waiting for input is given an empty last chunk at the
    /// position where `input` stopped, and an unexpected end of input is
    /// reported there.
    pub fn finish(self, input: &Input) -> Result<P::Output, ParseError> {
        let mut end = Input::resume("", true, input.position());
        match self.feed(&mut end) {
            Parse::Done(value) => Ok(value),
            Parse::Error(error) => Err(error),
            Parse::Cont(_) => Err(ParseError::UnexpectedEnd {
                position: end.position(),
            }),
        }
    }
}

/// Options for the path parser.
#[non_exhaustive]
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct ParserOptions {
    /// Optionally stop parsing when encountering a provided special character.
    ///
    /// Default value: `None`.
    pub stop_at: Option<char>,
}

impl ParserOptions {
    pub const DEFAULT: ParserOptions = ParserOptions { stop_at: None };

    #[inline]
    pub const fn with_stop_at(mut self, stop_at: char) -> Self {
        self.stop_at = Some(stop_at);
        self
    }
}

impl Default for ParserOptions {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Parses a whole path.
pub fn parse_path(src: &str) -> Result<Path, ParseError> {
    parse_path_with_options(src, &ParserOptions::DEFAULT)
}

pub fn parse_path_with_options(src: &str, options: &ParserOptions) -> Result<Path, ParseError> {
    PathParser::with_options(options).parse_str(src)
}

/// Parses a single spline, starting with a move-to command.
pub fn parse_spline(src: &str) -> Result<Spline, ParseError> {
    SplineParser::new().parse_str(src)
}

/// Runs a parser over a sequence of chunks.
///
/// ```
/// use figura_svg::{parse_chunks, PathParser};
///
/// let path = parse_chunks(PathParser::new(), ["M1", "0,1", "0 h", "5"]).unwrap();
/// assert_eq!(path.to_string(), "M10,10H15");
/// ```
pub fn parse_chunks<'l, P, I>(parser: P, chunks: I) -> Result<P::Output, ParseError>
where
    P: Parser,
    I: IntoIterator<Item = &'l str>,
{
    let mut chunks = chunks.into_iter().peekable();
    let mut state = Parse::Cont(parser);
    let mut input = Input::new("", false);

    while let Some(chunk) = chunks.next() {
        let is_last = chunks.peek().is_none();
        input = Input::resume(chunk, is_last, input.position());
        state = state.feed(&mut input);
        if !state.is_cont() {
            break;
        }
    }

    // No chunk, or the parser never saw the last one.
    state.finish(&input)
}
