use std::fmt;

/// A location in the whole input, across chunks.
///
/// Lines and columns start at zero. The offset is in bytes.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Position {
    pub offset: usize,
    pub line: usize,
    pub column: usize,
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Line {} Column {}", self.line, self.column)
    }
}

/// A cursor over one chunk of the input.
///
/// The input may be split into any number of chunks, at any character
/// boundary. The last chunk is flagged with `is_last`, which tells parsers
/// that running out of characters means the end of the input rather than a
/// request for more.
///
/// ```
/// use figura_svg::{Input, Parser, PathParser};
///
/// let mut first = Input::new("M1,1L", false);
/// let state = PathParser::new().parse(&mut first);
///
/// let mut second = Input::resume("2,2", true, first.position());
/// let path = state.feed(&mut second).finish(&second).unwrap();
///
/// assert_eq!(path.to_string(), "M1,1L2,2");
/// ```
#[derive(Clone, Debug)]
pub struct Input<'l> {
    chunk: &'l str,
    index: usize,
    is_last: bool,
    position: Position,
}

impl<'l> Input<'l> {
    /// The first chunk of the input.
    pub fn new(chunk: &'l str, is_last: bool) -> Self {
        Input::resume(chunk, is_last, Position::default())
    }

    /// A chunk holding the whole input.
    pub fn complete(chunk: &'l str) -> Self {
        Input::new(chunk, true)
    }

    /// A chunk following a previous one that ended at `position`.
    pub fn resume(chunk: &'l str, is_last: bool, position: Position) -> Self {
        Input {
            chunk,
            index: 0,
            is_last,
            position,
        }
    }

    /// The current character, if the chunk has any left.
    #[inline]
    pub fn head(&self) -> Option<char> {
        self.chunk[self.index..].chars().next()
    }

    /// Moves past the current character.
    pub fn step(&mut self) {
        let Some(c) = self.head() else {
            return;
        };
        let len = c.len_utf8();
        self.index += len;
        self.position.offset += len;
        if c == '\n' {
            self.position.line += 1;
            self.position.column = 0;
        } else {
            self.position.column += 1;
        }
    }

    /// Whether this is the last chunk of the input.
    #[inline]
    pub fn is_last(&self) -> bool {
        self.is_last
    }

    /// Whether the whole chunk was consumed.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.index >= self.chunk.len()
    }

    /// Whether parsers ran out of characters but more are expected.
    #[inline]
    pub fn needs_more(&self) -> bool {
        self.is_empty() && !self.is_last
    }

    /// The position of the current character.
    #[inline]
    pub fn position(&self) -> Position {
        self.position
    }

    /// The part of the chunk that was not consumed.
    pub fn rest(&self) -> &'l str {
        &self.chunk[self.index..]
    }

    pub(crate) fn skip_whitespace(&mut self) {
        while let Some(c) = self.head() {
            if !c.is_whitespace() {
                break;
            }
            self.step();
        }
    }

    /// Skips whitespace and commas.
    pub(crate) fn skip_separators(&mut self) {
        while let Some(c) = self.head() {
            if !c.is_whitespace() && c != ',' {
                break;
            }
            self.step();
        }
    }
}

#[test]
fn positions() {
    let mut input = Input::new("a\nbé c", true);
    for _ in 0..4 {
        input.step();
    }
    assert_eq!(input.head(), Some(' '));
    assert_eq!(
        input.position(),
        Position {
            offset: 5,
            line: 1,
            column: 2
        }
    );
    assert_eq!(input.rest(), " c");
    input.skip_whitespace();
    input.step();
    assert!(input.is_empty());
    assert!(!input.needs_more());
    input.step();
    assert_eq!(input.position().offset, 7);
}
