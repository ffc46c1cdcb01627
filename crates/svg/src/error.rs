use crate::Position;

use thiserror::Error;

#[non_exhaustive]
#[derive(Error, Clone, Debug, PartialEq)]
pub enum ParseError {
    #[error("{position}: Expected number, got {src:?}.")]
    Number { src: String, position: Position },
    #[error("{position}: Expected flag (0/1), got {src:?}.")]
    Flag { src: char, position: Position },
    #[error("{position}: Expected {expected}, got {src:?}.")]
    Expected {
        expected: &'static str,
        src: char,
        position: Position,
    },
    #[error("{position}: Unexpected end of input.")]
    UnexpectedEnd { position: Position },
    #[error("{position}: Expected move-to command, got {command:?}.")]
    MissingMoveTo { command: char, position: Position },
}

impl ParseError {
    /// Where the error was found.
    pub fn position(&self) -> Position {
        match self {
            ParseError::Number { position, .. }
            | ParseError::Flag { position, .. }
            | ParseError::Expected { position, .. }
            | ParseError::UnexpectedEnd { position }
            | ParseError::MissingMoveTo { position, .. } => *position,
        }
    }
}

#[test]
fn messages() {
    let position = Position {
        offset: 7,
        line: 1,
        column: 3,
    };
    assert_eq!(
        ParseError::Flag { src: '2', position }.to_string(),
        "Line 1 Column 3: Expected flag (0/1), got '2'."
    );
    assert_eq!(
        ParseError::UnexpectedEnd { position }.to_string(),
        "Line 1 Column 3: Unexpected end of input."
    );
}
