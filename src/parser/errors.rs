use thiserror::Error;
use crate::lexer::Position;

/// Parser error types
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ParserError {
    #[error("Expected {0} but found {1} at {2}")]
    ExpectedToken(String, String, Position),

    #[error("Unexpected end of input, expected {0}")]
    UnexpectedEof(String),

    #[error("Unexpected {0} after the end of the class at {1}")]
    TrailingInput(String, Position),
}

impl ParserError {
    /// Source position of the offending token, when there is one.
    pub fn position(&self) -> Option<Position> {
        match self {
            ParserError::ExpectedToken(_, _, pos) | ParserError::TrailingInput(_, pos) => {
                Some(*pos)
            }
            ParserError::UnexpectedEof(_) => None,
        }
    }
}
