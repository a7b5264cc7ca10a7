use thiserror::Error;

/// Position in source file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Position {
    pub line: usize,
    pub column: usize,
}

impl Position {
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }

    pub fn start() -> Self {
        Self { line: 1, column: 1 }
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// Lexer error types
#[derive(Error, Debug, PartialEq, Eq)]
pub enum LexerError {
    #[error("Unterminated string literal at {0}")]
    UnterminatedString(Position),

    #[error("Unterminated block comment starting at {0}")]
    UnterminatedBlockComment(Position),
}
