//! Compilation engine: one token source, one output sink, one class.

use crate::lexer::{tokenize, LexerError, TokenCursor};
use crate::parser::{Node, Parser, ParserError};
use crate::xml::write_tree;
use std::io::{self, Write};
use thiserror::Error;
use tracing::debug;

/// Errors surfaced while analyzing one source unit
#[derive(Error, Debug)]
pub enum AnalyzerError {
    #[error("Lexical error: {0}")]
    Lexer(#[from] LexerError),

    #[error("Syntax error: {0}")]
    Parser(#[from] ParserError),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

/// Parses a class from a token cursor and writes its tree to `sink`.
///
/// The whole tree is built before anything is written, so a syntax error
/// leaves the sink untouched.
pub struct CompilationEngine<W: Write> {
    parser: Parser,
    sink: W,
}

impl<W: Write> CompilationEngine<W> {
    pub fn new(cursor: TokenCursor, sink: W) -> Self {
        Self {
            parser: Parser::new(cursor),
            sink,
        }
    }

    /// Parse exactly one class and write it to the sink.
    /// # Errors
    /// On a syntax error, or if the sink cannot be written.
    pub fn compile_class(&mut self) -> Result<Node, AnalyzerError> {
        let class = self.parser.parse_class()?;
        debug!(nodes = class.size(), "parsed class");
        write_tree(&class, 0, &mut self.sink)?;
        Ok(class)
    }

    /// Flush the sink and hand it back.
    /// # Errors
    /// If flushing fails.
    pub fn close(mut self) -> Result<W, AnalyzerError> {
        self.sink.flush()?;
        Ok(self.sink)
    }
}

/// Lex, parse and serialize one source unit.
/// # Errors
/// On the first lexical or syntax error.
pub fn analyze_source(source: &str) -> Result<String, AnalyzerError> {
    let tokens = tokenize(source)?;
    let mut engine = CompilationEngine::new(TokenCursor::new(tokens), Vec::new());
    engine.compile_class()?;
    let bytes = engine.close()?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_failed_parse_writes_nothing() {
        let tokens = tokenize("class A { field int x }").unwrap();
        let mut engine = CompilationEngine::new(TokenCursor::new(tokens), Vec::new());
        assert!(matches!(engine.compile_class(), Err(AnalyzerError::Parser(_))));
        assert!(engine.close().unwrap().is_empty());
    }

    #[test]
    fn test_lexical_error_surfaces() {
        let err = analyze_source("class A { function void f() { do g(\"open); } }").unwrap_err();
        assert!(matches!(err, AnalyzerError::Lexer(LexerError::UnterminatedString(_))));
        assert!(err.to_string().starts_with("Lexical error: Unterminated string literal"));
    }

    #[test]
    fn test_minimal_class() {
        let xml = analyze_source("class Main {}").unwrap();
        assert_eq!(
            xml,
            "<class>\n  <keyword> class </keyword>\n  <identifier> Main </identifier>\n  \
             <symbol> { </symbol>\n  <symbol> } </symbol>\n</class>\n"
        );
    }
}
