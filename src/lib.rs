//! Jack Syntax Analyzer
//!
//! Tokenizes Jack source and parses it into a concrete syntax tree, written
//! out as indented XML with one element per grammar symbol.

pub mod driver;
pub mod engine;
pub mod lexer;
pub mod parser;
pub mod xml;

pub use engine::{analyze_source, AnalyzerError, CompilationEngine};
pub use lexer::{tokenize, LexerError, Position, Token, TokenCursor, TokenKind};
pub use parser::{parse_tokens, Node, NonTerminal, Parser, ParserError};
