use crate::lexer::Position;
use std::fmt;

/// Language keywords
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Keyword {
    Class,
    Constructor,
    Function,
    Method,
    Field,
    Static,
    Var,
    Int,
    Char,
    Boolean,
    Void,
    True,
    False,
    Null,
    This,
    Let,
    Do,
    If,
    Else,
    While,
    Return,
}

impl Keyword {
    pub fn as_str(&self) -> &'static str {
        match self {
            Keyword::Class => "class",
            Keyword::Constructor => "constructor",
            Keyword::Function => "function",
            Keyword::Method => "method",
            Keyword::Field => "field",
            Keyword::Static => "static",
            Keyword::Var => "var",
            Keyword::Int => "int",
            Keyword::Char => "char",
            Keyword::Boolean => "boolean",
            Keyword::Void => "void",
            Keyword::True => "true",
            Keyword::False => "false",
            Keyword::Null => "null",
            Keyword::This => "this",
            Keyword::Let => "let",
            Keyword::Do => "do",
            Keyword::If => "if",
            Keyword::Else => "else",
            Keyword::While => "while",
            Keyword::Return => "return",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "class" => Some(Keyword::Class),
            "constructor" => Some(Keyword::Constructor),
            "function" => Some(Keyword::Function),
            "method" => Some(Keyword::Method),
            "field" => Some(Keyword::Field),
            "static" => Some(Keyword::Static),
            "var" => Some(Keyword::Var),
            "int" => Some(Keyword::Int),
            "char" => Some(Keyword::Char),
            "boolean" => Some(Keyword::Boolean),
            "void" => Some(Keyword::Void),
            "true" => Some(Keyword::True),
            "false" => Some(Keyword::False),
            "null" => Some(Keyword::Null),
            "this" => Some(Keyword::This),
            "let" => Some(Keyword::Let),
            "do" => Some(Keyword::Do),
            "if" => Some(Keyword::If),
            "else" => Some(Keyword::Else),
            "while" => Some(Keyword::While),
            "return" => Some(Keyword::Return),
            _ => None,
        }
    }

    /// Built-in type keywords usable wherever a `type` is expected.
    pub fn is_primitive_type(&self) -> bool {
        matches!(self, Keyword::Int | Keyword::Char | Keyword::Boolean)
    }

    /// Keywords that form a complete term on their own.
    pub fn is_keyword_constant(&self) -> bool {
        matches!(
            self,
            Keyword::True | Keyword::False | Keyword::Null | Keyword::This
        )
    }
}

impl fmt::Display for Keyword {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Single-character symbols
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Symbol {
    OpenBrace,    // {
    CloseBrace,   // }
    OpenParen,    // (
    CloseParen,   // )
    OpenBracket,  // [
    CloseBracket, // ]
    Dot,          // .
    Comma,        // ,
    Semicolon,    // ;
    Plus,         // +
    Minus,        // -
    Asterisk,     // *
    Slash,        // /
    Ampersand,    // &
    Pipe,         // |
    Less,         // <
    Greater,      // >
    Equal,        // =
    Tilde,        // ~
}

impl Symbol {
    pub fn from_char(ch: char) -> Option<Self> {
        match ch {
            '{' => Some(Symbol::OpenBrace),
            '}' => Some(Symbol::CloseBrace),
            '(' => Some(Symbol::OpenParen),
            ')' => Some(Symbol::CloseParen),
            '[' => Some(Symbol::OpenBracket),
            ']' => Some(Symbol::CloseBracket),
            '.' => Some(Symbol::Dot),
            ',' => Some(Symbol::Comma),
            ';' => Some(Symbol::Semicolon),
            '+' => Some(Symbol::Plus),
            '-' => Some(Symbol::Minus),
            '*' => Some(Symbol::Asterisk),
            '/' => Some(Symbol::Slash),
            '&' => Some(Symbol::Ampersand),
            '|' => Some(Symbol::Pipe),
            '<' => Some(Symbol::Less),
            '>' => Some(Symbol::Greater),
            '=' => Some(Symbol::Equal),
            '~' => Some(Symbol::Tilde),
            _ => None,
        }
    }

    pub fn as_char(&self) -> char {
        match self {
            Symbol::OpenBrace => '{',
            Symbol::CloseBrace => '}',
            Symbol::OpenParen => '(',
            Symbol::CloseParen => ')',
            Symbol::OpenBracket => '[',
            Symbol::CloseBracket => ']',
            Symbol::Dot => '.',
            Symbol::Comma => ',',
            Symbol::Semicolon => ';',
            Symbol::Plus => '+',
            Symbol::Minus => '-',
            Symbol::Asterisk => '*',
            Symbol::Slash => '/',
            Symbol::Ampersand => '&',
            Symbol::Pipe => '|',
            Symbol::Less => '<',
            Symbol::Greater => '>',
            Symbol::Equal => '=',
            Symbol::Tilde => '~',
        }
    }

    /// Binary operators allowed between terms of an expression.
    pub fn is_binary_op(&self) -> bool {
        matches!(
            self,
            Symbol::Plus
                | Symbol::Minus
                | Symbol::Asterisk
                | Symbol::Slash
                | Symbol::Ampersand
                | Symbol::Pipe
                | Symbol::Less
                | Symbol::Greater
                | Symbol::Equal
        )
    }

    pub fn is_unary_op(&self) -> bool {
        matches!(self, Symbol::Minus | Symbol::Tilde)
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

/// Token kinds, each carrying its typed value.
///
/// `IntConst` keeps the digit run exactly as written, so `007` stays `007`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenKind {
    Keyword(Keyword),
    Symbol(Symbol),
    Identifier(String),
    IntConst(String),
    StringConst(String),
}

impl TokenKind {
    /// Element name used when the token is written as a terminal.
    pub fn tag(&self) -> &'static str {
        match self {
            TokenKind::Keyword(_) => "keyword",
            TokenKind::Symbol(_) => "symbol",
            TokenKind::Identifier(_) => "identifier",
            TokenKind::IntConst(_) => "integerConstant",
            TokenKind::StringConst(_) => "stringConstant",
        }
    }

    /// Value written between the terminal tags. String constants lose their quotes.
    pub fn text(&self) -> String {
        match self {
            TokenKind::Keyword(kw) => kw.as_str().to_string(),
            TokenKind::Symbol(sym) => sym.as_char().to_string(),
            TokenKind::Identifier(name) => name.clone(),
            TokenKind::IntConst(digits) => digits.clone(),
            TokenKind::StringConst(value) => value.clone(),
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            TokenKind::Keyword(kw) => write!(f, "{}", kw),
            TokenKind::Symbol(sym) => write!(f, "{}", sym),
            TokenKind::Identifier(s) => write!(f, "{}", s),
            TokenKind::IntConst(digits) => write!(f, "{}", digits),
            TokenKind::StringConst(s) => write!(f, "\"{}\"", s),
        }
    }
}

/// A token with position information
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub pos: Position,
    pub lexeme: String,
}

impl Token {
    pub fn new(kind: TokenKind, pos: Position, lexeme: String) -> Self {
        Self { kind, pos, lexeme }
    }

    pub fn keyword(&self) -> Option<Keyword> {
        match self.kind {
            TokenKind::Keyword(kw) => Some(kw),
            _ => None,
        }
    }

    pub fn symbol(&self) -> Option<Symbol> {
        match self.kind {
            TokenKind::Symbol(sym) => Some(sym),
            _ => None,
        }
    }

    pub fn identifier(&self) -> Option<&str> {
        match &self.kind {
            TokenKind::Identifier(name) => Some(name),
            _ => None,
        }
    }

    /// Digits of an integer constant, as written.
    pub fn int_text(&self) -> Option<&str> {
        match &self.kind {
            TokenKind::IntConst(digits) => Some(digits),
            _ => None,
        }
    }

    /// Numeric value of an integer constant; `None` for other kinds or a
    /// digit run too long for `u64`.
    pub fn int_val(&self) -> Option<u64> {
        self.int_text().and_then(|digits| digits.parse().ok())
    }

    pub fn string_val(&self) -> Option<&str> {
        match &self.kind {
            TokenKind::StringConst(value) => Some(value),
            _ => None,
        }
    }

    pub fn is_symbol(&self, symbol: Symbol) -> bool {
        self.symbol() == Some(symbol)
    }

    pub fn is_keyword(&self, keyword: Keyword) -> bool {
        self.keyword() == Some(keyword)
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} '{}'", self.kind.tag(), self.lexeme)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keyword_round_trips_through_text() {
        for word in [
            "class", "constructor", "function", "method", "field", "static", "var", "int",
            "char", "boolean", "void", "true", "false", "null", "this", "let", "do", "if",
            "else", "while", "return",
        ] {
            let kw = Keyword::from_str(word).expect("keyword");
            assert_eq!(kw.as_str(), word);
        }
        assert_eq!(Keyword::from_str("Class"), None);
        assert_eq!(Keyword::from_str("elseif"), None);
    }

    #[test]
    fn test_symbol_set_is_closed() {
        let symbols = "{}()[].,;+-*/&|<>=~";
        for ch in symbols.chars() {
            assert_eq!(Symbol::from_char(ch).map(|s| s.as_char()), Some(ch));
        }
        for ch in ['!', '%', '^', '?', ':', '"', '_'] {
            assert_eq!(Symbol::from_char(ch), None);
        }
    }

    #[test]
    fn test_operator_classes() {
        let binary: String = "{}()[].,;+-*/&|<>=~"
            .chars()
            .filter_map(Symbol::from_char)
            .filter(Symbol::is_binary_op)
            .map(|s| s.as_char())
            .collect();
        assert_eq!(binary, "+-*/&|<>=");
        assert!(Symbol::Tilde.is_unary_op());
        assert!(!Symbol::Tilde.is_binary_op());
    }

    #[test]
    fn test_string_text_has_no_quotes() {
        let kind = TokenKind::StringConst("Hello".to_string());
        assert_eq!(kind.tag(), "stringConstant");
        assert_eq!(kind.text(), "Hello");
        assert_eq!(kind.to_string(), "\"Hello\"");
    }

    #[test]
    fn test_int_text_is_verbatim() {
        let kind = TokenKind::IntConst("0040000".to_string());
        assert_eq!(kind.tag(), "integerConstant");
        assert_eq!(kind.text(), "0040000");
    }

    #[test]
    fn test_accessors_follow_kind() {
        let tok = Token::new(TokenKind::IntConst("042".into()), Position::start(), "042".into());
        assert_eq!(tok.int_text(), Some("042"));
        assert_eq!(tok.int_val(), Some(42));
        assert_eq!(tok.keyword(), None);
        assert_eq!(tok.string_val(), None);
    }
}
