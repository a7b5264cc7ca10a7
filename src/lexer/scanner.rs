use crate::lexer::comments::split_lines;
use crate::lexer::{
    CommentStripper, Keyword, LexerError, Position, StrippedLine, Symbol, Token, TokenKind,
};
use tracing::debug;

pub struct Scanner<'a> {
    input: &'a str,
    comments: CommentStripper,
    tokens: Vec<Token>,
}

impl<'a> Scanner<'a> {
    pub fn new(input: &'a str) -> Self {
        Self {
            input,
            comments: CommentStripper::new(),
            tokens: Vec::new(),
        }
    }

    /// Strip comments and tokenize every line of the input.
    pub fn scan_all(mut self) -> Result<Vec<Token>, LexerError> {
        for (idx, raw) in split_lines(self.input).enumerate() {
            let line_no = idx + 1;
            let line = self.comments.strip_line(raw, line_no);
            if line.is_blank() {
                continue;
            }
            self.scan_line(&line, line_no)?;
        }

        self.comments.finish()?;

        debug!(count = self.tokens.len(), "tokenized source");
        Ok(self.tokens)
    }

    fn scan_line(&mut self, line: &StrippedLine, line_no: usize) -> Result<(), LexerError> {
        let chars: Vec<char> = line.text.chars().collect();
        let pos_at = |i: usize| Position::new(line_no, line.columns[i]);

        let mut pending = String::new();
        let mut pending_pos = Position::start();
        let mut i = 0;

        while i < chars.len() {
            let ch = chars[i];

            if ch.is_whitespace() {
                self.flush(&mut pending, pending_pos);
            } else if let Some(symbol) = Symbol::from_char(ch) {
                self.flush(&mut pending, pending_pos);
                self.tokens.push(Token::new(
                    TokenKind::Symbol(symbol),
                    pos_at(i),
                    ch.to_string(),
                ));
            } else if ch == '"' {
                self.flush(&mut pending, pending_pos);
                let close = chars[i + 1..]
                    .iter()
                    .position(|&c| c == '"')
                    .map(|offset| i + 1 + offset)
                    .ok_or(LexerError::UnterminatedString(pos_at(i)))?;
                let lexeme: String = chars[i..=close].iter().collect();
                let value: String = chars[i + 1..close].iter().collect();
                self.tokens
                    .push(Token::new(TokenKind::StringConst(value), pos_at(i), lexeme));
                i = close;
            } else {
                if pending.is_empty() {
                    pending_pos = pos_at(i);
                }
                pending.push(ch);
            }

            i += 1;
        }

        self.flush(&mut pending, pending_pos);
        Ok(())
    }

    fn flush(&mut self, pending: &mut String, pos: Position) {
        if pending.is_empty() {
            return;
        }
        let lexeme = std::mem::take(pending);
        let kind = classify(&lexeme);
        self.tokens.push(Token::new(kind, pos, lexeme));
    }
}

/// Decide the kind of a complete lexeme. The result depends on the text alone.
pub fn classify(lexeme: &str) -> TokenKind {
    if let Some(keyword) = Keyword::from_str(lexeme) {
        return TokenKind::Keyword(keyword);
    }

    let mut chars = lexeme.chars();
    if let (Some(ch), None) = (chars.next(), chars.next()) {
        if let Some(symbol) = Symbol::from_char(ch) {
            return TokenKind::Symbol(symbol);
        }
    }

    if !lexeme.is_empty() && lexeme.chars().all(|c| c.is_ascii_digit()) {
        return TokenKind::IntConst(lexeme.to_string());
    }

    if lexeme.len() >= 2 && lexeme.starts_with('"') && lexeme.ends_with('"') {
        let inner = &lexeme[1..lexeme.len() - 1];
        return TokenKind::StringConst(inner.to_string());
    }

    TokenKind::Identifier(lexeme.to_string())
}

// Convenience function for tokenizing input
pub fn tokenize(input: &str) -> Result<Vec<Token>, LexerError> {
    Scanner::new(input).scan_all()
}
