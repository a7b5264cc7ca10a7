use crate::lexer::{Keyword, Symbol, Token, TokenCursor, TokenKind};
use crate::parser::{Node, NonTerminal, ParserError};
use tracing::trace;

pub struct Parser {
    cursor: TokenCursor,
}

impl Parser {
    #[must_use]
    pub fn new(cursor: TokenCursor) -> Self {
        Self { cursor }
    }

    #[must_use]
    pub fn from_tokens(tokens: Vec<Token>) -> Self {
        Self::new(TokenCursor::new(tokens))
    }

    /// Get reference to the token cursor
    #[must_use]
    pub fn cursor(&self) -> &TokenCursor {
        &self.cursor
    }

    pub(crate) fn enter(&self, production: NonTerminal) {
        match self.cursor.current() {
            Some(token) => trace!(%production, at = %token.pos, "enter"),
            None => trace!(%production, "enter at end of input"),
        }
    }

    /// Current token, or an end-of-input error naming what was expected.
    pub(crate) fn current(
        &self,
        expected: &str,
        production: NonTerminal,
    ) -> Result<&Token, ParserError> {
        self.cursor
            .current()
            .ok_or_else(|| ParserError::UnexpectedEof(format!("{expected} in {production}")))
    }

    pub(crate) fn unexpected(token: &Token, expected: &str, production: NonTerminal) -> ParserError {
        ParserError::ExpectedToken(
            format!("{expected} in {production}"),
            token.to_string(),
            token.pos,
        )
    }

    /// Check if current token is the given symbol
    pub(crate) fn check_symbol(&self, symbol: Symbol) -> bool {
        self.cursor.current().is_some_and(|t| t.is_symbol(symbol))
    }

    /// Check if current token is one of the given keywords
    pub(crate) fn check_keyword(&self, keywords: &[Keyword]) -> bool {
        self.cursor
            .current()
            .and_then(Token::keyword)
            .is_some_and(|kw| keywords.contains(&kw))
    }

    /// Move the current token into `children` as a terminal.
    pub(crate) fn consume(&mut self, children: &mut Vec<Node>) {
        if let Some(token) = self.cursor.advance() {
            children.push(Node::Terminal(token.kind.clone()));
        }
    }

    /// Expect a specific symbol and consume it
    pub(crate) fn expect_symbol(
        &mut self,
        symbol: Symbol,
        production: NonTerminal,
        children: &mut Vec<Node>,
    ) -> Result<(), ParserError> {
        let expected = format!("'{symbol}'");
        let token = self.current(&expected, production)?;
        if !token.is_symbol(symbol) {
            return Err(Self::unexpected(token, &expected, production));
        }
        self.consume(children);
        Ok(())
    }

    /// Expect one of the given keywords and consume it
    pub(crate) fn expect_keyword(
        &mut self,
        keywords: &[Keyword],
        production: NonTerminal,
        children: &mut Vec<Node>,
    ) -> Result<(), ParserError> {
        let expected = keywords
            .iter()
            .map(|kw| format!("'{kw}'"))
            .collect::<Vec<_>>()
            .join(" or ");
        let token = self.current(&expected, production)?;
        if !token.keyword().is_some_and(|kw| keywords.contains(&kw)) {
            return Err(Self::unexpected(token, &expected, production));
        }
        self.consume(children);
        Ok(())
    }

    pub(crate) fn expect_identifier(
        &mut self,
        what: &str,
        production: NonTerminal,
        children: &mut Vec<Node>,
    ) -> Result<(), ParserError> {
        let token = self.current(what, production)?;
        if token.identifier().is_none() {
            return Err(Self::unexpected(token, what, production));
        }
        self.consume(children);
        Ok(())
    }

    /// expression := term (op term)*
    pub fn parse_expression(&mut self) -> Result<Node, ParserError> {
        self.enter(NonTerminal::Expression);
        let mut children = vec![self.parse_term()?];

        while self
            .cursor
            .current()
            .and_then(Token::symbol)
            .is_some_and(|sym| sym.is_binary_op())
        {
            self.consume(&mut children);
            children.push(self.parse_term()?);
        }

        Ok(Node::branch(NonTerminal::Expression, children))
    }

    /// Parse a term. A leading identifier is resolved with one token of
    /// lookahead: `[` is an array access, `(` or `.` a subroutine call, and
    /// anything else a plain variable.
    pub fn parse_term(&mut self) -> Result<Node, ParserError> {
        const PRODUCTION: NonTerminal = NonTerminal::Term;
        self.enter(PRODUCTION);
        let mut children = Vec::new();

        let token = self.current("term", PRODUCTION)?;
        match &token.kind {
            TokenKind::IntConst(_) | TokenKind::StringConst(_) => self.consume(&mut children),

            TokenKind::Keyword(kw) if kw.is_keyword_constant() => self.consume(&mut children),

            TokenKind::Symbol(Symbol::OpenParen) => {
                self.consume(&mut children);
                children.push(self.parse_expression()?);
                self.expect_symbol(Symbol::CloseParen, PRODUCTION, &mut children)?;
            }

            TokenKind::Symbol(sym) if sym.is_unary_op() => {
                self.consume(&mut children);
                children.push(self.parse_term()?);
            }

            TokenKind::Identifier(_) => match self.cursor.peek().and_then(Token::symbol) {
                Some(Symbol::OpenBracket) => {
                    self.consume(&mut children);
                    self.consume(&mut children);
                    children.push(self.parse_expression()?);
                    self.expect_symbol(Symbol::CloseBracket, PRODUCTION, &mut children)?;
                }
                Some(Symbol::OpenParen | Symbol::Dot) => {
                    self.parse_subroutine_call(PRODUCTION, &mut children)?;
                }
                _ => self.consume(&mut children),
            },

            _ => return Err(Self::unexpected(token, "term", PRODUCTION)),
        }

        Ok(Node::branch(PRODUCTION, children))
    }

    /// subroutineCall := (identifier '.')? identifier '(' expressionList ')'
    ///
    /// Has no element of its own; the tokens go into `children` of the caller.
    pub(crate) fn parse_subroutine_call(
        &mut self,
        production: NonTerminal,
        children: &mut Vec<Node>,
    ) -> Result<(), ParserError> {
        self.expect_identifier("subroutine or qualifier name", production, children)?;

        if self.check_symbol(Symbol::Dot) {
            self.consume(children);
            self.expect_identifier("subroutine name", production, children)?;
        }

        self.expect_symbol(Symbol::OpenParen, production, children)?;
        children.push(self.parse_expression_list()?);
        self.expect_symbol(Symbol::CloseParen, production, children)
    }

    /// expressionList := (expression (',' expression)*)?
    pub fn parse_expression_list(&mut self) -> Result<Node, ParserError> {
        self.enter(NonTerminal::ExpressionList);
        let mut children = Vec::new();

        if !self.check_symbol(Symbol::CloseParen) {
            children.push(self.parse_expression()?);

            while self.check_symbol(Symbol::Comma) {
                self.consume(&mut children);
                children.push(self.parse_expression()?);
            }
        }

        Ok(Node::branch(NonTerminal::ExpressionList, children))
    }
}
