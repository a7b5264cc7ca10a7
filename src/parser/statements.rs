use crate::lexer::{Keyword, Symbol};
use crate::parser::expressions::Parser;
use crate::parser::{Node, NonTerminal, ParserError};

const STATEMENT_KEYWORDS: &[Keyword] = &[
    Keyword::Let,
    Keyword::If,
    Keyword::While,
    Keyword::Do,
    Keyword::Return,
];

impl Parser {
    /// statements := statement*
    ///
    /// Stops at the first token that does not start a statement and leaves it
    /// for the caller, which expects a closing brace there.
    pub fn parse_statements(&mut self) -> Result<Node, ParserError> {
        self.enter(NonTerminal::Statements);
        let mut children = Vec::new();

        while self.check_keyword(STATEMENT_KEYWORDS) {
            children.push(self.parse_statement()?);
        }

        Ok(Node::branch(NonTerminal::Statements, children))
    }

    /// Dispatch on the statement keyword.
    pub fn parse_statement(&mut self) -> Result<Node, ParserError> {
        let token = self.current("statement", NonTerminal::Statements)?;

        match token.keyword() {
            Some(Keyword::Let) => self.parse_let_statement(),
            Some(Keyword::If) => self.parse_if_statement(),
            Some(Keyword::While) => self.parse_while_statement(),
            Some(Keyword::Do) => self.parse_do_statement(),
            Some(Keyword::Return) => self.parse_return_statement(),
            _ => Err(Self::unexpected(token, "statement", NonTerminal::Statements)),
        }
    }

    /// letStatement := 'let' identifier ('[' expression ']')? '=' expression ';'
    fn parse_let_statement(&mut self) -> Result<Node, ParserError> {
        const PRODUCTION: NonTerminal = NonTerminal::LetStatement;
        self.enter(PRODUCTION);
        let mut children = Vec::new();

        self.expect_keyword(&[Keyword::Let], PRODUCTION, &mut children)?;
        self.expect_identifier("variable name", PRODUCTION, &mut children)?;

        if self.check_symbol(Symbol::OpenBracket) {
            self.consume(&mut children);
            children.push(self.parse_expression()?);
            self.expect_symbol(Symbol::CloseBracket, PRODUCTION, &mut children)?;
        }

        self.expect_symbol(Symbol::Equal, PRODUCTION, &mut children)?;
        children.push(self.parse_expression()?);
        self.expect_symbol(Symbol::Semicolon, PRODUCTION, &mut children)?;

        Ok(Node::branch(PRODUCTION, children))
    }

    /// ifStatement := 'if' '(' expression ')' '{' statements '}' ('else' '{' statements '}')?
    fn parse_if_statement(&mut self) -> Result<Node, ParserError> {
        const PRODUCTION: NonTerminal = NonTerminal::IfStatement;
        self.enter(PRODUCTION);
        let mut children = Vec::new();

        self.expect_keyword(&[Keyword::If], PRODUCTION, &mut children)?;
        self.parse_condition(PRODUCTION, &mut children)?;
        self.parse_block(PRODUCTION, &mut children)?;

        if self.check_keyword(&[Keyword::Else]) {
            self.consume(&mut children);
            self.parse_block(PRODUCTION, &mut children)?;
        }

        Ok(Node::branch(PRODUCTION, children))
    }

    /// whileStatement := 'while' '(' expression ')' '{' statements '}'
    fn parse_while_statement(&mut self) -> Result<Node, ParserError> {
        const PRODUCTION: NonTerminal = NonTerminal::WhileStatement;
        self.enter(PRODUCTION);
        let mut children = Vec::new();

        self.expect_keyword(&[Keyword::While], PRODUCTION, &mut children)?;
        self.parse_condition(PRODUCTION, &mut children)?;
        self.parse_block(PRODUCTION, &mut children)?;

        Ok(Node::branch(PRODUCTION, children))
    }

    /// doStatement := 'do' subroutineCall ';'
    fn parse_do_statement(&mut self) -> Result<Node, ParserError> {
        const PRODUCTION: NonTerminal = NonTerminal::DoStatement;
        self.enter(PRODUCTION);
        let mut children = Vec::new();

        self.expect_keyword(&[Keyword::Do], PRODUCTION, &mut children)?;
        self.parse_subroutine_call(PRODUCTION, &mut children)?;
        self.expect_symbol(Symbol::Semicolon, PRODUCTION, &mut children)?;

        Ok(Node::branch(PRODUCTION, children))
    }

    /// returnStatement := 'return' expression? ';'
    fn parse_return_statement(&mut self) -> Result<Node, ParserError> {
        const PRODUCTION: NonTerminal = NonTerminal::ReturnStatement;
        self.enter(PRODUCTION);
        let mut children = Vec::new();

        self.expect_keyword(&[Keyword::Return], PRODUCTION, &mut children)?;

        if !self.check_symbol(Symbol::Semicolon) {
            children.push(self.parse_expression()?);
        }

        self.expect_symbol(Symbol::Semicolon, PRODUCTION, &mut children)?;

        Ok(Node::branch(PRODUCTION, children))
    }

    /// '(' expression ')'
    fn parse_condition(
        &mut self,
        production: NonTerminal,
        children: &mut Vec<Node>,
    ) -> Result<(), ParserError> {
        self.expect_symbol(Symbol::OpenParen, production, children)?;
        children.push(self.parse_expression()?);
        self.expect_symbol(Symbol::CloseParen, production, children)
    }

    /// '{' statements '}'
    fn parse_block(
        &mut self,
        production: NonTerminal,
        children: &mut Vec<Node>,
    ) -> Result<(), ParserError> {
        self.expect_symbol(Symbol::OpenBrace, production, children)?;
        children.push(self.parse_statements()?);
        self.expect_symbol(Symbol::CloseBrace, production, children)
    }
}
