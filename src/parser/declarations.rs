use crate::lexer::{Keyword, Symbol, Token};
use crate::parser::expressions::Parser;
use crate::parser::{Node, NonTerminal, ParserError};

impl Parser {
    /// Parse exactly one class and require that nothing follows it.
    /// # Errors
    /// If the tokens do not form a single class declaration.
    pub fn parse_class(&mut self) -> Result<Node, ParserError> {
        const PRODUCTION: NonTerminal = NonTerminal::Class;
        self.enter(PRODUCTION);
        let mut children = Vec::new();

        self.expect_keyword(&[Keyword::Class], PRODUCTION, &mut children)?;
        self.expect_identifier("class name", PRODUCTION, &mut children)?;
        self.expect_symbol(Symbol::OpenBrace, PRODUCTION, &mut children)?;

        while self.check_keyword(&[Keyword::Static, Keyword::Field]) {
            children.push(self.parse_class_var_dec()?);
        }

        while self.check_keyword(&[Keyword::Constructor, Keyword::Function, Keyword::Method]) {
            children.push(self.parse_subroutine_dec()?);
        }

        self.expect_symbol(Symbol::CloseBrace, PRODUCTION, &mut children)?;

        if let Some(token) = self.cursor().current() {
            return Err(ParserError::TrailingInput(token.to_string(), token.pos));
        }

        Ok(Node::branch(PRODUCTION, children))
    }

    /// classVarDec := ('static'|'field') type identifier (',' identifier)* ';'
    pub fn parse_class_var_dec(&mut self) -> Result<Node, ParserError> {
        const PRODUCTION: NonTerminal = NonTerminal::ClassVarDec;
        self.enter(PRODUCTION);
        let mut children = Vec::new();

        self.expect_keyword(&[Keyword::Static, Keyword::Field], PRODUCTION, &mut children)?;
        self.parse_type(PRODUCTION, &mut children)?;
        self.parse_name_list(PRODUCTION, &mut children)?;

        Ok(Node::branch(PRODUCTION, children))
    }

    /// type := 'int' | 'char' | 'boolean' | identifier
    ///
    /// Written inline into the enclosing element.
    fn parse_type(
        &mut self,
        production: NonTerminal,
        children: &mut Vec<Node>,
    ) -> Result<(), ParserError> {
        let token = self.current("type", production)?;
        let is_type = token.identifier().is_some()
            || token.keyword().is_some_and(|kw| kw.is_primitive_type());
        if !is_type {
            return Err(Self::unexpected(token, "type", production));
        }
        self.consume(children);
        Ok(())
    }

    /// identifier (',' identifier)* ';'
    fn parse_name_list(
        &mut self,
        production: NonTerminal,
        children: &mut Vec<Node>,
    ) -> Result<(), ParserError> {
        self.expect_identifier("variable name", production, children)?;

        while self.check_symbol(Symbol::Comma) {
            self.consume(children);
            self.expect_identifier("variable name", production, children)?;
        }

        self.expect_symbol(Symbol::Semicolon, production, children)
    }

    /// subroutineDec := ('constructor'|'function'|'method') ('void'|type) identifier
    ///                  '(' parameterList ')' subroutineBody
    pub fn parse_subroutine_dec(&mut self) -> Result<Node, ParserError> {
        const PRODUCTION: NonTerminal = NonTerminal::SubroutineDec;
        self.enter(PRODUCTION);
        let mut children = Vec::new();

        self.expect_keyword(
            &[Keyword::Constructor, Keyword::Function, Keyword::Method],
            PRODUCTION,
            &mut children,
        )?;

        if self.check_keyword(&[Keyword::Void]) {
            self.consume(&mut children);
        } else {
            self.parse_type(PRODUCTION, &mut children)?;
        }

        self.expect_identifier("subroutine name", PRODUCTION, &mut children)?;
        self.expect_symbol(Symbol::OpenParen, PRODUCTION, &mut children)?;
        children.push(self.parse_parameter_list()?);
        self.expect_symbol(Symbol::CloseParen, PRODUCTION, &mut children)?;
        children.push(self.parse_subroutine_body()?);

        Ok(Node::branch(PRODUCTION, children))
    }

    /// parameterList := (type identifier (',' type identifier)*)?
    pub fn parse_parameter_list(&mut self) -> Result<Node, ParserError> {
        const PRODUCTION: NonTerminal = NonTerminal::ParameterList;
        self.enter(PRODUCTION);
        let mut children = Vec::new();

        if !self.check_symbol(Symbol::CloseParen) {
            self.parse_type(PRODUCTION, &mut children)?;
            self.expect_identifier("parameter name", PRODUCTION, &mut children)?;

            while self.check_symbol(Symbol::Comma) {
                self.consume(&mut children);
                self.parse_type(PRODUCTION, &mut children)?;
                self.expect_identifier("parameter name", PRODUCTION, &mut children)?;
            }
        }

        Ok(Node::branch(PRODUCTION, children))
    }

    /// subroutineBody := '{' varDec* statements '}'
    pub fn parse_subroutine_body(&mut self) -> Result<Node, ParserError> {
        const PRODUCTION: NonTerminal = NonTerminal::SubroutineBody;
        self.enter(PRODUCTION);
        let mut children = Vec::new();

        self.expect_symbol(Symbol::OpenBrace, PRODUCTION, &mut children)?;

        while self.check_keyword(&[Keyword::Var]) {
            children.push(self.parse_var_dec()?);
        }

        children.push(self.parse_statements()?);
        self.expect_symbol(Symbol::CloseBrace, PRODUCTION, &mut children)?;

        Ok(Node::branch(PRODUCTION, children))
    }

    /// varDec := 'var' type identifier (',' identifier)* ';'
    pub fn parse_var_dec(&mut self) -> Result<Node, ParserError> {
        const PRODUCTION: NonTerminal = NonTerminal::VarDec;
        self.enter(PRODUCTION);
        let mut children = Vec::new();

        self.expect_keyword(&[Keyword::Var], PRODUCTION, &mut children)?;
        self.parse_type(PRODUCTION, &mut children)?;
        self.parse_name_list(PRODUCTION, &mut children)?;

        Ok(Node::branch(PRODUCTION, children))
    }
}

/// Parse a complete token stream as one class.
/// # Errors
/// If parsing fails at any point.
pub fn parse_tokens(tokens: Vec<Token>) -> Result<Node, ParserError> {
    Parser::from_tokens(tokens).parse_class()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::{tokenize, Position};

    fn parse(source: &str) -> Result<Node, ParserError> {
        parse_tokens(tokenize(source).unwrap())
    }

    fn tags(node: &Node) -> Vec<&'static str> {
        node.children().iter().map(Node::tag).collect()
    }

    #[test]
    fn test_empty_class() {
        let class = parse("class Main {}").unwrap();
        assert_eq!(tags(&class), vec!["keyword", "identifier", "symbol", "symbol"]);
    }

    #[test]
    fn test_class_members_in_order() {
        let class = parse(
            "class Point {
                field int x, y;
                static Point origin;
                constructor Point new(int ax, int ay) { let x = ax; let y = ay; return this; }
                method void dispose() { do Memory.deAlloc(this); return; }
            }",
        )
        .unwrap();
        assert_eq!(
            tags(&class),
            vec![
                "keyword", "identifier", "symbol", "classVarDec", "classVarDec",
                "subroutineDec", "subroutineDec", "symbol",
            ]
        );

        let fields = &class.children()[3];
        assert_eq!(
            tags(fields),
            vec!["keyword", "keyword", "identifier", "symbol", "identifier", "symbol"]
        );

        let static_var = &class.children()[4];
        assert_eq!(tags(static_var), vec!["keyword", "identifier", "identifier", "symbol"]);

        let ctor = &class.children()[5];
        assert_eq!(
            tags(ctor),
            vec![
                "keyword", "identifier", "identifier", "symbol", "parameterList", "symbol",
                "subroutineBody",
            ]
        );
        let params = ctor.child(NonTerminal::ParameterList).unwrap();
        assert_eq!(
            tags(params),
            vec!["keyword", "identifier", "symbol", "keyword", "identifier"]
        );
    }

    #[test]
    fn test_subroutine_body_with_locals() {
        let class = parse(
            "class Main { function void main() { var int i; var Array a, b; return; } }",
        )
        .unwrap();
        let body = class.children()[3]
            .child(NonTerminal::SubroutineBody)
            .unwrap();
        assert_eq!(
            tags(body),
            vec!["symbol", "varDec", "varDec", "statements", "symbol"]
        );
        assert!(class.children()[3]
            .child(NonTerminal::ParameterList)
            .unwrap()
            .children()
            .is_empty());
    }

    #[test]
    fn test_class_var_after_subroutine_is_rejected() {
        let err = parse("class A { function void f() { return; } field int x; }").unwrap_err();
        assert_eq!(
            err,
            ParserError::ExpectedToken(
                "'}' in class".into(),
                "keyword 'field'".into(),
                Position::new(1, 41),
            )
        );
    }

    #[test]
    fn test_bad_type() {
        let err = parse("class A { field void x; }").unwrap_err();
        assert!(matches!(err, ParserError::ExpectedToken(ref what, _, _) if what == "type in classVarDec"));
    }

    #[test]
    fn test_trailing_tokens() {
        let err = parse("class A {} class B {}").unwrap_err();
        assert_eq!(
            err,
            ParserError::TrailingInput("keyword 'class'".into(), Position::new(1, 12))
        );
    }

    #[test]
    fn test_empty_input() {
        let err = parse("").unwrap_err();
        assert_eq!(err, ParserError::UnexpectedEof("'class' in class".into()));
        assert_eq!(err.position(), None);
    }

    #[test]
    fn test_unclosed_class() {
        let err = parse("class A {").unwrap_err();
        assert_eq!(err, ParserError::UnexpectedEof("'}' in class".into()));
    }
}
