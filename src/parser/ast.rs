use crate::lexer::TokenKind;
use std::fmt;

/// Grammar nonterminals that get their own element in the output.
///
/// `type`, `statement` and `subroutineCall` are not listed: their tokens are
/// written straight into the enclosing element.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NonTerminal {
    Class,
    ClassVarDec,
    SubroutineDec,
    ParameterList,
    SubroutineBody,
    VarDec,
    Statements,
    LetStatement,
    IfStatement,
    WhileStatement,
    DoStatement,
    ReturnStatement,
    Expression,
    Term,
    ExpressionList,
}

impl NonTerminal {
    pub fn tag(&self) -> &'static str {
        match self {
            NonTerminal::Class => "class",
            NonTerminal::ClassVarDec => "classVarDec",
            NonTerminal::SubroutineDec => "subroutineDec",
            NonTerminal::ParameterList => "parameterList",
            NonTerminal::SubroutineBody => "subroutineBody",
            NonTerminal::VarDec => "varDec",
            NonTerminal::Statements => "statements",
            NonTerminal::LetStatement => "letStatement",
            NonTerminal::IfStatement => "ifStatement",
            NonTerminal::WhileStatement => "whileStatement",
            NonTerminal::DoStatement => "doStatement",
            NonTerminal::ReturnStatement => "returnStatement",
            NonTerminal::Expression => "expression",
            NonTerminal::Term => "term",
            NonTerminal::ExpressionList => "expressionList",
        }
    }
}

impl fmt::Display for NonTerminal {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.tag())
    }
}

/// Concrete syntax tree node. Children are owned by their parent, in source order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Terminal(TokenKind),
    Branch {
        kind: NonTerminal,
        children: Vec<Node>,
    },
}

impl Node {
    pub fn branch(kind: NonTerminal, children: Vec<Node>) -> Self {
        Node::Branch { kind, children }
    }

    pub fn tag(&self) -> &'static str {
        match self {
            Node::Terminal(kind) => kind.tag(),
            Node::Branch { kind, .. } => kind.tag(),
        }
    }

    pub fn children(&self) -> &[Node] {
        match self {
            Node::Terminal(_) => &[],
            Node::Branch { children, .. } => children,
        }
    }

    /// Terminal value as written in the output, `None` for branches.
    pub fn text(&self) -> Option<String> {
        match self {
            Node::Terminal(kind) => Some(kind.text()),
            Node::Branch { .. } => None,
        }
    }

    pub fn nonterminal(&self) -> Option<NonTerminal> {
        match self {
            Node::Terminal(_) => None,
            Node::Branch { kind, .. } => Some(*kind),
        }
    }

    /// First direct child that is the given nonterminal.
    pub fn child(&self, kind: NonTerminal) -> Option<&Node> {
        self.children()
            .iter()
            .find(|child| child.nonterminal() == Some(kind))
    }

    /// Number of nodes in this subtree, including itself.
    pub fn size(&self) -> usize {
        1 + self.children().iter().map(Node::size).sum::<usize>()
    }
}
