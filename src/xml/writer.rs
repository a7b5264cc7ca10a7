use crate::lexer::{Token, TokenKind};
use crate::parser::Node;
use std::borrow::Cow;
use std::io::{self, Write};

const INDENT: &str = "  ";

/// Replace the characters that would break the markup with their entities.
pub fn escape(text: &str) -> Cow<'_, str> {
    if !text.contains(['<', '>', '&']) {
        return Cow::Borrowed(text);
    }
    let mut escaped = String::with_capacity(text.len() + 8);
    for ch in text.chars() {
        match ch {
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '&' => escaped.push_str("&amp;"),
            other => escaped.push(other),
        }
    }
    Cow::Owned(escaped)
}

/// Render a terminal as `<kind> value </kind>`.
///
/// Only symbols are escaped; string constants are written verbatim.
pub fn terminal(kind: &TokenKind) -> String {
    let text = kind.text();
    let value = match kind {
        TokenKind::Symbol(_) => escape(&text),
        _ => Cow::Borrowed(text.as_str()),
    };
    format!("<{tag}> {value} </{tag}>", tag = kind.tag())
}

/// Write `node` and its subtree, indented two spaces per level of `depth`.
pub fn write_tree<W: Write>(node: &Node, depth: usize, out: &mut W) -> io::Result<()> {
    let indent = INDENT.repeat(depth);
    match node {
        Node::Terminal(kind) => writeln!(out, "{indent}{}", terminal(kind)),
        Node::Branch { kind, children } => {
            writeln!(out, "{indent}<{}>", kind.tag())?;
            for child in children {
                write_tree(child, depth + 1, out)?;
            }
            writeln!(out, "{indent}</{}>", kind.tag())
        }
    }
}

/// Write the flat token listing: one terminal per line inside `<tokens>`.
pub fn write_tokens<W: Write>(tokens: &[Token], out: &mut W) -> io::Result<()> {
    writeln!(out, "<tokens>")?;
    for token in tokens {
        writeln!(out, "{}", terminal(&token.kind))?;
    }
    writeln!(out, "</tokens>")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::{tokenize, Keyword, Symbol};
    use crate::parser::NonTerminal;
    use rstest::rstest;

    fn tree_to_string(node: &Node) -> String {
        let mut buf = Vec::new();
        write_tree(node, 0, &mut buf).expect("write to Vec");
        String::from_utf8(buf).expect("utf-8")
    }

    #[rstest]
    #[case('<', "&lt;")]
    #[case('>', "&gt;")]
    #[case('&', "&amp;")]
    #[case('=', "=")]
    #[case('+', "+")]
    #[case('-', "-")]
    #[case('*', "*")]
    #[case('/', "/")]
    #[case('|', "|")]
    fn test_operator_escaping(#[case] op: char, #[case] expected: &str) {
        let symbol = Symbol::from_char(op).unwrap();
        assert_eq!(
            terminal(&TokenKind::Symbol(symbol)),
            format!("<symbol> {expected} </symbol>")
        );
    }

    #[test]
    fn test_string_constant_is_unquoted() {
        assert_eq!(
            terminal(&TokenKind::StringConst("a < b".into())),
            "<stringConstant> a < b </stringConstant>"
        );
        assert_eq!(
            terminal(&TokenKind::IntConst("017".into())),
            "<integerConstant> 017 </integerConstant>"
        );
    }

    #[test]
    fn test_escape_borrows_when_clean() {
        assert!(matches!(escape("plain"), Cow::Borrowed(_)));
        assert_eq!(escape("a&&b<c"), "a&amp;&amp;b&lt;c");
    }

    #[test]
    fn test_tree_indentation() {
        let tree = Node::branch(
            NonTerminal::ReturnStatement,
            vec![
                Node::Terminal(TokenKind::Keyword(Keyword::Return)),
                Node::branch(
                    NonTerminal::Expression,
                    vec![Node::branch(
                        NonTerminal::Term,
                        vec![Node::Terminal(TokenKind::IntConst("0".into()))],
                    )],
                ),
                Node::Terminal(TokenKind::Symbol(Symbol::Semicolon)),
            ],
        );
        let expected = "\
<returnStatement>
  <keyword> return </keyword>
  <expression>
    <term>
      <integerConstant> 0 </integerConstant>
    </term>
  </expression>
  <symbol> ; </symbol>
</returnStatement>
";
        assert_eq!(tree_to_string(&tree), expected);
    }

    #[test]
    fn test_empty_branch_keeps_both_tags() {
        let list = Node::branch(NonTerminal::ParameterList, Vec::new());
        let mut out = Vec::new();
        write_tree(&list, 2, &mut out).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "    <parameterList>\n    </parameterList>\n"
        );
    }

    #[test]
    fn test_token_listing() {
        let tokens = tokenize("if (a < \"b\") {}").unwrap();
        let mut out = Vec::new();
        write_tokens(&tokens, &mut out).unwrap();
        let expected = "\
<tokens>
<keyword> if </keyword>
<symbol> ( </symbol>
<identifier> a </identifier>
<symbol> &lt; </symbol>
<stringConstant> b </stringConstant>
<symbol> ) </symbol>
<symbol> { </symbol>
<symbol> } </symbol>
</tokens>
";
        assert_eq!(String::from_utf8(out).unwrap(), expected);
    }
}
