use crate::lexer::Token;

/// Forward-only read position over a fully materialized token stream.
///
/// The first token is current as soon as the cursor is built. `advance`
/// never moves past the end, and `position` never decreases.
#[derive(Debug, Clone)]
pub struct TokenCursor {
    tokens: Vec<Token>,
    position: usize,
}

impl TokenCursor {
    #[must_use]
    pub fn new(tokens: Vec<Token>) -> Self {
        Self {
            tokens,
            position: 0,
        }
    }

    /// Token under the cursor, or `None` once every token has been consumed.
    pub fn current(&self) -> Option<&Token> {
        self.tokens.get(self.position)
    }

    /// One token of lookahead past `current`, without consuming anything.
    pub fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.position + 1)
    }

    pub fn has_more_tokens(&self) -> bool {
        self.position < self.tokens.len()
    }

    /// Consume the current token and return it.
    pub fn advance(&mut self) -> Option<&Token> {
        if self.has_more_tokens() {
            self.position += 1;
            self.tokens.get(self.position - 1)
        } else {
            None
        }
    }

    pub fn position(&self) -> usize {
        self.position
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }
}

impl From<Vec<Token>> for TokenCursor {
    fn from(tokens: Vec<Token>) -> Self {
        Self::new(tokens)
    }
}
