use glossa_protocol::{Span, TokenSpan};

#[derive(Debug, Clone, PartialEq)]
pub enum TokenKind {
    /// A Greek word form, enclitic boundaries already split.
    Word,
    /// Punctuation mark
    Punctuation(char),
}

#[derive(Debug, Clone)]
pub struct Token<'a> {
    pub span: Span,
    pub text: &'a str,
    pub kind: TokenKind,
}

impl<'a> Token<'a> {
    /// The engine-facing view; punctuation never reaches the engine.
    pub fn as_word(&self) -> Option<TokenSpan<'a>> {
        match self.kind {
            TokenKind::Word => Some(TokenSpan {
                text: self.text,
                span: self.span,
            }),
            TokenKind::Punctuation(_) => None,
        }
    }
}
