//! logos-based selector tokenizer.
//!
//! Token priority in logos is determined by:
//! 1. Longest match wins (e.g. `:first-child` as PseudoClass beats `:` + Ident)
//! 2. For equal length matches, earlier-defined variants win
//!
//! Whitespace is skipped; the parser recovers it from token spans to tell
//! `a.b` (compound) from `a .b` (descendant).

use logos::Logos;

/// Selector token produced by the lexer.
#[derive(Logos, Debug, Clone, PartialEq)]
#[logos(skip r"[ \t\n\r\f]+")]
pub enum Token {
    /// Pseudo-class: `:first-child`, `:disabled`.
    #[regex(r":-?[a-zA-Z_\x{80}-\x{10FFFF}][a-zA-Z0-9_\-\x{80}-\x{10FFFF}]*")]
    PseudoClass,

    /// Double-quoted string literal.
    #[regex(r#""[^"]*""#)]
    StringLiteral,

    /// Single-quoted string literal.
    #[regex(r"'[^']*'")]
    StringLiteralSingle,

    /// Number: integer or float, possibly negative.
    #[regex(r"-?[0-9]+(\.[0-9]+)?")]
    Number,

    /// Identifier: tag names, class names, ids, attribute names.
    ///
    /// Non-ASCII characters and a single leading `-` are allowed.
    #[regex(r"-?[a-zA-Z_\x{80}-\x{10FFFF}][a-zA-Z0-9_\-\x{80}-\x{10FFFF}]*")]
    Ident,

    /// `[`
    #[token("[")]
    BracketOpen,

    /// `]`
    #[token("]")]
    BracketClose,

    /// `=`
    #[token("=")]
    Equals,

    /// `,`
    #[token(",")]
    Comma,

    /// `.`
    #[token(".")]
    Dot,

    /// `#`
    #[token("#")]
    Hash,

    /// `*`
    #[token("*")]
    Star,

    /// `>`
    #[token(">")]
    GreaterThan,
}

/// A token with its source text and byte span.
#[derive(Debug, Clone, PartialEq)]
pub struct Spanned {
    pub token: Token,
    pub text: String,
    pub start: usize,
    pub end: usize,
}

/// Tokenize a selector string.
///
/// Returns the byte offset of the first character the lexer cannot handle
/// (e.g. `~` or `+`) as the error.
pub fn tokenize(input: &str) -> Result<Vec<Spanned>, usize> {
    let lexer = Token::lexer(input);
    lexer
        .spanned()
        .map(|(result, span)| match result {
            Ok(token) => Ok(Spanned {
                token,
                text: input[span.clone()].to_string(),
                start: span.start,
                end: span.end,
            }),
            Err(()) => Err(span.start),
        })
        .collect()
}
