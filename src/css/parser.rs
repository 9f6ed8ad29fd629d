//! Recursive descent selector parser.
//!
//! Parses selector text into a [`SelectorList`]. Uses the logos-based
//! tokenizer from [`crate::css::tokenizer`].

use std::str::FromStr;

use crate::css::model::*;
use crate::css::tokenizer::{tokenize, Spanned, Token};

/// Errors from selector parsing.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SelectorError {
    #[error("empty selector")]
    Empty,
    #[error("unexpected character at byte {0}")]
    UnexpectedCharacter(usize),
    #[error("unexpected token at byte {position}: {message}")]
    UnexpectedToken { position: usize, message: String },
    #[error("unexpected end of selector: {0}")]
    UnexpectedEof(String),
    #[error("unsupported pseudo-class ':{0}'")]
    UnsupportedPseudoClass(String),
}

/// Parse a selector list such as `#app > p, input[type=text]`.
pub fn parse_selector_list(input: &str) -> Result<SelectorList, SelectorError> {
    let tokens = tokenize(input).map_err(SelectorError::UnexpectedCharacter)?;
    if tokens.is_empty() {
        return Err(SelectorError::Empty);
    }

    let mut parser = Parser { tokens, cursor: 0 };
    let mut selectors = vec![parser.parse_selector()?];
    while parser.peek_is(&Token::Comma) {
        parser.advance();
        selectors.push(parser.parse_selector()?);
    }

    if let Some(tok) = parser.peek() {
        return Err(unexpected(tok, "expected ',' or end of selector"));
    }

    Ok(SelectorList { selectors })
}

impl FromStr for SelectorList {
    type Err = SelectorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_selector_list(s)
    }
}

fn unexpected(tok: &Spanned, message: &str) -> SelectorError {
    SelectorError::UnexpectedToken {
        position: tok.start,
        message: format!("{message}, got {:?} '{}'", tok.token, tok.text),
    }
}

fn starts_compound(token: &Token) -> bool {
    matches!(
        token,
        Token::Ident
            | Token::Star
            | Token::Dot
            | Token::Hash
            | Token::PseudoClass
            | Token::BracketOpen
    )
}

struct Parser {
    tokens: Vec<Spanned>,
    cursor: usize,
}

impl Parser {
    fn peek(&self) -> Option<&Spanned> {
        self.tokens.get(self.cursor)
    }

    fn peek_is(&self, token: &Token) -> bool {
        self.peek().is_some_and(|t| &t.token == token)
    }

    fn advance(&mut self) -> Option<Spanned> {
        let tok = self.tokens.get(self.cursor).cloned();
        if tok.is_some() {
            self.cursor += 1;
        }
        tok
    }

    /// Returns `true` if the current token directly follows the previous one
    /// with no whitespace in between.
    fn is_adjacent(&self) -> bool {
        if self.cursor == 0 {
            return false;
        }
        let prev = &self.tokens[self.cursor - 1];
        self.peek().is_some_and(|curr| curr.start == prev.end)
    }

    /// Consume a name token that must touch the preceding `.` or `#`.
    fn expect_adjacent_ident(&mut self, what: &str) -> Result<String, SelectorError> {
        let adjacent = self.is_adjacent();
        match self.advance() {
            Some(tok) if tok.token == Token::Ident && adjacent => Ok(tok.text),
            Some(tok) => Err(unexpected(&tok, &format!("expected {what}"))),
            None => Err(SelectorError::UnexpectedEof(format!("expected {what}"))),
        }
    }

    /// Parse compounds joined by combinators, stopping at `,` or end of input.
    fn parse_selector(&mut self) -> Result<Selector, SelectorError> {
        let mut compounds = vec![self.parse_compound_selector()?];
        let mut combinators = Vec::new();

        loop {
            match self.peek() {
                Some(t) if t.token == Token::GreaterThan => {
                    self.advance();
                    combinators.push(Combinator::Child);
                    compounds.push(self.parse_compound_selector()?);
                }
                Some(t) if starts_compound(&t.token) => {
                    if self.is_adjacent() {
                        let tok = t.clone();
                        return Err(unexpected(&tok, "type selector must start a compound"));
                    }
                    combinators.push(Combinator::Descendant);
                    compounds.push(self.parse_compound_selector()?);
                }
                _ => break,
            }
        }

        let subject = compounds.pop().unwrap_or_default();
        let ancestors = combinators
            .into_iter()
            .rev()
            .zip(compounds.into_iter().rev())
            .collect();
        Ok(Selector { subject, ancestors })
    }

    fn parse_compound_selector(&mut self) -> Result<CompoundSelector, SelectorError> {
        let mut components = Vec::new();

        match self.peek() {
            Some(t) if t.token == Token::Ident => {
                let name = t.text.to_ascii_lowercase();
                self.advance();
                components.push(SelectorComponent::Type(name));
            }
            Some(t) if t.token == Token::Star => {
                self.advance();
                components.push(SelectorComponent::Universal);
            }
            Some(t) if starts_compound(&t.token) => {
                components.push(self.parse_simple_selector()?);
            }
            Some(t) => {
                let tok = t.clone();
                return Err(unexpected(&tok, "expected selector"));
            }
            None => {
                return Err(SelectorError::UnexpectedEof("expected selector".into()));
            }
        }

        // Only tokens touching the previous one extend the compound.
        while self.is_adjacent()
            && self.peek().is_some_and(|t| {
                matches!(
                    t.token,
                    Token::Dot | Token::Hash | Token::PseudoClass | Token::BracketOpen
                )
            })
        {
            components.push(self.parse_simple_selector()?);
        }

        Ok(CompoundSelector { components })
    }

    /// Parse one `.class`, `#id`, `:pseudo` or `[attr]` component.
    fn parse_simple_selector(&mut self) -> Result<SelectorComponent, SelectorError> {
        let Some(tok) = self.advance() else {
            return Err(SelectorError::UnexpectedEof("expected selector".into()));
        };
        match tok.token {
            Token::Dot => Ok(SelectorComponent::Class(
                self.expect_adjacent_ident("class name after '.'")?,
            )),
            Token::Hash => Ok(SelectorComponent::Id(
                self.expect_adjacent_ident("id after '#'")?,
            )),
            Token::PseudoClass => {
                let name = &tok.text[1..];
                PseudoClass::from_name(name)
                    .map(SelectorComponent::PseudoClass)
                    .ok_or_else(|| SelectorError::UnsupportedPseudoClass(name.to_owned()))
            }
            Token::BracketOpen => self.parse_attribute(),
            _ => Err(unexpected(&tok, "expected selector")),
        }
    }

    /// Parse the remainder of `[name]` / `[name=value]` after the `[`.
    fn parse_attribute(&mut self) -> Result<SelectorComponent, SelectorError> {
        let name = match self.advance() {
            Some(tok) if tok.token == Token::Ident => tok.text.to_ascii_lowercase(),
            Some(tok) => return Err(unexpected(&tok, "expected attribute name")),
            None => return Err(SelectorError::UnexpectedEof("expected attribute name".into())),
        };

        let value = if self.peek_is(&Token::Equals) {
            self.advance();
            match self.advance() {
                Some(tok) => match tok.token {
                    Token::Ident | Token::Number => Some(tok.text),
                    Token::StringLiteral | Token::StringLiteralSingle => {
                        Some(tok.text[1..tok.text.len() - 1].to_owned())
                    }
                    _ => return Err(unexpected(&tok, "expected attribute value")),
                },
                None => {
                    return Err(SelectorError::UnexpectedEof("expected attribute value".into()))
                }
            }
        } else {
            None
        };

        match self.advance() {
            Some(tok) if tok.token == Token::BracketClose => {
                Ok(SelectorComponent::Attribute { name, value })
            }
            Some(tok) => Err(unexpected(&tok, "expected ']'")),
            None => Err(SelectorError::UnexpectedEof("expected ']'".into())),
        }
    }
}
