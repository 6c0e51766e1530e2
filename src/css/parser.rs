//! Recursive descent selector parser.
//!
//! Parses selector lists such as `.layout, #main > section.content` into a
//! [`SelectorList`]. Uses the logos-based tokenizer from
//! [`crate::css::tokenizer`]; descendant combinators are detected from the
//! whitespace gap between token spans.

use logos::Logos;

use crate::css::model::*;
use crate::css::tokenizer::Token;

/// Errors from selector parsing.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error("unexpected token at position {position}: {message}")]
    UnexpectedToken { position: usize, message: String },
    #[error("unexpected end of input: {0}")]
    UnexpectedEof(String),
    #[error("invalid character at byte {offset}: '{text}'")]
    InvalidCharacter { offset: usize, text: String },
}

/// A positioned token with byte-level span information for whitespace detection.
#[derive(Debug, Clone)]
struct PToken {
    token: Token,
    text: String,
    /// Index in the token stream (for error reporting).
    pos: usize,
    byte_start: usize,
    byte_end: usize,
}

/// Tokenize input, keeping spans and rejecting unknown characters.
fn tokenize_with_spans(input: &str) -> Result<Vec<PToken>, ParseError> {
    let mut tokens = Vec::new();

    for (idx, (result, span)) in Token::lexer(input).spanned().enumerate() {
        let text = input[span.clone()].to_string();
        match result {
            Ok(token) => tokens.push(PToken {
                token,
                text,
                pos: idx,
                byte_start: span.start,
                byte_end: span.end,
            }),
            Err(()) => {
                return Err(ParseError::InvalidCharacter { offset: span.start, text });
            }
        }
    }

    Ok(tokens)
}

/// Parse a comma-separated selector list.
pub fn parse_selector_list(input: &str) -> Result<SelectorList, ParseError> {
    let tokens = tokenize_with_spans(input)?;
    if tokens.is_empty() {
        return Err(ParseError::UnexpectedEof("expected selector".into()));
    }

    let mut parser = Parser { tokens, cursor: 0 };
    let mut selectors = vec![parser.parse_selector()?];

    while parser.peek().is_some_and(|t| t.token == Token::Comma) {
        parser.advance();
        selectors.push(parser.parse_selector()?);
    }

    if let Some(tok) = parser.peek() {
        return Err(ParseError::UnexpectedToken {
            position: tok.pos,
            message: format!("unexpected {:?} '{}' after selector", tok.token, tok.text),
        });
    }

    Ok(SelectorList { selectors })
}

/// Recursive descent parser state.
struct Parser {
    tokens: Vec<PToken>,
    cursor: usize,
}

impl Parser {
    fn peek(&self) -> Option<&PToken> {
        self.tokens.get(self.cursor)
    }

    fn advance(&mut self) -> Option<&PToken> {
        let tok = self.tokens.get(self.cursor);
        if tok.is_some() {
            self.cursor += 1;
        }
        tok
    }

    fn current_pos(&self) -> usize {
        self.peek().map(|t| t.pos).unwrap_or(self.tokens.len())
    }

    /// Whether the current token directly follows the previous one (no whitespace).
    fn is_adjacent(&self) -> bool {
        if self.cursor == 0 {
            return false;
        }
        let prev = &self.tokens[self.cursor - 1];
        self.peek().is_some_and(|curr| curr.byte_start == prev.byte_end)
    }

    /// Parse compound selectors joined by combinators.
    fn parse_selector(&mut self) -> Result<Selector, ParseError> {
        let mut parts = vec![SelectorPart::Compound(self.parse_compound_selector()?)];

        loop {
            match self.peek() {
                Some(t) if t.token == Token::GreaterThan => {
                    self.advance();
                    parts.push(SelectorPart::Combinator(Combinator::Child));
                    parts.push(SelectorPart::Compound(self.parse_compound_selector()?));
                }
                // A selector-starting token separated by whitespace starts a
                // descendant compound; adjacent ones were consumed already.
                Some(t) if matches!(t.token, Token::Ident | Token::Hash | Token::Dot | Token::Star) => {
                    parts.push(SelectorPart::Combinator(Combinator::Descendant));
                    parts.push(SelectorPart::Compound(self.parse_compound_selector()?));
                }
                _ => break,
            }
        }

        Ok(Selector { parts })
    }

    /// Parse simple selectors with no whitespace between them, e.g. `div.a#b`.
    fn parse_compound_selector(&mut self) -> Result<CompoundSelector, ParseError> {
        let mut compound = CompoundSelector::new();

        match self.peek().map(|t| t.token) {
            Some(Token::Ident) => {
                let name = self.advance().map(|t| t.text.clone()).unwrap_or_default();
                compound.push(SelectorComponent::Type(name));
            }
            Some(Token::Star) => {
                self.advance();
                compound.push(SelectorComponent::Universal);
            }
            Some(Token::Dot) | Some(Token::Hash) => {
                compound.push(self.parse_prefixed()?);
            }
            Some(_) => {
                return Err(ParseError::UnexpectedToken {
                    position: self.current_pos(),
                    message: "expected selector part".into(),
                });
            }
            None => return Err(ParseError::UnexpectedEof("expected selector part".into())),
        }

        while self.is_adjacent() {
            match self.peek().map(|t| t.token) {
                Some(Token::Dot) | Some(Token::Hash) => compound.push(self.parse_prefixed()?),
                _ => break,
            }
        }

        Ok(compound)
    }

    /// Parse `.name` or `#name`.
    fn parse_prefixed(&mut self) -> Result<SelectorComponent, ParseError> {
        let prefix = self
            .advance()
            .map(|t| t.token)
            .ok_or_else(|| ParseError::UnexpectedEof("expected '.' or '#'".into()))?;
        let what = if prefix == Token::Dot { "class" } else { "id" };

        if !self.is_adjacent() {
            return match self.peek() {
                Some(tok) => Err(ParseError::UnexpectedToken {
                    position: tok.pos,
                    message: format!("expected {what} name directly after prefix"),
                }),
                None => Err(ParseError::UnexpectedEof(format!("expected {what} name"))),
            };
        }

        let name_tok = self
            .advance()
            .ok_or_else(|| ParseError::UnexpectedEof(format!("expected {what} name")))?;
        if name_tok.token != Token::Ident {
            return Err(ParseError::UnexpectedToken {
                position: name_tok.pos,
                message: format!("expected {what} name, got {:?} '{}'", name_tok.token, name_tok.text),
            });
        }

        let name = name_tok.text.clone();
        Ok(match prefix {
            Token::Dot => SelectorComponent::Class(name),
            _ => SelectorComponent::Id(name),
        })
    }
}
