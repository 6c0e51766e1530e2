//! logos-based selector tokenizer.
//!
//! Only the subset needed for context lookups is recognized: type, class, id
//! and universal selectors, the child combinator and selector-list commas.
//! Whitespace is skipped; descendant combinators are recovered by the parser
//! from token spans.

use logos::Logos;

/// Selector token produced by the lexer.
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
#[logos(skip r"[ \t\n\r\f]+")]
pub enum Token {
    /// Identifier: type names, class names, ids.
    #[regex(r"-?[a-zA-Z_][a-zA-Z0-9_-]*")]
    Ident,

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

    /// `,`
    #[token(",")]
    Comma,
}

/// Tokenize a selector string into `(Token, text)` pairs.
///
/// Characters outside the recognized subset are dropped; use
/// [`parse_selector_list`](crate::css::parser::parse_selector_list) for
/// strict handling.
pub fn tokenize(input: &str) -> Vec<(Token, String)> {
    Token::lexer(input)
        .spanned()
        .filter_map(|(result, span)| result.ok().map(|token| (token, input[span].to_string())))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens(input: &str) -> Vec<Token> {
        tokenize(input).into_iter().map(|(t, _)| t).collect()
    }

    #[test]
    fn punctuation() {
        assert_eq!(
            tokens(". # * > ,"),
            vec![Token::Dot, Token::Hash, Token::Star, Token::GreaterThan, Token::Comma]
        );
    }

    #[test]
    fn class_selector() {
        assert_eq!(
            tokenize(".sticky-context"),
            vec![
                (Token::Dot, ".".to_string()),
                (Token::Ident, "sticky-context".to_string()),
            ]
        );
    }

    #[test]
    fn id_with_digits() {
        assert_eq!(
            tokenize("#main2"),
            vec![(Token::Hash, "#".to_string()), (Token::Ident, "main2".to_string())]
        );
    }

    #[test]
    fn compound_and_child() {
        assert_eq!(
            tokens("section.layout > div"),
            vec![Token::Ident, Token::Dot, Token::Ident, Token::GreaterThan, Token::Ident]
        );
    }

    #[test]
    fn unknown_characters_dropped() {
        assert_eq!(tokens(".a[b]"), vec![Token::Dot, Token::Ident, Token::Ident]);
    }

    #[test]
    fn empty_input() {
        assert!(tokens("   ").is_empty());
    }
}
