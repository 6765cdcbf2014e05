pub mod token;

use logos::{Lexer, Logos};
pub use token::{Token, TokenKind};

/// Returns an iterator over the token kinds produced by the tokenizer.
pub fn tokenize(input: &str) -> Lexer<TokenKind> {
    TokenKind::lexer(input)
}

/// Returns an owned array containing all of the tokens produced by the tokenizer. This allows us
/// to backtrack in case of an error.
///
/// Every character is matched by some token kind, so a lexer error only occurs on input the
/// catch-all [`TokenKind::Symbol`] cannot describe; such input is reported as a symbol too.
pub fn tokenize_complete(input: &str) -> Box<[Token]> {
    let mut lexer = tokenize(input);
    let mut tokens = Vec::new();

    while let Some(result) = lexer.next() {
        tokens.push(Token {
            span: lexer.span(),
            kind: result.unwrap_or(TokenKind::Symbol),
            lexeme: lexer.slice(),
        });
    }

    tokens.into_boxed_slice()
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Compares the tokens produced by the tokenizer to the raw expected tokens.
    fn compare_tokens<'source, const N: usize>(input: &'source str, expected: [(TokenKind, &'source str); N]) {
        let mut lexer = tokenize(input);

        for (expected_kind, expected_lexeme) in expected.into_iter() {
            assert_eq!(lexer.next(), Some(Ok(expected_kind)));
            assert_eq!(lexer.slice(), expected_lexeme);
        }

        assert_eq!(lexer.next(), None);
    }

    #[test]
    fn distributed_expr() {
        compare_tokens(
            "2(x - 1)",
            [
                (TokenKind::Int, "2"),
                (TokenKind::OpenParen, "("),
                (TokenKind::Var, "x"),
                (TokenKind::Whitespace, " "),
                (TokenKind::Sub, "-"),
                (TokenKind::Whitespace, " "),
                (TokenKind::Int, "1"),
                (TokenKind::CloseParen, ")"),
            ],
        );
    }

    #[test]
    fn adjacent_variables_are_separate_tokens() {
        compare_tokens(
            "3xy^2",
            [
                (TokenKind::Int, "3"),
                (TokenKind::Var, "x"),
                (TokenKind::Var, "y"),
                (TokenKind::Exp, "^"),
                (TokenKind::Int, "2"),
            ],
        );
    }

    #[test]
    fn display_forms() {
        compare_tokens(
            "x² − y",
            [
                (TokenKind::Var, "x"),
                (TokenKind::Squared, "²"),
                (TokenKind::Whitespace, " "),
                (TokenKind::Sub, "−"),
                (TokenKind::Whitespace, " "),
                (TokenKind::Var, "y"),
            ],
        );
    }

    #[test]
    fn unknown_characters() {
        let tokens = tokenize_complete("x $");
        assert_eq!(tokens.len(), 3);
        assert_eq!(tokens[2].kind, TokenKind::Symbol);
        assert_eq!(tokens[2].span, 2..3);
    }
}
