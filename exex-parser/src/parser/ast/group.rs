use std::ops::Range;
use crate::{
    parser::{
        ast::sum::Sum,
        error::{EmptyParenthesis, Error, UnclosedParenthesis},
        token::{CloseParen, OpenParen},
        Parse,
        Parser,
    },
    tokenizer::TokenKind,
};

/// A parenthesized sub-expression, such as the `(x - 1)` in `2(x - 1)`.
#[derive(Debug, Clone, PartialEq)]
pub struct Group {
    /// The sum inside the parentheses.
    pub inner: Box<Sum>,

    /// The region of the source code that this group was parsed from, including the
    /// parentheses.
    pub span: Range<usize>,
}

impl<'source> Parse<'source> for Group {
    fn parse(input: &mut Parser<'source>) -> Result<Self, Error> {
        let open_paren = input.try_parse::<OpenParen>()?;
        match input.peek_kind() {
            Some(TokenKind::CloseParen) => {
                let close_paren = input.try_parse::<CloseParen>()?;
                return Err(Error::new(
                    vec![open_paren.span.start..close_paren.span.end],
                    EmptyParenthesis,
                ));
            },
            None => return Err(Error::new(vec![open_paren.span], UnclosedParenthesis { opening: true })),
            _ => (),
        }

        let inner = input.try_parse::<Sum>()?;
        let close_paren = input
            .try_parse::<CloseParen>()
            .map_err(|_| Error::new(vec![open_paren.span.clone()], UnclosedParenthesis { opening: true }))?;

        Ok(Self {
            inner: Box::new(inner),
            span: open_paren.span.start..close_paren.span.end,
        })
    }
}
