use std::ops::Range;
use crate::parser::{
    error::{CoefficientOverflow, Error},
    token::Int,
    Parse,
    Parser,
};

/// An integer literal, used as the coefficient of a product.
#[derive(Debug, Clone, PartialEq)]
pub struct LitInt {
    /// The value of the literal.
    pub value: i64,

    /// The region of the source code that this literal was parsed from.
    pub span: Range<usize>,
}

impl<'source> Parse<'source> for LitInt {
    fn parse(input: &mut Parser<'source>) -> Result<Self, Error> {
        let int = input.try_parse::<Int>()?;
        let value = int.lexeme
            .parse()
            .map_err(|_| Error::new(vec![int.span.clone()], CoefficientOverflow))?;
        Ok(Self { value, span: int.span })
    }
}
