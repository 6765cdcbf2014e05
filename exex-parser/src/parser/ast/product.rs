use std::ops::Range;
use crate::{
    parser::{
        ast::{factor::Factor, group::Group, literal::LitInt},
        error::{Error, UnclosedParenthesis, UnexpectedEof, UnexpectedToken, UnsupportedExponent},
        token::{Add, Mul, Sub},
        Parse,
        Parser,
    },
    term::Term,
    tokenizer::TokenKind,
};

/// The sign in front of a product.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sign {
    Plus,
    Minus,
}

impl<'source> Parse<'source> for Sign {
    fn parse(input: &mut Parser<'source>) -> Result<Self, Error> {
        input.try_parse::<Add>().map(|_| Sign::Plus)
            .or_else(|_| input.try_parse::<Sub>().map(|_| Sign::Minus))
    }
}

/// An unsigned product: an optional coefficient, any number of factors, and an optional group
/// that the rest of the product is distributed over.
///
/// At least one of the three parts is present.
#[derive(Debug, Clone, PartialEq)]
pub struct Product {
    /// The coefficient, if one was written.
    pub coefficient: Option<LitInt>,

    /// The variables being multiplied, in source order.
    pub factors: Vec<Factor>,

    /// The parenthesized sum following the product, if any.
    pub group: Option<Group>,

    /// The region of the source code that this product was parsed from.
    pub span: Range<usize>,
}

impl Product {
    /// Returns the product of the coefficient and factors, with the given sign applied. The
    /// group is not included.
    pub fn multiplier(&self, sign: Sign) -> Result<Term, Error> {
        let coefficient = self.coefficient.as_ref().map_or(1, |lit| lit.value);
        let coefficient = match sign {
            Sign::Plus => coefficient,
            Sign::Minus => -coefficient,
        };

        self.factors.iter().try_fold(Term::constant(coefficient), |acc, factor| {
            let span = self.span.start..factor.span.end;
            let factor = factor.term().map_err(|err| err.into_error(factor.span.clone()))?;
            acc.times(&factor).map_err(|err| err.into_error(span))
        })
    }
}

impl<'source> Parse<'source> for Product {
    fn parse(input: &mut Parser<'source>) -> Result<Self, Error> {
        let start = input.next_start();

        let coefficient = match input.peek_kind() {
            Some(TokenKind::Int) => Some(input.try_parse::<LitInt>()?),
            _ => None,
        };
        if let (Some(_), Some(TokenKind::Exp | TokenKind::Squared)) = (&coefficient, input.peek_kind()) {
            return Err(input.error(UnsupportedExponent {
                exponent: "2".to_string(),
                on_coefficient: true,
            }));
        }

        let mut factors = Vec::new();
        loop {
            match input.peek_kind() {
                Some(TokenKind::Var) => factors.push(input.try_parse::<Factor>()?),
                Some(TokenKind::Mul) if coefficient.is_some() || !factors.is_empty() => {
                    input.try_parse::<Mul>()?;
                    match input.peek_kind() {
                        Some(TokenKind::OpenParen) => break,
                        Some(TokenKind::Var) => factors.push(input.try_parse::<Factor>()?),
                        Some(found) => return Err(input.error(UnexpectedToken {
                            expected: &[TokenKind::Var, TokenKind::OpenParen],
                            found,
                        })),
                        None => return Err(input.error(UnexpectedEof)),
                    }
                },
                _ => break,
            }
        }

        let group = match input.peek_kind() {
            Some(TokenKind::OpenParen) => Some(input.try_parse::<Group>()?),
            _ => None,
        };

        if coefficient.is_none() && factors.is_empty() && group.is_none() {
            return Err(match input.peek_kind() {
                None => input.error(UnexpectedEof),
                Some(TokenKind::CloseParen) => input.error(UnclosedParenthesis { opening: false }),
                Some(found) => input.error(UnexpectedToken {
                    expected: &[TokenKind::Int, TokenKind::Var, TokenKind::OpenParen],
                    found,
                }),
            });
        }

        let end = input.prev_token().map_or(start, |token| token.span.end);
        Ok(Self {
            coefficient,
            factors,
            group,
            span: start..end,
        })
    }
}

/// A product with its sign. The first term of a sum may omit its sign, in which case it is
/// [`Sign::Plus`].
#[derive(Debug, Clone, PartialEq)]
pub struct SignedTerm {
    /// The sign of the term.
    pub sign: Sign,

    /// The product being signed.
    pub product: Product,

    /// The region of the source code that this term was parsed from.
    pub span: Range<usize>,
}

impl SignedTerm {
    /// Expands this term into its reduced terms, distributing the sign, coefficient, and
    /// factors over the group if there is one.
    pub fn expand(&self) -> Result<Vec<Term>, Error> {
        let multiplier = self.product.multiplier(self.sign)?;
        match &self.product.group {
            Some(group) => group.inner
                .reduce()?
                .iter()
                .map(|term| multiplier.times(term).map_err(|err| err.into_error(self.span.clone())))
                .collect(),
            None => Ok(vec![multiplier]),
        }
    }
}
