use std::ops::Range;
use crate::{
    parser::{
        ast::product::{Product, Sign, SignedTerm},
        error::{EmptyExpression, Error},
        Parse,
        Parser,
    },
    term::{self, Term},
    tokenizer::TokenKind,
};

/// A sum of signed terms, such as `2x - 3 + y`.
#[derive(Debug, Clone, PartialEq)]
pub struct Sum {
    /// The terms of the sum, in source order.
    pub terms: Vec<SignedTerm>,

    /// The region of the source code that this sum was parsed from.
    pub span: Range<usize>,
}

impl Sum {
    /// Reduces the sum to a list of terms with at most one entry per monomial type and no
    /// zero coefficients. Entries appear in the order their monomial type first appears.
    pub fn reduce(&self) -> Result<Vec<Term>, Error> {
        let mut reduced = Vec::new();
        for signed_term in &self.terms {
            for term in signed_term.expand()? {
                term::merge_into(&mut reduced, term)
                    .map_err(|kind| Error::new(vec![signed_term.span.clone()], kind))?;
            }
        }
        Ok(reduced)
    }
}

/// Parses one signed term. The sign is required unless this is the first term.
fn parse_signed_term<'source>(input: &mut Parser<'source>, first: bool) -> Result<SignedTerm, Error> {
    let start = input.next_start();
    let sign = if first {
        input.try_parse::<Sign>().unwrap_or(Sign::Plus)
    } else {
        input.try_parse::<Sign>()?
    };
    let product = input.try_parse::<Product>()?;
    Ok(SignedTerm {
        sign,
        span: start..product.span.end,
        product,
    })
}

impl<'source> Parse<'source> for Sum {
    fn parse(input: &mut Parser<'source>) -> Result<Self, Error> {
        if input.at_end() {
            return Err(input.error(EmptyExpression));
        }

        let mut terms = vec![parse_signed_term(input, true)?];
        while let Some(TokenKind::Add | TokenKind::Sub) = input.peek_kind() {
            terms.push(parse_signed_term(input, false)?);
        }

        let span = terms[0].span.start..terms[terms.len() - 1].span.end;
        Ok(Self { terms, span })
    }
}
