use crate::{
    monomial::MonomialType,
    parser::error::{CoefficientOverflow, Error, IncompatibleTerms},
};
use std::{fmt::{self, Display, Formatter}, ops::Range};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A signed integer multiple of a monomial, such as `2x` or `-3`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Term {
    /// The integer coefficient of the term.
    pub coefficient: i64,

    /// The monomial being multiplied.
    pub kind: MonomialType,
}

/// The reasons two [`Term`]s cannot be multiplied.
#[derive(Debug, Clone, PartialEq)]
pub enum TimesError {
    /// The product of the monomials is not one of the supported [`MonomialType`]s.
    Incompatible(IncompatibleTerms),

    /// The product of the coefficients does not fit in an `i64`.
    Overflow(CoefficientOverflow),
}

impl TimesError {
    /// Attaches the span of the offending product to this error.
    pub fn into_error(self, span: Range<usize>) -> Error {
        match self {
            TimesError::Incompatible(kind) => Error::new(vec![span], kind),
            TimesError::Overflow(kind) => Error::new(vec![span], kind),
        }
    }
}

/// Adds a term to a reduced term list, combining it with the entry of the same type. An entry
/// whose coefficient becomes zero is removed, and zero terms are never added.
pub fn merge_into(terms: &mut Vec<Term>, term: Term) -> Result<(), CoefficientOverflow> {
    match terms.iter().position(|existing| existing.kind == term.kind) {
        Some(index) => {
            let coefficient = terms[index].coefficient
                .checked_add(term.coefficient)
                .ok_or(CoefficientOverflow)?;
            if coefficient == 0 {
                terms.remove(index);
            } else {
                terms[index].coefficient = coefficient;
            }
        },
        None if term.coefficient != 0 => terms.push(term),
        None => (),
    }
    Ok(())
}

impl Term {
    /// Creates a new term.
    pub fn new(coefficient: i64, kind: MonomialType) -> Self {
        Self { coefficient, kind }
    }

    /// Creates a constant term.
    pub fn constant(coefficient: i64) -> Self {
        Self::new(coefficient, MonomialType::Constant)
    }

    /// Multiplies two terms. This is used to distribute a multiplier over a parenthesized
    /// sub-expression.
    pub fn times(&self, other: &Term) -> Result<Term, TimesError> {
        use MonomialType::*;

        let kind = match (self.kind, other.kind) {
            (Constant, kind) | (kind, Constant) => kind,
            (X, X) => XSquared,
            (X, Y) | (Y, X) => XY,
            (Y, Y) => YSquared,
            (XSquared, YSquared) | (YSquared, XSquared) | (XY, XY) => XSquaredYSquared,
            (left, right) => return Err(TimesError::Incompatible(IncompatibleTerms { left, right })),
        };
        let coefficient = self.coefficient
            .checked_mul(other.coefficient)
            .ok_or(TimesError::Overflow(CoefficientOverflow))?;

        Ok(Term { coefficient, kind })
    }
}

impl Display for Term {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match (self.coefficient, self.kind) {
            (coefficient, MonomialType::Constant) => write!(f, "{}", coefficient),
            (1, kind) => write!(f, "{}", kind.symbol()),
            (-1, kind) => write!(f, "-{}", kind.symbol()),
            (coefficient, kind) => write!(f, "{}{}", coefficient, kind.symbol()),
        }
    }
}
