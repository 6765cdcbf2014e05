use crate::{
    monomial::MonomialType,
    parser::{ast::Sum, error::Error, Parser},
    term::{self, Term},
};
use std::{collections::BTreeMap, fmt::{self, Display, Formatter}, str::FromStr};

/// A target expression, reduced to at most one [`Term`] per monomial type.
///
/// Descriptions are built from strings such as `"2(x - 1)"` or `"x^2 + 3xy - y"`, and are used
/// to decide whether a coin term or expression built by the user is equivalent to the target.
/// Equivalence is structural: the user's construction must contain the same monomials with the
/// same total coefficients, in any order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExpressionDescription {
    /// The text the description was parsed from.
    source: String,

    /// The reduced terms, in the order their monomial first appeared in the source.
    terms: Vec<Term>,
}

impl ExpressionDescription {
    /// Parses a description from the given text.
    pub fn new(source: &str) -> Result<Self, Error> {
        let sum = Parser::new(source).try_parse_full::<Sum>()?;
        Ok(Self {
            source: source.to_owned(),
            terms: sum.reduce()?,
        })
    }

    /// Returns the reduced terms of the description.
    pub fn terms(&self) -> &[Term] {
        &self.terms
    }

    /// Returns the text the description was parsed from.
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Returns true if the given `(type, count)` pairs add up to exactly this description.
    ///
    /// Counts are summed per monomial type first, and types whose sum is zero are ignored, so a
    /// `2x` built as `3x` and `-x` still matches `2x`.
    pub fn matches_totals<I>(&self, totals: I) -> bool
    where
        I: IntoIterator<Item = (MonomialType, i64)>,
    {
        let mut sums = BTreeMap::new();
        for (kind, count) in totals {
            *sums.entry(kind).or_insert(0i64) += count;
        }
        sums.retain(|_, sum| *sum != 0);

        if sums.len() != self.terms.len() {
            return false;
        }

        self.terms
            .iter()
            .all(|term| sums.get(&term.kind) == Some(&term.coefficient))
    }

    /// Returns true if this description is exactly one term, equal to `count` of `kind`.
    pub fn matches_single(&self, kind: MonomialType, count: i64) -> bool {
        matches!(self.terms.as_slice(), [term] if *term == Term::new(count, kind))
    }
}

impl FromStr for ExpressionDescription {
    type Err = Error;

    fn from_str(source: &str) -> Result<Self, Self::Err> {
        Self::new(source)
    }
}

impl FromIterator<Term> for ExpressionDescription {
    /// Builds a description directly from terms, reducing them. The source text is the
    /// rendered reduced form.
    ///
    /// # Panics
    ///
    /// Panics if a combined coefficient overflows an `i64`.
    fn from_iter<I: IntoIterator<Item = Term>>(iter: I) -> Self {
        let mut terms = Vec::new();
        for term in iter {
            if term::merge_into(&mut terms, term).is_err() {
                panic!("coefficient overflow while combining `{}`", term);
            }
        }

        let mut description = Self { source: String::new(), terms };
        description.source = description.to_string();
        description
    }
}

/// Renders the reduced form, such as `2x - 2`. An empty description renders as `0`.
impl Display for ExpressionDescription {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let mut iter = self.terms.iter();
        let Some(first) = iter.next() else {
            return write!(f, "0");
        };

        write!(f, "{}", first)?;
        for term in iter {
            let magnitude = Term::new(term.coefficient.abs(), term.kind);
            if term.coefficient < 0 {
                write!(f, " - {}", magnitude)?;
            } else {
                write!(f, " + {}", magnitude)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use crate::parser::error::{
        EmptyExpression,
        EmptyParenthesis,
        ExpectedEof,
        IncompatibleTerms,
        UnclosedParenthesis,
        UnexpectedEof,
        UnknownVariable,
        UnsupportedExponent,
    };
    use super::*;
    use MonomialType::*;

    /// Parses the given source, panicking with the error on failure.
    fn terms(source: &str) -> Vec<Term> {
        ExpressionDescription::new(source).unwrap().terms().to_vec()
    }

    #[test]
    fn distributes_over_parenthesis() {
        assert_eq!(terms("2(x - 1)"), vec![Term::new(2, X), Term::constant(-2)]);
    }

    #[test]
    fn cancels_to_empty() {
        assert_eq!(terms("x - x"), vec![]);
        assert_eq!(ExpressionDescription::new("x - x").unwrap().to_string(), "0");
    }

    #[test]
    fn merges_like_terms() {
        assert_eq!(terms("3x + 2 - x + y - 2"), vec![Term::new(2, X), Term::new(1, Y)]);
    }

    #[test]
    fn monomial_substrings() {
        assert_eq!(terms("x^2"), vec![Term::new(1, XSquared)]);
        assert_eq!(terms("-y^2"), vec![Term::new(-1, YSquared)]);
        assert_eq!(terms("4xy"), vec![Term::new(4, XY)]);
        assert_eq!(terms("x^2*y^2"), vec![Term::new(1, XSquaredYSquared)]);
        assert_eq!(terms("2x^2y^2"), vec![Term::new(2, XSquaredYSquared)]);
        assert_eq!(terms("x²y²"), vec![Term::new(1, XSquaredYSquared)]);
        assert_eq!(terms("3 * z"), vec![Term::new(3, Z)]);
        assert_eq!(terms("7"), vec![Term::constant(7)]);
    }

    #[test]
    fn implied_multipliers() {
        assert_eq!(terms("-(x + 1)"), vec![Term::new(-1, X), Term::constant(-1)]);
        assert_eq!(terms("(y - 2)"), vec![Term::new(1, Y), Term::constant(-2)]);
        assert_eq!(terms("x(x + 1)"), vec![Term::new(1, XSquared), Term::new(1, X)]);
        assert_eq!(terms("2*(x - y)"), vec![Term::new(2, X), Term::new(-2, Y)]);
    }

    #[test]
    fn nested_parentheses() {
        assert_eq!(
            terms("2(x + 3(y - 1)) + 6"),
            vec![Term::new(2, X), Term::new(6, Y)],
        );
        assert_eq!(terms("-(-(x))"), vec![Term::new(1, X)]);
    }

    #[test]
    fn display_reduced_form() {
        let description = ExpressionDescription::new("2(x-1) + x^2").unwrap();
        assert_eq!(description.to_string(), "2x - 2 + x²");
        assert_eq!(description.source(), "2(x-1) + x^2");

        let reparsed = ExpressionDescription::new(&description.to_string()).unwrap();
        assert_eq!(reparsed.terms(), description.terms());
    }

    #[test]
    fn from_terms() {
        let description: ExpressionDescription = [Term::new(1, X), Term::constant(3), Term::new(1, X)]
            .into_iter()
            .collect();
        assert_eq!(description.terms(), &[Term::new(2, X), Term::constant(3)]);
        assert_eq!(description.source(), "2x + 3");
    }

    #[test]
    fn matches_totals() {
        let description = ExpressionDescription::new("2(x-1)").unwrap();
        assert!(description.matches_totals([(X, 2), (Constant, -2)]));
        assert!(description.matches_totals([(Constant, -2), (X, 1), (X, 1)]));
        assert!(description.matches_totals([(X, 2), (Y, 1), (Constant, -2), (Y, -1)]));
        assert!(!description.matches_totals([(X, 2), (Constant, -1)]));
        assert!(!description.matches_totals([(X, 2)]));
        assert!(!description.matches_totals([(X, 2), (Constant, -2), (Z, 1)]));
    }

    #[test]
    fn matches_single() {
        let description = ExpressionDescription::new("-3y").unwrap();
        assert!(description.matches_single(Y, -3));
        assert!(!description.matches_single(Y, 3));
        assert!(!description.matches_single(X, -3));

        let two_terms = ExpressionDescription::new("x + 1").unwrap();
        assert!(!two_terms.matches_single(X, 1));
    }

    /// Asserts that parsing the source fails with the error kind `T` at the given span.
    fn assert_error<T: PartialEq + std::fmt::Debug + 'static>(source: &str, kind: T, span: std::ops::Range<usize>) {
        let err = ExpressionDescription::new(source).unwrap_err();
        assert_eq!(err.kind_as::<T>(), Some(&kind), "{:?}", err);
        assert_eq!(err.spans, vec![span]);
    }

    #[test]
    fn errors() {
        assert_error("", EmptyExpression, 0..0);
        assert_error("2w", UnknownVariable { name: "w".to_string() }, 1..2);
        assert_error("x^3", UnsupportedExponent { exponent: "3".to_string(), on_coefficient: false }, 1..3);
        assert_error("3^2", UnsupportedExponent { exponent: "2".to_string(), on_coefficient: true }, 1..2);
        assert_error("xz", IncompatibleTerms { left: X, right: Z }, 0..2);
        assert_error("z^2", IncompatibleTerms { left: Z, right: Z }, 0..3);
        assert_error("2(x - 1", UnclosedParenthesis { opening: true }, 1..2);
        assert_error("x - 1)", UnclosedParenthesis { opening: false }, 5..6);
        assert_error("2()", EmptyParenthesis, 1..3);
        assert_error("x -", UnexpectedEof, 3..3);
        assert_error("2(x - 1)(x + 1)", ExpectedEof, 8..9);
    }
}
