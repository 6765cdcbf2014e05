use ariadne::Fmt;
use exex_attrs::ErrorKind;
use exex_error::{ErrorKind, EXPR};
use crate::{monomial::MonomialType, tokenizer::TokenKind};

pub use exex_error::Error;

/// The end of the source code was reached unexpectedly.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "unexpected end of expression",
    labels = [format!("you might need to add another {} here", "term".fg(EXPR))],
)]
pub struct UnexpectedEof;

/// The end of the source code was expected, but something else was found.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "expected end of expression",
    labels = [format!("I could not understand the remaining {} here", "expression".fg(EXPR))],
    help = format!("terms must be separated by {} or {}", "+".fg(EXPR), "-".fg(EXPR)),
)]
pub struct ExpectedEof;

/// An unexpected token was encountered.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "unexpected token",
    labels = [format!("expected one of: {}", self.expected.iter().map(|t| format!("{:?}", t)).collect::<Vec<_>>().join(", "))],
    help = format!("found {:?}", self.found),
)]
pub struct UnexpectedToken {
    /// The token(s) that were expected.
    pub expected: &'static [TokenKind],

    /// The token that was found.
    pub found: TokenKind,
}

/// A letter other than `x`, `y`, or `z` was used as a variable.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("unknown variable `{}`", self.name),
    labels = ["this variable"],
    help = format!("the only variables available are {}, {}, and {}", "x".fg(EXPR), "y".fg(EXPR), "z".fg(EXPR)),
)]
pub struct UnknownVariable {
    /// The variable that was used.
    pub name: String,
}

/// An exponent other than `^2` was used, or an exponent was applied to a coefficient.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "unsupported exponent",
    labels = [if self.on_coefficient {
        "this exponent is applied to a number".to_string()
    } else {
        format!("this exponent is `{}`", self.exponent)
    }],
    help = format!("only variables can be raised to a power, and only {} is supported", "^2".fg(EXPR)),
)]
pub struct UnsupportedExponent {
    /// The exponent that was written, as it appeared in the source.
    pub exponent: String,

    /// Whether the exponent followed a coefficient instead of a variable.
    pub on_coefficient: bool,
}

/// The product of two monomials is not a monomial that a coin term can represent.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("cannot multiply `{}` by `{}`", self.left, self.right),
    labels = ["this product"],
    help = format!(
        "the supported monomials are {}",
        MonomialType::ALL.iter().map(|kind| kind.to_string()).collect::<Vec<_>>().join(", ").fg(EXPR),
    ),
)]
pub struct IncompatibleTerms {
    /// The monomial on the left side of the product.
    pub left: MonomialType,

    /// The monomial on the right side of the product.
    pub right: MonomialType,
}

/// A coefficient does not fit in an `i64`.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "coefficient is too large",
    labels = ["this coefficient"],
)]
pub struct CoefficientOverflow;

/// A parenthesis was not closed.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "unclosed parenthesis",
    labels = ["this parenthesis is not closed"],
    help = if self.opening {
        "add a closing parenthesis `)` somewhere after this"
    } else {
        "add an opening parenthesis `(` somewhere before this"
    },
)]
pub struct UnclosedParenthesis {
    /// Whether the parenthesis was an opening parenthesis `(`. Otherwise, the parenthesis was a
    /// closing parenthesis `)`.
    pub opening: bool,
}

/// There was no expression inside a pair of parentheses.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "missing expression inside parenthesis",
    labels = ["add an expression here"],
)]
pub struct EmptyParenthesis;

/// The source code contained no terms at all.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "empty expression",
    labels = [""],
    help = format!("write at least one term, such as {}", "2x".fg(EXPR)),
)]
pub struct EmptyExpression;
