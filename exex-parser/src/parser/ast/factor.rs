use std::ops::Range;
use crate::{
    monomial::MonomialType,
    parser::{
        error::{Error, UnknownVariable, UnsupportedExponent},
        token::{Exp, Int, Squared, Var},
        Parse,
        Parser,
    },
    term::{Term, TimesError},
    tokenizer::TokenKind,
};

/// One of the variables that can appear in a target expression.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Variable {
    X,
    Y,
    Z,
}

impl From<Variable> for MonomialType {
    fn from(variable: Variable) -> Self {
        match variable {
            Variable::X => MonomialType::X,
            Variable::Y => MonomialType::Y,
            Variable::Z => MonomialType::Z,
        }
    }
}

/// A single variable, possibly squared, such as `x` or `y^2`.
#[derive(Debug, Clone, PartialEq)]
pub struct Factor {
    /// The variable.
    pub variable: Variable,

    /// Whether the variable is squared.
    pub squared: bool,

    /// The region of the source code that this factor was parsed from.
    pub span: Range<usize>,
}

impl Factor {
    /// Returns the factor as a term with a coefficient of `1`. Fails for squared variables whose
    /// square is not a supported monomial, such as `z^2`.
    pub fn term(&self) -> Result<Term, TimesError> {
        let base = Term::new(1, self.variable.into());
        if self.squared {
            base.times(&base)
        } else {
            Ok(base)
        }
    }
}

/// Parses the exponent after a `^`, which must be the integer `2`. Returns the span of the
/// whole exponent.
fn parse_exponent<'source>(input: &mut Parser<'source>, exp: Exp<'source>) -> Result<Range<usize>, Error> {
    let int = input.try_parse::<Int>()?;
    let span = exp.span.start..int.span.end;

    if int.lexeme == "2" {
        Ok(span)
    } else {
        Err(Error::new(vec![span], UnsupportedExponent {
            exponent: int.lexeme.to_owned(),
            on_coefficient: false,
        }))
    }
}

impl<'source> Parse<'source> for Factor {
    fn parse(input: &mut Parser<'source>) -> Result<Self, Error> {
        let var = input.try_parse::<Var>()?;
        let variable = match var.lexeme {
            "x" | "X" => Variable::X,
            "y" | "Y" => Variable::Y,
            "z" | "Z" => Variable::Z,
            name => return Err(Error::new(vec![var.span], UnknownVariable { name: name.to_owned() })),
        };

        let (squared, end) = match input.peek_kind() {
            Some(TokenKind::Squared) => {
                let squared = input.try_parse::<Squared>()?;
                (true, squared.span.end)
            },
            Some(TokenKind::Exp) => {
                let exp = input.try_parse::<Exp>()?;
                (true, parse_exponent(input, exp)?.end)
            },
            _ => (false, var.span.end),
        };

        Ok(Self {
            variable,
            squared,
            span: var.span.start..end,
        })
    }
}
