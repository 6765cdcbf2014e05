use crate::{coin_term::CoinTermId, expression::ExpressionId};
use std::{error::Error, fmt::{self, Display, Formatter}};

/// An error returned by an entry point of the model.
///
/// These report requests the model cannot honor, such as naming an entity that does not exist.
/// Broken internal invariants are not reported here; they panic.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ModelError {
    /// No coin term has this id.
    UnknownCoinTerm(CoinTermId),

    /// No expression has this id.
    UnknownExpression(ExpressionId),

    /// No collection area has this index.
    UnknownCollectionArea(usize),

    /// The coin term belongs to an expression, and the operation needs a free coin term.
    InExpression {
        coin_term: CoinTermId,
        expression: ExpressionId,
    },

    /// The coin term is not a member of any expression.
    FreeCoinTerm(CoinTermId),

    /// The coin term is not a member of the expression.
    NotAMember {
        coin_term: CoinTermId,
        expression: ExpressionId,
    },

    /// The coin term is not free to be broken apart.
    CannotBreakApart(CoinTermId),

    /// The expression is not in edit mode.
    NotInEditMode(ExpressionId),
}

impl Display for ModelError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            ModelError::UnknownCoinTerm(id) => write!(f, "there is no {}", id),
            ModelError::UnknownExpression(id) => write!(f, "there is no {}", id),
            ModelError::UnknownCollectionArea(index) => {
                write!(f, "there is no collection area at index {}", index)
            },
            ModelError::InExpression { coin_term, expression } => {
                write!(f, "{} is a member of {}", coin_term, expression)
            },
            ModelError::FreeCoinTerm(id) => write!(f, "{} is not a member of an expression", id),
            ModelError::NotAMember { coin_term, expression } => {
                write!(f, "{} is not a member of {}", coin_term, expression)
            },
            ModelError::CannotBreakApart(id) => write!(f, "{} cannot be broken apart", id),
            ModelError::NotInEditMode(id) => write!(f, "{} is not in edit mode", id),
        }
    }
}

impl Error for ModelError {}
