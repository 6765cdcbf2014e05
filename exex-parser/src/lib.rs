//! Monomials, terms, and the parser for the target expressions used to validate what a user
//! builds out of coin terms.
//!
//! ```
//! use exex_parser::{description::ExpressionDescription, monomial::MonomialType, term::Term};
//!
//! let target = ExpressionDescription::new("2(x - 1)").unwrap();
//! assert_eq!(target.terms(), &[Term::new(2, MonomialType::X), Term::constant(-2)]);
//! assert!(target.matches_totals([(MonomialType::X, 2), (MonomialType::Constant, -2)]));
//! ```

pub mod description;
pub mod monomial;
pub mod parser;
pub mod term;
pub mod tokenizer;

pub use description::ExpressionDescription;
pub use monomial::{MonomialType, VariableValues};
pub use term::Term;
