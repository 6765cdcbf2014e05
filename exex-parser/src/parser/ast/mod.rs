//! The abstract syntax tree of a target expression.
//!
//! A target expression is a sum of signed products, and a product may be followed by a
//! parenthesized sum that it is distributed over:
//!
//! ```text
//! sum     = [sign] product { sign product }
//! product = [int] { ["*"] factor } [["*"] group]
//! factor  = var ["^2" | "²"]
//! group   = "(" sum ")"
//! ```

pub mod factor;
pub mod group;
pub mod literal;
pub mod product;
pub mod sum;

pub use factor::{Factor, Variable};
pub use group::Group;
pub use literal::LitInt;
pub use product::{Product, Sign, SignedTerm};
pub use sum::Sum;
