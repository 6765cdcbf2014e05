//! The model behind Expression Exchange: coin terms that users drag around, combine into larger
//! stacks, and line up into expressions, and collection areas that check what was built against
//! a target [`ExpressionDescription`](exex_parser::ExpressionDescription).
//!
//! Everything is owned by an [`ExpressionManipulationModel`]. It is advanced by calling
//! [`step`](ExpressionManipulationModel::step) once per frame, and is told about the user's
//! gestures through its `set_*_user_controlled` and `set_*_position` methods. When the user
//! releases something, [`ReleaseOutcome`] describes what the model decided to do with it.
//!
//! ```
//! use exex_model::{CoinTermOptions, ExpressionManipulationModel, ModelOptions, Vector2};
//! use exex_parser::MonomialType;
//!
//! let mut model = ExpressionManipulationModel::new(ModelOptions::default());
//! let at = |x, y| CoinTermOptions::default().initial_position(x, y);
//! model.create_coin_term(MonomialType::X, at(100.0, 100.0));
//! let one = model.create_coin_term(MonomialType::Constant, at(400.0, 100.0));
//!
//! // drag the constant next to the x and let go
//! model.set_coin_term_user_controlled(one, true).unwrap();
//! model.set_coin_term_position(one, Vector2::new(180.0, 100.0)).unwrap();
//! let outcome = model.set_coin_term_user_controlled(one, false).unwrap();
//! assert!(matches!(outcome, Some(exex_model::ReleaseOutcome::FormedExpression(_))));
//! assert_eq!(model.expressions().count(), 1);
//! ```

pub mod animation;
pub mod coin_term;
pub mod collection;
pub mod error;
pub mod event;
pub mod expression;
pub mod geom;
pub mod hint;
pub mod model;
pub mod options;

pub use coin_term::{CoinTerm, CoinTermFactory, CoinTermId, CoinTermOptions};
pub use collection::{CollectedItem, CollectOutcome, CollectionArea};
pub use error::ModelError;
pub use event::ModelEvent;
pub use expression::{CoinTermStore, Expression, ExpressionId};
pub use geom::{Bounds2, Vector2};
pub use hint::ExpressionHint;
pub use model::{ExpressionManipulationModel, ReleaseOutcome, ViewMode};
pub use options::ModelOptions;
