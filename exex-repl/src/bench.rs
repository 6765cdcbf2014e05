//! Builds expressions out of coin terms on a scratch model, the way a user would by dragging
//! them around, and submits the result to a collection area.

use crate::error::Error;
use exex_model::{
    Bounds2,
    CoinTermId,
    CoinTermOptions,
    CollectionArea,
    ExpressionId,
    ExpressionManipulationModel,
    ModelError,
    ReleaseOutcome,
    Vector2,
};
use exex_parser::{ExpressionDescription, MonomialType};
use log::debug;

const STEP: f64 = 1.0 / 60.0;

/// Enough steps for every animation to finish with the default options.
const SETTLE_STEPS: usize = 180;

/// Where the first coin term is placed.
const START: Vector2 = Vector2::new(100.0, 100.0);

/// The collection area every build is submitted to, well below the building row.
const AREA_BOUNDS: Bounds2 = Bounds2::new(0.0, 400.0, 2400.0, 800.0);

/// Parses each whitespace-separated token as a single coin term, such as `2x`, `-1` or `x^2y^2`.
pub fn parse_coins<'a, I>(tokens: I) -> Result<Vec<(MonomialType, i64)>, Error>
where
    I: IntoIterator<Item = &'a str>,
{
    tokens.into_iter()
        .map(|token| {
            let description = ExpressionDescription::new(token)
                .map_err(|error| Error::Parse { source: token.to_string(), error })?;
            match description.terms() {
                [term] => Ok((term.kind, term.coefficient)),
                _ => Err(Error::NotACoinTerm(token.to_string())),
            }
        })
        .collect()
}

/// What the coin terms dropped so far have become.
#[derive(Clone, Copy, Debug)]
enum Built {
    Nothing,
    CoinTerm(CoinTermId),
    Expression(ExpressionId),
}

/// Result of submitting a build to the collection area.
#[derive(Clone, Debug, PartialEq)]
pub enum Submission {
    Collected,
    Rejected,

    /// Every coin term cancelled out, so there was nothing to submit.
    Empty { matches: bool },
}

/// Drops the coin terms one after another to the right of the build, then drags the build into
/// a collection area wanting `target`.
pub fn build_and_submit(
    target: &ExpressionDescription,
    coins: &[(MonomialType, i64)],
) -> Result<Submission, ModelError> {
    let mut model = ExpressionManipulationModel::default();
    let area = model.add_collection_area(CollectionArea::new(AREA_BOUNDS, target.clone()));

    let mut built = Built::Nothing;
    for (i, &(kind, count)) in coins.iter().enumerate() {
        let parked = CoinTermOptions::default()
            .initial_position(200.0 * i as f64, 1200.0)
            .initial_count(count);
        let id = model.create_coin_term(kind, parked);

        let drop_point = match built {
            Built::Nothing => START,
            Built::CoinTerm(anchor) => model
                .coin_term(anchor)
                .ok_or(ModelError::UnknownCoinTerm(anchor))?
                .position()
                .plus_xy(60.0, 0.0),
            Built::Expression(expression) => {
                let bounds = model
                    .expression(expression)
                    .ok_or(ModelError::UnknownExpression(expression))?
                    .bounds();
                Vector2::new(bounds.max_x + 20.0, bounds.center_y())
            },
        };

        model.set_coin_term_user_controlled(id, true)?;
        model.set_coin_term_position(id, drop_point)?;
        let outcome = model.set_coin_term_user_controlled(id, false)?;
        debug!("dropped {} at {:?}: {:?}", id, drop_point, outcome);

        built = match outcome {
            Some(ReleaseOutcome::FormedExpression(expression))
            | Some(ReleaseOutcome::JoinedExpression(expression)) => Built::Expression(expression),
            Some(ReleaseOutcome::Absorbing { target }) => Built::CoinTerm(target),
            _ => match built {
                Built::Nothing => Built::CoinTerm(id),
                other => other,
            },
        };
        settle(&mut model)?;

        // a fully cancelled coin term fades out and is removed
        if let Built::CoinTerm(survivor) = built {
            if model.coin_term(survivor).is_none() {
                built = Built::Nothing;
            }
        }
    }

    let outcome = match built {
        Built::Nothing => {
            return Ok(Submission::Empty { matches: target.matches_totals(std::iter::empty()) });
        },
        Built::CoinTerm(id) => {
            model.set_coin_term_user_controlled(id, true)?;
            model.set_coin_term_position(id, AREA_BOUNDS.center())?;
            model.set_coin_term_user_controlled(id, false)?
        },
        Built::Expression(id) => {
            model.set_expression_user_controlled(id, true)?;
            let upper_left = Vector2::new(AREA_BOUNDS.min_x + 20.0, AREA_BOUNDS.min_y + 20.0);
            model.set_expression_position(id, upper_left)?;
            model.set_expression_user_controlled(id, false)?
        },
    };
    debug!("submitted to area {}: {:?}", area, outcome);

    Ok(match outcome {
        Some(ReleaseOutcome::Collected { .. }) => Submission::Collected,
        _ => Submission::Rejected,
    })
}

fn settle(model: &mut ExpressionManipulationModel) -> Result<(), ModelError> {
    for _ in 0..SETTLE_STEPS {
        model.step(STEP)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;

    fn submit(target: &str, coins: &str) -> Submission {
        let target = ExpressionDescription::new(target).unwrap();
        let coins = parse_coins(coins.split_whitespace()).unwrap();
        build_and_submit(&target, &coins).unwrap()
    }

    #[test]
    fn parse_single_terms() {
        let coins = parse_coins(["2x", "-1", "x^2y^2", "-y"]).unwrap();
        assert_eq!(coins, vec![
            (MonomialType::X, 2),
            (MonomialType::Constant, -1),
            (MonomialType::XSquaredYSquared, 1),
            (MonomialType::Y, -1),
        ]);
    }

    #[test]
    fn reject_sums() {
        assert!(matches!(parse_coins(["x+y"]), Err(Error::NotACoinTerm(token)) if token == "x+y"));
        assert!(matches!(parse_coins(["2w"]), Err(Error::Parse { source, .. }) if source == "2w"));
    }

    #[test]
    fn single_coin_term_is_collected() {
        assert_eq!(submit("2x", "2x"), Submission::Collected);
        assert_eq!(submit("2x", "3x"), Submission::Rejected);
    }

    #[test]
    fn expression_is_collected() {
        assert_eq!(submit("2x - 1", "2x -1"), Submission::Collected);
        assert_eq!(submit("x + y + 1", "1 y x"), Submission::Collected);
        assert_eq!(submit("x + y", "x 1"), Submission::Rejected);
    }

    #[test]
    fn like_coin_terms_combine_first() {
        assert_eq!(submit("3x", "x 2x"), Submission::Collected);
    }

    #[test]
    fn cancelled_coin_terms_leave_nothing() {
        assert_eq!(submit("x", "x -x"), Submission::Empty { matches: false });
    }
}
