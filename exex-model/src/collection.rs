//! Collection areas: the slots that accept an expression or coin term matching a target
//! description.

use crate::{
    coin_term::{CoinTerm, CoinTermId},
    error::ModelError,
    expression::{CoinTermStore, Expression, ExpressionId},
    geom::{Bounds2, Vector2},
    options::ModelOptions,
};
use exex_parser::ExpressionDescription;
use log::debug;

/// Space kept between a collected expression and the edges of its area.
const COLLECTION_PADDING: f64 = 5.0;

/// Space kept between a rejected item and the edge of the area that rejected it.
const REJECTION_GAP: f64 = 10.0;

/// Returns true if the members of the expression add up to exactly the description.
pub fn expression_matches(
    description: &ExpressionDescription,
    expression: &Expression,
    store: &CoinTermStore,
) -> bool {
    description.matches_totals(expression.total_counts(store))
}

/// Returns true if the description is a single term equal to the coin term.
pub fn coin_term_matches(description: &ExpressionDescription, coin_term: &CoinTerm) -> bool {
    description.matches_single(coin_term.kind(), coin_term.total_count())
}

/// The entity held by a collection area.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CollectedItem {
    CoinTerm(CoinTermId),
    Expression(ExpressionId),
}

/// The result of dropping something on a collection area.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum CollectOutcome {
    /// The item matched and is travelling into the area.
    Collected { destination: Vector2 },

    /// The item did not match, or the area was full, and is being pushed away.
    Rejected { destination: Vector2 },
}

impl CollectOutcome {
    pub fn is_collected(&self) -> bool {
        matches!(self, CollectOutcome::Collected { .. })
    }

    /// Where the item is travelling to. For an expression, this is its upper-left corner.
    pub fn destination(&self) -> Vector2 {
        match self {
            CollectOutcome::Collected { destination }
            | CollectOutcome::Rejected { destination } => *destination,
        }
    }
}

/// A slot holding at most one item, which must match its description.
#[derive(Clone, Debug, PartialEq)]
pub struct CollectionArea {
    bounds: Bounds2,
    description: ExpressionDescription,
    collected_item: Option<CollectedItem>,
}

impl CollectionArea {
    pub fn new(bounds: Bounds2, description: ExpressionDescription) -> Self {
        Self { bounds, description, collected_item: None }
    }

    pub fn bounds(&self) -> Bounds2 {
        self.bounds
    }

    pub fn description(&self) -> &ExpressionDescription {
        &self.description
    }

    pub fn collected_item(&self) -> Option<CollectedItem> {
        self.collected_item
    }

    pub fn is_empty(&self) -> bool {
        self.collected_item.is_none()
    }

    /// How far an item with the given bounds must move horizontally to clear the area, leaving
    /// by whichever side its center is closer to.
    pub fn push_away_offset(&self, item: &Bounds2) -> Vector2 {
        let dx = if item.center_x() < self.bounds.center_x() {
            self.bounds.min_x - REJECTION_GAP - item.max_x
        } else {
            self.bounds.max_x + REJECTION_GAP - item.min_x
        };
        Vector2::new(dx, 0.0)
    }

    /// Collects the coin term if the area is empty and the coin term matches, sending it to the
    /// center of the area. Otherwise, pushes it away.
    pub fn try_to_collect_coin_term(
        &mut self,
        coin_term: &mut CoinTerm,
        options: &ModelOptions,
    ) -> CollectOutcome {
        if self.is_empty() && coin_term_matches(&self.description, coin_term) {
            let destination = self.bounds.center() - coin_term.local_bounds().center();
            coin_term.travel_to_destination(destination, options);
            coin_term.set_collected(true);
            self.collected_item = Some(CollectedItem::CoinTerm(coin_term.id()));
            debug!("collected {} as {}", coin_term.id(), self.description);
            CollectOutcome::Collected { destination }
        } else {
            let destination = coin_term.position() + self.push_away_offset(&coin_term.bounds());
            coin_term.travel_to_destination(destination, options);
            debug!("rejected {} from {}", coin_term.id(), self.description);
            CollectOutcome::Rejected { destination }
        }
    }

    /// Collects the expression if the area is empty and the expression matches, shrinking it
    /// to fit if needed and centering it in the area. Otherwise, pushes it away.
    pub fn try_to_collect_expression(
        &mut self,
        expression: &mut Expression,
        store: &mut CoinTermStore,
    ) -> Result<CollectOutcome, ModelError> {
        if !self.is_empty() || !expression_matches(&self.description, expression, store) {
            let destination = expression.upper_left() + self.push_away_offset(&expression.bounds());
            expression.travel_to_destination(destination);
            debug!("rejected {} from {}", expression.id(), self.description);
            return Ok(CollectOutcome::Rejected { destination });
        }

        let unscaled_width = expression.width() / expression.scale();
        let unscaled_height = expression.height() / expression.scale();
        let fit = ((self.bounds.width() - 2.0 * COLLECTION_PADDING) / unscaled_width)
            .min((self.bounds.height() - 2.0 * COLLECTION_PADDING) / unscaled_height)
            .min(1.0);
        expression.set_scale(fit, store)?;

        let destination = self.bounds.center()
            - Vector2::new(expression.width() / 2.0, expression.height() / 2.0);
        expression.travel_to_destination(destination);
        expression.set_collected(true, store)?;
        self.collected_item = Some(CollectedItem::Expression(expression.id()));
        debug!("collected {} as {} at scale {}", expression.id(), self.description, fit);
        Ok(CollectOutcome::Collected { destination })
    }

    /// Releases the collected item, if any. The caller is responsible for clearing the item's
    /// collected state.
    pub fn eject_collected_item(&mut self) -> Option<CollectedItem> {
        self.collected_item.take()
    }
}

#[cfg(test)]
mod tests {
    use crate::coin_term::{CoinTermFactory, CoinTermOptions};
    use exex_parser::MonomialType;
    use pretty_assertions::assert_eq;
    use super::*;

    fn area(description: &str) -> CollectionArea {
        CollectionArea::new(
            Bounds2::new(600.0, 0.0, 800.0, 100.0),
            ExpressionDescription::new(description).unwrap(),
        )
    }

    #[test]
    fn collect_matching_coin_term() {
        let mut factory = CoinTermFactory::default();
        let mut coin_term = factory.create(
            MonomialType::X,
            CoinTermOptions::default().initial_count(2).initial_position(650.0, 60.0),
        );
        let mut area = area("2x");

        let outcome = area.try_to_collect_coin_term(&mut coin_term, &ModelOptions::default());
        assert_eq!(outcome, CollectOutcome::Collected { destination: Vector2::new(700.0, 50.0) });
        assert!(coin_term.is_collected());
        assert_eq!(area.collected_item(), Some(CollectedItem::CoinTerm(coin_term.id())));
    }

    #[test]
    fn reject_mismatched_coin_term() {
        let mut factory = CoinTermFactory::default();
        let mut coin_term = factory.create(
            MonomialType::X,
            CoinTermOptions::default().initial_position(650.0, 60.0),
        );
        let mut area = area("2x");

        let outcome = area.try_to_collect_coin_term(&mut coin_term, &ModelOptions::default());
        assert_eq!(outcome, CollectOutcome::Rejected { destination: Vector2::new(554.0, 60.0) });
        assert!(!coin_term.is_collected());
        assert!(area.is_empty());
    }

    #[test]
    fn full_area_rejects() {
        let mut factory = CoinTermFactory::default();
        let options = ModelOptions::default();
        let mut first = factory.create(
            MonomialType::X,
            CoinTermOptions::default().initial_count(2).initial_position(750.0, 50.0),
        );
        let mut second = first.clone();
        let mut area = area("2x");

        assert!(area.try_to_collect_coin_term(&mut first, &options).is_collected());
        let outcome = area.try_to_collect_coin_term(&mut second, &options);
        assert_eq!(outcome, CollectOutcome::Rejected { destination: Vector2::new(846.0, 50.0) });
    }

    fn expression_of(counts: [(i64, MonomialType); 2]) -> (Expression, CoinTermStore) {
        let mut store = CoinTermStore::new();
        let mut factory = CoinTermFactory::default();
        let mut ids = Vec::new();
        for (i, (count, kind)) in counts.into_iter().enumerate() {
            let coin_term = factory.create(
                kind,
                CoinTermOptions::default()
                    .initial_count(count)
                    .initial_position(100.0 + 200.0 * i as f64, 100.0),
            );
            ids.push(coin_term.id());
            store.insert(coin_term.id(), coin_term);
        }

        let expression = Expression::new(
            ExpressionId(0),
            ids[0],
            ids[1],
            &mut store,
            ModelOptions::default(),
        )
        .unwrap();
        (expression, store)
    }

    #[test]
    fn match_by_totals() {
        let description = ExpressionDescription::new("2(x-1)").unwrap();

        let (expression, store) = expression_of([(2, MonomialType::X), (-2, MonomialType::Constant)]);
        assert!(expression_matches(&description, &expression, &store));

        let (expression, store) = expression_of([(2, MonomialType::X), (-1, MonomialType::Constant)]);
        assert!(!expression_matches(&description, &expression, &store));
    }

    #[test]
    fn collect_expression_scaled_to_fit() {
        let description = ExpressionDescription::new("2(x-1)").unwrap();
        let (mut expression, mut store) =
            expression_of([(2, MonomialType::X), (-2, MonomialType::Constant)]);
        expression.update_size_and_coin_term_positions(&mut store, false).unwrap();
        let mut area = CollectionArea::new(Bounds2::new(600.0, 0.0, 707.0, 100.0), description);

        let outcome = area.try_to_collect_expression(&mut expression, &mut store).unwrap();
        assert!(outcome.is_collected());
        assert_eq!(expression.scale(), 0.5);
        assert_eq!(expression.destination(), Vector2::new(605.0, 26.0));
        assert!(expression.is_collected());
        assert!(store.values().all(CoinTerm::is_collected));
        assert_eq!(area.collected_item(), Some(CollectedItem::Expression(expression.id())));
    }
}
