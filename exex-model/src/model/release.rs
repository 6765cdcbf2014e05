//! Deciding what combines with what, both when the user lets go of something and while it is
//! still being dragged.

use super::{ExpressionManipulationModel, ViewMode};
use crate::{
    coin_term::{CoinTerm, CoinTermId},
    collection::{CollectOutcome, CollectedItem},
    error::ModelError,
    event::ModelEvent,
    expression::{Expression, ExpressionId, Side},
    geom::{Bounds2, Vector2},
    hint::{expression_combine_zone, ExpressionHint},
};
use log::{debug, trace};

/// What the model did with a coin term or expression the user let go of.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ReleaseOutcome {
    /// Accepted by the collection area, and travelling to `destination` inside it.
    Collected { area: usize, destination: Vector2 },

    /// Refused by the collection area, and pushed away to `destination`.
    Rejected { area: usize, destination: Vector2 },

    /// Released over the creator box, and travelling back to where it was created. For an
    /// expression, every member returns on its own.
    ReturnedToOrigin,

    /// The coin term became a member of the expression.
    JoinedExpression(ExpressionId),

    /// The coin term is travelling onto a like coin term, which absorbs it on arrival.
    Absorbing { target: CoinTermId },

    /// The coin term formed a new expression with a free coin term.
    FormedExpression(ExpressionId),

    /// The expression's members were added to another expression, and the expression no
    /// longer exists.
    MergedInto(ExpressionId),

    /// A free coin term under the expression became one of its members.
    PulledIn(CoinTermId),

    /// Released outside the retrieval bounds, and travelling back inside to `destination`.
    Retrieved { destination: Vector2 },

    /// Nothing happened.
    Nothing,
}

/// Returns the candidate with the greatest score, keeping the earliest of equal candidates.
fn best_by<T, I>(candidates: I) -> Option<T>
where
    I: IntoIterator<Item = (T, f64)>,
{
    let mut best: Option<(T, f64)> = None;
    for (candidate, score) in candidates {
        if best.as_ref().map_or(true, |(_, best_score)| score > *best_score) {
            best = Some((candidate, score));
        }
    }
    best.map(|(candidate, _)| candidate)
}

impl ExpressionManipulationModel {
    /// Returns true if the coin term is at rest on its own, so something released near it may
    /// combine with it.
    fn is_free(coin_term: &CoinTerm) -> bool {
        coin_term.expression().is_none()
            && !coin_term.is_user_controlled()
            && !coin_term.is_collected()
            && !coin_term.is_fading()
            && !coin_term.is_animating()
            && !coin_term.is_returning_to_origin()
    }

    /// Returns true if the expression is at rest, so something released over it may join it.
    fn is_settled(expression: &Expression) -> bool {
        !expression.is_animating() && !expression.is_user_controlled() && !expression.is_collected()
    }

    /// Returns true if two coin terms are close enough to combine in the current view mode.
    fn terms_overlap(&self, a: &CoinTerm, b: &CoinTerm) -> bool {
        let distance = a.position().distance(b.position());
        match self.view_mode {
            ViewMode::Coins => distance < (a.radius() + b.radius()) * self.options.coin_overlap_factor,
            ViewMode::Variables => distance < self.options.variable_combine_radius(),
        }
    }

    fn most_overlapping_collection_area(&self, bounds: &Bounds2) -> Option<usize> {
        best_by(
            self.collection_areas
                .iter()
                .enumerate()
                .map(|(index, area)| (index, area.bounds().intersection_area(bounds)))
                .filter(|&(_, overlap)| overlap > 0.0),
        )
    }

    fn over_creator_box(&self, bounds: &Bounds2) -> bool {
        self.creator_box_bounds.is_some_and(|creator_box| creator_box.intersects(bounds))
    }

    /// The settled expression whose join zone overlaps the coin term the most.
    pub(super) fn expression_to_join(&self, id: CoinTermId) -> Option<ExpressionId> {
        let coin_term = self.coin_terms.get(&id)?;
        best_by(
            self.expressions
                .values()
                .filter(|expression| Self::is_settled(expression))
                .map(|expression| (expression.id(), expression.coin_term_join_zone_overlap(coin_term)))
                .filter(|&(_, overlap)| overlap > 0.0),
        )
    }

    /// The closest free coin term overlapping the coin term.
    pub(super) fn closest_overlapping_coin_term(&self, id: CoinTermId) -> Option<CoinTermId> {
        let moving = self.coin_terms.get(&id)?;
        best_by(
            self.coin_terms
                .values()
                .filter(|candidate| candidate.id() != id && Self::is_free(candidate))
                .filter(|candidate| self.terms_overlap(moving, candidate))
                .map(|candidate| (candidate.id(), -moving.position().distance(candidate.position()))),
        )
    }

    /// The closest free coin term whose expression combine zone contains the coin term.
    pub(super) fn closest_expression_combine_candidate(&self, id: CoinTermId) -> Option<CoinTermId> {
        let moving = self.coin_terms.get(&id)?;
        best_by(
            self.coin_terms
                .values()
                .filter(|candidate| candidate.id() != id && Self::is_free(candidate))
                .filter(|candidate| expression_combine_zone(candidate).contains_point(moving.position()))
                .map(|candidate| (candidate.id(), -moving.position().distance(candidate.position()))),
        )
    }

    /// The settled expression overlapping the expression the most.
    pub(super) fn expression_to_merge_with(&self, id: ExpressionId) -> Option<ExpressionId> {
        let moving = self.expressions.get(&id)?;
        best_by(
            self.expressions
                .values()
                .filter(|candidate| candidate.id() != id && Self::is_settled(candidate))
                .map(|candidate| (candidate.id(), candidate.overlap(moving)))
                .filter(|&(_, overlap)| overlap > 0.0),
        )
    }

    /// The free coin term overlapping the expression's join zone the most.
    fn coin_term_to_pull_in(&self, id: ExpressionId) -> Option<CoinTermId> {
        let expression = self.expressions.get(&id)?;
        best_by(
            self.coin_terms
                .values()
                .filter(|candidate| Self::is_free(candidate))
                .map(|candidate| (candidate.id(), expression.coin_term_join_zone_overlap(candidate)))
                .filter(|&(_, overlap)| overlap > 0.0),
        )
    }

    /// Creates an expression from two free coin terms.
    fn form_expression(&mut self, anchor: CoinTermId, floating: CoinTermId) -> Result<ExpressionId, ModelError> {
        let id = ExpressionId(self.next_expression_id);
        self.next_expression_id += 1;

        let expression = Expression::new(id, anchor, floating, &mut self.coin_terms, self.options)?;
        self.expressions.insert(id, expression);
        self.events.push(ModelEvent::ExpressionAdded(id));
        debug!("formed {} from {} and {}", id, anchor, floating);
        Ok(id)
    }

    /// Decides what a released coin term combines with.
    ///
    /// In order of precedence, the coin term may be collected, return to its origin, join an
    /// expression, combine with a like coin term, form an expression with an unlike one, or be
    /// pulled back inside the retrieval bounds.
    pub(super) fn release_coin_term(&mut self, id: CoinTermId) -> Result<ReleaseOutcome, ModelError> {
        self.get_coin_term_mut(id)?.set_user_controlled(false);
        self.remove_hints_involving(id);
        let bounds = self.get_coin_term(id)?.bounds();

        if let Some(index) = self.most_overlapping_collection_area(&bounds) {
            return self.collect_coin_term(index, id);
        }

        if self.over_creator_box(&bounds) {
            let options = self.options;
            self.get_coin_term_mut(id)?.return_to_origin(&options);
            debug!("{} released over the creator box", id);
            return Ok(ReleaseOutcome::ReturnedToOrigin);
        }

        if let Some(expression_id) = self.expression_to_join(id) {
            let expression = self
                .expressions
                .get_mut(&expression_id)
                .ok_or(ModelError::UnknownExpression(expression_id))?;
            expression.add_coin_term(id, &mut self.coin_terms)?;
            return Ok(ReleaseOutcome::JoinedExpression(expression_id));
        }

        if let Some(target) = self.closest_overlapping_coin_term(id) {
            let target_term = self.get_coin_term(target)?;
            let (target_kind, target_position) = (target_term.kind(), target_term.position());

            if target_kind == self.get_coin_term(id)?.kind() {
                let options = self.options;
                self.get_coin_term_mut(id)?.travel_to_destination(target_position, &options);
                self.pending_absorptions.push((id, target));
                debug!("{} travelling onto {}", id, target);
                self.process_arrivals()?;
                return Ok(ReleaseOutcome::Absorbing { target });
            }

            let expression = self.form_expression(target, id)?;
            return Ok(ReleaseOutcome::FormedExpression(expression));
        }

        if let Some(anchor) = self.closest_expression_combine_candidate(id) {
            let expression = self.form_expression(anchor, id)?;
            return Ok(ReleaseOutcome::FormedExpression(expression));
        }

        if let Some(destination) = self.retrieve_coin_term(id)? {
            return Ok(ReleaseOutcome::Retrieved { destination });
        }

        Ok(ReleaseOutcome::Nothing)
    }

    /// Decides what a released expression combines with.
    ///
    /// In order of precedence, the expression may be collected, return its members to their
    /// origins, merge into another expression, pull in a free coin term, or be pulled back
    /// inside the retrieval bounds.
    pub(super) fn release_expression(&mut self, id: ExpressionId) -> Result<ReleaseOutcome, ModelError> {
        let expression = self.expressions.get_mut(&id).ok_or(ModelError::UnknownExpression(id))?;
        expression.set_user_controlled(false, &mut self.coin_terms)?;
        let bounds = expression.bounds();

        if let Some(index) = self.most_overlapping_collection_area(&bounds) {
            return self.collect_expression(index, id);
        }

        if self.over_creator_box(&bounds) {
            let options = self.options;
            for member in self.dissolve_expression(id)? {
                self.get_coin_term_mut(member)?.return_to_origin(&options);
            }
            debug!("{} released over the creator box", id);
            return Ok(ReleaseOutcome::ReturnedToOrigin);
        }

        if let Some(target) = self.expression_to_merge_with(id) {
            let source_on_left = bounds.center_x() < self.get_expression(target)?.bounds().center_x();
            let members = self.dissolve_expression(id)?;
            let expression = self.expressions.get_mut(&target).ok_or(ModelError::UnknownExpression(target))?;

            // added one by one at the near end, so the left-to-right order is kept
            if source_on_left {
                for &member in members.iter().rev() {
                    expression.add_coin_term_on_side(member, Side::Left, &mut self.coin_terms)?;
                }
            } else {
                for &member in &members {
                    expression.add_coin_term_on_side(member, Side::Right, &mut self.coin_terms)?;
                }
            }
            debug!("merged {} into {}", id, target);
            return Ok(ReleaseOutcome::MergedInto(target));
        }

        if let Some(coin_term) = self.coin_term_to_pull_in(id) {
            let expression = self.expressions.get_mut(&id).ok_or(ModelError::UnknownExpression(id))?;
            expression.add_coin_term(coin_term, &mut self.coin_terms)?;
            return Ok(ReleaseOutcome::PulledIn(coin_term));
        }

        if let Some(destination) = self.retrieve_expression(id)? {
            return Ok(ReleaseOutcome::Retrieved { destination });
        }

        Ok(ReleaseOutcome::Nothing)
    }

    fn collect_coin_term(&mut self, index: usize, id: CoinTermId) -> Result<ReleaseOutcome, ModelError> {
        let area = self
            .collection_areas
            .get_mut(index)
            .ok_or(ModelError::UnknownCollectionArea(index))?;
        let coin_term = self.coin_terms.get_mut(&id).ok_or(ModelError::UnknownCoinTerm(id))?;
        let outcome = area.try_to_collect_coin_term(coin_term, &self.options);
        Ok(self.record_collect_outcome(index, CollectedItem::CoinTerm(id), outcome))
    }

    fn collect_expression(&mut self, index: usize, id: ExpressionId) -> Result<ReleaseOutcome, ModelError> {
        let area = self
            .collection_areas
            .get_mut(index)
            .ok_or(ModelError::UnknownCollectionArea(index))?;
        let expression = self.expressions.get_mut(&id).ok_or(ModelError::UnknownExpression(id))?;
        let outcome = area.try_to_collect_expression(expression, &mut self.coin_terms)?;
        Ok(self.record_collect_outcome(index, CollectedItem::Expression(id), outcome))
    }

    fn record_collect_outcome(
        &mut self,
        area: usize,
        item: CollectedItem,
        outcome: CollectOutcome,
    ) -> ReleaseOutcome {
        match outcome {
            CollectOutcome::Collected { destination } => {
                self.events.push(ModelEvent::Collected { area, item });
                ReleaseOutcome::Collected { area, destination }
            },
            CollectOutcome::Rejected { destination } => {
                self.events.push(ModelEvent::Rejected { area, item });
                ReleaseOutcome::Rejected { area, destination }
            },
        }
    }

    /// Sends a coin term released outside the retrieval bounds back to the nearest point
    /// inside them. Returns the destination, if it had to move.
    fn retrieve_coin_term(&mut self, id: CoinTermId) -> Result<Option<Vector2>, ModelError> {
        let Some(retrieval) = self.retrieval_bounds else {
            return Ok(None);
        };
        let options = self.options;
        let coin_term = self.get_coin_term_mut(id)?;
        if retrieval.contains_point(coin_term.position()) {
            return Ok(None);
        }

        let destination = retrieval.fit_point(&coin_term.local_bounds(), coin_term.position());
        coin_term.travel_to_destination(destination, &options);
        debug!("retrieving {} to {:?}", id, destination);
        Ok(Some(destination))
    }

    /// Sends an expression released outside the retrieval bounds back to the nearest point
    /// inside them. Returns the destination of its upper-left corner, if it had to move.
    fn retrieve_expression(&mut self, id: ExpressionId) -> Result<Option<Vector2>, ModelError> {
        let Some(retrieval) = self.retrieval_bounds else {
            return Ok(None);
        };
        let expression = self.get_expression_mut(id)?;
        if retrieval.contains_point(expression.bounds().center()) {
            return Ok(None);
        }

        let local = Bounds2::new(0.0, 0.0, expression.width(), expression.height());
        let destination = retrieval.fit_point(&local, expression.upper_left());
        expression.travel_to_destination(destination);
        debug!("retrieving {} to {:?}", id, destination);
        Ok(Some(destination))
    }

    /// Removes a hint, letting its coin terms be broken apart again unless another hint still
    /// involves them.
    fn remove_hint(&mut self, hint: ExpressionHint) {
        self.hints.retain(|existing| *existing != hint);
        for id in [hint.anchor(), hint.moving()] {
            let still_hinted = self.hints.iter().any(|other| other.involves(id));
            if let Some(coin_term) = self.coin_terms.get_mut(&id) {
                if !still_hinted && coin_term.expression().is_none() {
                    coin_term.set_break_apart_allowed(true);
                }
            }
        }
        self.events.push(ModelEvent::HintRemoved(hint));
        trace!("removed hint between {} and {}", hint.anchor(), hint.moving());
    }

    pub(super) fn remove_hints_involving(&mut self, id: CoinTermId) {
        let involved = self
            .hints
            .iter()
            .filter(|hint| hint.involves(id))
            .copied()
            .collect::<Vec<_>>();
        for hint in involved {
            self.remove_hint(hint);
        }
    }

    /// Recomputes what everything being dragged would combine with if released now.
    ///
    /// Expressions learn which dragged coin terms and expressions hover over them. A dragged
    /// coin term that would only form an expression with a free coin term gets a hint instead.
    pub(super) fn update_hover_state(&mut self) -> Result<(), ModelError> {
        for expression in self.expressions.values_mut() {
            expression.clear_hovering();
        }

        let dragged_coin_terms = self
            .coin_terms
            .values()
            .filter(|coin_term| coin_term.is_user_controlled() && coin_term.expression().is_none())
            .map(CoinTerm::id)
            .collect::<Vec<_>>();

        let mut wanted_hints = Vec::new();
        for id in dragged_coin_terms {
            if let Some(expression) = self.expression_to_join(id) {
                self.get_expression_mut(expression)?.add_hovering_coin_term(id);
            } else if self.closest_overlapping_coin_term(id).is_none() {
                if let Some(anchor) = self.closest_expression_combine_candidate(id) {
                    wanted_hints.push((anchor, id));
                }
            }
        }

        let dragged_expressions = self
            .expressions
            .values()
            .filter(|expression| expression.is_user_controlled())
            .map(Expression::id)
            .collect::<Vec<_>>();
        for id in dragged_expressions {
            if let Some(target) = self.expression_to_merge_with(id) {
                self.get_expression_mut(target)?.add_hovering_expression(id);
            }
        }

        let stale = self
            .hints
            .iter()
            .filter(|hint| !wanted_hints.contains(&(hint.anchor(), hint.moving())))
            .copied()
            .collect::<Vec<_>>();
        for hint in stale {
            self.remove_hint(hint);
        }

        for (anchor, moving) in wanted_hints {
            let (anchor_term, moving_term) = (self.get_coin_term(anchor)?, self.get_coin_term(moving)?);
            match self
                .hints
                .iter()
                .position(|hint| hint.anchor() == anchor && hint.moving() == moving)
            {
                Some(index) => {
                    let mut hint = self.hints[index];
                    hint.update(anchor_term, moving_term);
                    self.hints[index] = hint;
                },
                None => {
                    let hint = ExpressionHint::new(anchor_term, moving_term);
                    self.hints.push(hint);
                    self.get_coin_term_mut(anchor)?.set_break_apart_allowed(false);
                    self.get_coin_term_mut(moving)?.set_break_apart_allowed(false);
                    self.events.push(ModelEvent::HintAdded(hint));
                    trace!("added hint between {} and {}", anchor, moving);
                },
            }
        }
        Ok(())
    }
}
