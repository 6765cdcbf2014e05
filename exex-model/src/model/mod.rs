//! The model that owns every coin term and expression, and decides what happens when the user
//! picks something up or lets go of it.

mod release;

pub use release::ReleaseOutcome;

use crate::{
    coin_term::{CoinTerm, CoinTermFactory, CoinTermId, CoinTermOptions},
    collection::{CollectedItem, CollectionArea},
    error::ModelError,
    event::ModelEvent,
    expression::{CoinTermStore, Expression, ExpressionId},
    geom::{Bounds2, Vector2},
    hint::ExpressionHint,
    options::ModelOptions,
};
use exex_parser::{MonomialType, VariableValues};
use log::{debug, info, trace};
use std::collections::BTreeMap;

/// How coin terms are presented, which changes how close two of them must be to combine.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ViewMode {
    /// As coins, which combine when they overlap.
    #[default]
    Coins,

    /// As variable text, which combines within a fixed distance.
    Variables,
}

/// Owns the coin terms, expressions, hints, and collection areas of one play area.
///
/// Entities are stored by id in ordered maps, so every search over them visits them in order
/// of creation. Whenever several candidates are equally good, the oldest wins.
#[derive(Clone, Debug, Default)]
pub struct ExpressionManipulationModel {
    options: ModelOptions,
    view_mode: ViewMode,
    factory: CoinTermFactory,
    coin_terms: CoinTermStore,
    expressions: BTreeMap<ExpressionId, Expression>,
    next_expression_id: u32,
    hints: Vec<ExpressionHint>,
    collection_areas: Vec<CollectionArea>,
    creator_box_bounds: Option<Bounds2>,
    retrieval_bounds: Option<Bounds2>,
    expression_being_edited: Option<ExpressionId>,

    /// Coin terms travelling onto a like coin term, paired with that coin term. The pair is
    /// absorbed when the first arrives.
    pending_absorptions: Vec<(CoinTermId, CoinTermId)>,

    events: Vec<ModelEvent>,
}

impl ExpressionManipulationModel {
    pub fn new(options: ModelOptions) -> Self {
        Self { options, ..Default::default() }
    }

    pub fn options(&self) -> &ModelOptions {
        &self.options
    }

    /// Replaces the options of the model and every expression in it.
    pub fn set_options(&mut self, options: ModelOptions) {
        self.options = options;
        for expression in self.expressions.values_mut() {
            expression.set_options(options);
        }
    }

    pub fn view_mode(&self) -> ViewMode {
        self.view_mode
    }

    pub fn set_view_mode(&mut self, view_mode: ViewMode) {
        debug!("view mode is now {:?}", view_mode);
        self.view_mode = view_mode;
    }

    pub fn variable_values(&self) -> &VariableValues {
        self.factory.variable_values()
    }

    pub fn set_variable_values(&mut self, values: VariableValues) {
        self.factory.set_variable_values(values);
    }

    pub fn creator_box_bounds(&self) -> Option<Bounds2> {
        self.creator_box_bounds
    }

    /// Sets the region where coin terms are created. Anything released over it returns to
    /// where it came from.
    pub fn set_creator_box_bounds(&mut self, bounds: Option<Bounds2>) {
        self.creator_box_bounds = bounds;
    }

    pub fn retrieval_bounds(&self) -> Option<Bounds2> {
        self.retrieval_bounds
    }

    /// Sets the region released items are kept inside of.
    pub fn set_retrieval_bounds(&mut self, bounds: Option<Bounds2>) {
        self.retrieval_bounds = bounds;
    }

    /// The factory that creates coin terms for this model. Coin terms passed to
    /// [`add_coin_term`](Self::add_coin_term) must come from here.
    pub fn factory_mut(&mut self) -> &mut CoinTermFactory {
        &mut self.factory
    }

    pub fn coin_term(&self, id: CoinTermId) -> Option<&CoinTerm> {
        self.coin_terms.get(&id)
    }

    pub fn coin_terms(&self) -> impl Iterator<Item = &CoinTerm> {
        self.coin_terms.values()
    }

    pub fn expression(&self, id: ExpressionId) -> Option<&Expression> {
        self.expressions.get(&id)
    }

    pub fn expressions(&self) -> impl Iterator<Item = &Expression> {
        self.expressions.values()
    }

    pub fn hints(&self) -> &[ExpressionHint] {
        &self.hints
    }

    pub fn collection_areas(&self) -> &[CollectionArea] {
        &self.collection_areas
    }

    pub fn collection_area(&self, index: usize) -> Option<&CollectionArea> {
        self.collection_areas.get(index)
    }

    pub fn expression_being_edited(&self) -> Option<ExpressionId> {
        self.expression_being_edited
    }

    /// The value of the coin term for the current variable values.
    pub fn coin_term_value(&self, id: CoinTermId) -> Result<i64, ModelError> {
        Ok(self.factory.value_of(self.get_coin_term(id)?))
    }

    /// Takes every event that happened since the last call.
    pub fn drain_events(&mut self) -> Vec<ModelEvent> {
        std::mem::take(&mut self.events)
    }

    fn get_coin_term(&self, id: CoinTermId) -> Result<&CoinTerm, ModelError> {
        self.coin_terms.get(&id).ok_or(ModelError::UnknownCoinTerm(id))
    }

    fn get_coin_term_mut(&mut self, id: CoinTermId) -> Result<&mut CoinTerm, ModelError> {
        self.coin_terms.get_mut(&id).ok_or(ModelError::UnknownCoinTerm(id))
    }

    fn get_expression(&self, id: ExpressionId) -> Result<&Expression, ModelError> {
        self.expressions.get(&id).ok_or(ModelError::UnknownExpression(id))
    }

    fn get_expression_mut(&mut self, id: ExpressionId) -> Result<&mut Expression, ModelError> {
        self.expressions.get_mut(&id).ok_or(ModelError::UnknownExpression(id))
    }

    /// Creates a coin term with the model's factory and adds it.
    pub fn create_coin_term(&mut self, kind: MonomialType, options: CoinTermOptions) -> CoinTermId {
        let coin_term = self.factory.create(kind, options);
        self.add_coin_term(coin_term)
    }

    /// Adds a coin term created by [`factory_mut`](Self::factory_mut).
    ///
    /// # Panics
    ///
    /// Panics if a coin term with the same id is already in the model.
    pub fn add_coin_term(&mut self, coin_term: CoinTerm) -> CoinTermId {
        let id = coin_term.id();
        assert!(!self.coin_terms.contains_key(&id), "{} was added twice", id);
        trace!("added {} ({} of {})", id, coin_term.total_count(), coin_term.kind());
        self.coin_terms.insert(id, coin_term);
        self.events.push(ModelEvent::CoinTermAdded(id));
        id
    }

    /// Removes a coin term from the model and from anything that refers to it. An expression
    /// left with a single member is dissolved.
    pub fn remove_coin_term(&mut self, id: CoinTermId) -> Result<CoinTerm, ModelError> {
        let coin_term = self.coin_terms.remove(&id).ok_or(ModelError::UnknownCoinTerm(id))?;

        for expression in self.expressions.values_mut() {
            expression.forget_coin_term(id);
        }
        if let Some(expression_id) = coin_term.expression() {
            if self.expressions.get(&expression_id).is_some_and(|expression| expression.len() < 2) {
                self.dissolve_expression(expression_id)?;
            }
        }

        self.remove_hints_involving(id);
        self.pending_absorptions.retain(|&(moving, target)| moving != id && target != id);
        for (index, area) in self.collection_areas.iter_mut().enumerate() {
            if area.collected_item() == Some(CollectedItem::CoinTerm(id)) {
                area.eject_collected_item();
                self.events.push(ModelEvent::Ejected { area: index, item: CollectedItem::CoinTerm(id) });
            }
        }

        self.events.push(ModelEvent::CoinTermRemoved(id));
        debug!("removed {}", id);
        Ok(coin_term)
    }

    /// Removes an expression, releasing its members where they stand. Returns the members from
    /// left to right.
    fn dissolve_expression(&mut self, id: ExpressionId) -> Result<Vec<CoinTermId>, ModelError> {
        let mut expression = self.expressions.remove(&id).ok_or(ModelError::UnknownExpression(id))?;
        let members = expression.remove_all_coin_terms(&mut self.coin_terms)?;

        if self.expression_being_edited == Some(id) {
            self.expression_being_edited = None;
            self.events.push(ModelEvent::EditModeChanged(None));
        }
        for (index, area) in self.collection_areas.iter_mut().enumerate() {
            if area.collected_item() == Some(CollectedItem::Expression(id)) {
                area.eject_collected_item();
                self.events.push(ModelEvent::Ejected { area: index, item: CollectedItem::Expression(id) });
            }
        }

        self.events.push(ModelEvent::ExpressionRemoved(id));
        debug!("dissolved {} into {:?}", id, members);
        Ok(members)
    }

    /// Starts or ends a drag of a coin term.
    ///
    /// Picking up a member of the expression in edit mode pulls it out of the expression.
    /// Picking up a collected coin term takes it out of its collection area. Letting go decides
    /// what the coin term combines with, and returns that decision; picking up returns
    /// [`None`].
    pub fn set_coin_term_user_controlled(
        &mut self,
        id: CoinTermId,
        controlled: bool,
    ) -> Result<Option<ReleaseOutcome>, ModelError> {
        let coin_term = self.get_coin_term(id)?;
        let was_controlled = coin_term.is_user_controlled();
        let expression = coin_term.expression();

        if !controlled {
            return if was_controlled {
                self.release_coin_term(id).map(Some)
            } else {
                Ok(None)
            };
        }

        if let Some(expression) = expression {
            if self.expression_being_edited == Some(expression) {
                self.pull_coin_term_from_expression(id)?;
                return Ok(None);
            }
            return Err(ModelError::InExpression { coin_term: id, expression });
        }

        if self.expression_being_edited.is_some() {
            self.exit_edit_mode();
        }
        self.uncollect(CollectedItem::CoinTerm(id))?;
        self.pending_absorptions.retain(|&(moving, _)| moving != id);
        self.get_coin_term_mut(id)?.set_user_controlled(true);
        trace!("grabbed {}", id);
        Ok(None)
    }

    /// Moves a free coin term while it is dragged.
    pub fn set_coin_term_position(&mut self, id: CoinTermId, position: Vector2) -> Result<(), ModelError> {
        let coin_term = self.get_coin_term_mut(id)?;
        if let Some(expression) = coin_term.expression() {
            return Err(ModelError::InExpression { coin_term: id, expression });
        }
        coin_term.set_position_and_destination(position);
        Ok(())
    }

    /// Sets the unscaled bounds of a coin term relative to its position, as measured by its
    /// visual representation. An expression containing it is laid out again on the next step.
    pub fn set_coin_term_local_bounds(&mut self, id: CoinTermId, bounds: Bounds2) -> Result<(), ModelError> {
        let coin_term = self.get_coin_term_mut(id)?;
        coin_term.set_local_bounds(bounds);
        if let Some(expression) = coin_term.expression() {
            self.get_expression_mut(expression)?.mark_layout_dirty();
        }
        Ok(())
    }

    /// Starts or ends a drag of an expression. Letting go decides what the expression combines
    /// with, and returns that decision; picking up returns [`None`].
    pub fn set_expression_user_controlled(
        &mut self,
        id: ExpressionId,
        controlled: bool,
    ) -> Result<Option<ReleaseOutcome>, ModelError> {
        let was_controlled = self.get_expression(id)?.is_user_controlled();

        if !controlled {
            return if was_controlled {
                self.release_expression(id).map(Some)
            } else {
                Ok(None)
            };
        }

        if self.expression_being_edited.is_some_and(|edited| edited != id) {
            self.exit_edit_mode();
        }
        self.uncollect(CollectedItem::Expression(id))?;
        let expression = self.expressions.get_mut(&id).ok_or(ModelError::UnknownExpression(id))?;
        expression.set_user_controlled(true, &mut self.coin_terms)?;
        trace!("grabbed {}", id);
        Ok(None)
    }

    /// Moves an expression and its members while it is dragged.
    pub fn set_expression_position(&mut self, id: ExpressionId, upper_left: Vector2) -> Result<(), ModelError> {
        let expression = self.expressions.get_mut(&id).ok_or(ModelError::UnknownExpression(id))?;
        expression.set_position_and_destination(upper_left, &mut self.coin_terms)
    }

    /// Splits a free coin term into one coin term per unit.
    ///
    /// The original keeps the first unit. The others spread out to alternating sides of it,
    /// staying inside the retrieval bounds. Returns the new coin terms.
    pub fn break_apart_coin_term(&mut self, id: CoinTermId) -> Result<Vec<CoinTermId>, ModelError> {
        let coin_term = self.coin_terms.get_mut(&id).ok_or(ModelError::UnknownCoinTerm(id))?;
        if !coin_term.can_break_apart() {
            return Err(ModelError::CannotBreakApart(id));
        }

        let extracted = coin_term.extract_constituents(&mut self.factory);
        let origin = coin_term.position();
        let local = coin_term.local_bounds();
        let spacing = local.width() + self.options.break_apart_spacing;

        let mut ids = Vec::with_capacity(extracted.len());
        for (i, mut new) in extracted.into_iter().enumerate() {
            let distance = (i / 2 + 1) as f64 * spacing;
            let direction = if i % 2 == 0 { 1.0 } else { -1.0 };
            let mut destination = origin.plus_xy(direction * distance, 0.0);
            if let Some(retrieval) = self.retrieval_bounds {
                destination = retrieval.fit_point(&local, destination);
            }
            new.travel_to_destination(destination, &self.options);
            ids.push(self.add_coin_term(new));
        }

        debug!("broke {} apart into {:?}", id, ids);
        self.events.push(ModelEvent::CoinTermBrokenApart { original: id, extracted: ids.clone() });
        Ok(ids)
    }

    /// Removes an expression, leaving its members in place as free coin terms. Returns the
    /// members from left to right.
    pub fn break_apart_expression(&mut self, id: ExpressionId) -> Result<Vec<CoinTermId>, ModelError> {
        if self.get_expression(id)?.is_collected() {
            self.uncollect(CollectedItem::Expression(id))?;
        }
        self.dissolve_expression(id)
    }

    /// Puts an expression in edit mode, in which its members can be pulled out individually.
    /// Any other expression leaves edit mode.
    pub fn enter_edit_mode(&mut self, id: ExpressionId) -> Result<(), ModelError> {
        self.get_expression(id)?;
        if self.expression_being_edited == Some(id) {
            return Ok(());
        }

        self.exit_edit_mode();
        self.get_expression_mut(id)?.set_in_edit_mode(true);
        self.expression_being_edited = Some(id);
        self.events.push(ModelEvent::EditModeChanged(Some(id)));
        debug!("editing {}", id);
        Ok(())
    }

    /// Takes the expression in edit mode, if any, out of edit mode.
    pub fn exit_edit_mode(&mut self) {
        if let Some(id) = self.expression_being_edited.take() {
            if let Some(expression) = self.expressions.get_mut(&id) {
                expression.set_in_edit_mode(false);
            }
            self.events.push(ModelEvent::EditModeChanged(None));
        }
    }

    /// Pulls a coin term out of the expression in edit mode and starts dragging it. If fewer
    /// than two members remain, the expression is dissolved.
    pub fn pull_coin_term_from_expression(&mut self, id: CoinTermId) -> Result<(), ModelError> {
        let expression_id = self.get_coin_term(id)?.expression().ok_or(ModelError::FreeCoinTerm(id))?;
        let expression = self
            .expressions
            .get_mut(&expression_id)
            .ok_or(ModelError::UnknownExpression(expression_id))?;
        if !expression.is_in_edit_mode() {
            return Err(ModelError::NotInEditMode(expression_id));
        }

        expression.remove_coin_term(id, &mut self.coin_terms)?;
        let remaining = expression.len();
        self.get_coin_term_mut(id)?.set_user_controlled(true);
        debug!("pulled {} out of {}", id, expression_id);

        if remaining < 2 {
            self.dissolve_expression(expression_id)?;
        }
        Ok(())
    }

    /// Adds a collection area, returning its index.
    pub fn add_collection_area(&mut self, area: CollectionArea) -> usize {
        self.collection_areas.push(area);
        self.collection_areas.len() - 1
    }

    /// Releases whatever the collection area holds, pushing it out of the area. Returns the
    /// released item.
    pub fn eject_from_collection_area(&mut self, index: usize) -> Result<Option<CollectedItem>, ModelError> {
        let area = self
            .collection_areas
            .get(index)
            .ok_or(ModelError::UnknownCollectionArea(index))?;
        let Some(item) = area.collected_item() else {
            return Ok(None);
        };

        self.uncollect(item)?;
        let area = &self.collection_areas[index];
        match item {
            CollectedItem::CoinTerm(id) => {
                let coin_term = self.coin_terms.get_mut(&id).ok_or(ModelError::UnknownCoinTerm(id))?;
                let destination = coin_term.position() + area.push_away_offset(&coin_term.bounds());
                coin_term.travel_to_destination(destination, &self.options);
            },
            CollectedItem::Expression(id) => {
                let expression = self.expressions.get_mut(&id).ok_or(ModelError::UnknownExpression(id))?;
                let destination = expression.upper_left() + area.push_away_offset(&expression.bounds());
                expression.travel_to_destination(destination);
            },
        }
        Ok(Some(item))
    }

    /// Takes the item out of the collection area holding it, if any, and restores it to a
    /// regular, full-size item.
    fn uncollect(&mut self, item: CollectedItem) -> Result<(), ModelError> {
        let Some(index) = self
            .collection_areas
            .iter()
            .position(|area| area.collected_item() == Some(item))
        else {
            return Ok(());
        };

        self.collection_areas[index].eject_collected_item();
        match item {
            CollectedItem::CoinTerm(id) => self.get_coin_term_mut(id)?.set_collected(false),
            CollectedItem::Expression(id) => {
                let expression = self.expressions.get_mut(&id).ok_or(ModelError::UnknownExpression(id))?;
                expression.set_collected(false, &mut self.coin_terms)?;
                expression.set_scale(1.0, &mut self.coin_terms)?;
            },
        }
        self.events.push(ModelEvent::Ejected { area: index, item });
        debug!("ejected {:?} from collection area {}", item, index);
        Ok(())
    }

    /// Advances the model by `dt` seconds.
    ///
    /// Coin terms move and fade first, and fully faded coin terms are removed. Then hover state
    /// is recomputed for everything being dragged, expressions move and lay themselves out, and
    /// finally coin terms that arrived at their destinations are handled.
    pub fn step(&mut self, dt: f64) -> Result<(), ModelError> {
        for coin_term in self.coin_terms.values_mut() {
            coin_term.step(dt, &self.options);
        }

        let faded = self
            .coin_terms
            .values()
            .filter(|coin_term| coin_term.existence_strength() <= 0.0)
            .map(CoinTerm::id)
            .collect::<Vec<_>>();
        for id in faded {
            debug!("{} faded away", id);
            self.remove_coin_term(id)?;
        }

        self.update_hover_state()?;

        for expression in self.expressions.values_mut() {
            expression.step(dt, &mut self.coin_terms)?;
            expression.take_destination_reached();
            if expression.take_layout_changed() {
                self.events.push(ModelEvent::ExpressionLayoutChanged(expression.id()));
            }
        }

        self.process_arrivals()
    }

    /// Handles coin terms that reached their destinations: pending absorptions complete, and
    /// coin terms that returned to their creator card are removed.
    fn process_arrivals(&mut self) -> Result<(), ModelError> {
        let arrived = self
            .coin_terms
            .values_mut()
            .filter_map(|coin_term| coin_term.take_destination_reached().then(|| coin_term.id()))
            .collect::<Vec<_>>();

        for id in arrived {
            if let Some(index) = self.pending_absorptions.iter().position(|&(moving, _)| moving == id) {
                let (_, target) = self.pending_absorptions.remove(index);
                self.complete_absorption(id, target)?;
                continue;
            }

            let Some(coin_term) = self.coin_terms.get_mut(&id) else {
                continue;
            };
            if coin_term.finish_return_to_origin() && coin_term.initially_on_card() {
                self.remove_coin_term(id)?;
                self.events.push(ModelEvent::ReturnedToOrigin(id));
            }
        }
        Ok(())
    }

    /// Merges the `moving` coin term into the `target`, if they can still combine.
    fn complete_absorption(&mut self, moving: CoinTermId, target: CoinTermId) -> Result<(), ModelError> {
        let eligible = match (self.coin_terms.get(&moving), self.coin_terms.get(&target)) {
            (Some(moving), Some(target)) => {
                target.expression().is_none() && moving.is_eligible_to_combine_with(target)
            },
            _ => false,
        };
        if !eligible {
            debug!("{} arrived, but can no longer combine with {}", moving, target);
            return Ok(());
        }

        let absorbed = self.remove_coin_term(moving)?;
        let partial_cancellation = self.options.partial_cancellation;
        self.get_coin_term_mut(target)?.absorb(&absorbed, partial_cancellation);
        self.events.push(ModelEvent::CoinTermsCombined { survivor: target, absorbed: moving });
        debug!("{} absorbed {}", target, moving);
        Ok(())
    }

    /// Removes every coin term, expression, and hint, and empties every collection area.
    pub fn clear(&mut self) {
        self.exit_edit_mode();
        for expression in std::mem::take(&mut self.expressions).into_keys() {
            self.events.push(ModelEvent::ExpressionRemoved(expression));
        }
        for hint in std::mem::take(&mut self.hints) {
            self.events.push(ModelEvent::HintRemoved(hint));
        }
        for coin_term in std::mem::take(&mut self.coin_terms).into_keys() {
            self.events.push(ModelEvent::CoinTermRemoved(coin_term));
        }
        for (index, area) in self.collection_areas.iter_mut().enumerate() {
            if let Some(item) = area.eject_collected_item() {
                self.events.push(ModelEvent::Ejected { area: index, item });
            }
        }
        self.pending_absorptions.clear();
        info!("cleared the model");
    }
}
