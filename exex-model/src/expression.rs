//! Expressions: horizontal rows of coin terms that are summed together.

use crate::{
    animation::{Animation, Motion, MotionStep},
    coin_term::{CoinTerm, CoinTermId},
    error::ModelError,
    geom::{Bounds2, Vector2},
    options::ModelOptions,
};
use exex_parser::MonomialType;
use log::{debug, trace};
use std::{collections::BTreeMap, fmt::{self, Display, Formatter}};

/// The coin terms of a model, keyed by id.
pub type CoinTermStore = BTreeMap<CoinTermId, CoinTerm>;

/// Uniquely identifies an [`Expression`] within a model.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ExpressionId(pub(crate) u32);

impl Display for ExpressionId {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "expression #{}", self.0)
    }
}

/// The end of an expression a new member is added to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Side {
    Left,
    Right,
}

fn member(store: &CoinTermStore, id: CoinTermId) -> Result<&CoinTerm, ModelError> {
    store.get(&id).ok_or(ModelError::UnknownCoinTerm(id))
}

fn member_mut(store: &mut CoinTermStore, id: CoinTermId) -> Result<&mut CoinTerm, ModelError> {
    store.get_mut(&id).ok_or(ModelError::UnknownCoinTerm(id))
}

/// Restores a coin term leaving an expression to a free coin term.
fn detach(coin_term: &mut CoinTerm) {
    coin_term.set_expression(None);
    coin_term.set_break_apart_allowed(true);
    coin_term.set_show_minus_sign_when_negative(true);
    coin_term.set_collected(false);
    coin_term.set_scale(1.0);
}

/// An ordered row of coin terms inside a bounding box.
///
/// The expression owns its membership list; its members only refer back to it by
/// [`ExpressionId`]. Every operation that touches members takes the [`CoinTermStore`] they live
/// in.
#[derive(Clone, Debug, PartialEq)]
pub struct Expression {
    id: ExpressionId,
    coin_terms: Vec<CoinTermId>,
    upper_left: Vector2,
    destination: Vector2,
    motion: Motion,
    destination_reached: bool,
    width: f64,
    height: f64,
    left_hint_active: bool,
    left_hint_width: f64,
    right_hint_active: bool,
    right_hint_width: f64,
    combine_halo_active: bool,
    collected: bool,
    user_controlled: bool,
    in_edit_mode: bool,
    scale: f64,
    simplify_negatives: bool,
    layout_dirty: bool,
    layout_changed: bool,
    hovering_coin_terms: Vec<CoinTermId>,
    hovering_expressions: Vec<ExpressionId>,
    options: ModelOptions,
}

impl Expression {
    /// Creates an expression out of two free coin terms. The `anchor` stays where it is, and
    /// the `floating` coin term travels into place beside it.
    pub fn new(
        id: ExpressionId,
        anchor: CoinTermId,
        floating: CoinTermId,
        store: &mut CoinTermStore,
        options: ModelOptions,
    ) -> Result<Self, ModelError> {
        let mut expression = Self {
            id,
            coin_terms: Vec::new(),
            upper_left: Vector2::ZERO,
            destination: Vector2::ZERO,
            motion: Motion::Idle,
            destination_reached: false,
            width: 0.0,
            height: 0.0,
            left_hint_active: false,
            left_hint_width: 0.0,
            right_hint_active: false,
            right_hint_width: 0.0,
            combine_halo_active: false,
            collected: false,
            user_controlled: false,
            in_edit_mode: false,
            scale: 1.0,
            simplify_negatives: options.simplify_negatives,
            layout_dirty: false,
            layout_changed: false,
            hovering_coin_terms: Vec::new(),
            hovering_expressions: Vec::new(),
            options,
        };
        expression.add_coin_term(anchor, store)?;
        expression.add_coin_term(floating, store)?;
        Ok(expression)
    }

    pub fn id(&self) -> ExpressionId {
        self.id
    }

    /// The members of the expression, from left to right.
    pub fn coin_terms(&self) -> &[CoinTermId] {
        &self.coin_terms
    }

    pub fn contains(&self, id: CoinTermId) -> bool {
        self.coin_terms.contains(&id)
    }

    pub fn len(&self) -> usize {
        self.coin_terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.coin_terms.is_empty()
    }

    pub fn upper_left(&self) -> Vector2 {
        self.upper_left
    }

    pub fn destination(&self) -> Vector2 {
        self.destination
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    pub fn bounds(&self) -> Bounds2 {
        Bounds2::from_corner(self.upper_left, self.width, self.height)
    }

    pub fn scale(&self) -> f64 {
        self.scale
    }

    pub fn is_animating(&self) -> bool {
        self.motion.is_animating()
    }

    pub fn is_user_controlled(&self) -> bool {
        self.user_controlled
    }

    pub fn is_collected(&self) -> bool {
        self.collected
    }

    pub fn is_in_edit_mode(&self) -> bool {
        self.in_edit_mode
    }

    pub fn left_hint_active(&self) -> bool {
        self.left_hint_active
    }

    pub fn left_hint_width(&self) -> f64 {
        self.left_hint_width
    }

    pub fn right_hint_active(&self) -> bool {
        self.right_hint_active
    }

    pub fn right_hint_width(&self) -> f64 {
        self.right_hint_width
    }

    /// Returns true while another expression hovers over this one closely enough to merge.
    pub fn combine_halo_active(&self) -> bool {
        self.combine_halo_active
    }

    pub fn simplify_negatives(&self) -> bool {
        self.simplify_negatives
    }

    pub fn layout_dirty(&self) -> bool {
        self.layout_dirty
    }

    pub fn hovering_coin_terms(&self) -> &[CoinTermId] {
        &self.hovering_coin_terms
    }

    pub fn hovering_expressions(&self) -> &[ExpressionId] {
        &self.hovering_expressions
    }

    /// Returns true, once, after the layout changed.
    pub fn take_layout_changed(&mut self) -> bool {
        std::mem::replace(&mut self.layout_changed, false)
    }

    /// Returns true, once, after the expression arrives at its destination.
    pub fn take_destination_reached(&mut self) -> bool {
        std::mem::replace(&mut self.destination_reached, false)
    }

    /// The region a free coin term must overlap to join this expression: its bounds, widened on
    /// both sides by its height.
    pub fn join_zone(&self) -> Bounds2 {
        self.bounds().dilated_x(self.height)
    }

    /// The area in which the coin term overlaps the join zone.
    pub fn coin_term_join_zone_overlap(&self, coin_term: &CoinTerm) -> f64 {
        self.join_zone().intersection_area(&coin_term.bounds())
    }

    /// The area in which the two expressions overlap.
    pub fn overlap(&self, other: &Expression) -> f64 {
        self.bounds().intersection_area(&other.bounds())
    }

    /// The summed count of each monomial type among the members.
    pub fn total_counts(&self, store: &CoinTermStore) -> Vec<(MonomialType, i64)> {
        self.coin_terms
            .iter()
            .filter_map(|id| store.get(id))
            .map(|coin_term| (coin_term.kind(), coin_term.total_count()))
            .collect()
    }

    /// Adds a free coin term at whichever end of the expression it is closer to.
    pub fn add_coin_term(
        &mut self,
        id: CoinTermId,
        store: &mut CoinTermStore,
    ) -> Result<(), ModelError> {
        let x = member(store, id)?.position().x;
        let side = if x > self.upper_left.x + self.width / 2.0 {
            Side::Right
        } else {
            Side::Left
        };
        self.add_coin_term_on_side(id, side, store)
    }

    /// Adds a free coin term at the given end of the expression.
    ///
    /// The bounds grow to make room, and the coin term travels into its slot. If the expression
    /// is being dragged or is travelling, the coin term jumps into its slot instead.
    pub fn add_coin_term_on_side(
        &mut self,
        id: CoinTermId,
        side: Side,
        store: &mut CoinTermStore,
    ) -> Result<(), ModelError> {
        let coin_term = member_mut(store, id)?;
        if let Some(expression) = coin_term.expression() {
            return Err(ModelError::InExpression { coin_term: id, expression });
        }

        let x_margin = self.options.x_margin * self.scale;
        let y_margin = self.options.y_margin * self.scale;
        let spacing = self.options.inter_coin_term_spacing * self.scale;

        coin_term.set_scale(self.scale);
        let local = coin_term.local_bounds();

        if self.coin_terms.is_empty() {
            let position = coin_term.destination();
            self.motion = Motion::Idle;
            self.upper_left = position.plus_xy(local.min_x - x_margin, local.min_y - y_margin);
            self.destination = self.upper_left;
            self.width = local.width() + 2.0 * x_margin;
            self.height = local.height() + 2.0 * y_margin;
            self.coin_terms.push(id);
        } else {
            let center_y = self.upper_left.y + self.height / 2.0;
            let growth = local.width() + spacing;
            let slot_x = match side {
                Side::Right => {
                    self.coin_terms.push(id);
                    self.upper_left.x + self.width - x_margin + spacing - local.min_x
                },
                Side::Left => {
                    self.coin_terms.insert(0, id);
                    self.shift_frame(Vector2::new(-growth, 0.0));
                    self.upper_left.x + x_margin - local.min_x
                },
            };
            self.width += growth;

            let height = self.height.max(local.height() + 2.0 * y_margin);
            self.shift_frame(Vector2::new(0.0, (self.height - height) / 2.0));
            self.height = height;

            let slot = Vector2::new(slot_x, center_y - local.center_y());
            if self.user_controlled || self.motion.is_animating() {
                coin_term.set_position_and_destination(slot);
            } else {
                coin_term.travel_to_destination(slot, &self.options);
            }
        }

        coin_term.set_expression(Some(self.id));
        coin_term.set_break_apart_allowed(false);
        coin_term.set_collected(self.collected);
        self.hovering_coin_terms.retain(|&hovering| hovering != id);
        self.layout_dirty = true;
        self.layout_changed = true;
        debug!("{} joined {} on the {:?}", id, self.id, side);
        Ok(())
    }

    /// Removes a member, which becomes a free coin term where it stands. The remaining members
    /// close the gap.
    pub fn remove_coin_term(
        &mut self,
        id: CoinTermId,
        store: &mut CoinTermStore,
    ) -> Result<(), ModelError> {
        let index = self
            .coin_terms
            .iter()
            .position(|&existing| existing == id)
            .ok_or(ModelError::NotAMember { coin_term: id, expression: self.id })?;
        self.coin_terms.remove(index);
        detach(member_mut(store, id)?);

        if !self.coin_terms.is_empty() {
            self.update_size_and_coin_term_positions(store, true)?;
        }
        self.layout_changed = true;
        debug!("{} left {}", id, self.id);
        Ok(())
    }

    /// Removes every member, returning them from left to right.
    pub fn remove_all_coin_terms(
        &mut self,
        store: &mut CoinTermStore,
    ) -> Result<Vec<CoinTermId>, ModelError> {
        let mut members = self
            .coin_terms
            .iter()
            .map(|&id| member(store, id).map(|coin_term| (id, coin_term.position().x)))
            .collect::<Result<Vec<_>, _>>()?;
        members.sort_by(|a, b| a.1.total_cmp(&b.1));

        let members = members.into_iter().map(|(id, _)| id).collect::<Vec<_>>();
        for &id in &members {
            detach(member_mut(store, id)?);
        }
        self.coin_terms.clear();
        self.layout_changed = true;
        Ok(members)
    }

    /// Recomputes the size of the expression and the slot of every member.
    ///
    /// Members are laid out outward from the middle member, which stays put, so a change in one
    /// member's size moves the others as little as possible. The vertical center of the
    /// expression never moves.
    pub fn update_size_and_coin_term_positions(
        &mut self,
        store: &mut CoinTermStore,
        animate: bool,
    ) -> Result<(), ModelError> {
        if self.coin_terms.is_empty() {
            self.layout_dirty = false;
            return Ok(());
        }

        let mut members = self
            .coin_terms
            .iter()
            .map(|&id| {
                member(store, id)
                    .map(|coin_term| (id, coin_term.destination(), coin_term.local_bounds()))
            })
            .collect::<Result<Vec<_>, _>>()?;
        members.sort_by(|a, b| a.1.x.total_cmp(&b.1.x));
        self.coin_terms = members.iter().map(|(id, _, _)| *id).collect();

        let x_margin = self.options.x_margin * self.scale;
        let y_margin = self.options.y_margin * self.scale;
        let spacing = self.options.inter_coin_term_spacing * self.scale;

        let count = members.len();
        let pivot = (count - 1) / 2;
        let mut slots_x = vec![0.0; count];
        slots_x[pivot] = members[pivot].1.x;
        for i in pivot + 1..count {
            slots_x[i] = slots_x[i - 1] + members[i - 1].2.max_x + spacing - members[i].2.min_x;
        }
        for i in (0..pivot).rev() {
            slots_x[i] = slots_x[i + 1] + members[i + 1].2.min_x - spacing - members[i].2.max_x;
        }

        let center_y = self.upper_left.y + self.height / 2.0;
        let tallest = members.iter().map(|(_, _, local)| local.height()).fold(0.0, f64::max);
        let width = members.iter().map(|(_, _, local)| local.width()).sum::<f64>()
            + spacing * (count - 1) as f64
            + 2.0 * x_margin;
        let height = tallest + 2.0 * y_margin;

        let upper_left = Vector2::new(
            slots_x[0] + members[0].2.min_x - x_margin,
            center_y - height / 2.0,
        );
        self.shift_frame(upper_left - self.upper_left);
        self.width = width;
        self.height = height;

        let animate = animate && !self.user_controlled && !self.motion.is_animating();
        for (i, (id, destination, local)) in members.iter().enumerate() {
            let slot = Vector2::new(slots_x[i], center_y - local.center_y());
            let coin_term = member_mut(store, *id)?;
            if slot != *destination {
                if animate {
                    coin_term.travel_to_destination(slot, &self.options);
                } else {
                    coin_term.set_position_and_destination(slot);
                }
            }
            coin_term.set_show_minus_sign_when_negative(i == 0 || !self.simplify_negatives);
        }

        self.layout_dirty = false;
        self.layout_changed = true;
        trace!("laid out {}: {} x {}", self.id, self.width, self.height);
        Ok(())
    }

    /// Requests a layout recomputation on the next step.
    pub fn mark_layout_dirty(&mut self) {
        self.layout_dirty = true;
    }

    /// Moves the bounding box and any journey in progress, without moving the members.
    fn shift_frame(&mut self, offset: Vector2) {
        self.upper_left += offset;
        self.destination += offset;
        self.motion.shift(offset);
    }

    fn translate_members(
        &mut self,
        offset: Vector2,
        store: &mut CoinTermStore,
    ) -> Result<(), ModelError> {
        for &id in &self.coin_terms {
            member_mut(store, id)?.translate(offset);
        }
        Ok(())
    }

    fn move_frame_to(
        &mut self,
        upper_left: Vector2,
        store: &mut CoinTermStore,
    ) -> Result<(), ModelError> {
        let offset = upper_left - self.upper_left;
        self.upper_left = upper_left;
        self.translate_members(offset, store)
    }

    /// Moves the expression and its members immediately, stopping any journey in progress.
    pub fn set_position_and_destination(
        &mut self,
        upper_left: Vector2,
        store: &mut CoinTermStore,
    ) -> Result<(), ModelError> {
        self.motion = Motion::Idle;
        self.destination = upper_left;
        self.move_frame_to(upper_left, store)
    }

    /// Starts travelling so that the upper-left corner ends up at `upper_left`.
    pub fn travel_to_destination(&mut self, upper_left: Vector2) {
        self.destination = upper_left;
        match Animation::new(self.upper_left, upper_left, &self.options) {
            Some(animation) => self.motion = Motion::Animating(animation),
            None => {
                self.motion = Motion::Idle;
                self.destination_reached = true;
            },
        }
    }

    /// Stops any journey in progress by jumping straight to its destination.
    pub fn cancel_motion(&mut self, store: &mut CoinTermStore) -> Result<(), ModelError> {
        if self.motion.is_animating() {
            self.motion = Motion::Idle;
            self.move_frame_to(self.destination, store)?;
        }
        Ok(())
    }

    /// Scales the expression and its members, laying it out again immediately.
    pub fn set_scale(&mut self, scale: f64, store: &mut CoinTermStore) -> Result<(), ModelError> {
        if scale == self.scale {
            return Ok(());
        }

        for &id in &self.coin_terms {
            member_mut(store, id)?.set_scale(scale);
        }
        self.scale = scale;
        self.update_size_and_coin_term_positions(store, false)
    }

    pub fn set_user_controlled(
        &mut self,
        controlled: bool,
        store: &mut CoinTermStore,
    ) -> Result<(), ModelError> {
        self.user_controlled = controlled;
        if controlled {
            self.cancel_motion(store)?;
            for &id in &self.coin_terms {
                member_mut(store, id)?.cancel_motion();
            }
        }
        Ok(())
    }

    pub fn set_collected(
        &mut self,
        collected: bool,
        store: &mut CoinTermStore,
    ) -> Result<(), ModelError> {
        self.collected = collected;
        for &id in &self.coin_terms {
            member_mut(store, id)?.set_collected(collected);
        }
        Ok(())
    }

    pub fn set_in_edit_mode(&mut self, in_edit_mode: bool) {
        self.in_edit_mode = in_edit_mode;
    }

    pub fn set_simplify_negatives(&mut self, simplify: bool) {
        if simplify != self.simplify_negatives {
            self.simplify_negatives = simplify;
            self.layout_dirty = true;
        }
    }

    pub fn set_options(&mut self, options: ModelOptions) {
        self.options = options;
        self.set_simplify_negatives(options.simplify_negatives);
        self.layout_dirty = true;
    }

    /// Forgets everything hovering over this expression. Called before the hover state is
    /// computed for a new frame.
    pub fn clear_hovering(&mut self) {
        self.hovering_coin_terms.clear();
        self.hovering_expressions.clear();
    }

    /// Records a free coin term that would join this expression if released now.
    pub fn add_hovering_coin_term(&mut self, id: CoinTermId) {
        if !self.hovering_coin_terms.contains(&id) {
            self.hovering_coin_terms.push(id);
        }
    }

    /// Records an expression that would merge into this one if released now.
    pub fn add_hovering_expression(&mut self, id: ExpressionId) {
        if !self.hovering_expressions.contains(&id) {
            self.hovering_expressions.push(id);
        }
    }

    /// Forgets a coin term that is leaving the model.
    pub(crate) fn forget_coin_term(&mut self, id: CoinTermId) {
        self.coin_terms.retain(|&member| member != id);
        self.hovering_coin_terms.retain(|&hovering| hovering != id);
        self.layout_dirty = true;
    }

    /// Recomputes the hints and halo from what is hovering over the expression.
    pub fn refresh_hints(&mut self, store: &CoinTermStore) {
        let center_x = self.bounds().center_x();
        let spacing = self.options.inter_coin_term_spacing * self.scale;

        let (mut left, mut right) = (None::<f64>, None::<f64>);
        let hovering = self.hovering_coin_terms.iter().filter_map(|id| store.get(id));
        for bounds in hovering.map(CoinTerm::bounds) {
            let width = bounds.width() + spacing;
            let side = if bounds.center_x() > center_x { &mut right } else { &mut left };
            *side = Some(side.map_or(width, |existing| existing.max(width)));
        }

        self.left_hint_active = left.is_some();
        self.left_hint_width = left.unwrap_or(0.0);
        self.right_hint_active = right.is_some();
        self.right_hint_width = right.unwrap_or(0.0);
        self.combine_halo_active = !self.hovering_expressions.is_empty();
    }

    /// Advances the journey, applies a pending layout, and refreshes the hints.
    pub fn step(&mut self, dt: f64, store: &mut CoinTermStore) -> Result<(), ModelError> {
        match self.motion.step(dt) {
            MotionStep::Idle => (),
            MotionStep::Moved(upper_left) => self.move_frame_to(upper_left, store)?,
            MotionStep::Arrived(upper_left) => {
                self.move_frame_to(upper_left, store)?;
                self.destination_reached = true;
            },
        }

        if self.layout_dirty {
            self.update_size_and_coin_term_positions(store, true)?;
        }
        self.refresh_hints(store);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use assert_float_eq::{
        afe_abs,
        afe_is_absolute_eq,
        afe_absolute_error_msg,
        assert_float_absolute_eq,
    };
    use crate::coin_term::{CoinTermFactory, CoinTermOptions};
    use pretty_assertions::assert_eq;
    use super::*;

    fn place(
        store: &mut CoinTermStore,
        factory: &mut CoinTermFactory,
        kind: MonomialType,
        x: f64,
        y: f64,
    ) -> CoinTermId {
        let coin_term = factory.create(kind, CoinTermOptions::default().initial_position(x, y));
        let id = coin_term.id();
        store.insert(id, coin_term);
        id
    }

    /// An `x` at `(100, 100)` anchoring a constant released at `(300, 100)`.
    fn two_members() -> (CoinTermStore, CoinTermFactory, Expression, CoinTermId, CoinTermId) {
        let mut store = CoinTermStore::new();
        let mut factory = CoinTermFactory::default();
        let x = place(&mut store, &mut factory, MonomialType::X, 100.0, 100.0);
        let one = place(&mut store, &mut factory, MonomialType::Constant, 300.0, 100.0);
        let expression = Expression::new(ExpressionId(0), x, one, &mut store, ModelOptions::default()).unwrap();
        (store, factory, expression, x, one)
    }

    fn snapshot(expression: &Expression, store: &CoinTermStore) -> (f64, f64, Vec<Vector2>) {
        let positions = expression
            .coin_terms()
            .iter()
            .map(|id| store[id].destination())
            .collect();
        (expression.width(), expression.height(), positions)
    }

    #[test]
    fn new_expression_bounds() {
        let (store, _, expression, x, one) = two_members();
        assert_eq!(expression.coin_terms(), &[x, one]);
        assert_eq!(expression.upper_left(), Vector2::new(50.0, 52.0));
        assert_float_absolute_eq!(expression.width(), 194.0);
        assert_float_absolute_eq!(expression.height(), 96.0);

        assert_eq!(store[&x].position(), Vector2::new(100.0, 100.0));
        assert_eq!(store[&one].destination(), Vector2::new(198.0, 100.0));
        assert!(store[&one].is_animating());
        assert_eq!(store[&one].expression(), Some(ExpressionId(0)));
        assert!(!store[&one].break_apart_allowed());
    }

    #[test]
    fn layout_is_idempotent() {
        let (mut store, _, mut expression, _, _) = two_members();
        expression.update_size_and_coin_term_positions(&mut store, false).unwrap();
        let first = snapshot(&expression, &store);
        let upper_left = expression.upper_left();

        expression.update_size_and_coin_term_positions(&mut store, false).unwrap();
        assert_eq!(snapshot(&expression, &store), first);
        assert_eq!(expression.upper_left(), upper_left);
    }

    #[test]
    fn add_on_the_left() {
        let (mut store, mut factory, mut expression, x, one) = two_members();
        let y = place(&mut store, &mut factory, MonomialType::Y, 0.0, 100.0);
        expression.add_coin_term(y, &mut store).unwrap();

        assert_eq!(expression.coin_terms(), &[y, x, one]);
        assert_eq!(store[&y].destination(), Vector2::new(-4.0, 100.0));
        assert_eq!(expression.upper_left(), Vector2::new(-56.0, 50.0));
        assert_float_absolute_eq!(expression.width(), 300.0);
        assert_float_absolute_eq!(expression.height(), 100.0);

        // the middle member stays put and the others already sit in their slots
        let before = snapshot(&expression, &store);
        expression.update_size_and_coin_term_positions(&mut store, false).unwrap();
        assert_eq!(snapshot(&expression, &store), before);
        assert_eq!(expression.upper_left(), Vector2::new(-56.0, 50.0));
    }

    #[test]
    fn member_grows_from_the_pivot() {
        let (mut store, mut factory, mut expression, x, one) = two_members();
        let y = place(&mut store, &mut factory, MonomialType::Y, 0.0, 100.0);
        expression.add_coin_term(y, &mut store).unwrap();
        expression.update_size_and_coin_term_positions(&mut store, false).unwrap();

        // the constant's representation widens by 20 units on each side
        store.get_mut(&one).unwrap().set_local_bounds(Bounds2::new(-52.0, -32.0, 52.0, 32.0));
        expression.update_size_and_coin_term_positions(&mut store, false).unwrap();
        assert_eq!(store[&x].destination(), Vector2::new(100.0, 100.0));
        assert_eq!(store[&y].destination(), Vector2::new(-4.0, 100.0));
        assert_eq!(store[&one].destination(), Vector2::new(218.0, 100.0));
        assert_float_absolute_eq!(expression.width(), 340.0);
    }

    #[test]
    fn remove_member() {
        let (mut store, mut factory, mut expression, x, one) = two_members();
        let y = place(&mut store, &mut factory, MonomialType::Y, 0.0, 100.0);
        expression.add_coin_term(y, &mut store).unwrap();
        expression.remove_coin_term(x, &mut store).unwrap();

        assert_eq!(expression.coin_terms(), &[y, one]);
        assert_eq!(store[&x].expression(), None);
        assert!(store[&x].break_apart_allowed());
        assert_eq!(
            expression.remove_coin_term(x, &mut store),
            Err(ModelError::NotAMember { coin_term: x, expression: expression.id() }),
        );
    }

    #[test]
    fn remove_all_left_to_right() {
        let (mut store, mut factory, mut expression, x, one) = two_members();
        let y = place(&mut store, &mut factory, MonomialType::Y, 0.0, 100.0);
        expression.add_coin_term(y, &mut store).unwrap();
        expression.cancel_motion(&mut store).unwrap();
        for coin_term in store.values_mut() {
            coin_term.cancel_motion();
        }

        assert_eq!(expression.remove_all_coin_terms(&mut store).unwrap(), vec![y, x, one]);
        assert!(expression.is_empty());
        assert!(store.values().all(|coin_term| coin_term.expression().is_none()));
    }

    #[test]
    fn join_zone_is_widened_by_height() {
        let (_, _, expression, _, _) = two_members();
        assert_eq!(expression.join_zone(), Bounds2::new(-46.0, 52.0, 340.0, 148.0));
    }

    #[test]
    fn hints_follow_hovering_side() {
        let (mut store, mut factory, mut expression, _, _) = two_members();
        let z = place(&mut store, &mut factory, MonomialType::Z, 300.0, 100.0);
        expression.add_hovering_coin_term(z);
        expression.refresh_hints(&store);

        assert!(expression.right_hint_active());
        assert!(!expression.left_hint_active());
        assert_float_absolute_eq!(expression.right_hint_width(), 110.0);

        expression.clear_hovering();
        expression.refresh_hints(&store);
        assert!(!expression.right_hint_active());
        assert_float_absolute_eq!(expression.right_hint_width(), 0.0);
    }

    #[test]
    fn travelling_moves_members() {
        let (mut store, _, mut expression, x, _) = two_members();
        expression.update_size_and_coin_term_positions(&mut store, false).unwrap();
        expression.travel_to_destination(Vector2::new(50.0, 252.0));
        expression.step(2.0, &mut store).unwrap();

        assert_eq!(expression.upper_left(), Vector2::new(50.0, 252.0));
        assert_eq!(store[&x].position(), Vector2::new(100.0, 300.0));
        assert!(expression.take_destination_reached());
    }

    #[test]
    fn scaling_shrinks_layout() {
        let (mut store, _, mut expression, _, _) = two_members();
        expression.update_size_and_coin_term_positions(&mut store, false).unwrap();
        expression.set_scale(0.5, &mut store).unwrap();
        assert_float_absolute_eq!(expression.width(), 97.0);
        assert_float_absolute_eq!(expression.height(), 48.0);
    }

    #[test]
    fn cannot_add_a_member_twice() {
        let (mut store, _, mut expression, x, _) = two_members();
        assert_eq!(
            expression.add_coin_term(x, &mut store),
            Err(ModelError::InExpression { coin_term: x, expression: expression.id() }),
        );
    }
}
