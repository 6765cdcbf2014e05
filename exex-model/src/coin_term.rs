//! Coin terms: the draggable stacks of like monomials that users combine.

use crate::{
    animation::{Animation, Motion, MotionStep},
    expression::ExpressionId,
    geom::{Bounds2, Vector2},
    options::ModelOptions,
};
use exex_parser::{MonomialType, VariableValues};
use log::trace;
use std::fmt::{self, Display, Formatter};

/// Uniquely identifies a [`CoinTerm`] within a model.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CoinTermId(pub(crate) u32);

impl Display for CoinTermId {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "coin term #{}", self.0)
    }
}

/// How to build a new [`CoinTerm`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CoinTermOptions {
    /// The signed number of units in the new coin term.
    ///
    /// The default value is `1`.
    pub initial_count: i64,

    /// Where the coin term starts, and where it returns to.
    ///
    /// The default value is `(0.0, 0.0)`.
    pub initial_position: Vector2,

    /// Whether the count is made of individual units that can be broken apart. If not, the
    /// whole count is a single indivisible unit.
    ///
    /// The default value is `true`.
    pub decomposable: bool,

    /// Whether the coin term starts out on a creator card. Such coin terms are destroyed when
    /// they return to their origin.
    ///
    /// The default value is `false`.
    pub initially_on_card: bool,
}

impl Default for CoinTermOptions {
    fn default() -> Self {
        Self {
            initial_count: 1,
            initial_position: Vector2::ZERO,
            decomposable: true,
            initially_on_card: false,
        }
    }
}

impl CoinTermOptions {
    /// Set the initial count. Returns an updated [`CoinTermOptions`] for chaining.
    pub fn initial_count(mut self, count: i64) -> Self {
        self.initial_count = count;
        self
    }

    /// Set the initial position. Returns an updated [`CoinTermOptions`] for chaining.
    pub fn initial_position(mut self, x: f64, y: f64) -> Self {
        self.initial_position = Vector2::new(x, y);
        self
    }

    /// Set whether the coin term can be broken apart. Returns an updated [`CoinTermOptions`]
    /// for chaining.
    pub fn decomposable(mut self, decomposable: bool) -> Self {
        self.decomposable = decomposable;
        self
    }

    /// Set whether the coin term starts out on a creator card. Returns an updated
    /// [`CoinTermOptions`] for chaining.
    pub fn initially_on_card(mut self, on_card: bool) -> Self {
        self.initially_on_card = on_card;
        self
    }
}

/// Creates coin terms with unique ids, and owns the variable values they are evaluated with.
#[derive(Clone, Debug, Default)]
pub struct CoinTermFactory {
    next_id: u32,
    values: VariableValues,
}

impl CoinTermFactory {
    /// Creates a factory that evaluates coin terms with the given variable values.
    pub fn new(values: VariableValues) -> Self {
        Self { next_id: 0, values }
    }

    /// Returns an id that has never been handed out by this factory.
    pub fn next_id(&mut self) -> CoinTermId {
        let id = CoinTermId(self.next_id);
        self.next_id += 1;
        id
    }

    /// Builds a coin term of the given type.
    pub fn create(&mut self, kind: MonomialType, options: CoinTermOptions) -> CoinTerm {
        CoinTerm::new(self.next_id(), kind, options)
    }

    /// The variable values coin terms are currently evaluated with.
    pub fn variable_values(&self) -> &VariableValues {
        &self.values
    }

    pub fn set_variable_values(&mut self, values: VariableValues) {
        self.values = values;
    }

    /// The current value of the coin term, using this factory's variable values.
    pub fn value_of(&self, coin_term: &CoinTerm) -> i64 {
        coin_term.value(&self.values)
    }
}

/// A stack of like monomials.
///
/// The [`composition`](CoinTerm::composition) lists the signed units that make up the stack,
/// and always sums to the [`total_count`](CoinTerm::total_count).
#[derive(Clone, Debug, PartialEq)]
pub struct CoinTerm {
    id: CoinTermId,
    kind: MonomialType,
    total_count: i64,
    composition: Vec<i64>,
    position: Vector2,
    destination: Vector2,
    motion: Motion,
    destination_reached: bool,
    user_controlled: bool,
    collected: bool,
    existence_strength: f64,
    expression: Option<ExpressionId>,
    initial_position: Vector2,
    initially_on_card: bool,
    card_opacity: f64,
    scale: f64,
    local_bounds: Bounds2,
    break_apart_allowed: bool,
    show_minus_sign_when_negative: bool,
    returning_to_origin: bool,
}

impl CoinTerm {
    /// Creates a coin term at its initial position. Its local bounds start out as the square
    /// around its coin.
    pub fn new(id: CoinTermId, kind: MonomialType, options: CoinTermOptions) -> Self {
        let count = options.initial_count;
        let composition = if options.decomposable {
            vec![count.signum(); count.unsigned_abs() as usize]
        } else {
            vec![count]
        };

        Self {
            id,
            kind,
            total_count: count,
            composition,
            position: options.initial_position,
            destination: options.initial_position,
            motion: Motion::Idle,
            destination_reached: false,
            user_controlled: false,
            collected: false,
            existence_strength: 1.0,
            expression: None,
            initial_position: options.initial_position,
            initially_on_card: options.initially_on_card,
            card_opacity: if options.initially_on_card { 1.0 } else { 0.0 },
            scale: 1.0,
            local_bounds: Bounds2::centered_square(kind.coin_radius()),
            break_apart_allowed: true,
            show_minus_sign_when_negative: true,
            returning_to_origin: false,
        }
    }

    pub fn id(&self) -> CoinTermId {
        self.id
    }

    pub fn kind(&self) -> MonomialType {
        self.kind
    }

    pub fn total_count(&self) -> i64 {
        self.total_count
    }

    pub fn composition(&self) -> &[i64] {
        &self.composition
    }

    pub fn position(&self) -> Vector2 {
        self.position
    }

    pub fn destination(&self) -> Vector2 {
        self.destination
    }

    pub fn motion(&self) -> &Motion {
        &self.motion
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

    /// How present the coin term is, from `1.0` (fully present) down to `0.0` (gone).
    pub fn existence_strength(&self) -> f64 {
        self.existence_strength
    }

    /// Returns true once the coin term has started fading away.
    pub fn is_fading(&self) -> bool {
        self.existence_strength < 1.0
    }

    /// The expression this coin term is a member of, if any.
    pub fn expression(&self) -> Option<ExpressionId> {
        self.expression
    }

    pub fn initial_position(&self) -> Vector2 {
        self.initial_position
    }

    pub fn initially_on_card(&self) -> bool {
        self.initially_on_card
    }

    pub fn card_opacity(&self) -> f64 {
        self.card_opacity
    }

    pub fn scale(&self) -> f64 {
        self.scale
    }

    pub fn break_apart_allowed(&self) -> bool {
        self.break_apart_allowed
    }

    pub fn show_minus_sign_when_negative(&self) -> bool {
        self.show_minus_sign_when_negative
    }

    pub fn is_returning_to_origin(&self) -> bool {
        self.returning_to_origin
    }

    /// The radius of the coin, after scaling.
    pub fn radius(&self) -> f64 {
        self.kind.coin_radius() * self.scale
    }

    /// The bounds of the coin term relative to its position, after scaling.
    pub fn local_bounds(&self) -> Bounds2 {
        self.local_bounds.scaled(self.scale)
    }

    /// The bounds of the coin term in model coordinates.
    pub fn bounds(&self) -> Bounds2 {
        self.local_bounds().shifted(self.position)
    }

    /// The value of the whole stack for the given variable values.
    pub fn value(&self, values: &VariableValues) -> i64 {
        self.kind.value(values) * self.total_count
    }

    /// Returns true if the stack can currently be split into its units.
    pub fn can_break_apart(&self) -> bool {
        self.break_apart_allowed
            && self.composition.len() > 1
            && self.expression.is_none()
            && !self.collected
            && !self.user_controlled
    }

    /// Returns true if this coin term and `candidate` could combine into one.
    pub fn is_eligible_to_combine_with(&self, candidate: &CoinTerm) -> bool {
        candidate.id != self.id
            && candidate.kind == self.kind
            && !self.user_controlled
            && !candidate.user_controlled
            && !self.is_fading()
            && !candidate.is_fading()
            && !self.collected
            && !candidate.collected
    }

    pub fn set_user_controlled(&mut self, controlled: bool) {
        self.user_controlled = controlled;
        if controlled {
            self.cancel_motion();
            self.returning_to_origin = false;
        }
    }

    pub fn set_collected(&mut self, collected: bool) {
        self.collected = collected;
    }

    pub(crate) fn set_expression(&mut self, expression: Option<ExpressionId>) {
        self.expression = expression;
    }

    pub fn set_break_apart_allowed(&mut self, allowed: bool) {
        self.break_apart_allowed = allowed;
    }

    pub fn set_show_minus_sign_when_negative(&mut self, show: bool) {
        self.show_minus_sign_when_negative = show;
    }

    pub fn set_card_opacity(&mut self, opacity: f64) {
        self.card_opacity = opacity.clamp(0.0, 1.0);
    }

    pub fn set_scale(&mut self, scale: f64) {
        self.scale = scale;
    }

    /// Sets the unscaled bounds of the coin term relative to its position, as measured by its
    /// visual representation.
    pub fn set_local_bounds(&mut self, bounds: Bounds2) {
        self.local_bounds = bounds;
    }

    /// Moves the coin term immediately, stopping any journey in progress.
    pub fn set_position_and_destination(&mut self, position: Vector2) {
        self.motion = Motion::Idle;
        self.position = position;
        self.destination = position;
    }

    /// Moves the coin term and any journey in progress by `offset`.
    pub fn translate(&mut self, offset: Vector2) {
        self.position += offset;
        self.destination += offset;
        self.motion.shift(offset);
    }

    /// Starts travelling to `destination`. If the coin term is already there, it arrives
    /// immediately.
    pub fn travel_to_destination(&mut self, destination: Vector2, options: &ModelOptions) {
        self.destination = destination;
        match Animation::new(self.position, destination, options) {
            Some(animation) => self.motion = Motion::Animating(animation),
            None => {
                self.motion = Motion::Idle;
                self.destination_reached = true;
            },
        }
    }

    /// Stops any journey in progress by jumping straight to its destination.
    pub fn cancel_motion(&mut self) {
        if self.motion.is_animating() {
            self.motion = Motion::Idle;
            self.position = self.destination;
        }
    }

    /// Travels back to the initial position.
    pub fn return_to_origin(&mut self, options: &ModelOptions) {
        self.returning_to_origin = true;
        self.travel_to_destination(self.initial_position, options);
    }

    /// Finishes a return to the origin, returning true if one was in progress.
    pub(crate) fn finish_return_to_origin(&mut self) -> bool {
        std::mem::replace(&mut self.returning_to_origin, false)
    }

    /// Returns true, once, after the coin term arrives at its destination.
    pub fn take_destination_reached(&mut self) -> bool {
        std::mem::replace(&mut self.destination_reached, false)
    }

    /// Advances the journey and the fade by `dt` seconds.
    pub fn step(&mut self, dt: f64, options: &ModelOptions) {
        match self.motion.step(dt) {
            MotionStep::Idle => (),
            MotionStep::Moved(position) => self.position = position,
            MotionStep::Arrived(position) => {
                self.position = position;
                self.destination_reached = true;
            },
        }

        if self.total_count == 0 && self.existence_strength > 0.0 {
            let decay = if options.fade_time > 0.0 { dt / options.fade_time } else { 1.0 };
            self.existence_strength = (self.existence_strength - decay).max(0.0);
        }
    }

    /// Adds the units of `other` into this coin term.
    ///
    /// With partial cancellation, each unit of `other` first cancels one opposite unit of this
    /// coin term, and is only appended if there is none. Without it, the compositions are
    /// concatenated. If the total reaches zero, the coin term starts fading away.
    ///
    /// # Panics
    ///
    /// Panics if the coin terms are of different types.
    pub fn absorb(&mut self, other: &CoinTerm, partial_cancellation: bool) {
        assert!(
            self.kind == other.kind,
            "{} ({}) cannot absorb {} ({})",
            self.id, self.kind, other.id, other.kind,
        );

        self.total_count += other.total_count;
        if partial_cancellation {
            for &unit in &other.composition {
                match self.composition.iter().position(|&existing| existing == -unit) {
                    Some(index) => {
                        self.composition.remove(index);
                    },
                    None => self.composition.push(unit),
                }
            }
        } else {
            self.composition.extend_from_slice(&other.composition);
        }
        self.check_composition();

        trace!(
            "{} absorbed {}, composition is now {:?}",
            self.id, other.id, self.composition,
        );
    }

    /// Splits off every unit after the first into a coin term of its own, leaving only the first
    /// unit in this one. The new coin terms start at this coin term's position and cannot be
    /// broken apart further.
    pub fn extract_constituents(&mut self, factory: &mut CoinTermFactory) -> Vec<CoinTerm> {
        if self.composition.len() < 2 {
            return Vec::new();
        }

        let units = self.composition.drain(1..).collect::<Vec<_>>();
        let extracted = units
            .into_iter()
            .map(|unit| {
                let mut coin_term = factory.create(
                    self.kind,
                    CoinTermOptions::default()
                        .initial_count(unit)
                        .decomposable(false),
                );
                coin_term.initial_position = self.initial_position;
                coin_term.set_position_and_destination(self.position);
                coin_term.local_bounds = self.local_bounds;
                coin_term
            })
            .collect::<Vec<_>>();

        self.total_count = self.composition[0];
        self.check_composition();
        extracted
    }

    fn check_composition(&self) {
        assert!(
            self.composition.iter().sum::<i64>() == self.total_count,
            "composition {:?} of {} does not sum to its total count {}",
            self.composition, self.id, self.total_count,
        );
    }
}
