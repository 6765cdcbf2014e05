#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Tunable constants of the model.
///
/// All distances are in model units and all durations are in seconds.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ModelOptions {
    /// The speed at which coin terms and expressions travel to their destinations, in units per
    /// second.
    ///
    /// The default value is `400.0`.
    pub movement_speed: f64,

    /// The longest any single animation may take. Long journeys are sped up to fit.
    ///
    /// The default value is `1.0`.
    pub max_animation_time: f64,

    /// How long a coin term whose total count reached zero takes to fade away.
    ///
    /// The default value is `0.75`.
    pub fade_time: f64,

    /// The horizontal gap between neighboring members of an expression, before scaling.
    ///
    /// The default value is `30.0`.
    pub inter_coin_term_spacing: f64,

    /// The gap between the left and right edges of an expression and its outermost members,
    /// before scaling.
    ///
    /// The default value is `14.0`.
    pub x_margin: f64,

    /// The gap between the top and bottom edges of an expression and its tallest member, before
    /// scaling.
    ///
    /// The default value is `12.0`.
    pub y_margin: f64,

    /// The gap left between neighboring coin terms when a stack is broken apart.
    ///
    /// The default value is `10.0`.
    pub break_apart_spacing: f64,

    /// The distance within which two like terms combine when the view shows variables instead
    /// of coins.
    ///
    /// The default value is `30.0`.
    pub term_combine_distance: f64,

    /// Multiplier applied to [`term_combine_distance`](ModelOptions::term_combine_distance),
    /// since variable text is a smaller target than a coin.
    ///
    /// The default value is `1.5`.
    pub variable_mode_forgiveness: f64,

    /// Multiplier applied to the sum of two coin radii when deciding whether two coins overlap.
    ///
    /// The default value is `1.0`.
    pub coin_overlap_factor: f64,

    /// Whether opposite units cancel out of a composition when like terms combine. If disabled,
    /// the compositions are simply concatenated.
    ///
    /// The default value is `true`.
    pub partial_cancellation: bool,

    /// Whether expressions display subtraction in place of adding a negative term.
    ///
    /// The default value is `false`.
    pub simplify_negatives: bool,
}

/// The default model options. Returns a [`ModelOptions`] with the following values:
///
/// - [`movement_speed`](ModelOptions::movement_speed): `400.0`
/// - [`max_animation_time`](ModelOptions::max_animation_time): `1.0`
/// - [`fade_time`](ModelOptions::fade_time): `0.75`
/// - [`inter_coin_term_spacing`](ModelOptions::inter_coin_term_spacing): `30.0`
/// - [`x_margin`](ModelOptions::x_margin): `14.0`
/// - [`y_margin`](ModelOptions::y_margin): `12.0`
/// - [`break_apart_spacing`](ModelOptions::break_apart_spacing): `10.0`
/// - [`term_combine_distance`](ModelOptions::term_combine_distance): `30.0`
/// - [`variable_mode_forgiveness`](ModelOptions::variable_mode_forgiveness): `1.5`
/// - [`coin_overlap_factor`](ModelOptions::coin_overlap_factor): `1.0`
/// - [`partial_cancellation`](ModelOptions::partial_cancellation): `true`
/// - [`simplify_negatives`](ModelOptions::simplify_negatives): `false`
impl Default for ModelOptions {
    fn default() -> ModelOptions {
        ModelOptions {
            movement_speed: 400.0,
            max_animation_time: 1.0,
            fade_time: 0.75,
            inter_coin_term_spacing: 30.0,
            x_margin: 14.0,
            y_margin: 12.0,
            break_apart_spacing: 10.0,
            term_combine_distance: 30.0,
            variable_mode_forgiveness: 1.5,
            coin_overlap_factor: 1.0,
            partial_cancellation: true,
            simplify_negatives: false,
        }
    }
}

impl ModelOptions {
    /// Set the movement speed. Returns an updated [`ModelOptions`] for chaining.
    pub fn movement_speed(mut self, speed: f64) -> Self {
        self.movement_speed = speed;
        self
    }

    /// Set the maximum animation time. Returns an updated [`ModelOptions`] for chaining.
    pub fn max_animation_time(mut self, seconds: f64) -> Self {
        self.max_animation_time = seconds;
        self
    }

    /// Set the fade time. Returns an updated [`ModelOptions`] for chaining.
    pub fn fade_time(mut self, seconds: f64) -> Self {
        self.fade_time = seconds;
        self
    }

    /// Set the spacing between expression members. Returns an updated [`ModelOptions`] for
    /// chaining.
    pub fn inter_coin_term_spacing(mut self, spacing: f64) -> Self {
        self.inter_coin_term_spacing = spacing;
        self
    }

    /// Set the expression margins. Returns an updated [`ModelOptions`] for chaining.
    pub fn margins(mut self, x: f64, y: f64) -> Self {
        self.x_margin = x;
        self.y_margin = y;
        self
    }

    /// Set the break apart spacing. Returns an updated [`ModelOptions`] for chaining.
    pub fn break_apart_spacing(mut self, spacing: f64) -> Self {
        self.break_apart_spacing = spacing;
        self
    }

    /// Set the combine distance used in variable mode. Returns an updated [`ModelOptions`] for
    /// chaining.
    pub fn term_combine_distance(mut self, distance: f64, forgiveness: f64) -> Self {
        self.term_combine_distance = distance;
        self.variable_mode_forgiveness = forgiveness;
        self
    }

    /// Set the coin overlap factor. Returns an updated [`ModelOptions`] for chaining.
    pub fn coin_overlap_factor(mut self, factor: f64) -> Self {
        self.coin_overlap_factor = factor;
        self
    }

    /// Enable or disable partial cancellation. Returns an updated [`ModelOptions`] for chaining.
    pub fn partial_cancellation(mut self, enabled: bool) -> Self {
        self.partial_cancellation = enabled;
        self
    }

    /// Enable or disable simplified negatives. Returns an updated [`ModelOptions`] for chaining.
    pub fn simplify_negatives(mut self, enabled: bool) -> Self {
        self.simplify_negatives = enabled;
        self
    }

    /// The distance within which two like terms combine in variable mode.
    pub fn variable_combine_radius(&self) -> f64 {
        self.term_combine_distance * self.variable_mode_forgiveness
    }
}
