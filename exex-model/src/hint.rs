//! Previews of an expression that would form if a dragged coin term were released.

use crate::{
    coin_term::{CoinTerm, CoinTermId},
    geom::Bounds2,
    options::ModelOptions,
};

/// The region around a free coin term that another coin term must be released in to form an
/// expression with it: the coin term's bounds, widened on both sides by its own width.
pub fn expression_combine_zone(coin_term: &CoinTerm) -> Bounds2 {
    let bounds = coin_term.bounds();
    bounds.dilated_x(bounds.width())
}

/// A dragged coin term hovering within the expression combine zone of a free coin term.
///
/// While a hint exists, neither coin term may be broken apart.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ExpressionHint {
    anchor: CoinTermId,
    moving: CoinTermId,
    anchor_on_left: bool,
}

impl ExpressionHint {
    pub fn new(anchor: &CoinTerm, moving: &CoinTerm) -> Self {
        Self {
            anchor: anchor.id(),
            moving: moving.id(),
            anchor_on_left: anchor.position().x <= moving.position().x,
        }
    }

    /// The free coin term that would stay put.
    pub fn anchor(&self) -> CoinTermId {
        self.anchor
    }

    /// The dragged coin term.
    pub fn moving(&self) -> CoinTermId {
        self.moving
    }

    /// Returns true if the anchor would be the left member of the new expression.
    pub fn anchor_on_left(&self) -> bool {
        self.anchor_on_left
    }

    /// Returns true if the coin term is either side of the hint.
    pub fn involves(&self, id: CoinTermId) -> bool {
        self.anchor == id || self.moving == id
    }

    /// Follows the dragged coin term to whichever side of the anchor it is on now.
    pub fn update(&mut self, anchor: &CoinTerm, moving: &CoinTerm) {
        self.anchor_on_left = anchor.position().x <= moving.position().x;
    }

    /// The outline of the expression that would form, with the anchor where it is and the
    /// dragged coin term beside it.
    pub fn bounds(&self, anchor: &CoinTerm, moving: &CoinTerm, options: &ModelOptions) -> Bounds2 {
        let anchor_bounds = anchor.bounds();
        let extra = options.inter_coin_term_spacing + moving.local_bounds().width();
        let (min_x, max_x) = if self.anchor_on_left {
            (anchor_bounds.min_x, anchor_bounds.max_x + extra)
        } else {
            (anchor_bounds.min_x - extra, anchor_bounds.max_x)
        };
        let height = anchor_bounds.height().max(moving.local_bounds().height());

        Bounds2::new(
            min_x - options.x_margin,
            anchor_bounds.center_y() - height / 2.0 - options.y_margin,
            max_x + options.x_margin,
            anchor_bounds.center_y() + height / 2.0 + options.y_margin,
        )
    }
}
