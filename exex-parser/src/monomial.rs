//! The closed set of monomials a coin term can represent, and the variable values they are
//! evaluated with.

use std::fmt::{self, Display, Formatter};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// The monomial carried by a term or coin term.
///
/// The set is closed: every `match` on this type is exhaustive, so adding a monomial forces all
/// of its uses (radius, display text, value, multiplication) to be revisited.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum MonomialType {
    /// `x`
    X,

    /// `y`
    Y,

    /// `z`
    Z,

    /// `xy`
    XY,

    /// `x²`
    XSquared,

    /// `y²`
    YSquared,

    /// `x²y²`
    XSquaredYSquared,

    /// A constant, whose value is always `1` per unit.
    Constant,
}

impl MonomialType {
    /// All monomial types, in the order they are usually presented.
    pub const ALL: [MonomialType; 8] = [
        MonomialType::X,
        MonomialType::Y,
        MonomialType::Z,
        MonomialType::XY,
        MonomialType::XSquared,
        MonomialType::YSquared,
        MonomialType::XSquaredYSquared,
        MonomialType::Constant,
    ];

    /// Returns the radius of the coin representing this monomial, in model units.
    pub fn coin_radius(self) -> f64 {
        match self {
            MonomialType::Constant => 32.0,
            MonomialType::X => 36.0,
            MonomialType::Y => 38.0,
            MonomialType::Z => 40.0,
            MonomialType::XSquared => 42.0,
            MonomialType::YSquared => 44.0,
            MonomialType::XY => 46.0,
            MonomialType::XSquaredYSquared => 50.0,
        }
    }

    /// Returns the text displayed for this monomial when shown as a variable. Constants have no
    /// text of their own.
    pub fn symbol(self) -> &'static str {
        match self {
            MonomialType::X => "x",
            MonomialType::Y => "y",
            MonomialType::Z => "z",
            MonomialType::XY => "xy",
            MonomialType::XSquared => "x²",
            MonomialType::YSquared => "y²",
            MonomialType::XSquaredYSquared => "x²y²",
            MonomialType::Constant => "",
        }
    }

    /// Evaluates this monomial using the given variable values.
    pub fn value(self, values: &VariableValues) -> i64 {
        let VariableValues { x, y, z } = *values;
        match self {
            MonomialType::X => x,
            MonomialType::Y => y,
            MonomialType::Z => z,
            MonomialType::XY => x * y,
            MonomialType::XSquared => x * x,
            MonomialType::YSquared => y * y,
            MonomialType::XSquaredYSquared => x * x * y * y,
            MonomialType::Constant => 1,
        }
    }
}

impl Display for MonomialType {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            MonomialType::Constant => write!(f, "1"),
            other => write!(f, "{}", other.symbol()),
        }
    }
}

/// The current values of the variables `x`, `y`, and `z`.
///
/// These are owned by whoever presents the coin terms; a coin term's value is always computed
/// from the values in effect at the time it is asked for, so derived monomials such as `x²y²`
/// follow changes to `x` and `y` without further bookkeeping.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct VariableValues {
    pub x: i64,
    pub y: i64,
    pub z: i64,
}

/// The values shown on the coins: `x = 2`, `y = 5`, `z = 10`.
impl Default for VariableValues {
    fn default() -> Self {
        Self { x: 2, y: 5, z: 10 }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn derived_values_follow_variables() {
        let mut values = VariableValues::default();
        assert_eq!(MonomialType::XSquaredYSquared.value(&values), 100);

        values.x = -3;
        assert_eq!(MonomialType::XSquared.value(&values), 9);
        assert_eq!(MonomialType::XY.value(&values), -15);
        assert_eq!(MonomialType::XSquaredYSquared.value(&values), 225);
        assert_eq!(MonomialType::Constant.value(&values), 1);
    }

    #[test]
    fn every_type_has_a_radius() {
        for kind in MonomialType::ALL {
            assert!(kind.coin_radius() > 0.0);
        }
    }
}
