//! Points and axis-aligned rectangles in model units.
//!
//! The model's coordinate system matches the screen's: `x` grows to the right and `y` grows
//! downward, so `min_y` is the top edge of a [`Bounds2`].

use std::ops::{Add, AddAssign, Mul, Neg, Sub};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A pair of `(x, y)` values.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Vector2 {
    pub x: f64,
    pub y: f64,
}

impl Vector2 {
    /// The origin.
    pub const ZERO: Vector2 = Vector2 { x: 0.0, y: 0.0 };

    /// Creates a new vector.
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Returns the length of the vector.
    pub fn magnitude(self) -> f64 {
        self.x.hypot(self.y)
    }

    /// Returns the distance between two points.
    pub fn distance(self, other: Vector2) -> f64 {
        (self - other).magnitude()
    }

    /// Returns this point offset by the given amounts.
    pub fn plus_xy(self, x: f64, y: f64) -> Self {
        Self::new(self.x + x, self.y + y)
    }
}

impl From<(f64, f64)> for Vector2 {
    fn from((x, y): (f64, f64)) -> Self {
        Self::new(x, y)
    }
}

impl Add for Vector2 {
    type Output = Vector2;

    fn add(self, rhs: Vector2) -> Vector2 {
        Vector2::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl AddAssign for Vector2 {
    fn add_assign(&mut self, rhs: Vector2) {
        self.x += rhs.x;
        self.y += rhs.y;
    }
}

impl Sub for Vector2 {
    type Output = Vector2;

    fn sub(self, rhs: Vector2) -> Vector2 {
        Vector2::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<f64> for Vector2 {
    type Output = Vector2;

    fn mul(self, rhs: f64) -> Vector2 {
        Vector2::new(self.x * rhs, self.y * rhs)
    }
}

impl Neg for Vector2 {
    type Output = Vector2;

    fn neg(self) -> Vector2 {
        Vector2::new(-self.x, -self.y)
    }
}

/// An axis-aligned rectangle.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Bounds2 {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl Bounds2 {
    /// Creates a rectangle from its edges.
    pub const fn new(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Self {
        Self { min_x, min_y, max_x, max_y }
    }

    /// Creates a rectangle from its upper-left corner and size.
    pub fn from_corner(upper_left: Vector2, width: f64, height: f64) -> Self {
        Self::new(upper_left.x, upper_left.y, upper_left.x + width, upper_left.y + height)
    }

    /// Creates a square centered on the origin with the given half-width.
    pub fn centered_square(half_width: f64) -> Self {
        Self::new(-half_width, -half_width, half_width, half_width)
    }

    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }

    pub fn center_x(&self) -> f64 {
        (self.min_x + self.max_x) / 2.0
    }

    pub fn center_y(&self) -> f64 {
        (self.min_y + self.max_y) / 2.0
    }

    pub fn center(&self) -> Vector2 {
        Vector2::new(self.center_x(), self.center_y())
    }

    pub fn upper_left(&self) -> Vector2 {
        Vector2::new(self.min_x, self.min_y)
    }

    /// Returns the rectangle translated by the given offset.
    pub fn shifted(&self, offset: Vector2) -> Self {
        Self::new(
            self.min_x + offset.x,
            self.min_y + offset.y,
            self.max_x + offset.x,
            self.max_y + offset.y,
        )
    }

    /// Returns the rectangle with its left and right edges pushed outward by `amount`.
    pub fn dilated_x(&self, amount: f64) -> Self {
        Self::new(self.min_x - amount, self.min_y, self.max_x + amount, self.max_y)
    }

    /// Returns the rectangle with every edge pushed outward by `amount`.
    pub fn dilated(&self, amount: f64) -> Self {
        Self::new(self.min_x - amount, self.min_y - amount, self.max_x + amount, self.max_y + amount)
    }

    /// Returns the rectangle with every coordinate multiplied by `factor`, scaling it about the
    /// origin.
    pub fn scaled(&self, factor: f64) -> Self {
        Self::new(self.min_x * factor, self.min_y * factor, self.max_x * factor, self.max_y * factor)
    }

    /// Returns the overlapping region of two rectangles, or [`None`] if they do not overlap by a
    /// positive area.
    pub fn intersection(&self, other: &Bounds2) -> Option<Bounds2> {
        let overlap = Self::new(
            self.min_x.max(other.min_x),
            self.min_y.max(other.min_y),
            self.max_x.min(other.max_x),
            self.max_y.min(other.max_y),
        );
        (overlap.width() > 0.0 && overlap.height() > 0.0).then_some(overlap)
    }

    /// Returns the area of the overlapping region of two rectangles, which is zero if they do
    /// not overlap.
    pub fn intersection_area(&self, other: &Bounds2) -> f64 {
        self.intersection(other).map_or(0.0, |overlap| overlap.width() * overlap.height())
    }

    /// Returns true if the rectangles overlap by a positive area.
    pub fn intersects(&self, other: &Bounds2) -> bool {
        self.intersection(other).is_some()
    }

    /// Returns true if the point lies inside the rectangle or on its edge.
    pub fn contains_point(&self, point: Vector2) -> bool {
        (self.min_x..=self.max_x).contains(&point.x) && (self.min_y..=self.max_y).contains(&point.y)
    }

    /// Returns the smallest rectangle containing both rectangles.
    pub fn union(&self, other: &Bounds2) -> Self {
        Self::new(
            self.min_x.min(other.min_x),
            self.min_y.min(other.min_y),
            self.max_x.max(other.max_x),
            self.max_y.max(other.max_y),
        )
    }

    /// Returns the position closest to `point` at which a shape with the given `local` bounds
    /// lies entirely inside this rectangle. On an axis where the shape is too large to fit, it
    /// is centered instead.
    pub fn fit_point(&self, local: &Bounds2, point: Vector2) -> Vector2 {
        fn fit(point: f64, low: f64, high: f64, center: f64) -> f64 {
            if low > high { center } else { point.clamp(low, high) }
        }

        let x = fit(
            point.x,
            self.min_x - local.min_x,
            self.max_x - local.max_x,
            self.center_x() - local.center_x(),
        );
        let y = fit(
            point.y,
            self.min_y - local.min_y,
            self.max_y - local.max_y,
            self.center_y() - local.center_y(),
        );
        Vector2::new(x, y)
    }

    /// Returns the point inside the rectangle closest to the given point.
    pub fn closest_point(&self, point: Vector2) -> Vector2 {
        Vector2::new(
            point.x.clamp(self.min_x, self.max_x),
            point.y.clamp(self.min_y, self.max_y),
        )
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
    use super::*;

    #[test]
    fn distance() {
        assert_float_absolute_eq!(Vector2::new(1.0, 2.0).distance(Vector2::new(4.0, 6.0)), 5.0);
    }

    #[test]
    fn overlap_area() {
        let a = Bounds2::new(0.0, 0.0, 10.0, 10.0);
        let b = Bounds2::new(5.0, 8.0, 20.0, 20.0);
        assert_float_absolute_eq!(a.intersection_area(&b), 10.0);
        assert_eq!(a.intersection(&b), Some(Bounds2::new(5.0, 8.0, 10.0, 10.0)));
    }

    #[test]
    fn touching_edges_do_not_overlap() {
        let a = Bounds2::new(0.0, 0.0, 10.0, 10.0);
        let b = Bounds2::new(10.0, 0.0, 20.0, 10.0);
        assert!(!a.intersects(&b));
        assert_eq!(a.intersection_area(&b), 0.0);
    }

    #[test]
    fn dilate_horizontally() {
        let zone = Bounds2::from_corner(Vector2::new(100.0, 50.0), 80.0, 40.0).dilated_x(40.0);
        assert_eq!(zone, Bounds2::new(60.0, 50.0, 220.0, 90.0));
        assert!(zone.contains_point(Vector2::new(65.0, 70.0)));
        assert!(!zone.contains_point(Vector2::new(65.0, 95.0)));
    }

    #[test]
    fn fit_shape_inside() {
        let bounds = Bounds2::new(0.0, 0.0, 100.0, 50.0);
        let coin = Bounds2::centered_square(10.0);
        assert_eq!(bounds.fit_point(&coin, Vector2::new(-20.0, 25.0)), Vector2::new(10.0, 25.0));
        assert_eq!(bounds.fit_point(&coin, Vector2::new(50.0, 70.0)), Vector2::new(50.0, 40.0));

        let wide = Bounds2::new(0.0, 0.0, 200.0, 20.0);
        assert_eq!(bounds.fit_point(&wide, Vector2::new(30.0, 10.0)), Vector2::new(-50.0, 10.0));
    }

    #[test]
    fn clamp_into_bounds() {
        let bounds = Bounds2::new(0.0, 0.0, 100.0, 50.0);
        assert_eq!(bounds.closest_point(Vector2::new(-20.0, 70.0)), Vector2::new(0.0, 50.0));
        assert_eq!(bounds.closest_point(Vector2::new(20.0, 30.0)), Vector2::new(20.0, 30.0));
    }
}
