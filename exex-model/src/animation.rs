//! Resumable straight-line motion shared by coin terms and expressions.
//!
//! A moving entity holds a [`Motion`], advanced once per frame by [`Motion::step`]. Time
//! advances linearly while the position follows a cubic ease-in/ease-out curve along the path
//! from the start point to the destination. Interrupting an animation means overwriting the
//! [`Motion`]; the entity is expected to jump straight to its destination when that happens.

use crate::{geom::Vector2, options::ModelOptions};

/// Cubic ease-in/ease-out. Maps `0.0..=1.0` onto `0.0..=1.0`, starting and ending slowly.
pub fn cubic_in_out(t: f64) -> f64 {
    let t = t.clamp(0.0, 1.0);
    if t < 0.5 {
        4.0 * t * t * t
    } else {
        let u = -2.0 * t + 2.0;
        1.0 - u * u * u / 2.0
    }
}

/// An in-flight journey.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Animation {
    /// Where the journey began.
    pub start: Vector2,

    /// The vector from the start point to the destination.
    pub travel: Vector2,

    /// Seconds spent travelling so far.
    pub elapsed: f64,

    /// Total seconds the journey takes.
    pub duration: f64,
}

impl Animation {
    /// Plans a journey from `start` to `destination`. The duration is the distance divided by
    /// the movement speed, capped at the maximum animation time.
    ///
    /// Returns [`None`] if the points coincide, as there is nothing to animate.
    pub fn new(start: Vector2, destination: Vector2, options: &ModelOptions) -> Option<Self> {
        let travel = destination - start;
        let distance = travel.magnitude();
        if distance == 0.0 {
            return None;
        }

        let duration = (distance / options.movement_speed).min(options.max_animation_time);
        Some(Self { start, travel, elapsed: 0.0, duration })
    }

    /// The point the journey ends at.
    pub fn destination(&self) -> Vector2 {
        self.start + self.travel
    }

    /// The point along the path that corresponds to the elapsed time.
    pub fn position(&self) -> Vector2 {
        if self.duration <= 0.0 {
            return self.destination();
        }
        self.start + self.travel * cubic_in_out(self.elapsed / self.duration)
    }

    /// Returns true if the whole duration has elapsed.
    pub fn is_finished(&self) -> bool {
        self.elapsed >= self.duration
    }
}

/// The result of advancing a [`Motion`] by one frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum MotionStep {
    /// Nothing was moving.
    Idle,

    /// The entity moved to this position and is still travelling.
    Moved(Vector2),

    /// The entity reached its destination, which is this position.
    Arrived(Vector2),
}

/// Whether an entity is at rest or travelling.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum Motion {
    #[default]
    Idle,
    Animating(Animation),
}

impl Motion {
    /// Returns true if a journey is in progress.
    pub fn is_animating(&self) -> bool {
        matches!(self, Motion::Animating(_))
    }

    /// The destination of the journey in progress, if any.
    pub fn destination(&self) -> Option<Vector2> {
        match self {
            Motion::Idle => None,
            Motion::Animating(animation) => Some(animation.destination()),
        }
    }

    /// Advances the journey by `dt` seconds. Once it arrives, the motion returns to
    /// [`Motion::Idle`].
    pub fn step(&mut self, dt: f64) -> MotionStep {
        let Motion::Animating(animation) = self else {
            return MotionStep::Idle;
        };

        animation.elapsed = (animation.elapsed + dt).min(animation.duration);
        if animation.is_finished() {
            let destination = animation.destination();
            *self = Motion::Idle;
            MotionStep::Arrived(destination)
        } else {
            MotionStep::Moved(animation.position())
        }
    }

    /// Moves the whole journey by `offset`, so that it continues in parallel to its old path.
    pub fn shift(&mut self, offset: Vector2) {
        if let Motion::Animating(animation) = self {
            animation.start += offset;
        }
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
    fn easing_endpoints() {
        assert_float_absolute_eq!(cubic_in_out(0.0), 0.0);
        assert_float_absolute_eq!(cubic_in_out(0.5), 0.5);
        assert_float_absolute_eq!(cubic_in_out(1.0), 1.0);
        assert!(cubic_in_out(0.25) < 0.25);
        assert!(cubic_in_out(0.75) > 0.75);
    }

    #[test]
    fn duration_from_speed() {
        let options = ModelOptions::default();
        let animation = Animation::new(Vector2::ZERO, Vector2::new(200.0, 0.0), &options).unwrap();
        assert_float_absolute_eq!(animation.duration, 0.5);
    }

    #[test]
    fn duration_is_capped() {
        let options = ModelOptions::default();
        let animation = Animation::new(Vector2::ZERO, Vector2::new(3000.0, 4000.0), &options).unwrap();
        assert_float_absolute_eq!(animation.duration, 1.0);
    }

    #[test]
    fn zero_distance_is_not_animated() {
        let point = Vector2::new(5.0, 5.0);
        assert_eq!(Animation::new(point, point, &ModelOptions::default()), None);
    }

    #[test]
    fn step_to_arrival() {
        let options = ModelOptions::default();
        let destination = Vector2::new(200.0, 0.0);
        let mut motion = Motion::Animating(Animation::new(Vector2::ZERO, destination, &options).unwrap());

        match motion.step(0.25) {
            MotionStep::Moved(position) => assert_float_absolute_eq!(position.x, 100.0),
            other => panic!("expected to still be moving, got {:?}", other),
        }
        assert_eq!(motion.step(0.3), MotionStep::Arrived(destination));
        assert_eq!(motion, Motion::Idle);
        assert_eq!(motion.step(0.1), MotionStep::Idle);
    }

    #[test]
    fn shifted_journey() {
        let options = ModelOptions::default();
        let mut motion = Motion::Animating(
            Animation::new(Vector2::ZERO, Vector2::new(100.0, 0.0), &options).unwrap(),
        );
        motion.shift(Vector2::new(0.0, 50.0));
        assert_eq!(motion.destination(), Some(Vector2::new(100.0, 50.0)));
    }
}
