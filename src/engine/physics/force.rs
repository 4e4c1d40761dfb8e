use std::time::Instant;

use super::body::Body;
use super::handle::ForceId;
use super::Result;
use crate::core::Vector;
use crate::engine::clock::Clock;

/// A directional, magnitude-scaled influence on a single body
///
/// `last_touched` is the instant of the most recent recompute that folded
/// this force into its body's state.
#[derive(Debug, Clone, PartialEq)]
pub struct Force {
    pub(crate) id: ForceId,
    pub(crate) magnitude: f64,
    pub(crate) direction: Vector,
    pub(crate) last_touched: Instant,
}

impl Force {
    pub(crate) fn new(id: ForceId, magnitude: f64, direction: Vector, now: Instant) -> Self {
        Self {
            id,
            magnitude,
            direction: direction.normalize(),
            last_touched: now,
        }
    }

    pub fn id(&self) -> ForceId {
        self.id
    }

    pub fn magnitude(&self) -> f64 {
        self.magnitude
    }

    /// Direction as stored, i.e. already passed through `Vector::normalize`
    pub fn direction(&self) -> Vector {
        self.direction
    }

    /// Instant this force was last integrated
    pub fn last_touched(&self) -> Instant {
        self.last_touched
    }
}

/// Mutable view of one force on a body
///
/// Every mutation first recomputes the owning body so time accrued under the
/// old values is kept. The view borrows the body exclusively, so the force
/// cannot disappear underneath it except through `remove`.
pub struct ForceMut<'a> {
    body: &'a mut Body,
    clock: &'a dyn Clock,
    id: ForceId,
    magnitude: f64,
    direction: Vector,
}

impl<'a> ForceMut<'a> {
    pub(crate) fn new(body: &'a mut Body, clock: &'a dyn Clock, id: ForceId) -> Result<Self> {
        let (magnitude, direction) = {
            let force = body.force(id)?;
            (force.magnitude, force.direction)
        };
        Ok(Self {
            body,
            clock,
            id,
            magnitude,
            direction,
        })
    }

    pub fn id(&self) -> ForceId {
        self.id
    }

    pub fn magnitude(&self) -> f64 {
        self.magnitude
    }

    pub fn direction(&self) -> Vector {
        self.direction
    }

    /// Fold elapsed time in under the old magnitude, then replace it
    pub fn set_magnitude(&mut self, value: f64) -> Result<()> {
        self.body
            .update_force(self.id, self.clock.now(), |force| force.magnitude = value)?;
        self.magnitude = value;
        Ok(())
    }

    /// Fold elapsed time in under the old direction, then store
    /// `value.normalize()`
    pub fn set_direction(&mut self, value: Vector) -> Result<()> {
        let direction = value.normalize();
        self.body
            .update_force(self.id, self.clock.now(), |force| force.direction = direction)?;
        self.direction = direction;
        Ok(())
    }

    /// Detach the force from its body, keeping the effect it had up to now
    pub fn remove(self) -> Result<Force> {
        self.body.detach_force(self.id, self.clock.now())
    }
}
