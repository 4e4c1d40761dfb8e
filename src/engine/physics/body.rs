use std::collections::btree_map::{self, BTreeMap};
use std::time::Instant;

use log::{debug, trace};

use super::force::Force;
use super::handle::{ForceId, IdAllocator, ObjectId};
use super::{PhysicsError, Result};
use crate::core::Vector;
use crate::engine::clock::elapsed_secs;

/// Builder for creating bodies with common configurations
#[derive(Debug, Clone, Default)]
pub struct BodyBuilder {
    polygon: Vec<Vector>,
    position: Vector,
}

impl BodyBuilder {
    /// Create a builder for a body at the origin with no outline
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the outline. Carried as data only, never consulted by integration.
    pub fn polygon(mut self, polygon: Vec<Vector>) -> Self {
        self.polygon = polygon;
        self
    }

    /// Set the initial position of the body
    pub fn position(mut self, x: f64, y: f64) -> Self {
        self.position = Vector::new(x, y);
        self
    }

    /// Set the initial position from a vector
    pub fn at(mut self, position: Vector) -> Self {
        self.position = position;
        self
    }

    /// Build the body at rest with no forces
    pub(crate) fn build(self, id: ObjectId) -> Body {
        Body {
            id,
            polygon: self.polygon,
            position: self.position,
            velocity: Vector::ZERO,
            forces: BTreeMap::new(),
            force_ids: IdAllocator::new(),
        }
    }
}

/// A rigid 2D body with lazily integrated forces
///
/// `position` and `velocity` hold the state as of the last recompute. Reads
/// through `ObjectMut` bring them up to date first; the `stored_*` accessors
/// here do not.
#[derive(Debug, Clone, PartialEq)]
pub struct Body {
    id: ObjectId,
    polygon: Vec<Vector>,
    position: Vector,
    velocity: Vector,
    // Ordered so recompute visits forces by ascending id
    forces: BTreeMap<ForceId, Force>,
    force_ids: IdAllocator,
}

impl Body {
    pub fn id(&self) -> ObjectId {
        self.id
    }

    pub fn polygon(&self) -> &[Vector] {
        &self.polygon
    }

    /// Position as of the last recompute
    pub fn stored_position(&self) -> Vector {
        self.position
    }

    /// Velocity as of the last recompute
    pub fn stored_velocity(&self) -> Vector {
        self.velocity
    }

    /// Look up a force. Magnitude and direction are not time dependent, so no
    /// recompute is needed.
    pub fn force(&self, id: ForceId) -> Result<&Force> {
        self.forces.get(&id).ok_or(PhysicsError::ForceNotFound {
            object: self.id,
            force: id,
        })
    }

    /// Forces in ascending id order
    pub fn forces(&self) -> btree_map::Values<'_, ForceId, Force> {
        self.forces.values()
    }

    pub fn force_count(&self) -> usize {
        self.forces.len()
    }

    /// Fold the time elapsed since each force was last touched into velocity
    /// and position, then stamp every force with `now`.
    ///
    /// Forces are applied one after another in ascending id order, each
    /// reading the velocity left by the previous one. A force with no elapsed
    /// time contributes nothing.
    pub(crate) fn recompute(&mut self, now: Instant) {
        for force in self.forces.values_mut() {
            let dt = elapsed_secs(force.last_touched, now);
            force.last_touched = now;
            if dt == 0.0 {
                continue;
            }

            let impulse = force.direction.scale(force.magnitude).scale(dt);
            self.position = self
                .position
                .add(self.velocity.add(impulse.mul(impulse).scale(0.5)));
            self.velocity = self.velocity.add(impulse);
        }

        trace!(
            "object {} recomputed: position {} velocity {}",
            self.id,
            self.position,
            self.velocity
        );
    }

    /// Recompute, then return the up-to-date position
    pub(crate) fn position_at(&mut self, now: Instant) -> Vector {
        self.recompute(now);
        self.position
    }

    /// Recompute, then return the up-to-date velocity
    pub(crate) fn velocity_at(&mut self, now: Instant) -> Vector {
        self.recompute(now);
        self.velocity
    }

    /// Attach a new force stamped at `now`. It has no retroactive effect.
    pub(crate) fn attach_force(
        &mut self,
        magnitude: f64,
        direction: Vector,
        now: Instant,
    ) -> Result<ForceId> {
        let id = ForceId(self.force_ids.allocate());
        let btree_map::Entry::Vacant(slot) = self.forces.entry(id) else {
            return Err(PhysicsError::ForceAlreadyExists {
                object: self.id,
                force: id,
            });
        };

        let force = slot.insert(Force::new(id, magnitude, direction, now));
        debug!(
            "object {}: added force {} (magnitude {}, direction {})",
            self.id, id, force.magnitude, force.direction
        );
        Ok(id)
    }

    /// Recompute under the force's current values, then apply `change` to it
    pub(crate) fn update_force<F>(&mut self, id: ForceId, now: Instant, change: F) -> Result<()>
    where
        F: FnOnce(&mut Force),
    {
        self.force(id)?;
        self.recompute(now);
        if let Some(force) = self.forces.get_mut(&id) {
            change(force);
        }
        Ok(())
    }

    /// Recompute so the force's effect up to `now` is kept, then drop it
    pub(crate) fn detach_force(&mut self, id: ForceId, now: Instant) -> Result<Force> {
        self.force(id)?;
        self.recompute(now);
        let force = self.forces.remove(&id).ok_or(PhysicsError::ForceNotFound {
            object: self.id,
            force: id,
        })?;
        debug!("object {}: removed force {}", self.id, id);
        Ok(force)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::time::Duration;

    fn body_at(x: f64, y: f64) -> Body {
        BodyBuilder::new().position(x, y).build(ObjectId(0))
    }

    #[test]
    fn test_builder_defaults() {
        let body = BodyBuilder::new().build(ObjectId(3));

        assert_eq!(body.id(), ObjectId(3));
        assert!(body.polygon().is_empty());
        assert_eq!(body.stored_position(), Vector::ZERO);
        assert_eq!(body.stored_velocity(), Vector::ZERO);
        assert_eq!(body.force_count(), 0);
    }

    #[test]
    fn test_builder_keeps_polygon() {
        let outline = vec![
            Vector::new(0.0, 0.0),
            Vector::new(1.0, 0.0),
            Vector::new(0.0, 1.0),
        ];
        let body = BodyBuilder::new()
            .polygon(outline.clone())
            .at(Vector::new(2.0, 3.0))
            .build(ObjectId(0));

        assert_eq!(body.polygon(), outline.as_slice());
        assert_eq!(body.stored_position(), Vector::new(2.0, 3.0));
    }

    #[test]
    fn test_straight_line_force() {
        let t0 = Instant::now();
        let mut body = body_at(1.0, 1.0);
        body.attach_force(1.0, Vector::new(1.0, 0.0), t0).unwrap();

        let t1 = t0 + Duration::from_secs(1);
        assert_eq!(body.velocity_at(t1), Vector::new(1.0, 0.0));
        assert_eq!(body.position_at(t1), Vector::new(1.5, 1.0));
    }

    #[test]
    fn test_recompute_without_elapsed_time_is_noop() {
        let t0 = Instant::now();
        let mut body = body_at(0.0, 0.0);
        body.attach_force(2.0, Vector::new(0.0, 1.0), t0).unwrap();

        let t1 = t0 + Duration::from_millis(500);
        let first = (body.position_at(t1), body.velocity_at(t1));
        let second = (body.position_at(t1), body.velocity_at(t1));
        assert_eq!(first, second);
    }

    #[test]
    fn test_forces_are_applied_in_id_order() {
        let t0 = Instant::now();
        let mut body = body_at(0.0, 0.0);
        body.attach_force(1.0, Vector::new(1.0, 0.0), t0).unwrap();
        body.attach_force(1.0, Vector::new(1.0, 0.0), t0).unwrap();

        let t1 = t0 + Duration::from_secs(1);
        body.recompute(t1);

        // First force: position += 0 + 0.5, velocity = 1
        // Second force: position += 1 + 0.5, velocity = 2
        assert_eq!(body.stored_velocity(), Vector::new(2.0, 0.0));
        assert_eq!(body.stored_position(), Vector::new(2.0, 0.0));
    }

    #[test]
    fn test_velocity_term_is_not_scaled_by_elapsed_time() {
        let t0 = Instant::now();
        let mut body = body_at(0.0, 0.0);
        body.attach_force(1.0, Vector::new(1.0, 0.0), t0).unwrap();

        let t1 = t0 + Duration::from_secs(1);
        assert_eq!(body.velocity_at(t1), Vector::new(1.0, 0.0));
        assert_eq!(body.position_at(t1), Vector::new(0.5, 0.0));

        // position += velocity + 0.5 * impulse², with impulse = (0.5, 0)
        let t2 = t1 + Duration::from_millis(500);
        assert_eq!(body.position_at(t2), Vector::new(1.625, 0.0));
        assert_eq!(body.velocity_at(t2), Vector::new(1.5, 0.0));
    }

    #[test]
    fn test_forces_with_different_elapsed_times() {
        let t0 = Instant::now();
        let mut body = body_at(0.0, 0.0);
        body.attach_force(1.0, Vector::new(1.0, 0.0), t0).unwrap();
        body.attach_force(1.0, Vector::new(0.0, 1.0), t0 + Duration::from_secs(1))
            .unwrap();

        body.recompute(t0 + Duration::from_secs(2));

        // Force 0 (dt = 2): position += 0 + 0.5 * (4, 0), velocity = (2, 0)
        // Force 1 (dt = 1): position += (2, 0) + 0.5 * (0, 1), velocity = (2, 1)
        assert_eq!(body.stored_velocity(), Vector::new(2.0, 1.0));
        assert_eq!(body.stored_position(), Vector::new(4.0, 0.5));
    }

    #[test]
    fn test_body_without_forces_never_moves() {
        let t0 = Instant::now();
        let mut body = body_at(1.0, 2.0);
        assert_eq!(body.position_at(t0 + Duration::from_secs(100)), Vector::new(1.0, 2.0));

        // Velocity left over from a removed force does not move the body
        let id = body.attach_force(1.0, Vector::new(1.0, 0.0), t0).unwrap();
        let t1 = t0 + Duration::from_secs(1);
        body.detach_force(id, t1).unwrap();
        let position = body.stored_position();

        assert_eq!(body.position_at(t1 + Duration::from_secs(10)), position);
        assert_eq!(body.velocity_at(t1 + Duration::from_secs(10)), Vector::new(1.0, 0.0));
    }

    #[test]
    fn test_forces_iterate_in_id_order() {
        let t0 = Instant::now();
        let mut body = body_at(0.0, 0.0);
        let ids: Vec<_> = (0..4)
            .map(|_| body.attach_force(1.0, Vector::new(1.0, 0.0), t0).unwrap())
            .collect();
        body.detach_force(ids[1], t0).unwrap();

        let remaining: Vec<_> = body.forces().map(Force::id).collect();
        assert_eq!(remaining, vec![ids[0], ids[2], ids[3]]);
        assert_eq!(body.force_count(), 3);
    }

    #[test]
    fn test_recompute_stamps_forces() {
        let t0 = Instant::now();
        let mut body = body_at(0.0, 0.0);
        let id = body.attach_force(1.0, Vector::new(0.0, 1.0), t0).unwrap();

        let t1 = t0 + Duration::from_secs(2);
        body.recompute(t1);
        assert_eq!(body.force(id).unwrap().last_touched(), t1);
    }

    #[test]
    fn test_impulse_uses_normalized_direction() {
        let t0 = Instant::now();
        let mut body = body_at(0.0, 0.0);
        // (1,1) is stored as (0.5,0.5)
        body.attach_force(2.0, Vector::new(1.0, 1.0), t0).unwrap();

        let velocity = body.velocity_at(t0 + Duration::from_millis(250));
        assert_relative_eq!(velocity.x(), 0.25);
        assert_relative_eq!(velocity.y(), 0.25);
    }

    #[test]
    fn test_force_ids_are_not_reused() {
        let t0 = Instant::now();
        let mut body = body_at(0.0, 0.0);
        let a = body.attach_force(1.0, Vector::new(1.0, 0.0), t0).unwrap();
        body.detach_force(a, t0).unwrap();
        let b = body.attach_force(1.0, Vector::new(1.0, 0.0), t0).unwrap();

        assert_eq!(a, ForceId(0));
        assert_eq!(b, ForceId(1));
    }

    #[test]
    fn test_update_missing_force_leaves_state_untouched() {
        let t0 = Instant::now();
        let mut body = body_at(0.0, 0.0);
        let id = body.attach_force(1.0, Vector::new(1.0, 0.0), t0).unwrap();
        let before = body.clone();

        let err = body
            .update_force(ForceId(9), t0 + Duration::from_secs(1), |f| f.magnitude = 0.0)
            .unwrap_err();
        assert!(err.is_not_found());
        assert_eq!(body, before);
        assert_eq!(body.force(id).unwrap().last_touched(), t0);
    }

    #[test]
    fn test_detach_twice_fails() {
        let t0 = Instant::now();
        let mut body = body_at(0.0, 0.0);
        let id = body.attach_force(1.0, Vector::new(1.0, 0.0), t0).unwrap();

        assert!(body.detach_force(id, t0).is_ok());
        assert_eq!(
            body.detach_force(id, t0).unwrap_err(),
            PhysicsError::ForceNotFound {
                object: ObjectId(0),
                force: id
            }
        );
    }
}
