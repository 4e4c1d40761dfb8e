use std::collections::hash_map::{self, HashMap};

use log::debug;

use super::body::{Body, BodyBuilder};
use super::force::{Force, ForceMut};
use super::handle::{ForceId, IdAllocator, ObjectId};
use super::{PhysicsError, Result};
use crate::core::Vector;
use crate::engine::clock::Clock;

/// Registry that owns every body and the clock they are integrated against
///
/// Not synchronised: hosts sharing a system across threads must serialise
/// access themselves. Independent systems do not share any state.
pub struct PhysicsSystem {
    /// Bodies keyed by id
    objects: HashMap<ObjectId, Body>,

    /// Source of new object ids
    object_ids: IdAllocator,

    /// Time source for every recompute
    clock: Box<dyn Clock>,
}

impl PhysicsSystem {
    /// Create an empty system bound to `clock`
    pub fn new(clock: impl Clock + 'static) -> Self {
        Self {
            objects: HashMap::new(),
            object_ids: IdAllocator::new(),
            clock: Box::new(clock),
        }
    }

    /// Add a body at rest with no forces
    pub fn add_object(&mut self, polygon: Vec<Vector>, position: Vector) -> Result<ObjectMut<'_>> {
        self.insert(BodyBuilder::new().polygon(polygon).at(position))
    }

    /// Add a body described by `builder`
    pub fn insert(&mut self, builder: BodyBuilder) -> Result<ObjectMut<'_>> {
        let id = ObjectId(self.object_ids.allocate());
        match self.objects.entry(id) {
            hash_map::Entry::Occupied(_) => return Err(PhysicsError::ObjectAlreadyExists(id)),
            hash_map::Entry::Vacant(slot) => {
                let body = slot.insert(builder.build(id));
                debug!("added object {} at {}", id, body.stored_position());
            }
        }
        self.object_mut(id)
    }

    /// Read-only access to a body. Does not recompute.
    pub fn object(&self, id: ObjectId) -> Result<&Body> {
        self.objects.get(&id).ok_or(PhysicsError::ObjectNotFound(id))
    }

    /// Mutable view of a body whose reads are brought up to date
    pub fn object_mut(&mut self, id: ObjectId) -> Result<ObjectMut<'_>> {
        match self.objects.entry(id) {
            hash_map::Entry::Occupied(entry) => Ok(ObjectMut {
                entry,
                clock: self.clock.as_ref(),
            }),
            hash_map::Entry::Vacant(_) => Err(PhysicsError::ObjectNotFound(id)),
        }
    }

    /// Position as stored at the body's last recompute.
    ///
    /// Unlike `ObjectMut::position` this does not fold in pending force time.
    pub fn object_position(&self, id: ObjectId) -> Result<Vector> {
        self.object(id).map(Body::stored_position)
    }

    /// Remove a body together with its forces
    pub fn remove_object(&mut self, id: ObjectId) -> Result<Body> {
        let body = self
            .objects
            .remove(&id)
            .ok_or(PhysicsError::ObjectNotFound(id))?;
        debug!("removed object {}", id);
        Ok(body)
    }

    /// Attach a force to the body with the given id
    pub fn add_force(&mut self, id: ObjectId, magnitude: f64, direction: Vector) -> Result<ForceId> {
        let mut object = self.object_mut(id)?;
        let force = object.add_force(magnitude, direction)?;
        Ok(force.id())
    }

    /// Remove one force from a body, keeping its effect up to now
    pub fn remove_force(&mut self, id: ObjectId, force: ForceId) -> Result<Force> {
        self.object_mut(id)?.force_mut(force)?.remove()
    }

    /// Number of registered bodies
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// Ids of every registered body, ascending
    pub fn object_ids(&self) -> Vec<ObjectId> {
        let mut ids: Vec<_> = self.objects.keys().copied().collect();
        ids.sort_unstable();
        ids
    }
}

/// Mutable view of one registered body
///
/// `position` and `velocity` recompute the body against the system clock
/// before returning. Removing the body consumes the view.
pub struct ObjectMut<'a> {
    entry: hash_map::OccupiedEntry<'a, ObjectId, Body>,
    clock: &'a dyn Clock,
}

impl<'a> ObjectMut<'a> {
    pub fn id(&self) -> ObjectId {
        *self.entry.key()
    }

    /// The underlying body, as of its last recompute
    pub fn body(&self) -> &Body {
        self.entry.get()
    }

    /// Recompute, then return the position
    pub fn position(&mut self) -> Vector {
        let now = self.clock.now();
        self.entry.get_mut().position_at(now)
    }

    /// Recompute, then return the velocity
    pub fn velocity(&mut self) -> Vector {
        let now = self.clock.now();
        self.entry.get_mut().velocity_at(now)
    }

    /// Attach a force starting now. Past time is not credited to it.
    pub fn add_force(&mut self, magnitude: f64, direction: Vector) -> Result<ForceMut<'_>> {
        let now = self.clock.now();
        let id = self.entry.get_mut().attach_force(magnitude, direction, now)?;
        ForceMut::new(self.entry.get_mut(), self.clock, id)
    }

    /// Look up a force without recomputing
    pub fn force(&self, id: ForceId) -> Result<&Force> {
        self.entry.get().force(id)
    }

    /// Mutable view of a force
    pub fn force_mut(&mut self, id: ForceId) -> Result<ForceMut<'_>> {
        ForceMut::new(self.entry.get_mut(), self.clock, id)
    }

    /// Detach the body and all its forces from the system.
    ///
    /// Use `PhysicsSystem::remove_object` to remove by id; it reports
    /// `ObjectNotFound` when the body is already gone.
    pub fn remove(self) -> Body {
        let (id, body) = self.entry.remove_entry();
        debug!("removed object {}", id);
        body
    }
}
