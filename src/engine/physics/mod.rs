// Lazily integrated 2D force system
//
// Bodies accumulate forces; position and velocity are only brought up to
// date when observed or when a force on the body changes.
//
// ## Architecture
//
// - `handle`: object and force identifiers
// - `force`: force data and the mutable force view
// - `body`: body data, builder and the recompute step
// - `world`: the registry that owns bodies and the clock

pub mod body;
mod force;
mod handle;
mod world;

pub use body::{Body, BodyBuilder};
pub use force::{Force, ForceMut};
pub use handle::{ForceId, ObjectId};
pub use world::{ObjectMut, PhysicsSystem};

/// Physics errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PhysicsError {
    #[error("Object does not exist: {0}")]
    ObjectNotFound(ObjectId),

    #[error("Force {force} does not exist on object {object}")]
    ForceNotFound { object: ObjectId, force: ForceId },

    #[error("Object already exists: {0}")]
    ObjectAlreadyExists(ObjectId),

    #[error("Force {force} already exists on object {object}")]
    ForceAlreadyExists { object: ObjectId, force: ForceId },
}

impl PhysicsError {
    /// Whether the error came from addressing an id that is not present
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            PhysicsError::ObjectNotFound(_) | PhysicsError::ForceNotFound { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, PhysicsError>;
