// Identifiers for objects and the forces attached to them

use std::fmt;

/// Identifier of a body within a `PhysicsSystem`
///
/// Allocated from 0 upward and never reused by the same system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ObjectId(pub(crate) u32);

impl ObjectId {
    /// Create an object ID from a raw u32
    pub fn from_u32(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw u32 value
    pub fn as_u32(&self) -> u32 {
        self.0
    }
}

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identifier of a force, scoped to the body that owns it
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ForceId(pub(crate) u32);

impl ForceId {
    /// Create a force ID from a raw u32
    pub fn from_u32(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw u32 value
    pub fn as_u32(&self) -> u32 {
        self.0
    }
}

impl fmt::Display for ForceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Monotonic id counter. Wraps on overflow; callers guard against collisions.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct IdAllocator {
    next: u32,
}

impl IdAllocator {
    pub(crate) fn new() -> Self {
        Self { next: 0 }
    }

    pub(crate) fn allocate(&mut self) -> u32 {
        let id = self.next;
        self.next = self.next.wrapping_add(1);
        id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_roundtrip() {
        assert_eq!(ObjectId::from_u32(7).as_u32(), 7);
        assert_eq!(ForceId::from_u32(3).as_u32(), 3);
    }

    #[test]
    fn test_allocator_is_monotonic() {
        let mut ids = IdAllocator::new();
        assert_eq!(ids.allocate(), 0);
        assert_eq!(ids.allocate(), 1);
        assert_eq!(ids.allocate(), 2);
    }

    #[test]
    fn test_allocator_wraps() {
        let mut ids = IdAllocator { next: u32::MAX };
        assert_eq!(ids.allocate(), u32::MAX);
        assert_eq!(ids.allocate(), 0);
    }
}
