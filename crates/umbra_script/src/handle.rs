//! Entity identity at the script boundary
//!
//! Scripts hold entities as plain 64-bit values, never as pointers.

use std::fmt;
use umbra_core::ecs::Entity;

/// Opaque handle naming one live engine entity.
///
/// Handles are only meaningful while the engine keeps the entity alive; a
/// destroyed entity's slot may be recycled under a different handle value.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct EntityHandle(pub u64);

impl EntityHandle {
    /// Sentinel returned by lookups that found nothing. Never names a live entity.
    pub const INVALID: EntityHandle = EntityHandle(0);

    pub fn is_invalid(self) -> bool {
        self == Self::INVALID
    }

    pub fn raw(self) -> u64 {
        self.0
    }
}

impl From<Entity> for EntityHandle {
    fn from(entity: Entity) -> Self {
        EntityHandle(entity.to_bits())
    }
}

impl From<EntityHandle> for Entity {
    fn from(handle: EntityHandle) -> Self {
        Entity::from_bits(handle.0)
    }
}

impl fmt::Display for EntityHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:016x}", self.0)
    }
}
