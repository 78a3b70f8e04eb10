//! Entity handle with generational index
//!
//! Entities are lightweight handles (8 bytes) that reference data in the World.
//! The generation counter prevents use-after-free bugs: a slot that is recycled
//! after a despawn hands out a new generation, so stale handles never alias the
//! entity that replaced them.

use std::fmt;

/// Entity handle (generation-indexed for safety)
///
/// Format: [32-bit generation | 32-bit index]
/// - Index: Position in the world's slot array
/// - Generation: Incremented on entity destruction (prevents use-after-free)
///
/// Generations start at 1, so the packed form of a live entity is never `0`.
///
/// Example:
/// ```ignore
/// let entity = world.spawn();
/// world.despawn(entity);
/// // entity handle is now invalid (generation mismatch)
/// assert!(!world.is_alive(entity));
/// ```
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Entity {
    index: u32,
    generation: u32,
}

/// Generation counter stored per slot.
pub type Generation = u32;

impl Entity {
    pub(crate) const fn new(index: u32, generation: Generation) -> Self {
        Self { index, generation }
    }

    pub fn index(&self) -> u32 {
        self.index
    }

    pub fn generation(&self) -> Generation {
        self.generation
    }

    /// Serialize to 64-bit integer (for the script boundary)
    pub fn to_bits(&self) -> u64 {
        ((self.generation as u64) << 32) | (self.index as u64)
    }

    /// Deserialize from 64-bit integer
    pub fn from_bits(bits: u64) -> Self {
        Self {
            index: bits as u32,
            generation: (bits >> 32) as u32,
        }
    }
}

impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}v{}", self.index, self.generation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bits_round_trip_keeps_index_and_generation() {
        let entity = Entity::new(7, 3);
        let bits = entity.to_bits();
        assert_eq!(bits, (3u64 << 32) | 7);
        assert_eq!(Entity::from_bits(bits), entity);
    }

    #[test]
    fn first_generation_is_never_zero_bits() {
        assert_ne!(Entity::new(0, 1).to_bits(), 0);
    }
}
