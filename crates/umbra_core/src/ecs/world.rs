// world.rs - ECS World with entity management and component storage

use crate::components::{
    BoxCollider2D, Camera, CircleCollider2D, CircleRenderer, RigidBody2D, SpriteRenderer, Tag,
    Transform,
};
use crate::ecs::column::{Column, ErasedColumn};
use crate::ecs::{Component, ComponentType, Entity, Generation};
use std::collections::HashMap;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum WorldError {
    #[error("entity {0} does not exist")]
    NoSuchEntity(Entity),
    #[error("entity {entity} already has a {component} component")]
    AlreadyPresent {
        entity: Entity,
        component: ComponentType,
    },
}

#[derive(Debug, Clone, Copy)]
struct Slot {
    generation: Generation,
    alive: bool,
}

/// The main ECS world containing all entities and components.
///
/// Every built-in component type gets a column at construction, so lookups by
/// descriptor are total over `ComponentType::ALL`.
pub struct World {
    slots: Vec<Slot>,
    free: Vec<u32>,
    columns: HashMap<ComponentType, Box<dyn ErasedColumn>>,
    live: usize,
}

impl World {
    /// Create a new empty world.
    pub fn new() -> Self {
        let mut world = Self {
            slots: Vec::new(),
            free: Vec::new(),
            columns: HashMap::new(),
            live: 0,
        };
        world.register::<Tag>();
        world.register::<Transform>();
        world.register::<SpriteRenderer>();
        world.register::<CircleRenderer>();
        world.register::<RigidBody2D>();
        world.register::<BoxCollider2D>();
        world.register::<CircleCollider2D>();
        world.register::<Camera>();
        world
    }

    fn register<T: Component>(&mut self) {
        self.columns.insert(T::TYPE, Box::new(Column::<T>::new()));
    }

    /// Spawn an empty entity.
    ///
    /// Uses a free list to reuse despawned slots; the reused slot carries the
    /// generation bumped at despawn time.
    pub fn spawn(&mut self) -> Entity {
        self.live += 1;
        if let Some(index) = self.free.pop() {
            let slot = &mut self.slots[index as usize];
            slot.alive = true;
            return Entity::new(index, slot.generation);
        }

        let index = self.slots.len() as u32;
        self.slots.push(Slot {
            generation: 1,
            alive: true,
        });
        Entity::new(index, 1)
    }

    /// Despawn an entity and drop all of its components.
    ///
    /// The slot's generation is incremented, which invalidates any stale
    /// handles pointing to the old entity.
    pub fn despawn(&mut self, entity: Entity) -> bool {
        if !self.is_alive(entity) {
            return false;
        }
        for column in self.columns.values_mut() {
            column.remove(entity.index());
        }

        let slot = &mut self.slots[entity.index() as usize];
        slot.alive = false;
        slot.generation = slot.generation.wrapping_add(1).max(1);
        self.free.push(entity.index());
        self.live -= 1;
        tracing::trace!(%entity, "despawned");
        true
    }

    /// Whether `entity` refers to a live slot with a matching generation.
    pub fn is_alive(&self, entity: Entity) -> bool {
        self.slots
            .get(entity.index() as usize)
            .is_some_and(|slot| slot.alive && slot.generation == entity.generation())
    }

    fn check(&self, entity: Entity) -> Result<(), WorldError> {
        if self.is_alive(entity) {
            Ok(())
        } else {
            Err(WorldError::NoSuchEntity(entity))
        }
    }

    /// Does the entity carry a component of the given kind?
    pub fn has(&self, entity: Entity, component: ComponentType) -> Result<bool, WorldError> {
        self.check(entity)?;
        Ok(self
            .columns
            .get(&component)
            .is_some_and(|column| column.contains(entity.index())))
    }

    /// Attach a default-initialised component by descriptor.
    pub fn insert_default(
        &mut self,
        entity: Entity,
        component: ComponentType,
    ) -> Result<(), WorldError> {
        if self.has(entity, component)? {
            return Err(WorldError::AlreadyPresent { entity, component });
        }
        if let Some(column) = self.columns.get_mut(&component) {
            column.insert_default(entity.index());
        }
        Ok(())
    }

    /// Detach a component by descriptor. Returns `false` when it was absent.
    pub fn remove(&mut self, entity: Entity, component: ComponentType) -> Result<bool, WorldError> {
        self.check(entity)?;
        Ok(self
            .columns
            .get_mut(&component)
            .is_some_and(|column| column.remove(entity.index())))
    }

    /// Attach a typed component, replacing nothing.
    pub fn insert<T: Component>(&mut self, entity: Entity, value: T) -> Result<(), WorldError> {
        if self.has(entity, T::TYPE)? {
            return Err(WorldError::AlreadyPresent {
                entity,
                component: T::TYPE,
            });
        }
        if let Some(column) = self.column_mut::<T>() {
            column.insert(entity.index(), value);
        }
        Ok(())
    }

    /// Get an immutable reference to a component.
    ///
    /// Returns None if the entity is invalid or doesn't have the component.
    pub fn get<T: Component>(&self, entity: Entity) -> Option<&T> {
        if !self.is_alive(entity) {
            return None;
        }
        self.column::<T>()?.get(entity.index())
    }

    /// Get a mutable reference to a component.
    ///
    /// Returns None if the entity is invalid or doesn't have the component.
    pub fn get_mut<T: Component>(&mut self, entity: Entity) -> Option<&mut T> {
        if !self.is_alive(entity) {
            return None;
        }
        self.column_mut::<T>()?.get_mut(entity.index())
    }

    fn column<T: Component>(&self) -> Option<&Column<T>> {
        self.columns.get(&T::TYPE)?.as_any().downcast_ref()
    }

    fn column_mut<T: Component>(&mut self) -> Option<&mut Column<T>> {
        self.columns.get_mut(&T::TYPE)?.as_any_mut().downcast_mut()
    }

    /// Live entities in slot order.
    pub fn entities(&self) -> impl Iterator<Item = Entity> + '_ {
        self.slots
            .iter()
            .enumerate()
            .filter(|(_, slot)| slot.alive)
            .map(|(index, slot)| Entity::new(index as u32, slot.generation))
    }

    /// Get the number of live entities.
    pub fn live_entity_count(&self) -> usize {
        self.live
    }
}

impl Default for World {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;

    #[test]
    fn despawn_invalidates_handle_and_recycles_slot() {
        let mut world = World::new();
        let first = world.spawn();
        assert!(world.despawn(first));
        assert!(!world.is_alive(first));
        assert!(!world.despawn(first));

        let second = world.spawn();
        assert_eq!(second.index(), first.index());
        assert_ne!(second.generation(), first.generation());
        assert_ne!(second.to_bits(), first.to_bits());
        assert!(world.is_alive(second));
        assert_eq!(world.live_entity_count(), 1);
    }

    #[test]
    fn insert_default_rejects_duplicates_without_mutation() {
        let mut world = World::new();
        let e = world.spawn();
        world.insert_default(e, ComponentType::Transform).unwrap();
        world.get_mut::<Transform>(e).unwrap().translation = Vec3::X;

        let err = world.insert_default(e, ComponentType::Transform).unwrap_err();
        assert_eq!(
            err,
            WorldError::AlreadyPresent {
                entity: e,
                component: ComponentType::Transform
            }
        );
        assert_eq!(world.get::<Transform>(e).unwrap().translation, Vec3::X);
    }

    #[test]
    fn remove_is_a_noop_when_absent() {
        let mut world = World::new();
        let e = world.spawn();
        world.insert(e, Tag { tag: "a".into() }).unwrap();
        assert_eq!(world.remove(e, ComponentType::Camera), Ok(false));
        assert_eq!(world.remove(e, ComponentType::Tag), Ok(true));
        assert_eq!(world.remove(e, ComponentType::Tag), Ok(false));
    }

    #[test]
    fn stale_handle_never_reads_new_occupant() {
        let mut world = World::new();
        let old = world.spawn();
        world.insert_default(old, ComponentType::SpriteRenderer).unwrap();
        world.despawn(old);

        let new = world.spawn();
        world.insert_default(new, ComponentType::SpriteRenderer).unwrap();
        assert!(world.get::<SpriteRenderer>(old).is_none());
        assert_eq!(
            world.has(old, ComponentType::SpriteRenderer),
            Err(WorldError::NoSuchEntity(old))
        );
        assert!(world.get::<SpriteRenderer>(new).is_some());
    }

    #[test]
    fn entities_lists_only_live_slots() {
        let mut world = World::new();
        let a = world.spawn();
        let b = world.spawn();
        let c = world.spawn();
        world.despawn(b);
        assert_eq!(world.entities().collect::<Vec<_>>(), vec![a, c]);
    }
}
