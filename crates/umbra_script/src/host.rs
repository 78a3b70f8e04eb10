//! Script lifecycle dispatch
//!
//! Game logic implements [`EntityScript`]. A [`ScriptHost`] owns the attached
//! instances and drives their callbacks from the engine's update loop: once
//! on creation, once per tick, on physics contacts and before teardown.
//!
//! A callback that returns an error only loses the rest of its own effect.
//! The host logs it and carries on with the next instance.

use crate::bridge::{lock, Bridge, ScriptSlot};
use crate::call::Engine;
use crate::entity::ScriptEntity;
use crate::error::{CallResult, ScriptError, ScriptResult};
use crate::handle::EntityHandle;
use glam::Vec2;
use std::any::Any;
use std::sync::{Arc, Mutex};

/// Upcast helper so attached instances can be recovered by concrete type.
pub trait AsAny: Any {
    fn as_any(&self) -> &dyn Any;
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

impl<T: Any> AsAny for T {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

/// Contact data passed to the collision callbacks.
#[derive(Debug, Copy, Clone, PartialEq, Default)]
pub struct Collision2DInfo {
    pub normal: Vec2,
    pub points: [Vec2; 2],
    pub separations: [f32; 2],
}

#[allow(unused_variables)]
pub trait EntityScript: AsAny + Send {
    fn on_create(&mut self, entity: &ScriptEntity) -> ScriptResult {
        Ok(())
    }

    fn on_update(&mut self, entity: &ScriptEntity, dt: f32) -> ScriptResult {
        Ok(())
    }

    /// Runs once, before the engine releases the entity.
    fn on_destroyed(&mut self, entity: &ScriptEntity) -> ScriptResult {
        Ok(())
    }

    fn on_collision_2d_enter(
        &mut self,
        entity: &ScriptEntity,
        info: &Collision2DInfo,
        other: &ScriptEntity,
    ) -> ScriptResult {
        Ok(())
    }

    fn on_collision_2d_leave(
        &mut self,
        entity: &ScriptEntity,
        info: &Collision2DInfo,
        other: &ScriptEntity,
    ) -> ScriptResult {
        Ok(())
    }
}

/// Shared reference to one attached script instance.
#[derive(Clone)]
pub struct ScriptInstance {
    entity: EntityHandle,
    slot: ScriptSlot,
}

impl ScriptInstance {
    pub(crate) fn new(entity: EntityHandle, slot: ScriptSlot) -> Self {
        Self { entity, slot }
    }

    pub fn entity(&self) -> EntityHandle {
        self.entity
    }

    pub fn is<T: EntityScript>(&self) -> bool {
        self.slot
            .try_lock()
            .map(|script| (**script).as_any().is::<T>())
            .unwrap_or(false)
    }

    /// Run `f` against the instance as a `T`.
    ///
    /// Returns `None` when the instance is some other type, or when it is
    /// busy running one of its own callbacks.
    pub fn with<T: EntityScript, R>(&self, f: impl FnOnce(&mut T) -> R) -> Option<R> {
        let mut script = self.slot.try_lock().ok()?;
        (**script).as_any_mut().downcast_mut::<T>().map(f)
    }
}

pub struct ScriptHost {
    bridge: Bridge,
}

impl ScriptHost {
    pub fn new(engine: Engine) -> Self {
        Self {
            bridge: Bridge::new(engine),
        }
    }

    pub fn bridge(&self) -> &Bridge {
        &self.bridge
    }

    pub fn entity(&self, handle: EntityHandle) -> ScriptEntity {
        self.bridge.entity(handle)
    }

    /// Attach `script` to a live entity and run its `on_create`.
    pub fn attach(
        &self,
        entity: EntityHandle,
        script: impl EntityScript,
    ) -> Result<ScriptInstance, ScriptError> {
        let slot: ScriptSlot = Arc::new(Mutex::new(Box::new(script)));
        self.bridge.attach(entity, Arc::clone(&slot))?;
        tracing::debug!(%entity, "script attached");
        self.dispatch(entity, &slot, "on_create", |script, this| {
            script.on_create(this)
        });
        Ok(ScriptInstance::new(entity, slot))
    }

    pub fn is_attached(&self, entity: EntityHandle) -> bool {
        self.bridge.slot(entity).is_some()
    }

    pub fn len(&self) -> usize {
        self.bridge.attached_count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Run `on_update` on every attached instance in attachment order.
    pub fn update(&self, dt: f32) {
        for (entity, slot) in self.bridge.snapshot() {
            // destroyed earlier in this tick
            if self.bridge.slot(entity).is_none() {
                continue;
            }
            self.dispatch(entity, &slot, "on_update", |script, this| {
                script.on_update(this, dt)
            });
        }
    }

    /// Report a contact beginning. Both participants are notified, each with
    /// the other as `other`.
    pub fn collision_enter(&self, a: EntityHandle, b: EntityHandle, info: &Collision2DInfo) {
        self.collision(a, b, "on_collision_2d_enter", |script, this, other| {
            script.on_collision_2d_enter(this, info, other)
        });
    }

    pub fn collision_leave(&self, a: EntityHandle, b: EntityHandle, info: &Collision2DInfo) {
        self.collision(a, b, "on_collision_2d_leave", |script, this, other| {
            script.on_collision_2d_leave(this, info, other)
        });
    }

    pub fn destroy_entity(&self, entity: EntityHandle) -> CallResult<()> {
        self.bridge.destroy_entity(entity)
    }

    /// Run `on_destroyed` on every remaining instance and detach them all.
    /// Entities stay alive in the engine.
    pub fn shutdown(&self) {
        for (entity, slot) in self.bridge.drain_attached() {
            self.bridge.notify_destroyed(entity, &mut **lock(&slot));
        }
        self.bridge.flush_deferred();
    }

    fn collision<F>(&self, a: EntityHandle, b: EntityHandle, name: &'static str, call: F)
    where
        F: Fn(&mut dyn EntityScript, &ScriptEntity, &ScriptEntity) -> ScriptResult,
    {
        for (this, other) in [(a, b), (b, a)] {
            let Some(slot) = self.bridge.slot(this) else {
                continue;
            };
            let other = self.bridge.entity(other);
            self.dispatch(this, &slot, name, |script, this| call(script, this, &other));
        }
    }

    fn dispatch<F>(&self, entity: EntityHandle, slot: &ScriptSlot, name: &'static str, call: F)
    where
        F: FnOnce(&mut dyn EntityScript, &ScriptEntity) -> ScriptResult,
    {
        let this = self.bridge.entity(entity);
        {
            let mut script = lock(slot);
            if let Err(err) = call(&mut **script, &this) {
                tracing::error!(%entity, callback = name, error = %err, "script callback failed");
            }
        }
        self.bridge.flush_deferred();
    }
}
