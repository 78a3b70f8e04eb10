//! Shared script-side state
//!
//! A [`Bridge`] is what every [`ScriptEntity`] carries: the engine call
//! surface plus the table of attached script instances. Cloning it is cheap
//! and all clones see the same table.

use crate::call::Engine;
use crate::entity::ScriptEntity;
use crate::error::{CallError, CallResult, ScriptError};
use crate::handle::EntityHandle;
use crate::host::{EntityScript, ScriptInstance};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, TryLockError};

pub(crate) type ScriptSlot = Arc<Mutex<Box<dyn EntityScript>>>;

pub(crate) fn lock<T: ?Sized>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

#[derive(Default)]
struct Registry {
    /// Attached instances in attachment order.
    attached: Vec<(EntityHandle, ScriptSlot)>,
    /// Entities destroyed while their own callback was running.
    deferred: Vec<(EntityHandle, ScriptSlot)>,
}

#[derive(Clone)]
pub struct Bridge {
    engine: Engine,
    registry: Arc<Mutex<Registry>>,
}

impl Bridge {
    pub fn new(engine: Engine) -> Self {
        Self {
            engine,
            registry: Arc::new(Mutex::new(Registry::default())),
        }
    }

    pub fn engine(&self) -> &Engine {
        &self.engine
    }

    /// Wrap a handle without checking that it names a live entity.
    pub fn entity(&self, handle: EntityHandle) -> ScriptEntity {
        ScriptEntity::new(handle, self.clone())
    }

    pub fn create_entity(&self, name: &str) -> ScriptEntity {
        self.entity(self.engine.create_entity(name))
    }

    pub fn find_entity_by_name(&self, name: &str) -> Option<ScriptEntity> {
        let handle = self.engine.find_entity_by_name(name);
        (!handle.is_invalid()).then(|| self.entity(handle))
    }

    pub fn primary_camera(&self) -> Option<ScriptEntity> {
        let handle = self.engine.primary_camera_entity();
        (!handle.is_invalid()).then(|| self.entity(handle))
    }

    /// The script instance attached to `entity`, if any.
    ///
    /// An entity whose destroy is queued keeps its instance until the
    /// teardown completes.
    pub fn script_instance(&self, entity: EntityHandle) -> Option<ScriptInstance> {
        let registry = lock(&self.registry);
        let found = registry
            .attached
            .iter()
            .chain(registry.deferred.iter())
            .find(|(handle, _)| *handle == entity)
            .map(|(handle, slot)| ScriptInstance::new(*handle, Arc::clone(slot)));
        found
    }

    /// Destroy an entity, running its script's `on_destroyed` first.
    ///
    /// When the entity's own callback is executing right now the teardown is
    /// queued and completes as soon as that callback returns.
    pub fn destroy_entity(&self, entity: EntityHandle) -> CallResult<()> {
        if !self.engine.entity_exists(entity) {
            return Err(CallError::InvalidEntity(entity));
        }
        let slot = {
            let mut registry = lock(&self.registry);
            if registry.deferred.iter().any(|(handle, _)| *handle == entity) {
                tracing::debug!(%entity, "destroy already queued");
                return Ok(());
            }
            let position = registry
                .attached
                .iter()
                .position(|(handle, _)| *handle == entity);
            let removed = position.map(|index| registry.attached.remove(index).1);
            removed
        };
        let Some(slot) = slot else {
            return self.engine.destroy_entity(entity);
        };

        let busy = match slot.try_lock() {
            Ok(mut script) => {
                self.notify_destroyed(entity, &mut **script);
                false
            }
            Err(TryLockError::Poisoned(poisoned)) => {
                self.notify_destroyed(entity, &mut **poisoned.into_inner());
                false
            }
            Err(TryLockError::WouldBlock) => true,
        };
        if busy {
            tracing::debug!(%entity, "destroy deferred until the running callback returns");
            lock(&self.registry).deferred.push((entity, slot));
            return Ok(());
        }
        self.teardown(entity)
    }

    pub(crate) fn attach(&self, entity: EntityHandle, slot: ScriptSlot) -> Result<(), ScriptError> {
        if !self.engine.entity_exists(entity) {
            return Err(CallError::InvalidEntity(entity).into());
        }
        let mut registry = lock(&self.registry);
        if registry.attached.iter().any(|(handle, _)| *handle == entity) {
            return Err(ScriptError::AlreadyScripted(entity));
        }
        registry.attached.push((entity, slot));
        Ok(())
    }

    pub(crate) fn slot(&self, entity: EntityHandle) -> Option<ScriptSlot> {
        lock(&self.registry)
            .attached
            .iter()
            .find(|(handle, _)| *handle == entity)
            .map(|(_, slot)| Arc::clone(slot))
    }

    pub(crate) fn snapshot(&self) -> Vec<(EntityHandle, ScriptSlot)> {
        lock(&self.registry)
            .attached
            .iter()
            .map(|(handle, slot)| (*handle, Arc::clone(slot)))
            .collect()
    }

    pub(crate) fn drain_attached(&self) -> Vec<(EntityHandle, ScriptSlot)> {
        std::mem::take(&mut lock(&self.registry).attached)
    }

    pub(crate) fn attached_count(&self) -> usize {
        lock(&self.registry).attached.len()
    }

    /// Finish destroys that were queued behind a running callback.
    pub(crate) fn flush_deferred(&self) {
        loop {
            let next = {
                let mut registry = lock(&self.registry);
                if registry.deferred.is_empty() {
                    None
                } else {
                    Some(registry.deferred.remove(0))
                }
            };
            let Some((entity, slot)) = next else {
                break;
            };
            self.notify_destroyed(entity, &mut **lock(&slot));
            if let Err(err) = self.teardown(entity) {
                tracing::warn!(%entity, error = %err, "deferred destroy failed");
            }
        }
    }

    pub(crate) fn notify_destroyed(&self, entity: EntityHandle, script: &mut dyn EntityScript) {
        let this = self.entity(entity);
        if let Err(err) = script.on_destroyed(&this) {
            tracing::error!(%entity, callback = "on_destroyed", error = %err, "script callback failed");
        }
    }

    // on_destroyed may already have destroyed the entity itself
    fn teardown(&self, entity: EntityHandle) -> CallResult<()> {
        if self.engine.entity_exists(entity) {
            self.engine.destroy_entity(entity)
        } else {
            Ok(())
        }
    }
}
