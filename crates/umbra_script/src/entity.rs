//! Script-side view of one engine entity

use crate::bridge::Bridge;
use crate::call::Engine;
use crate::components::{ComponentProxy, Transform};
use crate::error::{CallError, CallResult};
use crate::handle::EntityHandle;
use crate::host::ScriptInstance;
use std::fmt;
use umbra_core::ecs::ComponentType;

/// An entity as scripts see it: a handle plus the bridge used to reach the
/// engine. Holds no component data.
#[derive(Clone)]
pub struct ScriptEntity {
    id: EntityHandle,
    bridge: Bridge,
}

impl ScriptEntity {
    pub(crate) fn new(id: EntityHandle, bridge: Bridge) -> Self {
        Self { id, bridge }
    }

    pub fn id(&self) -> EntityHandle {
        self.id
    }

    pub fn bridge(&self) -> &Bridge {
        &self.bridge
    }

    pub fn engine(&self) -> &Engine {
        self.bridge.engine()
    }

    pub fn is_alive(&self) -> bool {
        self.engine().entity_exists(self.id)
    }

    pub fn name(&self) -> CallResult<String> {
        self.engine().tag(self.id)
    }

    pub fn set_name(&self, name: &str) -> CallResult<()> {
        self.engine().set_tag(self.id, name)
    }

    /// Every entity is created with a transform, so this skips the lookup.
    pub fn transform(&self) -> Transform {
        Transform::bind(self.clone())
    }

    /// `false` for dead handles as well as for missing components.
    pub fn has_component<T: ComponentProxy>(&self) -> bool {
        self.engine()
            .has_component(self.id, T::TYPE)
            .unwrap_or(false)
    }

    /// A fresh proxy for `T`, or `None` when the entity lacks it or is gone.
    pub fn get_component<T: ComponentProxy>(&self) -> Option<T> {
        self.has_component::<T>().then(|| T::bind(self.clone()))
    }

    /// Attach a default `T`. If one is already attached the existing
    /// component is returned untouched.
    pub fn add_component<T: ComponentProxy>(&self) -> CallResult<T> {
        match self.engine().add_component(self.id, T::TYPE) {
            Ok(()) | Err(CallError::DuplicateComponent { .. }) => Ok(T::bind(self.clone())),
            Err(err) => Err(err),
        }
    }

    /// Detach `T`. Returns `false` when there was nothing to remove.
    pub fn remove_component<T: ComponentProxy>(&self) -> CallResult<bool> {
        self.engine().remove_component(self.id, T::TYPE)
    }

    /// Presence check keyed by the component's stable name, for callers that
    /// only know the kind at runtime.
    pub fn has_component_named(&self, name: &str) -> CallResult<bool> {
        self.engine().has_component(self.id, component_type(name)?)
    }

    pub fn add_component_named(&self, name: &str) -> CallResult<()> {
        self.engine().add_component(self.id, component_type(name)?)
    }

    pub fn remove_component_named(&self, name: &str) -> CallResult<bool> {
        self.engine().remove_component(self.id, component_type(name)?)
    }

    pub fn destroy(&self) -> CallResult<()> {
        self.bridge.destroy_entity(self.id)
    }

    pub fn script_instance(&self) -> Option<ScriptInstance> {
        self.bridge.script_instance(self.id)
    }

    pub fn create(&self, name: &str) -> ScriptEntity {
        self.bridge.create_entity(name)
    }

    pub fn find_by_name(&self, name: &str) -> Option<ScriptEntity> {
        self.bridge.find_entity_by_name(name)
    }
}

fn component_type(name: &str) -> CallResult<ComponentType> {
    ComponentType::from_name(name).ok_or_else(|| CallError::UnknownComponentType(name.to_owned()))
}

impl PartialEq for ScriptEntity {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for ScriptEntity {}

impl fmt::Debug for ScriptEntity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ScriptEntity").field(&self.id).finish()
    }
}
