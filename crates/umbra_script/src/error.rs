use crate::handle::EntityHandle;
use thiserror::Error;
use umbra_asset::AssetError;
use umbra_core::ecs::ComponentType;

pub type CallResult<T> = Result<T, CallError>;
pub type ScriptResult = Result<(), ScriptError>;

/// Failure of a single call across the script/engine boundary.
///
/// A failed call leaves entity and component state unchanged.
#[derive(Debug, Error)]
pub enum CallError {
    #[error("entity {0} does not exist")]
    InvalidEntity(EntityHandle),
    #[error("entity {entity} has no {component} component")]
    MissingComponent {
        entity: EntityHandle,
        component: ComponentType,
    },
    #[error("entity {entity} already has a {component} component")]
    DuplicateComponent {
        entity: EntityHandle,
        component: ComponentType,
    },
    #[error(transparent)]
    Resource(#[from] AssetError),
    #[error("component type '{0}' is not registered with the engine")]
    UnknownComponentType(String),
    #[error("'{name}' is not a field of {family}")]
    UnknownField { family: &'static str, name: String },
}

/// Failure raised while running a script callback.
///
/// Returning one aborts the rest of that callback only; the host logs it and
/// keeps dispatching.
#[derive(Debug, Error)]
pub enum ScriptError {
    #[error(transparent)]
    Call(#[from] CallError),
    #[error("entity {0} already has a script attached")]
    AlreadyScripted(EntityHandle),
    #[error("{0}")]
    Failed(String),
}
