//! Entity Component System core types.
//!
//! A deliberately small store: generational entity slots plus one sparse
//! column per built-in component type. Component kinds form a closed set
//! (`ComponentType`) so that code compiled outside the engine can name them
//! by a stable descriptor instead of a Rust type identity.

mod column;
mod component;
mod entity;
mod world;

pub use component::{Component, ComponentId, ComponentType};
pub use entity::{Entity, Generation};
pub use world::{World, WorldError};
