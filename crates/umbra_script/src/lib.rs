//! Umbra Scripting Bridge
//!
//! Lets game logic manipulate engine entities and components without
//! touching engine memory.
//!
//! ## Architecture
//!
//! - **Call surface:** [`CallSurface`] is the complete set of boundary
//!   operations. Entities cross it as [`EntityHandle`] values and every
//!   argument and result is passed by value.
//! - **Proxies:** [`components`] wraps each component kind in a type whose
//!   accessors forward straight to the call surface.
//! - **Generic resolution:** [`ComponentProxy`] maps a proxy type to its
//!   engine descriptor at compile time.
//! - **Lifecycle:** [`ScriptHost`] drives [`EntityScript`] callbacks.

mod bridge;
pub mod call;
pub mod components;
mod entity;
mod error;
pub mod fields;
mod handle;
pub mod host;
pub mod resources;

pub use bridge::Bridge;
pub use call::{CallSurface, Engine};
pub use components::ComponentProxy;
pub use entity::ScriptEntity;
pub use error::{CallError, CallResult, ScriptError, ScriptResult};
pub use fields::LogLevel;
pub use handle::EntityHandle;
pub use host::{Collision2DInfo, EntityScript, ScriptHost, ScriptInstance};
pub use resources::{Shader, Texture2D};
